//! The twelve pipeline passes.
//!
//! Mass flows backward: the finished product mass is seeded on
//! distribution and each stage's waste raises the mass its upstream
//! stages must process. Emissions then flow forward per stage once mass
//! is settled. Every pass derives its output from the current simulator
//! and the reference data only.

use crate::country::{Country, CountryProfile};
use crate::db::Db;
use crate::error::{ExecutionError, FootprintResult};
use crate::process::{Process, ProcessId};
use crate::step::{Label, Step};
use crate::transport::{self, Distance};
use crate::units::{Co2e, Kwh, Megajoules};

use super::Simulator;

/// A pure transformation of the simulator.
pub(super) type Pass = fn(Simulator, &Db) -> FootprintResult<Simulator>;

/// Passes in execution order. Later passes read fields written by
/// earlier ones; the order must not change.
pub(super) const PIPELINE: [(&str, Pass); 12] = [
    ("init_steps", init_steps),
    ("seed_final_mass", seed_final_mass),
    ("making_waste", making_waste),
    ("weaving_knitting_waste", weaving_knitting_waste),
    ("material_waste", material_waste),
    ("material_co2", material_co2),
    ("weaving_knitting_co2", weaving_knitting_co2),
    ("ennoblement_co2", ennoblement_co2),
    ("making_co2", making_co2),
    ("step_transports", step_transports),
    ("transport_summary", transport_summary),
    ("final_co2", final_co2),
];

/// The process a country uses for one slot of its profile, if modeled.
fn country_process<'a>(
    db: &'a Db,
    country: &Country,
    slot: fn(&CountryProfile) -> Option<ProcessId>,
) -> Result<Option<&'a Process>, ExecutionError> {
    db.countries
        .profile(country)
        .and_then(slot)
        .map(|id| db.processes.require(id))
        .transpose()
}

fn init_steps(sim: Simulator, db: &Db) -> FootprintResult<Simulator> {
    let life_cycle = sim.life_cycle.try_update_steps(&Label::ORDER, |step| {
        let country = step.country.clone();
        step.reset().update_country(country, db)
    })?;
    Ok(Simulator { life_cycle, ..sim })
}

fn seed_final_mass(sim: Simulator, _db: &Db) -> FootprintResult<Simulator> {
    let mass = sim.mass;
    let life_cycle = sim
        .life_cycle
        .update_step(Label::Distribution, |step| Step { mass, ..step });
    Ok(Simulator { life_cycle, ..sim })
}

fn making_waste(sim: Simulator, db: &Db) -> FootprintResult<Simulator> {
    let making = db.processes.require(sim.product.making_process)?;
    let finished = sim.life_cycle.mass_at(Label::Distribution);
    let mass = (finished + finished * making.waste) / (1.0 - sim.product.pcr_waste);
    let waste = mass - finished;

    let life_cycle = sim
        .life_cycle
        .update_step(Label::Making, |step| Step { mass, waste, ..step })
        .update_steps(
            &[Label::MaterialAndSpinning, Label::WeavingKnitting, Label::Ennoblement],
            |step| Step { mass, ..step },
        );
    Ok(Simulator { life_cycle, ..sim })
}

fn weaving_knitting_waste(sim: Simulator, db: &Db) -> FootprintResult<Simulator> {
    let fabric = db.processes.require(sim.product.fabric_process)?;
    let base = sim.life_cycle.mass_at(Label::Making);
    let waste = base * fabric.waste;
    let mass = base + waste;

    let life_cycle = sim
        .life_cycle
        .update_step(Label::WeavingKnitting, |step| Step { mass, waste, ..step })
        .update_step(Label::MaterialAndSpinning, |step| Step { mass, ..step });
    Ok(Simulator { life_cycle, ..sim })
}

fn material_waste(sim: Simulator, db: &Db) -> FootprintResult<Simulator> {
    let material = db.processes.require(sim.material.process)?;
    let base = sim.life_cycle.mass_at(Label::WeavingKnitting);
    let waste = base * material.waste;
    let mass = base + waste;

    let life_cycle = sim
        .life_cycle
        .update_step(Label::MaterialAndSpinning, |step| Step { mass, waste, ..step });
    Ok(Simulator { life_cycle, ..sim })
}

fn material_co2(sim: Simulator, db: &Db) -> FootprintResult<Simulator> {
    let material = db.processes.require(sim.material.process)?;
    let life_cycle = sim.life_cycle.update_step(Label::MaterialAndSpinning, |step| Step {
        co2: material.co2_for_mass(step.mass),
        ..step
    });
    Ok(Simulator { life_cycle, ..sim })
}

fn weaving_knitting_co2(sim: Simulator, db: &Db) -> FootprintResult<Simulator> {
    // Knitting is measured on the ennoblement mass, weaving on its own stage mass.
    let kwh = sim.product.fabric_electricity(
        sim.life_cycle.mass_at(Label::Ennoblement),
        sim.life_cycle.mass_at(Label::WeavingKnitting),
    );
    let life_cycle = sim.life_cycle.try_update_steps(&[Label::WeavingKnitting], |step| {
        let co2 = country_process(db, &step.country, |p| p.electricity)?
            .map_or(Co2e::ZERO, |elec| elec.co2_for_kwh(kwh));
        Ok::<_, ExecutionError>(Step { kwh, co2, ..step })
    })?;
    Ok(Simulator { life_cycle, ..sim })
}

fn ennoblement_co2(sim: Simulator, db: &Db) -> FootprintResult<Simulator> {
    let life_cycle = sim.life_cycle.try_update_steps(&[Label::Ennoblement], |step| {
        let (dyeing_co2, heat, kwh) = match country_process(db, &step.country, |p| p.dyeing)? {
            Some(dyeing) => (
                dyeing.co2_for_mass(step.mass),
                dyeing.heat_for(step.mass),
                dyeing.electricity_for(step.mass),
            ),
            None => (Co2e::ZERO, Megajoules::ZERO, Kwh::ZERO),
        };
        let heat_co2 = country_process(db, &step.country, |p| p.heat)?
            .map_or(Co2e::ZERO, |p| p.co2_for_heat(heat));
        let elec_co2 = country_process(db, &step.country, |p| p.electricity)?
            .map_or(Co2e::ZERO, |p| p.co2_for_kwh(kwh));
        Ok::<_, ExecutionError>(Step {
            co2: dyeing_co2 + heat_co2 + elec_co2,
            heat,
            kwh,
            ..step
        })
    })?;
    Ok(Simulator { life_cycle, ..sim })
}

fn making_co2(sim: Simulator, db: &Db) -> FootprintResult<Simulator> {
    let making = db.processes.require(sim.product.making_process)?;
    let life_cycle = sim.life_cycle.try_update_steps(&[Label::Making], |step| {
        let kwh = making.electricity_for(step.mass);
        let elec_co2 = country_process(db, &step.country, |p| p.electricity)?
            .map_or(Co2e::ZERO, |p| p.co2_for_kwh(kwh));
        Ok::<_, ExecutionError>(Step {
            co2: making.co2_for_mass(step.mass) + elec_co2,
            kwh,
            ..step
        })
    })?;
    Ok(Simulator { life_cycle, ..sim })
}

fn step_transports(sim: Simulator, db: &Db) -> FootprintResult<Simulator> {
    let mut legs = Vec::with_capacity(Label::ORDER.len());
    legs.push(transport::leg(
        Distance::INITIAL,
        sim.life_cycle.mass_at(Label::MaterialAndSpinning),
        db.transports.modes(),
        db.processes.as_ref(),
    )?);
    for (upstream, downstream) in sim.life_cycle.pairs() {
        let shipped = downstream.mass;
        legs.push(transport::resolve(db, &upstream.country, &downstream.country, shipped)?);
    }

    let life_cycle = sim.life_cycle.update_steps(&Label::ORDER, |step| {
        let transport = step
            .label
            .index()
            .and_then(|i| legs.get(i).copied())
            .unwrap_or(step.transport);
        Step { transport, ..step }
    });
    Ok(Simulator { life_cycle, ..sim })
}

fn transport_summary(sim: Simulator, _db: &Db) -> FootprintResult<Simulator> {
    let transport = transport::aggregate(sim.life_cycle.iter().map(|step| &step.transport));
    Ok(Simulator { transport, ..sim })
}

fn final_co2(sim: Simulator, _db: &Db) -> FootprintResult<Simulator> {
    let steps: Co2e = sim.life_cycle.iter().map(|step| step.co2).sum();
    let co2 = steps + sim.transport.co2;
    Ok(Simulator { co2, ..sim })
}
