use textile_footprint::codec;
use textile_footprint::{
    Country, Db, FootprintError, Inputs, Label, ProcessInfo, Simulator, ValidationError,
};

fn db() -> Db {
    Db::builtin().unwrap()
}

fn country(code: &str) -> Country {
    Country::new(code).unwrap()
}

#[test]
fn every_builtin_product_and_material_computes() {
    let db = db();
    for product in db.products() {
        for material in db.materials() {
            let inputs = Inputs::new(
                product.mass.kilograms(),
                material.id.as_str(),
                product.id.as_str(),
            )
            .unwrap();
            let sim = Simulator::from_inputs(&inputs, &db).unwrap();

            assert!(sim.co2.kilograms() > 0.0, "{} / {}", product.id, material.id);
            assert_eq!(sim.life_cycle.mass_at(Label::Distribution), product.mass);

            let masses: Vec<f64> = sim.life_cycle.iter().map(|s| s.mass.kilograms()).collect();
            assert!(masses.windows(2).all(|w| w[0] >= w[1]), "{masses:?}");

            for step in sim.life_cycle.iter() {
                assert!(step.co2.kilograms() >= 0.0);
                assert!(step.transport.co2.kilograms() >= 0.0);
            }
        }
    }
}

#[test]
fn reference_shirt_making_mass() {
    let db = db();
    let shirt = db.products().find(|p| !p.knitted && p.pcr_waste == 0.0).unwrap();
    let making = db.processes.get(shirt.making_process).unwrap();

    let inputs = Inputs::new(0.17, "coton", shirt.id.as_str()).unwrap();
    let sim = Simulator::from_inputs(&inputs, &db).unwrap();
    let step = sim.step(Label::Making).unwrap();

    let expected = 0.17 * (1.0 + making.waste);
    assert!((step.mass.kilograms() - expected).abs() < 1e-12);
    assert!((step.waste.kilograms() - 0.17 * making.waste).abs() < 1e-12);
}

#[test]
fn compute_is_idempotent_and_inputs_round_trip() {
    let db = db();
    let inputs = Inputs::new(0.45, "laine", "pull")
        .unwrap()
        .with_countries(vec![country("CN"), country("TR"), country("PT"), country("TN")]);
    let sim = Simulator::from_inputs(&inputs, &db).unwrap();

    assert_eq!(sim.clone().compute(&db).unwrap(), sim);
    assert_eq!(Simulator::from_inputs(&sim.to_inputs(), &db).unwrap(), sim);
    assert_eq!(sim.to_inputs(), inputs);
}

#[test]
fn json_round_trip_is_bit_exact() {
    let db = db();
    let inputs = Inputs::new(0.45, "coton", "jean")
        .unwrap()
        .with_stage_country(Label::Ennoblement, country("BD"));
    let sim = Simulator::from_inputs(&inputs, &db).unwrap();

    let decoded = codec::from_json(&codec::to_json(&sim).unwrap()).unwrap();
    assert_eq!(decoded, sim);
    assert_eq!(decoded.co2.kilograms().to_bits(), sim.co2.kilograms().to_bits());
}

#[test]
fn moving_one_stage_leaves_other_stage_emissions_alone() {
    let db = db();
    let base_inputs = Inputs::new(0.17, "coton", "chemise").unwrap();
    let base = Simulator::from_inputs(&base_inputs, &db).unwrap();
    let moved = Simulator::from_inputs(
        &base_inputs.with_stage_country(Label::WeavingKnitting, country("IN")),
        &db,
    )
    .unwrap();

    for label in [Label::MaterialAndSpinning, Label::Ennoblement, Label::Making, Label::Distribution] {
        assert_eq!(base.step(label).unwrap().co2, moved.step(label).unwrap().co2, "{label}");
    }
    assert_ne!(
        base.step(Label::WeavingKnitting).unwrap().co2,
        moved.step(Label::WeavingKnitting).unwrap().co2
    );
}

#[test]
fn country_without_heat_shows_no_heat_process() {
    let db = db();
    let inputs = Inputs::new(0.17, "coton", "chemise")
        .unwrap()
        .with_stage_country(Label::Ennoblement, country("ES"));
    let sim = Simulator::from_inputs(&inputs, &db).unwrap();
    let info = &sim.step(Label::Ennoblement).unwrap().process_info;
    assert!(info.heat.is_none());
    assert!(info.electricity.is_some());
}

#[test]
fn country_without_heat_emits_dyeing_and_electricity_only() {
    let db = db();
    let spain = country("ES");
    let profile = db.countries.profile(&spain).unwrap();
    let dyeing = db.processes.get(profile.dyeing.unwrap()).unwrap();
    let grid = db.processes.get(profile.electricity.unwrap()).unwrap();

    let inputs = Inputs::new(0.17, "coton", "chemise")
        .unwrap()
        .with_stage_country(Label::Ennoblement, spain);
    let sim = Simulator::from_inputs(&inputs, &db).unwrap();
    let step = sim.step(Label::Ennoblement).unwrap();

    let kwh = dyeing.electricity_for(step.mass);
    let expected = dyeing.co2_for_mass(step.mass) + grid.co2_for_kwh(kwh);
    assert!((step.co2.kilograms() - expected.kilograms()).abs() < 1e-12);
    assert!(step.heat.value() > 0.0);
}

#[test]
fn weaving_without_profile_emits_nothing() {
    let db = db();
    let inputs = Inputs::new(0.17, "coton", "chemise")
        .unwrap()
        .with_stage_country(Label::WeavingKnitting, country("ZZ"));
    let sim = Simulator::from_inputs(&inputs, &db).unwrap();
    let step = sim.step(Label::WeavingKnitting).unwrap();
    assert!(step.kwh.value() > 0.0);
    assert_eq!(step.co2.kilograms(), 0.0);
}

#[test]
fn country_without_profile_still_computes() {
    let db = db();
    let inputs = Inputs::new(0.17, "coton", "chemise")
        .unwrap()
        .with_stage_country(Label::Making, country("ZZ"));
    let sim = Simulator::from_inputs(&inputs, &db).unwrap();
    let making = sim.step(Label::Making).unwrap();
    assert_eq!(making.process_info, ProcessInfo::default());
    assert!(making.co2.kilograms() >= 0.0);
    assert!(sim.co2.kilograms() > 0.0);
}

#[test]
fn boundary_errors_are_typed() {
    let db = db();

    let err = Simulator::from_inputs(
        &Inputs::new(0.2, "coton", "tshirt")
            .unwrap()
            .with_countries(vec![country("FR"); 6]),
        &db,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        FootprintError::Validation(ValidationError::TooManyCountries { .. })
    ));

    let err = Simulator::from_inputs(&Inputs::new(0.2, "soie", "tshirt").unwrap(), &db).unwrap_err();
    assert!(err.is_execution());
    assert!(!err.is_fatal());
}
