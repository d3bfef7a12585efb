use textile_footprint::{
    country_scenarios, CompareConfig, Comparator, Country, Db, Inputs, Label, Simulator,
};

fn countries(codes: &[&str]) -> Vec<Country> {
    codes.iter().map(|c| Country::new(c).unwrap()).collect()
}

#[test]
fn comparison_is_ordered_and_matches_sequential_runs() {
    let db = Db::builtin().unwrap();
    let inputs = Inputs::new(0.17, "coton", "tshirt").unwrap();
    let candidates = countries(&["FR", "PT", "TR", "TN", "IN", "BD", "CN", "ES"]);
    let scenarios = country_scenarios(&inputs, &candidates);

    let comparator = Comparator::start(
        db.clone(),
        CompareConfig {
            workers: 3,
            queue_capacity: 2,
        },
    )
    .unwrap();
    let outcomes = comparator.compare(scenarios.clone());

    assert_eq!(outcomes.len(), candidates.len());
    for ((outcome, scenario), candidate) in outcomes.iter().zip(&scenarios).zip(&candidates) {
        assert_eq!(outcome.label, candidate.as_str());
        let sim = outcome.result.as_ref().unwrap();
        assert_eq!(sim, &Simulator::from_inputs(&scenario.inputs, &db).unwrap());
        for label in [Label::WeavingKnitting, Label::Ennoblement, Label::Making] {
            assert_eq!(&sim.step(label).unwrap().country, candidate);
        }
        assert_eq!(sim.step(Label::MaterialAndSpinning).unwrap().country, Country::china());
        assert_eq!(sim.step(Label::Distribution).unwrap().country, Country::france());
    }
}

#[test]
fn cleaner_grid_gives_lower_manufacturing_emissions() {
    let db = Db::builtin().unwrap();
    let inputs = Inputs::new(0.3, "coton", "jupe").unwrap();
    let comparator = Comparator::start(db, CompareConfig::default()).unwrap();
    let outcomes = comparator.compare(country_scenarios(&inputs, &countries(&["FR", "IN"])));

    let making = |i: usize| {
        outcomes[i]
            .result
            .as_ref()
            .unwrap()
            .step(Label::Making)
            .unwrap()
            .co2
    };
    assert!(making(0) < making(1));
}

#[test]
fn comparator_survives_many_batches() {
    let db = Db::builtin().unwrap();
    let inputs = Inputs::new(0.55, "laine", "pull").unwrap();
    let comparator = Comparator::start(
        db,
        CompareConfig {
            workers: 2,
            queue_capacity: 1,
        },
    )
    .unwrap();

    let first = comparator.compare(country_scenarios(&inputs, &countries(&["PT", "TN"])));
    let second = comparator.compare(country_scenarios(&inputs, &countries(&["PT", "TN"])));
    let co2 = |o: &[textile_footprint::Outcome]| o.iter().map(|o| o.co2()).collect::<Vec<_>>();
    assert_eq!(co2(&first), co2(&second));
}
