// Integration tests test your crate's public API. They only have access to items
// in your crate that are marked pub. See the Cargo Targets page of the Cargo Book
// for more information.
//
//   https://doc.rust-lang.org/cargo/reference/cargo-targets.html#integration-tests
//

use elevator_simulator::*;

mod simulation_invariant_tests;



#[test]
fn test_core_id_types() {
    let person_id = PersonId::new();

    // Test that IDs are unique
    assert_ne!(person_id, PersonId::new());

    // Test string formatting
    assert!(person_id.to_string().starts_with("PERSON_"));
    assert_eq!(ElevatorId(1).to_string(), "ELEVATOR_1");
}

#[test]
fn test_enum_types() {
    let directions = [Direction::Up, Direction::Stay, Direction::Down];
    for direction in &directions {
        assert!(!direction.to_string().is_empty());
    }

    for kind in [MovingAlgorithmKind::Random, MovingAlgorithmKind::Pushy, MovingAlgorithmKind::ShortSighted] {
        let parsed: MovingAlgorithmKind = kind.to_string().parse().unwrap();
        assert_eq!(parsed, kind);
    }

    for kind in [ArrivalGeneratorKind::Random, ArrivalGeneratorKind::File] {
        let parsed: ArrivalGeneratorKind = kind.to_string().parse().unwrap();
        assert_eq!(parsed, kind);
    }

    let levels: Vec<u8> = AngerLevel::ALL.iter().map(|level| level.as_u8()).collect();
    assert_eq!(levels, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_person_json_output_has_prefix() {
    let person = Person::new(1, 3);
    let json = serde_json::to_string(&person).unwrap();

    assert!(json.contains("PERSON_"));
    let deserialized: Person = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized, person);
}

#[test]
fn test_statistics_report_from_config() {
    let config = SimulationConfig { seed: Some(11), num_rounds: 8, ..Default::default() };
    let mut simulation = Simulation::from_config(&config).unwrap();
    let stats = simulation.run(config.num_rounds).unwrap();

    assert_eq!(stats.num_iterations, 8);
    assert_eq!(stats.total_people, 16);
    assert!(stats.people_completed <= stats.total_people);
    assert_eq!(stats.anger_counts.iter().sum::<usize>(), stats.people_completed);

    let report = stats.generate_summary_report();
    assert!(report.contains("16"));
    assert_eq!(stats.to_string(), report);
}
