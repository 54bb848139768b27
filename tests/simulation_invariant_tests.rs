//! Invariants that hold after every round of a randomized simulation
//!
//! Seeded random-arrivals simulations are stepped one round at a time under
//! every moving algorithm and several building shapes, and the whole state is
//! checked between rounds.

use elevator_simulator::simulation::Simulation;
use elevator_simulator::types::{MovingAlgorithmKind, PersonId, SimulationConfig};
use std::collections::HashMap;

fn random_config(seed: u64) -> SimulationConfig {
    SimulationConfig {
        num_floors: 7,
        num_elevators: 3,
        elevator_capacity: 2,
        num_rounds: 60,
        num_people_per_round: Some(3),
        moving_algorithm: MovingAlgorithmKind::Random,
        seed: Some(seed),
        ..Default::default()
    }
}

/// Wait time of every person still waiting or riding
fn active_waits(simulation: &Simulation) -> HashMap<PersonId, u32> {
    let waiting = simulation.waiting().values().flatten();
    let riding = simulation.elevators().iter().flat_map(|elevator| elevator.passengers.iter());
    waiting.chain(riding).map(|person| (person.id, person.wait_time)).collect()
}

fn completed_waits(simulation: &Simulation) -> HashMap<PersonId, u32> {
    simulation.completed().iter().map(|person| (person.id, person.wait_time)).collect()
}

/// Step `config` round by round and check the whole state between rounds
fn assert_invariants_hold(config: &SimulationConfig) {
    let mut simulation = Simulation::from_config(config).unwrap();
    let per_round = config.num_people_per_round.unwrap_or(0);

    let mut previous_active: HashMap<PersonId, u32> = HashMap::new();
    let mut previous_completed: HashMap<PersonId, u32> = HashMap::new();

    for round in 0..config.num_rounds {
        simulation.run_round().unwrap();
        assert_eq!(simulation.round(), round + 1);

        // Elevators stay inside the building and under capacity
        for elevator in simulation.elevators() {
            assert!((1..=config.num_floors).contains(&elevator.current_floor));
            assert!(elevator.passengers.len() <= elevator.max_capacity);
        }

        // Everyone waits on the floor they started on
        assert_eq!(simulation.waiting().len(), config.num_floors);
        for (floor, people) in simulation.waiting() {
            assert!(people.iter().all(|person| person.start == *floor));
        }

        // Nobody is lost or duplicated
        assert_eq!(
            simulation.people_waiting() + simulation.people_riding() + simulation.completed().len(),
            simulation.total_people()
        );
        assert_eq!(simulation.total_people(), (round + 1) * per_round);

        let active = active_waits(&simulation);
        let completed = completed_waits(&simulation);

        // Waiting and riding people gain exactly one round each round
        for (id, wait) in &active {
            match previous_active.get(id) {
                Some(previous) => assert_eq!(*wait, previous + 1),
                None => assert_eq!(*wait, 1),
            }
        }

        // Completed wait times are frozen at the moment of leaving
        for (id, wait) in &completed {
            let before = previous_completed.get(id).or_else(|| previous_active.get(id));
            assert_eq!(Some(wait), before);
        }

        previous_active = active;
        previous_completed = completed;
    }
}

#[test]
fn test_state_invariants_every_round() {
    assert_invariants_hold(&random_config(2024));
}

#[test]
fn test_invariants_for_every_policy_and_shape() {
    let policies =
        [MovingAlgorithmKind::Random, MovingAlgorithmKind::Pushy, MovingAlgorithmKind::ShortSighted];
    // (floors, elevators, capacity, people per round)
    let shapes = [(7, 3, 2, 3), (2, 1, 1, 2), (10, 2, 4, 1)];

    for moving_algorithm in policies {
        for (num_floors, num_elevators, elevator_capacity, people) in shapes {
            for seed in 0..20 {
                assert_invariants_hold(&SimulationConfig {
                    num_floors,
                    num_elevators,
                    elevator_capacity,
                    num_rounds: 80,
                    num_people_per_round: Some(people),
                    moving_algorithm,
                    seed: Some(seed),
                    ..Default::default()
                });
            }
        }
    }
}

#[test]
fn test_completed_people_left_at_their_target() {
    let config = SimulationConfig {
        moving_algorithm: MovingAlgorithmKind::ShortSighted,
        ..random_config(8)
    };
    let mut simulation = Simulation::from_config(&config).unwrap();
    let stats = simulation.run(config.num_rounds).unwrap();

    assert!(stats.people_completed > 0);
    for person in simulation.completed() {
        assert_ne!(person.start, person.target);
        assert!(person.wait_time >= 1);
    }

    let waits: Vec<i64> = simulation.completed().iter().map(|p| i64::from(p.wait_time)).collect();
    assert_eq!(stats.max_time, *waits.iter().max().unwrap());
    assert_eq!(stats.min_time, *waits.iter().min().unwrap());
    assert!(stats.min_time <= stats.avg_time && stats.avg_time <= stats.max_time);
}

#[test]
fn test_same_seed_same_run() {
    let config = random_config(77);

    let mut first = Simulation::from_config(&config).unwrap();
    let mut second = Simulation::from_config(&config).unwrap();

    let first_stats = first.run(config.num_rounds).unwrap();
    let second_stats = second.run(config.num_rounds).unwrap();

    assert_eq!(first_stats, second_stats);
    let floors = |simulation: &Simulation| {
        simulation.elevators().iter().map(|e| e.current_floor).collect::<Vec<_>>()
    };
    assert_eq!(floors(&first), floors(&second));
}
