//! Simulation observers for visualization and event recording
//!
//! Observers are notified at fixed points of every round. They receive shared
//! references only and cannot influence the run.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

use crate::arrivals::Arrivals;
use crate::entities::{Elevator, Person};
use crate::simulation::{SimulationResult, SimulationStatistics};
use crate::types::{AngerLevel, Direction, ElevatorId, Floor, PersonId};

/// Callbacks invoked by the engine at key points in a round.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
pub trait SimulationObserver: Send {
    /// Called at the very start of a round, before arrivals are generated
    fn on_round_start(&mut self, _round: usize) {}

    /// Called with the validated arrivals of the round, before they join the queues
    fn on_arrivals(&mut self, _arrivals: &Arrivals) {}

    /// Called for each person leaving `elevator` at its current floor
    fn on_disembark(&mut self, _person: &Person, _elevator: &Elevator) {}

    /// Called for each person about to board `elevator`
    fn on_board(&mut self, _person: &Person, _elevator: &Elevator) {}

    /// Called after every elevator has moved; `directions[i]` moved `elevators[i]`
    fn on_moves(&mut self, _elevators: &[Elevator], _directions: &[Direction]) {}

    /// Called once when a run finishes
    fn on_run_end(&mut self, _statistics: &SimulationStatistics) {}
}

/// An observer that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SimulationObserver for NoopObserver {}

/// Narrates the run through `tracing` at INFO level
#[derive(Debug, Default)]
pub struct TracingObserver {
    round: usize,
}

impl TracingObserver {
    /// Create the observer
    pub fn new() -> Self {
        Self::default()
    }
}

impl SimulationObserver for TracingObserver {
    fn on_round_start(&mut self, round: usize) {
        self.round = round;
        info!(round, "Round started");
    }

    fn on_arrivals(&mut self, arrivals: &Arrivals) {
        for (floor, people) in arrivals.iter().filter(|(_, people)| !people.is_empty()) {
            let targets: Vec<Floor> = people.iter().map(|p| p.target).collect();
            info!(round = self.round, floor, ?targets, "People arrived");
        }
    }

    fn on_disembark(&mut self, person: &Person, elevator: &Elevator) {
        info!(
            round = self.round,
            person = %person.id,
            elevator = %elevator.id,
            floor = elevator.current_floor,
            wait_time = person.wait_time,
            anger = %person.anger_level(),
            "Passenger left"
        );
    }

    fn on_board(&mut self, person: &Person, elevator: &Elevator) {
        info!(
            round = self.round,
            person = %person.id,
            elevator = %elevator.id,
            floor = elevator.current_floor,
            target = person.target,
            "Passenger boarded"
        );
    }

    fn on_moves(&mut self, elevators: &[Elevator], directions: &[Direction]) {
        for (elevator, direction) in elevators.iter().zip(directions) {
            info!(
                round = self.round,
                elevator = %elevator.id,
                %direction,
                floor = elevator.current_floor,
                passengers = elevator.passengers.len(),
                fullness = elevator.fullness(),
                "Elevator moved"
            );
        }
    }

    fn on_run_end(&mut self, statistics: &SimulationStatistics) {
        info!("{}", statistics.generate_compact_summary());
    }
}

/// A single recorded simulation event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoundEvent {
    /// A person joined the queue of their start floor
    Arrived {
        /// Round of the event
        round: usize,
        /// The person
        person: PersonId,
        /// Start floor
        start: Floor,
        /// Target floor
        target: Floor,
    },
    /// A person reached their target and left an elevator
    Disembarked {
        /// Round of the event
        round: usize,
        /// The person
        person: PersonId,
        /// The elevator they left
        elevator: ElevatorId,
        /// Floor they left on
        floor: Floor,
        /// Total rounds waited, riding included
        wait_time: u32,
        /// Anger level on arrival
        anger: AngerLevel,
    },
    /// A person boarded an elevator
    Boarded {
        /// Round of the event
        round: usize,
        /// The person
        person: PersonId,
        /// The elevator boarded
        elevator: ElevatorId,
        /// Floor boarded on
        floor: Floor,
    },
    /// An elevator applied its direction for the round
    Moved {
        /// Round of the event
        round: usize,
        /// The elevator
        elevator: ElevatorId,
        /// Direction taken
        direction: Direction,
        /// Floor after the move
        floor: Floor,
        /// Passengers on board
        passengers: usize,
    },
}

impl RoundEvent {
    /// Round the event belongs to
    pub fn round(&self) -> usize {
        match self {
            RoundEvent::Arrived { round, .. }
            | RoundEvent::Disembarked { round, .. }
            | RoundEvent::Boarded { round, .. }
            | RoundEvent::Moved { round, .. } => *round,
        }
    }
}

/// Records every event of a run in memory.
///
/// Clones share the same buffer, so a clone can be handed to the engine and
/// the original read back after the run.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    round: usize,
    events: Arc<Mutex<Vec<RoundEvent>>>,
}

impl EventRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    fn buffer(&self) -> MutexGuard<'_, Vec<RoundEvent>> {
        // A poisoned buffer still holds every event pushed before the panic.
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, event: RoundEvent) {
        self.buffer().push(event);
    }

    /// Snapshot of the events recorded so far
    pub fn events(&self) -> Vec<RoundEvent> {
        self.buffer().clone()
    }

    /// Number of events recorded so far
    pub fn len(&self) -> usize {
        self.buffer().len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.buffer().is_empty()
    }

    /// Write every event as one JSON object per line
    pub fn write_jsonl<W: Write>(&self, mut writer: W) -> SimulationResult<()> {
        for event in self.buffer().iter() {
            serde_json::to_writer(&mut writer, event)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl SimulationObserver for EventRecorder {
    fn on_round_start(&mut self, round: usize) {
        self.round = round;
    }

    fn on_arrivals(&mut self, arrivals: &Arrivals) {
        let round = self.round;
        let mut buffer = self.buffer();
        for person in arrivals.values().flatten() {
            buffer.push(RoundEvent::Arrived {
                round,
                person: person.id,
                start: person.start,
                target: person.target,
            });
        }
    }

    fn on_disembark(&mut self, person: &Person, elevator: &Elevator) {
        self.record(RoundEvent::Disembarked {
            round: self.round,
            person: person.id,
            elevator: elevator.id,
            floor: elevator.current_floor,
            wait_time: person.wait_time,
            anger: person.anger_level(),
        });
    }

    fn on_board(&mut self, person: &Person, elevator: &Elevator) {
        self.record(RoundEvent::Boarded {
            round: self.round,
            person: person.id,
            elevator: elevator.id,
            floor: elevator.current_floor,
        });
    }

    fn on_moves(&mut self, elevators: &[Elevator], directions: &[Direction]) {
        let round = self.round;
        let mut buffer = self.buffer();
        for (elevator, &direction) in elevators.iter().zip(directions) {
            buffer.push(RoundEvent::Moved {
                round,
                elevator: elevator.id,
                direction,
                floor: elevator.current_floor,
                passengers: elevator.passengers.len(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::empty_floor_queues;

    #[test]
    fn test_recorder_clones_share_buffer() {
        let recorder = EventRecorder::new();
        let mut handle = recorder.clone();

        handle.on_round_start(3);
        let mut arrivals = empty_floor_queues(4);
        arrivals.get_mut(&2).unwrap().push(Person::new(2, 4));
        handle.on_arrivals(&arrivals);

        let events = recorder.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].round(), 3);
        assert!(matches!(events[0], RoundEvent::Arrived { start: 2, target: 4, .. }));
    }

    #[test]
    fn test_recorder_moves_and_boarding() {
        let mut recorder = EventRecorder::new();
        let mut elevator = Elevator::new(ElevatorId(1), 2);
        let person = Person::new(1, 3);

        recorder.on_round_start(0);
        recorder.on_board(&person, &elevator);
        elevator.board(person).unwrap();
        elevator.current_floor = 2;
        recorder.on_moves(std::slice::from_ref(&elevator), &[Direction::Up]);

        let events = recorder.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], RoundEvent::Boarded { floor: 1, .. }));
        assert!(matches!(
            events[1],
            RoundEvent::Moved { direction: Direction::Up, floor: 2, passengers: 1, .. }
        ));
    }

    #[test]
    fn test_write_jsonl() {
        let mut recorder = EventRecorder::new();
        let mut elevator = Elevator::new(ElevatorId(0), 2);
        elevator.current_floor = 3;
        let mut person = Person::new(1, 3);
        person.wait_time = 5;

        recorder.on_round_start(7);
        recorder.on_disembark(&person, &elevator);

        let mut output = Vec::new();
        recorder.write_jsonl(&mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["event"], "disembarked");
        assert_eq!(value["round"], 7);
        assert_eq!(value["floor"], 3);
        assert_eq!(value["wait_time"], 5);
    }

    #[test]
    fn test_noop_observer_accepts_everything() {
        let mut observer = NoopObserver;
        observer.on_round_start(0);
        observer.on_arrivals(&empty_floor_queues(2));
        observer.on_moves(&[], &[]);
    }
}
