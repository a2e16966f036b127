//! Events reported while a run progresses.

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};

/// A cell coordinate: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Lifecycle state announced through [`Event::StateChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    Paused,
    Executing,
    Quitting,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::Paused => "Paused",
            State::Executing => "Executing",
            State::Quitting => "Quitting",
        };
        f.write_str(name)
    }
}

/// Progress notification sent to the consumer of a run.
///
/// For each turn the order is: every `CellFlipped` for that turn, then
/// `AliveCellsCount`, then `TurnComplete`. A run ends with exactly one
/// `FinalTurnComplete` followed by `StateChange` into [`State::Quitting`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A cell changed state while moving to `completed_turns`.
    CellFlipped { completed_turns: usize, cell: Cell },
    /// Live cells after `completed_turns`.
    AliveCellsCount {
        completed_turns: usize,
        cells_count: usize,
    },
    /// Turn `completed_turns` is fully committed.
    TurnComplete { completed_turns: usize },
    /// Terminal summary with every live cell in row-major order.
    FinalTurnComplete {
        completed_turns: usize,
        alive: Vec<Cell>,
    },
    StateChange {
        completed_turns: usize,
        new_state: State,
    },
}

impl Event {
    /// Turn number the event is tagged with.
    pub fn completed_turns(&self) -> usize {
        match self {
            Event::CellFlipped {
                completed_turns, ..
            }
            | Event::AliveCellsCount {
                completed_turns, ..
            }
            | Event::TurnComplete { completed_turns }
            | Event::FinalTurnComplete {
                completed_turns, ..
            }
            | Event::StateChange {
                completed_turns, ..
            } => *completed_turns,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::CellFlipped {
                completed_turns,
                cell,
            } => write!(f, "Turn {}: flipped ({}, {})", completed_turns, cell.x, cell.y),
            Event::AliveCellsCount {
                completed_turns,
                cells_count,
            } => write!(f, "Turn {}: {} alive cells", completed_turns, cells_count),
            Event::TurnComplete { completed_turns } => {
                write!(f, "Turn {} complete", completed_turns)
            }
            Event::FinalTurnComplete {
                completed_turns,
                alive,
            } => write!(
                f,
                "Final turn {} complete with {} alive cells",
                completed_turns,
                alive.len()
            ),
            Event::StateChange {
                completed_turns,
                new_state,
            } => write!(f, "Turn {}: {}", completed_turns, new_state),
        }
    }
}

/// Sending half of the event stream.
///
/// Dropping the sink (or calling [`EventSink::close`]) ends the stream; the
/// receiver's iterator then terminates.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: Sender<Event>,
}

/// Create a connected sink/receiver pair.
pub fn event_channel() -> (EventSink, Receiver<Event>) {
    let (tx, rx) = mpsc::channel();
    (EventSink { tx }, rx)
}

impl EventSink {
    /// Send an event. Never blocks; a hung-up consumer only loses events.
    pub fn emit(&self, event: Event) {
        if let Err(mpsc::SendError(event)) = self.tx.send(event) {
            log::debug!("Event sink disconnected, dropping {:?}", event);
        }
    }

    /// Close the stream. Nothing can be emitted through this sink afterwards.
    pub fn close(self) {
        drop(self.tx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_ends_after_close() {
        let (sink, rx) = event_channel();
        sink.emit(Event::TurnComplete { completed_turns: 1 });
        sink.emit(Event::StateChange {
            completed_turns: 1,
            new_state: State::Quitting,
        });
        sink.close();

        let events: Vec<Event> = rx.iter().collect();
        assert_eq!(events.len(), 2);
        assert!(rx.recv().is_err());
    }

    #[test]
    fn test_emit_after_receiver_dropped() {
        let (sink, rx) = event_channel();
        drop(rx);
        // Must not panic.
        sink.emit(Event::TurnComplete { completed_turns: 3 });
    }

    #[test]
    fn test_completed_turns() {
        let event = Event::CellFlipped {
            completed_turns: 7,
            cell: Cell::new(1, 2),
        };
        assert_eq!(event.completed_turns(), 7);
        assert_eq!(event.to_string(), "Turn 7: flipped (1, 2)");
    }

    #[test]
    fn test_state_display() {
        assert_eq!(State::Quitting.to_string(), "Quitting");
        let event = Event::StateChange {
            completed_turns: 10,
            new_state: State::Quitting,
        };
        assert_eq!(event.to_string(), "Turn 10: Quitting");
    }
}
