use std::time::Duration;

use crate::coordinate::Coordinate;
use crate::gravity::TileShift;

/// Receives one-way notifications from the engine. Every method defaults
/// to doing nothing.
pub trait EngineObserver {
    fn tile_moved_into_cell(&mut self, _at: Coordinate, _text: &str) {}

    fn tile_removed(&mut self, _at: Coordinate) {}

    fn tiles_shifted(&mut self, _shifts: &[TileShift]) {}

    fn score_changed(&mut self, _score: u32) {}

    fn upcoming_changed(&mut self) {}

    fn time_tick(&mut self, _remaining: Duration) {}

    fn game_ended(&mut self) {}
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EngineEvent {
    TileMoved { at: Coordinate, text: String },
    TileRemoved(Coordinate),
    TilesShifted(Vec<TileShift>),
    ScoreChanged(u32),
    UpcomingChanged,
    TimeTick(Duration),
    GameEnded,
}

/// Observer that keeps every notification as an [`EngineEvent`].
#[derive(Default, Debug)]
pub struct EventRecorder {
    events: Vec<EngineEvent>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    /// Takes and clears all pending events
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EngineObserver for EventRecorder {
    fn tile_moved_into_cell(&mut self, at: Coordinate, text: &str) {
        self.events.push(EngineEvent::TileMoved {
            at,
            text: text.to_string(),
        });
    }

    fn tile_removed(&mut self, at: Coordinate) {
        self.events.push(EngineEvent::TileRemoved(at));
    }

    fn tiles_shifted(&mut self, shifts: &[TileShift]) {
        self.events.push(EngineEvent::TilesShifted(shifts.to_vec()));
    }

    fn score_changed(&mut self, score: u32) {
        self.events.push(EngineEvent::ScoreChanged(score));
    }

    fn upcoming_changed(&mut self) {
        self.events.push(EngineEvent::UpcomingChanged);
    }

    fn time_tick(&mut self, remaining: Duration) {
        self.events.push(EngineEvent::TimeTick(remaining));
    }

    fn game_ended(&mut self) {
        self.events.push(EngineEvent::GameEnded);
    }
}
