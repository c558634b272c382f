//! Jasmine: a falling-tile word game engine.
//!
//! Tiles carrying characters fall onto a board; when consecutive tiles in a
//! row or column spell a dictionary phrase, they are cleared, the score goes
//! up by the number of tiles cleared, and the tiles above drop into the gap.
//! The engine is platform-free: a frontend drives it and listens through
//! [`observer::EngineObserver`].

pub mod config;
pub mod coordinate;
pub mod engine;
pub mod error;
pub mod gravity;
pub mod grid;
pub mod matcher;
pub mod observer;
pub mod timer;
pub mod words;

pub mod test_helpers;

pub use config::EngineConfig;
pub use coordinate::Coordinate;
pub use engine::{Direction, EnginePhase, FallingTile, LandOutcome, TetrisEngine};
pub use error::{ConfigError, EngineError, StateViolation};
pub use gravity::TileShift;
pub use grid::TetrisGrid;
pub use matcher::{PhraseMatch, PhraseMatcher};
pub use observer::{EngineEvent, EngineObserver, EventRecorder};
pub use timer::{CountdownTimer, TimerEvent};
pub use words::{RandomWordSource, SequenceWordSource, WordSource};
