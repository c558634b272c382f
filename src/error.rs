use std::fmt;
use std::io;

use crate::coordinate::Coordinate;

/// A call that the engine's current state does not allow.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StateViolation {
    NoFallingTile,
    TileAlreadyFalling,
    UpcomingIndexOutOfBounds { index: usize, len: usize },
    GameEnded,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EngineError {
    InvalidEngineState(StateViolation),
    CoordinateOutOfBounds(Coordinate),
    CoordinateOccupied(Coordinate),
    /// Every cell of the spawn row is taken.
    BoardFull,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidEngineState(violation) => match violation {
                StateViolation::NoFallingTile => write!(f, "no tile is falling"),
                StateViolation::TileAlreadyFalling => write!(f, "a tile is already falling"),
                StateViolation::UpcomingIndexOutOfBounds { index, len } => {
                    write!(f, "upcoming tile index {index} out of bounds (len {len})")
                }
                StateViolation::GameEnded => write!(f, "the game has ended"),
            },
            EngineError::CoordinateOutOfBounds(at) => write!(f, "coordinate {at} is off the board"),
            EngineError::CoordinateOccupied(at) => write!(f, "coordinate {at} already holds a tile"),
            EngineError::BoardFull => write!(f, "no free cell left in the spawn row"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<StateViolation> for EngineError {
    fn from(violation: StateViolation) -> Self {
        EngineError::InvalidEngineState(violation)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "could not read config: {err}"),
            ConfigError::Parse(err) => write!(f, "could not parse config: {err}"),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}
