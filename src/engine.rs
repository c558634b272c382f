use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::EngineConfig;
use crate::coordinate::Coordinate;
use crate::error::{ConfigError, EngineError, StateViolation};
use crate::gravity::{self, TileShift};
use crate::grid::TetrisGrid;
use crate::matcher::{PhraseMatch, PhraseMatcher};
use crate::observer::EngineObserver;
use crate::timer::{CountdownTimer, TimerEvent};
use crate::words::{RandomWordSource, WordSource};

// ============================================================================
// Types
// ============================================================================

/// The tile under player control. It lives outside the grid until it lands.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FallingTile {
    pub at: Coordinate,
    pub text: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EnginePhase {
    Idle,
    AwaitingDrop,
    Falling,
    Landed,
    Matching,
    Shifting,
    GameOver,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Left,
    Right,
    Down,
}

/// What happened when a tile landed.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LandOutcome {
    pub landed_at: Coordinate,
    pub matched: Option<PhraseMatch>,
    pub shifts: Vec<TileShift>,
}

// ============================================================================
// Engine
// ============================================================================

pub struct TetrisEngine {
    config: EngineConfig,
    grid: TetrisGrid,
    matcher: PhraseMatcher,
    upcoming: VecDeque<String>,
    falling: Option<FallingTile>,
    score: u32,
    phase: EnginePhase,
    timer: CountdownTimer,
    words: Box<dyn WordSource>,
    rng: StdRng,
    observer: Option<Weak<RefCell<dyn EngineObserver>>>,
}

impl TetrisEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let words = Box::new(RandomWordSource::from_phrases(&config.phrases));
        Self::with_word_source(config, words)
    }

    /// Builds an engine drawing tiles from `words`. The config is validated
    /// first, so a board or lookahead of zero never reaches the engine.
    pub fn with_word_source(
        config: EngineConfig,
        mut words: Box<dyn WordSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let upcoming = (0..config.upcoming_count).map(|_| words.next_word()).collect();

        Ok(Self {
            grid: TetrisGrid::new(config.rows, config.columns),
            matcher: PhraseMatcher::new(config.phrases.iter().cloned()),
            timer: CountdownTimer::new(config.total_time(), config.tick_interval()),
            upcoming,
            falling: None,
            score: 0,
            phase: EnginePhase::Idle,
            words,
            rng: StdRng::from_entropy(),
            observer: None,
            config,
        })
    }

    /// Makes spawn columns reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Registers the observer without taking ownership of it.
    pub fn with_observer<O: EngineObserver + 'static>(mut self, observer: &Rc<RefCell<O>>) -> Self {
        let weak: Weak<RefCell<O>> = Rc::downgrade(observer);
        let weak: Weak<RefCell<dyn EngineObserver>> = weak;
        self.observer = Some(weak);
        self
    }

    pub fn set_observer(&mut self, observer: Weak<RefCell<dyn EngineObserver>>) {
        self.observer = Some(observer);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &TetrisGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut TetrisGrid {
        &mut self.grid
    }

    pub fn upcoming_tiles(&self) -> &VecDeque<String> {
        &self.upcoming
    }

    pub fn falling_tile(&self) -> Option<&FallingTile> {
        self.falling.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == EnginePhase::GameOver
    }

    pub fn remaining_time(&self) -> Duration {
        self.timer.remaining()
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Starts the countdown. Calling it again while the clock runs leaves
    /// the round untouched.
    pub fn start_game(&mut self) -> Result<(), EngineError> {
        self.ensure_playing()?;
        if self.timer.is_running() {
            log::debug!("Game already running, start ignored");
            return Ok(());
        }
        self.timer.start();
        if self.phase == EnginePhase::Idle {
            self.set_phase(EnginePhase::AwaitingDrop);
        }
        log::info!(
            "Game started: {}x{} board, {:?} on the clock",
            self.grid.rows(),
            self.grid.columns(),
            self.timer.remaining()
        );
        Ok(())
    }

    /// Feeds elapsed time to the countdown and reports its ticks.
    pub fn advance_time(&mut self, elapsed: Duration) {
        for event in self.timer.advance(elapsed) {
            match event {
                TimerEvent::Tick(remaining) => self.notify(|o| o.time_tick(remaining)),
                TimerEvent::Expired => {
                    self.end_game();
                    self.notify(|o| o.game_ended());
                }
            }
        }
    }

    /// Ends the round early. The timer is cancelled and reports nothing more.
    pub fn stop_game(&mut self) {
        if !self.is_game_over() {
            self.end_game();
        }
    }

    pub fn restart(&mut self) {
        self.grid.clear();
        self.score = 0;
        self.falling = None;
        self.timer.reset();
        self.upcoming = (0..self.config.upcoming_count)
            .map(|_| self.words.next_word())
            .collect();
        self.set_phase(EnginePhase::Idle);

        self.notify(|o| o.upcoming_changed());
        self.notify(|o| o.score_changed(0));
        log::info!("Game restarted");
    }

    // ------------------------------------------------------------------------
    // Falling tile
    // ------------------------------------------------------------------------

    /// Takes the next upcoming tile and spawns it on the top row, in a random
    /// free column.
    pub fn drop_next_tile(&mut self) -> Result<FallingTile, EngineError> {
        self.ensure_playing()?;
        if self.falling.is_some() {
            return Err(StateViolation::TileAlreadyFalling.into());
        }

        let spawn_row = Coordinate::ORIGIN.row;
        let free: Vec<usize> = (0..self.grid.columns())
            .filter(|&col| !self.grid.has_tile(Coordinate::new(spawn_row, col)))
            .collect();
        let Some(&col) = free.choose(&mut self.rng) else {
            log::info!("Spawn row is full, ending game");
            self.end_game();
            self.notify(|o| o.game_ended());
            return Err(EngineError::BoardFull);
        };

        let text = match self.upcoming.pop_front() {
            Some(text) => text,
            None => self.words.next_word(),
        };
        let refill = self.words.next_word();
        self.upcoming.push_back(refill);
        self.notify(|o| o.upcoming_changed());

        let tile = FallingTile {
            at: Coordinate::new(spawn_row, col),
            text,
        };
        log::debug!("Spawned {:?} at {}", tile.text, tile.at);
        self.falling = Some(tile.clone());
        self.set_phase(EnginePhase::Falling);
        self.notify(|o| o.tile_moved_into_cell(tile.at, &tile.text));
        Ok(tile)
    }

    /// Whether the falling tile may occupy `to`. Only landed tiles block.
    pub fn shift_falling_tile(&self, to: Coordinate) -> bool {
        self.grid.contains(to) && !self.grid.has_tile(to)
    }

    /// Moves the falling tile one cell. Returns false when blocked.
    pub fn move_falling_tile(&mut self, direction: Direction) -> Result<bool, EngineError> {
        self.ensure_playing()?;
        let at = self.falling.as_ref().ok_or(StateViolation::NoFallingTile)?.at;

        let target = match direction {
            Direction::Left => at.col.checked_sub(1).map(|col| Coordinate::new(at.row, col)),
            Direction::Right => Some(Coordinate::new(at.row, at.col + 1)),
            Direction::Down => Some(at.next_row()),
        };
        let Some(target) = target.filter(|&to| self.shift_falling_tile(to)) else {
            return Ok(false);
        };

        let Some(tile) = self.falling.as_mut() else {
            return Err(StateViolation::NoFallingTile.into());
        };
        tile.at = target;
        let text = tile.text.clone();
        self.notify(|o| o.tile_moved_into_cell(target, &text));
        Ok(true)
    }

    /// Moves the falling tile down one row, landing it if it is resting.
    pub fn soft_drop(&mut self) -> Result<Option<LandOutcome>, EngineError> {
        if self.move_falling_tile(Direction::Down)? {
            return Ok(None);
        }
        let at = self.falling_position()?;
        self.land_falling_tile(at).map(Some)
    }

    /// Drops the falling tile as far as it goes and lands it.
    pub fn hard_drop(&mut self) -> Result<LandOutcome, EngineError> {
        while self.move_falling_tile(Direction::Down)? {}
        let at = self.falling_position()?;
        self.land_falling_tile(at)
    }

    /// Writes the falling tile into the grid at `at`, then clears the first
    /// phrase it completes and lets the tiles above fall into the gap.
    pub fn land_falling_tile(&mut self, at: Coordinate) -> Result<LandOutcome, EngineError> {
        self.ensure_playing()?;
        let text = match self.falling.as_ref() {
            Some(tile) => tile.text.clone(),
            None => return Err(StateViolation::NoFallingTile.into()),
        };

        self.grid.add(at, text.clone())?;
        self.falling = None;
        self.set_phase(EnginePhase::Landed);
        log::debug!("Landed {:?} at {}", text, at);

        self.set_phase(EnginePhase::Matching);
        let Some(found) = self.matcher.find_match(&self.grid) else {
            self.set_phase(EnginePhase::AwaitingDrop);
            return Ok(LandOutcome {
                landed_at: at,
                matched: None,
                shifts: Vec::new(),
            });
        };

        log::debug!(
            "Matched {:?} on {:?} ({} tiles)",
            found.phrase,
            found.line,
            found.coordinates.len()
        );
        self.grid.remove_all(&found.coordinates);
        for &removed in &found.coordinates {
            self.notify(|o| o.tile_removed(removed));
        }

        self.score += found.coordinates.len() as u32;
        let score = self.score;
        self.notify(|o| o.score_changed(score));

        self.set_phase(EnginePhase::Shifting);
        let shifts = gravity::shift_down(&mut self.grid, &found.coordinates)?;
        if !shifts.is_empty() {
            self.notify(|o| o.tiles_shifted(&shifts));
        }

        self.set_phase(EnginePhase::AwaitingDrop);
        Ok(LandOutcome {
            landed_at: at,
            matched: Some(found),
            shifts,
        })
    }

    /// Exchanges the falling tile's text with `upcoming_tiles()[index]`.
    pub fn swap_current_tile_with_upcoming_tile(&mut self, index: usize) -> Result<(), EngineError> {
        self.ensure_playing()?;
        let len = self.upcoming.len();
        let Some(tile) = self.falling.as_mut() else {
            return Err(StateViolation::NoFallingTile.into());
        };
        let Some(slot) = self.upcoming.get_mut(index) else {
            return Err(StateViolation::UpcomingIndexOutOfBounds { index, len }.into());
        };

        std::mem::swap(&mut tile.text, slot);
        let (at, text) = (tile.at, tile.text.clone());

        self.notify(|o| o.upcoming_changed());
        self.notify(|o| o.tile_moved_into_cell(at, &text));
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn falling_position(&self) -> Result<Coordinate, EngineError> {
        self.falling
            .as_ref()
            .map(|tile| tile.at)
            .ok_or(StateViolation::NoFallingTile.into())
    }

    fn ensure_playing(&self) -> Result<(), EngineError> {
        if self.is_game_over() {
            return Err(StateViolation::GameEnded.into());
        }
        Ok(())
    }

    fn end_game(&mut self) {
        self.timer.stop();
        self.falling = None;
        self.set_phase(EnginePhase::GameOver);
        log::info!("Game over with score {}", self.score);
    }

    fn set_phase(&mut self, phase: EnginePhase) {
        log::trace!("{:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    fn notify(&self, event: impl FnOnce(&mut (dyn EngineObserver + 'static))) {
        let Some(observer) = self.observer.as_ref().and_then(Weak::upgrade) else {
            return;
        };
        let borrowed = observer.try_borrow_mut();
        match borrowed {
            Ok(mut observer) => event(&mut *observer),
            Err(_) => log::warn!("Observer is busy, dropping notification"),
        };
    }
}
