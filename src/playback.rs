use std::time::Duration;

use cozy_chess::{Move, Square};
use log::{debug, info, warn};

use crate::board::Rules;
use crate::error::PlaybackError;
use crate::render::Occupancy;
use crate::timer::{Scheduler, TimerId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// No sequence loaded.
    Idle,
    /// Sequence loaded, not auto-advancing.
    Loaded,
    /// Autoplay timer armed.
    Running,
    /// Autoplay stopped by the user or by a failed tick.
    Paused,
    /// Every scripted move has been applied.
    Finished,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedMove {
    /// 1-based number of the move just applied.
    pub ply: usize,
    pub from: Square,
    pub to: Square,
    pub notation: String,
    pub finished: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Applied(AppliedMove),
    NoScenarioLoaded,
    AlreadyFinished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoStart {
    Started,
    NoScenarioLoaded,
    AlreadyFinished,
}

/// Replays a fixed move list against a [`Rules`] backend, by hand or on a
/// recurring timer armed through `S`.
///
/// Moves are checked for legality only when they are stepped.
pub struct Playback<R: Rules, S: Scheduler> {
    rules: R,
    scheduler: S,
    position: R::Position,
    moves: Vec<Move>,
    cursor: usize,
    state: PlaybackState,
    timer: Option<TimerId>,
    last_move: Option<(Square, Square)>,
}

impl<R: Rules, S: Scheduler> Playback<R, S> {
    pub fn new(rules: R, scheduler: S) -> Self {
        let position = rules.new_game();
        Self {
            rules,
            scheduler,
            position,
            moves: Vec::new(),
            cursor: 0,
            state: PlaybackState::Idle,
            timer: None,
            last_move: None,
        }
    }

    pub fn state(&self) -> PlaybackState { self.state }
    pub fn cursor(&self) -> usize { self.cursor }
    pub fn len(&self) -> usize { self.moves.len() }
    pub fn is_empty(&self) -> bool { self.moves.is_empty() }
    pub fn moves(&self) -> &[Move] { &self.moves }
    pub fn position(&self) -> &R::Position { &self.position }
    pub fn rules(&self) -> &R { &self.rules }
    pub fn scheduler(&self) -> &S { &self.scheduler }
    pub fn scheduler_mut(&mut self) -> &mut S { &mut self.scheduler }
    pub fn last_move(&self) -> Option<(Square, Square)> { self.last_move }
    pub fn is_running(&self) -> bool { self.state == PlaybackState::Running }

    pub fn occupancy(&self) -> Occupancy { Occupancy::from_rules(&self.rules, &self.position) }

    /// Replace the sequence and rewind. With `initial_fen` the board starts
    /// from that position, otherwise from the standard opening position.
    /// A malformed FEN leaves everything as it was.
    pub fn load(&mut self, moves: Vec<Move>, initial_fen: Option<&str>) -> Result<(), PlaybackError> {
        let position = match initial_fen {
            Some(fen) => self.rules.load_position(fen).map_err(PlaybackError::InvalidPosition)?,
            None => self.rules.new_game(),
        };
        self.cancel_timer();
        self.position = position;
        self.moves = moves;
        self.cursor = 0;
        self.last_move = None;
        self.state = PlaybackState::Loaded;
        info!("loaded {} scripted moves (fen override: {})", self.moves.len(), initial_fen.is_some());
        Ok(())
    }

    /// Apply the next scripted move.
    pub fn step(&mut self) -> Result<StepOutcome, PlaybackError> {
        if self.moves.is_empty() { return Ok(StepOutcome::NoScenarioLoaded); }
        if self.cursor >= self.moves.len() { return Ok(StepOutcome::AlreadyFinished); }

        let mv = self.moves[self.cursor];
        let ply = self.cursor + 1;
        let notation = match self.rules.notate(&self.position, mv) {
            Ok(san) => san,
            Err(e) => {
                warn!("move {}: {}; showing {}", ply, e, mv);
                mv.to_string()
            }
        };
        let next = self.rules.apply(&self.position, mv).map_err(|source| {
            warn!("move {} rejected: {}", ply, source);
            PlaybackError::IllegalMove { ply, mv: mv.to_string(), source }
        })?;

        self.position = next;
        self.cursor = ply;
        self.last_move = Some((mv.from, mv.to));
        let finished = self.cursor == self.moves.len();
        if finished {
            self.cancel_timer();
            self.state = PlaybackState::Finished;
        }
        debug!("move {}/{}: {} ({})", ply, self.moves.len(), notation, mv);
        Ok(StepOutcome::Applied(AppliedMove { ply, from: mv.from, to: mv.to, notation, finished }))
    }

    /// Start stepping every `interval`. Re-arms when already running.
    pub fn play_auto(&mut self, interval: Duration) -> AutoStart {
        if self.moves.is_empty() { return AutoStart::NoScenarioLoaded; }
        if self.cursor >= self.moves.len() { return AutoStart::AlreadyFinished; }
        self.cancel_timer();
        self.timer = Some(self.scheduler.arm(interval));
        self.state = PlaybackState::Running;
        info!("autoplay every {} ms from move {}", interval.as_millis(), self.cursor + 1);
        AutoStart::Started
    }

    /// Handle one firing of `timer`. Returns `None` when the tick is stale:
    /// autoplay was stopped, or the timer is not the one currently armed.
    pub fn tick(&mut self, timer: TimerId) -> Option<Result<StepOutcome, PlaybackError>> {
        if self.state != PlaybackState::Running || self.timer != Some(timer) {
            debug!("dropping stale tick {:?}", timer);
            return None;
        }
        let res = self.step();
        // A finishing step has already moved to Finished; anything else that
        // ends the run leaves the controller Paused.
        if !matches!(&res, Ok(StepOutcome::Applied(applied)) if !applied.finished) {
            self.cancel_timer();
            if self.state == PlaybackState::Running { self.state = PlaybackState::Paused; }
        }
        Some(res)
    }

    pub fn stop_auto(&mut self) {
        self.cancel_timer();
        if self.state == PlaybackState::Running {
            self.state = PlaybackState::Paused;
            info!("autoplay stopped at move {}", self.cursor);
        }
    }

    pub fn reset(&mut self) {
        self.cancel_timer();
        self.position = self.rules.new_game();
        self.moves.clear();
        self.cursor = 0;
        self.last_move = None;
        self.state = PlaybackState::Idle;
        info!("board reset");
    }

    fn cancel_timer(&mut self) {
        if let Some(id) = self.timer.take() { self.scheduler.cancel(id); }
    }
}
