//! Thin adapter between user commands, the playback controller and a
//! renderer. Controller errors end up as status lines here; only renderer
//! I/O failures are returned.

use std::error::Error;
use std::io;
use std::time::Duration;

use crate::board::{Outcome, Rules};
use crate::error::PlaybackError;
use crate::playback::{AutoStart, Playback, PlaybackState, StepOutcome};
use crate::render::Renderer;
use crate::scenario::Scenario;
use crate::timer::{Scheduler, TimerId};

pub const MSG_RESET: &str = "Board reset.";
pub const MSG_NO_SCENARIO: &str = "Pick a scenario first (e.g. Scholar's Mate).";
pub const MSG_ALL_SHOWN: &str = "All moves have been shown.";
pub const MSG_ALREADY_SHOWN: &str = "All moves already shown. Reset and try again.";
pub const MSG_AUTO_DONE: &str = "Autoplay finished.";

/// "outer: inner: root" for an error and its sources.
pub fn describe(err: &dyn Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(e) = source {
        text.push_str(": ");
        text.push_str(&e.to_string());
        source = e.source();
    }
    text
}

pub struct DemoApp<R: Rules, S: Scheduler, V: Renderer> {
    playback: Playback<R, S>,
    view: V,
    interval: Duration,
    scenario: Option<String>,
}

impl<R: Rules, S: Scheduler, V: Renderer> DemoApp<R, S, V> {
    pub fn new(playback: Playback<R, S>, view: V, interval: Duration) -> Self {
        Self { playback, view, interval, scenario: None }
    }

    pub fn playback(&self) -> &Playback<R, S> { &self.playback }
    pub fn playback_mut(&mut self) -> &mut Playback<R, S> { &mut self.playback }
    pub fn view(&self) -> &V { &self.view }
    pub fn interval(&self) -> Duration { self.interval }
    pub fn scenario_name(&self) -> Option<&str> { self.scenario.as_deref() }

    pub fn redraw(&mut self) -> io::Result<()> {
        let occ = self.playback.occupancy();
        self.view.render(&occ, self.playback.last_move())
    }

    /// Reset, then load `scenario`.
    pub fn start_scenario(&mut self, scenario: &Scenario) -> io::Result<()> {
        self.reset()?;
        let moves = match scenario.parse_moves() {
            Ok(m) => m,
            Err(e) => return self.view.status(&describe(&e)),
        };
        if let Err(e) = self.playback.load(moves, scenario.fen.as_deref()) {
            return self.view.status(&format!("{}: {}", scenario.name, describe(&e)));
        }
        self.scenario = Some(scenario.name.clone());
        self.redraw()?;
        self.view.status(&format!("{} loaded. Use 'play' or 'step' to start.", scenario.name))
    }

    pub fn step(&mut self) -> io::Result<()> {
        let res = self.playback.step();
        self.report_step(res)
    }

    /// Start autoplay; `interval` overrides the configured delay.
    pub fn play(&mut self, interval: Option<Duration>) -> io::Result<()> {
        let interval = interval.unwrap_or(self.interval);
        match self.playback.play_auto(interval) {
            AutoStart::Started => self.view.status(&format!("Autoplay every {} ms.", interval.as_millis())),
            AutoStart::NoScenarioLoaded => self.view.status(MSG_NO_SCENARIO),
            AutoStart::AlreadyFinished => self.view.status(MSG_ALREADY_SHOWN),
        }
    }

    pub fn stop(&mut self) -> io::Result<()> {
        if !self.playback.is_running() { return Ok(()); }
        self.playback.stop_auto();
        self.view.status(&format!("Autoplay stopped after move {}.", self.playback.cursor()))
    }

    pub fn reset(&mut self) -> io::Result<()> {
        self.playback.reset();
        self.scenario = None;
        self.redraw()?;
        self.view.status(MSG_RESET)
    }

    /// Dispatch one timer firing from the host loop.
    pub fn on_tick(&mut self, timer: TimerId) -> io::Result<()> {
        let Some(res) = self.playback.tick(timer) else { return Ok(()) };
        self.report_step(res)?;
        if self.playback.state() == PlaybackState::Finished {
            self.view.status(MSG_AUTO_DONE)?;
        }
        Ok(())
    }

    fn report_step(&mut self, res: Result<StepOutcome, PlaybackError>) -> io::Result<()> {
        match res {
            Ok(StepOutcome::Applied(applied)) => {
                self.redraw()?;
                let mut line = format!("Move {}: {}", applied.ply, applied.notation);
                let rules = self.playback.rules();
                // SAN already carries '#'; only the raw-move fallback needs the word
                if !applied.notation.ends_with('#') && rules.outcome(self.playback.position()) == Outcome::Checkmate {
                    line.push_str(" Checkmate.");
                }
                self.view.status(&line)
            }
            Ok(StepOutcome::NoScenarioLoaded) => self.view.status(MSG_NO_SCENARIO),
            Ok(StepOutcome::AlreadyFinished) => self.view.status(MSG_ALL_SHOWN),
            Err(e) => self.view.status(&describe(&e)),
        }
    }
}
