// Scripted checkmate replay: rules seam, playback controller, text front end
pub mod app;
pub mod board;
pub mod config;
pub mod error;
pub mod playback;
pub mod render;
pub mod scenario;
pub mod timer;

pub use error::{PlaybackError, RulesError, ScenarioError};
pub use playback::{AppliedMove, AutoStart, Playback, PlaybackState, StepOutcome};
