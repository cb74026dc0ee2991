//! Chess rules seam. The playback controller never inspects a board itself;
//! everything it needs goes through [`Rules`].

pub mod cozy;
pub mod san;

use cozy_chess::{Color, Move, Piece, Square};
use crate::error::RulesError;

pub use cozy::{CozyRules, Position};

/// Game state of a position as seen by the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}

/// Board-state collaborator consumed by [`crate::playback::Playback`].
///
/// Positions are values: `apply` returns the successor and leaves its input
/// untouched, so a rejected move never disturbs the current position.
pub trait Rules {
    type Position: Clone;

    /// Standard starting position.
    fn new_game(&self) -> Self::Position;

    /// Parse a FEN string.
    fn load_position(&self, fen: &str) -> Result<Self::Position, RulesError>;

    fn piece_at(&self, pos: &Self::Position, sq: Square) -> Option<(Color, Piece)>;

    /// SAN for `mv`, which has not been played yet.
    fn notate(&self, pos: &Self::Position, mv: Move) -> Result<String, RulesError>;

    fn apply(&self, pos: &Self::Position, mv: Move) -> Result<Self::Position, RulesError>;

    fn outcome(&self, pos: &Self::Position) -> Outcome;

    fn fen(&self, pos: &Self::Position) -> String;
}
