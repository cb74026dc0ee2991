use cozy_chess::{Board as CozyBoard, Color, File, Move, Piece, Square};
use crate::board::{san, Outcome, Rules};
use crate::error::RulesError;

#[derive(Clone, Debug)]
pub struct Position {
    board: CozyBoard,
}

impl Position {
    pub fn startpos() -> Self {
        Self { board: CozyBoard::default() }
    }

    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        CozyBoard::from_fen(fen.trim(), false)
            .map(|b| Self { board: b })
            .map_err(|e| RulesError::InvalidPosition { fen: fen.to_string(), reason: format!("{e:?}") })
    }

    pub fn board(&self) -> &CozyBoard { &self.board }

    pub fn fen(&self) -> String { format!("{}", self.board) }

    pub fn legal_moves_count(&self) -> usize {
        let mut ct = 0usize;
        self.board.generate_moves(|moves| { ct += moves.len(); false });
        ct
    }

    /// Map a scripted move onto the legal move it denotes. cozy-chess encodes
    /// castling as king-takes-rook, so `e1g1` is also tried as `e1h1`.
    pub fn resolve(&self, mv: Move) -> Option<Move> {
        let castle = self.castle_form(mv);
        let mut found = None;
        self.board.generate_moves(|moves| {
            for m in moves {
                if m == mv || Some(m) == castle { found = Some(m); break; }
            }
            found.is_some()
        });
        found
    }

    fn castle_form(&self, mv: Move) -> Option<Move> {
        if self.board.piece_on(mv.from) != Some(Piece::King) || mv.from.rank() != mv.to.rank() {
            return None;
        }
        let rook_file = match (mv.from.file(), mv.to.file()) {
            (File::E, File::G) => File::H,
            (File::E, File::C) => File::A,
            _ => return None,
        };
        Some(Move { from: mv.from, to: Square::new(rook_file, mv.from.rank()), promotion: None })
    }

    pub fn make_move(&mut self, mv: Move) -> Result<(), RulesError> {
        match self.resolve(mv) {
            Some(m) => { self.board.play(m); Ok(()) }
            None => Err(RulesError::IllegalMove { mv: mv.to_string(), fen: self.fen() }),
        }
    }

    pub fn outcome(&self) -> Outcome {
        let in_check = !self.board.checkers().is_empty();
        match (self.legal_moves_count() == 0, in_check) {
            (true, true) => Outcome::Checkmate,
            (true, false) => Outcome::Stalemate,
            (false, true) => Outcome::Check,
            (false, false) => Outcome::Ongoing,
        }
    }
}

/// [`Rules`] backed by cozy-chess.
#[derive(Clone, Copy, Debug, Default)]
pub struct CozyRules;

impl Rules for CozyRules {
    type Position = Position;

    fn new_game(&self) -> Position { Position::startpos() }

    fn load_position(&self, fen: &str) -> Result<Position, RulesError> { Position::from_fen(fen) }

    fn piece_at(&self, pos: &Position, sq: Square) -> Option<(Color, Piece)> {
        let board = pos.board();
        Some((board.color_on(sq)?, board.piece_on(sq)?))
    }

    fn notate(&self, pos: &Position, mv: Move) -> Result<String, RulesError> { san::san_for_move(pos, mv) }

    fn apply(&self, pos: &Position, mv: Move) -> Result<Position, RulesError> {
        let mut next = pos.clone();
        next.make_move(mv)?;
        Ok(next)
    }

    fn outcome(&self, pos: &Position) -> Outcome { pos.outcome() }

    fn fen(&self, pos: &Position) -> String { pos.fen() }
}
