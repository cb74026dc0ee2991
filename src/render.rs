use std::io::{self, Write};

use cozy_chess::{Color, File, Piece, Rank, Square};

use crate::board::Rules;

/// Piece placement, indexed `[rank][file]` with rank 0 = rank 1.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Occupancy {
    squares: [[Option<(Color, Piece)>; 8]; 8],
}

impl Occupancy {
    pub fn from_rules<R: Rules>(rules: &R, pos: &R::Position) -> Self {
        let mut occ = Self::default();
        for &sq in Square::ALL.iter() {
            occ.squares[sq.rank() as usize][sq.file() as usize] = rules.piece_at(pos, sq);
        }
        occ
    }

    pub fn get(&self, sq: Square) -> Option<(Color, Piece)> { self.squares[sq.rank() as usize][sq.file() as usize] }

    pub fn count(&self) -> usize { self.squares.iter().flatten().filter(|s| s.is_some()).count() }
}

pub trait Renderer {
    /// Redraw the board, marking `highlight` as (origin, destination).
    fn render(&mut self, board: &Occupancy, highlight: Option<(Square, Square)>) -> io::Result<()>;

    fn status(&mut self, message: &str) -> io::Result<()>;
}

pub fn glyph(color: Color, piece: Piece) -> char {
    match (color, piece) {
        (Color::White, Piece::Pawn) => '\u{2659}',
        (Color::White, Piece::Knight) => '\u{2658}',
        (Color::White, Piece::Bishop) => '\u{2657}',
        (Color::White, Piece::Rook) => '\u{2656}',
        (Color::White, Piece::Queen) => '\u{2655}',
        (Color::White, Piece::King) => '\u{2654}',
        (Color::Black, Piece::Pawn) => '\u{265F}',
        (Color::Black, Piece::Knight) => '\u{265E}',
        (Color::Black, Piece::Bishop) => '\u{265D}',
        (Color::Black, Piece::Rook) => '\u{265C}',
        (Color::Black, Piece::Queen) => '\u{265B}',
        (Color::Black, Piece::King) => '\u{265A}',
    }
}

/// FEN letter: uppercase for white.
pub fn letter(color: Color, piece: Piece) -> char {
    let c = match piece { Piece::Pawn => 'p', Piece::Knight => 'n', Piece::Bishop => 'b', Piece::Rook => 'r', Piece::Queen => 'q', Piece::King => 'k' };
    if color == Color::White { c.to_ascii_uppercase() } else { c }
}

/// Draws the board as text, rank 8 at the top. The highlighted origin is
/// bracketed `[ ]`, the destination `( )`.
pub struct TextRenderer<W: Write> {
    out: W,
    ascii: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, ascii: bool) -> Self { Self { out, ascii } }

    pub fn into_inner(self) -> W { self.out }

    fn cell(&self, board: &Occupancy, sq: Square) -> char {
        match board.get(sq) {
            Some((color, piece)) if self.ascii => letter(color, piece),
            Some((color, piece)) => glyph(color, piece),
            // light squares are those with an odd file+rank sum
            None if (sq.file() as usize + sq.rank() as usize) % 2 == 1 => '.',
            None => ' ',
        }
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, board: &Occupancy, highlight: Option<(Square, Square)>) -> io::Result<()> {
        let mut text = String::new();
        for &rank in Rank::ALL.iter().rev() {
            text.push(char::from(b'1' + rank as u8));
            text.push(' ');
            for &file in File::ALL.iter() {
                let sq = Square::new(file, rank);
                let (open, close) = match highlight {
                    Some((from, _)) if from == sq => ('[', ']'),
                    Some((_, to)) if to == sq => ('(', ')'),
                    _ => (' ', ' '),
                };
                text.push(open);
                text.push(self.cell(board, sq));
                text.push(close);
            }
            text.push('\n');
        }
        text.push_str("   a  b  c  d  e  f  g  h\n");
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    fn status(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", message)?;
        self.out.flush()
    }
}
