use cozy_chess::{Move, Piece, Square};
use crate::board::Position;
use crate::error::RulesError;

fn file_char(sq: Square) -> char { char::from(b'a' + sq.file() as u8) }
fn rank_char(sq: Square) -> char { char::from(b'1' + sq.rank() as u8) }

fn piece_char(piece: Piece) -> char {
    match piece { Piece::Knight => 'N', Piece::Bishop => 'B', Piece::Rook => 'R', Piece::Queen => 'Q', Piece::King => 'K', Piece::Pawn => 'P' }
}

/// Standard algebraic notation for `mv`, evaluated before it is played.
/// Fails when `mv` is not legal in `pos`.
pub fn san_for_move(pos: &Position, mv: Move) -> Result<String, RulesError> {
    let board = pos.board();
    let mv = pos.resolve(mv).ok_or_else(|| RulesError::Notation {
        mv: mv.to_string(),
        reason: "no matching legal move".to_string(),
    })?;
    let moving_piece = board.piece_on(mv.from).ok_or_else(|| RulesError::Notation {
        mv: mv.to_string(),
        reason: "origin square is empty".to_string(),
    })?;
    let stm = board.side_to_move();

    // Castling is king-takes-own-rook in cozy-chess
    let castles = moving_piece == Piece::King && board.color_on(mv.to) == Some(stm);
    let mut san = if castles {
        if (mv.to.file() as u8) > (mv.from.file() as u8) { "O-O".to_string() } else { "O-O-O".to_string() }
    } else {
        let is_pawn = moving_piece == Piece::Pawn;
        // Pawn moves that change file are captures, en passant included
        let capture = board.color_on(mv.to).map_or(false, |c| c != stm)
            || (is_pawn && mv.from.file() != mv.to.file());

        let (mut need_file, mut need_rank) = (false, false);
        if !is_pawn {
            let mut other_sources: Vec<Square> = Vec::new();
            board.generate_moves(|ml| {
                for m in ml {
                    if m.from != mv.from && m.to == mv.to && board.piece_on(m.from) == Some(moving_piece) {
                        other_sources.push(m.from);
                    }
                }
                false
            });
            if !other_sources.is_empty() {
                let same_file_exists = other_sources.iter().any(|s| s.file() == mv.from.file());
                let same_rank_exists = other_sources.iter().any(|s| s.rank() == mv.from.rank());
                // Minimal disambiguation: file, else rank, else both
                if !same_file_exists { need_file = true; }
                else if !same_rank_exists { need_rank = true; }
                else { need_file = true; need_rank = true; }
            }
        }

        let mut s = String::new();
        if !is_pawn { s.push(piece_char(moving_piece)); }
        if need_file { s.push(file_char(mv.from)); }
        if need_rank { s.push(rank_char(mv.from)); }
        if is_pawn && capture { s.push(file_char(mv.from)); }
        if capture { s.push('x'); }
        s.push(file_char(mv.to));
        s.push(rank_char(mv.to));
        if let Some(promo) = mv.promotion {
            s.push('=');
            s.push(piece_char(promo));
        }
        s
    };

    let mut next = board.clone();
    next.play(mv);
    if !next.checkers().is_empty() {
        let mut opp_has_legal = false;
        next.generate_moves(|ml| { opp_has_legal = !ml.is_empty(); opp_has_legal });
        san.push(if opp_has_legal { '+' } else { '#' });
    }
    Ok(san)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn san(fen: &str, uci: &str) -> String {
        let pos = Position::from_fen(fen).unwrap();
        san_for_move(&pos, uci.parse().unwrap()).unwrap()
    }

    #[test]
    fn san_disambiguates_knight_captures_by_file() {
        // Knights on e5 and f6 can both take d7
        let fen = "k2q4/3p4/5N2/4N3/8/8/8/4K3 w - - 0 1";
        assert_eq!(san(fen, "e5d7"), "Nexd7");
        assert_eq!(san(fen, "f6d7"), "Nfxd7");
    }

    #[test]
    fn san_disambiguates_knight_quiet_by_file() {
        let fen = "8/3k4/8/8/8/1N3N2/8/4K3 w - - 0 1";
        assert_eq!(san(fen, "b3d2"), "Nbd2");
        assert_eq!(san(fen, "f3d2"), "Nfd2");
    }

    #[test]
    fn san_disambiguates_rook_quiet_by_rank() {
        // Rooks on a1 and a5 share the a-file; both reach a3
        let fen = "7k/8/8/R7/8/8/8/R3K3 w - - 0 1";
        assert_eq!(san(fen, "a1a3"), "R1a3");
        assert_eq!(san(fen, "a5a3"), "R5a3");
    }

    #[test]
    fn pawn_capture_promotion_and_check() {
        assert_eq!(san("1r5k/P7/8/8/8/8/8/4K3 w - - 0 1", "a7b8q"), "axb8=Q+");
        assert_eq!(san("7k/P7/8/8/8/8/8/4K3 w - - 0 1", "a7a8n"), "a8=N");
    }

    #[test]
    fn en_passant_is_a_capture() {
        assert_eq!(san("4k3/8/8/3Pp3/8/8/8/4K3 w - e6 0 1", "d5e6"), "dxe6");
    }

    #[test]
    fn castling_in_both_encodings() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        assert_eq!(san(fen, "e1g1"), "O-O");
        assert_eq!(san(fen, "e1h1"), "O-O");
        assert_eq!(san(fen, "e1c1"), "O-O-O");
    }

    #[test]
    fn scholars_mate_final_move() {
        let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
        assert_eq!(san(fen, "h5f7"), "Qxf7#");
    }

    #[test]
    fn illegal_move_cannot_be_notated() {
        let pos = Position::startpos();
        let err = san_for_move(&pos, "e2e5".parse().unwrap()).unwrap_err();
        assert!(matches!(err, RulesError::Notation { .. }));
    }
}
