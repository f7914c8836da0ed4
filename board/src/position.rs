use crate::attacks::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, piece_attacks, rook_attacks,
};
use crate::bitboard::Bitboard;
use crate::moves::{Move, MoveFlag, Undo};
use crate::types::{CastleRights, Color, Piece, Square, CASTLE_MASK};
use crate::zobrist::ZOBRIST;

/// Board state, mutated in place by [`Position::apply`] and restored by [`Position::undo`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Position {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) colors: [Bitboard; 2],
    pub(crate) squares: [Option<Piece>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastleRights,
    pub(crate) en_passant: Option<Square>,
    /// Half-moves since the last capture or pawn move
    pub(crate) halfmove_clock: u16,
    /// Half-moves played since the game started
    pub(crate) ply: u16,
    pub(crate) king_squares: [Square; 2],
    pub(crate) hash: u64,
    pub(crate) pawn_hash: u64,
}

impl Position {
    pub(crate) fn empty() -> Self {
        Self {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            colors: [Bitboard::EMPTY; 2],
            squares: [None; 64],
            side_to_move: Color::White,
            castling: CastleRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            ply: 0,
            king_squares: [Square::E1, Square::E8],
            hash: 0,
            pawn_hash: 0,
        }
    }

    #[inline(always)]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline(always)]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    #[inline(always)]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline(always)]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline(always)]
    pub fn ply(&self) -> u16 {
        self.ply
    }

    #[inline(always)]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline(always)]
    pub fn pawn_hash(&self) -> u64 {
        self.pawn_hash
    }

    #[inline(always)]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    #[inline(always)]
    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    /// Pieces of one kind for both colors.
    #[inline(always)]
    pub fn pieces_of_kind(&self, piece: Piece) -> Bitboard {
        self.pieces[0][piece.index()] | self.pieces[1][piece.index()]
    }

    #[inline(always)]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.colors[color.index()]
    }

    #[inline(always)]
    pub fn occupied(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }

    #[inline(always)]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    #[inline(always)]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        if self.colors[0].contains(sq) {
            Some(Color::White)
        } else if self.colors[1].contains(sq) {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// Bishops and queens of `color`.
    #[inline(always)]
    pub fn diagonal_sliders(&self, color: Color) -> Bitboard {
        self.pieces(color, Piece::Bishop) | self.pieces(color, Piece::Queen)
    }

    /// Rooks and queens of `color`.
    #[inline(always)]
    pub fn orthogonal_sliders(&self, color: Color) -> Bitboard {
        self.pieces(color, Piece::Rook) | self.pieces(color, Piece::Queen)
    }

    /// Number of knights, bishops, rooks and queens `color` has.
    #[inline(always)]
    pub fn piece_count(&self, color: Color) -> u32 {
        (self.occupancy(color)
            & !self.pieces(color, Piece::Pawn)
            & !self.pieces(color, Piece::King))
        .count()
    }

    /// Pieces of `by` attacking `sq`, given `occupied` as the blocker set.
    #[inline(always)]
    pub fn attackers_of(&self, sq: Square, by: Color, occupied: Bitboard) -> Bitboard {
        (pawn_attacks(!by, sq) & self.pieces(by, Piece::Pawn))
            | (knight_attacks(sq) & self.pieces(by, Piece::Knight))
            | (king_attacks(sq) & self.pieces(by, Piece::King))
            | (bishop_attacks(sq, occupied) & self.diagonal_sliders(by))
            | (rook_attacks(sq, occupied) & self.orthogonal_sliders(by))
    }

    /// Attackers of both colors.
    #[inline(always)]
    pub fn all_attackers_of(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.attackers_of(sq, Color::White, occupied) | self.attackers_of(sq, Color::Black, occupied)
    }

    /// Every square `color` attacks with the given blockers.
    pub fn attacked_squares(&self, color: Color, occupied: Bitboard) -> Bitboard {
        let mut attacks = self.pieces(color, Piece::Pawn).pawn_attacks(color);
        for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen, Piece::King] {
            for sq in self.pieces(color, piece) {
                attacks |= piece_attacks(piece, color, sq, occupied);
            }
        }
        attacks
    }

    #[inline(always)]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        self.attackers_of(sq, by, self.occupied()).is_nonempty()
    }

    #[inline(always)]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), !color)
    }

    /// Enemy pieces giving check to the side to move.
    #[inline(always)]
    pub fn checkers(&self) -> Bitboard {
        let us = self.side_to_move;
        self.attackers_of(self.king_square(us), !us, self.occupied())
    }

    /// True when the side to move could legally move a pawn onto the promotion rank next move
    /// if the square in front were free.
    #[inline(always)]
    pub fn has_pawn_on_seventh(&self, color: Color) -> bool {
        let seventh = Bitboard::rank(if color == Color::White { 6 } else { 1 });
        (self.pieces(color, Piece::Pawn) & seventh).is_nonempty()
    }

    pub fn compute_hash(&self) -> u64 {
        let keys = &*ZOBRIST;
        let mut hash = 0;
        for color in Color::ALL {
            for piece in Piece::ALL {
                for sq in self.pieces(color, piece) {
                    hash ^= keys.piece(color, piece, sq);
                }
            }
        }
        if self.side_to_move == Color::Black {
            hash ^= keys.side();
        }
        hash ^= keys.castling(self.castling);
        if let Some(ep) = self.en_passant {
            hash ^= keys.en_passant(ep);
        }
        hash
    }

    pub fn compute_pawn_hash(&self) -> u64 {
        let keys = &*ZOBRIST;
        let mut hash = 0;
        for color in Color::ALL {
            for sq in self.pieces(color, Piece::Pawn) {
                hash ^= keys.piece(color, Piece::Pawn, sq);
            }
        }
        hash
    }

    #[inline(always)]
    pub(crate) fn put_piece(&mut self, color: Color, piece: Piece, sq: Square) {
        self.pieces[color.index()][piece.index()] |= sq;
        self.colors[color.index()] |= sq;
        self.squares[sq.index()] = Some(piece);
        if piece == Piece::King {
            self.king_squares[color.index()] = sq;
        }
    }

    #[inline(always)]
    fn remove_piece(&mut self, color: Color, piece: Piece, sq: Square) {
        self.pieces[color.index()][piece.index()] ^= sq;
        self.colors[color.index()] ^= sq;
        self.squares[sq.index()] = None;
    }

    #[inline(always)]
    fn move_piece(&mut self, color: Color, piece: Piece, from: Square, to: Square) {
        let change = from.bb() | to.bb();
        self.pieces[color.index()][piece.index()] ^= change;
        self.colors[color.index()] ^= change;
        self.squares[from.index()] = None;
        self.squares[to.index()] = Some(piece);
        if piece == Piece::King {
            self.king_squares[color.index()] = to;
        }
    }

    /// Plays a legal move and returns the token needed to take it back.
    pub fn apply(&mut self, mv: Move) -> Undo {
        let keys = &*ZOBRIST;
        let us = self.side_to_move;
        let them = !us;

        let undo_state = (self.en_passant, self.castling, self.halfmove_clock);
        let mut hash_delta = keys.side() ^ keys.castling(self.castling);
        let mut pawn_hash_delta = 0;
        if let Some(ep) = self.en_passant {
            hash_delta ^= keys.en_passant(ep);
        }

        match mv.flag {
            MoveFlag::Castle => {
                let (rook_from, rook_to) = castle_rook_squares(mv.to);
                self.move_piece(us, Piece::King, mv.from, mv.to);
                self.move_piece(us, Piece::Rook, rook_from, rook_to);
                hash_delta ^= keys.piece(us, Piece::King, mv.from)
                    ^ keys.piece(us, Piece::King, mv.to)
                    ^ keys.piece(us, Piece::Rook, rook_from)
                    ^ keys.piece(us, Piece::Rook, rook_to);
            }
            MoveFlag::EnPassant => {
                let captured_sq = mv.to.shift(-us.forward());
                self.remove_piece(them, Piece::Pawn, captured_sq);
                self.move_piece(us, Piece::Pawn, mv.from, mv.to);
                let pawn_keys = keys.piece(them, Piece::Pawn, captured_sq)
                    ^ keys.piece(us, Piece::Pawn, mv.from)
                    ^ keys.piece(us, Piece::Pawn, mv.to);
                hash_delta ^= pawn_keys;
                pawn_hash_delta ^= pawn_keys;
            }
            MoveFlag::Normal => {
                if let Some(captured) = mv.captured {
                    self.remove_piece(them, captured, mv.to);
                    let key = keys.piece(them, captured, mv.to);
                    hash_delta ^= key;
                    if captured == Piece::Pawn {
                        pawn_hash_delta ^= key;
                    }
                }

                self.move_piece(us, mv.piece, mv.from, mv.to);
                let from_key = keys.piece(us, mv.piece, mv.from);
                hash_delta ^= from_key;

                if let Some(promotion) = mv.promotion {
                    self.remove_piece(us, Piece::Pawn, mv.to);
                    self.put_piece(us, promotion, mv.to);
                    hash_delta ^= keys.piece(us, promotion, mv.to);
                    pawn_hash_delta ^= from_key;
                } else {
                    let to_key = keys.piece(us, mv.piece, mv.to);
                    hash_delta ^= to_key;
                    if mv.piece == Piece::Pawn {
                        pawn_hash_delta ^= from_key ^ to_key;
                    }
                }
            }
        }

        self.castling = CastleRights::from_bits(
            self.castling.bits() & !(CASTLE_MASK[mv.from.index()] | CASTLE_MASK[mv.to.index()]),
        );
        hash_delta ^= keys.castling(self.castling);

        self.en_passant = None;
        if mv.piece == Piece::Pawn && mv.from.index().abs_diff(mv.to.index()) == 16 {
            let ep = mv.from.shift(us.forward());
            self.en_passant = Some(ep);
            hash_delta ^= keys.en_passant(ep);
        }

        if mv.piece == Piece::Pawn || mv.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }

        self.ply = self.ply.wrapping_add(1);
        self.side_to_move = them;
        self.hash ^= hash_delta;
        self.pawn_hash ^= pawn_hash_delta;

        Undo {
            en_passant: undo_state.0,
            castling: undo_state.1,
            halfmove_clock: undo_state.2,
            hash_delta,
            pawn_hash_delta,
        }
    }

    /// Takes back `mv`, which must be the last move applied.
    pub fn undo(&mut self, mv: Move, undo: Undo) {
        let them = self.side_to_move;
        let us = !them;

        match mv.flag {
            MoveFlag::Castle => {
                let (rook_from, rook_to) = castle_rook_squares(mv.to);
                self.move_piece(us, Piece::Rook, rook_to, rook_from);
                self.move_piece(us, Piece::King, mv.to, mv.from);
            }
            MoveFlag::EnPassant => {
                self.move_piece(us, Piece::Pawn, mv.to, mv.from);
                self.put_piece(them, Piece::Pawn, mv.to.shift(-us.forward()));
            }
            MoveFlag::Normal => {
                if let Some(promotion) = mv.promotion {
                    self.remove_piece(us, promotion, mv.to);
                    self.put_piece(us, Piece::Pawn, mv.to);
                }
                self.move_piece(us, mv.piece, mv.to, mv.from);
                if let Some(captured) = mv.captured {
                    self.put_piece(them, captured, mv.to);
                }
            }
        }

        self.side_to_move = us;
        self.ply = self.ply.wrapping_sub(1);
        self.en_passant = undo.en_passant;
        self.castling = undo.castling;
        self.halfmove_clock = undo.halfmove_clock;
        self.hash ^= undo.hash_delta;
        self.pawn_hash ^= undo.pawn_hash_delta;

        debug_assert_eq!(self.hash, self.compute_hash());
    }

    /// Passes the turn. Only valid when the side to move is not in check.
    pub fn apply_null(&mut self) -> Undo {
        let keys = &*ZOBRIST;
        let mut hash_delta = keys.side();
        if let Some(ep) = self.en_passant {
            hash_delta ^= keys.en_passant(ep);
        }

        let undo = Undo {
            en_passant: self.en_passant,
            castling: self.castling,
            halfmove_clock: self.halfmove_clock,
            hash_delta,
            pawn_hash_delta: 0,
        };

        self.en_passant = None;
        self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        self.ply = self.ply.wrapping_add(1);
        self.side_to_move = !self.side_to_move;
        self.hash ^= hash_delta;
        undo
    }

    pub fn undo_null(&mut self, undo: Undo) {
        self.side_to_move = !self.side_to_move;
        self.ply = self.ply.wrapping_sub(1);
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.hash ^= undo.hash_delta;
    }

    /// Rebuilds a move from its squares using the current board contents.
    /// Returns `None` when no piece of the side to move stands on `from`.
    pub fn decode_move(&self, from: Square, to: Square, promotion: Option<Piece>) -> Option<Move> {
        let us = self.side_to_move;
        if !self.occupancy(us).contains(from) {
            return None;
        }
        let piece = self.piece_on(from)?;
        let mut mv = Move::new(from, to, piece, None);
        mv.promotion = promotion;

        if piece == Piece::King && Square::distance(from, to) == 2 && from.rank() == to.rank() {
            mv.flag = MoveFlag::Castle;
        } else if piece == Piece::Pawn && Some(to) == self.en_passant && from.file() != to.file() {
            mv.flag = MoveFlag::EnPassant;
            mv.captured = Some(Piece::Pawn);
        } else if self.occupancy(!us).contains(to) {
            mv.captured = self.piece_on(to);
        }
        Some(mv)
    }

    /// Cheap validity test for moves coming from hash tables and killer slots.
    /// It does not test whether the mover's king is left in check.
    pub fn is_pseudo_legal(&self, mv: &Move) -> bool {
        let us = self.side_to_move;
        let them = !us;
        let occupied = self.occupied();

        if !self.pieces(us, mv.piece).contains(mv.from) || self.occupancy(us).contains(mv.to) {
            return false;
        }

        match mv.flag {
            MoveFlag::Castle => {
                let Some((right, rook_from)) = castle_for_king_target(us, mv.to) else {
                    return false;
                };
                mv.piece == Piece::King
                    && self.castling.contains(right)
                    && self.pieces(us, Piece::Rook).contains(rook_from)
                    && (crate::attacks::between(mv.from, rook_from) & occupied).is_empty()
            }
            MoveFlag::EnPassant => {
                mv.piece == Piece::Pawn
                    && Some(mv.to) == self.en_passant
                    && pawn_attacks(us, mv.from).contains(mv.to)
            }
            MoveFlag::Normal => {
                if self.piece_on(mv.to) != mv.captured {
                    return false;
                }
                if mv.captured.is_some() && !self.occupancy(them).contains(mv.to) {
                    return false;
                }
                let last_rank = mv.to.relative_rank(us) == 7;
                if mv.piece == Piece::Pawn {
                    if last_rank != mv.promotion.is_some() {
                        return false;
                    }
                    if mv.captured.is_some() {
                        return pawn_attacks(us, mv.from).contains(mv.to);
                    }
                    let single = mv.from.offset(0, us.forward() / 8);
                    if single == Some(mv.to) {
                        return true;
                    }
                    return mv.from.relative_rank(us) == 1
                        && single.is_some_and(|s| !occupied.contains(s))
                        && mv.from.offset(0, 2 * (us.forward() / 8)) == Some(mv.to);
                }
                mv.promotion.is_none()
                    && piece_attacks(mv.piece, us, mv.from, occupied).contains(mv.to)
            }
        }
    }

    /// Bare kings, or a single minor piece against a bare king.
    pub fn is_insufficient_material(&self) -> bool {
        let majors_and_pawns = self.pieces_of_kind(Piece::Pawn)
            | self.pieces_of_kind(Piece::Rook)
            | self.pieces_of_kind(Piece::Queen);
        if majors_and_pawns.is_nonempty() {
            return false;
        }
        let minors = self.pieces_of_kind(Piece::Knight) | self.pieces_of_kind(Piece::Bishop);
        !minors.more_than_one()
    }
}

/// Rook origin and destination for a castling king landing on `king_to`.
#[inline(always)]
fn castle_rook_squares(king_to: Square) -> (Square, Square) {
    match king_to {
        Square::G1 => (Square::H1, Square::F1),
        Square::C1 => (Square::A1, Square::D1),
        Square::G8 => (Square::H8, Square::F8),
        _ => (Square::A8, Square::D8),
    }
}

/// Castling right and rook square matching a king target, for `color`.
pub(crate) fn castle_for_king_target(color: Color, king_to: Square) -> Option<(CastleRights, Square)> {
    match (color, king_to) {
        (Color::White, Square::G1) => Some((CastleRights::WHITE_KING, Square::H1)),
        (Color::White, Square::C1) => Some((CastleRights::WHITE_QUEEN, Square::A1)),
        (Color::Black, Square::G8) => Some((CastleRights::BLACK_KING, Square::H8)),
        (Color::Black, Square::C8) => Some((CastleRights::BLACK_QUEEN, Square::A8)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::legal_moves;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    fn walk(position: &mut Position, depth: u32) {
        if depth == 0 {
            return;
        }
        for mv in legal_moves(position).iter().copied() {
            let before = position.clone();
            let undo = position.apply(mv);
            assert_eq!(position.hash(), position.compute_hash(), "hash drift after {mv}");
            assert_eq!(position.pawn_hash(), position.compute_pawn_hash(), "pawn hash drift after {mv}");
            walk(position, depth - 1);
            position.undo(mv, undo);
            assert_eq!(*position, before, "undo of {mv} did not restore the position");
        }
    }

    #[test]
    fn test_apply_undo_is_exact_inverse() {
        for fen in [
            crate::STARTING_FEN,
            KIWIPETE,
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        ] {
            let mut position = Position::from_fen(fen).unwrap();
            walk(&mut position, 3);
        }
    }

    #[test]
    fn test_null_move_round_trip() {
        let mut position = Position::from_fen(KIWIPETE).unwrap();
        let before = position.clone();
        let undo = position.apply_null();
        assert_eq!(position.side_to_move(), Color::Black);
        assert_eq!(position.hash(), position.compute_hash());
        position.undo_null(undo);
        assert_eq!(position, before);
    }

    #[test]
    fn test_en_passant_clears_hash_key() {
        let mut position = Position::from_fen(crate::STARTING_FEN).unwrap();
        let e4 = position.decode_move(Square::E2, Square::E4, None).unwrap();
        position.apply(e4);
        assert_eq!(position.en_passant(), Some(Square::E3));
        let nf6 = position.decode_move(Square::G8, Square::F6, None).unwrap();
        position.apply(nf6);
        assert_eq!(position.en_passant(), None);
        assert_eq!(position.hash(), position.compute_hash());
    }

    #[test]
    fn test_transposition_gives_same_hash() {
        let mut a = Position::from_fen(crate::STARTING_FEN).unwrap();
        let mut b = a.clone();
        for (from, to) in [(Square::G1, Square::F3), (Square::G8, Square::F6), (Square::B1, Square::C3)] {
            let mv = a.decode_move(from, to, None).unwrap();
            a.apply(mv);
        }
        for (from, to) in [(Square::B1, Square::C3), (Square::G8, Square::F6), (Square::G1, Square::F3)] {
            let mv = b.decode_move(from, to, None).unwrap();
            b.apply(mv);
        }
        assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn test_pseudo_legality_of_decoded_moves() {
        let position = Position::from_fen(KIWIPETE).unwrap();
        for mv in legal_moves(&position).iter() {
            let decoded = position.decode_move(mv.from, mv.to, mv.promotion).unwrap();
            assert_eq!(decoded, *mv);
            assert!(position.is_pseudo_legal(mv));
        }
        let bogus = position.decode_move(Square::A1, Square::A8, None).unwrap();
        assert!(!position.is_pseudo_legal(&bogus));
        assert!(position.decode_move(Square::A8, Square::B8, None).is_none());
    }

    #[test]
    fn test_insufficient_material() {
        assert!(Position::from_fen("8/8/8/4k3/8/8/8/4K3 w - - 0 1").unwrap().is_insufficient_material());
        assert!(Position::from_fen("8/8/8/4k3/8/8/8/4KB2 w - - 0 1").unwrap().is_insufficient_material());
        assert!(!Position::from_fen("8/8/8/4k3/8/8/8/3NKB2 w - - 0 1").unwrap().is_insufficient_material());
        assert!(!Position::from_fen("8/8/8/4k3/8/8/4P3/4K3 w - - 0 1").unwrap().is_insufficient_material());
    }
}
