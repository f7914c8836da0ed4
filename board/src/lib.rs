pub mod attacks;
pub mod bitboard;
pub mod fen;
pub mod movegen;
pub mod moves;
pub mod notation;
pub mod perft;
pub mod position;
pub mod types;
pub mod zobrist;

pub use bitboard::Bitboard;
pub use fen::{ParseError, STARTING_FEN};
pub use movegen::{legal_captures, legal_moves, MoveSet, MAX_MOVES};
pub use moves::{Move, MoveFlag, Undo};
pub use notation::{parse_move, MoveParseError};
pub use position::Position;
pub use types::{CastleRights, Color, Piece, Square};
