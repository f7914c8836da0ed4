use std::fmt;

use board::{legal_moves, parse_move, Color, Move, MoveParseError, MoveSet, ParseError, Position};
use evaluation::hce::material_table_value;
use log::debug;
use thiserror::Error;

use crate::repetition::RepetitionTable;

/// Occurrences of one position that end the game.
pub const REPETITION_LIMIT: u8 = 4;

/// Half-moves without a capture or pawn move that end the game.
pub const FIFTY_MOVE_LIMIT: u16 = 100;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid position: {0}")]
    Parse(#[from] ParseError),
    #[error("invalid move: {0}")]
    Notation(#[from] MoveParseError),
    #[error("illegal move {0}")]
    IllegalMove(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    FiftyMoveRule,
    Repetition,
    InsufficientMaterial,
    Stalemate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    WhiteWins,
    BlackWins,
    Draw(DrawReason),
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        *self != GameStatus::Ongoing
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "*"),
            GameStatus::WhiteWins => write!(f, "1-0"),
            GameStatus::BlackWins => write!(f, "0-1"),
            GameStatus::Draw(reason) => write!(f, "1/2-1/2 ({:?})", reason),
        }
    }
}

/// A game in progress: the current position plus everything needed to
/// adjudicate it.
pub struct Game {
    position: Position,
    moves: Vec<Move>,
    hash_history: Vec<u64>,
    repetitions: RepetitionTable,
}

impl Game {
    pub fn new(fen: &str) -> Result<Self, GameError> {
        let position = Position::from_fen(fen)?;
        Ok(Self::from_position(position))
    }

    pub fn start() -> Self {
        Self::from_position(Position::default())
    }

    pub fn from_position(position: Position) -> Self {
        let mut repetitions = RepetitionTable::new();
        repetitions.record(position.hash());
        Self {
            hash_history: vec![position.hash()],
            position,
            moves: Vec::new(),
            repetitions,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    pub fn legal_moves(&self) -> MoveSet {
        legal_moves(&self.position)
    }

    /// Moves played since the game was created.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Hash of every position of the game, the current one last.
    pub fn hash_history(&self) -> &[u64] {
        &self.hash_history
    }

    /// Occurrences of the current position, itself included.
    pub fn repetition_count(&self) -> u8 {
        self.repetitions.count(self.position.hash())
    }

    /// Plays `mv` if it is legal here. The position is untouched otherwise.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), GameError> {
        if !self.legal_moves().contains(&mv) {
            return Err(GameError::IllegalMove(mv.to_string()));
        }

        self.position.apply(mv);
        let hash = self.position.hash();
        let count = self.repetitions.record(hash);
        self.hash_history.push(hash);
        self.moves.push(mv);
        debug!("played {} (occurrence {})", mv, count);
        Ok(())
    }

    pub fn apply_notation(&mut self, text: &str) -> Result<Move, GameError> {
        let mv = parse_move(&self.position, text)?;
        self.apply_move(mv)?;
        Ok(mv)
    }

    pub fn status(&self) -> GameStatus {
        let moves = self.legal_moves();
        if moves.is_empty() {
            if !moves.in_check() {
                return GameStatus::Draw(DrawReason::Stalemate);
            }
            return match self.side_to_move() {
                Color::White => GameStatus::BlackWins,
                Color::Black => GameStatus::WhiteWins,
            };
        }

        if self.position.halfmove_clock() >= FIFTY_MOVE_LIMIT {
            return GameStatus::Draw(DrawReason::FiftyMoveRule);
        }
        if self.repetition_count() >= REPETITION_LIMIT {
            return GameStatus::Draw(DrawReason::Repetition);
        }
        if self.position.is_insufficient_material()
            || material_table_value(&self.position) == Some(0)
        {
            return GameStatus::Draw(DrawReason::InsufficientMaterial);
        }

        GameStatus::Ongoing
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::start()
    }
}
