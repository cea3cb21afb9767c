use thiserror::Error;

use crate::maze::CellId;

/// Errors raised while building, generating or analysing a maze.
///
/// All of them are configuration or consistency failures: callers are expected to
/// abort the current maze rather than recover.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// A wall operation or a neighbour wiring does not match the cell graph.
    #[error("invalid topology at cell {cell}: {message}")]
    InvalidTopology { cell: CellId, message: String },

    /// A cell id used as entrance or exit is not part of the maze.
    #[error("{role} cell {cell} is not a member of the maze ({len} cells)")]
    NotAMember {
        role: &'static str,
        cell: CellId,
        len: usize,
    },

    /// Generator or scorer parameters are out of range.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Two adjacent open cells ended up more than one height level apart.
    #[error("height difference too high between cell {a} ({height_a}) and cell {b} ({height_b})")]
    HeightConstraint {
        a: CellId,
        height_a: u8,
        b: CellId,
        height_b: u8,
    },

    #[error("no generator registered under '{0}'")]
    UnknownGenerator(String),

    #[error("no scorer registered under '{0}'")]
    UnknownScorer(String),
}

pub type Result<T> = std::result::Result<T, MazeError>;
