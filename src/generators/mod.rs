use rand::{Rng, SeedableRng, rngs::StdRng};

mod kruskal;
mod recur_backtrack;

pub use kruskal::{KruskalGenerator, UnionFind};
pub use recur_backtrack::BacktrackerGenerator;

use crate::{error::Result, maze::Maze};

/// Size of the maze to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeParams {
    pub width: usize,
    pub height: usize,
}

impl Default for MazeParams {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
        }
    }
}

/// Builds a perfect maze: every cell reachable, exactly one path between any two cells.
///
/// Implementations must be deterministic: the same seed and parameters always
/// produce the same walls, entrance and exit.
pub trait MazeGenerator {
    /// Display name of the algorithm, also used for registry lookups.
    fn name(&self) -> &str;

    fn generate(&self, seed: i64, params: &MazeParams) -> Result<Maze>;
}

/// Get a random number generator for a maze seed.
pub(crate) fn get_rng(seed: i64) -> StdRng {
    StdRng::seed_from_u64(seed as u64)
}

/// Picks an offset within the middle half of a row of `width` cells.
fn middle_half(width: usize, rng: &mut StdRng) -> usize {
    match width / 2 {
        0 => 0,
        half => rng.random_range(0..half) + width / 4,
    }
}

/// Places the entrance in the middle half of the first row and the exit in the
/// middle half of the last row, drawing from `rng` in that order.
pub(crate) fn place_endpoints(maze: &mut Maze, rng: &mut StdRng) -> Result<()> {
    let start = middle_half(maze.width(), rng);
    let end = middle_half(maze.width(), rng);
    maze.set_entrance(start)?;
    maze.set_exit(maze.len() - end - 1)?;
    tracing::debug!(
        "[generate] entrance at {:?}, exit at {:?}",
        maze.coord(maze.entrance()),
        maze.coord(maze.exit())
    );
    Ok(())
}
