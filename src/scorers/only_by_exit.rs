use std::collections::HashMap;

use crate::{
    error::Result,
    maze::{CellId, Mark, Maze},
    scorers::{KEY_SCORE, MazeInfo, ScoreCard, Scorer},
};

/// Counts the off-path cells that can only be reached through the exit.
///
/// A maze where many cells hide behind the exit wastes most of its area, so the
/// score grows with the number of cells that are *not* behind the exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct OnlyByExitScorer;

/// Floods from `start` into off-path cells, marking them `BeyondExit`.
fn count_exit_cells(maze: &mut Maze, start: CellId) -> usize {
    let mut count = 0;
    let mut stack = vec![start];
    while let Some(cell) = stack.pop() {
        let reachable = maze
            .open_neighbors(cell)
            .filter(|&n| matches!(maze.mark(n), Mark::Unknown | Mark::DeadEnd))
            .collect::<Vec<_>>();
        for sibling in reachable {
            maze.set_mark(sibling, Mark::BeyondExit);
            count += 1;
            stack.push(sibling);
        }
    }
    count
}

impl Scorer for OnlyByExitScorer {
    fn name(&self) -> &str {
        "exit"
    }

    fn score(&self, info: &mut MazeInfo) -> Result<ScoreCard> {
        let maze = &mut info.maze;
        let exit = maze.exit();

        let mut cell_count = count_exit_cells(maze, exit);
        // Detours branching off the last path cell also end up next to the exit
        let path_neighbors = maze
            .open_neighbors(exit)
            .filter(|&n| maze.mark(n).is_walked())
            .collect::<Vec<_>>();
        for sibling in path_neighbors {
            cell_count += count_exit_cells(maze, sibling);
        }

        let length = info.path_length;
        let score = (maze.len() - cell_count) as f64 * 0.1 * length as f64;
        tracing::debug!("[exit] {} cells only reachable by the exit", cell_count);

        Ok(ScoreCard {
            marker: HashMap::from([(Mark::BeyondExit, '*')]),
            ..Default::default()
        }
        .with(KEY_SCORE, score)
        .with("length", length)
        .with("endcount", cell_count))
    }
}
