use crate::{
    error::Result,
    maze::{CellId, Direction},
    scorers::{KEY_SCORE, MazeInfo, ScoreCard, Scorer},
};

/// Counts the openings passed while following the route from entrance to exit.
///
/// An opening straight ahead of the walking direction is a branch, any other
/// opening is a junction.
#[derive(Debug, Default, Clone, Copy)]
pub struct JunctionCounter;

impl Scorer for JunctionCounter {
    fn name(&self) -> &str {
        "junction"
    }

    fn score(&self, info: &mut MazeInfo) -> Result<ScoreCard> {
        let maze = &info.maze;
        let mut branches = 0_usize;
        let mut junctions = 0_usize;
        // Walkers enter from the top border, heading south
        let mut last_dir = Direction::South.index();
        let mut last: Option<CellId> = None;
        let mut current = Some(maze.entrance());

        while let Some(cell) = current.filter(|&c| !maze.is_exit(c)) {
            let mut next = None;
            for (dir, sibling) in maze[cell].open_siblings() {
                if Some(sibling) == last {
                    continue;
                }
                if maze.mark(sibling).is_walked() {
                    next = Some((dir, sibling));
                } else if dir == last_dir {
                    branches += 1;
                } else {
                    junctions += 1;
                }
            }
            last = Some(cell);
            if let Some((dir, _)) = next {
                last_dir = dir;
            }
            current = next.map(|(_, sibling)| sibling);
        }

        let length = info.path_length;
        let score = ((junctions + 1) as f64 * 0.75 + branches as f64 * 1.5) * (2 * length) as f64;
        tracing::debug!(
            "[junction] {} branches, {} junctions over {} cells",
            branches,
            junctions,
            length
        );

        Ok(ScoreCard::default()
            .with(KEY_SCORE, score)
            .with("branches", branches)
            .with("junctions", junctions)
            .with("length", length))
    }
}
