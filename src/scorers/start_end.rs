use std::collections::HashMap;

use crate::{
    error::Result,
    maze::{Mark, Side},
    scorers::{KEY_SCORE, MazeInfo, ScoreCard, Scorer, bfs_distances},
};

/// Splits the off-path cells into those closer to the entrance and those closer
/// to the exit, and derives a difficulty level from the proportions.
#[derive(Debug, Default, Clone, Copy)]
pub struct StartEndScorer;

/// Difficulty level from path length and side counts, all in cells.
fn level(length: usize, start: usize, end: usize, maze_height: usize) -> i64 {
    let sum = (length + start + end) as f64 / 100.0;
    let (length_pct, end_pct) = (length as f64 / sum, end as f64 / sum);

    if end_pct > 66.0 || (length as f64) < maze_height as f64 * 1.5 {
        1
    } else if end > start {
        2
    } else if length_pct > 30.0 {
        6
    } else if length_pct > 25.0 {
        5
    } else if start > end {
        3
    } else {
        4
    }
}

impl Scorer for StartEndScorer {
    fn name(&self) -> &str {
        "startend"
    }

    fn score(&self, info: &mut MazeInfo) -> Result<ScoreCard> {
        let maze = &mut info.maze;
        let from_start = bfs_distances(maze, maze.entrance());
        let exit = from_start.exit().unwrap_or(maze.exit());
        let from_end = bfs_distances(maze, exit);

        let mut start_count = 0;
        let mut end_count = 0;
        for cell in 0..maze.len() {
            if maze.mark(cell).is_walked() {
                continue;
            }
            let start = from_start.get(cell).unwrap_or(usize::MAX);
            let end = from_end.get(cell).unwrap_or(usize::MAX);
            if start > end {
                maze.set_mark(cell, Mark::Side(Side::End));
                end_count += 1;
            } else {
                maze.set_mark(cell, Mark::Side(Side::Start));
                start_count += 1;
            }
        }

        let length = info.path_length;
        let sum = (length + start_count + end_count) as f64 / 100.0;
        let p_length = length as f64 / sum;
        let p_start = start_count as f64 / sum;
        let p_end = end_count as f64 / sum;
        let level = level(length, start_count, end_count, maze.height());

        tracing::debug!(
            "[startend] path {:4.1}%, start {:4.1}%, end {:4.1}%, level {}",
            p_length,
            p_start,
            p_end,
            level
        );

        Ok(ScoreCard {
            marker: HashMap::from([(Mark::Side(Side::Start), '+'), (Mark::Side(Side::End), '-')]),
            ..Default::default()
        }
        .with(KEY_SCORE, p_length * 6.0 + p_start * 2.0)
        .with("level", level)
        .with("path", p_length)
        .with("start", p_start)
        .with("end", p_end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorers::{ScoreValue, tests::solved_info};

    #[test]
    fn test_level_thresholds() {
        // Short path compared to the maze height
        assert_eq!(level(5, 40, 40, 10), 1);
        // Exit side dominates
        assert_eq!(level(10, 10, 80, 4), 1);
        assert_eq!(level(20, 30, 50, 4), 2);
        assert_eq!(level(40, 30, 30, 4), 6);
        assert_eq!(level(28, 40, 32, 4), 5);
        assert_eq!(level(20, 50, 30, 4), 3);
        assert_eq!(level(20, 40, 40, 4), 4);
    }

    #[test]
    fn test_every_off_path_cell_is_classified() {
        let mut info = solved_info(2024, 12, 12);
        let card = StartEndScorer.score(&mut info).unwrap();
        let maze = &info.maze;
        let start = maze.count_marked(Mark::Side(Side::Start));
        let end = maze.count_marked(Mark::Side(Side::End));
        assert_eq!(start + end + info.path_length, maze.len());

        let total = ["path", "start", "end"]
            .iter()
            .map(|k| card.get(k).unwrap().as_f64())
            .sum::<f64>();
        assert!((total - 100.0).abs() < 1e-9);
        assert!(matches!(card.get("level"), Some(ScoreValue::Int(1..=6))));
        assert_eq!(card.marker[&Mark::Side(Side::End)], '-');
    }

    #[test]
    fn test_score_formula() {
        let mut info = solved_info(5, 6, 6);
        let card = StartEndScorer.score(&mut info).unwrap();
        let expected =
            card.get("path").unwrap().as_f64() * 6.0 + card.get("start").unwrap().as_f64() * 2.0;
        assert!((card.score() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_cells_near_exit_are_end_side() {
        let mut info = solved_info(31, 8, 8);
        StartEndScorer.score(&mut info).unwrap();
        let maze = &info.maze;
        let from_start = bfs_distances(maze, maze.entrance());
        let from_end = bfs_distances(maze, maze.exit());
        for cell in maze.cells() {
            let expected = match cell.mark() {
                Mark::Side(Side::End) => true,
                Mark::Side(Side::Start) => false,
                _ => continue,
            };
            assert_eq!(from_start.get(cell.id()) > from_end.get(cell.id()), expected);
        }
    }
}
