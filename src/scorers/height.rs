use std::collections::{HashMap, VecDeque};

use rand::{Rng, rngs::StdRng};

use crate::{
    error::{MazeError, Result},
    generators::get_rng,
    maze::{CellId, Mark, Maze},
    scorers::{KEY_SCORE, MazeInfo, ScoreCard, Scorer},
};

pub const DEFAULT_HEIGHT_RANGE: u8 = 10;
/// Glyphs run from `A`/`a` upwards, one letter per level.
const MAX_HEIGHT_RANGE: u8 = 26;
const MAX_PASSES: usize = 10_000;

/// Lays the maze out on terrain: every cell gets a height in `[0, H)` and
/// cells joined by an open wall differ by at most one level. Entrance and exit
/// sit at level 0.
#[derive(Debug, Clone, Copy)]
pub struct HeightLeveler {
    height_range: u8,
}

impl HeightLeveler {
    pub fn new(height_range: u8) -> Result<Self> {
        if !(1..=MAX_HEIGHT_RANGE).contains(&height_range) {
            return Err(MazeError::InvalidParams(format!(
                "height range must be within 1..={}, got {}",
                MAX_HEIGHT_RANGE, height_range
            )));
        }
        Ok(Self { height_range })
    }

    pub fn height_range(&self) -> u8 {
        self.height_range
    }
}

impl Default for HeightLeveler {
    fn default() -> Self {
        Self {
            height_range: DEFAULT_HEIGHT_RANGE,
        }
    }
}

struct Terrain {
    heights: Vec<u8>,
    fixed: Vec<bool>,
}

impl Terrain {
    /// Random start heights, assigned in BFS order over the full grid adjacency.
    fn seeded(maze: &Maze, rng: &mut StdRng, height_range: u8) -> Self {
        let mut heights = vec![0; maze.len()];
        let mut fixed = vec![false; maze.len()];
        fixed[maze.entrance()] = true;
        fixed[maze.exit()] = true;

        let mut visited = vec![false; maze.len()];
        let mut queue = VecDeque::from([maze.entrance()]);
        visited[maze.entrance()] = true;
        while let Some(cell) = queue.pop_front() {
            if !fixed[cell] {
                heights[cell] = rng.random_range(0..height_range);
            }
            for &sibling in maze[cell].siblings().iter().flatten() {
                if !visited[sibling] {
                    visited[sibling] = true;
                    queue.push_back(sibling);
                }
            }
        }
        Self { heights, fixed }
    }

    /// Brings one edge back within a single level. Returns whether anything moved.
    fn relax(&mut self, a: CellId, b: CellId, rng: &mut StdRng) -> bool {
        let (ha, hb) = (self.heights[a], self.heights[b]);
        if ha.abs_diff(hb) <= 1 {
            return false;
        }
        match (self.fixed[a], self.fixed[b]) {
            (true, true) => {
                // Only ever lower, so pinned level-0 cells never move
                let (high, low) = if ha > hb { (a, hb) } else { (b, ha) };
                self.heights[high] = low + 1;
            }
            (true, false) => {
                self.heights[b] = toward(ha, hb);
                self.fixed[b] = true;
            }
            (false, true) => {
                self.heights[a] = toward(hb, ha);
                self.fixed[a] = true;
            }
            (false, false) => {
                if rng.random_bool(0.5) {
                    self.heights[a] = step(ha, hb);
                } else {
                    self.heights[b] = step(hb, ha);
                }
            }
        }
        true
    }

    /// One relaxation pass over the open edges reachable from the entrance.
    fn pass(&mut self, maze: &Maze, rng: &mut StdRng) -> bool {
        let mut changed = false;
        let mut done = vec![false; maze.len()];
        let mut queued = vec![false; maze.len()];
        let mut queue = VecDeque::from([maze.entrance()]);
        queued[maze.entrance()] = true;

        while let Some(cell) = queue.pop_front() {
            let siblings = maze.open_neighbors(cell).collect::<Vec<_>>();
            for sibling in siblings {
                if done[sibling] {
                    continue;
                }
                changed |= self.relax(cell, sibling, rng);
                if !queued[sibling] {
                    queued[sibling] = true;
                    queue.push_back(sibling);
                }
            }
            done[cell] = true;
        }
        changed
    }

    fn validate(&self, maze: &Maze) -> Result<()> {
        let mut visited = vec![false; maze.len()];
        let mut queue = VecDeque::from([maze.entrance()]);
        visited[maze.entrance()] = true;
        while let Some(cell) = queue.pop_front() {
            for sibling in maze.open_neighbors(cell) {
                let (ha, hb) = (self.heights[cell], self.heights[sibling]);
                if ha.abs_diff(hb) > 1 {
                    return Err(MazeError::HeightConstraint {
                        a: cell,
                        height_a: ha,
                        b: sibling,
                        height_b: hb,
                    });
                }
                if !visited[sibling] {
                    visited[sibling] = true;
                    queue.push_back(sibling);
                }
            }
        }
        Ok(())
    }
}

/// The level next to `anchor` on the side of `other`.
fn toward(anchor: u8, other: u8) -> u8 {
    if other > anchor { anchor + 1 } else { anchor - 1 }
}

/// Moves `from` one level towards `to`.
fn step(from: u8, to: u8) -> u8 {
    if to > from { from + 1 } else { from - 1 }
}

/// Computes cell heights for `maze`, seeded by the maze seed.
pub fn level_heights(maze: &Maze, seed: i64, height_range: u8) -> Result<Vec<u8>> {
    let mut rng = get_rng(seed);
    let mut terrain = Terrain::seeded(maze, &mut rng, height_range);

    let mut passes = 0;
    while terrain.pass(maze, &mut rng) {
        passes += 1;
        if passes >= MAX_PASSES {
            tracing::warn!("[height] no convergence after {} passes", passes);
            break;
        }
    }
    tracing::debug!("[height] converged after {} passes", passes);

    terrain.validate(maze)?;
    Ok(terrain.heights)
}

impl Scorer for HeightLeveler {
    fn name(&self) -> &str {
        "height"
    }

    fn score(&self, info: &mut MazeInfo) -> Result<ScoreCard> {
        let heights = level_heights(&info.maze, info.seed, self.height_range)?;
        let maze = &mut info.maze;
        for (cell, &height) in heights.iter().enumerate() {
            let on_path = maze.mark(cell).is_walked();
            maze.set_mark(cell, Mark::Leveled { on_path, height });
        }

        let marker = (0..self.height_range)
            .flat_map(|height| {
                [
                    (Mark::Leveled { on_path: true, height }, (b'A' + height) as char),
                    (Mark::Leveled { on_path: false, height }, (b'a' + height) as char),
                ]
            })
            .collect::<HashMap<_, _>>();

        Ok(ScoreCard {
            marker,
            ..Default::default()
        }
        .with(KEY_SCORE, 0_i64)
        .with("length", info.path_length)
        .with("height", self.height_range as i64))
    }
}
