use std::collections::VecDeque;

use crate::maze::{CellId, Maze};

/// Shortest open-wall distances from one root cell.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceField {
    root: CellId,
    distances: Vec<Option<usize>>,
    exit: Option<CellId>,
}

impl DistanceField {
    pub fn root(&self) -> CellId {
        self.root
    }

    /// Distance to `cell`, `None` if it cannot be reached.
    pub fn get(&self, cell: CellId) -> Option<usize> {
        self.distances[cell]
    }

    /// The maze exit, if the search reached it.
    pub fn exit(&self) -> Option<CellId> {
        self.exit
    }

    pub fn reached(&self) -> usize {
        self.distances.iter().flatten().count()
    }
}

/// Breadth-first distances over open walls, O(V + E).
pub fn bfs_distances(maze: &Maze, root: CellId) -> DistanceField {
    let mut distances = vec![None; maze.len()];
    let mut exit = None;
    let mut queue = VecDeque::from([root]);
    distances[root] = Some(0);

    while let Some(current) = queue.pop_front() {
        if exit.is_none() && maze.is_exit(current) {
            exit = Some(current);
        }
        let next_distance = distances[current].map(|d| d + 1);
        for sibling in maze.open_neighbors(current) {
            if distances[sibling].is_none() {
                distances[sibling] = next_distance;
                queue.push_back(sibling);
            }
        }
    }

    DistanceField {
        root,
        distances,
        exit,
    }
}
