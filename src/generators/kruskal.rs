use crate::{
    error::Result,
    generators::{MazeGenerator, MazeParams, get_rng, place_endpoints},
    maze::{CellId, Maze},
};
use rand::seq::SliceRandom;

/// Disjoint sets over cell ids, with union by size and path compression.
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    /// Creates `size` singleton sets.
    pub fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            size: vec![1; size],
        }
    }

    /// Representative of the set containing `x`.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Point every node on the way directly at the root
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merges the sets of `x` and `y`. Returns `false` if they already were one set.
    pub fn unite(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return false; // Already in same set
        }

        // The smaller set joins the larger one
        let (large, small) = if self.size[root_x] >= self.size[root_y] {
            (root_x, root_y)
        } else {
            (root_y, root_x)
        };
        self.parent[small] = large;
        self.size[large] += self.size[small];
        true
    }

    /// Number of elements in the set containing `x`.
    pub fn set_size(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.size[root]
    }
}

/// Wall edge between two adjacent cells
#[derive(Clone, Copy, Debug, PartialEq)]
struct Edge {
    cell1: CellId,
    cell2: CellId,
}

/// Collects every internal wall: horizontal neighbours first, then vertical ones.
fn find_walls(width: usize, height: usize) -> Vec<Edge> {
    let horizontal = (0..height).flat_map(|y| {
        (0..width.saturating_sub(1)).map(move |x| Edge {
            cell1: y * width + x,
            cell2: y * width + x + 1,
        })
    });
    let vertical = (0..height.saturating_sub(1)).flat_map(|y| {
        (0..width).map(move |x| Edge {
            cell1: y * width + x,
            cell2: (y + 1) * width + x,
        })
    });
    horizontal.chain(vertical).collect()
}

/// Randomized Kruskal: opens shuffled walls that join two separate regions.
#[derive(Debug, Default, Clone, Copy)]
pub struct KruskalGenerator;

impl MazeGenerator for KruskalGenerator {
    fn name(&self) -> &str {
        "Randomized Kruskal"
    }

    fn generate(&self, seed: i64, params: &MazeParams) -> Result<Maze> {
        let mut maze = Maze::new(params.width, params.height)?;
        maze.set_name(self.name());

        let mut rng = get_rng(seed);
        place_endpoints(&mut maze, &mut rng)?;

        // Shuffle edges randomly
        let mut edges = find_walls(params.width, params.height);
        edges.shuffle(&mut rng);

        // Initialize Union-Find for all cells
        let mut uf = UnionFind::new(maze.len());
        let mut opened = 0;
        for edge in edges {
            // If cells are not yet connected, remove the wall between them
            if uf.find(edge.cell1) != uf.find(edge.cell2) {
                maze.remove_wall_between(edge.cell1, edge.cell2)?;
                uf.unite(edge.cell1, edge.cell2);
                opened += 1;
            }
        }

        tracing::debug!(
            "[kruskal] seed {} opened {} walls in a {}x{} maze",
            seed,
            opened,
            params.width,
            params.height
        );
        Ok(maze)
    }
}
