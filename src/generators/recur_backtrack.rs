use crate::{
    error::Result,
    generators::{MazeGenerator, MazeParams, get_rng, place_endpoints},
    maze::Maze,
};
use rand::seq::SliceRandom;

/// Randomized depth-first search carving from the entrance.
#[derive(Debug, Default, Clone, Copy)]
pub struct BacktrackerGenerator;

impl MazeGenerator for BacktrackerGenerator {
    fn name(&self) -> &str {
        "Backtracker"
    }

    fn generate(&self, seed: i64, params: &MazeParams) -> Result<Maze> {
        let mut maze = Maze::new(params.width, params.height)?;
        maze.set_name(self.name());

        let mut rng = get_rng(seed);
        place_endpoints(&mut maze, &mut rng)?;

        let start = maze.entrance();
        let mut visited = vec![false; maze.len()];
        visited[start] = true;

        // Initialize the stack with the starting point
        // The stack will keep only visited cells
        let mut stack = vec![start];

        while let Some(cell) = stack.pop() {
            let mut siblings = maze[cell].siblings().to_vec();
            siblings.shuffle(&mut rng);
            let neighbor = siblings
                .into_iter()
                .flatten()
                .find(|&sibling| !visited[sibling]);

            if let Some(neighbor) = neighbor {
                maze.remove_wall_between(cell, neighbor)?;
                visited[neighbor] = true;
                // Put the cell back first so we can look at another neighbor of this cell later
                stack.push(cell);
                // Put the neighbor to carve the maze in that neighbor's direction
                stack.push(neighbor);
            }
        }

        tracing::debug!(
            "[backtracker] seed {} carved a {}x{} maze",
            seed,
            params.width,
            params.height
        );
        Ok(maze)
    }
}
