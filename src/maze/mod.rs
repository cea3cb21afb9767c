pub mod cell;
pub mod grid;
pub mod painter;

use crate::error::{MazeError, Result};

pub use cell::{Cell, CellId, Mark, Painted, Side};
pub use grid::Direction;

/// A grid of cells connected by removable walls.
///
/// The maze owns every cell in row-major order and references its entrance and
/// exit by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Maze {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
    entrance: CellId,
    exit: CellId,
    name: String,
}

impl Maze {
    /// Creates a maze with all walls closed.
    /// The entrance defaults to the first cell and the exit to the last one.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let cells = grid::build(width, height)?;
        Maze::from_cells(cells, width, height)
    }

    /// Wraps already wired cells. `cells` must hold exactly `width * height` cells.
    pub fn from_cells(cells: Vec<Cell>, width: usize, height: usize) -> Result<Self> {
        if cells.is_empty() || cells.len() != width * height {
            return Err(MazeError::InvalidParams(format!(
                "expected {}x{} = {} cells, got {}",
                width,
                height,
                width * height,
                cells.len()
            )));
        }
        let exit = cells.len() - 1;
        Ok(Maze {
            cells,
            width,
            height,
            entrance: 0,
            exit,
            name: "Maze".to_string(),
        })
    }

    /// Returns the height of the maze in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the width of the maze in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn entrance(&self) -> CellId {
        self.entrance
    }

    pub fn exit(&self) -> CellId {
        self.exit
    }

    pub fn is_exit(&self, cell: CellId) -> bool {
        cell == self.exit
    }

    /// Sets the entrance. Fails if `cell` does not belong to this maze.
    pub fn set_entrance(&mut self, cell: CellId) -> Result<()> {
        self.check_member("entrance", cell)?;
        self.entrance = cell;
        Ok(())
    }

    /// Sets the exit. Fails if `cell` does not belong to this maze.
    pub fn set_exit(&mut self, cell: CellId) -> Result<()> {
        self.check_member("exit", cell)?;
        self.exit = cell;
        Ok(())
    }

    fn check_member(&self, role: &'static str, cell: CellId) -> Result<()> {
        if cell >= self.cells.len() {
            return Err(MazeError::NotAMember {
                role,
                cell,
                len: self.cells.len(),
            });
        }
        Ok(())
    }

    /// Grid coordinate `(x, y)` of a cell.
    pub fn coord(&self, cell: CellId) -> (usize, usize) {
        (cell % self.width, cell / self.width)
    }

    pub fn has_wall(&self, cell: CellId, direction: isize) -> bool {
        self.cells[cell].has_wall(direction)
    }

    /// Opens the wall of `cell` in `direction` and the matching wall of its neighbour.
    pub fn remove_wall(&mut self, cell: CellId, direction: isize) -> Result<()> {
        self.set_wall_pair(cell, direction, false)
    }

    /// Closes the wall of `cell` in `direction` and the matching wall of its neighbour.
    pub fn add_wall(&mut self, cell: CellId, direction: isize) -> Result<()> {
        self.set_wall_pair(cell, direction, true)
    }

    /// Opens the wall between two adjacent cells.
    pub fn remove_wall_between(&mut self, a: CellId, b: CellId) -> Result<()> {
        let direction = self.cells[a]
            .direction_of(b)
            .ok_or_else(|| MazeError::InvalidTopology {
                cell: a,
                message: format!("cell {} is not a neighbour", b),
            })?;
        self.set_wall_pair(a, direction as isize, false)
    }

    fn set_wall_pair(&mut self, cell: CellId, direction: isize, wall: bool) -> Result<()> {
        let direction = self.cells[cell].norm(direction);
        let sibling = self.cells[cell]
            .sibling(direction as isize)
            .ok_or_else(|| MazeError::InvalidTopology {
                cell,
                message: format!("no neighbour in direction {}", direction),
            })?;
        let back = self.cells[cell].reciprocal(direction);
        self.cells[cell].set_wall(direction, wall);
        self.cells[sibling].set_wall(back, wall);
        Ok(())
    }

    /// Neighbours of `cell` reachable through an open wall.
    pub fn open_neighbors(&self, cell: CellId) -> impl Iterator<Item = CellId> + '_ {
        self.cells[cell].open_siblings().map(|(_, id)| id)
    }

    /// Number of open walls, counting each shared wall once.
    pub fn open_edge_count(&self) -> usize {
        self.cells
            .iter()
            .map(|c| c.open_siblings().count())
            .sum::<usize>()
            / 2
    }

    pub fn mark(&self, cell: CellId) -> Mark {
        self.cells[cell].mark()
    }

    pub fn set_mark(&mut self, cell: CellId, mark: Mark) {
        self.cells[cell].set_mark(mark);
    }

    /// Number of cells currently carrying `mark`.
    pub fn count_marked(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|c| c.mark() == mark).count()
    }
}

impl std::ops::Index<CellId> for Maze {
    type Output = Cell;

    fn index(&self, index: CellId) -> &Self::Output {
        &self.cells[index]
    }
}
