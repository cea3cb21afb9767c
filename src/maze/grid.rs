use crate::error::{MazeError, Result};

use super::cell::{Cell, CellId};

/// Number of walls of a rectangular grid cell.
pub const GRID_DEGREE: usize = 4;

/// Wall directions of a rectangular grid cell, in wall-index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    pub const ALL: [Direction; GRID_DEGREE] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction for a wall index, wrapping like [`Cell::norm`].
    pub fn from_index(index: isize) -> Direction {
        Direction::ALL[index.rem_euclid(GRID_DEGREE as isize) as usize]
    }

    pub fn opposite(self) -> Direction {
        Direction::from_index(self as isize + 2)
    }
}

impl From<Direction> for isize {
    fn from(direction: Direction) -> Self {
        direction as isize
    }
}

/// Allocates `max` cells whose degree is the number of sibling functions.
///
/// `siblings[j]` maps a cell index to the index of its neighbour in direction `j`.
/// `None` or an index outside `0..max` leaves that neighbour absent. The wiring
/// must be reciprocal: if `b` is the neighbour of `a` in direction `j`, `a` must be
/// the neighbour of `b` in the opposite direction.
pub fn fill_cells(max: usize, siblings: &[&dyn Fn(usize) -> Option<usize>]) -> Result<Vec<Cell>> {
    if siblings.is_empty() {
        return Err(MazeError::InvalidParams(
            "cells need at least one sibling direction".to_string(),
        ));
    }

    let mut cells = (0..max)
        .map(|id| Cell::new(id, siblings.len()))
        .collect::<Vec<_>>();

    for (index, cell) in cells.iter_mut().enumerate() {
        let wiring = siblings
            .iter()
            .map(|sibling| sibling(index).filter(|&s| s < max))
            .collect::<Vec<_>>();
        cell.set_siblings(wiring)?;
    }

    check_reciprocity(&cells)?;
    Ok(cells)
}

fn check_reciprocity(cells: &[Cell]) -> Result<()> {
    for cell in cells {
        for (dir, sibling) in cell.siblings().iter().enumerate() {
            let Some(sibling) = *sibling else {
                continue;
            };
            let back: Option<CellId> = cells[sibling].siblings()[cell.reciprocal(dir)];
            if back != Some(cell.id()) {
                return Err(MazeError::InvalidTopology {
                    cell: cell.id(),
                    message: format!(
                        "neighbour {} in direction {} does not point back",
                        sibling, dir
                    ),
                });
            }
        }
    }
    Ok(())
}

/// Builds a `width * height` grid of closed cells in row-major order.
///
/// East/west neighbours never cross a row boundary; north/south neighbours are
/// absent on the first and last row.
pub fn build(width: usize, height: usize) -> Result<Vec<Cell>> {
    if width == 0 || height == 0 {
        return Err(MazeError::InvalidParams(format!(
            "grid must be at least 1x1, got {}x{}",
            width, height
        )));
    }

    let north = |i: usize| i.checked_sub(width);
    let east = |i: usize| ((i + 1) % width != 0).then_some(i + 1);
    let south = |i: usize| Some(i + width);
    let west = |i: usize| (i % width != 0).then(|| i - 1);

    let wiring: [&dyn Fn(usize) -> Option<usize>; GRID_DEGREE] = [&north, &east, &south, &west];
    fill_cells(width * height, &wiring)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_wiring() {
        let cells = build(3, 2).unwrap();
        assert_eq!(cells.len(), 6);
        // Top-left corner
        assert_eq!(cells[0].siblings(), &[None, Some(1), Some(3), None]);
        // Right edge: no east neighbour across the row boundary
        assert_eq!(cells[2].siblings(), &[None, None, Some(5), Some(1)]);
        // Bottom row: no south neighbour
        assert_eq!(cells[4].siblings(), &[Some(1), Some(5), None, Some(3)]);
        assert!(cells.iter().all(|c| (0..4).all(|d| c.has_wall(d))));
    }

    #[test]
    fn test_single_cell_grid() {
        let cells = build(1, 1).unwrap();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].siblings(), &[None, None, None, None]);
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert!(matches!(build(0, 4), Err(MazeError::InvalidParams(_))));
    }

    #[test]
    fn test_non_reciprocal_wiring_rejected() {
        // A one-way "east" link with no matching west link
        let east = |i: usize| Some(i + 1);
        let none = |_: usize| -> Option<usize> { None };
        let wiring: [&dyn Fn(usize) -> Option<usize>; 4] = [&none, &east, &none, &none];
        let result = fill_cells(3, &wiring);
        assert!(matches!(result, Err(MazeError::InvalidTopology { .. })));
    }

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::West.opposite(), Direction::East);
        assert_eq!(Direction::from_index(-1), Direction::West);
    }
}
