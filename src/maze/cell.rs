use crossterm::style::{Color, Stylize};

use std::fmt;

use crate::error::{MazeError, Result};

/// Position of a cell inside the maze that owns it (row-major for grids).
pub type CellId = usize;

/// Which end of the maze an off-path cell is closer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Start,
    End,
}

/// Traversal and analysis state of a cell.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// Not reached by any traversal yet.
    #[default]
    Unknown,
    /// Reached by the solver; after pruning, a cell on the entrance-exit path.
    Walked,
    /// Pruned by the solver.
    DeadEnd,
    /// Off-path cell classified by its distance to entrance and exit.
    Side(Side),
    /// Cell with a relaxed height level.
    Leveled { on_path: bool, height: u8 },
    /// Off-path cell only reachable through the exit.
    BeyondExit,
}

impl Mark {
    /// Glyph for open floor without a more specific marker.
    pub const WAY: char = '·';
    /// The width of each glyph when rendered, in character widths.
    pub const CELL_WIDTH: usize = 1;

    /// Default display glyph of this mark.
    pub fn glyph(&self) -> char {
        match self {
            Mark::Unknown | Mark::DeadEnd => Mark::WAY,
            Mark::Walked => '•',
            Mark::Side(Side::Start) => '+',
            Mark::Side(Side::End) => '-',
            Mark::Leveled { on_path, height } => {
                let base = if *on_path { b'A' } else { b'a' };
                char::from(base + (*height).min(25))
            }
            Mark::BeyondExit => '*',
        }
    }

    pub fn is_walked(&self) -> bool {
        matches!(self, Mark::Walked)
    }
}

impl Mark {
    fn color(&self) -> Color {
        match self {
            Mark::Unknown => Color::Reset,
            Mark::Walked => Color::Yellow,
            Mark::DeadEnd => Color::DarkGrey,
            Mark::Side(Side::Start) => Color::Green,
            Mark::Side(Side::End) => Color::Red,
            Mark::Leveled { on_path: true, .. } => Color::Yellow,
            Mark::Leveled { on_path: false, .. } => Color::Blue,
            Mark::BeyondExit => Color::Magenta,
        }
    }

    /// `glyph` drawn in the terminal colour of this mark.
    pub fn painted(self, glyph: char) -> Painted {
        Painted { mark: self, glyph }
    }
}

/// A glyph coloured after the mark it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Painted {
    mark: Mark,
    glyph: char,
}

impl fmt::Display for Painted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = self.glyph.to_string().with(self.mark.color());

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Mark::CELL_WIDTH,
                "Each mark must occupy exactly one character width."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.painted(self.glyph()))
    }
}

/// A node of the maze graph with a fixed number of walls.
///
/// `walls[i] == true` means there is no passage in direction `i`. Neighbours are
/// stored by id; the [`Maze`](crate::maze::Maze) owns every cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    id: CellId,
    walls: Box<[bool]>,
    siblings: Box<[Option<CellId>]>,
    mark: Mark,
}

impl Cell {
    /// Creates a cell with all walls closed and no neighbours.
    pub(crate) fn new(id: CellId, degree: usize) -> Self {
        Cell {
            id,
            walls: vec![true; degree].into_boxed_slice(),
            siblings: vec![None; degree].into_boxed_slice(),
            mark: Mark::Unknown,
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    /// Number of walls (and potential neighbours) of this cell.
    pub fn degree(&self) -> usize {
        self.walls.len()
    }

    /// Maps any direction, including negative or overflowing "turn" arithmetic,
    /// onto `0..degree`.
    pub fn norm(&self, direction: isize) -> usize {
        direction.rem_euclid(self.degree() as isize) as usize
    }

    /// Direction pointing back at this cell from its neighbour in `direction`.
    pub fn reciprocal(&self, direction: usize) -> usize {
        (direction + self.degree() / 2) % self.degree()
    }

    pub fn has_wall(&self, direction: isize) -> bool {
        self.walls[self.norm(direction)]
    }

    pub fn sibling(&self, direction: isize) -> Option<CellId> {
        self.siblings[self.norm(direction)]
    }

    pub fn siblings(&self) -> &[Option<CellId>] {
        &self.siblings
    }

    /// Direction in which `other` is a neighbour of this cell.
    pub fn direction_of(&self, other: CellId) -> Option<usize> {
        self.siblings.iter().position(|&s| s == Some(other))
    }

    /// Neighbours reachable through an open wall, with their direction.
    pub fn open_siblings(&self) -> impl Iterator<Item = (usize, CellId)> + '_ {
        self.siblings
            .iter()
            .zip(self.walls.iter())
            .enumerate()
            .filter_map(|(dir, (sibling, &wall))| match sibling {
                Some(id) if !wall => Some((dir, *id)),
                _ => None,
            })
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }

    pub fn set_mark(&mut self, mark: Mark) {
        self.mark = mark;
    }

    pub(crate) fn set_wall(&mut self, direction: usize, wall: bool) {
        self.walls[direction] = wall;
    }

    pub(crate) fn set_siblings(&mut self, siblings: Vec<Option<CellId>>) -> Result<()> {
        if siblings.len() != self.walls.len() {
            return Err(MazeError::InvalidTopology {
                cell: self.id,
                message: format!(
                    "sibling count {} must match wall count {}",
                    siblings.len(),
                    self.walls.len()
                ),
            });
        }
        self.siblings = siblings.into_boxed_slice();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_closed() {
        let cell = Cell::new(3, 4);
        assert_eq!(cell.id(), 3);
        assert!((0..4).all(|d| cell.has_wall(d)));
        assert_eq!(cell.mark(), Mark::Unknown);
    }

    #[test]
    fn test_direction_normalization() {
        let mut cell = Cell::new(0, 4);
        cell.set_wall(3, false);
        // -1 turns left from north, 7 overflows to the same wall
        assert!(!cell.has_wall(-1));
        assert!(!cell.has_wall(7));
        assert!(cell.has_wall(-2));
        assert_eq!(cell.reciprocal(1), 3);
        assert_eq!(cell.reciprocal(2), 0);
    }

    #[test]
    fn test_sibling_count_mismatch() {
        let mut cell = Cell::new(0, 4);
        assert!(cell.set_siblings(vec![None, Some(1)]).is_err());
        assert!(cell.set_siblings(vec![None, Some(1), None, None]).is_ok());
        assert_eq!(cell.direction_of(1), Some(1));
        assert_eq!(cell.direction_of(5), None);
    }

    #[test]
    fn test_leveled_glyphs() {
        assert_eq!(
            Mark::Leveled {
                on_path: true,
                height: 2
            }
            .glyph(),
            'C'
        );
        assert_eq!(
            Mark::Leveled {
                on_path: false,
                height: 0
            }
            .glyph(),
            'a'
        );
        assert_eq!(Mark::BeyondExit.glyph(), '*');
    }

    #[test]
    fn test_display_keeps_glyph() {
        // Colour codes wrap the glyph, the glyph itself stays one column wide
        assert!(Mark::Walked.to_string().contains('•'));
        assert!(Mark::Side(Side::End).to_string().contains('-'));
    }
}
