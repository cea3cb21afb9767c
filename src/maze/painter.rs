use std::collections::HashMap;

use super::{Direction, Mark, Maze};

/// Draws the maze with box-drawing characters.
///
/// Each cell shows the glyph registered for its mark in `markers`, falling back to
/// `way` for unmarked or pruned cells and to [`Mark::glyph`] otherwise. The
/// entrance is labelled `S` on the top border and the exit `E` on the bottom one.
/// Open walls between two walked cells are drawn with the walked glyph so the
/// solved path reads as one line.
pub fn to_text(maze: &Maze, way: char, markers: &HashMap<Mark, char>) -> String {
    draw(maze, way, markers, false)
}

/// Same layout as [`to_text`], with every cell glyph and path joint coloured
/// after its mark for terminal output.
pub fn to_colored_text(maze: &Maze, way: char, markers: &HashMap<Mark, char>) -> String {
    draw(maze, way, markers, true)
}

fn draw(maze: &Maze, way: char, markers: &HashMap<Mark, char>, colored: bool) -> String {
    let glyph = |mark: Mark| -> char {
        markers.get(&mark).copied().unwrap_or(match mark {
            Mark::Unknown | Mark::DeadEnd => way,
            other => other.glyph(),
        })
    };
    let put = |out: &mut String, mark: Mark, glyph: char| {
        if colored {
            out.push_str(&mark.painted(glyph).to_string());
        } else {
            out.push(glyph);
        }
    };
    let walked = glyph(Mark::Walked);
    // Joint drawn in an open wall between `cell` and its neighbour in `direction`
    let joint = |out: &mut String, cell: usize, direction: Direction| {
        let through_path = maze.mark(cell).is_walked()
            && maze[cell]
                .sibling(direction.into())
                .is_some_and(|s| maze.mark(s).is_walked());
        if through_path {
            put(out, Mark::Walked, walked);
        } else {
            out.push(way);
        }
    };

    let width = maze.width();
    let height = maze.height();
    let mut out = String::from("┌");
    (0..width).for_each(|x| {
        out.push_str(if x == maze.entrance() { "─S─" } else { "───" });
        out.push(if x + 1 < width { '┬' } else { '┐' });
    });

    for y in 0..height {
        let last_row = y + 1 == height;
        let mut line = String::from(if last_row { "└" } else { "├" });
        out.push_str("\n│");
        for x in 0..width {
            let cell = y * width + x;
            let mark = maze.mark(cell);
            out.push(' ');
            put(&mut out, mark, glyph(mark));
            out.push(' ');
            if maze.has_wall(cell, Direction::East.into()) {
                out.push('│');
            } else {
                joint(&mut out, cell, Direction::East);
            }

            if maze.is_exit(cell) && last_row {
                line.push_str("─E─");
            } else if maze.has_wall(cell, Direction::South.into()) {
                line.push_str("───");
            } else {
                line.push(' ');
                joint(&mut line, cell, Direction::South);
                line.push(' ');
            }
            line.push(match (x + 1 < width, last_row) {
                (true, false) => '┼',
                (true, true) => '┴',
                (false, false) => '┤',
                (false, true) => '┘',
            });
        }
        out.push('\n');
        out.push_str(&line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_cell_maze() {
        let mut maze = Maze::new(2, 1).unwrap();
        maze.remove_wall(0, Direction::East.into()).unwrap();
        let text = to_text(&maze, Mark::WAY, &HashMap::new());
        assert_eq!(text, "┌─S─┬───┐\n│ · · · │\n└───┴─E─┘");
    }

    #[test]
    fn test_walked_path_is_joined() {
        let mut maze = Maze::new(1, 2).unwrap();
        maze.remove_wall(0, Direction::South.into()).unwrap();
        maze.set_mark(0, Mark::Walked);
        maze.set_mark(1, Mark::Walked);
        let markers = HashMap::from([(Mark::Walked, '#')]);
        let text = to_text(&maze, ' ', &markers);
        assert_eq!(text, "┌─S─┐\n│ # │\n├ # ┤\n│ # │\n└─E─┘");
    }

    #[test]
    fn test_colored_text_keeps_layout() {
        let mut maze = Maze::new(1, 2).unwrap();
        maze.remove_wall(0, Direction::South.into()).unwrap();
        maze.set_mark(0, Mark::Walked);
        maze.set_mark(1, Mark::Walked);
        let markers = HashMap::from([(Mark::Walked, '#')]);
        let colored = to_colored_text(&maze, ' ', &markers);
        // Colour codes only wrap the glyphs
        assert_eq!(colored.lines().count(), 5);
        assert_eq!(colored.matches('#').count(), 3);
        assert!(colored.starts_with("┌─S─┐\n│ "));
        assert!(colored.ends_with("└─E─┘"));
    }
}
