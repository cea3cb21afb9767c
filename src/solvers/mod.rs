use std::collections::VecDeque;

use crate::maze::{CellId, Mark, Maze};

/// Marks the route from entrance to exit and returns its length in cells.
///
/// Every cell reachable from the entrance is first walked breadth-first, which
/// also records the BFS tree. Leaves of that tree other than the entrance and the
/// exit are then pruned as dead ends until only the route between them remains
/// `Walked`. Unreachable cells stay `Unknown`.
///
/// On a perfect maze the BFS tree is the maze itself, so the route is the unique
/// path. On a graph with cycles the route is a shortest path.
pub fn solve(maze: &mut Maze) -> usize {
    let entrance = maze.entrance();
    let exit = maze.exit();
    (0..maze.len()).for_each(|cell| maze.set_mark(cell, Mark::Unknown));

    // Walk the whole maze, keeping the BFS tree
    let mut parent: Vec<Option<CellId>> = vec![None; maze.len()];
    // Walked tree neighbours of each cell
    let mut degree = vec![0usize; maze.len()];
    let mut queue = VecDeque::from([entrance]);
    maze.set_mark(entrance, Mark::Walked);
    while let Some(current) = queue.pop_front() {
        let unvisited = maze
            .open_neighbors(current)
            .filter(|&n| maze.mark(n) == Mark::Unknown)
            .collect::<Vec<_>>();
        for next in unvisited {
            maze.set_mark(next, Mark::Walked);
            parent[next] = Some(current);
            degree[current] += 1;
            degree[next] += 1;
            queue.push_back(next);
        }
    }

    if !maze.mark(exit).is_walked() {
        tracing::warn!(
            "[solver] exit {:?} is not reachable from entrance {:?}",
            maze.coord(exit),
            maze.coord(entrance)
        );
    }

    // Remove the detours, leaf by leaf
    let mut deadends = (0..maze.len())
        .filter(|&cell| degree[cell] == 1)
        .collect::<Vec<_>>();
    let mut pruned = 0;
    while let Some(current) = deadends.pop() {
        if current == entrance
            || current == exit
            || !maze.mark(current).is_walked()
            || degree[current] != 1
        {
            continue;
        }
        maze.set_mark(current, Mark::DeadEnd);
        degree[current] = 0;
        pruned += 1;

        // The one walked tree neighbour left is either the parent or a child
        let walked = parent[current]
            .filter(|&p| maze.mark(p).is_walked())
            .or_else(|| {
                maze.open_neighbors(current)
                    .find(|&n| parent[n] == Some(current) && maze.mark(n).is_walked())
            });
        if let Some(walked) = walked {
            degree[walked] -= 1;
            deadends.push(walked);
        }
    }

    let length = maze.count_marked(Mark::Walked);
    tracing::debug!(
        "[solver] path of {} cells, {} dead ends pruned",
        length,
        pruned
    );
    length
}
