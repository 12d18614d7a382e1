//! Line mechanics for sliding tiles.

use crate::action::Action;

use super::{Grid, BOARD_SIZE, MAX_TILE};

type Line = [u32; BOARD_SIZE];

/// Compacts a line toward index 0, merging each equal pair once. Pairs of
/// `MAX_TILE` stay unmerged. Returns the new line and the points scored by merges.
pub(super) fn slide_line(line: Line) -> (Line, u32) {
    let mut tiles = line.iter().copied().filter(|&tile| tile != 0).peekable();
    let mut out = [0; BOARD_SIZE];
    let mut gained: u32 = 0;
    let mut write = 0;

    while let Some(tile) = tiles.next() {
        if tile < MAX_TILE && tiles.peek() == Some(&tile) {
            tiles.next();
            out[write] = tile * 2;
            gained = gained.saturating_add(tile * 2);
        } else {
            out[write] = tile;
        }
        write += 1;
    }

    (out, gained)
}

/// Squares of the `index`th line, ordered from the edge `direction` slides toward.
fn line_squares(direction: Action, index: usize) -> [(usize, usize); BOARD_SIZE] {
    let mut squares = [(0, 0); BOARD_SIZE];
    for (offset, square) in squares.iter_mut().enumerate() {
        let far = BOARD_SIZE - 1 - offset;
        *square = match direction {
            Action::Left => (index, offset),
            Action::Right => (index, far),
            Action::Up => (offset, index),
            Action::Down => (far, index),
            Action::Stop => (index, offset),
        };
    }
    squares
}

/// Slides every line of `grid` toward `direction`. Returns the new grid and the
/// points scored.
pub(super) fn slide_grid(grid: &Grid, direction: Action) -> (Grid, u32) {
    if direction.is_stop() {
        return (*grid, 0);
    }

    let mut out = [[0; BOARD_SIZE]; BOARD_SIZE];
    let mut gained: u32 = 0;

    for index in 0..BOARD_SIZE {
        let squares = line_squares(direction, index);
        let mut line = [0; BOARD_SIZE];
        for (tile, &(row, col)) in line.iter_mut().zip(squares.iter()) {
            *tile = grid[row][col];
        }

        let (slid, points) = slide_line(line);
        gained = gained.saturating_add(points);
        for (tile, &(row, col)) in slid.iter().zip(squares.iter()) {
            out[row][col] = *tile;
        }
    }

    (out, gained)
}
