use std::fmt;
use std::str::FromStr;

use super::error::BoardError;
use super::{Board, Grid, BOARD_SIZE};

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let width = self.highest_tile().max(1).to_string().len();
        let separator = format!("+{}", format!("{}+", "-".repeat(width + 2)).repeat(BOARD_SIZE));

        writeln!(f, "{}", separator)?;
        for row in self.grid().iter() {
            write!(f, "|")?;
            for &tile in row.iter() {
                if tile == 0 {
                    write!(f, " {:>width$} |", ".", width = width)?;
                } else {
                    write!(f, " {:>width$} |", tile, width = width)?;
                }
            }
            writeln!(f)?;
            writeln!(f, "{}", separator)?;
        }
        write!(f, "score: {}", self.points())
    }
}

/// Parses rows separated by `/`, cells separated by `,`, e.g.
/// `2,0,0,0/0,4,0,0/0,0,0,0/0,0,0,2`. Blank cells and `.` are empty.
impl FromStr for Board {
    type Err = BoardError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = input.trim().split('/').collect();
        if rows.len() != BOARD_SIZE {
            return Err(BoardError::ParseError {
                msg: format!("expected {} rows, got {}", BOARD_SIZE, rows.len()),
            });
        }

        let mut grid: Grid = [[0; BOARD_SIZE]; BOARD_SIZE];
        for (row_index, row) in rows.iter().enumerate() {
            let cells: Vec<&str> = row.split(',').map(str::trim).collect();
            if cells.len() != BOARD_SIZE {
                return Err(BoardError::ParseError {
                    msg: format!(
                        "row {} has {} cells, expected {}",
                        row_index,
                        cells.len(),
                        BOARD_SIZE
                    ),
                });
            }

            for (col_index, cell) in cells.iter().enumerate() {
                grid[row_index][col_index] = match *cell {
                    "" | "." => 0,
                    value => value.parse().map_err(|_| BoardError::ParseError {
                        msg: format!("`{}` is not a tile value", value),
                    })?,
                };
            }
        }

        Board::from_grid(grid)
    }
}
