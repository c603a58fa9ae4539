use std::fmt;

use crate::maze::Maze;

const WALL: &str = "██";
const PASSAGE: &str = "  ";

/// Text view of a maze: two glyphs per cell so the output is roughly square in a terminal.
impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut output = String::with_capacity(self.size().0 * WALL.len() + self.height().0);

        for row in self.iter_row() {
            for cell in row {
                output.push_str(if cell.occupied { WALL } else { PASSAGE });
            }
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}
