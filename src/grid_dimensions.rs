use serde_derive::Serialize;

use crate::cells::Cartesian2DCoordinate;
use crate::errors::*;
use crate::units::{CellsCount, ColumnIndex, Height, RowIndex, Width};


/// The validated size of a rectangular maze grid.
///
/// Cells are stored row-major: index `y * width + x`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct MazeDimensions {
    width: Width,
    height: Height,
}

impl MazeDimensions {
    /// Fails with `InvalidDimension` for a zero width or height, or a cell count that does not fit
    /// in memory addressing. Nothing is allocated here, so callers can validate before building grids.
    pub fn new(width: Width, height: Height) -> Result<MazeDimensions> {
        let Width(w) = width;
        let Height(h) = height;

        let representable = w <= u32::MAX as usize && h <= u32::MAX as usize &&
                            w.checked_mul(h).is_some();
        if w == 0 || h == 0 || !representable {
            bail!(ErrorKind::InvalidDimension(w, h));
        }

        Ok(MazeDimensions { width, height })
    }

    #[inline(always)]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline(always)]
    pub fn size(&self) -> CellsCount {
        CellsCount(self.width.0 * self.height.0)
    }

    /// Number of even-coordinate cells, the nodes of the carving lattice.
    pub fn nodes_count(&self) -> CellsCount {
        CellsCount(((self.width.0 + 1) / 2) * ((self.height.0 + 1) / 2))
    }

    /// Is the signed coordinate inside the grid?
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width.0 as u64 && (y as u64) < self.height.0 as u64
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        self.contains(i64::from(coord.x), i64::from(coord.y))
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...size.
    /// Returns None if the grid coordinate is invalid.
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width.0 + coord.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn coordinate_from_row_major_index(&self, index: usize) -> Cartesian2DCoordinate {
        let x = index % self.width.0;
        let y = index / self.width.0;
        self.coordinate_from_row_column_indices(ColumnIndex(x), RowIndex(y))
    }

    #[inline]
    pub fn coordinate_from_row_column_indices(&self,
                                              col_index: ColumnIndex,
                                              row_index: RowIndex)
                                              -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(col_index.0 as u32, row_index.0 as u32)
    }
}
