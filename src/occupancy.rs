use bit_set::BitSet;

use crate::cells::Cartesian2DCoordinate;
use crate::cube::CulledFaces;
use crate::grid_dimensions::MazeDimensions;
use crate::grid_iterators::CellIter;
use crate::maze::Maze;

/// A 2D field of solid and open cells, the only input the mesh builder needs.
///
/// The maze's `y` axis becomes the world `z` axis when meshed; cells are one block high.
pub trait Occupancy {
    fn dimensions(&self) -> MazeDimensions;

    /// Is the cell at `(x, y)` solid?
    ///
    /// A coordinate outside the grid is never occupied: a cell on the boundary has nothing to hide
    /// its outward faces behind.
    fn is_occupied(&self, x: i64, y: i64) -> bool;

    /// The faces of the cell at `(x, y)` that touch another solid cell.
    ///
    /// Only the four lateral faces can be culled, top and bottom always face open space.
    fn culled_faces(&self, x: i64, y: i64) -> CulledFaces {
        CulledFaces {
            px: self.is_occupied(x + 1, y),
            nx: self.is_occupied(x - 1, y),
            py: false,
            ny: false,
            pz: self.is_occupied(x, y + 1),
            nz: self.is_occupied(x, y - 1),
        }
    }
}

impl Occupancy for Maze {
    #[inline]
    fn dimensions(&self) -> MazeDimensions {
        Maze::dimensions(self)
    }

    fn is_occupied(&self, x: i64, y: i64) -> bool {
        self.dimensions().contains(x, y) &&
        self.is_cell_occupied(Cartesian2DCoordinate::new(x as u32, y as u32))
    }
}

/// Compact occupancy grid, one bit per cell in row-major order. A set bit is a solid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    occupied: BitSet,
    dimensions: MazeDimensions,
}

impl OccupancyGrid {
    /// An entirely open grid.
    pub fn new(dimensions: MazeDimensions) -> OccupancyGrid {
        OccupancyGrid {
            occupied: BitSet::with_capacity(dimensions.size().0),
            dimensions,
        }
    }

    pub fn from_fn<F>(dimensions: MazeDimensions, mut is_solid: F) -> OccupancyGrid
        where F: FnMut(Cartesian2DCoordinate) -> bool
    {
        let mut grid = OccupancyGrid::new(dimensions);
        for (index, coord) in CellIter::new(dimensions).enumerate() {
            if is_solid(coord) {
                grid.occupied.insert(index);
            }
        }
        grid
    }

    pub fn from_maze(maze: &Maze) -> OccupancyGrid {
        OccupancyGrid::from_fn(maze.dimensions(), |coord| maze.is_cell_occupied(coord))
    }

    /// Mark a cell solid or open. Returns false, changing nothing, if the coordinate is off the grid.
    pub fn set(&mut self, coord: Cartesian2DCoordinate, occupied: bool) -> bool {
        match self.dimensions.grid_coordinate_to_index(coord) {
            Some(index) => {
                if occupied {
                    self.occupied.insert(index);
                } else {
                    self.occupied.remove(index);
                }
                true
            }
            None => false,
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.len()
    }
}

impl Occupancy for OccupancyGrid {
    #[inline]
    fn dimensions(&self) -> MazeDimensions {
        self.dimensions
    }

    fn is_occupied(&self, x: i64, y: i64) -> bool {
        if self.dimensions.contains(x, y) {
            let bit_index = y as usize * self.dimensions.width().0 + x as usize;
            self.occupied.contains(bit_index)
        } else {
            false
        }
    }
}

impl<'a, O: Occupancy + ?Sized> Occupancy for &'a O {
    #[inline]
    fn dimensions(&self) -> MazeDimensions {
        (**self).dimensions()
    }

    #[inline]
    fn is_occupied(&self, x: i64, y: i64) -> bool {
        (**self).is_occupied(x, y)
    }
}
