use serde_derive::Serialize;
use smallvec::SmallVec;

use crate::grid_dimensions::MazeDimensions;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd, Serialize)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    /// Both coordinates even: a graph node of the carving lattice.
    /// Every other cell is a potential passage between two nodes.
    #[inline]
    pub fn is_node(&self) -> bool {
        self.x % 2 == 0 && self.y % 2 == 0
    }

    /// Step `distance` cells in `dir`.
    /// Returns None if the result would be negative or outside `dimensions`.
    pub fn offset(&self,
                  dir: CompassPrimary,
                  distance: u32,
                  dimensions: &MazeDimensions)
                  -> Option<Cartesian2DCoordinate> {
        let (dx, dy) = dir.delta();
        let x = i64::from(self.x) + i64::from(dx) * i64::from(distance);
        let y = i64::from(self.y) + i64::from(dy) * i64::from(distance);
        if dimensions.contains(x, y) {
            Some(Cartesian2DCoordinate::new(x as u32, y as u32))
        } else {
            None
        }
    }

    /// The cell half way between two coordinates.
    #[inline]
    pub fn midpoint(&self, other: Cartesian2DCoordinate) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new((self.x + other.x) / 2, (self.y + other.y) / 2)
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

/// The four lateral directions on the maze plane. North is towards `y == 0`.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::East,
                                          CompassPrimary::West];

    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            CompassPrimary::North => (0, -1),
            CompassPrimary::South => (0, 1),
            CompassPrimary::East => (1, 0),
            CompassPrimary::West => (-1, 0),
        }
    }
}

/// One square of the maze. `occupied` cells are solid wall blocks, open cells are passable.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Serialize)]
pub struct MazeCell {
    pub x: u32,
    pub y: u32,
    pub occupied: bool,
}

impl MazeCell {
    pub fn solid(coord: Cartesian2DCoordinate) -> MazeCell {
        MazeCell {
            x: coord.x,
            y: coord.y,
            occupied: true,
        }
    }

    #[inline]
    pub fn coordinate(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(self.x, self.y)
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        !self.occupied
    }
}
