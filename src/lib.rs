//! **maze-forge** generates perfect mazes and turns their walls into render-ready block meshes.
//!
//! A `Maze` comes from `generators`; `meshing` turns any `Occupancy` grid into a `MeshBuffer`
//! holding only the cube faces that border open space, with shared corners welded.

#[macro_use]
extern crate error_chain;

pub mod background;
pub mod cells;
pub mod cube;
pub mod errors;
pub mod export;
pub mod generators;
pub mod geometry;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_iterators;
pub mod maze;
pub mod mesh;
pub mod meshing;
pub mod occupancy;
pub mod units;
mod utils;

pub use crate::background::{MazeJob, MazeModel};
pub use crate::cells::{Cartesian2DCoordinate, MazeCell};
pub use crate::cube::{cube_faces, CulledFaces};
pub use crate::geometry::{Triangle, Vec3};
pub use crate::maze::Maze;
pub use crate::mesh::{MeshBuffer, MeshBuilder};
pub use crate::occupancy::{Occupancy, OccupancyGrid};
