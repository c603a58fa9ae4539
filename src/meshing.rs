use log::debug;

use crate::cells::Cartesian2DCoordinate;
use crate::cube::cube_faces;
use crate::geometry::Vec3;
use crate::grid_dimensions::MazeDimensions;
use crate::grid_iterators::CellIter;
use crate::maze::Maze;
use crate::mesh::{MeshBuffer, MeshBuilder};
use crate::occupancy::Occupancy;

/// World space centre of a cell's block.
///
/// One unit per cell, the grid centred on the origin: cell `(x, y)` sits at
/// `(x - width / 2, 0, y - height / 2)`. The maze's `y` axis runs along world `z`.
pub fn cell_center(dimensions: &MazeDimensions, coord: Cartesian2DCoordinate) -> Vec3 {
    let half_width = dimensions.width().0 as f32 / 2.0;
    let half_height = dimensions.height().0 as f32 / 2.0;
    Vec3::new(coord.x as f32 - half_width, 0.0, coord.y as f32 - half_height)
}

/// Mesh every solid cell of `grid` as a unit block, leaving out faces shared by two solid cells.
pub fn build_mesh<O: Occupancy + ?Sized>(grid: &O) -> MeshBuffer {
    let dimensions = grid.dimensions();
    let mut builder = MeshBuilder::with_cube_capacity(dimensions.size().0 / 2);
    let mut culled_faces_total = 0usize;

    for coord in CellIter::new(dimensions) {
        let (x, y) = (i64::from(coord.x), i64::from(coord.y));
        if !grid.is_occupied(x, y) {
            continue;
        }

        let culled = grid.culled_faces(x, y);
        culled_faces_total += 6 - culled.visible_count();
        builder.add_cube_geometry(&cube_faces(cell_center(&dimensions, coord), culled));
    }

    debug!("meshing {}x{} grid: {} hidden faces culled",
           dimensions.width().0,
           dimensions.height().0,
           culled_faces_total);

    builder.finalize()
}

/// Mesh the walls of a maze.
pub fn build_maze_mesh(maze: &Maze) -> MeshBuffer {
    build_mesh(maze)
}

#[cfg(test)]
mod tests {

    use quickcheck::quickcheck;

    use super::*;
    use crate::generators::generate_seeded;
    use crate::occupancy::OccupancyGrid;
    use crate::units::{Height, Width};

    fn dims(w: usize, h: usize) -> MazeDimensions {
        MazeDimensions::new(Width(w), Height(h)).unwrap()
    }

    #[test]
    fn cells_are_centred_on_the_origin() {
        let d = dims(5, 4);
        assert_eq!(cell_center(&d, Cartesian2DCoordinate::new(0, 0)), Vec3::new(-2.5, 0.0, -2.0));
        assert_eq!(cell_center(&d, Cartesian2DCoordinate::new(4, 3)), Vec3::new(1.5, 0.0, 1.0));
    }

    #[test]
    fn single_occupied_cell_emits_all_faces() {
        let mut grid = OccupancyGrid::new(dims(3, 3));
        grid.set(Cartesian2DCoordinate::new(1, 1), true);
        let mesh = build_mesh(&grid);
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.vertex_count(), 8);
    }

    #[test]
    fn two_cells_side_by_side_cull_the_shared_faces() {
        let grid = OccupancyGrid::from_fn(dims(2, 1), |_| true);
        let mesh = build_mesh(&grid);
        // 6 outer lateral faces, 2 tops, 2 bottoms
        assert_eq!(mesh.triangle_count(), 10 * 2);
        assert_eq!(mesh.vertex_count(), 12);

        // Block centres are x = -1 and x = 0: no triangle may lie in the x = -0.5 plane between them.
        let v = mesh.vertices();
        for t in mesh.triangles() {
            let all_on_shared_plane = t.iter().all(|&i| v[i as usize].x == -0.5);
            assert!(!all_on_shared_plane, "interior face {:?} was emitted", t);
        }
    }

    #[test]
    fn empty_grid_builds_an_empty_mesh() {
        let mesh = build_mesh(&OccupancyGrid::new(dims(4, 4)));
        assert_eq!(mesh, MeshBuffer::default());
    }

    #[test]
    fn indices_are_valid() {
        let maze = generate_seeded(Width(15), Height(15), 4).unwrap();
        let mesh = build_maze_mesh(&maze);
        let vertex_count = mesh.vertex_count() as u32;
        assert!(mesh.triangles().iter().all(|t| t.iter().all(|&i| i < vertex_count)));
    }

    #[test]
    fn culling_beats_the_naive_triangle_count() {
        fn p(seed: u64) -> bool {
            let maze = generate_seeded(Width(5), Height(5), seed).unwrap();
            let naive_triangles = 6 * 2 * maze.occupied_count();
            maze.occupied_count() > 0 && build_maze_mesh(&maze).triangle_count() < naive_triangles
        }
        quickcheck(p as fn(u64) -> bool)
    }

    #[test]
    fn maze_and_bit_grid_build_the_same_mesh() {
        let maze = generate_seeded(Width(11), Height(9), 17).unwrap();
        assert_eq!(build_maze_mesh(&maze), build_mesh(&OccupancyGrid::from_maze(&maze)));
    }

    #[test]
    fn triangle_count_matches_exposed_faces() {
        let maze = generate_seeded(Width(13), Height(13), 23).unwrap();
        let mut exposed_faces = 0;
        for cell in maze.iter().filter(|c| c.occupied) {
            exposed_faces += maze.culled_faces(i64::from(cell.x), i64::from(cell.y)).visible_count();
        }
        assert_eq!(build_maze_mesh(&maze).triangle_count(), exposed_faces * 2);
    }
}
