//! Writers handing the maze and its mesh to other tools.

use std::io::Write;

use crate::background::MazeModel;
use crate::errors::*;
use crate::maze::Maze;
use crate::mesh::MeshBuffer;

/// Write a mesh as Wavefront OBJ: `v x y z` per vertex, `f a b c` per triangle (1-based).
pub fn write_obj<W: Write>(mesh: &MeshBuffer, out: &mut W) -> Result<()> {
    writeln!(out, "# {} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count())?;
    for v in mesh.vertices() {
        writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for t in mesh.triangles() {
        writeln!(out, "f {} {} {}", t[0] + 1, t[1] + 1, t[2] + 1)?;
    }
    Ok(())
}

/// Write the maze and its mesh as one JSON document.
pub fn write_json<W: Write>(model: &MazeModel, out: &mut W) -> Result<()> {
    serde_json::to_writer(&mut *out, model)?;
    writeln!(out)?;
    Ok(())
}

/// Serialize the maze's passage graph as a text edge list.
///
/// Line 1: `n m`, the number of grid cells and of passages. Every further line is a passage
/// between two 1-based row-major cell indices.
pub fn write_edge_list<W: Write>(maze: &Maze, out: &mut W) -> Result<()> {
    let graph = maze.passage_graph();
    let dimensions = maze.dimensions();

    writeln!(out, "{} {}", maze.size().0, graph.edge_count())?;
    for edge in graph.raw_edges() {
        let src = dimensions.grid_coordinate_to_index(graph[edge.source()])
            .ok_or("passage graph node is off the grid")?;
        let dst = dimensions.grid_coordinate_to_index(graph[edge.target()])
            .ok_or("passage graph node is off the grid")?;
        writeln!(out, "{} {}", src + 1, dst + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {

    use serde_json::Value;

    use super::*;
    use crate::generators::generate_seeded;
    use crate::meshing::build_maze_mesh;
    use crate::units::{Height, Width};

    fn as_text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).expect("exports are utf8")
    }

    #[test]
    fn obj_lists_vertices_then_faces() {
        let maze = generate_seeded(Width(3), Height(3), 5).unwrap();
        let mesh = build_maze_mesh(&maze);
        let mut out = Vec::new();
        write_obj(&mesh, &mut out).unwrap();
        let text = as_text(out);

        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), mesh.vertex_count());
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), mesh.triangle_count());
        for face_line in text.lines().filter(|l| l.starts_with("f ")) {
            for index in face_line.split_whitespace().skip(1) {
                let i: usize = index.parse().unwrap();
                assert!(i >= 1 && i <= mesh.vertex_count());
            }
        }
    }

    #[test]
    fn edge_list_of_a_corridor() {
        let maze = generate_seeded(Width(3), Height(1), 0).unwrap();
        let mut out = Vec::new();
        write_edge_list(&maze, &mut out).unwrap();
        assert_eq!(as_text(out), "3 2\n1 2\n2 3\n");
    }

    #[test]
    fn edge_list_counts_tree_edges() {
        let maze = generate_seeded(Width(9), Height(9), 3).unwrap();
        let mut out = Vec::new();
        write_edge_list(&maze, &mut out).unwrap();
        let text = as_text(out);
        let header = text.lines().next().unwrap();
        assert_eq!(header, format!("81 {}", maze.open_count() - 1));
        assert_eq!(text.lines().count(), maze.open_count());
    }

    #[test]
    fn json_holds_maze_and_mesh() {
        let model = MazeModel::build(Width(5), Height(5), Some(12)).unwrap();
        let mut out = Vec::new();
        write_json(&model, &mut out).unwrap();
        let doc: Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(doc["maze"]["dimensions"]["width"], 5);
        assert_eq!(doc["maze"]["cells"].as_array().unwrap().len(), 25);
        assert_eq!(doc["maze"]["cells"][0]["occupied"], false);
        assert_eq!(doc["mesh"]["triangles"].as_array().unwrap().len(),
                   model.mesh.triangle_count());
    }
}
