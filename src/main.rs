use docopt::Docopt;
use log::info;
use serde_derive::Deserialize;
use maze_forge::{
    background::{MazeJob, MazeModel},
    export,
    units::{Height, Width},
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

const USAGE: &str = "Maze Forge

Usage:
    maze_forge_driver -h | --help
    maze_forge_driver [(--grid-size=<n>|[--grid-width=<w> --grid-height=<h>])] [--seed=<s>] [--text-out=<path>] [--obj-out=<path>] [--json-out=<path>] [--save-edges=<path>] [--background] [--quiet]

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid size is n * n.
    --grid-width=<w>       The grid width in a w*h grid [default: 15].
    --grid-height=<h>      The grid height in a w*h grid [default: 15].
    --seed=<s>             Seed the random source for a reproducible maze.
    --text-out=<path>      Output file path for a textual rendering of the maze.
    --obj-out=<path>       Output file path for the wall mesh in Wavefront OBJ format.
    --json-out=<path>      Output file path for the maze and its mesh as JSON.
    --save-edges=<path>    Serialize the maze passages to a text file: each line is a pair of numbers. Line 1: n(#cells) m(#passages). Line 2+ passage between cells. Uses 1-based row-major cell indices.
    --background           Generate and mesh on a worker thread, waiting for the finished result.
    --quiet                Do not print the maze to stdout.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<usize>,
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_seed: Option<u64>,
    flag_text_out: String,
    flag_obj_out: String,
    flag_json_out: String,
    flag_save_edges: String,
    flag_background: bool,
    flag_quiet: bool,
}

// The driver's own errors wrap the library's and add file output failures.
mod errors {
    #![allow(deprecated)]
    use error_chain::*;
    error_chain! {

        links {
            Maze(::maze_forge::errors::Error, ::maze_forge::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (width, height) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_grid_width, args.flag_grid_height)
    };

    let model = if args.flag_background {
        MazeJob::spawn(Width(width), Height(height), args.flag_seed)?.wait()?
    } else {
        MazeModel::build(Width(width), Height(height), args.flag_seed)?
    };
    info!("maze {}x{}: {} wall cells, mesh of {} vertices and {} triangles",
          width,
          height,
          model.maze.occupied_count(),
          model.mesh.vertex_count(),
          model.mesh.triangle_count());

    if !args.flag_quiet {
        println!("{}", model.maze);
    }

    if !args.flag_text_out.is_empty() {
        write_to_file(&args.flag_text_out,
                      |out| write!(out, "{}", model.maze).map_err(Error::from))
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if !args.flag_obj_out.is_empty() {
        write_to_file(&args.flag_obj_out,
                      |out| export::write_obj(&model.mesh, out).map_err(Error::from))
            .chain_err(|| format!("Failed to write mesh to OBJ file {}", args.flag_obj_out))?;
    }

    if !args.flag_json_out.is_empty() {
        write_to_file(&args.flag_json_out,
                      |out| export::write_json(&model, out).map_err(Error::from))
            .chain_err(|| format!("Failed to write maze to JSON file {}", args.flag_json_out))?;
    }

    if !args.flag_save_edges.is_empty() {
        write_to_file(&args.flag_save_edges,
                      |out| export::write_edge_list(&model.maze, out).map_err(Error::from))
            .chain_err(|| format!("Failed to write maze graph to text file {}", args.flag_save_edges))?;
    }

    Ok(())
}

fn write_to_file<F>(file_path: &str, write_contents: F) -> Result<()>
    where F: FnOnce(&mut BufWriter<File>) -> Result<()>
{
    let f = File::create(Path::new(file_path))?;
    let mut out = BufWriter::new(f);
    write_contents(&mut out)?;
    out.flush()?;
    Ok(())
}
