use log::{debug, trace};
use rand::{self, Rng, SeedableRng};
use rand::seq::SliceRandom;
use rand_xorshift::XorShiftRng;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::errors::*;
use crate::grid_dimensions::MazeDimensions;
use crate::maze::Maze;
use crate::units::{Height, Width};

/// Carving steps between two graph nodes: nodes sit on even coordinates.
const NODE_STRIDE: u32 = 2;

/// Generate a perfect maze using the thread local random source.
pub fn generate(width: Width, height: Height) -> Result<Maze> {
    let mut rng = rand::thread_rng();
    recursive_backtracker(width, height, &mut rng)
}

/// Generate a perfect maze from a seeded xorshift generator.
/// The same seed and size always produce the same maze.
pub fn generate_seeded(width: Width, height: Height, seed: u64) -> Result<Maze> {
    let mut rng = XorShiftRng::seed_from_u64(seed);
    recursive_backtracker(width, height, &mut rng)
}

/// Apply the recursive backtracker maze generation algorithm to a fully solid grid.
///
/// Only cells with two even coordinates are graph nodes; the cell between two nodes two steps
/// apart is the passage that links them. Starting at `(0, 0)` the walk opens the current node,
/// visits its four candidate neighbours in a random order and tunnels into any neighbour node that
/// is still solid, opening the passage cell on the way. When every neighbour has been visited it
/// backs up to the previous node.
///
/// A passage is only ever carved into an unvisited node, so the open cells form a spanning tree of
/// the node lattice: a perfect maze.
///
/// The walk keeps its own stack of frames rather than using native recursion, so the depth of the
/// maze is limited only by memory. Each frame shuffles its directions once when it is entered,
/// which consumes randomness in the same order as the recursive form of the algorithm.
///
/// Degenerate grids (a single row or column) produce a straight corridor, or a single open cell.
pub fn recursive_backtracker<R>(width: Width, height: Height, rng: &mut R) -> Result<Maze>
    where R: Rng + ?Sized
{
    let dimensions = MazeDimensions::new(width, height)?;
    let mut maze = Maze::solid(dimensions);

    let start = Cartesian2DCoordinate::new(0, 0);
    maze.set_occupied(start, false);
    let mut stack = vec![CarveFrame::enter(start, rng)];
    let mut carved_passages = 0usize;

    while let Some(frame) = stack.last_mut() {

        let next_node = frame.next_direction().map(|dir| (frame.node, dir));
        match next_node {
            Some((node, dir)) => {
                let neighbour = node.offset(dir, NODE_STRIDE, &dimensions);
                if let Some(neighbour_coord) = neighbour {
                    if maze.is_cell_occupied(neighbour_coord) {
                        let passage = node.midpoint(neighbour_coord);
                        maze.set_occupied(passage, false);
                        maze.set_occupied(neighbour_coord, false);
                        carved_passages += 1;
                        trace!("carved {:?} -> {:?}", node, neighbour_coord);

                        stack.push(CarveFrame::enter(neighbour_coord, rng));
                    }
                }
            }
            None => {
                stack.pop();
            }
        }
    }

    debug!("generated {}x{} maze: {} passages, {} open cells",
           width.0,
           height.0,
           carved_passages,
           maze.open_count());

    Ok(maze)
}

/// One node on the backtracking walk and the directions it has left to try.
#[derive(Debug)]
struct CarveFrame {
    node: Cartesian2DCoordinate,
    directions: [CompassPrimary; 4],
    next: usize,
}

impl CarveFrame {
    fn enter<R: Rng + ?Sized>(node: Cartesian2DCoordinate, rng: &mut R) -> CarveFrame {
        let mut directions = CompassPrimary::ALL;
        directions.shuffle(rng);
        CarveFrame {
            node,
            directions,
            next: 0,
        }
    }

    fn next_direction(&mut self) -> Option<CompassPrimary> {
        let dir = self.directions.get(self.next).cloned();
        if dir.is_some() {
            self.next += 1;
        }
        dir
    }
}
