use std::slice;

use petgraph::{Graph, Undirected};
use petgraph::graph::NodeIndex;
use serde_derive::Serialize;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, CoordinateSmallVec, MazeCell};
use crate::grid_dimensions::MazeDimensions;
use crate::grid_iterators::CellIter;
use crate::units::{CellsCount, Height, Width};


/// Undirected graph of open cells, edges joining 4-adjacent open cells.
pub type PassageGraph = Graph<Cartesian2DCoordinate, (), Undirected, u32>;

/// A rectangular maze of solid and open cells, stored row-major.
///
/// Mazes are built whole by a generator and handed out by value; nothing outside the crate can
/// flip a cell afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Maze {
    dimensions: MazeDimensions,
    cells: Vec<MazeCell>,
}

impl Maze {
    /// A grid where every cell is occupied.
    pub(crate) fn solid(dimensions: MazeDimensions) -> Maze {
        let cells = CellIter::new(dimensions).map(MazeCell::solid).collect();
        Maze { dimensions, cells }
    }

    pub(crate) fn set_occupied(&mut self, coord: Cartesian2DCoordinate, occupied: bool) {
        if let Some(index) = self.dimensions.grid_coordinate_to_index(coord) {
            self.cells[index].occupied = occupied;
        }
    }

    #[inline]
    pub fn dimensions(&self) -> MazeDimensions {
        self.dimensions
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.dimensions.width()
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.dimensions.height()
    }

    #[inline]
    pub fn size(&self) -> CellsCount {
        self.dimensions.size()
    }

    pub fn cell(&self, coord: Cartesian2DCoordinate) -> Option<&MazeCell> {
        self.dimensions.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    /// Is the cell solid? Coordinates off the grid count as open.
    #[inline]
    pub fn is_cell_occupied(&self, coord: Cartesian2DCoordinate) -> bool {
        self.cell(coord).map_or(false, |cell| cell.occupied)
    }

    #[inline]
    pub fn is_cell_open(&self, coord: Cartesian2DCoordinate) -> bool {
        self.cell(coord).map_or(false, MazeCell::is_open)
    }

    /// Cells in row-major order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<MazeCell> {
        self.cells.iter()
    }

    /// Rows of cells, north to south.
    #[inline]
    pub fn iter_row(&self) -> slice::Chunks<MazeCell> {
        self.cells.chunks(self.dimensions.width().0)
    }

    #[inline]
    pub fn iter_coordinates(&self) -> CellIter {
        CellIter::new(self.dimensions)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.occupied).count()
    }

    pub fn open_count(&self) -> usize {
        self.size().0 - self.occupied_count()
    }

    /// Open cells to the North, South, East or West of a cell.
    pub fn open_neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter_map(|dir| coord.offset(*dir, 1, &self.dimensions))
            .filter(|neighbour| self.is_cell_open(*neighbour))
            .collect()
    }

    /// Build the graph of passable cells, e.g. for solving or connectivity analysis.
    ///
    /// Nodes are added in row-major order of the open cells. Each adjacency is added once, looking
    /// only east and south from every open cell.
    pub fn passage_graph(&self) -> PassageGraph {
        let open_cells = self.open_count();
        let mut graph = PassageGraph::with_capacity(open_cells, open_cells);

        let mut node_indices: Vec<Option<NodeIndex<u32>>> = vec![None; self.size().0];
        for (index, cell) in self.cells.iter().enumerate() {
            if cell.is_open() {
                node_indices[index] = Some(graph.add_node(cell.coordinate()));
            }
        }

        for cell in self.cells.iter().filter(|cell| cell.is_open()) {
            let coord = cell.coordinate();
            for dir in &[CompassPrimary::East, CompassPrimary::South] {
                let neighbour = coord.offset(*dir, 1, &self.dimensions)
                    .and_then(|neighbour| self.dimensions.grid_coordinate_to_index(neighbour))
                    .and_then(|index| node_indices[index]);
                let this_node = self.dimensions
                    .grid_coordinate_to_index(coord)
                    .and_then(|index| node_indices[index]);

                if let (Some(a), Some(b)) = (this_node, neighbour) {
                    graph.add_edge(a, b, ());
                }
            }
        }

        graph
    }
}

impl<'a> IntoIterator for &'a Maze {
    type Item = &'a MazeCell;
    type IntoIter = slice::Iter<'a, MazeCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
