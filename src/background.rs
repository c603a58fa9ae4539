use std::thread;

use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use log::{debug, info};
use serde_derive::Serialize;

use crate::errors::*;
use crate::generators;
use crate::grid_dimensions::MazeDimensions;
use crate::maze::Maze;
use crate::mesh::MeshBuffer;
use crate::meshing;
use crate::units::{Height, Width};

/// A finished maze and the mesh of its walls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MazeModel {
    pub maze: Maze,
    pub mesh: MeshBuffer,
}

impl MazeModel {
    /// Generate and mesh on the calling thread.
    pub fn build(width: Width, height: Height, seed: Option<u64>) -> Result<MazeModel> {
        let maze = match seed {
            Some(s) => generators::generate_seeded(width, height, s)?,
            None => generators::generate(width, height)?,
        };
        let mesh = meshing::build_maze_mesh(&maze);
        Ok(MazeModel { maze, mesh })
    }
}

/// Maze generation and meshing running on a worker thread.
///
/// The result is handed over whole once both steps are done; a partly carved maze or partly
/// built mesh never leaves the worker. Dropping the job abandons it: the worker finishes its
/// current computation and discards the result.
#[derive(Debug)]
pub struct MazeJob {
    dimensions: MazeDimensions,
    output: Receiver<Result<MazeModel>>,
}

impl MazeJob {
    /// Start building a `width` x `height` maze in the background.
    ///
    /// Dimensions are checked before the worker is spawned, so invalid sizes fail here.
    pub fn spawn(width: Width, height: Height, seed: Option<u64>) -> Result<MazeJob> {
        let dimensions = MazeDimensions::new(width, height)?;
        let job = MazeJob::spawn_worker(dimensions, move || MazeModel::build(width, height, seed))?;
        info!("spawned background job for {}x{} maze", width.0, height.0);
        Ok(job)
    }

    fn spawn_worker<F>(dimensions: MazeDimensions, build: F) -> Result<MazeJob>
        where F: FnOnce() -> Result<MazeModel> + Send + 'static
    {
        let (tx, rx) = channel::bounded(1);
        let (width, height) = (dimensions.width().0, dimensions.height().0);

        thread::Builder::new()
            .name(format!("maze {}x{}", width, height))
            .spawn(move || {
                if !deliver(&tx, build()) {
                    debug!("maze {}x{} job was cancelled, discarding result", width, height);
                }
            })
            .chain_err(|| "failed to spawn maze worker thread")?;

        Ok(MazeJob {
            dimensions,
            output: rx,
        })
    }

    #[inline]
    pub fn dimensions(&self) -> MazeDimensions {
        self.dimensions
    }

    /// The finished model if the worker is done, without blocking.
    pub fn try_result(&self) -> Option<Result<MazeModel>> {
        match self.output.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ErrorKind::WorkerLost.into())),
        }
    }

    /// Block until the worker hands over its result.
    pub fn wait(self) -> Result<MazeModel> {
        self.output.recv().map_err(|_| Error::from(ErrorKind::WorkerLost))?
    }
}

/// Hand a finished result to the job. `false` when the job has been dropped.
fn deliver(output: &Sender<Result<MazeModel>>, result: Result<MazeModel>) -> bool {
    output.send(result).is_ok()
}
