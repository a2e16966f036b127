//! Distributor - main simulation driver.
//!
//! Owns the authoritative grid, splits every turn into row strips, runs them
//! in parallel and reports progress through the event stream.

use std::num::NonZeroUsize;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::io::{IoClient, IoError};
use crate::schema::{Cell, Event, EventSink, ParamsError, RunParams, State};

use super::{ALIVE, Grid, Strip, StripJob, next_strip, partition};

/// Turn-stepping engine for one validated set of run parameters.
///
/// Pool threads live as long as the distributor and are reused every turn;
/// strip jobs and their grid snapshots are built fresh for each turn.
pub struct Distributor {
    params: RunParams,
    workers: NonZeroUsize,
    /// Pool for strip jobs. `None` when a single worker runs inline.
    pool: Option<ThreadPool>,
}

impl Distributor {
    /// Create a distributor, rejecting invalid parameters before any work
    /// starts.
    pub fn new(params: RunParams) -> Result<Self, DistributorError> {
        params.validate()?;
        let workers = NonZeroUsize::new(params.threads).ok_or(ParamsError::InvalidThreads)?;

        let pool = if workers.get() > 1 {
            Some(
                ThreadPoolBuilder::new()
                    .num_threads(workers.get())
                    .thread_name(|i| format!("strip-worker-{}", i))
                    .build()?,
            )
        } else {
            None
        };

        Ok(Self {
            params,
            workers,
            pool,
        })
    }

    /// Get parameters reference.
    pub fn params(&self) -> &RunParams {
        &self.params
    }

    /// Compute the generation after `current`.
    ///
    /// `on_flip` is called for every cell that changes state. With one worker
    /// the whole grid is computed inline. Otherwise every worker gets its own
    /// copy of `current` and a row range; all strips are collected before
    /// any of them is merged into the returned grid.
    pub fn next_generation<F>(&self, current: &Grid, on_flip: F) -> Grid
    where
        F: Fn(Cell) + Sync,
    {
        let strips = match &self.pool {
            None => vec![next_strip(current, 0..current.height(), &on_flip)],
            Some(pool) => {
                let jobs: Vec<StripJob> = partition(current.height(), self.workers)
                    .into_iter()
                    .map(|rows| StripJob::new(rows, current.clone()))
                    .collect();

                pool.install(|| {
                    jobs.into_par_iter()
                        .map(|job| job.run(&on_flip))
                        .collect::<Vec<Strip>>()
                })
            }
        };

        let mut next = Grid::new(current.width(), current.height());
        for strip in &strips {
            next.write_rows(strip.rows.start, &strip.cells);
        }
        next
    }

    /// Execute a whole run.
    ///
    /// Loads the initial grid through `io`, advances it `turns` times,
    /// writes the result back through `io` and returns it. `events` is
    /// closed when this returns, whether the run succeeded or not.
    pub fn run(&self, io: &IoClient, events: EventSink) -> Result<Grid, DistributorError> {
        let p = &self.params;
        log::info!(
            "Starting {}x{} run: {} turns on {} worker(s)",
            p.image_width,
            p.image_height,
            p.turns,
            p.threads
        );

        let mut world = self.load(io, &events)?;

        for turn in 0..p.turns {
            let completed_turns = turn + 1;
            let next = self.next_generation(&world, |cell| {
                events.emit(Event::CellFlipped {
                    completed_turns,
                    cell,
                })
            });
            world = next;

            let cells_count = world.alive_count();
            log::debug!("Turn {}: {} alive", completed_turns, cells_count);
            events.emit(Event::AliveCellsCount {
                completed_turns,
                cells_count,
            });
            events.emit(Event::TurnComplete { completed_turns });
        }

        self.save(io, &world)?;
        events.emit(Event::FinalTurnComplete {
            completed_turns: p.turns,
            alive: world.alive_cells(),
        });

        // Make sure the output has been written before quitting.
        io.check_idle()?;
        events.emit(Event::StateChange {
            completed_turns: p.turns,
            new_state: State::Quitting,
        });
        events.close();

        log::info!("Run finished after {} turns", p.turns);
        Ok(world)
    }

    /// Read the initial grid, reporting every live cell as flipped at turn 0.
    fn load(&self, io: &IoClient, events: &EventSink) -> Result<Grid, DistributorError> {
        let p = &self.params;
        io.request_input(&p.input_filename())?;

        let mut world = Grid::new(p.image_width, p.image_height);
        for y in 0..p.image_height {
            for x in 0..p.image_width {
                let value = io.recv_cell()?;
                world.set(x, y, value);
                if value == ALIVE {
                    events.emit(Event::CellFlipped {
                        completed_turns: 0,
                        cell: Cell::new(x, y),
                    });
                }
            }
        }
        log::debug!(
            "Loaded {} cells, {} alive",
            p.grid_size(),
            world.alive_count()
        );
        Ok(world)
    }

    fn save(&self, io: &IoClient, world: &Grid) -> Result<(), DistributorError> {
        io.begin_output(&self.params.output_filename())?;
        for &value in world.cells() {
            io.send_cell(value)?;
        }
        Ok(())
    }
}

/// Errors that stop a run.
#[derive(Debug, thiserror::Error)]
pub enum DistributorError {
    #[error("Invalid run parameters: {0}")]
    InvalidParams(#[from] ParamsError),
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("Image I/O failed: {0}")]
    Io(#[from] IoError),
    #[error("I/O thread panicked")]
    IoPanicked,
}
