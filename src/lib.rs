//! Parallel Game of Life on a toroidal grid.
//!
//! Each generation is split into row strips that are computed in parallel,
//! and the run reports its progress as an ordered stream of [`Event`]s.
//!
//! # Architecture
//!
//! - `schema`: Run parameters, configuration file types and events
//! - `compute`: Grid, transition rule, strip workers and the `Distributor`
//! - `io`: The image I/O thread and its PGM / in-memory stores
//!
//! # Example
//!
//! ```rust,no_run
//! use parallel_life::{
//!     io::PgmDirectory,
//!     schema::{RunParams, event_channel},
//! };
//!
//! let params = RunParams {
//!     image_width: 64,
//!     image_height: 64,
//!     turns: 100,
//!     threads: 4,
//! };
//! let (events, rx) = event_channel();
//!
//! let handle = std::thread::spawn(move || {
//!     parallel_life::run(params, PgmDirectory::new("images", "out"), events)
//! });
//! for event in rx {
//!     println!("{}", event);
//! }
//! let world = handle.join().unwrap().unwrap();
//! println!("{} cells alive", world.alive_count());
//! ```

pub mod compute;
pub mod io;
pub mod schema;

pub use compute::{Distributor, DistributorError, Grid};
pub use schema::{Cell, Event, EventSink, RunParams, State};

use io::{ImageStore, IoError};

/// Run a full simulation: start the I/O thread on `store`, step the grid
/// `params.turns` times and write the result back.
///
/// Parameters are validated before the I/O thread is started. `events` is
/// closed when this returns.
pub fn run<S>(params: RunParams, store: S, events: EventSink) -> Result<Grid, DistributorError>
where
    S: ImageStore + Send + 'static,
{
    let distributor = Distributor::new(params)?;
    let p = distributor.params();
    let (client, io_thread) = io::spawn(store, p.image_width, p.image_height)?;

    let result = distributor.run(&client, events);
    drop(client);

    let io_result = io_thread.join().map_err(|_| DistributorError::IoPanicked)?;
    match (result, io_result) {
        // The channel closed because the I/O thread failed; report why.
        (Err(DistributorError::Io(IoError::Disconnected)), Err(e)) => Err(e.into()),
        (Err(e), _) => Err(e),
        (Ok(_), Err(e)) => Err(e.into()),
        (Ok(world), Ok(())) => Ok(world),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryStore;
    use crate::schema::event_channel;

    #[test]
    fn test_missing_input_reports_store_error() {
        let (events, rx) = event_channel();
        let params = RunParams {
            image_width: 4,
            image_height: 4,
            turns: 2,
            threads: 2,
        };

        let err = run(params, MemoryStore::new(), events).unwrap_err();
        assert!(matches!(err, DistributorError::Io(IoError::MissingImage(_))));
        // Stream is closed even though the run failed.
        assert_eq!(rx.iter().count(), 0);
    }

    #[test]
    fn test_invalid_params_fail_before_io() {
        let (events, rx) = event_channel();
        let params = RunParams {
            image_width: 4,
            image_height: 4,
            turns: 2,
            threads: 0,
        };

        let store = MemoryStore::new();
        let err = run(params, store, events).unwrap_err();
        assert!(matches!(err, DistributorError::InvalidParams(_)));
        assert_eq!(rx.iter().count(), 0);
    }
}
