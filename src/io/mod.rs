//! Image I/O for a run.
//!
//! The distributor never touches files itself. A dedicated I/O thread owns an
//! [`ImageStore`] and is driven over channels:
//!
//! - `Input(name)`: the thread loads `name` and streams its cells, one value
//!   at a time in row-major order, back to the distributor.
//! - `Output(name)`: the thread receives `width * height` cell values and
//!   saves them under `name`.
//! - `CheckIdle`: answered once every earlier command has finished.
//!
//! The thread exits when its [`IoClient`] is dropped.

mod pgm;
mod store;

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

pub use pgm::{PGM_MAGIC, PGM_MAX_VALUE, PgmHeader, read_payload, read_pgm, write_pgm};
pub use store::{ImageStore, MemoryStore, PgmDirectory};

/// Command sent to the I/O thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoCommand {
    Input(String),
    Output(String),
    CheckIdle,
}

/// Distributor-side end of the I/O channels.
#[derive(Debug)]
pub struct IoClient {
    commands: Sender<IoCommand>,
    input: Receiver<u8>,
    output: Sender<u8>,
    idle: Receiver<bool>,
}

impl IoClient {
    /// Ask the I/O thread to start streaming image `name`.
    pub fn request_input(&self, name: &str) -> Result<(), IoError> {
        self.send_command(IoCommand::Input(name.to_string()))
    }

    /// Next cell value of the requested input image.
    pub fn recv_cell(&self) -> Result<u8, IoError> {
        self.input.recv().map_err(|_| IoError::Disconnected)
    }

    /// Announce an output image; exactly `width * height` cells must follow.
    pub fn begin_output(&self, name: &str) -> Result<(), IoError> {
        self.send_command(IoCommand::Output(name.to_string()))
    }

    pub fn send_cell(&self, value: u8) -> Result<(), IoError> {
        self.output.send(value).map_err(|_| IoError::Disconnected)
    }

    /// Block until the I/O thread has finished everything sent before.
    pub fn check_idle(&self) -> Result<(), IoError> {
        self.send_command(IoCommand::CheckIdle)?;
        match self.idle.recv() {
            Ok(true) => Ok(()),
            _ => Err(IoError::Disconnected),
        }
    }

    fn send_command(&self, command: IoCommand) -> Result<(), IoError> {
        self.commands.send(command).map_err(|_| IoError::Disconnected)
    }
}

/// I/O-thread-side end of the channels plus the store it serves.
struct IoWorker<S> {
    store: S,
    width: usize,
    height: usize,
    commands: Receiver<IoCommand>,
    input: Sender<u8>,
    output: Receiver<u8>,
    idle: Sender<bool>,
}

impl<S: ImageStore> IoWorker<S> {
    fn run(mut self) -> Result<(), IoError> {
        while let Ok(command) = self.commands.recv() {
            log::debug!("I/O command {:?}", command);
            match command {
                IoCommand::Input(name) => self.read_image(&name)?,
                IoCommand::Output(name) => self.write_image(&name)?,
                IoCommand::CheckIdle => {
                    self.idle.send(true).map_err(|_| IoError::Disconnected)?;
                }
            }
        }
        Ok(())
    }

    fn read_image(&mut self, name: &str) -> Result<(), IoError> {
        let cells = self.store.load(name, self.width, self.height)?;
        for value in cells {
            self.input.send(value).map_err(|_| IoError::Disconnected)?;
        }
        Ok(())
    }

    fn write_image(&mut self, name: &str) -> Result<(), IoError> {
        let size = self.width * self.height;
        let mut cells = Vec::with_capacity(size);
        for _ in 0..size {
            cells.push(self.output.recv().map_err(|_| IoError::Disconnected)?);
        }
        self.store.save(name, self.width, self.height, &cells)
    }
}

/// Start the I/O thread for images of `width * height` cells.
pub fn spawn<S>(
    store: S,
    width: usize,
    height: usize,
) -> Result<(IoClient, JoinHandle<Result<(), IoError>>), IoError>
where
    S: ImageStore + Send + 'static,
{
    let (command_tx, command_rx) = mpsc::channel();
    let (input_tx, input_rx) = mpsc::channel();
    let (output_tx, output_rx) = mpsc::channel();
    let (idle_tx, idle_rx) = mpsc::channel();

    let worker = IoWorker {
        store,
        width,
        height,
        commands: command_rx,
        input: input_tx,
        output: output_rx,
        idle: idle_tx,
    };
    let handle = thread::Builder::new()
        .name("io".into())
        .spawn(move || worker.run())?;

    let client = IoClient {
        commands: command_tx,
        input: input_rx,
        output: output_tx,
        idle: idle_rx,
    };
    Ok((client, handle))
}

/// Image I/O errors.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid PGM header: {0}")]
    InvalidHeader(String),
    #[error("Unsupported PGM max value {0} (expected 255)")]
    UnsupportedMaxValue(usize),
    #[error("Image is {found:?} but the run expects {expected:?} (width, height)")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("Image data truncated: expected {expected} cells, found {found}")]
    Truncated { expected: usize, found: usize },
    #[error("No image named {0}")]
    MissingImage(String),
    #[error("Image store lock poisoned")]
    StorePoisoned,
    #[error("I/O channel disconnected")]
    Disconnected,
}
