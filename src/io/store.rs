//! Image stores the I/O thread reads from and writes to.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use super::IoError;
use super::pgm::{PgmHeader, read_payload, write_pgm};

/// Backing storage for named grid images.
pub trait ImageStore {
    /// Load `width * height` cell values, row-major.
    fn load(&mut self, name: &str, width: usize, height: usize) -> Result<Vec<u8>, IoError>;

    /// Save `width * height` cell values, row-major.
    fn save(&mut self, name: &str, width: usize, height: usize, cells: &[u8]) -> Result<(), IoError>;
}

/// PGM files on disk: reads `<input_dir>/<name>.pgm`, writes
/// `<output_dir>/<name>.pgm`.
#[derive(Debug, Clone)]
pub struct PgmDirectory {
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl PgmDirectory {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(input_dir: P, output_dir: Q) -> Self {
        Self {
            input_dir: input_dir.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn input_path(&self, name: &str) -> PathBuf {
        self.input_dir.join(format!("{}.pgm", name))
    }

    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.pgm", name))
    }
}

impl ImageStore for PgmDirectory {
    fn load(&mut self, name: &str, width: usize, height: usize) -> Result<Vec<u8>, IoError> {
        let path = self.input_path(name);
        let mut reader = BufReader::new(File::open(&path)?);
        let header = PgmHeader::read_from(&mut reader)?;

        // Checked before the payload is read.
        if (header.width, header.height) != (width, height) {
            return Err(IoError::DimensionMismatch {
                expected: (width, height),
                found: (header.width, header.height),
            });
        }
        let cells = read_payload(&mut reader, &header)?;
        log::debug!("Read {} ({}x{})", path.display(), width, height);
        Ok(cells)
    }

    fn save(&mut self, name: &str, width: usize, height: usize, cells: &[u8]) -> Result<(), IoError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_path(name);
        let mut writer = BufWriter::new(File::create(&path)?);
        write_pgm(&mut writer, width, height, cells)?;
        log::info!("Wrote {}", path.display());
        Ok(())
    }
}

/// In-memory image map. Clones share the same images, so a caller can keep
/// a handle while the I/O thread owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    images: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an image under `name`.
    pub fn insert(&self, name: impl Into<String>, cells: Vec<u8>) -> Result<(), IoError> {
        self.images()?.insert(name.into(), cells);
        Ok(())
    }

    /// Fetch a copy of the image stored under `name`.
    pub fn get(&self, name: &str) -> Result<Option<Vec<u8>>, IoError> {
        Ok(self.images()?.get(name).cloned())
    }

    fn images(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<u8>>>, IoError> {
        self.images.lock().map_err(|_| IoError::StorePoisoned)
    }
}

impl ImageStore for MemoryStore {
    fn load(&mut self, name: &str, width: usize, height: usize) -> Result<Vec<u8>, IoError> {
        let cells = self
            .get(name)?
            .ok_or_else(|| IoError::MissingImage(name.to_string()))?;
        if cells.len() != width * height {
            return Err(IoError::Truncated {
                expected: width * height,
                found: cells.len(),
            });
        }
        Ok(cells)
    }

    fn save(&mut self, name: &str, width: usize, height: usize, cells: &[u8]) -> Result<(), IoError> {
        if cells.len() != width * height {
            return Err(IoError::Truncated {
                expected: width * height,
                found: cells.len(),
            });
        }
        self.insert(name, cells.to_vec())
    }
}
