// src/config/state.rs
use crate::utils::error::{NotifierError, Result};
use std::path::PathBuf;

/// Persistent record of the last block height already announced
pub trait WinStateStore {
    /// Reads the recorded height; `None` when nothing was recorded yet
    fn last_win(&self) -> Result<Option<u64>>;

    /// Overwrites the recorded height
    fn record_win(&mut self, height: u64) -> Result<()>;
}

/// Win state kept as a string-encoded integer in a plain text file
#[derive(Debug, Clone)]
pub struct FileWinState {
    path: PathBuf,
}

impl FileWinState {
    /// Creates a store backed by `path`; the file need not exist yet
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileWinState { path: path.into() }
    }
}

impl WinStateStore for FileWinState {
    fn last_win(&self) -> Result<Option<u64>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        parse_win_state(&contents)
    }

    fn record_win(&mut self, height: u64) -> Result<()> {
        log::info!(
            "recording blockheight {} at {}",
            height,
            self.path.display()
        );
        std::fs::write(&self.path, height.to_string())?;
        Ok(())
    }
}

/// Parses the stored representation; blank means unset
pub fn parse_win_state(raw: &str) -> Result<Option<u64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    raw.parse().map(Some).map_err(|_| {
        NotifierError::ConfigError(format!("Recorded win height is not an integer: {:?}", raw))
    })
}
