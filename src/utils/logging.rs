//! Transcript logging to a user-chosen file
//!
//! Distinct from the tracing diagnostics: this is the user-facing record
//! of the conversation, enabled with `--log` or `/log <filename>` and
//! pausable with a bare `/log`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;

pub struct LoggingState {
    file_path: Option<PathBuf>,
    is_active: bool,
}

impl LoggingState {
    /// A path supplied at startup activates logging immediately; `None`
    /// leaves it disabled until `/log <filename>`.
    pub fn new(log_file: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut logging = LoggingState {
            file_path: None,
            is_active: false,
        };

        if let Some(path) = log_file {
            logging.enable(path)?;
            logging.log_message(&format!("## Logging started at {}", Utc::now().to_rfc3339()))?;
        }

        Ok(logging)
    }

    /// Point logging at a file and activate it. Fails if the file cannot
    /// be opened for appending.
    pub fn enable(&mut self, path: String) -> Result<String, Box<dyn std::error::Error>> {
        let path = PathBuf::from(path);
        OpenOptions::new().create(true).append(true).open(&path)?;

        let display = path.display().to_string();
        self.file_path = Some(path);
        self.is_active = true;

        Ok(format!("Logging enabled to: {display}"))
    }

    /// Pause or resume logging to the configured file.
    pub fn toggle(&mut self) -> Result<String, Box<dyn std::error::Error>> {
        match &self.file_path {
            Some(path) => {
                let display = path.display().to_string();
                if self.is_active {
                    self.log_message("## Logging paused")?;
                    self.is_active = false;
                    Ok(format!("Logging paused (file: {display})"))
                } else {
                    self.is_active = true;
                    Ok(format!("Logging resumed to: {display}"))
                }
            }
            None => {
                Err("No log file specified. Use /log <filename> to enable logging first.".into())
            }
        }
    }

    /// Append one transcript entry, followed by a blank line to mirror the
    /// on-screen spacing. A no-op while logging is disabled or paused.
    pub fn log_message(&self, content: &str) -> Result<(), Box<dyn std::error::Error>> {
        let Some(path) = &self.file_path else {
            return Ok(());
        };
        if !self.is_active {
            return Ok(());
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        for line in content.lines() {
            writeln!(file, "{line}")?;
        }
        writeln!(file)?;
        file.flush()?;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn status_string(&self) -> String {
        match (&self.file_path, self.is_active) {
            (None, _) => "disabled".to_string(),
            (Some(path), active) => {
                let name = Path::new(path)
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy();
                if active {
                    format!("active ({name})")
                } else {
                    format!("paused ({name})")
                }
            }
        }
    }
}
