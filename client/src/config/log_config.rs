use serde::{Deserialize, Serialize};
use tictactoe_common::config::Validate;
use tictactoe_common::logger::LogTarget;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct LogConfig {
    /// Log file path; logs go to stderr when set to null.
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    #[serde(default)]
    pub use_prefix: bool,
}

const DEFAULT_LOG_FILE: &str = "tictactoe.log";

fn default_log_file() -> Option<String> {
    Some(DEFAULT_LOG_FILE.to_string())
}

impl LogConfig {
    pub fn target(&self) -> LogTarget {
        match &self.file {
            Some(file) => LogTarget::File(file.into()),
            None => LogTarget::Stderr,
        }
    }
}

impl Validate for LogConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(file) = &self.file
            && file.trim().is_empty()
        {
            return Err("log file must not be empty if provided".to_string());
        }
        Ok(())
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            use_prefix: false,
        }
    }
}
