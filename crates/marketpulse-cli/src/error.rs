use marketpulse_core::SnapshotError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    /// Exit code for the process: invalid input is distinguishable from
    /// internal failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Snapshot(SnapshotError::InvalidSymbol(_)) => 2,
            Self::Serialization(_) => 1,
        }
    }
}
