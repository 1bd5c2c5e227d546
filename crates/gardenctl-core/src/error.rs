use std::path::PathBuf;

use thiserror::Error;

use crate::target::TargetKind;

#[derive(Error, Debug)]
pub enum GardenError {
    #[error("Cannot read garden cluster config {}: {reason}", path.display())]
    ConfigRead { path: PathBuf, reason: String },

    #[error("No garden clusters configured")]
    NoGardenClusters,

    #[error("Cannot read target {}: {reason}", path.display())]
    TargetRead { path: PathBuf, reason: String },

    #[error("Cannot write target {}: {source}", path.display())]
    TargetWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No {0} targeted")]
    NotTargeted(TargetKind),

    #[error("Garden cluster '{0}' is not configured")]
    UnknownGarden(String),

    #[error("Cannot build {kind} client from {}: {source}", path.display())]
    ClientBuild {
        kind: TargetKind,
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("API request failed: {0}")]
    Api(#[source] anyhow::Error),

    #[error("`{command}` failed: {reason}")]
    Subprocess { command: String, reason: String },

    #[error("Shoot '{0}' not found")]
    ShootNotFound(String),

    #[error("Shoot '{0}' is not scheduled to a seed yet")]
    ShootUnscheduled(String),
}

pub type GardenResult<T> = Result<T, GardenError>;
