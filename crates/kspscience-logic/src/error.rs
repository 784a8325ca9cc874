//! Error type shared by every module in this crate.

use std::path::PathBuf;

use thiserror::Error;

use crate::situation::RunType;

#[derive(Debug, Error)]
pub enum ScienceError {
    /// The biome filter was asked to filter for a run type with no biome concept.
    #[error("run type {run_type} cannot be used to filter biomes")]
    InvalidArgument { run_type: RunType },

    #[error("unknown run type '{0}'")]
    UnknownRunType(String),

    #[error("unknown situation '{0}'")]
    UnknownSituation(String),

    /// An identifier that is not `Body.Experiment.Situation.Biome`.
    #[error("malformed opportunity identifier '{0}'")]
    MalformedIdentifier(String),

    /// A science subject id that is not `experiment@BodySituationBiome`.
    #[error("malformed science subject '{0}'")]
    MalformedSubject(String),

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
