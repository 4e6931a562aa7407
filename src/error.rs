//! Error types shared by every stage of the agent.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::PathBuf;
use thiserror::Error;

/// Failures the agent reports as a single structured error object.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("image not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    #[error("could not decode image {}: {source}", .path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("unsupported pixel layout: {0}")]
    ImageFormat(String),

    #[error("missing input: {0}")]
    MissingInput(&'static str),
}

impl AgentError {
    /// Stable name of the error kind, as it appears in serialized output.
    pub fn kind(&self) -> &'static str {
        match self {
            AgentError::ImageNotFound(_) => "ImageNotFound",
            AgentError::ImageDecode { .. } => "ImageDecodeError",
            AgentError::ImageFormat(_) => "ImageFormatError",
            AgentError::MissingInput(_) => "MissingInputError",
        }
    }
}

impl Serialize for AgentError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("error", &self.to_string())?;
        map.serialize_entry("kind", self.kind())?;
        map.end()
    }
}
