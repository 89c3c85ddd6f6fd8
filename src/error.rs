//! Crate-level error types.

use std::fmt;

use crate::gpu::{device::DeviceError, render_context::RenderContextError};

/// Errors produced by the triview crate.
#[derive(Debug)]
pub enum TriviewError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// A device resource could not be created during scene setup. Fatal:
    /// initialization is aborted and no orchestrator is produced.
    ResourceCreation {
        /// Label of the resource that failed.
        label: String,
        /// Device-reported cause.
        source: DeviceError,
    },
    /// A device call failed while recording a frame.
    Frame(DeviceError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// A UI write addressed a section/field that does not exist or rejected
    /// the supplied value.
    UnknownOption {
        /// Options section (e.g. `"lighting"`).
        section: String,
        /// Field within the section.
        field: String,
    },
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for TriviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::ResourceCreation { label, source } => {
                write!(f, "failed to create resource '{label}': {source}")
            }
            Self::Frame(e) => write!(f, "frame submission failed: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::UnknownOption { section, field } => {
                write!(f, "unknown or invalid option {section}.{field}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for TriviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::ResourceCreation { source, .. } => Some(source),
            Self::Frame(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for TriviewError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for TriviewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<DeviceError> for TriviewError {
    fn from(e: DeviceError) -> Self {
        Self::Frame(e)
    }
}
