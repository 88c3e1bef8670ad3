#![warn(missing_docs)]
//! Optibench specific error structures
use std::{error::Error, fmt::Display};

/// Optibench specific Result type
pub type BenchResult<T> = std::result::Result<T, BenchError>;

/// Errors that can be returned by various optibench functions.
///
/// **Note**: The propagation of rays itself never fails. Errors only occur while setting up a
/// bench (invalid parameters) or while reading / writing files.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum BenchError {
    /// invalid parameters of an optical element (e.g. a [`Lens`](crate::elements::Lens) with zero width)
    Element(String),
    /// invalid parameters of a [`LightRay`](crate::ray::LightRay)
    Ray(String),
    /// error while setting up an [`OpticalSystem`](crate::optical_system::OpticalSystem)
    System(String),
    /// invalid propagation limits in a [`TraceConfig`](crate::trace_config::TraceConfig)
    Config(String),
    /// errors while reading, parsing or writing scene documents
    SceneDocument(String),
    /// errors while drawing a bench to a surface
    Render(String),
    /// errors while exporting ray paths
    Export(String),
    /// errors of the command line interface
    Console(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for BenchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Element(m) => write!(f, "Element:{m}"),
            Self::Ray(m) => write!(f, "Ray:{m}"),
            Self::System(m) => write!(f, "System:{m}"),
            Self::Config(m) => write!(f, "Config:{m}"),
            Self::SceneDocument(m) => write!(f, "SceneDocument:{m}"),
            Self::Render(m) => write!(f, "Render:{m}"),
            Self::Export(m) => write!(f, "Export:{m}"),
            Self::Console(m) => write!(f, "Console:{m}"),
            Self::Other(m) => write!(f, "Optibench Error:Other:{m}"),
        }
    }
}
impl Error for BenchError {}

impl std::convert::From<String> for BenchError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
