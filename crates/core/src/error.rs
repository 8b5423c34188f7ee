use crate::model::ClassName;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JavaMapError {
    #[error("class not found: {0}")]
    ClassNotFound(ClassName),
    #[error("unsupported type descriptor: {0:?}")]
    UnsupportedType(String),
    #[error("reflection bridge unavailable: {0}")]
    BridgeUnavailable(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to resolve {class}: {source}")]
    Resolve {
        class: ClassName,
        #[source]
        source: Box<JavaMapError>,
    },
}

/// Coarse classification of a failure, independent of where it was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    UnsupportedType,
    BridgeUnavailable,
    Configuration,
    Io,
}

impl JavaMapError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            JavaMapError::ClassNotFound(_) => ErrorKind::NotFound,
            JavaMapError::UnsupportedType(_) => ErrorKind::UnsupportedType,
            JavaMapError::BridgeUnavailable(_) => ErrorKind::BridgeUnavailable,
            JavaMapError::Configuration(_) => ErrorKind::Configuration,
            JavaMapError::Io(_) | JavaMapError::Json(_) => ErrorKind::Io,
            JavaMapError::Resolve { source, .. } => source.kind(),
        }
    }

    /// The class whose resolution failed, if the error was raised during a run.
    pub fn class(&self) -> Option<&ClassName> {
        match self {
            JavaMapError::Resolve { class, .. } => Some(class),
            JavaMapError::ClassNotFound(class) => Some(class),
            _ => None,
        }
    }

    pub(crate) fn resolving(class: &ClassName, source: JavaMapError) -> Self {
        match source {
            already @ JavaMapError::Resolve { .. } => already,
            source => JavaMapError::Resolve {
                class: class.clone(),
                source: Box::new(source),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, JavaMapError>;
