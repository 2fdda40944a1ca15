type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures while turning paths into decoded objects.
///
/// `document` is the 1-based index of the document inside a multi-document file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("{path}: no such file or directory")]
    NotFound { path: String },
    #[error("read {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: document {document} is not valid YAML or JSON")]
    Malformed {
        path: String,
        document: usize,
        #[source]
        source: BoxError,
    },
    #[error("{path}: unknown resource type: kind={kind}, version={version}")]
    UnknownType {
        path: String,
        kind: String,
        version: String,
    },
    #[error("{path}: document {document}: {reason}")]
    Decode {
        path: String,
        document: usize,
        reason: String,
    },
}

impl LoadError {
    pub fn path(&self) -> &str {
        match self {
            LoadError::NotFound { path }
            | LoadError::Read { path, .. }
            | LoadError::Malformed { path, .. }
            | LoadError::UnknownType { path, .. }
            | LoadError::Decode { path, .. } => path,
        }
    }
}
