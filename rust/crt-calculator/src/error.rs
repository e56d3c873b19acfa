use rns_core::RnsError;

/// Errors surfaced by the calculator driver.
#[derive(Debug, thiserror::Error)]
pub enum CalcError {
    #[error("{operation} failed: {source}")]
    Engine {
        operation: &'static str,
        source: RnsError,
    },

    #[error("cannot parse {field} from '{value}'")]
    Parse { field: String, value: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CalcError {
    /// Attach the name of the failing step to an engine error.
    pub fn engine(operation: &'static str) -> impl FnOnce(RnsError) -> CalcError {
        move |source| CalcError::Engine { operation, source }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
