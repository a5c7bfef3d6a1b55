use thiserror::Error;

/// Result type for evaluation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for evaluation operations
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed identifiers on judgements and result documents
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A metric whose computation would divide by zero
    #[error("Undefined metric: {0}")]
    UndefinedMetric(String),

    /// A rank-only operation invoked on an unranked result
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parsing errors when reading judgement or result files
    #[error("Parse error in {file}: {message}")]
    Parse { file: String, message: String },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Creates an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Creates an undefined metric error
    pub fn undefined_metric(msg: impl Into<String>) -> Self {
        Self::UndefinedMetric(msg.into())
    }

    /// Creates an unsupported operation error
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedOperation(msg.into())
    }

    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a parse error
    pub fn parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Adds context to any error
    pub fn with_context<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Returns true for division-by-zero style failures
    pub fn is_undefined_metric(&self) -> bool {
        matches!(self, Self::UndefinedMetric(_))
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::with_context(context, e))
    }
}
