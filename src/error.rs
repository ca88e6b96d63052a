use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrasqlError {
    #[error("config: {message}")]
    Config { message: String },

    #[error("connection: {message}")]
    Connection { message: String },

    #[error("query: {message}")]
    Query { message: String },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("format: {message}")]
    Format { message: String },

    #[error("workbook: {message}")]
    Workbook { message: String },
}

impl OrasqlError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::Format { message: message.into() }
    }

    pub fn workbook(message: impl Into<String>) -> Self {
        Self::Workbook { message: message.into() }
    }

    /// Parameter errors are reported together with the usage line.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

impl From<serde_json::Error> for OrasqlError {
    fn from(e: serde_json::Error) -> Self {
        Self::format(format!("json marshal failed: {e}"))
    }
}

impl From<serde_yaml::Error> for OrasqlError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::format(format!("yaml marshal failed: {e}"))
    }
}

impl From<csv::Error> for OrasqlError {
    fn from(e: csv::Error) -> Self {
        match e.into_kind() {
            csv::ErrorKind::Io(io) => Self::Io(io),
            other => Self::format(format!("csv write failed: {other:?}")),
        }
    }
}
