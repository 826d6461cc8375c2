use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("invalid stop {id}: lat={latitude} lng={longitude} is outside [-90, 90] x [-180, 180]")]
    InvalidStop {
        id: String,
        latitude: f64,
        longitude: f64,
    },
    #[error("duplicate stop id: {0}")]
    DuplicateStopId(String),
    #[error("route has no stops")]
    EmptyRoute,
    #[error("anchor stop {0} is not part of the route")]
    UnknownAnchor(String),
    #[error("invalid metrics config: {0}")]
    InvalidConfig(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}
