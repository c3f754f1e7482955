//! Error types for DrishtiMCL

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// DrishtiMCL error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Rejection sampling ran out of attempts before filling the population
    #[error(
        "Particle initialization failed: found {found} of {requested} free positions after {attempts} attempts"
    )]
    InitializationFailed {
        /// Requested population size
        requested: usize,
        /// Particles accepted before giving up
        found: usize,
        /// Samples drawn
        attempts: usize,
    },

    /// Worker pool could not be created
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// Diagnostic image could not be written
    #[error("Image error: {0}")]
    Image(String),
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        Error::ThreadPool(e.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}
