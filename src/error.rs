use thiserror::Error;

/// Failures of the unique index sampler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("cannot draw {requested} unique values from a range of {available}")]
    InsufficientRange { requested: usize, available: usize },

    #[error("range start {start} is past its end {end}")]
    InvalidRange { start: usize, end: usize },
}

/// Failures of a save into the persistent media store.
///
/// Messages are flattened to strings so one outcome can be handed to every
/// subscriber of the save coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("no image at index {0}")]
    UnknownTarget(usize),

    #[error("unable to decode source image: {0}")]
    Decode(String),

    #[error("unable to encode image: {0}")]
    Encode(String),

    #[error("filesystem error: {0}")]
    Io(String),

    #[error("failed to queue save: {0}")]
    Queue(String),

    #[error("save worker stopped before reporting a result")]
    WorkerGone,
}

impl From<std::io::Error> for SaveError {
    fn from(err: std::io::Error) -> Self {
        SaveError::Io(err.to_string())
    }
}

/// Failures while refreshing the displayed set of images.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error(transparent)]
    Fetch(#[from] anyhow::Error),

    #[error(transparent)]
    Sample(#[from] SampleError),
}
