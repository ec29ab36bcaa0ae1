use thiserror::Error;

#[derive(Error, Debug)]
pub enum NbodyError {
    #[error("unable to allocate an aligned buffer for {len} particles")]
    Allocation { len: usize },
    #[error("particle components differ in length: {lengths:?}")]
    LengthMismatch { lengths: [usize; 6] },
    #[error("the number of steps ({steps}) must exceed the number of warm-up steps ({warmup})")]
    InvalidRunParameters { steps: usize, warmup: usize },
    #[error("no samples were recorded after the warm-up phase")]
    NoSamples,
    #[error("unable to build the worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, NbodyError>;
