/// An error type for the videoio module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum VideoIoError {
    /// Error when a flat parameter list cannot be split into key-value pairs.
    #[error("Vector of parameters should have even length, got {0}")]
    OddParameterCount(usize),

    /// Error when a required parameter was not supplied.
    #[error("Missing value for parameter: [{0}]")]
    MissingParameter(i32),

    /// Error when a frame buffer cannot be built.
    #[error(transparent)]
    ImageError(#[from] kornia_raster::ImageError),
}
