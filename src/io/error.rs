use std::path::PathBuf;

use thiserror::Error;

/// All the errors that can occur when opening or reading voltage dumps
#[derive(Error, Debug)]
pub enum IoError {
    /// An error when opening the dump file itself.
    #[error("Couldn't open {file:?}: {err}")]
    Open {
        /// The dump that was being opened
        file: PathBuf,
        /// The underlying netCDF error
        err: netcdf::Error,
    },

    #[error("{file:?} has no `voltages` variable")]
    /// Error for a dump with no voltage data at all
    MissingVoltages {
        /// The dump that was being opened
        file: PathBuf,
    },

    #[error("`voltages` in {file:?} has {num_dims} dimensions, expected 4 (time, freq, pol, reim)")]
    /// Error for a voltage variable that is not four dimensional
    BadDimensionCount {
        /// The dump that was being opened
        file: PathBuf,
        /// The number of dimensions the variable actually has
        num_dims: usize,
    },

    #[error("`voltages` in {file:?} has no `{dim}` dimension")]
    /// Error for a voltage variable missing one of the required dimensions
    MissingDimension {
        /// The dump that was being opened
        file: PathBuf,
        /// The dimension that could not be found
        dim: &'static str,
    },

    #[error("`{dim}` in {file:?} has length {received}, expected {expected}")]
    /// Error for a dimension with an impossible length
    BadDimensionLength {
        /// The dump that was being opened
        file: PathBuf,
        /// The offending dimension
        dim: &'static str,
        /// The length the dimension must have
        expected: usize,
        /// The length that was found instead
        received: usize,
    },

    #[error("time_chunks must be greater than zero")]
    /// Error for a chunk size that would never read anything
    ZeroTimeChunks,

    #[error("Insufficient memory available; need {need_gib} GiB of memory for the output array.")]
    /// Error when the output allocation was refused
    InsufficientMemory {
        /// The amount of memory we think we need
        need_gib: usize,
    },

    /// A netCDF error while reading.
    #[error(transparent)]
    Netcdf(#[from] netcdf::Error),

    /// An ndarray shape error while assembling a chunk.
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}
