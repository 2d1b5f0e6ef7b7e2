// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Convert GReX voltage dumps into Stokes I dynamic spectra.
//!
//! The telescope's trigger path writes windows of critically-sampled
//! complex voltages to netCDF dump files. This crate reads those dumps,
//! forms total intensity in exact integer arithmetic, and optionally
//! block-averages the result in time and frequency:
//!
//! ```no_run
//! use dynspec::{constants::DEFAULT_TIME_CHUNKS, read_voltage_as_stokes_i};
//!
//! # fn main() -> Result<(), dynspec::DynspecError> {
//! let spectrum = read_voltage_as_stokes_i(
//!     "grex_dump.nc".as_ref(),
//!     Some(16),
//!     None,
//!     DEFAULT_TIME_CHUNKS,
//! )?;
//! println!("{:?}", spectrum.dims());
//! # Ok(())
//! # }
//! ```

pub mod averaging;
pub mod constants;
pub mod context;
pub mod error;
pub mod io;
pub mod spectrum;
pub mod stokes;

// Re-exports.
pub use averaging::{downsample, downsample_coords, AveragingError};
pub use context::VoltageContext;
pub use error::DynspecError;
pub use io::{read_voltage_as_stokes_i, IoError, VoltageDump};
pub use spectrum::DynamicSpectrum;

pub use hifitime;
pub use ndarray;
pub use num_complex;
pub use num_complex::Complex;
pub use num_traits;
pub use rayon;

/// A complex voltage sample: one signed byte each for the real and
/// imaginary components.
pub type ComplexByte = Complex<i8>;
