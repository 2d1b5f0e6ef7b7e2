// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Useful constants.

/// The name of the voltage variable in a dump file.
pub const VOLTAGES_VAR: &str = "voltages";
/// The name of the time dimension in a dump file.
pub const TIME_DIM: &str = "time";
/// The name of the frequency dimension in a dump file.
pub const FREQ_DIM: &str = "freq";
/// The name of the polarization dimension in a dump file.
pub const POL_DIM: &str = "pol";
/// The name of the complex-component dimension in a dump file.
pub const REIM_DIM: &str = "reim";

/// The number of polarizations the instrument captures.
pub const NUM_POLS: usize = 2;
/// The number of complex components (real, imaginary) per voltage sample.
pub const NUM_REIMS: usize = 2;
/// The number of frequency channels the instrument produces.
pub const NUM_CHANNELS: usize = 2048;
/// The cadence of critically-sampled spectra \[seconds\]
pub const SAMPLE_TIME_S: f64 = 8.192e-6;

/// The default number of timesteps to read per chunk.
pub const DEFAULT_TIME_CHUNKS: usize = 2048;
