// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Metadata describing a voltage dump.

use hifitime::{Duration, Epoch, Unit};
use ndarray::Array1;

/// A lightweight container for voltage dump metadata used in dynspec
/// operations.
///
/// This is intended to describe an accompanying `(time, freq, pol, reim)`
/// voltage ndarray, and is built by [`crate::io::VoltageDump::open`] from the
/// dump's dimensions and optional coordinate variables.
#[derive(Clone, Debug)]
pub struct VoltageContext {
    /// The number of timesteps (Axis 0) in the accompanying voltage ndarray.
    pub num_timesteps: usize,
    /// The number of frequency channels (Axis 1) in the accompanying voltage
    /// ndarray.
    pub num_channels: usize,
    /// The dump's `time` coordinate values, when it records them.
    /// UNIX timestamps \[seconds\]
    pub times: Option<Array1<f64>>,
    /// The dump's `freq` coordinate values, when it records them, in the
    /// unit the instrument wrote.
    pub freqs: Option<Array1<f64>>,
}

impl VoltageContext {
    /// The expected dimensions of the Stokes I ndarray for this dump.
    pub fn dims(&self) -> (usize, usize) {
        (self.num_timesteps, self.num_channels)
    }

    /// The dimensions of the Stokes I ndarray after downsampling by the given
    /// factors with a trim boundary. The factors must be nonzero.
    pub fn avg_dims(&self, time_factor: usize, freq_factor: usize) -> (usize, usize) {
        (
            self.num_timesteps / time_factor,
            self.num_channels / freq_factor,
        )
    }

    /// The timestamp of the first sample, when the dump records times.
    pub fn start_timestamp(&self) -> Option<Epoch> {
        self.times
            .as_ref()
            .and_then(|times| times.first().copied())
            .map(Epoch::from_unix_seconds)
    }

    /// Duration between consecutive samples, taken from the spacing of the
    /// first two `time` coordinates.
    pub fn sample_time(&self) -> Option<Duration> {
        let times = self.times.as_ref()?;
        if times.len() < 2 {
            return None;
        }
        Some(Duration::from_f64(times[1] - times[0], Unit::Second))
    }

    /// The spacing of the first two `freq` coordinates. Negative when the
    /// dump stores channels in descending frequency order.
    pub fn freq_resolution(&self) -> Option<f64> {
        let freqs = self.freqs.as_ref()?;
        if freqs.len() < 2 {
            return None;
        }
        Some(freqs[1] - freqs[0])
    }

    /// The timestamp of every sample, when the dump records times.
    pub fn timestamps(&self) -> Option<Vec<Epoch>> {
        self.times.as_ref().map(|times| {
            times
                .iter()
                .map(|&unix_seconds| Epoch::from_unix_seconds(unix_seconds))
                .collect()
        })
    }
}
