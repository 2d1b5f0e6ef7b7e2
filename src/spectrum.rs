// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The labelled Stokes I product.

use ndarray::{Array1, Array2};

/// A Stokes I dynamic spectrum together with its axis labels.
///
/// This is the output of [`crate::io::read_voltage_as_stokes_i`]: the
/// intensity data plus whatever `time`/`freq` coordinates the dump recorded,
/// downsampled in lockstep with the data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DynamicSpectrum {
    /// Stokes I intensity. The dimensions of the array are
    /// `[timestep][channel]`.
    pub stokes_i: Array2<f64>,
    /// The timestamp of each output timestep. UNIX \[seconds\]
    pub times: Option<Array1<f64>>,
    /// The frequency of each output channel, in the unit the dump recorded.
    pub freqs: Option<Array1<f64>>,
}

impl DynamicSpectrum {
    /// The dimensions of the spectrum.
    pub fn dims(&self) -> (usize, usize) {
        self.stokes_i.dim()
    }

    /// The number of timesteps (Axis 0).
    pub fn num_timesteps(&self) -> usize {
        self.stokes_i.nrows()
    }

    /// The number of channels (Axis 1).
    pub fn num_channels(&self) -> usize {
        self.stokes_i.ncols()
    }
}

#[cfg(any(test, feature = "approx"))]
fn coords_abs_diff_eq(
    first: &Option<Array1<f64>>,
    second: &Option<Array1<f64>>,
    epsilon: f64,
) -> bool {
    use approx::AbsDiffEq;

    match (first, second) {
        (None, None) => true,
        (Some(first), Some(second)) => first.abs_diff_eq(second, epsilon),
        _ => false,
    }
}

#[cfg(any(test, feature = "approx"))]
impl approx::AbsDiffEq for DynamicSpectrum {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.stokes_i.abs_diff_eq(&other.stokes_i, epsilon)
            && coords_abs_diff_eq(&self.times, &other.times, epsilon)
            && coords_abs_diff_eq(&self.freqs, &other.freqs, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl approx::RelativeEq for DynamicSpectrum {
    #[inline]
    fn default_max_relative() -> f64 {
        f64::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        fn coords_relative_eq(
            first: &Option<Array1<f64>>,
            second: &Option<Array1<f64>>,
            epsilon: f64,
            max_relative: f64,
        ) -> bool {
            use approx::RelativeEq;

            match (first, second) {
                (None, None) => true,
                (Some(first), Some(second)) => first.relative_eq(second, epsilon, max_relative),
                _ => false,
            }
        }

        self.stokes_i
            .relative_eq(&other.stokes_i, epsilon, max_relative)
            && coords_relative_eq(&self.times, &other.times, epsilon, max_relative)
            && coords_relative_eq(&self.freqs, &other.freqs, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_abs_diff_ne};
    use ndarray::array;

    use super::*;

    fn synthesize_spectrum() -> DynamicSpectrum {
        DynamicSpectrum {
            stokes_i: array![[50.0, 32.0], [18.0, 65536.0]],
            times: Some(array![0.0, 1.0]),
            freqs: None,
        }
    }

    #[test]
    fn test_accessors() {
        let spectrum = synthesize_spectrum();

        assert_eq!(spectrum.dims(), (2, 2));
        assert_eq!(spectrum.num_timesteps(), 2);
        assert_eq!(spectrum.num_channels(), 2);
    }

    #[test]
    fn test_abs_diff_eq() {
        let spectrum = synthesize_spectrum();

        assert_abs_diff_eq!(spectrum, synthesize_spectrum());

        let mut perturbed = synthesize_spectrum();
        perturbed.stokes_i[[0, 0]] += 1.0;
        assert_abs_diff_ne!(spectrum, perturbed);

        // coordinate presence must agree, not just the data.
        let mut unlabelled = synthesize_spectrum();
        unlabelled.times = None;
        assert_abs_diff_ne!(spectrum, unlabelled);
    }
}
