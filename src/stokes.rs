// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Stokes I formation from complex voltage samples.
//!
//! A dump stores each sample as separate real and imaginary `i8` components.
//! Stokes I at a `(time, freq)` cell is the squared magnitude of the sample
//! summed over both polarizations. Samples are widened to `i32` before
//! squaring: the largest reachable cell value is
//! `2 * ((-128)^2 + (-128)^2) = 65536`, which overflows `i16` but is exact
//! in `i32`. There is no need to form complex numbers and take `abs` on this
//! path, as that would be an unnecessary square root.

use itertools::izip;
use ndarray::{Array2, ArrayView2, ArrayView4, ArrayViewMut2};
use rayon::prelude::*;

use crate::{Complex, ComplexByte};

/// Compute Stokes I from a voltage view into a preallocated array.
///
/// `voltages` - a four dimensional array of `i8` voltage components.
///     The dimensions of the array are `[timestep][channel][pol][reim]`,
///     with `reim` index 0 holding the real component of each sample and
///     index 1 the imaginary component.
///
/// `stokes` - the `[timestep][channel]` output. Its dimensions must match
///     the first two dimensions of `voltages`.
///
/// Timesteps are processed in parallel.
pub fn stokes_i_into(voltages: ArrayView4<i8>, mut stokes: ArrayViewMut2<i32>) {
    let voltage_dims = voltages.dim();
    debug_assert_eq!((voltage_dims.0, voltage_dims.1), stokes.dim());

    stokes
        .outer_iter_mut()
        .into_par_iter()
        .zip(voltages.outer_iter().into_par_iter())
        .for_each(|(mut stokes_timestep_view, voltages_timestep_view)| {
            for (voltages_chan_view, stokes_elem) in izip!(
                voltages_timestep_view.outer_iter(),
                stokes_timestep_view.iter_mut(),
            ) {
                let mut intensity = 0_i32;
                for voltages_pol_view in voltages_chan_view.outer_iter() {
                    let re = i32::from(voltages_pol_view[0]);
                    let im = i32::from(voltages_pol_view[1]);
                    intensity += re * re + im * im;
                }
                *stokes_elem = intensity;
            }
        });
}

/// Compute Stokes I from a voltage view.
///
/// See [`stokes_i_into`] for the dimension conventions.
pub fn stokes_i(voltages: ArrayView4<i8>) -> Array2<i32> {
    let voltage_dims = voltages.dim();
    let mut stokes = Array2::zeros((voltage_dims.0, voltage_dims.1));
    stokes_i_into(voltages, stokes.view_mut());
    stokes
}

/// Compute Stokes I from per-polarization `(time, freq)` arrays of complex
/// samples, the layout the capture code works in.
///
/// Gives the same values as [`stokes_i`] does for the dump layout.
pub fn stokes_i_from_complex(
    pol_x: ArrayView2<ComplexByte>,
    pol_y: ArrayView2<ComplexByte>,
) -> Array2<i32> {
    debug_assert_eq!(pol_x.dim(), pol_y.dim());

    let mut stokes = Array2::zeros(pol_x.dim());
    ndarray::Zip::from(&mut stokes)
        .and(&pol_x)
        .and(&pol_y)
        .for_each(|stokes_elem, &x, &y| {
            *stokes_elem = widened_norm_sqr(x) + widened_norm_sqr(y);
        });
    stokes
}

/// The squared magnitude of a sample, widened so it cannot overflow.
#[inline]
fn widened_norm_sqr(sample: ComplexByte) -> i32 {
    Complex::new(i32::from(sample.re), i32::from(sample.im)).norm_sqr()
}

#[cfg(test)]
mod tests {
    use ndarray::{Array2, Array4, Axis};

    use super::*;

    fn synthesize_voltages(shape: (usize, usize, usize, usize)) -> Array4<i8> {
        Array4::from_shape_fn(shape, |(timestep_idx, chan_idx, pol_idx, reim_idx)| {
            let mixed = timestep_idx * 31 + chan_idx * 7 + pol_idx * 13 + reim_idx * 5;
            (mixed % 251) as i8
        })
    }

    #[test]
    fn test_stokes_i_constant_input() {
        // all real components 3, all imaginary components -4, both pols:
        // every cell is 2 * (9 + 16).
        let voltages = Array4::from_shape_fn((4, 8, 2, 2), |(_, _, _, reim_idx)| {
            if reim_idx == 0 {
                3_i8
            } else {
                -4_i8
            }
        });

        let stokes = stokes_i(voltages.view());

        assert_eq!(stokes.dim(), (4, 8));
        assert!(stokes.iter().all(|&intensity| intensity == 50));
    }

    #[test]
    fn test_stokes_i_extreme_samples_do_not_overflow() {
        let voltages = Array4::from_elem((3, 5, 2, 2), i8::MIN);

        let stokes = stokes_i(voltages.view());

        // 2 * ((-128)^2 + (-128)^2), which would overflow an i16.
        assert!(stokes.iter().all(|&intensity| intensity == 65536));
    }

    #[test]
    fn test_stokes_i_single_cell() {
        let mut voltages = Array4::zeros((1, 1, 2, 2));
        // pol x: 1 + 2i, pol y: -3 - 5i.
        voltages[[0, 0, 0, 0]] = 1;
        voltages[[0, 0, 0, 1]] = 2;
        voltages[[0, 0, 1, 0]] = -3;
        voltages[[0, 0, 1, 1]] = -5;

        let stokes = stokes_i(voltages.view());

        assert_eq!(stokes[[0, 0]], 1 + 4 + 9 + 25);
    }

    #[test]
    fn test_stokes_i_matches_complex_path() {
        let voltages = synthesize_voltages((6, 9, 2, 2));

        let reals = voltages.index_axis(Axis(3), 0);
        let imags = voltages.index_axis(Axis(3), 1);
        let pol_x = Array2::from_shape_fn((6, 9), |(timestep_idx, chan_idx)| {
            ComplexByte::new(
                reals[[timestep_idx, chan_idx, 0]],
                imags[[timestep_idx, chan_idx, 0]],
            )
        });
        let pol_y = Array2::from_shape_fn((6, 9), |(timestep_idx, chan_idx)| {
            ComplexByte::new(
                reals[[timestep_idx, chan_idx, 1]],
                imags[[timestep_idx, chan_idx, 1]],
            )
        });

        assert_eq!(
            stokes_i(voltages.view()),
            stokes_i_from_complex(pol_x.view(), pol_y.view())
        );
    }
}
