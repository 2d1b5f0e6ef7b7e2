// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Temporal and spectral downsampling.

use itertools::izip;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use num_traits::AsPrimitive;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AveragingError {
    #[error("downsample factor for the {axis} axis must be greater than zero")]
    /// Error for a downsample factor of zero
    ZeroFactor {
        /// The axis the factor applies to
        axis: &'static str,
    },
}

/// Downsample a `(time, freq)` array by averaging `time_factor` x
/// `freq_factor` tiles of it.
///
/// Uses a "trim" boundary: each axis is partitioned into consecutive full
/// blocks and any ragged tail is dropped, so the output dimensions are
/// `(time / time_factor, freq / freq_factor)` in integer arithmetic. Every
/// output element is the mean of one full tile, so downsampling both axes at
/// once gives exactly the same values as downsampling them one after the
/// other, in either order.
///
/// A factor larger than the axis length trims the whole axis away, leaving
/// the output empty along that axis.
///
/// # Errors
///
/// can raise `AveragingError::ZeroFactor` if either factor is zero.
pub fn downsample<T>(
    data: ArrayView2<T>,
    time_factor: usize,
    freq_factor: usize,
) -> Result<Array2<f64>, AveragingError>
where
    T: AsPrimitive<f64>,
{
    if time_factor == 0 {
        return Err(AveragingError::ZeroFactor { axis: "time" });
    }
    if freq_factor == 0 {
        return Err(AveragingError::ZeroFactor { axis: "freq" });
    }

    let (num_timesteps, num_channels) = data.dim();
    let downsampled_dims = (num_timesteps / time_factor, num_channels / freq_factor);
    let mut downsampled = Array2::<f64>::zeros(downsampled_dims);
    let tile_size = (time_factor * freq_factor) as f64;

    // iterate through the time axis in chunks of size `time_factor`. The
    // output has one row per *full* chunk, so a ragged tail chunk is never
    // visited.
    for (data_timestep_chunk, mut downsampled_timestep_view) in izip!(
        data.axis_chunks_iter(Axis(0), time_factor),
        downsampled.outer_iter_mut(),
    ) {
        // iterate through the frequency axis in chunks of size `freq_factor`.
        for (tile, downsampled_elem) in izip!(
            data_timestep_chunk.axis_chunks_iter(Axis(1), freq_factor),
            downsampled_timestep_view.iter_mut(),
        ) {
            let mut sum = 0.0;
            for &value in tile.iter() {
                sum += value.as_();
            }
            *downsampled_elem = sum / tile_size;
        }
    }

    Ok(downsampled)
}

/// Downsample a coordinate array by averaging `factor` consecutive values,
/// trimming any ragged tail.
///
/// `axis` names the coordinate's axis for error reporting.
///
/// # Errors
///
/// can raise `AveragingError::ZeroFactor` if `factor` is zero.
pub fn downsample_coords(
    coords: ArrayView1<f64>,
    axis: &'static str,
    factor: usize,
) -> Result<Array1<f64>, AveragingError> {
    if factor == 0 {
        return Err(AveragingError::ZeroFactor { axis });
    }

    let num_blocks = coords.len() / factor;
    let mut downsampled = Array1::<f64>::zeros(num_blocks);

    for (coord_block, downsampled_elem) in izip!(
        coords.axis_chunks_iter(Axis(0), factor),
        downsampled.iter_mut(),
    ) {
        *downsampled_elem = coord_block.sum() / factor as f64;
    }

    Ok(downsampled)
}
