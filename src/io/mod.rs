// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reading of voltage dump files.
//!
//! A dump is a netCDF file holding a four dimensional `voltages` variable
//! with dimensions `time`, `freq`, `pol` and `reim` (in any order on disk)
//! and `i8` samples. `reim` index 0 holds the real component of each sample
//! and index 1 the imaginary component; `pol` holds the two receiver
//! polarizations. Dumps may also record 1-D numeric `time` and `freq`
//! coordinate variables, which are carried into the output as axis labels.
//! The writer labels the `reim` indices with an NC_STRING coordinate for the
//! benefit of other tooling; those labels are informational and are not
//! consulted here.

pub mod error;

use std::ops::Range;
use std::path::{Path, PathBuf};

use log::{debug, trace};
use ndarray::{Array1, Array2, Array3, Array4, Axis, Zip};

use crate::{
    averaging::{downsample, downsample_coords},
    constants::{
        DEFAULT_TIME_CHUNKS, FREQ_DIM, NUM_POLS, NUM_REIMS, POL_DIM, REIM_DIM, TIME_DIM,
        VOLTAGES_VAR,
    },
    context::VoltageContext,
    error::DynspecError,
    spectrum::DynamicSpectrum,
    stokes, ComplexByte,
};
pub use error::IoError;

/// Where each canonical dump dimension sits in the on-disk `voltages`
/// variable.
#[derive(Clone, Copy, Debug)]
struct AxisMap {
    time: usize,
    freq: usize,
    pol: usize,
    reim: usize,
}

impl AxisMap {
    /// The permutation taking an array in on-disk dimension order to the
    /// canonical `(time, freq, pol, reim)` order.
    fn canonical_order(&self) -> [usize; 4] {
        [self.time, self.freq, self.pol, self.reim]
    }
}

/// An opened, schema-checked voltage dump.
pub struct VoltageDump {
    file: netcdf::File,
    path: PathBuf,
    axes: AxisMap,
    context: VoltageContext,
}

impl VoltageDump {
    /// Open a dump file and validate its schema.
    ///
    /// Checks that a `voltages` variable exists, that it has exactly the
    /// four dimensions `time`, `freq`, `pol` and `reim` (in any order), and
    /// that `pol` and `reim` both have length 2. The optional `time` and
    /// `freq` coordinate variables are read into the context when present.
    ///
    /// # Errors
    ///
    /// can raise `IoError::Open` if the file can't be opened, or one of the
    /// schema errors described above.
    pub fn open(file_name: &Path) -> Result<VoltageDump, IoError> {
        let file = netcdf::open(file_name).map_err(|err| IoError::Open {
            file: file_name.to_path_buf(),
            err,
        })?;

        let (axes, num_timesteps, num_channels) = resolve_axes(&file, file_name)?;
        debug!(
            "opened {:?}: {} timesteps, {} channels, time axis at position {}",
            file_name, num_timesteps, num_channels, axes.time
        );

        let times = read_coords(&file, TIME_DIM, num_timesteps)?;
        let freqs = read_coords(&file, FREQ_DIM, num_channels)?;

        Ok(VoltageDump {
            file,
            path: file_name.to_path_buf(),
            axes,
            context: VoltageContext {
                num_timesteps,
                num_channels,
                times,
                freqs,
            },
        })
    }

    /// The dump's metadata.
    pub fn context(&self) -> &VoltageContext {
        &self.context
    }

    /// Compute the Stokes I dynamic spectrum of the whole dump, in exact
    /// integer arithmetic.
    ///
    /// The `time` axis is read in chunks of `time_chunks` timesteps
    /// ([`DEFAULT_TIME_CHUNKS`] is a good default); the chunk size bounds
    /// memory use and has no effect on the result.
    ///
    /// # Errors
    ///
    /// can raise `IoError::ZeroTimeChunks` for a zero chunk size,
    /// `IoError::InsufficientMemory` if the output can't be allocated, or a
    /// netCDF error from reading.
    pub fn stokes_i(&self, time_chunks: usize) -> Result<Array2<i32>, IoError> {
        if time_chunks == 0 {
            return Err(IoError::ZeroTimeChunks);
        }
        trace!("start stokes_i on {:?}", self.path);

        let mut stokes = Self::allocate_stokes(self.context.dims())?;
        let voltages = self.voltages_variable()?;
        for (chunk_index, stokes_chunk) in stokes
            .axis_chunks_iter_mut(Axis(0), time_chunks)
            .enumerate()
        {
            let start = chunk_index * time_chunks;
            let end = start + stokes_chunk.nrows();
            let chunk = self.read_chunk(&voltages, start..end)?;
            stokes::stokes_i_into(
                chunk.view().permuted_axes(self.axes.canonical_order()),
                stokes_chunk,
            );
        }

        trace!("end stokes_i on {:?}", self.path);
        Ok(stokes)
    }

    /// Read the raw complex voltage samples of the whole dump.
    ///
    /// The returned array has dimensions `[timestep][channel][pol]`, with
    /// the `reim` components of each sample re-paired into a
    /// [`ComplexByte`].
    ///
    /// # Errors
    ///
    /// can raise `IoError::InsufficientMemory` if the sample array can't be
    /// allocated, or a netCDF error from reading.
    pub fn read_voltages(&self) -> Result<Array3<ComplexByte>, IoError> {
        trace!("start read_voltages on {:?}", self.path);

        let (num_timesteps, num_channels) = self.context.dims();
        let mut samples = Self::allocate_samples((num_timesteps, num_channels, NUM_POLS))?;
        let voltages = self.voltages_variable()?;
        for (chunk_index, mut samples_chunk) in samples
            .axis_chunks_iter_mut(Axis(0), DEFAULT_TIME_CHUNKS)
            .enumerate()
        {
            let start = chunk_index * DEFAULT_TIME_CHUNKS;
            let end = start + samples_chunk.shape()[0];
            let chunk = self.read_chunk(&voltages, start..end)?;
            let canonical = chunk.view().permuted_axes(self.axes.canonical_order());
            Zip::from(&mut samples_chunk)
                .and(canonical.lanes(Axis(3)))
                .for_each(|sample, components| {
                    *sample = ComplexByte::new(components[0], components[1]);
                });
        }

        trace!("end read_voltages on {:?}", self.path);
        Ok(samples)
    }

    fn voltages_variable(&self) -> Result<netcdf::Variable<'_>, IoError> {
        self.file
            .variable(VOLTAGES_VAR)
            .ok_or_else(|| IoError::MissingVoltages {
                file: self.path.clone(),
            })
    }

    /// Read `time_range` of the `voltages` variable, in on-disk dimension
    /// order.
    fn read_chunk(
        &self,
        voltages: &netcdf::Variable,
        time_range: Range<usize>,
    ) -> Result<Array4<i8>, IoError> {
        let mut shape = [0_usize; 4];
        for (position, dim) in voltages.dimensions().iter().enumerate() {
            shape[position] = dim.len();
        }
        shape[self.axes.time] = time_range.len();

        let values = match self.axes.time {
            0 => voltages.get_values::<i8, _>((time_range, .., .., ..))?,
            1 => voltages.get_values::<i8, _>((.., time_range, .., ..))?,
            2 => voltages.get_values::<i8, _>((.., .., time_range, ..))?,
            _ => voltages.get_values::<i8, _>((.., .., .., time_range))?,
        };

        Ok(Array4::from_shape_vec(shape, values)?)
    }

    /// Allocate the Stokes I array for a dump with the given dimensions.
    ///
    /// # Errors
    ///
    /// can raise `IoError::InsufficientMemory` if not enough memory.
    fn allocate_stokes(shape: (usize, usize)) -> Result<Array2<i32>, IoError> {
        let num_elems = shape.0 * shape.1;
        let mut v = Vec::new();

        if v.try_reserve_exact(num_elems) == Ok(()) {
            // Make the vector's length equal to its new capacity.
            v.resize(num_elems, 0_i32);
            Ok(Array2::from_shape_vec(shape, v).unwrap())
        } else {
            let need_gib = num_elems * std::mem::size_of::<i32>() / 1024_usize.pow(3);
            Err(IoError::InsufficientMemory { need_gib })
        }
    }

    /// Allocate the complex sample array for a dump with the given
    /// dimensions.
    ///
    /// # Errors
    ///
    /// can raise `IoError::InsufficientMemory` if not enough memory.
    fn allocate_samples(shape: (usize, usize, usize)) -> Result<Array3<ComplexByte>, IoError> {
        let num_elems = shape.0 * shape.1 * shape.2;
        let mut v = Vec::new();

        if v.try_reserve_exact(num_elems) == Ok(()) {
            // Make the vector's length equal to its new capacity.
            v.resize(num_elems, ComplexByte::new(0, 0));
            Ok(Array3::from_shape_vec(shape, v).unwrap())
        } else {
            let need_gib = num_elems * std::mem::size_of::<ComplexByte>() / 1024_usize.pow(3);
            Err(IoError::InsufficientMemory { need_gib })
        }
    }
}

/// Find the positions and lengths of the canonical dimensions of the
/// `voltages` variable.
fn resolve_axes(file: &netcdf::File, file_name: &Path) -> Result<(AxisMap, usize, usize), IoError> {
    let voltages = file
        .variable(VOLTAGES_VAR)
        .ok_or_else(|| IoError::MissingVoltages {
            file: file_name.to_path_buf(),
        })?;

    let dims = voltages.dimensions();
    if dims.len() != 4 {
        return Err(IoError::BadDimensionCount {
            file: file_name.to_path_buf(),
            num_dims: dims.len(),
        });
    }

    let mut time = None;
    let mut freq = None;
    let mut pol = None;
    let mut reim = None;
    for (position, dim) in dims.iter().enumerate() {
        let name = dim.name();
        if name == TIME_DIM {
            time = Some((position, dim.len()));
        } else if name == FREQ_DIM {
            freq = Some((position, dim.len()));
        } else if name == POL_DIM {
            pol = Some((position, dim.len()));
        } else if name == REIM_DIM {
            reim = Some((position, dim.len()));
        }
    }

    let missing = |dim| IoError::MissingDimension {
        file: file_name.to_path_buf(),
        dim,
    };
    let (time_position, num_timesteps) = time.ok_or_else(|| missing(TIME_DIM))?;
    let (freq_position, num_channels) = freq.ok_or_else(|| missing(FREQ_DIM))?;
    let (pol_position, num_pols) = pol.ok_or_else(|| missing(POL_DIM))?;
    let (reim_position, num_reims) = reim.ok_or_else(|| missing(REIM_DIM))?;

    if num_pols != NUM_POLS {
        return Err(IoError::BadDimensionLength {
            file: file_name.to_path_buf(),
            dim: POL_DIM,
            expected: NUM_POLS,
            received: num_pols,
        });
    }
    if num_reims != NUM_REIMS {
        return Err(IoError::BadDimensionLength {
            file: file_name.to_path_buf(),
            dim: REIM_DIM,
            expected: NUM_REIMS,
            received: num_reims,
        });
    }

    Ok((
        AxisMap {
            time: time_position,
            freq: freq_position,
            pol: pol_position,
            reim: reim_position,
        },
        num_timesteps,
        num_channels,
    ))
}

/// Read a 1-D numeric coordinate variable, when the dump has one.
fn read_coords(
    file: &netcdf::File,
    name: &str,
    expected_len: usize,
) -> Result<Option<Array1<f64>>, IoError> {
    let coords = match file.variable(name) {
        Some(coords) => coords,
        None => return Ok(None),
    };
    let values = coords.get_values::<f64, _>(..)?;
    if values.len() != expected_len {
        debug!(
            "ignoring `{}` coordinates: expected {} values, found {}",
            name,
            expected_len,
            values.len()
        );
        return Ok(None);
    }
    Ok(Some(Array1::from_vec(values)))
}

/// Read a voltage dump and convert it to Stokes I intensity.
///
/// Opens `file_name`, forms `re² + im²` summed over both polarizations for
/// every `(time, freq)` cell in exact `i32` arithmetic, then block-averages
/// the result in time and frequency with a trim boundary. Coordinate labels
/// recorded by the dump are carried through, averaged in lockstep with the
/// data. The result is materialised eagerly; the chunked read keeps peak
/// memory at one voltage chunk plus the output array.
///
/// `time_downsample`/`freq_downsample` - optional averaging factors. `None`
///     (or `Some(1)`) leaves the axis untouched. A factor larger than the
///     axis length trims the whole axis away, leaving it empty.
///
/// `time_chunks` - how many timesteps to materialise per read
///     ([`DEFAULT_TIME_CHUNKS`] is a good default). Affects memory use only,
///     never the result.
///
/// # Errors
///
/// can raise an [`IoError`] for schema or read problems, or an
/// [`AveragingError`](crate::averaging::AveragingError) for a zero
/// downsampling factor.
pub fn read_voltage_as_stokes_i(
    file_name: &Path,
    time_downsample: Option<usize>,
    freq_downsample: Option<usize>,
    time_chunks: usize,
) -> Result<DynamicSpectrum, DynspecError> {
    let dump = VoltageDump::open(file_name)?;
    let stokes = dump.stokes_i(time_chunks)?;

    let time_factor = time_downsample.unwrap_or(1);
    let freq_factor = freq_downsample.unwrap_or(1);
    debug!(
        "downsampling by {} in time, {} in freq",
        time_factor, freq_factor
    );
    let stokes_i = downsample(stokes.view(), time_factor, freq_factor)?;

    let context = dump.context();
    let times = match &context.times {
        Some(times) => Some(downsample_coords(times.view(), "time", time_factor)?),
        None => None,
    };
    let freqs = match &context.freqs {
        Some(freqs) => Some(downsample_coords(freqs.view(), "freq", freq_factor)?),
        None => None,
    };

    Ok(DynamicSpectrum {
        stokes_i,
        times,
        freqs,
    })
}
