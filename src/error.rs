// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Crate-wide error type.

use thiserror::Error;

use crate::{averaging::AveragingError, io::IoError};

/// All the errors that can occur when producing a dynamic spectrum.
#[derive(Error, Debug)]
pub enum DynspecError {
    #[error(transparent)]
    /// Error derived from [`crate::io::IoError`]
    Io(#[from] IoError),

    #[error(transparent)]
    /// Error derived from [`crate::averaging::AveragingError`]
    Averaging(#[from] AveragingError),
}
