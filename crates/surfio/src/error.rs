//! Export errors.

use surfio_brep::BrepError;
use surfio_iges::IgesError;
use surfio_nurbs::SurfaceError;
use surfio_step::StepError;
use thiserror::Error;

/// Errors that abort an export. Nothing is written to disk unless the
/// failure happened during the final file write.
#[derive(Debug, Error)]
pub enum ExportError {
    /// No surfaces were supplied.
    #[error("no surfaces supplied")]
    EmptyInput,

    /// A surface failed validation.
    #[error("surface {index} is invalid")]
    InvalidSurface {
        /// Position of the surface in the input list.
        index: usize,
        /// The validation failure.
        #[source]
        source: SurfaceError,
    },

    /// The kernel rejected the converted surface data.
    #[error("conversion to the face compound failed")]
    Conversion(#[source] BrepError),

    /// Transfer produced no exportable shape (every face was skipped).
    #[error("transfer produced no exportable shape")]
    Transfer,

    /// Writing the output file failed.
    #[error("failed to write output file")]
    Write(#[from] std::io::Error),
}

impl From<BrepError> for ExportError {
    fn from(err: BrepError) -> Self {
        match err {
            BrepError::EmptyInput => Self::EmptyInput,
            BrepError::InvalidSurface { index, source } => Self::InvalidSurface { index, source },
            other => Self::Conversion(other),
        }
    }
}

impl From<StepError> for ExportError {
    fn from(err: StepError) -> Self {
        match err {
            StepError::EmptyCompound => Self::Transfer,
            StepError::Io(source) => Self::Write(source),
        }
    }
}

impl From<IgesError> for ExportError {
    fn from(err: IgesError) -> Self {
        match err {
            IgesError::EmptyCompound => Self::Transfer,
            IgesError::Io(source) => Self::Write(source),
        }
    }
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
