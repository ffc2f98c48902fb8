use std::io;
use std::path::PathBuf;

use rootcause::Report;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ErrorKind {
    #[error("directory '{}' does not exist.", path.display())]
    SearchDirNotFound { path: PathBuf },
    #[error("materials folder '{}' does not exist.", path.display())]
    MaterialsDirNotFound { path: PathBuf },
    #[error("QC file '{}' does not exist.", path.display())]
    QcNotFound { path: PathBuf },
    #[error("I/O error on '{}': {err}", path.display())]
    Io { path: PathBuf, err: io::Error },
    #[error("invalid search pattern: {err}")]
    Pattern {
        #[from]
        err: glob::PatternError,
    },
    #[error("'{}' is not inside the materials folder '{}'", path.display(), root.display())]
    OutsideMaterialsRoot { path: PathBuf, root: PathBuf },
    #[cfg(feature = "json")]
    #[error("Error serializing json: {err}")]
    SerdeJson {
        #[from]
        err: serde_json::Error,
    },
}

impl ErrorKind {
    /// Whether this error comes from validating the run's input arguments.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ErrorKind::SearchDirNotFound { .. }
                | ErrorKind::MaterialsDirNotFound { .. }
                | ErrorKind::QcNotFound { .. }
        )
    }
}

pub type IResult<T> = Result<T, Report<ErrorKind>>;

/// Wraps an I/O error with the path it happened on.
pub fn io_failure(path: impl Into<PathBuf>, err: io::Error) -> Report<ErrorKind> {
    Report::new(ErrorKind::Io {
        path: path.into(),
        err,
    })
}
