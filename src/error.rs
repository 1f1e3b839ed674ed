//! Error kinds surfaced by the palette core.
//!
//! None of these are fatal: navigation errors go back to the caller, dictionary
//! problems degrade search to "no descriptions", and install failures become a
//! user-visible notice while the previous dictionary stays in place.

use std::path::PathBuf;

use crate::catalog::CategoryId;

/// Convenience alias used across the library.
pub type Result<T> = std::result::Result<T, PaletteError>;

/// What: Every failure the palette core can report.
///
/// Details:
/// - `CategoryNotFound` and `DownloadInstallFailed` are the kinds callers are expected to match on.
/// - `DictionaryFormat` and `Io` are produced by the dictionary store and usually folded into
///   `DownloadInstallFailed` or logged and degraded to `DictionaryUnavailable`.
#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    /// Navigation targeted a category that is not currently shown.
    #[error("category {0} is not shown")]
    CategoryNotFound(CategoryId),
    /// No ready dictionary exists for the requested locale.
    #[error("no emoji dictionary available for locale `{locale}`")]
    DictionaryUnavailable {
        /// Locale that was requested.
        locale: String,
    },
    /// A downloaded dictionary could not be moved into the cache or opened.
    #[error("failed to install emoji dictionary for `{locale}`: {reason}")]
    DownloadInstallFailed {
        /// Locale the download targeted.
        locale: String,
        /// Human-readable cause.
        reason: String,
    },
    /// A dictionary file exists but its content could not be parsed.
    #[error("invalid dictionary {}: {reason}", path.display())]
    DictionaryFormat {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },
    /// The emoji catalog is malformed (duplicate ids, reserved id, bad JSON).
    #[error("invalid emoji catalog: {0}")]
    Catalog(String),
    /// Filesystem failure with a short description of what was attempted.
    #[error("{context}: {source}")]
    Io {
        /// What the code was doing when the error happened.
        context: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl PaletteError {
    /// What: Wrap an I/O error with a context message.
    ///
    /// Inputs:
    /// - `context`: Short description such as "write dictionary".
    /// - `source`: Original error.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
