//! Error types for Protect It!

use thiserror::Error;

use crate::fingerprint::{FingerprintKind, Surface};

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// QR matrix could not be built for the payload
    #[error("QR encoding failed: {0}")]
    Qr(#[from] qrcode::types::QrError),

    /// The code needs more pixels than the surface has
    #[error("{modules} modules do not fit in a {size}px surface")]
    SurfaceTooSmall { modules: usize, size: u32 },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, Error>;

/// A fingerprint render that did not complete.
///
/// `fallback` is what the renderer wants displayed in place of the
/// failed surface, if anything.
#[derive(Error, Debug)]
#[error("{kind} error:\n{source}")]
pub struct RenderFailure {
    pub kind: FingerprintKind,
    #[source]
    pub source: Error,
    pub fallback: Option<Surface>,
}
