//! The error type returned by every entry point in this crate.
//!
//! Two, and only two, conditions ever produce an `Err`: the sink rejected a write (an
//! [`SioError::Io`]), or the format string itself was malformed (an
//! [`SioError::InvalidFormat`]). Anything beyond that — an out-of-bounds big-integer
//! operation, an unreachable match arm in the interpreter — is a programmer error and
//! is handled by [`crate::sio_fatal`] aborting the process, never by this type.

/// Errors produced while formatting or writing formatted output.
///
/// Mirrors the two ways `sio_vformat` in the original C implementation could fail: a
/// malformed format string (a bad conversion specifier) or a failed write to the
/// underlying sink. Either one causes the whole call to report failure, discarding any
/// byte count already produced, matching spec.md's "a format error always yields the
/// error outcome regardless of how many bytes were already emitted" rule.
#[derive(Debug, thiserror::Error)]
pub enum SioError {
	/// The underlying [`crate::sink::Sink`] failed to accept bytes already formatted.
	#[error("sink write failed: {0}")]
	Io(#[from] std::io::Error),

	/// The format string referenced an unsupported or malformed conversion specifier.
	#[error("invalid format string: {0}")]
	InvalidFormat(&'static str),
}

/// The result type every formatting entry point in this crate returns.
pub type SioResult<T> = Result<T, SioError>;
