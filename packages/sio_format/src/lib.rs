//! A reentrant, async-signal-safe printf-family formatted-output engine, modeled on
//! the `sio_printf` family from Randal Bryant and David O'Hallaron's CS:APP "Computer
//! Systems: A Programmer's Perspective" support code.
//!
//! Signal handlers may not call `malloc`, may not take locks that ordinary code might
//! already hold, and may not touch C's (or Rust's) buffered stdio, since all three can
//! deadlock or corrupt state if the signal arrived while the same code was already
//! running. The usual [`std::fmt`]/`println!` machinery relies on all three. This
//! crate instead builds formatted output directly into a caller-supplied buffer or
//! straight out to a file descriptor, using no heap allocation and no locking.
//!
//! # What is implemented
//!
//! - [`interp::format`]: the format-string interpreter, supporting `%d`/`%i`, `%u`,
//!   `%o`, `%x`, `%c`, `%s`, `%p`, `%f`, and `%%`, the `l`/`ll`/`z` length modifiers,
//!   a `-` left-justify flag, and `*`/`.* ` width/precision taken from the argument
//!   list (never from digits embedded in the format string).
//! - [`fd_sink::FdSink`] and [`buffer_sink::BufferSink`]: the two
//!   [`sink::Sink`] implementations, writing to a raw file descriptor or an in-memory
//!   buffer respectively.
//! - [`print`], [`fprint`], [`eprint`], and [`sprint`]: convenience entry points
//!   mirroring `sio_printf`, `sio_dprintf`, `sio_eprintf`, and `sio_snprintf`.
//!
//! # What is deliberately not implemented
//!
//! There is no locale support, no thousands-grouping, no wide-character conversions,
//! no `%e`/`%g`/`%a` scientific or shortest-round-trip float formatting, and no
//! `+`/` `/`#`/`0` flags. `%f` always emits the exact decimal expansion of the
//! floating-point value, never a shortened approximation, relying on
//! [`sio_bignum::dragon`] for that exactness.
//!
//! # Logging
//!
//! Like its sibling numeric crate, this crate uses the [`log`] crate to report
//! diagnostics to any interested consumer: a `trace` event for every conversion the
//! interpreter performs, a `warn` before a format string is rejected as malformed, and
//! an `error` immediately before a fatal invariant violation aborts the process.
//!
//! # Fatal invariants
//!
//! A small number of conditions — an argument list shorter than the format string
//! demands, a conversion specifier somehow bypassing validation — are programmer
//! errors rather than recoverable runtime failures, and are handled by
//! [`sio_fatal!`] logging a diagnostic and calling [`std::process::abort`], the same
//! way `csapp.c`'s `__sio_assert_fail` does, rather than by returning a [`SioError`].

#![forbid(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]
#![deny(non_ascii_idents)]
#![deny(clippy::print_stdout)]
#![warn(explicit_outlives_requirements)]
#![warn(noop_method_call)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_qualifications)]
#![warn(variant_size_differences)]
#![warn(clippy::enum_glob_use)]
#![warn(clippy::float_cmp_const)]
#![warn(clippy::use_self)]
#![warn(clippy::used_underscore_binding)]

pub mod args;
pub mod buffer_sink;
pub mod error;
#[cfg(feature = "std")]
pub mod fd_sink;
pub mod float_fmt;
pub mod interp;
pub mod sink;

pub use args::FormatArg;
pub use error::{SioError, SioResult};
#[cfg(feature = "std")]
pub use fd_sink::FdSink;
pub use buffer_sink::BufferSink;
pub use sink::Sink;

/// A text tag that precisely identifies this `sio_format` build.
pub static SIO_FORMAT_VERSION_TAG: &str = concat!(
	"sio_format ",
	env!("SIO_FORMAT_VERSION"),
	" (",
	env!("SIO_FORMAT_BUILD_DATE_VERSION_SUFFIX"),
	")"
);

/// Logs `$reason` at `error` level to the process's standard error, then aborts.
///
/// Used for invariant violations that indicate a bug in the caller (or in this crate)
/// rather than a malformed format string or a failing sink, neither of which this
/// macro is for — those report a [`SioError`] instead. Mirrors `__sio_assert_fail`,
/// which likewise writes a diagnostic with the signal-safe I/O primitives and then
/// calls `_exit`/`abort` rather than unwinding.
#[macro_export]
macro_rules! sio_fatal {
	($($arg:tt)*) => {{
		log::error!($($arg)*);
		std::process::abort()
	}};
}

/// Aborts via [`sio_fatal!`] if `$cond` is false.
#[macro_export]
macro_rules! sio_assert {
	($cond:expr, $($arg:tt)*) => {
		if !$cond {
			$crate::sio_fatal!($($arg)*);
		}
	};
}

#[cfg(feature = "std")]
use crate::fd_sink::FdSink;
use crate::buffer_sink::BufferSink;
use crate::sink::Sink;

/// Formats `fmt` with `args` to standard output (fd 1), the way `sio_printf` does.
#[cfg(feature = "std")]
pub fn print(fmt: &[u8], args: &[FormatArg<'_>]) -> SioResult<usize> {
	let mut sink = FdSink::stdout();
	interp::format(&mut sink, fmt, args)
}

/// Formats `fmt` with `args` to the given raw file descriptor, the way `sio_dprintf`
/// does.
#[cfg(feature = "std")]
pub fn fprint(fd: std::os::fd::RawFd, fmt: &[u8], args: &[FormatArg<'_>]) -> SioResult<usize> {
	let mut sink = FdSink::new(fd);
	interp::format(&mut sink, fmt, args)
}

/// Formats `fmt` with `args` to standard error (fd 2), the way `sio_eprintf` does.
#[cfg(feature = "std")]
pub fn eprint(fmt: &[u8], args: &[FormatArg<'_>]) -> SioResult<usize> {
	let mut sink = FdSink::stderr();
	interp::format(&mut sink, fmt, args)
}

/// Formats `fmt` with `args` into `buf`, NUL-terminating within `buf`'s capacity, the
/// way `sio_snprintf` does. Returns the number of bytes the formatted output *would*
/// have needed in total, independent of `buf`'s capacity, the way `snprintf`'s return
/// value reports the untruncated length rather than how much actually fit — compare
/// [`BufferSink::written_len`] for how much of that actually landed in `buf`.
pub fn sprint(buf: &mut [u8], fmt: &[u8], args: &[FormatArg<'_>]) -> SioResult<usize> {
	let mut sink = BufferSink::new(buf);
	let total = interp::format(&mut sink, fmt, args)?;
	sink.finish();
	Ok(total)
}
