//! A stand-in for C's `va_list`: a tagged variant for every argument type this
//! engine's conversions accept, plus a macro that builds an argument array without
//! the caller having to name [`FormatArg`]'s variants by hand.

/// One formatting argument, tagged with enough type information for
/// [`crate::interp::format`] to dispatch to the right conversion.
///
/// Widths narrower than the tag's own (`i32`, `u32`) are sign- or zero-extended into
/// the tag on construction, the same promotion `intmax_to_string`/`uintmax_to_string`
/// apply to every integer size modifier before converting it.
#[derive(Clone, Copy, Debug)]
pub enum FormatArg<'a> {
	/// A signed integer, for `%d`/`%i`/`%o`/`%x` with no size modifier or `l`/`ll`/`z`,
	/// and also for the `int` argument a literal `*` or `.* ` pops for a width or
	/// precision (negative ⇒ left-justify for `*`, unspecified for `.* `).
	Signed(i64),
	/// An unsigned integer, for `%u`/`%o`/`%x` with no size modifier or `l`/`ll`/`z`,
	/// or equally valid as the `int` argument behind a `*`/`.* ` width or precision.
	Unsigned(u64),
	/// A binary64 float, for `%f`.
	Float(f64),
	/// A byte-string, for `%s`. Not required to be NUL-terminated; the caller supplies
	/// the exact slice to copy.
	Str(&'a [u8]),
	/// A raw pointer value, for `%p`; `None` represents a null pointer.
	Ptr(Option<*const ()>),
	/// A single byte, for `%c`.
	Char(u8)
}

impl From<i32> for FormatArg<'_> {
	fn from(v: i32) -> Self {
		FormatArg::Signed(v as i64)
	}
}

impl From<i64> for FormatArg<'_> {
	fn from(v: i64) -> Self {
		FormatArg::Signed(v)
	}
}

impl From<isize> for FormatArg<'_> {
	fn from(v: isize) -> Self {
		FormatArg::Signed(v as i64)
	}
}

impl From<u32> for FormatArg<'_> {
	fn from(v: u32) -> Self {
		FormatArg::Unsigned(v as u64)
	}
}

impl From<u64> for FormatArg<'_> {
	fn from(v: u64) -> Self {
		FormatArg::Unsigned(v)
	}
}

impl From<usize> for FormatArg<'_> {
	fn from(v: usize) -> Self {
		FormatArg::Unsigned(v as u64)
	}
}

impl From<f64> for FormatArg<'_> {
	fn from(v: f64) -> Self {
		FormatArg::Float(v)
	}
}

impl<'a> From<&'a str> for FormatArg<'a> {
	fn from(v: &'a str) -> Self {
		FormatArg::Str(v.as_bytes())
	}
}

impl<'a> From<&'a [u8]> for FormatArg<'a> {
	fn from(v: &'a [u8]) -> Self {
		FormatArg::Str(v)
	}
}

impl From<*const ()> for FormatArg<'_> {
	fn from(v: *const ()) -> Self {
		FormatArg::Ptr(if v.is_null() { None } else { Some(v) })
	}
}

/// Builds a `&[FormatArg]` from a mixed list of values that implement
/// `Into<FormatArg>`, the ergonomic equivalent of a C variadic call.
///
/// ```
/// use sio_format::{sio_args, interp::format, buffer_sink::BufferSink};
///
/// let mut buf = [0u8; 64];
/// let mut sink = BufferSink::new(&mut buf);
/// format(&mut sink, b"%s has %d item(s)", &sio_args![b"cart".as_slice(), 3]).unwrap();
/// ```
#[macro_export]
macro_rules! sio_args {
	($($arg:expr),* $(,)?) => {
		[$($crate::args::FormatArg::from($arg)),*]
	};
}
