//! The format-string interpreter: walks a format string byte by byte, coalescing
//! literal runs into single sink writes and dispatching `%`-conversions to the
//! integer, string, pointer, and float formatters, the way `csapp.c`'s `sio_vformat`
//! does.
//!
//! Literal text between conversions is located the same way `sio_vformat` finds it
//! with `strcspn(fmt, "%")`: scan forward for the next `%` (or the end of the string)
//! and hand the whole run to the sink in one call, rather than writing byte by byte.

use crate::args::FormatArg;
use crate::error::{SioError, SioResult};
use crate::float_fmt::{self, DEFAULT_PRECISION};
use crate::sink::Sink;
use sio_bignum::itoa::{self, Base};

/// Interprets `fmt`, substituting `args` into its `%`-conversions, and writes the
/// result to `sink`. Returns the total number of bytes written on success, counting
/// bytes from every sink write including ones that happened before a later sink
/// failure truncated the call.
///
/// A malformed conversion specifier yields [`SioError::InvalidFormat`] immediately;
/// per spec, any bytes already written before the error was detected are *not*
/// undone, but the byte count is discarded along with everything else in the `Err`.
/// Running out of arguments for a conversion that needs one, by contrast, is treated
/// as a programmer error and aborts the process via [`crate::sio_fatal!`], the same
/// way `csapp.c` inherits C's undefined behavior for too few varargs rather than
/// detecting it at runtime would be unable to.
pub fn format(sink: &mut dyn Sink, fmt: &[u8], args: &[FormatArg<'_>]) -> SioResult<usize> {
	let mut written = 0usize;
	let mut arg_index = 0usize;
	let mut i = 0usize;

	while i < fmt.len() {
		let run_start = i;
		while i < fmt.len() && fmt[i] != b'%' {
			i += 1;
		}
		if i > run_start {
			written += sink.write_padded(b' ', 0, &fmt[run_start..i], 0)?;
		}

		if i == fmt.len() {
			break;
		}

		// `fmt[i]` is '%'.
		if i + 1 == fmt.len() {
			// A bare trailing '%' is not a format error: emit it literally.
			written += sink.write_padded(b' ', 0, b"%", 0)?;
			break;
		}
		i += 1;

		let spec_start = i;
		let mut left_justify = false;
		while i < fmt.len() {
			match fmt[i] {
				b'-' => {
					left_justify = true;
					i += 1;
				}
				b'+' | b' ' | b'#' | b'0' => {
					log::warn!("unsupported flag '{}' in format string", fmt[i] as char);
					return Err(SioError::InvalidFormat(
						"the '+', ' ', '#', and '0' flags are not supported"
					));
				}
				_ => break
			}
		}

		// Width comes only from a literal `*`, consuming an `int` argument from
		// `args` (negative ⇒ left-align with the magnitude as the field width);
		// there is no embedded-digit width syntax, matching spec.md §4.I/§6.
		let mut width = 0usize;
		if i < fmt.len() && fmt[i] == b'*' {
			i += 1;
			let w = width_or_precision_arg(args, &mut arg_index, "width");
			if w < 0 {
				left_justify = true;
				width = w.unsigned_abs() as usize;
			} else {
				width = w as usize;
			}
		}

		// Precision likewise comes only from a literal `.*`, consuming a second
		// `int` argument; a negative value means "unspecified", same as an absent
		// precision. A bare `.` with no following `*` is a format error.
		let mut precision = None;
		if i < fmt.len() && fmt[i] == b'.' {
			i += 1;
			if i < fmt.len() && fmt[i] == b'*' {
				i += 1;
				let p = width_or_precision_arg(args, &mut arg_index, "precision");
				if p >= 0 {
					precision = Some(p as usize);
				}
			} else {
				log::warn!("'.' not followed by '*' in format string");
				return Err(SioError::InvalidFormat(
					"precision must be given as '.*', not embedded digits"
				));
			}
		}

		// Length modifier: "ll", "l", or "z". Parsed for format-string compatibility
		// with the original C call sites; every integer argument already arrives
		// promoted to i64/u64 in a `FormatArg`, so the modifier has no further effect
		// on the conversion itself.
		if i < fmt.len() && fmt[i] == b'l' {
			i += 1;
			if i < fmt.len() && fmt[i] == b'l' {
				i += 1;
			}
		} else if i < fmt.len() && fmt[i] == b'z' {
			i += 1;
		}

		if i == fmt.len() {
			log::warn!("format string ended inside a conversion specifier");
			return Err(SioError::InvalidFormat(
				"conversion specifier is missing its conversion character"
			));
		}

		let conversion = fmt[i];
		i += 1;

		log::trace!(
			"conversion '%{}' at byte {}, width={}, precision={:?}",
			conversion as char,
			spec_start - 1,
			width,
			precision
		);

		if conversion == b'%' {
			written += sink.write_padded(b' ', 0, b"%", 0)?;
			continue;
		}

		written += dispatch(
			sink,
			conversion,
			width,
			precision,
			left_justify,
			args,
			&mut arg_index
		)?;
	}

	Ok(written)
}

/// Pops the next argument as a sign-extended `i64`, for use as a `*`/`.* ` width or
/// precision value. Mismatched argument types are a programmer error, same as any
/// other conversion's argument.
fn width_or_precision_arg(args: &[FormatArg<'_>], arg_index: &mut usize, what: &str) -> i64 {
	match next_arg(args, arg_index) {
		FormatArg::Signed(v) => *v,
		FormatArg::Unsigned(v) => *v as i64,
		other => crate::sio_fatal!("expected an integer argument for '*' {what}, got {other:?}")
	}
}

fn next_arg<'a, 'b>(args: &'b [FormatArg<'a>], arg_index: &mut usize) -> &'b FormatArg<'a> {
	match args.get(*arg_index) {
		Some(arg) => {
			*arg_index += 1;
			arg
		}
		None => crate::sio_fatal!(
			"format string demands more arguments than were supplied (index {})",
			arg_index
		)
	}
}

#[allow(clippy::too_many_arguments)]
fn dispatch(
	sink: &mut dyn Sink,
	conversion: u8,
	width: usize,
	precision: Option<usize>,
	left_justify: bool,
	args: &[FormatArg<'_>],
	arg_index: &mut usize
) -> SioResult<usize> {
	match conversion {
		b'd' | b'i' => {
			let value = match next_arg(args, arg_index) {
				FormatArg::Signed(v) => *v,
				FormatArg::Unsigned(v) => *v as i64,
				other => crate::sio_fatal!("expected an integer argument for '%d', got {other:?}")
			};
			write_padded_digits(sink, width, left_justify, |out| {
				itoa::signed_to_base(value, Base::Decimal, out)
			})
		}
		b'u' => {
			let value = unsigned_arg(args, arg_index);
			write_padded_digits(sink, width, left_justify, |out| {
				itoa::unsigned_to_base(value, Base::Decimal, out)
			})
		}
		b'o' => {
			let value = unsigned_arg(args, arg_index);
			write_padded_digits(sink, width, left_justify, |out| {
				itoa::unsigned_to_base(value, Base::Octal, out)
			})
		}
		b'x' => {
			let value = unsigned_arg(args, arg_index);
			write_padded_digits(sink, width, left_justify, |out| {
				itoa::unsigned_to_base(value, Base::Hex, out)
			})
		}
		b'c' => {
			let byte = match next_arg(args, arg_index) {
				FormatArg::Char(b) => *b,
				FormatArg::Signed(v) => *v as u8,
				FormatArg::Unsigned(v) => *v as u8,
				other => crate::sio_fatal!("expected a character argument for '%c', got {other:?}")
			};
			write_padded(sink, width, left_justify, &[byte])
		}
		b's' => {
			let bytes = match next_arg(args, arg_index) {
				FormatArg::Str(s) => *s,
				other => crate::sio_fatal!("expected a string argument for '%s', got {other:?}")
			};
			let bytes = match precision {
				Some(max_len) => &bytes[..bytes.len().min(max_len)],
				None => bytes
			};
			write_padded(sink, width, left_justify, bytes)
		}
		b'p' => {
			let ptr = match next_arg(args, arg_index) {
				FormatArg::Ptr(p) => *p,
				other => crate::sio_fatal!("expected a pointer argument for '%p', got {other:?}")
			};
			match ptr {
				None => write_padded(sink, width, left_justify, b"(nil)"),
				Some(p) => {
					let mut digits = [0u8; itoa::MAX_DIGITS];
					let len = itoa::unsigned_to_base(p as usize as u64, Base::Hex, &mut digits);
					let mut out = [0u8; itoa::MAX_DIGITS + 2];
					out[0] = b'0';
					out[1] = b'x';
					out[2..2 + len].copy_from_slice(&digits[..len]);
					write_padded(sink, width, left_justify, &out[..2 + len])
				}
			}
		}
		b'f' => {
			let value = match next_arg(args, arg_index) {
				FormatArg::Float(v) => *v,
				other => crate::sio_fatal!("expected a float argument for '%f', got {other:?}")
			};
			float_fmt::format_f64(
				sink,
				value,
				precision.unwrap_or(DEFAULT_PRECISION),
				width,
				left_justify
			)
		}
		_ => {
			log::warn!("unknown conversion character '%{}'", conversion as char);
			Err(SioError::InvalidFormat("unknown conversion character"))
		}
	}
}

fn unsigned_arg(args: &[FormatArg<'_>], arg_index: &mut usize) -> u64 {
	match next_arg(args, arg_index) {
		FormatArg::Unsigned(v) => *v,
		FormatArg::Signed(v) => *v as u64,
		other => crate::sio_fatal!("expected an integer argument, got {other:?}")
	}
}

fn write_padded_digits(
	sink: &mut dyn Sink,
	width: usize,
	left_justify: bool,
	render: impl FnOnce(&mut [u8]) -> usize
) -> SioResult<usize> {
	let mut buf = [0u8; itoa::MAX_DIGITS];
	let len = render(&mut buf);
	write_padded(sink, width, left_justify, &buf[..len])
}

/// Lays out `bytes` within a field of at least `width` columns, padding with spaces
/// on the right (`left_justify`) or the left (the default) in a single
/// [`Sink::write_padded`] call, matching the sink's one-call-per-conversion contract.
fn write_padded(
	sink: &mut dyn Sink,
	width: usize,
	left_justify: bool,
	bytes: &[u8]
) -> SioResult<usize> {
	let pad = width.saturating_sub(bytes.len());
	if left_justify {
		sink.write_padded(b' ', 0, bytes, pad)
	} else {
		sink.write_padded(b' ', pad, bytes, 0)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::buffer_sink::BufferSink;

	fn run(fmt: &[u8], args: &[FormatArg<'_>]) -> String {
		let mut buf = [0u8; 256];
		let mut sink = BufferSink::new(&mut buf);
		format(&mut sink, fmt, args).unwrap();
		let len = sink.finish();
		String::from_utf8(buf[..len].to_vec()).unwrap()
	}

	#[test]
	fn literal_text_with_no_conversions() {
		assert_eq!(run(b"hello, world", &[]), "hello, world");
	}

	#[test]
	fn trailing_bare_percent_is_literal() {
		assert_eq!(run(b"100%", &[]), "100%");
	}

	#[test]
	fn percent_percent_is_literal() {
		assert_eq!(run(b"100%%", &[]), "100%");
	}

	#[test]
	fn signed_minimum_value() {
		assert_eq!(run(b"%d", &[FormatArg::Signed(i64::MIN)]), "-9223372036854775808");
	}

	#[test]
	fn hex_and_octal() {
		assert_eq!(run(b"%x %o", &[FormatArg::Unsigned(255), FormatArg::Unsigned(8)]), "ff 10");
	}

	#[test]
	fn string_and_pointer() {
		assert_eq!(
			run(
				b"%s at %p",
				&[FormatArg::Str(b"value"), FormatArg::Ptr(None)]
			),
			"value at (nil)"
		);
	}

	#[test]
	fn star_width_pads_on_the_left_by_default() {
		assert_eq!(
			run(b"[%*d]", &[FormatArg::Signed(5), FormatArg::Signed(7)]),
			"[    7]"
		);
	}

	#[test]
	fn negative_star_width_left_justifies() {
		assert_eq!(
			run(b"[%*d]", &[FormatArg::Signed(-5), FormatArg::Signed(7)]),
			"[7    ]"
		);
	}

	#[test]
	fn minus_flag_left_justifies_a_star_width() {
		assert_eq!(
			run(b"[%-*d]", &[FormatArg::Signed(5), FormatArg::Signed(7)]),
			"[7    ]"
		);
	}

	#[test]
	fn star_precision_truncates_strings() {
		assert_eq!(
			run(b"%.*s", &[FormatArg::Signed(3), FormatArg::Str(b"hello")]),
			"hel"
		);
	}

	#[test]
	fn negative_star_precision_is_treated_as_unspecified() {
		assert_eq!(
			run(b"%.*s", &[FormatArg::Signed(-1), FormatArg::Str(b"hello")]),
			"hello"
		);
	}

	#[test]
	fn end_to_end_positive_and_negative_star_width_padding() {
		// spec.md §8 scenarios 5 and 6.
		assert_eq!(
			run(
				b"padding:'%*d'\n",
				&[FormatArg::Signed(5), FormatArg::Signed(5)]
			),
			"padding:'    5'\n"
		);
		assert_eq!(
			run(
				b"negative padding:'%*d'\n",
				&[FormatArg::Signed(-5), FormatArg::Signed(-5)]
			),
			"negative padding:'-5   '\n"
		);
	}

	#[test]
	fn rejects_unsupported_flags() {
		let mut buf = [0u8; 16];
		let mut sink = BufferSink::new(&mut buf);
		let err = format(&mut sink, b"%+d", &[FormatArg::Signed(1)]).unwrap_err();
		assert!(matches!(err, SioError::InvalidFormat(_)));
	}

	#[test]
	fn rejects_precision_as_embedded_digits() {
		let mut buf = [0u8; 16];
		let mut sink = BufferSink::new(&mut buf);
		let err = format(&mut sink, b"%.3s", &[FormatArg::Str(b"hello")]).unwrap_err();
		assert!(matches!(err, SioError::InvalidFormat(_)));
	}

	#[test]
	fn rejects_unterminated_specifier() {
		let mut buf = [0u8; 16];
		let mut sink = BufferSink::new(&mut buf);
		let err = format(&mut sink, b"%l", &[]).unwrap_err();
		assert!(matches!(err, SioError::InvalidFormat(_)));
	}

	#[test]
	fn float_default_precision() {
		assert_eq!(run(b"%f", &[FormatArg::Float(3.5)]), "3.500000");
	}

	#[test]
	fn ll_and_z_length_modifiers_parse() {
		assert_eq!(run(b"%lld", &[FormatArg::Signed(42)]), "42");
		assert_eq!(run(b"%zu", &[FormatArg::Unsigned(42)]), "42");
	}
}
