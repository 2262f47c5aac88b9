//! Formats a binary64 as a fixed-point decimal string (`%f`), the way
//! `csapp_dtoa.c`'s `sio_format_double_exact` does: build the exact digit expansion
//! via [`sio_bignum::dragon`], then lay the digits out around a decimal point with
//! padding.
//!
//! Only `%f` is implemented; spec.md's Non-goals exclude `%e`/`%g`/`%a` and any
//! shortest-round-trip behavior, so every digit this module emits comes from the
//! exact expansion, never a shortened approximation.

use crate::error::SioResult;
use crate::sink::Sink;
use sio_bignum::{decode_f64, to_exact_digits, FloatKind};

/// Upper bound on how many significant decimal digits this formatter will ever ask
/// `sio_bignum::dragon` to generate for one value: enough for the largest finite
/// `f64` magnitude (up to 309 digits before the point) plus a generously large
/// fractional precision, with headroom to spare.
const MAX_SIGNIFICANT_DIGITS: usize = 512;

/// The default fractional precision `%f` uses when the format string does not supply
/// one explicitly, matching glibc's `printf` default.
pub const DEFAULT_PRECISION: usize = 6;

/// Formats `value` as a fixed-point decimal with `precision` digits after the decimal
/// point, left-justified within `width` if `left_justify` is set, space-padded
/// otherwise (spec.md's Non-goals exclude the `0`, `+`, ` `, and `#` flags, so no other
/// padding or sign behavior is implemented).
///
/// The whole rendered value is assembled into a local buffer first, then handed to
/// the sink in one [`Sink::write_padded`] call together with its padding, so the
/// returned byte count comes straight from the sink rather than needing to be
/// recomputed separately by the caller.
pub fn format_f64(
	sink: &mut dyn Sink,
	value: f64,
	precision: usize,
	width: usize,
	left_justify: bool
) -> SioResult<usize> {
	let decoded = decode_f64(value);

	let mut body = [0u8; MAX_SIGNIFICANT_DIGITS + 2];
	let body_len = render_body(&mut body, &decoded, precision);
	let body = &body[..body_len];

	let pad = width.saturating_sub(body.len());
	if left_justify {
		sink.write_padded(b' ', 0, body, pad)
	} else {
		sink.write_padded(b' ', pad, body, 0)
	}
}

/// Writes the sign, digits, and decimal point into `buf`, returning how many bytes
/// were used. No padding is applied here; [`format_f64`] handles that.
fn render_body(buf: &mut [u8], decoded: &sio_bignum::DecodedFloat, precision: usize) -> usize {
	let mut i = 0;
	if decoded.negative {
		buf[i] = b'-';
		i += 1;
	}

	match decoded.kind {
		FloatKind::Nan => {
			buf[i..i + 3].copy_from_slice(b"nan");
			i + 3
		}
		FloatKind::Infinity => {
			buf[i..i + 3].copy_from_slice(b"inf");
			i + 3
		}
		FloatKind::Zero => i + write_zero(&mut buf[i..], precision),
		FloatKind::Finite => i + write_finite(&mut buf[i..], decoded, precision)
	}
}

fn write_zero(buf: &mut [u8], precision: usize) -> usize {
	buf[0] = b'0';
	let mut i = 1;
	if precision > 0 {
		buf[i] = b'.';
		i += 1;
		for slot in &mut buf[i..i + precision] {
			*slot = b'0';
		}
		i += precision;
	}
	i
}

fn write_finite(buf: &mut [u8], decoded: &sio_bignum::DecodedFloat, precision: usize) -> usize {
	// The decimal exponent of the leading digit doesn't depend on how many digits are
	// requested (`to_exact_digits` computes it before generating any), so a
	// zero-digit probe call is enough to learn it cheaply...
	let probe = to_exact_digits(decoded, &mut []);

	// ...which lets this call request exactly the digits that will be displayed, so
	// the generator's own final-digit rounding lands exactly at the cutoff `%f`
	// needs, rather than at an arbitrary, over-generated position. When the value's
	// magnitude is below 1, at least one digit is always requested even if `precision`
	// alone would ask for none, so that e.g. 0.6 at zero precision can still round up
	// to "1" instead of silently reading as "0".
	let digit_count = if probe.exponent <= 0 {
		let leading_zeros = (-probe.exponent) as usize;
		precision.saturating_sub(leading_zeros).max(1)
	} else {
		probe.exponent as usize + precision
	}
	.min(MAX_SIGNIFICANT_DIGITS);
	let mut digits = [0u8; MAX_SIGNIFICANT_DIGITS];
	let exact = to_exact_digits(decoded, &mut digits[..digit_count]);

	let mut i = 0;
	if exact.exponent <= 0 {
		buf[i] = b'0';
		i += 1;
		if precision > 0 {
			buf[i] = b'.';
			i += 1;
			let leading_zeros = (-exact.exponent) as usize;
			for slot in &mut buf[i..i + leading_zeros.min(precision)] {
				*slot = b'0';
			}
			i += leading_zeros.min(precision);
			let remaining_precision = precision.saturating_sub(leading_zeros);
			let take = exact.len.min(remaining_precision);
			buf[i..i + take].copy_from_slice(&digits[..take]);
			i += take;
			for slot in &mut buf[i..i + (remaining_precision - take)] {
				*slot = b'0';
			}
			i += remaining_precision - take;
		}
	} else {
		let whole_digits = exact.exponent as usize;
		let have = whole_digits.min(exact.len);
		buf[i..i + have].copy_from_slice(&digits[..have]);
		i += have;
		for slot in &mut buf[i..i + (whole_digits - have)] {
			*slot = b'0';
		}
		i += whole_digits - have;

		if precision > 0 {
			buf[i] = b'.';
			i += 1;
			let frac_available = exact.len.saturating_sub(whole_digits);
			let take = frac_available.min(precision);
			buf[i..i + take].copy_from_slice(&digits[whole_digits..whole_digits + take]);
			i += take;
			for slot in &mut buf[i..i + (precision - take)] {
				*slot = b'0';
			}
			i += precision - take;
		}
	}
	i
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::buffer_sink::BufferSink;

	fn fmt(value: f64, precision: usize, width: usize, left_justify: bool) -> String {
		let mut buf = [0u8; 256];
		let mut sink = BufferSink::new(&mut buf);
		format_f64(&mut sink, value, precision, width, left_justify).unwrap();
		let len = sink.finish();
		String::from_utf8(buf[..len].to_vec()).unwrap()
	}

	#[test]
	fn zero_with_default_precision() {
		assert_eq!(fmt(0.0, 6, 0, false), "0.000000");
	}

	#[test]
	fn negative_zero_keeps_its_sign() {
		assert_eq!(fmt(-0.0, 2, 0, false), "-0.00");
	}

	#[test]
	fn one_half_with_two_digits() {
		assert_eq!(fmt(0.5, 2, 0, false), "0.50");
	}

	#[test]
	fn whole_number_with_zero_precision_has_no_point() {
		assert_eq!(fmt(42.0, 0, 0, false), "42");
	}

	#[test]
	fn nan_and_infinity() {
		assert_eq!(fmt(f64::NAN, 2, 0, false), "nan");
		assert_eq!(fmt(f64::INFINITY, 2, 0, false), "inf");
		assert_eq!(fmt(f64::NEG_INFINITY, 2, 0, false), "-inf");
	}

	#[test]
	fn right_justifies_by_default() {
		assert_eq!(fmt(1.5, 1, 8, false), "     1.5");
	}

	#[test]
	fn left_justifies_when_asked() {
		assert_eq!(fmt(1.5, 1, 8, true), "1.5     ");
	}
}
