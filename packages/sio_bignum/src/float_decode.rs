//! Decomposition of an IEEE-754 binary64 into the pieces the Dragon digit generator
//! needs, ported from `csapp_dtoa.c`'s `decode_double`.
//!
//! Rather than working with the `f64` directly, Dragon's algorithm wants: the exact
//! mantissa and binary exponent such that `value == mantissa * 2^exponent`, plus the
//! half-width of the rounding neighborhood on either side of `value` (`minus`/`plus`,
//! in the same `mantissa * 2^exponent` units), and whether that neighborhood is closed
//! or open at its far end (`inclusive`, true exactly when the mantissa is even, i.e.
//! round-to-even would round a tying neighbor back to `value`).

/// Which of the IEEE-754 special categories a decoded `f64` falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatKind {
	/// `value == 0.0`, sign stored separately.
	Zero,
	/// Finite, nonzero magnitude (normal or denormal).
	Finite,
	/// `+Infinity` / `-Infinity`.
	Infinity,
	/// Any NaN payload; sign bit is still reported but conventionally ignored.
	Nan,
}

/// The decomposed form of a finite `f64`, plus enough metadata to classify it without
/// re-inspecting the bit pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedFloat {
	/// `true` if the sign bit was set.
	pub negative: bool,
	/// Which IEEE-754 category this value belongs to.
	pub kind: FloatKind,
	/// Exact mantissa, valid only when `kind == FloatKind::Finite`.
	pub mantissa: u64,
	/// Binary exponent such that `value == mantissa * 2^exponent`, valid only when
	/// `kind == FloatKind::Finite`.
	pub exponent: i32,
	/// Half-width of the rounding neighborhood below `value`, in `mantissa * 2^exponent`
	/// units. Valid only when `kind == FloatKind::Finite`.
	pub minus: u64,
	/// Half-width of the rounding neighborhood above `value`, in `mantissa * 2^exponent`
	/// units. Valid only when `kind == FloatKind::Finite`.
	pub plus: u64,
	/// `true` iff the rounding neighborhood is closed (mantissa is even), meaning a
	/// value exactly at the boundary rounds back to this one. Valid only when
	/// `kind == FloatKind::Finite`.
	pub inclusive: bool,
}

const MANTISSA_BITS: u32 = 52;
const EXPONENT_BITS: u32 = 11;
const EXPONENT_BIAS: i32 = 1023;
const MANTISSA_MASK: u64 = (1u64 << MANTISSA_BITS) - 1;
const EXPONENT_MASK: u64 = (1u64 << EXPONENT_BITS) - 1;
const IMPLICIT_BIT: u64 = 1u64 << MANTISSA_BITS;

/// Splits `value`'s bit pattern into sign/exponent/mantissa fields and, for finite
/// nonzero values, the Dragon-ready `(mantissa, exponent, minus, plus, inclusive)`
/// tuple.
///
/// This mirrors `decode_double` in `csapp_dtoa.c` exactly, including its handling of
/// the boundary case where the mantissa is a power of two (`0x1p52`): the rounding
/// neighborhood above `value` is twice as wide as the one below it there, because the
/// next representable value up has a one-bit-larger binary exponent while the one
/// below shares this value's exponent. This applies even at the smallest normal
/// exponent, where the neighbor below is actually a denormal of the same exponent;
/// `decode_double` does not special-case that exponent, so neither does this.
pub fn decode_f64(value: f64) -> DecodedFloat {
	let bits = value.to_bits();
	let negative = bits >> 63 != 0;
	let raw_exponent = (bits >> MANTISSA_BITS) & EXPONENT_MASK;
	let raw_mantissa = bits & MANTISSA_MASK;

	if raw_exponent == EXPONENT_MASK {
		let kind = if raw_mantissa == 0 {
			FloatKind::Infinity
		} else {
			FloatKind::Nan
		};
		return DecodedFloat {
			negative,
			kind,
			mantissa: 0,
			exponent: 0,
			minus: 0,
			plus: 0,
			inclusive: false,
		};
	}

	if raw_exponent == 0 && raw_mantissa == 0 {
		return DecodedFloat {
			negative,
			kind: FloatKind::Zero,
			mantissa: 0,
			exponent: 0,
			minus: 0,
			plus: 0,
			inclusive: false,
		};
	}

	let (mantissa, exponent) = if raw_exponent == 0 {
		// Denormal: no implicit leading bit, exponent is the minimum normal exponent.
		(raw_mantissa, 1 - EXPONENT_BIAS - MANTISSA_BITS as i32)
	} else {
		(
			raw_mantissa | IMPLICIT_BIT,
			raw_exponent as i32 - EXPONENT_BIAS - MANTISSA_BITS as i32,
		)
	};

	// round-to-even: the neighborhood is closed (ties round back to `value`) iff the
	// mantissa's lowest bit is 0.
	let inclusive = mantissa & 1 == 0;

	// `plus` is twice `minus` exactly when the mantissa is the implicit-bit-only
	// power-of-two, with no exception for the smallest normal exponent.
	let is_boundary_power_of_two = raw_mantissa == 0;
	if is_boundary_power_of_two {
		DecodedFloat {
			negative,
			kind: FloatKind::Finite,
			mantissa: mantissa << 2,
			exponent: exponent - 2,
			minus: 1,
			plus: 2,
			inclusive,
		}
	} else {
		DecodedFloat {
			negative,
			kind: FloatKind::Finite,
			mantissa: mantissa << 1,
			exponent: exponent - 1,
			minus: 1,
			plus: 1,
			inclusive,
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn zero_is_classified_with_sign() {
		let pos = decode_f64(0.0);
		assert_eq!(pos.kind, FloatKind::Zero);
		assert!(!pos.negative);

		let neg = decode_f64(-0.0);
		assert_eq!(neg.kind, FloatKind::Zero);
		assert!(neg.negative);
	}

	#[test]
	fn infinities_and_nan() {
		assert_eq!(decode_f64(f64::INFINITY).kind, FloatKind::Infinity);
		assert!(!decode_f64(f64::INFINITY).negative);
		assert_eq!(decode_f64(f64::NEG_INFINITY).kind, FloatKind::Infinity);
		assert!(decode_f64(f64::NEG_INFINITY).negative);
		assert_eq!(decode_f64(f64::NAN).kind, FloatKind::Nan);
	}

	#[test]
	fn one_point_zero_round_trips_mantissa_and_exponent() {
		let d = decode_f64(1.0);
		assert_eq!(d.kind, FloatKind::Finite);
		let reconstructed = d.mantissa as f64 * 2f64.powi(d.exponent);
		assert_eq!(reconstructed, 1.0);
	}

	#[test]
	fn smallest_denormal_decodes_without_implicit_bit() {
		let d = decode_f64(f64::from_bits(1));
		assert_eq!(d.kind, FloatKind::Finite);
		let reconstructed = d.mantissa as f64 * 2f64.powi(d.exponent);
		assert_eq!(reconstructed, f64::from_bits(1));
	}

	#[test]
	fn negative_values_set_sign_bit() {
		let d = decode_f64(-2.5);
		assert!(d.negative);
		assert_eq!(d.kind, FloatKind::Finite);
	}

	#[test]
	fn power_of_two_has_asymmetric_neighborhood() {
		// 4.0 has raw_exponent > 1 and a zero mantissa field, so its lower rounding
		// neighbor is half as far as its upper one.
		let d = decode_f64(4.0);
		assert_eq!(d.plus, 2 * d.minus);
	}

	#[test]
	fn smallest_normal_has_asymmetric_neighborhood_too() {
		// `decode_double` applies the `M == 0` asymmetric-neighborhood branch to every
		// normal, including the smallest one, even though its lower neighbor is
		// actually a denormal with the same exponent rather than a normal one
		// exponent down. No exception is carved out for it here either.
		let d = decode_f64(f64::MIN_POSITIVE);
		assert_eq!(d.plus, 2 * d.minus);
	}
}
