//! A fixed-capacity, non-negative, arbitrary-precision integer, ported from
//! `csapp_dtoa.c`'s `bignum32x40_*` family (itself, per that file's own comment,
//! inspired by Rust's `core::num::dec2flt::bignum::Big32x40`).
//!
//! The limbs are base 2^32, little-endian (`base[0]` is least significant). `size` is
//! one past the index of the highest non-zero limb, so `size == 0` represents zero.
//! Limbs at indices `>= size` are always zero; this invariant is what lets
//! [`BigNum32x40::bit_length`] and the `Ord` impl below read only the limbs that
//! matter.
//!
//! Every operation mutates the receiver in place and returns `&mut Self`, so call
//! sites can chain them the way the C original chains pointer-returning functions.
//! Because the type is plain data (`Copy`), there is no aliasing hazard to guard
//! against the way the C code has to: a caller that needs an unmodified copy of an
//! operand just takes one before mutating, e.g. `let saved = *big; big.mul_small(5);`.
//!
//! Arithmetic that would produce a result needing more than [`CAPACITY`] limbs is a
//! programmer error: for every call site in this crate, 40 limbs is provably enough to
//! carry out the exact-decimal conversion of any finite `f64`, so overflow here can
//! only mean a bug. Those checks use plain `assert!`, relying on the workspace's
//! `panic = "abort"` release profile for the "fatal, no unwinding" behavior spec.md
//! §7 requires of big-integer overflow.

use core::cmp::Ordering;

/// Number of base-2^32 limbs a [`BigNum32x40`] can hold.
pub const CAPACITY: usize = 40;
const DIGIT_BITS: u32 = 32;

/// `5^13`, the largest power of 5 whose result still fits in a single 32-bit limb.
/// Used to implement [`BigNum32x40::mul_pow5`] as repeated multiplication by this
/// constant, the way `csapp_dtoa.c`'s `small_pow_5` does.
const SMALL_POW5_EXP: u32 = 13;
const SMALL_POW5_VALUE: u32 = 1_220_703_125;

/// Successive powers of 10 (and twice that) that fit in a single 32-bit limb, used by
/// [`BigNum32x40::mul_pow10`] and [`BigNum32x40::div_2pow10`].
const SMALL_POW10_MAX: usize = 9;
const POW10: [u32; SMALL_POW10_MAX + 1] = [
	1, 10, 100, 1_000, 10_000, 100_000, 1_000_000, 10_000_000, 100_000_000, 1_000_000_000,
];
const TWOPOW10: [u32; SMALL_POW10_MAX + 1] = [
	2, 20, 200, 2_000, 20_000, 200_000, 2_000_000, 20_000_000, 200_000_000, 2_000_000_000,
];

/// Precalculated little-endian limb arrays for `10^16`, `10^32`, `10^64`, `10^128`, and
/// `10^256`, verbatim from spec.md §6 (and `csapp_dtoa.c`'s `POW10TOnn` constants).
const POW10TO16: [u32; 2] = [0x6fc1_0000, 0x0023_86f2];
const POW10TO32: [u32; 4] = [0, 0x85ac_ef81, 0x2d6d_415b, 0x0000_04ee];
const POW10TO64: [u32; 7] = [
	0, 0, 0xbf6a_1f01, 0x6e38_ed64, 0xdaa7_97ed, 0xe93f_f9f4, 0x0018_4f03,
];
const POW10TO128: [u32; 14] = [
	0, 0, 0, 0, 0x2e95_3e01, 0x03df_9909, 0x0f15_38fd, 0x2374_e42f, 0xd3cf_f5ec, 0xc404_dc08,
	0xbccd_b0da, 0xa633_7f19, 0xe91f_2603, 0x0000_024e,
];
const POW10TO256: [u32; 27] = [
	0, 0, 0, 0, 0, 0, 0, 0, 0x982e_7c01, 0xbed3_875b, 0xd8d9_9f72, 0x1215_2f87, 0x6bde_50c6,
	0xcf4a_6e70, 0xd595_d80f, 0x26b2_716e, 0xadc6_66b0, 0x1d15_3624, 0x3c42_d35a, 0x63ff_540e,
	0xcc55_73c0, 0x65f9_ef17, 0x55bc_28f2, 0x80dc_c7f7, 0xf46e_eddc, 0x5fdc_efce, 0x0005_53f7,
];

/// A fixed-capacity, non-negative big integer with up to `CAPACITY` base-2^32 limbs.
///
/// See the module documentation for the representation invariants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BigNum32x40 {
	size: usize,
	base: [u32; CAPACITY],
}

impl BigNum32x40 {
	/// A `BigNum32x40` representing zero.
	pub const ZERO: Self = Self {
		size: 0,
		base: [0; CAPACITY],
	};

	/// Initializes a big integer from a 32-bit value.
	pub fn from_u32(small: u32) -> Self {
		let mut big = Self::ZERO;
		big.base[0] = small;
		big.size = usize::from(small != 0);
		big
	}

	/// Initializes a big integer from a 64-bit value.
	pub fn from_u64(v: u64) -> Self {
		let mut big = Self::ZERO;
		big.base[0] = v as u32;
		big.base[1] = (v >> DIGIT_BITS) as u32;
		big.size = if big.base[1] != 0 {
			2
		} else {
			usize::from(big.base[0] != 0)
		};
		big
	}

	/// `true` iff every limb is zero.
	pub fn is_zero(&self) -> bool {
		self.size == 0
	}

	/// One plus the index of the highest set bit, or 0 if this value is zero.
	pub fn bit_length(&self) -> usize {
		if self.size == 0 {
			return 0;
		}
		let top = self.base[self.size - 1];
		debug_assert_ne!(top, 0, "size must track the highest non-zero limb");
		(self.size - 1) * DIGIT_BITS as usize + (DIGIT_BITS - top.leading_zeros()) as usize
	}

	/// Full multi-limb addition with carry propagation. Traps if the result would need
	/// more than `CAPACITY` limbs.
	pub fn add(&mut self, other: &Self) -> &mut Self {
		let sz = self.size.max(other.size);
		let mut carry = false;
		for i in 0..sz {
			let (sum1, c1) = self.base[i].overflowing_add(other.base[i]);
			let (sum2, c2) = sum1.overflowing_add(u32::from(carry));
			self.base[i] = sum2;
			carry = c1 || c2;
		}
		self.size = if carry {
			assert!(sz < CAPACITY, "BigNum32x40 overflowed in add()");
			self.base[sz] = 1;
			sz + 1
		} else {
			sz
		};
		self
	}

	/// Adds a single limb, propagating carries. Traps on overflow past `CAPACITY` limbs.
	pub fn add_small(&mut self, small: u32) -> &mut Self {
		let (sum, mut carry) = self.base[0].overflowing_add(small);
		self.base[0] = sum;
		let mut i = 1;
		while carry {
			assert!(i < CAPACITY, "BigNum32x40 overflowed in add_small()");
			let (sum, c) = self.base[i].overflowing_add(1);
			self.base[i] = sum;
			carry = c;
			i += 1;
		}
		self.size = self.size.max(i);
		self
	}

	/// Subtracts `other` from `self` in place. Precondition: `self >= other`; asserts
	/// that no borrow remains at the top limb.
	pub fn sub(&mut self, other: &Self) -> &mut Self {
		let sz = self.size.max(other.size);
		let mut borrow = false;
		for i in 0..sz {
			let (diff1, b1) = self.base[i].overflowing_sub(other.base[i]);
			let (diff2, b2) = diff1.overflowing_sub(u32::from(borrow));
			self.base[i] = diff2;
			borrow = b1 || b2;
		}
		assert!(!borrow, "BigNum32x40::sub underflowed: self < other");
		self.size = Self::normalized_size(&self.base, sz);
		self
	}

	/// Multiplies by a single 32-bit value, propagating 64-bit intermediate carries.
	/// Traps on overflow past `CAPACITY` limbs.
	pub fn mul_small(&mut self, small: u32) -> &mut Self {
		let mut carry: u32 = 0;
		for i in 0..self.size {
			let product = u64::from(self.base[i]) * u64::from(small) + u64::from(carry);
			self.base[i] = product as u32;
			carry = (product >> DIGIT_BITS) as u32;
		}
		if carry > 0 {
			assert!(self.size < CAPACITY, "BigNum32x40 overflowed in mul_small()");
			self.base[self.size] = carry;
			self.size += 1;
		}
		self
	}

	/// Left-shifts by `bits` bits, preserving the limb-array invariants. Traps on
	/// overflow past `CAPACITY` limbs.
	pub fn mul_pow2(&mut self, bits: usize) -> &mut Self {
		let limb_shift = bits / DIGIT_BITS as usize;
		let bit_shift = (bits % DIGIT_BITS as usize) as u32;
		assert!(
			self.size + limb_shift <= CAPACITY,
			"BigNum32x40 overflowed in mul_pow2()"
		);

		for i in (0..self.size).rev() {
			self.base[i + limb_shift] = self.base[i];
		}
		for limb in &mut self.base[..limb_shift] {
			*limb = 0;
		}

		let mut sz = self.size + limb_shift;
		if bit_shift > 0 {
			let overflow = self.base[sz - 1] >> (DIGIT_BITS - bit_shift);
			if overflow > 0 {
				assert!(sz < CAPACITY, "BigNum32x40 overflowed in mul_pow2()");
				self.base[sz] = overflow;
				sz += 1;
			}
			for i in (limb_shift + 1..sz.min(self.size + limb_shift)).rev() {
				self.base[i] = (self.base[i] << bit_shift) | (self.base[i - 1] >> (DIGIT_BITS - bit_shift));
			}
			self.base[limb_shift] <<= bit_shift;
		}
		self.size = sz;
		self
	}

	/// Multiplies by `5^e`, implemented as repeated multiplication by `5^13` while
	/// `e >= 13`, then a final multiplication by the remaining power of 5.
	pub fn mul_pow5(&mut self, mut e: usize) -> &mut Self {
		while e >= SMALL_POW5_EXP as usize {
			self.mul_small(SMALL_POW5_VALUE);
			e -= SMALL_POW5_EXP as usize;
		}
		let rest_power = 5u32.pow(e as u32);
		self.mul_small(rest_power)
	}

	/// Multiplies by `10^n`, `n < 512`, decomposing `n` into binary bits and multiplying
	/// by the precomputed constant-limb-arrays for `10^1, 10^8, 10^16, ..., 10^256`.
	pub fn mul_pow10(&mut self, n: usize) -> &mut Self {
		assert!(n < 512, "mul_pow10 only supports exponents below 512");
		if n & 7 != 0 {
			self.mul_small(POW10[n & 7]);
		}
		if n & 8 != 0 {
			self.mul_small(POW10[8]);
		}
		if n & 16 != 0 {
			self.mul_digits(&POW10TO16);
		}
		if n & 32 != 0 {
			self.mul_digits(&POW10TO32);
		}
		if n & 64 != 0 {
			self.mul_digits(&POW10TO64);
		}
		if n & 128 != 0 {
			self.mul_digits(&POW10TO128);
		}
		if n & 256 != 0 {
			self.mul_digits(&POW10TO256);
		}
		self
	}

	/// Schoolbook multiplication by an arbitrary little-endian digit slice, accumulating
	/// into a scratch array before copying the result back into `self`.
	pub fn mul_digits(&mut self, digits: &[u32]) -> &mut Self {
		let mut ret = [0u32; CAPACITY];
		let retsz = if self.size < digits.len() {
			Self::mul_into(&mut ret, &self.base[..self.size], digits)
		} else {
			Self::mul_into(&mut ret, digits, &self.base[..self.size])
		};
		self.base = ret;
		self.size = retsz;
		self
	}

	fn mul_into(ret: &mut [u32; CAPACITY], a: &[u32], b: &[u32]) -> usize {
		let mut retsz = 0;
		for (i, &ai) in a.iter().enumerate() {
			if ai == 0 {
				continue;
			}
			let mut carry: u32 = 0;
			let mut j = 0;
			while j < b.len() {
				assert!(i + j < CAPACITY, "BigNum32x40 overflowed in mul_digits()");
				let product =
					u64::from(ai) * u64::from(b[j]) + u64::from(ret[i + j]) + u64::from(carry);
				ret[i + j] = product as u32;
				carry = (product >> DIGIT_BITS) as u32;
				j += 1;
			}
			if carry > 0 {
				assert!(i + j < CAPACITY, "BigNum32x40 overflowed in mul_digits()");
				ret[i + j] = carry;
				j += 1;
			}
			retsz = retsz.max(i + j);
		}
		retsz
	}

	/// Divides by a single 32-bit value in place, returning the remainder.
	pub fn div_rem_small(&mut self, small: u32) -> u32 {
		let mut borrow: u64 = 0;
		for i in (0..self.size).rev() {
			let dividend = (borrow << DIGIT_BITS) | u64::from(self.base[i]);
			self.base[i] = (dividend / u64::from(small)) as u32;
			borrow = dividend % u64::from(small);
		}
		self.size = Self::normalized_size(&self.base, self.size);
		borrow as u32
	}

	/// Divides by `2 * 10^n`, implemented as repeated division by `10^9` while `n >= 9`,
	/// then a final division by the remaining `2 * 10^(n mod 9)`.
	pub fn div_2pow10(&mut self, mut n: usize) -> &mut Self {
		while n > SMALL_POW10_MAX {
			self.div_rem_small(POW10[SMALL_POW10_MAX]);
			n -= SMALL_POW10_MAX;
		}
		self.div_rem_small(TWOPOW10[n]);
		self
	}

	/// Compares `self` to `other`, from the most significant limb down. Not
	/// constant-time; no such requirement applies to this non-cryptographic use.
	pub fn cmp_value(&self, other: &Self) -> Ordering {
		let sz = self.size.max(other.size);
		for i in (0..sz).rev() {
			match self.base[i].cmp(&other.base[i]) {
				Ordering::Equal => continue,
				ord => return ord,
			}
		}
		Ordering::Equal
	}

	fn normalized_size(base: &[u32; CAPACITY], upper_bound: usize) -> usize {
		base[..upper_bound]
			.iter()
			.rposition(|&limb| limb != 0)
			.map_or(0, |idx| idx + 1)
	}
}

impl PartialOrd for BigNum32x40 {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for BigNum32x40 {
	fn cmp(&self, other: &Self) -> Ordering {
		self.cmp_value(other)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn bit_length_matches_property() {
		assert_eq!(BigNum32x40::ZERO.bit_length(), 0);
		for i in 0..32 {
			let v = BigNum32x40::from_u32(1u32 << i);
			assert_eq!(v.bit_length(), i as usize + 1);
		}
	}

	#[test]
	fn add_and_sub_round_trip() {
		let mut a = BigNum32x40::from_u64(u64::MAX);
		let b = BigNum32x40::from_u64(1);
		a.add(&b);
		assert_eq!(a.bit_length(), 65);
		a.sub(&b);
		assert_eq!(a, BigNum32x40::from_u64(u64::MAX));
	}

	#[test]
	fn mul_small_carries_across_limbs() {
		let mut a = BigNum32x40::from_u32(u32::MAX);
		a.mul_small(2);
		let expected = BigNum32x40::from_u64(u64::from(u32::MAX) * 2);
		assert_eq!(a, expected);
	}

	#[test]
	fn mul_pow10_matches_repeated_mul_small() {
		let mut via_pow10 = BigNum32x40::from_u32(7);
		via_pow10.mul_pow10(20);

		let mut via_repeated = BigNum32x40::from_u32(7);
		for _ in 0..20 {
			via_repeated.mul_small(10);
		}

		assert_eq!(via_pow10, via_repeated);
	}

	#[test]
	fn div_rem_small_round_trips_mul_small() {
		let mut a = BigNum32x40::from_u64(123_456_789_012_345);
		let remainder = a.div_rem_small(7);
		a.mul_small(7);
		a.add_small(remainder);
		assert_eq!(a, BigNum32x40::from_u64(123_456_789_012_345));
	}

	#[test]
	fn cmp_orders_by_value_not_limb_count() {
		let small = BigNum32x40::from_u32(1);
		let mut large = BigNum32x40::from_u64(1 << 40);
		assert_eq!(small.cmp_value(&large), Ordering::Less);
		assert_eq!(large.cmp_value(&small), Ordering::Greater);
		let copy = large;
		assert_eq!(large.cmp_value(&copy), Ordering::Equal);
		large.add_small(1);
		assert_ne!(large, copy);
	}
}
