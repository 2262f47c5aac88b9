//! Fixed-capacity big-integer arithmetic and decimal conversion primitives used to
//! implement the `sio_format` formatted-output engine.
//!
//! This crate has no knowledge of sinks, padding, or format strings: it is purely a
//! numeric kernel, a small, dependency-light building block that a higher-level crate
//! composes into something user-facing. It exposes three independent pieces:
//!
//! - [`itoa`]: base 8/10/16 conversion of the widest native signed/unsigned integers.
//! - [`bignum`]: [`bignum::BigNum32x40`], a fixed-capacity (40-limb, base 2^32)
//!   non-negative big integer, ported from the CS:APP `csapp_dtoa.c` `bignum32x40_*`
//!   family (itself inspired by Rust's own `core::num::dec2flt` big-number helper).
//! - [`float_decode`]: splitting an IEEE-754 `f64` into sign, mantissa, binary
//!   exponent, and rounding-neighborhood half-widths.
//! - [`dragon`]: the Dragon4-family exact decimal-digit generator built on top of
//!   [`bignum::BigNum32x40`].
//!
//! # `#![no_std]` compatibility
//!
//! This crate depends on the standard library by default, but is compatible with
//! `#![no_std]` environments when the `no-std` feature is enabled. No optional
//! dependencies are pulled in for that mode: this crate does no I/O and its one
//! transcendental-looking computation (the decimal scaling-factor estimator in
//! [`dragon`]) is exact fixed-point integer arithmetic, not a floating-point function
//! that would need `libm`.

#![cfg_attr(feature = "no-std", no_std)]
#![forbid(unsafe_code)]
#![forbid(rustdoc::broken_intra_doc_links)]
#![warn(unreachable_pub)]
#![warn(unused_qualifications)]

pub mod bignum;
pub mod dragon;
pub mod float_decode;
pub mod itoa;

pub use bignum::BigNum32x40;
pub use dragon::{to_exact_digits, ExactDigits};
pub use float_decode::{decode_f64, DecodedFloat, FloatKind};
