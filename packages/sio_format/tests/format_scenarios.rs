//! Black-box scenarios exercising `sprint` end to end, covering the edge cases
//! `test_sio_printf.c`/`test_sio_snprintf.c` check against the original
//! implementation: the minimum value of a signed integer, pointer/NULL formatting,
//! string truncation via precision, field padding (including left-justification),
//! and a selection of exact `%f` conversions.

use sio_format::{sio_args, sprint};

fn format(fmt: &[u8], args: &[sio_format::FormatArg<'_>]) -> String {
	let mut buf = [0u8; 512];
	let len = sprint(&mut buf, fmt, args).unwrap();
	String::from_utf8(buf[..len].to_vec()).unwrap()
}

#[test_log::test]
fn signed_minimum_value_converts_without_overflow() {
	assert_eq!(
		format(b"%d", &sio_args![i64::MIN]),
		"-9223372036854775808"
	);
	assert_eq!(format(b"%d", &sio_args![i32::MIN]), "-2147483648");
}

#[test]
fn size_t_sized_unsigned_value() {
	assert_eq!(format(b"%zu", &sio_args![usize::MAX]), "18446744073709551615");
}

#[test]
fn null_and_non_null_pointers() {
	assert_eq!(
		format(b"%p", &sio_args![core::ptr::null::<()>()]),
		"(nil)"
	);

	let value = 42u32;
	let ptr = &value as *const u32 as *const ();
	let rendered = format(b"%p", &sio_args![ptr]);
	assert!(rendered.starts_with("0x"));
}

#[test]
fn string_with_and_without_star_precision() {
	assert_eq!(format(b"%s", &sio_args![b"hello".as_slice()]), "hello");
	assert_eq!(format(b"%.*s", &sio_args![2, b"hello".as_slice()]), "he");
}

#[test]
fn star_width_pads_on_the_left_by_default() {
	assert_eq!(format(b"[%*d]", &sio_args![8, 42]), "[      42]");
}

#[test]
fn left_justify_flag_pads_on_the_right() {
	assert_eq!(format(b"[%-*d]", &sio_args![8, 42]), "[42      ]");
}

#[test]
fn mixed_literal_and_conversion_runs_are_assembled_correctly() {
	assert_eq!(
		format(
			b"user=%s id=%d balance=%f",
			&sio_args![b"ana".as_slice(), 7, 12.5]
		),
		"user=ana id=7 balance=12.500000"
	);
}

#[test]
fn float_scenarios() {
	assert_eq!(format(b"%.*f", &sio_args![0, 0.5]), "0");
	assert_eq!(format(b"%.*f", &sio_args![0, 1.5]), "2");
	assert_eq!(format(b"%.*f", &sio_args![2, 3.14159]), "3.14");
	assert_eq!(format(b"%f", &sio_args![-0.0]), "-0.000000");
	assert_eq!(format(b"%.*f", &sio_args![2, 100.0]), "100.00");
}

#[test]
fn end_to_end_star_width_padding_positive_and_negative() {
	// spec.md §8 scenarios 5 and 6: width supplied as a trailing `*` argument.
	assert_eq!(
		format(b"padding:'%*d'\n", &sio_args![5, 5]),
		"padding:'    5'\n"
	);
	assert_eq!(
		format(b"negative padding:'%*d'\n", &sio_args![-5, -5]),
		"negative padding:'-5   '\n"
	);
}

#[test]
fn zero_capacity_buffer_still_reports_the_full_would_have_written_length() {
	let mut buf: [u8; 0] = [];
	let len = sprint(&mut buf, b"hello", &[]).unwrap();
	assert_eq!(len, 5);
}

#[test]
fn truncation_when_buffer_is_smaller_than_output() {
	let mut buf = [0u8; 4];
	let len = sprint(&mut buf, b"hello", &[]).unwrap();
	assert_eq!(len, 5);
	assert_eq!(&buf, b"hel\0");
}

#[test_log::test]
fn malformed_conversion_is_a_format_error_not_a_panic() {
	let mut buf = [0u8; 16];
	let err = sprint(&mut buf, b"%q", &[]).unwrap_err();
	assert!(matches!(err, sio_format::SioError::InvalidFormat(_)));
}
