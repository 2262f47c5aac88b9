//! Writes formatted output into a caller-supplied, fixed-size byte buffer, the way
//! `csapp.c`'s `sio_buffer_output` (backing `sio_snprintf`/`sio_vsnprintf`) does.
//!
//! This sink never allocates and borrows its buffer for its whole lifetime, so it is
//! the only sink in this crate usable with the `std` feature disabled.

use crate::error::SioResult;
use crate::sink::Sink;

/// Size of the stack-allocated chunk used to fill padding requests, matching
/// spec's 128-byte pad-scratch sizing.
const PAD_CHUNK: usize = 128;

/// A [`Sink`] that copies bytes into a fixed-capacity buffer, truncating silently once
/// the buffer fills — matching `snprintf`'s "as much as fits" contract rather than
/// treating a full buffer as an error.
///
/// [`Sink::write_padded`] always reports the full `left_pad + data.len() + right_pad`
/// count it was asked to write, exactly as C's `snprintf` family reports via its
/// return value, even when only part of that fit in `buf`. [`BufferSink::written_len`]
/// reports how much of it actually landed in `buf`.
pub struct BufferSink<'buf> {
	buf: &'buf mut [u8],
	written: usize,
}

impl<'buf> BufferSink<'buf> {
	/// Wraps `buf`. A zero-length `buf` is valid: every byte written is simply
	/// truncated, and [`Sink::write_padded`] still reports the true requested count,
	/// matching `sio_snprintf(NULL, 0, ...)`'s "compute the length, write nothing"
	/// usage.
	pub fn new(buf: &'buf mut [u8]) -> Self {
		Self { buf, written: 0 }
	}

	/// Number of bytes actually copied into the buffer so far.
	pub fn written_len(&self) -> usize {
		self.written
	}

	/// Appends a trailing NUL byte within the remaining capacity, if any is left, and
	/// returns the final written length (not counting the NUL).
	///
	/// `sio_snprintf` always NUL-terminates its buffer when `capacity > 0`, even if
	/// that means truncating the last formatted byte to make room; this mirrors that
	/// by overwriting the final buffered byte with `\0` if the buffer is already full.
	pub fn finish(mut self) -> usize {
		if !self.buf.is_empty() {
			let nul_at = self.written.min(self.buf.len() - 1);
			self.buf[nul_at] = 0;
			self.written = self.written.min(nul_at);
		}
		self.written
	}

	fn copy_in(&mut self, bytes: &[u8]) {
		let space = self.buf.len().saturating_sub(self.written);
		let take = bytes.len().min(space);
		if take > 0 {
			self.buf[self.written..self.written + take].copy_from_slice(&bytes[..take]);
			self.written += take;
		}
	}
}

impl Sink for BufferSink<'_> {
	fn write_padded(
		&mut self,
		pad: u8,
		left_pad: usize,
		data: &[u8],
		right_pad: usize
	) -> SioResult<usize> {
		let chunk = [pad; PAD_CHUNK];

		let mut remaining = left_pad;
		while remaining > 0 {
			let take = remaining.min(PAD_CHUNK);
			self.copy_in(&chunk[..take]);
			remaining -= take;
		}

		self.copy_in(data);

		let mut remaining = right_pad;
		while remaining > 0 {
			let take = remaining.min(PAD_CHUNK);
			self.copy_in(&chunk[..take]);
			remaining -= take;
		}

		Ok(left_pad + data.len() + right_pad)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn truncates_silently_when_full_but_reports_the_full_count() {
		let mut buf = [0u8; 4];
		let mut sink = BufferSink::new(&mut buf);
		let reported = sink.write_padded(b' ', 0, b"hello", 0).unwrap();
		assert_eq!(reported, 5);
		assert_eq!(sink.written_len(), 4);
	}

	#[test]
	fn finish_null_terminates_within_capacity() {
		let mut buf = [0xffu8; 6];
		let mut sink = BufferSink::new(&mut buf);
		sink.write_padded(b' ', 0, b"hi", 0).unwrap();
		let len = sink.finish();
		assert_eq!(len, 2);
		assert_eq!(&buf[..3], b"hi\0");
	}

	#[test]
	fn finish_truncates_last_byte_to_fit_the_nul_when_buffer_is_full() {
		let mut buf = [0u8; 3];
		let mut sink = BufferSink::new(&mut buf);
		sink.write_padded(b' ', 0, b"abc", 0).unwrap();
		let len = sink.finish();
		assert_eq!(len, 2);
		assert_eq!(&buf, b"ab\0");
	}

	#[test]
	fn zero_capacity_buffer_only_reports() {
		let mut buf: [u8; 0] = [];
		let mut sink = BufferSink::new(&mut buf);
		let reported = sink.write_padded(b' ', 0, b"abc", 0).unwrap();
		assert_eq!(reported, 3);
		assert_eq!(sink.written_len(), 0);
		assert_eq!(sink.finish(), 0);
	}

	#[test]
	fn padding_counts_toward_the_reported_total_even_when_truncated() {
		let mut buf = [0u8; 3];
		let mut sink = BufferSink::new(&mut buf);
		let reported = sink.write_padded(b' ', 2, b"x", 2).unwrap();
		assert_eq!(reported, 5);
		assert_eq!(sink.written_len(), 3);
	}
}
