//! The [`Sink`] trait: the one abstraction every formatting entry point writes
//! through, letting the interpreter in [`crate::interp`] stay ignorant of whether its
//! output goes to a file descriptor or an in-memory buffer.

use crate::error::SioResult;

/// Accepts one padded run of formatted bytes: `left_pad` copies of `pad`, then
/// `data`, then `right_pad` copies of `pad`, all in a single call — mirroring
/// `csapp.c`'s `sio_vformat` callback contract `sink(pad_char, left_pad_count, data,
/// data_len, right_pad_count)` rather than exposing padding and data as separate
/// writes.
///
/// Implementations must be safe to call from an async-signal handler: no heap
/// allocation, no locking that could deadlock against a signal that interrupted the
/// same lock elsewhere. [`crate::fd_sink::FdSink`] and [`crate::buffer_sink::BufferSink`]
/// both satisfy this; a `Sink` that wraps, say, a `Mutex`-guarded `Vec` would not.
pub trait Sink {
	/// Writes `left_pad` bytes of `pad`, then `data`, then `right_pad` bytes of `pad`,
	/// in that order.
	///
	/// On success, returns `left_pad + data.len() + right_pad` — the total byte count
	/// the call represents — even for a sink that could not actually hold all of it
	/// (a [`crate::buffer_sink::BufferSink`] past capacity never fails; it reports
	/// the count it would have written, for truncation reporting the way `snprintf`
	/// does). A sink with real failure modes (e.g. [`crate::fd_sink::FdSink`]) reports
	/// one instead of a short count.
	fn write_padded(
		&mut self,
		pad: u8,
		left_pad: usize,
		data: &[u8],
		right_pad: usize
	) -> SioResult<usize>;
}
