//! Writes formatted output directly to a raw file descriptor via `write(2)`, the way
//! `csapp.c`'s `sio_write_output` (backing `sio_dprintf`) does.
//!
//! Going through a raw `write(2)` syscall rather than [`std::io::Write`] on a `File` is
//! deliberate: `File`'s `Write` impl, and more importantly anything layered on top of
//! it such as `BufWriter`, is free to allocate or to buffer bytes across calls, neither
//! of which is safe to do from a signal handler. A bare `write(2)` retried on `EINTR`
//! is the whole of what this sink needs.

use crate::error::{SioError, SioResult};
use crate::sink::Sink;
use std::io;
use std::os::fd::RawFd;

/// Size of the stack-allocated chunk used to fill padding requests, matching
/// spec's 128-byte pad-scratch sizing.
const PAD_CHUNK: usize = 128;

/// A [`Sink`] that writes to a raw file descriptor, retrying on `EINTR` the way
/// `rio_writen` does for the rest of CS:APP's blocking I/O family.
#[derive(Debug)]
pub struct FdSink {
	fd: RawFd,
}

impl FdSink {
	/// Wraps a raw file descriptor. The descriptor is borrowed, not owned: dropping
	/// this `FdSink` does not close it, matching `sio_dprintf`'s caller-owns-the-fd
	/// contract.
	pub fn new(fd: RawFd) -> Self {
		Self { fd }
	}

	/// A sink writing to file descriptor 1 (standard output).
	pub fn stdout() -> Self {
		Self::new(libc::STDOUT_FILENO)
	}

	/// A sink writing to file descriptor 2 (standard error).
	pub fn stderr() -> Self {
		Self::new(libc::STDERR_FILENO)
	}

	/// Writes every byte of `bytes`, retrying the underlying syscall on `EINTR`.
	fn write_all(&mut self, bytes: &[u8]) -> SioResult<()> {
		let mut remaining = bytes;
		while !remaining.is_empty() {
			// SAFETY: `remaining` is a valid, initialized slice for its own length,
			// and `write(2)` never retains the pointer past the call.
			let written = unsafe {
				libc::write(
					self.fd,
					remaining.as_ptr().cast(),
					remaining.len()
				)
			};

			if written < 0 {
				let err = io::Error::last_os_error();
				if err.kind() == io::ErrorKind::Interrupted {
					continue;
				}
				return Err(SioError::Io(err));
			}

			remaining = &remaining[written as usize..];
		}
		Ok(())
	}
}

impl Sink for FdSink {
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
			self.write_all(&chunk[..take])?;
			remaining -= take;
		}

		self.write_all(data)?;

		let mut remaining = right_pad;
		while remaining > 0 {
			let take = remaining.min(PAD_CHUNK);
			self.write_all(&chunk[..take])?;
			remaining -= take;
		}

		Ok(left_pad + data.len() + right_pad)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use std::io::Read;

	fn pipe() -> (std::fs::File, FdSink) {
		let mut fds = [0; 2];
		assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);
		use std::os::fd::FromRawFd;
		let reader = unsafe { std::fs::File::from_raw_fd(fds[0]) };
		let sink = FdSink::new(fds[1]);
		(reader, sink)
	}

	#[test]
	fn writes_all_bytes_to_a_pipe() {
		let (mut reader, mut sink) = pipe();
		let written = sink.write_padded(b' ', 0, b"hello, signal-safe world", 0).unwrap();
		assert_eq!(written, 25);
		drop(sink);

		let mut out = String::new();
		reader.read_to_string(&mut out).unwrap();
		assert_eq!(out, "hello, signal-safe world");
	}

	#[test]
	fn pads_on_both_sides_in_one_call() {
		let (mut reader, mut sink) = pipe();
		let written = sink.write_padded(b'-', 2, b"hi", 3).unwrap();
		assert_eq!(written, 7);
		drop(sink);

		let mut out = String::new();
		reader.read_to_string(&mut out).unwrap();
		assert_eq!(out, "--hi---");
	}
}
