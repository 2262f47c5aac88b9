use sio_format::args::FormatArg;
use sio_format::sprint;

/// Pulls a handful of arguments out of whatever bytes remain after the format
/// string, so the fuzzer can exercise `%d`/`%u`/`%f`/`%s`/`%p` conversions without
/// needing a structured corpus: the meaning of each byte only matters to the
/// conversions the format string actually references.
fn args_from(data: &[u8]) -> Vec<FormatArg<'_>> {
	let mut args = Vec::new();
	let mut chunks = data.chunks_exact(8);
	for chunk in &mut chunks {
		let raw = u64::from_le_bytes(chunk.try_into().unwrap());
		args.push(FormatArg::Unsigned(raw));
		args.push(FormatArg::Signed(raw as i64));
		args.push(FormatArg::Float(f64::from_bits(raw)));
	}
	args.push(FormatArg::Str(chunks.remainder()));
	args.push(FormatArg::Ptr(if data.is_empty() {
		None
	} else {
		Some(data.as_ptr().cast())
	}));
	args
}

fn main() {
	afl::fuzz!(|data: &[u8]| {
		// Split the corpus entry into a format string and argument-source bytes at
		// the first NUL, the way a C caller's literal format string and its
		// separately-sourced argument list are two independent things.
		let split = data.iter().position(|&b| b == 0).unwrap_or(data.len());
		let (fmt, rest) = data.split_at(split);

		let args = args_from(rest);

		// Every fatal path in `sio_format` only fires for a caller bug (too few
		// arguments for a conversion); this harness always supplies a generous,
		// conversion-agnostic argument list, so only the recoverable `Result` path
		// should ever be exercised here. No output is observed: this harness exists
		// to catch panics and out-of-bounds accesses, not to check formatted output.
		let mut buf = [0u8; 4096];
		sprint(&mut buf, fmt, &args).ok();
	})
}
