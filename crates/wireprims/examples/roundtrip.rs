//! Encodes a small hand-built record and decodes it back, logging every step.
//!
//! Run with:
//!   cargo run --example roundtrip --features logging
//!
//! Set `WIREPRIMS_LOG=trace` to see per-field events and
//! `WIREPRIMS_LOG_FORMAT=json` for machine-readable output.

use wireprims::logging::{init_logging, LogConfig};
use wireprims::types::{BoolType, Encoding, StringType, Type, U16Be, U8};
use wireprims::{ReadCursor, WriteCursor};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LogConfig::from_env());

    let magic = StringType::fixed(4, Encoding::Ascii);
    let name = StringType::prefixed(U16Be, Encoding::Utf8);
    let active = BoolType::new(U8);
    let note = StringType::null_terminated(Encoding::Latin1);

    let mut out = WriteCursor::new();
    let mut written = 0;
    written += magic.encode_str("WPRM", &mut out)?;
    written += name.encode_str("Zoë", &mut out)?;
    written += active.encode(&true, &mut out)?;
    written += note.encode_str("café", &mut out)?;
    tracing::info!(bytes = written, "encoded record");
    eprintln!("wire: {:02x?}", out.as_slice());

    let mut input = ReadCursor::new(out.freeze());
    let magic = magic.decode(&mut input)?;
    let name = name.decode(&mut input)?;
    let active = active.decode(&mut input)?;
    let note = note.decode(&mut input)?;
    let read = magic.bytes + name.bytes + active.bytes + note.bytes;
    tracing::info!(bytes = read, remaining = input.len(), "decoded record");

    eprintln!(
        "magic={:?} name={:?} active={} note={:?}",
        magic.value, name.value, active.value, note.value
    );
    Ok(())
}
