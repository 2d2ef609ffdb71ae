//! JSON output for CLI commands
//!
//! One JSON object per line on stdout, UTF-8.

use std::io::Write;

use serde_json::Value;

use super::errors::CliResult;

/// Wrap a command result in the success envelope
pub fn success_envelope(data: Value) -> Value {
    serde_json::json!({
        "status": "ok",
        "data": data
    })
}

/// Write a success response as one line to `out`
pub fn write_response_to<W: Write>(out: &mut W, data: Value) -> CliResult<()> {
    serde_json::to_writer(&mut *out, &success_envelope(data))?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}
