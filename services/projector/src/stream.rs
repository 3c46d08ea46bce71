use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use field_projection::{ProjectionPipeline, SinkDocument};
use tracing::{debug, warn};

/// Counts of lines handled by [`run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Lines parsed as sink documents and projected
    pub processed: usize,
    /// Lines written through unchanged
    pub passthrough: usize,
}

/// Projects newline-delimited sink documents from `reader` into `writer`.
///
/// Each line is a JSON object with optional `key` and `value` records. Lines
/// that do not parse as such, including lines that are not UTF-8, are written
/// through byte for byte; blank lines are dropped.
pub fn run<R, W>(mut reader: R, mut writer: W, pipeline: &ProjectionPipeline) -> Result<StreamStats>
where
    R: BufRead,
    W: Write,
{
    let mut stats = StreamStats::default();
    let mut buf = Vec::new();
    let mut line_number = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("failed to read input line {}", line_number + 1))?;
        if read == 0 {
            break;
        }
        line_number += 1;

        let line = strip_line_terminator(&buf);
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        match serde_json::from_slice::<SinkDocument>(line) {
            Ok(mut doc) => {
                pipeline.process(&mut doc);
                serde_json::to_writer(&mut writer, &doc).with_context(|| {
                    format!("failed to write projected document from line {}", line_number)
                })?;
                stats.processed += 1;
                debug!(line = line_number, "document projected");
            }
            Err(err) => {
                warn!(
                    line = line_number,
                    error = %err,
                    "input is not a sink document, passing through unchanged"
                );
                writer
                    .write_all(line)
                    .with_context(|| format!("failed to write line {}", line_number))?;
                stats.passthrough += 1;
            }
        }

        writer
            .write_all(b"\n")
            .context("failed to write line terminator")?;
    }

    writer.flush().context("failed to flush output")?;
    Ok(stats)
}

fn strip_line_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
