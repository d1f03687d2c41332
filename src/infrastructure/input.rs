//! Domain input from arguments or line-oriented readers

use std::io::BufRead;

use tracing::debug;

use crate::infrastructure::{InfraError, InfraResult};

/// Read one domain per line.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD so that every line
/// still reaches the transcoder. Trailing `\r\n` / `\n` are stripped and blank
/// lines skipped.
pub fn read_domains<R: BufRead>(mut reader: R) -> InfraResult<Vec<String>> {
    let mut domains = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| InfraError::io("read domains", e))?;
        if n == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        if !line.trim().is_empty() {
            domains.push(line.to_string());
        }
    }
    debug!("read {} domains", domains.len());
    Ok(domains)
}

/// Use the given arguments, or fall back to reading `reader` when there are none.
pub fn collect_domains<R: BufRead>(args: &[String], reader: R) -> InfraResult<Vec<String>> {
    if args.is_empty() {
        read_domains(reader)
    } else {
        Ok(args.to_vec())
    }
}
