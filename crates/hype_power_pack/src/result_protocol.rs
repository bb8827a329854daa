// crates/hype_power_pack/src/result_protocol.rs

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

/// Line the host scans for; the next line carries the result.
pub const RESULT_DELIMITER: &str = "====================";

#[derive(Serialize)]
struct ResultEnvelope<'a, T: Serialize> {
    result: &'a T,
}

/// Writes the delimiter line followed by `{"result": <result>}` on one line.
pub fn write_result<W: Write, T: Serialize>(out: &mut W, result: &T) -> Result<()> {
    let line = serde_json::to_string(&ResultEnvelope { result })
        .context("Failed to serialize result")?;
    writeln!(out, "{}", RESULT_DELIMITER).context("Failed to write result")?;
    writeln!(out, "{}", line).context("Failed to write result")?;
    out.flush().context("Failed to flush result")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_result() {
        let mut out = Vec::new();
        write_result(&mut out, &true).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "====================\n{\"result\":true}\n"
        );
    }

    #[test]
    fn test_structured_result_stays_on_one_line() {
        let mut out = Vec::new();
        let value = serde_json::json!({"a": [1, 2], "b": {"c": "multi\nline"}});
        write_result(&mut out, &value).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed["result"], value);
    }
}
