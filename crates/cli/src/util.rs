// Path: crates/cli/src/util.rs

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use vigil_types::app::Hash28;

/// Reads a hex argument that may also name a file holding the hex.
///
/// Files exported by wallets and `cardano-cli` are often JSON envelopes with a
/// `cborHex` field; those are unwrapped too.
pub fn read_hex_input(value: &str) -> Result<String> {
    let path = Path::new(value);
    if !path.is_file() {
        return Ok(value.trim().to_string());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if let Ok(envelope) = serde_json::from_str::<serde_json::Value>(&text) {
        if let Some(cbor) = envelope.get("cborHex").and_then(|v| v.as_str()) {
            return Ok(cbor.trim().to_string());
        }
    }
    Ok(text.trim().to_string())
}

/// Parses a 28-byte hash given as hex.
pub fn parse_hash28(value: &str) -> Result<Hash28> {
    value
        .parse()
        .with_context(|| format!("'{}' is not a 28-byte hex hash", value))
}

/// `[ok]` or `[FAIL]`.
pub fn mark(passed: bool) -> &'static str {
    if passed {
        "[ok]  "
    } else {
        "[FAIL]"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_inline_hex_file_and_envelope() {
        assert_eq!(read_hex_input(" 84a0 ").unwrap(), "84a0");

        let mut plain = tempfile::NamedTempFile::new().unwrap();
        writeln!(plain, "84a1\n").unwrap();
        assert_eq!(read_hex_input(plain.path().to_str().unwrap()).unwrap(), "84a1");

        let mut envelope = tempfile::NamedTempFile::new().unwrap();
        write!(
            envelope,
            r#"{{"type":"Tx ConwayEra","description":"","cborHex":"84a2"}}"#
        )
        .unwrap();
        assert_eq!(read_hex_input(envelope.path().to_str().unwrap()).unwrap(), "84a2");
    }

    #[test]
    fn test_parse_hash28() {
        assert!(parse_hash28(&"ab".repeat(28)).is_ok());
        assert!(parse_hash28("abcd").is_err());
    }
}
