//! Canonical JSON serialization and the 128-bit content digest derived from it.
//!
//! The digest is an external contract shared with the game client: both sides
//! serialize the save document with object keys sorted lexicographically,
//! `", "`/`": "` separators, and non-ASCII characters escaped as `\uXXXX`
//! (the encoding produced by Python's `json.dumps(value, sort_keys=True)`),
//! then hash the UTF-8 bytes with MD5. Any change to the key order, the
//! separators, or the numeric formatting on either side shows up as a
//! spurious checksum mismatch, so this module must not be altered without
//! updating the client in lockstep.

use std::fmt::Write as _;

use md5::{Digest, Md5};
use serde_json::Value;

/// Lowercase MD5 hex digest of the canonical serialization of `data`.
pub fn checksum(data: &Value) -> String {
    let canonical = canonical_json(data);
    hex::encode(Md5::digest(canonical.as_bytes()))
}

/// Deterministic serialization of a JSON document.
///
/// Object keys are sorted by Unicode code point at every nesting level;
/// everything else follows the client contract described in the module docs.
pub fn canonical_json(data: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, data);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(number) => write_number(out, number),
        Value::String(text) => write_string(out, text),
        Value::Array(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();
            out.push('{');
            for (index, key) in keys.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                write_string(out, key);
                out.push_str(": ");
                write_value(out, &map[key.as_str()]);
            }
            out.push('}');
        }
    }
}

fn write_number(out: &mut String, number: &serde_json::Number) {
    if let Some(value) = number.as_i64() {
        let _ = write!(out, "{value}");
    } else if let Some(value) = number.as_u64() {
        let _ = write!(out, "{value}");
    } else if let Some(value) = number.as_f64() {
        write_float(out, value);
    }
}

/// Floats keep a trailing `.0` for integral values, as the client encoder
/// does. Save payloads are expected to stick to integers and short decimals;
/// values needing exponent notation are outside the shared contract.
fn write_float(out: &mut String, value: f64) {
    if value == value.trunc() && value.abs() < 1e16 {
        let _ = write!(out, "{value:.1}");
    } else {
        let _ = write!(out, "{value}");
    }
}

fn write_string(out: &mut String, text: &str) {
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            ch if (ch as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", ch as u32);
            }
            ch if ch.is_ascii() => out.push(ch),
            ch => {
                // ensure_ascii semantics: UTF-16 units, surrogate pairs for
                // characters outside the BMP.
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{unit:04x}");
                }
            }
        }
    }
    out.push('"');
}
