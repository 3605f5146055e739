//! JSON encoding and decoding for request and response bodies.
//!
//! Output escapes `<`, `>`, `&`, U+2028 and U+2029 inside strings so bodies
//! can be embedded in HTML without further treatment.

use std::io;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use serde_json::{Map, Value};

/// Compact formatter that additionally escapes HTML-sensitive characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSafeFormatter;

impl Formatter for HtmlSafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let bytes = fragment.as_bytes();
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            let escaped = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(&bytes[start..index])?;
            writer.write_all(escaped.as_bytes())?;
            start = index + ch.len_utf8();
        }
        writer.write_all(&bytes[start..])
    }
}

/// Appends the HTML-safe encoding of `value` to `buf`.
pub fn write_json<T>(buf: &mut Vec<u8>, value: &T) -> serde_json::Result<()>
where
    T: Serialize + ?Sized,
{
    let mut serializer = Serializer::with_formatter(buf, HtmlSafeFormatter);
    value.serialize(&mut serializer)
}

pub fn to_vec<T>(value: &T) -> serde_json::Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::with_capacity(128);
    write_json(&mut buf, value)?;
    Ok(buf)
}

/// Why a request body was refused.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    #[error("expected a JSON object")]
    NotAnObject,

    #[error("body does not match schema: {0}")]
    Schema(#[source] serde_json::Error),
}

/// Decodes exactly one JSON object over `blank`.
///
/// Fields present in the body replace the blank's values; absent fields
/// keep them. Fields unknown to `T` are rejected when `T` is declared with
/// `deny_unknown_fields`, as every entity kind is.
pub fn decode_into<T>(blank: T, body: &[u8]) -> Result<T, DecodeError>
where
    T: Serialize + DeserializeOwned,
{
    let supplied: Value = serde_json::from_slice(body).map_err(DecodeError::Syntax)?;
    let Value::Object(supplied) = supplied else {
        return Err(DecodeError::NotAnObject);
    };

    let mut merged = match serde_json::to_value(&blank).map_err(DecodeError::Schema)? {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };
    merged.extend(supplied);

    serde_json::from_value(Value::Object(merged)).map_err(DecodeError::Schema)
}
