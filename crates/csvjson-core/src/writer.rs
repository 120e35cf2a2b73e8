//! JSON serialization of conversion results

use std::io::Write as IoWrite;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{IoErrorExt, Result};

/// Serialize `value` into `writer` as a single JSON document.
///
/// `indent` of `None` or `Some(0)` writes the compact form; `Some(n)` pretty
/// prints with `n` spaces per nesting level. No trailing newline is written.
///
/// # Errors
///
/// Returns an [`IoError::Write`](crate::error::IoError::Write) if writing to
/// the output fails.
pub fn write_json<W, T>(writer: &mut W, value: &T, indent: Option<usize>) -> Result<()>
where
    W: IoWrite,
    T: Serialize + ?Sized,
{
    match indent.filter(|&n| n > 0) {
        None => serde_json::to_writer(&mut *writer, value).with_write_context("JSON", "-")?,
        Some(width) => {
            let spaces = vec![b' '; width];
            let formatter = PrettyFormatter::with_indent(&spaces);
            let mut serializer = Serializer::with_formatter(&mut *writer, formatter);
            value
                .serialize(&mut serializer)
                .with_write_context("JSON", "-")?;
        },
    }
    writer.flush().with_write_context("JSON", "-")
}

/// Serialize `value` into a `String`.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_string<T>(value: &T, indent: Option<usize>) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let mut buffer = Vec::new();
    write_json(&mut buffer, value, indent)?;
    String::from_utf8(buffer).with_write_context("JSON", "-")
}
