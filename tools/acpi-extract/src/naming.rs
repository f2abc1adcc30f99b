//! Derivation of output file names from ACPI table contents.
//!
//! A table is named `SIGNATURE[-OEMID][-OEMTABLEID]` from its header. Tables too small to
//! carry a header are named after their first four bytes instead.

use acpi_table::AcpiTableHeader;

/// Decodes `bytes` as ASCII, dropping any byte outside the ASCII range.
pub fn decode_ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .filter(|byte| byte.is_ascii())
        .map(|&byte| char::from(byte))
        .collect()
}

/// Decodes a fixed-width header text field, dropping non-ASCII bytes and surrounding
/// whitespace.
///
/// NUL padding is not whitespace and is kept.
pub fn decode_field(bytes: &[u8]) -> String {
    decode_ascii(bytes)
        .trim_matches(is_field_whitespace)
        .to_owned()
}

/// Returns `true` if `c` counts as padding around a header text field.
fn is_field_whitespace(c: char) -> bool {
    matches!(c, '\t'..='\r' | '\x1c'..='\x1f' | ' ')
}

/// Replaces every character that is not ASCII alphanumeric, `-` or `_` with `_`.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Returns `true` if the sanitized `part` carries no information.
pub fn is_placeholder(part: &str) -> bool {
    part.bytes().all(|byte| byte == b'_')
}

/// Returns the file name stem derived from `header`.
///
/// Returns [`None`] if the signature contains no ASCII characters.
pub fn header_stem(header: &AcpiTableHeader) -> Option<String> {
    let signature = sanitize(&decode_ascii(header.signature().as_bytes()));
    if signature.is_empty() {
        return None;
    }

    let mut parts = vec![signature];
    for field in [&header.oem_id()[..], &header.oem_table_id()[..]] {
        let part = sanitize(&decode_field(field));
        if !is_placeholder(&part) {
            parts.push(part);
        }
    }

    Some(parts.join("-"))
}

/// Returns the file name stem of a table whose header could not be used.
///
/// Returns [`None`] if `bytes` is shorter than four bytes.
pub fn fallback_stem(bytes: &[u8]) -> Option<String> {
    let signature: &[u8; 4] = bytes.first_chunk()?;

    if signature.is_ascii() {
        Some(sanitize(&decode_ascii(signature)))
    } else {
        Some(format!("{:02x}{:02x}", signature[0], signature[1]))
    }
}

/// Returns the file name stem for the table stored in `bytes`.
///
/// Returns [`None`] if the table is too small to be named.
pub fn table_stem(bytes: &[u8]) -> Option<String> {
    AcpiTableHeader::new(bytes)
        .ok()
        .and_then(|header| header_stem(&header))
        .or_else(|| fallback_stem(bytes))
}
