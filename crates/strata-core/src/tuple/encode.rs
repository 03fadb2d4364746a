//! Module: tuple::encode
//! Responsibility: element-to-bytes transforms preserving value order.
//! Does not own: tag assignment or decode dispatch.
//! Boundary: every byte written here is persisted; layouts are frozen.

use crate::{slice::SliceWriter, tuple::Element};

// Terminator and escape for variable-length payloads. A raw 0x00 inside
// the payload becomes [0x00, 0xFF]; the payload ends with [0x00, 0x00].
// Under this framing no encoding is a byte-prefix of a different value's
// encoding and byte order equals raw lexicographic order.
pub(super) const ESCAPED_NULL: [u8; 2] = [0x00, 0xFF];
pub(super) const TERMINATOR: [u8; 2] = [0x00, 0x00];

/// Write one element, tag byte first, then its order-preserving payload.
pub(crate) fn write_element(writer: &mut SliceWriter, element: &Element) {
    writer.push(element.tag().to_u8());
    write_payload(writer, element);
}

fn write_payload(writer: &mut SliceWriter, element: &Element) {
    match element {
        Element::Null => {}
        Element::Bytes(bytes) => write_terminated(writer, bytes),
        Element::Text(text) => write_terminated(writer, text.as_bytes()),
        Element::Tuple(elements) => {
            for nested in elements {
                // An inner Null is escaped so the element stream cannot be
                // confused with the tuple terminator.
                if matches!(nested, Element::Null) {
                    writer.extend_from_slice(&ESCAPED_NULL);
                } else {
                    write_element(writer, nested);
                }
            }
            writer.extend_from_slice(&TERMINATOR);
        }
        Element::Int(value) => writer.extend_from_slice(&ordered_i64_bytes(*value)),
        Element::Bool(value) => writer.push(u8::from(*value)),
    }
}

// Null-escaped terminated byte string; preserves raw lexicographic order.
fn write_terminated(writer: &mut SliceWriter, bytes: &[u8]) {
    for &byte in bytes {
        if byte == 0 {
            writer.extend_from_slice(&ESCAPED_NULL);
        } else {
            writer.push(byte);
        }
    }

    writer.extend_from_slice(&TERMINATOR);
}

// Bias-shift into unsigned form so two's-complement order does not invert
// under byte comparison.
pub(super) const fn ordered_i64_bytes(value: i64) -> [u8; 8] {
    let biased = value.cast_unsigned() ^ (1u64 << 63);
    biased.to_be_bytes()
}
