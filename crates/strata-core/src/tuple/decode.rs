//! Module: tuple::decode
//! Responsibility: tag dispatch and payload parsing for encoded elements.
//! Does not own: the byte layouts themselves (see `tuple::encode`).
//! Boundary: consumes exactly the bytes of one element and leaves trailing
//! bytes untouched for subsequent elements.

use crate::{
    error::{DecodeError, Error},
    slice::SliceReader,
    tuple::{Element, tag::ElementTag},
};

const INT_PAYLOAD_LEN: usize = 8;

/// Read one element at `element_index`, advancing the reader past exactly
/// the bytes that element consumed.
pub(crate) fn read_element(
    reader: &mut SliceReader<'_>,
    element_index: usize,
) -> Result<Element, Error> {
    let tag_byte = reader.read_u8().map_err(|_| DecodeError::Truncated {
        element: element_index,
        context: "type tag",
    })?;

    let tag = ElementTag::from_u8(tag_byte).ok_or(DecodeError::UnknownTag {
        tag: tag_byte,
        element: element_index,
    })?;

    read_payload(reader, tag, element_index)
}

fn read_payload(
    reader: &mut SliceReader<'_>,
    tag: ElementTag,
    element: usize,
) -> Result<Element, Error> {
    match tag {
        ElementTag::Null => Ok(Element::Null),
        ElementTag::Bytes => Ok(Element::Bytes(read_terminated(reader, element)?)),
        ElementTag::Text => {
            let bytes = read_terminated(reader, element)?;
            let text =
                String::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 { element })?;
            Ok(Element::Text(text))
        }
        ElementTag::Tuple => read_nested(reader, element),
        ElementTag::Int => {
            let bytes = reader
                .read_bytes(INT_PAYLOAD_LEN)
                .map_err(|_| DecodeError::Truncated {
                    element,
                    context: "integer payload",
                })?;
            let mut buf = [0u8; INT_PAYLOAD_LEN];
            buf.copy_from_slice(bytes);
            let biased = u64::from_be_bytes(buf);
            Ok(Element::Int((biased ^ (1u64 << 63)).cast_signed()))
        }
        ElementTag::Bool => {
            let byte = reader.read_u8().map_err(|_| DecodeError::Truncated {
                element,
                context: "boolean payload",
            })?;
            match byte {
                0 => Ok(Element::Bool(false)),
                1 => Ok(Element::Bool(true)),
                _ => Err(DecodeError::InvalidPayload {
                    element,
                    context: "boolean byte must be 0 or 1",
                }
                .into()),
            }
        }
    }
}

// Undo the null-escaped terminated framing.
fn read_terminated(reader: &mut SliceReader<'_>, element: usize) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();

    loop {
        let byte = reader.read_u8().map_err(|_| DecodeError::Truncated {
            element,
            context: "terminated payload",
        })?;

        if byte != 0 {
            out.push(byte);
            continue;
        }

        let next = reader.read_u8().map_err(|_| DecodeError::Truncated {
            element,
            context: "payload terminator",
        })?;
        match next {
            0x00 => return Ok(out),
            0xFF => out.push(0x00),
            _ => {
                return Err(DecodeError::InvalidPayload {
                    element,
                    context: "invalid escape after 0x00",
                }
                .into());
            }
        }
    }
}

// Nested tuples carry their own element stream up to the terminator.
// At element-boundary positions a 0x00 byte is either the terminator
// ([0x00, 0x00]) or an escaped inner Null ([0x00, 0xFF]).
fn read_nested(reader: &mut SliceReader<'_>, element: usize) -> Result<Element, Error> {
    let mut elements = Vec::new();

    loop {
        match reader.peek() {
            None => {
                return Err(DecodeError::Truncated {
                    element,
                    context: "nested tuple terminator",
                }
                .into());
            }
            Some(0x00) => {
                reader.read_u8().map_err(|_| DecodeError::Truncated {
                    element,
                    context: "nested tuple marker",
                })?;
                let next = reader.read_u8().map_err(|_| DecodeError::Truncated {
                    element,
                    context: "nested tuple marker",
                })?;
                match next {
                    0x00 => return Ok(Element::Tuple(elements)),
                    0xFF => elements.push(Element::Null),
                    _ => {
                        return Err(DecodeError::InvalidPayload {
                            element,
                            context: "invalid marker inside nested tuple",
                        }
                        .into());
                    }
                }
            }
            Some(_) => {
                let nested = read_element(reader, element)?;
                elements.push(nested);
            }
        }
    }
}
