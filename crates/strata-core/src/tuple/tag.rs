//! Module: tuple::tag
//! Responsibility: stable type-tag assignment for encoded tuple elements.
//! Does not own: payload encoding or framing.
//! Boundary: consumed by tuple encode/decode.

///
/// ElementTag
///
/// Encoded type discriminator written before every element payload.
///
/// IMPORTANT:
/// Tag values are persisted inside store keys and must remain fixed
/// forever. The tag byte also fixes the cross-type sort order:
/// Null < Bytes < Text < Tuple < Int < Bool. Null deliberately sorts
/// before every other tag.
///

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ElementTag {
    Null = 0x00,
    Bytes = 0x01,
    Text = 0x02,
    Tuple = 0x03,
    Int = 0x04,
    Bool = 0x05,
}

impl ElementTag {
    /// Stable wire byte for this tag.
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    pub(crate) const fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Self::Null),
            0x01 => Some(Self::Bytes),
            0x02 => Some(Self::Text),
            0x03 => Some(Self::Tuple),
            0x04 => Some(Self::Int),
            0x05 => Some(Self::Bool),
            _ => None,
        }
    }
}
