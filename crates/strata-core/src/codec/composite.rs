//! Module: codec::composite
//! Responsibility: fixed-arity composite key codecs (2..6 parts).
//! Does not own: the per-part byte layouts.
//! Boundary: parts are concatenated back-to-back with no separators beyond
//! each sub-encoding's own framing; `head()` peels the arity down one part
//! at a time so callers can encode key prefixes for range scans.

use crate::{
    codec::KeyCodec,
    error::Error,
    slice::{Slice, SliceReader, SliceWriter},
};
use std::sync::Arc;

macro_rules! define_composite {
    (
        $(#[$doc:meta])*
        $name:ident, ($($idx:tt => $field:ident : $ty:ident),+)
    ) => {
        $(#[$doc])*
        pub struct $name<$($ty),+> {
            $($field: Arc<dyn KeyCodec<$ty>>),+
        }

        impl<$($ty),+> Clone for $name<$($ty),+> {
            fn clone(&self) -> Self {
                Self {
                    $($field: Arc::clone(&self.$field)),+
                }
            }
        }

        impl<$($ty),+> $name<$($ty),+> {
            /// Decode this composite's own parts, returning them together
            /// with the unconsumed remainder. Longer composite keys built
            /// from orthogonal sub-encoders extend this one as a prefix.
            pub fn decode_prefix(&self, encoded: &Slice) -> Result<(($($ty,)+), Slice), Error> {
                let mut reader = SliceReader::new(encoded.as_bytes());
                let parts = ($(
                    self.$field
                        .read_key(&mut reader)
                        .map_err(|err| err.at_element($idx))?,
                )+);
                let rest = Slice::copy_from(reader.read_to_end());

                Ok((parts, rest))
            }
        }

        impl<$($ty),+> KeyCodec<($($ty,)+)> for $name<$($ty),+> {
            fn write_key(
                &self,
                writer: &mut SliceWriter,
                value: &($($ty,)+),
            ) -> Result<(), Error> {
                $(self.$field.write_key(writer, &value.$idx)?;)+
                Ok(())
            }

            fn read_key(&self, reader: &mut SliceReader<'_>) -> Result<($($ty,)+), Error> {
                Ok(($(
                    self.$field
                        .read_key(reader)
                        .map_err(|err| err.at_element($idx))?,
                )+))
            }
        }
    };
}

define_composite!(
    /// Composite codec over an ordered pair.
    Composite2, (0 => first : T1, 1 => second : T2)
);
define_composite!(
    /// Composite codec over an ordered triple.
    Composite3, (0 => first : T1, 1 => second : T2, 2 => third : T3)
);
define_composite!(
    /// Composite codec over four ordered parts.
    Composite4, (0 => first : T1, 1 => second : T2, 2 => third : T3, 3 => fourth : T4)
);
define_composite!(
    /// Composite codec over five ordered parts.
    Composite5,
    (0 => first : T1, 1 => second : T2, 2 => third : T3, 3 => fourth : T4, 4 => fifth : T5)
);
define_composite!(
    /// Composite codec over six ordered parts.
    Composite6,
    (0 => first : T1, 1 => second : T2, 2 => third : T3, 3 => fourth : T4, 4 => fifth : T5,
     5 => sixth : T6)
);

/// Build a two-part composite codec.
pub fn composite2<T1, T2>(
    first: impl KeyCodec<T1> + 'static,
    second: impl KeyCodec<T2> + 'static,
) -> Composite2<T1, T2> {
    Composite2 {
        first: Arc::new(first),
        second: Arc::new(second),
    }
}

/// Build a three-part composite codec.
pub fn composite3<T1, T2, T3>(
    first: impl KeyCodec<T1> + 'static,
    second: impl KeyCodec<T2> + 'static,
    third: impl KeyCodec<T3> + 'static,
) -> Composite3<T1, T2, T3> {
    Composite3 {
        first: Arc::new(first),
        second: Arc::new(second),
        third: Arc::new(third),
    }
}

/// Build a four-part composite codec.
pub fn composite4<T1, T2, T3, T4>(
    first: impl KeyCodec<T1> + 'static,
    second: impl KeyCodec<T2> + 'static,
    third: impl KeyCodec<T3> + 'static,
    fourth: impl KeyCodec<T4> + 'static,
) -> Composite4<T1, T2, T3, T4> {
    Composite4 {
        first: Arc::new(first),
        second: Arc::new(second),
        third: Arc::new(third),
        fourth: Arc::new(fourth),
    }
}

/// Build a five-part composite codec.
pub fn composite5<T1, T2, T3, T4, T5>(
    first: impl KeyCodec<T1> + 'static,
    second: impl KeyCodec<T2> + 'static,
    third: impl KeyCodec<T3> + 'static,
    fourth: impl KeyCodec<T4> + 'static,
    fifth: impl KeyCodec<T5> + 'static,
) -> Composite5<T1, T2, T3, T4, T5> {
    Composite5 {
        first: Arc::new(first),
        second: Arc::new(second),
        third: Arc::new(third),
        fourth: Arc::new(fourth),
        fifth: Arc::new(fifth),
    }
}

/// Build a six-part composite codec.
pub fn composite6<T1, T2, T3, T4, T5, T6>(
    first: impl KeyCodec<T1> + 'static,
    second: impl KeyCodec<T2> + 'static,
    third: impl KeyCodec<T3> + 'static,
    fourth: impl KeyCodec<T4> + 'static,
    fifth: impl KeyCodec<T5> + 'static,
    sixth: impl KeyCodec<T6> + 'static,
) -> Composite6<T1, T2, T3, T4, T5, T6> {
    Composite6 {
        first: Arc::new(first),
        second: Arc::new(second),
        third: Arc::new(third),
        fourth: Arc::new(fourth),
        fifth: Arc::new(fifth),
        sixth: Arc::new(sixth),
    }
}

// head(): encode the first K of N parts by peeling arity one step at a
// time. `Composite2::head()` bottoms out at the bare first sub-codec.

impl<T1, T2> Composite2<T1, T2> {
    /// The first sub-codec alone (a 1-of-2 key prefix).
    #[must_use]
    pub fn head(&self) -> Arc<dyn KeyCodec<T1>> {
        Arc::clone(&self.first)
    }
}

impl<T1, T2, T3> Composite3<T1, T2, T3> {
    /// The first two parts as a 2-of-3 prefix composite.
    #[must_use]
    pub fn head(&self) -> Composite2<T1, T2> {
        Composite2 {
            first: Arc::clone(&self.first),
            second: Arc::clone(&self.second),
        }
    }
}

impl<T1, T2, T3, T4> Composite4<T1, T2, T3, T4> {
    /// The first three parts as a 3-of-4 prefix composite.
    #[must_use]
    pub fn head(&self) -> Composite3<T1, T2, T3> {
        Composite3 {
            first: Arc::clone(&self.first),
            second: Arc::clone(&self.second),
            third: Arc::clone(&self.third),
        }
    }
}

impl<T1, T2, T3, T4, T5> Composite5<T1, T2, T3, T4, T5> {
    /// The first four parts as a 4-of-5 prefix composite.
    #[must_use]
    pub fn head(&self) -> Composite4<T1, T2, T3, T4> {
        Composite4 {
            first: Arc::clone(&self.first),
            second: Arc::clone(&self.second),
            third: Arc::clone(&self.third),
            fourth: Arc::clone(&self.fourth),
        }
    }
}

impl<T1, T2, T3, T4, T5, T6> Composite6<T1, T2, T3, T4, T5, T6> {
    /// The first five parts as a 5-of-6 prefix composite.
    #[must_use]
    pub fn head(&self) -> Composite5<T1, T2, T3, T4, T5> {
        Composite5 {
            first: Arc::clone(&self.first),
            second: Arc::clone(&self.second),
            third: Arc::clone(&self.third),
            fourth: Arc::clone(&self.fourth),
            fifth: Arc::clone(&self.fifth),
        }
    }
}
