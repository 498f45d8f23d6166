//! `Decode` implementations for the standard scalar types

use super::{DecodeError, Decoder, UnkeyedExt};

/// A type that can be read out of a [`Decoder`].
///
/// The type a leaf is declared as is fixed where the leaf is added, so the
/// engine only ever needs `T::decode` and `T::type_name`.
pub trait Decode: Sized {
    /// Read a value of this type.
    fn decode(decoder: &dyn Decoder<'_>) -> Result<Self, DecodeError>;

    /// Name used in type mismatch reports.
    fn type_name() -> String;
}

impl Decode for bool {
    fn decode(decoder: &dyn Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.decode_bool()
    }

    fn type_name() -> String {
        "bool".to_string()
    }
}

impl Decode for String {
    fn decode(decoder: &dyn Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.decode_string()
    }

    fn type_name() -> String {
        "String".to_string()
    }
}

impl Decode for f64 {
    fn decode(decoder: &dyn Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.decode_f64()
    }

    fn type_name() -> String {
        "f64".to_string()
    }
}

impl Decode for f32 {
    fn decode(decoder: &dyn Decoder<'_>) -> Result<Self, DecodeError> {
        let wide = decoder.decode_f64()?;
        let narrow = wide as f32;
        if wide.is_finite() && !narrow.is_finite() {
            return Err(DecodeError::mismatch("f32", format!("{} (out of range)", wide)));
        }
        Ok(narrow)
    }

    fn type_name() -> String {
        "f32".to_string()
    }
}

macro_rules! decode_integer {
    ($via:ident => $($ty:ty),+) => {
        $(
            impl Decode for $ty {
                fn decode(decoder: &dyn Decoder<'_>) -> Result<Self, DecodeError> {
                    let wide = decoder.$via()?;
                    <$ty>::try_from(wide).map_err(|_| {
                        DecodeError::mismatch(stringify!($ty), format!("{} (out of range)", wide))
                    })
                }

                fn type_name() -> String {
                    stringify!($ty).to_string()
                }
            }
        )+
    };
}

decode_integer!(decode_i64 => i8, i16, i32, i64, isize);
decode_integer!(decode_u64 => u8, u16, u32, u64, usize);

impl<T: Decode> Decode for Option<T> {
    fn decode(decoder: &dyn Decoder<'_>) -> Result<Self, DecodeError> {
        if decoder.is_null() {
            Ok(None)
        } else {
            T::decode(decoder).map(Some)
        }
    }

    fn type_name() -> String {
        format!("Option<{}>", T::type_name())
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(decoder: &dyn Decoder<'_>) -> Result<Self, DecodeError> {
        let items = decoder.unkeyed()?;
        (0..items.count())
            .map(|index| items.decode_scalar_at::<T>(index))
            .collect()
    }

    fn type_name() -> String {
        format!("Vec<{}>", T::type_name())
    }
}
