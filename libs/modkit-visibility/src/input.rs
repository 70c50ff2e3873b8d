use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};

/// Key of one raw visibility entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlagKey {
    /// `visibility[imported]=only`: the key is the scope name.
    Named(String),
    /// `visibility[]=imported|only`: the value carries `"flag|mode"`.
    Positional(usize),
    /// `visibility[3]=...`: a numeric key, either a list index or a numeric scope name.
    ///
    /// Resolved during normalization: a value containing the delimiter is split
    /// like a positional entry, otherwise the key is looked up as a scope.
    Indexed(String),
}

impl FlagKey {
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            FlagKey::Indexed(raw.to_owned())
        } else {
            FlagKey::Named(raw.to_owned())
        }
    }
}

/// Raw visibility input as supplied by a caller, before normalization.
///
/// Deserializes from a string (`"only"`, `"imported|with"`), a list of
/// `"flag|mode"` strings, or a map of `flag -> mode`. Non-string values are
/// dropped rather than failing the whole input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum VisibilityInput {
    #[default]
    Empty,
    /// Either a global mode directive or one `"flag|mode"` pair.
    Single(String),
    /// Entries in caller order.
    Pairs(Vec<(FlagKey, String)>),
}

impl VisibilityInput {
    #[must_use]
    pub fn single(raw: impl Into<String>) -> Self {
        Self::Single(raw.into())
    }

    /// Build from `flag -> mode` pairs.
    pub fn named<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Pairs(
            pairs
                .into_iter()
                .map(|(k, v)| (FlagKey::Named(k.into()), v.into()))
                .collect(),
        )
    }

    /// Build from a list of `"flag|mode"` strings.
    pub fn list<I, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self::Pairs(
            entries
                .into_iter()
                .enumerate()
                .map(|(i, v)| (FlagKey::Positional(i), v.into()))
                .collect(),
        )
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Single(_) => false,
            Self::Pairs(pairs) => pairs.is_empty(),
        }
    }
}

/// A string value, or anything else (which is ignored).
enum RawValue {
    Str(String),
    Other,
}

impl<'de> serde::Deserialize<'de> for RawValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawValueVisitor;

        impl<'de> Visitor<'de> for RawValueVisitor {
            type Value = RawValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("any value")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<RawValue, E> {
                Ok(RawValue::Str(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<RawValue, E> {
                Ok(RawValue::Str(v))
            }

            fn visit_bool<E: de::Error>(self, _: bool) -> Result<RawValue, E> {
                Ok(RawValue::Other)
            }

            fn visit_i64<E: de::Error>(self, _: i64) -> Result<RawValue, E> {
                Ok(RawValue::Other)
            }

            fn visit_u64<E: de::Error>(self, _: u64) -> Result<RawValue, E> {
                Ok(RawValue::Other)
            }

            fn visit_f64<E: de::Error>(self, _: f64) -> Result<RawValue, E> {
                Ok(RawValue::Other)
            }

            fn visit_unit<E: de::Error>(self) -> Result<RawValue, E> {
                Ok(RawValue::Other)
            }

            fn visit_none<E: de::Error>(self) -> Result<RawValue, E> {
                Ok(RawValue::Other)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RawValue, A::Error> {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(RawValue::Other)
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawValue, A::Error> {
                while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
                Ok(RawValue::Other)
            }
        }

        deserializer.deserialize_any(RawValueVisitor)
    }
}

impl<'de> serde::Deserialize<'de> for VisibilityInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct InputVisitor;

        impl<'de> Visitor<'de> for InputVisitor {
            type Value = VisibilityInput;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a visibility string, list or map")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<VisibilityInput, E> {
                Ok(VisibilityInput::Single(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<VisibilityInput, E> {
                Ok(VisibilityInput::Single(v))
            }

            fn visit_unit<E: de::Error>(self) -> Result<VisibilityInput, E> {
                Ok(VisibilityInput::Empty)
            }

            fn visit_none<E: de::Error>(self) -> Result<VisibilityInput, E> {
                Ok(VisibilityInput::Empty)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<VisibilityInput, A::Error> {
                let mut pairs = Vec::new();
                let mut index = 0usize;
                while let Some(value) = seq.next_element::<RawValue>()? {
                    if let RawValue::Str(s) = value {
                        pairs.push((FlagKey::Positional(index), s));
                    }
                    index += 1;
                }
                Ok(VisibilityInput::Pairs(pairs))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<VisibilityInput, A::Error> {
                let mut pairs = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, RawValue>()? {
                    if let RawValue::Str(s) = value {
                        pairs.push((FlagKey::from_raw(&key), s));
                    }
                }
                Ok(VisibilityInput::Pairs(pairs))
            }
        }

        deserializer.deserialize_any(InputVisitor)
    }
}
