use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

/// Completion flag as it appears on the wire: written as `0`/`1`, read from
/// `0`, `1`, `true` or `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DoneFlag(pub bool);

impl From<bool> for DoneFlag {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl From<DoneFlag> for bool {
    fn from(flag: DoneFlag) -> Self {
        flag.0
    }
}

impl Serialize for DoneFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(self.0))
    }
}

impl<'de> Deserialize<'de> for DoneFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DoneFlagVisitor)
    }
}

struct DoneFlagVisitor;

impl Visitor<'_> for DoneFlagVisitor {
    type Value = DoneFlag;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("0, 1, true or false")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<DoneFlag, E> {
        Ok(DoneFlag(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<DoneFlag, E> {
        match value {
            0 => Ok(DoneFlag(false)),
            1 => Ok(DoneFlag(true)),
            _ => Err(E::invalid_value(de::Unexpected::Unsigned(value), &self)),
        }
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<DoneFlag, E> {
        match u64::try_from(value) {
            Ok(value) => self.visit_u64(value),
            Err(_) => Err(E::invalid_value(de::Unexpected::Signed(value), &self)),
        }
    }
}
