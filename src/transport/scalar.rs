use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde::de::Error as DeError;

/// Timestamp Twilio renders in RFC 2822 form (`Tue, 31 Aug 2010 20:36:28 +0000`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportTime(DateTime<FixedOffset>);

impl TransportTime {
    pub fn into_datetime(self) -> DateTime<FixedOffset> {
        self.0
    }
}

impl<'de> Deserialize<'de> for TransportTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc2822(raw.trim())
            .map(Self)
            .map_err(|err| D::Error::custom(format!("invalid RFC 2822 timestamp {raw:?}: {err}")))
    }
}

/// Count Twilio sends as either a JSON number or a numeric string (`"15"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TransportCount {
    Int(u64),
    String(String),
}

impl TransportCount {
    pub fn into_u32(self) -> Option<u32> {
        match self {
            Self::Int(value) => u32::try_from(value).ok(),
            Self::String(value) => value.trim().parse::<u32>().ok(),
        }
    }

    pub fn into_u16(self) -> Option<u16> {
        self.into_u32().and_then(|value| u16::try_from(value).ok())
    }
}
