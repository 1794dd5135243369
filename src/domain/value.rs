use std::fmt;

use chrono::NaiveDate;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Twilio account SID (`AC...`), used as the basic-auth user and in resource paths.
///
/// Invariant: non-empty after trimming.
pub struct AccountSid(String);

impl AccountSid {
    pub const FIELD: &'static str = "AccountSid";

    /// Create a validated [`AccountSid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated SID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq)]
/// Twilio auth token, used as the basic-auth password.
///
/// Invariant: non-empty after trimming. `Debug` output never contains the token.
pub struct AuthToken(String);

impl AuthToken {
    pub const FIELD: &'static str = "AuthToken";

    /// Create a validated [`AuthToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unvalidated phone number as sent to Twilio (`From`, `To`, lookups).
///
/// Invariant: non-empty after trimming. The number is passed through as given; Twilio
/// expects E.164 (`+15551231234`).
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    pub const FIELD: &'static str = "phone number";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to Twilio.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message text (`Body`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageBody(String);

impl MessageBody {
    pub const FIELD: &'static str = "Body";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Absolute URL Twilio fetches or posts to (TwiML, status callbacks, media).
pub struct CallbackUrl(url::Url);

impl CallbackUrl {
    pub const FIELD: &'static str = "callback";

    /// Parse an absolute `http`/`https` URL.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        let invalid = || ValidationError::InvalidUrl {
            field: Self::FIELD,
            input: trimmed.to_owned(),
        };
        let parsed = url::Url::parse(trimmed).map_err(|_| invalid())?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid());
        }
        Ok(Self(parsed))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SID of a Twilio application (`AP...`) whose configured URLs handle a call or message.
///
/// Invariant: non-empty after trimming.
pub struct ApplicationSid(String);

impl ApplicationSid {
    pub const FIELD: &'static str = "ApplicationSid";

    /// Create a validated [`ApplicationSid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Seconds Twilio lets an outgoing call ring before giving up (`Timeout`).
///
/// Invariant: `1..=600`.
pub struct CallTimeout(u32);

impl CallTimeout {
    pub const FIELD: &'static str = "Timeout";

    pub const MIN: u32 = 1;
    pub const MAX: u32 = 600;

    /// Create a validated timeout.
    pub fn new(seconds: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&seconds) {
            return Err(ValidationError::TimeoutOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: seconds,
            });
        }
        Ok(Self(seconds))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Calendar day used by list filters; always rendered as `YYYY-MM-DD`.
pub struct QueryDate(NaiveDate);

impl QueryDate {
    /// Wire format of the date filters.
    pub const FORMAT: &'static str = "%Y-%m-%d";

    /// Parse a pre-formatted `YYYY-MM-DD` string.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        NaiveDate::parse_from_str(trimmed, Self::FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                input: trimmed.to_owned(),
            })
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }

    /// `YYYY-MM-DD` form as sent to Twilio.
    pub fn to_ymd(self) -> String {
        self.0.format(Self::FORMAT).to_string()
    }
}

impl From<NaiveDate> for QueryDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl TryFrom<&str> for QueryDate {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl fmt::Display for QueryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ymd())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// HTTP method Twilio uses when requesting a callback URL.
pub enum HttpMethod {
    Get,
    #[default]
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}
