use crate::domain::value::{
    ApplicationSid, CallTimeout, CallbackUrl, HttpMethod, MessageBody, RawPhoneNumber,
};

/// What Twilio executes once an outgoing call connects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallTarget {
    /// Fetch TwiML from this URL (`Url`).
    Url(CallbackUrl),
    /// Use the voice URLs configured on an application (`ApplicationSid`).
    Application(ApplicationSid),
}

/// Answering-machine handling (`IfMachine`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IfMachine {
    Continue,
    Hangup,
}

impl IfMachine {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Continue => "Continue",
            Self::Hangup => "Hangup",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    pub method: Option<HttpMethod>,
    pub fallback_url: Option<CallbackUrl>,
    pub fallback_method: Option<HttpMethod>,
    pub status_callback: Option<CallbackUrl>,
    pub status_callback_method: Option<HttpMethod>,
    pub send_digits: Option<String>,
    pub if_machine: Option<IfMachine>,
    pub timeout: Option<CallTimeout>,
    pub record: bool,
}

#[derive(Debug, Clone)]
pub struct CallRequest {
    from: RawPhoneNumber,
    to: RawPhoneNumber,
    target: CallTarget,
    options: CallOptions,
}

impl CallRequest {
    pub fn new(
        from: RawPhoneNumber,
        to: RawPhoneNumber,
        target: CallTarget,
        options: CallOptions,
    ) -> Self {
        Self {
            from,
            to,
            target,
            options,
        }
    }

    pub fn from(&self) -> &RawPhoneNumber {
        &self.from
    }

    pub fn to(&self) -> &RawPhoneNumber {
        &self.to
    }

    pub fn target(&self) -> &CallTarget {
        &self.target
    }

    pub fn options(&self) -> &CallOptions {
        &self.options
    }
}

#[derive(Debug, Clone, Default)]
pub struct MessageOptions {
    pub media_url: Option<CallbackUrl>,
    pub status_callback: Option<CallbackUrl>,
    pub application_sid: Option<ApplicationSid>,
}

#[derive(Debug, Clone)]
pub struct MessageRequest {
    from: RawPhoneNumber,
    to: RawPhoneNumber,
    body: MessageBody,
    options: MessageOptions,
}

impl MessageRequest {
    pub fn new(
        from: RawPhoneNumber,
        to: RawPhoneNumber,
        body: MessageBody,
        options: MessageOptions,
    ) -> Self {
        Self {
            from,
            to,
            body,
            options,
        }
    }

    /// Plain SMS with no media and default options.
    pub fn sms(from: RawPhoneNumber, to: RawPhoneNumber, body: MessageBody) -> Self {
        Self::new(from, to, body, MessageOptions::default())
    }

    /// MMS carrying `media_url` alongside the text.
    pub fn mms(
        from: RawPhoneNumber,
        to: RawPhoneNumber,
        body: MessageBody,
        media_url: CallbackUrl,
    ) -> Self {
        Self::new(
            from,
            to,
            body,
            MessageOptions {
                media_url: Some(media_url),
                ..Default::default()
            },
        )
    }

    pub fn from(&self) -> &RawPhoneNumber {
        &self.from
    }

    pub fn to(&self) -> &RawPhoneNumber {
        &self.to
    }

    pub fn body(&self) -> &MessageBody {
        &self.body
    }

    pub fn options(&self) -> &MessageOptions {
        &self.options
    }
}

/// Extra data a lookup can include (`Type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupType {
    Carrier,
    CallerName,
}

impl LookupType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Carrier => "carrier",
            Self::CallerName => "caller-name",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LookupRequest {
    phone_number: RawPhoneNumber,
    kind: Option<LookupType>,
    country_code: Option<String>,
}

impl LookupRequest {
    pub fn new(phone_number: RawPhoneNumber) -> Self {
        Self {
            phone_number,
            kind: None,
            country_code: None,
        }
    }

    pub fn with_type(mut self, kind: LookupType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// ISO country used to interpret national-format numbers (`CountryCode`).
    pub fn with_country_code(mut self, country_code: impl Into<String>) -> Self {
        let country_code = country_code.into();
        let trimmed = country_code.trim();
        self.country_code = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        };
        self
    }

    pub fn phone_number(&self) -> &RawPhoneNumber {
        &self.phone_number
    }

    pub fn kind(&self) -> Option<LookupType> {
        self.kind
    }

    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }
}
