use chrono::{DateTime, FixedOffset};

use crate::domain::page::PageMeta;

/// Twilio error payload (`code`, `message`, `more_info`, `status`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestException {
    pub code: Option<i64>,
    pub message: String,
    pub more_info: Option<String>,
    pub status: Option<u16>,
}

impl std::fmt::Display for RestException {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(code) = self.code {
            write!(f, "Code {code}: {}", self.message)
        } else if let Some(status) = self.status {
            write!(f, "Status {status}: {}", self.message)
        } else {
            f.write_str(&self.message)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallSubresources {
    pub notifications: Option<String>,
    pub recordings: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub sid: String,
    pub account_sid: String,
    pub annotation: Option<String>,
    pub answered_by: Option<String>,
    pub api_version: Option<String>,
    pub caller_name: Option<String>,
    pub date_created: Option<DateTime<FixedOffset>>,
    pub date_updated: Option<DateTime<FixedOffset>>,
    pub direction: Option<String>,
    pub duration: Option<u32>,
    pub forwarded_from: Option<String>,
    pub from: String,
    pub group_sid: Option<String>,
    pub parent_call_sid: Option<String>,
    pub phone_number_sid: Option<String>,
    pub start_time: Option<DateTime<FixedOffset>>,
    pub end_time: Option<DateTime<FixedOffset>>,
    pub status: String,
    pub subresource_uris: CallSubresources,
    pub to: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageSubresources {
    pub media: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sid: String,
    pub account_sid: String,
    pub api_version: Option<String>,
    pub body: String,
    pub date_created: Option<DateTime<FixedOffset>>,
    pub date_sent: Option<DateTime<FixedOffset>>,
    pub date_updated: Option<DateTime<FixedOffset>>,
    pub direction: Option<String>,
    pub error_code: Option<i64>,
    pub error_message: Option<String>,
    pub from: String,
    pub num_media: Option<u32>,
    pub num_segments: Option<u32>,
    pub status: String,
    pub subresource_uris: MessageSubresources,
    pub to: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carrier {
    pub error_code: Option<i64>,
    pub mobile_country_code: Option<String>,
    pub mobile_network_code: Option<String>,
    pub name: Option<String>,
    /// `mobile`, `landline` or `voip`.
    pub carrier_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub carrier: Option<Carrier>,
    pub country_code: String,
    pub national_format: Option<String>,
    pub phone_number: String,
    pub url: Option<String>,
}

/// One page of a call listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallPage {
    pub calls: Vec<Call>,
    pub meta: PageMeta,
}

/// One page of a message listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePage {
    pub messages: Vec<Message>,
    pub meta: PageMeta,
}
