use serde::Deserialize;

use super::TransportError;
use super::call::CallJson;
use super::message::MessageJson;
use crate::domain::{CallPage, MessagePage, PageMeta};

#[derive(Debug, Clone, Deserialize)]
struct PageMetaJson {
    #[serde(default)]
    page: u32,
    #[serde(default)]
    page_size: u32,
    #[serde(default)]
    num_pages: Option<u32>,
    #[serde(default)]
    start: i64,
    #[serde(default)]
    end: i64,
    #[serde(default)]
    total: Option<u32>,
    #[serde(default)]
    uri: String,
    #[serde(default)]
    first_page_uri: Option<String>,
    #[serde(default)]
    last_page_uri: Option<String>,
    #[serde(default)]
    next_page_uri: Option<String>,
    #[serde(default)]
    previous_page_uri: Option<String>,
}

impl From<PageMetaJson> for PageMeta {
    fn from(value: PageMetaJson) -> Self {
        Self {
            page: value.page,
            page_size: value.page_size,
            num_pages: value.num_pages,
            start: value.start,
            end: value.end,
            total: value.total,
            uri: value.uri,
            first_page_uri: value.first_page_uri,
            last_page_uri: value.last_page_uri,
            next_page_uri: value.next_page_uri,
            previous_page_uri: value.previous_page_uri,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct CallPageJson {
    calls: Vec<CallJson>,
    #[serde(flatten)]
    meta: PageMetaJson,
}

#[derive(Debug, Clone, Deserialize)]
struct MessagePageJson {
    messages: Vec<MessageJson>,
    #[serde(flatten)]
    meta: PageMetaJson,
}

pub fn decode_call_page_json(json: &str) -> Result<CallPage, TransportError> {
    let parsed: CallPageJson = serde_json::from_str(json)?;
    Ok(CallPage {
        calls: parsed.calls.into_iter().map(Into::into).collect(),
        meta: parsed.meta.into(),
    })
}

pub fn decode_message_page_json(json: &str) -> Result<MessagePage, TransportError> {
    let parsed: MessagePageJson = serde_json::from_str(json)?;
    Ok(MessagePage {
        messages: parsed.messages.into_iter().map(Into::into).collect(),
        meta: parsed.meta.into(),
    })
}
