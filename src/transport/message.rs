use serde::Deserialize;

use super::TransportError;
use super::scalar::{TransportCount, TransportTime};
use crate::domain::{ApplicationSid, Message, MessageBody, MessageRequest, MessageSubresources};

#[derive(Debug, Clone, Deserialize)]
pub(super) struct MessageJson {
    sid: String,
    #[serde(default)]
    account_sid: String,
    #[serde(default)]
    api_version: Option<String>,
    #[serde(default)]
    body: String,
    #[serde(default)]
    date_created: Option<TransportTime>,
    #[serde(default)]
    date_sent: Option<TransportTime>,
    #[serde(default)]
    date_updated: Option<TransportTime>,
    #[serde(default)]
    direction: Option<String>,
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    from: String,
    #[serde(default)]
    num_media: Option<TransportCount>,
    #[serde(default)]
    num_segments: Option<TransportCount>,
    #[serde(default)]
    status: String,
    #[serde(default)]
    subresource_uris: Option<MessageSubresourcesJson>,
    #[serde(default)]
    to: String,
    #[serde(default)]
    uri: String,
}

#[derive(Debug, Clone, Deserialize)]
struct MessageSubresourcesJson {
    #[serde(default)]
    media: Option<String>,
}

impl From<MessageJson> for Message {
    fn from(value: MessageJson) -> Self {
        Self {
            sid: value.sid,
            account_sid: value.account_sid,
            api_version: value.api_version,
            body: value.body,
            date_created: value.date_created.map(TransportTime::into_datetime),
            date_sent: value.date_sent.map(TransportTime::into_datetime),
            date_updated: value.date_updated.map(TransportTime::into_datetime),
            direction: value.direction,
            error_code: value.error_code,
            error_message: value.error_message,
            from: value.from,
            num_media: value.num_media.and_then(TransportCount::into_u32),
            num_segments: value.num_segments.and_then(TransportCount::into_u32),
            status: value.status,
            subresource_uris: MessageSubresources {
                media: value.subresource_uris.and_then(|uris| uris.media),
            },
            to: value.to,
            uri: value.uri,
        }
    }
}

pub fn encode_message_form(request: &MessageRequest) -> Vec<(String, String)> {
    let mut params = vec![
        ("From".to_owned(), request.from().raw().to_owned()),
        ("To".to_owned(), request.to().raw().to_owned()),
        (
            MessageBody::FIELD.to_owned(),
            request.body().as_str().to_owned(),
        ),
    ];

    let options = request.options();
    if let Some(media_url) = options.media_url.as_ref() {
        params.push(("MediaUrl".to_owned(), media_url.as_str().to_owned()));
    }
    if let Some(callback) = options.status_callback.as_ref() {
        params.push(("StatusCallback".to_owned(), callback.as_str().to_owned()));
    }
    if let Some(app) = options.application_sid.as_ref() {
        params.push((ApplicationSid::FIELD.to_owned(), app.as_str().to_owned()));
    }

    params
}

pub fn decode_message_json_response(json: &str) -> Result<Message, TransportError> {
    let parsed: MessageJson = serde_json::from_str(json)?;
    Ok(parsed.into())
}
