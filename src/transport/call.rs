use serde::Deserialize;

use super::TransportError;
use super::scalar::{TransportCount, TransportTime};
use crate::domain::{
    ApplicationSid, Call, CallRequest, CallSubresources, CallTarget, CallTimeout, CallbackUrl,
};

#[derive(Debug, Clone, Deserialize)]
pub(super) struct CallJson {
    sid: String,
    #[serde(default)]
    account_sid: String,
    #[serde(default)]
    annotation: Option<String>,
    #[serde(default)]
    answered_by: Option<String>,
    #[serde(default)]
    api_version: Option<String>,
    #[serde(default)]
    caller_name: Option<String>,
    #[serde(default)]
    date_created: Option<TransportTime>,
    #[serde(default)]
    date_updated: Option<TransportTime>,
    #[serde(default)]
    direction: Option<String>,
    #[serde(default)]
    duration: Option<TransportCount>,
    #[serde(default)]
    forwarded_from: Option<String>,
    #[serde(default)]
    from: String,
    #[serde(default)]
    group_sid: Option<String>,
    #[serde(default)]
    parent_call_sid: Option<String>,
    #[serde(default)]
    phone_number_sid: Option<String>,
    #[serde(default)]
    start_time: Option<TransportTime>,
    #[serde(default)]
    end_time: Option<TransportTime>,
    #[serde(default)]
    status: String,
    #[serde(default)]
    subresource_uris: Option<CallSubresourcesJson>,
    #[serde(default)]
    to: String,
    #[serde(default)]
    uri: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CallSubresourcesJson {
    #[serde(default)]
    notifications: Option<String>,
    #[serde(default)]
    recordings: Option<String>,
}

impl From<CallJson> for Call {
    fn from(value: CallJson) -> Self {
        Self {
            sid: value.sid,
            account_sid: value.account_sid,
            annotation: value.annotation,
            answered_by: value.answered_by,
            api_version: value.api_version,
            caller_name: value.caller_name,
            date_created: value.date_created.map(TransportTime::into_datetime),
            date_updated: value.date_updated.map(TransportTime::into_datetime),
            direction: value.direction,
            duration: value.duration.and_then(TransportCount::into_u32),
            forwarded_from: value.forwarded_from,
            from: value.from,
            group_sid: value.group_sid,
            parent_call_sid: value.parent_call_sid,
            phone_number_sid: value.phone_number_sid,
            start_time: value.start_time.map(TransportTime::into_datetime),
            end_time: value.end_time.map(TransportTime::into_datetime),
            status: value.status,
            subresource_uris: value
                .subresource_uris
                .map(|uris| CallSubresources {
                    notifications: uris.notifications,
                    recordings: uris.recordings,
                })
                .unwrap_or_default(),
            to: value.to,
            uri: value.uri,
        }
    }
}

/// Form fields for `POST Calls.json`; optional fields are only sent when set.
pub fn encode_call_form(request: &CallRequest) -> Vec<(String, String)> {
    let mut params = vec![
        ("From".to_owned(), request.from().raw().to_owned()),
        ("To".to_owned(), request.to().raw().to_owned()),
    ];

    match request.target() {
        CallTarget::Url(url) => push_url(&mut params, "Url", Some(url)),
        CallTarget::Application(app) => {
            params.push((ApplicationSid::FIELD.to_owned(), app.as_str().to_owned()));
        }
    }

    let options = request.options();
    if let Some(method) = options.method {
        params.push(("Method".to_owned(), method.as_str().to_owned()));
    }
    push_url(&mut params, "FallbackUrl", options.fallback_url.as_ref());
    if let Some(method) = options.fallback_method {
        params.push(("FallbackMethod".to_owned(), method.as_str().to_owned()));
    }
    push_url(&mut params, "StatusCallback", options.status_callback.as_ref());
    if let Some(method) = options.status_callback_method {
        params.push(("StatusCallbackMethod".to_owned(), method.as_str().to_owned()));
    }
    if let Some(digits) = options.send_digits.as_deref().filter(|d| !d.is_empty()) {
        params.push(("SendDigits".to_owned(), digits.to_owned()));
    }
    if let Some(if_machine) = options.if_machine {
        params.push(("IfMachine".to_owned(), if_machine.as_str().to_owned()));
    }
    if let Some(timeout) = options.timeout {
        params.push((CallTimeout::FIELD.to_owned(), timeout.value().to_string()));
    }
    if options.record {
        params.push(("Record".to_owned(), "true".to_owned()));
    }

    params
}

fn push_url(params: &mut Vec<(String, String)>, key: &str, url: Option<&CallbackUrl>) {
    if let Some(url) = url {
        params.push((key.to_owned(), url.as_str().to_owned()));
    }
}

pub fn decode_call_json_response(json: &str) -> Result<Call, TransportError> {
    let parsed: CallJson = serde_json::from_str(json)?;
    Ok(parsed.into())
}
