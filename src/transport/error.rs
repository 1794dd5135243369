use serde::Deserialize;

use super::scalar::TransportCount;
use crate::domain::RestException;

#[derive(Debug, Clone, Deserialize)]
struct RestExceptionJson {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    more_info: Option<String>,
    #[serde(default)]
    status: Option<TransportCount>,
}

/// Decode Twilio's error body; `None` when the body is not a recognizable exception.
pub fn decode_rest_exception(body: &str) -> Option<RestException> {
    let parsed: RestExceptionJson = serde_json::from_str(body).ok()?;
    if parsed.code.is_none() && parsed.message.is_none() {
        return None;
    }
    Some(RestException {
        code: parsed.code,
        message: parsed.message.unwrap_or_default(),
        more_info: parsed.more_info,
        status: parsed.status.and_then(TransportCount::into_u16),
    })
}
