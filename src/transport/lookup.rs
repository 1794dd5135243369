use serde::Deserialize;

use super::TransportError;
use crate::domain::{Carrier, Lookup, LookupRequest};

#[derive(Debug, Clone, Deserialize)]
struct LookupJsonResponse {
    #[serde(default)]
    carrier: Option<CarrierJson>,
    #[serde(default)]
    country_code: String,
    #[serde(default)]
    national_format: Option<String>,
    phone_number: String,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct CarrierJson {
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    mobile_country_code: Option<String>,
    #[serde(default)]
    mobile_network_code: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "type")]
    carrier_type: Option<String>,
}

/// Query pairs for `GET PhoneNumbers/{number}`.
pub fn encode_lookup_query(request: &LookupRequest) -> Vec<(String, String)> {
    let mut params = Vec::new();
    if let Some(kind) = request.kind() {
        params.push(("Type".to_owned(), kind.as_str().to_owned()));
    }
    if let Some(country_code) = request.country_code() {
        params.push(("CountryCode".to_owned(), country_code.to_owned()));
    }
    params
}

pub fn decode_lookup_json_response(json: &str) -> Result<Lookup, TransportError> {
    let parsed: LookupJsonResponse = serde_json::from_str(json)?;
    Ok(Lookup {
        carrier: parsed.carrier.map(|carrier| Carrier {
            error_code: carrier.error_code,
            mobile_country_code: carrier.mobile_country_code,
            mobile_network_code: carrier.mobile_network_code,
            name: carrier.name,
            carrier_type: carrier.carrier_type,
        }),
        country_code: parsed.country_code,
        national_format: parsed.national_format,
        phone_number: parsed.phone_number,
        url: parsed.url,
    })
}
