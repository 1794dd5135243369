//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod call;
mod error;
mod lookup;
mod message;
mod page;
mod scalar;

pub use call::{decode_call_json_response, encode_call_form};
pub use error::decode_rest_exception;
pub use lookup::{decode_lookup_json_response, encode_lookup_query};
pub use message::{decode_message_json_response, encode_message_form};
pub use page::{decode_call_page_json, decode_message_page_json};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}
