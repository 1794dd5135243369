//! Typed Rust client for the Twilio REST API.
//!
//! The crate is split into a domain layer of strong types, a transport layer for
//! wire-format details, a client layer orchestrating requests, and a list layer
//! that streams paginated listings (calls, messages) one item at a time,
//! fetching pages only as they are needed.
//!
//! ```rust,no_run
//! use utwil::{Auth, MessageBody, QueryDate, RawPhoneNumber, TwilioClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TwilioClient::new(Auth::new("AC...", "...")?);
//!     let from = RawPhoneNumber::new("+15551231234")?;
//!     let to = RawPhoneNumber::new("+15553214321")?;
//!     client.send_sms(from.clone(), to, MessageBody::new("Hello, world!")?).await?;
//!
//!     let messages = client
//!         .messages()
//!         .from_number(from)
//!         .sent_after(QueryDate::parse("2014-01-01")?)
//!         .iter();
//!     while let Some(msg) = messages.try_next().await {
//!         println!("{}: {}", msg.sid, msg.body);
//!     }
//!     if let Some(err) = messages.last_error().await {
//!         eprintln!("listing failed: {err}");
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod list;
mod transport;

pub use client::{
    API_VERSION, Auth, BoxError, BoxFuture, HttpResponse, HttpTransport, TwilioClient,
    TwilioClientBuilder, TwilioError,
};
pub use domain::{
    AccountSid, ApplicationSid, AuthToken, Call, CallOptions, CallPage, CallRequest, CallTarget,
    CallTimeout, CallbackUrl, Carrier, HttpMethod, IfMachine, Lookup, LookupRequest, LookupType,
    Message, MessageBody, MessageOptions, MessagePage, MessageRequest, PageMeta,
    QueryDate, RawPhoneNumber, RestException, ValidationError,
};
pub use list::{
    CallIter, CallListQuery, ListIter, ListQuery, MessageIter, MessageListQuery, ResourcePage,
};
