//! Domain layer: strong types with validation and invariants (no I/O).

mod page;
mod request;
mod response;
mod validation;
mod value;

pub use page::PageMeta;
pub use request::{
    CallOptions, CallRequest, CallTarget, IfMachine, LookupRequest, LookupType, MessageOptions,
    MessageRequest,
};
pub use response::{
    Call, CallPage, CallSubresources, Carrier, Lookup, Message, MessagePage, MessageSubresources,
    RestException,
};
pub use validation::ValidationError;
pub use value::{
    AccountSid, ApplicationSid, AuthToken, CallTimeout, CallbackUrl, HttpMethod, MessageBody,
    QueryDate, RawPhoneNumber,
};
