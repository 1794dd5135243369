//! List layer: lazy iteration over paginated listings (calls, messages).
//!
//! A [`ListQuery`] collects filters and produces one [`ListIter`]; the iterator
//! walks the listing page by page through a [`ResourcePage`] implementation.

mod iter;
mod query;
mod resource;

pub use iter::{CallIter, ListIter, MessageIter};
pub use query::{CallListQuery, ListQuery, MessageListQuery};
pub use resource::ResourcePage;
