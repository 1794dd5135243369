use tracing::debug;

use crate::client::{BoxError, BoxFuture, TwilioClient, TwilioError};
use crate::domain::{Call, CallPage, Message, MessagePage, PageMeta};

/// One decoded page of a paginated Twilio listing.
///
/// [`ListIter`](crate::list::ListIter) is generic over this trait, so supporting
/// another listing only takes a new page type implementing it.
pub trait ResourcePage: Sized + Send + Sync + 'static {
    /// Record type the page holds.
    type Item: Clone + Send + Sync + 'static;

    /// Decode a page from a response body.
    fn decode(body: &str) -> Result<Self, BoxError>;

    /// Pagination metadata of this page.
    fn meta(&self) -> &PageMeta;

    /// Item at `index`.
    ///
    /// # Panics
    ///
    /// Panics unless `index < self.size()`.
    fn item_at(&self, index: usize) -> &Self::Item;

    /// Number of items on this page.
    fn size(&self) -> usize;

    fn has_next_page(&self) -> bool {
        self.meta().has_next_page()
    }

    /// Fetch the page after this one by following the server's `next_page_uri`
    /// on the client's API host.
    ///
    /// Resolves to `Ok(None)` without any request when there is no next page.
    fn fetch_next_page<'a>(
        &'a self,
        client: &'a TwilioClient,
    ) -> BoxFuture<'a, Result<Option<Self>, TwilioError>> {
        Box::pin(async move {
            let Some(uri) = self.meta().next_page_uri() else {
                return Ok(None);
            };
            let url = client.resolve_uri(uri);
            debug!(%url, "fetching next page");
            client.fetch_page::<Self>(&url).await.map(Some)
        })
    }
}

impl ResourcePage for CallPage {
    type Item = Call;

    fn decode(body: &str) -> Result<Self, BoxError> {
        Ok(crate::transport::decode_call_page_json(body)?)
    }

    fn meta(&self) -> &PageMeta {
        &self.meta
    }

    fn item_at(&self, index: usize) -> &Call {
        &self.calls[index]
    }

    fn size(&self) -> usize {
        self.calls.len()
    }
}

impl ResourcePage for MessagePage {
    type Item = Message;

    fn decode(body: &str) -> Result<Self, BoxError> {
        Ok(crate::transport::decode_message_page_json(body)?)
    }

    fn meta(&self) -> &PageMeta {
        &self.meta
    }

    fn item_at(&self, index: usize) -> &Message {
        &self.messages[index]
    }

    fn size(&self) -> usize {
        self.messages.len()
    }
}
