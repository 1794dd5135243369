use std::sync::Arc;

use futures::Stream;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::client::{TwilioClient, TwilioError};
use crate::domain::{CallPage, MessagePage};
use crate::list::ResourcePage;

pub type CallIter = ListIter<CallPage>;
pub type MessageIter = ListIter<MessagePage>;

struct IterState<P> {
    /// `None` until the first page has been fetched.
    page: Option<P>,
    /// Index of the next item on `page`; equal to `page.size()` once it is used up.
    cursor: usize,
    /// Set once; the iterator yields nothing after a failure.
    error: Option<Arc<TwilioError>>,
}

/// Lazy, thread-safe cursor over a paginated listing.
///
/// Pages are fetched on demand: the first one on the first [`ListIter::try_next`],
/// each following one only when the current page is used up. The iterator
/// always follows the `next_page_uri` the server returned.
///
/// A single lock guards the whole state and is held for the full duration of
/// `try_next`, page fetch included, so the iterator can be shared between tasks
/// (`Arc<ListIter<_>>`) and every item is handed out exactly once.
///
/// ```rust,no_run
/// # async fn demo(client: utwil::TwilioClient) -> Result<(), std::sync::Arc<utwil::TwilioError>> {
/// let calls = client.calls().iter();
/// while let Some(call) = calls.try_next().await {
///     println!("{} -> {}", call.from, call.to);
/// }
/// if let Some(err) = calls.last_error().await {
///     return Err(err);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ListIter<P: ResourcePage> {
    client: TwilioClient,
    initial_uri: String,
    state: Mutex<IterState<P>>,
}

impl<P: ResourcePage> ListIter<P> {
    pub(crate) fn new(client: TwilioClient, initial_uri: String) -> Self {
        Self {
            client,
            initial_uri,
            state: Mutex::new(IterState {
                page: None,
                cursor: 0,
                error: None,
            }),
        }
    }

    /// URI the first page is fetched from.
    pub fn initial_uri(&self) -> &str {
        &self.initial_uri
    }

    /// Pull the next item, fetching the next page first if needed.
    ///
    /// Returns `None` when the listing is exhausted or a fetch failed; use
    /// [`ListIter::last_error`] to tell the two apart. After a failure every
    /// further call returns `None` without touching the network.
    pub async fn try_next(&self) -> Option<P::Item> {
        let mut state = self.state.lock().await;
        if state.error.is_some() {
            return None;
        }

        match self.advance(&mut state).await {
            Ok(item) => item,
            Err(err) => {
                warn!(uri = %self.initial_uri, error = %err, "listing stopped");
                state.error = Some(Arc::new(err));
                None
            }
        }
    }

    /// Error that ended the iteration, if any.
    ///
    /// `None` while items are still flowing and after a normal end.
    pub async fn last_error(&self) -> Option<Arc<TwilioError>> {
        self.state.lock().await.error.clone()
    }

    /// Adapt into a [`Stream`] of items.
    ///
    /// If the listing ends because of a failure, the error is yielded once as
    /// the last element.
    pub fn into_stream(self) -> impl Stream<Item = Result<P::Item, Arc<TwilioError>>> + Send {
        futures::stream::unfold(Some(self), |iter| async move {
            let iter = iter?;
            match iter.try_next().await {
                Some(item) => Some((Ok(item), Some(iter))),
                None => iter.last_error().await.map(|err| (Err(err), None)),
            }
        })
    }

    // State is only written after an await completes, so a `try_next` future
    // dropped mid-fetch leaves the iterator where it was.
    async fn advance(&self, state: &mut IterState<P>) -> Result<Option<P::Item>, TwilioError> {
        if state.page.is_none() {
            debug!(uri = %self.initial_uri, "fetching first page");
            let first = self.client.fetch_page::<P>(&self.initial_uri).await?;
            state.page = Some(first);
            state.cursor = 0;
        }

        // Loop so an empty page in the middle of a listing is skipped.
        loop {
            let Some(page) = state.page.as_ref() else {
                return Ok(None);
            };
            if state.cursor < page.size() {
                let item = page.item_at(state.cursor).clone();
                state.cursor += 1;
                return Ok(Some(item));
            }

            let next = page.fetch_next_page(&self.client).await?;
            match next {
                Some(next) => {
                    state.page = Some(next);
                    state.cursor = 0;
                }
                None => return Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use futures::{FutureExt, StreamExt};

    use super::*;
    use crate::client::testing::{
        CALLS_URL, FakeTransport, MESSAGES_URL, call_page_json, make_client, message_page_json,
        page_uri,
    };

    fn absolute(uri: &str) -> String {
        format!("https://api.test{uri}")
    }

    /// Page 1 with 50 calls linking to page 2 with 10 calls.
    fn two_page_calls(transport: &FakeTransport) -> String {
        let next = page_uri("Calls.json", 1);
        transport.respond(CALLS_URL, 200, call_page_json(0, 50, Some(&next)));
        transport.respond(absolute(&next), 200, call_page_json(50, 10, None));
        absolute(&next)
    }

    async fn drain<P: ResourcePage>(iter: &ListIter<P>) -> Vec<P::Item> {
        let mut items = Vec::new();
        while let Some(item) = iter.try_next().await {
            items.push(item);
        }
        items
    }

    #[tokio::test]
    async fn single_page_yields_items_in_order_then_ends_cleanly() {
        let transport = FakeTransport::new();
        transport.respond(MESSAGES_URL, 200, message_page_json(0, 3, None));
        let client = make_client(&transport);

        let iter = client.messages().iter();
        let sids = drain(&iter)
            .await
            .into_iter()
            .map(|msg| msg.sid)
            .collect::<Vec<_>>();
        assert_eq!(sids, vec!["SM0000", "SM0001", "SM0002"]);
        assert!(iter.last_error().await.is_none());

        // Exhausted iterators stay exhausted without refetching.
        assert!(iter.try_next().await.is_none());
        assert_eq!(transport.hits(MESSAGES_URL), 1);
    }

    #[tokio::test]
    async fn nothing_is_fetched_before_the_first_pull() {
        let transport = FakeTransport::new();
        transport.respond(CALLS_URL, 200, call_page_json(0, 1, None));
        let client = make_client(&transport);

        let iter = client.calls().iter();
        assert!(transport.requests().is_empty());
        assert!(iter.try_next().await.is_some());
        assert_eq!(transport.hits(CALLS_URL), 1);
    }

    #[tokio::test]
    async fn multi_page_listing_fetches_next_page_lazily_once() {
        let transport = FakeTransport::new();
        let second = two_page_calls(&transport);
        let client = make_client(&transport);
        let iter = client.calls().iter();

        for idx in 0..50 {
            let call = iter.try_next().await.unwrap();
            assert_eq!(call.sid, format!("CA{idx:04}"));
        }
        assert_eq!(transport.hits(&second), 0);

        let call = iter.try_next().await.unwrap();
        assert_eq!(call.sid, "CA0050");
        assert_eq!(transport.hits(&second), 1);

        let rest = drain(&iter).await;
        assert_eq!(rest.len(), 9);
        assert_eq!(rest.last().map(|call| call.sid.as_str()), Some("CA0059"));
        assert!(iter.last_error().await.is_none());
        assert_eq!(transport.hits(CALLS_URL), 1);
        assert_eq!(transport.hits(&second), 1);
    }

    #[tokio::test]
    async fn dropped_pull_across_page_boundary_resumes_at_next_item() {
        let transport = FakeTransport::new();
        let next = page_uri("Calls.json", 1);
        transport.respond(CALLS_URL, 200, call_page_json(0, 2, Some(&next)));
        transport.respond(absolute(&next), 200, call_page_json(2, 2, None));
        let client = make_client(&transport);
        let iter = client.calls().iter();

        assert_eq!(iter.try_next().await.unwrap().sid, "CA0000");
        assert_eq!(iter.try_next().await.unwrap().sid, "CA0001");

        // Suspends inside the next-page fetch and is dropped there.
        assert!(iter.try_next().now_or_never().is_none());

        assert_eq!(iter.try_next().await.unwrap().sid, "CA0002");
        assert_eq!(iter.try_next().await.unwrap().sid, "CA0003");
        assert!(iter.try_next().await.is_none());
        assert!(iter.last_error().await.is_none());
        assert_eq!(transport.hits(CALLS_URL), 1);
    }

    #[tokio::test]
    async fn dropped_first_pull_delivers_from_the_start() {
        let transport = FakeTransport::new();
        transport.respond(CALLS_URL, 200, call_page_json(0, 2, None));
        let client = make_client(&transport);
        let iter = client.calls().iter();

        assert!(iter.try_next().now_or_never().is_none());

        let sids = drain(&iter)
            .await
            .into_iter()
            .map(|call| call.sid)
            .collect::<Vec<_>>();
        assert_eq!(sids, vec!["CA0000", "CA0001"]);
        assert!(iter.last_error().await.is_none());
    }

    #[tokio::test]
    async fn initial_fetch_failure_is_reported_and_final() {
        let transport = FakeTransport::new();
        transport.fail(CALLS_URL, "connection refused");
        let client = make_client(&transport);

        let iter = client.calls().iter();
        assert!(iter.try_next().await.is_none());
        let err = iter.last_error().await.unwrap();
        assert!(matches!(*err, TwilioError::Transport(_)));
        assert!(err.to_string().contains("connection refused"));

        // Closed: no retry even once the server would answer.
        transport.respond(CALLS_URL, 200, call_page_json(0, 1, None));
        assert!(iter.try_next().await.is_none());
        assert_eq!(transport.hits(CALLS_URL), 1);
    }

    #[tokio::test]
    async fn api_error_on_initial_fetch_is_surfaced() {
        let transport = FakeTransport::new();
        transport.respond(
            CALLS_URL,
            401,
            r#"{"code": 20003, "message": "Authenticate", "status": 401}"#,
        );
        let client = make_client(&transport);

        let iter = client.calls().iter();
        assert!(iter.try_next().await.is_none());
        let err = iter.last_error().await.unwrap();
        match &*err {
            TwilioError::Api(exception) => assert_eq!(exception.code, Some(20003)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn later_page_failure_comes_after_delivered_items() {
        let transport = FakeTransport::new();
        let next = page_uri("Messages.json", 1);
        transport.respond(MESSAGES_URL, 200, message_page_json(0, 50, Some(&next)));
        transport.respond(absolute(&next), 200, "{ not json");
        let client = make_client(&transport);

        let iter = client.messages().iter();
        let delivered = drain(&iter).await;
        assert_eq!(delivered.len(), 50);
        assert_eq!(delivered[49].sid, "SM0049");

        let err = iter.last_error().await.unwrap();
        assert!(matches!(*err, TwilioError::Parse(_)));
        assert!(iter.try_next().await.is_none());
        assert_eq!(transport.hits(&absolute(&next)), 1);
    }

    #[tokio::test]
    async fn empty_pages_are_skipped() {
        let transport = FakeTransport::new();
        let second = page_uri("Calls.json", 1);
        let third = page_uri("Calls.json", 2);
        transport.respond(CALLS_URL, 200, call_page_json(0, 0, Some(&second)));
        transport.respond(absolute(&second), 200, call_page_json(0, 0, Some(&third)));
        transport.respond(absolute(&third), 200, call_page_json(0, 2, None));
        let client = make_client(&transport);

        let iter = client.calls().iter();
        assert_eq!(drain(&iter).await.len(), 2);
        assert!(iter.last_error().await.is_none());
    }

    #[tokio::test]
    async fn empty_listing_ends_without_error() {
        let transport = FakeTransport::new();
        transport.respond(MESSAGES_URL, 200, message_page_json(0, 0, None));
        let client = make_client(&transport);

        let iter = client.messages().iter();
        assert!(iter.try_next().await.is_none());
        assert!(iter.last_error().await.is_none());
    }

    #[tokio::test]
    async fn filtered_query_fetches_filtered_uri() {
        let transport = FakeTransport::new();
        let filtered = format!("{CALLS_URL}?From=%2B15551231234");
        transport.respond(filtered.clone(), 200, call_page_json(0, 2, None));
        let client = make_client(&transport);

        let iter = client
            .calls()
            .from_number(crate::domain::RawPhoneNumber::new("+15551231234").unwrap())
            .iter();
        assert_eq!(drain(&iter).await.len(), 2);
        assert_eq!(transport.hits(&filtered), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn independent_iterators_each_see_the_full_sequence() {
        let transport = FakeTransport::new();
        let second = two_page_calls(&transport);
        let client = make_client(&transport);

        let handles = (0..4)
            .map(|_| {
                let iter = client.calls().iter();
                tokio::spawn(async move { drain(&iter).await })
            })
            .collect::<Vec<_>>();

        let expected = (0..60).map(|idx| format!("CA{idx:04}")).collect::<Vec<_>>();
        for handle in handles {
            let sids = handle
                .await
                .unwrap()
                .into_iter()
                .map(|call| call.sid)
                .collect::<Vec<_>>();
            assert_eq!(sids, expected);
        }
        assert_eq!(transport.hits(CALLS_URL), 4);
        assert_eq!(transport.hits(&second), 4);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn shared_iterator_hands_out_each_item_once() {
        let transport = FakeTransport::new();
        let second = two_page_calls(&transport);
        let client = make_client(&transport);
        let iter = Arc::new(client.calls().iter());

        let handles = (0..8)
            .map(|_| {
                let iter = Arc::clone(&iter);
                tokio::spawn(async move {
                    let mut sids = Vec::new();
                    while let Some(call) = iter.try_next().await {
                        sids.push(call.sid);
                    }
                    sids
                })
            })
            .collect::<Vec<_>>();

        let mut total = 0;
        let mut seen = BTreeSet::new();
        for handle in handles {
            let sids = handle.await.unwrap();
            // Each task sees its share in server order.
            assert!(sids.windows(2).all(|pair| pair[0] < pair[1]));
            total += sids.len();
            seen.extend(sids);
        }

        assert_eq!(total, 60);
        assert_eq!(seen.len(), 60);
        assert_eq!(transport.hits(CALLS_URL), 1);
        assert_eq!(transport.hits(&second), 1);
        assert!(iter.last_error().await.is_none());
    }

    #[tokio::test]
    async fn stream_yields_items_then_the_error() {
        let transport = FakeTransport::new();
        let next = page_uri("Calls.json", 1);
        transport.respond(CALLS_URL, 200, call_page_json(0, 2, Some(&next)));
        transport.fail(absolute(&next), "timed out");
        let client = make_client(&transport);

        let results = client.calls().iter().into_stream().collect::<Vec<_>>().await;
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().sid, "CA0000");
        assert_eq!(results[1].as_ref().unwrap().sid, "CA0001");
        assert!(results[2].is_err());
    }

    #[tokio::test]
    async fn stream_ends_cleanly_after_last_page() {
        let transport = FakeTransport::new();
        transport.respond(MESSAGES_URL, 200, message_page_json(0, 4, None));
        let client = make_client(&transport);

        let bodies = client
            .messages()
            .iter()
            .into_stream()
            .map(|result| result.map(|msg| msg.body))
            .collect::<Vec<_>>()
            .await;
        assert_eq!(bodies.len(), 4);
        assert!(bodies.iter().all(Result::is_ok));
    }
}
