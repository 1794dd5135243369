use std::collections::BTreeMap;
use std::marker::PhantomData;

use crate::client::TwilioClient;
use crate::domain::{CallPage, MessagePage, QueryDate, RawPhoneNumber};
use crate::list::{ListIter, ResourcePage};

/// Filters for one listing, turned into a [`ListIter`] by [`ListQuery::iter`].
///
/// Each filter is a query-string key; setting a key again replaces its value.
///
/// ```rust,no_run
/// # use utwil::{QueryDate, RawPhoneNumber, TwilioClient};
/// # fn demo(client: &TwilioClient) -> Result<(), utwil::ValidationError> {
/// let iter = client
///     .calls()
///     .started_before(QueryDate::parse("2014-01-01")?)
///     .to_number(RawPhoneNumber::new("+15551231234")?)
///     .iter();
/// # let _ = iter;
/// # Ok(())
/// # }
/// ```
pub struct ListQuery<P> {
    client: TwilioClient,
    endpoint: String,
    filters: BTreeMap<String, String>,
    _page: PhantomData<fn() -> P>,
}

pub type CallListQuery = ListQuery<CallPage>;
pub type MessageListQuery = ListQuery<MessagePage>;

impl<P: ResourcePage> ListQuery<P> {
    pub(crate) fn new(client: TwilioClient, endpoint: String) -> Self {
        Self {
            client,
            endpoint,
            filters: BTreeMap::new(),
            _page: PhantomData,
        }
    }

    /// Only records sent or placed from `phone` (`From`).
    pub fn from_number(self, phone: RawPhoneNumber) -> Self {
        self.param("From", phone.raw())
    }

    /// Only records sent or placed to `phone` (`To`).
    pub fn to_number(self, phone: RawPhoneNumber) -> Self {
        self.param("To", phone.raw())
    }

    /// Set an arbitrary filter key.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Apply a reusable filter function.
    pub fn apply(self, filter: impl FnOnce(Self) -> Self) -> Self {
        filter(self)
    }

    /// Current filters in encoding order.
    pub fn filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// URI of the first page: the list endpoint plus the encoded filters.
    pub fn uri(&self) -> String {
        if self.filters.is_empty() {
            return self.endpoint.clone();
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.filters.iter())
            .finish();
        format!("{}?{query}", self.endpoint)
    }

    /// Build the lazy iterator. Nothing is fetched until its first pull.
    pub fn iter(self) -> ListIter<P> {
        let uri = self.uri();
        ListIter::new(self.client, uri)
    }
}

impl ListQuery<CallPage> {
    /// Calls started before `date` (`StartTime<`).
    pub fn started_before(self, date: impl Into<QueryDate>) -> Self {
        self.param("StartTime<", date.into().to_ymd())
    }

    /// Calls started after `date` (`StartTime>`).
    pub fn started_after(self, date: impl Into<QueryDate>) -> Self {
        self.param("StartTime>", date.into().to_ymd())
    }
}

impl ListQuery<MessagePage> {
    /// Messages sent before `date` (`DateSent<`).
    pub fn sent_before(self, date: impl Into<QueryDate>) -> Self {
        self.param("DateSent<", date.into().to_ymd())
    }

    /// Messages sent after `date` (`DateSent>`).
    pub fn sent_after(self, date: impl Into<QueryDate>) -> Self {
        self.param("DateSent>", date.into().to_ymd())
    }
}
