//! In-memory transport and page fixtures shared by unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::json;

use super::{Auth, BoxError, BoxFuture, HttpResponse, HttpTransport, TwilioClient};

pub(crate) const API_BASE: &str = "https://api.test";
pub(crate) const CALLS_URL: &str = "https://api.test/2010-04-01/Accounts/AC123/Calls.json";
pub(crate) const MESSAGES_URL: &str = "https://api.test/2010-04-01/Accounts/AC123/Messages.json";

#[derive(Debug, Clone)]
enum FakeRoute {
    Respond { status: u16, body: String },
    Fail(String),
}

#[derive(Debug, Clone)]
pub(crate) struct FakeRequest {
    pub method: &'static str,
    pub url: String,
    pub params: Vec<(String, String)>,
    pub account_sid: String,
    pub auth_token: String,
}

impl FakeRequest {
    pub fn has_param(&self, key: &str, value: &str) -> bool {
        self.params.iter().any(|(k, v)| k == key && v == value)
    }
}

#[derive(Debug, Default)]
struct FakeTransportState {
    routes: HashMap<String, FakeRoute>,
    requests: Vec<FakeRequest>,
}

/// Transport answering from a fixed URL -> response table and recording every request.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: impl Into<String>, status: u16, body: impl Into<String>) {
        self.state.lock().unwrap().routes.insert(
            url.into(),
            FakeRoute::Respond {
                status,
                body: body.into(),
            },
        );
    }

    pub fn fail(&self, url: impl Into<String>, message: impl Into<String>) {
        self.state
            .lock()
            .unwrap()
            .routes
            .insert(url.into(), FakeRoute::Fail(message.into()));
    }

    pub fn requests(&self) -> Vec<FakeRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn hits(&self, url: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|request| request.url == url)
            .count()
    }

    async fn handle(
        &self,
        method: &'static str,
        url: &str,
        auth: &Auth,
        params: Vec<(String, String)>,
    ) -> Result<HttpResponse, BoxError> {
        let route = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(FakeRequest {
                method,
                url: url.to_owned(),
                params,
                account_sid: auth.account_sid().as_str().to_owned(),
                auth_token: auth.auth_token().as_str().to_owned(),
            });
            state.routes.get(url).cloned()
        };

        // Give other tasks a chance to run while a "request" is in flight.
        tokio::task::yield_now().await;

        match route {
            Some(FakeRoute::Respond { status, body }) => Ok(HttpResponse { status, body }),
            Some(FakeRoute::Fail(message)) => Err(message.into()),
            None => Err(format!("no route for {method} {url}").into()),
        }
    }
}

impl HttpTransport for FakeTransport {
    fn get<'a>(
        &'a self,
        url: &'a str,
        auth: &'a Auth,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(self.handle("GET", url, auth, Vec::new()))
    }

    fn post_form<'a>(
        &'a self,
        url: &'a str,
        auth: &'a Auth,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(self.handle("POST", url, auth, params))
    }
}

pub(crate) fn make_client(transport: &FakeTransport) -> TwilioClient {
    TwilioClient::builder(Auth::new("AC123", "token").unwrap())
        .api_base(API_BASE)
        .lookup_base("https://lookups.test/v1")
        .transport(Arc::new(transport.clone()))
        .build()
        .unwrap()
}

/// Relative next-page link for page `index` of `resource` (`Calls.json`, `Messages.json`).
pub(crate) fn page_uri(resource: &str, index: u32) -> String {
    format!("/2010-04-01/Accounts/AC123/{resource}?PageSize=50&Page={index}")
}

/// JSON body of one call-list page holding calls `CA{first}..CA{first + count}`.
pub(crate) fn call_page_json(first: usize, count: usize, next_page_uri: Option<&str>) -> String {
    let calls = (first..first + count)
        .map(|idx| {
            json!({
                "sid": format!("CA{idx:04}"),
                "account_sid": "AC123",
                "from": "+15551231234",
                "to": "+15553214321",
                "status": "completed",
                "duration": "1",
                "date_created": "Tue, 31 Aug 2010 20:36:28 +0000",
                "uri": format!("/2010-04-01/Accounts/AC123/Calls/CA{idx:04}.json")
            })
        })
        .collect::<Vec<_>>();
    page_json("calls", calls, first, next_page_uri)
}

/// JSON body of one message-list page holding messages `SM{first}..SM{first + count}`.
pub(crate) fn message_page_json(
    first: usize,
    count: usize,
    next_page_uri: Option<&str>,
) -> String {
    let messages = (first..first + count)
        .map(|idx| {
            json!({
                "sid": format!("SM{idx:04}"),
                "account_sid": "AC123",
                "body": format!("message {idx}"),
                "from": "+15551231234",
                "to": "+15553214321",
                "status": "delivered",
                "num_segments": "1"
            })
        })
        .collect::<Vec<_>>();
    page_json("messages", messages, first, next_page_uri)
}

fn page_json(
    key: &str,
    items: Vec<serde_json::Value>,
    first: usize,
    next_page_uri: Option<&str>,
) -> String {
    let count = items.len();
    let mut page = json!({
        "page": first / 50,
        "page_size": 50,
        "start": first,
        "end": (first + count).saturating_sub(1),
        "uri": "/2010-04-01/Accounts/AC123/List.json",
        "first_page_uri": "/2010-04-01/Accounts/AC123/List.json?Page=0",
        "previous_page_uri": null,
        "next_page_uri": next_page_uri,
    });
    page[key] = serde_json::Value::Array(items);
    page.to_string()
}
