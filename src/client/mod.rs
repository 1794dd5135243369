//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::domain::{
    AccountSid, AuthToken, Call, CallOptions, CallRequest, CallTarget, CallbackUrl, Lookup,
    LookupRequest, LookupType, Message, MessageBody, MessageRequest, RawPhoneNumber,
    RestException, ValidationError,
};
use crate::list::{CallListQuery, ListQuery, MessageListQuery, ResourcePage};

#[cfg(test)]
pub(crate) mod testing;

const DEFAULT_API_BASE: &str = "https://api.twilio.com";
const DEFAULT_LOOKUP_BASE: &str = "https://lookups.twilio.com/v1";

/// REST API version every account-scoped path is rooted at.
pub const API_VERSION: &str = "2010-04-01";

/// Boxed future returned by [`HttpTransport`] and [`ResourcePage::fetch_next_page`].
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Boxed error for transport and decoding failures.
pub type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone)]
/// Raw HTTP response handed back by an [`HttpTransport`].
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Authenticated HTTP plumbing used by [`TwilioClient`].
///
/// The default implementation is backed by `reqwest`; supply your own through
/// [`TwilioClientBuilder::transport`] to route requests elsewhere.
pub trait HttpTransport: Send + Sync {
    /// `GET url` with HTTP basic auth.
    fn get<'a>(&'a self, url: &'a str, auth: &'a Auth)
    -> BoxFuture<'a, Result<HttpResponse, BoxError>>;

    /// `POST url` with a form-encoded body and HTTP basic auth.
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        auth: &'a Auth,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
    user_agent: String,
}

impl ReqwestTransport {
    fn new(client: reqwest::Client, user_agent: Option<String>) -> Self {
        Self {
            client,
            user_agent: user_agent.unwrap_or_else(default_user_agent),
        }
    }

    async fn read(response: reqwest::Response) -> Result<HttpResponse, BoxError> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(
        &'a self,
        url: &'a str,
        auth: &'a Auth,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let response = self
                .client
                .get(url)
                .basic_auth(auth.account_sid.as_str(), Some(auth.auth_token.as_str()))
                .header(reqwest::header::ACCEPT, "application/json")
                .header(reqwest::header::USER_AGENT, &self.user_agent)
                .send()
                .await?;
            Self::read(response).await
        })
    }

    fn post_form<'a>(
        &'a self,
        url: &'a str,
        auth: &'a Auth,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .basic_auth(auth.account_sid.as_str(), Some(auth.auth_token.as_str()))
                .header(reqwest::header::ACCEPT, "application/json")
                .header(reqwest::header::USER_AGENT, &self.user_agent)
                .form(&params)
                .send()
                .await?;
            Self::read(response).await
        })
    }
}

#[derive(Debug, Clone)]
/// Twilio API credentials: the account SID and its auth token.
pub struct Auth {
    account_sid: AccountSid,
    auth_token: AuthToken,
}

impl Auth {
    /// Validate both parts and build [`Auth`].
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            account_sid: AccountSid::new(account_sid)?,
            auth_token: AuthToken::new(auth_token)?,
        })
    }

    pub fn account_sid(&self) -> &AccountSid {
        &self.account_sid
    }

    pub fn auth_token(&self) -> &AuthToken {
        &self.auth_token
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`TwilioClient`] and recorded by list iterators.
///
/// This error preserves:
/// - transport failures (DNS, TLS, timeouts),
/// - API failures (non-2xx with a Twilio error body),
/// - other non-2xx responses,
/// - parse and validation failures.
pub enum TwilioError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// Twilio rejected the request with a structured error body.
    #[error("API error: {0}")]
    Api(RestException),

    /// Non-successful HTTP status without a recognizable Twilio error body.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] BoxError),

    /// A configured base URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Clone)]
/// Builder for [`TwilioClient`].
///
/// Use this when you need to customize the API hosts, timeout, user-agent, or
/// the HTTP transport itself.
pub struct TwilioClientBuilder {
    auth: Auth,
    api_base: String,
    lookup_base: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl TwilioClientBuilder {
    /// Create a builder with the default hosts and no timeout/user-agent override.
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            api_base: DEFAULT_API_BASE.to_owned(),
            lookup_base: DEFAULT_LOOKUP_BASE.to_owned(),
            timeout: None,
            user_agent: None,
            transport: None,
        }
    }

    /// Override the REST API host (`https://api.twilio.com`).
    ///
    /// Listing pages are followed on this same host.
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Override the lookups base URL (`https://lookups.twilio.com/v1`).
    pub fn lookup_base(mut self, lookup_base: impl Into<String>) -> Self {
        self.lookup_base = lookup_base.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use a custom transport. `timeout` and `user_agent` only configure the
    /// built-in reqwest transport and are ignored when this is set.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build a [`TwilioClient`].
    pub fn build(self) -> Result<TwilioClient, TwilioError> {
        url::Url::parse(&self.api_base)?;
        url::Url::parse(&self.lookup_base)?;

        let http = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                let client = builder
                    .build()
                    .map_err(|err| TwilioError::Transport(Box::new(err)))?;
                Arc::new(ReqwestTransport::new(client, self.user_agent))
            }
        };

        Ok(TwilioClient {
            auth: self.auth,
            api_base: self.api_base.trim_end_matches('/').to_owned(),
            lookup_base: self.lookup_base,
            http,
        })
    }
}

#[derive(Clone)]
/// High-level Twilio client.
///
/// Cloning is cheap: clones share one HTTP transport. By default it uses
/// `https://api.twilio.com` for calls and messages and
/// `https://lookups.twilio.com/v1` for phone-number lookups.
pub struct TwilioClient {
    auth: Auth,
    api_base: String,
    lookup_base: String,
    http: Arc<dyn HttpTransport>,
}

impl TwilioClient {
    /// Create a client using the default hosts.
    ///
    /// For more customization, use [`TwilioClient::builder`].
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            api_base: DEFAULT_API_BASE.to_owned(),
            lookup_base: DEFAULT_LOOKUP_BASE.to_owned(),
            http: Arc::new(ReqwestTransport::new(reqwest::Client::new(), None)),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(auth: Auth) -> TwilioClientBuilder {
        TwilioClientBuilder::new(auth)
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Start a call listing; add filters, then call [`ListQuery::iter`].
    pub fn calls(&self) -> CallListQuery {
        ListQuery::new(self.clone(), self.account_url("Calls.json"))
    }

    /// Start a message listing; add filters, then call [`ListQuery::iter`].
    pub fn messages(&self) -> MessageListQuery {
        ListQuery::new(self.clone(), self.account_url("Messages.json"))
    }

    /// Place an outgoing call.
    ///
    /// Errors:
    /// - [`TwilioError::Api`] when Twilio rejects the request,
    /// - [`TwilioError::HttpStatus`] for other non-2xx responses,
    /// - [`TwilioError::Parse`] when the response is not a call resource.
    pub async fn submit_call(&self, request: CallRequest) -> Result<Call, TwilioError> {
        let params = crate::transport::encode_call_form(&request);
        let body = self.post(&self.account_url("Calls.json"), params).await?;
        crate::transport::decode_call_json_response(&body)
            .map_err(|err| TwilioError::Parse(Box::new(err)))
    }

    /// Call `to` from `from`; Twilio requests `url` for TwiML once answered.
    pub async fn call(
        &self,
        from: RawPhoneNumber,
        to: RawPhoneNumber,
        url: CallbackUrl,
    ) -> Result<Call, TwilioError> {
        let request = CallRequest::new(from, to, CallTarget::Url(url), CallOptions::default());
        self.submit_call(request).await
    }

    /// Same as [`TwilioClient::call`], with recording enabled.
    pub async fn recorded_call(
        &self,
        from: RawPhoneNumber,
        to: RawPhoneNumber,
        url: CallbackUrl,
    ) -> Result<Call, TwilioError> {
        let options = CallOptions {
            record: true,
            ..Default::default()
        };
        let request = CallRequest::new(from, to, CallTarget::Url(url), options);
        self.submit_call(request).await
    }

    /// Send an SMS or MMS message.
    pub async fn submit_message(&self, request: MessageRequest) -> Result<Message, TwilioError> {
        let params = crate::transport::encode_message_form(&request);
        let body = self.post(&self.account_url("Messages.json"), params).await?;
        crate::transport::decode_message_json_response(&body)
            .map_err(|err| TwilioError::Parse(Box::new(err)))
    }

    pub async fn send_sms(
        &self,
        from: RawPhoneNumber,
        to: RawPhoneNumber,
        body: MessageBody,
    ) -> Result<Message, TwilioError> {
        self.submit_message(MessageRequest::sms(from, to, body))
            .await
    }

    pub async fn send_mms(
        &self,
        from: RawPhoneNumber,
        to: RawPhoneNumber,
        body: MessageBody,
        media_url: CallbackUrl,
    ) -> Result<Message, TwilioError> {
        self.submit_message(MessageRequest::mms(from, to, body, media_url))
            .await
    }

    /// Look up a phone number on the lookups host.
    pub async fn submit_lookup(&self, request: LookupRequest) -> Result<Lookup, TwilioError> {
        let url = self.lookup_url(&request)?;
        let body = self.get(&url).await?;
        crate::transport::decode_lookup_json_response(&body)
            .map_err(|err| TwilioError::Parse(Box::new(err)))
    }

    /// Look up a number including its carrier (`Type=carrier`).
    pub async fn lookup(&self, phone_number: RawPhoneNumber) -> Result<Lookup, TwilioError> {
        self.submit_lookup(LookupRequest::new(phone_number).with_type(LookupType::Carrier))
            .await
    }

    /// Look up a number without carrier details.
    pub async fn lookup_no_carrier(
        &self,
        phone_number: RawPhoneNumber,
    ) -> Result<Lookup, TwilioError> {
        self.submit_lookup(LookupRequest::new(phone_number)).await
    }

    /// GET `url` and decode the body as page type `P`.
    pub(crate) async fn fetch_page<P: ResourcePage>(&self, url: &str) -> Result<P, TwilioError> {
        let body = self.get(url).await?;
        P::decode(&body).map_err(TwilioError::Parse)
    }

    /// Resolve a server-relative URI (`/2010-04-01/...`) against the API host.
    pub(crate) fn resolve_uri(&self, uri: &str) -> String {
        if uri.starts_with('/') {
            format!("{}{uri}", self.api_base)
        } else {
            format!("{}/{uri}", self.api_base)
        }
    }

    fn account_url(&self, resource: &str) -> String {
        format!(
            "{}/{API_VERSION}/Accounts/{}/{resource}",
            self.api_base,
            self.auth.account_sid.as_str()
        )
    }

    fn lookup_url(&self, request: &LookupRequest) -> Result<String, TwilioError> {
        let mut url = url::Url::parse(&self.lookup_base)?;
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push("PhoneNumbers")
            .push(request.phone_number().raw());

        let params = crate::transport::encode_lookup_query(request);
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url.into())
    }

    async fn get(&self, url: &str) -> Result<String, TwilioError> {
        debug!(%url, "GET");
        let response = self
            .http
            .get(url, &self.auth)
            .await
            .map_err(TwilioError::Transport)?;
        check_status(response)
    }

    async fn post(&self, url: &str, params: Vec<(String, String)>) -> Result<String, TwilioError> {
        debug!(%url, fields = params.len(), "POST");
        let response = self
            .http
            .post_form(url, &self.auth, params)
            .await
            .map_err(TwilioError::Transport)?;
        check_status(response)
    }
}

fn default_user_agent() -> String {
    format!("utwil/{}", env!("CARGO_PKG_VERSION"))
}

fn check_status(response: HttpResponse) -> Result<String, TwilioError> {
    if (200..=299).contains(&response.status) {
        return Ok(response.body);
    }

    debug!(status = response.status, "request failed");
    if let Some(exception) = crate::transport::decode_rest_exception(&response.body) {
        return Err(TwilioError::Api(exception));
    }

    let body = if response.body.trim().is_empty() {
        None
    } else {
        Some(response.body)
    };
    Err(TwilioError::HttpStatus {
        status: response.status,
        body,
    })
}
