/// Pagination metadata Twilio returns alongside every list page.
///
/// Link fields are relative URIs (`/2010-04-01/Accounts/...`); they are resolved
/// against the client's API base when followed. Counts and links that newer API
/// revisions stopped sending are optional.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageMeta {
    pub page: u32,
    pub page_size: u32,
    pub num_pages: Option<u32>,
    pub start: i64,
    pub end: i64,
    pub total: Option<u32>,
    pub uri: String,
    pub first_page_uri: Option<String>,
    pub last_page_uri: Option<String>,
    pub next_page_uri: Option<String>,
    pub previous_page_uri: Option<String>,
}

impl PageMeta {
    /// `true` iff the server supplied a non-empty `next_page_uri`.
    pub fn has_next_page(&self) -> bool {
        self.next_page_uri().is_some()
    }

    /// The next-page link, ignoring empty strings.
    pub fn next_page_uri(&self) -> Option<&str> {
        self.next_page_uri
            .as_deref()
            .filter(|uri| !uri.trim().is_empty())
    }
}
