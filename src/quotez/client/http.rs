use super::{PageRequest, QuotePage, QuoteSource};
use crate::config::QuotezConfig;
use crate::error::{QuotezError, Result};
use crate::model::Quote;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("quotez/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct AuthorEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct AuthorList {
    #[serde(default)]
    results: Vec<AuthorEntry>,
}

/// `/random` answers with a bare quote on the classic API and a one-element
/// array on newer deployments.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RandomPayload {
    One(Quote),
    Many(Vec<Quote>),
}

pub struct HttpQuoteClient {
    http: Client,
    base_url: String,
}

impl HttpQuoteClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &QuotezConfig) -> Result<Self> {
        Self::new(&config.api_url, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self.endpoint(path);
        debug!(%url, ?query, "GET");

        let response = self.http.get(&url).query(query).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(QuotezError::Protocol(format!(
                "GET {} returned {}",
                url, status
            )));
        }

        let body = response.text()?;
        serde_json::from_str(&body)
            .map_err(|e| QuotezError::Protocol(format!("GET {} returned invalid JSON: {}", url, e)))
    }
}

/// Query string for a page request, in the order the service documents it.
pub fn page_query(request: &PageRequest) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("limit", request.limit.to_string()),
        ("maxLength", request.max_length.to_string()),
        ("page", request.page.to_string()),
    ];
    if let Some(author) = &request.author {
        query.push(("author", author.clone()));
    }
    query
}

impl QuoteSource for HttpQuoteClient {
    fn random_quote(&self) -> Result<Quote> {
        match self.get_json::<RandomPayload>("random", &[])? {
            RandomPayload::One(quote) => Ok(quote),
            RandomPayload::Many(quotes) => quotes
                .into_iter()
                .next()
                .ok_or_else(|| QuotezError::Protocol("GET random returned no quote".to_string())),
        }
    }

    fn author_names(&self) -> Result<Vec<String>> {
        let list: AuthorList = self.get_json("authors", &[])?;
        Ok(list.results.into_iter().map(|a| a.name).collect())
    }

    fn fetch_page(&self, request: &PageRequest) -> Result<QuotePage> {
        self.get_json("quotes", &page_query(request))
    }
}
