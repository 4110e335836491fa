use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{FetchError, Result};

/// A resolved article and its plain-text body.
#[derive(Debug, Clone)]
pub struct Page {
    pub id: u64,
    pub title: String,
    pub url: Option<String>,
    pub content: String,
}

/// Anything that can look up an article by title.
pub trait ContentSource {
    /// Fails with `NotFound` when nothing matches and `Ambiguous` for
    /// disambiguation pages.
    fn page(&self, title: &str) -> Result<Page>;
}

impl<S: ContentSource + ?Sized> ContentSource for &S {
    fn page(&self, title: &str) -> Result<Page> {
        (**self).page(title)
    }
}

impl<S: ContentSource + ?Sized> ContentSource for Box<S> {
    fn page(&self, title: &str) -> Result<Page> {
        (**self).page(title)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub titles: Vec<String>,
    pub suggestion: Option<String>,
}

// ── MediaWiki response shapes (formatversion=2) ──

#[derive(Debug, Deserialize)]
struct ApiResponse {
    query: Option<Query>,
    error: Option<ApiErrorBody>,
    #[serde(rename = "continue")]
    cont: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    info: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Query {
    pages: Vec<PageInfo>,
    search: Vec<SearchHit>,
    searchinfo: Option<SearchInfo>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct SearchInfo {
    suggestion: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    pageid: Option<u64>,
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    fullurl: Option<String>,
    pageprops: Option<PageProps>,
    #[serde(default)]
    links: Vec<LinkTarget>,
    extract: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    disambiguation: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct LinkTarget {
    title: String,
}

impl PageInfo {
    fn is_disambiguation(&self) -> bool {
        self.pageprops
            .as_ref()
            .is_some_and(|p| p.disambiguation.is_some())
    }
}

fn parse_response(body: &str) -> Result<ApiResponse> {
    let mut resp: ApiResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    if let Some(err) = resp.error.take() {
        return Err(FetchError::Api {
            code: err.code,
            info: err.info,
        });
    }
    Ok(resp)
}

/// Continuation values come back as strings or numbers (`sroffset`).
fn continue_params(cont: HashMap<String, serde_json::Value>) -> Vec<(String, String)> {
    cont.into_iter()
        .map(|(k, v)| match v {
            serde_json::Value::String(s) => (k, s),
            other => (k, other.to_string()),
        })
        .collect()
}

fn into_query(resp: ApiResponse) -> Query {
    resp.query.unwrap_or_default()
}

fn first_page(query: Query) -> Result<PageInfo> {
    query
        .pages
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::Decode("response holds no pages".into()))
}

fn search_results(query: Query) -> SearchResults {
    SearchResults {
        titles: query.search.into_iter().map(|h| h.title).collect(),
        suggestion: query.searchinfo.and_then(|i| i.suggestion),
    }
}

// ── Client ──

/// Blocking client for the Wikipedia action API.
pub struct WikiClient {
    client: Client,
    api_url: String,
    auto_suggest: bool,
}

impl WikiClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.timeout_secs.map(Duration::from_secs))
            .build()?;
        Ok(Self {
            client,
            api_url: settings.api_url(),
            auto_suggest: settings.auto_suggest,
        })
    }

    fn query(&self, params: &[(&str, &str)]) -> Result<ApiResponse> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("action", "query"), ("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
                url: response.url().to_string(),
            });
        }
        parse_response(&response.text()?)
    }

    /// Full-text search, returning up to `limit` titles and a spelling suggestion.
    pub fn search(&self, query: &str, limit: usize) -> Result<SearchResults> {
        let limit = limit.to_string();
        let resp = self.query(&[
            ("list", "search"),
            ("srsearch", query),
            ("srlimit", limit.as_str()),
            ("srinfo", "suggestion"),
            ("srprop", ""),
        ])?;
        Ok(search_results(into_query(resp)))
    }

    /// Pick the title a loose query most likely means.
    fn suggest(&self, title: &str) -> Result<String> {
        let results = self.search(title, 1)?;
        results
            .titles
            .into_iter()
            .next()
            .or(results.suggestion)
            .ok_or_else(|| FetchError::NotFound(title.to_string()))
    }

    fn page_info(&self, title: &str) -> Result<PageInfo> {
        let resp = self.query(&[
            ("prop", "info|pageprops"),
            ("inprop", "url"),
            ("ppprop", "disambiguation"),
            ("redirects", "1"),
            ("titles", title),
        ])?;
        let info = first_page(into_query(resp))?;
        if info.missing || info.invalid || info.pageid.is_none() {
            return Err(FetchError::NotFound(title.to_string()));
        }
        Ok(info)
    }

    /// Every article a disambiguation page links to, following continuation.
    fn candidates(&self, title: &str) -> Result<Vec<String>> {
        let mut titles = Vec::new();
        let mut cont: Vec<(String, String)> = Vec::new();
        loop {
            let mut params = vec![
                ("prop", "links"),
                ("plnamespace", "0"),
                ("pllimit", "max"),
                ("titles", title),
            ];
            params.extend(cont.iter().map(|(k, v)| (k.as_str(), v.as_str())));

            let resp = self.query(&params)?;
            let next = resp.cont.clone();
            let page = first_page(into_query(resp))?;
            titles.extend(page.links.into_iter().map(|l| l.title));

            match next {
                Some(c) => cont = continue_params(c),
                None => break,
            }
        }
        Ok(titles)
    }

    fn extract(&self, pageid: u64) -> Result<String> {
        let id = pageid.to_string();
        let resp = self.query(&[
            ("prop", "extracts"),
            ("explaintext", "1"),
            ("exsectionformat", "wiki"),
            ("pageids", id.as_str()),
        ])?;
        Ok(first_page(into_query(resp))?.extract.unwrap_or_default())
    }
}

impl ContentSource for WikiClient {
    fn page(&self, title: &str) -> Result<Page> {
        let resolved = if self.auto_suggest {
            self.suggest(title)?
        } else {
            title.to_string()
        };
        debug!("Looking up '{}' as '{}'", title, resolved);

        let info = self.page_info(&resolved)?;
        if info.is_disambiguation() {
            let candidates = self.candidates(&info.title)?;
            return Err(FetchError::Ambiguous {
                title: info.title,
                candidates,
            });
        }

        let id = info.pageid.unwrap_or_default();
        let content = self.extract(id)?;
        info!("Fetched '{}' ({} chars)", info.title, content.len());

        Ok(Page {
            id,
            title: info.title,
            url: info.fullurl,
            content,
        })
    }
}

// ── Tests ──
