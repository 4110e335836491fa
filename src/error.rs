use thiserror::Error;

/// Everything that can go wrong between a title and a written corpus file.
#[derive(Error, Debug)]
pub enum FetchError {
    /// No page matches the title.
    #[error("page '{0}' does not exist")]
    NotFound(String),

    /// The title resolves to a disambiguation page.
    #[error("page '{title}' has multiple entries: {}", .candidates.join(", "))]
    Ambiguous {
        title: String,
        candidates: Vec<String>,
    },

    /// Nothing left after the cleaning rules ran.
    #[error("content of page '{0}' is empty")]
    EmptyContent(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {code} for: {url}")]
    Status { code: u16, url: String },

    /// MediaWiki answered with an `error` object.
    #[error("API error {code}: {info}")]
    Api { code: String, info: String },

    #[error("unexpected API response: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FetchError>;
