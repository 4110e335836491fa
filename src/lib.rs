//! Turn a Wikipedia article into a plain-text corpus file, one sentence per line.

pub mod clean;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod sentences;
pub mod wiki;

pub use clean::{CleaningRule, CleaningRules};
pub use config::Settings;
pub use error::{FetchError, Result};
pub use fetcher::{output_filename, ArticleFetcher};
pub use sentences::{RuleTokenizer, SentenceTokenizer};
pub use wiki::{ContentSource, Page, SearchResults, WikiClient};
