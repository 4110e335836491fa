use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::clean::CleaningRules;
use crate::config::Settings;
use crate::error::{FetchError, Result};
use crate::sentences::{RuleTokenizer, SentenceTokenizer};
use crate::wiki::ContentSource;

static NON_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W").unwrap());

/// Corpus file name for a title: lowercased, every non-word char replaced by `-`.
pub fn output_filename(title: &str) -> String {
    format!("{}.txt", NON_WORD_RE.replace_all(&title.to_lowercase(), "-"))
}

/// Fetches an article, cleans it and splits it into sentences.
pub struct ArticleFetcher<S, T = RuleTokenizer> {
    source: S,
    tokenizer: T,
    rules: CleaningRules,
    settings: Settings,
}

impl<S: ContentSource> ArticleFetcher<S> {
    pub fn new(source: S, settings: Settings) -> Self {
        Self::with_tokenizer(source, RuleTokenizer::default(), settings)
    }
}

impl<S: ContentSource, T: SentenceTokenizer> ArticleFetcher<S, T> {
    pub fn with_tokenizer(source: S, tokenizer: T, settings: Settings) -> Self {
        Self {
            source,
            tokenizer,
            rules: CleaningRules::default(),
            settings,
        }
    }

    /// Look up `title` and return its prose, one sentence per element.
    pub fn fetch_content(&self, title: &str) -> Result<Vec<String>> {
        let title = title.to_lowercase();
        info!("Fetching article '{}'", title);

        let page = self.source.page(&title)?;
        let content = self.rules.apply(&page.content);
        if content.trim().is_empty() {
            return Err(FetchError::EmptyContent(title));
        }

        let sentences = self.tokenizer.tokenize(&content);
        debug!("'{}' split into {} sentences", page.title, sentences.len());
        Ok(sentences)
    }

    /// Fetch `title` and write it to `<output_dir>/<output_filename>`,
    /// replacing any previous file. Returns the written path.
    pub fn write_article_file(&self, title: &str) -> Result<PathBuf> {
        let sentences = self.fetch_content(title)?;
        let path = self.settings.output_dir.join(output_filename(title));

        if path.is_file() {
            info!(
                "The file {:?} for the article '{}' already exists, it will be overwritten",
                path,
                title.to_lowercase()
            );
            fs::remove_file(&path)?;
        }

        fs::write(&path, sentences.join("\n"))?;
        info!("The content of the article '{}' was written to {:?}", title.to_lowercase(), path);
        Ok(path)
    }
}
