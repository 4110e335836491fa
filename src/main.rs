use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use tracing::{error, info};

use wiki_corpus::{ArticleFetcher, FetchError, Settings, WikiClient};

#[derive(Parser)]
#[command(
    name = "wiki_corpus",
    about = "Write a Wikipedia article to <title>.txt, one sentence per line",
    after_help = "Titles starting with '-' go after '--', e.g. wiki_corpus -- \"-ism\""
)]
struct Cli {
    /// Article title, e.g. "Albert Einstein" (exactly one)
    titles: Vec<String>,
    /// Directory for the output file (default: current directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
    /// Look the title up verbatim instead of through search
    #[arg(long)]
    no_suggest: bool,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .try_init();
}

fn run(cli: &Cli, title: &str) -> anyhow::Result<PathBuf> {
    let mut settings = Settings::load();
    if let Some(dir) = &cli.output_dir {
        settings.output_dir = dir.clone();
    }
    if cli.no_suggest {
        settings.auto_suggest = false;
    }
    settings.validate()?;
    info!(settings = ?settings, "Starting article fetch");

    let client = WikiClient::new(&settings).context("Failed to create HTTP client")?;
    let fetcher = ArticleFetcher::new(client, settings);
    let path = fetcher.write_article_file(title)?;
    Ok(path)
}

/// The title to fetch, or `None` unless exactly one was given.
fn single_title(cli: &Cli) -> Option<&str> {
    match cli.titles.as_slice() {
        [title] => Some(title.as_str()),
        _ => None,
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let Some(title) = single_title(&cli) else {
        println!("Must give the page name");
        println!("{}", Cli::command().render_usage());
        return ExitCode::SUCCESS;
    };

    let t0 = Instant::now();
    match run(&cli, title) {
        Ok(path) => {
            println!("{} ({:.1}s)", path.display(), t0.elapsed().as_secs_f64());
            ExitCode::SUCCESS
        }
        Err(e) => {
            match e.downcast_ref::<FetchError>() {
                Some(FetchError::Ambiguous { title, candidates }) => {
                    error!("The page '{}' has multiple entries:", title);
                    for c in candidates {
                        error!("  {}", c);
                    }
                }
                _ => error!("{:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("wiki_corpus").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn exactly_one_title() {
        let cli = parse(&["Albert Einstein"]);
        assert_eq!(single_title(&cli), Some("Albert Einstein"));
    }

    #[test]
    fn zero_or_many_titles_are_rejected() {
        assert_eq!(single_title(&parse(&[])), None);
        assert_eq!(single_title(&parse(&["Albert", "Einstein"])), None);
    }

    #[test]
    fn flags_do_not_count_as_titles() {
        let cli = parse(&["--no-suggest", "-o", "/tmp/out", "Rust"]);
        assert_eq!(single_title(&cli), Some("Rust"));
        assert!(cli.no_suggest);
        assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp/out")));
    }

    #[test]
    fn hyphenated_title_after_separator() {
        let cli = parse(&["--", "-ism"]);
        assert_eq!(single_title(&cli), Some("-ism"));
        assert!(Cli::try_parse_from(["wiki_corpus", "-ism"]).is_err());
    }

    #[test]
    fn usage_renders() {
        let usage = Cli::command().render_usage().to_string();
        assert!(usage.contains("wiki_corpus"));
    }
}
