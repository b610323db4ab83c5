use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use ddg_answer::config::{JsonStore, SessionConfig};
use ddg_answer::ddg::DuckDuckGoClient;
use ddg_answer::locale::LocaleWords;
use ddg_answer::skill::{CommonQuerySkill, DuckDuckGoSkill};
use ddg_answer::translate::GoogleTranslateClient;
use reqwest::Client;
use tracing::info;

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Global HTTP client timeout covering DNS + connect + response body.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Answer a factual question with one sentence from DuckDuckGo.
#[derive(Parser)]
#[command(name = "ddg-answer", version, about)]
struct Cli {
    /// The question, e.g. "who is the president of france"
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,

    /// Locale tag overriding the global configuration (e.g. "de-de")
    #[arg(long, env = "DDG_ANSWER_LANG")]
    lang: Option<String>,

    /// Global configuration JSON providing "lang"
    #[arg(long, env = "DDG_ANSWER_CONFIG")]
    config: Option<PathBuf>,

    /// Skill settings JSON providing "autotranslate"
    #[arg(long, env = "DDG_ANSWER_SETTINGS")]
    settings: Option<PathBuf>,

    /// Directory holding <lang>/text.json word lists
    #[arg(long, env = "DDG_ANSWER_LOCALE_DIR", default_value = "locale")]
    locale_dir: PathBuf,

    /// Never translate queries or answers
    #[arg(long)]
    no_autotranslate: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ddg_answer=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let global = JsonStore::load(cli.config.as_deref())?;
    let settings = JsonStore::load(cli.settings.as_deref())?;
    let session = SessionConfig::from_stores(&global, &settings)
        .with_overrides(cli.lang.as_deref(), cli.no_autotranslate);

    let words = LocaleWords::load(&cli.locale_dir, session.lang.as_str())?;

    let http = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .build()?;
    let skill = DuckDuckGoSkill::new(
        DuckDuckGoClient::new(http.clone()),
        GoogleTranslateClient::new(http),
        session,
        words,
    );

    let query = cli.query.join(" ");
    info!(%query, "answering");
    let outcome = skill
        .match_query_phrase(&query)
        .await
        .inspect_err(|e| tracing::error!("query failed: {e}"));
    skill.stop();

    match outcome? {
        Some(matched) => {
            info!(level = ?matched.level, "answered");
            println!("{}", matched.answer);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("no answer for \"{query}\"");
            Ok(ExitCode::FAILURE)
        }
    }
}
