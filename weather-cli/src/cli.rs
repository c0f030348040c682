use anyhow::{Context, anyhow};
use clap::{ArgAction, Parser, Subcommand};
use inquire::{CustomType, CustomUserError, InquireError, Select, Text, validator::Validation};
use kenya_weather_core::{
    Config, HttpWeatherClient, KENYA_POINTS, LocationCandidate, Shell, ViewState, WeatherCode,
    fetch_overview,
};
use std::{fmt, time::Duration};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "kenya-weather", version, about = "Weather search for locations in Kenya")]
pub struct Cli {
    /// Backend base URL, e.g. "http://localhost:5001/api". Overrides the config file.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// More log output on stderr (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Defaults to `interactive`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the backend URL and overview delay interactively.
    Configure,

    /// Search once and show the weather for the match.
    Search {
        /// Place name, e.g. "Nairobi".
        term: String,

        /// Pick the N-th candidate (1-based) instead of prompting when several match.
        #[arg(long)]
        pick: Option<usize>,

        /// Print the weather as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for searches until Esc or an empty line; `:overview` shows the country overview.
    Interactive,

    /// Current temperature across 20 towns in Kenya.
    Overview {
        /// Pause between requests in milliseconds; defaults to the configured value.
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Print the points and statistics as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Describe a weather code.
    Describe {
        code: u8,

        /// Use the built-in table instead of asking the backend.
        #[arg(long)]
        local: bool,
    },

    /// Check that the backend is reachable.
    Health,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let command = self.command.unwrap_or(Command::Interactive);
        tracing::debug!(?command, "starting");

        match command {
            // must work even when the stored config is what's broken
            Command::Configure => configure(config_for_configure(Config::load())),
            Command::Search { term, pick, json } => {
                let (_, client) = connect(self.base_url)?;
                search_once(client, &term, pick, json).await
            }
            Command::Interactive => {
                let (config, client) = connect(self.base_url)?;
                interactive(client, config.overview_delay()).await
            }
            Command::Overview { delay_ms, json } => {
                let (config, client) = connect(self.base_url)?;
                let delay = delay_ms.map(Duration::from_millis).unwrap_or(config.overview_delay());
                overview(&client, delay, json).await
            }
            Command::Describe { code, local } => {
                let (_, client) = connect(self.base_url)?;
                describe(&client, WeatherCode(code), local).await
            }
            Command::Health => {
                let (_, client) = connect(self.base_url)?;
                let health = client
                    .health()
                    .await
                    .with_context(|| format!("Backend at {} is not healthy", client.base_url()))?;
                println!("{}: {}", health.status, health.message);
                Ok(())
            }
        }
    }
}

fn connect(base_url: Option<String>) -> anyhow::Result<(Config, HttpWeatherClient)> {
    let config = Config::load()?.with_base_url_override(base_url);
    tracing::debug!(base_url = %config.base_url, "using backend");
    let client = HttpWeatherClient::new(config.base_url.clone());
    Ok((config, client))
}

/// Starting point for `configure`: the stored config, or defaults if it can't be read.
fn config_for_configure(loaded: anyhow::Result<Config>) -> Config {
    loaded.unwrap_or_else(|err| {
        tracing::warn!(error = ?err, "ignoring unreadable config, starting from defaults");
        Config::default()
    })
}

fn require_non_blank(input: &str) -> Result<Validation, CustomUserError> {
    if input.trim().is_empty() {
        Ok(Validation::Invalid("The base URL must not be blank".into()))
    } else {
        Ok(Validation::Valid)
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let base_url = Text::new("Backend base URL:")
        .with_default(&config.base_url)
        .with_validator(require_non_blank)
        .prompt()
        .context("Configuration aborted")?;
    let delay_ms = CustomType::<u64>::new("Overview delay between requests (ms):")
        .with_default(config.overview_delay_ms)
        .with_error_message("Please enter a whole number of milliseconds")
        .prompt()
        .context("Configuration aborted")?;

    if !config.set_base_url(&base_url) {
        tracing::warn!("blank base URL entered, keeping {}", config.base_url);
    }
    config.overview_delay_ms = delay_ms;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn search_once(
    client: HttpWeatherClient,
    term: &str,
    pick: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let shell = Shell::new(client);
    let mut state = shell.submit_search(term).await;

    if let ViewState::LocationAmbiguous { candidates } = &state {
        let chosen = match pick {
            Some(n) => Some(nth_candidate(candidates, n)?),
            None => choose_location(candidates)?,
        };
        match chosen {
            Some(location) => state = shell.select_location(location).await,
            None => return Ok(()),
        }
    }

    match (&state, json) {
        (ViewState::WeatherLoaded { location, report }, true) => {
            let body = serde_json::json!({ "location": location, "weather": report });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        (ViewState::Failed { .. }, _) => eprintln!("{}", render::render_state(&state)),
        _ => println!("{}", render::render_state(&state)),
    }
    Ok(())
}

/// Typed at the interactive prompt to (re)load the country overview.
const OVERVIEW_KEYWORD: &str = ":overview";

/// One line typed at the interactive prompt.
#[derive(Debug, PartialEq, Eq)]
enum Entry {
    Quit,
    Overview,
    Search(String),
}

impl Entry {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            Entry::Quit
        } else if line.eq_ignore_ascii_case(OVERVIEW_KEYWORD) {
            Entry::Overview
        } else {
            Entry::Search(line.to_string())
        }
    }
}

// Each prompt is shown only after the previous request has settled, so the
// input is never open while the shell is busy.
async fn interactive(client: HttpWeatherClient, overview_delay: Duration) -> anyhow::Result<()> {
    let shell = Shell::new(client);
    println!("{}\n", render::render_state(&shell.state().await));
    println!("Type {OVERVIEW_KEYWORD} for temperatures across Kenya.\n");

    loop {
        let line = match Text::new("Search for a location in Kenya:")
            .with_placeholder("e.g. Nairobi, Mombasa, Kisumu")
            .prompt()
        {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        let term = match Entry::parse(&line) {
            Entry::Quit => break,
            Entry::Overview => {
                overview(shell.backend(), overview_delay, false).await?;
                println!();
                continue;
            }
            Entry::Search(term) => term,
        };

        let mut state = shell.submit_search(&term).await;

        if let ViewState::LocationAmbiguous { candidates } = &state {
            match choose_location(candidates)? {
                Some(location) => state = shell.select_location(location).await,
                None => continue,
            }
        }

        println!("{}\n", render::render_state(&state));
    }

    Ok(())
}

async fn overview(client: &HttpWeatherClient, delay: Duration, json: bool) -> anyhow::Result<()> {
    eprintln!("Loading weather data across Kenya...");
    let result = fetch_overview(client, &KENYA_POINTS, delay).await;

    if json {
        let body = serde_json::json!({ "overview": result, "stats": result.stats() });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print!("{}", render::render_overview(&result));
    }
    Ok(())
}

async fn describe(client: &HttpWeatherClient, code: WeatherCode, local: bool) -> anyhow::Result<()> {
    let description = if local {
        code.description().to_string()
    } else {
        client
            .describe_code(code)
            .await
            .with_context(|| format!("Failed to describe weather code {code}"))?
            .description
    };
    println!("{} {code}: {description}", code.glyph());
    Ok(())
}

/// Picker entry; `Select` needs `Display`.
struct CandidateOption(LocationCandidate);

impl fmt::Display for CandidateOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render::candidate_line(&self.0))
    }
}

/// `None` when the user backs out of the list.
fn choose_location(candidates: &[LocationCandidate]) -> anyhow::Result<Option<LocationCandidate>> {
    let options = candidates.iter().cloned().map(CandidateOption).collect();

    match Select::new("Select a location:", options).prompt() {
        Ok(CandidateOption(location)) => Ok(Some(location)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn nth_candidate(candidates: &[LocationCandidate], n: usize) -> anyhow::Result<LocationCandidate> {
    n.checked_sub(1)
        .and_then(|idx| candidates.get(idx))
        .cloned()
        .ok_or_else(|| anyhow!("--pick must be between 1 and {}", candidates.len()))
}
