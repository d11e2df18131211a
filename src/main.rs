//! Search-Client-RS terminal front-end
//!
//! Reads commands line by line and renders the session after each one.

use anyhow::Result;
use clap::Parser;
use search_client_rs::{
    config,
    render::{Presenter, TextPresenter},
    search::ControllerEvent,
    session::{InputBus, InputEvent},
    HttpSearchApi, SearchApi, Session,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Interactive client for the search API
#[derive(Debug, Parser)]
#[command(name = "search-client", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the search API (overrides settings)
    #[arg(long)]
    api_url: Option<String>,
}

/// One line of user input
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Search(&'a str),
    Suggest(&'a str),
    Pick(usize),
    Next,
    Previous,
    Focus,
    ClickOutside,
    Resubmit,
    Help,
    Quit,
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let Some(rest) = line.strip_prefix(':') else {
            return if line.is_empty() {
                Command::Resubmit
            } else {
                Command::Search(line)
            };
        };

        match rest {
            "q" | "quit" => Command::Quit,
            "n" | "next" => Command::Next,
            "p" | "prev" => Command::Previous,
            "focus" => Command::Focus,
            "out" => Command::ClickOutside,
            "h" | "help" => Command::Help,
            _ => {
                if let Some(text) = rest.strip_prefix("s ") {
                    return Command::Suggest(text.trim_start());
                }
                match rest.parse::<usize>() {
                    Ok(n) if n > 0 => Command::Pick(n - 1),
                    _ => Command::Help,
                }
            }
        }
    }
}

const HELP: &str = "\
  <text>       search for <text>
  :s <text>    type <text> and show suggestions
  :<n>         search for suggestion <n>
  :n / :p      next / previous page
  :focus       focus the search box
  :out         click outside the search box
  :q           quit
";

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = config::load(args.config.as_deref())?;
    if let Some(url) = args.api_url {
        settings.api.base_url = url;
        settings.validate()?;
    }

    // Logs go to stderr so they do not interleave with rendered output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting search-client v{}", search_client_rs::VERSION);

    let api: Arc<dyn SearchApi> = Arc::new(HttpSearchApi::from_settings(&settings.api)?);
    info!("Using search API at {}", settings.api.base_url);

    let bus = InputBus::new();
    let mut session = Session::new(api, &settings);
    session.mount(&bus);

    let presenter = TextPresenter::default();
    let mut events = session.controller().subscribe();
    let settle_limit = settings
        .suggestions
        .debounce()
        .saturating_add(Duration::from_secs_f64(settings.api.request_timeout));

    print!("{}", HELP);
    prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Quit => break,
            Command::Help => {
                print!("{}", HELP);
                prompt()?;
                continue;
            }
            Command::Search(text) => {
                session.input(text);
                session.submit().await;
            }
            Command::Resubmit => {
                session.submit().await;
            }
            Command::Suggest(text) => {
                session.focus();
                session.input(text);
                let _ = tokio::time::timeout(settle_limit, session.suggestions().settled()).await;
            }
            Command::Pick(index) => {
                session.select_suggestion(index).await;
            }
            Command::Next => {
                session.next_page().await;
            }
            Command::Previous => {
                session.previous_page().await;
            }
            Command::Focus => session.focus(),
            Command::ClickOutside => {
                bus.publish(InputEvent::ClickOutside);
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        }

        while let Ok(event) = events.try_recv() {
            if event == ControllerEvent::ScrollToTop {
                print!("\x1b[2J\x1b[H");
            }
        }

        print!("{}", presenter.render(&session.view()));
        prompt()?;
    }

    session.unmount().await;
    Ok(())
}

fn prompt() -> Result<()> {
    print!("search> ");
    std::io::stdout().flush()?;
    Ok(())
}
