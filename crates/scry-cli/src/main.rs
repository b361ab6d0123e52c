//! The `scry` binary: a REPL frontend over the session controller.

mod terminal;

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing_subscriber::EnvFilter;

use scry_application::SessionUseCase;
use scry_capture::{CaptureRelay, MonitorCapture};
use scry_core::config::ScryConfig;
use scry_interaction::AnalysisClient;

use terminal::TerminalRenderer;

const COMMANDS: &[&str] = &[
    "/capture", "/clear", "/select", "/crop", "/insight", "/save", "/help",
];

/// Scry - screen snapshot Q&A assistant.
#[derive(Parser, Debug)]
#[command(name = "scry")]
#[command(
    about = "Capture the screen, crop a region, and ask questions about it",
    long_about = None
)]
struct Cli {
    /// Analysis endpoint URL (overrides config file and environment)
    #[arg(long)]
    endpoint: Option<String>,

    /// Maximum displayed snapshot width
    #[arg(long)]
    display_width: Option<u32>,
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ScryConfig::load()?;
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(display_width) = cli.display_width {
        config.display_width = display_width;
    }
    tracing::debug!("analysis endpoint: {}", config.endpoint);

    let api = Arc::new(AnalysisClient::new(config.endpoint.clone()));
    let relay = CaptureRelay::spawn(Arc::new(MonitorCapture::new()));
    let mut usecase = SessionUseCase::new(config, relay, api, Box::new(TerminalRenderer::new()));

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== Scry ===".bright_magenta().bold());
    println!(
        "{}",
        "Type '/capture' to take a snapshot, '/help' for all commands, or 'quit' to exit."
            .bright_black()
    );
    println!();

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                // Handle quit command
                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                // Skip empty lines
                if trimmed.is_empty() {
                    continue;
                }

                // Add to history
                let _ = rl.add_history_entry(&line);

                dispatch(&mut usecase, trimmed).await;
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

/// Routes one REPL line: slash commands drive the controller's discrete
/// operations; anything else is a chat message.
async fn dispatch(usecase: &mut SessionUseCase, input: &str) {
    let mut parts = input.split_whitespace();
    match parts.next() {
        Some("/capture") => usecase.capture().await,
        Some("/clear") => usecase.clear(),
        Some("/select") => select(usecase, input),
        Some("/crop") => usecase.crop(),
        Some("/insight") => usecase.quick_insight().await,
        Some("/save") => match parts.next() {
            Some(path) => usecase.save(Path::new(path)),
            None => println!("{}", "Usage: /save <path>".yellow()),
        },
        Some("/help") => print_help(),
        Some(command) if command.starts_with('/') => {
            println!("{}", format!("Unknown command: {command}").bright_black());
        }
        _ => usecase.send_message(input).await,
    }
}

/// Parses `/select x0,y0 x1,y1` and replays it as a press/drag/release
/// gesture over the displayed snapshot.
fn select(usecase: &mut SessionUseCase, input: &str) {
    let coords: Vec<i32> = input
        .split_whitespace()
        .skip(1)
        .flat_map(|pair| pair.split(','))
        .filter_map(|n| n.parse().ok())
        .collect();

    if coords.len() != 4 {
        println!("{}", "Usage: /select x0,y0 x1,y1 (display coordinates)".yellow());
        return;
    }

    usecase.selection_press(coords[0], coords[1]);
    usecase.selection_drag(coords[2], coords[3]);
    usecase.selection_release();
}

fn print_help() {
    println!("{}", "Commands:".bright_yellow());
    println!("  /capture            take a snapshot of the screen");
    println!("  /select x0,y0 x1,y1 draw a crop selection (display coordinates)");
    println!("  /crop               crop the snapshot to the selection");
    println!("  /insight            quick analysis of the snapshot");
    println!("  /save <path>        save the snapshot as PNG");
    println!("  /clear              reset snapshot and conversation");
    println!("  quit                exit");
    println!("Anything else is sent to the analysis endpoint as a question.");
}
