//! # Cleverchat - Cleverbot in the terminal
//!
//! One-shot: `cleverchat hello there` prints a single reply.
//! Interactive: `cleverchat` reads phrases from stdin until `/quit` or EOF.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use cleverchat::constants::{API_KEY_ENV, MIN_TIMEOUT_SECS};
use cleverchat::{CleverbotClient, CleverbotQuery, Config, ConversationState, Transcript};

/// Cleverchat - talk to Cleverbot from the terminal
#[derive(Parser, Debug)]
#[command(name = "cleverchat", version, about = "Talk to Cleverbot from the terminal")]
struct Cli {
    /// Cleverbot API key (overrides CLEVERBOT_API_KEY and the config file)
    #[arg(long, short = 'k')]
    key: Option<String>,

    /// Reply endpoint to use instead of the public one
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, short = 't', value_name = "SECS")]
    timeout: Option<u64>,

    /// Resume the conversation identified by this token
    #[arg(long, value_name = "TOKEN")]
    cs: Option<String>,

    /// Log requests and replies to stderr
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Phrase to send; starts an interactive session when omitted
    phrase: Vec<String>,
}

/// What a line typed at the prompt asks for.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Blank,
    Quit,
    Reset,
    History,
    Clear,
    Status,
    Unknown(&'a str),
    Phrase(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    match line {
        "" => Input::Blank,
        "/quit" | "/exit" => Input::Quit,
        "/reset" => Input::Reset,
        "/history" => Input::History,
        "/clear" => Input::Clear,
        "/status" => Input::Status,
        cmd if cmd.starts_with('/') => Input::Unknown(cmd),
        phrase => Input::Phrase(phrase),
    }
}

/// One-line summary of where the conversation stands.
fn describe_state(state: &ConversationState) -> String {
    let token = if state.is_new() {
        "(new conversation)"
    } else {
        state.conversation_id()
    };
    match state.random_number() {
        Some(n) => format!("conversation: {}  random_number: {}", token, n),
        None => format!("conversation: {}  no reply yet", token),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load and apply CLI overrides to config
    let mut config = Config::load().with_api_key(cli.key.clone());
    if let Some(url) = cli.base_url.clone() {
        config.base_url = url;
    }
    if let Some(secs) = cli.timeout {
        config.timeout_secs = secs.max(MIN_TIMEOUT_SECS);
    }

    let api_key = config.api_key.clone().with_context(|| {
        format!(
            "No API key found. Pass --key, set {}, or add api_key to ~/.config/cleverchat/config.toml",
            API_KEY_ENV
        )
    })?;
    let client = CleverbotClient::from_config(api_key, &config)
        .context("Failed to set up the Cleverbot client")?;

    let mut query = CleverbotQuery::with_client(client, cli.phrase.join(" "));
    if let Some(cs) = cli.cs {
        query.set_conversation_id(cs);
    }

    if !cli.phrase.is_empty() {
        query
            .send_request()
            .await
            .context("Cleverbot request failed")?;
        println!("{}", query.last_response().unwrap_or_default());
        return Ok(());
    }

    run_interactive(&mut query, config.max_history).await
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "cleverchat=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run_interactive(query: &mut CleverbotQuery, max_history: usize) -> Result<()> {
    let mut transcript = Transcript::new(max_history);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    println!(
        "Talking to Cleverbot. /reset starts over, /history shows the transcript, \
         /clear empties it, /status shows the conversation token, /quit exits."
    );
    loop {
        print!("> ");
        stdout.flush()?;

        let Some(raw) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };

        let phrase = match parse_input(&raw) {
            Input::Blank => continue,
            Input::Quit => break,
            Input::Reset => {
                query.reset();
                transcript.add_system("new conversation");
                println!("Started a new conversation.");
                continue;
            }
            Input::History => {
                for line in transcript.lines() {
                    println!("{}", line.render());
                }
                continue;
            }
            Input::Clear => {
                transcript.clear();
                continue;
            }
            Input::Status => {
                println!("{}", describe_state(query.state()));
                continue;
            }
            Input::Unknown(cmd) => {
                eprintln!("Unknown command: {}", cmd);
                continue;
            }
            Input::Phrase(p) => p,
        };

        transcript.add_user(phrase);
        query.phrase = phrase.to_string();
        match query.send_request().await {
            Ok(()) => {
                let reply = query.last_response().unwrap_or_default();
                println!("{}", reply);
                transcript.add_bot(reply);
            }
            Err(e) => {
                // Conversation token is unchanged, so the user can just retry.
                eprintln!("Error: {}", e);
                transcript.add_system(&format!("error: {}", e));
            }
        }
    }

    Ok(())
}
