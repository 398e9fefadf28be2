use anyhow::{Context, Result};
use clap::Parser;
use minutes_core::ChatCompletionsClient;
use minutes_service::config::Config;
use minutes_service::driver::{Command, INTERVIEW_COMPLETE_NOTICE, SessionDriver};
use minutes_service::prompt_loader;
use std::io::Write;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::fmt::time::ChronoLocal;

#[derive(Parser)]
#[command(version, about = "Interviews you about a meeting and writes its minutes")]
struct Cli {
    /// Directory with interview.md, minutes.md or minutes_request.md prompt overrides
    #[arg(long, value_name = "DIR")]
    prompts: Option<PathBuf>,

    /// Allow `generate mom` as soon as the conversation has started
    #[arg(long)]
    allow_early_minutes: bool,
}

fn render(command: Command) {
    match command {
        Command::Reply(text) => println!("\nBot: {text}"),
        Command::InterviewComplete => println!("\n{INTERVIEW_COMPLETE_NOTICE}"),
        Command::Notice(text) => println!("\n{text}"),
        Command::Minutes(minutes) => {
            println!("=== Meeting Minutes ===");
            println!("{minutes}");
            println!("=====================");
        }
        Command::Error(text) => println!("\n{text}"),
        Command::Goodbye => println!("\nThank you for using the Meeting Analysis Chatbot!"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // --- 1. Parse Command-Line Arguments ---
    // Before config, so --help and --version work without an API key.
    let args = Cli::parse();

    // --- 2. Load Configuration ---
    let config = Config::from_env().context("Failed to load application configuration")?;

    // --- 3. Initialize Logging ---
    // stdout carries the conversation, logs go to stderr.
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Configuration loaded successfully. Starting minutes bot...");

    // --- 4. Load Prompts ---
    let prompts_dir = args.prompts.or_else(|| config.prompts_dir.clone());
    let prompts = prompt_loader::resolve_prompts(prompts_dir.as_deref())
        .context("Failed to load LLM prompts")?;
    if let Some(dir) = &prompts_dir {
        tracing::info!("Loaded prompt overrides from {}", dir.display());
    }

    // --- 5. Initialize API Client ---
    let settings = config.model_settings();
    tracing::info!(model = %settings.model, base_url = %settings.base_url, "using chat completions API");
    let model = Arc::new(
        ChatCompletionsClient::new(config.openai_api_key, settings)
            .context("Failed to build the chat completions client")?,
    );

    // --- 6. Session Setup ---
    // The driver reports through this channel; it is drained after every line.
    let (command_tx, mut command_rx) = tokio::sync::mpsc::channel::<Command>(32);
    let mut driver =
        SessionDriver::new(model, Arc::new(prompts), args.allow_early_minutes, command_tx);

    println!("Welcome to the Meeting Analysis Chatbot!");
    println!(
        "Type 'hi' to start the conversation, 'generate mom' to create Meeting Minutes, \
         'retry' to resend an unanswered message or 'quit' to end the conversation"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // --- 7. Conversation Loop ---
    loop {
        print!("\nYou: ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read from stdin")?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received Ctrl-C, shutting down...");
                None
            }
        };

        let Some(line) = line else {
            // EOF or Ctrl-C at the prompt.
            render(Command::Goodbye);
            break;
        };

        let flow = tokio::select! {
            flow = driver.handle_line(&line) => flow?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received Ctrl-C, shutting down...");
                ControlFlow::Break(())
            }
        };

        while let Ok(command) = command_rx.try_recv() {
            render(command);
        }

        if flow.is_break() {
            break;
        }
    }

    tracing::info!(
        messages = driver.session().turns().len(),
        "Shutting down..."
    );
    Ok(())
}
