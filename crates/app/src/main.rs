//! LexIntake - law-firm client intake and appointment scheduling.
//!
//! Usage: `lexintake <command> [args...]`

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::env;
use std::io::{self, Write};
use std::time::Instant;

use anyhow::{anyhow, Context};
use lexintake_domain::IntakeError;
use lexintake_lib::commands;
use lexintake_lib::utils::logging::{error_label, init_logging, log_command_execution};
use lexintake_lib::AppContext;
use tokio::io::BufReader;
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("help");

    if matches!(command, "help" | "--help" | "-h") {
        print_help();
        return Ok(());
    }

    let ctx = match AppContext::new() {
        Ok(ctx) => ctx,
        Err(err) => {
            error!(error = %err, label = error_label(&err), "Failed to initialise application");
            return Err(anyhow::Error::new(err).context("failed to initialise application"));
        }
    };

    let started = Instant::now();
    let result = run(command, &args[1..], &ctx).await;
    log_command_execution(command, started.elapsed(), result.is_ok());

    if let Err(err) = &result {
        if let Some(intake) = err.downcast_ref::<IntakeError>() {
            error!(error = %intake, label = error_label(intake), "Command failed");
        }
    }
    result
}

async fn run(command: &str, args: &[String], ctx: &AppContext) -> anyhow::Result<()> {
    let mut stdout = io::stdout();

    match command {
        "schedule" => {
            let (name, time, details) = match args {
                [name, time, details, ..] => (name, time, details),
                _ => {
                    return Err(anyhow!(
                        "usage: lexintake schedule <name> <preferred time> <details> [phone]"
                    ))
                }
            };
            let phone = args.get(3).map(String::as_str);
            commands::schedule(ctx, name, time, details, phone, &mut stdout).await?;
        }
        "sweep" => {
            commands::sweep_once(ctx, &mut stdout).await?;
        }
        "reminders" => {
            commands::run_reminder_scheduler(ctx, async {
                if let Err(err) = tokio::signal::ctrl_c().await {
                    error!(error = %err, "Failed to listen for Ctrl-C");
                }
            })
            .await?;
        }
        "chat" => {
            let assistant = ctx
                .assistant
                .as_ref()
                .context("chat needs OPENAI_API_KEY or an [openai] config section")?;
            let input = BufReader::new(tokio::io::stdin());
            commands::run_chat(assistant, &ctx.intake, input, &mut stdout).await?;
        }
        other => {
            print_help();
            return Err(anyhow!("unknown command: {other}"));
        }
    }

    stdout.flush()?;
    Ok(())
}

fn print_help() {
    println!("LexIntake - client intake and appointment scheduling");
    println!();
    println!("Usage: lexintake <command> [args...]");
    println!();
    println!("Commands:");
    println!("  schedule <name> <time> <details> [phone]");
    println!("                 Book one appointment (e.g. \"15/05/2025 14h\")");
    println!("  sweep          Send reminders for appointments starting in about an hour");
    println!("  reminders      Run the reminder scheduler until Ctrl-C");
    println!("  chat           Talk to the intake assistant on stdin");
    println!("  help           Show this help message");
    println!();
    println!("Configuration: .env, environment variables, config.{{json,toml}}");
    println!("Logging: RUST_LOG=<filter>, LEXINTAKE_LOG_JSON=1 for JSON output");
}
