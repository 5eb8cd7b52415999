mod client;
mod poll;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use common::SubmissionStatus;
use common::submission::{SubmissionPoll, SubmitRequest};
use console::style;

use crate::client::ApiClient;
use crate::poll::{PollOutcome, PollPolicy, poll_until_resolved};

#[derive(Parser)]
#[command(name = "gavel", version, about = "Submit solutions to a Gavel judge")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Connection {
    /// Judge server base URL.
    #[arg(long, env = "GAVEL_SERVER", default_value = "http://127.0.0.1:3000")]
    server: String,
    /// Bearer token.
    #[arg(long, env = "GAVEL_TOKEN", hide_env_values = true)]
    token: String,
}

#[derive(Subcommand)]
enum Command {
    /// Submit a source file and wait for the verdict.
    Submit {
        #[command(flatten)]
        conn: Connection,
        #[arg(long)]
        problem: i32,
        /// Language id: 1 = python, 2 = javascript, 3 = cpp.
        #[arg(long)]
        language: i32,
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        contest: Option<i32>,
        #[arg(long, default_value_t = 30)]
        max_attempts: u32,
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },
    /// Show the current status of a submission.
    Status {
        #[command(flatten)]
        conn: Connection,
        #[arg(long)]
        id: i32,
    },
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Submit {
            conn,
            problem,
            language,
            file,
            contest,
            max_attempts,
            interval_ms,
        } => {
            let code = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let client = ApiClient::new(&conn.server, &conn.token)?;

            let id = client.submit(&SubmitRequest {
                code,
                problem_id: problem,
                language_id: language,
                active_contest_id: contest,
            })?;
            println!("Submitted as #{id}");

            let cancel = Arc::new(AtomicBool::new(false));
            let flag = cancel.clone();
            ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
                .context("Failed to install Ctrl-C handler")?;

            let policy = PollPolicy {
                interval: Duration::from_millis(interval_ms),
                max_attempts,
            };
            let outcome = poll_until_resolved(&client, id, policy, &cancel, |p| {
                let done = p.test_cases.iter().filter(|c| c.status.is_terminal()).count();
                println!("  {done}/{} test cases judged", p.test_cases.len());
            })?;

            Ok(match outcome {
                PollOutcome::Resolved(p) => {
                    print_poll(&p);
                    if p.status == SubmissionStatus::Accepted {
                        ExitCode::SUCCESS
                    } else {
                        ExitCode::FAILURE
                    }
                }
                PollOutcome::TimedOut { attempts, .. } => {
                    eprintln!(
                        "{} no verdict after {attempts} polls; check later with `gavel status --id {id}`",
                        style("timeout:").yellow().bold()
                    );
                    ExitCode::from(2)
                }
                PollOutcome::Cancelled => {
                    eprintln!("Stopped waiting. Submission #{id} is still being judged.");
                    ExitCode::from(130)
                }
            })
        }
        Command::Status { conn, id } => {
            let client = ApiClient::new(&conn.server, &conn.token)?;
            print_poll(&client.status(id)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_poll(p: &SubmissionPoll) {
    let status = match p.status {
        SubmissionStatus::Accepted => style(p.status.to_string()).green().bold(),
        SubmissionStatus::Failed => style(p.status.to_string()).red().bold(),
        SubmissionStatus::Pending => style(p.status.to_string()).yellow(),
    };
    print!("#{} {status}", p.id);
    if let Some(time) = p.time {
        print!("  {time:.3}s");
    }
    if let Some(memory) = p.memory {
        print!("  {memory} KB");
    }
    println!();

    for case in &p.test_cases {
        let time = case.time.map(|t| format!("{t:.3}s")).unwrap_or_default();
        println!("  #{:<3} {:<20} {time}", case.index, case.status.to_string());
    }
}
