//! Interactive terminal driver for the IBAN generator core.
//!
//! Presentation plumbing only: translates terminal events into core
//! events and prints whatever the active view says. All decision logic
//! lives in `iban-gen-core`.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use iban_gen_core::{ApiClient, Directory, Orchestrator, View};
use tracing::info;

const USAGE: &str = "\
iban-gen-cli [options]

Options:
  --base-url <url>   Generation service base URL
  --country <code>   Jurisdiction to load the bank directory for (default: DE)
  --countries        Print the supported country codes and exit
  --help             Show this help

Interactive commands:
  <text>       update the input and show matching banks
  <empty line> submit the current input for generation
  :pick <n>    accept suggestion n (1-based)
  :dismiss     dismiss a displayed error
  :quit        exit
";

struct Options {
    base_url: Option<String>,
    country: String,
    list_countries: bool,
}

fn parse_args() -> Result<Options> {
    let mut options = Options {
        base_url: None,
        country: "DE".to_string(),
        list_countries: false,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--base-url" => {
                options.base_url = Some(args.next().context("--base-url needs a value")?);
            }
            "--country" => {
                options.country = args.next().context("--country needs a value")?;
            }
            "--countries" => options.list_countries = true,
            "--help" | "-h" => {
                print!("{}", USAGE);
                std::process::exit(0);
            }
            other => anyhow::bail!("unknown option {:?} (--help for usage)", other),
        }
    }

    Ok(options)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let options = parse_args()?;
    let api = match options.base_url {
        Some(url) => ApiClient::with_base_url(url),
        None => ApiClient::new(),
    };

    if options.list_countries {
        for code in api.country_codes().await? {
            println!("{}", code);
        }
        return Ok(());
    }

    let directory = Directory::load(&api, &options.country).await;
    info!("Directory ready with {} entries", directory.len());
    if directory.is_empty() {
        println!("no local bank directory; input is forwarded verbatim as a bank code");
    }

    let mut app = Orchestrator::new(directory);
    println!("enter bic or bank code (:quit to exit)");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let line = line.trim_end();

        match line {
            ":quit" | ":q" => break,
            ":dismiss" => app.dismiss_error(),
            "" => {
                app.submit(&api).await;
                println!("input: {}", app.query().raw_input);
            }
            picked if picked.starts_with(":pick") => {
                match picked[":pick".len()..].trim().parse::<usize>() {
                    Ok(n) if n >= 1 => {
                        let entry = app.query().shown_candidates().get(n - 1).cloned();
                        match entry {
                            Some(entry) => {
                                app.accept(&api, &entry).await;
                                println!("input: {}", app.query().raw_input);
                            }
                            None => println!("no suggestion {}", n),
                        }
                    }
                    _ => println!("usage: :pick <n>"),
                }
            }
            text => app.handle_input(text),
        }

        render(&app);
    }

    Ok(())
}

/// Print the active view after an event.
fn render(app: &Orchestrator) {
    match app.view() {
        View::Suggesting => {
            for (i, entry) in app.query().shown_candidates().iter().enumerate() {
                println!("{:>2}. {}  {}", i + 1, entry.name, entry.code);
            }
        }
        View::Result => {
            if let Some(generation) = app.result() {
                println!("IBAN:         {}", generation.iban);
                println!("BIC:          {}", generation.bic.as_deref().unwrap_or(""));
                println!("Bankleitzahl: {}", generation.bankcode);
            }
        }
        View::Error => {
            if let Some(message) = app.error() {
                println!("error: {} (:dismiss to clear)", message);
            }
        }
        View::Idle => {}
    }
}
