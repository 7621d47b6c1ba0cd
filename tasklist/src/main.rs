//! Interactive to-do shell.
//!
//! Reads one command per line from stdin and redraws the list after each.
//! When a periodic sweep changes what is on screen, the list is redrawn
//! without waiting for input. Logs go to stderr; set `RUST_LOG` to change
//! verbosity.

use anyhow::Context;
use std::sync::Arc;
use tasklist::{Command, Config, Outcome, Session, TodoEnvironment};
use tasklist_core::environment::{SystemClock, TimeOrderedIds};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env().context("invalid configuration")?;
    tracing::info!(?config, zone = %config.due_zone, "Starting tasklist");

    let env = TodoEnvironment::new(Arc::new(SystemClock), Arc::new(TimeOrderedIds))
        .with_sweep_interval(config.sweep_interval);
    let session = Session::new(env, config.due_zone);
    let mut fed_back = session.store().subscribe_actions();
    session.mount().await?;

    let mut screen = session.screen().await;
    println!("{screen}");
    println!("(type `help` for commands)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut feed_open = true;
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                let command = match Command::parse(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(error) => {
                        println!("error: {error}");
                        continue;
                    },
                };

                match session.execute(command).await {
                    Ok(Outcome::Render) => {
                        screen = session.screen().await;
                        println!("{screen}");
                    },
                    Ok(Outcome::Print(text)) => println!("{text}"),
                    Ok(Outcome::Quit) => break,
                    Err(error) => println!("error: {error}"),
                }
            },
            action = fed_back.recv(), if feed_open => {
                match action {
                    Ok(action) => tracing::debug!(?action, "Effect fed back an action"),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "Redraw feed lagged");
                    },
                    Err(RecvError::Closed) => {
                        feed_open = false;
                        continue;
                    },
                }
                let latest = session.screen().await;
                if latest != screen {
                    screen = latest;
                    println!("{screen}");
                }
            },
        }
    }

    if let Err(error) = session.shutdown(config.shutdown_timeout).await {
        tracing::warn!(%error, "Unclean shutdown");
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasklist=info,tasklist_runtime=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
