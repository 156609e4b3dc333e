//! Skirmish client binary.
//!
//! Runs a local sandbox session and drives it from line commands on stdin.
//! Frames tick at `FRAME_RATE` per second so move and strike animations play
//! out between commands. Type `help` for the command list.
mod command;
mod logging;
mod report;

use anyhow::Result;
use client_bootstrap::{ClientConfig, SessionBuilder, SessionSetup};
use client_frontend_core::{FrameClock, FrameSource};
use command::{Command, HELP};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(&config.session_id)?;

    tracing::info!("Starting skirmish client");
    tracing::info!(
        radius = config.sandbox.radius,
        frame_rate = config.frames.rate,
        "configuration loaded"
    );

    let setup = SessionBuilder::new(config).build()?;
    run(setup).await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}

async fn run(setup: SessionSetup) -> Result<()> {
    let SessionSetup {
        config,
        mut session,
    } = setup;
    let mut clock = FrameClock::with_rate(config.frames.rate);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}\n");
    print!("{}", report::summary(&session));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => println!("{HELP}"),
                    Ok(Command::Show) => print!("{}", report::summary(&session)),
                    Ok(command) => match command.apply(&mut session) {
                        Ok(()) => print!("{}", report::summary(&session)),
                        Err(error) => {
                            tracing::warn!(?command, %error, "command failed");
                            println!("error: {error:#}");
                        }
                    },
                    Err(error) => println!("{error:#}"),
                }
            }
            Some(dt) = clock.next_frame() => {
                let animating_before = session.mode_names().contains(&"animating");
                session.advance(dt);
                if animating_before && !session.mode_names().contains(&"animating") {
                    print!("{}", report::summary(&session));
                }
            }
        }
    }

    Ok(())
}
