use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{config::load_settings, render, LiveDataApi, LiveDataClient};
use shared::{domain::SensorId, protocol::SensorQuery};

#[derive(Parser, Debug)]
#[command(name = "live-data", about = "One-shot chat and sensor queries against the live data agent")]
struct Args {
    /// Backend base URL, e.g. http://127.0.0.1:8088
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send one chat message and print the reply
    Chat {
        #[arg(required = true)]
        message: Vec<String>,
    },
    /// List the sensors the backend knows about
    Sensors,
    /// Fetch readings for one sensor
    Query {
        sensor_id: String,
        #[arg(long)]
        window: Option<String>,
        /// ISO-8601 start, used by the backend when the window is empty
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
}

#[derive(Debug, PartialEq, Eq)]
struct Outcome {
    text: String,
    ok: bool,
}

impl Outcome {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ok: true,
        }
    }

    fn failed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ok: false,
        }
    }
}

async fn run(api: &dyn LiveDataApi, command: Command, default_window: &str) -> Outcome {
    match command {
        Command::Chat { message } => {
            let message = message.join(" ");
            let message = message.trim();
            if message.is_empty() {
                return Outcome::ok("");
            }
            match api.send_chat(message).await {
                Ok(body) => Outcome::ok(body.into_chat_text()),
                Err(err) => Outcome::failed(render::chat_failure(&err)),
            }
        }
        Command::Sensors => match api.list_sensors().await {
            Ok(sensors) => {
                let mut lines: Vec<String> = sensors
                    .iter()
                    .map(|sensor| format!("{}\t{}", sensor.sensor_id, sensor.label()))
                    .collect();
                lines.push(render::sensors_loaded(sensors.len()));
                Outcome::ok(lines.join("\n"))
            }
            Err(err) => Outcome::failed(render::list_failure(&err)),
        },
        Command::Query {
            sensor_id,
            window,
            start,
            end,
        } => {
            if sensor_id.trim().is_empty() {
                return Outcome::ok(render::PICK_SENSOR_FIRST);
            }
            let window = window.unwrap_or_else(|| default_window.to_string());
            let query = SensorQuery::new(SensorId(sensor_id), window).with_range(start, end);
            match api.query_sensor(&query).await {
                Ok(body) => Outcome::ok(body.to_pretty_json()),
                Err(err) => Outcome::failed(render::query_failure(&err)),
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let settings = load_settings()
        .with_overrides(args.server_url, None)
        .validated()
        .context("invalid live-data configuration")?;
    let client = LiveDataClient::new(&settings.server_url)?;
    tracing::debug!(server_url = %client.server_url(), command = ?args.command, "running command");

    let outcome = run(&client, args.command, &settings.default_window).await;
    if outcome.ok {
        if !outcome.text.is_empty() {
            println!("{}", outcome.text);
        }
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("{}", outcome.text);
        Ok(ExitCode::FAILURE)
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
