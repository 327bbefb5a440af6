//! dash-simulator — synthetic sensor feed for demos and manual testing.
//!
//! Serves `GET /sensor_data.json` with a random-walk reading in the same
//! shape the hardware bridge produces, advancing once per interval:
//!
//! ```json
//! { "timestamp": "2026-08-07 12:30:45", "rpm": 1512.44, "temperature": 46.1, "current": 3.02 }
//! ```

use anyhow::Result;
use axum::{extract::State, routing::get, Json, Router};
use chrono::Local;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dash-simulator", about = "Synthetic sensor JSON feed")]
struct Args {
    /// Socket address to bind.
    #[arg(long, default_value = "127.0.0.1:8000")]
    addr: SocketAddr,

    /// How often the reading advances, in milliseconds.
    #[arg(long, default_value_t = 1_000)]
    interval_ms: u64,

    /// Seed for a reproducible signal.
    #[arg(long)]
    seed: Option<u64>,
}

/// The served document — field names match the dashboard's poll contract.
#[derive(Debug, Clone, Serialize)]
struct Reading {
    timestamp: String,
    rpm: f64,
    temperature: f64,
    current: f64,
}

/// Random-walk signal state for the three channels.
struct Signals {
    rng: StdRng,
    rpm: f64,
    temperature: f64,
    current: f64,
}

impl Signals {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            rpm: 1_500.0,
            temperature: 45.0,
            current: 3.0,
        }
    }

    /// Advance every channel one step and snapshot a reading.
    fn step(&mut self) -> Reading {
        self.rpm = walk(&mut self.rng, self.rpm, 60.0, 800.0, 3_000.0);
        self.temperature = walk(&mut self.rng, self.temperature, 0.8, 20.0, 90.0);
        self.current = walk(&mut self.rng, self.current, 0.15, 0.0, 10.0);

        Reading {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            rpm: round2(self.rpm),
            temperature: round2(self.temperature),
            current: round2(self.current),
        }
    }
}

/// One bounded random-walk step.
fn walk(rng: &mut StdRng, value: f64, step: f64, lo: f64, hi: f64) -> f64 {
    (value + rng.gen_range(-step..=step)).clamp(lo, hi)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

type Latest = Arc<RwLock<Reading>>;

async fn reading_handler(State(latest): State<Latest>) -> Json<Reading> {
    Json(latest.read().await.clone())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut signals = Signals::new(args.seed);
    let latest: Latest = Arc::new(RwLock::new(signals.step()));

    {
        let latest = Arc::clone(&latest);
        let interval = Duration::from_millis(args.interval_ms.max(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                *latest.write().await = signals.step();
            }
        });
    }

    let app = Router::new()
        .route("/sensor_data.json", get(reading_handler))
        .with_state(latest);

    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    info!("Serving synthetic sensor data on http://{}", args.addr);
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut value = 0.0;
        for _ in 0..1_000 {
            value = walk(&mut rng, value, 0.5, 0.0, 10.0);
            assert!((0.0..=10.0).contains(&value));
        }
    }

    #[test]
    fn seeded_signals_are_reproducible() {
        let a = Signals::new(Some(42)).step();
        let b = Signals::new(Some(42)).step();
        assert_eq!(a.rpm, b.rpm);
        assert_eq!(a.current, b.current);
    }

    #[test]
    fn readings_are_rounded_to_cents() {
        assert_eq!(round2(1.005001), 1.01);
        assert_eq!(round2(3.0), 3.0);
    }
}
