use {
  aggregator::Aggregator,
  anyhow::Context,
  arguments::Arguments,
  async_trait::async_trait,
  axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
  },
  cache::Cache,
  cached::Cached,
  chrono::{DateTime, Utc},
  clap::{Parser, ValueEnum},
  client::Client,
  crossterm::style::Stylize,
  dashmap::DashMap,
  error::Error,
  futures::future::join_all,
  item::Item,
  reqwest::header::{ACCEPT, HeaderMap, HeaderValue},
  serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, DeserializeOwned, Unexpected},
  },
  serde_json::Value,
  std::{
    backtrace::BacktraceStatus,
    io::{self, IsTerminal},
    net::SocketAddr,
    process,
    sync::Arc,
    time::Duration,
  },
  story::Story,
  thiserror::Error,
  tokio::{
    net::TcpListener,
    signal,
    sync::Semaphore,
    time::{self, Instant},
  },
  tokio_util::sync::CancellationToken,
  tracing::{debug, info, instrument, warn},
  tracing_subscriber::EnvFilter,
  upstream::Upstream,
};

mod aggregator;
mod arguments;
mod cache;
mod cached;
mod client;
mod error;
#[cfg(test)]
mod fake_upstream;
mod item;
mod server;
mod story;
mod upstream;

const CACHE_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

type Result<T = (), E = Error> = std::result::Result<T, E>;

async fn run() -> anyhow::Result<()> {
  let arguments = Arguments::parse();

  arguments.init_logging();

  let client = Client::new(&arguments.base_url, arguments.timeout())
    .context("could not build hacker news client")?;

  let cache = Arc::new(Cache::default());

  let gate = Arc::new(Semaphore::new(usize::from(arguments.max_in_flight)));

  let aggregator = Arc::new(Aggregator::new(client, cache.clone(), gate));

  tokio::spawn(sweep_cache(cache));

  let listener = TcpListener::bind(arguments.bind)
    .await
    .with_context(|| format!("could not bind to {}", arguments.bind))?;

  info!(
    address = %listener.local_addr()?,
    upstream = %arguments.base_url,
    max_in_flight = arguments.max_in_flight,
    "serving best stories"
  );

  axum::serve(listener, server::router(aggregator))
    .with_graceful_shutdown(shutdown())
    .await
    .context("server error")?;

  info!("shut down");

  Ok(())
}

async fn shutdown() {
  if let Err(error) = signal::ctrl_c().await {
    warn!(%error, "could not listen for shutdown signal");
    std::future::pending::<()>().await;
  }
}

async fn sweep_cache(cache: Arc<Cache<Cached>>) {
  let mut interval = time::interval(CACHE_SWEEP_INTERVAL);

  loop {
    interval.tick().await;

    let purged = cache.purge_expired();

    debug!(purged, remaining = cache.len(), "swept cache");
  }
}

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
