use super::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub(crate) enum LogFormat {
  Json,
  #[default]
  Pretty,
}

/// Serve the highest scoring Hacker News best stories.
#[derive(Debug, Parser)]
#[command(version, about)]
pub(crate) struct Arguments {
  #[arg(long, env = "HN_BASE_URL", default_value = Client::API_BASE_URL)]
  pub(crate) base_url: String,
  #[arg(long, env = "BEST_STORIES_BIND", default_value = "127.0.0.1:8080")]
  pub(crate) bind: SocketAddr,
  #[arg(
    long,
    env = "LOG_FORMAT",
    value_enum,
    default_value_t = LogFormat::Pretty
  )]
  pub(crate) log_format: LogFormat,
  #[arg(long, env = "LOG_LEVEL", default_value = "info")]
  pub(crate) log_level: String,
  /// Upper bound on concurrent item requests to Hacker News, shared by all
  /// clients.
  #[arg(
    long,
    env = "HN_MAX_IN_FLIGHT",
    default_value_t = 16,
    value_parser = clap::value_parser!(u16).range(1..)
  )]
  pub(crate) max_in_flight: u16,
  #[arg(long, env = "HN_TIMEOUT_SECS", default_value_t = 5)]
  pub(crate) timeout_secs: u64,
}

impl Arguments {
  /// `RUST_LOG` takes precedence over `--log-level` when set.
  pub(crate) fn init_logging(&self) {
    let filter = EnvFilter::try_from_default_env()
      .unwrap_or_else(|_| EnvFilter::new(&self.log_level));

    match self.log_format {
      LogFormat::Json => tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .init(),
      LogFormat::Pretty => {
        tracing_subscriber::fmt().with_env_filter(filter).init();
      }
    }
  }

  pub(crate) fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }
}
