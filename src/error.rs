use super::*;

#[derive(Debug, Error)]
pub(crate) enum Error {
  #[error("failed to aggregate best stories")]
  AggregationFailed {
    #[source]
    source: Box<Error>,
  },
  #[error("request was cancelled")]
  Cancelled,
  #[error("failed to decode upstream response: {reason}")]
  Decode { reason: String },
  #[error("item {id} is not a story (type={kind:?})")]
  InvalidStoryType { id: u64, kind: Option<String> },
  #[error("item {id} has an out of range timestamp {time}")]
  InvalidTimestamp { id: u64, time: i64 },
  #[error("upstream request timed out")]
  UpstreamTimeout,
  #[error("upstream unavailable: {reason}")]
  UpstreamUnavailable { reason: String },
}

impl Error {
  /// Wraps a failed item fetch. Cancellation is passed through untouched so
  /// callers can tell it apart from a bad item.
  pub(crate) fn aggregation(error: Self) -> Self {
    match error {
      Self::Cancelled => Self::Cancelled,
      error => Self::AggregationFailed {
        source: Box::new(error),
      },
    }
  }

  pub(crate) fn status(&self) -> StatusCode {
    match self {
      Self::AggregationFailed { source } => source.status(),
      Self::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
      Self::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
      Self::Cancelled
      | Self::Decode { .. }
      | Self::InvalidStoryType { .. }
      | Self::InvalidTimestamp { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<reqwest::Error> for Error {
  fn from(error: reqwest::Error) -> Self {
    if error.is_timeout() {
      Self::UpstreamTimeout
    } else if error.is_decode() {
      Self::Decode {
        reason: error.to_string(),
      }
    } else {
      Self::UpstreamUnavailable {
        reason: error.to_string(),
      }
    }
  }
}

impl From<serde_json::Error> for Error {
  fn from(error: serde_json::Error) -> Self {
    Self::Decode {
      reason: error.to_string(),
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = self.status();

    let cause = std::error::Error::source(&self).map(ToString::to_string);

    warn!(error = %self, ?cause, %status, "request failed");

    let body = match status {
      StatusCode::BAD_GATEWAY => "Failed to fetch data from Hacker News",
      StatusCode::GATEWAY_TIMEOUT => "Hacker News request timed out",
      _ => "Internal server error",
    };

    (status, body).into_response()
  }
}
