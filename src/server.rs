use super::*;

const DEFAULT_COUNT: i64 = 10;

#[derive(Debug, Deserialize)]
struct BestStoriesQuery {
  #[serde(default = "default_count")]
  n: i64,
}

fn default_count() -> i64 {
  DEFAULT_COUNT
}

async fn best_stories<U: Upstream>(
  State(aggregator): State<Arc<Aggregator<U>>>,
  Query(query): Query<BestStoriesQuery>,
) -> Result<Json<Vec<Story>>> {
  let cancel = CancellationToken::new();

  // Dropping the handler when the client disconnects cancels in-flight fetches.
  let _guard = cancel.clone().drop_guard();

  Ok(Json(aggregator.best_stories(query.n, &cancel).await?))
}

pub(crate) fn router<U: Upstream + 'static>(
  aggregator: Arc<Aggregator<U>>,
) -> Router {
  Router::new()
    .route("/api/v1/beststories", get(best_stories::<U>))
    .with_state(aggregator)
}
