use super::*;

/// The two reads the aggregator needs from Hacker News.
#[async_trait]
pub(crate) trait Upstream: Send + Sync {
  /// Current best story ids in upstream order. An empty or `null` body is an
  /// empty list.
  async fn fetch_ids(&self) -> Result<Vec<u64>>;

  /// A single item, or `None` when upstream answers `null`.
  async fn fetch_item(&self, id: u64) -> Result<Option<Item>>;
}
