use super::*;

/// Ranks the current best stories by score.
///
/// The cache and gate are shared with every other request in the process, so
/// the gate bounds in-flight item fetches system-wide rather than per call.
pub(crate) struct Aggregator<U> {
  cache: Arc<Cache<Cached>>,
  gate: Arc<Semaphore>,
  upstream: U,
}

impl<U: Upstream> Aggregator<U> {
  const ID_LIST_KEY: &str = "ids";

  const ID_LIST_TTL: Duration = Duration::from_secs(60);

  const ITEM_TTL: Duration = Duration::from_secs(600);

  const MAX_STORIES: usize = 500;

  /// Returns up to `n` stories ordered by descending score.
  ///
  /// Either every selected item resolves to a story or the whole call fails;
  /// a partial list could be missing the real top entries. Equal scores keep
  /// their upstream id order.
  #[instrument(skip(self, cancel))]
  pub(crate) async fn best_stories(
    &self,
    n: i64,
    cancel: &CancellationToken,
  ) -> Result<Vec<Story>> {
    let count = match usize::try_from(n) {
      Ok(0) | Err(_) => return Ok(Vec::new()),
      Ok(count) => count.min(Self::MAX_STORIES),
    };

    let ids = self.story_ids(cancel).await?;

    let results =
      join_all(ids.iter().take(count).map(|&id| self.story(id, cancel))).await;

    let mut stories = Vec::with_capacity(results.len());

    for story in results {
      stories.push(story.map_err(Error::aggregation)?);
    }

    stories.sort_by(|a, b| b.score.cmp(&a.score));

    debug!(count = stories.len(), "ranked best stories");

    Ok(stories)
  }

  pub(crate) fn new(
    upstream: U,
    cache: Arc<Cache<Cached>>,
    gate: Arc<Semaphore>,
  ) -> Self {
    Self {
      cache,
      gate,
      upstream,
    }
  }

  async fn story(&self, id: u64, cancel: &CancellationToken) -> Result<Story> {
    self
      .cache
      .get_or_create(&format!("item:{id}"), Self::ITEM_TTL, move || async move {
        let item = {
          let _permit = cancel
            .run_until_cancelled(self.gate.acquire())
            .await
            .ok_or(Error::Cancelled)?
            // The gate is never closed while the server runs.
            .map_err(|_| Error::Cancelled)?;

          cancel
            .run_until_cancelled(self.upstream.fetch_item(id))
            .await
            .ok_or(Error::Cancelled)??
        };

        item
          .ok_or(Error::InvalidStoryType { id, kind: None })
          .and_then(Story::try_from)
      })
      .await
  }

  async fn story_ids(&self, cancel: &CancellationToken) -> Result<Arc<[u64]>> {
    self
      .cache
      .get_or_create(Self::ID_LIST_KEY, Self::ID_LIST_TTL, move || async move {
        let ids = cancel
          .run_until_cancelled(self.upstream.fetch_ids())
          .await
          .ok_or(Error::Cancelled)??;

        Ok::<_, Error>(Arc::<[u64]>::from(ids))
      })
      .await
  }

  #[cfg(test)]
  pub(crate) fn upstream(&self) -> &U {
    &self.upstream
  }
}
