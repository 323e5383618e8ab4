use super::*;

struct Entry<V> {
  expires_at: Instant,
  value: V,
}

impl<V> Entry<V> {
  fn is_live(&self, now: Instant) -> bool {
    now < self.expires_at
  }
}

/// In-memory key/value store where every entry carries an absolute
/// expiration. Lives as long as the process and is shared by all requests.
pub(crate) struct Cache<V> {
  entries: DashMap<String, Entry<V>>,
}

impl<V> Default for Cache<V> {
  fn default() -> Self {
    Self {
      entries: DashMap::new(),
    }
  }
}

impl<V: Clone> Cache<V> {
  fn get<T>(&self, key: &str) -> Option<T>
  where
    T: TryFrom<V>,
  {
    let now = Instant::now();

    if let Some(entry) = self.entries.get(key)
      && entry.is_live(now)
    {
      return T::try_from(entry.value.clone()).ok();
    }

    self.entries.remove_if(key, |_, entry| !entry.is_live(now));

    None
  }

  /// Returns the live value under `key`, or runs `producer` and stores its
  /// result for `ttl`. Failed producers leave the cache untouched.
  ///
  /// Concurrent callers racing on a cold key each run their own producer;
  /// the last one to finish wins the slot.
  pub(crate) async fn get_or_create<T, F, Fut>(
    &self,
    key: &str,
    ttl: Duration,
    producer: F,
  ) -> Result<T>
  where
    T: Clone + Into<V> + TryFrom<V>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
  {
    if let Some(value) = self.get(key) {
      debug!(key, "cache hit");
      return Ok(value);
    }

    debug!(key, "cache miss");

    let value = producer().await?;

    self.entries.insert(
      key.to_string(),
      Entry {
        expires_at: Instant::now() + ttl,
        value: value.clone().into(),
      },
    );

    Ok(value)
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub(crate) fn len(&self) -> usize {
    self.entries.len()
  }

  /// Drops every expired entry, returning how many were removed.
  pub(crate) fn purge_expired(&self) -> usize {
    let now = Instant::now();

    let before = self.entries.len();

    self.entries.retain(|_, entry| entry.is_live(now));

    before.saturating_sub(self.entries.len())
  }
}
