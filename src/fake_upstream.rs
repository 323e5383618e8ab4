use {
  super::*,
  serde_json::json,
  std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
  },
};

#[derive(Clone)]
enum Reply {
  Error(fn() -> Error),
  Item(Item),
  Missing,
}

/// In-process stand-in for Hacker News that counts calls and records the
/// peak number of concurrent item fetches.
pub(crate) struct FakeUpstream {
  delay: Duration,
  id_calls: AtomicUsize,
  ids: Result<Vec<u64>, fn() -> Error>,
  in_flight: AtomicUsize,
  item_calls: AtomicUsize,
  items: HashMap<u64, Reply>,
  max_in_flight: AtomicUsize,
}

impl FakeUpstream {
  pub(crate) fn failing(error: fn() -> Error) -> Self {
    Self {
      ids: Err(error),
      ..Self::new([])
    }
  }

  pub(crate) fn id_calls(&self) -> usize {
    self.id_calls.load(Ordering::SeqCst)
  }

  pub(crate) fn item_calls(&self) -> usize {
    self.item_calls.load(Ordering::SeqCst)
  }

  pub(crate) fn max_in_flight(&self) -> usize {
    self.max_in_flight.load(Ordering::SeqCst)
  }

  pub(crate) fn new(ids: impl IntoIterator<Item = u64>) -> Self {
    Self {
      delay: Duration::ZERO,
      id_calls: AtomicUsize::new(0),
      ids: Ok(ids.into_iter().collect()),
      in_flight: AtomicUsize::new(0),
      item_calls: AtomicUsize::new(0),
      items: HashMap::new(),
      max_in_flight: AtomicUsize::new(0),
    }
  }

  pub(crate) fn with_delay(self, delay: Duration) -> Self {
    Self { delay, ..self }
  }

  pub(crate) fn with_error(mut self, id: u64, error: fn() -> Error) -> Self {
    self.items.insert(id, Reply::Error(error));
    self
  }

  pub(crate) fn with_kind(mut self, id: u64, kind: &str, score: u64) -> Self {
    let item = serde_json::from_value(json!({
      "by": format!("user{id}"),
      "descendants": id,
      "id": id,
      "score": score,
      "time": 1_700_000_000 + i64::try_from(id).unwrap_or_default(),
      "title": format!("Story {id}"),
      "type": kind,
      "url": format!("https://example.com/{id}"),
    }))
    .unwrap();

    self.items.insert(id, Reply::Item(item));
    self
  }

  pub(crate) fn with_missing(mut self, id: u64) -> Self {
    self.items.insert(id, Reply::Missing);
    self
  }

  pub(crate) fn with_story(self, id: u64, score: u64) -> Self {
    self.with_kind(id, "story", score)
  }
}

#[async_trait]
impl Upstream for FakeUpstream {
  async fn fetch_ids(&self) -> Result<Vec<u64>> {
    self.id_calls.fetch_add(1, Ordering::SeqCst);

    match &self.ids {
      Ok(ids) => Ok(ids.clone()),
      Err(error) => Err(error()),
    }
  }

  async fn fetch_item(&self, id: u64) -> Result<Option<Item>> {
    self.item_calls.fetch_add(1, Ordering::SeqCst);

    let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;

    self.max_in_flight.fetch_max(current, Ordering::SeqCst);

    if !self.delay.is_zero() {
      time::sleep(self.delay).await;
    }

    self.in_flight.fetch_sub(1, Ordering::SeqCst);

    match self.items.get(&id).cloned().unwrap_or(Reply::Missing) {
      Reply::Error(error) => Err(error()),
      Reply::Item(item) => Ok(Some(item)),
      Reply::Missing => Ok(None),
    }
  }
}
