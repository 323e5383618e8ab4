use super::*;

/// Values the aggregator keeps in its cache. Only validated data is ever
/// stored, never raw upstream items.
#[derive(Clone, Debug)]
pub(crate) enum Cached {
  Ids(Arc<[u64]>),
  Story(Story),
}

impl From<Arc<[u64]>> for Cached {
  fn from(ids: Arc<[u64]>) -> Self {
    Self::Ids(ids)
  }
}

impl From<Story> for Cached {
  fn from(story: Story) -> Self {
    Self::Story(story)
  }
}

impl TryFrom<Cached> for Arc<[u64]> {
  type Error = Cached;

  fn try_from(cached: Cached) -> Result<Self, Cached> {
    match cached {
      Cached::Ids(ids) => Ok(ids),
      other @ Cached::Story(_) => Err(other),
    }
  }
}

impl TryFrom<Cached> for Story {
  type Error = Cached;

  fn try_from(cached: Cached) -> Result<Self, Cached> {
    match cached {
      Cached::Story(story) => Ok(story),
      other @ Cached::Ids(_) => Err(other),
    }
  }
}
