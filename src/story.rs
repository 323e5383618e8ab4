use super::*;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Story {
  pub(crate) comment_count: u64,
  pub(crate) posted_by: Option<String>,
  pub(crate) score: u64,
  pub(crate) time: DateTime<Utc>,
  pub(crate) title: Option<String>,
  pub(crate) uri: Option<String>,
}

impl TryFrom<Item> for Story {
  type Error = Error;

  fn try_from(item: Item) -> Result<Self> {
    if !item.is_story() {
      return Err(Error::InvalidStoryType {
        id: item.id,
        kind: item.r#type,
      });
    }

    let time =
      DateTime::from_timestamp(item.time, 0).ok_or(Error::InvalidTimestamp {
        id: item.id,
        time: item.time,
      })?;

    Ok(Self {
      comment_count: item.descendants.unwrap_or_default(),
      posted_by: item.by,
      score: item.score,
      time,
      title: item.title,
      uri: item.url,
    })
  }
}
