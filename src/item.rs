use super::*;

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Item {
  #[serde(default, deserialize_with = "text")]
  pub(crate) by: Option<String>,
  pub(crate) descendants: Option<u64>,
  pub(crate) id: u64,
  #[serde(default)]
  pub(crate) score: u64,
  #[serde(default)]
  pub(crate) time: i64,
  #[serde(default, deserialize_with = "text")]
  pub(crate) title: Option<String>,
  #[serde(default, deserialize_with = "text")]
  pub(crate) r#type: Option<String>,
  #[serde(default, deserialize_with = "text")]
  pub(crate) url: Option<String>,
}

/// Upstream text fields are occasionally numeric; keep them as text rather
/// than failing the whole item.
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let unexpected = match Option::<Value>::deserialize(deserializer)? {
    None | Some(Value::Null) => return Ok(None),
    Some(Value::String(text)) => return Ok(Some(text)),
    Some(Value::Number(number)) => return Ok(Some(number.to_string())),
    Some(Value::Bool(flag)) => Unexpected::Bool(flag),
    Some(Value::Array(_)) => Unexpected::Seq,
    Some(Value::Object(_)) => Unexpected::Map,
  };

  Err(de::Error::invalid_type(unexpected, &"string or number"))
}

impl Item {
  pub(crate) fn is_story(&self) -> bool {
    self
      .r#type
      .as_deref()
      .is_some_and(|kind| kind.eq_ignore_ascii_case("story"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(json: &str) -> Item {
    serde_json::from_str(json).unwrap()
  }

  #[test]
  fn parses_full_story() {
    let item = parse(
      r#"{
        "by": "dhouston",
        "descendants": 71,
        "id": 8863,
        "kids": [8952, 9224],
        "score": 111,
        "time": 1175714200,
        "title": "My YC app: Dropbox - Throw away your USB drive",
        "type": "story",
        "url": "http://www.getdropbox.com/u/2/screencast.html"
      }"#,
    );

    assert_eq!(item.id, 8863);
    assert_eq!(item.by.as_deref(), Some("dhouston"));
    assert_eq!(item.descendants, Some(71));
    assert_eq!(item.score, 111);
    assert_eq!(item.time, 1_175_714_200);
    assert!(item.is_story());
  }

  #[test]
  fn missing_optional_fields_default() {
    let item = parse(r#"{"id": 1, "type": "story"}"#);

    assert_eq!(item.by, None);
    assert_eq!(item.descendants, None);
    assert_eq!(item.score, 0);
    assert_eq!(item.time, 0);
    assert_eq!(item.title, None);
    assert_eq!(item.url, None);
  }

  #[test]
  fn numeric_text_fields_are_stringified() {
    let item = parse(r#"{"id": 1, "title": 1984, "by": null}"#);

    assert_eq!(item.title.as_deref(), Some("1984"));
    assert_eq!(item.by, None);
  }

  #[test]
  fn structured_text_fields_are_rejected() {
    for json in [
      r#"{"id": 1, "title": true}"#,
      r#"{"id": 1, "url": ["a"]}"#,
      r#"{"id": 1, "type": {"kind": "story"}}"#,
    ] {
      assert!(serde_json::from_str::<Item>(json).is_err(), "{json}");
    }
  }

  #[test]
  fn type_check_ignores_case() {
    assert!(parse(r#"{"id": 1, "type": "Story"}"#).is_story());
    assert!(parse(r#"{"id": 1, "type": "STORY"}"#).is_story());
    assert!(!parse(r#"{"id": 1, "type": "comment"}"#).is_story());
    assert!(!parse(r#"{"id": 1, "type": null}"#).is_story());
    assert!(!parse(r#"{"id": 1}"#).is_story());
  }
}
