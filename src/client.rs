use super::*;

#[derive(Clone, Debug)]
pub(crate) struct Client {
  base_url: String,
  client: reqwest::Client,
}

impl Client {
  pub(crate) const API_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";

  async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
    let url = format!("{}/{path}", self.base_url);

    debug!(%url, "requesting upstream");

    let body = self
      .client
      .get(&url)
      .send()
      .await?
      .error_for_status()?
      .bytes()
      .await?;

    if body.iter().all(u8::is_ascii_whitespace) {
      return Ok(None);
    }

    Ok(serde_json::from_slice::<Option<T>>(&body)?)
  }

  pub(crate) fn new(base_url: &str, timeout: Duration) -> Result<Self> {
    let mut headers = HeaderMap::new();

    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let client = reqwest::Client::builder()
      .default_headers(headers)
      .timeout(timeout)
      .build()?;

    Ok(Self {
      base_url: base_url.trim_end_matches('/').to_string(),
      client,
    })
  }
}

#[async_trait]
impl Upstream for Client {
  async fn fetch_ids(&self) -> Result<Vec<u64>> {
    Ok(
      self
        .get::<Vec<u64>>("beststories.json")
        .await?
        .unwrap_or_default(),
    )
  }

  async fn fetch_item(&self, id: u64) -> Result<Option<Item>> {
    self.get(&format!("item/{id}.json")).await
  }
}
