// REST collection client
//
// One `ResourceClient` per remote collection (`{base}/books`,
// `{base}/authors`). Speaks plain JSON over the standard verbs; the
// response body is the resource itself, no envelope.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Longest slice of an error body echoed into error messages.
const BODY_PREVIEW_LEN: usize = 200;

/// Async client for a single REST collection resource.
///
/// Every method maps to exactly one HTTP request. There is no retry and
/// no idempotency key: issuing [`create`](Self::create) twice creates two
/// items.
#[derive(Debug, Clone)]
pub struct ResourceClient {
    http: reqwest::Client,
    collection_url: Url,
    resource: String,
}

impl ResourceClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `{base_url}/{resource}` from a transport config.
    pub fn new(base_url: &Url, resource: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, base_url, resource)
    }

    /// Wrap an existing `reqwest::Client`.
    ///
    /// Use this to share one connection pool between several collections.
    pub fn with_client(
        http: reqwest::Client,
        base_url: &Url,
        resource: &str,
    ) -> Result<Self, Error> {
        let mut collection_url = base_url.clone();
        collection_url
            .path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(resource.split('/').filter(|s| !s.is_empty()));

        Ok(Self {
            http,
            collection_url,
            resource: resource.trim_matches('/').to_owned(),
        })
    }

    /// The collection name this client talks to (e.g. `"books"`).
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// The absolute collection URL (e.g. `http://localhost:3000/books`).
    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    /// Build `{collection}/{id}`, percent-encoding the identifier.
    pub fn item_url(&self, id: &str) -> Url {
        let mut url = self.collection_url.clone();
        // `with_client` rejected cannot-be-a-base URLs, so segments exist.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        url
    }

    // ── Collection operations ────────────────────────────────────────

    /// `GET {collection}` -- the whole collection in server order.
    pub async fn list<T: DeserializeOwned>(&self) -> Result<Vec<T>, Error> {
        let url = self.collection_url.clone();
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    /// `GET {collection}/{id}`.
    pub async fn get<T: DeserializeOwned>(&self, id: &str) -> Result<T, Error> {
        let url = self.item_url(id);
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    /// `POST {collection}` -- returns the item as stored by the server.
    pub async fn create<T, B>(&self, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let url = self.collection_url.clone();
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    /// `PUT {collection}/{id}` -- full replacement, returns the stored item.
    pub async fn replace<T, B>(&self, id: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let url = self.item_url(id);
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    /// `DELETE {collection}/{id}`. The response body is ignored.
    pub async fn remove(&self, id: &str) -> Result<(), Error> {
        let url = self.item_url(id);
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        Self::handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::status_error(status, resp).await);
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::status_error(status, resp).await)
        }
    }

    async fn status_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let trimmed = raw.trim();

        // json-server answers unknown ids with a bare `{}`.
        let message = if trimmed.is_empty() || trimmed == "{}" {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_owned()
        } else {
            preview(trimmed).to_owned()
        };

        Error::Http {
            status: status.as_u16(),
            message,
        }
    }
}

/// Truncate to at most [`BODY_PREVIEW_LEN`] bytes on a char boundary.
fn preview(body: &str) -> &str {
    if body.len() <= BODY_PREVIEW_LEN {
        return body;
    }
    let mut end = BODY_PREVIEW_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
