//! [`CardSearch`] backed by the public Scryfall REST API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::error::{LookupError, LookupResult};
use super::{Candidate, CardSearch, ColorIdentity, ImageUris, LookupFuture};
use crate::config::SearchConfig;

/// Filter appended to every query so only commander-eligible cards match
const COMMANDER_FILTER: &str = "type:legendary type:creature";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct ScryfallClient {
    client: Client,
    base_url: Arc<str>,
}

impl ScryfallClient {
    pub fn new(config: &SearchConfig) -> LookupResult<Self> {
        Self::with_base_url(&config.api_base, Duration::from_secs(config.timeout_secs))
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> LookupResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|source| LookupError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::<str>::from(base_url.trim_end_matches('/')),
        })
    }

    /// Search legendary creatures matching `query`, sorted by name.
    ///
    /// Scryfall reports "no matches" as a 404 carrying a `not_found` error
    /// object; that case is an empty result, not a failure.
    pub async fn search_commanders(&self, query: &str) -> LookupResult<Vec<Candidate>> {
        let url = format!("{}/cards/search", self.base_url);
        let expression = search_expression(query);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(&[
                ("q", expression.as_str()),
                ("order", "name"),
                ("unique", "cards"),
            ])
            .send()
            .await
            .map_err(|source| LookupError::RequestSend {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            let body = response
                .json::<ErrorObject>()
                .await
                .map_err(|source| LookupError::Decode {
                    url: url.clone(),
                    source,
                })?;
            return if body.code == "not_found" {
                tracing::debug!("Scryfall found no cards for '{}'", query);
                Ok(Vec::new())
            } else {
                Err(LookupError::Status { url, status })
            };
        }
        if !status.is_success() {
            return Err(LookupError::Status { url, status });
        }

        let page = response
            .json::<SearchPage>()
            .await
            .map_err(|source| LookupError::Decode {
                url: url.clone(),
                source,
            })?;

        tracing::debug!("Scryfall returned {} cards for '{}'", page.data.len(), query);
        Ok(page.data.into_iter().map(Candidate::from).collect())
    }

    /// Download an image referenced by a card record.
    pub async fn image_bytes(&self, url: &str) -> LookupResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| LookupError::RequestSend {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                url: url.to_string(),
                status,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| LookupError::Decode {
                url: url.to_string(),
                source,
            })?;
        Ok(bytes.to_vec())
    }
}

impl CardSearch for ScryfallClient {
    fn search(&self, query: &str) -> LookupFuture<Vec<Candidate>> {
        let client = self.clone();
        let query = query.to_string();
        Box::pin(async move { client.search_commanders(&query).await })
    }

    fn fetch_image(&self, url: &str) -> LookupFuture<Vec<u8>> {
        let client = self.clone();
        let url = url.to_string();
        Box::pin(async move { client.image_bytes(&url).await })
    }
}

/// Full Scryfall search expression for a user query
pub fn search_expression(query: &str) -> String {
    format!("{query} {COMMANDER_FILTER}")
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    data: Vec<CardRecord>,
}

#[derive(Debug, Deserialize)]
struct CardRecord {
    id: String,
    name: String,
    #[serde(default)]
    color_identity: ColorIdentity,
    image_uris: Option<ImageUris>,
    /// Double-faced cards carry their images per face
    #[serde(default)]
    card_faces: Vec<CardFace>,
}

#[derive(Debug, Deserialize)]
struct CardFace {
    image_uris: Option<ImageUris>,
}

#[derive(Debug, Deserialize)]
struct ErrorObject {
    code: String,
}

impl From<CardRecord> for Candidate {
    fn from(record: CardRecord) -> Self {
        let images = record.image_uris.or_else(|| {
            record
                .card_faces
                .into_iter()
                .find_map(|face| face.image_uris)
        });
        Self {
            id: record.id,
            name: record.name,
            color_identity: record.color_identity,
            images,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ColorSymbol;
    use pretty_assertions::assert_eq;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve a single canned HTTP response and hand back the request line.
    async fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            let text = String::from_utf8_lossy(&request).to_string();
            text.lines().next().unwrap_or_default().to_string()
        });
        (format!("http://{addr}"), handle)
    }

    fn client(base: &str) -> ScryfallClient {
        ScryfallClient::with_base_url(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn expression_adds_commander_filter() {
        assert_eq!(
            search_expression("Atra"),
            "Atra type:legendary type:creature"
        );
    }

    #[test]
    fn double_faced_cards_fall_back_to_face_images() {
        let record: CardRecord = serde_json::from_str(
            r#"{
                "id": "dfc",
                "name": "Esika, God of the Tree // The Prismatic Bridge",
                "color_identity": ["G", "U"],
                "card_faces": [
                    {"image_uris": {"small": "https://img/small.jpg", "normal": "https://img/normal.jpg"}},
                    {"image_uris": {"small": "https://img/back.jpg", "normal": null}}
                ]
            }"#,
        )
        .unwrap();
        let candidate = Candidate::from(record);
        assert_eq!(candidate.thumbnail_uri(), Some("https://img/small.jpg"));
        assert_eq!(candidate.color_identity.to_string(), "GU");
    }

    #[tokio::test]
    async fn search_sends_filtered_sorted_query() {
        let body = r#"{
            "object": "list",
            "data": [{
                "id": "d0f7b7f4",
                "name": "Atraxa, Grand Unifier",
                "color_identity": ["W", "U", "B", "G"],
                "image_uris": {"small": "https://img/atraxa-small.jpg", "normal": "https://img/atraxa.jpg"}
            }]
        }"#;
        let (base, server) = serve_once("200 OK", body).await;

        let candidates = client(&base).search_commanders("Atra").await.unwrap();
        let request_line = server.await.unwrap();

        assert_eq!(
            request_line,
            "GET /cards/search?q=Atra+type%3Alegendary+type%3Acreature&order=name&unique=cards HTTP/1.1"
        );
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "Atraxa, Grand Unifier");
        assert_eq!(
            candidates[0].color_identity.symbols(),
            &[ColorSymbol::W, ColorSymbol::U, ColorSymbol::B, ColorSymbol::G]
        );
        assert_eq!(
            candidates[0].thumbnail_uri(),
            Some("https://img/atraxa-small.jpg")
        );
    }

    #[tokio::test]
    async fn not_found_is_an_empty_result() {
        let body = r#"{"object":"error","code":"not_found","status":404,"details":"Your query didn't match any cards."}"#;
        let (base, server) = serve_once("404 Not Found", body).await;

        let candidates = client(&base).search_commanders("zzzzz").await.unwrap();
        server.await.unwrap();

        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn server_error_is_a_status_failure() {
        let body = r#"{"object":"error","code":"internal","status":500}"#;
        let (base, server) = serve_once("500 Internal Server Error", body).await;

        let err = client(&base).search_commanders("Atra").await.unwrap_err();
        server.await.unwrap();

        match err {
            LookupError::Status { status, .. } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR)
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_payload_is_a_decode_failure() {
        let (base, server) = serve_once("200 OK", "{not json").await;

        let err = client(&base).search_commanders("Atra").await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, LookupError::Decode { .. }));
    }
}
