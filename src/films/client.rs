use std::future::Future;
use std::time::Duration;

use tracing::{debug, info};

use super::error::FetchError;
use super::model::{FilmsPage, Movie};

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can GET the films listing.
pub trait Transport: Send + Sync + 'static {
    fn endpoint(&self) -> &str;

    fn get(&self) -> impl Future<Output = Result<RawResponse, FetchError>> + Send;
}

/// reqwest-backed transport for a fixed endpoint URL.
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url: url.into(),
        })
    }
}

impl Transport for HttpTransport {
    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn get(&self) -> Result<RawResponse, FetchError> {
        debug!(url = %self.url, "sending films request");
        let response = self.client.get(&self.url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        debug!(status, bytes = body.len(), "films response received");
        Ok(RawResponse { status, body })
    }
}

/// GET the listing, check the status, parse and validate every record.
pub async fn fetch_movies<T: Transport>(transport: &T) -> Result<Vec<Movie>, FetchError> {
    let response = transport.get().await?;
    if !response.is_success() {
        return Err(FetchError::RequestFailed);
    }

    let page: FilmsPage = serde_json::from_slice(&response.body)?;
    let movies = page.into_movies()?;
    info!(count = movies.len(), "films transformed");
    Ok(movies)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Replays the same canned response on every call.
    pub struct StaticTransport {
        pub status: u16,
        pub body: String,
    }

    impl StaticTransport {
        pub fn ok(body: &str) -> Self {
            Self {
                status: 200,
                body: body.to_string(),
            }
        }

        pub fn status(status: u16) -> Self {
            Self {
                status,
                body: r#"{"detail": "Not found"}"#.to_string(),
            }
        }
    }

    impl Transport for StaticTransport {
        fn endpoint(&self) -> &str {
            "http://films.test/api/films/"
        }

        async fn get(&self) -> Result<RawResponse, FetchError> {
            Ok(RawResponse {
                status: self.status,
                body: self.body.clone().into_bytes(),
            })
        }
    }

    pub const TWO_FILMS: &str = r#"{
        "count": 2,
        "results": [
            {"episode_id": 4, "title": "A New Hope", "opening_crawl": "It is a period...", "release_date": "1977-05-25"},
            {"episode_id": 5, "title": "The Empire Strikes Back", "opening_crawl": "It is a dark time...", "release_date": "1980-05-17"}
        ]
    }"#;
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::films::error::REQUEST_FAILED_MESSAGE;

    #[test]
    fn test_success_range() {
        let ok = |status| RawResponse { status, body: Vec::new() }.is_success();
        assert!(ok(200));
        assert!(ok(204));
        assert!(!ok(199));
        assert!(!ok(301));
        assert!(!ok(404));
        assert!(!ok(500));
    }

    #[tokio::test]
    async fn test_fetch_transforms_results_in_order() {
        let movies = fetch_movies(&StaticTransport::ok(TWO_FILMS)).await.unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title, "A New Hope");
        assert_eq!(movies[1].id, 5);
        assert_eq!(movies[1].release_date, "1980-05-17");
    }

    #[tokio::test]
    async fn test_failing_status_ignores_body() {
        // Even a perfectly valid body is not looked at.
        let transport = StaticTransport {
            status: 404,
            body: TWO_FILMS.to_string(),
        };
        let err = fetch_movies(&transport).await.unwrap_err();
        assert!(matches!(err, FetchError::RequestFailed));
        assert_eq!(err.user_message(), REQUEST_FAILED_MESSAGE);

        let err = fetch_movies(&StaticTransport::status(500)).await.unwrap_err();
        assert_eq!(err.user_message(), REQUEST_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_unparseable_body_surfaces_parser_message() {
        let body = "<!doctype html><p>maintenance</p>";
        let expected = serde_json::from_str::<FilmsPage>(body).unwrap_err().to_string();

        let err = fetch_movies(&StaticTransport::ok(body)).await.unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(_)));
        assert_eq!(err.user_message(), expected);
    }

    #[tokio::test]
    async fn test_empty_results_is_success() {
        let movies = fetch_movies(&StaticTransport::ok(r#"{"count": 0, "results": []}"#))
            .await
            .unwrap();
        assert!(movies.is_empty());
    }

    #[test]
    fn test_http_transport_keeps_endpoint() {
        let transport =
            HttpTransport::new("https://swapi.dev/api/films/", Some(Duration::from_secs(5)))
                .unwrap();
        assert_eq!(transport.endpoint(), "https://swapi.dev/api/films/");
    }
}
