use lazy_static::lazy_static;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Response;
use reqwest_tracing::TracingMiddleware;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error as ThisError;

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use url::Url;

lazy_static! {
    // No retry middleware: a failed request fails the caller's run and the
    // scheduler decides whether to try again.
    static ref CLIENT: ClientWithMiddleware = ClientBuilder::new(reqwest::Client::new())
        .with(TracingMiddleware::default())
        .build();
}

pub struct HttpClient;

#[derive(ThisError, Debug)]
pub enum HttpClientError {
    #[error("Failed to send request to {url}")]
    RequestError {
        url: Url,
        #[source]
        source: reqwest_middleware::Error,
    },
    #[error("{url} responded with {status} {status_text}")]
    UnexpectedStatus {
        url: Url,
        status: u16,
        status_text: String,
    },
    #[error("Failed to read the response body from {url}")]
    BodyError {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to serialize the request body")]
    SerializationError(#[from] serde_json::Error),
    #[error("httpBuilderError {0}")]
    HTTPBuilderError(String),
}

struct HeadersMapGenerator(HeaderMap);

impl HeadersMapGenerator {
    fn into_inner(self) -> HeaderMap {
        self.0
    }
}

impl TryFrom<HashMap<&'static str, String>> for HeadersMapGenerator {
    type Error = HttpClientError;

    fn try_from(value: HashMap<&'static str, String>) -> Result<Self, Self::Error> {
        let mut header_map = HeaderMap::new();

        for (key, value) in value.into_iter() {
            let value = HeaderValue::from_str(&value)
                .map_err(|err| HttpClientError::HTTPBuilderError(format!("{err} {key}")))?;
            header_map.insert(key, value);
        }
        Ok(Self(header_map))
    }
}

impl HttpClient {
    fn ensure_success(url: &Url, response: Response) -> Result<Response, HttpClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(HttpClientError::UnexpectedStatus {
            url: url.clone(),
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        })
    }

    async fn read_text(url: &Url, response: Response) -> Result<String, HttpClientError> {
        let response = Self::ensure_success(url, response)?;
        response
            .text()
            .await
            .map_err(|source| HttpClientError::BodyError {
                url: url.clone(),
                source,
            })
    }

    /// Performs a single GET and returns the body of a 2xx response.
    #[tracing::instrument(err, level = "debug")]
    pub async fn get_text(url: Url) -> Result<String, HttpClientError> {
        let response = CLIENT
            .get(url.clone())
            .send()
            .await
            .map_err(|source| HttpClientError::RequestError {
                url: url.clone(),
                source,
            })?;
        Self::read_text(&url, response).await
    }

    /// POSTs `body` as JSON and returns the body of a 2xx response.
    #[tracing::instrument(err, skip(headers, body), level = "debug")]
    pub async fn post_json<Body: Serialize>(
        url: Url,
        headers: HashMap<&'static str, String>,
        body: &Body,
    ) -> Result<String, HttpClientError> {
        let generator = HeadersMapGenerator::try_from(headers)?;
        let header_map = generator.into_inner();
        let body = serde_json::to_vec(body)?;
        let response = CLIENT
            .post(url.clone())
            .headers(header_map)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|source| HttpClientError::RequestError {
                url: url.clone(),
                source,
            })?;
        Self::read_text(&url, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::{HttpClient, HttpClientError};
    use httpmock::{Method::GET, Method::POST, MockServer};
    use serde_json::json;
    use std::collections::HashMap;
    use url::Url;

    #[tokio::test]
    async fn test_get_text_returns_the_body_of_a_successful_response() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/outages");
                then.status(200).body("hello");
            })
            .await;

        let url = Url::parse(&server.url("/outages")).unwrap();
        let body = HttpClient::get_text(url).await.expect("Expected a body");

        assert_eq!(body, "hello");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_text_reports_status_of_a_failed_response() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/outages");
                then.status(503);
            })
            .await;

        let url = Url::parse(&server.url("/outages")).unwrap();
        let result = HttpClient::get_text(url).await;

        match result {
            Err(HttpClientError::UnexpectedStatus {
                status,
                status_text,
                ..
            }) => {
                assert_eq!(status, 503);
                assert_eq!(status_text, "Service Unavailable");
            }
            other => panic!("Expected an unexpected status error, got {other:?}"),
        }
        // a single attempt, no retries
        mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn test_post_json_sends_headers_and_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/submit")
                    .header("Authorization", "Bearer secret")
                    .header("content-type", "application/json")
                    .json_body(json!({ "type": "FeatureCollection", "features": [] }));
                then.status(202).body("");
            })
            .await;

        let url = Url::parse(&server.url("/submit")).unwrap();
        let headers = HashMap::from([("Authorization", "Bearer secret".to_string())]);
        let body = json!({ "type": "FeatureCollection", "features": [] });

        let result = HttpClient::post_json(url, headers, &body).await;

        assert!(result.is_ok());
        mock.assert_async().await;
    }
}
