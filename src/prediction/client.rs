//! HTTP client for the prediction service
//!
//! Posts `{"features": [...]}` to the configured endpoint and hands back the
//! JSON verdict untouched.

use super::features::FeatureVector;
use super::traits::{PredictionService, ServiceError};
use super::verdict::Verdict;
use crate::config::ClientConfig;
use async_trait::async_trait;
use serde::Serialize;
use std::error::Error as StdError;

/// Request envelope expected by the service
#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    features: &'a FeatureVector,
}

/// Client for communicating with the prediction service
pub struct HttpPredictionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpPredictionClient {
    /// Create a client from configuration; applies the request timeout
    pub fn new(config: &ClientConfig) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint(),
        })
    }
}

#[async_trait]
impl PredictionService for HttpPredictionClient {
    async fn predict(&self, features: &FeatureVector) -> Result<Verdict, ServiceError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&PredictRequest { features })
            .send()
            .await
            .map_err(|e| ServiceError::Network(error_chain(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {}>", error_chain(&e)));
            return Err(ServiceError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Network(error_chain(&e)))?;
        serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()))
    }

    fn endpoint(&self) -> String {
        self.endpoint.clone()
    }
}

/// Flatten an error and its sources into one line
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::features::build_feature_vector;
    use crate::prediction::features::tests::sample_form;
    use crate::prediction::{FailureKind, SubmissionResult};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned HTTP response and return the request body it received
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        serve_raw(format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        ))
        .await
    }

    /// Write `response` verbatim after reading one request, then close
    async fn serve_raw(response: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });
        (format!("http://{addr}"), handle)
    }

    /// Read headers and a content-length body, returning "<request line>\n<body>"
    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let length = text[..header_end]
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + length {
                    let request_line = text.lines().next().unwrap_or_default().to_string();
                    let body = text[header_end + 4..header_end + 4 + length].to_string();
                    return format!("{request_line}\n{body}");
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn client_for(base: &str) -> HttpPredictionClient {
        HttpPredictionClient::new(&ClientConfig {
            service_url: Some(base.to_string()),
            timeout_secs: Some(5),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_posts_features_envelope() {
        let (base, server) = serve_once("200 OK", r#"{"prediction": "low_risk"}"#).await;
        let client = client_for(&base);
        let features = build_feature_vector(&sample_form());

        let verdict = client.predict(&features).await.unwrap();
        assert_eq!(verdict.payload(), &json!({"prediction": "low_risk"}));

        let request = server.await.unwrap();
        let (request_line, body) = request.split_once('\n').unwrap();
        assert_eq!(request_line, "POST /api/predict HTTP/1.1");
        let body: Value = serde_json::from_str(body).unwrap();
        assert_eq!(
            body,
            json!({"features": [54.0, "M", "ASY", 130.0, 250.0, 1, "Normal", 150.0, "N", 1.5, "Flat", null]})
        );
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let (base, _server) =
            serve_once("500 Internal Server Error", r#"{"error": "Prediction error"}"#).await;
        let client = client_for(&base);
        let features = build_feature_vector(&sample_form());

        match client.predict(&features).await {
            Err(ServiceError::Server { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, r#"{"error": "Prediction error"}"#);
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bad_request_is_server_error() {
        let (base, _server) = serve_once(
            "400 Bad Request",
            r#"{"error": "Input data contains NaN values"}"#,
        )
        .await;
        let client = client_for(&base);
        let features = build_feature_vector(&sample_form());

        let err = client.predict(&features).await.unwrap_err();
        assert!(matches!(err, ServiceError::Server { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind then drop to get a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(&format!("http://{addr}"));
        let features = build_feature_vector(&sample_form());

        let err = client.predict(&features).await.unwrap_err();
        assert!(matches!(err, ServiceError::Network(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_decode_error() {
        let (base, _server) = serve_once("200 OK", "<html>ok</html>").await;
        let client = client_for(&base);
        let features = build_feature_vector(&sample_form());

        let err = client.predict(&features).await.unwrap_err();
        assert!(matches!(err, ServiceError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unanswered_request_times_out_as_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;
            // Hold the connection open without answering
            tokio::time::sleep(std::time::Duration::from_secs(30)).await;
            drop(socket);
        });

        let client = HttpPredictionClient::new(&ClientConfig {
            service_url: Some(format!("http://{addr}")),
            timeout_secs: Some(1),
            ..Default::default()
        })
        .unwrap();
        let features = build_feature_vector(&sample_form());

        let err = client.predict(&features).await.unwrap_err();
        let ServiceError::Network(detail) = &err else {
            panic!("expected network error, got {err:?}");
        };
        assert!(detail.contains("timed out"), "got {detail}");
        assert_eq!(
            SubmissionResult::from(err).failure_kind(),
            Some(FailureKind::Network)
        );
    }

    #[tokio::test]
    async fn test_truncated_error_body_is_reported() {
        let (base, _server) = serve_raw(
            "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 100\r\n\r\npartial".to_string(),
        )
        .await;
        let client = client_for(&base);
        let features = build_feature_vector(&sample_form());

        match client.predict(&features).await {
            Err(ServiceError::Server { status, body }) => {
                assert_eq!(status, 500);
                assert!(body.starts_with("<unreadable body: "), "got {body}");
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[test]
    fn test_endpoint_from_config() {
        let client = HttpPredictionClient::new(&ClientConfig::default()).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:5000/api/predict");
    }

    #[test]
    fn test_error_chain_skips_repeated_text() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let outer = std::io::Error::new(std::io::ErrorKind::Other, inner);
        // io::Error displays its inner error, so the source adds nothing new
        assert_eq!(error_chain(&outer), "refused");
    }
}
