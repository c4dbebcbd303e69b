use crate::application::dispatch::ResponseDispatcher;
use crate::domain::entities::{Outcome, Request, Response};
use crate::domain::errors::RunnerError;
use crate::domain::value_objects::Url;
use anyhow::Result;
use async_trait::async_trait;

/// Trait for HTTP clients to enable mocking and dependency inversion
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response>;
}

/// Application service for orchestrating the request workflow
pub struct HttpRequestService {
    http_client: Box<dyn HttpClient>,
}

impl HttpRequestService {
    pub fn new(http_client: Box<dyn HttpClient>) -> Self {
        Self { http_client }
    }

    /// Sends the request once, without retries
    pub async fn send_request(&self, request: Request) -> Result<Response> {
        self.validate_request(&request)?;
        tracing::debug!(url = %request.url.as_str(), headers = request.headers.len(), "sending POST");
        let response = self.http_client.send(request).await?;
        tracing::debug!(status = %response.status, bytes = response.body.len(), "response received");
        Ok(response)
    }

    /// Sends the request and decides what the response turns into
    pub async fn execute(&self, request: Request) -> Result<Outcome> {
        let response = self.send_request(request).await?;
        Ok(ResponseDispatcher::dispatch(response))
    }

    fn validate_request(&self, request: &Request) -> Result<()> {
        RequestValidator::validate(request)
    }
}

/// Domain service for request validation
pub struct RequestValidator;

impl RequestValidator {
    pub fn validate(request: &Request) -> Result<()> {
        Self::validate_url(&request.url)?;
        Ok(())
    }

    fn validate_url(url: &Url) -> Result<(), RunnerError> {
        let url_str = url.as_str();

        match url.0.scheme_str() {
            Some("http") | Some("https") => {}
            Some(_) => return Err(RunnerError::UnsupportedScheme(url_str)),
            None => {
                return Err(RunnerError::InvalidUrl(format!(
                    "{}: URL must start with http:// or https://",
                    url_str
                )));
            }
        }
        if url.0.host().is_none_or(str::is_empty) {
            return Err(RunnerError::InvalidUrl(format!("{}: missing host", url_str)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{HeaderSet, Payload};
    use hyper::StatusCode;
    use hyper::body::Bytes;
    use serde_json::json;

    fn request(url: &str) -> Request {
        Request {
            url: Url::new(url).unwrap(),
            headers: HeaderSet::new(),
            payload: Payload(json!({"query": "ping"})),
        }
    }

    fn response(status: StatusCode, content_type: &str, body: &'static str) -> Response {
        Response {
            status,
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers: vec![("content-type".to_string(), content_type.to_string())],
            body: Bytes::from_static(body.as_bytes()),
        }
    }

    #[tokio::test]
    async fn https_request_reaches_client() {
        let mut client = MockHttpClient::new();
        client
            .expect_send()
            .withf(|req| req.url.0.scheme_str() == Some("https"))
            .times(1)
            .returning(|_| Ok(response(StatusCode::OK, "text/plain", "secure")));
        let service = HttpRequestService::new(Box::new(client));

        let outcome = service
            .execute(request("https://example.com/api"))
            .await
            .unwrap();
        assert!(matches!(outcome, Outcome::Text(ref text) if text == "secure"));
    }

    #[tokio::test]
    async fn rejects_other_schemes_without_sending() {
        let mut client = MockHttpClient::new();
        client.expect_send().never();
        let service = HttpRequestService::new(Box::new(client));

        let err = service
            .send_request(request("ftp://example.com/api"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RunnerError>(),
            Some(RunnerError::UnsupportedScheme(_))
        ));
    }

    #[tokio::test]
    async fn rejects_relative_url() {
        let mut client = MockHttpClient::new();
        client.expect_send().never();
        let service = HttpRequestService::new(Box::new(client));

        let result = service.send_request(request("/api/only-a-path")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn forwards_request_to_client_once() {
        let mut client = MockHttpClient::new();
        client
            .expect_send()
            .withf(|req| {
                req.payload.0 == json!({"query": "ping"})
                    && req.headers.get("content-type") == Some("application/json")
            })
            .times(1)
            .returning(|_| Ok(response(StatusCode::OK, "application/json", r#"{"b":1,"a":2}"#)));
        let service = HttpRequestService::new(Box::new(client));

        let outcome = service
            .execute(request("http://localhost:8080/api"))
            .await
            .unwrap();
        match outcome {
            Outcome::Text(text) => assert_eq!(text, "{\n    \"a\": 2,\n    \"b\": 1\n}"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_success_becomes_failure() {
        let mut client = MockHttpClient::new();
        client
            .expect_send()
            .times(1)
            .returning(|_| Ok(response(StatusCode::NOT_FOUND, "text/plain", "missing")));
        let service = HttpRequestService::new(Box::new(client));

        let outcome = service
            .execute(request("http://localhost:8080/api"))
            .await
            .unwrap();
        match outcome {
            Outcome::Failure(failure) => assert_eq!(failure.to_string(), "Error 404: Not Found"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn transport_errors_propagate() {
        let mut client = MockHttpClient::new();
        client
            .expect_send()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("connection refused")));
        let service = HttpRequestService::new(Box::new(client));

        let err = service
            .execute(request("http://localhost:1/api"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}
