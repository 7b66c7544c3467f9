use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;
use tracing::{Level, event, instrument};

/// Non-success response from an upstream API
#[derive(Debug, Clone)]
pub struct HttpError {
    pub status: StatusCode,
    pub body: String,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Request failed with status {}: {}", self.status, self.body)
    }
}

impl std::error::Error for HttpError {}

#[derive(Clone)]
pub struct Client {
    client: reqwest::Client,
}

impl Client {
    pub fn with_headers(headers: HeaderMap) -> anyhow::Result<Self> {
        Ok(Client {
            client: reqwest::Client::builder().default_headers(headers).build()?,
        })
    }

    async fn check_status(response: reqwest::Response) -> anyhow::Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        Err(HttpError { status, body }.into())
    }

    #[instrument(level = "trace", skip(self))]
    pub async fn get<U, T>(&self, url: U) -> anyhow::Result<T>
    where
        U: reqwest::IntoUrl + std::fmt::Debug,
        T: DeserializeOwned,
    {
        let response = Self::check_status(self.client.get(url).send().await?).await?;
        let text = response.text().await?;
        event!(Level::TRACE, response = text);

        Ok(serde_json::from_str::<T>(&text)?)
    }

    #[instrument(level = "trace", skip(self, request))]
    pub async fn post<U, S, T>(&self, url: U, request: &S) -> anyhow::Result<T>
    where
        U: reqwest::IntoUrl + std::fmt::Debug,
        S: Serialize + Sized,
        T: DeserializeOwned,
    {
        let response = Self::check_status(self.client.post(url).json(request).send().await?).await?;
        let text = response.text().await?;
        event!(Level::TRACE, response = text);

        Ok(serde_json::from_str::<T>(&text)?)
    }

    /// POST a JSON body and return the raw response body, for binary payloads
    #[instrument(level = "trace", skip(self, request))]
    pub async fn post_for_bytes<U, S>(
        &self,
        url: U,
        request: &S,
        accept: &'static str,
    ) -> anyhow::Result<Bytes>
    where
        U: reqwest::IntoUrl + std::fmt::Debug,
        S: Serialize + Sized,
    {
        let response = self
            .client
            .post(url)
            .header(ACCEPT, HeaderValue::from_static(accept))
            .json(request)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        event!(Level::TRACE, response_bytes = bytes.len());

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display_includes_status_and_body() {
        let err = HttpError {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: "slow down".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Request failed with status 429 Too Many Requests: slow down"
        );
    }

    #[test]
    fn test_http_error_survives_anyhow_downcast() {
        let err: anyhow::Error = HttpError {
            status: StatusCode::UNAUTHORIZED,
            body: String::new(),
        }
        .into();
        let http = err.downcast_ref::<HttpError>().unwrap();
        assert_eq!(http.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_client_with_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-test", "value".parse().unwrap());
        assert!(Client::with_headers(headers).is_ok());
    }
}
