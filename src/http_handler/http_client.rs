use super::common::{
    CREDENTIAL_HEADER, ConfigError, RequestError, TIMEOUT_MARGIN_MS, TIMEOUT_THRESHOLD_ENV,
};
use super::http_request::HTTPRequestMethod;
use crate::error;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;

/// A thin wrapper around `reqwest::Client` used to issue requests against a
/// preconfigured base URL.
///
/// The client is configured once and then shared: base URL, credential
/// header, timeout and TLS policy are immutable after construction, so any
/// number of calls may run concurrently against the same instance. Timeout
/// enforcement, connection management and status classification live in the
/// underlying transport; this type only supplies the configuration and
/// decodes response bodies.
#[derive(Debug)]
pub struct HTTPClient {
    /// The underlying `reqwest::Client` used to perform HTTP requests.
    client: reqwest::Client,
    /// Base URL for the API, prepended to all endpoint paths.
    base_url: String,
    /// Effective per-request timeout, threshold plus fixed margin.
    timeout: Duration,
}

impl HTTPClient {
    /// Constructs a new `HTTPClient` with the given base URL and optional
    /// credential.
    ///
    /// The effective request timeout is `timeout_threshold_ms` plus a fixed
    /// margin of [`TIMEOUT_MARGIN_MS`], saturating at `u64::MAX`
    /// milliseconds. When a credential is supplied it is
    /// sent under [`CREDENTIAL_HEADER`] on every request.
    ///
    /// TLS server-certificate verification is disabled on the transport:
    /// the upstream endpoints present certificates that do not validate
    /// against a public root.
    ///
    /// # Errors
    /// [`ConfigError::EmptyBaseUrl`] if `base_url` is empty,
    /// [`ConfigError::InvalidCredential`] if the credential is not a valid
    /// header value, [`ConfigError::ClientBuild`] if the transport cannot
    /// be initialized.
    pub fn new(
        base_url: &str,
        credential: Option<&str>,
        timeout_threshold_ms: u64,
    ) -> Result<HTTPClient, ConfigError> {
        if base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        let timeout = Duration::from_millis(timeout_threshold_ms.saturating_add(TIMEOUT_MARGIN_MS));
        let mut default_headers = HeaderMap::new();
        if let Some(cred) = credential {
            let mut value =
                HeaderValue::from_str(cred).map_err(|_| ConfigError::InvalidCredential)?;
            value.set_sensitive(true);
            default_headers.insert(HeaderName::from_static(CREDENTIAL_HEADER), value);
        }
        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(ConfigError::ClientBuild)?;
        Ok(HTTPClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Constructs a new `HTTPClient`, reading the timeout threshold from
    /// [`TIMEOUT_THRESHOLD_ENV`].
    ///
    /// # Errors
    /// [`ConfigError::MissingTimeoutThreshold`] if the variable is unset,
    /// [`ConfigError::NonNumericTimeoutThreshold`] if it does not parse as
    /// milliseconds, plus every failure mode of [`HTTPClient::new`].
    pub fn from_env(base_url: &str, credential: Option<&str>) -> Result<HTTPClient, ConfigError> {
        let raw = std::env::var(TIMEOUT_THRESHOLD_ENV)
            .map_err(|_| ConfigError::MissingTimeoutThreshold)?;
        let threshold = raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::NonNumericTimeoutThreshold(raw))?;
        HTTPClient::new(base_url, credential, threshold)
    }

    /// Returns the base URL that the client was initialized with.
    pub fn url(&self) -> &str { self.base_url.as_str() }

    /// Returns the effective per-request timeout.
    pub fn timeout(&self) -> Duration { self.timeout }

    /// Issues a single request of `method` to `endpoint` and decodes the
    /// response body into `R`.
    ///
    /// `payload` is attached as a JSON body only for POST and PUT; GET
    /// requests never carry a body even when a payload is supplied.
    /// `headers` are merged into this call only, overriding default headers
    /// on collision, and never mutate the client's configuration.
    ///
    /// # Errors
    /// Any transport failure (connect error, timeout expiry, non-success
    /// status, body decode error) is logged once with the endpoint and
    /// payload, then returned with the original transport error preserved.
    /// Single attempt, no retry.
    pub async fn request<R, B>(
        &self,
        method: HTTPRequestMethod,
        endpoint: &str,
        payload: Option<&B>,
        headers: Option<HeaderMap>,
    ) -> Result<R, RequestError>
    where
        R: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        match self.execute(method, endpoint, payload, headers).await {
            Ok(parsed) => Ok(parsed),
            Err(err) => {
                let payload_dump = payload.map_or_else(
                    || String::from("none"),
                    |p| {
                        serde_json::to_string(p)
                            .unwrap_or_else(|_| String::from("<unserializable>"))
                    },
                );
                error!("[HTTP] {method} {endpoint} failed: {err:?}, payload: {payload_dump}");
                Err(err)
            }
        }
    }

    async fn execute<R, B>(
        &self,
        method: HTTPRequestMethod,
        endpoint: &str,
        payload: Option<&B>,
        headers: Option<HeaderMap>,
    ) -> Result<R, RequestError>
    where
        R: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = format!("{}{endpoint}", self.base_url);
        let mut req = match method {
            HTTPRequestMethod::Get => self.client.get(&url),
            HTTPRequestMethod::Post => self.client.post(&url),
            HTTPRequestMethod::Put => self.client.put(&url),
        };
        // GET never carries a body, even when a payload is supplied.
        if !matches!(method, HTTPRequestMethod::Get) {
            if let Some(body) = payload {
                req = req.json(body);
            }
        }
        if let Some(extra) = headers {
            req = req.headers(extra);
        }
        let response = req.send().await?.error_for_status()?;
        Ok(response.json::<R>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn empty_base_url_fails_for_any_credential() {
        assert!(matches!(
            HTTPClient::new("", None, 1000),
            Err(ConfigError::EmptyBaseUrl)
        ));
        assert!(matches!(
            HTTPClient::new("", Some("secret"), 1000),
            Err(ConfigError::EmptyBaseUrl)
        ));
    }

    #[test]
    fn effective_timeout_adds_fixed_margin() {
        let client = HTTPClient::new("https://api.example.com", Some("secret"), 1000).unwrap();
        assert_eq!(client.timeout(), Duration::from_millis(6000));
    }

    #[test]
    fn oversized_threshold_saturates_rather_than_panicking() {
        let client = HTTPClient::new("http://localhost:33000", None, u64::MAX).unwrap();
        assert_eq!(client.timeout(), Duration::from_millis(u64::MAX));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = HTTPClient::new("http://localhost:33000/", None, 0).unwrap();
        assert_eq!(client.url(), "http://localhost:33000");
    }

    #[test]
    fn credential_with_invalid_header_bytes_fails() {
        assert!(matches!(
            HTTPClient::new("http://localhost:33000", Some("bad\nvalue"), 0),
            Err(ConfigError::InvalidCredential)
        ));
    }

    #[test]
    #[serial]
    fn from_env_fails_when_threshold_unset() {
        unsafe { std::env::remove_var(TIMEOUT_THRESHOLD_ENV) };
        assert!(matches!(
            HTTPClient::from_env("http://localhost:33000", None),
            Err(ConfigError::MissingTimeoutThreshold)
        ));
    }

    #[test]
    #[serial]
    fn from_env_fails_when_threshold_non_numeric() {
        unsafe { std::env::set_var(TIMEOUT_THRESHOLD_ENV, "not-a-number") };
        let res = HTTPClient::from_env("http://localhost:33000", None);
        unsafe { std::env::remove_var(TIMEOUT_THRESHOLD_ENV) };
        assert!(matches!(
            res,
            Err(ConfigError::NonNumericTimeoutThreshold(raw)) if raw == "not-a-number"
        ));
    }

    #[test]
    #[serial]
    fn from_env_reads_threshold_and_adds_margin() {
        unsafe { std::env::set_var(TIMEOUT_THRESHOLD_ENV, "1000") };
        let client = HTTPClient::from_env("https://api.example.com", Some("secret")).unwrap();
        unsafe { std::env::remove_var(TIMEOUT_THRESHOLD_ENV) };
        assert_eq!(client.timeout(), Duration::from_millis(6000));
    }

    #[tokio::test]
    #[serial]
    async fn failed_call_emits_exactly_one_error_log() {
        // Nothing listens on this port.
        let client = HTTPClient::new("http://127.0.0.1:9", None, 1000).unwrap();
        let before = crate::logger::error_emissions();
        let res = client
            .request::<serde_json::Value, ()>(HTTPRequestMethod::Get, "/status", None, None)
            .await;
        assert!(res.is_err());
        assert_eq!(crate::logger::error_emissions() - before, 1);
    }

    #[tokio::test]
    #[serial]
    async fn successful_call_emits_no_error_log() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/status"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"state": "ok"})),
            )
            .mount(&server)
            .await;

        let client = HTTPClient::new(&server.uri(), None, 1000).unwrap();
        let before = crate::logger::error_emissions();
        let resp = client
            .request::<serde_json::Value, ()>(HTTPRequestMethod::Get, "/status", None, None)
            .await
            .unwrap();
        assert_eq!(resp["state"], "ok");
        assert_eq!(crate::logger::error_emissions(), before);
    }

    #[test]
    #[serial]
    fn from_env_checks_base_url_too() {
        unsafe { std::env::set_var(TIMEOUT_THRESHOLD_ENV, "1000") };
        let res = HTTPClient::from_env("", None);
        unsafe { std::env::remove_var(TIMEOUT_THRESHOLD_ENV) };
        assert!(matches!(res, Err(ConfigError::EmptyBaseUrl)));
    }
}
