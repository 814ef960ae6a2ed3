use super::common::RequestError;
use super::http_client::HTTPClient;
use reqwest::header::HeaderMap;
use strum_macros::Display;

/// Request verbs supported by the API.
///
/// Only GET requests are guaranteed body-free; POST and PUT carry a JSON
/// body when one is supplied.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HTTPRequestMethod {
    Get,
    Post,
    Put,
}

/// A typed request against a single endpoint.
///
/// Implementors declare the endpoint, the verb, and optionally a body and
/// per-call headers; `send_request` then delegates to
/// [`HTTPClient::request`] and decodes the response into
/// [`Self::Response`].
#[allow(async_fn_in_trait)]
pub trait HTTPRequestType {
    /// Parsed shape of a successful response body.
    type Response: for<'de> serde::Deserialize<'de>;
    /// Serializable body attached to POST and PUT calls.
    type Body: serde::Serialize;

    /// Path relative to the client's base URL, e.g. `"/status"`.
    fn endpoint(&self) -> &str;
    /// The corresponding HTTP request method.
    fn request_method(&self) -> HTTPRequestMethod;
    /// The serializable body, if the request carries one.
    fn body(&self) -> Option<&Self::Body> { None }
    /// Headers merged into this call only, overriding defaults on collision.
    fn header_params(&self) -> Option<HeaderMap> { None }

    /// Issues the request through `client` and decodes the response.
    ///
    /// Behaves exactly like [`HTTPClient::request`]: single attempt, one
    /// error log on failure, original transport error preserved.
    async fn send_request(&self, client: &HTTPClient) -> Result<Self::Response, RequestError> {
        client
            .request(self.request_method(), self.endpoint(), self.body(), self.header_params())
            .await
    }
}
