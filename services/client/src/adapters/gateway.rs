//! services/client/src/adapters/gateway.rs
//!
//! The single point through which every backend call flows. The gateway is
//! configured once (base address, cookie-forwarding HTTP client) and runs
//! each response status through the interceptor pipeline before the result
//! reaches the caller, so no call site can accidentally skip the global
//! auth-failure policy.

use codelab_core::ports::{PortError, PortResult};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

//=========================================================================================
// Response Interception
//=========================================================================================

/// A cross-cutting observer of every backend response.
///
/// Interceptors see only the HTTP status and the request path, never the
/// body; they may perform side effects but cannot change what the caller
/// receives.
pub trait ResponseInterceptor: Send + Sync {
    fn on_response(&self, status: StatusCode, path: &str);
}

//=========================================================================================
// The Envelope Convention
//=========================================================================================

/// The `{status, data, message?}` wrapper every backend endpoint uses.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

//=========================================================================================
// The Gateway
//=========================================================================================

/// The shared request-issuing facade.
pub struct HttpGateway {
    base_url: String,
    http: reqwest::Client,
    interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl HttpGateway {
    /// Builds the gateway. The cookie store carries the backend session
    /// cookie across calls, which is the client's only credential.
    pub fn new(
        base_url: impl Into<String>,
        interceptors: Vec<Arc<dyn ResponseInterceptor>>,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            base_url: base_url.into(),
            http,
            interceptors,
        })
    }

    /// GET a resource and unwrap its envelope.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> PortResult<T> {
        let request = self.http.get(self.url(path));
        self.execute(request, path).await
    }

    /// POST a JSON body and unwrap the response envelope.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> PortResult<T> {
        let request = self.http.post(self.url(path)).json(body);
        self.execute(request, path).await
    }

    /// POST a JSON body, discarding whatever `data` the envelope carries.
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> PortResult<()> {
        let _ignored: serde_json::Value = self.post(path, body).await?;
        Ok(())
    }

    /// POST with no body, discarding the envelope payload (logout, deletes).
    pub async fn post_empty(&self, path: &str) -> PortResult<()> {
        let request = self.http.post(self.url(path));
        let _ignored: serde_json::Value = self.execute(request, path).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// The one funnel every verb goes through: send, intercept, decode.
    /// No retries; failures propagate immediately to the caller.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> PortResult<T> {
        let request_id = Uuid::new_v4();
        debug!(%request_id, path, "issuing backend request");

        let response = request
            .send()
            .await
            .map_err(|e| PortError::Network(e.to_string()))?;

        let status = response.status();

        // Every response, success or failure, passes through the pipeline
        // before the caller sees anything.
        for interceptor in &self.interceptors {
            interceptor.on_response(status, path);
        }

        if status.is_success() {
            let envelope: Envelope<T> = response
                .json()
                .await
                .map_err(|e| PortError::Unexpected(format!("malformed response body: {}", e)))?;
            envelope.data.ok_or_else(|| {
                PortError::Unexpected(format!("response for {} carried no data", path))
            })
        } else {
            // The failure envelope may carry a human-readable message.
            let message = response
                .json::<Envelope<serde_json::Value>>()
                .await
                .ok()
                .and_then(|e| e.message);
            warn!(%request_id, path, %status, "backend request failed");
            Err(map_failure(status, path, message))
        }
    }
}

/// Maps an HTTP failure status onto the port error taxonomy.
fn map_failure(status: StatusCode, path: &str, message: Option<String>) -> PortError {
    let detail = message.unwrap_or_else(|| format!("request to {} failed", path));
    match status {
        StatusCode::UNAUTHORIZED => PortError::Unauthorized,
        StatusCode::FORBIDDEN => PortError::Forbidden,
        StatusCode::NOT_FOUND => PortError::NotFound(detail),
        StatusCode::BAD_REQUEST => PortError::Validation(detail),
        s if s.is_server_error() => PortError::Network(format!("{}: {}", s, detail)),
        s => PortError::Unexpected(format!("{}: {}", s, detail)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_unwraps_data() {
        let body = r#"{"status":"success","data":{"value":7}}"#;
        let envelope: Envelope<serde_json::Value> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.data.unwrap()["value"], 7);
        assert!(envelope.message.is_none());
    }

    #[test]
    fn envelope_tolerates_missing_data_and_carries_message() {
        let body = r#"{"status":"fail","message":"bad class code"}"#;
        let envelope: Envelope<serde_json::Value> = serde_json::from_str(body).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message.as_deref(), Some("bad class code"));
    }

    #[test]
    fn failure_statuses_map_onto_the_taxonomy() {
        assert!(matches!(
            map_failure(StatusCode::UNAUTHORIZED, "/x", None),
            PortError::Unauthorized
        ));
        assert!(matches!(
            map_failure(StatusCode::FORBIDDEN, "/x", None),
            PortError::Forbidden
        ));
        assert!(matches!(
            map_failure(StatusCode::NOT_FOUND, "/x", None),
            PortError::NotFound(_)
        ));
        assert!(matches!(
            map_failure(StatusCode::BAD_REQUEST, "/x", Some("empty field".into())),
            PortError::Validation(m) if m == "empty field"
        ));
        assert!(matches!(
            map_failure(StatusCode::INTERNAL_SERVER_ERROR, "/x", None),
            PortError::Network(_)
        ));
    }
}
