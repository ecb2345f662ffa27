//! JSON client for the Garments ERP API
//!
//! Adds the stored bearer token to every request, decodes JSON bodies and
//! turns non-success statuses into `LedgerError`s. A 401 also clears the
//! stored token so the next command starts logged out.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::token::TokenStore;
use super::transport::{ApiRequest, ApiResponse, HttpMethod, ReqwestTransport, Transport};
use crate::config::{LedgerPaths, Settings};
use crate::error::{LedgerError, LedgerResult};

pub struct ApiClient {
    transport: Box<dyn Transport>,
    tokens: TokenStore,
}

impl ApiClient {
    pub fn new(transport: Box<dyn Transport>, tokens: TokenStore) -> Self {
        Self { transport, tokens }
    }

    /// Build a client for the configured API using the reqwest transport
    pub fn from_settings(settings: &Settings, paths: &LedgerPaths) -> LedgerResult<Self> {
        let transport = ReqwestTransport::new(
            &settings.api_base_url,
            Duration::from_secs(settings.timeout_secs),
        )?;
        Ok(Self::new(
            Box::new(transport),
            TokenStore::new(paths.token_file()),
        ))
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str, query: Vec<(String, String)>) -> LedgerResult<T> {
        let response = self.execute(ApiRequest::new(HttpMethod::Get, path).with_query(query))?;
        decode(&response)
    }

    pub fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> LedgerResult<T> {
        let request = ApiRequest::new(HttpMethod::Post, path).with_body(encode(body)?);
        decode(&self.execute(request)?)
    }

    pub fn put<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> LedgerResult<T> {
        let request = ApiRequest::new(HttpMethod::Put, path).with_body(encode(body)?);
        decode(&self.execute(request)?)
    }

    /// PATCH without a body
    pub fn patch<T: DeserializeOwned>(&self, path: &str) -> LedgerResult<T> {
        decode(&self.execute(ApiRequest::new(HttpMethod::Patch, path))?)
    }

    /// DELETE; any response body is ignored
    pub fn delete(&self, path: &str) -> LedgerResult<()> {
        self.execute(ApiRequest::new(HttpMethod::Delete, path))?;
        Ok(())
    }

    /// Send a request with the stored token attached and check its status
    pub fn execute(&self, mut request: ApiRequest) -> LedgerResult<ApiResponse> {
        request.bearer_token = self.tokens.load();
        debug!(method = %request.method, path = %request.path, "api request");

        let response = self.transport.send(&request)?;
        if response.is_success() {
            return Ok(response);
        }

        let message = error_message(&response.body);
        if response.status == 401 {
            warn!(path = %request.path, "API rejected the stored token, clearing it");
            if let Err(e) = self.tokens.clear() {
                warn!(error = %e, "failed to clear stored token");
            }
        }
        Err(LedgerError::from_status(response.status, message))
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> LedgerResult<serde_json::Value> {
    Ok(serde_json::to_value(body)?)
}

fn decode<T: DeserializeOwned>(response: &ApiResponse) -> LedgerResult<T> {
    // Treat an empty 2xx body as JSON null so `()` and `Option<_>` decode cleanly
    let body = if response.body.trim().is_empty() {
        "null"
    } else {
        response.body.as_str()
    };
    serde_json::from_str(body).map_err(|e| {
        LedgerError::InvalidResponse(format!("Could not decode response ({}): {}", response.status, e))
    })
}

/// Pull a readable message out of an error body
///
/// ASP.NET answers with `{"message": ..}`, `{"title": .., "errors": {..}}`
/// or `{"errors": [..]}` depending on where the request failed.
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().chars().take(200).collect();
    };

    let headline = value
        .get("message")
        .or_else(|| value.get("title"))
        .and_then(|m| m.as_str())
        .unwrap_or("")
        .to_string();

    let details: Vec<String> = match value.get("errors") {
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|i| i.as_str().map(str::to_string))
            .collect(),
        Some(serde_json::Value::Object(fields)) => fields
            .iter()
            .flat_map(|(field, msgs)| {
                msgs.as_array()
                    .into_iter()
                    .flatten()
                    .filter_map(|m| m.as_str())
                    .map(move |m| format!("{}: {}", field, m))
            })
            .collect(),
        _ => Vec::new(),
    };

    match (headline.is_empty(), details.is_empty()) {
        (_, true) => headline,
        (true, false) => details.join("; "),
        (false, false) => format!("{} ({})", headline, details.join("; ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::testing::ScriptedTransport;
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn client_with(transport: Arc<ScriptedTransport>, dir: &TempDir) -> ApiClient {
        ApiClient::new(
            Box::new(transport),
            TokenStore::new(dir.path().join("token")),
        )
    }

    #[test]
    fn test_bearer_token_is_attached() {
        let dir = TempDir::new().unwrap();
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(200, json!({"status": "ok"}));

        let client = client_with(transport.clone(), &dir);
        client.tokens().save("tok-123").unwrap();

        let body: serde_json::Value = client.get("/api/health", Vec::new()).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(
            transport.requests()[0].bearer_token.as_deref(),
            Some("tok-123")
        );
    }

    #[test]
    fn test_unauthorized_clears_token() {
        let dir = TempDir::new().unwrap();
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(401, json!({"message": "Token expired"}));

        let client = client_with(transport, &dir);
        client.tokens().save("stale").unwrap();

        let err = client
            .get::<serde_json::Value>("/api/category", Vec::new())
            .unwrap_err();
        assert!(matches!(err, LedgerError::Unauthorized(ref m) if m == "Token expired"));
        assert!(!client.tokens().is_logged_in());
    }

    #[test]
    fn test_status_mapping_and_messages() {
        let dir = TempDir::new().unwrap();
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .push_json(400, json!({"title": "One or more validation errors occurred.",
                                   "errors": {"Name": ["The Name field is required."]}}))
            .push_status(503, "Service Unavailable");

        let client = client_with(transport, &dir);

        let err = client
            .post::<_, serde_json::Value>("/api/category", &json!({}))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: One or more validation errors occurred. (Name: The Name field is required.)"
        );

        let err = client.delete("/api/category/1").unwrap_err();
        assert!(matches!(err, LedgerError::Server { status: 503, .. }));
    }

    #[test]
    fn test_empty_body_decodes_as_unit() {
        let dir = TempDir::new().unwrap();
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_status(204, "");

        let client = client_with(transport, &dir);
        client
            .put::<_, ()>("/api/currency/1", &json!({"symbol": "$"}))
            .unwrap();
    }

    #[test]
    fn test_malformed_body_is_invalid_response() {
        let dir = TempDir::new().unwrap();
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_status(200, "<html>");

        let client = client_with(transport, &dir);
        let err = client.get::<Vec<String>>("/api/currency", Vec::new()).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidResponse(_)));
    }
}
