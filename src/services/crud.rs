//! Generic REST resource access
//!
//! The admin entities all follow one shape: `GET base`, `GET base/{id}`,
//! `GET base/active`, `POST base`, `PUT base/{id}`, `DELETE base/{id}`.
//! `Resource` covers that shape once; the entity services add whatever
//! extra endpoints they have.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::api::ApiClient;
use crate::error::{LedgerError, LedgerResult};

/// A request body that can be checked before it is sent
pub trait Validate {
    fn validate(&self) -> LedgerResult<()>;
}

/// Trim an id that goes into a URL path and allow only ASCII alphanumerics
/// and `-`, so it stays a single segment
pub fn path_id<'s>(label: &str, id: &'s str) -> LedgerResult<&'s str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(LedgerError::Validation(format!("{} ID is required", label)));
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(LedgerError::Validation(format!(
            "Invalid {} ID '{}'",
            label, id
        )));
    }
    Ok(id)
}

pub struct Resource<'a, T, R> {
    client: &'a ApiClient,
    base_path: &'static str,
    entity_type: &'static str,
    _marker: PhantomData<fn() -> (T, R)>,
}

impl<'a, T, R> Resource<'a, T, R>
where
    T: DeserializeOwned,
    R: Serialize + Validate,
{
    pub fn new(client: &'a ApiClient, base_path: &'static str, entity_type: &'static str) -> Self {
        Self {
            client,
            base_path,
            entity_type,
            _marker: PhantomData,
        }
    }

    pub fn client(&self) -> &'a ApiClient {
        self.client
    }

    pub fn base_path(&self) -> &'static str {
        self.base_path
    }

    pub fn list(&self) -> LedgerResult<Vec<T>> {
        self.client.get(self.base_path, Vec::new())
    }

    pub fn list_active(&self) -> LedgerResult<Vec<T>> {
        self.list_at("active", Vec::new())
    }

    /// List from a sub-path such as `suppliers` or `by-type/Financial`
    pub fn list_at(&self, sub_path: &str, query: Vec<(String, String)>) -> LedgerResult<Vec<T>> {
        self.client
            .get(&format!("{}/{}", self.base_path, sub_path), query)
    }

    pub fn get(&self, id: &str) -> LedgerResult<T> {
        let path = self.item_path(id)?;
        self.client.get(&path, Vec::new()).map_err(|e| self.not_found(e, id))
    }

    pub fn create(&self, request: &R) -> LedgerResult<T> {
        request.validate()?;
        debug!(entity = self.entity_type, "creating");
        self.client.post(self.base_path, request)
    }

    pub fn update(&self, id: &str, request: &R) -> LedgerResult<T> {
        let path = self.item_path(id)?;
        request.validate()?;
        self.client
            .put(&path, request)
            .map_err(|e| self.not_found(e, id))
    }

    pub fn delete(&self, id: &str) -> LedgerResult<()> {
        let path = self.item_path(id)?;
        self.client.delete(&path).map_err(|e| self.not_found(e, id))
    }

    fn item_path(&self, id: &str) -> LedgerResult<String> {
        let id = path_id(self.entity_type, id)?;
        Ok(format!("{}/{}", self.base_path, id))
    }

    /// Name the entity in a 404 instead of the generic "Resource"
    fn not_found(&self, err: LedgerError, id: &str) -> LedgerError {
        match err {
            LedgerError::NotFound { .. } => LedgerError::NotFound {
                entity_type: self.entity_type,
                identifier: id.trim().to_string(),
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::testing::ScriptedTransport;
    use crate::api::transport::HttpMethod;
    use crate::api::TokenStore;
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Thing {
        id: String,
        name: String,
    }

    #[derive(Serialize)]
    struct ThingRequest {
        name: String,
    }

    impl Validate for ThingRequest {
        fn validate(&self) -> LedgerResult<()> {
            if self.name.is_empty() {
                return Err(LedgerError::Validation("Name is required".into()));
            }
            Ok(())
        }
    }

    fn setup() -> (TempDir, Arc<ScriptedTransport>, ApiClient) {
        let dir = TempDir::new().unwrap();
        let transport = Arc::new(ScriptedTransport::new());
        let client = ApiClient::new(
            Box::new(transport.clone()),
            TokenStore::new(dir.path().join("token")),
        );
        (dir, transport, client)
    }

    #[test]
    fn test_paths() {
        let (_dir, transport, client) = setup();
        transport
            .push_json(200, json!([{"id": "1", "name": "a"}]))
            .push_json(200, json!({"id": "1", "name": "a"}))
            .push_json(200, json!([]))
            .push_status(204, "");

        let things: Resource<Thing, ThingRequest> = Resource::new(&client, "/api/thing", "Thing");
        assert_eq!(things.list().unwrap().len(), 1);
        assert_eq!(things.get(" 1 ").unwrap().name, "a");
        assert!(things.list_active().unwrap().is_empty());
        things.delete("1").unwrap();

        let paths: Vec<(HttpMethod, String)> = transport
            .requests()
            .into_iter()
            .map(|r| (r.method, r.path))
            .collect();
        assert_eq!(
            paths,
            vec![
                (HttpMethod::Get, "/api/thing".to_string()),
                (HttpMethod::Get, "/api/thing/1".to_string()),
                (HttpMethod::Get, "/api/thing/active".to_string()),
                (HttpMethod::Delete, "/api/thing/1".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_request_is_not_sent() {
        let (_dir, transport, client) = setup();
        let things: Resource<Thing, ThingRequest> = Resource::new(&client, "/api/thing", "Thing");

        assert!(things
            .create(&ThingRequest { name: String::new() })
            .unwrap_err()
            .is_validation());
        assert_eq!(
            things.get("").unwrap_err().to_string(),
            "Validation error: Thing ID is required"
        );
        assert!(things.delete("1/2").is_err());
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_ids_cannot_leave_the_resource_path() {
        let (_dir, transport, client) = setup();
        let things: Resource<Thing, ThingRequest> = Resource::new(&client, "/api/thing", "Thing");
        let request = ThingRequest { name: "a".into() };

        for bad in ["..", "../auth/profile", "%2e%2e", "a b", "1\\2", "id;drop", "é1"] {
            assert!(things.get(bad).unwrap_err().is_validation(), "{:?} accepted", bad);
            assert!(things.update(bad, &request).unwrap_err().is_validation());
            assert!(things.delete(bad).unwrap_err().is_validation());
        }
        assert_eq!(
            things.get("../auth/profile").unwrap_err().to_string(),
            "Validation error: Invalid Thing ID '../auth/profile'"
        );
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_path_id_accepts_guids() {
        assert_eq!(
            path_id("Thing", " 3f2b8c1e-0d4a-4e7b-9c1a-2b3c4d5e6f70 ").unwrap(),
            "3f2b8c1e-0d4a-4e7b-9c1a-2b3c4d5e6f70"
        );
        assert_eq!(path_id("Thing", "credit-2").unwrap(), "credit-2");
    }

    #[test]
    fn test_not_found_names_the_entity() {
        let (_dir, transport, client) = setup();
        transport.push_json(404, json!({"message": "missing"}));
        let things: Resource<Thing, ThingRequest> = Resource::new(&client, "/api/thing", "Thing");

        let err = things.get("42").unwrap_err();
        assert_eq!(err.to_string(), "Thing not found: 42");
    }
}
