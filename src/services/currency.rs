//! Currency service

use super::crud::{Resource, Validate};
use crate::api::ApiClient;
use crate::error::LedgerResult;
use crate::models::{Currency, CurrencyRequest};

impl Validate for CurrencyRequest {
    fn validate(&self) -> LedgerResult<()> {
        CurrencyRequest::validate(self)
    }
}

pub struct CurrencyService<'a> {
    resource: Resource<'a, Currency, CurrencyRequest>,
}

impl<'a> CurrencyService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            resource: Resource::new(client, "/api/currency", "Currency"),
        }
    }

    pub fn list(&self) -> LedgerResult<Vec<Currency>> {
        self.resource.list()
    }

    pub fn list_active(&self) -> LedgerResult<Vec<Currency>> {
        self.resource.list_active()
    }

    pub fn get(&self, id: &str) -> LedgerResult<Currency> {
        self.resource.get(id)
    }

    /// The currency flagged as base, if any
    pub fn base_currency(&self) -> LedgerResult<Option<Currency>> {
        Ok(self.list()?.into_iter().find(|c| c.is_base_currency))
    }

    pub fn create(&self, request: &CurrencyRequest) -> LedgerResult<Currency> {
        self.resource.create(request)
    }

    pub fn update(&self, id: &str, request: &CurrencyRequest) -> LedgerResult<Currency> {
        self.resource.update(id, request)
    }

    pub fn delete(&self, id: &str) -> LedgerResult<()> {
        self.resource.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::testing::ScriptedTransport;
    use crate::api::TokenStore;
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_base_currency() {
        let dir = TempDir::new().unwrap();
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(
            200,
            json!([
                {"id": "1", "currencyCode": "USD", "currencyName": "US Dollar", "symbol": "$",
                 "isBaseCurrency": false, "isActive": true, "createdAt": "2024-01-01T00:00:00Z"},
                {"id": "2", "currencyCode": "BDT", "currencyName": "Taka", "symbol": "৳",
                 "isBaseCurrency": true, "isActive": true, "createdAt": "2024-01-01T00:00:00Z"}
            ]),
        );
        let client = ApiClient::new(Box::new(transport), TokenStore::new(dir.path().join("token")));

        let base = CurrencyService::new(&client).base_currency().unwrap().unwrap();
        assert_eq!(base.currency_code, "BDT");
    }
}
