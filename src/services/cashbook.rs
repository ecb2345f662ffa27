//! Cash book entry submission and the lookups the entry form needs

use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::LedgerResult;
use crate::models::{CashBookEntry, CashBookSaveResponse, LookupItem};

const BASE_PATH: &str = "/api/cashbookentry";

pub struct CashBookService<'a> {
    client: &'a ApiClient,
}

impl<'a> CashBookService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Submit a two-sided entry
    ///
    /// Invalid entries are rejected before sending. Once sent, a failure is
    /// reported in the returned response rather than as an error.
    pub fn save_entry(&self, entry: &CashBookEntry) -> LedgerResult<CashBookSaveResponse> {
        entry.validate()?;

        match self
            .client
            .post::<_, CashBookSaveResponse>(&format!("{}/create-entry", BASE_PATH), entry)
        {
            Ok(response) => {
                info!(
                    reference = %entry.reference_number,
                    success = response.success,
                    "cash book entry submitted"
                );
                Ok(response)
            }
            Err(e) => {
                warn!(error = %e, reference = %entry.reference_number, "failed to save cash book entry");
                Ok(CashBookSaveResponse::failed(e.to_string()))
            }
        }
    }

    /// Category names known to the cash book; empty if the lookup fails
    pub fn categories(&self) -> Vec<LookupItem> {
        self.lookup("categories")
    }

    /// Contacts known to the cash book; empty if the lookup fails
    pub fn contacts(&self) -> Vec<LookupItem> {
        self.lookup("contacts")
    }

    fn lookup(&self, what: &str) -> Vec<LookupItem> {
        match self
            .client
            .get::<Option<Vec<LookupItem>>>(&format!("{}/{}", BASE_PATH, what), Vec::new())
        {
            Ok(items) => items.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, lookup = what, "cash book lookup failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::testing::ScriptedTransport;
    use crate::api::TokenStore;
    use crate::models::{CreditTransaction, Money};
    use chrono::NaiveDate;
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Arc<ScriptedTransport>, ApiClient) {
        let dir = TempDir::new().unwrap();
        let transport = Arc::new(ScriptedTransport::new());
        let client = ApiClient::new(
            Box::new(transport.clone()),
            TokenStore::new(dir.path().join("token")),
        );
        (dir, transport, client)
    }

    fn entry() -> CashBookEntry {
        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let mut entry = CashBookEntry::new(day, "IMP-20250101-4");
        entry.credit_transactions.push(CreditTransaction {
            date: day,
            category_name: "Loan A/C Chairman".into(),
            particulars: "Opening".into(),
            amount: Money::from_units(261_080),
            contact_name: None,
        });
        entry
    }

    #[test]
    fn test_save_entry_posts_to_create_entry() {
        let (_dir, transport, client) = setup();
        transport.push_json(
            200,
            json!({"success": true, "message": "Saved", "journalEntryId": "je-1", "transactionsProcessed": 1}),
        );

        let response = CashBookService::new(&client).save_entry(&entry()).unwrap();
        assert!(response.success);
        assert_eq!(response.journal_entry_id.as_deref(), Some("je-1"));

        let request = &transport.requests()[0];
        assert_eq!(request.path, "/api/cashbookentry/create-entry");
        assert_eq!(request.body.as_ref().unwrap()["referenceNumber"], "IMP-20250101-4");
    }

    #[test]
    fn test_save_failure_is_returned_not_raised() {
        let (_dir, transport, client) = setup();
        transport.push_json(400, json!({"message": "Unknown category"}));

        let response = CashBookService::new(&client).save_entry(&entry()).unwrap();
        assert!(!response.success);
        assert!(response.message.contains("Unknown category"));
    }

    #[test]
    fn test_invalid_entry_is_not_sent() {
        let (_dir, transport, client) = setup();
        let empty = CashBookEntry::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), "X");
        assert!(CashBookService::new(&client).save_entry(&empty).is_err());
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_lookups_degrade_to_empty() {
        let (_dir, transport, client) = setup();
        transport
            .push_json(200, json!([{"id": 1, "name": "Sales Revenue"}]))
            .push_status(500, "");
        let service = CashBookService::new(&client);

        assert_eq!(service.categories()[0].name, "Sales Revenue");
        assert!(service.contacts().is_empty());
    }
}
