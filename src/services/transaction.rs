//! Single credit and debit transactions

use std::time::Duration;

use chrono::{DateTime, Datelike, Local, TimeZone};
use tracing::{info, warn};

use crate::api::{ApiClient, ResponseCache};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    CreditTransaction, DebitTransaction, SavedTransaction, SingleTransactionRequest,
    TransactionSaveResponse,
};

const BASE_PATH: &str = "/api/cashbookentry";
const RECENT_TTL: Duration = Duration::from_secs(30);
pub const DEFAULT_RECENT_LIMIT: u32 = 50;

pub struct TransactionService<'a> {
    client: &'a ApiClient,
    recent: ResponseCache<Vec<SavedTransaction>>,
}

impl<'a> TransactionService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            recent: ResponseCache::new(RECENT_TTL),
        }
    }

    pub fn save_credit(&self, tx: &CreditTransaction) -> LedgerResult<TransactionSaveResponse> {
        tx.validate()?;
        let request = SingleTransactionRequest::credit(tx, reference_number("CR", &Local::now()));
        Ok(self.submit("credit-transaction", &request))
    }

    pub fn save_debit(&self, tx: &DebitTransaction) -> LedgerResult<TransactionSaveResponse> {
        tx.validate()?;
        let request = SingleTransactionRequest::debit(tx, reference_number("DR", &Local::now()));
        Ok(self.submit("debit-transaction", &request))
    }

    /// Most recently saved transactions; empty if the lookup fails
    pub fn recent_transactions(&self, limit: u32) -> LedgerResult<Vec<SavedTransaction>> {
        if limit == 0 {
            return Err(LedgerError::Validation("Limit must be at least 1".into()));
        }

        let key = format!("recent:{}", limit);
        let fetched = self.recent.get_or_fetch(&key, || {
            self.client
                .get::<Option<Vec<SavedTransaction>>>(
                    &format!("{}/recent-transactions", BASE_PATH),
                    vec![("limit".into(), limit.to_string())],
                )
                .map(Option::unwrap_or_default)
        });

        match fetched {
            Ok(list) => Ok(list),
            Err(e) => {
                warn!(error = %e, "failed to load recent transactions");
                Ok(Vec::new())
            }
        }
    }

    fn submit(&self, endpoint: &str, request: &SingleTransactionRequest) -> TransactionSaveResponse {
        let result = self
            .client
            .post::<_, TransactionSaveResponse>(&format!("{}/{}", BASE_PATH, endpoint), request);
        self.recent.invalidate_all();

        match result {
            Ok(response) => {
                info!(reference = %request.reference_number, success = response.success, "transaction submitted");
                response
            }
            Err(e) => {
                warn!(error = %e, endpoint, "failed to save transaction");
                TransactionSaveResponse::failed(e.to_string())
            }
        }
    }
}

/// `{prefix}-YYYY-MM-DD-nnnnnn`, the suffix being the last six digits of the
/// epoch milliseconds
pub fn reference_number<Tz: TimeZone>(prefix: &str, now: &DateTime<Tz>) -> String {
    let millis = now.timestamp_millis().rem_euclid(1_000_000);
    format!(
        "{}-{:04}-{:02}-{:02}-{:06}",
        prefix,
        now.year(),
        now.month(),
        now.day(),
        millis
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::testing::ScriptedTransport;
    use crate::api::TokenStore;
    use crate::models::Money;
    use chrono::{NaiveDate, Utc};
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

    fn credit() -> CreditTransaction {
        CreditTransaction {
            date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            category_name: "Sales Revenue".into(),
            particulars: "Invoice 12".into(),
            amount: Money::from_units(1500),
            contact_name: Some("Urbo".into()),
        }
    }

    fn recent_json() -> serde_json::Value {
        json!([{
            "id": "t1", "date": "2025-03-04", "type": "Credit", "categoryName": "Sales Revenue",
            "particulars": "Invoice 12", "amount": 1500, "referenceNumber": "CR-2025-03-04-000001",
            "createdAt": "2025-03-04T10:00:00Z"
        }])
    }

    #[test]
    fn test_reference_number_format() {
        let at = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        let reference = reference_number("CR", &at);
        let expected_suffix = at.timestamp_millis() % 1_000_000;
        assert_eq!(reference, format!("CR-2024-01-05-{:06}", expected_suffix));
    }

    #[test]
    fn test_save_credit_posts_with_reference() {
        let (_dir, transport, client) = setup();
        transport.push_json(200, json!({"success": true, "message": "ok", "transactionId": "t1"}));

        let response = TransactionService::new(&client).save_credit(&credit()).unwrap();
        assert!(response.success);

        let request = &transport.requests()[0];
        assert_eq!(request.path, "/api/cashbookentry/credit-transaction");
        let body = request.body.as_ref().unwrap();
        assert!(body["referenceNumber"].as_str().unwrap().starts_with("CR-"));
        assert_eq!(body["contactName"], "Urbo");
    }

    #[test]
    fn test_failed_save_is_returned() {
        let (_dir, transport, client) = setup();
        transport.push_network_error("connection refused");

        let debit = DebitTransaction {
            date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            category_name: "Utilities".into(),
            supplier_name: None,
            buyer_name: None,
            particulars: "DESCO".into(),
            amount: Money::from_units(900),
        };
        let response = TransactionService::new(&client).save_debit(&debit).unwrap();
        assert!(!response.success);
        assert!(response.message.contains("connection refused"));
        assert_eq!(transport.requests()[0].path, "/api/cashbookentry/debit-transaction");
    }

    #[test]
    fn test_recent_is_cached_until_a_save() {
        let (_dir, transport, client) = setup();
        transport
            .push_json(200, recent_json())
            .push_json(200, json!({"success": true, "message": "ok"}))
            .push_json(200, recent_json());
        let service = TransactionService::new(&client);

        assert_eq!(service.recent_transactions(10).unwrap().len(), 1);
        assert_eq!(service.recent_transactions(10).unwrap().len(), 1);
        assert_eq!(transport.request_count(), 1);
        assert_eq!(transport.requests()[0].query_value("limit"), Some("10"));

        service.save_credit(&credit()).unwrap();
        service.recent_transactions(10).unwrap();
        assert_eq!(transport.request_count(), 3);
    }

    #[test]
    fn test_recent_degrades_to_empty() {
        let (_dir, transport, client) = setup();
        transport.push_status(503, "");
        let service = TransactionService::new(&client);
        assert!(service.recent_transactions(5).unwrap().is_empty());
        assert!(service.recent_transactions(0).is_err());
    }
}
