//! Trial balance service
//!
//! Fetches trial balance reports, account drill-downs and period comparisons.
//! Every call validates its input first, then passes the client-side rate
//! limiter, then goes through the retry wrapper.

use tracing::{debug, info, warn};

use super::calculation::check_consistency;
use super::crud::path_id;
use crate::api::retry::{RetryPolicy, Sleeper, ThreadSleeper};
use crate::api::{handle_partial_failure, ApiClient, PartialResults, RateLimiter};
use crate::error::{LedgerError, LedgerResult};
use crate::models::trial_balance::{
    DateRangeDto, TrialBalanceCompareRequest, TrialBalanceComparisonResponseDto,
    TrialBalanceResponseDto,
};
use crate::models::{
    AccountCategoryType, AccountTransactions, DateRange, TransactionDetail, TrialBalanceComparison,
    TrialBalanceData,
};

const BASE_PATH: &str = "/api/trial-balance";
const DEV_PATH: &str = "/api/dev/trial-balance";

pub const GENERATE_KEY: &str = "trial-balance:generate";
pub const DRILL_DOWN_KEY: &str = "trial-balance:drill-down";
pub const COMPARE_KEY: &str = "trial-balance:compare";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 50;

static THREAD_SLEEPER: ThreadSleeper = ThreadSleeper;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialBalanceOptions {
    pub group_by_category: bool,
    pub include_zero_balances: bool,
    /// Empty means every category
    pub category_filter: Vec<AccountCategoryType>,
    pub enable_retry: bool,
    /// Return a zeroed report instead of an error when the API call fails
    pub enable_fallback: bool,
    pub use_dev_endpoint: bool,
}

impl Default for TrialBalanceOptions {
    fn default() -> Self {
        Self {
            group_by_category: true,
            include_zero_balances: false,
            category_filter: Vec::new(),
            enable_retry: true,
            enable_fallback: false,
            use_dev_endpoint: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Service for trial balance reporting
pub struct TrialBalanceService<'a> {
    client: &'a ApiClient,
    limiter: &'a RateLimiter,
    retry: RetryPolicy,
    sleeper: &'a dyn Sleeper,
}

impl<'a> TrialBalanceService<'a> {
    pub fn new(client: &'a ApiClient, limiter: &'a RateLimiter) -> Self {
        Self {
            client,
            limiter,
            retry: RetryPolicy::default(),
            sleeper: &THREAD_SLEEPER,
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_sleeper(mut self, sleeper: &'a dyn Sleeper) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Whether the range can be requested
    pub fn validate_date_range(&self, range: &DateRange) -> bool {
        range.is_valid()
    }

    /// Why the range cannot be requested, if it cannot
    pub fn date_range_validation_error(&self, range: &DateRange) -> Option<String> {
        range.validation_error().map(|e| e.to_string())
    }

    /// Generate the trial balance for one period
    pub fn generate_trial_balance(
        &self,
        range: &DateRange,
        options: &TrialBalanceOptions,
    ) -> LedgerResult<TrialBalanceData> {
        range.validate()?;
        self.limiter.check(GENERATE_KEY)?;

        let path = if options.use_dev_endpoint { DEV_PATH } else { BASE_PATH };
        let query = generate_query(range, options);
        debug!(%range, path, "generating trial balance");

        let fetched = self
            .policy(options.enable_retry)
            .execute(self.sleeper, GENERATE_KEY, || {
                self.client.get::<TrialBalanceResponseDto>(path, query.clone())
            })
            .and_then(TrialBalanceData::try_from);

        let data = match fetched {
            Ok(data) => data,
            Err(e) if options.enable_fallback => {
                warn!(error = %e, %range, "trial balance unavailable, returning an empty report");
                return Ok(TrialBalanceData::placeholder(*range));
            }
            Err(e) => return Err(e),
        };

        for problem in check_consistency(&data) {
            warn!(%range, "inconsistent trial balance: {}", problem);
        }
        info!(
            %range,
            accounts = data.account_count(),
            final_balance = %data.final_balance,
            "trial balance generated"
        );
        Ok(data)
    }

    /// Generate one report per period, tolerating some failures
    ///
    /// With fallback enabled, a batch where fewer than half of the periods
    /// succeeded is replaced by zeroed reports for every period.
    pub fn generate_for_periods(
        &self,
        ranges: &[DateRange],
        options: &TrialBalanceOptions,
        min_success_rate: f64,
    ) -> LedgerResult<PartialResults<TrialBalanceData>> {
        let per_period = TrialBalanceOptions {
            enable_fallback: false,
            ..options.clone()
        };
        let results: Vec<_> = ranges
            .iter()
            .map(|range| self.generate_trial_balance(range, &per_period))
            .collect();
        let fallback = options
            .enable_fallback
            .then(|| ranges.iter().map(|r| TrialBalanceData::placeholder(*r)).collect());
        handle_partial_failure(results, min_success_rate, fallback)
    }

    /// Ledger lines behind one account's balance
    pub fn get_account_transactions(
        &self,
        account_id: &str,
        range: &DateRange,
        pagination: Pagination,
    ) -> LedgerResult<AccountTransactions> {
        range.validate()?;
        let account_id = path_id("Account", account_id)?;
        self.limiter.check(DRILL_DOWN_KEY)?;

        let mut query = range.query_params();
        if let Some(page) = pagination.page {
            query.push(("page".into(), page.to_string()));
        }
        if let Some(page_size) = pagination.page_size {
            query.push(("pageSize".into(), page_size.to_string()));
        }

        let path = format!("{}/account/{}/transactions", BASE_PATH, account_id);
        let transactions: Vec<TransactionDetail> =
            self.retry
                .execute(self.sleeper, DRILL_DOWN_KEY, || self.client.get(&path, query.clone()))?;

        Ok(AccountTransactions {
            account_id: account_id.to_string(),
            account_name: format!("Account {}", account_id),
            total_count: transactions.len(),
            transactions,
            page_size: pagination.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            current_page: pagination.page.unwrap_or(DEFAULT_PAGE),
        })
    }

    /// Compare two non-overlapping periods; variances come from the API
    pub fn compare_trial_balances(
        &self,
        period1: &DateRange,
        period2: &DateRange,
        options: &TrialBalanceOptions,
    ) -> LedgerResult<TrialBalanceComparison> {
        period1.validate()?;
        period2.validate()?;
        if period1.overlaps(period2) {
            return Err(LedgerError::Validation(
                "Comparison periods should not overlap".into(),
            ));
        }
        self.limiter.check(COMPARE_KEY)?;

        let request = TrialBalanceCompareRequest {
            period1: DateRangeDto::from(period1),
            period2: DateRangeDto::from(period2),
            group_by_category: options.group_by_category,
            include_zero_balances: options.include_zero_balances,
        };
        let path = format!("{}/compare", BASE_PATH);

        let response: TrialBalanceComparisonResponseDto = self
            .policy(options.enable_retry)
            .execute(self.sleeper, COMPARE_KEY, || self.client.post(&path, &request))?;

        TrialBalanceComparison::try_from(response)
    }

    fn policy(&self, enable_retry: bool) -> RetryPolicy {
        if enable_retry {
            self.retry
        } else {
            RetryPolicy::none()
        }
    }
}

fn generate_query(range: &DateRange, options: &TrialBalanceOptions) -> Vec<(String, String)> {
    let mut query = range.query_params();
    query.push(("groupByCategory".into(), options.group_by_category.to_string()));
    query.push((
        "includeZeroBalances".into(),
        options.include_zero_balances.to_string(),
    ));
    for category in &options.category_filter {
        query.push(("categoryFilter".into(), category.as_str().to_string()));
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::retry::testing::RecordingSleeper;
    use crate::api::transport::testing::ScriptedTransport;
    use crate::api::transport::HttpMethod;
    use crate::api::TokenStore;
    use crate::models::Money;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        transport: Arc<ScriptedTransport>,
        client: ApiClient,
        limiter: RateLimiter,
        sleeper: RecordingSleeper,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let transport = Arc::new(ScriptedTransport::new());
            let client = ApiClient::new(
                Box::new(transport.clone()),
                TokenStore::new(dir.path().join("token")),
            );
            Self {
                _dir: dir,
                transport,
                client,
                limiter: RateLimiter::default(),
                sleeper: RecordingSleeper::new(),
            }
        }

        fn service(&self) -> TrialBalanceService<'_> {
            TrialBalanceService::new(&self.client, &self.limiter).with_sleeper(&self.sleeper)
        }
    }

    fn january() -> DateRange {
        DateRange::parse("2024-01-01", "2024-01-31").unwrap()
    }

    fn response_body() -> serde_json::Value {
        json!({
            "dateRange": {"startDate": "2024-01-01", "endDate": "2024-01-31"},
            "categories": [
                {"name": "Income", "subtotal": 1000, "accounts": [{
                    "accountId": "acc-1", "accountName": "Sales",
                    "debitAmount": 0, "creditAmount": 1000, "netBalance": 1000,
                    "transactionCount": 1
                }]},
                {"name": "Expenses", "subtotal": -100, "accounts": [{
                    "accountId": "acc-2", "accountName": "Utilities",
                    "debitAmount": -100, "creditAmount": 0, "netBalance": -100,
                    "transactionCount": 1
                }]}
            ],
            "totalDebits": 100,
            "totalCredits": 1000,
            "finalBalance": 900,
            "calculationExpression": "1000 - 100 = 900",
            "generatedAt": "2024-02-01T10:00:00Z",
            "totalTransactions": 2
        })
    }

    #[test]
    fn test_generate_builds_query_and_transforms() {
        let fx = Fixture::new();
        fx.transport.push_json(200, response_body());

        let options = TrialBalanceOptions {
            category_filter: vec![AccountCategoryType::Income, AccountCategoryType::Expenses],
            ..Default::default()
        };
        let data = fx.service().generate_trial_balance(&january(), &options).unwrap();

        assert_eq!(data.final_balance, Money::from_units(900));
        assert_eq!(data.account_count(), 2);

        let request = &fx.transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.path, "/api/trial-balance");
        assert_eq!(request.query_value("startDate"), Some("2024-01-01"));
        assert_eq!(request.query_value("endDate"), Some("2024-01-31"));
        assert_eq!(request.query_value("groupByCategory"), Some("true"));
        assert_eq!(request.query_value("includeZeroBalances"), Some("false"));
        let filters: Vec<&str> = request
            .query
            .iter()
            .filter(|(k, _)| k == "categoryFilter")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(filters, vec!["Income", "Expenses"]);
    }

    #[test]
    fn test_dev_endpoint() {
        let fx = Fixture::new();
        fx.transport.push_json(200, response_body());
        let options = TrialBalanceOptions {
            use_dev_endpoint: true,
            ..Default::default()
        };
        fx.service().generate_trial_balance(&january(), &options).unwrap();
        assert_eq!(fx.transport.requests()[0].path, "/api/dev/trial-balance");
    }

    #[test]
    fn test_invalid_range_makes_no_request() {
        let fx = Fixture::new();
        let backwards = DateRange::parse("2024-02-01", "2024-01-01").unwrap();
        let err = fx
            .service()
            .generate_trial_balance(&backwards, &TrialBalanceOptions::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Start date must not be later than end date"
        );

        let too_long = DateRange::parse("2023-01-01", "2024-01-02").unwrap();
        assert!(!fx.service().validate_date_range(&too_long));
        assert!(fx
            .service()
            .date_range_validation_error(&too_long)
            .unwrap()
            .contains("365 days"));
        assert_eq!(fx.transport.request_count(), 0);
    }

    #[test]
    fn test_server_errors_are_retried() {
        let fx = Fixture::new();
        fx.transport
            .push_status(503, "")
            .push_network_error("connection reset")
            .push_json(200, response_body());

        let data = fx
            .service()
            .generate_trial_balance(&january(), &TrialBalanceOptions::default())
            .unwrap();
        assert_eq!(data.total_transactions, 2);
        assert_eq!(fx.transport.request_count(), 3);
        assert_eq!(
            fx.sleeper.delays(),
            vec![Duration::from_millis(1000), Duration::from_millis(2000)]
        );
    }

    #[test]
    fn test_retry_disabled_tries_once() {
        let fx = Fixture::new();
        fx.transport.push_status(500, "");
        let options = TrialBalanceOptions {
            enable_retry: false,
            ..Default::default()
        };
        let err = fx.service().generate_trial_balance(&january(), &options).unwrap_err();
        assert!(matches!(err, LedgerError::Server { status: 500, .. }));
        assert_eq!(fx.transport.request_count(), 1);
    }

    #[test]
    fn test_fallback_returns_placeholder() {
        let fx = Fixture::new();
        for _ in 0..3 {
            fx.transport.push_network_error("refused");
        }
        let options = TrialBalanceOptions {
            enable_fallback: true,
            ..Default::default()
        };
        let data = fx.service().generate_trial_balance(&january(), &options).unwrap();
        assert_eq!(data.categories.len(), 5);
        assert_eq!(data.calculation_expression, "0 = 0");
        assert_eq!(data.date_range, january());
    }

    #[test]
    fn test_rate_limit_blocks_before_request() {
        let mut fx = Fixture::new();
        fx.limiter = RateLimiter::new(1, Duration::from_secs(60));
        fx.transport.push_json(200, response_body());

        let service = fx.service();
        service
            .generate_trial_balance(&january(), &TrialBalanceOptions::default())
            .unwrap();
        let err = service
            .generate_trial_balance(&january(), &TrialBalanceOptions::default())
            .unwrap_err();
        assert!(matches!(err, LedgerError::RateLimited { ref key, .. } if key == GENERATE_KEY));
        assert_eq!(fx.transport.request_count(), 1);
    }

    #[test]
    fn test_account_transactions_reshaped() {
        let fx = Fixture::new();
        fx.transport.push_json(
            200,
            json!([{
                "id": "t1", "date": "2024-01-05T00:00:00",
                "categoryDescription": "Electric Bill", "particulars": "DESCO",
                "referenceNumber": "DR-2024-01-05-000001",
                "debitAmount": -100, "creditAmount": 0, "runningBalance": -100
            }]),
        );

        let result = fx
            .service()
            .get_account_transactions(
                "acc-2",
                &january(),
                Pagination {
                    page: Some(2),
                    page_size: None,
                },
            )
            .unwrap();

        assert_eq!(result.account_name, "Account acc-2");
        assert_eq!(result.total_count, 1);
        assert_eq!(result.current_page, 2);
        assert_eq!(result.page_size, 50);
        assert_eq!(
            result.transactions[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );

        let request = &fx.transport.requests()[0];
        assert_eq!(request.path, "/api/trial-balance/account/acc-2/transactions");
        assert_eq!(request.query_value("page"), Some("2"));
        assert_eq!(request.query_value("pageSize"), None);
    }

    #[test]
    fn test_account_id_must_be_path_safe() {
        let fx = Fixture::new();
        for bad in ["", "../admin", "a/b", "id?x=1", "..", "a%2Fb"] {
            let err = fx
                .service()
                .get_account_transactions(bad, &january(), Pagination::default())
                .unwrap_err();
            assert!(err.is_validation(), "{:?} accepted", bad);
        }
        assert_eq!(fx.transport.request_count(), 0);
    }

    #[test]
    fn test_compare_rejects_overlap() {
        let fx = Fixture::new();
        let overlapping = DateRange::parse("2024-01-15", "2024-02-15").unwrap();
        let err = fx
            .service()
            .compare_trial_balances(&january(), &overlapping, &TrialBalanceOptions::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Comparison periods should not overlap"
        );
    }

    #[test]
    fn test_compare_posts_both_periods() {
        let fx = Fixture::new();
        fx.transport.push_json(
            200,
            json!({
                "period1": response_body(),
                "period2": response_body(),
                "variances": [{
                    "accountId": "acc-1", "accountName": "Sales",
                    "period1Balance": 1000, "period2Balance": 1500,
                    "absoluteChange": 500, "percentageChange": 50.0
                }]
            }),
        );

        let february = DateRange::parse("2024-02-01", "2024-02-29").unwrap();
        let comparison = fx
            .service()
            .compare_trial_balances(&january(), &february, &TrialBalanceOptions::default())
            .unwrap();
        assert_eq!(comparison.variances[0].absolute_change, Money::from_units(500));

        let request = &fx.transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path, "/api/trial-balance/compare");
        let body = request.body.as_ref().unwrap();
        assert_eq!(body["period2"]["startDate"], "2024-02-01");
        assert_eq!(body["groupByCategory"], true);
        assert_eq!(body["includeZeroBalances"], false);
    }

    #[test]
    fn test_generate_for_periods_tolerates_one_failure() {
        let fx = Fixture::new();
        fx.transport.push_json(200, response_body()).push_status(404, "");
        let ranges = [january(), DateRange::parse("2024-02-01", "2024-02-29").unwrap()];

        let out = fx
            .service()
            .generate_for_periods(&ranges, &TrialBalanceOptions::default(), 0.5)
            .unwrap();
        assert_eq!(out.values.len(), 1);
        assert_eq!(out.failed, 1);
    }
}
