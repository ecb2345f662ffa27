//! Trial balance models
//!
//! The `*Dto` types mirror what `/api/trial-balance` returns; the plain types
//! are what the rest of the crate works with. Conversion parses the string
//! dates and the category names, nothing else: balances and the calculation
//! expression are taken exactly as the server computed them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::date_range::DateRange;
use super::dates::{api_date, api_datetime, format_api_date, parse_api_date, parse_api_datetime};
use super::money::Money;
use crate::error::LedgerError;

/// The five account groups of a trial balance, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccountCategoryType {
    Assets,
    Liabilities,
    Equity,
    Income,
    Expenses,
}

impl AccountCategoryType {
    pub fn all() -> &'static [Self] {
        &[
            Self::Assets,
            Self::Liabilities,
            Self::Equity,
            Self::Income,
            Self::Expenses,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assets => "Assets",
            Self::Liabilities => "Liabilities",
            Self::Equity => "Equity",
            Self::Income => "Income",
            Self::Expenses => "Expenses",
        }
    }
}

impl fmt::Display for AccountCategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountCategoryType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                LedgerError::Validation(format!(
                    "Unknown account category '{}'. Expected one of: Assets, Liabilities, Equity, Income, Expenses",
                    s
                ))
            })
    }
}

/// One account line of a trial balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    pub account_id: String,
    pub account_name: String,
    #[serde(default)]
    pub category_description: String,
    #[serde(default)]
    pub particulars: String,
    /// Negative by convention
    pub debit_amount: Money,
    /// Positive by convention
    pub credit_amount: Money,
    pub net_balance: Money,
    #[serde(default)]
    pub transaction_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCategory {
    pub name: AccountCategoryType,
    pub accounts: Vec<AccountBalance>,
    pub subtotal: Money,
}

impl AccountCategory {
    pub fn empty(name: AccountCategoryType) -> Self {
        Self {
            name,
            accounts: Vec::new(),
            subtotal: Money::zero(),
        }
    }

    /// Accounts that should appear in a report
    pub fn visible_accounts(&self, include_zero_balances: bool) -> impl Iterator<Item = &AccountBalance> {
        self.accounts
            .iter()
            .filter(move |a| include_zero_balances || !a.net_balance.is_zero())
    }
}

/// A complete trial balance for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceData {
    pub date_range: DateRange,
    pub categories: Vec<AccountCategory>,
    pub total_debits: Money,
    pub total_credits: Money,
    pub final_balance: Money,
    pub calculation_expression: String,
    #[serde(with = "api_datetime")]
    pub generated_at: DateTime<Utc>,
    pub total_transactions: u64,
}

impl TrialBalanceData {
    /// A zeroed report covering every category, used when the API is unavailable
    pub fn placeholder(date_range: DateRange) -> Self {
        Self {
            date_range,
            categories: AccountCategoryType::all()
                .iter()
                .map(|c| AccountCategory::empty(*c))
                .collect(),
            total_debits: Money::zero(),
            total_credits: Money::zero(),
            final_balance: Money::zero(),
            calculation_expression: "0 = 0".to_string(),
            generated_at: Utc::now(),
            total_transactions: 0,
        }
    }

    pub fn category(&self, name: AccountCategoryType) -> Option<&AccountCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn accounts(&self) -> impl Iterator<Item = &AccountBalance> {
        self.categories.iter().flat_map(|c| c.accounts.iter())
    }

    pub fn find_account(&self, account_id: &str) -> Option<&AccountBalance> {
        self.accounts().find(|a| a.account_id == account_id)
    }

    pub fn account_count(&self) -> usize {
        self.categories.iter().map(|c| c.accounts.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.account_count() == 0
    }
}

/// Period-over-period movement of a single account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountVariance {
    pub account_id: String,
    pub account_name: String,
    pub period1_balance: Money,
    pub period2_balance: Money,
    pub absolute_change: Money,
    #[serde(default)]
    pub percentage_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceComparison {
    pub period1: TrialBalanceData,
    pub period2: TrialBalanceData,
    pub variances: Vec<AccountVariance>,
}

/// A single ledger line behind an account balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetail {
    pub id: String,
    #[serde(with = "api_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub category_description: String,
    #[serde(default)]
    pub particulars: String,
    #[serde(default)]
    pub reference_number: String,
    pub debit_amount: Money,
    pub credit_amount: Money,
    pub running_balance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTransactions {
    pub account_id: String,
    pub account_name: String,
    pub transactions: Vec<TransactionDetail>,
    pub total_count: usize,
    pub page_size: u32,
    pub current_page: u32,
}

// Wire format

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeDto {
    pub start_date: String,
    pub end_date: String,
}

impl From<&DateRange> for DateRangeDto {
    fn from(range: &DateRange) -> Self {
        Self {
            start_date: format_api_date(range.start_date),
            end_date: format_api_date(range.end_date),
        }
    }
}

impl TryFrom<DateRangeDto> for DateRange {
    type Error = LedgerError;

    fn try_from(dto: DateRangeDto) -> Result<Self, Self::Error> {
        let parse = |raw: &str| {
            parse_api_date(raw)
                .ok_or_else(|| LedgerError::InvalidResponse(format!("invalid date '{}'", raw)))
        };
        Ok(DateRange::new(parse(&dto.start_date)?, parse(&dto.end_date)?))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCategoryDto {
    pub name: String,
    #[serde(default)]
    pub accounts: Vec<AccountBalance>,
    pub subtotal: Money,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceResponseDto {
    pub date_range: DateRangeDto,
    #[serde(default)]
    pub categories: Vec<AccountCategoryDto>,
    pub total_debits: Money,
    pub total_credits: Money,
    pub final_balance: Money,
    #[serde(default)]
    pub calculation_expression: String,
    pub generated_at: String,
    #[serde(default)]
    pub total_transactions: u64,
}

impl TryFrom<TrialBalanceResponseDto> for TrialBalanceData {
    type Error = LedgerError;

    fn try_from(dto: TrialBalanceResponseDto) -> Result<Self, Self::Error> {
        let categories = dto
            .categories
            .into_iter()
            .map(|c| {
                let name = c.name.parse::<AccountCategoryType>().map_err(|_| {
                    LedgerError::InvalidResponse(format!("unknown account category '{}'", c.name))
                })?;
                Ok(AccountCategory {
                    name,
                    accounts: c.accounts,
                    subtotal: c.subtotal,
                })
            })
            .collect::<Result<Vec<_>, LedgerError>>()?;

        let generated_at = parse_api_datetime(&dto.generated_at).ok_or_else(|| {
            LedgerError::InvalidResponse(format!("invalid timestamp '{}'", dto.generated_at))
        })?;

        Ok(Self {
            date_range: DateRange::try_from(dto.date_range)?,
            categories,
            total_debits: dto.total_debits,
            total_credits: dto.total_credits,
            final_balance: dto.final_balance,
            calculation_expression: dto.calculation_expression,
            generated_at,
            total_transactions: dto.total_transactions,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceCompareRequest {
    pub period1: DateRangeDto,
    pub period2: DateRangeDto,
    pub group_by_category: bool,
    pub include_zero_balances: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceComparisonResponseDto {
    pub period1: TrialBalanceResponseDto,
    pub period2: TrialBalanceResponseDto,
    #[serde(default)]
    pub variances: Vec<AccountVariance>,
}

impl TryFrom<TrialBalanceComparisonResponseDto> for TrialBalanceComparison {
    type Error = LedgerError;

    fn try_from(dto: TrialBalanceComparisonResponseDto) -> Result<Self, Self::Error> {
        Ok(Self {
            period1: dto.period1.try_into()?,
            period2: dto.period2.try_into()?,
            variances: dto.variances,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "dateRange": { "startDate": "2024-01-01T00:00:00", "endDate": "2024-01-31" },
        "categories": [
            {
                "name": "Income",
                "accounts": [
                    {
                        "accountId": "acc-1",
                        "accountName": "Sales Revenue",
                        "categoryName": "Income",
                        "categoryDescription": "Product sales",
                        "particulars": "January invoices",
                        "debitAmount": 0,
                        "creditAmount": 12000,
                        "netBalance": 12000,
                        "transactionCount": 2
                    }
                ],
                "subtotal": 12000
            },
            {
                "name": "Expenses",
                "accounts": [
                    {
                        "accountId": "acc-2",
                        "accountName": "Raw Materials",
                        "categoryName": "Expenses",
                        "categoryDescription": "Fabric",
                        "particulars": "Cotton",
                        "debitAmount": -2100.5,
                        "creditAmount": 0,
                        "netBalance": -2100.5,
                        "transactionCount": 2
                    }
                ],
                "subtotal": -2100.5
            }
        ],
        "totalDebits": 2100.5,
        "totalCredits": 12000,
        "finalBalance": 9899.5,
        "calculationExpression": "12000 - 2100.5 = 9899.5",
        "generatedAt": "2024-02-01T09:30:00",
        "totalTransactions": 4
    }"#;

    #[test]
    fn test_response_conversion() {
        let dto: TrialBalanceResponseDto = serde_json::from_str(RESPONSE).unwrap();
        let data = TrialBalanceData::try_from(dto).unwrap();

        assert_eq!(
            data.date_range.start_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(data.categories.len(), 2);
        assert_eq!(data.categories[0].name, AccountCategoryType::Income);
        assert_eq!(data.final_balance, Money::from_cents(989_950));
        assert_eq!(data.total_transactions, 4);
        assert_eq!(
            data.find_account("acc-2").unwrap().debit_amount,
            Money::from_cents(-210_050)
        );
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let raw = RESPONSE.replace(r#""name": "Income""#, r#""name": "Revenue""#);
        let dto: TrialBalanceResponseDto = serde_json::from_str(&raw).unwrap();
        let err = TrialBalanceData::try_from(dto).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidResponse(_)));
    }

    #[test]
    fn test_placeholder_covers_all_categories() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );
        let data = TrialBalanceData::placeholder(range);
        assert_eq!(data.categories.len(), 5);
        assert!(data.is_empty());
        assert_eq!(data.calculation_expression, "0 = 0");
        assert!(data.final_balance.is_zero());
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(
            "expenses".parse::<AccountCategoryType>().unwrap(),
            AccountCategoryType::Expenses
        );
        assert!("Revenue".parse::<AccountCategoryType>().is_err());
    }

    #[test]
    fn test_visible_accounts() {
        let mut category = AccountCategory::empty(AccountCategoryType::Assets);
        for (id, balance) in [("a", 0), ("b", 500)] {
            category.accounts.push(AccountBalance {
                account_id: id.into(),
                account_name: id.into(),
                category_description: String::new(),
                particulars: String::new(),
                debit_amount: Money::zero(),
                credit_amount: Money::from_units(balance),
                net_balance: Money::from_units(balance),
                transaction_count: 1,
            });
        }
        assert_eq!(category.visible_accounts(false).count(), 1);
        assert_eq!(category.visible_accounts(true).count(), 2);
    }

    #[test]
    fn test_comparison_response() {
        let raw = format!(
            r#"{{"period1": {r}, "period2": {r}, "variances": [
                {{"accountId": "acc-1", "accountName": "Sales Revenue",
                  "period1Balance": 12000, "period2Balance": 15000,
                  "absoluteChange": 3000, "percentageChange": 25.0}}
            ]}}"#,
            r = RESPONSE
        );
        let dto: TrialBalanceComparisonResponseDto = serde_json::from_str(&raw).unwrap();
        let comparison = TrialBalanceComparison::try_from(dto).unwrap();
        assert_eq!(comparison.variances.len(), 1);
        assert_eq!(comparison.variances[0].absolute_change, Money::from_units(3000));
        assert!((comparison.variances[0].percentage_change - 25.0).abs() < f64::EPSILON);
    }
}
