//! Multi-period trial balance summary
//!
//! One line per period fetched in a batch, so trends across consecutive
//! months can be read at a glance.

use crate::api::PartialResults;
use crate::models::{Money, TrialBalanceData};

#[derive(Debug, Clone)]
pub struct PeriodSummaryReport<'a> {
    pub results: &'a PartialResults<TrialBalanceData>,
}

impl<'a> PeriodSummaryReport<'a> {
    pub fn new(results: &'a PartialResults<TrialBalanceData>) -> Self {
        Self { results }
    }

    /// Change of the final balance from the first to the last period
    pub fn net_movement(&self) -> Money {
        match (self.results.values.first(), self.results.values.last()) {
            (Some(first), Some(last)) => last.final_balance - first.final_balance,
            _ => Money::zero(),
        }
    }

    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Trial Balance by Period\n");
        output.push_str(&"=".repeat(88));
        output.push('\n');
        output.push_str(&format!(
            "{:<26} {:>15} {:>15} {:>15} {:>12}\n",
            "Period", "Debits", "Credits", "Final Balance", "Transactions"
        ));
        output.push_str(&"-".repeat(88));
        output.push('\n');

        for data in &self.results.values {
            output.push_str(&format!(
                "{:<26} {:>15} {:>15} {:>15} {:>12}\n",
                data.date_range.to_string(),
                data.total_debits.format_grouped(),
                data.total_credits.format_grouped(),
                data.final_balance.format_grouped(),
                data.total_transactions
            ));
        }

        output.push_str(&"-".repeat(88));
        output.push('\n');
        output.push_str(&format!(
            "Net movement: {}\n",
            self.net_movement().format_grouped()
        ));

        if self.results.used_fallback {
            output.push_str("Note: too many periods failed to load; showing empty placeholder reports.\n");
        } else if self.results.failed > 0 {
            output.push_str(&format!(
                "Note: {} period(s) could not be loaded and are not shown.\n",
                self.results.failed
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DateRange;
    use chrono::NaiveDate;

    fn period(month: u32, balance: i64) -> TrialBalanceData {
        let range = DateRange::month_of(NaiveDate::from_ymd_opt(2024, month, 1).unwrap());
        let mut data = TrialBalanceData::placeholder(range);
        data.final_balance = Money::from_units(balance);
        data.total_credits = Money::from_units(balance);
        data
    }

    #[test]
    fn test_rows_and_movement() {
        let results = PartialResults {
            values: vec![period(1, 1000), period(2, 2500), period(3, 4000)],
            failed: 0,
            used_fallback: false,
        };
        let report = PeriodSummaryReport::new(&results);

        assert_eq!(report.net_movement(), Money::from_units(3000));
        let text = report.format_terminal();
        assert!(text.contains("2024-02-01 to 2024-02-29"));
        assert!(text.contains("Net movement: 3,000.00"));
        assert!(!text.contains("Note:"));
    }

    #[test]
    fn test_failures_are_noted() {
        let results = PartialResults {
            values: vec![period(1, 1000), period(3, 4000)],
            failed: 1,
            used_fallback: false,
        };
        let text = PeriodSummaryReport::new(&results).format_terminal();
        assert!(text.contains("Note: 1 period(s) could not be loaded"));
    }

    #[test]
    fn test_fallback_is_noted() {
        let results = PartialResults {
            values: vec![period(1, 0)],
            failed: 2,
            used_fallback: true,
        };
        let text = PeriodSummaryReport::new(&results).format_terminal();
        assert!(text.contains("placeholder reports"));
        assert_eq!(PeriodSummaryReport::new(&results).net_movement(), Money::zero());
    }
}
