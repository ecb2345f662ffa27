//! Period-over-period comparison report

use crate::models::{AccountVariance, TrialBalanceComparison};

use super::trial_balance::clip;

#[derive(Debug, Clone)]
pub struct ComparisonReport<'a> {
    pub comparison: &'a TrialBalanceComparison,
}

impl<'a> ComparisonReport<'a> {
    pub fn new(comparison: &'a TrialBalanceComparison) -> Self {
        Self { comparison }
    }

    /// Variances ordered by the size of the movement, largest first
    pub fn largest_movements(&self, limit: usize) -> Vec<&AccountVariance> {
        let mut variances: Vec<&AccountVariance> = self.comparison.variances.iter().collect();
        variances.sort_by(|a, b| {
            b.absolute_change
                .abs()
                .cmp(&a.absolute_change.abs())
                .then_with(|| a.account_name.cmp(&b.account_name))
        });
        variances.truncate(limit);
        variances
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let period1 = &self.comparison.period1;
        let period2 = &self.comparison.period2;
        let mut output = String::new();

        output.push_str("Trial Balance Comparison\n");
        output.push_str(&"=".repeat(90));
        output.push('\n');
        output.push_str(&format!("Period 1: {}\n", period1.date_range));
        output.push_str(&format!("Period 2: {}\n\n", period2.date_range));

        output.push_str(&format!(
            "{:<20} {:>15} {:>15}\n",
            "", "Period 1", "Period 2"
        ));
        output.push_str(&format!(
            "{:<20} {:>15} {:>15}\n",
            "Total Debits",
            period1.total_debits.format_grouped(),
            period2.total_debits.format_grouped()
        ));
        output.push_str(&format!(
            "{:<20} {:>15} {:>15}\n",
            "Total Credits",
            period1.total_credits.format_grouped(),
            period2.total_credits.format_grouped()
        ));
        output.push_str(&format!(
            "{:<20} {:>15} {:>15}\n\n",
            "Final Balance",
            period1.final_balance.format_grouped(),
            period2.final_balance.format_grouped()
        ));

        if self.comparison.variances.is_empty() {
            output.push_str("No account variances between the two periods.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<30} {:>14} {:>14} {:>14} {:>10}\n",
            "Account", "Period 1", "Period 2", "Change", "Change %"
        ));
        output.push_str(&"-".repeat(90));
        output.push('\n');

        for variance in &self.comparison.variances {
            output.push_str(&format!(
                "{:<30} {:>14} {:>14} {:>14} {:>10}\n",
                clip(&variance.account_name, 30),
                variance.period1_balance.format_grouped(),
                variance.period2_balance.format_grouped(),
                variance.absolute_change.format_grouped(),
                format_change_pct(variance.percentage_change)
            ));
        }

        output.push_str(&"-".repeat(90));
        output.push('\n');
        output.push_str(&format!(
            "{} account(s) changed\n",
            self.comparison.variances.len()
        ));

        output
    }
}

fn format_change_pct(pct: f64) -> String {
    if pct.is_finite() {
        format!("{:+.1}%", pct)
    } else {
        "n/a".to_string()
    }
}
