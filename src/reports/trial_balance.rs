//! Trial balance report
//!
//! Terminal rendering of a fetched trial balance: accounts grouped by
//! category with subtotals, the totals block, the calculation expression and
//! a step-by-step breakdown of the non-zero category subtotals.

use crate::models::{Money, TrialBalanceData};
use crate::services::calculation::{category_steps, check_consistency, Inconsistency, StepKind};

const WIDTH: usize = 96;

/// A trial balance prepared for display
#[derive(Debug, Clone)]
pub struct TrialBalanceReport<'a> {
    pub data: &'a TrialBalanceData,
    pub include_zero_balances: bool,
    pub inconsistencies: Vec<Inconsistency>,
}

/// One line of the detailed breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownLine {
    pub description: String,
    pub amount: Money,
    pub running_total: Money,
    pub kind: StepKind,
}

impl<'a> TrialBalanceReport<'a> {
    pub fn new(data: &'a TrialBalanceData, include_zero_balances: bool) -> Self {
        Self {
            data,
            include_zero_balances,
            inconsistencies: check_consistency(data),
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.inconsistencies.is_empty()
    }

    /// Category subtotals in report order with a running total
    pub fn breakdown(&self) -> Vec<BreakdownLine> {
        let mut running_total = Money::zero();
        category_steps(self.data)
            .into_iter()
            .map(|step| {
                running_total += step.amount;
                BreakdownLine {
                    description: step.description,
                    amount: step.amount,
                    running_total,
                    kind: step.kind,
                }
            })
            .collect()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let data = self.data;
        let mut output = String::new();

        output.push_str("Trial Balance\n");
        output.push_str(&"=".repeat(WIDTH));
        output.push('\n');
        output.push_str(&format!("Period:    {}\n", data.date_range));
        output.push_str(&format!(
            "Generated: {}\n\n",
            data.generated_at.format("%Y-%m-%d %H:%M:%S")
        ));

        if data.is_empty() {
            output.push_str("No accounts with activity in this period.\n\n");
        } else {
            output.push_str(&format!(
                "{:<32} {:<24} {:>12} {:>12} {:>12}\n",
                "Account", "Particulars", "Debit", "Credit", "Balance"
            ));
            output.push_str(&"-".repeat(WIDTH));
            output.push('\n');

            for category in &data.categories {
                let accounts: Vec<_> = category.visible_accounts(self.include_zero_balances).collect();
                if accounts.is_empty() && category.subtotal.is_zero() {
                    continue;
                }

                output.push_str(&format!("\n{}\n", category.name.as_str().to_uppercase()));
                for account in accounts {
                    output.push_str(&format!(
                        "  {:<30} {:<24} {:>12} {:>12} {:>12}\n",
                        clip(&account.account_name, 30),
                        clip(&account.particulars, 24),
                        account.debit_amount.format_grouped(),
                        account.credit_amount.format_grouped(),
                        account.net_balance.format_grouped()
                    ));
                }
                output.push_str(&format!(
                    "  {:<30} {:<24} {:>12} {:>12} {:>12}\n",
                    "Subtotal:",
                    "",
                    "",
                    "",
                    category.subtotal.format_grouped()
                ));
            }
            output.push('\n');
        }

        output.push_str(&"-".repeat(WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "Total Debits:       {:>15}\n",
            data.total_debits.format_grouped()
        ));
        output.push_str(&format!(
            "Total Credits:      {:>15}\n",
            data.total_credits.format_grouped()
        ));
        output.push_str(&format!(
            "Final Balance:      {:>15}\n",
            data.final_balance.format_grouped()
        ));
        output.push_str(&format!("Transactions:       {:>15}\n", data.total_transactions));
        output.push('\n');
        output.push_str(&format!("Calculation: {}\n", data.calculation_expression));

        for problem in &self.inconsistencies {
            output.push_str(&format!("Warning: {}\n", problem));
        }

        output
    }

    /// Format the detailed breakdown of category subtotals
    pub fn format_breakdown(&self) -> String {
        let lines = self.breakdown();
        let mut output = String::new();

        output.push_str("Detailed Breakdown\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');

        if lines.is_empty() {
            output.push_str("All category subtotals are zero.\n");
            return output;
        }

        for (i, line) in lines.iter().enumerate() {
            let side = match line.kind {
                StepKind::Debit => "Dr",
                StepKind::Credit => "Cr",
            };
            output.push_str(&format!(
                "{:>2}. {:<24} {} {:>14}  = {:>14}\n",
                i + 1,
                line.description,
                side,
                line.amount.format_grouped(),
                line.running_total.format_grouped()
            ));
        }

        output
    }
}

/// Shorten to `max` characters, ending in "..." when cut
pub(crate) fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
