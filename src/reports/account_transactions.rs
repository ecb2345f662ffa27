//! Account drill-down report
//!
//! Besides the transaction table, the report recomputes the page's net
//! movement from the debit and credit columns and checks each row's running
//! balance against it.

use std::fmt;

use tracing::warn;

use crate::models::{AccountTransactions, DateRange, Money};
use crate::services::calculation::{
    breakdown, calculate, validate_signs, Calculation, CalculationLine,
};

use super::trial_balance::clip;

/// A row whose reported running balance disagrees with the recomputed one
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceMismatch {
    pub transaction_id: String,
    pub expected: Money,
    pub reported: Money,
}

impl fmt::Display for BalanceMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transaction {} shows balance {} but the columns give {}",
            self.transaction_id,
            self.reported.format_grouped(),
            self.expected.format_grouped()
        )
    }
}

#[derive(Debug, Clone)]
pub struct AccountTransactionsReport<'a> {
    pub account: &'a AccountTransactions,
    pub range: DateRange,
}

impl<'a> AccountTransactionsReport<'a> {
    pub fn new(account: &'a AccountTransactions, range: DateRange) -> Self {
        Self { account, range }
    }

    pub fn total_debits(&self) -> Money {
        self.account.transactions.iter().map(|t| t.debit_amount).sum()
    }

    pub fn total_credits(&self) -> Money {
        self.account.transactions.iter().map(|t| t.credit_amount).sum()
    }

    fn lines(&self) -> Vec<CalculationLine> {
        self.account.transactions.iter().map(CalculationLine::from).collect()
    }

    /// Net movement of the rows on this page
    pub fn calculation(&self) -> Calculation {
        calculate(&self.lines())
    }

    /// Balance carried in from earlier pages, derived from the first row
    pub fn opening_balance(&self) -> Money {
        match self.account.transactions.first() {
            Some(tx) => tx.running_balance - tx.credit_amount + tx.debit_amount,
            None => Money::zero(),
        }
    }

    /// Rows whose running balance does not follow from the opening balance
    /// and the debit and credit columns
    pub fn balance_mismatches(&self) -> Vec<BalanceMismatch> {
        let lines = self.lines();
        if !validate_signs(&lines) {
            return Vec::new();
        }

        let opening = self.opening_balance();
        let steps = breakdown(&lines).steps;
        let mut steps = steps.iter().peekable();
        let mut running = Money::zero();
        let mut mismatches = Vec::new();

        for tx in &self.account.transactions {
            while let Some(step) = steps.next_if(|s| s.transaction_id == tx.id) {
                running = step.running_total;
            }
            let expected = opening + running;
            if expected != tx.running_balance {
                warn!(
                    account = %self.account.account_id,
                    transaction = %tx.id,
                    %expected,
                    reported = %tx.running_balance,
                    "running balance disagrees with transaction amounts"
                );
                mismatches.push(BalanceMismatch {
                    transaction_id: tx.id.clone(),
                    expected,
                    reported: tx.running_balance,
                });
            }
        }

        mismatches
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Account: {}\n", self.account.account_name));
        output.push_str(&"=".repeat(100));
        output.push('\n');
        output.push_str(&format!("Period: {}\n", self.range));
        output.push_str(&format!(
            "Page {} ({} per page)\n\n",
            self.account.current_page, self.account.page_size
        ));

        if self.account.transactions.is_empty() {
            output.push_str("No transactions for this account in the period.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<12} {:<22} {:<22} {:>13} {:>13} {:>13}\n",
            "Date", "Particulars", "Reference", "Debit", "Credit", "Balance"
        ));
        output.push_str(&"-".repeat(100));
        output.push('\n');

        for tx in &self.account.transactions {
            output.push_str(&format!(
                "{:<12} {:<22} {:<22} {:>13} {:>13} {:>13}\n",
                tx.date.format("%Y-%m-%d").to_string(),
                clip(&tx.particulars, 22),
                clip(&tx.reference_number, 22),
                tx.debit_amount.format_grouped(),
                tx.credit_amount.format_grouped(),
                tx.running_balance.format_grouped()
            ));
        }

        output.push_str(&"-".repeat(100));
        output.push('\n');
        output.push_str(&format!(
            "Total Debits: {}  |  Total Credits: {}  |  Transactions: {}\n",
            self.total_debits().format_grouped(),
            self.total_credits().format_grouped(),
            self.account.total_count
        ));

        let calc = self.calculation();
        output.push_str(&format!("Calculation: {}\n", calc.expression));
        output.push_str(&format!(
            "Opening Balance: {}  |  Net Movement: {}  |  Closing Balance: {}\n",
            self.opening_balance().format_grouped(),
            calc.final_balance.format_grouped(),
            (self.opening_balance() + calc.final_balance).format_grouped()
        ));

        if !validate_signs(&self.lines()) {
            output.push_str("\nWarning: negative debit or credit amounts on this page\n");
        }
        let mismatches = self.balance_mismatches();
        if !mismatches.is_empty() {
            output.push_str("\nRunning balance warnings:\n");
            for m in &mismatches {
                output.push_str(&format!("  - {}\n", m));
            }
        }

        output
    }
}
