//! Trial balance arithmetic
//!
//! Debits count as negative values and credits as positive ones. The final
//! balance is their sum, and the expression spells the sum out:
//! `"1000 - 1100 + 11000 - 1000 = 9900"`.

use tracing::{debug, warn};

use crate::models::{AccountCategoryType, Money, TransactionDetail, TrialBalanceData};

/// Values shown in an expression before it is abbreviated
pub const MAX_EXPRESSION_VALUES: usize = 10;

/// A source line; both amounts are expected to be zero or positive
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationLine {
    pub transaction_id: String,
    pub description: String,
    pub debit_amount: Money,
    pub credit_amount: Money,
}

impl From<&TransactionDetail> for CalculationLine {
    fn from(tx: &TransactionDetail) -> Self {
        let description = if tx.particulars.is_empty() {
            tx.category_description.clone()
        } else {
            tx.particulars.clone()
        };
        Self {
            transaction_id: tx.id.clone(),
            description,
            debit_amount: tx.debit_amount,
            credit_amount: tx.credit_amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub final_balance: Money,
    pub expression: String,
    /// Number of signed values that went into the sum
    pub value_count: usize,
    pub total_debits: Money,
    pub total_credits: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Debit,
    Credit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalculationStep {
    pub transaction_id: String,
    pub description: String,
    pub amount: Money,
    pub running_total: Money,
    pub kind: StepKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalculationBreakdown {
    pub steps: Vec<CalculationStep>,
    pub total_debits: Money,
    pub total_credits: Money,
    pub final_balance: Money,
}

/// Signed values in line order: a line with both sides yields the debit first
pub fn signed_values(lines: &[CalculationLine]) -> Vec<Money> {
    let mut values = Vec::with_capacity(lines.len());
    for line in lines {
        if line.debit_amount.is_positive() {
            values.push(-line.debit_amount.abs());
        }
        if line.credit_amount.is_positive() {
            values.push(line.credit_amount.abs());
        }
    }
    values
}

pub fn calculate(lines: &[CalculationLine]) -> Calculation {
    let values = signed_values(lines);
    let total_debits: Money = lines
        .iter()
        .filter(|l| l.debit_amount.is_positive())
        .map(|l| l.debit_amount)
        .sum();
    let total_credits: Money = lines
        .iter()
        .filter(|l| l.credit_amount.is_positive())
        .map(|l| l.credit_amount)
        .sum();
    let final_balance: Money = values.iter().sum();
    let expression = build_expression(&values, final_balance);

    debug!(values = values.len(), %final_balance, "calculated trial balance");

    Calculation {
        final_balance,
        expression,
        value_count: values.len(),
        total_debits,
        total_credits,
    }
}

/// Render signed values as a sum, abbreviating after ten values
pub fn build_expression(values: &[Money], final_balance: Money) -> String {
    if values.is_empty() {
        return "0 = 0".to_string();
    }

    let mut expression = String::new();
    for (i, value) in values.iter().take(MAX_EXPRESSION_VALUES).enumerate() {
        if i == 0 {
            expression.push_str(&value.format_compact());
        } else {
            let sign = if value.is_negative() { " - " } else { " + " };
            expression.push_str(sign);
            expression.push_str(&value.abs().format_compact());
        }
    }

    if values.len() > MAX_EXPRESSION_VALUES {
        expression.push_str(&format!(
            " + ... ({} more)",
            values.len() - MAX_EXPRESSION_VALUES
        ));
    }

    expression.push_str(" = ");
    expression.push_str(&final_balance.format_compact());
    expression
}

/// Step-by-step running totals, for audit output
pub fn breakdown(lines: &[CalculationLine]) -> CalculationBreakdown {
    let mut steps = Vec::new();
    let mut running_total = Money::zero();
    let mut total_debits = Money::zero();
    let mut total_credits = Money::zero();

    for line in lines {
        if line.debit_amount.is_positive() {
            let amount = -line.debit_amount.abs();
            running_total += amount;
            total_debits += line.debit_amount;
            steps.push(CalculationStep {
                transaction_id: line.transaction_id.clone(),
                description: format!("Debit: {}", line.description),
                amount,
                running_total,
                kind: StepKind::Debit,
            });
        }
        if line.credit_amount.is_positive() {
            let amount = line.credit_amount.abs();
            running_total += amount;
            total_credits += line.credit_amount;
            steps.push(CalculationStep {
                transaction_id: line.transaction_id.clone(),
                description: format!("Credit: {}", line.description),
                amount,
                running_total,
                kind: StepKind::Credit,
            });
        }
    }

    CalculationBreakdown {
        steps,
        total_debits,
        total_credits,
        final_balance: running_total,
    }
}

/// Lines must carry non-negative amounts; signs are applied during calculation
pub fn validate_signs(lines: &[CalculationLine]) -> bool {
    for line in lines {
        if line.debit_amount.is_negative() {
            warn!(id = %line.transaction_id, amount = %line.debit_amount, "debit amounts should be positive");
            return false;
        }
        if line.credit_amount.is_negative() {
            warn!(id = %line.transaction_id, amount = %line.credit_amount, "credit amounts should be positive");
            return false;
        }
    }
    true
}

/// A category subtotal as shown in the detailed breakdown of a report
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStep {
    pub category: AccountCategoryType,
    pub description: String,
    pub amount: Money,
    pub kind: StepKind,
}

/// One step per category with a non-zero subtotal, in report order
pub fn category_steps(data: &TrialBalanceData) -> Vec<CategoryStep> {
    data.categories
        .iter()
        .filter(|c| !c.subtotal.is_zero())
        .map(|c| CategoryStep {
            category: c.name,
            description: format!("{} Total", c.name),
            amount: c.subtotal,
            kind: if c.subtotal.is_negative() {
                StepKind::Debit
            } else {
                StepKind::Credit
            },
        })
        .collect()
}

/// Ways a received report disagrees with itself
#[derive(Debug, Clone, PartialEq)]
pub enum Inconsistency {
    /// `final_balance != total_credits - total_debits`
    TotalsMismatch { expected: Money, actual: Money },
    /// `final_balance != sum of category subtotals`
    SubtotalsMismatch { expected: Money, actual: Money },
}

impl std::fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TotalsMismatch { expected, actual } => write!(
                f,
                "final balance {} does not equal total credits minus total debits ({})",
                actual, expected
            ),
            Self::SubtotalsMismatch { expected, actual } => write!(
                f,
                "final balance {} does not equal the sum of category subtotals ({})",
                actual, expected
            ),
        }
    }
}

/// Compare the report's totals with each other. Nothing is corrected.
pub fn check_consistency(data: &TrialBalanceData) -> Vec<Inconsistency> {
    let mut problems = Vec::new();

    let from_totals = data.total_credits - data.total_debits.abs();
    if from_totals != data.final_balance {
        problems.push(Inconsistency::TotalsMismatch {
            expected: from_totals,
            actual: data.final_balance,
        });
    }

    let from_subtotals: Money = data.categories.iter().map(|c| c.subtotal).sum();
    if from_subtotals != data.final_balance {
        problems.push(Inconsistency::SubtotalsMismatch {
            expected: from_subtotals,
            actual: data.final_balance,
        });
    }

    problems
}
