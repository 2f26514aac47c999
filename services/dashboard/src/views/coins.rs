//! services/dashboard/src/views/coins.rs
//!
//! The coin transaction history view controller: optional kind filter, net
//! balance, and row formatting.

use crate::client::ApiClient;
use crate::error::ClientError;
use student_lms_core::domain::{Pagination, Transaction, TransactionKind};

/// The visual tone of a transaction kind badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindTone {
    Positive,
    Negative,
    Info,
    Warn,
}

impl KindTone {
    pub fn for_kind(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Earned => KindTone::Positive,
            TransactionKind::Spent => KindTone::Negative,
            TransactionKind::Bonus => KindTone::Info,
            TransactionKind::Penalty => KindTone::Warn,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransactionRow {
    pub index: usize,
    pub kind: TransactionKind,
    pub tone: KindTone,
    pub amount_label: String,
    pub reason: String,
    pub date_label: String,
}

#[derive(Debug, Clone)]
pub struct CoinsHistoryView {
    pub filter: Option<TransactionKind>,
    pub rows: Vec<TransactionRow>,
    pub net_balance: i64,
    pub pagination_summary: Option<String>,
}

impl CoinsHistoryView {
    pub async fn load(
        client: &ApiClient,
        filter: Option<TransactionKind>,
    ) -> Result<Self, ClientError> {
        let page = client.coins_history(filter).await?;

        let net_balance = page.transactions.iter().map(|t| t.amount).sum();
        let rows = page
            .transactions
            .iter()
            .enumerate()
            .map(|(i, t)| transaction_row(i, t))
            .collect();

        Ok(Self {
            filter,
            rows,
            net_balance,
            pagination_summary: page.pagination.as_ref().map(pagination_summary),
        })
    }

    /// The empty state ("No transactions found").
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn transaction_row(index: usize, transaction: &Transaction) -> TransactionRow {
    TransactionRow {
        index: index + 1,
        kind: transaction.kind,
        tone: KindTone::for_kind(transaction.kind),
        amount_label: amount_label(transaction.amount),
        reason: transaction.reason.clone().unwrap_or_else(|| "-".to_string()),
        date_label: transaction
            .created_at
            .map(|d| d.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|| "-".to_string()),
    }
}

/// Positive amounts carry an explicit plus sign.
pub fn amount_label(amount: i64) -> String {
    if amount > 0 {
        format!("+{}", amount)
    } else {
        amount.to_string()
    }
}

fn pagination_summary(pagination: &Pagination) -> String {
    format!(
        "Showing page {} of {} ({} total transactions)",
        pagination.current, pagination.total, pagination.total_items
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;

    #[test]
    fn amount_labels_carry_the_sign() {
        assert_eq!(amount_label(12), "+12");
        assert_eq!(amount_label(-5), "-5");
        assert_eq!(amount_label(0), "0");
    }

    #[test]
    fn rows_format_reason_and_date_fallbacks() {
        let transaction = Transaction {
            id: None,
            kind: TransactionKind::Earned,
            amount: 10,
            reason: None,
            created_at: None,
        };
        let row = transaction_row(0, &transaction);
        assert_eq!(row.index, 1);
        assert_eq!(row.reason, "-");
        assert_eq!(row.date_label, "-");
        assert_eq!(row.tone, KindTone::Positive);
    }

    #[test]
    fn dates_use_the_short_month_format() {
        let transaction = Transaction {
            id: Some("t1".to_string()),
            kind: TransactionKind::Penalty,
            amount: -3,
            reason: Some("late".to_string()),
            created_at: Some(Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap()),
        };
        let row = transaction_row(4, &transaction);
        assert_eq!(row.date_label, "Jan 5, 2026");
        assert_eq!(row.index, 5);
        assert_eq!(row.amount_label, "-3");
        assert_eq!(row.tone, KindTone::Warn);
    }

    #[test]
    fn pagination_summary_line() {
        let summary = pagination_summary(&Pagination {
            current: 1,
            total: 4,
            total_items: 73,
        });
        assert_eq!(summary, "Showing page 1 of 4 (73 total transactions)");
    }
}
