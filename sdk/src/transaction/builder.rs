//! Transaction construction via the builder pattern.
//!
//! [`TransactionBuilder`] fills in the defaults every wallet uses (0.1 VSYS
//! fee, fee scale 100, "now" in nanoseconds) so callers only spell out what
//! makes their transaction theirs. It does not sign; that happens in
//! [`super::signing`], which keeps construction testable without keys.

use chrono::Utc;

use super::{CancelLeaseTransaction, LeaseTransaction, PaymentTransaction, Transaction};
use crate::config::{DEFAULT_FEE_SCALE, DEFAULT_TX_FEE};

/// What is being built, with the variant's own fields.
#[derive(Debug, Clone)]
enum Draft {
    Payment {
        recipient: String,
        amount: u64,
        attachment: String,
    },
    Lease {
        recipient: String,
        amount: u64,
    },
    CancelLease {
        tx_id: String,
    },
}

/// Fluent builder for unsigned [`Transaction`] values.
///
/// # Usage
///
/// ```rust
/// use vsys_sdk::config::V_UNITY;
/// use vsys_sdk::transaction::TransactionBuilder;
///
/// let tx = TransactionBuilder::lease("AU6veJsmAdZT5QGQrS4yLRYi1yPw6PRJ33F", V_UNITY)
///     .timestamp(1_547_722_056_762_000_000)
///     .build();
///
/// assert_eq!(tx.header().fee, 10_000_000);
/// assert!(tx.id().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    draft: Draft,
    fee: u64,
    fee_scale: u16,
    timestamp: Option<i64>,
}

impl TransactionBuilder {
    fn new(draft: Draft) -> Self {
        Self {
            draft,
            fee: DEFAULT_TX_FEE,
            fee_scale: DEFAULT_FEE_SCALE,
            timestamp: None,
        }
    }

    /// A payment of `amount` to `recipient`, with an empty attachment.
    pub fn payment(recipient: &str, amount: u64) -> Self {
        Self::new(Draft::Payment {
            recipient: recipient.to_string(),
            amount,
            attachment: String::new(),
        })
    }

    /// A lease of `amount` to the node at `recipient`.
    pub fn lease(recipient: &str, amount: u64) -> Self {
        Self::new(Draft::Lease {
            recipient: recipient.to_string(),
            amount,
        })
    }

    /// Cancels the lease created by transaction `tx_id`.
    pub fn cancel_lease(tx_id: &str) -> Self {
        Self::new(Draft::CancelLease {
            tx_id: tx_id.to_string(),
        })
    }

    pub fn fee(mut self, fee: u64) -> Self {
        self.fee = fee;
        self
    }

    pub fn fee_scale(mut self, fee_scale: u16) -> Self {
        self.fee_scale = fee_scale;
        self
    }

    /// Sets the timestamp explicitly, in **nanoseconds** since the epoch.
    ///
    /// If not called, `build()` uses the current UTC time.
    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Base58-encoded attachment. Only payments carry one; other drafts
    /// ignore it.
    pub fn attachment(mut self, base58: &str) -> Self {
        if let Draft::Payment { attachment, .. } = &mut self.draft {
            *attachment = base58.to_string();
        }
        self
    }

    /// Consumes the builder and produces an unsigned [`Transaction`].
    pub fn build(self) -> Transaction {
        let timestamp = self.timestamp.unwrap_or_else(now_nanos);

        match self.draft {
            Draft::Payment {
                recipient,
                amount,
                attachment,
            } => {
                let mut tx =
                    PaymentTransaction::new(&recipient, amount, self.fee, self.fee_scale, timestamp);
                tx.attachment = Some(attachment);
                tx.into()
            }
            Draft::Lease { recipient, amount } => {
                LeaseTransaction::new(&recipient, amount, self.fee, self.fee_scale, timestamp)
                    .into()
            }
            Draft::CancelLease { tx_id } => {
                CancelLeaseTransaction::new(&tx_id, self.fee, self.fee_scale, timestamp).into()
            }
        }
    }
}

/// Current UTC time in nanoseconds, at millisecond precision like every
/// other wallet.
fn now_nanos() -> i64 {
    Utc::now().timestamp_millis().saturating_mul(1_000_000)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionType;

    const RECIPIENT: &str = "AU6veJsmAdZT5QGQrS4yLRYi1yPw6PRJ33F";

    #[test]
    fn defaults_are_applied() {
        let tx = TransactionBuilder::lease(RECIPIENT, 1).timestamp(1).build();
        assert_eq!(tx.header().fee, DEFAULT_TX_FEE);
        assert_eq!(tx.header().fee_scale, DEFAULT_FEE_SCALE);
        assert_eq!(tx.tx_type(), Some(TransactionType::Lease));
    }

    #[test]
    fn overrides_are_applied() {
        let tx = TransactionBuilder::payment(RECIPIENT, 1)
            .fee(20_000_000)
            .fee_scale(50)
            .timestamp(99)
            .attachment("3yZe7d")
            .build();
        let Transaction::Payment(payment) = tx else {
            panic!("expected a payment");
        };
        assert_eq!(payment.header.fee, 20_000_000);
        assert_eq!(payment.header.fee_scale, 50);
        assert_eq!(payment.header.timestamp, 99);
        assert_eq!(payment.attachment.as_deref(), Some("3yZe7d"));
    }

    #[test]
    fn payment_defaults_to_empty_attachment() {
        let Transaction::Payment(payment) = TransactionBuilder::payment(RECIPIENT, 1).build() else {
            panic!("expected a payment");
        };
        assert_eq!(payment.attachment.as_deref(), Some(""));
    }

    #[test]
    fn builder_produces_deterministic_id() {
        let build = || {
            TransactionBuilder::cancel_lease("3yZe7d")
                .timestamp(1_700_000_000_000_000_000)
                .build()
        };
        assert_eq!(build().id().unwrap(), build().id().unwrap());
    }

    #[test]
    fn builder_uses_current_time_if_not_set() {
        let before = Utc::now().timestamp_millis() * 1_000_000;
        let tx = TransactionBuilder::lease(RECIPIENT, 1).build();
        let after = Utc::now().timestamp_millis() * 1_000_000;
        let ts = tx.header().timestamp;
        assert!(ts >= before && ts <= after);
    }

    #[test]
    fn attachment_is_ignored_for_leases() {
        let a = TransactionBuilder::lease(RECIPIENT, 1).timestamp(1).build();
        let b = TransactionBuilder::lease(RECIPIENT, 1)
            .timestamp(1)
            .attachment("3yZe7d")
            .build();
        assert_eq!(a, b);
    }
}
