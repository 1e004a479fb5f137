//! Payment records; refunds are a dedicated upstream action.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the customer paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash at the counter.
    Cash,
    /// Credit card.
    CreditCard,
    /// Debit card.
    DebitCard,
    /// GoPay/OVO/Dana and friends.
    DigitalWallet,
    /// Manual bank transfer.
    BankTransfer,
}

impl PaymentMethod {
    /// Wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::CreditCard => "credit_card",
            Self::DebitCard => "debit_card",
            Self::DigitalWallet => "digital_wallet",
            Self::BankTransfer => "bank_transfer",
        }
    }
}

/// Settlement status of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Awaiting settlement.
    Pending,
    /// Settled.
    Paid,
    /// Settlement failed.
    Failed,
    /// Refunded after settlement.
    Refunded,
    /// Cancelled before settlement.
    Cancelled,
}

impl PaymentStatus {
    /// Wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
            Self::Cancelled => "cancelled",
        }
    }

    /// Only settled payments can be refunded.
    #[must_use]
    pub const fn can_refund(&self) -> bool {
        matches!(self, Self::Paid)
    }
}

/// Payment record mirrored from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Backend identifier.
    pub id: String,
    /// Booking this payment settles.
    pub booking_id: String,
    #[serde(default)]
    /// Paying customer id.
    pub customer_id: String,
    /// Amount in the stated currency.
    pub amount: i64,
    /// Payment method.
    pub method: PaymentMethod,
    /// Settlement status.
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Processor transaction id.
    pub transaction_id: Option<String>,
    #[serde(default = "default_currency")]
    /// ISO currency code, IDR unless stated otherwise.
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Settlement timestamp.
    pub paid_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

fn default_currency() -> String {
    "IDR".to_owned()
}

/// Query filters for the payment list screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentFilters {
    /// Requested page.
    pub page: Option<u32>,
    /// Requested page size.
    pub limit: Option<u32>,
    /// Restrict to one booking.
    pub booking_id: Option<String>,
    /// Restrict to one customer.
    pub customer_id: Option<String>,
    /// Restrict to one status.
    pub status: Option<PaymentStatus>,
    /// Restrict to one method.
    pub method: Option<PaymentMethod>,
    /// Payments created on or after this date.
    pub start_date: Option<chrono::NaiveDate>,
    /// Payments created on or before this date.
    pub end_date: Option<chrono::NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PaymentStatus::Paid, true)]
    #[case(PaymentStatus::Pending, false)]
    #[case(PaymentStatus::Refunded, false)]
    #[case(PaymentStatus::Failed, false)]
    #[case(PaymentStatus::Cancelled, false)]
    fn only_settled_payments_are_refundable(#[case] status: PaymentStatus, #[case] ok: bool) {
        assert_eq!(status.can_refund(), ok);
    }

    #[test]
    fn currency_defaults_to_idr() {
        let json = r#"{
            "id": "p1",
            "bookingId": "b1",
            "amount": 75000,
            "method": "digital_wallet",
            "status": "paid",
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z"
        }"#;
        let payment: Payment = serde_json::from_str(json).expect("valid payment");
        assert_eq!(payment.currency, "IDR");
        assert_eq!(payment.method, PaymentMethod::DigitalWallet);
    }
}
