//! Status enums with integer wire codes.
//!
//! Every status crosses the service boundary as a small integer. Each enum
//! carries an explicit code per variant, converts fallibly from raw
//! integers, and serializes as its code so that persisted and transported
//! representations agree. Unknown codes never construct a value.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Lifecycle status of an order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
#[serde(into = "i32", try_from = "i32")]
pub enum OrderStatus {
    /// Order placed, fulfillment not finished.
    #[default]
    Pending = 0,
    /// Payment settled.
    Paid = 1,
    /// Handed to the carrier.
    Shipped = 2,
    /// Delivered and closed (terminal).
    Completed = 3,
    /// Cancelled (terminal).
    Cancelled = 4,
}

impl OrderStatus {
    /// Returns the integer wire code.
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Paid => "Paid",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl From<OrderStatus> for i32 {
    fn from(s: OrderStatus) -> Self {
        s.code()
    }
}

impl TryFrom<i32> for OrderStatus {
    type Error = DomainError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(OrderStatus::Pending),
            1 => Ok(OrderStatus::Paid),
            2 => Ok(OrderStatus::Shipped),
            3 => Ok(OrderStatus::Completed),
            4 => Ok(OrderStatus::Cancelled),
            _ => Err(DomainError::UnknownCode {
                field: "order_status",
                code,
            }),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Settlement status of an order's payment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
#[serde(into = "i32", try_from = "i32")]
pub enum PaymentStatus {
    /// No charge has settled yet. COD orders stay here until delivery.
    #[default]
    Pending = 0,
    /// Funds held but not captured.
    Authorized = 1,
    /// Charge captured.
    Paid = 2,
    /// Charge attempted and declined.
    Failed = 3,
    /// Captured charge returned.
    Refunded = 4,
}

impl PaymentStatus {
    /// Returns the integer wire code.
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Authorized => "Authorized",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Failed => "Failed",
            PaymentStatus::Refunded => "Refunded",
        }
    }
}

impl From<PaymentStatus> for i32 {
    fn from(s: PaymentStatus) -> Self {
        s.code()
    }
}

impl TryFrom<i32> for PaymentStatus {
    type Error = DomainError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(PaymentStatus::Pending),
            1 => Ok(PaymentStatus::Authorized),
            2 => Ok(PaymentStatus::Paid),
            3 => Ok(PaymentStatus::Failed),
            4 => Ok(PaymentStatus::Refunded),
            _ => Err(DomainError::UnknownCode {
                field: "payment_status",
                code,
            }),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Progress of an order through the logistics pipeline.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
#[serde(into = "i32", try_from = "i32")]
pub enum ShippingStatus {
    /// Not yet handed to logistics.
    #[default]
    Pending = 0,
    /// Pickup scheduled with the carrier.
    Scheduled = 1,
    /// Package moving through the carrier network.
    InTransit = 2,
    /// Package delivered.
    Delivered = 3,
}

impl ShippingStatus {
    /// Returns the integer wire code.
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingStatus::Pending => "Pending",
            ShippingStatus::Scheduled => "Scheduled",
            ShippingStatus::InTransit => "InTransit",
            ShippingStatus::Delivered => "Delivered",
        }
    }
}

impl From<ShippingStatus> for i32 {
    fn from(s: ShippingStatus) -> Self {
        s.code()
    }
}

impl TryFrom<i32> for ShippingStatus {
    type Error = DomainError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ShippingStatus::Pending),
            1 => Ok(ShippingStatus::Scheduled),
            2 => Ok(ShippingStatus::InTransit),
            3 => Ok(ShippingStatus::Delivered),
            _ => Err(DomainError::UnknownCode {
                field: "shipping_status",
                code,
            }),
        }
    }
}

impl std::fmt::Display for ShippingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the customer pays for an order.
///
/// Cash on delivery settles at the door; every other method is charged
/// up front and drives the prepaid fulfillment flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum PaymentMethod {
    /// Pay the courier on delivery.
    CashOnDelivery = 0,
    /// Card charged at placement.
    CreditCard = 1,
    /// Transfer confirmed at placement.
    BankTransfer = 2,
}

impl PaymentMethod {
    /// Returns the integer wire code.
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Returns true if payment settles on delivery rather than up front.
    pub fn is_cash_on_delivery(&self) -> bool {
        matches!(self, PaymentMethod::CashOnDelivery)
    }

    /// Returns the method name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "CashOnDelivery",
            PaymentMethod::CreditCard => "CreditCard",
            PaymentMethod::BankTransfer => "BankTransfer",
        }
    }
}

impl From<PaymentMethod> for i32 {
    fn from(m: PaymentMethod) -> Self {
        m.code()
    }
}

impl TryFrom<i32> for PaymentMethod {
    type Error = DomainError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(PaymentMethod::CashOnDelivery),
            1 => Ok(PaymentMethod::CreditCard),
            2 => Ok(PaymentMethod::BankTransfer),
            _ => Err(DomainError::UnknownCode {
                field: "payment_method",
                code,
            }),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_round_trip() {
        for code in 0..=4 {
            let status = OrderStatus::try_from(code).unwrap();
            assert_eq!(status.code(), code);
        }
        for code in 0..=4 {
            let status = PaymentStatus::try_from(code).unwrap();
            assert_eq!(status.code(), code);
        }
        for code in 0..=3 {
            let status = ShippingStatus::try_from(code).unwrap();
            assert_eq!(status.code(), code);
        }
        for code in 0..=2 {
            let method = PaymentMethod::try_from(code).unwrap();
            assert_eq!(method.code(), code);
        }
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert!(OrderStatus::try_from(5).is_err());
        assert!(PaymentStatus::try_from(-1).is_err());
        assert!(ShippingStatus::try_from(99).is_err());
        assert!(PaymentMethod::try_from(7).is_err());
    }

    #[test]
    fn statuses_serialize_as_codes() {
        let json = serde_json::to_string(&ShippingStatus::Delivered).unwrap();
        assert_eq!(json, "3");
        let back: ShippingStatus = serde_json::from_str("3").unwrap();
        assert_eq!(back, ShippingStatus::Delivered);
    }

    #[test]
    fn invalid_code_fails_deserialization() {
        let result: Result<PaymentStatus, _> = serde_json::from_str("42");
        assert!(result.is_err());
    }

    #[test]
    fn cod_detection() {
        assert!(PaymentMethod::CashOnDelivery.is_cash_on_delivery());
        assert!(!PaymentMethod::CreditCard.is_cash_on_delivery());
        assert!(!PaymentMethod::BankTransfer.is_cash_on_delivery());
    }

    #[test]
    fn defaults_are_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
        assert_eq!(ShippingStatus::default(), ShippingStatus::Pending);
    }
}
