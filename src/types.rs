//! Core types for the order book.
//!
//! Identifiers are newtype wrappers. Prices are exact decimals so that two orders
//! at the same price always share one level; quantities are whole units.

use rust_decimal::Decimal;

/// Caller-assigned order identifier. Unique while the order rests.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct OrderId(pub u64);

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order quantity in whole units.
pub type Quantity = u32;

/// Order side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side this order matches against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Limit order as submitted by the caller.
///
/// `quantity` is the open quantity; it only ever goes down as the order fills.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub price: Decimal,
    pub quantity: Quantity,
    pub side: Side,
    pub timestamp: u64,
}

impl Order {
    pub fn new(id: u64, price: Decimal, quantity: Quantity, side: Side, timestamp: u64) -> Self {
        Self {
            id: OrderId(id),
            price,
            quantity,
            side,
            timestamp,
        }
    }

    /// True if this order's limit crosses `resting_price` on the opposite side.
    pub fn crosses(&self, resting_price: Decimal) -> bool {
        match self.side {
            Side::Buy => self.price >= resting_price,
            Side::Sell => self.price <= resting_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_side() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn crosses_is_inclusive_at_equal_price() {
        let buy = Order::new(1, Decimal::new(1005, 1), 1, Side::Buy, 1);
        assert!(buy.crosses(Decimal::new(1005, 1)));
        assert!(buy.crosses(Decimal::from(100)));
        assert!(!buy.crosses(Decimal::from(101)));

        let sell = Order::new(2, Decimal::from(101), 1, Side::Sell, 2);
        assert!(sell.crosses(Decimal::from(101)));
        assert!(sell.crosses(Decimal::from(102)));
        assert!(!sell.crosses(Decimal::from(100)));
    }

    #[test]
    fn order_id_displays_bare_number() {
        assert_eq!(OrderId(42).to_string(), "42");
    }
}
