//! Rejection reasons for order submission.
//!
//! Validation runs before the book is touched, so a rejected order leaves no trace.
//! Cancelling an unknown id is not an error and has no variant here.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::OrderId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("order {order_id}: price must be positive, got {price}")]
    InvalidPrice { order_id: OrderId, price: Decimal },

    #[error("order {order_id}: quantity must be positive")]
    InvalidQuantity { order_id: OrderId },

    #[error("order {order_id} is already resting on the book")]
    DuplicateOrderId { order_id: OrderId },
}

impl OrderError {
    pub fn order_id(&self) -> OrderId {
        match self {
            OrderError::InvalidPrice { order_id, .. }
            | OrderError::InvalidQuantity { order_id }
            | OrderError::DuplicateOrderId { order_id } => *order_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_order() {
        let err = OrderError::InvalidPrice {
            order_id: OrderId(7),
            price: Decimal::from(-1),
        };
        assert_eq!(err.to_string(), "order 7: price must be positive, got -1");
        assert_eq!(err.order_id(), OrderId(7));

        let err = OrderError::DuplicateOrderId { order_id: OrderId(3) };
        assert!(err.to_string().contains("already resting"));
    }
}
