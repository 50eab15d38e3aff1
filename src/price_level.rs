//! One price level: a FIFO queue of resting orders at a single exact price.
//!
//! The queue is a doubly-linked list whose nodes live in a [`Slab`]. The slab key of
//! a node is its [`OrderHandle`]: it stays valid across appends and across removal of
//! any other node, so the book index can hold it and remove the order in O(1).

use rust_decimal::Decimal;
use slab::Slab;

use crate::types::{Order, OrderId, Quantity};

/// Stable position of an order inside its [`PriceLevel`].
///
/// Valid until that order is removed from the level. The level owns the order;
/// a handle only locates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OrderHandle(usize);

#[derive(Debug)]
struct Node {
    order: Order,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Result of matching against the head of a level (one per resting order touched).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fill {
    pub resting_order_id: OrderId,
    pub price: Decimal,
    pub quantity: Quantity,
    /// True if the resting order was fully filled and has left the level.
    pub resting_fully_filled: bool,
}

#[derive(Debug)]
pub struct PriceLevel {
    price: Decimal,
    total_volume: u64,
    nodes: Slab<Node>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl PriceLevel {
    pub fn new(price: Decimal) -> Self {
        Self {
            price,
            total_volume: 0,
            nodes: Slab::new(),
            head: None,
            tail: None,
        }
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Sum of open quantity over all queued orders.
    pub fn total_volume(&self) -> u64 {
        self.total_volume
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Appends `order` at the tail (lowest time priority) and returns its handle.
    pub fn add_order(&mut self, order: Order) -> OrderHandle {
        self.total_volume += u64::from(order.quantity);
        let key = self.nodes.insert(Node {
            order,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
        OrderHandle(key)
    }

    /// Unlinks the order at `handle` in O(1) and returns it with its remaining quantity.
    /// Returns `None` if the handle does not name a queued order.
    pub fn remove_order(&mut self, handle: OrderHandle) -> Option<Order> {
        let node = self.nodes.try_remove(handle.0)?;
        match node.prev {
            Some(prev) => self.nodes[prev].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.nodes[next].prev = node.prev,
            None => self.tail = node.prev,
        }
        self.total_volume -= u64::from(node.order.quantity);
        Some(node.order)
    }

    /// Oldest order at this price (next to match).
    pub fn front(&self) -> Option<&Order> {
        self.head.map(|key| &self.nodes[key].order)
    }

    pub fn get(&self, handle: OrderHandle) -> Option<&Order> {
        self.nodes.get(handle.0).map(|node| &node.order)
    }

    /// Matches up to `quantity` against the head order at this level's price.
    ///
    /// The head is removed when exhausted. Returns `None` for an empty level or a
    /// zero `quantity`.
    pub fn fill_front(&mut self, quantity: Quantity) -> Option<Fill> {
        if quantity == 0 {
            return None;
        }
        let key = self.head?;
        let node = &mut self.nodes[key];
        let fill_qty = quantity.min(node.order.quantity);
        node.order.quantity -= fill_qty;
        let resting_order_id = node.order.id;
        let exhausted = node.order.quantity == 0;
        self.total_volume -= u64::from(fill_qty);
        if exhausted {
            self.remove_order(OrderHandle(key));
        }
        Some(Fill {
            resting_order_id,
            price: self.price,
            quantity: fill_qty,
            resting_fully_filled: exhausted,
        })
    }

    /// Queued orders in time priority.
    pub fn iter(&self) -> LevelIter<'_> {
        LevelIter {
            nodes: &self.nodes,
            cursor: self.head,
        }
    }
}

/// FIFO iterator over a level's orders.
pub struct LevelIter<'a> {
    nodes: &'a Slab<Node>,
    cursor: Option<usize>,
}

impl<'a> Iterator for LevelIter<'a> {
    type Item = &'a Order;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes: &'a Slab<Node> = self.nodes;
        let node = &nodes[self.cursor?];
        self.cursor = node.next;
        Some(&node.order)
    }
}
