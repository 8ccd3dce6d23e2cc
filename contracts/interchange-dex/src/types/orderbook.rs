use cosmwasm_schema::cw_serde;

use crate::{error::ContractResult, ContractError};

use super::{validate_amount_and_price, Order};

/// Sort direction of a book. The top of the book is always the last element,
/// so `Increasing` keeps the highest price on top and `Decreasing` the lowest.
#[cw_serde]
#[derive(Copy)]
pub enum Ordering {
    Increasing,
    Decreasing,
}

#[cw_serde]
#[derive(Default)]
pub struct OrderBook {
    /// Next id to hand out. Ids are never reused, even after removal.
    pub id_count: u64,
    pub orders: Vec<Order>,
}

impl OrderBook {
    pub fn new() -> Self {
        OrderBook::default()
    }

    /// Inserts a new order and returns its id.
    ///
    /// Orders at the same price keep insertion order: the new order lands
    /// below every resting order of equal price, so the oldest one stays
    /// closest to the top.
    pub(crate) fn append_order(
        &mut self,
        creator: &str,
        amount: i32,
        price: i32,
        ordering: Ordering,
    ) -> ContractResult<u64> {
        validate_amount_and_price(amount, price)?;

        let id = self.id_count;
        self.id_count += 1;

        let position = match ordering {
            Ordering::Increasing => self.orders.partition_point(|o| o.price < price),
            Ordering::Decreasing => self.orders.partition_point(|o| o.price > price),
        };
        self.orders
            .insert(position, Order::new(id, creator, amount, price));

        Ok(id)
    }

    pub fn get_order(&self, order_id: u64) -> ContractResult<&Order> {
        self.orders
            .iter()
            .find(|o| o.id == order_id)
            .ok_or(ContractError::OrderNotFound { order_id })
    }

    pub fn remove_order(&mut self, order_id: u64) -> ContractResult<Order> {
        let position = self
            .orders
            .iter()
            .position(|o| o.id == order_id)
            .ok_or(ContractError::OrderNotFound { order_id })?;
        Ok(self.orders.remove(position))
    }

    #[inline]
    pub fn top(&self) -> Option<&Order> {
        self.orders.last()
    }

    #[inline]
    pub(crate) fn top_mut(&mut self) -> Option<&mut Order> {
        self.orders.last_mut()
    }

    #[inline]
    pub(crate) fn pop_top(&mut self) -> Option<Order> {
        self.orders.pop()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Sum of resting amounts. Widened so large books cannot overflow.
    pub fn total_amount(&self) -> i64 {
        self.orders.iter().map(|o| i64::from(o.amount)).sum()
    }
}
