use cosmwasm_schema::cw_serde;
use cosmwasm_std::{ensure, Uint128};

use crate::{error::ContractResult, ContractError};

#[cw_serde]
pub struct Order {
    pub id: u64,
    pub creator: String,
    pub amount: i32,
    pub price: i32,
}

impl Order {
    pub fn new(id: u64, creator: impl Into<String>, amount: i32, price: i32) -> Self {
        Order {
            id,
            creator: creator.into(),
            amount,
            price,
        }
    }

    /// Builds an order arriving from the counterparty chain. Incoming orders
    /// are never rested by the receiving side, so they carry no book id.
    pub fn incoming(creator: impl Into<String>, amount: i32, price: i32) -> Self {
        Order::new(0, creator, amount, price)
    }

    /// Quote value of the order, `amount * price`.
    pub fn value(&self) -> ContractResult<i32> {
        checked_value(self.amount, self.price)
    }
}

/// Rejects non-positive amounts and prices.
pub fn validate_amount_and_price(amount: i32, price: i32) -> ContractResult<()> {
    ensure!(amount > 0, ContractError::InvalidAmount { amount });
    ensure!(price > 0, ContractError::InvalidPrice { price });
    Ok(())
}

pub fn checked_value(amount: i32, price: i32) -> ContractResult<i32> {
    amount
        .checked_mul(price)
        .ok_or(ContractError::ProductOverflow { amount, price })
}

/// Converts a positive order quantity into a bank amount.
pub fn to_uint(amount: i32) -> ContractResult<Uint128> {
    let amount = u128::try_from(amount).map_err(|_| ContractError::InvalidAmount { amount })?;
    Ok(Uint128::new(amount))
}
