use cosmwasm_schema::cw_serde;

use crate::{error::ContractResult, ContractError};

use super::{checked_value, OrderBook, Ordering, Order};

/// Outcome of matching one incoming order against a resting book.
#[cw_serde]
pub struct Fill {
    /// The incoming order with its amount reduced by everything consumed.
    pub remaining: Order,
    /// Resting order fragments in the order they were consumed. Each carries
    /// the resting creator, the consumed amount and the resting price.
    pub liquidated: Vec<Order>,
    /// Gain (quote) for a sell fill, purchase (base) for a buy fill.
    pub gain: i32,
    pub filled: bool,
}

impl Fill {
    fn unmatched(order: Order) -> Self {
        Fill {
            remaining: order,
            liquidated: vec![],
            gain: 0,
            filled: false,
        }
    }
}

/// Resting bids for a `(base, quote)` market. The top holds the highest bid.
#[cw_serde]
pub struct BuyOrderBook {
    pub base_denom: String,
    pub quote_denom: String,
    pub book: OrderBook,
}

impl BuyOrderBook {
    pub fn new(base_denom: impl Into<String>, quote_denom: impl Into<String>) -> Self {
        BuyOrderBook {
            base_denom: base_denom.into(),
            quote_denom: quote_denom.into(),
            book: OrderBook::new(),
        }
    }

    pub fn append_order(&mut self, creator: &str, amount: i32, price: i32) -> ContractResult<u64> {
        self.book
            .append_order(creator, amount, price, Ordering::Increasing)
    }

    /// Matches an incoming sell order against the resting bids, consuming as
    /// many bids as the order's ask price allows.
    ///
    /// The book is only modified when the whole fill succeeds.
    pub fn fill_sell_order(&mut self, order: Order) -> ContractResult<Fill> {
        let mut book = self.book.clone();
        let mut fill = Fill::unmatched(order);

        while let Some((liquidation, gain)) =
            liquidate_from_sell_order(&mut book, &mut fill.remaining)?
        {
            fill.gain = fill
                .gain
                .checked_add(gain)
                .ok_or(ContractError::ProductOverflow {
                    amount: liquidation.amount,
                    price: liquidation.price,
                })?;
            fill.liquidated.push(liquidation);

            if fill.remaining.amount == 0 {
                fill.filled = true;
                break;
            }
        }

        self.book = book;
        Ok(fill)
    }
}

/// Consumes liquidity from the highest bid for `order`.
///
/// Returns the liquidated fragment and the quote gained, or `None` when the
/// book is empty or the highest bid is below the ask.
fn liquidate_from_sell_order(
    book: &mut OrderBook,
    order: &mut Order,
) -> ContractResult<Option<(Order, i32)>> {
    let Some(highest_bid) = book.top_mut() else {
        return Ok(None);
    };
    if order.price > highest_bid.price {
        return Ok(None);
    }

    let consumed = order.amount.min(highest_bid.amount);
    let gain = checked_value(consumed, highest_bid.price)?;
    let liquidation = Order::new(
        highest_bid.id,
        highest_bid.creator.clone(),
        consumed,
        highest_bid.price,
    );

    highest_bid.amount -= consumed;
    order.amount -= consumed;
    if highest_bid.amount == 0 {
        book.pop_top();
    }

    Ok(Some((liquidation, gain)))
}

/// Resting asks for a `(base, quote)` market. The top holds the lowest ask.
#[cw_serde]
pub struct SellOrderBook {
    pub base_denom: String,
    pub quote_denom: String,
    pub book: OrderBook,
}

impl SellOrderBook {
    pub fn new(base_denom: impl Into<String>, quote_denom: impl Into<String>) -> Self {
        SellOrderBook {
            base_denom: base_denom.into(),
            quote_denom: quote_denom.into(),
            book: OrderBook::new(),
        }
    }

    pub fn append_order(&mut self, creator: &str, amount: i32, price: i32) -> ContractResult<u64> {
        self.book
            .append_order(creator, amount, price, Ordering::Decreasing)
    }

    /// Matches an incoming buy order against the resting asks. The returned
    /// gain is the base amount purchased.
    ///
    /// The book is only modified when the whole fill succeeds.
    pub fn fill_buy_order(&mut self, order: Order) -> ContractResult<Fill> {
        let mut book = self.book.clone();
        let mut fill = Fill::unmatched(order);

        while let Some(liquidation) = liquidate_from_buy_order(&mut book, &mut fill.remaining) {
            // The purchase can never exceed the incoming amount, which is an i32.
            fill.gain += liquidation.amount;
            fill.liquidated.push(liquidation);

            if fill.remaining.amount == 0 {
                fill.filled = true;
                break;
            }
        }

        // Sellers are paid `amount * price` in quote; reject fills whose payouts
        // cannot be represented before anything is committed.
        for liquidation in &fill.liquidated {
            liquidation.value()?;
        }

        self.book = book;
        Ok(fill)
    }
}

/// Consumes liquidity from the lowest ask for `order`, or returns `None` when
/// the book is empty or the lowest ask is above the bid.
fn liquidate_from_buy_order(book: &mut OrderBook, order: &mut Order) -> Option<Order> {
    let lowest_ask = book.top_mut()?;
    if order.price < lowest_ask.price {
        return None;
    }

    let consumed = order.amount.min(lowest_ask.amount);
    let liquidation = Order::new(
        lowest_ask.id,
        lowest_ask.creator.clone(),
        consumed,
        lowest_ask.price,
    );

    lowest_ask.amount -= consumed;
    order.amount -= consumed;
    if lowest_ask.amount == 0 {
        book.pop_top();
    }

    Some(liquidation)
}
