use crate::auth::ensure_is_admin;
use crate::error::ContractResult;
use crate::state::{load_open_channel, order_book_index, BUY_ORDER_BOOKS, SELL_ORDER_BOOKS};
use crate::types::{BuyOrderBook, SellOrderBook};
use crate::ContractError;
use cosmwasm_std::{ensure, DepsMut, MessageInfo, Response};
use cw_utils::nonpayable;

/// Provisions empty buy and sell books for `(base_denom, quote_denom)` on our
/// end of `channel_id`.
///
/// The counterparty contract must provision the same pair on its end for
/// orders to match there.
pub fn create_pair(
    deps: DepsMut,
    info: MessageInfo,
    channel_id: String,
    base_denom: String,
    quote_denom: String,
) -> ContractResult<Response> {
    nonpayable(&info)?;
    ensure_is_admin(deps.as_ref(), &info.sender)?;

    ensure!(
        !base_denom.is_empty() && !quote_denom.is_empty() && base_denom != quote_denom,
        ContractError::InvalidPair {
            base_denom,
            quote_denom,
        }
    );

    let channel = load_open_channel(deps.storage, &channel_id)?;
    let index = order_book_index(
        &channel.endpoint.port_id,
        &channel.endpoint.channel_id,
        &base_denom,
        &quote_denom,
    );
    ensure!(
        !BUY_ORDER_BOOKS.has(deps.storage, &index) && !SELL_ORDER_BOOKS.has(deps.storage, &index),
        ContractError::PairAlreadyExists { index }
    );

    BUY_ORDER_BOOKS.save(
        deps.storage,
        &index,
        &BuyOrderBook::new(&base_denom, &quote_denom),
    )?;
    SELL_ORDER_BOOKS.save(
        deps.storage,
        &index,
        &SellOrderBook::new(&base_denom, &quote_denom),
    )?;

    Ok(Response::new()
        .add_attribute("method", "createPair")
        .add_attribute("channel_id", channel_id)
        .add_attribute("base_denom", base_denom)
        .add_attribute("quote_denom", quote_denom)
        .add_attribute("index", index))
}
