use crate::error::ContractResult;
use crate::types::{BuyOrderBook, ChannelInfo, Config, DenomTrace, SellOrderBook};
use crate::ContractError;
use cosmwasm_std::{ensure, Storage, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<Config> = Item::new("config");

/// Key: local channel id
pub const CHANNEL_INFO: Map<&str, ChannelInfo> = Map::new("channel_info");

/// Key: order book index, see `order_book_index`
pub const BUY_ORDER_BOOKS: Map<&str, BuyOrderBook> = Map::new("buy_order_books");
pub const SELL_ORDER_BOOKS: Map<&str, SellOrderBook> = Map::new("sell_order_books");

/// Key: voucher id
pub const DENOM_TRACES: Map<&str, DenomTrace> = Map::new("denom_traces");

/// Native funds held in escrow. Key: (port, channel, denom)
pub const ESCROW: Map<(&str, &str, &str), Uint128> = Map::new("escrow");

/// Outstanding supply of vouchers minted by this contract. Key: voucher id
pub const VOUCHER_SUPPLY: Map<&str, Uint128> = Map::new("voucher_supply");

/// Deterministic key of the buy and sell books for a market on a channel.
pub fn order_book_index(port: &str, channel: &str, base_denom: &str, quote_denom: &str) -> String {
    format!("{port}-{channel}-{base_denom}-{quote_denom}")
}

pub fn load_channel(storage: &dyn Storage, channel_id: &str) -> ContractResult<ChannelInfo> {
    CHANNEL_INFO
        .may_load(storage, channel_id)?
        .ok_or(ContractError::ChannelNotFound {
            channel_id: channel_id.to_string(),
        })
}

/// Loads a channel that can still carry new orders.
pub fn load_open_channel(storage: &dyn Storage, channel_id: &str) -> ContractResult<ChannelInfo> {
    let channel = load_channel(storage, channel_id)?;
    ensure!(
        channel.open,
        ContractError::ChannelClosed {
            channel_id: channel_id.to_string(),
        }
    );
    Ok(channel)
}

/// Gets the escrowed balance of a native denom for a channel.
///
/// Defaults to 0 for empty values.
pub fn get_escrow(
    storage: &dyn Storage,
    port: &str,
    channel: &str,
    denom: &str,
) -> ContractResult<Uint128> {
    Ok(ESCROW
        .may_load(storage, (port, channel, denom))?
        .unwrap_or_default())
}

/// Gets the outstanding minted supply of a voucher.
///
/// Defaults to 0 for empty values.
pub fn get_voucher_supply(storage: &dyn Storage, voucher_id: &str) -> ContractResult<Uint128> {
    Ok(VOUCHER_SUPPLY
        .may_load(storage, voucher_id)?
        .unwrap_or_default())
}
