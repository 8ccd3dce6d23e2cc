use cosmwasm_std::{Deps, Env};

use crate::custody::bank_denom;
use crate::denom::derive_voucher_id;
use crate::error::ContractResult;
use crate::msg::{EscrowResponse, VoucherIdResponse, VoucherSupplyResponse};
use crate::state::{
    get_escrow, get_voucher_supply, load_channel, order_book_index, BUY_ORDER_BOOKS,
    DENOM_TRACES, SELL_ORDER_BOOKS,
};
use crate::types::{BuyOrderBook, ChannelInfo, DenomTrace, SellOrderBook};
use crate::ContractError;

pub(crate) fn channel(deps: Deps, channel_id: String) -> ContractResult<ChannelInfo> {
    load_channel(deps.storage, &channel_id)
}

pub(crate) fn buy_order_book(
    deps: Deps,
    channel_id: String,
    base_denom: String,
    quote_denom: String,
) -> ContractResult<BuyOrderBook> {
    let index = book_index(deps, &channel_id, &base_denom, &quote_denom)?;
    BUY_ORDER_BOOKS
        .may_load(deps.storage, &index)?
        .ok_or(ContractError::PairNotFound { index })
}

pub(crate) fn sell_order_book(
    deps: Deps,
    channel_id: String,
    base_denom: String,
    quote_denom: String,
) -> ContractResult<SellOrderBook> {
    let index = book_index(deps, &channel_id, &base_denom, &quote_denom)?;
    SELL_ORDER_BOOKS
        .may_load(deps.storage, &index)?
        .ok_or(ContractError::PairNotFound { index })
}

pub(crate) fn denom_trace(deps: Deps, voucher_id: String) -> ContractResult<Option<DenomTrace>> {
    Ok(DENOM_TRACES.may_load(deps.storage, &voucher_id)?)
}

/// The voucher a denom becomes after travelling through `port`/`channel`,
/// along with the bank denom this contract would mint it under.
pub(crate) fn voucher_id(env: Env, port: String, channel: String, denom: String) -> VoucherIdResponse {
    let voucher_id = derive_voucher_id(&port, &channel, &denom);
    VoucherIdResponse {
        bank_denom: bank_denom(&env.contract.address, &voucher_id),
        voucher_id,
    }
}

pub(crate) fn escrow(deps: Deps, channel_id: String, denom: String) -> ContractResult<EscrowResponse> {
    let channel = load_channel(deps.storage, &channel_id)?;
    Ok(EscrowResponse {
        amount: get_escrow(deps.storage, &channel.endpoint.port_id, &channel_id, &denom)?,
    })
}

pub(crate) fn voucher_supply(
    deps: Deps,
    voucher_id: String,
) -> ContractResult<VoucherSupplyResponse> {
    Ok(VoucherSupplyResponse {
        amount: get_voucher_supply(deps.storage, &voucher_id)?,
    })
}

fn book_index(
    deps: Deps,
    channel_id: &str,
    base_denom: &str,
    quote_denom: &str,
) -> ContractResult<String> {
    let channel = load_channel(deps.storage, channel_id)?;
    Ok(order_book_index(
        &channel.endpoint.port_id,
        channel_id,
        base_denom,
        quote_denom,
    ))
}
