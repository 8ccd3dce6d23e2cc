use crate::custody;
use crate::denom::save_voucher_trace;
use crate::error::ContractResult;
use crate::state::{
    load_channel, load_open_channel, order_book_index, BUY_ORDER_BOOKS, CONFIG, SELL_ORDER_BOOKS,
};
use crate::types::{
    checked_value, to_uint, validate_amount_and_price, BuyOrderPacketData, DexPacketData,
    SellOrderPacketData,
};
use crate::ContractError;
use cosmwasm_std::{
    ensure, ensure_eq, to_json_binary, DepsMut, Env, IbcMsg, IbcTimeout, MessageInfo, Response,
    Storage,
};
use cw_utils::nonpayable;

/// Takes custody of `amount` of base and sends a sell order to the
/// counterparty chain, where it is matched against resting bids.
#[allow(clippy::too_many_arguments)]
pub fn send_sell_order(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    channel_id: String,
    base_denom: String,
    quote_denom: String,
    amount: i32,
    price: i32,
    timeout_seconds: Option<u64>,
) -> ContractResult<Response> {
    validate_amount_and_price(amount, price)?;

    let channel = load_open_channel(deps.storage, &channel_id)?;
    let port = &channel.endpoint.port_id;

    // Ensure the pair exists on this side
    let index = order_book_index(port, &channel_id, &base_denom, &quote_denom);
    ensure!(
        SELL_ORDER_BOOKS.has(deps.storage, &index),
        ContractError::PairNotFound { index }
    );

    // Burn vouchers or escrow native tokens
    let custody_msgs = custody::debit(
        deps.storage,
        &env.contract.address,
        &info,
        port,
        &channel_id,
        &base_denom,
        to_uint(amount)?,
    )?;

    // Remember the voucher the counterparty will issue for the offered denom
    save_voucher_trace(deps.storage, port, &channel_id, &base_denom)?;

    let packet = DexPacketData::SellOrder(SellOrderPacketData {
        base_denom: base_denom.clone(),
        amount,
        quote_denom: quote_denom.clone(),
        price,
        seller: info.sender.to_string(),
    });
    let send = IbcMsg::SendPacket {
        channel_id: channel_id.clone(),
        data: to_json_binary(&packet)?,
        timeout: packet_timeout(deps.storage, &env, timeout_seconds)?,
    };

    Ok(Response::new()
        .add_messages(custody_msgs)
        .add_message(send)
        .add_attribute("method", "sendSellOrder")
        .add_attribute("seller", info.sender)
        .add_attribute("channel_id", channel_id)
        .add_attribute("base_denom", base_denom)
        .add_attribute("quote_denom", quote_denom)
        .add_attribute("amount", amount.to_string())
        .add_attribute("price", price.to_string()))
}

/// Takes custody of `amount * price` of quote and sends a buy order to the
/// counterparty chain, where it is matched against resting asks.
#[allow(clippy::too_many_arguments)]
pub fn send_buy_order(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    channel_id: String,
    base_denom: String,
    quote_denom: String,
    amount: i32,
    price: i32,
    timeout_seconds: Option<u64>,
) -> ContractResult<Response> {
    validate_amount_and_price(amount, price)?;
    let value = checked_value(amount, price)?;

    let channel = load_open_channel(deps.storage, &channel_id)?;
    let port = &channel.endpoint.port_id;

    // Ensure the pair exists on this side
    let index = order_book_index(port, &channel_id, &base_denom, &quote_denom);
    ensure!(
        BUY_ORDER_BOOKS.has(deps.storage, &index),
        ContractError::PairNotFound { index }
    );

    // Burn vouchers or escrow native tokens
    let custody_msgs = custody::debit(
        deps.storage,
        &env.contract.address,
        &info,
        port,
        &channel_id,
        &quote_denom,
        to_uint(value)?,
    )?;

    // Remember the voucher the counterparty will issue for the offered denom
    save_voucher_trace(deps.storage, port, &channel_id, &quote_denom)?;

    let packet = DexPacketData::BuyOrder(BuyOrderPacketData {
        base_denom: base_denom.clone(),
        amount,
        quote_denom: quote_denom.clone(),
        price,
        buyer: info.sender.to_string(),
    });
    let send = IbcMsg::SendPacket {
        channel_id: channel_id.clone(),
        data: to_json_binary(&packet)?,
        timeout: packet_timeout(deps.storage, &env, timeout_seconds)?,
    };

    Ok(Response::new()
        .add_messages(custody_msgs)
        .add_message(send)
        .add_attribute("method", "sendBuyOrder")
        .add_attribute("buyer", info.sender)
        .add_attribute("channel_id", channel_id)
        .add_attribute("base_denom", base_denom)
        .add_attribute("quote_denom", quote_denom)
        .add_attribute("amount", amount.to_string())
        .add_attribute("price", price.to_string()))
}

/// Removes a resting sell order and refunds its base amount to the creator.
pub fn cancel_sell_order(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    channel_id: String,
    base_denom: String,
    quote_denom: String,
    order_id: u64,
) -> ContractResult<Response> {
    nonpayable(&info)?;

    // Closed channels still allow cancellation
    let channel = load_channel(deps.storage, &channel_id)?;
    let port = &channel.endpoint.port_id;

    let index = order_book_index(port, &channel_id, &base_denom, &quote_denom);
    let mut book = SELL_ORDER_BOOKS
        .may_load(deps.storage, &index)?
        .ok_or(ContractError::PairNotFound {
            index: index.clone(),
        })?;

    // Check for the order, error if not found
    let order = book.book.get_order(order_id)?.clone();

    // Ensure the sender is the order creator
    ensure_eq!(
        info.sender.as_str(),
        order.creator,
        ContractError::Unauthorized {}
    );

    book.book.remove_order(order_id)?;
    SELL_ORDER_BOOKS.save(deps.storage, &index, &book)?;

    // Refund the escrowed base
    let refund_msgs = custody::credit(
        deps.storage,
        &env.contract.address,
        port,
        &channel_id,
        &info.sender,
        &base_denom,
        to_uint(order.amount)?,
    )?;

    Ok(Response::new()
        .add_messages(refund_msgs)
        .add_attribute("method", "cancelSellOrder")
        .add_attribute("owner", info.sender)
        .add_attribute("index", index)
        .add_attribute("order_id", order_id.to_string())
        .add_attribute("refund", order.amount.to_string()))
}

/// Removes a resting buy order and refunds its `amount * price` of quote to
/// the creator.
pub fn cancel_buy_order(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    channel_id: String,
    base_denom: String,
    quote_denom: String,
    order_id: u64,
) -> ContractResult<Response> {
    nonpayable(&info)?;

    // Closed channels still allow cancellation
    let channel = load_channel(deps.storage, &channel_id)?;
    let port = &channel.endpoint.port_id;

    let index = order_book_index(port, &channel_id, &base_denom, &quote_denom);
    let mut book = BUY_ORDER_BOOKS
        .may_load(deps.storage, &index)?
        .ok_or(ContractError::PairNotFound {
            index: index.clone(),
        })?;

    // Check for the order, error if not found
    let order = book.book.get_order(order_id)?.clone();

    // Ensure the sender is the order creator
    ensure_eq!(
        info.sender.as_str(),
        order.creator,
        ContractError::Unauthorized {}
    );

    book.book.remove_order(order_id)?;
    BUY_ORDER_BOOKS.save(deps.storage, &index, &book)?;

    // Refund the escrowed quote
    let refund = order.value()?;
    let refund_msgs = custody::credit(
        deps.storage,
        &env.contract.address,
        port,
        &channel_id,
        &info.sender,
        &quote_denom,
        to_uint(refund)?,
    )?;

    Ok(Response::new()
        .add_messages(refund_msgs)
        .add_attribute("method", "cancelBuyOrder")
        .add_attribute("owner", info.sender)
        .add_attribute("index", index)
        .add_attribute("order_id", order_id.to_string())
        .add_attribute("refund", refund.to_string()))
}

fn packet_timeout(
    storage: &dyn Storage,
    env: &Env,
    timeout_seconds: Option<u64>,
) -> ContractResult<IbcTimeout> {
    let seconds = match timeout_seconds {
        Some(seconds) => seconds,
        None => CONFIG.load(storage)?.default_timeout_seconds,
    };
    Ok(IbcTimeout::with_timestamp(env.block.time.plus_seconds(seconds)))
}
