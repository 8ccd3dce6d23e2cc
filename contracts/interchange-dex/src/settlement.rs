use cosmwasm_std::{
    ensure, from_json, Addr, Binary, CosmosMsg, DepsMut, IbcBasicResponse, IbcEndpoint, IbcPacket,
    IbcReceiveResponse, Storage, Uint128,
};

use crate::custody;
use crate::denom::{record_resolved_denom, resolve_payout_denom};
use crate::error::ContractResult;
use crate::state::{order_book_index, BUY_ORDER_BOOKS, SELL_ORDER_BOOKS};
use crate::types::{
    checked_value, to_uint, BuyOrderPacketAck, BuyOrderPacketData, DexAck, DexPacketData, Order,
    ResolvedDenom, SellOrderPacketAck, SellOrderPacketData,
};
use crate::ContractError;

pub(crate) fn decode_packet(data: &Binary) -> ContractResult<DexPacketData> {
    from_json(data).map_err(|err| ContractError::InvalidPacket {
        reason: err.to_string(),
    })
}

// -- Receive --

/// Matches a trade intent received from the counterparty against the local
/// book of the opposite side and pays the owners of the consumed orders.
///
/// Every check runs before the first write, so an error here leaves state
/// untouched and can safely be turned into an error acknowledgement.
pub(crate) fn on_recv_packet(
    deps: DepsMut,
    contract: &Addr,
    packet: &IbcPacket,
) -> ContractResult<IbcReceiveResponse> {
    match decode_packet(&packet.data)? {
        DexPacketData::SellOrder(data) => on_recv_sell_order(deps, contract, packet, data),
        DexPacketData::BuyOrder(data) => on_recv_buy_order(deps, contract, packet, data),
    }
}

fn on_recv_sell_order(
    deps: DepsMut,
    contract: &Addr,
    packet: &IbcPacket,
    data: SellOrderPacketData,
) -> ContractResult<IbcReceiveResponse> {
    data.validate()?;

    let (local, remote) = (&packet.dest, &packet.src);
    let index = order_book_index(
        &local.port_id,
        &local.channel_id,
        &data.base_denom,
        &data.quote_denom,
    );
    let mut book = BUY_ORDER_BOOKS
        .may_load(deps.storage, &index)?
        .ok_or(ContractError::PairNotFound {
            index: index.clone(),
        })?;

    let fill = book.fill_sell_order(Order::incoming(&data.seller, data.amount, data.price))?;

    // Buyers receive the base they bid for
    let payout_denom = resolve_payout_denom(deps.storage, local, remote, &data.base_denom)?;
    let payouts = fill
        .liquidated
        .iter()
        .map(|liquidation| {
            Ok((
                deps.api.addr_validate(&liquidation.creator)?,
                to_uint(liquidation.amount)?,
            ))
        })
        .collect::<ContractResult<Vec<_>>>()?;
    ensure_payable(deps.storage, local, &payout_denom, &payouts)?;

    // Nothing below can be rejected
    BUY_ORDER_BOOKS.save(deps.storage, &index, &book)?;
    let msgs = pay_out(deps.storage, contract, local, &payout_denom, payouts)?;

    let ack = DexAck::success(&SellOrderPacketAck {
        remaining_amount: fill.remaining.amount,
        gain: fill.gain,
    })?;

    Ok(IbcReceiveResponse::new()
        .set_ack(ack)
        .add_messages(msgs)
        .add_attribute("method", "onRecvSellOrder")
        .add_attribute("index", index)
        .add_attribute("liquidated", fill.liquidated.len().to_string())
        .add_attribute("remaining_amount", fill.remaining.amount.to_string())
        .add_attribute("gain", fill.gain.to_string()))
}

fn on_recv_buy_order(
    deps: DepsMut,
    contract: &Addr,
    packet: &IbcPacket,
    data: BuyOrderPacketData,
) -> ContractResult<IbcReceiveResponse> {
    data.validate()?;

    let (local, remote) = (&packet.dest, &packet.src);
    let index = order_book_index(
        &local.port_id,
        &local.channel_id,
        &data.base_denom,
        &data.quote_denom,
    );
    let mut book = SELL_ORDER_BOOKS
        .may_load(deps.storage, &index)?
        .ok_or(ContractError::PairNotFound {
            index: index.clone(),
        })?;

    let fill = book.fill_buy_order(Order::incoming(&data.buyer, data.amount, data.price))?;

    // Sellers receive quote at their own ask price
    let payout_denom = resolve_payout_denom(deps.storage, local, remote, &data.quote_denom)?;
    let payouts = fill
        .liquidated
        .iter()
        .map(|liquidation| {
            Ok((
                deps.api.addr_validate(&liquidation.creator)?,
                to_uint(liquidation.value()?)?,
            ))
        })
        .collect::<ContractResult<Vec<_>>>()?;
    ensure_payable(deps.storage, local, &payout_denom, &payouts)?;
    let spent = fill.liquidated.iter().try_fold(0i32, |spent, liquidation| {
        spent
            .checked_add(liquidation.value()?)
            .ok_or(ContractError::ProductOverflow {
                amount: data.amount,
                price: data.price,
            })
    })?;

    // Nothing below can be rejected
    SELL_ORDER_BOOKS.save(deps.storage, &index, &book)?;
    let msgs = pay_out(deps.storage, contract, local, &payout_denom, payouts)?;

    let ack = DexAck::success(&BuyOrderPacketAck {
        remaining_amount: fill.remaining.amount,
        purchase: fill.gain,
        spent,
    })?;

    Ok(IbcReceiveResponse::new()
        .set_ack(ack)
        .add_messages(msgs)
        .add_attribute("method", "onRecvBuyOrder")
        .add_attribute("index", index)
        .add_attribute("liquidated", fill.liquidated.len().to_string())
        .add_attribute("remaining_amount", fill.remaining.amount.to_string())
        .add_attribute("purchase", fill.gain.to_string())
        .add_attribute("spent", spent.to_string()))
}

fn ensure_payable(
    storage: &dyn Storage,
    local: &IbcEndpoint,
    denom: &ResolvedDenom,
    payouts: &[(Addr, Uint128)],
) -> ContractResult<()> {
    let total = payouts
        .iter()
        .try_fold(Uint128::zero(), |total, (_, amount)| total.checked_add(*amount))?;
    custody::ensure_creditable(
        storage,
        &local.port_id,
        &local.channel_id,
        denom.denom(),
        total,
    )
}

fn pay_out(
    storage: &mut dyn Storage,
    contract: &Addr,
    local: &IbcEndpoint,
    denom: &ResolvedDenom,
    payouts: Vec<(Addr, Uint128)>,
) -> ContractResult<Vec<CosmosMsg>> {
    if payouts.is_empty() {
        return Ok(vec![]);
    }
    record_resolved_denom(storage, denom)?;

    let mut msgs = vec![];
    for (owner, amount) in payouts {
        msgs.extend(custody::credit(
            storage,
            contract,
            &local.port_id,
            &local.channel_id,
            &owner,
            denom.denom(),
            amount,
        )?);
    }
    Ok(msgs)
}

// -- Acknowledgement --

/// Reconciles custody on the origin chain once the counterparty answered.
pub(crate) fn on_ack_packet(
    deps: DepsMut,
    contract: &Addr,
    packet: &IbcPacket,
    ack: &Binary,
) -> ContractResult<IbcBasicResponse> {
    let ack: DexAck = from_json(ack).map_err(|_| ContractError::InvalidAck {})?;
    match decode_packet(&packet.data)? {
        DexPacketData::SellOrder(data) => on_ack_sell_order(deps, contract, packet, data, ack),
        DexPacketData::BuyOrder(data) => on_ack_buy_order(deps, contract, packet, data, ack),
    }
}

fn on_ack_sell_order(
    deps: DepsMut,
    contract: &Addr,
    packet: &IbcPacket,
    data: SellOrderPacketData,
    ack: DexAck,
) -> ContractResult<IbcBasicResponse> {
    let result = match ack {
        DexAck::Error(reason) => {
            let msgs = refund_sell_order(deps, contract, &packet.src, &data)?;
            return Ok(IbcBasicResponse::new()
                .add_messages(msgs)
                .add_attribute("method", "onAckSellOrder")
                .add_attribute("outcome", "error")
                .add_attribute("reason", reason)
                .add_attribute("refund", data.amount.to_string()));
        }
        DexAck::Result(result) => result,
    };

    let packet_ack: SellOrderPacketAck =
        from_json(&result).map_err(|_| ContractError::InvalidAck {})?;
    ensure!(
        (0..=data.amount).contains(&packet_ack.remaining_amount) && packet_ack.gain >= 0,
        ContractError::InvalidAck {}
    );

    let (local, remote) = (&packet.src, &packet.dest);

    // Rest the unmatched remainder on our own sell book
    let mut order_id = None;
    if packet_ack.remaining_amount > 0 {
        let index = order_book_index(
            &local.port_id,
            &local.channel_id,
            &data.base_denom,
            &data.quote_denom,
        );
        let mut book = SELL_ORDER_BOOKS
            .may_load(deps.storage, &index)?
            .ok_or(ContractError::MissingOriginBook {
                index: index.clone(),
            })?;
        order_id = Some(book.append_order(
            &data.seller,
            packet_ack.remaining_amount,
            data.price,
        )?);
        SELL_ORDER_BOOKS.save(deps.storage, &index, &book)?;
    }

    // Pay the seller the quote it earned
    let mut msgs = vec![];
    if packet_ack.gain > 0 {
        let seller = deps.api.addr_validate(&data.seller)?;
        let denom = resolve_payout_denom(deps.storage, local, remote, &data.quote_denom)?;
        msgs = pay_out(
            deps.storage,
            contract,
            local,
            &denom,
            vec![(seller, to_uint(packet_ack.gain)?)],
        )?;
    }

    let mut res = IbcBasicResponse::new()
        .add_messages(msgs)
        .add_attribute("method", "onAckSellOrder")
        .add_attribute("outcome", "success")
        .add_attribute("remaining_amount", packet_ack.remaining_amount.to_string())
        .add_attribute("gain", packet_ack.gain.to_string());
    if let Some(order_id) = order_id {
        res = res.add_attribute("order_id", order_id.to_string());
    }
    Ok(res)
}

fn on_ack_buy_order(
    deps: DepsMut,
    contract: &Addr,
    packet: &IbcPacket,
    data: BuyOrderPacketData,
    ack: DexAck,
) -> ContractResult<IbcBasicResponse> {
    let result = match ack {
        DexAck::Error(reason) => {
            let msgs = refund_buy_order(deps, contract, &packet.src, &data)?;
            return Ok(IbcBasicResponse::new()
                .add_messages(msgs)
                .add_attribute("method", "onAckBuyOrder")
                .add_attribute("outcome", "error")
                .add_attribute("reason", reason));
        }
        DexAck::Result(result) => result,
    };

    let packet_ack: BuyOrderPacketAck =
        from_json(&result).map_err(|_| ContractError::InvalidAck {})?;
    ensure!(
        (0..=data.amount).contains(&packet_ack.remaining_amount)
            && packet_ack.purchase == data.amount - packet_ack.remaining_amount,
        ContractError::InvalidAck {}
    );
    // Sellers never ask more than the bid
    let escrowed_for_purchase = checked_value(packet_ack.purchase, data.price)?;
    ensure!(
        (0..=escrowed_for_purchase).contains(&packet_ack.spent),
        ContractError::InvalidAck {}
    );
    let surplus = escrowed_for_purchase - packet_ack.spent;

    let (local, remote) = (&packet.src, &packet.dest);

    // Rest the unmatched remainder on our own buy book
    let mut order_id = None;
    if packet_ack.remaining_amount > 0 {
        let index = order_book_index(
            &local.port_id,
            &local.channel_id,
            &data.base_denom,
            &data.quote_denom,
        );
        let mut book = BUY_ORDER_BOOKS
            .may_load(deps.storage, &index)?
            .ok_or(ContractError::MissingOriginBook {
                index: index.clone(),
            })?;
        order_id = Some(book.append_order(
            &data.buyer,
            packet_ack.remaining_amount,
            data.price,
        )?);
        BUY_ORDER_BOOKS.save(deps.storage, &index, &book)?;
    }

    // Deliver the purchased base to the buyer
    let mut msgs = vec![];
    if packet_ack.purchase > 0 {
        let buyer = deps.api.addr_validate(&data.buyer)?;
        let denom = resolve_payout_denom(deps.storage, local, remote, &data.base_denom)?;
        msgs = pay_out(
            deps.storage,
            contract,
            local,
            &denom,
            vec![(buyer.clone(), to_uint(packet_ack.purchase)?)],
        )?;

        // Return the quote saved by filling below the bid
        msgs.extend(custody::credit(
            deps.storage,
            contract,
            &local.port_id,
            &local.channel_id,
            &buyer,
            &data.quote_denom,
            to_uint(surplus)?,
        )?);
    }

    let mut res = IbcBasicResponse::new()
        .add_messages(msgs)
        .add_attribute("method", "onAckBuyOrder")
        .add_attribute("outcome", "success")
        .add_attribute("remaining_amount", packet_ack.remaining_amount.to_string())
        .add_attribute("purchase", packet_ack.purchase.to_string())
        .add_attribute("refund", surplus.to_string());
    if let Some(order_id) = order_id {
        res = res.add_attribute("order_id", order_id.to_string());
    }
    Ok(res)
}

// -- Timeout --

/// A packet that never reached the counterparty is compensated exactly like
/// an error acknowledgement: the full offered amount goes back to the sender.
pub(crate) fn on_timeout_packet(
    deps: DepsMut,
    contract: &Addr,
    packet: &IbcPacket,
) -> ContractResult<IbcBasicResponse> {
    let (msgs, method) = match decode_packet(&packet.data)? {
        DexPacketData::SellOrder(data) => (
            refund_sell_order(deps, contract, &packet.src, &data)?,
            "onTimeoutSellOrder",
        ),
        DexPacketData::BuyOrder(data) => (
            refund_buy_order(deps, contract, &packet.src, &data)?,
            "onTimeoutBuyOrder",
        ),
    };

    Ok(IbcBasicResponse::new()
        .add_messages(msgs)
        .add_attribute("method", method)
        .add_attribute("sequence", packet.sequence.to_string()))
}

// -- Refunds --

fn refund_sell_order(
    deps: DepsMut,
    contract: &Addr,
    local: &IbcEndpoint,
    data: &SellOrderPacketData,
) -> ContractResult<Vec<CosmosMsg>> {
    let seller = deps.api.addr_validate(&data.seller)?;
    custody::credit(
        deps.storage,
        contract,
        &local.port_id,
        &local.channel_id,
        &seller,
        &data.base_denom,
        to_uint(data.amount)?,
    )
}

fn refund_buy_order(
    deps: DepsMut,
    contract: &Addr,
    local: &IbcEndpoint,
    data: &BuyOrderPacketData,
) -> ContractResult<Vec<CosmosMsg>> {
    let buyer = deps.api.addr_validate(&data.buyer)?;
    let value = Order::incoming(&data.buyer, data.amount, data.price).value()?;
    custody::credit(
        deps.storage,
        contract,
        &local.port_id,
        &local.channel_id,
        &buyer,
        &data.quote_denom,
        to_uint(value)?,
    )
}
