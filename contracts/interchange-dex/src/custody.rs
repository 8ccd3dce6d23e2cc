use cosmwasm_std::{
    coin, ensure, ensure_eq, Addr, BankMsg, CosmosMsg, MessageInfo, Storage, Uint128,
};
use cw_utils::must_pay;
use osmosis_std::types::cosmos::base::v1beta1::Coin as ProtoCoin;
use osmosis_std::types::osmosis::tokenfactory::v1beta1::{MsgBurn, MsgCreateDenom, MsgMint};

use crate::constants::{TOKENFACTORY_PREFIX, VOUCHER_PREFIX};
use crate::error::ContractResult;
use crate::state::{get_escrow, get_voucher_supply, ESCROW, VOUCHER_SUPPLY};
use crate::ContractError;

/// Whether `denom` is a voucher for an asset escrowed on another chain, as
/// opposed to an asset native to this chain.
#[inline]
pub fn is_foreign_voucher(denom: &str) -> bool {
    denom.starts_with(VOUCHER_PREFIX)
}

/// The bank denom backing `denom`. Vouchers are tokenfactory denoms owned by
/// this contract; native denoms are used as is.
pub fn bank_denom(contract: &Addr, denom: &str) -> String {
    if is_foreign_voucher(denom) {
        format!("{TOKENFACTORY_PREFIX}/{contract}/{denom}")
    } else {
        denom.to_string()
    }
}

/// Takes custody of `amount` of `denom` from the sender.
///
/// The sender must attach exactly `amount` of the bank denom. Vouchers are
/// burned. Native funds stay in the contract and are booked against the
/// `port`/`channel` escrow.
pub fn debit(
    storage: &mut dyn Storage,
    contract: &Addr,
    info: &MessageInfo,
    port: &str,
    channel: &str,
    denom: &str,
    amount: Uint128,
) -> ContractResult<Vec<CosmosMsg>> {
    let bank_denom = bank_denom(contract, denom);
    let received = must_pay(info, &bank_denom)?;
    ensure_eq!(
        received,
        amount,
        ContractError::InsufficientFunds {
            sent: received,
            required: amount,
        }
    );

    if is_foreign_voucher(denom) {
        let supply = get_voucher_supply(storage, denom)?;
        VOUCHER_SUPPLY.save(storage, denom, &supply.checked_sub(amount)?)?;

        let burn: CosmosMsg = MsgBurn {
            sender: contract.to_string(),
            amount: Some(proto_coin(amount, &bank_denom)),
            burn_from_address: contract.to_string(),
        }
        .into();
        return Ok(vec![burn]);
    }

    let escrowed = get_escrow(storage, port, channel, denom)?;
    ESCROW.save(storage, (port, channel, denom), &escrowed.checked_add(amount)?)?;
    Ok(vec![])
}

/// Checks that `credit` of `amount` would succeed without touching state.
///
/// Releasing more native funds than the channel escrow holds means custody was
/// broken earlier, and is reported as `InsufficientEscrow`.
pub fn ensure_creditable(
    storage: &dyn Storage,
    port: &str,
    channel: &str,
    denom: &str,
    amount: Uint128,
) -> ContractResult<()> {
    if is_foreign_voucher(denom) {
        get_voucher_supply(storage, denom)?.checked_add(amount)?;
        return Ok(());
    }

    let available = get_escrow(storage, port, channel, denom)?;
    ensure!(
        available >= amount,
        ContractError::InsufficientEscrow {
            port: port.to_string(),
            channel: channel.to_string(),
            denom: denom.to_string(),
            available,
            required: amount,
        }
    );
    Ok(())
}

/// Pays `amount` of `denom` to `owner`.
///
/// Vouchers are minted straight to the owner, creating the tokenfactory denom
/// the first time. Native funds are released from the `port`/`channel` escrow.
pub fn credit(
    storage: &mut dyn Storage,
    contract: &Addr,
    port: &str,
    channel: &str,
    owner: &Addr,
    denom: &str,
    amount: Uint128,
) -> ContractResult<Vec<CosmosMsg>> {
    if amount.is_zero() {
        return Ok(vec![]);
    }
    ensure_creditable(storage, port, channel, denom, amount)?;

    let bank_denom = bank_denom(contract, denom);

    if is_foreign_voucher(denom) {
        let mut msgs: Vec<CosmosMsg> = vec![];
        let supply = VOUCHER_SUPPLY.may_load(storage, denom)?;
        if supply.is_none() {
            msgs.push(
                MsgCreateDenom {
                    sender: contract.to_string(),
                    subdenom: denom.to_string(),
                }
                .into(),
            );
        }
        VOUCHER_SUPPLY.save(
            storage,
            denom,
            &supply.unwrap_or_default().checked_add(amount)?,
        )?;

        msgs.push(
            MsgMint {
                sender: contract.to_string(),
                amount: Some(proto_coin(amount, &bank_denom)),
                mint_to_address: owner.to_string(),
            }
            .into(),
        );
        return Ok(msgs);
    }

    let escrowed = get_escrow(storage, port, channel, denom)?;
    ESCROW.save(storage, (port, channel, denom), &escrowed.checked_sub(amount)?)?;

    Ok(vec![BankMsg::Send {
        to_address: owner.to_string(),
        amount: vec![coin(amount.u128(), bank_denom)],
    }
    .into()])
}

fn proto_coin(amount: Uint128, denom: &str) -> ProtoCoin {
    ProtoCoin {
        denom: denom.to_string(),
        amount: amount.to_string(),
    }
}
