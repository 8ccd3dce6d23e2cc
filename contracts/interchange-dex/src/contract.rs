#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response};
use cw2::set_contract_version;
use cw_utils::nonpayable;

use crate::auth::{self, ensure_is_admin, update_admin};
use crate::constants::DEFAULT_TIMEOUT_SECONDS;
use crate::error::{ContractError, ContractResult};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::order;
use crate::orderbook::create_pair;
use crate::query;
use crate::state::CONFIG;
use crate::types::Config;

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:interchange-dex";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Handling contract instantiation
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = match msg.admin {
        Some(admin) => deps.api.addr_validate(&admin)?,
        None => info.sender,
    };
    update_admin(deps.storage, deps.api, admin.clone())?;

    let config = Config {
        default_timeout_seconds: msg
            .default_timeout_seconds
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attributes(vec![
        ("method", "instantiate"),
        ("admin", admin.as_str()),
        (
            "default_timeout_seconds",
            &config.default_timeout_seconds.to_string(),
        ),
    ]))
}

/// Handling contract migration
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new().add_attributes(vec![
        ("method", "migrate"),
        ("version", CONTRACT_VERSION),
    ]))
}

/// Handling contract execution
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Provisions a market on a channel
        ExecuteMsg::CreatePair {
            channel_id,
            base_denom,
            quote_denom,
        } => create_pair(deps, info, channel_id, base_denom, quote_denom),

        // Sends a sell order to the counterparty chain
        ExecuteMsg::SendSellOrder {
            channel_id,
            base_denom,
            quote_denom,
            amount,
            price,
            timeout_seconds,
        } => order::send_sell_order(
            deps,
            env,
            info,
            channel_id,
            base_denom,
            quote_denom,
            amount,
            price,
            timeout_seconds,
        ),

        // Sends a buy order to the counterparty chain
        ExecuteMsg::SendBuyOrder {
            channel_id,
            base_denom,
            quote_denom,
            amount,
            price,
            timeout_seconds,
        } => order::send_buy_order(
            deps,
            env,
            info,
            channel_id,
            base_denom,
            quote_denom,
            amount,
            price,
            timeout_seconds,
        ),

        // Cancels a resting sell order with given ID
        ExecuteMsg::CancelSellOrder {
            channel_id,
            base_denom,
            quote_denom,
            order_id,
        } => order::cancel_sell_order(
            deps,
            env,
            info,
            channel_id,
            base_denom,
            quote_denom,
            order_id,
        ),

        // Cancels a resting buy order with given ID
        ExecuteMsg::CancelBuyOrder {
            channel_id,
            base_denom,
            quote_denom,
            order_id,
        } => order::cancel_buy_order(
            deps,
            env,
            info,
            channel_id,
            base_denom,
            quote_denom,
            order_id,
        ),

        ExecuteMsg::UpdateConfig {
            default_timeout_seconds,
        } => dispatch_update_config(deps, info, default_timeout_seconds),

        // Handles admin transfers
        ExecuteMsg::Auth(auth_msg) => auth::dispatch(deps, info, auth_msg),
    }
}

/// Handling contract query
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> ContractResult<Binary> {
    match msg {
        QueryMsg::Config {} => Ok(to_json_binary(&CONFIG.load(deps.storage)?)?),
        QueryMsg::Admin {} => Ok(to_json_binary(&auth::get_admin(deps.storage)?)?),
        QueryMsg::AdminOffer {} => Ok(to_json_binary(&auth::get_admin_offer(deps.storage)?)?),
        QueryMsg::Channel { channel_id } => {
            Ok(to_json_binary(&query::channel(deps, channel_id)?)?)
        }
        QueryMsg::BuyOrderBook {
            channel_id,
            base_denom,
            quote_denom,
        } => Ok(to_json_binary(&query::buy_order_book(
            deps,
            channel_id,
            base_denom,
            quote_denom,
        )?)?),
        QueryMsg::SellOrderBook {
            channel_id,
            base_denom,
            quote_denom,
        } => Ok(to_json_binary(&query::sell_order_book(
            deps,
            channel_id,
            base_denom,
            quote_denom,
        )?)?),
        QueryMsg::DenomTrace { voucher_id } => {
            Ok(to_json_binary(&query::denom_trace(deps, voucher_id)?)?)
        }
        QueryMsg::VoucherId {
            port,
            channel,
            denom,
        } => Ok(to_json_binary(&query::voucher_id(
            env, port, channel, denom,
        ))?),
        QueryMsg::Escrow { channel_id, denom } => {
            Ok(to_json_binary(&query::escrow(deps, channel_id, denom)?)?)
        }
        QueryMsg::VoucherSupply { voucher_id } => {
            Ok(to_json_binary(&query::voucher_supply(deps, voucher_id)?)?)
        }
    }
}

/// Updates the packet lifetime used when an order does not set its own.
///
/// Only callable by the admin.
pub(crate) fn dispatch_update_config(
    deps: DepsMut,
    info: MessageInfo,
    default_timeout_seconds: u64,
) -> ContractResult<Response> {
    nonpayable(&info)?;
    ensure_is_admin(deps.as_ref(), &info.sender)?;

    CONFIG.save(
        deps.storage,
        &Config {
            default_timeout_seconds,
        },
    )?;

    Ok(Response::new().add_attributes(vec![
        ("method", "updateConfig"),
        (
            "default_timeout_seconds",
            &default_timeout_seconds.to_string(),
        ),
    ]))
}
