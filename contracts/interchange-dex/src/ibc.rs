#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    ensure, ensure_eq, to_json_binary, Binary, DepsMut, Env, Ibc3ChannelOpenResponse,
    IbcBasicResponse, IbcChannel, IbcChannelCloseMsg, IbcChannelConnectMsg, IbcChannelOpenMsg,
    IbcChannelOpenResponse, IbcOrder, IbcPacketAckMsg, IbcPacketReceiveMsg, IbcPacketTimeoutMsg,
    IbcReceiveResponse, Never,
};

use crate::constants::IBC_APP_VERSION;
use crate::error::{ContractError, ContractResult};
use crate::settlement;
use crate::state::{load_channel, CHANNEL_INFO};
use crate::types::{ChannelInfo, DexAck};

/// Only ordered channels speaking our app version are accepted.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn ibc_channel_open(
    _deps: DepsMut,
    _env: Env,
    msg: IbcChannelOpenMsg,
) -> ContractResult<IbcChannelOpenResponse> {
    validate_channel(msg.channel(), msg.counterparty_version())?;

    Ok(Some(Ibc3ChannelOpenResponse {
        version: IBC_APP_VERSION.to_string(),
    }))
}

/// Records the channel once the handshake completes.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn ibc_channel_connect(
    deps: DepsMut,
    _env: Env,
    msg: IbcChannelConnectMsg,
) -> ContractResult<IbcBasicResponse> {
    let channel = msg.channel();
    validate_channel(channel, msg.counterparty_version())?;

    let info = ChannelInfo {
        endpoint: channel.endpoint.clone(),
        counterparty_endpoint: channel.counterparty_endpoint.clone(),
        connection_id: channel.connection_id.clone(),
        open: true,
    };
    CHANNEL_INFO.save(deps.storage, &channel.endpoint.channel_id, &info)?;

    Ok(IbcBasicResponse::new()
        .add_attribute("method", "ibcChannelConnect")
        .add_attribute("channel_id", &channel.endpoint.channel_id)
        .add_attribute("connection_id", &channel.connection_id))
}

/// Refuses to initiate a close. A close confirmed by the counterparty stops
/// new orders on the channel; resting orders can still be cancelled.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn ibc_channel_close(
    deps: DepsMut,
    _env: Env,
    msg: IbcChannelCloseMsg,
) -> ContractResult<IbcBasicResponse> {
    ensure!(
        !matches!(msg, IbcChannelCloseMsg::CloseInit { .. }),
        ContractError::ChannelCloseNotAllowed {}
    );

    let channel_id = &msg.channel().endpoint.channel_id;
    let mut info = load_channel(deps.storage, channel_id)?;
    info.open = false;
    CHANNEL_INFO.save(deps.storage, channel_id, &info)?;

    Ok(IbcBasicResponse::new()
        .add_attribute("method", "ibcChannelClose")
        .add_attribute("channel_id", channel_id))
}

/// Never fails: any error is written into an error acknowledgement. Packets
/// are checked in full before anything is written, so a failed packet leaves
/// no trace in state.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn ibc_packet_receive(
    deps: DepsMut,
    env: Env,
    msg: IbcPacketReceiveMsg,
) -> Result<IbcReceiveResponse, Never> {
    match settlement::on_recv_packet(deps, &env.contract.address, &msg.packet) {
        Ok(response) => Ok(response),
        Err(err) => Ok(IbcReceiveResponse::new()
            .set_ack(error_ack(&err))
            .add_attribute("method", "ibcPacketReceive")
            .add_attribute("error", err.to_string())),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn ibc_packet_ack(
    deps: DepsMut,
    env: Env,
    msg: IbcPacketAckMsg,
) -> ContractResult<IbcBasicResponse> {
    settlement::on_ack_packet(
        deps,
        &env.contract.address,
        &msg.original_packet,
        &msg.acknowledgement.data,
    )
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn ibc_packet_timeout(
    deps: DepsMut,
    env: Env,
    msg: IbcPacketTimeoutMsg,
) -> ContractResult<IbcBasicResponse> {
    settlement::on_timeout_packet(deps, &env.contract.address, &msg.packet)
}

fn validate_channel(channel: &IbcChannel, counterparty_version: Option<&str>) -> ContractResult<()> {
    ensure_eq!(
        channel.order,
        IbcOrder::Ordered,
        ContractError::InvalidChannelOrder {}
    );
    ensure_version(&channel.version)?;
    if let Some(version) = counterparty_version {
        ensure_version(version)?;
    }
    Ok(())
}

fn ensure_version(version: &str) -> ContractResult<()> {
    ensure_eq!(
        version,
        IBC_APP_VERSION,
        ContractError::InvalidChannelVersion {
            expected: IBC_APP_VERSION.to_string(),
            actual: version.to_string(),
        }
    );
    Ok(())
}

fn error_ack(err: &ContractError) -> Binary {
    DexAck::fail(err.to_string())
        .or_else(|_| to_json_binary(&DexAck::Error("unknown error".to_string())))
        .unwrap_or_default()
}
