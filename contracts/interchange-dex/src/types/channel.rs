use cosmwasm_schema::cw_serde;
use cosmwasm_std::IbcEndpoint;

/// A dex channel that completed the handshake.
#[cw_serde]
pub struct ChannelInfo {
    /// Our end of the channel.
    pub endpoint: IbcEndpoint,
    pub counterparty_endpoint: IbcEndpoint,
    pub connection_id: String,
    /// Cleared once the channel is closed. Resting orders on a closed channel
    /// can still be cancelled, but no new orders are sent.
    pub open: bool,
}
