use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

use crate::types::{BuyOrderBook, ChannelInfo, Config, DenomTrace, SellOrderBook};

/// Message type for `instantiate` entry_point
#[cw_serde]
pub struct InstantiateMsg {
    /// Defaults to the instantiating sender.
    pub admin: Option<String>,
    pub default_timeout_seconds: Option<u64>,
}

/// Message type for `execute` entry_point
#[cw_serde]
pub enum ExecuteMsg {
    /// Provisions the buy and sell books of a market on a channel. Admin only.
    CreatePair {
        channel_id: String,
        base_denom: String,
        quote_denom: String,
    },
    /// Offers `amount` of base at `price` to the counterparty chain. The sender
    /// must attach `amount` of base.
    SendSellOrder {
        channel_id: String,
        base_denom: String,
        quote_denom: String,
        amount: i32,
        price: i32,
        timeout_seconds: Option<u64>,
    },
    /// Bids for `amount` of base at `price` on the counterparty chain. The
    /// sender must attach `amount * price` of quote.
    SendBuyOrder {
        channel_id: String,
        base_denom: String,
        quote_denom: String,
        amount: i32,
        price: i32,
        timeout_seconds: Option<u64>,
    },
    CancelSellOrder {
        channel_id: String,
        base_denom: String,
        quote_denom: String,
        order_id: u64,
    },
    CancelBuyOrder {
        channel_id: String,
        base_denom: String,
        quote_denom: String,
        order_id: u64,
    },
    /// Admin only.
    UpdateConfig {
        default_timeout_seconds: u64,
    },
    Auth(AuthExecuteMsg),
}

#[cw_serde]
pub enum AuthExecuteMsg {
    TransferAdmin { new_admin: Addr },
    CancelAdminTransfer {},
    RejectAdminTransfer {},
    ClaimAdmin {},
    RenounceAdminship {},
}

/// Message type for `migrate` entry_point
#[cw_serde]
pub struct MigrateMsg {}

/// Message type for `query` entry_point
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},

    #[returns(Option<Addr>)]
    Admin {},

    #[returns(Option<Addr>)]
    AdminOffer {},

    #[returns(ChannelInfo)]
    Channel { channel_id: String },

    #[returns(BuyOrderBook)]
    BuyOrderBook {
        channel_id: String,
        base_denom: String,
        quote_denom: String,
    },

    #[returns(SellOrderBook)]
    SellOrderBook {
        channel_id: String,
        base_denom: String,
        quote_denom: String,
    },

    #[returns(Option<DenomTrace>)]
    DenomTrace { voucher_id: String },

    #[returns(VoucherIdResponse)]
    VoucherId {
        port: String,
        channel: String,
        denom: String,
    },

    #[returns(EscrowResponse)]
    Escrow { channel_id: String, denom: String },

    #[returns(VoucherSupplyResponse)]
    VoucherSupply { voucher_id: String },
}

#[cw_serde]
pub struct VoucherIdResponse {
    pub voucher_id: String,
    /// Bank denom the voucher is minted under by this contract.
    pub bank_denom: String,
}

#[cw_serde]
pub struct EscrowResponse {
    pub amount: Uint128,
}

#[cw_serde]
pub struct VoucherSupplyResponse {
    pub amount: Uint128,
}
