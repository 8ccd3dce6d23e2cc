use cosmwasm_std::{OverflowError, StdError, Uint128};
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error(transparent)]
    PaymentError(#[from] PaymentError),

    #[error("Unauthorized")]
    Unauthorized {},

    // -- Validation --
    #[error("Invalid amount: {amount:?}")]
    InvalidAmount { amount: i32 },

    #[error("Invalid price: {price:?}")]
    InvalidPrice { price: i32 },

    #[error("Arithmetic overflow computing {amount:?} * {price:?}")]
    ProductOverflow { amount: i32, price: i32 },

    #[error("Insufficient funds. Sent: {sent:?}, Required: {required:?}")]
    InsufficientFunds { sent: Uint128, required: Uint128 },

    #[error("Invalid pair: ({base_denom}, {quote_denom})")]
    InvalidPair {
        base_denom: String,
        quote_denom: String,
    },

    #[error("Invalid packet: {reason}")]
    InvalidPacket { reason: String },

    #[error("Cannot unmarshal acknowledgment")]
    InvalidAck {},

    #[error("Only ordered channels are supported")]
    InvalidChannelOrder {},

    #[error("Invalid channel version: expected {expected}, got {actual}")]
    InvalidChannelVersion { expected: String, actual: String },

    #[error("Channel close is not allowed")]
    ChannelCloseNotAllowed {},

    // -- Lookup --
    #[error("The pair doesn't exist: {index}")]
    PairNotFound { index: String },

    #[error("The pair already exists: {index}")]
    PairAlreadyExists { index: String },

    #[error("Order not found: {order_id:?}")]
    OrderNotFound { order_id: u64 },

    #[error("Channel not found: {channel_id}")]
    ChannelNotFound { channel_id: String },

    #[error("Channel is closed: {channel_id}")]
    ChannelClosed { channel_id: String },

    // -- Invariant violations --
    #[error("Origin order book must exist: {index}")]
    MissingOriginBook { index: String },

    #[error(
        "Escrow for {denom} on {port}/{channel} cannot cover release. Available: {available:?}, Required: {required:?}"
    )]
    InsufficientEscrow {
        port: String,
        channel: String,
        denom: String,
        available: Uint128,
        required: Uint128,
    },
}

impl ContractError {
    /// Whether the error means custody or book invariants were broken by an
    /// earlier step, as opposed to a rejected request.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ContractError::MissingOriginBook { .. } | ContractError::InsufficientEscrow { .. }
        )
    }
}

pub type ContractResult<T> = Result<T, ContractError>;
