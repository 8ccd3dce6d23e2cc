use cosmwasm_schema::cw_serde;
use cosmwasm_std::{ensure, to_json_binary, Binary, StdResult};
use serde::Serialize;

use crate::{error::ContractResult, ContractError};

use super::validate_amount_and_price;

/// Payload of every packet sent over a dex channel.
#[cw_serde]
pub enum DexPacketData {
    SellOrder(SellOrderPacketData),
    BuyOrder(BuyOrderPacketData),
}

#[cw_serde]
pub struct SellOrderPacketData {
    pub base_denom: String,
    pub amount: i32,
    pub quote_denom: String,
    pub price: i32,
    pub seller: String,
}

impl SellOrderPacketData {
    pub fn validate(&self) -> ContractResult<()> {
        validate_trade_intent(
            &self.base_denom,
            &self.quote_denom,
            self.amount,
            self.price,
            &self.seller,
        )
    }
}

#[cw_serde]
pub struct BuyOrderPacketData {
    pub base_denom: String,
    pub amount: i32,
    pub quote_denom: String,
    pub price: i32,
    pub buyer: String,
}

impl BuyOrderPacketData {
    pub fn validate(&self) -> ContractResult<()> {
        validate_trade_intent(
            &self.base_denom,
            &self.quote_denom,
            self.amount,
            self.price,
            &self.buyer,
        )
    }
}

fn validate_trade_intent(
    base_denom: &str,
    quote_denom: &str,
    amount: i32,
    price: i32,
    sender: &str,
) -> ContractResult<()> {
    validate_amount_and_price(amount, price)?;
    ensure!(
        !base_denom.is_empty() && !quote_denom.is_empty() && base_denom != quote_denom,
        ContractError::InvalidPair {
            base_denom: base_denom.to_string(),
            quote_denom: quote_denom.to_string(),
        }
    );
    ensure!(
        !sender.is_empty(),
        ContractError::InvalidPacket {
            reason: "missing sender".to_string(),
        }
    );
    Ok(())
}

/// Acknowledgement payload for a sell order.
#[cw_serde]
pub struct SellOrderPacketAck {
    pub remaining_amount: i32,
    pub gain: i32,
}

/// Acknowledgement payload for a buy order.
#[cw_serde]
pub struct BuyOrderPacketAck {
    pub remaining_amount: i32,
    pub purchase: i32,
    /// Quote paid to the matched sellers at their own asks. The buyer gets
    /// back whatever it escrowed for the purchase beyond this.
    pub spent: i32,
}

/// Acknowledgement envelope, wire compatible with the ICS-20 format:
/// `{"result": "<base64>"}` or `{"error": "<reason>"}`.
#[cw_serde]
pub enum DexAck {
    Result(Binary),
    Error(String),
}

impl DexAck {
    pub fn success(payload: &impl Serialize) -> StdResult<Binary> {
        to_json_binary(&DexAck::Result(to_json_binary(payload)?))
    }

    pub fn fail(reason: impl Into<String>) -> StdResult<Binary> {
        to_json_binary(&DexAck::Error(reason.into()))
    }
}
