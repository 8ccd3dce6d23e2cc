use cosmwasm_schema::cw_serde;

/// Records which channel a voucher id was issued for and what it stands for.
#[cw_serde]
pub struct DenomTrace {
    /// The voucher id, also the storage key.
    pub index: String,
    pub port: String,
    pub channel: String,
    /// The denom the voucher represents on the chain it was sent from.
    pub origin: String,
}

/// Result of resolving a denom received over a channel to something this
/// chain can pay out.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedDenom {
    /// A voucher previously sent out through this endpoint is coming home.
    Original(String),
    /// Anything else is represented by a voucher for the sending endpoint.
    Voucher { id: String, trace: DenomTrace },
}

impl ResolvedDenom {
    pub fn denom(&self) -> &str {
        match self {
            ResolvedDenom::Original(denom) => denom,
            ResolvedDenom::Voucher { id, .. } => id,
        }
    }
}
