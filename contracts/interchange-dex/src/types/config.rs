use cosmwasm_schema::cw_serde;

#[cw_serde]
pub struct Config {
    /// Packet lifetime used when an order does not set its own timeout.
    pub default_timeout_seconds: u64,
}
