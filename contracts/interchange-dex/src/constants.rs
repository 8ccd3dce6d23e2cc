/// Marker carried by every voucher id.
pub const VOUCHER_PREFIX: &str = "ibc/";
/// Length of a voucher id including `VOUCHER_PREFIX`.
pub const VOUCHER_ID_LEN: usize = 16;
/// Vouchers are issued as tokenfactory denoms `factory/{contract}/{voucher_id}`.
pub const TOKENFACTORY_PREFIX: &str = "factory";

pub const IBC_APP_VERSION: &str = "interchange-dex-1";

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 600;
