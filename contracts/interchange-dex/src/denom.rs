use cosmwasm_std::{IbcEndpoint, Storage};
use sha2::{Digest, Sha256};

use crate::constants::{VOUCHER_ID_LEN, VOUCHER_PREFIX};
use crate::error::ContractResult;
use crate::state::DENOM_TRACES;
use crate::types::{DenomTrace, ResolvedDenom};

/// Derives the voucher id representing `denom` once it has travelled through
/// `port`/`channel`.
///
/// The id is `ibc/` followed by the upper-case hex SHA-256 of
/// `{port}/{channel}/{denom}`, truncated to `VOUCHER_ID_LEN` characters.
pub fn derive_voucher_id(port: &str, channel: &str, denom: &str) -> String {
    let hash = Sha256::digest(format!("{port}/{channel}/{denom}").as_bytes());
    let mut voucher = format!("{VOUCHER_PREFIX}{}", hex::encode_upper(hash));
    voucher.truncate(VOUCHER_ID_LEN);
    voucher
}

/// Stores the trace of the voucher derived from `(port, channel, denom)` if it
/// has never been seen, and returns the voucher id. Existing traces are left
/// untouched.
pub fn save_voucher_trace(
    storage: &mut dyn Storage,
    port: &str,
    channel: &str,
    denom: &str,
) -> ContractResult<String> {
    let voucher = derive_voucher_id(port, channel, denom);

    if !DENOM_TRACES.has(storage, &voucher) {
        DENOM_TRACES.save(
            storage,
            &voucher,
            &DenomTrace {
                index: voucher.clone(),
                port: port.to_string(),
                channel: channel.to_string(),
                origin: denom.to_string(),
            },
        )?;
    }

    Ok(voucher)
}

/// Returns the original denom of `voucher`, but only if the voucher was traced
/// through this exact `port`/`channel`.
pub fn resolve_original(
    storage: &dyn Storage,
    port: &str,
    channel: &str,
    voucher: &str,
) -> ContractResult<Option<String>> {
    let trace = DENOM_TRACES.may_load(storage, voucher)?;
    Ok(trace
        .filter(|t| t.port == port && t.channel == channel)
        .map(|t| t.origin))
}

/// Resolves a denom named by the counterparty to the denom paid out locally.
///
/// A denom that left through our `local` endpoint resolves back to its
/// original. Anything else becomes a voucher derived from the `remote`
/// endpoint it arrived from. Read only; see `record_resolved_denom`.
pub fn resolve_payout_denom(
    storage: &dyn Storage,
    local: &IbcEndpoint,
    remote: &IbcEndpoint,
    denom: &str,
) -> ContractResult<ResolvedDenom> {
    if let Some(original) = resolve_original(storage, &local.port_id, &local.channel_id, denom)? {
        return Ok(ResolvedDenom::Original(original));
    }

    let id = derive_voucher_id(&remote.port_id, &remote.channel_id, denom);
    Ok(ResolvedDenom::Voucher {
        id: id.clone(),
        trace: DenomTrace {
            index: id,
            port: remote.port_id.clone(),
            channel: remote.channel_id.clone(),
            origin: denom.to_string(),
        },
    })
}

/// Persists the trace of a freshly derived payout voucher.
pub fn record_resolved_denom(storage: &mut dyn Storage, resolved: &ResolvedDenom) -> ContractResult<()> {
    if let ResolvedDenom::Voucher { id, trace } = resolved {
        if !DENOM_TRACES.has(storage, id) {
            DENOM_TRACES.save(storage, id, trace)?;
        }
    }
    Ok(())
}
