use crate::{error::ContractResult, msg::AuthExecuteMsg, ContractError};
use cosmwasm_std::{ensure, Addr, Api, Deps, DepsMut, MessageInfo, Response, Storage};
use cw_storage_plus::Item;

pub const ADMIN: Item<Addr> = Item::new("admin");
pub const ADMIN_OFFER: Item<Addr> = Item::new("admin_offer");

pub(crate) fn dispatch(
    deps: DepsMut,
    info: MessageInfo,
    msg: AuthExecuteMsg,
) -> ContractResult<Response> {
    match msg {
        // Offer admin permissions to a new address
        AuthExecuteMsg::TransferAdmin { new_admin } => {
            dispatch_transfer_admin(deps, info, new_admin)
        }

        // Cancel an ongoing admin transfer offer
        AuthExecuteMsg::CancelAdminTransfer {} => dispatch_cancel_admin_transfer(deps, info),

        // Reject an ongoing admin transfer offer
        AuthExecuteMsg::RejectAdminTransfer {} => dispatch_reject_admin_transfer(deps, info),

        // Accept an ongoing admin transfer offer
        AuthExecuteMsg::ClaimAdmin {} => dispatch_claim_admin(deps, info),

        // Renounces adminship of the contract
        AuthExecuteMsg::RenounceAdminship {} => dispatch_renounce_adminship(deps, info),
    }
}

/// Offers admin rights to a new address.
///
/// Only callable by the current admin.
pub(crate) fn dispatch_transfer_admin(
    deps: DepsMut,
    info: MessageInfo,
    new_admin: Addr,
) -> ContractResult<Response> {
    ensure_is_admin(deps.as_ref(), &info.sender)?;

    let new_admin = deps.api.addr_validate(new_admin.as_str())?;
    ADMIN_OFFER.save(deps.storage, &new_admin)?;

    Ok(Response::default().add_attributes(vec![
        ("method", "transfer_admin"),
        ("new_admin", new_admin.as_str()),
    ]))
}

/// Only callable by the current admin.
pub(crate) fn dispatch_cancel_admin_transfer(
    deps: DepsMut,
    info: MessageInfo,
) -> ContractResult<Response> {
    ensure_is_admin(deps.as_ref(), &info.sender)?;

    ADMIN_OFFER.remove(deps.storage);

    Ok(Response::default().add_attributes(vec![("method", "cancel_transfer_admin")]))
}

/// Only callable by the offered address.
pub(crate) fn dispatch_reject_admin_transfer(
    deps: DepsMut,
    info: MessageInfo,
) -> ContractResult<Response> {
    let offer = ADMIN_OFFER.may_load(deps.storage)?;
    ensure!(
        Some(info.sender.clone()) == offer,
        ContractError::Unauthorized {}
    );

    ADMIN_OFFER.remove(deps.storage);

    Ok(Response::default().add_attributes(vec![("method", "reject_admin_transfer")]))
}

/// Accepts an admin transfer offer. Only callable by the offered address.
pub(crate) fn dispatch_claim_admin(deps: DepsMut, info: MessageInfo) -> ContractResult<Response> {
    let offer = ADMIN_OFFER.may_load(deps.storage)?;
    ensure!(
        Some(info.sender.clone()) == offer,
        ContractError::Unauthorized {}
    );

    update_admin(deps.storage, deps.api, info.sender)?;
    ADMIN_OFFER.remove(deps.storage);

    Ok(Response::default().add_attributes(vec![("method", "claim_admin")]))
}

/// Renounces adminship. Pairs can no longer be provisioned afterwards.
pub(crate) fn dispatch_renounce_adminship(
    deps: DepsMut,
    info: MessageInfo,
) -> ContractResult<Response> {
    ensure_is_admin(deps.as_ref(), &info.sender)?;

    ADMIN.remove(deps.storage);
    ADMIN_OFFER.remove(deps.storage);

    Ok(Response::default().add_attributes(vec![("method", "renounce_adminship")]))
}

pub(crate) fn update_admin(storage: &mut dyn Storage, api: &dyn Api, admin: Addr) -> ContractResult<()> {
    let admin = api.addr_validate(admin.as_str())?;
    ADMIN.save(storage, &admin)?;
    Ok(())
}

pub(crate) fn get_admin(storage: &dyn Storage) -> ContractResult<Option<Addr>> {
    Ok(ADMIN.may_load(storage)?)
}

pub(crate) fn get_admin_offer(storage: &dyn Storage) -> ContractResult<Option<Addr>> {
    Ok(ADMIN_OFFER.may_load(storage)?)
}

pub(crate) fn ensure_is_admin(deps: Deps, sender: &Addr) -> ContractResult<()> {
    let admin = ADMIN.may_load(deps.storage)?;
    ensure!(
        Some(sender.clone()) == admin,
        ContractError::Unauthorized {}
    );
    Ok(())
}
