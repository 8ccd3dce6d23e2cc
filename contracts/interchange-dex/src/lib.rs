pub mod auth;
pub mod constants;
pub mod contract;
pub mod custody;
pub mod denom;
mod error;
pub mod ibc;
pub mod msg;
mod order;
mod orderbook;
pub mod query;
mod settlement;
pub mod state;
pub mod types;


pub use crate::error::{ContractError, ContractResult};
