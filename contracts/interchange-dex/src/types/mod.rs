mod channel;
mod config;
mod denom;
mod market;
mod order;
mod orderbook;
mod packet;

pub use self::channel::*;
pub use self::config::*;
pub use self::denom::*;
pub use self::market::*;
pub use self::order::*;
pub use self::orderbook::*;
pub use self::packet::*;
