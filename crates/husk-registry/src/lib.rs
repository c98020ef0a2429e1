//! Talking to husk package servers.
//!
//! The resolver and the commands only see the [`Fetcher`](fetch::Fetcher)
//! and [`Publisher`](publish::Publisher) traits; the blocking `reqwest`
//! implementations live next to them.

pub mod client;
pub mod fetch;
pub mod publish;
