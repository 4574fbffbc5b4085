//! Threshold keygen executed by a trusted dealer.

mod common;
mod shamir_ss;

pub use common::*;
pub use shamir_ss::ttp_keygen;
