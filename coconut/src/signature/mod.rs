//! Modified Pointcheval-Sanders signatures used as Coconut credentials, their blind issuance,
//! threshold aggregation and selective disclosure.

mod aggregated;
mod blind_signature;
mod ps_signature;
mod show;

pub use aggregated::*;
pub use blind_signature::*;
pub use ps_signature::Signature;
pub use show::*;
