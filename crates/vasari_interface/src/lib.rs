//! Trait definitions for the Vasari publishing toolkit.
//!
//! The orchestrator only talks to the outside world through these traits:
//! the remote platform ([`MediaGateway`]), the post ledger ([`PostLedger`]),
//! the clock ([`Sleeper`]) and configuration ([`PlatformConfig`]).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{MediaGateway, PlatformConfig, PostLedger, Sleeper, TokioSleeper};
