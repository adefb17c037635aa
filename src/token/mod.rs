//! Token data collection
//!
//! - Metadata: mint record, Metaplex record, supply and largest holders over RPC
//! - Pools: DEX pair listing filtered to the token

mod metadata;
mod pools;

pub use metadata::*;
pub use pools::*;
