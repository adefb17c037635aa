use solana_sdk::pubkey::Pubkey;

/// Program IDs
pub mod programs {
    use super::Pubkey;

    /// Metaplex Token Metadata Program ID
    pub const TOKEN_METADATA: Pubkey =
        solana_sdk::pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");
}

/// DEX aggregator endpoints
pub mod endpoints {
    /// Raydium full pair listing (v2)
    pub const RAYDIUM_PAIRS: &str = "https://api.raydium.io/v2/main/pairs";
}

/// Seed prefix for Token Metadata PDAs
pub const METADATA_SEED: &[u8] = b"metadata";
