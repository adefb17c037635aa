//! Token metadata fetching from Solana RPC
//!
//! Provides:
//! - Metaplex metadata record (name, symbol, update authority)
//! - SPL mint record (decimals, mint/freeze authority)
//! - Circulating supply and the largest holder balances

use crate::constants::{programs, METADATA_SEED};
use crate::error::{AppError, AppResult};
use futures_util::future::try_join_all;
use rust_decimal::Decimal;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use std::sync::Arc;

/// SPL mint account length
pub const MINT_ACCOUNT_LEN: usize = 82;

/// Bytes of an SPL token account needed to read mint and amount
const TOKEN_ACCOUNT_AMOUNT_END: usize = 72;

/// Largest scale `Decimal` can carry
const MAX_DECIMALS: u8 = 28;

/// Balance of one of the largest token accounts
#[derive(Debug, Clone, PartialEq)]
pub struct HolderBalance {
    /// Token account address
    pub address: String,
    /// Balance divided by 10^decimals
    pub amount: Decimal,
}

/// Token metadata assembled from chain reads
#[derive(Debug, Clone)]
pub struct TokenMetadata {
    /// Token mint address
    pub mint: String,
    /// Metaplex name
    pub name: String,
    /// Metaplex symbol
    pub symbol: String,
    /// Raw supply, not divided by 10^decimals
    pub total_supply: u64,
    /// Token decimals
    pub decimals: u8,
    /// Mint authority (if any)
    pub mint_authority: Option<String>,
    /// Freeze authority (if any)
    pub freeze_authority: Option<String>,
    /// Metaplex update authority
    pub update_authority: String,
    /// Largest holders, descending by balance
    pub largest_holders: Vec<HolderBalance>,
}

impl TokenMetadata {
    /// Supply divided by 10^decimals
    pub fn denominated_supply(&self) -> Option<Decimal> {
        denominate(self.total_supply, self.decimals).ok()
    }

    /// Top holder, if the chain returned any
    pub fn top_holder(&self) -> Option<&HolderBalance> {
        self.largest_holders.first()
    }
}

/// Decoded SPL mint account
#[derive(Debug, Clone, PartialEq)]
pub struct MintRecord {
    pub mint_authority: Option<Pubkey>,
    pub supply: u64,
    pub decimals: u8,
    pub freeze_authority: Option<Pubkey>,
}

/// Decoded Metaplex metadata account (leading fields only)
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRecord {
    pub update_authority: Pubkey,
    pub mint: Pubkey,
    pub name: String,
    pub symbol: String,
}

/// Read-only chain queries the fetcher depends on
#[async_trait::async_trait]
pub trait ChainReader: Send + Sync {
    /// Raw data of an account
    async fn get_account_data(&self, address: &Pubkey) -> AppResult<Vec<u8>>;

    /// Raw circulating supply of a mint
    async fn get_token_supply(&self, mint: &Pubkey) -> AppResult<u64>;

    /// Token accounts holding the most of a mint, descending by balance
    async fn get_largest_accounts(&self, mint: &Pubkey) -> AppResult<Vec<Pubkey>>;
}

#[async_trait::async_trait]
impl ChainReader for RpcClient {
    async fn get_account_data(&self, address: &Pubkey) -> AppResult<Vec<u8>> {
        let account = self.get_account(address).await.map_err(|e| {
            if e.to_string().contains("AccountNotFound") {
                AppError::NotFound(format!("Account {} not found", address))
            } else {
                AppError::Rpc(format!("Failed to get account {}: {}", address, e))
            }
        })?;
        Ok(account.data)
    }

    async fn get_token_supply(&self, mint: &Pubkey) -> AppResult<u64> {
        let supply = RpcClient::get_token_supply(self, mint)
            .await
            .map_err(|e| AppError::Rpc(format!("Failed to get token supply: {}", e)))?;

        supply.amount.parse::<u64>().map_err(|e| {
            AppError::Parse(format!("Invalid supply amount '{}': {}", supply.amount, e))
        })
    }

    async fn get_largest_accounts(&self, mint: &Pubkey) -> AppResult<Vec<Pubkey>> {
        let accounts = self
            .get_token_largest_accounts(mint)
            .await
            .map_err(|e| AppError::Rpc(format!("Failed to get largest accounts: {}", e)))?;

        accounts
            .iter()
            .map(|account| {
                Pubkey::from_str(&account.address).map_err(|e| {
                    AppError::Parse(format!("Invalid holder address '{}': {}", account.address, e))
                })
            })
            .collect()
    }
}

/// Fetches token metadata, supply and holders from Solana RPC
pub struct TokenMetadataFetcher {
    reader: Arc<dyn ChainReader>,
}

impl TokenMetadataFetcher {
    /// Create a new metadata fetcher
    pub fn new(rpc_url: &str) -> Self {
        Self::with_reader(Arc::new(RpcClient::new(rpc_url.to_string())))
    }

    /// Create from an existing chain reader
    pub fn with_reader(reader: Arc<dyn ChainReader>) -> Self {
        Self { reader }
    }

    /// Fetch everything the risk analysis needs for one mint.
    ///
    /// Any failed read fails the whole fetch; holder balances are read
    /// concurrently and kept in the order the chain returned them.
    pub async fn fetch_token_metadata(&self, mint: &Pubkey) -> AppResult<TokenMetadata> {
        tracing::info!(mint = %mint, "Fetching metadata");

        let metadata_address = metadata_address(mint);
        let metadata_data = self.reader.get_account_data(&metadata_address).await?;
        let metadata = parse_metadata_account(&metadata_data)?;
        if metadata.mint != *mint {
            return Err(AppError::Parse(format!(
                "Metadata account {} belongs to mint {}",
                metadata_address, metadata.mint
            )));
        }

        let mint_data = self.reader.get_account_data(mint).await?;
        let mint_record = parse_mint_account(&mint_data)?;
        let supply = self.reader.get_token_supply(mint).await?;

        tracing::debug!(
            mint = %mint,
            name = %metadata.name,
            symbol = %metadata.symbol,
            decimals = mint_record.decimals,
            supply,
            "Loaded mint and metadata"
        );

        tracing::info!(mint = %mint, "Fetching holders");
        let holders = self.fetch_largest_holders(mint, mint_record.decimals).await?;
        tracing::debug!(mint = %mint, holders = holders.len(), "Loaded holder balances");

        Ok(TokenMetadata {
            mint: mint.to_string(),
            name: metadata.name,
            symbol: metadata.symbol,
            total_supply: supply,
            decimals: mint_record.decimals,
            mint_authority: mint_record.mint_authority.map(|k| k.to_string()),
            freeze_authority: mint_record.freeze_authority.map(|k| k.to_string()),
            update_authority: metadata.update_authority.to_string(),
            largest_holders: holders,
        })
    }

    async fn fetch_largest_holders(&self, mint: &Pubkey, decimals: u8) -> AppResult<Vec<HolderBalance>> {
        let addresses = self.reader.get_largest_accounts(mint).await?;

        let reads = addresses.into_iter().map(|address| {
            let reader = self.reader.clone();
            async move {
                let data = reader.get_account_data(&address).await?;
                let amount = parse_token_account_amount(&data, mint)?;
                Ok::<_, AppError>(HolderBalance {
                    address: address.to_string(),
                    amount: denominate(amount, decimals)?,
                })
            }
        });

        try_join_all(reads).await
    }
}

/// Metaplex metadata PDA for a mint
pub fn metadata_address(mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[METADATA_SEED, programs::TOKEN_METADATA.as_ref(), mint.as_ref()],
        &programs::TOKEN_METADATA,
    )
    .0
}

/// Divide a raw amount by 10^decimals without float rounding
pub fn denominate(raw: u64, decimals: u8) -> AppResult<Decimal> {
    if decimals > MAX_DECIMALS {
        return Err(AppError::Parse(format!(
            "Decimals {} exceed supported precision",
            decimals
        )));
    }
    Decimal::try_from_i128_with_scale(raw as i128, decimals as u32)
        .map_err(|e| AppError::Parse(format!("Cannot denominate {}: {}", raw, e)))
}

/// Parse an SPL mint account
///
/// Layout:
/// - mint_authority: COption<Pubkey> (36 bytes)
/// - supply: u64 (8 bytes)
/// - decimals: u8 (1 byte)
/// - is_initialized: bool (1 byte)
/// - freeze_authority: COption<Pubkey> (36 bytes)
pub fn parse_mint_account(data: &[u8]) -> AppResult<MintRecord> {
    if data.len() < MINT_ACCOUNT_LEN {
        return Err(AppError::Parse(format!(
            "Invalid mint account data length: {}",
            data.len()
        )));
    }

    let mint_authority = parse_optional_pubkey(&data[0..36]);
    let supply = read_u64(data, 36)?;
    let decimals = data[44];
    if data[45] == 0 {
        return Err(AppError::Parse("Mint account is not initialized".to_string()));
    }
    let freeze_authority = parse_optional_pubkey(&data[46..82]);

    Ok(MintRecord {
        mint_authority,
        supply,
        decimals,
        freeze_authority,
    })
}

/// Parse the leading fields of a Metaplex metadata account
pub fn parse_metadata_account(data: &[u8]) -> AppResult<MetadataRecord> {
    // key: u8, update_authority, mint, then borsh strings
    let update_authority = read_pubkey(data, 1)?;
    let mint = read_pubkey(data, 33)?;
    let mut offset = 65;
    let name = read_borsh_string(data, &mut offset)?;
    let symbol = read_borsh_string(data, &mut offset)?;

    Ok(MetadataRecord {
        update_authority,
        mint,
        name: name.trim_end_matches('\0').to_string(),
        symbol: symbol.trim_end_matches('\0').to_string(),
    })
}

/// Read the raw balance of an SPL token account for `mint`
pub fn parse_token_account_amount(data: &[u8], mint: &Pubkey) -> AppResult<u64> {
    if data.len() < TOKEN_ACCOUNT_AMOUNT_END {
        return Err(AppError::Parse(format!(
            "Invalid token account data length: {}",
            data.len()
        )));
    }
    let account_mint = read_pubkey(data, 0)?;
    if account_mint != *mint {
        return Err(AppError::Parse(format!(
            "Token account holds mint {}, expected {}",
            account_mint, mint
        )));
    }
    read_u64(data, 64)
}

/// Parse an optional pubkey from SPL Token account data
fn parse_optional_pubkey(data: &[u8]) -> Option<Pubkey> {
    if data.len() < 36 {
        return None;
    }

    // First 4 bytes are the option tag (0 = None, 1 = Some)
    let option_tag = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);

    if option_tag == 0 {
        None
    } else {
        let pubkey_bytes: [u8; 32] = data[4..36].try_into().ok()?;
        Some(Pubkey::new_from_array(pubkey_bytes))
    }
}

fn read_u64(data: &[u8], offset: usize) -> AppResult<u64> {
    data.get(offset..offset + 8)
        .and_then(|bytes| bytes.try_into().ok())
        .map(u64::from_le_bytes)
        .ok_or_else(|| AppError::Parse(format!("Account data too short for u64 at {}", offset)))
}

fn read_pubkey(data: &[u8], offset: usize) -> AppResult<Pubkey> {
    data.get(offset..offset + 32)
        .and_then(|bytes| <[u8; 32]>::try_from(bytes).ok())
        .map(Pubkey::new_from_array)
        .ok_or_else(|| AppError::Parse(format!("Account data too short for pubkey at {}", offset)))
}

fn read_borsh_string(data: &[u8], offset: &mut usize) -> AppResult<String> {
    let len_bytes = data
        .get(*offset..*offset + 4)
        .ok_or_else(|| AppError::Parse("Metadata string length truncated".to_string()))?;
    let len = u32::from_le_bytes([len_bytes[0], len_bytes[1], len_bytes[2], len_bytes[3]]) as usize;
    let start = *offset + 4;
    let bytes = data
        .get(start..start + len)
        .ok_or_else(|| AppError::Parse("Metadata string truncated".to_string()))?;
    *offset = start + len;

    String::from_utf8(bytes.to_vec())
        .map_err(|e| AppError::Parse(format!("Metadata string is not UTF-8: {}", e)))
}
