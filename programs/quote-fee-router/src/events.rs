use anchor_lang::prelude::*;

/// Event emitted when the distribution policy is initialized
#[event]
pub struct PolicyInitialized {
    /// Policy PDA
    pub policy: Pubkey,
    /// Total investor allocation at TGE (Y0)
    pub y0: u64,
    /// Maximum investor fee share in basis points
    pub investor_fee_share_bps: u16,
    /// Minimum payout threshold in lamports
    pub min_payout_lamports: u64,
    /// Daily distribution cap in lamports (0 = no cap)
    pub daily_cap_lamports: u64,
    /// Creator wallet address
    pub creator_wallet: Pubkey,
    /// Quote mint address
    pub quote_mint: Pubkey,
    /// Timestamp of initialization
    pub timestamp: i64,
}

/// Event emitted when the honorary quote-only position is created
#[event]
pub struct HonoraryPositionInitialized {
    /// The pool address
    pub pool: Pubkey,
    /// The position address
    pub position: Pubkey,
    /// The position NFT mint
    pub position_nft_mint: Pubkey,
    /// PDA owning the position
    pub owner_pda: Pubkey,
    /// Quote token mint
    pub quote_mint: Pubkey,
    /// Timestamp of initialization
    pub timestamp: i64,
}

/// Event emitted when quote fees are claimed from the honorary position
#[event]
pub struct QuoteFeesClaimed {
    /// Amount of quote fees claimed
    pub amount: u64,
    /// Distribution day the claim belongs to
    pub distribution_day: u64,
    /// Timestamp of claim
    pub timestamp: i64,
}

/// Event emitted for each completed page of investor payouts
#[event]
pub struct InvestorPayoutPage {
    /// Page index within the day
    pub page_index: u32,
    /// Number of investors actually paid in this page
    pub investors_paid: u16,
    /// Amount distributed in this page
    pub total_distributed: u64,
    /// Floor-rounding residue attributed to this page
    pub rounding_dust: u64,
    /// Timestamp of the page
    pub timestamp: i64,
}

/// Event emitted when the day closes and the creator receives the remainder
#[event]
pub struct CreatorPayoutDayClosed {
    /// Distribution day number that was closed
    pub day: u64,
    /// Amount of quote fees sent to the creator
    pub creator_amount: u64,
    /// Total amount distributed to investors this day
    pub total_distributed_to_investors: u64,
    /// Timestamp when the day was closed
    pub timestamp: i64,
}
