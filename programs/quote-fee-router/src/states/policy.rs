use anchor_lang::prelude::*;

/// Distribution policy, set once at initialization
#[account]
#[derive(InitSpace)]
pub struct Policy {
    /// Total investor allocation at TGE (Y0), denominator of the locked fraction
    pub y0: u64,
    /// Maximum investor share of a day's fees in basis points
    pub investor_fee_share_bps: u16,
    /// Daily cap on investor payouts in lamports (0 = no cap)
    pub daily_cap_lamports: u64,
    /// Minimum payout amount in lamports (dust threshold; 0 pays every lamport)
    pub min_payout_lamports: u64,
    /// Quote mint, the only token ever distributed
    pub quote_mint: Pubkey,
    /// Creator wallet receiving the daily remainder
    pub creator_wallet: Pubkey,
    /// Authority that initialized the policy
    pub authority: Pubkey,
    /// Bump seed for the PDA
    pub bump: u8,
}
