use anchor_lang::prelude::*;
use crate::constants::POLICY_SEED;
use crate::errors::ErrorCode;
use crate::states::Policy;

#[derive(Accounts)]
pub struct InitializePolicy<'info> {
    /// Authority paying for and recorded on the policy
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Distribution policy PDA
    #[account(
        init,
        payer = authority,
        space = Policy::DISCRIMINATOR.len() + Policy::INIT_SPACE,
        seeds = [POLICY_SEED],
        bump
    )]
    pub policy: Account<'info, Policy>,

    /// System program
    pub system_program: Program<'info, System>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitializePolicyParams {
    /// Total investor allocation at TGE (Y0)
    pub y0: u64,
    /// Maximum investor fee share in basis points (e.g., 7000 = 70%)
    pub investor_fee_share_bps: u16,
    /// Daily distribution cap in lamports (0 = no cap)
    pub daily_cap_lamports: u64,
    /// Minimum payout amount in lamports (0 = no dust threshold)
    pub min_payout_lamports: u64,
    /// Quote mint the position accrues and the crank distributes
    pub quote_mint: Pubkey,
    /// Creator wallet address for remainder routing
    pub creator_wallet: Pubkey,
}

impl<'info> InitializePolicy<'info> {
    pub fn handle(ctx: Context<InitializePolicy>, params: InitializePolicyParams) -> Result<()> {
        msg!("Initializing distribution policy");

        require!(params.y0 > 0, ErrorCode::InvalidY0Allocation);
        require!(
            params.investor_fee_share_bps <= 10000,
            ErrorCode::InvalidFeeShare
        );
        require!(
            params.creator_wallet != Pubkey::default(),
            ErrorCode::CreatorWalletNotProvided
        );
        require!(
            params.quote_mint != Pubkey::default(),
            ErrorCode::InvalidQuoteMint
        );

        let policy_key = ctx.accounts.policy.key();
        let policy = &mut ctx.accounts.policy;

        policy.y0 = params.y0;
        policy.investor_fee_share_bps = params.investor_fee_share_bps;
        policy.daily_cap_lamports = params.daily_cap_lamports;
        policy.min_payout_lamports = params.min_payout_lamports;
        policy.quote_mint = params.quote_mint;
        policy.creator_wallet = params.creator_wallet;
        policy.authority = ctx.accounts.authority.key();
        policy.bump = ctx.bumps.policy;

        msg!("Y0 allocation: {} units", policy.y0);
        msg!("Investor fee share: {} bps", policy.investor_fee_share_bps);
        msg!("Daily cap: {} lamports", policy.daily_cap_lamports);
        msg!("Min payout: {} lamports", policy.min_payout_lamports);
        msg!("Quote mint: {}", policy.quote_mint);
        msg!("Creator wallet: {}", policy.creator_wallet);

        emit!(crate::events::PolicyInitialized {
            policy: policy_key,
            y0: policy.y0,
            investor_fee_share_bps: policy.investor_fee_share_bps,
            min_payout_lamports: policy.min_payout_lamports,
            daily_cap_lamports: policy.daily_cap_lamports,
            creator_wallet: policy.creator_wallet,
            quote_mint: policy.quote_mint,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
