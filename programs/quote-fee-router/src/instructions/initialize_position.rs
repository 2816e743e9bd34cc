use anchor_lang::prelude::*;
use anchor_spl::token::Token;

use crate::constants::{INVESTOR_FEE_POS_OWNER_SEED, POLICY_SEED, VAULT_SEED};
use crate::cp_amm;
use crate::errors::ErrorCode;
use crate::states::Policy;

#[derive(Accounts)]
pub struct InitializePosition<'info> {
    /// Payer for the position accounts
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Distribution policy (validates the quote mint)
    #[account(
        seeds = [POLICY_SEED],
        bump = policy.bump,
    )]
    pub policy: Account<'info, Policy>,

    /// CHECK: PDA that owns the honorary position
    #[account(
        seeds = [VAULT_SEED, vault.key().as_ref(), INVESTOR_FEE_POS_OWNER_SEED],
        bump
    )]
    pub position_owner_pda: UncheckedAccount<'info>,

    /// CHECK: Vault the position is scoped to
    pub vault: UncheckedAccount<'info>,

    /// CHECK: The CP-AMM pool the position belongs to
    #[account(mut)]
    pub pool: UncheckedAccount<'info>,

    /// CHECK: Position data account, created by the CP-AMM program
    #[account(mut)]
    pub position: UncheckedAccount<'info>,

    /// Position NFT mint, a fresh keypair that must sign
    #[account(mut)]
    pub position_nft_mint: Signer<'info>,

    /// CHECK: Position NFT token account, created by the CP-AMM program
    #[account(mut)]
    pub position_nft_account: UncheckedAccount<'info>,

    /// CHECK: Pool authority constant address
    pub pool_authority: UncheckedAccount<'info>,

    /// CHECK: Quote token mint, must match policy
    pub quote_mint: UncheckedAccount<'info>,

    /// Rent sysvar
    pub rent: Sysvar<'info, Rent>,

    /// Token program
    pub token_program: Program<'info, Token>,

    /// System program
    pub system_program: Program<'info, System>,

    /// CHECK: CP-AMM event authority PDA
    pub event_authority: UncheckedAccount<'info>,

    /// CHECK: CP-AMM program
    pub cp_amm_program: UncheckedAccount<'info>,
}

impl<'info> InitializePosition<'info> {
    pub fn handle(ctx: Context<InitializePosition>) -> Result<()> {
        msg!("Initializing honorary quote-only fee position");

        require_keys_eq!(
            ctx.accounts.quote_mint.key(),
            ctx.accounts.policy.quote_mint,
            ErrorCode::InvalidQuoteMint
        );
        require_keys_eq!(
            ctx.accounts.pool_authority.key(),
            cp_amm::pool_authority(),
            ErrorCode::InvalidPoolAuthority
        );
        require_keys_eq!(
            ctx.accounts.cp_amm_program.key(),
            cp_amm::cp_amm_program_id(),
            ErrorCode::InvalidProgram
        );

        // The position never holds liquidity, it exists only to accrue fees
        // for the PDA owner
        let cpi_accounts = cp_amm::CreatePositionAccounts {
            owner: ctx.accounts.position_owner_pda.to_account_info(),
            position_nft_mint: ctx.accounts.position_nft_mint.to_account_info(),
            position_nft_account: ctx.accounts.position_nft_account.to_account_info(),
            pool: ctx.accounts.pool.to_account_info(),
            position: ctx.accounts.position.to_account_info(),
            pool_authority: ctx.accounts.pool_authority.to_account_info(),
            payer: ctx.accounts.authority.to_account_info(),
            rent: ctx.accounts.rent.to_account_info(),
            token_program: ctx.accounts.token_program.to_account_info(),
            system_program: ctx.accounts.system_program.to_account_info(),
            event_authority: ctx.accounts.event_authority.to_account_info(),
            program: ctx.accounts.cp_amm_program.to_account_info(),
        };

        let vault_key = ctx.accounts.vault.key();
        let bump = ctx.bumps.position_owner_pda;
        let signer_seeds: &[&[&[u8]]] = &[&[
            VAULT_SEED,
            vault_key.as_ref(),
            INVESTOR_FEE_POS_OWNER_SEED,
            &[bump],
        ]];

        cp_amm::create_position(&cpi_accounts, signer_seeds)?;

        msg!("Honorary position created");
        msg!("Pool: {}", ctx.accounts.pool.key());
        msg!("Position: {}", ctx.accounts.position.key());
        msg!("Owner PDA: {}", ctx.accounts.position_owner_pda.key());

        emit!(crate::events::HonoraryPositionInitialized {
            pool: ctx.accounts.pool.key(),
            position: ctx.accounts.position.key(),
            position_nft_mint: ctx.accounts.position_nft_mint.key(),
            owner_pda: ctx.accounts.position_owner_pda.key(),
            quote_mint: ctx.accounts.quote_mint.key(),
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
