use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{
    INVESTOR_FEE_POS_OWNER_SEED, POLICY_SEED, PROGRESS_SEED, TREASURY_SEED, VAULT_SEED,
};
use crate::cp_amm;
use crate::errors::ErrorCode;
use crate::math::DistributionMath;
use crate::states::{Policy, Progress};
use crate::streamflow;

/// Permissionless 24h distribution crank. Page 0 claims the accrued quote
/// fees and opens the day; every page pays its batch of investors pro rata
/// by still-locked amounts; the final page routes the remainder to the
/// creator and closes the day.
///
/// Remaining accounts: the investor batch as alternating
/// (stream, investor_ata) pairs.
#[derive(Accounts)]
pub struct DistributeFees<'info> {
    /// Permissionless caller cranking the distribution
    pub caller: Signer<'info>,

    /// Distribution policy
    #[account(
        seeds = [POLICY_SEED],
        bump = policy.bump,
    )]
    pub policy: Account<'info, Policy>,

    /// Crank progress for the current day
    #[account(
        mut,
        seeds = [PROGRESS_SEED],
        bump = progress.bump,
    )]
    pub progress: Account<'info, Progress>,

    /// CHECK: PDA owning the honorary position
    #[account(
        seeds = [VAULT_SEED, vault.key().as_ref(), INVESTOR_FEE_POS_OWNER_SEED],
        bump
    )]
    pub position_owner_pda: UncheckedAccount<'info>,

    /// CHECK: Vault the position is scoped to
    pub vault: UncheckedAccount<'info>,

    /// CHECK: Pool authority constant address
    pub pool_authority: UncheckedAccount<'info>,

    /// CHECK: The CP-AMM pool
    pub pool: UncheckedAccount<'info>,

    /// CHECK: Position data account, fee counters updated by the claim
    #[account(mut)]
    pub position: UncheckedAccount<'info>,

    /// CHECK: Position NFT token account
    pub position_nft_account: UncheckedAccount<'info>,

    /// CHECK: Treasury authority PDA, owner of both treasury token accounts
    #[account(
        seeds = [TREASURY_SEED],
        bump
    )]
    pub treasury_authority: UncheckedAccount<'info>,

    /// Treasury account for the pool's base token (claim destination only)
    #[account(
        mut,
        token::mint = base_mint,
        token::authority = treasury_authority
    )]
    pub treasury_base_account: Box<Account<'info, TokenAccount>>,

    /// Treasury account for the quote token, claim destination and payout source
    #[account(
        mut,
        token::mint = quote_mint,
        token::authority = treasury_authority,
        constraint = quote_mint.key() == policy.quote_mint @ ErrorCode::InvalidQuoteMint
    )]
    pub treasury_quote_account: Box<Account<'info, TokenAccount>>,

    /// CHECK: Pool's base token vault
    #[account(mut)]
    pub pool_base_vault: UncheckedAccount<'info>,

    /// CHECK: Pool's quote token vault
    #[account(mut)]
    pub pool_quote_vault: UncheckedAccount<'info>,

    /// CHECK: Base token mint
    pub base_mint: UncheckedAccount<'info>,

    /// CHECK: Quote token mint, checked against policy on the treasury constraint
    pub quote_mint: UncheckedAccount<'info>,

    /// CHECK: Token program for the base side of the claim
    pub base_token_program: UncheckedAccount<'info>,

    /// CHECK: Token program for the quote side of the claim
    pub quote_token_program: UncheckedAccount<'info>,

    /// CHECK: CP-AMM event authority PDA
    pub event_authority: UncheckedAccount<'info>,

    /// CHECK: CP-AMM program
    pub cp_amm_program: UncheckedAccount<'info>,

    /// Creator's quote token account for the daily remainder
    #[account(
        mut,
        constraint = creator_ata.owner == policy.creator_wallet,
        constraint = creator_ata.mint == policy.quote_mint @ ErrorCode::InvalidQuoteMint
    )]
    pub creator_ata: Box<Account<'info, TokenAccount>>,

    /// Token program for payout transfers
    pub token_program: Program<'info, Token>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct DistributeFeesParams {
    /// Page index within the day; page 0 claims fees and opens the day
    pub page_index: u32,
    /// Routes the creator remainder and closes the day after this page
    pub is_final_page: bool,
}

impl<'info> DistributeFees<'info> {
    pub fn handle(
        ctx: Context<'_, '_, '_, 'info, DistributeFees<'info>>,
        params: DistributeFeesParams,
    ) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;

        msg!("Distribution crank - page {}", params.page_index);

        // Page gate. A successful page 0 advances last_distribution_ts, so
        // replaying any page within the same day fails here or on the cursor.
        ctx.accounts
            .progress
            .check_page_gate(params.page_index, now)?;

        // Every page carries its batch; the page-0 batch also defines the
        // day's weight denominator
        let (investors, page_locked_total) = streamflow::parse_investor_page(
            ctx.remaining_accounts,
            ctx.accounts.policy.quote_mint,
            now as u64,
        )?;

        if params.page_index == 0 {
            let base_before = ctx.accounts.treasury_base_account.amount;
            let quote_before = ctx.accounts.treasury_quote_account.amount;

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

            let cpi_accounts = cp_amm::ClaimPositionFeeAccounts {
                pool_authority: ctx.accounts.pool_authority.to_account_info(),
                pool: ctx.accounts.pool.to_account_info(),
                position: ctx.accounts.position.to_account_info(),
                token_a_account: ctx.accounts.treasury_base_account.to_account_info(),
                token_b_account: ctx.accounts.treasury_quote_account.to_account_info(),
                token_a_vault: ctx.accounts.pool_base_vault.to_account_info(),
                token_b_vault: ctx.accounts.pool_quote_vault.to_account_info(),
                token_a_mint: ctx.accounts.base_mint.to_account_info(),
                token_b_mint: ctx.accounts.quote_mint.to_account_info(),
                position_nft_account: ctx.accounts.position_nft_account.to_account_info(),
                owner: ctx.accounts.position_owner_pda.to_account_info(),
                token_a_program: ctx.accounts.base_token_program.to_account_info(),
                token_b_program: ctx.accounts.quote_token_program.to_account_info(),
                event_authority: ctx.accounts.event_authority.to_account_info(),
                program: ctx.accounts.cp_amm_program.to_account_info(),
            };

            let vault_key = ctx.accounts.vault.key();
            let owner_bump = ctx.bumps.position_owner_pda;
            let owner_seeds: &[&[&[u8]]] = &[&[
                VAULT_SEED,
                vault_key.as_ref(),
                INVESTOR_FEE_POS_OWNER_SEED,
                &[owner_bump],
            ]];

            cp_amm::claim_position_fee(&cpi_accounts, owner_seeds)?;

            ctx.accounts.treasury_base_account.reload()?;
            ctx.accounts.treasury_quote_account.reload()?;

            let claimed_base = ctx
                .accounts
                .treasury_base_account
                .amount
                .saturating_sub(base_before);
            let claimed_quote = ctx
                .accounts
                .treasury_quote_account
                .amount
                .saturating_sub(quote_before);

            msg!(
                "Claimed fees - base: {}, quote: {}",
                claimed_base,
                claimed_quote
            );

            if claimed_base > 0 {
                // The failed transaction rolls this write back along with the
                // claim itself, so any same-day retry faces the same fee state
                // and the day gate never advances past it.
                ctx.accounts.progress.has_base_fees = true;
                return err!(ErrorCode::BaseFeesDetected);
            }

            let progress = &mut ctx.accounts.progress;
            progress.start_new_day(now)?;

            let total_available = claimed_quote
                .checked_add(progress.carry_over_lamports)
                .ok_or(ErrorCode::MathOverflow)?;
            progress.carry_over_lamports = 0;

            let policy = &ctx.accounts.policy;
            let locked_fraction_bps =
                DistributionMath::locked_fraction_bps(page_locked_total, policy.y0)?;
            let eligible_share_bps = DistributionMath::eligible_investor_share_bps(
                locked_fraction_bps,
                policy.investor_fee_share_bps,
            );
            let investor_allocation =
                DistributionMath::investor_allocation(total_available, eligible_share_bps)?;
            let (distributable, cap_carry) = DistributionMath::apply_daily_cap(
                investor_allocation,
                policy.daily_cap_lamports,
                0,
            )?;

            let progress = &mut ctx.accounts.progress;
            progress.snapshot_day_budget(
                page_locked_total,
                total_available,
                investor_allocation,
                distributable,
            );
            progress.add_carry_over(cap_carry)?;

            msg!(
                "Day budget - available: {}, locked fraction: {} bps, allocation: {}, distributable: {}",
                total_available,
                locked_fraction_bps,
                investor_allocation,
                distributable
            );

            emit!(crate::events::QuoteFeesClaimed {
                amount: claimed_quote,
                distribution_day: ctx.accounts.progress.current_day,
                timestamp: now,
            });
        }

        // Pro-rata payouts for this page, weighted against the day snapshot
        let locked_amounts: Vec<u64> = investors.iter().map(|inv| inv.locked).collect();
        let plan = build_page_plan(
            &locked_amounts,
            page_locked_total,
            ctx.accounts.progress.day_locked_total,
            ctx.accounts.progress.day_distributable,
            ctx.accounts.progress.day_budget_remaining,
            ctx.accounts.policy.min_payout_lamports,
        )?;

        let treasury_bump = ctx.bumps.treasury_authority;
        let treasury_seeds: &[&[&[u8]]] = &[&[TREASURY_SEED, &[treasury_bump]]];

        for (investor, &amount) in investors.iter().zip(plan.payouts.iter()) {
            if amount == 0 {
                continue;
            }

            token::transfer(
                CpiContext::new_with_signer(
                    ctx.accounts.token_program.to_account_info(),
                    Transfer {
                        from: ctx.accounts.treasury_quote_account.to_account_info(),
                        to: investor.ata.clone(),
                        authority: ctx.accounts.treasury_authority.to_account_info(),
                    },
                    treasury_seeds,
                ),
                amount,
            )?;
        }

        let progress = &mut ctx.accounts.progress;
        progress.record_page(
            params.page_index,
            investors.len() as u32,
            plan.total_paid,
            plan.withheld,
            plan.rounding_dust,
        )?;

        msg!(
            "Page {} complete - {} investors, {} paid out, {} withheld",
            params.page_index,
            investors.len(),
            plan.total_paid,
            plan.withheld
        );

        emit!(crate::events::InvestorPayoutPage {
            page_index: params.page_index,
            investors_paid: plan.investors_paid,
            total_distributed: plan.total_paid,
            rounding_dust: plan.rounding_dust,
            timestamp: now,
        });

        // The final page routes everything investors were never entitled to
        // and closes the day
        if params.is_final_page && !ctx.accounts.progress.creator_payout_sent {
            let remainder = ctx
                .accounts
                .progress
                .day_total_available
                .checked_sub(ctx.accounts.progress.day_investor_allocation)
                .ok_or(ErrorCode::MathOverflow)?;

            if remainder > 0 {
                token::transfer(
                    CpiContext::new_with_signer(
                        ctx.accounts.token_program.to_account_info(),
                        Transfer {
                            from: ctx.accounts.treasury_quote_account.to_account_info(),
                            to: ctx.accounts.creator_ata.to_account_info(),
                            authority: ctx.accounts.treasury_authority.to_account_info(),
                        },
                        treasury_seeds,
                    ),
                    remainder,
                )?;
            }

            let progress = &mut ctx.accounts.progress;
            progress.close_day();

            msg!("Creator remainder: {} lamports", remainder);

            emit!(crate::events::CreatorPayoutDayClosed {
                day: progress.current_day,
                creator_amount: remainder,
                total_distributed_to_investors: progress.daily_distributed_to_investors,
                timestamp: now,
            });
        }

        Ok(())
    }
}

/// Per-investor transfer amounts for one crank page.
pub struct PagePlan {
    /// Transfer amounts index-aligned with the batch, zero meaning skip
    pub payouts: Vec<u64>,
    /// Lamports actually paid out this page
    pub total_paid: u64,
    /// Number of non-zero transfers
    pub investors_paid: u16,
    /// Budget-funded lamports withheld from sub-minimum shares, bound for
    /// carry-over
    pub withheld: u64,
    /// Floor-rounding loss attributed to this page
    pub rounding_dust: u64,
}

/// Computes the payouts for one page against the frozen day budget. Each
/// investor's weighted share is floored and funded from the remaining
/// budget; funded shares below the minimum payout are withheld into
/// carry-over instead of transferred. Weighted demand beyond the budget is
/// simply unfunded, so paid plus withheld never exceeds the budget.
pub fn build_page_plan(
    locked_amounts: &[u64],
    page_locked_total: u64,
    day_locked_total: u64,
    day_distributable: u64,
    budget_remaining: u64,
    min_payout: u64,
) -> Result<PagePlan> {
    let mut plan = PagePlan {
        payouts: vec![0; locked_amounts.len()],
        total_paid: 0,
        investors_paid: 0,
        withheld: 0,
        rounding_dust: 0,
    };

    if day_distributable == 0 || day_locked_total == 0 {
        return Ok(plan);
    }

    let mut budget = budget_remaining;
    let mut theoretical_total: u64 = 0;

    for (index, &locked) in locked_amounts.iter().enumerate() {
        let weighted =
            DistributionMath::investor_payout(locked, day_locked_total, day_distributable)?;
        theoretical_total = theoretical_total
            .checked_add(weighted)
            .ok_or(ErrorCode::MathOverflow)?;

        let entitled = weighted.min(budget);
        budget = budget.saturating_sub(entitled);

        if entitled == 0 || !DistributionMath::meets_minimum_threshold(entitled, min_payout) {
            plan.withheld = plan
                .withheld
                .checked_add(entitled)
                .ok_or(ErrorCode::MathOverflow)?;
            continue;
        }

        plan.payouts[index] = entitled;
        plan.total_paid = plan
            .total_paid
            .checked_add(entitled)
            .ok_or(ErrorCode::MathOverflow)?;
        plan.investors_paid = plan
            .investors_paid
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;
    }

    // The page's slice of the day pool, floored the same way as the
    // individual shares; the difference is the dust lost to flooring
    let page_pool =
        DistributionMath::investor_payout(page_locked_total, day_locked_total, day_distributable)?;
    plan.rounding_dust = page_pool.saturating_sub(theoretical_total);

    Ok(plan)
}
