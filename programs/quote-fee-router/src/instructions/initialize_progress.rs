use anchor_lang::prelude::*;
use crate::constants::PROGRESS_SEED;
use crate::states::Progress;

#[derive(Accounts)]
pub struct InitializeProgress<'info> {
    /// Authority paying for the progress account
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Crank progress PDA
    #[account(
        init,
        payer = authority,
        space = Progress::DISCRIMINATOR.len() + Progress::INIT_SPACE,
        seeds = [PROGRESS_SEED],
        bump
    )]
    pub progress: Account<'info, Progress>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> InitializeProgress<'info> {
    pub fn handle(ctx: Context<InitializeProgress>) -> Result<()> {
        msg!("Initializing distribution progress");

        let bump = ctx.bumps.progress;
        ctx.accounts.progress.set_inner(Progress::new(bump));

        // last_distribution_ts starts at zero, so the first crank may run
        // without waiting out a window
        msg!("Progress initialized, first distribution may run immediately");

        Ok(())
    }
}
