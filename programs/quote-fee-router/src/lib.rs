use anchor_lang::prelude::*;

declare_id!("qGRtvVTkRuFjesx43EJV2kwdma6miUdqLvheSj9uhSQ");

pub mod constants;
pub mod cp_amm;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod math;
pub mod states;
pub mod streamflow;

#[cfg(test)]
mod tests;

pub use instructions::*;
pub use events::*;

#[program]
pub mod quote_fee_router {
    use super::*;

    pub fn initialize_policy(
        ctx: Context<InitializePolicy>,
        params: InitializePolicyParams,
    ) -> Result<()> {
        InitializePolicy::handle(ctx, params)
    }

    pub fn initialize_progress(ctx: Context<InitializeProgress>) -> Result<()> {
        InitializeProgress::handle(ctx)
    }

    pub fn initialize_position(ctx: Context<InitializePosition>) -> Result<()> {
        InitializePosition::handle(ctx)
    }

    pub fn distribute_fees<'info>(
        ctx: Context<'_, '_, '_, 'info, DistributeFees<'info>>,
        params: DistributeFeesParams,
    ) -> Result<()> {
        DistributeFees::handle(ctx, params)
    }
}
