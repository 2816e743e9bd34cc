use anchor_lang::prelude::*;
use crate::constants::DISTRIBUTION_WINDOW_SECONDS;
use crate::errors::ErrorCode;

/// Per-day crank state. The day_* fields are a budget snapshot written on
/// page 0, so every page of a multi-page distribution works against the
/// same denominator; only day_budget_remaining moves after the snapshot,
/// strictly downward.
#[account]
#[derive(InitSpace)]
pub struct Progress {
    /// Timestamp of the last successful page 0
    pub last_distribution_ts: i64,
    /// Current day number (incremented each distribution day)
    pub current_day: u64,
    /// Lamports paid to investors so far today
    pub daily_distributed_to_investors: u64,
    /// Undistributed lamports rolling into the next day (cap excess + dust)
    pub carry_over_lamports: u64,
    /// Next expected page index
    pub current_page: u32,
    /// Pages completed today
    pub pages_processed_today: u32,
    /// Investors seen across today's pages
    pub investors_processed_today: u32,
    /// Creator remainder routed for the current day
    pub creator_payout_sent: bool,
    /// Base fee contamination observed for the current day
    pub has_base_fees: bool,
    /// Lifetime floor-rounding residue, monitoring only
    pub total_rounding_dust: u64,
    /// Snapshot: total locked across the page-0 batch
    pub day_locked_total: u64,
    /// Snapshot: claimed quote plus carried-over lamports
    pub day_total_available: u64,
    /// Snapshot: pre-cap investor allocation
    pub day_investor_allocation: u64,
    /// Snapshot: post-cap budget for today's payouts
    pub day_distributable: u64,
    /// Unspent remainder of day_distributable, drawn down by payouts and
    /// by withheld shares alike so no lamport is committed twice
    pub day_budget_remaining: u64,
    /// Bump seed for the PDA
    pub bump: u8,
}

impl Progress {
    /// Fresh progress, eligible for an immediate first crank
    pub fn new(bump: u8) -> Self {
        Self {
            last_distribution_ts: 0,
            current_day: 0,
            daily_distributed_to_investors: 0,
            carry_over_lamports: 0,
            current_page: 0,
            pages_processed_today: 0,
            investors_processed_today: 0,
            creator_payout_sent: false,
            has_base_fees: false,
            total_rounding_dust: 0,
            day_locked_total: 0,
            day_total_available: 0,
            day_investor_allocation: 0,
            day_distributable: 0,
            day_budget_remaining: 0,
            bump,
        }
    }

    /// Checks whether the 24h distribution window has elapsed
    pub fn is_new_day(&self, now: i64) -> Result<bool> {
        let window_end = self
            .last_distribution_ts
            .checked_add(DISTRIBUTION_WINDOW_SECONDS)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(now >= window_end)
    }

    /// Admits a crank page. Page 0 needs the 24h window; later pages must
    /// arrive within the same day, match the cursor, and find the day
    /// neither contaminated by base fees nor already closed.
    pub fn check_page_gate(&self, page_index: u32, now: i64) -> Result<()> {
        if page_index == 0 {
            require!(
                self.is_new_day(now)?,
                ErrorCode::DistributionWindowNotElapsed
            );
            return Ok(());
        }
        require!(!self.is_new_day(now)?, ErrorCode::InvalidPageIndex);
        require!(page_index == self.current_page, ErrorCode::InvalidPageIndex);
        require!(!self.has_base_fees, ErrorCode::BaseFeesDetected);
        require!(!self.creator_payout_sent, ErrorCode::DayAlreadyClosed);
        Ok(())
    }

    /// Starts a new distribution day, resetting all per-day counters
    pub fn start_new_day(&mut self, now: i64) -> Result<()> {
        self.last_distribution_ts = now;
        self.current_day = self
            .current_day
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;
        self.daily_distributed_to_investors = 0;
        self.current_page = 0;
        self.pages_processed_today = 0;
        self.investors_processed_today = 0;
        self.creator_payout_sent = false;
        self.has_base_fees = false;

        msg!("Started distribution day {}", self.current_day);
        Ok(())
    }

    /// Freezes the day's budget. Called once, on page 0.
    pub fn snapshot_day_budget(
        &mut self,
        locked_total: u64,
        total_available: u64,
        investor_allocation: u64,
        distributable: u64,
    ) {
        self.day_locked_total = locked_total;
        self.day_total_available = total_available;
        self.day_investor_allocation = investor_allocation;
        self.day_distributable = distributable;
        self.day_budget_remaining = distributable;
    }

    /// Adds withheld lamports (dust or cap excess) to the next day's budget
    pub fn add_carry_over(&mut self, amount: u64) -> Result<()> {
        self.carry_over_lamports = self
            .carry_over_lamports
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    /// Advances the page cursor after a fully processed page. Paid and
    /// withheld lamports both draw from the day budget; only the withheld
    /// portion rolls into carry-over.
    pub fn record_page(
        &mut self,
        page_index: u32,
        investors: u32,
        paid_out: u64,
        withheld: u64,
        rounding_dust: u64,
    ) -> Result<()> {
        self.current_page = page_index.checked_add(1).ok_or(ErrorCode::MathOverflow)?;
        self.pages_processed_today = self
            .pages_processed_today
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;
        self.investors_processed_today = self
            .investors_processed_today
            .checked_add(investors)
            .ok_or(ErrorCode::MathOverflow)?;
        self.daily_distributed_to_investors = self
            .daily_distributed_to_investors
            .checked_add(paid_out)
            .ok_or(ErrorCode::MathOverflow)?;
        self.day_budget_remaining = self
            .day_budget_remaining
            .saturating_sub(paid_out)
            .saturating_sub(withheld);
        self.add_carry_over(withheld)?;
        self.total_rounding_dust = self
            .total_rounding_dust
            .checked_add(rounding_dust)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    /// Marks the creator remainder as routed for the current day
    pub fn close_day(&mut self) {
        self.creator_payout_sent = true;
        msg!("Closed distribution day {}", self.current_day);
    }
}
