use anchor_lang::prelude::*;
use crate::constants::BPS_DENOMINATOR;
use crate::errors::ErrorCode;

/// Pro-rata distribution math, all floor division on u128 intermediates
pub struct DistributionMath;

impl DistributionMath {
    /// floor(amount * numerator / denominator), checked end to end
    fn mul_div_floor(amount: u64, numerator: u64, denominator: u64) -> Result<u64> {
        require!(denominator > 0, ErrorCode::DivisionByZero);

        let value = (amount as u128)
            .checked_mul(numerator as u128)
            .ok_or(ErrorCode::MathOverflow)?
            / denominator as u128;

        require!(value <= u64::MAX as u128, ErrorCode::MathOverflow);
        Ok(value as u64)
    }

    /// Share of the Y0 allocation still locked, in basis points.
    /// f_locked(t) = locked_total(t) / Y0
    pub fn locked_fraction_bps(locked_total: u64, y0: u64) -> Result<u64> {
        require!(y0 > 0, ErrorCode::DivisionByZero);

        if locked_total == 0 {
            return Ok(0);
        }
        if locked_total > y0 {
            return err!(ErrorCode::LockedExceedsTotal);
        }

        let fraction_bps = Self::mul_div_floor(locked_total, BPS_DENOMINATOR, y0)?;
        Ok(fraction_bps.min(BPS_DENOMINATOR))
    }

    /// eligible_share_bps = min(f_locked_bps, max configured investor share)
    pub fn eligible_investor_share_bps(locked_fraction_bps: u64, max_share_bps: u16) -> u64 {
        locked_fraction_bps.min(max_share_bps as u64)
    }

    /// Total quote amount allocated to investors for the day.
    /// investor_allocation = floor(total_available * eligible_share_bps / 10000)
    pub fn investor_allocation(total_available: u64, eligible_share_bps: u64) -> Result<u64> {
        Self::mul_div_floor(total_available, eligible_share_bps, BPS_DENOMINATOR)
    }

    /// One investor's weighted slice of the distributable amount.
    /// payout_i = floor(distributable * locked_i / locked_total)
    pub fn investor_payout(
        investor_locked: u64,
        total_locked: u64,
        distributable: u64,
    ) -> Result<u64> {
        require!(total_locked > 0, ErrorCode::DivisionByZero);

        if investor_locked == 0 {
            return Ok(0);
        }

        Self::mul_div_floor(distributable, investor_locked, total_locked)
    }

    /// Applies the daily cap. Returns (distributable_today, carry_to_next_day).
    /// A cap of 0 means uncapped.
    pub fn apply_daily_cap(
        total_available: u64,
        daily_cap: u64,
        distributed_today: u64,
    ) -> Result<(u64, u64)> {
        if daily_cap == 0 {
            return Ok((total_available, 0));
        }

        let remaining_cap = daily_cap.saturating_sub(distributed_today);
        if total_available <= remaining_cap {
            Ok((total_available, 0))
        } else {
            let carry_over = total_available
                .checked_sub(remaining_cap)
                .ok_or(ErrorCode::MathOverflow)?;
            Ok((remaining_cap, carry_over))
        }
    }

    /// Payouts under the configured minimum are withheld as dust
    pub fn meets_minimum_threshold(amount: u64, min_payout: u64) -> bool {
        amount >= min_payout
    }
}
