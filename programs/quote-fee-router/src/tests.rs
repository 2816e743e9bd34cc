use crate::constants::DISTRIBUTION_WINDOW_SECONDS;
use crate::errors::ErrorCode;
use crate::instructions::distribute_fees::{build_page_plan, PagePlan};
use crate::math::DistributionMath;
use crate::states::Progress;

const T0: i64 = 1_700_000_000;

/// Mirrors the page-0 budget computation of the crank: day reset, carry
/// consumption, allocation, cap, snapshot. Returns the day's total available.
fn open_day(
    progress: &mut Progress,
    now: i64,
    claimed_quote: u64,
    page0_locked: &[u64],
    y0: u64,
    max_share_bps: u16,
    daily_cap: u64,
) -> u64 {
    assert!(progress.is_new_day(now).unwrap());
    progress.start_new_day(now).unwrap();

    let total_available = claimed_quote
        .checked_add(progress.carry_over_lamports)
        .unwrap();
    progress.carry_over_lamports = 0;

    let locked_total: u64 = page0_locked.iter().sum();
    let fraction = DistributionMath::locked_fraction_bps(locked_total, y0).unwrap();
    let share = DistributionMath::eligible_investor_share_bps(fraction, max_share_bps);
    let allocation = DistributionMath::investor_allocation(total_available, share).unwrap();
    let (distributable, cap_carry) =
        DistributionMath::apply_daily_cap(allocation, daily_cap, 0).unwrap();

    progress.snapshot_day_budget(locked_total, total_available, allocation, distributable);
    progress.add_carry_over(cap_carry).unwrap();

    total_available
}

/// Mirrors one page of payouts plus the progress bookkeeping.
fn run_page(progress: &mut Progress, page_index: u32, locked: &[u64], min_payout: u64) -> PagePlan {
    let page_locked_total: u64 = locked.iter().sum();
    let plan = build_page_plan(
        locked,
        page_locked_total,
        progress.day_locked_total,
        progress.day_distributable,
        progress.day_budget_remaining,
        min_payout,
    )
    .unwrap();

    progress
        .record_page(
            page_index,
            locked.len() as u32,
            plan.total_paid,
            plan.withheld,
            plan.rounding_dust,
        )
        .unwrap();

    plan
}

/// Mirrors the final-page creator remainder and day close.
fn route_remainder(progress: &mut Progress) -> u64 {
    let remainder = progress.day_total_available - progress.day_investor_allocation;
    progress.close_day();
    remainder
}

#[test]
fn partial_lock_day_splits_between_investors_and_creator() {
    let mut progress = Progress::new(254);

    // 30% of Y0 still locked, max share 70%: investors get 30% of the day
    let available = open_day(&mut progress, T0, 10_000, &[200_000, 100_000], 1_000_000, 7000, 0);
    assert_eq!(available, 10_000);
    assert_eq!(progress.day_investor_allocation, 3_000);
    assert_eq!(progress.day_distributable, 3_000);

    let plan = run_page(&mut progress, 0, &[200_000, 100_000], 1_000);
    assert_eq!(plan.payouts, vec![2_000, 1_000]);
    assert_eq!(plan.total_paid, 3_000);
    assert_eq!(plan.investors_paid, 2);
    assert_eq!(plan.withheld, 0);
    assert_eq!(plan.rounding_dust, 0);

    let remainder = route_remainder(&mut progress);
    assert_eq!(remainder, 7_000);
    assert!(progress.creator_payout_sent);

    // every lamport of the day is accounted for
    assert_eq!(
        plan.total_paid + plan.withheld + remainder + progress.total_rounding_dust,
        available
    );
}

#[test]
fn fully_unlocked_day_routes_everything_to_creator() {
    let mut progress = Progress::new(254);

    let available = open_day(&mut progress, T0, 9_999, &[0, 0], 1_000_000, 7000, 0);
    assert_eq!(progress.day_investor_allocation, 0);

    let plan = run_page(&mut progress, 0, &[0, 0], 1_000);
    assert_eq!(plan.total_paid, 0);
    assert_eq!(plan.investors_paid, 0);

    let remainder = route_remainder(&mut progress);
    assert_eq!(remainder, available);
}

#[test]
fn fully_locked_day_routes_everything_to_investors() {
    let mut progress = Progress::new(254);

    open_day(&mut progress, T0, 8_000, &[500_000], 500_000, 10_000, 0);
    assert_eq!(progress.day_investor_allocation, 8_000);

    let plan = run_page(&mut progress, 0, &[500_000], 1_000);
    assert_eq!(plan.payouts, vec![8_000]);

    let remainder = route_remainder(&mut progress);
    assert_eq!(remainder, 0);
}

#[test]
fn empty_batch_day_sweeps_everything_to_creator() {
    let mut progress = Progress::new(254);

    let available = open_day(&mut progress, T0, 12_345, &[], 1_000_000, 9_000, 0);
    assert_eq!(progress.day_locked_total, 0);

    let plan = run_page(&mut progress, 0, &[], 1_000);
    assert!(plan.payouts.is_empty());
    assert_eq!(plan.total_paid, 0);

    assert_eq!(route_remainder(&mut progress), available);
}

#[test]
fn first_crank_allowed_immediately_then_gated_for_a_day() {
    let mut progress = Progress::new(254);
    assert!(progress.is_new_day(T0).unwrap());

    open_day(&mut progress, T0, 1_000, &[1_000], 1_000, 10_000, 0);

    assert!(!progress.is_new_day(T0 + 1).unwrap());
    assert!(!progress.is_new_day(T0 + DISTRIBUTION_WINDOW_SECONDS - 1).unwrap());
    assert!(progress.is_new_day(T0 + DISTRIBUTION_WINDOW_SECONDS).unwrap());
}

#[test]
fn page_cursor_tracks_processed_pages() {
    let mut progress = Progress::new(254);

    open_day(&mut progress, T0, 50_000, &[400_000, 400_000], 1_000_000, 9_000, 0);

    run_page(&mut progress, 0, &[400_000, 400_000], 1_000);
    assert_eq!(progress.current_page, 1);
    assert_eq!(progress.pages_processed_today, 1);
    assert_eq!(progress.investors_processed_today, 2);

    run_page(&mut progress, 1, &[], 1_000);
    assert_eq!(progress.current_page, 2);
    assert_eq!(progress.pages_processed_today, 2);
    assert_eq!(progress.investors_processed_today, 2);
}

#[test]
fn page_gate_blocks_replays_and_skips() {
    let mut progress = Progress::new(254);
    assert!(progress.check_page_gate(0, T0).is_ok());

    open_day(&mut progress, T0, 10_000, &[500_000], 1_000_000, 7_000, 0);
    run_page(&mut progress, 0, &[500_000], 1_000);

    // page 0 again the same day trips the window gate
    assert_eq!(
        progress.check_page_gate(0, T0 + 1),
        Err(ErrorCode::DistributionWindowNotElapsed.into())
    );
    // skipping past the cursor
    assert_eq!(
        progress.check_page_gate(2, T0 + 1),
        Err(ErrorCode::InvalidPageIndex.into())
    );
    assert!(progress.check_page_gate(1, T0 + 1).is_ok());

    run_page(&mut progress, 1, &[], 1_000);
    // replaying an already processed page
    assert_eq!(
        progress.check_page_gate(1, T0 + 2),
        Err(ErrorCode::InvalidPageIndex.into())
    );
}

#[test]
fn stale_pagination_dies_when_the_next_window_opens() {
    let mut progress = Progress::new(254);
    open_day(&mut progress, T0, 10_000, &[500_000], 1_000_000, 7_000, 0);
    run_page(&mut progress, 0, &[500_000], 1_000);

    // yesterday's cursor is unusable once a new day is due; only page 0 runs
    let next_window = T0 + DISTRIBUTION_WINDOW_SECONDS;
    assert_eq!(
        progress.check_page_gate(1, next_window),
        Err(ErrorCode::InvalidPageIndex.into())
    );
    assert!(progress.check_page_gate(0, next_window).is_ok());
}

#[test]
fn base_fee_contamination_halts_the_day() {
    let mut progress = Progress::new(254);
    open_day(&mut progress, T0, 10_000, &[800_000, 200_000], 1_000_000, 7_000, 0);
    run_page(&mut progress, 0, &[800_000, 200_000], 1_000);

    // the quote-only guard tripped: no further pages until the day rolls over
    progress.has_base_fees = true;
    assert_eq!(
        progress.check_page_gate(1, T0 + 1),
        Err(ErrorCode::BaseFeesDetected.into())
    );

    // the next day's reset clears the flag
    let next_window = T0 + DISTRIBUTION_WINDOW_SECONDS;
    assert!(progress.check_page_gate(0, next_window).is_ok());
    progress.start_new_day(next_window).unwrap();
    assert!(!progress.has_base_fees);
}

#[test]
fn closed_day_rejects_further_pages() {
    let mut progress = Progress::new(254);
    open_day(&mut progress, T0, 10_000, &[500_000], 1_000_000, 7_000, 0);
    run_page(&mut progress, 0, &[500_000], 1_000);
    route_remainder(&mut progress);

    assert_eq!(
        progress.check_page_gate(1, T0 + 1),
        Err(ErrorCode::DayAlreadyClosed.into())
    );
}

#[test]
fn multi_page_day_never_overcommits_the_budget() {
    let mut progress = Progress::new(254);

    // Page 0 snapshots an 800k denominator; a later page brings investors
    // beyond it. Their demand is unfunded once the budget is spent.
    let available = open_day(
        &mut progress,
        T0,
        100_000,
        &[600_000, 200_000],
        2_000_000,
        9_000,
        0,
    );
    assert_eq!(progress.day_distributable, 40_000);

    let page0 = run_page(&mut progress, 0, &[600_000, 200_000], 1_000);
    assert_eq!(page0.payouts, vec![30_000, 10_000]);
    assert_eq!(progress.day_budget_remaining, 0);

    let page1 = run_page(&mut progress, 1, &[200_000], 1_000);
    assert_eq!(page1.total_paid, 0);
    assert_eq!(page1.withheld, 0);
    assert_eq!(page1.investors_paid, 0);

    let remainder = route_remainder(&mut progress);
    assert_eq!(remainder, 60_000);
    assert_eq!(progress.carry_over_lamports, 0);
    assert_eq!(
        progress.daily_distributed_to_investors + remainder,
        available
    );
}

#[test]
fn sub_minimum_shares_roll_into_carry_and_fund_the_next_day() {
    let mut progress = Progress::new(254);

    open_day(&mut progress, T0, 10_000, &[999_000, 1_000], 1_000_000, 10_000, 0);

    let plan = run_page(&mut progress, 0, &[999_000, 1_000], 1_000);
    assert_eq!(plan.payouts, vec![9_990, 0]);
    assert_eq!(plan.withheld, 10);
    assert_eq!(progress.carry_over_lamports, 10);
    assert_eq!(progress.day_budget_remaining, 0);

    assert_eq!(route_remainder(&mut progress), 0);

    // the withheld share joins the next day's pool
    let next_available = open_day(
        &mut progress,
        T0 + DISTRIBUTION_WINDOW_SECONDS,
        5_000,
        &[999_000, 1_000],
        1_000_000,
        10_000,
        0,
    );
    assert_eq!(next_available, 5_010);
    assert_eq!(progress.carry_over_lamports, 0);
}

#[test]
fn zero_minimum_pays_every_lamport() {
    let mut progress = Progress::new(254);

    // no dust threshold configured: single-digit shares transfer instead of
    // rolling into carry
    open_day(&mut progress, T0, 10, &[600, 400], 1_000, 10_000, 0);
    assert_eq!(progress.day_distributable, 10);

    let plan = run_page(&mut progress, 0, &[600, 400], 0);
    assert_eq!(plan.payouts, vec![6, 4]);
    assert_eq!(plan.total_paid, 10);
    assert_eq!(plan.withheld, 0);
    assert_eq!(progress.carry_over_lamports, 0);

    assert_eq!(route_remainder(&mut progress), 0);
}

#[test]
fn daily_cap_defers_investor_money_across_days() {
    let mut progress = Progress::new(254);
    let mut now = T0;
    let mut investor_total = 0u64;

    // fully locked, cap 4k: a 10k allocation drains over three days
    let available = open_day(&mut progress, now, 10_000, &[1_000_000], 1_000_000, 10_000, 4_000);
    assert_eq!(available, 10_000);
    assert_eq!(progress.day_distributable, 4_000);
    assert_eq!(progress.carry_over_lamports, 6_000);
    investor_total += run_page(&mut progress, 0, &[1_000_000], 1_000).total_paid;
    assert_eq!(route_remainder(&mut progress), 0);

    now += DISTRIBUTION_WINDOW_SECONDS;
    let available = open_day(&mut progress, now, 0, &[1_000_000], 1_000_000, 10_000, 4_000);
    assert_eq!(available, 6_000);
    assert_eq!(progress.carry_over_lamports, 2_000);
    investor_total += run_page(&mut progress, 0, &[1_000_000], 1_000).total_paid;
    assert_eq!(route_remainder(&mut progress), 0);

    now += DISTRIBUTION_WINDOW_SECONDS;
    let available = open_day(&mut progress, now, 0, &[1_000_000], 1_000_000, 10_000, 4_000);
    assert_eq!(available, 2_000);
    investor_total += run_page(&mut progress, 0, &[1_000_000], 1_000).total_paid;
    assert_eq!(route_remainder(&mut progress), 0);

    assert_eq!(investor_total, 10_000);
    assert_eq!(progress.carry_over_lamports, 0);
}

#[test]
fn rounding_dust_is_tracked_but_never_redistributed() {
    let mut progress = Progress::new(254);

    let available = open_day(
        &mut progress,
        T0,
        1_000,
        &[300_000, 300_000, 300_000],
        900_000,
        10_000,
        0,
    );

    let plan = run_page(&mut progress, 0, &[300_000, 300_000, 300_000], 1);
    assert_eq!(plan.payouts, vec![333, 333, 333]);
    assert_eq!(plan.rounding_dust, 1);
    assert_eq!(progress.total_rounding_dust, 1);

    let remainder = route_remainder(&mut progress);
    assert_eq!(remainder, 0);

    // the dust lamport stays in the treasury, outside carry and payouts
    assert_eq!(
        plan.total_paid + plan.withheld + remainder + progress.total_rounding_dust,
        available
    );
}

#[test]
fn declining_locks_shift_the_split_toward_the_creator() {
    let mut progress = Progress::new(254);
    let y0 = 1_000_000u64;
    let mut now = T0;

    let days = [
        (1_000_000u64, 6_000u64, 4_000u64),
        (600_000, 6_000, 4_000),
        (100_000, 1_000, 9_000),
        (0, 0, 10_000),
    ];

    for (day, &(locked, expect_investors, expect_creator)) in days.iter().enumerate() {
        open_day(&mut progress, now, 10_000, &[locked], y0, 6_000, 0);
        let plan = run_page(&mut progress, 0, &[locked], 1);
        let remainder = route_remainder(&mut progress);

        assert_eq!(plan.total_paid, expect_investors, "day {}", day + 1);
        assert_eq!(remainder, expect_creator, "day {}", day + 1);
        assert_eq!(progress.current_day, day as u64 + 1);

        now += DISTRIBUTION_WINDOW_SECONDS;
    }
}

#[test]
fn plan_is_inert_while_the_day_has_no_budget_or_denominator() {
    // later page of a day whose page 0 saw nothing locked
    let plan = build_page_plan(&[500_000, 500_000], 1_000_000, 0, 0, 0, 1_000).unwrap();
    assert_eq!(plan.total_paid, 0);
    assert_eq!(plan.withheld, 0);

    // budget present but denominator empty
    let plan = build_page_plan(&[500_000], 500_000, 0, 10_000, 10_000, 1_000).unwrap();
    assert_eq!(plan.total_paid, 0);
}

#[test]
fn withheld_shares_consume_budget_like_payments() {
    // both shares fall under the minimum: everything is withheld, and a
    // repeat run against the drained budget moves nothing
    let plan = build_page_plan(&[600, 400], 1_000, 1_000, 1_000, 1_000, 700).unwrap();
    assert_eq!(plan.total_paid, 0);
    assert_eq!(plan.withheld, 1_000);

    let drained = build_page_plan(&[600, 400], 1_000, 1_000, 1_000, 0, 700).unwrap();
    assert_eq!(drained.total_paid, 0);
    assert_eq!(drained.withheld, 0);
}
