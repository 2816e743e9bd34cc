use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Distribution window has not elapsed - must wait 24 hours")]
    DistributionWindowNotElapsed,
    #[msg("Invalid page index for current distribution day")]
    InvalidPageIndex,
    #[msg("Day already closed - creator remainder was routed")]
    DayAlreadyClosed,
    #[msg("Base fees detected - quote-only position violated")]
    BaseFeesDetected,
    #[msg("Too many investor accounts in one page")]
    TooManyInvestors,
    #[msg("Account is not a valid Streamflow stream contract")]
    InvalidStreamflowAccount,
    #[msg("Investor token account does not belong to the stream recipient")]
    InvestorAtaOwnerMismatch,
    #[msg("Quote mint does not match policy")]
    InvalidQuoteMint,
    #[msg("Pool authority does not match the CP-AMM constant")]
    InvalidPoolAuthority,
    #[msg("Program account does not match the CP-AMM program id")]
    InvalidProgram,
    #[msg("Invalid Y0 allocation amount")]
    InvalidY0Allocation,
    #[msg("Investor fee share exceeds 10000 bps")]
    InvalidFeeShare,
    #[msg("Creator wallet not provided")]
    CreatorWalletNotProvided,
    #[msg("Math overflow occurred during calculation")]
    MathOverflow,
    #[msg("Division by zero in distribution math")]
    DivisionByZero,
    #[msg("Locked amount exceeds total allocation")]
    LockedExceedsTotal,
}
