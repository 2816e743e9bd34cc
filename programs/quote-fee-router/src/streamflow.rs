use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;
use streamflow_sdk::state::Contract;

use crate::constants::MAX_INVESTORS_PER_PAGE;
use crate::errors::ErrorCode;

/// One investor parsed from a crank page
pub struct PageInvestor<'info> {
    /// Quote token account receiving the payout
    pub ata: AccountInfo<'info>,
    /// Amount still locked in the vesting contract
    pub locked: u64,
}

/// Streamflow program id as an anchor pubkey
pub fn streamflow_program_id() -> Pubkey {
    Pubkey::new_from_array(streamflow_sdk::id().to_bytes())
}

/// Parses a page of (stream, investor_ata) pairs from remaining accounts.
/// Every stream must be owned by the Streamflow program and every ATA must
/// hold the quote mint for the stream's recipient. Returns the investors
/// plus the page's locked sum.
pub fn parse_investor_page<'info>(
    accounts: &[AccountInfo<'info>],
    quote_mint: Pubkey,
    now: u64,
) -> Result<(Vec<PageInvestor<'info>>, u64)> {
    require!(
        accounts.len() % 2 == 0,
        ErrorCode::InvalidStreamflowAccount
    );

    let pair_count = accounts.len() / 2;
    require!(
        pair_count <= MAX_INVESTORS_PER_PAGE,
        ErrorCode::TooManyInvestors
    );

    let mut investors = Vec::with_capacity(pair_count);
    let mut page_locked_total: u64 = 0;

    for pair in accounts.chunks(2) {
        let stream_info = &pair[0];
        let ata_info = &pair[1];

        require_keys_eq!(
            *stream_info.owner,
            streamflow_program_id(),
            ErrorCode::InvalidStreamflowAccount
        );

        // Streamflow contracts are plain borsh, no discriminator; a failed
        // deserialize doubles as shape validation
        let contract = {
            let data = stream_info.try_borrow_data()?;
            Contract::try_from_slice(&data)
                .map_err(|_| error!(ErrorCode::InvalidStreamflowAccount))?
        };

        let recipient = Pubkey::new_from_array(contract.recipient.to_bytes());

        let token_account = {
            let data = ata_info.try_borrow_data()?;
            TokenAccount::try_deserialize(&mut &data[..])?
        };
        require_keys_eq!(token_account.mint, quote_mint, ErrorCode::InvalidQuoteMint);
        require_keys_eq!(
            token_account.owner,
            recipient,
            ErrorCode::InvestorAtaOwnerMismatch
        );

        let locked = locked_amount(&contract, now)?;
        page_locked_total = page_locked_total
            .checked_add(locked)
            .ok_or(ErrorCode::MathOverflow)?;

        investors.push(PageInvestor {
            ata: ata_info.clone(),
            locked,
        });
    }

    Ok((investors, page_locked_total))
}

/// Still-locked amount of one vesting contract at `now`.
/// locked = net_deposited - (vested_available + cliff_available)
fn locked_amount(contract: &Contract, now: u64) -> Result<u64> {
    let vested = contract.vested_available(now);
    let cliff = contract.cliff_available(now);
    let unlocked = vested.checked_add(cliff).ok_or(ErrorCode::MathOverflow)?;

    // fully vested streams floor at zero
    Ok(contract.ix.net_amount_deposited.saturating_sub(unlocked))
}
