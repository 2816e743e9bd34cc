use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    instruction::{AccountMeta, Instruction},
    program::invoke_signed,
};

/// CP-AMM (DAMM v2) program id
pub fn cp_amm_program_id() -> Pubkey {
    "cpamdpZCGKUy5JxQXB4dcpGPiikHawvSWAd6mEn1sGG"
        .parse()
        .unwrap()
}

/// Pool authority, one constant address shared by all pools
pub fn pool_authority() -> Pubkey {
    "HLnpSz9h2S4hiLQ43rnSD9XkcUThA7B8hQMKmDaiTLcC"
        .parse()
        .unwrap()
}

/// Event authority seed used by the CP-AMM program
pub const EVENT_AUTHORITY_SEED: &[u8] = b"__event_authority";

/// create_position instruction discriminator
const CREATE_POSITION_IX: [u8; 8] = [48, 215, 197, 153, 96, 203, 180, 133];

/// claim_position_fee instruction discriminator
const CLAIM_POSITION_FEE_IX: [u8; 8] = [180, 38, 154, 17, 133, 33, 162, 211];

/// Accounts for the create_position CPI. The position NFT mint must sign
/// (fresh keypair); the owner may be any account, including a PDA.
pub struct CreatePositionAccounts<'info> {
    pub owner: AccountInfo<'info>,
    pub position_nft_mint: AccountInfo<'info>,
    pub position_nft_account: AccountInfo<'info>,
    pub pool: AccountInfo<'info>,
    pub position: AccountInfo<'info>,
    pub pool_authority: AccountInfo<'info>,
    pub payer: AccountInfo<'info>,
    pub rent: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
    pub system_program: AccountInfo<'info>,
    pub event_authority: AccountInfo<'info>,
    pub program: AccountInfo<'info>,
}

/// Accounts for the claim_position_fee CPI. Fees land in the owner's two
/// token accounts; the position NFT owner must sign.
pub struct ClaimPositionFeeAccounts<'info> {
    pub pool_authority: AccountInfo<'info>,
    pub pool: AccountInfo<'info>,
    pub position: AccountInfo<'info>,
    pub token_a_account: AccountInfo<'info>,
    pub token_b_account: AccountInfo<'info>,
    pub token_a_vault: AccountInfo<'info>,
    pub token_b_vault: AccountInfo<'info>,
    pub token_a_mint: AccountInfo<'info>,
    pub token_b_mint: AccountInfo<'info>,
    pub position_nft_account: AccountInfo<'info>,
    pub owner: AccountInfo<'info>,
    pub token_a_program: AccountInfo<'info>,
    pub token_b_program: AccountInfo<'info>,
    pub event_authority: AccountInfo<'info>,
    pub program: AccountInfo<'info>,
}

/// Creates an empty NFT-based position via CPI
pub fn create_position(
    accounts: &CreatePositionAccounts,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let account_metas = vec![
        AccountMeta::new_readonly(accounts.owner.key(), false),
        AccountMeta::new(accounts.position_nft_mint.key(), true),
        AccountMeta::new(accounts.position_nft_account.key(), false),
        AccountMeta::new(accounts.pool.key(), false),
        AccountMeta::new(accounts.position.key(), false),
        AccountMeta::new_readonly(accounts.pool_authority.key(), false),
        AccountMeta::new(accounts.payer.key(), true),
        AccountMeta::new_readonly(accounts.rent.key(), false),
        AccountMeta::new_readonly(accounts.token_program.key(), false),
        AccountMeta::new_readonly(accounts.system_program.key(), false),
        AccountMeta::new_readonly(accounts.event_authority.key(), false),
        AccountMeta::new_readonly(accounts.program.key(), false),
    ];

    let instruction = Instruction {
        program_id: cp_amm_program_id(),
        accounts: account_metas,
        data: CREATE_POSITION_IX.to_vec(),
    };

    let account_infos = [
        accounts.owner.clone(),
        accounts.position_nft_mint.clone(),
        accounts.position_nft_account.clone(),
        accounts.pool.clone(),
        accounts.position.clone(),
        accounts.pool_authority.clone(),
        accounts.payer.clone(),
        accounts.rent.clone(),
        accounts.token_program.clone(),
        accounts.system_program.clone(),
        accounts.event_authority.clone(),
        accounts.program.clone(),
    ];

    invoke_signed(&instruction, &account_infos, signer_seeds)?;
    Ok(())
}

/// Claims accrued position fees via CPI
pub fn claim_position_fee(
    accounts: &ClaimPositionFeeAccounts,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let account_metas = vec![
        AccountMeta::new_readonly(accounts.pool_authority.key(), false),
        AccountMeta::new_readonly(accounts.pool.key(), false),
        AccountMeta::new(accounts.position.key(), false),
        AccountMeta::new(accounts.token_a_account.key(), false),
        AccountMeta::new(accounts.token_b_account.key(), false),
        AccountMeta::new(accounts.token_a_vault.key(), false),
        AccountMeta::new(accounts.token_b_vault.key(), false),
        AccountMeta::new_readonly(accounts.token_a_mint.key(), false),
        AccountMeta::new_readonly(accounts.token_b_mint.key(), false),
        AccountMeta::new_readonly(accounts.position_nft_account.key(), false),
        AccountMeta::new_readonly(accounts.owner.key(), true),
        AccountMeta::new_readonly(accounts.token_a_program.key(), false),
        AccountMeta::new_readonly(accounts.token_b_program.key(), false),
        AccountMeta::new_readonly(accounts.event_authority.key(), false),
        AccountMeta::new_readonly(accounts.program.key(), false),
    ];

    let instruction = Instruction {
        program_id: cp_amm_program_id(),
        accounts: account_metas,
        data: CLAIM_POSITION_FEE_IX.to_vec(),
    };

    let account_infos = [
        accounts.pool_authority.clone(),
        accounts.pool.clone(),
        accounts.position.clone(),
        accounts.token_a_account.clone(),
        accounts.token_b_account.clone(),
        accounts.token_a_vault.clone(),
        accounts.token_b_vault.clone(),
        accounts.token_a_mint.clone(),
        accounts.token_b_mint.clone(),
        accounts.position_nft_account.clone(),
        accounts.owner.clone(),
        accounts.token_a_program.clone(),
        accounts.token_b_program.clone(),
        accounts.event_authority.clone(),
        accounts.program.clone(),
    ];

    invoke_signed(&instruction, &account_infos, signer_seeds)?;
    Ok(())
}
