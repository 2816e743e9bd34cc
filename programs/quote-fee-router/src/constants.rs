// PDA Seeds
pub const POLICY_SEED: &[u8] = b"policy";
pub const PROGRESS_SEED: &[u8] = b"progress";
pub const TREASURY_SEED: &[u8] = b"treasury";
pub const VAULT_SEED: &[u8] = b"vault";
pub const INVESTOR_FEE_POS_OWNER_SEED: &[u8] = b"investor_fee_pos_owner";

// Distribution constants
pub const DISTRIBUTION_WINDOW_SECONDS: i64 = 86_400; // 24 hours in seconds
pub const BPS_DENOMINATOR: u64 = 10_000; // 100% in basis points
pub const MAX_INVESTORS_PER_PAGE: usize = 50; // (stream, ata) pairs per crank page
