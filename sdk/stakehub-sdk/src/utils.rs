use crate::core::constants::{DISPLAY_DECIMALS, STAKE_PROGRAM_ID, STAKE_SEED};
use crate::error::{Result, StakeHubError};
use solana_sdk::hash::hashv;
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use solana_sdk::pubkey::Pubkey;
use std::time::{SystemTime, UNIX_EPOCH};

//=============================================================================
// PDA Derivation
//=============================================================================

/// Derive the stake record address for a user.
///
/// Pure and total: the same user always yields the same address, and the
/// search over bump seeds always terminates for a well-formed key.
pub fn derive_stake_address(user: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[STAKE_SEED, user.as_ref()], &STAKE_PROGRAM_ID)
}

//=============================================================================
// Record Parsing
//=============================================================================

const DISCRIMINATOR_LEN: usize = 8;
const RECORD_LEN: usize = DISCRIMINATOR_LEN + 32 + 8 * 7;

/// Eight-byte account discriminator the program prepends to the record.
fn record_discriminator() -> [u8; 8] {
    let hash = hashv(&[b"account:StakeAccount"]);
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash.to_bytes()[..8]);
    discriminator
}

/// Parse raw account data into a stake record.
///
/// Layout after the discriminator: owner, amount, reward, claimed_reward,
/// last_stake_time, total_deposited, total_withdrawn, total_rewards_earned.
/// Trailing bytes beyond the known fields are ignored.
pub fn parse_stake_record(data: &[u8]) -> Result<crate::types::StakeRecord> {
    if data.len() < RECORD_LEN {
        return Err(StakeHubError::InvalidRecordData(format!(
            "account data too small: {} bytes",
            data.len()
        )));
    }
    if data[..DISCRIMINATOR_LEN] != record_discriminator() {
        return Err(StakeHubError::InvalidRecordData(
            "account discriminator mismatch".to_string(),
        ));
    }

    let read_u64 = |offset: usize| u64::from_le_bytes(data[offset..offset + 8].try_into().unwrap());

    let mut owner = [0u8; 32];
    owner.copy_from_slice(&data[8..40]);

    Ok(crate::types::StakeRecord {
        owner: Pubkey::new_from_array(owner),
        amount: read_u64(40),
        reward: read_u64(48),
        claimed_reward: read_u64(56),
        last_stake_time: read_u64(64) as i64,
        total_deposited: read_u64(72),
        total_withdrawn: read_u64(80),
        total_rewards_earned: read_u64(88),
    })
}

//=============================================================================
// Unit Conversion
//=============================================================================

/// Parse a user-entered SOL amount into lamports.
///
/// Rejects anything that is not a positive, finite number, and amounts that
/// round to zero lamports.
pub fn parse_sol_amount(input: &str) -> Result<u64> {
    let sol: f64 = input
        .trim()
        .parse()
        .map_err(|_| StakeHubError::InvalidAmount(format!("{input:?} is not a number")))?;
    if !sol.is_finite() || sol <= 0.0 {
        return Err(StakeHubError::InvalidAmount(
            "amount must be positive".to_string(),
        ));
    }
    let lamports = (sol * LAMPORTS_PER_SOL as f64).round();
    if lamports < 1.0 || lamports > u64::MAX as f64 {
        return Err(StakeHubError::InvalidAmount(
            "amount out of range".to_string(),
        ));
    }
    Ok(lamports as u64)
}

/// Render lamports as a SOL string with four decimal places. This is the
/// only place integral amounts become display units.
pub fn format_sol(lamports: u64) -> String {
    format!(
        "{:.prec$}",
        lamports as f64 / LAMPORTS_PER_SOL as f64,
        prec = DISPLAY_DECIMALS
    )
}

/// Current unix time in seconds, for optimistic history entries.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
