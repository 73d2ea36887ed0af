use solana_sdk::pubkey;
use solana_sdk::pubkey::Pubkey;
use std::time::Duration;

// Program ID of the staking program (devnet deployment)
pub const STAKE_PROGRAM_ID: Pubkey = pubkey!("2wapyHPxoMmEgDT9RXWXrPARHbgAwVskHtu9LDjhMsT5");

/// PDA seed for the per-user stake record.
pub const STAKE_SEED: &[u8] = b"stake";

/// Decimal places shown when rendering lamports as SOL.
pub const DISPLAY_DECIMALS: usize = 4;

/// Most recent entries the activity log retains.
pub const HISTORY_CAPACITY: usize = 20;

/// How long a posted notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_millis(3000);

/// Delay between confirmation polls while a submission is outstanding.
pub const CONFIRM_POLL_INTERVAL: Duration = Duration::from_millis(500);
