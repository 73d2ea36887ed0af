use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use std::time::Instant;

/// A user-triggered action competing for the single-flight slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    SetupAccount,
    Deposit,
    Withdraw,
    ClaimReward,
    Refresh,
}

impl UserAction {
    pub fn label(self) -> &'static str {
        match self {
            UserAction::SetupAccount => "setup account",
            UserAction::Deposit => "deposit",
            UserAction::Withdraw => "withdraw",
            UserAction::ClaimReward => "claim reward",
            UserAction::Refresh => "refresh",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            UserAction::SetupAccount => "Setup",
            UserAction::Deposit => "Stake",
            UserAction::Withdraw => "Unstake",
            UserAction::ClaimReward => "Claim",
            UserAction::Refresh => "Fetch",
        }
    }

    /// Notice shown when the action confirms.
    pub fn success_notice(self) -> &'static str {
        match self {
            UserAction::SetupAccount => "Account Setup ✅",
            UserAction::Deposit => "Staked ✅",
            UserAction::Withdraw => "Unstaked ✅",
            UserAction::ClaimReward => "Reward Claimed ✅",
            UserAction::Refresh => "Data Fetched ✅",
        }
    }

    /// Notice shown when the action definitively fails.
    pub fn failure_notice(self) -> &'static str {
        match self {
            UserAction::SetupAccount => "Account setup error ❌",
            UserAction::Deposit => "Stake error ❌",
            UserAction::Withdraw => "Unstake error ❌",
            UserAction::ClaimReward => "Claim error ❌",
            UserAction::Refresh => "Fetch error ❌",
        }
    }

    /// Notice shown when the action may have applied but was never confirmed.
    /// Deliberately distinct from both the success and the failure wording.
    pub fn unconfirmed_notice(self) -> String {
        format!("{} submitted, confirmation unknown ⚠️", self.verb())
    }
}

/// One state-changing program call, validated and ready to submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationRequest {
    SetupAccount,
    Deposit { lamports: u64 },
    Withdraw { lamports: u64 },
    ClaimReward,
}

impl OperationRequest {
    pub fn action(&self) -> UserAction {
        match self {
            OperationRequest::SetupAccount => UserAction::SetupAccount,
            OperationRequest::Deposit { .. } => UserAction::Deposit,
            OperationRequest::Withdraw { .. } => UserAction::Withdraw,
            OperationRequest::ClaimReward => UserAction::ClaimReward,
        }
    }

    /// Amount carried by the operation, if its kind takes one.
    pub fn lamports(&self) -> Option<u64> {
        match self {
            OperationRequest::Deposit { lamports } | OperationRequest::Withdraw { lamports } => {
                Some(*lamports)
            },
            _ => None,
        }
    }

    pub fn activity_kind(&self) -> ActivityKind {
        match self {
            OperationRequest::SetupAccount => ActivityKind::SetupAccount,
            OperationRequest::Deposit { .. } => ActivityKind::Deposit,
            OperationRequest::Withdraw { .. } => ActivityKind::Withdraw,
            OperationRequest::ClaimReward => ActivityKind::ClaimReward,
        }
    }
}

/// The authoritative stake record, exactly as the program stores it.
/// Monetary fields are lamports; conversion to SOL happens only when a
/// `PositionView` is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeRecord {
    pub owner: Pubkey,
    pub amount: u64,
    pub reward: u64,
    pub claimed_reward: u64,
    pub last_stake_time: i64,
    pub total_deposited: u64,
    pub total_withdrawn: u64,
    pub total_rewards_earned: u64,
}

/// Display snapshot of a stake record, SOL amounts at four decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionView {
    pub owner: String,
    pub staked_sol: String,
    pub unclaimed_reward_sol: String,
    pub claimed_reward_sol: String,
    pub total_deposited_sol: String,
    pub total_withdrawn_sol: String,
    pub total_rewards_earned_sol: String,
    pub last_activity_unix: i64,
}

/// Result of a record fetch at the ledger boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFetch {
    Found(StakeRecord),
    /// The record does not exist (account never set up).
    Missing,
}

/// One externally observed transaction touching the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord {
    pub signature: Signature,
    pub slot: u64,
    pub block_time: Option<i64>,
    pub failed: bool,
}

/// Provenance-tagged kind of a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    SetupAccount,
    Deposit,
    Withdraw,
    ClaimReward,
    /// Observed on-chain rather than performed by this session.
    External,
}

/// One line of the rolling activity log.
///
/// External entries carry the transaction signature so the event can be
/// looked up on a public explorer; optimistic entries (appended locally on
/// confirmed success) carry the amount instead. The two provenances are not
/// merged or de-duplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub kind: ActivityKind,
    pub amount_lamports: Option<u64>,
    pub timestamp: i64,
    pub external_ref: Option<Signature>,
}

impl HistoryEntry {
    pub fn external(raw: ActivityRecord) -> Self {
        Self {
            kind: ActivityKind::External,
            amount_lamports: None,
            timestamp: raw.block_time.unwrap_or(0),
            external_ref: Some(raw.signature),
        }
    }

    pub fn optimistic(kind: ActivityKind, amount_lamports: Option<u64>, timestamp: i64) -> Self {
        Self {
            kind,
            amount_lamports,
            timestamp,
            external_ref: None,
        }
    }
}

/// Handle to a submitted but not yet confirmed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReceipt {
    pub signature: Signature,
}

/// What the remote ledger reports for a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmStatus {
    Confirmed,
    StillPending,
    Rejected(String),
}

/// Marker for the one in-flight operation. Its presence in the submitter's
/// slot is what serializes user actions.
#[derive(Debug, Clone, Copy)]
pub struct PendingOperation {
    pub kind: UserAction,
    pub started_at: Instant,
}

/// Terminal classification of one driven operation.
#[derive(Debug)]
pub enum OperationOutcome {
    /// The ledger confirmed the operation; the log and snapshot reflect it.
    Succeeded { receipt: PendingReceipt },
    /// Definite failure; no local state changed.
    Failed(crate::error::StakeHubError),
    /// The transport faulted in a way consistent with the operation having
    /// already applied. Neither the log nor the snapshot is touched.
    AmbiguousFailure(crate::error::StakeHubError),
}
