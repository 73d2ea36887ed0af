use crate::core::connection::LedgerConnection;
use crate::error::{Result, StakeHubError};
use crate::types::{PositionView, RecordFetch, StakeRecord};
use crate::utils::format_sol;
use solana_sdk::pubkey::Pubkey;

/// Result of one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The authoritative record was fetched and the snapshot replaced.
    Updated,
    /// The record does not exist yet. Recoverable: the prior snapshot (or
    /// its absence) is kept.
    NoRecord,
}

/// Mirrors the authoritative record into a local display snapshot.
///
/// The snapshot is replaced wholesale on success and left untouched on any
/// miss or fault; it is never partially written.
#[derive(Debug, Default)]
pub struct PositionReconciler {
    snapshot: Option<StakeRecord>,
}

impl PositionReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn refresh(
        &mut self,
        connection: &dyn LedgerConnection,
        address: &Pubkey,
    ) -> Result<RefreshOutcome> {
        let fetched = connection
            .fetch_record(address)
            .await
            .map_err(|fault| StakeHubError::FetchFailed(fault.to_string()))?;
        match fetched {
            RecordFetch::Found(record) => {
                self.snapshot = Some(record);
                Ok(RefreshOutcome::Updated)
            },
            RecordFetch::Missing => Ok(RefreshOutcome::NoRecord),
        }
    }

    /// The last successfully fetched record, still in integral units.
    pub fn snapshot(&self) -> Option<&StakeRecord> {
        self.snapshot.as_ref()
    }

    /// Render the snapshot in decimal display units. Conversion to SOL at
    /// four decimal places happens only here, at the presentation boundary.
    pub fn view(&self) -> Option<PositionView> {
        self.snapshot.as_ref().map(|record| PositionView {
            owner: record.owner.to_string(),
            staked_sol: format_sol(record.amount),
            unclaimed_reward_sol: format_sol(record.reward),
            claimed_reward_sol: format_sol(record.claimed_reward),
            total_deposited_sol: format_sol(record.total_deposited),
            total_withdrawn_sol: format_sol(record.total_withdrawn),
            total_rewards_earned_sol: format_sol(record.total_rewards_earned),
            last_activity_unix: record.last_stake_time,
        })
    }
}
