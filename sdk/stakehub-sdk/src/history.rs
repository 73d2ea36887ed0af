use crate::core::connection::LedgerConnection;
use crate::core::constants::HISTORY_CAPACITY;
use crate::error::{Result, StakeHubError};
use crate::types::HistoryEntry;
use solana_sdk::pubkey::Pubkey;
use std::collections::VecDeque;

/// Bounded rolling log of recent operations, newest first.
///
/// The bound holds after every mutation, not just at display time.
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: VecDeque<HistoryEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the log wholesale with the most recent externally observed
    /// activity for `address`.
    pub async fn initialize(
        &mut self,
        connection: &dyn LedgerConnection,
        address: &Pubkey,
    ) -> Result<()> {
        let raw = connection
            .fetch_recent_activity(address, HISTORY_CAPACITY)
            .await
            .map_err(|fault| StakeHubError::FetchFailed(fault.to_string()))?;
        self.entries = raw
            .into_iter()
            .take(HISTORY_CAPACITY)
            .map(HistoryEntry::external)
            .collect();
        tracing::debug!(entries = self.entries.len(), "activity log initialized");
        Ok(())
    }

    /// Insert at the front and enforce the rolling bound.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
