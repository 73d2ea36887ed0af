use crate::core::wallet::WalletSigner;
use crate::types::{ActivityRecord, ConfirmStatus, OperationRequest, PendingReceipt, RecordFetch};
use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Structured classification of a transport-layer failure.
///
/// The submitter only cares whether a fault is ambiguous: an ambiguous fault
/// means the operation may have been applied even though no confirmation was
/// observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// The node reported the transaction as already processed; an identical
    /// submission has landed before this one was acknowledged.
    AlreadyProcessed,
    /// The send itself failed after the transaction left this client; it may
    /// still reach the cluster.
    SendUnconfirmed,
    /// Definite failure; the operation was not applied.
    Rejected,
    /// The service could not be reached for a read.
    Unavailable,
}

impl FaultKind {
    pub fn is_ambiguous(self) -> bool {
        matches!(self, FaultKind::AlreadyProcessed | FaultKind::SendUnconfirmed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportFault {
    pub kind: FaultKind,
    pub message: String,
}

impl TransportFault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        self.kind.is_ambiguous()
    }
}

/// Typed contract against the remote ledger service.
///
/// Implementations perform no business validation; record correctness is the
/// remote program's responsibility. Callers must treat the boundary as
/// untrusted for latency and ordering: confirmation can take an unbounded
/// (though typically short) time, and a submission that appears to fail may
/// still land later.
#[async_trait]
pub trait LedgerConnection: Send + Sync {
    /// Fetch the stake record at `address`, if it exists.
    async fn fetch_record(&self, address: &Pubkey) -> Result<RecordFetch, TransportFault>;

    /// Most recent transactions touching `address`, newest first, at most
    /// `limit` of them.
    async fn fetch_recent_activity(
        &self,
        address: &Pubkey,
        limit: usize,
    ) -> Result<Vec<ActivityRecord>, TransportFault>;

    /// Sign and send one operation. The authorizer is opaque to the core.
    async fn submit(
        &self,
        op: &OperationRequest,
        authorizer: &dyn WalletSigner,
    ) -> Result<PendingReceipt, TransportFault>;

    /// Ask the ledger whether a submitted transaction has been applied.
    async fn confirm(&self, receipt: &PendingReceipt) -> Result<ConfirmStatus, TransportFault>;
}
