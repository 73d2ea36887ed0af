use crate::core::connection::{LedgerConnection, TransportFault};
use crate::core::constants::CONFIRM_POLL_INTERVAL;
use crate::error::{Result, StakeHubError};
use crate::history::ActivityLog;
use crate::notify::NoticeBoard;
use crate::reconciler::PositionReconciler;
use crate::session::SessionIdentity;
use crate::types::{
    ConfirmStatus, HistoryEntry, OperationOutcome, OperationRequest, PendingOperation,
    PendingReceipt, UserAction,
};
use crate::utils::unix_now;
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

/// Serializes user actions and drives one submission at a time through
/// submit, confirmation, and outcome classification.
///
/// Lifecycle: Idle -> Submitting -> AwaitingConfirmation ->
/// {Succeeded, AmbiguousFailure, Failed} -> Idle. The single-flight slot is
/// installed on entry to Submitting and released on every exit path.
#[derive(Debug, Default)]
pub struct OperationSubmitter {
    pending: Mutex<Option<PendingOperation>>,
}

/// Releases the single-flight slot when dropped, whatever path the
/// operation took out of the state machine.
pub(crate) struct FlightGuard<'a> {
    slot: &'a Mutex<Option<PendingOperation>>,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        *lock_slot(self.slot) = None;
    }
}

fn lock_slot(slot: &Mutex<Option<PendingOperation>>) -> MutexGuard<'_, Option<PendingOperation>> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl OperationSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the pending operation, rejecting (not queueing) if one is
    /// already in flight.
    pub(crate) fn begin(&self, action: UserAction) -> Result<FlightGuard<'_>> {
        let mut slot = lock_slot(&self.pending);
        if slot.is_some() {
            return Err(StakeHubError::OperationInFlight);
        }
        *slot = Some(PendingOperation {
            kind: action,
            started_at: Instant::now(),
        });
        Ok(FlightGuard {
            slot: &self.pending,
        })
    }

    /// The operation currently holding the single-flight slot, if any.
    pub fn pending(&self) -> Option<PendingOperation> {
        *lock_slot(&self.pending)
    }

    /// Drive one operation to a terminal outcome.
    ///
    /// On confirmed success the optimistic history entry is recorded, a
    /// reconciliation is triggered, and the success notice posted. A
    /// definite failure posts its notice and touches nothing else. An
    /// ambiguous fault posts the distinct unconfirmed notice and
    /// deliberately skips both the history append and the refresh, since
    /// the true outcome is unknown.
    pub async fn execute(
        &self,
        connection: &dyn LedgerConnection,
        op: OperationRequest,
        session: &SessionIdentity,
        history: &mut ActivityLog,
        reconciler: &mut PositionReconciler,
        notices: &NoticeBoard,
    ) -> Result<OperationOutcome> {
        let action = op.action();
        let _guard = self.begin(action)?;

        tracing::info!(action = action.label(), "submitting operation");
        let receipt = match connection.submit(&op, session.authorizer()).await {
            Ok(receipt) => receipt,
            Err(fault) => return Ok(self.classify_submit_fault(action, fault, notices).await),
        };

        match self.await_confirmation(connection, &receipt).await {
            ConfirmOutcome::Confirmed => {
                tracing::info!(signature = %receipt.signature, "operation confirmed");
                history.record(HistoryEntry::optimistic(
                    op.activity_kind(),
                    op.lamports(),
                    unix_now(),
                ));
                notices.post(action.success_notice()).await;
                let address = session.account().address;
                if let Err(err) = reconciler.refresh(connection, &address).await {
                    tracing::warn!(%err, "post-operation refresh failed");
                    notices.post(UserAction::Refresh.failure_notice()).await;
                }
                Ok(OperationOutcome::Succeeded { receipt })
            },
            ConfirmOutcome::Rejected(reason) => {
                tracing::warn!(signature = %receipt.signature, %reason, "operation rejected");
                notices.post(action.failure_notice()).await;
                Ok(OperationOutcome::Failed(StakeHubError::SubmissionRejected(
                    reason,
                )))
            },
            ConfirmOutcome::Unknown(fault) => {
                tracing::warn!(signature = %receipt.signature, %fault, "confirmation unobtainable");
                notices.post(action.unconfirmed_notice()).await;
                Ok(OperationOutcome::AmbiguousFailure(
                    StakeHubError::AmbiguousSubmission(fault.to_string()),
                ))
            },
        }
    }

    async fn classify_submit_fault(
        &self,
        action: UserAction,
        fault: TransportFault,
        notices: &NoticeBoard,
    ) -> OperationOutcome {
        if fault.is_ambiguous() {
            tracing::warn!(%fault, "submission outcome unknown");
            notices.post(action.unconfirmed_notice()).await;
            OperationOutcome::AmbiguousFailure(StakeHubError::AmbiguousSubmission(
                fault.to_string(),
            ))
        } else {
            tracing::warn!(%fault, "submission rejected");
            notices.post(action.failure_notice()).await;
            OperationOutcome::Failed(StakeHubError::SubmissionRejected(fault.message))
        }
    }

    /// Poll the ledger until it reports a terminal status. How long the
    /// remote keeps answering `StillPending` is its policy, not ours.
    async fn await_confirmation(
        &self,
        connection: &dyn LedgerConnection,
        receipt: &PendingReceipt,
    ) -> ConfirmOutcome {
        loop {
            match connection.confirm(receipt).await {
                Ok(ConfirmStatus::Confirmed) => return ConfirmOutcome::Confirmed,
                Ok(ConfirmStatus::Rejected(reason)) => return ConfirmOutcome::Rejected(reason),
                Ok(ConfirmStatus::StillPending) => {
                    tokio::time::sleep(CONFIRM_POLL_INTERVAL).await;
                },
                // The transaction already left this client; a transport
                // fault here no longer implies the operation failed.
                Err(fault) => return ConfirmOutcome::Unknown(fault),
            }
        }
    }
}

enum ConfirmOutcome {
    Confirmed,
    Rejected(String),
    Unknown(TransportFault),
}
