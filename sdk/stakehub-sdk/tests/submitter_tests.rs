use stakehub_sdk::types::{ActivityKind, ConfirmStatus, OperationOutcome, OperationRequest};
use stakehub_sdk::{
    ActivityLog, FaultKind, NoticeBoard, OperationSubmitter, PositionReconciler, SessionIdentity,
    StakeHubError, TransportFault,
};
use std::sync::Arc;
use tokio::sync::Notify;

mod common;
use common::{sample_record, test_wallet, MockLedger};

struct Harness {
    ledger: MockLedger,
    session: SessionIdentity,
    submitter: OperationSubmitter,
    history: ActivityLog,
    reconciler: PositionReconciler,
    notices: NoticeBoard,
}

impl Harness {
    async fn new() -> Self {
        let wallet = test_wallet();
        let ledger = MockLedger::new();
        ledger.set_record(Some(sample_record(wallet.pubkey()))).await;
        let session = SessionIdentity::establish(&wallet).await.unwrap();
        Self {
            ledger,
            session,
            submitter: OperationSubmitter::new(),
            history: ActivityLog::new(),
            reconciler: PositionReconciler::new(),
            notices: NoticeBoard::new(),
        }
    }

    async fn run(&mut self, op: OperationRequest) -> Result<OperationOutcome, StakeHubError> {
        self.submitter
            .execute(
                &self.ledger,
                op,
                &self.session,
                &mut self.history,
                &mut self.reconciler,
                &self.notices,
            )
            .await
    }
}

#[tokio::test]
async fn single_flight_rejects_concurrent_actions() {
    let wallet = test_wallet();
    let ledger = MockLedger::new();
    ledger.set_record(Some(sample_record(wallet.pubkey()))).await;
    let session = SessionIdentity::establish(&wallet).await.unwrap();
    let submitter = OperationSubmitter::new();
    let notices = NoticeBoard::new();

    let gate = Arc::new(Notify::new());
    ledger.gate_confirmations(gate.clone()).await;

    let mut history_a = ActivityLog::new();
    let mut reconciler_a = PositionReconciler::new();
    let mut history_b = ActivityLog::new();
    let mut reconciler_b = PositionReconciler::new();

    let (first, second) = tokio::join!(
        submitter.execute(
            &ledger,
            OperationRequest::Deposit {
                lamports: 1_000_000_000,
            },
            &session,
            &mut history_a,
            &mut reconciler_a,
            &notices,
        ),
        async {
            // let the first operation reach its confirmation wait
            tokio::task::yield_now().await;
            assert!(submitter.pending().is_some());
            let second = submitter
                .execute(
                    &ledger,
                    OperationRequest::Withdraw { lamports: 1 },
                    &session,
                    &mut history_b,
                    &mut reconciler_b,
                    &notices,
                )
                .await;
            gate.notify_one();
            second
        }
    );

    assert!(matches!(first, Ok(OperationOutcome::Succeeded { .. })));
    assert!(matches!(second, Err(StakeHubError::OperationInFlight)));
    assert!(submitter.pending().is_none());
    assert_eq!(history_a.len(), 1);
    assert!(history_b.is_empty());
}

#[tokio::test]
async fn send_level_fault_is_ambiguous() {
    let mut h = Harness::new().await;
    h.ledger
        .plan_submit_fault(TransportFault::new(
            FaultKind::SendUnconfirmed,
            "connection reset mid-send",
        ))
        .await;

    let outcome = h
        .run(OperationRequest::Deposit {
            lamports: 2_000_000_000,
        })
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        OperationOutcome::AmbiguousFailure(StakeHubError::AmbiguousSubmission(_))
    ));
    assert!(h.history.is_empty());
    assert_eq!(h.ledger.fetch_record_calls(), 0);
    let notice = h.notices.current().await.unwrap();
    assert!(notice.contains("confirmation unknown"), "{notice}");
    assert!(h.submitter.pending().is_none());
}

#[tokio::test]
async fn definite_submit_rejection_has_no_side_effects() {
    let mut h = Harness::new().await;
    h.ledger
        .plan_submit_fault(TransportFault::new(
            FaultKind::Rejected,
            "insufficient funds for rent",
        ))
        .await;

    let outcome = h
        .run(OperationRequest::Deposit {
            lamports: 1_000_000_000,
        })
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        OperationOutcome::Failed(StakeHubError::SubmissionRejected(_))
    ));
    assert!(h.history.is_empty());
    assert_eq!(h.ledger.fetch_record_calls(), 0);
    assert_eq!(h.notices.current().await.as_deref(), Some("Stake error ❌"));
    assert!(h.submitter.pending().is_none());
}

#[tokio::test]
async fn confirmed_rejection_has_no_side_effects() {
    let mut h = Harness::new().await;
    h.ledger
        .plan_confirm(Ok(ConfirmStatus::Rejected(
            "custom program error: 0x1771".to_string(),
        )))
        .await;

    let outcome = h
        .run(OperationRequest::Withdraw {
            lamports: 500_000_000,
        })
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        OperationOutcome::Failed(StakeHubError::SubmissionRejected(_))
    ));
    assert!(h.history.is_empty());
    assert_eq!(h.ledger.fetch_record_calls(), 0);
    assert_eq!(
        h.notices.current().await.as_deref(),
        Some("Unstake error ❌")
    );
}

#[tokio::test]
async fn fault_while_awaiting_confirmation_is_ambiguous() {
    let mut h = Harness::new().await;
    // the transaction already left the client; even a plain read fault here
    // must not be reported as a definite failure
    h.ledger
        .plan_confirm(Err(TransportFault::new(
            FaultKind::Unavailable,
            "rpc node unreachable",
        )))
        .await;

    let outcome = h
        .run(OperationRequest::Deposit {
            lamports: 1_000_000_000,
        })
        .await
        .unwrap();

    assert!(matches!(outcome, OperationOutcome::AmbiguousFailure(_)));
    assert!(h.history.is_empty());
    assert_eq!(h.ledger.fetch_record_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn confirmation_polls_until_terminal() {
    let mut h = Harness::new().await;
    h.ledger.plan_confirm(Ok(ConfirmStatus::StillPending)).await;
    h.ledger.plan_confirm(Ok(ConfirmStatus::StillPending)).await;

    let outcome = h
        .run(OperationRequest::Deposit {
            lamports: 3_000_000_000,
        })
        .await
        .unwrap();

    assert!(matches!(outcome, OperationOutcome::Succeeded { .. }));
    assert_eq!(h.history.len(), 1);
    assert_eq!(h.ledger.fetch_record_calls(), 1);
}

#[tokio::test]
async fn claim_appends_amountless_entry() {
    let mut h = Harness::new().await;
    let outcome = h.run(OperationRequest::ClaimReward).await.unwrap();
    assert!(matches!(outcome, OperationOutcome::Succeeded { .. }));

    let front = h.history.entries().next().unwrap();
    assert_eq!(front.kind, ActivityKind::ClaimReward);
    assert_eq!(front.amount_lamports, None);
    assert!(front.external_ref.is_none());
    assert_eq!(
        h.notices.current().await.as_deref(),
        Some("Reward Claimed ✅")
    );
}

#[tokio::test]
async fn setup_account_appends_amountless_entry() {
    let mut h = Harness::new().await;
    let outcome = h.run(OperationRequest::SetupAccount).await.unwrap();
    assert!(matches!(outcome, OperationOutcome::Succeeded { .. }));

    let front = h.history.entries().next().unwrap();
    assert_eq!(front.kind, ActivityKind::SetupAccount);
    assert_eq!(front.amount_lamports, None);
    assert_eq!(
        h.notices.current().await.as_deref(),
        Some("Account Setup ✅")
    );
}
