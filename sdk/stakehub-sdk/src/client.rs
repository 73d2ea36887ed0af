use crate::core::connection::LedgerConnection;
use crate::core::wallet::WalletConnector;
use crate::error::{Result, StakeHubError};
use crate::history::ActivityLog;
use crate::notify::NoticeBoard;
use crate::reconciler::{PositionReconciler, RefreshOutcome};
use crate::session::{SessionIdentity, StakeAccount};
use crate::submitter::OperationSubmitter;
use crate::types::{
    HistoryEntry, OperationOutcome, OperationRequest, PendingOperation, PositionView, StakeRecord,
    UserAction,
};
use crate::utils::parse_sol_amount;

/// Facade over one session's interaction with its stake record.
///
/// Owns the connection, the session identity, and every piece of local
/// state (snapshot, activity log, notice board). The presentation layer
/// calls the operations below and reads the accessors; local precondition
/// failures come back as typed errors with no state change, while every
/// remote failure is classified into the returned outcome and a posted
/// notice.
pub struct StakeHubClient<C: LedgerConnection> {
    connection: C,
    session: Option<SessionIdentity>,
    submitter: OperationSubmitter,
    reconciler: PositionReconciler,
    history: ActivityLog,
    notices: NoticeBoard,
}

impl<C: LedgerConnection> StakeHubClient<C> {
    pub fn new(connection: C) -> Self {
        Self {
            connection,
            session: None,
            submitter: OperationSubmitter::new(),
            reconciler: PositionReconciler::new(),
            history: ActivityLog::new(),
            notices: NoticeBoard::new(),
        }
    }

    /// Run the wallet handshake, derive the record address, and perform the
    /// initial history pull and reconciliation.
    ///
    /// `WalletUnavailable` is fatal for the session. Failures of the
    /// initial pulls are not: prior (empty) state is kept and a notice is
    /// posted.
    pub async fn connect(&mut self, connector: &dyn WalletConnector) -> Result<()> {
        if self.session.is_some() {
            return Err(StakeHubError::AlreadyConnected);
        }
        let session = SessionIdentity::establish(connector).await?;
        self.notices.post("Wallet connected ✅").await;

        let address = session.account().address;
        if let Err(err) = self.history.initialize(&self.connection, &address).await {
            tracing::warn!(%err, "initial history pull failed");
            self.notices
                .post(UserAction::Refresh.failure_notice())
                .await;
        }
        match self.reconciler.refresh(&self.connection, &address).await {
            Ok(RefreshOutcome::Updated) => {},
            Ok(RefreshOutcome::NoRecord) => {
                self.notices.post("No data yet").await;
            },
            Err(err) => {
                tracing::warn!(%err, "initial reconciliation failed");
                self.notices
                    .post(UserAction::Refresh.failure_notice())
                    .await;
            },
        }

        self.session = Some(session);
        Ok(())
    }

    /// Create the stake record for this user.
    pub async fn setup_account(&mut self) -> Result<OperationOutcome> {
        self.run_operation(OperationRequest::SetupAccount).await
    }

    /// Stake `amount` SOL, given as user-entered text.
    pub async fn deposit(&mut self, amount: &str) -> Result<OperationOutcome> {
        let lamports = parse_sol_amount(amount)?;
        self.run_operation(OperationRequest::Deposit { lamports })
            .await
    }

    /// Unstake `amount` SOL, given as user-entered text.
    pub async fn withdraw(&mut self, amount: &str) -> Result<OperationOutcome> {
        let lamports = parse_sol_amount(amount)?;
        self.run_operation(OperationRequest::Withdraw { lamports })
            .await
    }

    /// Claim all accrued rewards.
    pub async fn claim_reward(&mut self) -> Result<OperationOutcome> {
        self.run_operation(OperationRequest::ClaimReward).await
    }

    /// User-triggered reconciliation. Takes the single-flight slot like the
    /// submit operations do.
    pub async fn refresh(&mut self) -> Result<()> {
        let session = self.session.as_ref().ok_or(StakeHubError::NotConnected)?;
        let address = session.account().address;
        let _guard = self.submitter.begin(UserAction::Refresh)?;

        match self.reconciler.refresh(&self.connection, &address).await {
            Ok(RefreshOutcome::Updated) => {
                self.notices
                    .post(UserAction::Refresh.success_notice())
                    .await;
            },
            Ok(RefreshOutcome::NoRecord) => {
                self.notices.post("No data yet").await;
            },
            Err(err) => {
                tracing::warn!(%err, "manual refresh failed");
                self.notices
                    .post(UserAction::Refresh.failure_notice())
                    .await;
            },
        }
        Ok(())
    }

    async fn run_operation(&mut self, op: OperationRequest) -> Result<OperationOutcome> {
        let session = self.session.as_ref().ok_or(StakeHubError::NotConnected)?;
        self.submitter
            .execute(
                &self.connection,
                op,
                session,
                &mut self.history,
                &mut self.reconciler,
                &self.notices,
            )
            .await
    }

    pub fn session(&self) -> Option<&SessionIdentity> {
        self.session.as_ref()
    }

    pub fn account(&self) -> Option<&StakeAccount> {
        self.session.as_ref().map(SessionIdentity::account)
    }

    /// The display snapshot, if a record has been fetched this session.
    pub fn position(&self) -> Option<PositionView> {
        self.reconciler.view()
    }

    /// The raw record, still in integral units.
    pub fn snapshot(&self) -> Option<&StakeRecord> {
        self.reconciler.snapshot()
    }

    /// Activity log entries, newest first.
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.entries()
    }

    /// The live notice, if any.
    pub async fn notice(&self) -> Option<String> {
        self.notices.current().await
    }

    /// The operation currently in flight, if any. While this is `Some`,
    /// entry points should be disabled.
    pub fn pending_operation(&self) -> Option<PendingOperation> {
        self.submitter.pending()
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }
}
