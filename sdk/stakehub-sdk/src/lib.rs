pub mod client;
pub mod core;
pub mod error;
pub mod history;
pub mod instructions;
pub mod notify;
pub mod reconciler;
pub mod rpc;
pub mod session;
pub mod submitter;
pub mod types;
pub mod utils;

pub use crate::client::StakeHubClient;
pub use crate::core::connection::{FaultKind, LedgerConnection, TransportFault};
pub use crate::core::wallet::{LocalKeypairWallet, WalletConnector, WalletSession, WalletSigner};
pub use crate::error::{Result, StakeHubError};
pub use crate::history::ActivityLog;
pub use crate::notify::NoticeBoard;
pub use crate::reconciler::{PositionReconciler, RefreshOutcome};
pub use crate::rpc::RpcLedgerConnection;
pub use crate::session::{SessionIdentity, StakeAccount};
pub use crate::submitter::OperationSubmitter;
pub use crate::types::{
    ActivityKind, ActivityRecord, ConfirmStatus, HistoryEntry, OperationOutcome, OperationRequest,
    PendingOperation, PendingReceipt, PositionView, RecordFetch, StakeRecord, UserAction,
};
pub use crate::utils::{derive_stake_address, format_sol, parse_sol_amount};
