#![allow(dead_code)]

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use stakehub_sdk::core::connection::{LedgerConnection, TransportFault};
use stakehub_sdk::core::wallet::{WalletConnector, WalletSession, WalletSigner};
use stakehub_sdk::types::{
    ActivityRecord, ConfirmStatus, OperationRequest, PendingReceipt, RecordFetch, StakeRecord,
};
use stakehub_sdk::LocalKeypairWallet;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

/// Scripted in-memory ledger implementing the connection boundary.
///
/// Submissions succeed and confirm immediately unless a fault or a
/// confirmation sequence has been planned. A gate can be installed to hold
/// confirmations until the test releases them.
#[derive(Default)]
pub struct MockLedger {
    record: Mutex<Option<StakeRecord>>,
    activity: Mutex<Vec<ActivityRecord>>,
    submit_plan: Mutex<VecDeque<Result<(), TransportFault>>>,
    confirm_plan: Mutex<VecDeque<Result<ConfirmStatus, TransportFault>>>,
    confirm_gate: Mutex<Option<Arc<Notify>>>,
    fetch_record_calls: AtomicUsize,
    submit_calls: AtomicUsize,
    next_signature: AtomicU64,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_record(&self, record: Option<StakeRecord>) {
        *self.record.lock().await = record;
    }

    pub async fn set_activity(&self, activity: Vec<ActivityRecord>) {
        *self.activity.lock().await = activity;
    }

    /// Queue an outcome for the next submission; earlier plans run first.
    pub async fn plan_submit_fault(&self, fault: TransportFault) {
        self.submit_plan.lock().await.push_back(Err(fault));
    }

    /// Queue a result for the next confirmation poll.
    pub async fn plan_confirm(&self, result: Result<ConfirmStatus, TransportFault>) {
        self.confirm_plan.lock().await.push_back(result);
    }

    /// Hold every confirmation poll until the gate is notified.
    pub async fn gate_confirmations(&self, gate: Arc<Notify>) {
        *self.confirm_gate.lock().await = Some(gate);
    }

    pub fn fetch_record_calls(&self) -> usize {
        self.fetch_record_calls.load(Ordering::SeqCst)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    fn make_signature(&self) -> Signature {
        let n = self.next_signature.fetch_add(1, Ordering::SeqCst) + 1;
        let mut bytes = [0u8; 64];
        bytes[..8].copy_from_slice(&n.to_le_bytes());
        Signature::from(bytes)
    }
}

#[async_trait]
impl LedgerConnection for MockLedger {
    async fn fetch_record(&self, _address: &Pubkey) -> Result<RecordFetch, TransportFault> {
        self.fetch_record_calls.fetch_add(1, Ordering::SeqCst);
        Ok(match *self.record.lock().await {
            Some(record) => RecordFetch::Found(record),
            None => RecordFetch::Missing,
        })
    }

    async fn fetch_recent_activity(
        &self,
        _address: &Pubkey,
        limit: usize,
    ) -> Result<Vec<ActivityRecord>, TransportFault> {
        let activity = self.activity.lock().await;
        Ok(activity.iter().take(limit).cloned().collect())
    }

    async fn submit(
        &self,
        _op: &OperationRequest,
        _authorizer: &dyn WalletSigner,
    ) -> Result<PendingReceipt, TransportFault> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        match self.submit_plan.lock().await.pop_front() {
            Some(Err(fault)) => Err(fault),
            _ => Ok(PendingReceipt {
                signature: self.make_signature(),
            }),
        }
    }

    async fn confirm(&self, _receipt: &PendingReceipt) -> Result<ConfirmStatus, TransportFault> {
        let gate = self.confirm_gate.lock().await.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        match self.confirm_plan.lock().await.pop_front() {
            Some(result) => result,
            None => Ok(ConfirmStatus::Confirmed),
        }
    }
}

/// Connector that behaves like a missing wallet extension.
pub struct UnavailableWallet;

#[async_trait]
impl WalletConnector for UnavailableWallet {
    async fn connect(&self) -> Option<WalletSession> {
        None
    }
}

pub fn test_wallet() -> LocalKeypairWallet {
    LocalKeypairWallet::new(Keypair::new())
}

pub fn sample_record(owner: Pubkey) -> StakeRecord {
    StakeRecord {
        owner,
        amount: 5_000_000_000,
        reward: 120_000_000,
        claimed_reward: 30_000_000,
        last_stake_time: 1_700_000_000,
        total_deposited: 7_000_000_000,
        total_withdrawn: 2_000_000_000,
        total_rewards_earned: 150_000_000,
    }
}

/// `count` external activity records, newest first.
pub fn external_activity(count: usize) -> Vec<ActivityRecord> {
    (0..count)
        .map(|i| {
            let mut bytes = [0u8; 64];
            bytes[..8].copy_from_slice(&(1000 + i as u64).to_le_bytes());
            ActivityRecord {
                signature: Signature::from(bytes),
                slot: (1_000 + count - i) as u64,
                block_time: Some(1_700_000_000 + (count - i) as i64),
                failed: false,
            }
        })
        .collect()
}
