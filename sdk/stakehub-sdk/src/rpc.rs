use crate::core::connection::{FaultKind, LedgerConnection, TransportFault};
use crate::core::wallet::WalletSigner;
use crate::instructions;
use crate::types::{ActivityRecord, ConfirmStatus, OperationRequest, PendingReceipt, RecordFetch};
use crate::utils::parse_stake_record;
use async_trait::async_trait;
use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_client::GetConfirmedSignaturesForAddress2Config;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::{Transaction, TransactionError};
use std::str::FromStr;

/// `LedgerConnection` backed by a Solana JSON-RPC node at confirmed
/// commitment.
pub struct RpcLedgerConnection {
    rpc: RpcClient,
    commitment: CommitmentConfig,
}

impl RpcLedgerConnection {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        let commitment = CommitmentConfig::confirmed();
        Self {
            rpc: RpcClient::new_with_commitment(rpc_url.into(), commitment),
            commitment,
        }
    }

    /// Classify a failed send into a transport fault.
    ///
    /// Structured classification first. The message-text match below is a
    /// best-effort stand-in for a fault code the RPC interface does not
    /// expose on every duplicate-send path; it only ever downgrades a
    /// failure to "ambiguous", never upgrades one to success.
    fn classify_submit_error(err: ClientError) -> TransportFault {
        if let Some(tx_err) = err.get_transaction_error() {
            return match tx_err {
                TransactionError::AlreadyProcessed => TransportFault::new(
                    FaultKind::AlreadyProcessed,
                    "transaction already processed",
                ),
                other => TransportFault::new(FaultKind::Rejected, other.to_string()),
            };
        }

        let message = err.to_string();
        if message.contains("already been processed") {
            return TransportFault::new(FaultKind::AlreadyProcessed, message);
        }
        match err.kind() {
            ClientErrorKind::Io(_) | ClientErrorKind::Reqwest(_) => {
                TransportFault::new(FaultKind::SendUnconfirmed, message)
            },
            _ => TransportFault::new(FaultKind::Rejected, message),
        }
    }

    fn read_fault(err: ClientError) -> TransportFault {
        TransportFault::new(FaultKind::Unavailable, err.to_string())
    }
}

#[async_trait]
impl LedgerConnection for RpcLedgerConnection {
    async fn fetch_record(&self, address: &Pubkey) -> Result<RecordFetch, TransportFault> {
        let response = self
            .rpc
            .get_account_with_commitment(address, self.commitment)
            .await
            .map_err(Self::read_fault)?;

        match response.value {
            Some(account) => {
                let record = parse_stake_record(&account.data)
                    .map_err(|e| TransportFault::new(FaultKind::Rejected, e.to_string()))?;
                Ok(RecordFetch::Found(record))
            },
            None => Ok(RecordFetch::Missing),
        }
    }

    async fn fetch_recent_activity(
        &self,
        address: &Pubkey,
        limit: usize,
    ) -> Result<Vec<ActivityRecord>, TransportFault> {
        let config = GetConfirmedSignaturesForAddress2Config {
            before: None,
            until: None,
            limit: Some(limit),
            commitment: Some(self.commitment),
        };
        let statuses = self
            .rpc
            .get_signatures_for_address_with_config(address, config)
            .await
            .map_err(Self::read_fault)?;

        let mut records = Vec::with_capacity(statuses.len());
        for status in statuses {
            let signature = Signature::from_str(&status.signature).map_err(|e| {
                TransportFault::new(
                    FaultKind::Unavailable,
                    format!("unparseable signature in activity feed: {e}"),
                )
            })?;
            records.push(ActivityRecord {
                signature,
                slot: status.slot,
                block_time: status.block_time,
                failed: status.err.is_some(),
            });
        }
        Ok(records)
    }

    async fn submit(
        &self,
        op: &OperationRequest,
        authorizer: &dyn WalletSigner,
    ) -> Result<PendingReceipt, TransportFault> {
        let user = authorizer.pubkey();
        let instruction = instructions::for_operation(op, &user);

        // Nothing has been sent yet, so failures up to this point are
        // definite.
        let blockhash = self
            .rpc
            .get_latest_blockhash()
            .await
            .map_err(|e| TransportFault::new(FaultKind::Rejected, e.to_string()))?;

        let mut message = Message::new(&[instruction], Some(&user));
        message.recent_blockhash = blockhash;
        let mut tx = Transaction::new_unsigned(message);
        let signature = authorizer
            .sign_message(&tx.message_data())
            .await
            .map_err(|e| TransportFault::new(FaultKind::Rejected, e))?;
        tx.signatures[0] = signature;

        tracing::debug!(%signature, "sending transaction");
        match self.rpc.send_transaction(&tx).await {
            Ok(signature) => Ok(PendingReceipt { signature }),
            Err(err) => Err(Self::classify_submit_error(err)),
        }
    }

    async fn confirm(&self, receipt: &PendingReceipt) -> Result<ConfirmStatus, TransportFault> {
        let response = self
            .rpc
            .get_signature_statuses(&[receipt.signature])
            .await
            .map_err(Self::read_fault)?;

        let status = response.value.into_iter().next().flatten();
        Ok(match status {
            None => ConfirmStatus::StillPending,
            Some(status) => {
                if let Some(err) = status.err {
                    ConfirmStatus::Rejected(err.to_string())
                } else if status.satisfies_commitment(self.commitment) {
                    ConfirmStatus::Confirmed
                } else {
                    ConfirmStatus::StillPending
                }
            },
        })
    }
}
