use crate::error::{Result, StakeHubError};
use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{read_keypair_file, Keypair, Signature, Signer};
use std::fmt;
use std::sync::Arc;

/// Abstraction for an entity that can authorize stake operations.
/// This allows the SDK to work with:
/// 1. Local Keypairs (backend/CLI)
/// 2. Wallet adapters (frontend flows)
#[async_trait]
pub trait WalletSigner: Send + Sync {
    fn pubkey(&self) -> Pubkey;

    /// Sign a serialized transaction message.
    async fn sign_message(&self, message: &[u8]) -> std::result::Result<Signature, String>;
}

/// Discovery/handshake boundary for the wallet extension.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Returns the connected session, or `None` when no wallet capability is
    /// present.
    async fn connect(&self) -> Option<WalletSession>;
}

/// An authenticated wallet, held for the lifetime of the session. The
/// authorizer is never persisted and never inspected by the core.
#[derive(Clone)]
pub struct WalletSession {
    pub user_address: Pubkey,
    pub authorizer: Arc<dyn WalletSigner>,
}

impl fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSession")
            .field("user_address", &self.user_address)
            .finish_non_exhaustive()
    }
}

/// Keypair-backed wallet for CLI and test use.
pub struct LocalKeypairWallet {
    signer: Arc<KeypairAuthorizer>,
}

struct KeypairAuthorizer {
    keypair: Keypair,
}

#[async_trait]
impl WalletSigner for KeypairAuthorizer {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    async fn sign_message(&self, message: &[u8]) -> std::result::Result<Signature, String> {
        Ok(self.keypair.sign_message(message))
    }
}

impl LocalKeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self {
            signer: Arc::new(KeypairAuthorizer { keypair }),
        }
    }

    /// Load the keypair from a Solana CLI keyfile. A missing or unreadable
    /// file means the wallet capability is absent.
    pub fn from_file(path: &str) -> Result<Self> {
        let keypair = read_keypair_file(path).map_err(|_| StakeHubError::WalletUnavailable)?;
        Ok(Self::new(keypair))
    }

    pub fn pubkey(&self) -> Pubkey {
        self.signer.pubkey()
    }
}

#[async_trait]
impl WalletConnector for LocalKeypairWallet {
    async fn connect(&self) -> Option<WalletSession> {
        Some(WalletSession {
            user_address: self.signer.pubkey(),
            authorizer: self.signer.clone(),
        })
    }
}
