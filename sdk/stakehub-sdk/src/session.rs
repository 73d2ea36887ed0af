use crate::core::wallet::{WalletConnector, WalletSession, WalletSigner};
use crate::error::{Result, StakeHubError};
use crate::utils::derive_stake_address;
use solana_sdk::pubkey::Pubkey;

/// The session's derived stake record address.
///
/// A pure function of the owner: recomputed whenever the owner changes,
/// never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeAccount {
    /// PDA that addresses the record on the ledger.
    pub address: Pubkey,

    /// The user the record belongs to.
    pub owner: Pubkey,

    /// Bump seed of the derivation.
    pub bump: u8,
}

impl StakeAccount {
    pub fn derive(owner: &Pubkey) -> Self {
        let (address, bump) = derive_stake_address(owner);
        Self {
            address,
            owner: *owner,
            bump,
        }
    }
}

/// The authenticated user and their derived record, fixed for the process
/// lifetime of the session. Read-only after creation.
#[derive(Debug)]
pub struct SessionIdentity {
    wallet: WalletSession,
    account: StakeAccount,
}

impl SessionIdentity {
    /// Run the wallet handshake and derive the session's record address.
    ///
    /// Fails with `WalletUnavailable` when no wallet capability is present;
    /// that failure is fatal for the session.
    pub async fn establish(connector: &dyn WalletConnector) -> Result<Self> {
        let wallet = connector
            .connect()
            .await
            .ok_or(StakeHubError::WalletUnavailable)?;
        let account = StakeAccount::derive(&wallet.user_address);
        tracing::info!(user = %wallet.user_address, record = %account.address, "session established");
        Ok(Self { wallet, account })
    }

    pub fn user_address(&self) -> Pubkey {
        self.wallet.user_address
    }

    pub fn account(&self) -> &StakeAccount {
        &self.account
    }

    /// The opaque capability that authorizes operations. Held for the
    /// session only, never persisted.
    pub fn authorizer(&self) -> &dyn WalletSigner {
        self.wallet.authorizer.as_ref()
    }
}
