// Example: connect a local keypair wallet and read the stake position.
//
// RPC_URL and KEYPAIR can be overridden via the environment.

use stakehub_sdk::{LocalKeypairWallet, RpcLedgerConnection, StakeHubClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rpc_url =
        std::env::var("RPC_URL").unwrap_or_else(|_| "https://api.devnet.solana.com".to_string());
    let keypair_path =
        std::env::var("KEYPAIR").unwrap_or_else(|_| "id.json".to_string());

    let wallet = LocalKeypairWallet::from_file(&keypair_path)?;
    let mut client = StakeHubClient::new(RpcLedgerConnection::new(rpc_url));

    client.connect(&wallet).await?;
    println!("Wallet: {}", wallet.pubkey());
    if let Some(account) = client.account() {
        println!("Stake record: {}", account.address);
    }

    match client.position() {
        Some(position) => {
            println!("Staked (SOL): {}", position.staked_sol);
            println!("Unclaimed reward (SOL): {}", position.unclaimed_reward_sol);
            println!("Total deposited (SOL): {}", position.total_deposited_sol);
        },
        None => println!("No data yet"),
    }

    println!("Recent activity:");
    for entry in client.history() {
        match &entry.external_ref {
            Some(signature) => println!("  {:?} {}", entry.kind, signature),
            None => println!("  {:?}", entry.kind),
        }
    }

    Ok(())
}
