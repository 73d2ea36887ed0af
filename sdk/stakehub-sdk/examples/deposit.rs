// Example: stake an amount given on the command line.
//
//     cargo run --example deposit -- 2.5

use stakehub_sdk::{LocalKeypairWallet, OperationOutcome, RpcLedgerConnection, StakeHubClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let amount = std::env::args().nth(1).unwrap_or_else(|| "0.1".to_string());
    let rpc_url =
        std::env::var("RPC_URL").unwrap_or_else(|_| "https://api.devnet.solana.com".to_string());
    let keypair_path =
        std::env::var("KEYPAIR").unwrap_or_else(|_| "id.json".to_string());

    let wallet = LocalKeypairWallet::from_file(&keypair_path)?;
    let mut client = StakeHubClient::new(RpcLedgerConnection::new(rpc_url));
    client.connect(&wallet).await?;

    match client.deposit(&amount).await? {
        OperationOutcome::Succeeded { receipt } => {
            println!("Staked {} SOL: {}", amount, receipt.signature);
        },
        OperationOutcome::Failed(error) => {
            println!("Stake failed: {}", error);
        },
        OperationOutcome::AmbiguousFailure(error) => {
            println!("Outcome unknown, check the explorer before retrying: {}", error);
        },
    }

    if let Some(notice) = client.notice().await {
        println!("{}", notice);
    }

    Ok(())
}
