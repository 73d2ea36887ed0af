use crate::core::constants::STAKE_PROGRAM_ID;
use crate::types::OperationRequest;
use crate::utils::derive_stake_address;
use solana_sdk::hash::hashv;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;

/// First eight bytes of sha256("global:<name>"), the program's method
/// selector.
fn method_selector(name: &str) -> [u8; 8] {
    let hash = hashv(&[b"global:", name.as_bytes()]);
    let mut selector = [0u8; 8];
    selector.copy_from_slice(&hash.to_bytes()[..8]);
    selector
}

pub fn initialize(user: &Pubkey) -> Instruction {
    let (stake_account, _bump) = derive_stake_address(user);

    let accounts = vec![
        AccountMeta::new(stake_account, false),
        AccountMeta::new(*user, true),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    Instruction {
        program_id: STAKE_PROGRAM_ID,
        accounts,
        data: method_selector("initialize").to_vec(),
    }
}

pub fn stake(user: &Pubkey, lamports: u64) -> Instruction {
    let (stake_account, _bump) = derive_stake_address(user);

    let mut data = method_selector("stake").to_vec();
    data.extend_from_slice(&borsh::to_vec(&lamports).unwrap());

    let accounts = vec![
        AccountMeta::new(stake_account, false),
        AccountMeta::new_readonly(*user, true),
    ];

    Instruction {
        program_id: STAKE_PROGRAM_ID,
        accounts,
        data,
    }
}

pub fn unstake(user: &Pubkey, lamports: u64) -> Instruction {
    let (stake_account, _bump) = derive_stake_address(user);

    let mut data = method_selector("unstake").to_vec();
    data.extend_from_slice(&borsh::to_vec(&lamports).unwrap());

    let accounts = vec![
        AccountMeta::new(stake_account, false),
        AccountMeta::new_readonly(*user, true),
    ];

    Instruction {
        program_id: STAKE_PROGRAM_ID,
        accounts,
        data,
    }
}

pub fn claim_reward(user: &Pubkey) -> Instruction {
    let (stake_account, _bump) = derive_stake_address(user);

    let accounts = vec![
        AccountMeta::new(stake_account, false),
        AccountMeta::new_readonly(*user, true),
    ];

    Instruction {
        program_id: STAKE_PROGRAM_ID,
        accounts,
        data: method_selector("claim_reward").to_vec(),
    }
}

/// Build the instruction for a validated operation.
pub fn for_operation(op: &OperationRequest, user: &Pubkey) -> Instruction {
    match op {
        OperationRequest::SetupAccount => initialize(user),
        OperationRequest::Deposit { lamports } => stake(user, *lamports),
        OperationRequest::Withdraw { lamports } => unstake(user, *lamports),
        OperationRequest::ClaimReward => claim_reward(user),
    }
}
