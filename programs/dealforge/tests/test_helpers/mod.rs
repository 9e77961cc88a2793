#![allow(dead_code)]

use anchor_lang::solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, program_pack::Pack, pubkey::Pubkey,
    system_program,
};
use anchor_lang::{AccountDeserialize, InstructionData, ToAccountMetas};
use solana_program_test::{
    processor, BanksClientError, ProgramTest, ProgramTestBanksClientExt, ProgramTestContext,
};
use solana_sdk::{
    instruction::{Instruction, InstructionError},
    signature::{Keypair, Signer},
    system_instruction,
    transaction::{Transaction, TransactionError},
};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account,
};

/// One token A at 9 decimals
pub const TOKEN_A: u64 = 1_000_000_000;

/// One token B at 9 decimals
pub const TOKEN_B: u64 = 1_000_000_000;

pub const ALICE_INITIAL_TOKEN_A: u64 = 100 * TOKEN_A;
pub const BOB_INITIAL_TOKEN_B: u64 = 10 * TOKEN_B;

// `entry` ties every account lifetime together; `processor!` hands out independent ones.
fn process_instruction(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let accounts: &[AccountInfo] = unsafe { std::mem::transmute(accounts) };
    dealforge::entry(program_id, accounts, data)
}

/// Everything a lifecycle test needs: a running bank, two mints, Alice as the
/// maker holding token A and Bob as the taker holding token B.
pub struct EscrowTestEnvironment {
    pub context: ProgramTestContext,
    pub token_mint_a: Pubkey,
    pub token_mint_b: Pubkey,
    pub alice: Keypair,
    pub bob: Keypair,
    pub alice_token_account_a: Pubkey,
    pub alice_token_account_b: Pubkey,
    pub bob_token_account_a: Pubkey,
    pub bob_token_account_b: Pubkey,
}

/// Accounts touched by one offer
pub struct OfferAccounts {
    pub offer: Pubkey,
    pub vault: Pubkey,
}

pub async fn setup_escrow_test() -> EscrowTestEnvironment {
    let program = ProgramTest::new("dealforge", dealforge::ID, processor!(process_instruction));
    let mut context = program.start_with_context().await;
    let mint_authority = context.payer.insecure_clone();

    let token_mint_a = create_mint(&mut context, &mint_authority).await;
    let token_mint_b = create_mint(&mut context, &mint_authority).await;

    let alice = Keypair::new();
    let bob = Keypair::new();
    for wallet in [&alice, &bob] {
        fund_wallet(&mut context, &wallet.pubkey()).await;
        for mint in [&token_mint_a, &token_mint_b] {
            let create = create_associated_token_account(
                &mint_authority.pubkey(),
                &wallet.pubkey(),
                mint,
                &spl_token::ID,
            );
            send_transaction(&mut context, &[create], &[]).await.unwrap();
        }
    }

    let alice_token_account_a = get_associated_token_address(&alice.pubkey(), &token_mint_a);
    let alice_token_account_b = get_associated_token_address(&alice.pubkey(), &token_mint_b);
    let bob_token_account_a = get_associated_token_address(&bob.pubkey(), &token_mint_a);
    let bob_token_account_b = get_associated_token_address(&bob.pubkey(), &token_mint_b);

    let mint_to_alice = spl_token::instruction::mint_to(
        &spl_token::ID,
        &token_mint_a,
        &alice_token_account_a,
        &mint_authority.pubkey(),
        &[],
        ALICE_INITIAL_TOKEN_A,
    )
    .unwrap();
    let mint_to_bob = spl_token::instruction::mint_to(
        &spl_token::ID,
        &token_mint_b,
        &bob_token_account_b,
        &mint_authority.pubkey(),
        &[],
        BOB_INITIAL_TOKEN_B,
    )
    .unwrap();
    send_transaction(&mut context, &[mint_to_alice, mint_to_bob], &[])
        .await
        .unwrap();

    EscrowTestEnvironment {
        context,
        token_mint_a,
        token_mint_b,
        alice,
        bob,
        alice_token_account_a,
        alice_token_account_b,
        bob_token_account_a,
        bob_token_account_b,
    }
}

async fn create_mint(context: &mut ProgramTestContext, authority: &Keypair) -> Pubkey {
    let mint = Keypair::new();
    let rent = context
        .banks_client
        .get_rent()
        .await
        .unwrap()
        .minimum_balance(spl_token::state::Mint::LEN);
    let instructions = [
        system_instruction::create_account(
            &authority.pubkey(),
            &mint.pubkey(),
            rent,
            spl_token::state::Mint::LEN as u64,
            &spl_token::ID,
        ),
        spl_token::instruction::initialize_mint(
            &spl_token::ID,
            &mint.pubkey(),
            &authority.pubkey(),
            None,
            9,
        )
        .unwrap(),
    ];
    send_transaction(context, &instructions, &[&mint]).await.unwrap();
    mint.pubkey()
}

async fn fund_wallet(context: &mut ProgramTestContext, wallet: &Pubkey) {
    let transfer = system_instruction::transfer(&context.payer.pubkey(), wallet, 10_000_000_000);
    send_transaction(context, &[transfer], &[]).await.unwrap();
}

/// Signs with the bank's payer plus `signers` on a fresh blockhash, so that
/// resending an identical instruction is a new transaction.
pub async fn send_transaction(
    context: &mut ProgramTestContext,
    instructions: &[Instruction],
    signers: &[&Keypair],
) -> Result<(), BanksClientError> {
    let blockhash = context
        .banks_client
        .get_new_latest_blockhash(&context.last_blockhash)
        .await
        .unwrap();
    context.last_blockhash = blockhash;

    let mut all_signers: Vec<&Keypair> = vec![&context.payer];
    all_signers.extend_from_slice(signers);
    let transaction = Transaction::new_signed_with_payer(
        instructions,
        Some(&context.payer.pubkey()),
        &all_signers,
        blockhash,
    );
    context.banks_client.process_transaction(transaction).await
}

/// Custom error code a failed transaction ended with
pub fn custom_error_code(err: BanksClientError) -> u32 {
    match err.unwrap() {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => code,
        other => panic!("expected a custom program error, got {other:?}"),
    }
}

pub async fn token_balance(context: &mut ProgramTestContext, token_account: Pubkey) -> u64 {
    let account = context
        .banks_client
        .get_account(token_account)
        .await
        .unwrap()
        .expect("token account exists");
    spl_token::state::Account::unpack(&account.data)
        .unwrap()
        .amount
}

pub async fn account_exists(context: &mut ProgramTestContext, address: Pubkey) -> bool {
    context
        .banks_client
        .get_account(address)
        .await
        .unwrap()
        .is_some()
}

pub async fn fetch_offer(context: &mut ProgramTestContext, offer: Pubkey) -> dealforge::Offer {
    let account = context
        .banks_client
        .get_account(offer)
        .await
        .unwrap()
        .expect("offer exists");
    dealforge::Offer::try_deserialize(&mut account.data.as_slice()).unwrap()
}

pub fn offer_accounts(env: &EscrowTestEnvironment, id: u64) -> OfferAccounts {
    let (offer, _) = dealforge::pda::offer_address(&env.alice.pubkey(), id);
    let vault = dealforge::pda::vault_address(&offer, &env.token_mint_a, &spl_token::ID);
    OfferAccounts { offer, vault }
}

pub fn build_make_offer_instruction(
    env: &EscrowTestEnvironment,
    id: u64,
    offered_amount: u64,
    requested_amount: u64,
) -> Instruction {
    let OfferAccounts { offer, vault } = offer_accounts(env, id);
    let accounts = dealforge::accounts::MakeOffer {
        maker: env.alice.pubkey(),
        offered_mint: env.token_mint_a,
        requested_mint: env.token_mint_b,
        maker_offered_ata: env.alice_token_account_a,
        offer,
        vault,
        associated_token_program: spl_associated_token_account::ID,
        token_program: spl_token::ID,
        system_program: system_program::ID,
    };
    Instruction {
        program_id: dealforge::ID,
        accounts: accounts.to_account_metas(None),
        data: dealforge::instruction::MakeOffer {
            id,
            offered_amount,
            requested_amount,
        }
        .data(),
    }
}

/// Counted offer by Alice, addressed from the counter value the client expects
pub fn build_make_counted_offer_instruction(
    env: &EscrowTestEnvironment,
    expected_id: u64,
    offered_amount: u64,
    requested_amount: u64,
) -> Instruction {
    let OfferAccounts { offer, vault } = offer_accounts(env, expected_id);
    let (counter, _) = dealforge::pda::maker_counter_address(&env.alice.pubkey());
    let accounts = dealforge::accounts::MakeCountedOffer {
        maker: env.alice.pubkey(),
        offered_mint: env.token_mint_a,
        requested_mint: env.token_mint_b,
        maker_offered_ata: env.alice_token_account_a,
        counter,
        offer,
        vault,
        associated_token_program: spl_associated_token_account::ID,
        token_program: spl_token::ID,
        system_program: system_program::ID,
    };
    Instruction {
        program_id: dealforge::ID,
        accounts: accounts.to_account_metas(None),
        data: dealforge::instruction::MakeCountedOffer {
            offered_amount,
            requested_amount,
        }
        .data(),
    }
}

/// Bob takes Alice's offer
pub fn build_take_offer_instruction(env: &EscrowTestEnvironment, offer: &OfferAccounts) -> Instruction {
    let accounts = dealforge::accounts::TakeOffer {
        taker: env.bob.pubkey(),
        maker: env.alice.pubkey(),
        offered_mint: env.token_mint_a,
        requested_mint: env.token_mint_b,
        taker_offered_ata: env.bob_token_account_a,
        taker_requested_ata: env.bob_token_account_b,
        maker_requested_ata: env.alice_token_account_b,
        offer: offer.offer,
        vault: offer.vault,
        associated_token_program: spl_associated_token_account::ID,
        token_program: spl_token::ID,
        system_program: system_program::ID,
    };
    Instruction {
        program_id: dealforge::ID,
        accounts: accounts.to_account_metas(None),
        data: dealforge::instruction::TakeOffer {}.data(),
    }
}

/// Refund signed by `signer`, who claims to be the maker
pub fn build_refund_offer_instruction(
    env: &EscrowTestEnvironment,
    signer: &Pubkey,
    offer: &OfferAccounts,
) -> Instruction {
    let accounts = dealforge::accounts::RefundOffer {
        maker: *signer,
        offered_mint: env.token_mint_a,
        maker_offered_ata: get_associated_token_address(signer, &env.token_mint_a),
        offer: offer.offer,
        vault: offer.vault,
        associated_token_program: spl_associated_token_account::ID,
        token_program: spl_token::ID,
        system_program: system_program::ID,
    };
    Instruction {
        program_id: dealforge::ID,
        accounts: accounts.to_account_metas(None),
        data: dealforge::instruction::RefundOffer {}.data(),
    }
}
