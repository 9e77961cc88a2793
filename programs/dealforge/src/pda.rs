//! Off-chain derivation of every address the program touches.
//!
//! Anyone holding a maker's public key and an offer id can rebuild the offer
//! and vault addresses without an index; the program checks the same seeds on
//! every instruction.

use anchor_lang::prelude::*;
use anchor_spl::associated_token::get_associated_token_address_with_program_id;

use crate::{MAKER_COUNTER_SEED, OFFER_SEED};

/// Address and bump of the offer `id` created by `maker`.
pub fn offer_address(maker: &Pubkey, id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[OFFER_SEED, maker.as_ref(), id.to_le_bytes().as_ref()],
        &crate::ID,
    )
}

/// Vault holding the escrowed tokens: the offer's associated token account for
/// `offered_mint` under `token_program`.
pub fn vault_address(offer: &Pubkey, offered_mint: &Pubkey, token_program: &Pubkey) -> Pubkey {
    get_associated_token_address_with_program_id(offer, offered_mint, token_program)
}

/// Address and bump of `maker`'s offer counter.
pub fn maker_counter_address(maker: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[MAKER_COUNTER_SEED, maker.as_ref()], &crate::ID)
}
