use anchor_lang::prelude::*;

/// Leading seed of every offer address: `[OFFER_SEED, maker, id_le_bytes]`.
#[constant]
pub const OFFER_SEED: &[u8] = b"OFFER_SEED";

/// Leading seed of the per-maker counter address: `[MAKER_COUNTER_SEED, maker]`.
#[constant]
pub const MAKER_COUNTER_SEED: &[u8] = b"MAKER_COUNTER_SEED";

pub const ANCHOR_DISCRIMINATOR: usize = 8;
