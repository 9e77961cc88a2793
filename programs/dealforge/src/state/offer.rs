use anchor_lang::prelude::*;

use crate::{DealForgeError, ANCHOR_DISCRIMINATOR};

/// One pending escrow deal. The account exists only while the deal is open:
/// taking or refunding the offer closes it, together with its vault.
///
/// The vault is not stored; it is the associated token account of this offer's
/// address for `offered_mint`.
#[account]
#[derive(InitSpace)]
pub struct Offer {
    pub id: u64,              // random id, or the maker's counter value
    pub maker: Pubkey,        // creator, the only one who may refund
    pub offered_mint: Pubkey, // token locked in the vault
    pub requested_mint: Pubkey,
    pub offered_amount: u64,
    pub requested_amount: u64,
    pub bump: u8, // bump of the offer address
}

impl Offer {
    pub const SPACE: usize = ANCHOR_DISCRIMINATOR + Offer::INIT_SPACE;

    // Byte offsets into the account data, for memcmp filters on program account scans.
    pub const ID_OFFSET: usize = ANCHOR_DISCRIMINATOR;
    pub const MAKER_OFFSET: usize = Self::ID_OFFSET + 8;
    pub const OFFERED_MINT_OFFSET: usize = Self::MAKER_OFFSET + 32;
    pub const REQUESTED_MINT_OFFSET: usize = Self::OFFERED_MINT_OFFSET + 32;
    pub const OFFERED_AMOUNT_OFFSET: usize = Self::REQUESTED_MINT_OFFSET + 32;
    pub const REQUESTED_AMOUNT_OFFSET: usize = Self::OFFERED_AMOUNT_OFFSET + 8;
    pub const BUMP_OFFSET: usize = Self::REQUESTED_AMOUNT_OFFSET + 8;

    /// Rejects terms that can never settle. Checked before any token moves.
    pub fn check_terms(
        offered_mint: &Pubkey,
        requested_mint: &Pubkey,
        offered_amount: u64,
        requested_amount: u64,
    ) -> Result<()> {
        require!(offered_amount > 0, DealForgeError::InvalidOfferedMintAmount);
        require!(
            requested_amount > 0,
            DealForgeError::InvalidRequestedMintAmount
        );
        require_keys_neq!(
            *offered_mint,
            *requested_mint,
            DealForgeError::InvalidSaleToken
        );
        Ok(())
    }
}
