use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use super::shared::fund_vault;
use crate::{Offer, OfferMade, OFFER_SEED};

/// Accounts for `make_offer`, where the caller picks the offer id (normally a random u64).
#[derive(Accounts)]
#[instruction(id: u64)]
pub struct MakeOffer<'info> {
    /// Creates the offer, pays for both new accounts and funds the vault
    #[account(mut)]
    pub maker: Signer<'info>,

    /// Token the maker locks in the vault
    #[account(
        mint::token_program = token_program
    )]
    pub offered_mint: InterfaceAccount<'info, Mint>,

    /// Token the maker wants in return
    #[account(
        mint::token_program = token_program
    )]
    pub requested_mint: InterfaceAccount<'info, Mint>,

    /// The maker's token account the offered tokens are taken from
    #[account(
        mut,
        associated_token::mint = offered_mint,
        associated_token::authority = maker,
        associated_token::token_program = token_program
    )]
    pub maker_offered_ata: InterfaceAccount<'info, TokenAccount>,

    /// The offer record, addressed by the maker and the caller's id
    #[account(
        init, // fails if this (maker, id) pair is already in use
        payer = maker,
        space = Offer::SPACE,
        seeds = [OFFER_SEED, maker.key().as_ref(), id.to_le_bytes().as_ref()],
        bump
    )]
    pub offer: Account<'info, Offer>,

    /// Lockbox for the offered tokens, under the offer's authority so only the
    /// program can release it
    #[account(
        init,
        payer = maker,
        associated_token::mint = offered_mint,
        associated_token::authority = offer,
        associated_token::token_program = token_program
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    /// Creates and derives the vault and other associated token accounts
    pub associated_token_program: Program<'info, AssociatedToken>,
    /// Legacy token program or Token-2022; every mint and token account must belong to it
    pub token_program: Interface<'info, TokenInterface>,
    /// Pays for and allocates new accounts
    pub system_program: Program<'info, System>,
}

impl<'info> MakeOffer<'info> {
    /// Validates the terms and moves the offered tokens into the vault
    pub fn deposit(&mut self, offered_amount: u64, requested_amount: u64) -> Result<()> {
        fund_vault(
            &self.maker,
            &self.offered_mint,
            &self.requested_mint,
            &self.maker_offered_ata,
            &self.vault,
            &self.token_program,
            offered_amount,
            requested_amount,
        )
    }

    pub fn save_offer(
        &mut self,
        id: u64,
        offered_amount: u64,
        requested_amount: u64,
        bumps: &MakeOfferBumps,
    ) -> Result<()> {
        self.offer.set_inner(Offer {
            id,
            maker: self.maker.key(),
            offered_mint: self.offered_mint.key(),
            requested_mint: self.requested_mint.key(),
            offered_amount,
            requested_amount,
            bump: bumps.offer,
        });

        msg!(
            "offer {} made by {}: {} for {}",
            id,
            self.maker.key(),
            offered_amount,
            requested_amount
        );
        emit!(OfferMade {
            offer: self.offer.key(),
            id,
            maker: self.maker.key(),
            offered_mint: self.offered_mint.key(),
            requested_mint: self.requested_mint.key(),
            offered_amount,
            requested_amount,
        });
        Ok(())
    }
}
