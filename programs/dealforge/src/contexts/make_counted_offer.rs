use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use super::shared::fund_vault;
use crate::{MakerCounter, Offer, OfferMade, ANCHOR_DISCRIMINATOR, MAKER_COUNTER_SEED, OFFER_SEED};

/// Accounts for `make_counted_offer`. The offer id is read from the maker's
/// counter, so a client derives the offer address from the counter's current
/// value. Two concurrent calls by one maker race on the counter; the loser
/// fails the offer seeds check.
#[derive(Accounts)]
pub struct MakeCountedOffer<'info> {
    /// Creates the offer and pays for the counter on first use
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
        mut, // debited by the deposit
        associated_token::mint = offered_mint,
        associated_token::authority = maker,
        associated_token::token_program = token_program
    )]
    pub maker_offered_ata: InterfaceAccount<'info, TokenAccount>,

    /// One per maker, starts at zero
    #[account(
        init_if_needed, // created on the maker's first counted offer, reused afterwards
        payer = maker,
        space = ANCHOR_DISCRIMINATOR + MakerCounter::INIT_SPACE,
        seeds = [MAKER_COUNTER_SEED, maker.key().as_ref()],
        bump
    )]
    pub counter: Account<'info, MakerCounter>,

    /// The offer record, addressed by the counter value before it is advanced
    #[account(
        init,
        payer = maker,
        space = Offer::SPACE,
        seeds = [OFFER_SEED, maker.key().as_ref(), counter.id.to_le_bytes().as_ref()],
        bump
    )]
    pub offer: Account<'info, Offer>,

    /// Lockbox for the offered tokens, controlled by the offer address
    #[account(
        init,
        payer = maker,
        associated_token::mint = offered_mint,
        associated_token::authority = offer, // only the program can sign for it
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

impl<'info> MakeCountedOffer<'info> {
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

    /// Records the offer under the counter's current id and advances the counter
    pub fn save_offer(
        &mut self,
        offered_amount: u64,
        requested_amount: u64,
        bumps: &MakeCountedOfferBumps,
    ) -> Result<()> {
        let id = self.counter.advance()?;

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
            "offer {} made by {} (next id {}): {} for {}",
            id,
            self.maker.key(),
            self.counter.id,
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
