use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use super::shared::{close_token_account, transfer_tokens};
use crate::{DealForgeError, Offer, OfferTaken, OFFER_SEED};

/// Accounts for `take_offer`. Anyone may take an offer; `has_one` pins the
/// maker and both mints to what the offer recorded so payment cannot be
/// redirected.
#[derive(Accounts)]
pub struct TakeOffer<'info> {
    /// Anyone willing to pay the requested amount; pays for any missing token accounts
    #[account(mut)]
    pub taker: Signer<'info>,

    /// Receives the requested tokens and the offer's rent
    #[account(mut)]
    pub maker: SystemAccount<'info>,

    /// Must equal the offer's offered mint
    pub offered_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Must equal the offer's requested mint
    pub requested_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Where the taker receives the vault's tokens
    #[account(
        init_if_needed,
        payer = taker,
        associated_token::mint = offered_mint,
        associated_token::authority = taker,
        associated_token::token_program = token_program
    )]
    pub taker_offered_ata: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Where the taker pays from
    #[account(
        mut,
        associated_token::mint = requested_mint,
        associated_token::authority = taker,
        associated_token::token_program = token_program,
        // before any transfer, so the program's own code is returned
        constraint = taker_requested_ata.amount >= offer.requested_amount @ DealForgeError::InsufficientBalance
    )]
    pub taker_requested_ata: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Where the maker gets paid, created by the taker if missing
    #[account(
        init_if_needed,
        payer = taker,
        associated_token::mint = requested_mint,
        associated_token::authority = maker,
        associated_token::token_program = token_program
    )]
    pub maker_requested_ata: Box<InterfaceAccount<'info, TokenAccount>>,

    /// The offer being settled, closed once the vault is emptied
    #[account(
        mut,
        close = maker, // rent goes back to whoever paid for the offer
        // the passed maker and mints must be the ones recorded at creation
        has_one = maker,
        has_one = offered_mint,
        has_one = requested_mint,
        seeds = [OFFER_SEED, maker.key().as_ref(), offer.id.to_le_bytes().as_ref()],
        bump = offer.bump
    )]
    pub offer: Box<Account<'info, Offer>>,

    /// Vault holding the offered tokens, released to the taker and closed
    #[account(
        mut,
        associated_token::mint = offered_mint,
        associated_token::authority = offer,
        associated_token::token_program = token_program
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Creates and derives the vault and other associated token accounts
    pub associated_token_program: Program<'info, AssociatedToken>,
    /// Legacy token program or Token-2022; every mint and token account must belong to it
    pub token_program: Interface<'info, TokenInterface>,
    /// Pays for and allocates new accounts
    pub system_program: Program<'info, System>,
}

impl<'info> TakeOffer<'info> {
    /// Pays the maker the requested amount out of the taker's account
    pub fn deposit(&mut self) -> Result<()> {
        transfer_tokens(
            &self.taker_requested_ata,
            &self.maker_requested_ata,
            self.offer.requested_amount,
            &self.requested_mint,
            &self.taker.to_account_info(),
            &self.token_program,
            None,
        )
    }

    /// Releases the whole vault to the taker, then closes the vault. The offer
    /// itself is closed to the maker on exit.
    pub fn withdraw_and_close_vault(&mut self) -> Result<()> {
        let offer_id = self.offer.id.to_le_bytes();
        let signer_seeds: [&[&[u8]]; 1] = [&[
            OFFER_SEED,
            self.maker.to_account_info().key.as_ref(),
            &offer_id[..],
            &[self.offer.bump],
        ]];

        let released = self.vault.amount;
        transfer_tokens(
            &self.vault,
            &self.taker_offered_ata,
            released,
            &self.offered_mint,
            &self.offer.to_account_info(),
            &self.token_program,
            Some(&signer_seeds[..]),
        )?;

        close_token_account(
            &self.vault,
            &self.taker.to_account_info(),
            &self.offer.to_account_info(),
            &self.token_program,
            &signer_seeds,
        )?;

        msg!(
            "offer {} of {} taken by {}",
            self.offer.id,
            self.maker.key(),
            self.taker.key()
        );
        emit!(OfferTaken {
            offer: self.offer.key(),
            id: self.offer.id,
            maker: self.maker.key(),
            taker: self.taker.key(),
            offered_amount: released,
            requested_amount: self.offer.requested_amount,
        });
        Ok(())
    }
}
