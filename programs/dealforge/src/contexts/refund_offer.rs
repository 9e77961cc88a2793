use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use super::shared::{close_token_account, transfer_tokens};
use crate::{DealForgeError, Offer, OfferRefunded, OFFER_SEED};

#[derive(Accounts)]
pub struct RefundOffer<'info> {
    /// Must be the offer's maker
    #[account(mut)]
    pub maker: Signer<'info>,

    /// Must equal the offer's offered mint
    pub offered_mint: InterfaceAccount<'info, Mint>,

    /// The maker's token account the vault is emptied into
    #[account(
        mut,
        associated_token::mint = offered_mint,
        associated_token::authority = maker,
        associated_token::token_program = token_program
    )]
    pub maker_offered_ata: InterfaceAccount<'info, TokenAccount>,

    /// Seeds use the recorded maker, so a foreign signer is rejected by the
    /// maker check rather than by the address check
    #[account(
        mut,
        close = maker, // rent back to the maker
        has_one = maker @ DealForgeError::UnauthorizedMaker,
        has_one = offered_mint,
        seeds = [OFFER_SEED, offer.maker.as_ref(), offer.id.to_le_bytes().as_ref()],
        bump = offer.bump
    )]
    pub offer: Account<'info, Offer>,

    /// Vault emptied back into the maker's account, then closed
    #[account(
        mut,
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

impl<'info> RefundOffer<'info> {
    pub fn refund_and_close_vault(&mut self) -> Result<()> {
        let offer_id = self.offer.id.to_le_bytes();
        let signer_seeds: [&[&[u8]]; 1] = [&[
            OFFER_SEED,
            self.offer.maker.as_ref(),
            &offer_id[..],
            &[self.offer.bump],
        ]];

        let refunded = self.vault.amount;
        transfer_tokens(
            &self.vault,
            &self.maker_offered_ata,
            refunded,
            &self.offered_mint,
            &self.offer.to_account_info(),
            &self.token_program,
            Some(&signer_seeds[..]),
        )?;

        close_token_account(
            &self.vault,
            &self.maker.to_account_info(),
            &self.offer.to_account_info(),
            &self.token_program,
            &signer_seeds,
        )?;

        msg!("offer {} refunded to {}: {}", self.offer.id, self.maker.key(), refunded);
        emit!(OfferRefunded {
            offer: self.offer.key(),
            id: self.offer.id,
            maker: self.maker.key(),
            refunded_amount: refunded,
        });
        Ok(())
    }
}
