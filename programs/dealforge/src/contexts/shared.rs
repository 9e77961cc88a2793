use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    close_account, transfer_checked, CloseAccount, Mint, TokenAccount, TokenInterface,
    TransferChecked,
};

use crate::{DealForgeError, Offer};

/// Moves `amount` of `mint` between two token accounts. Pass `signer_seeds`
/// when `authority` is a program address.
pub fn transfer_tokens<'info>(
    from: &InterfaceAccount<'info, TokenAccount>,
    to: &InterfaceAccount<'info, TokenAccount>,
    amount: u64,
    mint: &InterfaceAccount<'info, Mint>,
    authority: &AccountInfo<'info>,
    token_program: &Interface<'info, TokenInterface>,
    signer_seeds: Option<&[&[&[u8]]]>,
) -> Result<()> {
    let transfer_accounts = TransferChecked {
        from: from.to_account_info(),
        mint: mint.to_account_info(),
        to: to.to_account_info(),
        authority: authority.clone(),
    };

    let cpi_ctx = match signer_seeds {
        Some(seeds) => {
            CpiContext::new_with_signer(token_program.to_account_info(), transfer_accounts, seeds)
        }
        None => CpiContext::new(token_program.to_account_info(), transfer_accounts),
    };

    transfer_checked(cpi_ctx, amount, mint.decimals)
}

/// Closes an emptied token account, sending its rent to `destination`.
pub fn close_token_account<'info>(
    account: &InterfaceAccount<'info, TokenAccount>,
    destination: &AccountInfo<'info>,
    authority: &AccountInfo<'info>,
    token_program: &Interface<'info, TokenInterface>,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let close_accounts = CloseAccount {
        account: account.to_account_info(),
        destination: destination.clone(),
        authority: authority.clone(),
    };

    let cpi_ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        close_accounts,
        signer_seeds,
    );
    close_account(cpi_ctx)
}

/// Fails with the program's own error instead of letting the token program
/// reject the transfer with its generic code.
pub fn require_balance(available: u64, needed: u64) -> Result<()> {
    require_gte!(available, needed, DealForgeError::InsufficientBalance);
    Ok(())
}

/// Validates new offer terms, then moves the offered tokens from the maker
/// into the vault.
#[allow(clippy::too_many_arguments)]
pub fn fund_vault<'info>(
    maker: &Signer<'info>,
    offered_mint: &InterfaceAccount<'info, Mint>,
    requested_mint: &InterfaceAccount<'info, Mint>,
    maker_offered_ata: &InterfaceAccount<'info, TokenAccount>,
    vault: &InterfaceAccount<'info, TokenAccount>,
    token_program: &Interface<'info, TokenInterface>,
    offered_amount: u64,
    requested_amount: u64,
) -> Result<()> {
    Offer::check_terms(
        &offered_mint.key(),
        &requested_mint.key(),
        offered_amount,
        requested_amount,
    )?;
    require_balance(maker_offered_ata.amount, offered_amount)?;

    transfer_tokens(
        maker_offered_ata,
        vault,
        offered_amount,
        offered_mint,
        &maker.to_account_info(),
        token_program,
        None,
    )
}
