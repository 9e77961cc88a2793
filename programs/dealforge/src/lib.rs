#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

declare_id!("CL6frD87dGURF5LdxGD7yTdGmcmeFH3cCjEbf3JMmpG2");

pub mod constants;
pub use constants::*;
pub mod error;
pub use error::*;
pub mod events;
pub use events::*;
pub mod pda;
pub mod state;
pub use state::*;
pub mod contexts;
pub use contexts::*;


#[program]
pub mod dealforge {
    use super::*;

    /// Locks `offered_amount` of the offered mint in a vault owned by a new offer
    /// addressed by `(maker, id)`. The maker asks `requested_amount` of the
    /// requested mint in exchange.
    pub fn make_offer(
        ctx: Context<MakeOffer>,
        id: u64,
        offered_amount: u64,
        requested_amount: u64,
    ) -> Result<()> {
        ctx.accounts.deposit(offered_amount, requested_amount)?;
        ctx.accounts
            .save_offer(id, offered_amount, requested_amount, &ctx.bumps)
    }

    /// Same as `make_offer`, but the id is the maker's counter value, which is
    /// then advanced. The counter is created on the maker's first call.
    pub fn make_counted_offer(
        ctx: Context<MakeCountedOffer>,
        offered_amount: u64,
        requested_amount: u64,
    ) -> Result<()> {
        ctx.accounts.deposit(offered_amount, requested_amount)?;
        ctx.accounts
            .save_offer(offered_amount, requested_amount, &ctx.bumps)
    }

    /// Pays the maker the requested amount, releases the vault to the taker and
    /// closes both the vault and the offer.
    pub fn take_offer(ctx: Context<TakeOffer>) -> Result<()> {
        ctx.accounts.deposit()?;
        ctx.accounts.withdraw_and_close_vault()
    }

    /// Returns the vault to the maker and closes both the vault and the offer.
    pub fn refund_offer(ctx: Context<RefundOffer>) -> Result<()> {
        ctx.accounts.refund_and_close_vault()
    }
}
