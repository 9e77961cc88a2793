use anchor_lang::prelude::*;

#[event]
pub struct OfferMade {
    pub offer: Pubkey,
    pub id: u64,
    pub maker: Pubkey,
    pub offered_mint: Pubkey,
    pub requested_mint: Pubkey,
    pub offered_amount: u64,
    pub requested_amount: u64,
}

#[event]
pub struct OfferTaken {
    pub offer: Pubkey,
    pub id: u64,
    pub maker: Pubkey,
    pub taker: Pubkey,
    pub offered_amount: u64,
    pub requested_amount: u64,
}

#[event]
pub struct OfferRefunded {
    pub offer: Pubkey,
    pub id: u64,
    pub maker: Pubkey,
    pub refunded_amount: u64,
}
