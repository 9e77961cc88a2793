use anchor_lang::prelude::*;

// Variant order fixes the numeric codes clients decode (6000..=6010).
#[error_code]
pub enum DealForgeError {
    #[msg("Insufficient token balance")]
    InsufficientBalance,
    #[msg("Token transfer failed")]
    TransferFailed,
    #[msg("Invalid sale token")]
    InvalidSaleToken,
    #[msg("Calculation overflow")]
    CalculationOverflow,
    #[msg("Offer is not active")]
    OfferNotActive,
    #[msg("Exceeds available quantity")]
    ExceedsAvailableQuantity,
    #[msg("Offer already fulfilled")]
    OfferAlreadyFulfilled,
    #[msg("Offer expired")]
    OfferExpired,
    #[msg("Invalid offered mint amount")]
    InvalidOfferedMintAmount,
    #[msg("Invalid requested mint amount")]
    InvalidRequestedMintAmount,
    #[msg("Unauthorized maker")]
    UnauthorizedMaker,
}
