use anchor_lang::prelude::*;

use crate::DealForgeError;

/// Next sequential offer id of one maker. Created by the maker's first counted
/// offer and never closed.
#[account]
#[derive(InitSpace)]
pub struct MakerCounter {
    pub id: u64,
}

impl MakerCounter {
    /// Hands out the current id and moves the counter past it.
    pub fn advance(&mut self) -> Result<u64> {
        let id = self.id;
        self.id = id
            .checked_add(1)
            .ok_or(DealForgeError::CalculationOverflow)?;
        Ok(id)
    }
}
