use crate::constants::stable_pool::{
    FEE_DENOM, FLASH_LOAN_FEE_DENOM, MAX_ADMIN_FEE, MAX_SWAP_FEE,
};
use crate::math::{casted_mul, MathError};

/// Swap fee and admin share, both with `FEE_DENOM` precision.
/// The admin fee is a fraction of the swap fee, not of the swapped amount.
#[ink::storage_item]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Fees {
    pub swap_fee: u128,
    pub admin_fee: u128,
}

impl Fees {
    pub fn new(swap_fee: u128, admin_fee: u128) -> Option<Self> {
        if swap_fee > MAX_SWAP_FEE || admin_fee > MAX_ADMIN_FEE {
            None
        } else {
            Some(Self {
                swap_fee,
                admin_fee,
            })
        }
    }

    pub fn zero() -> Self {
        Self {
            swap_fee: 0,
            admin_fee: 0,
        }
    }

    pub fn swap_fee_from_gross(&self, amount: u128) -> Result<u128, MathError> {
        u128_ratio(amount, self.swap_fee, FEE_DENOM)
    }

    /// Part of the charged `fee` retained by the protocol.
    pub fn admin_part(&self, fee: u128) -> Result<u128, MathError> {
        u128_ratio(fee, self.admin_fee, FEE_DENOM)
    }

    /// Fee rate applied to each token's deviation from the balanced share
    /// in imbalanced liquidity operations: `swap_fee * n / (4 * (n - 1))`.
    pub fn fee_per_token(&self, num_coins: u32) -> Result<u128, MathError> {
        self.swap_fee
            .checked_mul(num_coins.into())
            .ok_or(MathError::MulOverflow(61))?
            .checked_div(
                u128::from(num_coins.checked_sub(1).ok_or(MathError::SubUnderflow(61))?)
                    .checked_mul(4)
                    .ok_or(MathError::MulOverflow(62))?,
            )
            .ok_or(MathError::DivByZero(61))
    }

    /// Imbalance fee charged on `amount` (the distance from the ideal balance).
    pub fn normalized_trade_fee(&self, num_coins: u32, amount: u128) -> Result<u128, MathError> {
        u128_ratio(amount, self.fee_per_token(num_coins)?, FEE_DENOM)
    }
}

/// Flash loan fee and the protocol's share of it, both in basis points.
#[ink::storage_item]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FlashLoanFees {
    pub fee_bps: u32,
    pub protocol_fee_share_bps: u32,
}

impl FlashLoanFees {
    pub fn new(fee_bps: u32, protocol_fee_share_bps: u32) -> Option<Self> {
        let denom = FLASH_LOAN_FEE_DENOM as u32;
        if fee_bps == 0 || fee_bps > denom || protocol_fee_share_bps > denom {
            None
        } else {
            Some(Self {
                fee_bps,
                protocol_fee_share_bps,
            })
        }
    }

    pub fn loan_fee(&self, amount: u128) -> Result<u128, MathError> {
        u128_ratio(amount, self.fee_bps.into(), FLASH_LOAN_FEE_DENOM)
    }

    pub fn protocol_part(&self, fee: u128) -> Result<u128, MathError> {
        u128_ratio(fee, self.protocol_fee_share_bps.into(), FLASH_LOAN_FEE_DENOM)
    }
}

fn u128_ratio(amount: u128, num: u128, denom: u128) -> Result<u128, MathError> {
    casted_mul(amount, num)
        .checked_div(denom.into())
        .ok_or(MathError::DivByZero(62))?
        .try_into()
        .map_err(|_| MathError::CastOverflow(61))
}
