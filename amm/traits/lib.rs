#![cfg_attr(not(feature = "std"), no_std, no_main)]

mod flash_loan;
mod stable_pool;

pub use amm_helpers::math::MathError;
pub use flash_loan::FlashLoanReceiver;
pub use stable_pool::{StablePool, StablePoolError, StablePoolView};
