#![cfg_attr(not(feature = "std"), no_std)]

pub mod constants;
pub mod math;
pub mod stable_swap_math;

#[macro_export]
macro_rules! ensure {
    ( $condition:expr, $error:expr $(,)? ) => {{
        if !$condition {
            return ::core::result::Result::Err(::core::convert::Into::into($error));
        }
    }};
}
