pub mod stable_pool {
    // Token amounts are rescaled so as if they have TOKEN_TARGET_DECIMALS decimal places.
    pub const TOKEN_TARGET_DECIMALS: u8 = 18;
    pub const TOKEN_TARGET_PRECISION: u128 = 10u128.pow(TOKEN_TARGET_DECIMALS as u32);

    /// Min number of pooled tokens.
    pub const MIN_TOKENS: usize = 2;
    /// Max number of pooled tokens.
    pub const MAX_TOKENS: usize = 32;

    /// Amplification coefficients are stored multiplied by this factor.
    pub const A_PRECISION: u128 = 100;
    /// Min amplification coefficient.
    pub const MIN_AMP: u128 = 1;
    /// Max amplification coefficient.
    pub const MAX_AMP: u128 = 1_000_000;
    /// Max multiplicative change of the amplification coefficient in a single ramp.
    pub const MAX_AMP_CHANGE: u128 = 10;

    /// Minimum ramp duration, in millisec (14 days).
    pub const MIN_RAMP_DURATION: u64 = 14 * ONE_DAY_MS;
    /// Minimum time between the start of two ramps, in millisec.
    pub const MIN_RAMP_DELAY: u64 = ONE_DAY_MS;
    pub const ONE_DAY_MS: u64 = 86_400_000;

    /// Fee denominator, fees are given with 1e10 precision.
    pub const FEE_DENOM: u128 = 10_000_000_000;
    /// 10% of the swapped amount.
    pub const MAX_SWAP_FEE: u128 = 1_000_000_000;
    /// 100% of the swap fee.
    pub const MAX_ADMIN_FEE: u128 = 10_000_000_000;

    /// Flash loan fees are given in basis points.
    pub const FLASH_LOAN_FEE_DENOM: u128 = 10_000;
    /// 0.08% of the borrowed amount.
    pub const DEFAULT_FLASH_LOAN_FEE_BPS: u32 = 8;
    pub const DEFAULT_PROTOCOL_FEE_SHARE_BPS: u32 = 0;

    /// Virtual price is given with 18 decimal places.
    pub const VIRTUAL_PRICE_PRECISION: u128 = TOKEN_TARGET_PRECISION;
}
