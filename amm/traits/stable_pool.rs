use ink::prelude::vec::Vec;
use ink::primitives::AccountId;
use psp22::PSP22Error;

use crate::MathError;

#[ink::trait_definition]
pub trait StablePoolView {
    /// Returns list of tokens in the pool.
    /// Position of a token is its index used by every other message.
    #[ink(message)]
    fn tokens(&self) -> Vec<AccountId>;

    /// Returns index of `token` in the pool.
    #[ink(message)]
    fn get_token_index(&self, token: AccountId) -> Result<u8, StablePoolError>;

    /// Returns balance of the token at `token_index` owned by liquidity providers.
    ///
    /// Accrued admin fees are excluded, see `get_admin_balance`.
    #[ink(message)]
    fn get_token_balance(&self, token_index: u8) -> Result<u128, StablePoolError>;

    /// Returns balances of all tokens owned by liquidity providers.
    #[ink(message)]
    fn get_token_balances(&self) -> Result<Vec<u128>, StablePoolError>;

    /// Returns admin fees accrued in the token at `token_index`.
    #[ink(message)]
    fn get_admin_balance(&self, token_index: u8) -> Result<u128, StablePoolError>;

    /// Returns current value of amplification coefficient.
    #[ink(message)]
    fn get_a(&self) -> Result<u128, StablePoolError>;

    /// Returns current value of amplification coefficient multiplied by `A_PRECISION`.
    #[ink(message)]
    fn get_a_precise(&self) -> Result<u128, StablePoolError>;

    /// Returns the invariant value of one LP token with 18 decimal places.
    #[ink(message)]
    fn get_virtual_price(&self) -> Result<u128, StablePoolError>;

    /// Returns (swap_fee, admin_fee), both with 1e10 precision.
    #[ink(message)]
    fn fees(&self) -> (u128, u128);

    /// Returns (flash_loan_fee_bps, protocol_fee_share_bps).
    #[ink(message)]
    fn flash_loan_fees(&self) -> (u32, u32);

    #[ink(message)]
    fn is_paused(&self) -> bool;

    #[ink(message)]
    fn owner(&self) -> AccountId;

    /// Calculate amount of `token_index_to` received
    /// for `dx` of `token_index_from`, with the swap fee deducted.
    #[ink(message)]
    fn calculate_swap(
        &self,
        token_index_from: u8,
        token_index_to: u8,
        dx: u128,
    ) -> Result<u128, StablePoolError>;

    /// Calculate how many lp tokens will be minted (`deposit == true`)
    /// or burned (`deposit == false`) given token `amounts`.
    /// Imbalance fees are included.
    #[ink(message)]
    fn calculate_token_amount(
        &self,
        amounts: Vec<u128>,
        deposit: bool,
    ) -> Result<u128, StablePoolError>;

    /// Calculate balanced withdraw amounts for burning `lp_amount` of lp tokens.
    #[ink(message)]
    fn calculate_remove_liquidity(&self, lp_amount: u128) -> Result<Vec<u128>, StablePoolError>;

    /// Calculate amount of `token_index` received for burning `lp_amount` of lp tokens.
    #[ink(message)]
    fn calculate_remove_liquidity_one_token(
        &self,
        lp_amount: u128,
        token_index: u8,
    ) -> Result<u128, StablePoolError>;
}

#[ink::trait_definition]
pub trait StablePool {
    /// Mints LP tokens to the caller for imbalanced `amounts`.
    /// Caller must allow enough spending allowance of underlying tokens
    /// for this contract.
    /// Returns an error if the minted LP tokens amount is less
    /// than `min_mint_amount`.
    /// Returns minted amount.
    #[ink(message)]
    fn add_liquidity(
        &mut self,
        amounts: Vec<u128>,
        min_mint_amount: u128,
        deadline: u64,
    ) -> Result<u128, StablePoolError>;

    /// Burns `lp_amount` of the caller's LP tokens and withdraws underlying tokens
    /// in balanced amounts. Never blocked by pause.
    /// Fails if any of the amounts received is less than in `min_amounts`.
    #[ink(message)]
    fn remove_liquidity(
        &mut self,
        lp_amount: u128,
        min_amounts: Vec<u128>,
        deadline: u64,
    ) -> Result<Vec<u128>, StablePoolError>;

    /// Burns LP tokens and withdraws underlying tokens in imbalanced `amounts`.
    /// Returns burned amount.
    #[ink(message)]
    fn remove_liquidity_imbalance(
        &mut self,
        amounts: Vec<u128>,
        max_burn_amount: u128,
        deadline: u64,
    ) -> Result<u128, StablePoolError>;

    /// Burns `lp_amount` of LP tokens and withdraws a single token.
    /// Returns withdrawn amount.
    #[ink(message)]
    fn remove_liquidity_one_token(
        &mut self,
        lp_amount: u128,
        token_index: u8,
        min_amount: u128,
        deadline: u64,
    ) -> Result<u128, StablePoolError>;

    /// Swaps `dx` of `token_index_from` to `token_index_to`.
    /// Caller must allow enough spending allowance of `token_index_from`
    /// for this contract.
    /// Returns an error if swapped amount is less than `min_dy`.
    /// Returns swapped amount.
    #[ink(message)]
    fn swap(
        &mut self,
        token_index_from: u8,
        token_index_to: u8,
        dx: u128,
        min_dy: u128,
        deadline: u64,
    ) -> Result<u128, StablePoolError>;

    /// Lends `amounts` to `receiver` for the duration of its
    /// `FlashLoanReceiver::execute_operation` callback.
    #[ink(message)]
    fn flash_loan(
        &mut self,
        receiver: AccountId,
        amounts: Vec<u128>,
        data: Vec<u8>,
        deadline: u64,
    ) -> Result<(), StablePoolError>;

    /// Starts ramping amplification coefficient to `future_a` until `future_time`.
    #[ink(message)]
    fn ramp_a(&mut self, future_a: u128, future_time: u64) -> Result<(), StablePoolError>;

    /// Freezes amplification coefficient at its current value.
    #[ink(message)]
    fn stop_ramp_a(&mut self) -> Result<(), StablePoolError>;

    #[ink(message)]
    fn set_fee(&mut self, swap_fee: u128, admin_fee: u128) -> Result<(), StablePoolError>;

    #[ink(message)]
    fn set_flash_loan_fees(
        &mut self,
        flash_loan_fee_bps: u32,
        protocol_fee_share_bps: u32,
    ) -> Result<(), StablePoolError>;

    #[ink(message)]
    fn pause(&mut self) -> Result<(), StablePoolError>;

    #[ink(message)]
    fn unpause(&mut self) -> Result<(), StablePoolError>;

    /// Transfers all accrued admin fees to the owner.
    #[ink(message)]
    fn withdraw_admin_fee(&mut self) -> Result<(), StablePoolError>;

    #[ink(message)]
    fn set_owner(&mut self, new_owner: AccountId) -> Result<(), StablePoolError>;
}

#[derive(Debug, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum StablePoolError {
    MathError(MathError),
    PSP22Error(PSP22Error),
    TokenNotFound(AccountId),
    IndexOutOfRange,
    IdenticalTokenId,
    IncorrectAmountsCount,
    IncorrectTokenCount,
    TooLargeTokenDecimal,
    InvalidAmpCoef,
    InvalidFee,
    Timeout,
    Paused,
    InsufficientInputAmount,
    InitialDepositRequiresAllTokens,
    InsufficientMintAmount,
    InsufficientOutputAmount,
    ExcessiveBurnAmount,
    InsufficientLiquidityBurned,
    WithdrawExceedsAvailable,
    AmpCoefOutOfRange,
    AmpCoefChangeTooLarge,
    AmpCoefRampDurationTooShort,
    AmpCoefRampDelayNotElapsed,
    AmpCoefRampAlreadyStopped,
    NothingToBorrow,
    FlashLoanAmountTooSmall,
    FlashLoanExceedsLiquidity,
    RepaymentFailed,
    OnlyOwner,
}

impl From<PSP22Error> for StablePoolError {
    fn from(error: PSP22Error) -> Self {
        StablePoolError::PSP22Error(error)
    }
}

impl From<MathError> for StablePoolError {
    fn from(error: MathError) -> Self {
        StablePoolError::MathError(error)
    }
}
