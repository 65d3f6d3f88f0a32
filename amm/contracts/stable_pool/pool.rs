use crate::amp_coef::{AmplificationCoefficient, Timestamp};
use amm_helpers::{
    constants::stable_pool::{
        A_PRECISION, DEFAULT_FLASH_LOAN_FEE_BPS, DEFAULT_PROTOCOL_FEE_SHARE_BPS, MAX_TOKENS,
        MIN_TOKENS, TOKEN_TARGET_DECIMALS,
    },
    ensure,
    stable_swap_math::{
        self as math,
        fees::{FlashLoanFees, Fees},
    },
};
use ink::prelude::{vec, vec::Vec};
use ink::primitives::AccountId;
use traits::{MathError, StablePoolError};

/// State of the pool and every transition on it.
///
/// Methods never touch the environment: the current time, LP token supply
/// and measured token balances are passed in by the caller.
/// Every method validates and computes its results before writing any field,
/// so an `Err` leaves the pool unchanged.
#[ink::storage_item]
#[derive(Debug)]
pub struct StablePoolData {
    /// List of tokens.
    tokens: Vec<AccountId>,
    /// Tokens precision factors used for normalization.
    precisions: Vec<u128>,
    /// Pool-held token amounts, including admin fees.
    balances: Vec<u128>,
    /// Admin fees accrued in each token, not owned by liquidity providers.
    admin_balances: Vec<u128>,
    /// Amplification coefficient.
    amp_coef: AmplificationCoefficient,
    /// Swap fee and its admin share.
    fees: Fees,
    flash_loan_fees: FlashLoanFees,
    paused: bool,
}

fn ensure_deadline(now: Timestamp, deadline: u64) -> Result<(), StablePoolError> {
    ensure!(now <= deadline, StablePoolError::Timeout);
    Ok(())
}

impl StablePoolData {
    pub fn new(
        tokens: Vec<AccountId>,
        tokens_decimals: Vec<u8>,
        init_amp_coef: u128,
        swap_fee: u128,
        admin_fee: u128,
    ) -> Result<Self, StablePoolError> {
        let token_count = tokens.len();
        ensure!(
            (MIN_TOKENS..=MAX_TOKENS).contains(&token_count)
                && token_count == tokens_decimals.len(),
            StablePoolError::IncorrectTokenCount
        );
        let mut unique_tokens = tokens.clone();
        unique_tokens.sort();
        unique_tokens.dedup();
        ensure!(
            unique_tokens.len() == token_count,
            StablePoolError::IdenticalTokenId
        );
        ensure!(
            tokens_decimals.iter().all(|&d| d <= TOKEN_TARGET_DECIMALS),
            StablePoolError::TooLargeTokenDecimal
        );
        let amp_coef = AmplificationCoefficient::new(init_amp_coef)?;
        let fees = Fees::new(swap_fee, admin_fee).ok_or(StablePoolError::InvalidFee)?;
        let flash_loan_fees =
            FlashLoanFees::new(DEFAULT_FLASH_LOAN_FEE_BPS, DEFAULT_PROTOCOL_FEE_SHARE_BPS)
                .ok_or(StablePoolError::InvalidFee)?;
        let precisions = tokens_decimals
            .iter()
            .map(|&decimal| 10u128.pow(u32::from(TOKEN_TARGET_DECIMALS - decimal)))
            .collect();
        Ok(Self {
            tokens,
            precisions,
            balances: vec![0; token_count],
            admin_balances: vec![0; token_count],
            amp_coef,
            fees,
            flash_loan_fees,
            paused: false,
        })
    }

    pub fn tokens(&self) -> &[AccountId] {
        &self.tokens
    }

    pub fn fees(&self) -> Fees {
        self.fees
    }

    pub fn flash_loan_fees(&self) -> FlashLoanFees {
        self.flash_loan_fees
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn token_index(&self, token: AccountId) -> Result<u8, StablePoolError> {
        self.tokens
            .iter()
            .position(|&id| id == token)
            .map(|idx| idx as u8)
            .ok_or(StablePoolError::TokenNotFound(token))
    }

    fn check_index(&self, token_index: u8) -> Result<usize, StablePoolError> {
        let idx = token_index as usize;
        ensure!(idx < self.tokens.len(), StablePoolError::IndexOutOfRange);
        Ok(idx)
    }

    /// Checks if token indices are valid and distinct.
    fn check_pair(&self, from: u8, to: u8) -> Result<(usize, usize), StablePoolError> {
        ensure!(from != to, StablePoolError::IdenticalTokenId);
        Ok((self.check_index(from)?, self.check_index(to)?))
    }

    fn check_amounts_count(&self, amounts: &[u128]) -> Result<(), StablePoolError> {
        ensure!(
            amounts.len() == self.tokens.len(),
            StablePoolError::IncorrectAmountsCount
        );
        Ok(())
    }

    fn ensure_not_paused(&self) -> Result<(), StablePoolError> {
        ensure!(!self.paused, StablePoolError::Paused);
        Ok(())
    }

    /// Balance of the token at `token_index` owned by liquidity providers.
    pub fn token_balance(&self, token_index: u8) -> Result<u128, StablePoolError> {
        let idx = self.check_index(token_index)?;
        Ok(self.balances[idx]
            .checked_sub(self.admin_balances[idx])
            .ok_or(MathError::SubUnderflow(108))?)
    }

    pub fn admin_balance(&self, token_index: u8) -> Result<u128, StablePoolError> {
        Ok(self.admin_balances[self.check_index(token_index)?])
    }

    /// Balances owned by liquidity providers, i.e. without admin fees.
    pub fn lp_balances(&self) -> Result<Vec<u128>, MathError> {
        self.balances
            .iter()
            .zip(self.admin_balances.iter())
            .map(|(&balance, &admin)| {
                balance
                    .checked_sub(admin)
                    .ok_or(MathError::SubUnderflow(100))
            })
            .collect()
    }

    pub fn amp_coef_precise(&self, now: Timestamp) -> Result<u128, StablePoolError> {
        Ok(self.amp_coef.compute_amp_coef(now)?)
    }

    pub fn amp_coef(&self, now: Timestamp) -> Result<u128, StablePoolError> {
        Ok(self.amp_coef_precise(now)? / A_PRECISION)
    }

    pub fn virtual_price(&self, now: Timestamp, lp_supply: u128) -> Result<u128, StablePoolError> {
        Ok(math::compute_virtual_price(
            &self.lp_balances()?,
            &self.precisions,
            lp_supply,
            self.amp_coef_precise(now)?,
        )?)
    }

    /// Admin parts of `charged` fees.
    fn admin_parts(&self, charged: &[u128]) -> Result<Vec<u128>, StablePoolError> {
        charged
            .iter()
            .map(|&fee| self.fees.admin_part(fee).map_err(StablePoolError::from))
            .collect()
    }

    fn admin_balances_with(&self, admin_fees: &[u128]) -> Result<Vec<u128>, MathError> {
        self.admin_balances
            .iter()
            .zip(admin_fees.iter())
            .map(|(&admin, &fee)| admin.checked_add(fee).ok_or(MathError::AddOverflow(100)))
            .collect()
    }

    /// Returns (lp_to_mint, admin_fees).
    fn quote_deposit(
        &self,
        amounts: &[u128],
        lp_supply: u128,
        now: Timestamp,
    ) -> Result<(u128, Vec<u128>), StablePoolError> {
        self.check_amounts_count(amounts)?;
        if lp_supply == 0 {
            ensure!(
                amounts.iter().all(|&amount| amount > 0),
                StablePoolError::InitialDepositRequiresAllTokens
            );
        } else {
            ensure!(
                amounts.iter().any(|&amount| amount > 0),
                StablePoolError::InsufficientInputAmount
            );
        }
        let (minted, charged) = math::compute_lp_amount_for_deposit(
            amounts,
            &self.lp_balances()?,
            &self.precisions,
            lp_supply,
            &self.fees,
            self.amp_coef_precise(now)?,
        )?;
        Ok((minted, self.admin_parts(&charged)?))
    }

    pub fn calculate_deposit(
        &self,
        amounts: &[u128],
        lp_supply: u128,
        now: Timestamp,
    ) -> Result<u128, StablePoolError> {
        Ok(self.quote_deposit(amounts, lp_supply, now)?.0)
    }

    /// Deposits `amounts` and returns LP amount to mint.
    pub fn add_liquidity(
        &mut self,
        amounts: &[u128],
        min_mint_amount: u128,
        lp_supply: u128,
        now: Timestamp,
        deadline: u64,
    ) -> Result<u128, StablePoolError> {
        self.ensure_not_paused()?;
        ensure_deadline(now, deadline)?;
        let (minted, admin_fees) = self.quote_deposit(amounts, lp_supply, now)?;
        ensure!(
            minted >= min_mint_amount,
            StablePoolError::InsufficientMintAmount
        );
        let new_balances = self
            .balances
            .iter()
            .zip(amounts.iter())
            .map(|(&balance, &amount)| {
                balance
                    .checked_add(amount)
                    .ok_or(MathError::AddOverflow(101))
            })
            .collect::<Result<Vec<u128>, MathError>>()?;
        let new_admin_balances = self.admin_balances_with(&admin_fees)?;
        self.balances = new_balances;
        self.admin_balances = new_admin_balances;
        Ok(minted)
    }

    pub fn calculate_remove_liquidity(
        &self,
        lp_amount: u128,
        lp_supply: u128,
    ) -> Result<Vec<u128>, StablePoolError> {
        ensure!(
            lp_amount > 0 && lp_amount <= lp_supply,
            StablePoolError::InsufficientLiquidityBurned
        );
        Ok(math::compute_amounts_given_lp(
            lp_amount,
            &self.lp_balances()?,
            lp_supply,
        )?)
    }

    /// Withdraws the balanced share of `lp_amount`. Not affected by pause.
    pub fn remove_liquidity(
        &mut self,
        lp_amount: u128,
        min_amounts: &[u128],
        lp_supply: u128,
        now: Timestamp,
        deadline: u64,
    ) -> Result<Vec<u128>, StablePoolError> {
        ensure_deadline(now, deadline)?;
        self.check_amounts_count(min_amounts)?;
        let amounts = self.calculate_remove_liquidity(lp_amount, lp_supply)?;
        ensure!(
            amounts
                .iter()
                .zip(min_amounts.iter())
                .all(|(amount, min_amount)| amount >= min_amount),
            StablePoolError::InsufficientOutputAmount
        );
        self.balances = self.subtract_from_balances(&amounts)?;
        Ok(amounts)
    }

    fn subtract_from_balances(&self, amounts: &[u128]) -> Result<Vec<u128>, MathError> {
        self.balances
            .iter()
            .zip(amounts.iter())
            .map(|(&balance, &amount)| {
                balance
                    .checked_sub(amount)
                    .ok_or(MathError::SubUnderflow(101))
            })
            .collect()
    }

    /// Returns (lp_to_burn, admin_fees).
    fn quote_withdraw(
        &self,
        amounts: &[u128],
        lp_supply: u128,
        now: Timestamp,
    ) -> Result<(u128, Vec<u128>), StablePoolError> {
        self.check_amounts_count(amounts)?;
        ensure!(
            amounts.iter().any(|&amount| amount > 0),
            StablePoolError::InsufficientLiquidityBurned
        );
        let lp_balances = self.lp_balances()?;
        ensure!(
            amounts
                .iter()
                .zip(lp_balances.iter())
                .all(|(amount, available)| amount <= available),
            StablePoolError::WithdrawExceedsAvailable
        );
        let (burned, charged) = math::compute_lp_amount_for_withdraw(
            amounts,
            &lp_balances,
            &self.precisions,
            lp_supply,
            &self.fees,
            self.amp_coef_precise(now)?,
        )?;
        ensure!(burned > 0, StablePoolError::InsufficientLiquidityBurned);
        Ok((burned, self.admin_parts(&charged)?))
    }

    pub fn calculate_withdraw(
        &self,
        amounts: &[u128],
        lp_supply: u128,
        now: Timestamp,
    ) -> Result<u128, StablePoolError> {
        Ok(self.quote_withdraw(amounts, lp_supply, now)?.0)
    }

    /// Withdraws imbalanced `amounts` and returns LP amount to burn.
    pub fn remove_liquidity_imbalance(
        &mut self,
        amounts: &[u128],
        max_burn_amount: u128,
        lp_supply: u128,
        now: Timestamp,
        deadline: u64,
    ) -> Result<u128, StablePoolError> {
        self.ensure_not_paused()?;
        ensure_deadline(now, deadline)?;
        let (burned, admin_fees) = self.quote_withdraw(amounts, lp_supply, now)?;
        ensure!(
            burned <= max_burn_amount,
            StablePoolError::ExcessiveBurnAmount
        );
        let new_balances = self.subtract_from_balances(amounts)?;
        let new_admin_balances = self.admin_balances_with(&admin_fees)?;
        self.balances = new_balances;
        self.admin_balances = new_admin_balances;
        Ok(burned)
    }

    /// Returns (token_id, amount_out, admin_fee), amounts are native.
    fn quote_withdraw_one(
        &self,
        lp_amount: u128,
        token_index: u8,
        lp_supply: u128,
        now: Timestamp,
    ) -> Result<(usize, u128, u128), StablePoolError> {
        let idx = self.check_index(token_index)?;
        ensure!(
            lp_amount > 0 && lp_amount <= lp_supply,
            StablePoolError::InsufficientLiquidityBurned
        );
        let lp_balances = self.lp_balances()?;
        let available = lp_balances[idx]
            .checked_mul(self.precisions[idx])
            .ok_or(MathError::MulOverflow(100))?;
        ensure!(
            lp_amount <= available,
            StablePoolError::WithdrawExceedsAvailable
        );
        let (amount_out, fee) = math::compute_withdraw_one_token(
            lp_amount,
            idx,
            &lp_balances,
            &self.precisions,
            lp_supply,
            &self.fees,
            self.amp_coef_precise(now)?,
        )?;
        Ok((idx, amount_out, self.fees.admin_part(fee)?))
    }

    pub fn calculate_remove_liquidity_one_token(
        &self,
        lp_amount: u128,
        token_index: u8,
        lp_supply: u128,
        now: Timestamp,
    ) -> Result<u128, StablePoolError> {
        Ok(self
            .quote_withdraw_one(lp_amount, token_index, lp_supply, now)?
            .1)
    }

    /// Burns `lp_amount` for a single token, returns withdrawn amount.
    pub fn remove_liquidity_one_token(
        &mut self,
        lp_amount: u128,
        token_index: u8,
        min_amount: u128,
        lp_supply: u128,
        now: Timestamp,
        deadline: u64,
    ) -> Result<u128, StablePoolError> {
        self.ensure_not_paused()?;
        ensure_deadline(now, deadline)?;
        let (idx, amount_out, admin_fee) =
            self.quote_withdraw_one(lp_amount, token_index, lp_supply, now)?;
        ensure!(
            amount_out >= min_amount,
            StablePoolError::InsufficientOutputAmount
        );
        let new_admin_balance = self.admin_balances[idx]
            .checked_add(admin_fee)
            .ok_or(MathError::AddOverflow(102))?;
        self.balances[idx] = self.balances[idx]
            .checked_sub(amount_out)
            .ok_or(MathError::SubUnderflow(102))?;
        self.admin_balances[idx] = new_admin_balance;
        Ok(amount_out)
    }

    /// Returns (token_in_id, token_out_id, amount_out, admin_fee).
    /// `admin_fee` is a native amount of the output token.
    fn quote_swap(
        &self,
        token_index_from: u8,
        token_index_to: u8,
        dx: u128,
        now: Timestamp,
    ) -> Result<(usize, usize, u128, u128), StablePoolError> {
        let (from, to) = self.check_pair(token_index_from, token_index_to)?;
        ensure!(dx > 0, StablePoolError::InsufficientInputAmount);
        let (amount_out, fee) = math::swap_to(
            from,
            dx,
            to,
            &self.lp_balances()?,
            &self.precisions,
            &self.fees,
            self.amp_coef_precise(now)?,
        )?;
        let admin_fee = self
            .fees
            .admin_part(fee)?
            .checked_div(self.precisions[to])
            .ok_or(MathError::DivByZero(100))?;
        Ok((from, to, amount_out, admin_fee))
    }

    pub fn calculate_swap(
        &self,
        token_index_from: u8,
        token_index_to: u8,
        dx: u128,
        now: Timestamp,
    ) -> Result<u128, StablePoolError> {
        Ok(self.quote_swap(token_index_from, token_index_to, dx, now)?.2)
    }

    /// Swaps `dx` of `token_index_from` and returns amount of `token_index_to` to send out.
    pub fn swap(
        &mut self,
        token_index_from: u8,
        token_index_to: u8,
        dx: u128,
        min_dy: u128,
        now: Timestamp,
        deadline: u64,
    ) -> Result<u128, StablePoolError> {
        self.ensure_not_paused()?;
        ensure_deadline(now, deadline)?;
        let (from, to, amount_out, admin_fee) =
            self.quote_swap(token_index_from, token_index_to, dx, now)?;
        ensure!(
            amount_out >= min_dy,
            StablePoolError::InsufficientOutputAmount
        );
        let new_from_balance = self.balances[from]
            .checked_add(dx)
            .ok_or(MathError::AddOverflow(103))?;
        let new_to_balance = self.balances[to]
            .checked_sub(amount_out)
            .ok_or(MathError::SubUnderflow(103))?;
        let new_admin_balance = self.admin_balances[to]
            .checked_add(admin_fee)
            .ok_or(MathError::AddOverflow(104))?;
        self.balances[from] = new_from_balance;
        self.balances[to] = new_to_balance;
        self.admin_balances[to] = new_admin_balance;
        Ok(amount_out)
    }

    /// Validates a flash loan of `amounts` and returns the fee owed on each.
    pub fn flash_loan_fees_for(
        &self,
        amounts: &[u128],
        now: Timestamp,
        deadline: u64,
    ) -> Result<Vec<u128>, StablePoolError> {
        self.ensure_not_paused()?;
        ensure_deadline(now, deadline)?;
        self.check_amounts_count(amounts)?;
        ensure!(
            amounts.iter().any(|&amount| amount > 0),
            StablePoolError::NothingToBorrow
        );
        amounts
            .iter()
            .zip(self.balances.iter())
            .map(|(&amount, &balance)| -> Result<u128, StablePoolError> {
                ensure!(
                    amount <= balance,
                    StablePoolError::FlashLoanExceedsLiquidity
                );
                let fee = self.flash_loan_fees.loan_fee(amount)?;
                ensure!(
                    amount == 0 || fee > 0,
                    StablePoolError::FlashLoanAmountTooSmall
                );
                Ok(fee)
            })
            .collect()
    }

    /// Accounts for a repaid flash loan given token balances measured
    /// before the loan and after the receiver's callback.
    /// The whole surplus accrues to the pool, the protocol share of `fees`
    /// is moved to the admin ledger.
    /// Returns the protocol share per token.
    pub fn settle_flash_loan(
        &mut self,
        fees: &[u128],
        pre_balances: &[u128],
        post_balances: &[u128],
    ) -> Result<Vec<u128>, StablePoolError> {
        self.check_amounts_count(fees)?;
        self.check_amounts_count(pre_balances)?;
        self.check_amounts_count(post_balances)?;
        let mut new_balances = Vec::with_capacity(fees.len());
        let mut new_admin_balances = Vec::with_capacity(fees.len());
        let mut protocol_fees = Vec::with_capacity(fees.len());
        for i in 0..fees.len() {
            let required = pre_balances[i]
                .checked_add(fees[i])
                .ok_or(MathError::AddOverflow(105))?;
            ensure!(
                post_balances[i] >= required,
                StablePoolError::RepaymentFailed
            );
            let surplus = post_balances[i] - pre_balances[i];
            let protocol_fee = self.flash_loan_fees.protocol_part(fees[i])?;
            new_balances.push(
                self.balances[i]
                    .checked_add(surplus)
                    .ok_or(MathError::AddOverflow(106))?,
            );
            new_admin_balances.push(
                self.admin_balances[i]
                    .checked_add(protocol_fee)
                    .ok_or(MathError::AddOverflow(107))?,
            );
            protocol_fees.push(protocol_fee);
        }
        self.balances = new_balances;
        self.admin_balances = new_admin_balances;
        Ok(protocol_fees)
    }

    /// Returns (initial, future) precise coefficients of the started ramp.
    pub fn ramp_amp_coef(
        &mut self,
        future_a: u128,
        future_time: Timestamp,
        now: Timestamp,
    ) -> Result<(u128, u128), StablePoolError> {
        self.amp_coef.ramp_amp_coef(future_a, future_time, now)
    }

    pub fn stop_ramp_amp_coef(&mut self, now: Timestamp) -> Result<u128, StablePoolError> {
        self.amp_coef.stop_ramp_amp_coef(now)
    }

    pub fn set_fees(&mut self, swap_fee: u128, admin_fee: u128) -> Result<(), StablePoolError> {
        self.fees = Fees::new(swap_fee, admin_fee).ok_or(StablePoolError::InvalidFee)?;
        Ok(())
    }

    pub fn set_flash_loan_fees(
        &mut self,
        flash_loan_fee_bps: u32,
        protocol_fee_share_bps: u32,
    ) -> Result<(), StablePoolError> {
        self.flash_loan_fees = FlashLoanFees::new(flash_loan_fee_bps, protocol_fee_share_bps)
            .ok_or(StablePoolError::InvalidFee)?;
        Ok(())
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Moves all accrued admin fees out of the pool and returns them.
    pub fn take_admin_balances(&mut self) -> Result<Vec<u128>, StablePoolError> {
        let lp_balances = self.lp_balances()?;
        let taken = core::mem::replace(&mut self.admin_balances, vec![0; self.tokens.len()]);
        self.balances = lp_balances;
        Ok(taken)
    }
}
