#![cfg_attr(not(feature = "std"), no_std, no_main)]
mod amp_coef;
mod pool;

#[ink::contract]
pub mod stable_pool {
    use crate::pool::StablePoolData;
    use amm_helpers::{constants::stable_pool::TOKEN_TARGET_DECIMALS, ensure};
    use ink::contract_ref;
    use ink::prelude::{string::String, vec, vec::Vec};
    use psp22::{PSP22Data, PSP22Error, PSP22Event, PSP22Metadata, PSP22};
    use traits::{FlashLoanReceiver, StablePool, StablePoolError, StablePoolView};

    #[ink(event)]
    pub struct AddLiquidity {
        #[ink(topic)]
        pub provider: AccountId,
        pub token_amounts: Vec<u128>,
        pub lp_token_amount: u128,
        pub lp_token_supply: u128,
    }

    #[ink(event)]
    pub struct RemoveLiquidity {
        #[ink(topic)]
        pub provider: AccountId,
        pub token_amounts: Vec<u128>,
        pub lp_token_amount: u128,
        pub lp_token_supply: u128,
    }

    #[ink(event)]
    pub struct RemoveLiquidityImbalance {
        #[ink(topic)]
        pub provider: AccountId,
        pub token_amounts: Vec<u128>,
        pub lp_token_amount: u128,
        pub lp_token_supply: u128,
    }

    #[ink(event)]
    pub struct RemoveLiquidityOne {
        #[ink(topic)]
        pub provider: AccountId,
        pub lp_token_amount: u128,
        pub lp_token_supply: u128,
        pub token_index: u8,
        pub token_amount: u128,
    }

    #[ink(event)]
    pub struct TokenExchange {
        #[ink(topic)]
        pub buyer: AccountId,
        pub token_index_sold: u8,
        pub tokens_sold: u128,
        pub token_index_bought: u8,
        pub tokens_bought: u128,
    }

    #[ink(event)]
    pub struct FlashLoan {
        #[ink(topic)]
        pub receiver: AccountId,
        pub amounts: Vec<u128>,
        pub fees: Vec<u128>,
        pub protocol_fees: Vec<u128>,
    }

    #[ink(event)]
    pub struct RampA {
        pub old_a: u128,
        pub new_a: u128,
        pub initial_time: u64,
        pub future_time: u64,
    }

    #[ink(event)]
    pub struct StopRampA {
        pub current_a: u128,
        pub time: u64,
    }

    #[ink(event)]
    pub struct NewFee {
        pub swap_fee: u128,
        pub admin_fee: u128,
    }

    #[ink(event)]
    pub struct NewFlashLoanFees {
        pub flash_loan_fee_bps: u32,
        pub protocol_fee_share_bps: u32,
    }

    #[ink(event)]
    pub struct Paused {
        #[ink(topic)]
        pub account: AccountId,
    }

    #[ink(event)]
    pub struct Unpaused {
        #[ink(topic)]
        pub account: AccountId,
    }

    #[ink(event)]
    pub struct AdminFeesWithdrawn {
        #[ink(topic)]
        pub to: AccountId,
        pub amounts: Vec<u128>,
    }

    #[ink(event)]
    pub struct OwnerChanged {
        #[ink(topic)]
        pub new_owner: AccountId,
    }

    #[ink(event)]
    pub struct Approval {
        /// Account providing allowance.
        #[ink(topic)]
        pub owner: AccountId,
        /// Allowance beneficiary.
        #[ink(topic)]
        pub spender: AccountId,
        /// New allowance amount.
        pub amount: u128,
    }

    /// Event emitted when transfer of LP tokens occurs.
    #[ink(event)]
    pub struct Transfer {
        /// Transfer sender. `None` in case of minting new tokens.
        #[ink(topic)]
        pub from: Option<AccountId>,
        /// Transfer recipient. `None` in case of burning tokens.
        #[ink(topic)]
        pub to: Option<AccountId>,
        /// Amount of tokens transferred (or minted/burned).
        pub value: u128,
    }

    #[ink(storage)]
    pub struct StablePoolContract {
        owner: AccountId,
        pool: StablePoolData,
        /// The pool itself is the LP token.
        psp22: PSP22Data,
        lp_name: String,
        lp_symbol: String,
    }

    impl StablePoolContract {
        #[allow(clippy::too_many_arguments)]
        #[ink(constructor)]
        pub fn new(
            tokens: Vec<AccountId>,
            tokens_decimals: Vec<u8>,
            lp_name: String,
            lp_symbol: String,
            init_amp_coef: u128,
            swap_fee: u128,
            admin_fee: u128,
            owner: AccountId,
        ) -> Result<Self, StablePoolError> {
            let pool =
                StablePoolData::new(tokens, tokens_decimals, init_amp_coef, swap_fee, admin_fee)?;
            Ok(Self {
                owner,
                pool,
                psp22: PSP22Data::default(),
                lp_name,
                lp_symbol,
            })
        }

        /// A helper function emitting events contained in a vector of PSP22Events.
        fn emit_events(&self, events: Vec<PSP22Event>) {
            for event in events {
                match event {
                    PSP22Event::Transfer { from, to, value } => {
                        self.env().emit_event(Transfer { from, to, value })
                    }
                    PSP22Event::Approval {
                        owner,
                        spender,
                        amount,
                    } => self.env().emit_event(Approval {
                        owner,
                        spender,
                        amount,
                    }),
                }
            }
        }

        #[inline]
        fn token_by_address(&self, address: AccountId) -> contract_ref!(PSP22) {
            address.into()
        }

        fn ensure_owner(&self) -> Result<(), StablePoolError> {
            ensure!(
                self.env().caller() == self.owner,
                StablePoolError::OnlyOwner
            );
            Ok(())
        }

        #[inline]
        fn now(&self) -> u64 {
            self.env().block_timestamp()
        }

        /// Pulls `amounts` of pool tokens from the caller.
        fn transfer_in(&self, amounts: &[u128]) -> Result<(), StablePoolError> {
            for (&token, &amount) in self.pool.tokens().iter().zip(amounts.iter()) {
                if amount > 0 {
                    self.token_by_address(token).transfer_from(
                        self.env().caller(),
                        self.env().account_id(),
                        amount,
                        vec![],
                    )?;
                }
            }
            Ok(())
        }

        /// Sends `amounts` of pool tokens to `to`.
        fn transfer_out(&self, to: AccountId, amounts: &[u128]) -> Result<(), StablePoolError> {
            for (&token, &amount) in self.pool.tokens().iter().zip(amounts.iter()) {
                if amount > 0 {
                    self.token_by_address(token).transfer(to, amount, vec![])?;
                }
            }
            Ok(())
        }

        /// Balances of pool tokens held by this contract, as reported by the tokens.
        fn measured_balances(&self) -> Vec<u128> {
            self.pool
                .tokens()
                .iter()
                .map(|&token| {
                    self.token_by_address(token)
                        .balance_of(self.env().account_id())
                })
                .collect()
        }

        fn amounts_for_token(&self, token_index: u8, amount: u128) -> Vec<u128> {
            let mut amounts = vec![0; self.pool.tokens().len()];
            amounts[token_index as usize] = amount;
            amounts
        }
    }

    impl StablePool for StablePoolContract {
        #[ink(message)]
        fn add_liquidity(
            &mut self,
            amounts: Vec<u128>,
            min_mint_amount: u128,
            deadline: u64,
        ) -> Result<u128, StablePoolError> {
            let minted = self.pool.add_liquidity(
                &amounts,
                min_mint_amount,
                self.psp22.total_supply(),
                self.now(),
                deadline,
            )?;

            self.transfer_in(&amounts)?;

            let provider = self.env().caller();
            let events = self.psp22.mint(provider, minted)?;
            self.emit_events(events);

            self.env().emit_event(AddLiquidity {
                provider,
                token_amounts: amounts,
                lp_token_amount: minted,
                lp_token_supply: self.psp22.total_supply(),
            });
            Ok(minted)
        }

        #[ink(message)]
        fn remove_liquidity(
            &mut self,
            lp_amount: u128,
            min_amounts: Vec<u128>,
            deadline: u64,
        ) -> Result<Vec<u128>, StablePoolError> {
            let amounts = self.pool.remove_liquidity(
                lp_amount,
                &min_amounts,
                self.psp22.total_supply(),
                self.now(),
                deadline,
            )?;

            let provider = self.env().caller();
            let events = self.psp22.burn(provider, lp_amount)?;
            self.emit_events(events);

            self.transfer_out(provider, &amounts)?;

            self.env().emit_event(RemoveLiquidity {
                provider,
                token_amounts: amounts.clone(),
                lp_token_amount: lp_amount,
                lp_token_supply: self.psp22.total_supply(),
            });
            Ok(amounts)
        }

        #[ink(message)]
        fn remove_liquidity_imbalance(
            &mut self,
            amounts: Vec<u128>,
            max_burn_amount: u128,
            deadline: u64,
        ) -> Result<u128, StablePoolError> {
            let burned = self.pool.remove_liquidity_imbalance(
                &amounts,
                max_burn_amount,
                self.psp22.total_supply(),
                self.now(),
                deadline,
            )?;

            let provider = self.env().caller();
            let events = self.psp22.burn(provider, burned)?;
            self.emit_events(events);

            self.transfer_out(provider, &amounts)?;

            self.env().emit_event(RemoveLiquidityImbalance {
                provider,
                token_amounts: amounts,
                lp_token_amount: burned,
                lp_token_supply: self.psp22.total_supply(),
            });
            Ok(burned)
        }

        #[ink(message)]
        fn remove_liquidity_one_token(
            &mut self,
            lp_amount: u128,
            token_index: u8,
            min_amount: u128,
            deadline: u64,
        ) -> Result<u128, StablePoolError> {
            let token_amount = self.pool.remove_liquidity_one_token(
                lp_amount,
                token_index,
                min_amount,
                self.psp22.total_supply(),
                self.now(),
                deadline,
            )?;

            let provider = self.env().caller();
            let events = self.psp22.burn(provider, lp_amount)?;
            self.emit_events(events);

            self.transfer_out(provider, &self.amounts_for_token(token_index, token_amount))?;

            self.env().emit_event(RemoveLiquidityOne {
                provider,
                lp_token_amount: lp_amount,
                lp_token_supply: self.psp22.total_supply(),
                token_index,
                token_amount,
            });
            Ok(token_amount)
        }

        #[ink(message)]
        fn swap(
            &mut self,
            token_index_from: u8,
            token_index_to: u8,
            dx: u128,
            min_dy: u128,
            deadline: u64,
        ) -> Result<u128, StablePoolError> {
            let dy = self.pool.swap(
                token_index_from,
                token_index_to,
                dx,
                min_dy,
                self.now(),
                deadline,
            )?;

            self.transfer_in(&self.amounts_for_token(token_index_from, dx))?;
            let buyer = self.env().caller();
            self.transfer_out(buyer, &self.amounts_for_token(token_index_to, dy))?;

            self.env().emit_event(TokenExchange {
                buyer,
                token_index_sold: token_index_from,
                tokens_sold: dx,
                token_index_bought: token_index_to,
                tokens_bought: dy,
            });
            Ok(dy)
        }

        #[ink(message)]
        fn flash_loan(
            &mut self,
            receiver: AccountId,
            amounts: Vec<u128>,
            data: Vec<u8>,
            deadline: u64,
        ) -> Result<(), StablePoolError> {
            let fees = self
                .pool
                .flash_loan_fees_for(&amounts, self.now(), deadline)?;
            let pre_balances = self.measured_balances();

            self.transfer_out(receiver, &amounts)?;
            let mut receiver_ref: contract_ref!(FlashLoanReceiver) = receiver.into();
            receiver_ref.execute_operation(
                self.env().account_id(),
                self.pool.tokens().to_vec(),
                amounts.clone(),
                fees.clone(),
                data,
            );

            let post_balances = self.measured_balances();
            let protocol_fees = self
                .pool
                .settle_flash_loan(&fees, &pre_balances, &post_balances)?;

            self.env().emit_event(FlashLoan {
                receiver,
                amounts,
                fees,
                protocol_fees,
            });
            Ok(())
        }

        #[ink(message)]
        fn ramp_a(&mut self, future_a: u128, future_time: u64) -> Result<(), StablePoolError> {
            self.ensure_owner()?;
            let initial_time = self.now();
            let (old_a, new_a) = self
                .pool
                .ramp_amp_coef(future_a, future_time, initial_time)?;
            self.env().emit_event(RampA {
                old_a,
                new_a,
                initial_time,
                future_time,
            });
            Ok(())
        }

        #[ink(message)]
        fn stop_ramp_a(&mut self) -> Result<(), StablePoolError> {
            self.ensure_owner()?;
            let time = self.now();
            let current_a = self.pool.stop_ramp_amp_coef(time)?;
            self.env().emit_event(StopRampA { current_a, time });
            Ok(())
        }

        #[ink(message)]
        fn set_fee(&mut self, swap_fee: u128, admin_fee: u128) -> Result<(), StablePoolError> {
            self.ensure_owner()?;
            self.pool.set_fees(swap_fee, admin_fee)?;
            self.env().emit_event(NewFee {
                swap_fee,
                admin_fee,
            });
            Ok(())
        }

        #[ink(message)]
        fn set_flash_loan_fees(
            &mut self,
            flash_loan_fee_bps: u32,
            protocol_fee_share_bps: u32,
        ) -> Result<(), StablePoolError> {
            self.ensure_owner()?;
            self.pool
                .set_flash_loan_fees(flash_loan_fee_bps, protocol_fee_share_bps)?;
            self.env().emit_event(NewFlashLoanFees {
                flash_loan_fee_bps,
                protocol_fee_share_bps,
            });
            Ok(())
        }

        #[ink(message)]
        fn pause(&mut self) -> Result<(), StablePoolError> {
            self.ensure_owner()?;
            self.pool.set_paused(true);
            self.env().emit_event(Paused {
                account: self.env().caller(),
            });
            Ok(())
        }

        #[ink(message)]
        fn unpause(&mut self) -> Result<(), StablePoolError> {
            self.ensure_owner()?;
            self.pool.set_paused(false);
            self.env().emit_event(Unpaused {
                account: self.env().caller(),
            });
            Ok(())
        }

        #[ink(message)]
        fn withdraw_admin_fee(&mut self) -> Result<(), StablePoolError> {
            self.ensure_owner()?;
            let amounts = self.pool.take_admin_balances()?;
            self.transfer_out(self.owner, &amounts)?;
            self.env().emit_event(AdminFeesWithdrawn {
                to: self.owner,
                amounts,
            });
            Ok(())
        }

        #[ink(message)]
        fn set_owner(&mut self, new_owner: AccountId) -> Result<(), StablePoolError> {
            self.ensure_owner()?;
            self.owner = new_owner;
            self.env().emit_event(OwnerChanged { new_owner });
            Ok(())
        }
    }

    impl StablePoolView for StablePoolContract {
        #[ink(message)]
        fn tokens(&self) -> Vec<AccountId> {
            self.pool.tokens().to_vec()
        }

        #[ink(message)]
        fn get_token_index(&self, token: AccountId) -> Result<u8, StablePoolError> {
            self.pool.token_index(token)
        }

        #[ink(message)]
        fn get_token_balance(&self, token_index: u8) -> Result<u128, StablePoolError> {
            self.pool.token_balance(token_index)
        }

        #[ink(message)]
        fn get_token_balances(&self) -> Result<Vec<u128>, StablePoolError> {
            Ok(self.pool.lp_balances()?)
        }

        #[ink(message)]
        fn get_admin_balance(&self, token_index: u8) -> Result<u128, StablePoolError> {
            self.pool.admin_balance(token_index)
        }

        #[ink(message)]
        fn get_a(&self) -> Result<u128, StablePoolError> {
            self.pool.amp_coef(self.now())
        }

        #[ink(message)]
        fn get_a_precise(&self) -> Result<u128, StablePoolError> {
            self.pool.amp_coef_precise(self.now())
        }

        #[ink(message)]
        fn get_virtual_price(&self) -> Result<u128, StablePoolError> {
            self.pool
                .virtual_price(self.now(), self.psp22.total_supply())
        }

        #[ink(message)]
        fn fees(&self) -> (u128, u128) {
            let fees = self.pool.fees();
            (fees.swap_fee, fees.admin_fee)
        }

        #[ink(message)]
        fn flash_loan_fees(&self) -> (u32, u32) {
            let fees = self.pool.flash_loan_fees();
            (fees.fee_bps, fees.protocol_fee_share_bps)
        }

        #[ink(message)]
        fn is_paused(&self) -> bool {
            self.pool.is_paused()
        }

        #[ink(message)]
        fn owner(&self) -> AccountId {
            self.owner
        }

        #[ink(message)]
        fn calculate_swap(
            &self,
            token_index_from: u8,
            token_index_to: u8,
            dx: u128,
        ) -> Result<u128, StablePoolError> {
            self.pool
                .calculate_swap(token_index_from, token_index_to, dx, self.now())
        }

        #[ink(message)]
        fn calculate_token_amount(
            &self,
            amounts: Vec<u128>,
            deposit: bool,
        ) -> Result<u128, StablePoolError> {
            let lp_supply = self.psp22.total_supply();
            if deposit {
                self.pool.calculate_deposit(&amounts, lp_supply, self.now())
            } else {
                self.pool.calculate_withdraw(&amounts, lp_supply, self.now())
            }
        }

        #[ink(message)]
        fn calculate_remove_liquidity(
            &self,
            lp_amount: u128,
        ) -> Result<Vec<u128>, StablePoolError> {
            self.pool
                .calculate_remove_liquidity(lp_amount, self.psp22.total_supply())
        }

        #[ink(message)]
        fn calculate_remove_liquidity_one_token(
            &self,
            lp_amount: u128,
            token_index: u8,
        ) -> Result<u128, StablePoolError> {
            self.pool.calculate_remove_liquidity_one_token(
                lp_amount,
                token_index,
                self.psp22.total_supply(),
                self.now(),
            )
        }
    }

    impl PSP22 for StablePoolContract {
        #[ink(message)]
        fn total_supply(&self) -> u128 {
            self.psp22.total_supply()
        }

        #[ink(message)]
        fn balance_of(&self, owner: AccountId) -> u128 {
            self.psp22.balance_of(owner)
        }

        #[ink(message)]
        fn allowance(&self, owner: AccountId, spender: AccountId) -> u128 {
            self.psp22.allowance(owner, spender)
        }

        #[ink(message)]
        fn transfer(
            &mut self,
            to: AccountId,
            value: u128,
            _data: Vec<u8>,
        ) -> Result<(), PSP22Error> {
            let events = self.psp22.transfer(self.env().caller(), to, value)?;
            self.emit_events(events);
            Ok(())
        }

        #[ink(message)]
        fn transfer_from(
            &mut self,
            from: AccountId,
            to: AccountId,
            value: u128,
            _data: Vec<u8>,
        ) -> Result<(), PSP22Error> {
            let events = self
                .psp22
                .transfer_from(self.env().caller(), from, to, value)?;
            self.emit_events(events);
            Ok(())
        }

        #[ink(message)]
        fn approve(&mut self, spender: AccountId, value: u128) -> Result<(), PSP22Error> {
            let events = self.psp22.approve(self.env().caller(), spender, value)?;
            self.emit_events(events);
            Ok(())
        }

        #[ink(message)]
        fn increase_allowance(
            &mut self,
            spender: AccountId,
            delta_value: u128,
        ) -> Result<(), PSP22Error> {
            let events =
                self.psp22
                    .increase_allowance(self.env().caller(), spender, delta_value)?;
            self.emit_events(events);
            Ok(())
        }

        #[ink(message)]
        fn decrease_allowance(
            &mut self,
            spender: AccountId,
            delta_value: u128,
        ) -> Result<(), PSP22Error> {
            let events =
                self.psp22
                    .decrease_allowance(self.env().caller(), spender, delta_value)?;
            self.emit_events(events);
            Ok(())
        }
    }

    impl PSP22Metadata for StablePoolContract {
        #[ink(message)]
        fn token_name(&self) -> Option<String> {
            Some(self.lp_name.clone())
        }

        #[ink(message)]
        fn token_symbol(&self) -> Option<String> {
            Some(self.lp_symbol.clone())
        }

        #[ink(message)]
        fn token_decimals(&self) -> u8 {
            TOKEN_TARGET_DECIMALS
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use amm_helpers::constants::stable_pool::{A_PRECISION, MIN_RAMP_DURATION, ONE_DAY_MS};
        use ink::env::{
            test::{default_accounts, set_block_timestamp, set_caller, DefaultAccounts},
            DefaultEnvironment,
        };
        use ink::prelude::string::ToString;

        const SWAP_FEE: u128 = 10_000_000;

        fn token(id: u8) -> AccountId {
            AccountId::from([id; 32])
        }

        fn accounts() -> DefaultAccounts<DefaultEnvironment> {
            default_accounts::<DefaultEnvironment>()
        }

        fn new_pool(
            tokens: Vec<AccountId>,
            decimals: Vec<u8>,
        ) -> Result<StablePoolContract, StablePoolError> {
            StablePoolContract::new(
                tokens,
                decimals,
                "Stable LP".to_string(),
                "SLP".to_string(),
                50,
                SWAP_FEE,
                0,
                accounts().alice,
            )
        }

        fn default_pool() -> StablePoolContract {
            set_caller::<DefaultEnvironment>(accounts().alice);
            new_pool(vec![token(101), token(102)], vec![18, 6])
                .unwrap_or_else(|err| panic!("Should create pool: {err:?}"))
        }

        #[ink::test]
        fn constructor_validation() {
            assert!(matches!(
                new_pool(vec![token(101)], vec![18]),
                Err(StablePoolError::IncorrectTokenCount)
            ));
            assert!(matches!(
                new_pool(vec![token(101), token(101)], vec![18, 18]),
                Err(StablePoolError::IdenticalTokenId)
            ));
            assert!(matches!(
                new_pool(vec![token(101), token(102)], vec![18, 24]),
                Err(StablePoolError::TooLargeTokenDecimal)
            ));
            assert!(new_pool(vec![token(101), token(102), token(103)], vec![18, 6, 8]).is_ok());
        }

        #[ink::test]
        fn views() {
            let pool = default_pool();
            assert_eq!(pool.tokens(), vec![token(101), token(102)]);
            assert_eq!(pool.get_token_index(token(102)), Ok(1));
            assert_eq!(
                pool.get_token_index(token(103)),
                Err(StablePoolError::TokenNotFound(token(103)))
            );
            assert_eq!(pool.get_token_balances(), Ok(vec![0, 0]));
            assert_eq!(
                pool.get_token_balance(2),
                Err(StablePoolError::IndexOutOfRange)
            );
            assert_eq!(pool.get_admin_balance(0), Ok(0));
            assert_eq!(pool.get_a(), Ok(50));
            assert_eq!(pool.get_a_precise(), Ok(50 * A_PRECISION));
            assert_eq!(pool.get_virtual_price(), Ok(0));
            assert_eq!(pool.fees(), (SWAP_FEE, 0));
            assert_eq!(pool.flash_loan_fees(), (8, 0));
            assert!(!pool.is_paused());
            assert_eq!(pool.owner(), accounts().alice);
            assert_eq!(pool.token_name(), Some("Stable LP".to_string()));
            assert_eq!(pool.token_symbol(), Some("SLP".to_string()));
            assert_eq!(pool.token_decimals(), 18);
            assert_eq!(pool.total_supply(), 0);
        }

        #[ink::test]
        fn owner_only_messages() {
            let mut pool = default_pool();
            set_caller::<DefaultEnvironment>(accounts().bob);
            assert_eq!(pool.set_fee(0, 0), Err(StablePoolError::OnlyOwner));
            assert_eq!(
                pool.set_flash_loan_fees(1, 0),
                Err(StablePoolError::OnlyOwner)
            );
            assert_eq!(pool.pause(), Err(StablePoolError::OnlyOwner));
            assert_eq!(pool.unpause(), Err(StablePoolError::OnlyOwner));
            assert_eq!(pool.ramp_a(100, u64::MAX), Err(StablePoolError::OnlyOwner));
            assert_eq!(pool.stop_ramp_a(), Err(StablePoolError::OnlyOwner));
            assert_eq!(pool.withdraw_admin_fee(), Err(StablePoolError::OnlyOwner));
            assert_eq!(
                pool.set_owner(accounts().bob),
                Err(StablePoolError::OnlyOwner)
            );
        }

        #[ink::test]
        fn set_owner_transfers_ownership() {
            let mut pool = default_pool();
            assert_eq!(pool.set_owner(accounts().bob), Ok(()));
            assert_eq!(pool.owner(), accounts().bob);
            assert_eq!(pool.pause(), Err(StablePoolError::OnlyOwner));
            set_caller::<DefaultEnvironment>(accounts().bob);
            assert_eq!(pool.pause(), Ok(()));
        }

        #[ink::test]
        fn fee_messages() {
            let mut pool = default_pool();
            assert_eq!(pool.set_fee(20_000_000, 5_000_000_000), Ok(()));
            assert_eq!(pool.fees(), (20_000_000, 5_000_000_000));
            assert_eq!(
                pool.set_fee(1_000_000_001, 0),
                Err(StablePoolError::InvalidFee)
            );
            assert_eq!(pool.set_flash_loan_fees(30, 2_000), Ok(()));
            assert_eq!(pool.flash_loan_fees(), (30, 2_000));
            assert_eq!(
                pool.set_flash_loan_fees(0, 0),
                Err(StablePoolError::InvalidFee)
            );
        }

        #[ink::test]
        fn pause_gates_operations() {
            let mut pool = default_pool();
            assert_eq!(pool.pause(), Ok(()));
            assert!(pool.is_paused());
            assert_eq!(
                pool.add_liquidity(vec![1, 1], 0, u64::MAX),
                Err(StablePoolError::Paused)
            );
            assert_eq!(
                pool.swap(0, 1, 1_000, 0, u64::MAX),
                Err(StablePoolError::Paused)
            );
            assert_eq!(
                pool.remove_liquidity_imbalance(vec![1, 1], u128::MAX, u64::MAX),
                Err(StablePoolError::Paused)
            );
            assert_eq!(
                pool.remove_liquidity_one_token(1, 0, 0, u64::MAX),
                Err(StablePoolError::Paused)
            );
            assert_eq!(
                pool.flash_loan(accounts().bob, vec![1, 0], vec![], u64::MAX),
                Err(StablePoolError::Paused)
            );
            // withdrawals are reachable while paused
            assert_eq!(
                pool.remove_liquidity(1, vec![0, 0], u64::MAX),
                Err(StablePoolError::InsufficientLiquidityBurned)
            );
            assert_eq!(pool.unpause(), Ok(()));
            assert!(!pool.is_paused());
        }

        #[ink::test]
        fn deadline_and_input_checks() {
            let mut pool = default_pool();
            set_block_timestamp::<DefaultEnvironment>(1_000);
            assert_eq!(
                pool.swap(0, 1, 1_000, 0, 999),
                Err(StablePoolError::Timeout)
            );
            assert_eq!(
                pool.add_liquidity(vec![1_000, 0], 0, 1_000),
                Err(StablePoolError::InitialDepositRequiresAllTokens)
            );
            assert_eq!(
                pool.add_liquidity(vec![1_000], 0, 1_000),
                Err(StablePoolError::IncorrectAmountsCount)
            );
            assert_eq!(
                pool.flash_loan(accounts().bob, vec![0, 0], vec![], 1_000),
                Err(StablePoolError::NothingToBorrow)
            );
            assert_eq!(
                pool.calculate_token_amount(vec![1_000, 0], true),
                Err(StablePoolError::InitialDepositRequiresAllTokens)
            );
        }

        #[ink::test]
        fn ramp_a_messages() {
            let mut pool = default_pool();
            let start = 2 * ONE_DAY_MS;
            set_block_timestamp::<DefaultEnvironment>(start);
            assert_eq!(
                pool.ramp_a(100, start + MIN_RAMP_DURATION - 1),
                Err(StablePoolError::AmpCoefRampDurationTooShort)
            );
            assert_eq!(
                pool.ramp_a(501, start + MIN_RAMP_DURATION),
                Err(StablePoolError::AmpCoefChangeTooLarge)
            );
            assert_eq!(pool.ramp_a(100, start + MIN_RAMP_DURATION), Ok(()));
            set_block_timestamp::<DefaultEnvironment>(start + MIN_RAMP_DURATION / 2);
            assert_eq!(pool.get_a_precise(), Ok(75 * A_PRECISION));
            assert_eq!(
                pool.ramp_a(200, start + 2 * MIN_RAMP_DURATION),
                Ok(())
            );
            assert_eq!(pool.stop_ramp_a(), Ok(()));
            assert_eq!(pool.get_a(), Ok(75));
            assert_eq!(
                pool.stop_ramp_a(),
                Err(StablePoolError::AmpCoefRampAlreadyStopped)
            );
            set_block_timestamp::<DefaultEnvironment>(start + MIN_RAMP_DURATION / 2 + 1);
            assert_eq!(
                pool.ramp_a(100, start + 3 * MIN_RAMP_DURATION),
                Err(StablePoolError::AmpCoefRampDelayNotElapsed)
            );
        }

        #[ink::test]
        fn lp_token_transfers() {
            let mut pool = default_pool();
            assert_eq!(
                pool.transfer(accounts().bob, 1, vec![]),
                Err(PSP22Error::InsufficientBalance)
            );
            assert_eq!(pool.approve(accounts().bob, 100), Ok(()));
            assert_eq!(pool.allowance(accounts().alice, accounts().bob), 100);
            assert_eq!(pool.increase_allowance(accounts().bob, 10), Ok(()));
            assert_eq!(pool.decrease_allowance(accounts().bob, 20), Ok(()));
            assert_eq!(pool.allowance(accounts().alice, accounts().bob), 90);
        }
    }
}
