use crate::flash_loan_receiver_contract;
use crate::psp22;
use crate::stable_pool_contract;

use drink::{runtime::MinimalRuntime, session::Session, AccountId32};
use ink_primitives::AccountId;
use ink_wrapper_types::{Connection, ContractResult, InkLangError, ToAccountId};

pub const BOB: AccountId32 = AccountId32::new([2u8; 32]);
pub const CHARLIE: AccountId32 = AccountId32::new([3u8; 32]);

pub const ONE_TOKEN: u128 = 10u128.pow(18);
pub const NO_DEADLINE: u64 = u64::MAX;

pub fn bob() -> AccountId {
    BOB.to_account_id()
}

pub fn seed_account(session: &mut Session<MinimalRuntime>, account: AccountId32) {
    session
        .sandbox()
        .mint_into(account, 1_000_000_000u128 * 10u128.pow(12))
        .unwrap();
}

pub fn upload_all(session: &mut Session<MinimalRuntime>) {
    session
        .upload_code(stable_pool_contract::upload())
        .expect("Upload stable_pool_contract code");
    session
        .upload_code(psp22::upload())
        .expect("Upload psp22 code");
    session
        .upload_code(flash_loan_receiver_contract::upload())
        .expect("Upload flash_loan_receiver_contract code");
}

/// Unwraps the outer ink! language error of a contract call.
pub fn handle_ink_error<R>(res: ContractResult<Result<R, InkLangError>>) -> R {
    match res.result {
        Err(ink_lang_err) => panic!("InkLangError: {:?}", ink_lang_err),
        Ok(r) => r,
    }
}

pub mod psp22_utils {
    use super::*;
    use psp22::{Instance as PSP22, PSP22 as _};

    /// Deploys a token minting the whole `supply` to `caller`.
    pub fn setup_with_amounts(
        session: &mut Session<MinimalRuntime>,
        name: String,
        decimals: u8,
        supply: u128,
        caller: AccountId32,
    ) -> PSP22 {
        let _ = session.set_actor(caller);
        let instance = PSP22::new(supply, Some(name.clone()), Some(name), decimals);
        session
            .instantiate(instance)
            .unwrap()
            .result
            .to_account_id()
            .into()
    }

    pub fn transfer(
        session: &mut Session<MinimalRuntime>,
        token: AccountId,
        to: AccountId,
        amount: u128,
        caller: AccountId32,
    ) -> Result<(), psp22::PSP22Error> {
        let _ = session.set_actor(caller);
        handle_ink_error(
            session
                .execute(PSP22::from(token).transfer(to, amount, vec![]))
                .unwrap(),
        )
    }

    pub fn increase_allowance(
        session: &mut Session<MinimalRuntime>,
        token: AccountId,
        spender: AccountId,
        amount: u128,
        caller: AccountId32,
    ) -> Result<(), psp22::PSP22Error> {
        let _ = session.set_actor(caller);
        handle_ink_error(
            session
                .execute(PSP22::from(token).increase_allowance(spender, amount))
                .unwrap(),
        )
    }

    pub fn balance_of(
        session: &mut Session<MinimalRuntime>,
        token: AccountId,
        account: AccountId,
    ) -> u128 {
        handle_ink_error(
            session
                .query(PSP22::from(token).balance_of(account))
                .unwrap(),
        )
    }
}

pub mod stable_swap {
    use super::*;
    use stable_pool_contract::{StablePool as _, StablePoolError, StablePoolView as _};

    pub fn setup(
        session: &mut Session<MinimalRuntime>,
        tokens: Vec<AccountId>,
        decimals: Vec<u8>,
        init_amp_coef: u128,
        swap_fee: u128,
        admin_fee: u128,
        caller: AccountId32,
    ) -> stable_pool_contract::Instance {
        let _ = session.set_actor(caller.clone());
        let instance = stable_pool_contract::Instance::new(
            tokens,
            decimals,
            "Stable LP".to_string(),
            "SLP".to_string(),
            init_amp_coef,
            swap_fee,
            admin_fee,
            caller.to_account_id(),
        );
        session
            .instantiate(instance)
            .unwrap()
            .result
            .to_account_id()
            .into()
    }

    pub fn add_liquidity(
        session: &mut Session<MinimalRuntime>,
        pool: AccountId,
        caller: AccountId32,
        amounts: Vec<u128>,
        min_mint_amount: u128,
    ) -> Result<u128, StablePoolError> {
        let _ = session.set_actor(caller);
        handle_ink_error(
            session
                .execute(
                    stable_pool_contract::Instance::from(pool).add_liquidity(
                        amounts,
                        min_mint_amount,
                        NO_DEADLINE,
                    ),
                )
                .unwrap(),
        )
    }

    pub fn remove_liquidity(
        session: &mut Session<MinimalRuntime>,
        pool: AccountId,
        caller: AccountId32,
        lp_amount: u128,
        min_amounts: Vec<u128>,
    ) -> Result<Vec<u128>, StablePoolError> {
        let _ = session.set_actor(caller);
        handle_ink_error(
            session
                .execute(
                    stable_pool_contract::Instance::from(pool).remove_liquidity(
                        lp_amount,
                        min_amounts,
                        NO_DEADLINE,
                    ),
                )
                .unwrap(),
        )
    }

    pub fn swap(
        session: &mut Session<MinimalRuntime>,
        pool: AccountId,
        caller: AccountId32,
        token_index_from: u8,
        token_index_to: u8,
        dx: u128,
        min_dy: u128,
    ) -> Result<u128, StablePoolError> {
        let _ = session.set_actor(caller);
        handle_ink_error(
            session
                .execute(stable_pool_contract::Instance::from(pool).swap(
                    token_index_from,
                    token_index_to,
                    dx,
                    min_dy,
                    NO_DEADLINE,
                ))
                .unwrap(),
        )
    }

    pub fn flash_loan(
        session: &mut Session<MinimalRuntime>,
        pool: AccountId,
        caller: AccountId32,
        receiver: AccountId,
        amounts: Vec<u128>,
    ) -> Result<(), StablePoolError> {
        let _ = session.set_actor(caller);
        handle_ink_error(
            session
                .execute(stable_pool_contract::Instance::from(pool).flash_loan(
                    receiver,
                    amounts,
                    vec![],
                    NO_DEADLINE,
                ))
                .unwrap(),
        )
    }

    pub fn set_flash_loan_fees(
        session: &mut Session<MinimalRuntime>,
        pool: AccountId,
        caller: AccountId32,
        fee_bps: u32,
        protocol_fee_share_bps: u32,
    ) -> Result<(), StablePoolError> {
        let _ = session.set_actor(caller);
        handle_ink_error(
            session
                .execute(
                    stable_pool_contract::Instance::from(pool)
                        .set_flash_loan_fees(fee_bps, protocol_fee_share_bps),
                )
                .unwrap(),
        )
    }

    pub fn get_token_balances(
        session: &mut Session<MinimalRuntime>,
        pool: AccountId,
    ) -> Vec<u128> {
        handle_ink_error(
            session
                .query(stable_pool_contract::Instance::from(pool).get_token_balances())
                .unwrap(),
        )
        .unwrap()
    }

    pub fn get_admin_balance(
        session: &mut Session<MinimalRuntime>,
        pool: AccountId,
        token_index: u8,
    ) -> u128 {
        handle_ink_error(
            session
                .query(stable_pool_contract::Instance::from(pool).get_admin_balance(token_index))
                .unwrap(),
        )
        .unwrap()
    }

    pub fn get_virtual_price(session: &mut Session<MinimalRuntime>, pool: AccountId) -> u128 {
        handle_ink_error(
            session
                .query(stable_pool_contract::Instance::from(pool).get_virtual_price())
                .unwrap(),
        )
        .unwrap()
    }

    pub fn lp_balance_of(
        session: &mut Session<MinimalRuntime>,
        pool: AccountId,
        account: AccountId,
    ) -> u128 {
        use stable_pool_contract::PSP22 as _;
        handle_ink_error(
            session
                .query(stable_pool_contract::Instance::from(pool).balance_of(account))
                .unwrap(),
        )
    }

    pub fn lp_total_supply(session: &mut Session<MinimalRuntime>, pool: AccountId) -> u128 {
        use stable_pool_contract::PSP22 as _;
        handle_ink_error(
            session
                .query(stable_pool_contract::Instance::from(pool).total_supply())
                .unwrap(),
        )
    }
}

pub mod flash_loan_receiver {
    use super::*;

    pub fn setup(
        session: &mut Session<MinimalRuntime>,
        repay_fee: bool,
        caller: AccountId32,
    ) -> flash_loan_receiver_contract::Instance {
        let _ = session.set_actor(caller);
        let instance = flash_loan_receiver_contract::Instance::new(repay_fee);
        session
            .instantiate(instance)
            .unwrap()
            .result
            .to_account_id()
            .into()
    }

    pub fn loans_received(session: &mut Session<MinimalRuntime>, receiver: AccountId) -> u32 {
        handle_ink_error(
            session
                .query(flash_loan_receiver_contract::Instance::from(receiver).loans_received())
                .unwrap(),
        )
    }
}
