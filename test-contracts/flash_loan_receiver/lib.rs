#![cfg_attr(not(feature = "std"), no_std, no_main)]

/// Flash loan borrower for end-to-end tests.
/// Sends back every borrowed amount, with the fee on top only when `repay_fee` is set.
/// It must hold enough of each token to cover the fees.
#[ink::contract]
mod flash_loan_receiver {
    use ink::{
        contract_ref,
        prelude::{vec, vec::Vec},
    };
    use psp22::PSP22;
    use traits::FlashLoanReceiver;

    #[ink(storage)]
    pub struct FlashLoanReceiverContract {
        repay_fee: bool,
        loans_received: u32,
    }

    impl FlashLoanReceiverContract {
        #[ink(constructor)]
        pub fn new(repay_fee: bool) -> Self {
            Self {
                repay_fee,
                loans_received: 0,
            }
        }

        #[ink(message)]
        pub fn set_repay_fee(&mut self, repay_fee: bool) {
            self.repay_fee = repay_fee;
        }

        #[ink(message)]
        pub fn loans_received(&self) -> u32 {
            self.loans_received
        }
    }

    impl FlashLoanReceiver for FlashLoanReceiverContract {
        #[ink(message)]
        fn execute_operation(
            &mut self,
            pool: AccountId,
            tokens: Vec<AccountId>,
            amounts: Vec<u128>,
            fees: Vec<u128>,
            _data: Vec<u8>,
        ) {
            self.loans_received = self.loans_received.saturating_add(1);
            for ((&token, &amount), &fee) in tokens.iter().zip(amounts.iter()).zip(fees.iter()) {
                let repayment = if self.repay_fee {
                    amount.saturating_add(fee)
                } else {
                    amount
                };
                if repayment > 0 {
                    let mut token: contract_ref!(PSP22) = token.into();
                    // a short repayment is reported by the pool
                    let _ = token.transfer(pool, repayment, vec![]);
                }
            }
        }
    }
}
