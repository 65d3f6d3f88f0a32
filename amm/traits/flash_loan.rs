use ink::prelude::vec::Vec;
use ink::primitives::AccountId;

/// Callback invoked by the pool on the borrower within `flash_loan`.
/// Before returning, the receiver must transfer back to the pool
/// every borrowed amount together with its fee.
#[ink::trait_definition]
pub trait FlashLoanReceiver {
    /// `amounts[i]` of `tokens[i]` have been transferred to the receiver,
    /// `fees[i]` is due on top of each of them.
    #[ink(message)]
    fn execute_operation(
        &mut self,
        pool: AccountId,
        tokens: Vec<AccountId>,
        amounts: Vec<u128>,
        fees: Vec<u128>,
        data: Vec<u8>,
    );
}
