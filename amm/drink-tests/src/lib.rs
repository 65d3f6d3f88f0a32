#[cfg(test)]
mod flash_loan_receiver_contract;
#[cfg(test)]
mod psp22;
#[cfg(test)]
mod stable_pool_contract;
#[cfg(test)]
mod utils;
