use amm_helpers::{
    constants::stable_pool::{
        A_PRECISION, MAX_AMP, MAX_AMP_CHANGE, MIN_AMP, MIN_RAMP_DELAY, MIN_RAMP_DURATION,
    },
    ensure,
};
use traits::{MathError, StablePoolError};

pub type Timestamp = u64;

/// Phase of the amplification coefficient at a given moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampState {
    /// Coefficient equals `target_amp_coef`.
    Stable,
    /// Coefficient moves linearly from `init_amp_coef` towards `target_amp_coef`.
    Ramping,
}

/// Amplification coefficient with time-ramped changes.
/// All coefficients are precise (multiplied by `A_PRECISION`).
#[derive(Default, Debug, scale::Encode, scale::Decode, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct AmplificationCoefficient {
    /// Initial amplification coefficient.
    init_amp_coef: u128,
    /// Target for ramping up amplification coefficient.
    target_amp_coef: u128,
    /// Initial amplification time.
    init_amp_time: Timestamp,
    /// Stop ramp up amplification time.
    stop_amp_time: Timestamp,
}

impl AmplificationCoefficient {
    /// `amp_coef` is given without precision.
    pub fn new(amp_coef: u128) -> Result<Self, StablePoolError> {
        ensure!(
            (MIN_AMP..=MAX_AMP).contains(&amp_coef),
            StablePoolError::InvalidAmpCoef
        );
        let amp_coef_precise = amp_coef
            .checked_mul(A_PRECISION)
            .ok_or(MathError::MulOverflow(90))?;
        Ok(Self {
            init_amp_coef: amp_coef_precise,
            target_amp_coef: amp_coef_precise,
            init_amp_time: 0,
            stop_amp_time: 0,
        })
    }

    pub fn state(&self, current_time: Timestamp) -> RampState {
        if current_time < self.stop_amp_time {
            RampState::Ramping
        } else {
            RampState::Stable
        }
    }

    /// from https://github.com/ref-finance/ref-contracts/blob/752f42d7ec67b66fadda7756ed7eb3d312fb6473/ref-exchange/src/stable_swap/math.rs#L100-L101
    pub fn compute_amp_coef(&self, current_time: Timestamp) -> Result<u128, MathError> {
        match self.state(current_time) {
            RampState::Stable => Ok(self.target_amp_coef),
            RampState::Ramping => {
                let time_range = self
                    .stop_amp_time
                    .checked_sub(self.init_amp_time)
                    .ok_or(MathError::SubUnderflow(90))?;
                let time_delta = current_time
                    .checked_sub(self.init_amp_time)
                    .ok_or(MathError::SubUnderflow(91))?;

                // Compute amp factor based on ramp time
                if self.target_amp_coef >= self.init_amp_coef {
                    // Ramp up
                    let amp_range = self
                        .target_amp_coef
                        .checked_sub(self.init_amp_coef)
                        .ok_or(MathError::SubUnderflow(92))?;
                    let amp_delta = amp_range
                        .checked_mul(time_delta as u128)
                        .ok_or(MathError::MulOverflow(91))?
                        .checked_div(time_range as u128)
                        .ok_or(MathError::DivByZero(90))?;
                    self.init_amp_coef
                        .checked_add(amp_delta)
                        .ok_or(MathError::AddOverflow(90))
                } else {
                    // Ramp down
                    let amp_range = self
                        .init_amp_coef
                        .checked_sub(self.target_amp_coef)
                        .ok_or(MathError::SubUnderflow(93))?;
                    let amp_delta = amp_range
                        .checked_mul(time_delta as u128)
                        .ok_or(MathError::MulOverflow(92))?
                        .checked_div(time_range as u128)
                        .ok_or(MathError::DivByZero(91))?;
                    self.init_amp_coef
                        .checked_sub(amp_delta)
                        .ok_or(MathError::SubUnderflow(94))
                }
            }
        }
    }

    /// Starts ramping towards `target_amp_coef` (given without precision),
    /// reached at `stop_time`. Ramps may be started at most once per
    /// `MIN_RAMP_DELAY`, must last at least `MIN_RAMP_DURATION`
    /// and cannot change the coefficient more than `MAX_AMP_CHANGE` times.
    /// Returns (initial, target) precise coefficients of the new ramp.
    pub fn ramp_amp_coef(
        &mut self,
        target_amp_coef: u128,
        stop_time: Timestamp,
        current_time: Timestamp,
    ) -> Result<(u128, u128), StablePoolError> {
        ensure!(
            current_time >= self.init_amp_time.saturating_add(MIN_RAMP_DELAY),
            StablePoolError::AmpCoefRampDelayNotElapsed
        );
        ensure!(
            stop_time >= current_time.saturating_add(MIN_RAMP_DURATION),
            StablePoolError::AmpCoefRampDurationTooShort
        );
        ensure!(
            (MIN_AMP..=MAX_AMP).contains(&target_amp_coef),
            StablePoolError::AmpCoefOutOfRange
        );
        let current_amp_coef = self.compute_amp_coef(current_time)?;
        let target_amp_coef = target_amp_coef
            .checked_mul(A_PRECISION)
            .ok_or(MathError::MulOverflow(93))?;
        let within_max_change = if target_amp_coef >= current_amp_coef {
            target_amp_coef
                <= current_amp_coef
                    .checked_mul(MAX_AMP_CHANGE)
                    .ok_or(MathError::MulOverflow(94))?
        } else {
            target_amp_coef
                .checked_mul(MAX_AMP_CHANGE)
                .ok_or(MathError::MulOverflow(95))?
                >= current_amp_coef
        };
        ensure!(within_max_change, StablePoolError::AmpCoefChangeTooLarge);
        self.init_amp_coef = current_amp_coef;
        self.init_amp_time = current_time;
        self.target_amp_coef = target_amp_coef;
        self.stop_amp_time = stop_time;
        Ok((current_amp_coef, target_amp_coef))
    }

    /// Freezes the coefficient at its current value.
    /// Returns the frozen precise coefficient.
    pub fn stop_ramp_amp_coef(&mut self, current_time: Timestamp) -> Result<u128, StablePoolError> {
        ensure!(
            self.state(current_time) == RampState::Ramping,
            StablePoolError::AmpCoefRampAlreadyStopped
        );
        let current_amp_coef = self.compute_amp_coef(current_time)?;
        self.init_amp_coef = current_amp_coef;
        self.target_amp_coef = current_amp_coef;
        self.init_amp_time = current_time;
        self.stop_amp_time = current_time;
        Ok(current_amp_coef)
    }
}
