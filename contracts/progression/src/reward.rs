//! Pure fixed-point reward math. No storage access, no Env.

use crate::types::Error;

pub const BASIS_POINTS: u128 = 10_000;

pub struct BonusParams {
    pub speed_bonus_bps: u32,
    pub perfect_bonus_bps: u32,
    pub gas_bonus_bps: u32,
    pub gas_threshold: u64,
}

/// XP for a validated solution. Bonuses compound on the running total in a
/// fixed order: speed, then perfect score, then gas. Reordering them changes
/// final amounts, so they must stay exactly as written.
pub fn compute_reward(
    base_points: u64,
    difficulty_bps: u32,
    score: u32,
    completion_time_s: u64,
    speed_threshold_s: u64,
    gas_used: u64,
    bonus: &BonusParams,
) -> Result<u64, Error> {
    let mut reward = mul_div(base_points as u128, difficulty_bps as u128, BASIS_POINTS)?;
    reward = mul_div(reward, score as u128, 100)?;

    if completion_time_s <= speed_threshold_s {
        reward = add_bps(reward, bonus.speed_bonus_bps)?;
    }
    if score == 100 {
        reward = add_bps(reward, bonus.perfect_bonus_bps)?;
    }
    if gas_used > 0 && gas_used < bonus.gas_threshold {
        reward = add_bps(reward, bonus.gas_bonus_bps)?;
    }

    u64::try_from(reward).map_err(|_| Error::Overflow)
}

fn mul_div(value: u128, num: u128, den: u128) -> Result<u128, Error> {
    value.checked_mul(num).ok_or(Error::Overflow).map(|v| v / den)
}

fn add_bps(value: u128, bps: u32) -> Result<u128, Error> {
    let bonus = mul_div(value, bps as u128, BASIS_POINTS)?;
    value.checked_add(bonus).ok_or(Error::Overflow)
}
