//! Badge predicates, evaluated against the post-mutation progression record
//! plus the triggering outcome. Milestone checks use exact equality: a jump
//! that crosses level 5 or a 7-day streak in one update without landing on it
//! earns nothing. That matches the platform's historical award sets.

use soroban_sdk::{symbol_short, Env, Symbol};

use crate::storage;
use crate::types::{Badge, SolutionOutcome, UserProgression};

const EVT_BADGE: Symbol = symbol_short!("badge");

/// Gas ceiling for the efficiency badge. Independent of the configurable
/// gas-bonus threshold in `Config`.
const EFFICIENCY_GAS_LIMIT: u64 = 300_000;

/// Evaluate every badge rule and mint whichever newly qualify. Minting is
/// idempotent: an already-earned badge is a no-op, never an error.
pub fn evaluate_and_award(
    env: &Env,
    prog: &UserProgression,
    outcome: &SolutionOutcome,
    prior_solutions: u32,
    speed_threshold_s: u64,
) {
    if prior_solutions == 0 {
        try_award(env, prog, Badge::FirstSolve);
    }
    if prog.level == 5 {
        try_award(env, prog, Badge::LevelFive);
    }
    if prog.level == 10 {
        try_award(env, prog, Badge::LevelTen);
    }
    if outcome.completion_time_s <= speed_threshold_s {
        try_award(env, prog, Badge::SpeedDemon);
    }
    if outcome.score == 100 {
        try_award(env, prog, Badge::Perfectionist);
    }
    if prog.streak_days == 7 {
        try_award(env, prog, Badge::WeekStreak);
    }
    if prog.streak_days == 30 {
        try_award(env, prog, Badge::MonthStreak);
    }
    if outcome.gas_used > 0 && outcome.gas_used < EFFICIENCY_GAS_LIMIT {
        try_award(env, prog, Badge::GasOptimizer);
    }
}

fn try_award(env: &Env, prog: &UserProgression, badge: Badge) {
    if storage::badge_earned(env, &prog.user, badge) {
        return;
    }
    storage::set_badge_earned(env, &prog.user, badge);
    env.events().publish((EVT_BADGE, prog.user.clone()), badge);
}

pub const ALL_BADGES: [Badge; 8] = [
    Badge::FirstSolve,
    Badge::LevelFive,
    Badge::LevelTen,
    Badge::SpeedDemon,
    Badge::Perfectionist,
    Badge::WeekStreak,
    Badge::MonthStreak,
    Badge::GasOptimizer,
];
