#![no_std]

//! Progression & reward ledger for the challenge platform. Consumes validated
//! solution outcomes and turns them into XP, levels, streaks, badges and
//! leaderboard positions, runs time-boxed prize competitions over the global
//! board, and exposes read-only views for the UI. Every mutating entry point
//! is a single atomic invocation: a failure anywhere rolls the whole
//! distribution back, and each solution id is processed exactly once.

mod badges;
mod leaderboard;
mod reward;
mod storage;
pub mod types;

use soroban_sdk::{
    contract, contractimpl, symbol_short, token, vec, Address, Env, String, Symbol, Vec,
};

use crate::reward::BonusParams;
use crate::types::{
    Badge, ChallengeMeta, Competition, Config, Error, LeaderboardEntry, Payout, Scope,
    SolutionOutcome, UserProgression,
};

pub const NUM_CATEGORIES: u32 = 8;
const NUM_TIERS: u32 = 5;
const SECONDS_PER_DAY: u64 = 86_400;

/// Prize split for competition ranks 1..=3, basis points of the pool.
/// Integer-division remainders stay with the contract.
const PRIZE_SPLIT_BPS: [i128; 3] = [5_000, 3_000, 2_000];

const EVT_XP: Symbol = symbol_short!("xp");
const EVT_LEVELUP: Symbol = symbol_short!("levelup");
const EVT_RANK: Symbol = symbol_short!("rank");
const EVT_COMP_NEW: Symbol = symbol_short!("comp_new");
const EVT_COMP_FIN: Symbol = symbol_short!("comp_fin");

#[contract]
pub struct ProgressionLedger;

#[contractimpl]
impl ProgressionLedger {
    /// One-time setup with platform default tuning. `validator` is the only
    /// address allowed to submit solution outcomes; `token` is the reward
    /// token competitions pay out in.
    pub fn initialize(
        env: Env,
        admin: Address,
        validator: Address,
        token: Address,
    ) -> Result<(), Error> {
        if storage::has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();

        let cfg = Config {
            admin,
            validator,
            token,
            // 1x, 1.25x, 1.5x, 2x, 3x per tier
            difficulty_bps: vec![&env, 10_000, 12_500, 15_000, 20_000, 30_000],
            speed_thresholds: vec![&env, 600, 900, 1_200, 1_800, 3_600],
            speed_bonus_bps: 5_000,
            perfect_bonus_bps: 2_000,
            gas_bonus_bps: 1_500,
            gas_threshold: 300_000,
            level_thresholds: vec![
                &env, 0, 100, 250, 500, 1_000, 2_000, 4_000, 8_000, 16_000, 32_000,
            ],
        };
        storage::set_config(&env, &cfg);
        Ok(())
    }

    /// Admin-only full config replacement (multipliers, bonus rates, speed
    /// thresholds, level table).
    pub fn set_config(env: Env, admin: Address, cfg: Config) -> Result<(), Error> {
        admin.require_auth();
        let current = storage::get_config(&env)?;
        if current.admin != admin {
            return Err(Error::Unauthorized);
        }
        Self::validate_config(&cfg)?;
        storage::set_config(&env, &cfg);
        Ok(())
    }

    /// Admin-only mirror of the challenge registry. Distribution fails for
    /// challenges never registered here.
    pub fn register_challenge(
        env: Env,
        admin: Address,
        challenge_id: u64,
        meta: ChallengeMeta,
    ) -> Result<(), Error> {
        admin.require_auth();
        let cfg = storage::get_config(&env)?;
        if cfg.admin != admin {
            return Err(Error::Unauthorized);
        }
        if meta.difficulty_tier >= NUM_TIERS
            || meta.category >= NUM_CATEGORIES
            || meta.base_points == 0
        {
            return Err(Error::InvalidRange);
        }
        storage::set_challenge(&env, challenge_id, &meta);
        Ok(())
    }

    /// The core transaction: turn one validated solution outcome into XP,
    /// profile mutations, badge awards and leaderboard updates. Each
    /// `solution_id` is applied exactly once; re-delivery gets a typed
    /// `AlreadyProcessed` and no state changes.
    pub fn distribute_reward(env: Env, outcome: SolutionOutcome) -> Result<u64, Error> {
        let cfg = storage::get_config(&env)?;
        cfg.validator.require_auth();

        if outcome.score > 100 {
            return Err(Error::InvalidRange);
        }
        if storage::solution_processed(&env, outcome.solution_id) {
            return Err(Error::AlreadyProcessed);
        }
        let meta =
            storage::get_challenge(&env, outcome.challenge_id).ok_or(Error::ChallengeNotFound)?;

        let difficulty_bps = cfg
            .difficulty_bps
            .get(meta.difficulty_tier)
            .ok_or(Error::InvalidRange)?;
        let speed_threshold = cfg
            .speed_thresholds
            .get(meta.difficulty_tier)
            .ok_or(Error::InvalidRange)?;
        let bonus = BonusParams {
            speed_bonus_bps: cfg.speed_bonus_bps,
            perfect_bonus_bps: cfg.perfect_bonus_bps,
            gas_bonus_bps: cfg.gas_bonus_bps,
            gas_threshold: cfg.gas_threshold,
        };
        let xp = reward::compute_reward(
            meta.base_points,
            difficulty_bps,
            outcome.score,
            outcome.completion_time_s,
            speed_threshold,
            outcome.gas_used,
            &bonus,
        )?;

        let now = env.ledger().timestamp();
        let mut prog = storage::get_progression(&env, &outcome.submitter)
            .unwrap_or_else(|| storage::default_progression(&env, &outcome.submitter));
        let prior_solutions = prog.total_solutions;

        // Streak is judged against the previous activity timestamp, before
        // this completion stamps a new one.
        let elapsed_days = now.saturating_sub(prog.last_active) / SECONDS_PER_DAY;
        if elapsed_days == 1 {
            prog.streak_days += 1;
        } else if elapsed_days > 1 {
            prog.streak_days = 1;
        }

        if !prog.completed.contains(outcome.challenge_id) {
            prog.completed.push_back(outcome.challenge_id);
        }
        prog.total_solutions += 1;
        prog.last_active = now;

        let old_level = prog.level;
        prog.total_xp = prog.total_xp.checked_add(xp).ok_or(Error::Overflow)?;
        prog.level = Self::level_for(&cfg, prog.total_xp);
        if prog.level > old_level {
            env.events().publish(
                (EVT_LEVELUP, outcome.submitter.clone()),
                (old_level, prog.level),
            );
        }

        badges::evaluate_and_award(&env, &prog, &outcome, prior_solutions, speed_threshold);

        let old_rank = leaderboard::rank_of(&env, Scope::Global, &outcome.submitter);
        let global_rank =
            leaderboard::record_score(&env, Scope::Global, &outcome.submitter, prog.total_xp);

        let cat_xp = storage::get_category_xp(&env, &outcome.submitter, meta.category)
            .checked_add(xp)
            .ok_or(Error::Overflow)?;
        storage::set_category_xp(&env, &outcome.submitter, meta.category, cat_xp);
        leaderboard::record_score(
            &env,
            Scope::Category(meta.category),
            &outcome.submitter,
            cat_xp,
        );

        if global_rank != old_rank {
            env.events()
                .publish((EVT_RANK, outcome.submitter.clone()), global_rank);
        }
        // Rank 0 means untracked and never overwrites a real best.
        if global_rank > 0 && (prog.best_rank == 0 || global_rank < prog.best_rank) {
            prog.best_rank = global_rank;
        }

        storage::set_progression(&env, &prog);
        storage::mark_solution(&env, outcome.solution_id);

        env.events().publish(
            (EVT_XP, outcome.submitter.clone()),
            (outcome.solution_id, outcome.challenge_id, xp, prog.total_xp),
        );
        Ok(xp)
    }

    /// Create a time-boxed prize competition. The creator escrows the full
    /// pool into the contract up front.
    pub fn create_competition(
        env: Env,
        creator: Address,
        name: String,
        start_time: u64,
        end_time: u64,
        category: Scope,
        prize_pool: i128,
    ) -> Result<u64, Error> {
        creator.require_auth();
        let cfg = storage::get_config(&env)?;

        let now = env.ledger().timestamp();
        if end_time <= start_time || start_time < now || prize_pool <= 0 {
            return Err(Error::InvalidRange);
        }
        if let Scope::Category(c) = category {
            if c >= NUM_CATEGORIES {
                return Err(Error::InvalidRange);
            }
        }

        let token_client = token::Client::new(&env, &cfg.token);
        if token_client.balance(&creator) < prize_pool {
            return Err(Error::InsufficientFunds);
        }
        token_client.transfer(&creator, &env.current_contract_address(), &prize_pool);

        let id = storage::next_competition_id(&env);
        let comp = Competition {
            id,
            name,
            start_time,
            end_time,
            prize_pool,
            category,
            finalized: false,
        };
        storage::set_competition(&env, &comp);

        let mut active = storage::get_active_comps(&env);
        active.push_back(id);
        storage::set_active_comps(&env, &active);

        env.events()
            .publish((EVT_COMP_NEW, id), (start_time, end_time, prize_pool));
        Ok(id)
    }

    /// Settle an expired competition: pay 50/30/20 of the pool to the current
    /// global top 3 and retire it. Permissionless, so any sweep scheduler can
    /// call it; the one-way `finalized` flag makes retries effect-once.
    pub fn finalize_competition(env: Env, competition_id: u64) -> Result<Vec<Payout>, Error> {
        let cfg = storage::get_config(&env)?;
        let mut comp =
            storage::get_competition(&env, competition_id).ok_or(Error::CompetitionNotFound)?;
        if comp.finalized {
            return Err(Error::AlreadyProcessed);
        }
        if env.ledger().timestamp() < comp.end_time {
            return Err(Error::CompetitionActive);
        }

        // Winners come off the live global board, not a window snapshot.
        let top = leaderboard::top_n(&env, Scope::Global, 3);
        let token_client = token::Client::new(&env, &cfg.token);
        let mut payouts: Vec<Payout> = Vec::new(&env);
        let mut total_paid: i128 = 0;
        for i in 0..top.len() {
            if let Some(entry) = top.get(i) {
                let amount = comp.prize_pool * PRIZE_SPLIT_BPS[i as usize] / 10_000;
                if amount > 0 {
                    token_client.transfer(&env.current_contract_address(), &entry.user, &amount);
                    payouts.push_back(Payout {
                        user: entry.user.clone(),
                        amount,
                    });
                    total_paid += amount;
                }
            }
        }

        comp.finalized = true;
        storage::set_competition(&env, &comp);
        storage::set_payouts(&env, competition_id, &payouts);

        let mut active = storage::get_active_comps(&env);
        if let Some(idx) = active.first_index_of(competition_id) {
            active.remove(idx);
        }
        storage::set_active_comps(&env, &active);

        env.events()
            .publish((EVT_COMP_FIN, competition_id), total_paid);
        Ok(payouts)
    }

    // ── Views ──────────────────────────────────────────────────────────

    /// Profile snapshot; unknown users get the level-1 default view.
    pub fn get_progression(env: Env, user: Address) -> UserProgression {
        storage::get_progression(&env, &user)
            .unwrap_or_else(|| storage::default_progression(&env, &user))
    }

    pub fn get_top_n(env: Env, scope: Scope, n: u32) -> Vec<LeaderboardEntry> {
        leaderboard::top_n(&env, scope, n)
    }

    /// 1-based rank in `scope`, 0 if untracked.
    pub fn get_rank(env: Env, user: Address, scope: Scope) -> u32 {
        leaderboard::rank_of(&env, scope, &user)
    }

    pub fn has_badge(env: Env, user: Address, badge: Badge) -> bool {
        storage::badge_earned(&env, &user, badge)
    }

    pub fn get_badges(env: Env, user: Address) -> Vec<Badge> {
        let mut out = Vec::new(&env);
        for badge in badges::ALL_BADGES {
            if storage::badge_earned(&env, &user, badge) {
                out.push_back(badge);
            }
        }
        out
    }

    pub fn get_challenge(env: Env, challenge_id: u64) -> Option<ChallengeMeta> {
        storage::get_challenge(&env, challenge_id)
    }

    pub fn get_competition(env: Env, competition_id: u64) -> Option<Competition> {
        storage::get_competition(&env, competition_id)
    }

    pub fn get_payouts(env: Env, competition_id: u64) -> Vec<Payout> {
        storage::get_payouts(&env, competition_id)
    }

    pub fn get_active_competitions(env: Env) -> Vec<Competition> {
        let ids = storage::get_active_comps(&env);
        let mut out = Vec::new(&env);
        for i in 0..ids.len() {
            if let Some(id) = ids.get(i) {
                if let Some(comp) = storage::get_competition(&env, id) {
                    out.push_back(comp);
                }
            }
        }
        out
    }

    pub fn get_config(env: Env) -> Result<Config, Error> {
        storage::get_config(&env)
    }

    /// Level implied by an XP total under the current threshold table.
    pub fn level_for_xp(env: Env, xp: u64) -> Result<u32, Error> {
        let cfg = storage::get_config(&env)?;
        Ok(Self::level_for(&cfg, xp))
    }

    // ── Internal helpers ───────────────────────────────────────────────

    /// Scan the table from the top; the first threshold at or below `xp`
    /// wins. Level 1 is the floor for any table.
    fn level_for(cfg: &Config, xp: u64) -> u32 {
        let n = cfg.level_thresholds.len();
        for i in (0..n).rev() {
            if let Some(threshold) = cfg.level_thresholds.get(i) {
                if xp >= threshold {
                    return i + 1;
                }
            }
        }
        1
    }

    fn validate_config(cfg: &Config) -> Result<(), Error> {
        if cfg.difficulty_bps.len() != NUM_TIERS || cfg.speed_thresholds.len() != NUM_TIERS {
            return Err(Error::InvalidRange);
        }
        if cfg.level_thresholds.is_empty() || cfg.level_thresholds.get(0) != Some(0) {
            return Err(Error::InvalidRange);
        }
        let mut prev: u64 = 0;
        for i in 0..cfg.level_thresholds.len() {
            if let Some(t) = cfg.level_thresholds.get(i) {
                if t < prev {
                    return Err(Error::InvalidRange);
                }
                prev = t;
            }
        }
        Ok(())
    }
}
