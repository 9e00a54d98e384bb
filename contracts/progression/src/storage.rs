use soroban_sdk::{Address, Env, Vec};

use crate::types::{
    Badge, ChallengeMeta, Competition, Config, DataKey, Error, LeaderboardEntry, Payout, Scope,
    UserProgression,
};

// ~30 / ~60 days at 5s per ledger.
const LEDGER_TTL_THRESHOLD: u32 = 518_400;
const LEDGER_TTL_BUMP: u32 = 1_036_800;

pub fn bump(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, LEDGER_TTL_THRESHOLD, LEDGER_TTL_BUMP);
}

pub fn set_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> Result<Config, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_progression(env: &Env, user: &Address) -> Option<UserProgression> {
    env.storage()
        .persistent()
        .get(&DataKey::Progression(user.clone()))
}

pub fn set_progression(env: &Env, prog: &UserProgression) {
    let key = DataKey::Progression(prog.user.clone());
    env.storage().persistent().set(&key, prog);
    bump(env, &key);
}

pub fn default_progression(env: &Env, user: &Address) -> UserProgression {
    UserProgression {
        user: user.clone(),
        level: 1,
        total_xp: 0,
        streak_days: 0,
        last_active: 0,
        completed: Vec::new(env),
        total_solutions: 0,
        best_rank: 0,
    }
}

pub fn solution_processed(env: &Env, solution_id: u64) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Solution(solution_id))
}

pub fn mark_solution(env: &Env, solution_id: u64) {
    let key = DataKey::Solution(solution_id);
    env.storage().persistent().set(&key, &true);
    bump(env, &key);
}

pub fn get_challenge(env: &Env, challenge_id: u64) -> Option<ChallengeMeta> {
    env.storage()
        .persistent()
        .get(&DataKey::Challenge(challenge_id))
}

pub fn set_challenge(env: &Env, challenge_id: u64, meta: &ChallengeMeta) {
    let key = DataKey::Challenge(challenge_id);
    env.storage().persistent().set(&key, meta);
    bump(env, &key);
}

pub fn get_board(env: &Env, scope: Scope) -> Vec<LeaderboardEntry> {
    env.storage()
        .persistent()
        .get(&DataKey::Board(scope))
        .unwrap_or(Vec::new(env))
}

pub fn set_board(env: &Env, scope: Scope, board: &Vec<LeaderboardEntry>) {
    let key = DataKey::Board(scope);
    env.storage().persistent().set(&key, board);
    bump(env, &key);
}

pub fn get_category_xp(env: &Env, user: &Address, category: u32) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::CategoryXp(user.clone(), category))
        .unwrap_or(0)
}

pub fn set_category_xp(env: &Env, user: &Address, category: u32, xp: u64) {
    let key = DataKey::CategoryXp(user.clone(), category);
    env.storage().persistent().set(&key, &xp);
    bump(env, &key);
}

pub fn badge_earned(env: &Env, user: &Address, badge: Badge) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::BadgeEarned(user.clone(), badge))
}

pub fn set_badge_earned(env: &Env, user: &Address, badge: Badge) {
    let key = DataKey::BadgeEarned(user.clone(), badge);
    env.storage().persistent().set(&key, &true);
    bump(env, &key);
}

pub fn next_competition_id(env: &Env) -> u64 {
    let mut id: u64 = env
        .storage()
        .instance()
        .get(&DataKey::CompetitionCount)
        .unwrap_or(0);
    id += 1;
    env.storage().instance().set(&DataKey::CompetitionCount, &id);
    id
}

pub fn get_competition(env: &Env, id: u64) -> Option<Competition> {
    env.storage().persistent().get(&DataKey::Competition(id))
}

pub fn set_competition(env: &Env, comp: &Competition) {
    let key = DataKey::Competition(comp.id);
    env.storage().persistent().set(&key, comp);
    bump(env, &key);
}

pub fn get_active_comps(env: &Env) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::ActiveComps)
        .unwrap_or(Vec::new(env))
}

pub fn set_active_comps(env: &Env, ids: &Vec<u64>) {
    let key = DataKey::ActiveComps;
    env.storage().persistent().set(&key, ids);
    bump(env, &key);
}

pub fn get_payouts(env: &Env, competition_id: u64) -> Vec<Payout> {
    env.storage()
        .persistent()
        .get(&DataKey::Payouts(competition_id))
        .unwrap_or(Vec::new(env))
}

pub fn set_payouts(env: &Env, competition_id: u64, payouts: &Vec<Payout>) {
    let key = DataKey::Payouts(competition_id);
    env.storage().persistent().set(&key, payouts);
    bump(env, &key);
}
