use soroban_sdk::{contracterror, contracttype, Address, String, Vec};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserProgression {
    pub user: Address,
    pub level: u32,
    pub total_xp: u64,
    pub streak_days: u32,
    pub last_active: u64,
    pub completed: Vec<u64>,
    pub total_solutions: u32,
    /// Best (lowest) global rank ever held. 0 = never ranked.
    pub best_rank: u32,
}

/// Validated completion event emitted by the solution validator.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SolutionOutcome {
    pub solution_id: u64,
    pub submitter: Address,
    pub challenge_id: u64,
    pub score: u32, // 0..=100
    pub gas_used: u64,
    pub completion_time_s: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChallengeMeta {
    pub base_points: u64,
    pub difficulty_tier: u32, // 0..=4
    pub category: u32,        // 0..NUM_CATEGORIES
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Badge {
    FirstSolve,
    LevelFive,
    LevelTen,
    SpeedDemon,
    Perfectionist,
    WeekStreak,
    MonthStreak,
    GasOptimizer,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Scope {
    Global,
    Category(u32),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LeaderboardEntry {
    pub user: Address,
    pub score: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Competition {
    pub id: u64,
    pub name: String,
    pub start_time: u64,
    pub end_time: u64,
    pub prize_pool: i128,
    pub category: Scope,
    pub finalized: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Payout {
    pub user: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    /// Only this address may submit solution outcomes.
    pub validator: Address,
    /// Reward token used for competition prize pools.
    pub token: Address,
    /// Multiplier per difficulty tier, basis points (10000 = 1x). Length 5.
    pub difficulty_bps: Vec<u32>,
    /// Speed-bonus cutoff per difficulty tier, seconds. Length 5.
    pub speed_thresholds: Vec<u64>,
    pub speed_bonus_bps: u32,
    pub perfect_bonus_bps: u32,
    pub gas_bonus_bps: u32,
    pub gas_threshold: u64,
    /// level_thresholds[i] = minimum XP for level i + 1. Index 0 must be 0.
    pub level_thresholds: Vec<u64>,
}

#[contracttype]
pub enum DataKey {
    Config,                      // Instance
    Progression(Address),        // Persistent
    Solution(u64),               // Persistent, idempotency marker
    Challenge(u64),              // Persistent
    Board(Scope),                // Persistent, Vec<LeaderboardEntry>
    CategoryXp(Address, u32),    // Persistent
    BadgeEarned(Address, Badge), // Persistent
    Competition(u64),            // Persistent
    CompetitionCount,            // Instance
    ActiveComps,                 // Persistent, Vec<u64>
    Payouts(u64),                // Persistent, Vec<Payout>
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    InvalidRange = 4,
    ChallengeNotFound = 5,
    AlreadyProcessed = 6,
    Overflow = 7,
    CompetitionNotFound = 8,
    CompetitionActive = 9,
    InsufficientFunds = 10,
}
