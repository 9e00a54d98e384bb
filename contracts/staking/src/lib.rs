#![no_std]

//! Time-locked staking of the reward token. One open position per user,
//! simple interest prorated by the second over a fixed 365-day year.
//! Restaking with an open position settles its accrued reward first, then
//! folds the old principal into the new deposit under the new lock period.

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol,
};

const MIN_LOCK_S: u64 = 7 * 86_400;
const MAX_LOCK_S: u64 = 365 * 86_400;
/// Fixed accrual year, leap days ignored.
const YEAR_S: u64 = 365 * 86_400;
const BASIS_POINTS: i128 = 10_000;

const EVT_STAKE: Symbol = symbol_short!("stake");
const EVT_UNSTAKE: Symbol = symbol_short!("unstake");
const EVT_SETTLE: Symbol = symbol_short!("settle");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeConfig {
    pub admin: Address,
    pub token: Address,
    pub apy_bps: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakePosition {
    pub amount: i128,
    pub staked_at: u64,
    pub lock_period_s: u64,
}

#[contracttype]
pub enum DataKey {
    Config,            // Instance
    Position(Address), // Persistent
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    InvalidRange = 4,
    InsufficientFunds = 5,
    NoPosition = 6,
    StillLocked = 7,
}

#[contract]
pub struct StakingLedger;

#[contractimpl]
impl StakingLedger {
    pub fn initialize(env: Env, admin: Address, token: Address, apy_bps: u32) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Config) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();
        let cfg = StakeConfig {
            admin,
            token,
            apy_bps,
        };
        env.storage().instance().set(&DataKey::Config, &cfg);
        Ok(())
    }

    pub fn set_apy(env: Env, admin: Address, apy_bps: u32) -> Result<(), Error> {
        admin.require_auth();
        let mut cfg = Self::cfg(&env)?;
        if cfg.admin != admin {
            return Err(Error::Unauthorized);
        }
        cfg.apy_bps = apy_bps;
        env.storage().instance().set(&DataKey::Config, &cfg);
        Ok(())
    }

    /// Open (or roll over) a time-locked position. With a position already
    /// open, its reward accrued so far is paid out at the current APY and the
    /// old principal joins the new deposit; the new lock period governs the
    /// combined amount and the accrual clock restarts now.
    pub fn stake(env: Env, user: Address, amount: i128, lock_period_s: u64) -> Result<(), Error> {
        user.require_auth();
        let cfg = Self::cfg(&env)?;

        if amount <= 0 || !(MIN_LOCK_S..=MAX_LOCK_S).contains(&lock_period_s) {
            return Err(Error::InvalidRange);
        }

        let token_client = token::Client::new(&env, &cfg.token);
        if token_client.balance(&user) < amount {
            return Err(Error::InsufficientFunds);
        }

        let now = env.ledger().timestamp();
        let key = DataKey::Position(user.clone());
        let mut principal = amount;
        if let Some(prior) = env.storage().persistent().get::<_, StakePosition>(&key) {
            let reward = Self::accrued(&prior, now, cfg.apy_bps);
            if reward > 0 {
                token_client.transfer(&env.current_contract_address(), &user, &reward);
            }
            env.events()
                .publish((EVT_SETTLE, user.clone()), (prior.amount, reward));
            principal += prior.amount;
        }

        token_client.transfer(&user, &env.current_contract_address(), &amount);

        let position = StakePosition {
            amount: principal,
            staked_at: now,
            lock_period_s,
        };
        env.storage().persistent().set(&key, &position);

        env.events()
            .publish((EVT_STAKE, user), (principal, lock_period_s));
        Ok(())
    }

    /// Close a matured position, paying principal plus simple interest for
    /// the full elapsed time.
    pub fn unstake(env: Env, user: Address) -> Result<i128, Error> {
        user.require_auth();
        let cfg = Self::cfg(&env)?;

        let key = DataKey::Position(user.clone());
        let position: StakePosition = env
            .storage()
            .persistent()
            .get(&key)
            .ok_or(Error::NoPosition)?;

        let now = env.ledger().timestamp();
        if now < position.staked_at + position.lock_period_s {
            return Err(Error::StillLocked);
        }

        let reward = Self::accrued(&position, now, cfg.apy_bps);
        let payout = position.amount + reward;

        let token_client = token::Client::new(&env, &cfg.token);
        token_client.transfer(&env.current_contract_address(), &user, &payout);
        env.storage().persistent().remove(&key);

        env.events()
            .publish((EVT_UNSTAKE, user), (position.amount, reward));
        Ok(payout)
    }

    pub fn get_stake(env: Env, user: Address) -> Option<StakePosition> {
        env.storage().persistent().get(&DataKey::Position(user))
    }

    /// Reward accrued so far on the open position, 0 without one.
    pub fn pending_reward(env: Env, user: Address) -> Result<i128, Error> {
        let cfg = Self::cfg(&env)?;
        let position: Option<StakePosition> =
            env.storage().persistent().get(&DataKey::Position(user));
        Ok(match position {
            Some(p) => Self::accrued(&p, env.ledger().timestamp(), cfg.apy_bps),
            None => 0,
        })
    }

    pub fn get_config(env: Env) -> Result<StakeConfig, Error> {
        Self::cfg(&env)
    }

    fn cfg(env: &Env) -> Result<StakeConfig, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::NotInitialized)
    }

    fn accrued(position: &StakePosition, now: u64, apy_bps: u32) -> i128 {
        let elapsed = now.saturating_sub(position.staked_at);
        position.amount * apy_bps as i128 * elapsed as i128 / (YEAR_S as i128 * BASIS_POINTS)
    }
}
