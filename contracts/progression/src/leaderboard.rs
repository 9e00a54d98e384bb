//! Bounded top-N ranking per scope. Boards are kept sorted descending by
//! score at all times; among equal scores the earlier-ranked entry keeps its
//! position (a new or moved entry goes after every entry scoring >= it).

use soroban_sdk::{Address, Env, Vec};

use crate::storage;
use crate::types::{LeaderboardEntry, Scope};

pub const MAX_ENTRIES: u32 = 100;

/// Record `user`'s new cumulative score in `scope`. Returns the 1-based rank
/// after the update, or 0 if the user is untracked (board full and the user
/// was not already on it).
pub fn record_score(env: &Env, scope: Scope, user: &Address, score: u64) -> u32 {
    let mut board = storage::get_board(env, scope);

    let existing = position_of(&board, user);
    match existing {
        Some(idx) => {
            // An unchanged score must not move the entry past equal scores.
            if board.get(idx).map(|e| e.score) == Some(score) {
                return idx + 1;
            }
            board.remove(idx);
        }
        None => {
            // A full board never admits new members, even with a higher
            // score than the current minimum.
            if board.len() >= MAX_ENTRIES {
                return 0;
            }
        }
    }

    let entry = LeaderboardEntry {
        user: user.clone(),
        score,
    };
    let rank_idx = insertion_index(&board, score);
    board.insert(rank_idx, entry);

    while board.len() > MAX_ENTRIES {
        board.pop_back();
    }

    storage::set_board(env, scope, &board);
    rank_idx + 1
}

/// 1-based rank of `user` in `scope`, 0 if untracked.
pub fn rank_of(env: &Env, scope: Scope, user: &Address) -> u32 {
    let board = storage::get_board(env, scope);
    match position_of(&board, user) {
        Some(idx) => idx + 1,
        None => 0,
    }
}

pub fn top_n(env: &Env, scope: Scope, n: u32) -> Vec<LeaderboardEntry> {
    let board = storage::get_board(env, scope);
    if board.len() <= n {
        return board;
    }
    let mut out = Vec::new(env);
    for i in 0..n {
        if let Some(entry) = board.get(i) {
            out.push_back(entry);
        }
    }
    out
}

fn position_of(board: &Vec<LeaderboardEntry>, user: &Address) -> Option<u32> {
    for i in 0..board.len() {
        if let Some(entry) = board.get(i) {
            if entry.user == *user {
                return Some(i);
            }
        }
    }
    None
}

/// First index whose score is strictly below `score`; appending past all
/// ties keeps the ordering stable.
fn insertion_index(board: &Vec<LeaderboardEntry>, score: u64) -> u32 {
    for i in 0..board.len() {
        if let Some(entry) = board.get(i) {
            if entry.score < score {
                return i;
            }
        }
    }
    board.len()
}
