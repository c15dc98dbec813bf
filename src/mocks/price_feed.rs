use odra::prelude::*;

use crate::error::CollateralError;
use crate::oracle::RoundData;

/// Aggregator feed whose answer is set by hand.
#[odra::module(events = [AnswerUpdated])]
pub struct MockPriceFeed {
    decimals: Var<u8>,
    answer: Var<i64>,
    round_id: Var<u64>,
    updated_at: Var<u64>,
    answered_in_round: Var<u64>,
}

#[odra::module]
impl MockPriceFeed {
    /// Deploy with a first round answering `initial_answer`.
    pub fn init(&mut self, decimals: u8, initial_answer: i64) {
        self.decimals.set(decimals);
        self.update_answer(initial_answer);
    }

    /// Publish a new answer stamped with the current block time.
    pub fn update_answer(&mut self, answer: i64) {
        let round_id = self.round_id.get_or_default() + 1;
        let now = self.env().get_block_time();

        self.answer.set(answer);
        self.round_id.set(round_id);
        self.updated_at.set(now);
        self.answered_in_round.set(round_id);

        self.env().emit_event(AnswerUpdated {
            current: answer,
            round_id,
            updated_at: now,
        });
    }

    /// Overwrite the whole round, e.g. to simulate an unfinished or ancient one.
    pub fn set_round_data(&mut self, round_id: u64, answer: i64, updated_at: u64, answered_in_round: u64) {
        self.round_id.set(round_id);
        self.answer.set(answer);
        self.updated_at.set(updated_at);
        self.answered_in_round.set(answered_in_round);
    }

    /// Decimals of the answer.
    pub fn decimals(&self) -> u8 {
        self.decimals.get_or_default()
    }

    /// The round as last set.
    pub fn latest_round_data(&self) -> RoundData {
        RoundData {
            round_id: self.round_id.get_or_default(),
            answer: self.answer.get_or_default(),
            updated_at: self.updated_at.get_or_default(),
            answered_in_round: self.answered_in_round.get_or_default(),
        }
    }
}

/// Emitted by `MockPriceFeed::update_answer`.
#[odra::event]
pub struct AnswerUpdated {
    /// New answer
    pub current: i64,
    /// Round it opened
    pub round_id: u64,
    /// Block time of the update, ms
    pub updated_at: u64,
}

/// Feed that fails every read, the way an unreachable or exhausted source does.
#[odra::module]
pub struct InvalidPriceFeed {
    decimals: Var<u8>,
}

#[odra::module]
impl InvalidPriceFeed {
    /// Deploy reporting `decimals`.
    pub fn init(&mut self, decimals: u8) {
        self.decimals.set(decimals);
    }

    /// Decimals of the answer.
    pub fn decimals(&self) -> u8 {
        self.decimals.get_or_default()
    }

    /// Always reverts with `SourceUnavailable`.
    pub fn latest_round_data(&self) -> RoundData {
        self.env().revert(CollateralError::SourceUnavailable)
    }
}
