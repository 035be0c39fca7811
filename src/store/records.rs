//! Store Records
//!
//! Value types persisted through the store. Records are immutable once
//! constructed; updates produce a new value.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::GeocacheError;
use crate::hash::Accumulator;

pub type UserId = u64;
pub type CacheId = u64;
pub type TestId = u64;
pub type VerificationId = u64;

// == User ==
/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    is_admin: bool,
}

impl User {
    pub fn new(id: UserId, username: impl Into<String>, is_admin: bool) -> Self {
        Self {
            id,
            username: username.into(),
            is_admin,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }
}

// == Cache ==
/// Fields supplied when creating a cache; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCache {
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A cache location together with its rolling accumulator.
#[derive(Debug, Clone, PartialEq)]
pub struct Cache {
    id: CacheId,
    name: String,
    description: String,
    latitude: f64,
    longitude: f64,
    accumulator: Accumulator,
}

impl Cache {
    /// Builds a freshly created cache holding the initial accumulator.
    pub fn new(id: CacheId, draft: NewCache) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            latitude: draft.latitude,
            longitude: draft.longitude,
            accumulator: Accumulator::initial(),
        }
    }

    /// Returns a copy of this cache with the accumulator replaced.
    pub fn with_accumulator(&self, accumulator: Accumulator) -> Self {
        Self {
            accumulator,
            ..self.clone()
        }
    }

    pub fn id(&self) -> CacheId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }
}

// == Answer Option ==
/// One of the three options a quiz question offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerOption {
    A,
    B,
    C,
}

impl AnswerOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerOption::A => "a",
            AnswerOption::B => "b",
            AnswerOption::C => "c",
        }
    }
}

impl FromStr for AnswerOption {
    type Err = GeocacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a" => Ok(AnswerOption::A),
            "b" => Ok(AnswerOption::B),
            "c" => Ok(AnswerOption::C),
            other => Err(GeocacheError::InvalidRequest(format!(
                "Answer must be one of a, b, c (got '{}')",
                other
            ))),
        }
    }
}

impl fmt::Display for AnswerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Quiz Test ==
/// Fields supplied when attaching a question to a cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuizTest {
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub answer: AnswerOption,
}

/// A multiple-choice question tied to a cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizTest {
    id: TestId,
    cache_id: CacheId,
    question: String,
    option_a: String,
    option_b: String,
    option_c: String,
    answer: AnswerOption,
}

impl QuizTest {
    pub fn new(id: TestId, cache_id: CacheId, draft: NewQuizTest) -> Self {
        Self {
            id,
            cache_id,
            question: draft.question,
            option_a: draft.option_a,
            option_b: draft.option_b,
            option_c: draft.option_c,
            answer: draft.answer,
        }
    }

    pub fn id(&self) -> TestId {
        self.id
    }

    pub fn cache_id(&self) -> CacheId {
        self.cache_id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn option_a(&self) -> &str {
        &self.option_a
    }

    pub fn option_b(&self) -> &str {
        &self.option_b
    }

    pub fn option_c(&self) -> &str {
        &self.option_c
    }

    pub fn answer(&self) -> AnswerOption {
        self.answer
    }

    /// Exact comparison of a submitted answer with the stored one.
    pub fn is_correct(&self, submitted: &str) -> bool {
        submitted == self.answer.as_str()
    }
}

// == Verification ==
/// Result of one quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptResult {
    /// Correct answer; carries the accumulator produced by this verification
    Passed(Accumulator),
    Failed,
}

/// A recorded quiz attempt by a user against a cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    id: VerificationId,
    user_id: UserId,
    cache_id: CacheId,
    result: AttemptResult,
    created_at: DateTime<Utc>,
}

impl Verification {
    pub fn new(
        id: VerificationId,
        user_id: UserId,
        cache_id: CacheId,
        result: AttemptResult,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            cache_id,
            result,
            created_at,
        }
    }

    pub fn id(&self) -> VerificationId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn cache_id(&self) -> CacheId {
        self.cache_id
    }

    pub fn verified(&self) -> bool {
        matches!(self.result, AttemptResult::Passed(_))
    }

    /// Accumulator right after this verification, if it passed.
    pub fn accumulator_after(&self) -> Option<&Accumulator> {
        match &self.result {
            AttemptResult::Passed(acc) => Some(acc),
            AttemptResult::Failed => None,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
