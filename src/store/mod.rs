//! Store Module
//!
//! Storage port for users, caches, quiz tests and verifications, with an
//! in-memory implementation.

mod memory;
mod records;
mod stats;

pub use memory::MemoryStore;
pub use records::{
    AnswerOption, AttemptResult, Cache, CacheId, NewCache, NewQuizTest, QuizTest, TestId, User,
    UserId, Verification, VerificationId,
};
pub use stats::StoreStats;

use crate::error::{GeocacheError, Result};

// == Public Constants ==
/// Maximum allowed username length
pub const MAX_USERNAME_LENGTH: usize = 80;

/// Maximum allowed cache name length
pub const MAX_CACHE_NAME_LENGTH: usize = 100;

/// Maximum allowed length of a question or an option text
pub const MAX_QUESTION_LENGTH: usize = 200;

// == Validation Helpers ==
/// Rejects blank text and text longer than `max_len` bytes.
pub fn validate_text(field: &str, value: &str, max_len: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GeocacheError::InvalidRequest(format!(
            "{} cannot be empty",
            field
        )));
    }
    if value.len() > max_len {
        return Err(GeocacheError::InvalidRequest(format!(
            "{} exceeds maximum length of {} characters",
            field, max_len
        )));
    }
    Ok(())
}

// == Storage Port ==
/// Narrow persistence interface used by the verification workflow.
///
/// Implementations assign ids and never mutate a record in place; callers
/// hand back a new value through `save_cache`.
pub trait GeocacheStore {
    /// Registers a user. Usernames are unique.
    fn insert_user(&mut self, username: &str, is_admin: bool) -> Result<User>;

    fn get_user(&self, id: UserId) -> Result<User>;

    fn find_user_by_name(&self, username: &str) -> Option<User>;

    /// Creates a cache holding the initial accumulator.
    fn insert_cache(&mut self, draft: NewCache) -> Result<Cache>;

    fn get_cache(&self, id: CacheId) -> Result<Cache>;

    /// Replaces a stored cache. The cache must already exist.
    fn save_cache(&mut self, cache: Cache) -> Result<()>;

    /// All caches in id order.
    fn list_caches(&self) -> Vec<Cache>;

    /// Attaches a quiz test to an existing cache.
    fn insert_test(&mut self, cache_id: CacheId, draft: NewQuizTest) -> Result<QuizTest>;

    fn get_test(&self, id: TestId) -> Result<QuizTest>;

    fn tests_for_cache(&self, cache_id: CacheId) -> Vec<QuizTest>;

    /// Records a quiz attempt. Ids increase with insertion order.
    fn insert_verification(
        &mut self,
        user_id: UserId,
        cache_id: CacheId,
        result: AttemptResult,
    ) -> Result<Verification>;

    /// First recorded attempt of `user_id` against `cache_id`, if any.
    fn find_verification(&self, user_id: UserId, cache_id: CacheId) -> Option<Verification>;

    /// All attempts against a cache in insertion order.
    fn verifications_for_cache(&self, cache_id: CacheId) -> Vec<Verification>;

    fn stats(&self) -> StoreStats;
}
