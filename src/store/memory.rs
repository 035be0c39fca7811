//! Memory Store Module
//!
//! In-memory implementation of the storage port backed by ordered maps.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::error::{GeocacheError, Result};
use crate::store::{
    validate_text, AttemptResult, Cache, CacheId, GeocacheStore, NewCache, NewQuizTest, QuizTest,
    StoreStats, TestId, User, UserId, Verification, VerificationId, MAX_CACHE_NAME_LENGTH,
    MAX_QUESTION_LENGTH, MAX_USERNAME_LENGTH,
};

// == Memory Store ==
/// Record storage keyed by id.
#[derive(Debug)]
pub struct MemoryStore {
    users: BTreeMap<UserId, User>,
    caches: BTreeMap<CacheId, Cache>,
    tests: BTreeMap<TestId, QuizTest>,
    verifications: BTreeMap<VerificationId, Verification>,
    /// Next id to hand out, one counter per record kind
    next_user_id: UserId,
    next_cache_id: CacheId,
    next_test_id: TestId,
    next_verification_id: VerificationId,
    stats: StoreStats,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store. Ids start at 1.
    pub fn new() -> Self {
        Self {
            users: BTreeMap::new(),
            caches: BTreeMap::new(),
            tests: BTreeMap::new(),
            verifications: BTreeMap::new(),
            next_user_id: 1,
            next_cache_id: 1,
            next_test_id: 1,
            next_verification_id: 1,
            stats: StoreStats::new(),
        }
    }

    /// Number of caches currently stored.
    pub fn cache_count(&self) -> usize {
        self.caches.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocacheStore for MemoryStore {
    // == Users ==
    fn insert_user(&mut self, username: &str, is_admin: bool) -> Result<User> {
        validate_text("Username", username, MAX_USERNAME_LENGTH)?;

        if self.find_user_by_name(username).is_some() {
            return Err(GeocacheError::Conflict(format!(
                "Username '{}' already exists",
                username
            )));
        }

        let user = User::new(self.next_user_id, username, is_admin);
        self.next_user_id += 1;
        self.users.insert(user.id(), user.clone());
        Ok(user)
    }

    fn get_user(&self, id: UserId) -> Result<User> {
        self.users
            .get(&id)
            .cloned()
            .ok_or_else(|| GeocacheError::NotFound(format!("user {}", id)))
    }

    fn find_user_by_name(&self, username: &str) -> Option<User> {
        self.users
            .values()
            .find(|user| user.username() == username)
            .cloned()
    }

    // == Caches ==
    fn insert_cache(&mut self, draft: NewCache) -> Result<Cache> {
        validate_text("Cache name", &draft.name, MAX_CACHE_NAME_LENGTH)?;
        if draft.description.trim().is_empty() {
            return Err(GeocacheError::InvalidRequest(
                "Cache description cannot be empty".to_string(),
            ));
        }

        let cache = Cache::new(self.next_cache_id, draft);
        self.next_cache_id += 1;
        self.caches.insert(cache.id(), cache.clone());
        Ok(cache)
    }

    fn get_cache(&self, id: CacheId) -> Result<Cache> {
        self.caches
            .get(&id)
            .cloned()
            .ok_or_else(|| GeocacheError::NotFound(format!("cache {}", id)))
    }

    fn save_cache(&mut self, cache: Cache) -> Result<()> {
        match self.caches.get_mut(&cache.id()) {
            Some(slot) => {
                *slot = cache;
                Ok(())
            }
            None => Err(GeocacheError::NotFound(format!("cache {}", cache.id()))),
        }
    }

    fn list_caches(&self) -> Vec<Cache> {
        self.caches.values().cloned().collect()
    }

    // == Quiz Tests ==
    fn insert_test(&mut self, cache_id: CacheId, draft: NewQuizTest) -> Result<QuizTest> {
        if !self.caches.contains_key(&cache_id) {
            return Err(GeocacheError::NotFound(format!("cache {}", cache_id)));
        }
        validate_text("Question", &draft.question, MAX_QUESTION_LENGTH)?;
        validate_text("Option a", &draft.option_a, MAX_QUESTION_LENGTH)?;
        validate_text("Option b", &draft.option_b, MAX_QUESTION_LENGTH)?;
        validate_text("Option c", &draft.option_c, MAX_QUESTION_LENGTH)?;

        let test = QuizTest::new(self.next_test_id, cache_id, draft);
        self.next_test_id += 1;
        self.tests.insert(test.id(), test.clone());
        Ok(test)
    }

    fn get_test(&self, id: TestId) -> Result<QuizTest> {
        self.tests
            .get(&id)
            .cloned()
            .ok_or_else(|| GeocacheError::NotFound(format!("test {}", id)))
    }

    fn tests_for_cache(&self, cache_id: CacheId) -> Vec<QuizTest> {
        self.tests
            .values()
            .filter(|test| test.cache_id() == cache_id)
            .cloned()
            .collect()
    }

    // == Verifications ==
    fn insert_verification(
        &mut self,
        user_id: UserId,
        cache_id: CacheId,
        result: AttemptResult,
    ) -> Result<Verification> {
        if !self.users.contains_key(&user_id) {
            return Err(GeocacheError::NotFound(format!("user {}", user_id)));
        }
        if !self.caches.contains_key(&cache_id) {
            return Err(GeocacheError::NotFound(format!("cache {}", cache_id)));
        }

        match result {
            AttemptResult::Passed(_) => self.stats.record_success(),
            AttemptResult::Failed => self.stats.record_failure(),
        }

        let verification = Verification::new(
            self.next_verification_id,
            user_id,
            cache_id,
            result,
            Utc::now(),
        );
        self.next_verification_id += 1;
        self.verifications
            .insert(verification.id(), verification.clone());
        Ok(verification)
    }

    fn find_verification(&self, user_id: UserId, cache_id: CacheId) -> Option<Verification> {
        self.verifications
            .values()
            .find(|v| v.user_id() == user_id && v.cache_id() == cache_id)
            .cloned()
    }

    fn verifications_for_cache(&self, cache_id: CacheId) -> Vec<Verification> {
        self.verifications
            .values()
            .filter(|v| v.cache_id() == cache_id)
            .cloned()
            .collect()
    }

    // == Stats ==
    fn stats(&self) -> StoreStats {
        let mut stats = self.stats.clone();
        stats.set_totals(self.users.len(), self.caches.len());
        stats
    }
}
