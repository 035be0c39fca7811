//! Verification Workflow
//!
//! Quiz selection, answer checking and accumulator updates. The acting user is
//! always passed in explicitly; the store is whatever implements the port.
//!
//! `submit_answer` performs a read-modify-write of the cache accumulator and
//! must run with exclusive access to the store.

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::error::{GeocacheError, Result};
use crate::hash::{replay, Accumulator};
use crate::store::{
    validate_text, AttemptResult, Cache, CacheId, GeocacheStore, NewCache, NewQuizTest, QuizTest,
    TestId, User, UserId, Verification, MAX_QUESTION_LENGTH,
};

/// Number of quiz questions attached to every new cache.
pub const QUESTIONS_PER_CACHE: usize = 3;

// == Outcomes ==
/// Result of a submitted answer.
#[derive(Debug, Clone)]
pub struct VerificationOutcome {
    /// The recorded attempt
    pub verification: Verification,
    /// Accumulator of the cache after the attempt
    pub accumulator: Accumulator,
}

impl VerificationOutcome {
    pub fn verified(&self) -> bool {
        self.verification.verified()
    }
}

/// Comparison of a stored accumulator with one rebuilt from history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheAudit {
    pub cache_id: CacheId,
    pub stored: Accumulator,
    pub replayed: Accumulator,
    pub successful_verifications: usize,
}

impl CacheAudit {
    pub fn is_consistent(&self) -> bool {
        self.stored == self.replayed
    }
}

// == Principal ==
/// Resolves the acting user, rejecting ids the store does not know.
pub fn authenticate<S: GeocacheStore + ?Sized>(store: &S, user_id: UserId) -> Result<User> {
    store
        .get_user(user_id)
        .map_err(|_| GeocacheError::Unauthorized(format!("unknown user {}", user_id)))
}

// == Create Cache ==
/// Creates a cache and its quiz questions.
///
/// Everything is validated before the first write, so a rejected request
/// leaves the store untouched.
pub fn create_cache<S: GeocacheStore + ?Sized>(
    store: &mut S,
    draft: NewCache,
    questions: Vec<NewQuizTest>,
) -> Result<(Cache, Vec<QuizTest>)> {
    if !draft.latitude.is_finite() || !(-90.0..=90.0).contains(&draft.latitude) {
        return Err(GeocacheError::InvalidRequest(format!(
            "Latitude {} is outside [-90, 90]",
            draft.latitude
        )));
    }
    if !draft.longitude.is_finite() || !(-180.0..=180.0).contains(&draft.longitude) {
        return Err(GeocacheError::InvalidRequest(format!(
            "Longitude {} is outside [-180, 180]",
            draft.longitude
        )));
    }
    if questions.len() != QUESTIONS_PER_CACHE {
        return Err(GeocacheError::InvalidRequest(format!(
            "A cache needs exactly {} questions, got {}",
            QUESTIONS_PER_CACHE,
            questions.len()
        )));
    }
    for question in &questions {
        validate_text("Question", &question.question, MAX_QUESTION_LENGTH)?;
        validate_text("Option a", &question.option_a, MAX_QUESTION_LENGTH)?;
        validate_text("Option b", &question.option_b, MAX_QUESTION_LENGTH)?;
        validate_text("Option c", &question.option_c, MAX_QUESTION_LENGTH)?;
    }

    let cache = store.insert_cache(draft)?;
    let tests = questions
        .into_iter()
        .map(|question| store.insert_test(cache.id(), question))
        .collect::<Result<Vec<_>>>()?;

    info!(cache_id = cache.id(), name = cache.name(), "cache created");
    Ok((cache, tests))
}

// == Already Verified ==
/// Whether `user_id` has any recorded attempt against `cache_id`.
pub fn already_verified<S: GeocacheStore + ?Sized>(
    store: &S,
    user_id: UserId,
    cache_id: CacheId,
) -> bool {
    store.find_verification(user_id, cache_id).is_some()
}

// == Start Verification ==
/// Picks a random quiz question for `user_id` to answer on `cache_id`.
pub fn start_verification<S, R>(
    store: &S,
    user_id: UserId,
    cache_id: CacheId,
    rng: &mut R,
) -> Result<QuizTest>
where
    S: GeocacheStore + ?Sized,
    R: Rng + ?Sized,
{
    authenticate(store, user_id)?;

    if already_verified(store, user_id, cache_id) {
        return Err(GeocacheError::Conflict(format!(
            "You have already verified cache {}",
            cache_id
        )));
    }

    let cache = store.get_cache(cache_id)?;
    let tests = store.tests_for_cache(cache.id());
    let test = tests
        .choose(rng)
        .cloned()
        .ok_or_else(|| GeocacheError::NotFound(format!("quiz for cache {}", cache_id)))?;

    debug!(user_id, cache_id, test_id = test.id(), "quiz issued");
    Ok(test)
}

// == Submit Answer ==
/// Checks an answer and records the attempt.
///
/// A correct answer advances the cache accumulator by exactly one
/// `combine(user_id, accumulator)` step; a wrong one leaves it unchanged.
pub fn submit_answer<S: GeocacheStore + ?Sized>(
    store: &mut S,
    user_id: UserId,
    cache_id: CacheId,
    test_id: TestId,
    answer: &str,
) -> Result<VerificationOutcome> {
    authenticate(&*store, user_id)?;

    let cache = store.get_cache(cache_id)?;
    let test = store.get_test(test_id)?;
    if test.cache_id() != cache.id() {
        return Err(GeocacheError::NotFound(format!(
            "test {} for cache {}",
            test_id, cache_id
        )));
    }

    if already_verified(&*store, user_id, cache_id) {
        return Err(GeocacheError::Conflict(format!(
            "You have already verified cache {}",
            cache_id
        )));
    }

    if !test.is_correct(answer) {
        let verification = store.insert_verification(user_id, cache_id, AttemptResult::Failed)?;
        info!(user_id, cache_id, test_id, "verification failed");
        return Ok(VerificationOutcome {
            verification,
            accumulator: cache.accumulator().clone(),
        });
    }

    let next = cache.accumulator().absorb(user_id);
    store.save_cache(cache.with_accumulator(next.clone()))?;
    let verification =
        store.insert_verification(user_id, cache_id, AttemptResult::Passed(next.clone()))?;

    info!(
        user_id,
        cache_id,
        accumulator = %next,
        "verification succeeded"
    );
    Ok(VerificationOutcome {
        verification,
        accumulator: next,
    })
}

// == Audit ==
/// Rebuilds the accumulator of `cache_id` from its successful verifications.
pub fn audit_cache<S: GeocacheStore + ?Sized>(store: &S, cache_id: CacheId) -> Result<CacheAudit> {
    let cache = store.get_cache(cache_id)?;
    let history: Vec<UserId> = store
        .verifications_for_cache(cache_id)
        .iter()
        .filter(|v| v.verified())
        .map(|v| v.user_id())
        .collect();

    let replayed = replay(&Accumulator::initial(), history.iter().copied());

    Ok(CacheAudit {
        cache_id,
        stored: cache.accumulator().clone(),
        replayed,
        successful_verifications: history.len(),
    })
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{AnswerOption, MemoryStore};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(n: usize, answer: AnswerOption) -> NewQuizTest {
        NewQuizTest {
            question: format!("Question {}", n),
            option_a: "Option A".to_string(),
            option_b: "Option B".to_string(),
            option_c: "Option C".to_string(),
            answer,
        }
    }

    fn three_questions() -> Vec<NewQuizTest> {
        vec![
            question(1, AnswerOption::A),
            question(2, AnswerOption::B),
            question(3, AnswerOption::C),
        ]
    }

    fn draft(name: &str) -> NewCache {
        NewCache {
            name: name.to_string(),
            description: "Under the bridge".to_string(),
            latitude: 46.5197,
            longitude: 6.6323,
        }
    }

    /// Store with one user and one cache; returns (store, user_id, cache_id).
    fn setup() -> (MemoryStore, UserId, CacheId) {
        let mut store = MemoryStore::new();
        let user = store.insert_user("alice", false).unwrap();
        let (cache, _) = create_cache(&mut store, draft("Bridge"), three_questions()).unwrap();
        (store, user.id(), cache.id())
    }

    fn correct_answer(store: &MemoryStore, test_id: TestId) -> &'static str {
        store.get_test(test_id).unwrap().answer().as_str()
    }

    #[test]
    fn test_create_cache_with_questions() {
        let (store, _, cache_id) = setup();
        let tests = store.tests_for_cache(cache_id);
        assert_eq!(tests.len(), QUESTIONS_PER_CACHE);
        assert_eq!(
            store.get_cache(cache_id).unwrap().accumulator(),
            &Accumulator::initial()
        );
    }

    #[test]
    fn test_create_cache_wrong_question_count() {
        let mut store = MemoryStore::new();
        let result = create_cache(&mut store, draft("Bridge"), vec![question(1, AnswerOption::A)]);
        assert!(matches!(result, Err(GeocacheError::InvalidRequest(_))));
        assert!(store.list_caches().is_empty());
    }

    #[test]
    fn test_create_cache_bad_coordinates() {
        let mut store = MemoryStore::new();
        let mut bad = draft("North of north");
        bad.latitude = 91.0;
        assert!(create_cache(&mut store, bad, three_questions()).is_err());

        let mut bad = draft("Nowhere");
        bad.longitude = f64::NAN;
        assert!(create_cache(&mut store, bad, three_questions()).is_err());
        assert!(store.list_caches().is_empty());
    }

    #[test]
    fn test_create_cache_blank_question_leaves_store_untouched() {
        let mut store = MemoryStore::new();
        let mut questions = three_questions();
        questions[2].option_b = "   ".to_string();

        assert!(create_cache(&mut store, draft("Bridge"), questions).is_err());
        assert!(store.list_caches().is_empty());
    }

    #[test]
    fn test_start_verification_returns_test_of_cache() {
        let (store, user_id, cache_id) = setup();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..10 {
            let test = start_verification(&store, user_id, cache_id, &mut rng).unwrap();
            assert_eq!(test.cache_id(), cache_id);
        }
    }

    #[test]
    fn test_start_verification_unknown_user() {
        let (store, _, cache_id) = setup();
        let mut rng = StdRng::seed_from_u64(7);
        let result = start_verification(&store, 999, cache_id, &mut rng);
        assert!(matches!(result, Err(GeocacheError::Unauthorized(_))));
    }

    #[test]
    fn test_start_verification_unknown_cache() {
        let (store, user_id, _) = setup();
        let mut rng = StdRng::seed_from_u64(7);
        let result = start_verification(&store, user_id, 999, &mut rng);
        assert!(matches!(result, Err(GeocacheError::NotFound(_))));
    }

    #[test]
    fn test_start_verification_cache_without_tests() {
        let (mut store, user_id, _) = setup();
        let bare = store.insert_cache(draft("Bare")).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let result = start_verification(&store, user_id, bare.id(), &mut rng);
        assert!(matches!(result, Err(GeocacheError::NotFound(_))));
    }

    #[test]
    fn test_correct_answer_advances_accumulator() {
        let (mut store, user_id, cache_id) = setup();
        let mut rng = StdRng::seed_from_u64(1);
        let test = start_verification(&store, user_id, cache_id, &mut rng).unwrap();
        let answer = correct_answer(&store, test.id());

        let outcome = submit_answer(&mut store, user_id, cache_id, test.id(), answer).unwrap();

        assert!(outcome.verified());
        // user 1 on the initial accumulator: 1*12345 + 1 + 12345
        assert_eq!(outcome.accumulator.to_string(), "12347");
        assert_eq!(
            store.get_cache(cache_id).unwrap().accumulator(),
            &outcome.accumulator
        );
        assert_eq!(
            outcome.verification.accumulator_after(),
            Some(&outcome.accumulator)
        );
    }

    #[test]
    fn test_wrong_answer_records_failure_only() {
        let (mut store, user_id, cache_id) = setup();
        let test = store.tests_for_cache(cache_id)[0].clone();

        let outcome = submit_answer(&mut store, user_id, cache_id, test.id(), "z").unwrap();

        assert!(!outcome.verified());
        assert_eq!(outcome.accumulator, Accumulator::initial());
        assert_eq!(
            store.get_cache(cache_id).unwrap().accumulator(),
            &Accumulator::initial()
        );
        assert_eq!(store.stats().failures, 1);
    }

    #[test]
    fn test_second_attempt_is_rejected() {
        let (mut store, user_id, cache_id) = setup();
        let test = store.tests_for_cache(cache_id)[0].clone();
        submit_answer(&mut store, user_id, cache_id, test.id(), "b").unwrap();

        let again = submit_answer(&mut store, user_id, cache_id, test.id(), "a");
        assert!(matches!(again, Err(GeocacheError::Conflict(_))));

        let mut rng = StdRng::seed_from_u64(3);
        let quiz = start_verification(&store, user_id, cache_id, &mut rng);
        assert!(matches!(quiz, Err(GeocacheError::Conflict(_))));
        assert!(already_verified(&store, user_id, cache_id));
    }

    #[test]
    fn test_submit_test_of_other_cache() {
        let (mut store, user_id, cache_id) = setup();
        let (other, _) = create_cache(&mut store, draft("Other"), three_questions()).unwrap();
        let foreign = store.tests_for_cache(other.id())[0].clone();

        let result = submit_answer(&mut store, user_id, cache_id, foreign.id(), "a");
        assert!(matches!(result, Err(GeocacheError::NotFound(_))));
        assert_eq!(store.stats().attempts, 0);
    }

    #[test]
    fn test_audit_replays_successful_history() {
        let (mut store, first_user, cache_id) = setup();
        let mut users = vec![first_user];
        for name in ["bob", "carol", "dave"] {
            users.push(store.insert_user(name, false).unwrap().id());
        }
        let tests = store.tests_for_cache(cache_id);

        // dave answers wrong, the others right
        for &user_id in &users {
            let test = &tests[user_id as usize % tests.len()];
            let answer = if user_id == 4 { "x" } else { test.answer().as_str() };
            submit_answer(&mut store, user_id, cache_id, test.id(), answer).unwrap();
        }

        let audit = audit_cache(&store, cache_id).unwrap();
        assert!(audit.is_consistent());
        assert_eq!(audit.successful_verifications, 3);
        assert_eq!(audit.replayed, replay(&Accumulator::initial(), [1, 2, 3]));
    }

    #[test]
    fn test_audit_detects_tampering() {
        let (mut store, _, cache_id) = setup();
        let cache = store.get_cache(cache_id).unwrap();
        store
            .save_cache(cache.with_accumulator(Accumulator::initial().absorb(77)))
            .unwrap();

        let audit = audit_cache(&store, cache_id).unwrap();
        assert!(!audit.is_consistent());
        assert_eq!(audit.replayed, Accumulator::initial());
    }
}
