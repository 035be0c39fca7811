//! Response DTOs for the verification API
//!
//! Defines the structure of outgoing HTTP response bodies. Accumulator values
//! are rendered as decimal strings.

use serde::Serialize;

use crate::store::{Cache, QuizTest, StoreStats, User, Verification};
use crate::workflow::{CacheAudit, VerificationOutcome};

/// Response body for a registered user (POST /users)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: u64,
    pub username: String,
    pub is_admin: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_string(),
            is_admin: user.is_admin(),
        }
    }
}

/// Public listing fields of a cache (GET /caches)
#[derive(Debug, Clone, Serialize)]
pub struct CacheSummary {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Cache> for CacheSummary {
    fn from(cache: &Cache) -> Self {
        Self {
            id: cache.id(),
            name: cache.name().to_string(),
            description: cache.description().to_string(),
            latitude: cache.latitude(),
            longitude: cache.longitude(),
        }
    }
}

/// Response body for GET /caches/:id
#[derive(Debug, Clone, Serialize)]
pub struct CacheDetailResponse {
    #[serde(flatten)]
    pub cache: CacheSummary,
    pub current_hash: String,
    pub question_count: usize,
    /// Whether the caller already has an attempt on record
    pub already_verified: bool,
}

impl CacheDetailResponse {
    pub fn new(cache: &Cache, question_count: usize, already_verified: bool) -> Self {
        Self {
            cache: CacheSummary::from(cache),
            current_hash: cache.accumulator().to_string(),
            question_count,
            already_verified,
        }
    }
}

/// Response body for POST /caches
#[derive(Debug, Clone, Serialize)]
pub struct CreateCacheResponse {
    #[serde(flatten)]
    pub cache: CacheSummary,
    pub current_hash: String,
    pub test_ids: Vec<u64>,
}

impl CreateCacheResponse {
    pub fn new(cache: &Cache, tests: &[QuizTest]) -> Self {
        Self {
            cache: CacheSummary::from(cache),
            current_hash: cache.accumulator().to_string(),
            test_ids: tests.iter().map(|t| t.id()).collect(),
        }
    }
}

/// The three options of a quiz question
#[derive(Debug, Clone, Serialize)]
pub struct QuizOptions {
    pub a: String,
    pub b: String,
    pub c: String,
}

/// Response body for GET /caches/:id/quiz. The answer is never included.
#[derive(Debug, Clone, Serialize)]
pub struct QuizResponse {
    pub cache_id: u64,
    pub test_id: u64,
    pub question: String,
    pub options: QuizOptions,
}

impl From<&QuizTest> for QuizResponse {
    fn from(test: &QuizTest) -> Self {
        Self {
            cache_id: test.cache_id(),
            test_id: test.id(),
            question: test.question().to_string(),
            options: QuizOptions {
                a: test.option_a().to_string(),
                b: test.option_b().to_string(),
                c: test.option_c().to_string(),
            },
        }
    }
}

/// Response body for POST /caches/:id/answers
#[derive(Debug, Clone, Serialize)]
pub struct VerificationResponse {
    pub message: String,
    pub verification_id: u64,
    pub user_id: u64,
    pub cache_id: u64,
    pub verified: bool,
    /// Accumulator after the attempt; only present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_hash: Option<String>,
    /// RFC 3339 timestamp of the attempt
    pub created_at: String,
}

impl From<&VerificationOutcome> for VerificationResponse {
    fn from(outcome: &VerificationOutcome) -> Self {
        let verification: &Verification = &outcome.verification;
        let message = if outcome.verified() {
            "Verification successful".to_string()
        } else {
            "Wrong answer, verification failed".to_string()
        };

        Self {
            message,
            verification_id: verification.id(),
            user_id: verification.user_id(),
            cache_id: verification.cache_id(),
            verified: verification.verified(),
            current_hash: verification.accumulator_after().map(|acc| acc.to_string()),
            created_at: verification.created_at().to_rfc3339(),
        }
    }
}

/// Response body for GET /caches/:id/accumulator
#[derive(Debug, Clone, Serialize)]
pub struct AccumulatorResponse {
    pub cache_id: u64,
    pub current_hash: String,
}

impl From<&Cache> for AccumulatorResponse {
    fn from(cache: &Cache) -> Self {
        Self {
            cache_id: cache.id(),
            current_hash: cache.accumulator().to_string(),
        }
    }
}

/// Response body for GET /caches/:id/audit
#[derive(Debug, Clone, Serialize)]
pub struct AuditResponse {
    pub cache_id: u64,
    pub stored: String,
    pub replayed: String,
    pub consistent: bool,
    pub successful_verifications: usize,
}

impl From<&CacheAudit> for AuditResponse {
    fn from(audit: &CacheAudit) -> Self {
        Self {
            cache_id: audit.cache_id,
            stored: audit.stored.to_string(),
            replayed: audit.replayed.to_string(),
            consistent: audit.is_consistent(),
            successful_verifications: audit.successful_verifications,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub attempts: u64,
    pub successes: u64,
    pub failures: u64,
    /// successes / attempts
    pub success_rate: f64,
    pub total_users: usize,
    pub total_caches: usize,
}

impl From<&StoreStats> for StatsResponse {
    fn from(stats: &StoreStats) -> Self {
        Self {
            attempts: stats.attempts,
            successes: stats.successes,
            failures: stats.failures,
            success_rate: stats.success_rate(),
            total_users: stats.total_users,
            total_caches: stats.total_caches,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Accumulator;
    use crate::store::{AnswerOption, AttemptResult, NewCache, NewQuizTest};
    use chrono::Utc;

    fn sample_cache() -> Cache {
        Cache::new(
            3,
            NewCache {
                name: "Fountain".to_string(),
                description: "North side".to_string(),
                latitude: 1.5,
                longitude: -2.5,
            },
        )
    }

    #[test]
    fn test_cache_detail_flattens_summary() {
        let resp = CacheDetailResponse::new(&sample_cache(), 3, true);
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["name"], "Fountain");
        assert_eq!(json["current_hash"], "12345");
        assert_eq!(json["already_verified"], true);
    }

    #[test]
    fn test_quiz_response_hides_answer() {
        let test = QuizTest::new(
            8,
            3,
            NewQuizTest {
                question: "Which side?".to_string(),
                option_a: "North".to_string(),
                option_b: "South".to_string(),
                option_c: "East".to_string(),
                answer: AnswerOption::A,
            },
        );
        let json = serde_json::to_string(&QuizResponse::from(&test)).unwrap();

        assert!(json.contains("Which side?"));
        assert!(!json.contains("answer"));
    }

    #[test]
    fn test_verification_response_success() {
        let outcome = VerificationOutcome {
            verification: Verification::new(
                1,
                1,
                3,
                AttemptResult::Passed(Accumulator::initial().absorb(1)),
                Utc::now(),
            ),
            accumulator: Accumulator::initial().absorb(1),
        };
        let resp = VerificationResponse::from(&outcome);

        assert!(resp.verified);
        assert_eq!(resp.current_hash.as_deref(), Some("12347"));
    }

    #[test]
    fn test_verification_response_failure_omits_hash() {
        let outcome = VerificationOutcome {
            verification: Verification::new(2, 1, 3, AttemptResult::Failed, Utc::now()),
            accumulator: Accumulator::initial(),
        };
        let json = serde_json::to_value(VerificationResponse::from(&outcome)).unwrap();

        assert_eq!(json["verified"], false);
        assert!(json.get("current_hash").is_none());
    }

    #[test]
    fn test_stats_response_rate() {
        let mut stats = StoreStats::new();
        stats.record_success();
        stats.record_failure();
        stats.record_failure();
        stats.record_failure();
        let resp = StatsResponse::from(&stats);
        assert!((resp.success_rate - 0.25).abs() < 0.001);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
