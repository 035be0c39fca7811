//! Startup Seeding
//!
//! Creates the administrator account and a demo cache on an empty store.

use tracing::info;

use crate::error::Result;
use crate::store::{AnswerOption, GeocacheStore, NewCache, NewQuizTest};
use crate::workflow::create_cache;

/// Creates `admin_username` as an admin if missing, and the demo cache with
/// its three questions if no cache exists yet. Safe to call repeatedly.
pub fn seed_demo_data<S: GeocacheStore + ?Sized>(store: &mut S, admin_username: &str) -> Result<()> {
    if store.find_user_by_name(admin_username).is_none() {
        let admin = store.insert_user(admin_username, true)?;
        info!(user_id = admin.id(), username = admin.username(), "admin user created");
    }

    if store.list_caches().is_empty() {
        let draft = NewCache {
            name: "Test Cache".to_string(),
            description: "This is a test cache location".to_string(),
            latitude: 46.5197,
            longitude: 6.6323,
        };
        let questions = [AnswerOption::A, AnswerOption::B, AnswerOption::C]
            .into_iter()
            .enumerate()
            .map(|(i, answer)| NewQuizTest {
                question: format!("Test Question {}", i + 1),
                option_a: "Option A".to_string(),
                option_b: "Option B".to_string(),
                option_c: "Option C".to_string(),
                answer,
            })
            .collect();

        let (cache, tests) = create_cache(store, draft, questions)?;
        info!(
            cache_id = cache.id(),
            "test cache created with {} test questions",
            tests.len()
        );
    }

    Ok(())
}
