//! Shared helpers for integration tests that need PostgreSQL.
//!
//! Database suites read `USERS_TEST_DATABASE_URL`. When it is unset they
//! print a `SKIP-TEST-DATABASE` marker and return early, unless
//! `REQUIRE_TEST_DATABASE` is truthy, in which case they fail so CI cannot
//! silently pass without a database.

use std::sync::OnceLock;

use users_service::outbound::persistence::run_pending_migrations;

const DATABASE_URL_VAR: &str = "USERS_TEST_DATABASE_URL";
const REQUIRE_VAR: &str = "REQUIRE_TEST_DATABASE";

/// Truthy values: "1", "true", "yes" (case-insensitive).
fn is_truthy(name: &str) -> bool {
    std::env::var(name)
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Handles an unavailable database consistently across suites.
pub fn handle_missing_database<T>(reason: impl std::fmt::Display) -> Option<T> {
    if is_truthy(REQUIRE_VAR) {
        panic!("Test database unavailable: {reason}. Unset {REQUIRE_VAR} to skip.");
    }
    eprintln!("SKIP-TEST-DATABASE: {reason}");
    None
}

/// Database URL with migrations applied, or `None` when the suite should skip.
///
/// Migrations run once per test binary.
pub async fn migrated_database_url() -> Option<String> {
    let Some(url) = std::env::var(DATABASE_URL_VAR)
        .ok()
        .filter(|url| !url.trim().is_empty())
    else {
        return handle_missing_database(format!("{DATABASE_URL_VAR} is not set"));
    };

    static MIGRATED: OnceLock<Result<(), String>> = OnceLock::new();
    let migrate_url = url.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        MIGRATED
            .get_or_init(|| {
                run_pending_migrations(&migrate_url)
                    .map(|_| ())
                    .map_err(|err| err.to_string())
            })
            .clone()
    })
    .await
    .expect("migration task should not panic");

    match outcome {
        Ok(()) => Some(url),
        Err(reason) => handle_missing_database(reason),
    }
}

/// Email address no other test will produce.
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", uuid::Uuid::new_v4().simple())
}
