//! Concurrency tests for session rotation and registration

use bookshelf::auth::models::{Role, User};
use bookshelf::auth::session::{issue_pair, rotate, RefreshOutcome};
use bookshelf::config::AuthConfig;
use bookshelf::UserStore;
use std::sync::Arc;

fn test_auth_config() -> Arc<AuthConfig> {
    Arc::new(AuthConfig {
        access_secret: "test-access-secret".to_string(),
        refresh_secret: "test-refresh-secret".to_string(),
        ..AuthConfig::default()
    })
}

/// Two refresh calls racing on the same token must not both succeed
#[tokio::test]
async fn test_racing_rotations_have_one_winner() {
    let auth = test_auth_config();

    // Repeat to give interleavings a chance to show up
    for _ in 0..25 {
        let store = UserStore::new();
        let user = User::new("a@x.com".to_string(), "hash".to_string(), Role::User);
        store.insert(user.clone()).await.expect("Failed to insert user");

        let pair = issue_pair(&auth, &store, &user)
            .await
            .expect("Failed to issue pair");

        let mut tasks = Vec::new();
        for _ in 0..2 {
            let auth = Arc::clone(&auth);
            let store = store.clone();
            let token = pair.refresh.clone();
            tasks.push(tokio::spawn(async move {
                rotate(&auth, &store, Some(&token)).await
            }));
        }

        let mut rotated = 0;
        for task in tasks {
            if let RefreshOutcome::Rotated(_) = task.await.expect("Task panicked") {
                rotated += 1;
            }
        }
        assert_eq!(rotated, 1, "exactly one racer may win the rotation");
    }
}

/// Concurrent registrations of the same email must not both succeed
#[tokio::test]
async fn test_racing_registrations_have_one_winner() {
    for _ in 0..25 {
        let store = UserStore::new();

        let mut tasks = Vec::new();
        for _ in 0..2 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                let user = User::new("dup@x.com".to_string(), "hash".to_string(), Role::User);
                store.insert(user).await
            }));
        }

        let mut inserted = 0;
        for task in tasks {
            if task.await.expect("Task panicked").is_ok() {
                inserted += 1;
            }
        }
        assert_eq!(inserted, 1);
        assert_eq!(store.user_count().await, 1);
    }
}
