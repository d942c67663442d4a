//! Registration and login behaviour of the credential store.

use brickshelf::config::{CredentialsConfig, SecurityConfig};
use brickshelf::constants::auth::LOGIN_HISTORY_LIMIT;
use brickshelf::db;
use brickshelf::models::user::NewUser;
use brickshelf::services::{AuthError, CredentialStore, RegistrationError, SeaOrmCredentialStore};

fn fast_security() -> SecurityConfig {
    SecurityConfig {
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
    }
}

async fn spawn_store() -> SeaOrmCredentialStore {
    SeaOrmCredentialStore::initialize(&CredentialsConfig::in_memory(), &fast_security())
        .await
        .expect("failed to initialize credential store")
}

fn candidate(user_name: &str, password: &str, confirm: &str) -> NewUser {
    NewUser {
        user_name: user_name.to_string(),
        password: password.to_string(),
        confirm_password: confirm.to_string(),
        email: format!("{user_name}@x.com"),
    }
}

#[tokio::test]
async fn test_register_then_login() {
    let store = spawn_store().await;

    store
        .register_user(candidate("alice", "p1", "p1"))
        .await
        .expect("registration failed");

    let user = store.check_user("alice", "p1", "agentA").await.unwrap();
    assert_eq!(user.user_name, "alice");
    assert_eq!(user.email, "alice@x.com");
    assert_eq!(user.login_history.len(), 1);
    assert_eq!(user.login_history[0].user_agent, "agentA");

    let err = store.check_user("alice", "wrong", "agentB").await.unwrap_err();
    assert!(matches!(err, AuthError::IncorrectPassword(ref name) if name == "alice"));

    // The failed attempt left no trace
    let user = store.check_user("alice", "p1", "agentC").await.unwrap();
    let agents: Vec<_> = user
        .login_history
        .iter()
        .map(|e| e.user_agent.as_str())
        .collect();
    assert_eq!(agents, vec!["agentC", "agentA"]);
}

#[tokio::test]
async fn test_password_mismatch_never_persists() {
    let store = spawn_store().await;

    let err = store
        .register_user(candidate("bob", "p1", "p2"))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistrationError::PasswordMismatch));

    let err = store.check_user("bob", "p1", "agent").await.unwrap_err();
    assert!(matches!(err, AuthError::UserNotFound(_)));
}

#[tokio::test]
async fn test_duplicate_user_name() {
    let store = spawn_store().await;

    store
        .register_user(candidate("carol", "p1", "p1"))
        .await
        .unwrap();

    let err = store
        .register_user(candidate("carol", "other", "other"))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistrationError::DuplicateUserName(ref name) if name == "carol"));

    // Original password still applies
    assert!(store.check_user("carol", "p1", "agent").await.is_ok());
}

#[tokio::test]
async fn test_concurrent_duplicate_registration() {
    let store = spawn_store().await;

    let (first, second) = tokio::join!(
        store.register_user(candidate("dave", "p1", "p1")),
        store.register_user(candidate("dave", "p2", "p2")),
    );

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        outcomes
            .iter()
            .any(|r| matches!(r, Err(RegistrationError::DuplicateUserName(_))))
    );
}

#[tokio::test]
async fn test_missing_fields_rejected() {
    let store = spawn_store().await;

    let mut user = candidate("erin", "p1", "p1");
    user.email = String::new();

    let err = store.register_user(user).await.unwrap_err();
    assert!(matches!(err, RegistrationError::MissingField("email")));
}

#[tokio::test]
async fn test_unknown_user() {
    let store = spawn_store().await;

    let err = store.check_user("nobody", "p1", "agent").await.unwrap_err();
    assert!(matches!(err, AuthError::UserNotFound(ref name) if name == "nobody"));
}

#[tokio::test]
async fn test_lookup_failure_is_persistence_error() {
    // Schema never created, so the users query fails in the backend.
    let conn = db::connect("sqlite::memory:", 1, 1).await.unwrap();
    let store = SeaOrmCredentialStore::new(conn, fast_security());

    let err = store.check_user("alice", "p1", "agent").await.unwrap_err();
    assert!(matches!(err, AuthError::Persistence(_)));
}

#[tokio::test]
async fn test_login_history_keeps_newest_eight() {
    let store = spawn_store().await;
    store
        .register_user(candidate("frank", "p1", "p1"))
        .await
        .unwrap();

    let attempts = 11;
    let mut last = None;
    for i in 0..attempts {
        last = Some(
            store
                .check_user("frank", "p1", &format!("agent-{i}"))
                .await
                .unwrap(),
        );
    }

    let history = last.unwrap().login_history;
    assert_eq!(history.len(), LOGIN_HISTORY_LIMIT);

    let agents: Vec<_> = history.iter().map(|e| e.user_agent.clone()).collect();
    let expected: Vec<_> = (3..attempts).rev().map(|i| format!("agent-{i}")).collect();
    assert_eq!(agents, expected);

    assert!(
        history
            .windows(2)
            .all(|pair| pair[0].date_time >= pair[1].date_time)
    );
}

#[tokio::test]
async fn test_stores_are_independent() {
    let first = spawn_store().await;
    let second = spawn_store().await;

    first
        .register_user(candidate("grace", "p1", "p1"))
        .await
        .unwrap();

    assert!(first.check_user("grace", "p1", "agent").await.is_ok());
    assert!(matches!(
        second.check_user("grace", "p1", "agent").await,
        Err(AuthError::UserNotFound(_))
    ));
}

#[tokio::test]
async fn test_file_store_survives_reinitialize() {
    let db_path = std::env::temp_dir().join(format!(
        "brickshelf-credentials-{}.db",
        uuid::Uuid::new_v4()
    ));
    let config = CredentialsConfig {
        url: format!("sqlite:{}", db_path.display()),
        max_connections: 2,
        min_connections: 1,
    };

    {
        let store = SeaOrmCredentialStore::initialize(&config, &fast_security())
            .await
            .unwrap();
        store
            .register_user(candidate("heidi", "p1", "p1"))
            .await
            .unwrap();
        store.check_user("heidi", "p1", "agentA").await.unwrap();
    }

    let store = SeaOrmCredentialStore::initialize(&config, &fast_security())
        .await
        .unwrap();
    let user = store.check_user("heidi", "p1", "agentB").await.unwrap();
    assert_eq!(user.login_history.len(), 2);
    assert_eq!(user.login_history[1].user_agent, "agentA");

    drop(store);
    let _ = std::fs::remove_file(&db_path);
}
