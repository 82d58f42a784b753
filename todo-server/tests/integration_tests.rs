use std::sync::Arc;

use serde_json::{json, Value};
use tempfile::TempDir;
use todo_core::TodoRepository;
use todo_server::config::{Config, ConfigOverrides};
use todo_server::setup::{create_repository, initialize_app, run_migrations};
use tokio::{net::TcpListener, sync::oneshot};

fn config_for(db_path: &str) -> Config {
    let mut config = Config::default();
    config.apply_overrides(&ConfigOverrides {
        listen_addr: Some("127.0.0.1".to_string()),
        database_path: Some(db_path.to_string()),
        ..Default::default()
    });
    config.database.max_connections = 4;
    config
}

#[tokio::test]
async fn test_repository_startup_with_sqlite_file() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("data").join("todo.db");
    let config = config_for(db_path.to_str().unwrap());

    let app = initialize_app(&config).await;
    assert!(app.is_ok(), "Failed to initialize app: {:?}", app.err());

    let app = app.unwrap();
    assert!(db_path.exists());
    app.repository.health_check().await.unwrap();
    app.repository.close().await;
}

#[tokio::test]
async fn test_migrate_then_open_existing_database() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("migrated.db");
    let config = config_for(db_path.to_str().unwrap());

    run_migrations(&config).await.unwrap();
    assert!(db_path.exists());

    // Re-running is a no-op
    run_migrations(&config).await.unwrap();

    let repository = create_repository(&config).await.unwrap();
    repository.health_check().await.unwrap();
    repository.close().await;
}

#[tokio::test]
async fn test_server_serves_and_shuts_down() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("serve.db");
    let config = config_for(db_path.to_str().unwrap());

    let app = initialize_app(&config).await.unwrap();
    let repository = Arc::clone(&app.repository);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(app.server.serve_on(listener, async move {
        let _ = rx.await;
    }));

    let client = reqwest::Client::new();

    let health: Value = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["version"], env!("CARGO_PKG_VERSION"));

    let response = client
        .post(format!("{base_url}/api/v1/todos"))
        .json(&json!({"title": "From the server test"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);

    drop(response);
    drop(client);
    tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
    repository.close().await;

    // Data outlives the process-level pool
    let reopened = create_repository(&config).await.unwrap();
    let todos = reopened
        .list(todo_core::TodoFilter::default())
        .await
        .unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].title, "From the server test");
    reopened.close().await;
}

#[test]
fn test_configuration_loading_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("custom.toml");
    std::fs::write(
        &config_path,
        r#"
[server]
port = 8088

[logging]
format = "json"
"#,
    )
    .unwrap();

    let config = Config::load(Some(config_path.to_str().unwrap())).unwrap();
    assert_eq!(config.server.port, 8088);
    assert_eq!(config.logging.format, todo_server::config::LogFormat::Json);
    // Untouched sections keep their defaults
    assert_eq!(config.database.max_connections, 25);
}

#[test]
fn test_missing_config_file_is_error() {
    assert!(Config::load(Some("/definitely/not/here.toml")).is_err());
}
