use std::collections::HashMap;
use std::io::Write;
use std::net::SocketAddr;

use tempfile::{NamedTempFile, TempDir};
use tokio::net::TcpListener;

use tces::models::{ProjectHints, ScheduleMode, Trade, TradeStatus};
use tces_trade_stub::{StubConfig, StubState};

fn no_env(_: &str) -> Option<String> {
    None
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn missing_config_file_means_defaults() {
    let dir = TempDir::new().unwrap();
    let config = tces::load_config_with(dir.path().join("absent.toml"), no_env).unwrap();

    assert_eq!(config.dispatch.timeout_seconds, 30);
    assert_eq!(config.services.len(), 5);
    assert_eq!(config.scheduler.mode, ScheduleMode::Sequential);
}

#[test]
fn config_file_layers_over_defaults() {
    let file = write_config(
        r#"
[dispatch]
timeout_seconds = 12

[services]
painting = "http://painters.internal:7000"

[scheduler]
mode = "parallel"
"#,
    );

    let config = tces::load_config_with(file.path(), no_env).unwrap();
    assert_eq!(config.dispatch.timeout_seconds, 12);
    assert_eq!(
        config.services.url(&Trade::Painting),
        Some("http://painters.internal:7000")
    );
    assert_eq!(
        config.services.url(&Trade::Carpentry),
        Some("http://localhost:8001")
    );
    assert_eq!(config.scheduler.mode, ScheduleMode::Parallel);
}

#[test]
fn environment_overrides_file() {
    let file = write_config("[services]\nplumbing = \"http://from-file:1\"\n");
    let env: HashMap<&str, &str> = HashMap::from([
        ("PLUMBING_SERVICE_URL", "http://from-env:2"),
        ("TCES_DISPATCH_TIMEOUT_SECONDS", "5"),
    ]);

    let config = tces::load_config_with(file.path(), |key| {
        env.get(key).map(|v| v.to_string())
    })
    .unwrap();

    assert_eq!(
        config.services.url(&Trade::Plumbing),
        Some("http://from-env:2")
    );
    assert_eq!(config.dispatch.timeout_seconds, 5);
}

#[test]
fn malformed_config_is_an_error() {
    let file = write_config("[dispatch]\ntimeout_seconds = \"thirty\"\n");
    let err = tces::load_config_with(file.path(), no_env).unwrap_err();
    assert!(err.to_string().starts_with("Failed to parse config"));
}

#[test]
fn zero_timeout_is_rejected() {
    let file = write_config("[dispatch]\ntimeout_seconds = 0\n");
    let err = tces::load_config_with(file.path(), no_env).unwrap_err();
    assert!(err.to_string().starts_with("Invalid config"));

    let env: HashMap<&str, &str> = HashMap::from([("TCES_DISPATCH_TIMEOUT_SECONDS", "0")]);
    let config = tces::load_config_with(write_config("").path(), |key| {
        env.get(key).map(|v| v.to_string())
    })
    .unwrap();
    assert_eq!(config.dispatch.timeout_seconds, 30);
}

async fn start_trade_service(trade: Trade) -> SocketAddr {
    let app = tces_trade_stub::build_router(StubState::new(StubConfig::for_trade(trade)));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

#[tokio::test]
async fn configured_coordinator_estimates_end_to_end() {
    let addr = start_trade_service(Trade::Painting).await;
    let file = write_config(&format!(
        "[dispatch]\ntimeout_seconds = 5\n\n[services]\npainting = \"http://{addr}\"\n"
    ));

    let config = tces::load_config_with(file.path(), no_env).unwrap();
    let coordinator = tces::build_coordinator(&config).unwrap();

    let report = coordinator
        .coordinate_detailed("Paint the living room walls", &ProjectHints::default())
        .await
        .unwrap();

    assert_eq!(report.coordinated.estimates.len(), 1);
    assert_eq!(report.coordinated.estimates[0].status, TradeStatus::Success);
    assert_eq!(report.response.project.trades_involved, vec![Trade::Painting]);
    assert!(report.response.schedule.total_timeline_days >= 1);

    let blank = tces::coordinate(&coordinator, "  ", &ProjectHints::default()).await;
    assert!(blank.is_err());
}
