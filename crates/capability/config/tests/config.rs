use binlight_config::{AppConfig, ConfigError};

// 环境变量是进程级共享状态，所有断言放在同一个测试里顺序执行。
#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::remove_var("BINLIGHT_DATABASE_URL");
        std::env::remove_var("BINLIGHT_HEALTH_INTERVAL_SECONDS");
        std::env::remove_var("BINLIGHT_BACKGROUND");
        std::env::set_var("BINLIGHT_HTTP_ADDR", "127.0.0.1:8081");
        std::env::set_var("BINLIGHT_CLEANUP_INTERVAL_SECONDS", "120");
    }

    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.http_addr, "127.0.0.1:8081");
    assert!(config.database_url.is_none());
    assert_eq!(config.health_interval_seconds, 60);
    assert_eq!(config.cleanup_interval_seconds, 120);
    assert_eq!(config.ping_timeout_ms, 2000);
    assert_eq!(config.command_timeout_ms, 5000);
    assert!(config.background_enabled);

    unsafe {
        std::env::set_var("BINLIGHT_HEALTH_INTERVAL_SECONDS", "0");
    }
    let err = AppConfig::from_env().expect_err("zero interval");
    assert!(matches!(err, ConfigError::Invalid(key, _) if key == "BINLIGHT_HEALTH_INTERVAL_SECONDS"));

    unsafe {
        std::env::set_var("BINLIGHT_HEALTH_INTERVAL_SECONDS", "soon");
    }
    assert!(AppConfig::from_env().is_err());

    unsafe {
        std::env::set_var("BINLIGHT_HEALTH_INTERVAL_SECONDS", "30");
        std::env::set_var("BINLIGHT_BACKGROUND", "off");
        std::env::set_var("BINLIGHT_DATABASE_URL", "postgres://localhost/binlight");
    }
    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.health_interval().as_secs(), 30);
    assert!(!config.background_enabled);
    assert_eq!(
        config.database_url.as_deref(),
        Some("postgres://localhost/binlight")
    );
}
