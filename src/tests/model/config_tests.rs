use super::*;

#[test]
fn defaults_match_the_cli_defaults() {
    let cfg = HarnessConfig::default();
    assert_eq!(cfg.server_class, "Server");
    assert_eq!(cfg.server_port, 8888);
    assert_eq!(cfg.launcher.as_deref(), Some("java"));
    assert_eq!(cfg.base_url(), "http://localhost:8888");
}

#[test]
fn server_command_uses_launcher_and_class() {
    let cfg = HarnessConfig {
        server_class: "MyServer".to_string(),
        server_port: 9000,
        ..HarnessConfig::default()
    };
    let cmd = cfg.server_command();
    assert_eq!(
        cmd.argv(9000),
        ["java", "MyServer", "--serverPort=9000"]
    );
}

#[test]
fn default_timeouts_come_from_the_shared_constants() {
    let cfg = HarnessConfig::default();
    assert_eq!(cfg.host, DEFAULT_HOST);
    assert_eq!(cfg.ready_timeout.as_millis() as u64, DEFAULT_READY_TIMEOUT_MS);
    assert_eq!(cfg.request_timeout.as_millis() as u64, DEFAULT_REQUEST_TIMEOUT_MS);
}
