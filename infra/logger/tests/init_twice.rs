use bps_logger::{LogConfig, Logger, LoggerError};

#[test]
fn second_init_returns_subscriber_error() {
    let cfg = LogConfig::default();
    let _logger = Logger::init("bps-init-twice", &cfg).expect("first init should succeed");

    let err = Logger::init("bps-init-twice-second", &cfg).expect_err("second init should fail");

    assert!(matches!(err, LoggerError::Subscriber { .. }));
}
