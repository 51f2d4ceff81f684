/// Unit shipped by every systemd host, safe for read-only calls.
pub const ALWAYS_PRESENT_UNIT: &str = "systemd-journald.service";

/// Unit installed on the test machine for stop / enable / disable calls.
pub const TEST_SERVICE: &str = "tiny_daemon.service";

pub const MISSING_UNIT: &str = "sysd-unitctl-ghost.service";

pub fn init_logs() {
    let _ = env_logger::builder()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}
