//! Assertions on captured log output for unit tests.
//!
//! Tests call `testing_logger::setup()` first. Only compiled for tests.

#[cfg(test)]
pub mod test_helper {
    use log::Level;

    /// Assert that exactly the given messages were logged with `level`, in this order.
    pub fn check_logs(level: Level, expected: &[&str]) {
        testing_logger::validate(|captured_logs| {
            let messages: Vec<&str> = captured_logs
                .iter()
                .filter(|l| l.level == level)
                .map(|l| l.body.as_str())
                .collect();
            assert_eq!(messages, expected);
        });
    }
    pub fn check_warnings(expected: &[&str]) {
        check_logs(Level::Warn, expected);
    }
}
