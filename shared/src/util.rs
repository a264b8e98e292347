/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as a record key.
///
/// Layout (53 bits, stays inside JavaScript's Number.MAX_SAFE_INTEGER so
/// ids survive a round trip through JSON clients):
///   - 41 bits: milliseconds since 2025-01-01 UTC
///   - 12 bits: sequence (4096 values per ms, randomly seeded per process)
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    use std::sync::OnceLock;
    use std::sync::atomic::{AtomicI64, Ordering};

    // Custom epoch: 2025-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_735_689_600_000;
    static SEQUENCE: AtomicI64 = AtomicI64::new(0);
    static SEQUENCE_START: OnceLock<i64> = OnceLock::new();

    let start = *SEQUENCE_START.get_or_init(|| rand::thread_rng().gen_range(0..0x1000));
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let seq = (start + SEQUENCE.fetch_add(1, Ordering::Relaxed)) & 0xFFF; // 12 bits
    (ts << 12) | seq
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snowflake_ids_are_positive_and_distinct() {
        let a = snowflake_id();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = snowflake_id();
        assert!(a > 0);
        assert!(b > a);
    }

    #[test]
    fn snowflake_fits_in_53_bits() {
        let id = snowflake_id();
        assert!(id < (1i64 << 53));
    }
}
