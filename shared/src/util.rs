/// Current UTC timestamp (milliseconds)
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Random document id (UUID v4, hyphenated)
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_is_unique() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }
}
