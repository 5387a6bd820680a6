//! Tests for shard operations.

#[cfg(test)]
mod tests {
    use super::super::shard::Shard;

    #[test]
    fn test_new_shard_is_empty() {
        let shard: Shard<i64, i64> = Shard::new(3);
        assert_eq!(shard.id(), 3);
        assert_eq!(shard.len(), 0);
        assert!(shard.is_empty());
    }

    #[test]
    fn test_clear_returns_removed_count() {
        let shard: Shard<i64, i64> = Shard::new(0);
        {
            let mut items = shard.lock();
            items.insert(1, 10);
            items.insert(2, 20);
        }
        assert_eq!(shard.len(), 2);
        assert_eq!(shard.clear(), 2);
        assert!(shard.is_empty());
        assert_eq!(shard.clear(), 0);
    }

    #[test]
    fn test_try_lock_fails_while_locked() {
        let shard: Shard<i64, i64> = Shard::new(0);
        let held = shard.lock();
        assert!(shard.try_lock(16).is_none(), "shard is already locked");
        drop(held);
        assert!(shard.try_lock(1).is_some(), "shard should be free again");
    }

    #[test]
    fn test_try_lock_with_zero_spins_still_attempts_once() {
        let shard: Shard<i64, i64> = Shard::new(0);
        assert!(shard.try_lock(0).is_some());
    }
}
