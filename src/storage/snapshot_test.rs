//! Tests for snapshot consistency.

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::mpsc;
    use std::thread;

    use crate::storage::{ShardedMap, SnapshotBuilder};

    #[test]
    fn test_snapshot_of_empty_map() {
        let map: ShardedMap<i64, i64> = ShardedMap::new(3).unwrap();
        assert!(map.snapshot().is_empty());
    }

    #[test]
    fn test_snapshot_is_complete_after_writers_join() {
        let map: ShardedMap<i64, i64> = ShardedMap::new(16).unwrap();
        thread::scope(|s| {
            for t in 0..4i64 {
                let map = &map;
                s.spawn(move || {
                    for k in (t * 1000)..((t + 1) * 1000) {
                        *map.access(k - 2000) = k;
                    }
                });
            }
        });

        let snapshot = map.snapshot();
        assert_eq!(snapshot.len(), 4000);
        for (k, v) in &snapshot {
            assert_eq!(*v, k + 2000);
        }
        let keys: Vec<i64> = snapshot.keys().copied().collect();
        assert_eq!(keys, (-2000..2000).collect::<Vec<_>>(), "snapshot is ordered by key");
    }

    #[test]
    fn test_snapshot_is_detached_from_map() {
        let map: ShardedMap<i64, i64> = ShardedMap::new(2).unwrap();
        *map.access(1) = 1;
        let snapshot = map.snapshot();

        *map.access(1) = 2;
        *map.access(2) = 2;

        assert_eq!(snapshot, BTreeMap::from([(1, 1)]));
        assert_eq!(map.snapshot(), BTreeMap::from([(1, 2), (2, 2)]));
    }

    #[test]
    fn test_snapshot_misses_writes_behind_the_copy_point() {
        // Shard 0 holds key 0, shard 1 holds key 1.
        let map: ShardedMap<i64, i64> = ShardedMap::new(2).unwrap();
        *map.access(0) = 0;
        *map.access(1) = 0;

        let (copied_tx, copied_rx) = mpsc::channel();
        let (resume_tx, resume_rx) = mpsc::channel::<()>();

        let snapshot = thread::scope(|s| {
            let map_ref = &map;
            let handle = s.spawn(move || {
                map_ref.snapshot_with(|idx| {
                    if idx == 0 {
                        copied_tx.send(()).unwrap();
                        resume_rx.recv().unwrap();
                    }
                })
            });

            copied_rx.recv().unwrap();
            // Shard 0 is already copied and unlocked, shard 1 is not yet copied.
            *map.access(0) = 1;
            *map.access(1) = 1;
            resume_tx.send(()).unwrap();

            handle.join().unwrap()
        });

        // The later write is visible, the earlier one is not: the result never
        // existed as a whole, but each shard's part did.
        assert_eq!(snapshot, BTreeMap::from([(0, 0), (1, 1)]));
        assert_eq!(map.snapshot(), BTreeMap::from([(0, 1), (1, 1)]));
    }

    #[test]
    fn test_concurrent_snapshots_only_see_assigned_values() {
        const KEYS: i64 = 256;
        const ROUNDS: u64 = 200;

        let map: ShardedMap<i64, u64> = ShardedMap::new(8).unwrap();
        let done = AtomicBool::new(false);

        let snapshots = thread::scope(|s| {
            let writer = s.spawn(|| {
                for _ in 0..ROUNDS {
                    for k in 0..KEYS {
                        *map.access(k) += 1;
                    }
                }
                done.store(true, Ordering::Release);
            });

            let reader = s.spawn(|| {
                let mut taken = Vec::new();
                while !done.load(Ordering::Acquire) {
                    taken.push(map.snapshot());
                }
                taken
            });

            writer.join().unwrap();
            reader.join().unwrap()
        });

        // Counters only grow, so every observed value must lie in [1, ROUNDS]
        // and successive snapshots must never go backwards for a key.
        let mut last: HashMap<i64, u64> = HashMap::new();
        for snapshot in &snapshots {
            for (k, v) in snapshot {
                assert!(*v >= 1 && *v <= ROUNDS, "key {} has impossible value {}", k, v);
                let prev = last.entry(*k).or_insert(0);
                assert!(*v >= *prev, "key {} went back from {} to {}", k, prev, v);
                *prev = *v;
            }
        }

        let final_snapshot = map.snapshot();
        assert_eq!(final_snapshot.len(), KEYS as usize);
        assert!(final_snapshot.values().all(|v| *v == ROUNDS));
    }

    #[test]
    fn test_snapshot_with_reports_every_shard() {
        let map: ShardedMap<i64, i64> = ShardedMap::new(5).unwrap();
        let mut order = Vec::new();
        map.snapshot_with(|idx| order.push(idx));
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_builder_merges_shards() {
        let mut builder = SnapshotBuilder::new();
        builder.copy_shard(&HashMap::from([(3, "c"), (1, "a")]));
        builder.copy_shard(&HashMap::from([(2, "b")]));
        assert_eq!(builder.shards_copied(), 2);
        assert_eq!(
            builder.finish(),
            BTreeMap::from([(1, "a"), (2, "b"), (3, "c")])
        );
    }
}
