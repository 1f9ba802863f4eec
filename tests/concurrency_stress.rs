//! Concurrent readers/writers stress tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use wavelet_db::{MinMax, MinMaxAggregation, SharedStore, Store};

type Shared = SharedStore<MinMaxAggregation<f64>, String>;

fn shared_store(height: u32) -> Shared {
    SharedStore::new(Store::new(height, MinMaxAggregation::unseeded()).unwrap())
}

#[test]
fn test_10_concurrent_readers_2_writers() {
    let store = shared_store(6);

    // Pre-populate
    for i in 0..256 {
        store.write_entry(i, (i % 50) as f64, None).unwrap();
    }

    let handles: Vec<_> = (0..12)
        .map(|thread_id| {
            let store = store.clone();
            std::thread::spawn(move || {
                if thread_id < 2 {
                    // Writer thread
                    for i in 0..500 {
                        let position = 256 + thread_id * 500 + i;
                        store
                            .write_entry(position, 1000.0 + i as f64, Some(format!("w{}_{}", thread_id, i)))
                            .unwrap();
                    }
                } else {
                    // Reader thread
                    for _ in 0..500 {
                        let start = rand::random::<i64>().rem_euclid(1256);
                        let roots = store.read_range(start, start + 64, 0).unwrap();
                        assert!(roots.len() <= 2);

                        let low = store.find_in_range(0, 255, &MinMax::new(0.0, 10.0)).unwrap();
                        assert_eq!(low.len(), 256 / 50 * 11 + 6);
                    }
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let stats = store.stats();
    assert_eq!(stats.entries, 256 + 2 * 500);

    let written = store
        .find_in_range(256, 1255, &MinMax::new(1000.0, 1499.0))
        .unwrap();
    assert_eq!(written.len(), 1000);
    assert!(written.windows(2).all(|w| w[0].position < w[1].position));
}

#[test]
fn test_readers_never_see_torn_paths() {
    let store = shared_store(8);
    let checks = Arc::new(AtomicUsize::new(0));

    let writer = {
        let store = store.clone();
        std::thread::spawn(move || {
            for i in 0..2000 {
                store.write_entry(i % 256, i as f64, None).unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            let checks = checks.clone();
            std::thread::spawn(move || {
                for _ in 0..200 {
                    let guard = store.read();
                    let root = guard.read_range(0, 255, 0).unwrap();
                    let leaves = guard.read_range(0, 255, 8).unwrap();

                    // the root must cover every leaf written so far
                    if let Some(Some(root)) = root.first() {
                        for leaf in leaves.iter().flatten() {
                            assert!(root.min <= leaf.min && root.max >= leaf.max);
                        }
                    }
                    checks.fetch_add(1, Ordering::Relaxed);
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for h in readers {
        h.join().unwrap();
    }

    assert_eq!(checks.load(Ordering::Relaxed), 4 * 200);
    assert_eq!(store.stats().entries, 2000);
}
