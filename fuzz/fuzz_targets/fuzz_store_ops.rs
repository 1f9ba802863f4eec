#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use wavelet_db::{MinMax, MinMaxAggregation, Store};

#[derive(Debug, Arbitrary)]
enum Op {
    Write { position: i32, value: i16, tag: u8 },
    Read { start: i32, end: i32, level: u8 },
    Find { start: i32, end: i32, low: i16, width: u8 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    height: u8,
    ops: Vec<Op>,
}

// Random operation sequences must never panic, and searches must agree with
// a plain scan of what was written
fuzz_target!(|input: Input| {
    let height = u32::from(input.height % 12);
    let mut store: Store<_, u8> = match Store::new(height, MinMaxAggregation::unseeded()) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut written: Vec<(i64, i64, u8)> = Vec::new();

    for op in input.ops.iter().take(256) {
        match *op {
            Op::Write { position, value, tag } => {
                let position = i64::from(position) % 100_000;
                if store.write_entry(position, i64::from(value), Some(tag)).is_ok() {
                    written.push((position, i64::from(value), tag));
                }
            }
            Op::Read { start, end, level } => {
                let _ = store.read_range(i64::from(start), i64::from(end), u32::from(level));
            }
            Op::Find { start, end, low, width } => {
                let (start, end) = (i64::from(start.min(end)), i64::from(start.max(end)));
                let needle = MinMax::new(i64::from(low), i64::from(low) + i64::from(width));
                let found = store.find_in_range(start, end, &needle).unwrap();

                let expected = written
                    .iter()
                    .filter(|(p, v, _)| *p >= start && *p <= end && needle.contains_value(*v))
                    .count();
                assert_eq!(found.len(), expected);
            }
        }
    }
});
