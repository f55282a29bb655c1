use bucketx::ChainTable;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::str::FromStr;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase")]
enum Phase {
    Fill,
    Lookup,
    Drain,
}

fn main() {
    tracing_subscriber::fmt::init();

    // Workload shape from env vars
    let buckets: usize = std::env::var("BUCKETS")
        .map(|v| v.parse().expect("BUCKETS must be an integer"))
        .unwrap_or(1024);
    let keys: u32 = std::env::var("KEYS")
        .map(|v| v.parse().expect("KEYS must be an integer"))
        .unwrap_or(100_000);
    let phases: Vec<Phase> = std::env::var("PHASES")
        .unwrap_or_else(|_| "fill,lookup,drain".to_string())
        .split(',')
        .map(|name| Phase::from_str(name.trim()).expect("unknown phase name"))
        .collect();

    // Touch keys in a shuffled order so chains are hit unpredictably
    let mut order: Vec<u32> = (0..keys).collect();
    order.shuffle(&mut StdRng::seed_from_u64(0));

    let mut table: ChainTable<u64> = ChainTable::new(buckets).expect("BUCKETS must be at least 1");
    tracing::info!(buckets, keys, "table configured");

    for phase in phases {
        let timer = Instant::now();
        match phase {
            Phase::Fill => {
                for &key in &order {
                    table.insert(key, u64::from(key) * 3);
                }
            }
            Phase::Lookup => {
                let mut hits = 0u64;
                for &key in &order {
                    if table.get(key).is_some() {
                        hits += 1;
                    }
                }
                println!("lookup hits: {hits}");
            }
            Phase::Drain => {
                let mut drained = 0u64;
                for &key in &order {
                    if table.remove(key).is_some() {
                        drained += 1;
                    }
                }
                println!("drained: {drained}");
            }
        }
        println!(
            "{phase} done in {} nanos ({} entries live)",
            timer.elapsed().as_nanos(),
            table.len()
        );
    }
}
