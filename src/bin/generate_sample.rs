use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

/// One line of the generated log. Optional fields are left out entirely so
/// the viewer sees rows with differing keys.
#[derive(Serialize)]
struct SampleRecord {
    timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    levelname: Option<&'static str>,
    name: &'static str,
    message: String,
    duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'static str>,
}

/// Deterministic splitmix64 stream; enough for fixture data.
struct SimpleRng(u64);

impl SimpleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const LEVELS: [&str; 5] = ["DEBUG", "INFO", "INFO", "WARNING", "ERROR"];
const LOGGERS: [&str; 5] = ["core", "core.db", "io", "net.http", "scheduler"];
const USERS: [&str; 3] = ["alice", "bob", "carol"];
const EVENTS: [&str; 6] = [
    "request handled",
    "cache miss",
    "connection reset by peer",
    "job finished",
    "retrying after timeout",
    "configuration reloaded",
];

fn timestamp(offset_ms: u64) -> String {
    let secs = offset_ms / 1000;
    format!(
        "2024-05-01T{:02}:{:02}:{:02}.{:03}",
        8 + secs / 3600,
        (secs / 60) % 60,
        secs % 60,
        offset_ms % 1000
    )
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let path = PathBuf::from(args.next().unwrap_or_else(|| "sample.jsonl".into()));
    let count: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid record count '{n}'"))?,
        None => 500,
    };

    let mut rng = SimpleRng(42);
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);

    let mut clock_ms = 0u64;
    for i in 0..count {
        clock_ms += 1 + (rng.next_f64() * 2500.0) as u64;
        let event = rng.pick(&EVENTS);
        // Every so often a long message to exercise word-wrap.
        let message = if i % 17 == 0 {
            format!("{event}: {}", "details ".repeat(40).trim_end())
        } else {
            format!("{event} (#{i})")
        };

        let record = SampleRecord {
            timestamp: timestamp(clock_ms),
            levelname: (i % 23 != 0).then(|| *rng.pick(&LEVELS)),
            name: *rng.pick(&LOGGERS),
            message,
            duration: rng.next_f64() * 250.0,
            user: (i % 5 == 0).then(|| *rng.pick(&USERS)),
        };
        serde_json::to_writer(&mut out, &record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    println!("Wrote {count} records to {}", path.display());
    Ok(())
}
