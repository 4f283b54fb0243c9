use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

pub const TIMINGS_ENV: &str = "LLEMMING_TIMINGS";

static TIMINGS: Lazy<Mutex<HashMap<String, Vec<u128>>>> = Lazy::new(|| Mutex::new(HashMap::new()));

pub fn enabled() -> bool {
    std::env::var(TIMINGS_ENV).map(|v| !v.is_empty()).unwrap_or(false)
}

pub fn record(label: &str, dur_ms: u128) {
    if !enabled() {
        return;
    }
    if let Ok(mut g) = TIMINGS.lock() {
        g.entry(label.to_string()).or_default().push(dur_ms);
    }
}

/// Run `f`, recording its wall time under `label` when timings are enabled.
pub fn timed<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    record(label, start.elapsed().as_millis());
    out
}

fn quantiles(mut v: Vec<u128>) -> (u128, u128, u128) {
    if v.is_empty() {
        return (0, 0, 0);
    }
    v.sort_unstable();
    let len = v.len() as f64;
    let idx = |p: f64| -> usize { ((p * (len - 1.0)).round() as isize).max(0) as usize };
    let p50 = v[idx(0.50)];
    let p95 = v[idx(0.95)];
    let sum: u128 = v.iter().copied().sum();
    (p50, p95, sum / (v.len() as u128))
}

pub fn summary() -> String {
    if !enabled() {
        return String::new();
    }
    let Ok(g) = TIMINGS.lock() else {
        return String::new();
    };
    if g.is_empty() {
        return String::new();
    }
    let mut out = String::from("=== TIMINGS (ms) ===\n");
    let mut keys: Vec<_> = g.keys().cloned().collect();
    keys.sort();
    for k in keys {
        if let Some(v) = g.get(&k) {
            let (p50, p95, avg) = quantiles(v.clone());
            out.push_str(&format!("{}: count={} p50={} p95={} avg={}\n", k, v.len(), p50, p95, avg));
        }
    }
    out
}
