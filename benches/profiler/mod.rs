// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<T>().ok()).unwrap_or(default)
}

/// Criterion tuned through `PROFILE_FREQ` and `BENCH_*` env vars, with flamegraph output
/// when run with `--profile-time`.
pub fn criterion() -> Criterion {
    let frequency = env_or::<i32>("PROFILE_FREQ", 100).clamp(1, 1000);
    let sample_size = env_or::<usize>("BENCH_SAMPLE_SIZE", 50).clamp(10, 200);
    let warmup = Duration::from_secs(env_or::<u64>("BENCH_WARMUP_SECS", 2).clamp(1, 60));
    let measurement = Duration::from_secs(env_or::<u64>("BENCH_MEASUREMENT_SECS", 5).clamp(1, 120));

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(warmup)
        .measurement_time(measurement)
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
