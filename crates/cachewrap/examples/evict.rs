// Copyright (c) Microsoft Corporation.

//! Invalidation modes with structured logging enabled.

use cachewrap::{CacheAspect, CacheBackend, CacheOptions, CacheTelemetry, InMemoryBackend, Invocation, KeySpec};
use tick::Clock;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let clock = Clock::new_tokio();
    let backend = InMemoryBackend::<String, String>::new(clock.clone());
    let options = CacheOptions::new();
    for key in ["user:1", "user:2", "user:3"] {
        backend.set(&key.to_string(), format!("{key} profile"), &options).await?;
    }

    let evict = CacheAspect::evict::<String, String>(clock.clone())
        .cache(backend.clone())
        .name("profiles")
        .telemetry(CacheTelemetry::new(true, None))
        .build()?;

    // A key list wins over a single key.
    let spec = KeySpec::keys(["user:1".to_string(), "user:2".to_string()]).with_key("user:3".to_string());
    evict
        .run_with_key(&spec, &Invocation::new("merge_users"), || async {
            Ok::<_, std::io::Error>("merged".to_string())
        })
        .await?;
    println!("user:3 still cached: {}", backend.get(&"user:3".to_string(), &options).await?.is_some());

    // Flushing everything ignores any keys.
    let flush = CacheAspect::evict::<String, String>(clock)
        .cache(backend.clone())
        .name("profiles")
        .all_entries(true)
        .telemetry(CacheTelemetry::new(true, None))
        .build()?;
    flush
        .run(&Invocation::new("reset"), || async { Ok::<_, std::io::Error>(String::new()) })
        .await?;
    println!("user:3 still cached: {}", backend.get(&"user:3".to_string(), &options).await?.is_some());

    Ok(())
}
