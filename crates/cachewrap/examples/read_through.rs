// Copyright (c) Microsoft Corporation.

//! Read-through and write-through around a slow lookup.

use std::time::Duration;

use cachewrap::{CacheAspect, CacheOptions, InMemoryBackend, Invocation};
use tick::Clock;

async fn load_price(sku: &str) -> Result<u32, std::io::Error> {
    tokio::time::sleep(Duration::from_millis(50)).await;
    Ok(u32::try_from(sku.len()).unwrap_or(u32::MAX) * 100)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let clock = Clock::new_tokio();
    let backend = InMemoryBackend::<String, u32>::new(clock.clone());
    let options = CacheOptions::new().with_ttl(Duration::from_secs(60));

    let prices = CacheAspect::cacheable::<String, u32>(clock.clone())
        .cache(backend.clone())
        .name("prices")
        .options(options.clone())
        .build()?;
    let reprice = CacheAspect::updatable::<String, u32>(clock)
        .cache(backend)
        .name("prices")
        .options(options)
        .build()?;

    let lookup = Invocation::new("price").arg("sku-123".to_string());

    // First call misses and loads, second call is served from the cache.
    let first = prices.run(&lookup, || load_price("sku-123")).await?;
    let second = prices.run(&lookup, || load_price("sku-123")).await?;
    println!("price: {first}, cached: {second}");

    // Writing through replaces the cached price.
    let updated = reprice.run(&lookup, || async { Ok::<_, std::io::Error>(999) }).await?;
    let read_back = prices.run(&lookup, || load_price("sku-123")).await?;
    println!("updated: {updated}, read back: {read_back}");

    Ok(())
}
