// Copyright (c) Microsoft Corporation.

//! Caching middleware in a `layered` service stack.

use cachewrap::{CacheAspect, Caching, InMemoryBackend, KeySpec};
use layered::Execute;
use layered::prelude::*;
use tick::Clock;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let clock = Clock::new_tokio();
    let backend = InMemoryBackend::<String, String>::new(clock.clone());

    let read = CacheAspect::cacheable::<String, String>(clock.clone())
        .cache(backend.clone())
        .name("users")
        .build()?;
    let evict = CacheAspect::evict::<String, String>(clock)
        .cache(backend)
        .name("users")
        .build()?;

    let get_user = (
        Caching::layer("get_user", read).key_fn(|id: &u64| KeySpec::key(format!("user:{id}"))),
        Execute::new(|id: u64| async move {
            println!("loading user {id} from the database");
            Ok::<_, std::io::Error>(format!("user #{id}"))
        }),
    )
        .into_service();

    let delete_user = (
        Caching::layer("delete_user", evict).key_fn(|id: &u64| KeySpec::key(format!("user:{id}"))),
        Execute::new(|id: u64| async move {
            println!("deleting user {id} from the database");
            Ok::<_, std::io::Error>(String::new())
        }),
    )
        .into_service();

    println!("{}", get_user.execute(1).await?);
    println!("{}", get_user.execute(1).await?);
    delete_user.execute(1).await?;
    println!("{}", get_user.execute(1).await?);

    Ok(())
}
