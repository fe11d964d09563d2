use std::collections::HashSet;

use wick::config::WickConfig;
use wick::storage::LocalStore;
use wick::sync::remote::RemoteClient;
use wick::sync::{SEED_ID_MAX, account_bucket};

#[tokio::main]
async fn main() {
    systemd_journal_logger::JournalLog::new()
        .unwrap()
        .with_syslog_identifier("wick-store-check".to_string())
        .install()
        .unwrap();

    let config = WickConfig::load();
    wick::set_debug_logging(config.debug_logging);
    log::set_max_level(if wick::debug_logging() {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });

    let storage = LocalStore::new(config.clone());

    println!("=== Local cache vs remote pool ===\n");

    let account = match storage.read_session() {
        Some(account) => account,
        None => {
            println!("No one is signed in.");
            return;
        }
    };
    let bucket = account_bucket(account.id());
    println!("Account: {} <{}>", account.name(), account.email());
    println!("Bucket:  {}", bucket);

    let local_tasks = storage.read_tasks(account.id());
    let seed_count = local_tasks.iter().filter(|t| t.is_seed()).count();
    println!(
        "\nLocal: {} tasks ({} seed, {} created here)",
        local_tasks.len(),
        seed_count,
        local_tasks.len() - seed_count
    );

    let client = match RemoteClient::new(&config.api_base_url) {
        Ok(c) => c,
        Err(e) => {
            println!("  Client error: {}", e);
            return;
        }
    };

    let pool = match client.fetch_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            println!("  Fetch error: {}", e);
            return;
        }
    };

    let in_bucket: Vec<_> = pool.iter().filter(|t| t.user_id == bucket).collect();
    println!("Remote: {} todos in pool, {} in this bucket", pool.len(), in_bucket.len());

    let local_ids: HashSet<i64> = local_tasks.iter().map(|t| t.id).collect();
    let pool_ids: HashSet<i64> = in_bucket.iter().map(|t| t.id).collect();

    let uncached: Vec<_> = in_bucket.iter().filter(|t| !local_ids.contains(&t.id)).collect();
    if !uncached.is_empty() {
        println!("\nIn bucket but not cached (would be pulled by initialize):");
        for todo in &uncached {
            println!("  [{}] {}", todo.id, todo.todo);
        }
    }

    let orphaned: Vec<_> = local_tasks
        .iter()
        .filter(|t| t.is_seed() && !pool_ids.contains(&t.id))
        .collect();
    if !orphaned.is_empty() {
        println!("\nCached seed tasks missing from the pool (id <= {}):", SEED_ID_MAX);
        for task in &orphaned {
            println!("  [{}] {}", task.id, task.title);
        }
    }

    if uncached.is_empty() && orphaned.is_empty() {
        println!("\nCache and pool agree for this bucket.");
    }
}
