//! Benchmark tests for critical operations
//!
//! Run with: cargo test --release --test bench_test -- --ignored --nocapture

use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

use inventory::config::Config;
use inventory::database::{create_pool, init_schema, AppState};
use inventory::model::{ComputerPayload, MaintenancePayload, UserPayload};

async fn setup_state() -> (AppState, NamedTempFile) {
    let temp_db = NamedTempFile::new().unwrap();
    let config = Config {
        database_url: format!("sqlite:{}", temp_db.path().display()),
        ..Config::default()
    };
    let pool = create_pool(&config).await.unwrap();
    init_schema(&pool).await.unwrap();
    (AppState::new(pool), temp_db)
}

fn report(name: &str, iterations: usize, duration: Duration) {
    let avg_ms = duration.as_secs_f64() * 1000.0 / iterations as f64;
    let ops_per_sec = (iterations as f64 / duration.as_secs_f64()) as u64;

    println!("  {} ({} iterations)", name, iterations);
    println!("    Total time: {:?}", duration);
    println!("    Avg time: {:.3}ms", avg_ms);
    println!("    Throughput: {} ops/sec\n", ops_per_sec);
}

fn computer(i: usize, user_id: Option<i64>) -> ComputerPayload {
    ComputerPayload {
        hostname: Some(format!("bench-{}", i)),
        brand: Some("HP".to_string()),
        model: Some("EliteBook".to_string()),
        cpu: Some("i5".to_string()),
        ram: Some(16),
        storage: Some(512),
        os: Some("Windows".to_string()),
        status: None,
        user_id,
    }
}

#[tokio::test]
#[ignore] // Run explicitly with: cargo test bench --release -- --ignored --nocapture
async fn bench_create_rows() {
    println!("\n=== Benchmark: Create rows ===\n");

    let (state, _temp_db) = setup_state().await;
    let iterations = 1000;

    let start = Instant::now();
    for i in 0..iterations {
        state
            .users
            .create(&UserPayload {
                name: Some(format!("Bench {}", i)),
                email: Some(format!("bench{}@example.com", i)),
                department: Some("Ops".to_string()),
                position: Some("Tester".to_string()),
            })
            .await
            .unwrap();
    }
    report("Create users", iterations, start.elapsed());

    let start = Instant::now();
    for i in 0..iterations {
        state.computers.create(&computer(i, None)).await.unwrap();
    }
    report("Create computers", iterations, start.elapsed());
}

#[tokio::test]
#[ignore]
async fn bench_list_maintenance_join() {
    println!("\n=== Benchmark: List maintenance (joined) ===\n");

    let (state, _temp_db) = setup_state().await;

    println!("  Preparing: 100 computers with 10 logs each...");
    for i in 0..100 {
        let c = state.computers.create(&computer(i, None)).await.unwrap();
        for day in 1..=10 {
            state
                .maintenance
                .create(&MaintenancePayload {
                    computer_id: Some(c.id),
                    date: chrono::NaiveDate::from_ymd_opt(2024, 1, day),
                    log_type: Some("Inspection".to_string()),
                    description: Some("Routine check".to_string()),
                    technician: Some("Bench".to_string()),
                    status: None,
                })
                .await
                .unwrap();
        }
    }
    println!("  Done!\n");

    let iterations = 100;
    let start = Instant::now();
    for _ in 0..iterations {
        let logs = state.maintenance.list().await.unwrap();
        assert_eq!(logs.len(), 1000);
    }
    report("List 1000 logs with hostname", iterations, start.elapsed());

    let start = Instant::now();
    for _ in 0..iterations {
        state.stats.summary().await.unwrap();
    }
    report("Stats summary", iterations, start.elapsed());
}

#[tokio::test]
#[ignore]
async fn bench_concurrent_operations() {
    println!("\n=== Benchmark: Concurrent Operations ===\n");

    let (state, _temp_db) = setup_state().await;

    let num_tasks = 50;
    let ops_per_task = 10;

    println!("  Running {} concurrent tasks with {} ops each...", num_tasks, ops_per_task);

    let start = Instant::now();
    let mut handles = vec![];

    for task_id in 0..num_tasks {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            for op_id in 0..ops_per_task {
                let payload = computer(task_id * ops_per_task + op_id, None);
                // SQLite allows one writer at a time; a busy error only skips that write.
                let _ = state.computers.create(&payload).await;
                let _ = state.computers.list().await;
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    report("Concurrent create + list", num_tasks * ops_per_task, start.elapsed());

    let stats = state.stats.summary().await.unwrap();
    println!("  Computers stored: {}", stats.computers);
}
