use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use colored::*;
use governor::{Quota, RateLimiter};
use hdrhistogram::Histogram;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

const DURATION_SECS: u64 = 20;
const STORM_SIZE: usize = 200;

struct Target {
    name: &'static str,
    url: String,
}

#[tokio::main]
async fn main() {
    let base_url = std::env::var("BENCH_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

    println!("{}", "🚀 Starting Benchmark Suite".bold().green());
    println!("Target URL: {}", base_url);

    let client = Client::builder()
        .pool_max_idle_per_host(1000)
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();

    if client.get(format!("{}/health", base_url)).send().await.is_err() {
        eprintln!("{}", format!("❌ Server is NOT reachable at {}. Please start it first.", base_url).red().bold());
        return;
    }

    println!("\n{}", "⚙️  Setting up benchmark data...".yellow());
    let venue_id = setup_venue(&client, &base_url).await;
    let event_id = setup_event(&client, &base_url).await;

    println!("{}", "✅ Data created successfully.".green());
    println!("   Venue ID: {}", venue_id);
    println!("   Event ID: {}", event_id);

    run_double_booking_storm(&client, &base_url, venue_id, event_id).await;

    let targets = vec![
        Target {
            name: "Health Check",
            url: format!("{}/health", base_url),
        },
        Target {
            name: "List Venues",
            url: format!("{}/api/v1/venues", base_url),
        },
        Target {
            name: "Filtered Booking List (joined)",
            url: format!("{}/api/v1/bookings?venue_id={}&event_type_id=1&start_date=2025-01-01", base_url, venue_id),
        },
    ];

    let rps_stages = vec![10, 50, 200, 1000];

    for target in targets {
        println!("\n{}", "=".repeat(60));
        println!("Benchmarking Endpoint: {}", target.name.cyan().bold());
        println!("URL: {}", target.url);
        println!("{}", "=".repeat(60));

        println!("{:<10} | {:<15} | {:<15} | {:<15}", "RPS", "Mean (ms)", "P99 (ms)", "Success Rate");
        println!("{:-<10}-+-{:-<15}-+-{:-<15}-+-{:-<15}", "", "", "", "");

        for &rps in &rps_stages {
            run_stage(&client, &target, rps).await;
        }
    }
}

async fn setup_venue(client: &Client, base_url: &str) -> i64 {
    let res = client.post(format!("{}/api/v1/venues", base_url))
        .json(&json!({
            "name": "Benchmark Hall",
            "location": "Server Room",
            "capacity": 500
        }))
        .send()
        .await
        .expect("Failed to send venue create request");

    if !res.status().is_success() {
        panic!("Failed to create venue: status {}", res.status());
    }

    let body: Value = res.json().await.expect("Failed to parse venue response");
    body["id"].as_i64().expect("No venue id")
}

async fn setup_event(client: &Client, base_url: &str) -> i64 {
    let res = client.post(format!("{}/api/v1/events", base_url))
        .json(&json!({
            "name": "Benchmark Conference",
            "event_date": (Utc::now() + ChronoDuration::days(30)).to_rfc3339(),
            "description": "Load testing",
            "event_type_id": 1
        }))
        .send()
        .await
        .expect("Failed to create event");

    if !res.status().is_success() {
        let status = res.status();
        let txt = res.text().await.unwrap_or_default();
        panic!("Failed to create event data. Status: {}. Body: {}", status, txt);
    }

    let body: Value = res.json().await.expect("Failed to parse event response");
    body["id"].as_i64().expect("No event id")
}

/// Fires concurrent proposals for one venue and day; exactly one may be admitted.
async fn run_double_booking_storm(client: &Client, base_url: &str, venue_id: i64, event_id: i64) {
    let date: NaiveDate = (Utc::now() + ChronoDuration::days(60)).date_naive();

    println!("\n{}", "=".repeat(60));
    println!("Double-booking storm: {} concurrent proposals for venue {} on {}", STORM_SIZE, venue_id, date);
    println!("{}", "=".repeat(60));

    let mut set = JoinSet::new();
    for _ in 0..STORM_SIZE {
        let client = client.clone();
        let url = format!("{}/api/v1/bookings", base_url);
        let body = json!({ "venue_id": venue_id, "event_id": event_id, "booking_date": date.to_string() });
        set.spawn(async move {
            let start = Instant::now();
            let status = client.post(&url).json(&body).send().await.map(|r| r.status()).ok();
            (start.elapsed(), status)
        });
    }

    let mut histogram = Histogram::<u64>::new(3).unwrap();
    let (mut admitted, mut conflicts, mut other) = (0, 0, 0);
    while let Some(joined) = set.join_next().await {
        let (latency, status) = joined.unwrap();
        histogram.record(latency.as_micros() as u64).unwrap();
        match status {
            Some(s) if s.is_success() => admitted += 1,
            Some(s) if s == StatusCode::CONFLICT => conflicts += 1,
            _ => other += 1,
        }
    }

    println!(
        "admitted: {} | conflicts: {} | other: {} | mean {:.2} ms | p99 {:.2} ms",
        admitted,
        conflicts,
        other,
        histogram.mean() / 1000.0,
        histogram.value_at_quantile(0.99) as f64 / 1000.0
    );

    if admitted == 1 {
        println!("{}", "✅ Exactly one booking admitted.".green().bold());
    } else {
        println!("{}", format!("❌ Expected exactly one admitted booking, got {}", admitted).red().bold());
    }
}

async fn run_stage(client: &Client, target: &Target, rps: u32) {
    let limiter = Arc::new(RateLimiter::direct(
        Quota::per_second(NonZeroU32::new(rps).unwrap())
    ));

    let (tx, mut rx) = mpsc::channel(50000);
    let start_time = Instant::now();
    let duration = Duration::from_secs(DURATION_SECS);

    loop {
        if start_time.elapsed() > duration {
            break;
        }

        if limiter.check().is_ok() {
            let client = client.clone();
            let url = target.url.clone();
            let tx = tx.clone();

            tokio::spawn(async move {
                let req_start = Instant::now();
                let res = client.get(&url).send().await;
                let latency = req_start.elapsed();

                let success = match res {
                    Ok(r) => r.status().is_success(),
                    Err(_) => false,
                };

                let _ = tx.send((latency, success)).await;
            });
        } else {
            tokio::task::yield_now().await;
        }
    }

    drop(tx);

    let mut histogram = Histogram::<u64>::new(3).unwrap();
    let mut successes = 0;
    let mut total = 0;

    while let Some((latency, success)) = rx.recv().await {
        total += 1;
        if success { successes += 1; }
        histogram.record(latency.as_micros() as u64).unwrap();
    }

    let mean_ms = histogram.mean() / 1000.0;
    let p99_ms = histogram.value_at_quantile(0.99) as f64 / 1000.0;
    let success_rate = if total > 0 { (successes as f64 / total as f64) * 100.0 } else { 0.0 };

    println!(
        "{:<10} | {:<15.2} | {:<15.2} | {:<14.1}%",
        rps,
        mean_ms,
        p99_ms,
        success_rate
    );

    tokio::time::sleep(Duration::from_millis(500)).await;
}
