//! Walk through a session against a running jobs API.
//!
//! ```text
//! JOB_BOARD_API_URL=http://localhost:5000 RUST_LOG=job_board=debug cargo run --example job_board
//! ```

use job_board::{ClientConfig, FilterSpec, JobInput, JobStore, SortOrder};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = JobStore::connect(ClientConfig::from_env()?)?;

    #[cfg(feature = "emitter")]
    store.on_notification(|n| println!("** {}", n.message));

    store
        .apply_filters(FilterSpec::new().sort(SortOrder::PostingDateDesc))
        .await?;
    print_jobs(&store);

    store.begin_create();
    let job = store
        .save_job(
            JobInput::new("Rust Engineer", "Example Co", "Remote")
                .job_type("Full-time")
                .tags_from_text("rust, async"),
        )
        .await?;
    println!("created job {}", job.id);

    store.begin_edit(&job);
    let mut input = JobInput::from(&job);
    input.location = "Berlin".to_string();
    store.save_job(input).await?;

    store.request_delete(&job);
    store.confirm_delete().await?;
    print_jobs(&store);

    Ok(())
}

fn print_jobs<S: job_board::JobService>(store: &JobStore<S>) {
    let jobs = store.jobs();
    if jobs.is_empty() {
        println!("No jobs found.");
        return;
    }
    for job in jobs {
        let date = job
            .posting_date
            .map(|d| d.to_string())
            .unwrap_or_default();
        println!(
            "#{:<4} {:<30} {:<20} {:<15} {}",
            job.id.get(), job.title, job.company, job.location, date
        );
    }
}
