use anyhow::{bail, Context, Result};
use gnp_config::Config;
use gnp_core::GnpHistory;
use gnp_indexer::{Indexer, Pubkey};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    gnp_telemetry::init(&config.log_filter)?;

    let history = GnpHistory::with_opening(config.opening);
    let mut indexer = match &config.program_id {
        Some(id) => {
            let program_id = id
                .parse::<Pubkey>()
                .with_context(|| format!("invalid program id {id}"))?;
            Indexer::for_program(program_id, history)
        }
        None => Indexer::new(history),
    };

    tracing::info!(
        log = %config.event_log.display(),
        opening = ?config.opening,
        "replaying GNP events"
    );

    let file = File::open(&config.event_log)
        .await
        .with_context(|| format!("opening {}", config.event_log.display()))?;
    let mut lines = BufReader::new(file).lines();

    let mut line_no = 0usize;
    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let committed = indexer
            .ingest_line(&line)
            .with_context(|| format!("line {line_no}"))?;
        for record in committed {
            println!("{}", serde_json::to_string(record)?);
        }
    }
    indexer.finish();

    let history = indexer.history();
    tracing::info!(
        purchases = history.len(),
        opening = %history.opening_total(),
        replayed = %history.replayed_value(),
        total = %history.total(),
        skipped = indexer.skipped_payloads(),
        discarded = indexer.discarded_events(),
        "replay complete"
    );

    for (lock, value) in history.totals_by_lock() {
        tracing::info!(lock, value = %value, "lock total");
    }
    for (token, (raw, value)) in history.totals_by_token() {
        tracing::info!(token, raw = %raw, value = %value, "token total");
    }

    if let Some(expected) = config.expected_total {
        if !config.tolerance.accepts(expected, history.total()) {
            bail!(
                "replayed total {} is outside tolerance of expected {} (allowed {})",
                history.total(),
                expected,
                config.tolerance.allowed(expected)
            );
        }
        tracing::info!(expected = %expected, "total within tolerance");
    }

    Ok(())
}
