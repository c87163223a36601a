use matchwatch_telemetry::{Journal, NotificationRecord, Paths};

const RECENT_LIMIT: usize = 20;

fn compute_stats(records: &[NotificationRecord]) -> String {
    if records.is_empty() {
        return "No notifications to analyze.".to_string();
    }

    let mut lines = vec![format!("Total messages: {}", records.len())];
    for (category, stats) in Journal::stats(records) {
        lines.push(format!(
            "  {}: {} delivered, {} failed, {} alert(s)",
            category, stats.delivered, stats.failed, stats.sections
        ));
    }
    lines.join("\n")
}

fn format_record(record: &NotificationRecord) -> String {
    let status = if record.delivered { "sent" } else { "FAILED" };
    let first_line = record
        .content
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("> ");
    format!(
        "  {} | {:<8} | {:<6} | {} alert(s) | {}",
        record.sent_at.format("%Y-%m-%d %H:%M"),
        record.category,
        status,
        record.sections,
        first_line
    )
}

pub fn run(stats: bool) -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let records = Journal::new(paths.journal_file()).load()?;

    if records.is_empty() {
        println!("No notification history");
        return Ok(());
    }

    if stats {
        println!("{}", compute_stats(&records));
        return Ok(());
    }

    let recent: Vec<_> = records.iter().rev().take(RECENT_LIMIT).collect();
    println!("Recent Notifications (last {})", recent.len());
    println!("==============================");
    for record in recent {
        println!("{}", format_record(record));
        if let Some(error) = &record.error {
            println!("      error: {}", error);
        }
    }
    Ok(())
}
