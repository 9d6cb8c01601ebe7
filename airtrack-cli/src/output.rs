//! Rendering of command results on stdout

use airtrack_core::core_store::model::Entity;
use airtrack_core::core_store::query::DashboardStats;
use anyhow::Result;
use serde::Serialize;

/// Human-readable lines, or pretty JSON with `--json`
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Output { json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    pub fn records<T: Entity>(&self, records: &[T]) -> Result<()> {
        if self.json {
            return self.json_value(&records);
        }
        if records.is_empty() {
            println!("(none)");
        }
        for record in records {
            println!("{}", record_line(record));
        }
        Ok(())
    }

    pub fn record<T: Entity>(&self, record: &T) -> Result<()> {
        if self.json {
            return self.json_value(record);
        }
        println!("{}", record_line(record));
        Ok(())
    }

    /// Always JSON: a single record is easiest to read in full that way
    pub fn detail<T: Serialize>(&self, value: &T) -> Result<()> {
        self.json_value(value)
    }

    pub fn dashboard(&self, stats: &DashboardStats) -> Result<()> {
        if self.json {
            return self.json_value(stats);
        }
        println!("Total airdrops:     {}", stats.total_airdrops);
        println!("Completed airdrops: {}", stats.completed_airdrops);
        println!("Active testnets:    {}", stats.active_testnets);
        println!("Daily tasks:        {}", stats.daily_tasks);
        println!("Progress:           {}%", stats.progress_percentage);
        Ok(())
    }

    /// Plain text for humans, `value` for `--json`
    pub fn message(&self, text: &str, value: serde_json::Value) -> Result<()> {
        if self.json {
            return self.json_value(&value);
        }
        println!("{}", text);
        Ok(())
    }

    fn json_value<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

fn record_line<T: Entity>(record: &T) -> String {
    let pin = if record.pinned() { "*" } else { " " };
    let status = match record.completed() {
        Some(true) => "[x] ",
        Some(false) => "[ ] ",
        None => "",
    };
    format!(
        "{} {}{}  {}  ({})",
        pin,
        status,
        record.id(),
        record.title(),
        record.category()
    )
}
