//! `securevault audit` — display the audit log.
//!
//! Usage:
//!   securevault audit               # show last 50 entries
//!   securevault audit --last 20     # show last 20
//!   securevault audit --since 7d    # entries from last 7 days

use chrono::Utc;

use crate::audit::AuditEntry;
use crate::cli::Cli;
use crate::errors::{Result, VaultError};

/// Execute the `audit` command.
#[cfg(feature = "audit-log")]
pub fn execute(cli: &Cli, last: usize, since: Option<&str>) -> Result<()> {
    use crate::audit::AuditLog;
    use crate::cli::output;

    let since_dt = match since {
        Some(s) => Some(parse_duration(s)?),
        None => None,
    };

    let data_dir = crate::cli::data_dir(cli)?;

    if !crate::audit::db_path(&data_dir).exists() {
        output::info("No audit entries found.");
        return Ok(());
    }

    let audit = AuditLog::open(&data_dir)
        .ok_or_else(|| VaultError::AuditError("failed to open audit database".into()))?;

    let entries = audit.query(last, since_dt)?;

    if entries.is_empty() {
        output::info("No audit entries found.");
        return Ok(());
    }

    print_audit_table(&entries);

    Ok(())
}

#[cfg(not(feature = "audit-log"))]
pub fn execute(cli: &Cli, last: usize, since: Option<&str>) -> Result<()> {
    let _ = (cli, last, since);
    Err(VaultError::AuditError(
        "audit log not compiled — rebuild with `cargo build --features audit-log`".into(),
    ))
}

/// Parse a human-friendly duration string like "7d", "24h", "30m".
#[cfg_attr(not(feature = "audit-log"), allow(dead_code))]
fn parse_duration(input: &str) -> Result<chrono::DateTime<Utc>> {
    let input = input.trim();

    let (num_str, unit) = if let Some(s) = input.strip_suffix('d') {
        (s, 'd')
    } else if let Some(s) = input.strip_suffix('h') {
        (s, 'h')
    } else if let Some(s) = input.strip_suffix('m') {
        (s, 'm')
    } else {
        return Err(VaultError::CommandFailed(format!(
            "invalid duration '{input}' — use format like 7d, 24h, or 30m"
        )));
    };

    let num: i64 = num_str.parse().map_err(|_| {
        VaultError::CommandFailed(format!(
            "invalid duration '{input}' — number part is not valid"
        ))
    })?;

    if num < 0 {
        return Err(VaultError::CommandFailed(format!(
            "invalid duration '{input}' — must not be negative"
        )));
    }

    let duration = match unit {
        'd' => chrono::Duration::try_days(num),
        'h' => chrono::Duration::try_hours(num),
        _ => chrono::Duration::try_minutes(num),
    };

    duration
        .and_then(|d| Utc::now().checked_sub_signed(d))
        .ok_or_else(|| VaultError::CommandFailed("duration out of range".into()))
}

/// Print audit entries in a formatted table.
#[cfg_attr(not(feature = "audit-log"), allow(dead_code))]
pub fn print_audit_table(entries: &[AuditEntry]) {
    use comfy_table::{ContentArrangement, Table};
    use console::style;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Operation", "Item", "Details"]);

    for entry in entries {
        let time = entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
        let op = colorize_operation(&entry.operation);
        let item = entry.item_id.as_deref().unwrap_or("-");
        let details = entry.details.as_deref().unwrap_or("-");

        table.add_row(vec![time, op, item.to_string(), details.to_string()]);
    }

    println!(
        "{}",
        style(format!("{} audit entries:", entries.len())).bold()
    );
    println!("{table}");
}

/// Colorize operation names for display.
#[cfg_attr(not(feature = "audit-log"), allow(dead_code))]
fn colorize_operation(op: &str) -> String {
    use console::style;

    match op {
        "add" | "upload" | "user-register" => style(op).green().to_string(),
        "update" | "download" => style(op).blue().to_string(),
        "delete" => style(op).red().to_string(),
        "encrypt" | "decrypt" => style(op).yellow().to_string(),
        "export" | "import" => style(op).cyan().to_string(),
        "user-login" => style(op).magenta().to_string(),
        _ => op.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_days() {
        let dt = parse_duration("7d").unwrap();
        let diff = Utc::now() - dt;
        assert!((diff.num_days() - 7).abs() <= 1);
    }

    #[test]
    fn parse_duration_hours_and_minutes() {
        let diff = Utc::now() - parse_duration("24h").unwrap();
        assert!((diff.num_hours() - 24).abs() <= 1);

        let diff = Utc::now() - parse_duration("30m").unwrap();
        assert!((diff.num_minutes() - 30).abs() <= 1);
    }

    #[test]
    fn parse_duration_rejects_bad_input() {
        assert!(parse_duration("7").is_err());
        assert!(parse_duration("7w").is_err());
        assert!(parse_duration("d").is_err());
    }

    #[test]
    fn parse_duration_rejects_out_of_range_and_negative() {
        for input in ["9999999999999d", "9223372036854775807h", "-7d", "-1m"] {
            assert!(
                matches!(parse_duration(input), Err(VaultError::CommandFailed(_))),
                "{input} should be rejected"
            );
        }
        assert!(parse_duration("0d").is_ok());
    }

    #[test]
    fn colorize_operation_returns_string() {
        assert!(!colorize_operation("encrypt").is_empty());
        assert!(!colorize_operation("unknown").is_empty());
    }

    #[cfg(feature = "audit-log")]
    #[test]
    fn audit_with_since_filter() {
        use crate::audit::AuditLog;

        let dir = tempfile::TempDir::new().unwrap();
        let audit = AuditLog::open(dir.path()).unwrap();

        audit.log("add", Some("abc"), None);

        let since = parse_duration("1h").unwrap();
        assert_eq!(audit.query(10, Some(since)).unwrap().len(), 1);
    }
}
