//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::{VaultItem, VaultStats};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// "tier N" for encrypted items, "-" otherwise.
fn level_label(item: &VaultItem) -> String {
    if item.encrypted {
        format!("tier {}", item.level)
    } else {
        "-".to_string()
    }
}

/// Print a table of items (ID, Name, Type, Category, Encrypted, Modified).
pub fn print_items_table(items: &[VaultItem]) {
    if items.is_empty() {
        info("No items found.");
        tip("Run `securevault add <NAME>` to add your first item.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Name", "Type", "Category", "Encrypted", "Modified"]);

    for item in items {
        table.add_row(vec![
            item.id.clone(),
            item.name.clone(),
            item.item_type.to_string(),
            item.category.clone(),
            level_label(item),
            item.modified.format(TIME_FORMAT).to_string(),
        ]);
    }

    println!("{table}");
}

/// Print every field of one item.  Encrypted content is shown as its envelope.
pub fn print_item(item: &VaultItem) {
    println!("{} {}", style("Name:").bold(), item.name);
    println!("{} {}", style("ID:").bold(), item.id);
    println!("{} {}", style("Type:").bold(), item.item_type);
    if !item.category.is_empty() {
        println!("{} {}", style("Category:").bold(), item.category);
    }
    if !item.tags.is_empty() {
        println!("{} {}", style("Tags:").bold(), item.tags.join(", "));
    }
    println!("{} {}", style("Encrypted:").bold(), level_label(item));
    println!(
        "{} {}",
        style("Created:").bold(),
        item.created.format(TIME_FORMAT)
    );
    println!(
        "{} {}",
        style("Modified:").bold(),
        item.modified.format(TIME_FORMAT)
    );
    println!();
    println!("{}", item.content);
}

/// Print collection statistics.
pub fn print_stats(stats: &VaultStats) {
    println!(
        "{} {} item(s), {} encrypted",
        style("Vault:").bold(),
        stats.total_items,
        stats.encrypted_items
    );

    let mut by_type = Table::new();
    by_type.set_content_arrangement(ContentArrangement::Dynamic);
    by_type.set_header(vec!["Type", "Items"]);
    for (kind, count) in &stats.by_type {
        by_type.add_row(vec![kind.clone(), count.to_string()]);
    }
    println!("{by_type}");

    let mut by_level = Table::new();
    by_level.set_content_arrangement(ContentArrangement::Dynamic);
    by_level.set_header(vec!["Tier", "Items"]);
    for (level, count) in &stats.by_level {
        by_level.add_row(vec![level.to_string(), count.to_string()]);
    }
    println!("{by_level}");

    if !stats.categories.is_empty() {
        let mut by_category = Table::new();
        by_category.set_content_arrangement(ContentArrangement::Dynamic);
        by_category.set_header(vec!["Category", "Items"]);
        for (category, count) in &stats.categories {
            let label = if category.is_empty() {
                style("(none)").dim().to_string()
            } else {
                category.clone()
            };
            by_category.add_row(vec![label, count.to_string()]);
        }
        println!("{by_category}");
    }
}
