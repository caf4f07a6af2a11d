use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    // Calculate column widths
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    // Print header
    let header_row: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
        .collect();
    println!("{}", header_row.join("  "));

    // Print separator
    let sep: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep.join("  "));

    // Print rows
    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = w)
            })
            .collect();
        println!("{}", cells.join("  "));
    }
}

// ---------------------------------------------------------------------------
// Alfred script filter
// ---------------------------------------------------------------------------

/// One row in an Alfred result list. `arg` is what Alfred hands to the next
/// action when the row is picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlfredItem {
    pub title: String,
    pub subtitle: String,
    pub arg: String,
    pub valid: bool,
}

impl AlfredItem {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>, arg: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            arg: arg.into(),
            valid: true,
        }
    }

    /// A row that shows a message but cannot be actioned.
    pub fn message(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            valid: false,
            ..Self::new(title, subtitle, "")
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AlfredOutput {
    pub items: Vec<AlfredItem>,
}

pub fn print_alfred(item: AlfredItem) -> anyhow::Result<()> {
    let out = AlfredOutput { items: vec![item] };
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}
