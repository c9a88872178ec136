//! Fixed-width process table

use crate::core::record::ProcessRecord;

pub const PID_WIDTH: usize = 8;
pub const NAME_WIDTH: usize = 35;
pub const MEMORY_WIDTH: usize = 12;

pub const EMPTY_MESSAGE: &str = "No processes found.";

/// ANSI: erase display, cursor to top-left
pub const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Render records (already in display order) as a table.
///
/// Returns [`EMPTY_MESSAGE`] on its own line when there is nothing to show.
pub fn render_table<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a ProcessRecord>,
{
    let mut rows = records.into_iter().peekable();
    if rows.peek().is_none() {
        return format!("{}\n", EMPTY_MESSAGE);
    }

    let mut out = format!(
        "{:<pid$}{:<name$}{:>mem$}\n{}\n",
        "PID",
        "Process Name",
        "Memory",
        "-".repeat(PID_WIDTH + NAME_WIDTH + MEMORY_WIDTH),
        pid = PID_WIDTH,
        name = NAME_WIDTH,
        mem = MEMORY_WIDTH,
    );

    for record in rows {
        out.push_str(&render_row(record));
        out.push('\n');
    }
    out
}

pub fn render_row(record: &ProcessRecord) -> String {
    format!(
        "{:<pid$}{:<name$}{:>mem$} KB",
        record.pid,
        fit_name(&record.name),
        record.memory_kb(),
        pid = PID_WIDTH,
        name = NAME_WIDTH,
        mem = MEMORY_WIDTH,
    )
}

/// Cut at a char boundary, leaving one column of padding.
fn fit_name(name: &str) -> &str {
    match name.char_indices().nth(NAME_WIDTH - 1) {
        Some((cut, _)) => &name[..cut],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table() {
        let none: Vec<ProcessRecord> = Vec::new();
        assert_eq!(render_table(&none), "No processes found.\n");
    }

    #[test]
    fn test_header_and_rows() {
        let records = [
            ProcessRecord::new(20, "browser", 2048 * 1024),
            ProcessRecord::new(5, "shell", 1500),
        ];
        let table = render_table(&records);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("PID     Process Name"));
        assert!(lines[0].ends_with("      Memory"));
        assert_eq!(lines[1], "-".repeat(55));
        assert_eq!(
            lines[2],
            format!("{:<8}{:<35}{:>12} KB", 20, "browser", 2048)
        );
        // 1500 / 1024 truncates to 1
        assert!(lines[3].ends_with(&format!("{:>12} KB", 1)));
    }

    #[test]
    fn test_long_names_are_truncated() {
        let long = "x".repeat(60);
        let row = render_row(&ProcessRecord::new(1, long, 4096));
        assert_eq!(row.len(), PID_WIDTH + NAME_WIDTH + MEMORY_WIDTH + 3);
        assert_eq!(&row[PID_WIDTH..PID_WIDTH + NAME_WIDTH], format!("{} ", "x".repeat(34)));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let name = "é".repeat(40);
        assert_eq!(fit_name(&name).chars().count(), NAME_WIDTH - 1);
        assert_eq!(fit_name("short.exe"), "short.exe");
    }
}
