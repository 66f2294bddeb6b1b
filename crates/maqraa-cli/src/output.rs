//! Plain-text table output

use std::fmt::Display;

use unicode_width::UnicodeWidthStr;

/// Render rows as aligned columns under a header line.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.width());
            }
        }
    }

    let mut out = String::new();
    render_row(&mut out, headers.iter().map(|h| (*h).to_string()), &widths);
    for row in rows {
        render_row(&mut out, row.iter().cloned(), &widths);
    }
    out
}

fn render_row(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize]) {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        let width = widths.get(i).copied().unwrap_or(0);
        out.push_str(&cell);
        // pad by display width, not char count
        for _ in cell.width()..width {
            out.push(' ');
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}

pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

/// `-` for absent optional fields
pub fn opt<T: Display>(value: Option<&T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}

pub fn yes_no(value: Option<bool>) -> String {
    match value {
        Some(true) => "yes".to_string(),
        Some(false) => "no".to_string(),
        None => "-".to_string(),
    }
}

/// Footer printed under every paged listing.
pub fn page_footer(shown: usize, total: u64, page: u64) {
    println!("\n{shown} of {total} (page {page})");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_align_to_widest_cell() {
        let out = render_table(
            &["ID", "Name"],
            &[
                vec!["1".to_string(), "Ahmad".to_string()],
                vec!["120".to_string(), "Nur".to_string()],
            ],
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID   Name");
        assert_eq!(lines[1], "1    Ahmad");
        assert_eq!(lines[2], "120  Nur");
    }

    #[test]
    fn wide_characters_pad_by_display_width() {
        let out = render_table(
            &["Name", "Role"],
            &[vec!["أحمد".to_string(), "student".to_string()]],
        );
        // header and row both end flush on the last column
        for line in out.lines() {
            assert!(!line.ends_with(' '));
        }
    }

    #[test]
    fn optional_formatting() {
        assert_eq!(opt(Some(&7)), "7");
        assert_eq!(opt::<i64>(None), "-");
        assert_eq!(yes_no(Some(true)), "yes");
        assert_eq!(yes_no(None), "-");
    }
}
