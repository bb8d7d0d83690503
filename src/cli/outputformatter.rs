//! ASCII table rendering for list results in the console.

use terminal_size::{terminal_size, Width};

// Hard cap per column to keep output readable on wide terminals.
const MAX_COL_WIDTH: usize = 60;

/// Render headers plus rows as an ASCII table with a footer summary line.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        println!("(no rows)");
        return;
    }

    let cap = column_cap(headers.len());
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count().min(cap)).collect();
    for r in rows {
        for (i, cell) in r.iter().enumerate().take(headers.len()) {
            let w = display_len(cell);
            if w > widths[i] {
                widths[i] = w.min(cap);
            }
        }
    }

    let sep = build_separator(&widths);
    println!("{}", sep);
    println!("{}", build_row(&headers.iter().map(|h| h.to_string()).collect::<Vec<_>>(), &widths));
    println!("{}", sep);
    for r in rows {
        println!("{}", build_row(r, &widths));
    }
    println!("{}", sep);
    println!("rows: {}", rows.len());
}

/// Footer for paginated lists.
pub fn print_page_info(current: u32, total: u32) {
    println!("page {} of {}", current, total.max(1));
}

// Divide the terminal width across columns, bounded by MAX_COL_WIDTH.
fn column_cap(cols: usize) -> usize {
    let term = terminal_size().map(|(Width(w), _)| w as usize).unwrap_or(120);
    let per_col = term.saturating_sub(cols * 3 + 1) / cols.max(1);
    per_col.clamp(8, MAX_COL_WIDTH)
}

fn display_len(s: &str) -> usize {
    s.chars().count()
}

fn build_separator(widths: &[usize]) -> String {
    let mut s = String::new();
    s.push('+');
    for w in widths {
        s.push_str(&"-".repeat(*w + 2));
        s.push('+');
    }
    s
}

fn build_row(cells: &[String], widths: &[usize]) -> String {
    let mut s = String::new();
    s.push('|');
    for (i, w) in widths.iter().enumerate() {
        let cell = cells.get(i).cloned().unwrap_or_default();
        let text = truncate(&cell, *w);
        s.push(' ');
        if is_numeric_like(&cell) {
            let pad = w.saturating_sub(display_len(&text));
            s.push_str(&" ".repeat(pad));
            s.push_str(&text);
        } else {
            s.push_str(&text);
            let pad = w.saturating_sub(display_len(&text));
            s.push_str(&" ".repeat(pad));
        }
        s.push(' ');
        s.push('|');
    }
    s
}

fn truncate(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max {
        return s.to_string();
    }
    if max <= 1 {
        return "…".to_string();
    }
    s.chars().take(max - 1).collect::<String>() + "…"
}

fn is_numeric_like(s: &str) -> bool {
    // crude detection for aligning numbers to the right
    let st = s.trim();
    if st.is_empty() {
        return false;
    }
    let mut has_digit = false;
    for ch in st.chars() {
        if ch.is_ascii_digit() {
            has_digit = true;
            continue;
        }
        if ".-+eE,_".contains(ch) {
            continue;
        }
        return false;
    }
    has_digit
}
