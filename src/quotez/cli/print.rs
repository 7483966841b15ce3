use chrono::{Local, TimeZone};
use colored::Colorize;
use quotez::api::{CmdMessage, MessageLevel};
use quotez::model::{DisplayQuote, SavedQuote};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MAX_LINE_WIDTH: usize = 100;
const MIN_LINE_WIDTH: usize = 40;
const INDEX_WIDTH: usize = 5;
const SAVED_MARKER: &str = "★";
const DIVIDER: &str = "────────────────────────────────";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_quotes(quotes: &[DisplayQuote]) {
    print!("{}", render_quotes(quotes, line_width()));
}

pub(super) fn print_saved(quotes: &[SavedQuote]) {
    print!("{}", render_saved(quotes, line_width()));
}

pub(super) fn print_lines(lines: &[String], empty_message: &str) {
    if lines.is_empty() {
        println!("{}", empty_message.dimmed());
        return;
    }
    for line in lines {
        println!("{}", line);
    }
}

fn line_width() -> usize {
    console::Term::stdout()
        .size_checked()
        .map(|(_, cols)| cols as usize)
        .unwrap_or(MAX_LINE_WIDTH)
        .clamp(MIN_LINE_WIDTH, MAX_LINE_WIDTH)
}

pub(super) fn render_quotes(quotes: &[DisplayQuote], width: usize) -> String {
    let mut out = String::new();
    let body_width = width.saturating_sub(INDEX_WIDTH);
    let indent = " ".repeat(INDEX_WIDTH);

    for dq in quotes {
        let idx = format!("{:>3}. ", dq.index);
        let idx = format!("{:<width$}", idx, width = INDEX_WIDTH);
        let lines = wrap(&format!("“{}”", dq.quote.content), body_width);

        for (i, line) in lines.iter().enumerate() {
            let prefix = if i == 0 {
                idx.yellow().to_string()
            } else {
                indent.clone()
            };
            out.push_str(&format!("{}{}\n", prefix, line.italic()));
        }

        let mut byline = format!("{}— {}", indent, dq.quote.author.bold());
        if dq.is_saved {
            byline.push_str(&format!("  {}", format!("{} saved", SAVED_MARKER).green()));
        }
        out.push_str(&byline);
        out.push_str("\n\n");
    }
    out
}

pub(super) fn render_saved(quotes: &[SavedQuote], width: usize) -> String {
    if quotes.is_empty() {
        return format!(
            "{}\n",
            "No saved quotes yet. Start saving some quotes!".dimmed()
        );
    }

    let mut out = String::new();
    for (i, record) in quotes.iter().enumerate() {
        if i > 0 {
            out.push_str(&format!("{}\n", DIVIDER.dimmed()));
        }
        for line in wrap(&format!("“{}”", record.quote), width) {
            out.push_str(&format!("{}\n", line.italic()));
        }
        out.push_str(&format!("— {}\n", record.author.bold()));

        let saved_on = match format_saved_age(record) {
            Some(age) => format!("Saved on: {} ({})", record.date_saved, age),
            None => format!("Saved on: {}", record.date_saved),
        };
        out.push_str(&format!("{}\n", saved_on.dimmed()));
    }
    out
}

fn format_saved_age(record: &SavedQuote) -> Option<String> {
    let naive = record.saved_at()?;
    let saved = Local.from_local_datetime(&naive).earliest()?;
    let elapsed = Local::now().signed_duration_since(saved);
    Some(Formatter::new().convert(elapsed.to_std().unwrap_or_default()))
}

/// Greedy word wrap by display width. Words wider than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.width()
        } else {
            current.width() + 1 + word.width()
        };

        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if word.width() <= width {
            current.push_str(word);
            continue;
        }

        let mut current_width = 0;
        for c in word.chars() {
            let char_width = c.width().unwrap_or(0);
            if current_width + char_width > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(c);
            current_width += char_width;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
