//! Terminal rendering of the view state.
//!
//! [`render`] turns a [`ViewState`] plus the current [`FormDraft`] into the
//! text page shown after every action. [`Spinner`] animates on stderr while a
//! round trip is pending.

use std::future::Future;
use std::time::Duration;

use chrono::Local;
use console::{Alignment, Style, measure_text_width, pad_str};
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::{FormDraft, Record};
use crate::controller::ViewState;

/// Page title, first line of every render.
pub const TITLE: &str = "Users Demo";
/// Placeholder shown in place of the table when there are no records.
pub const EMPTY_LIST: &str = "No users found. Add some users to get started!";
// Local-time layout for the `Created At` column.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
// Table columns, in display order.
const HEADERS: [&str; 4] = ["ID", "Name", "Email", "Created At"];

/// Renders the whole page as a string.
///
/// Sections appear in a fixed order: title, message banner (only when the
/// last action reported something), the add-user form, then the list. While
/// any action is in flight the submit label reads `Adding...` and the list
/// is preceded by `Loading...`.
pub fn render(state: &ViewState, draft: &FormDraft) -> String {
    // Section headings.
    let heading = Style::new().bold().underlined();
    // Outcome of the last action.
    let banner = Style::new().green();
    // Placeholder text for empty form fields.
    let dim = Style::new().dim();

    let mut out = String::new();
    out.push_str(&format!("{}\n", heading.apply_to(TITLE)));
    if !state.message.is_empty() {
        out.push_str(&format!("{}\n", banner.apply_to(&state.message)));
    }

    out.push('\n');
    out.push_str(&format!("{}\n", heading.apply_to("Add New User")));
    out.push_str(&format!("  Name:  {}\n", field_value(&draft.name, "Name", &dim)));
    out.push_str(&format!("  Email: {}\n", field_value(&draft.email, "Email", &dim)));
    let button = if state.busy() { "Adding..." } else { "Add User" };
    out.push_str(&format!("  [{button}]\n"));

    out.push('\n');
    out.push_str(&format!("{}\n", heading.apply_to("Users List")));
    if state.busy() {
        out.push_str("Loading...\n");
    }
    if state.records.is_empty() {
        out.push_str(EMPTY_LIST);
        out.push('\n');
    } else {
        out.push_str(&render_table(&state.records));
    }
    out
}

fn field_value(value: &str, placeholder: &str, dim: &Style) -> String {
    if value.is_empty() {
        dim.apply_to(placeholder).to_string()
    } else {
        value.to_string()
    }
}

// `-` when the server did not send a usable timestamp.
fn created_at(record: &Record) -> String {
    record
        .created_at
        .map(|ts| ts.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn render_table(records: &[Record]) -> String {
    let rows: Vec<[String; 4]> = records
        .iter()
        .map(|r| [r.id.to_string(), r.name.clone(), r.email.clone(), created_at(r)])
        .collect();

    let mut widths = HEADERS.map(measure_text_width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(measure_text_width(cell));
        }
    }

    let line = |cells: &[&str]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| pad_str(cell, width, Alignment::Left, None).into_owned())
            .collect();
        format!("{}\n", padded.join(" | ").trim_end())
    };

    let mut out = line(&HEADERS);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("{}\n", rule.join("-+-")));
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&line(&cells));
    }
    out
}

/// Spinner shown on stderr while a round trip is pending.
///
/// indicatif hides it when stderr is not a terminal, so piped output stays
/// clean.
pub struct Spinner {
    // indicatif spinner; drawn on stderr.
    pb: ProgressBar,
}

impl Spinner {
    /// Starts the spinner with `label` and ticks it every 100ms.
    pub fn start(label: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(label.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    /// Stops the spinner and erases its line.
    pub fn finish(self) {
        self.pb.finish_and_clear();
    }
}

/// Runs `fut` with a spinner labelled `label`.
pub async fn with_spinner<F: Future>(label: &str, fut: F) -> F::Output {
    let spinner = Spinner::start(label);
    let output = fut.await;
    spinner.finish();
    output
}
