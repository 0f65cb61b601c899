//! Plain-text rendering of the board and of import results.

use minijinja::Environment;
use serde::Serialize;
use thiserror::Error;

use super::{Board, avatar_initial, format_date_range};
use crate::import::{ImportSummary, ParseResult};
use crate::tracker::domain::{AppUser, Task};

/// Template rendering failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render {template}: {reason}")]
pub struct RenderError {
    /// Template name.
    pub template: &'static str,
    /// Engine message.
    pub reason: String,
}

const BOARD_TEMPLATE: &str = "\
{{ title }}
{% for column in columns %}
== {{ column.label }} ({{ column.count }} task(s)) ==
{% for card in column.cards -%}
[{{ card.initial }}] {{ card.title }}
{%- if card.labels %} | {{ card.labels }}{% endif %}
{%- if card.dates %} | {{ card.dates }}{% endif %}
{%- if card.assignee %} | @{{ card.assignee }}{% endif %}
{% else -%}
(empty)
{% endfor -%}
{% endfor -%}
";

const PREVIEW_TEMPLATE: &str = "\
Preview: {{ tasks }} task(s), {{ sprints }} sprint(s): {{ names }}
{%- if warnings %}
Warnings: {{ warnings }}
{%- endif %}
";

const SUMMARY_TEMPLATE: &str = "\
{%- if sprints_created > 0 %}Created {{ sprints_created }} sprint(s).
{% endif -%}
{%- if tasks_created > 0 %}Created {{ tasks_created }} task(s).
{% endif -%}
{%- if errors %}Errors: {{ errors }}
{% endif -%}
";

#[derive(Serialize)]
struct CardContext {
    title: String,
    initial: String,
    labels: String,
    dates: String,
    assignee: String,
}

#[derive(Serialize)]
struct ColumnContext {
    label: &'static str,
    count: usize,
    cards: Vec<CardContext>,
}

#[derive(Serialize)]
struct BoardContext {
    title: String,
    columns: Vec<ColumnContext>,
}

#[derive(Serialize)]
struct PreviewContext {
    tasks: usize,
    sprints: usize,
    names: String,
    warnings: String,
}

#[derive(Serialize)]
struct SummaryContext {
    sprints_created: usize,
    tasks_created: usize,
    errors: String,
}

fn render<S: Serialize>(
    name: &'static str,
    template: &str,
    context: S,
) -> Result<String, RenderError> {
    Environment::new()
        .render_str(template, context)
        .map_err(|error| RenderError {
            template: name,
            reason: error.to_string(),
        })
}

fn card(task: &Task, users: &[AppUser]) -> CardContext {
    let assignee = task
        .assigned_to()
        .and_then(|id| users.iter().find(|user| &user.id == id))
        .map(|user| user.label().to_owned())
        .unwrap_or_default();
    let labels = [task.module(), task.role(), task.priority()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");
    CardContext {
        title: task.title().to_owned(),
        initial: avatar_initial(&assignee),
        labels,
        dates: format_date_range(task.start_date(), task.end_date()),
        assignee,
    }
}

/// Renders the board under `title`, resolving assignees against `users`.
///
/// # Errors
///
/// Returns [`RenderError`] when the template engine fails.
pub fn render_board(title: &str, board: &Board, users: &[AppUser]) -> Result<String, RenderError> {
    let columns = board
        .columns()
        .iter()
        .map(|column| ColumnContext {
            label: column.label(),
            count: column.len(),
            cards: column.tasks().iter().map(|task| card(task, users)).collect(),
        })
        .collect();
    render(
        "board",
        BOARD_TEMPLATE,
        BoardContext {
            title: title.to_owned(),
            columns,
        },
    )
}

/// Renders the pre-import summary line and warnings.
///
/// # Errors
///
/// Returns [`RenderError`] when the template engine fails.
pub fn render_import_preview(parsed: &ParseResult) -> Result<String, RenderError> {
    let names = if parsed.sprint_names.is_empty() {
        "(none)".to_owned()
    } else {
        parsed.sprint_names.join(", ")
    };
    render(
        "import preview",
        PREVIEW_TEMPLATE,
        PreviewContext {
            tasks: parsed.rows.len(),
            sprints: parsed.sprint_names.len(),
            names,
            warnings: parsed.error_messages().join(" "),
        },
    )
}

/// Renders the post-import counts and warnings.
///
/// # Errors
///
/// Returns [`RenderError`] when the template engine fails.
pub fn render_import_summary(summary: &ImportSummary) -> Result<String, RenderError> {
    let errors: Vec<String> = summary.errors.iter().map(ToString::to_string).collect();
    render(
        "import summary",
        SUMMARY_TEMPLATE,
        SummaryContext {
            sprints_created: summary.sprints_created,
            tasks_created: summary.tasks_created,
            errors: errors.join(" "),
        },
    )
}
