//! Panel rendering for the terminal host
//!
//! Two output formats: colored plain text, or the markup fragments a web
//! page would insert (`<span class="badge …">`, `<pre class="mono">`, …).

use notary_common::theme::Theme;

use crate::presenter::{DetailPanel, ResultPanel, StatusBadge, StatusKind};

/// Output format for rendered panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Markup,
}

/// Minimal HTML escaping for text placed inside markup
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `<span class="badge {kind}">{text}</span>`, or `""` for no badge
pub fn badge_markup(badge: Option<&StatusBadge>) -> String {
    match badge {
        Some(b) if !b.text.is_empty() => format!(
            r#"<span class="badge {}">{}</span>"#,
            b.kind.as_str(),
            escape_html(&b.text)
        ),
        _ => String::new(),
    }
}

pub fn detail_markup(detail: &DetailPanel) -> String {
    match detail {
        DetailPanel::Empty => String::new(),
        DetailPanel::Json(value) => format!(r#"<pre class="mono">{}</pre>"#, escape_html(&pretty(value))),
        DetailPanel::Text(text) => format!(r#"<pre class="mono">{}</pre>"#, escape_html(text)),
        DetailPanel::Rows(rows) => rows
            .iter()
            .map(|(label, value)| {
                format!(
                    r#"<div class="kv"><div class="muted">{}</div><div class="mono">{}</div></div>"#,
                    escape_html(label),
                    escape_html(value)
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn pretty(value: &serde_json::Value) -> String {
    // Serializing a `Value` cannot fail
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// ANSI palette per theme
fn color_code(theme: Theme, kind: StatusKind) -> &'static str {
    match (theme, kind) {
        (Theme::Light, StatusKind::Ok) => "32",
        (Theme::Light, StatusKind::Warn) => "33",
        (Theme::Light, StatusKind::Err) => "31",
        (Theme::Dark, StatusKind::Ok) => "92",
        (Theme::Dark, StatusKind::Warn) => "93",
        (Theme::Dark, StatusKind::Err) => "91",
    }
}

/// Renders panels in the chosen format and theme
#[derive(Debug, Clone)]
pub struct PanelRenderer {
    format: OutputFormat,
    theme: Theme,
    color: bool,
}

impl PanelRenderer {
    pub fn new(format: OutputFormat, theme: Theme, color: bool) -> Self {
        Self {
            format,
            theme,
            color,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Panel as text; empty string for a cleared panel
    pub fn render(&self, panel: &ResultPanel) -> String {
        match self.format {
            OutputFormat::Markup => [badge_markup(panel.status.as_ref()), detail_markup(&panel.detail)]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Text => {
                let mut lines = Vec::new();
                if let Some(badge) = &panel.status {
                    lines.push(self.badge_text(badge));
                }
                match &panel.detail {
                    DetailPanel::Empty => {}
                    DetailPanel::Json(value) => lines.push(pretty(value)),
                    DetailPanel::Text(text) => lines.push(text.clone()),
                    DetailPanel::Rows(rows) => {
                        let width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
                        lines.extend(
                            rows.iter()
                                .map(|(label, value)| format!("{:<width$}  {}", label, value, width = width)),
                        );
                    }
                }
                lines.join("\n")
            }
        }
    }

    fn badge_text(&self, badge: &StatusBadge) -> String {
        let tag = format!("[{}]", badge.kind.as_str());
        if self.color {
            format!(
                "\x1b[{}m{}\x1b[0m {}",
                color_code(self.theme, badge.kind),
                tag,
                badge.text
            )
        } else {
            format!("{} {}", tag, badge.text)
        }
    }
}
