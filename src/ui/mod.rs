//! Server-rendered pages. Each view builds its body as a string and wraps it
//! in the shared layout with the navigation bar.

mod chart;
mod confirm;
mod detail;
mod form;
mod gallery;
mod list;

use chart::render_weekly_chart;
pub use confirm::{render_confirm, ConfirmKind};
pub use detail::{render_detail, render_notice};
pub use form::{render_form, FormPage};
pub use gallery::render_gallery;
pub use list::{render_list, ListPage};

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    List,
    Gallery,
    Add,
    None,
}

pub fn layout(title: &str, nav: Nav, body: &str) -> String {
    let link = |href: &str, label: &str, current: bool| {
        let class = if current { " class=\"current\"" } else { "" };
        format!(r#"<a href="{href}"{class}>{label}</a>"#)
    };

    let mut page = String::with_capacity(LAYOUT_HEAD.len() + body.len() + 512);
    page.push_str(LAYOUT_HEAD);
    page.push_str("<title>");
    page.push_str(&escape(title));
    page.push_str(" | Learning Plans</title>\n");
    page.push_str(LAYOUT_STYLE);
    page.push_str("</head>\n<body>\n<nav class=\"shell\">\n  <span class=\"brand\">Learning Plans</span>\n  ");
    page.push_str(&link("/", "Plans", nav == Nav::List));
    page.push_str("\n  ");
    page.push_str(&link("/gallery", "Gallery", nav == Nav::Gallery));
    page.push_str("\n  ");
    page.push_str(&link("/plans/new", "+ Add Plan", nav == Nav::Add));
    page.push_str("\n</nav>\n<main class=\"app\">\n");
    page.push_str(body);
    page.push_str("\n</main>\n</body>\n</html>\n");
    page
}

pub fn banner(message: &str) -> String {
    format!(r#"<div class="banner" role="alert">{}</div>"#, escape(message))
}

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `Mar 20, 2024`; a dash when the plan has no date.
pub fn short_date(date: Option<NaiveDate>) -> String {
    date.map(|date| date.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn plan_path(id: &str) -> String {
    format!("/plans/{}", crate::models::encode_component(id))
}

fn priority_class(level: &str) -> &'static str {
    match level {
        "High" => "badge badge-high",
        "Medium" => "badge badge-medium",
        _ => "badge badge-low",
    }
}

fn select_options(options: &[&str], selected: &str) -> String {
    options
        .iter()
        .map(|option| {
            let mark = if *option == selected { " selected" } else { "" };
            format!(
                r#"<option value="{value}"{mark}>{value}</option>"#,
                value = escape(option)
            )
        })
        .collect::<Vec<_>>()
        .join("")
}

const LAYOUT_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
"#;

const LAYOUT_STYLE: &str = r#"  <style>
    :root {
      --bg: #f3f4f6;
      --ink: #1f2937;
      --muted: #6b7280;
      --accent: #4f46e5;
      --danger: #dc2626;
      --ok: #16a34a;
      --card: #ffffff;
      --shadow: 0 10px 30px rgba(31, 41, 55, 0.08);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
    }

    nav.shell {
      display: flex;
      gap: 20px;
      align-items: center;
      padding: 14px 28px;
      background: var(--ink);
    }

    nav.shell a {
      color: #d1d5db;
      text-decoration: none;
      font-weight: 500;
    }

    nav.shell a.current {
      color: #ffffff;
      border-bottom: 2px solid var(--accent);
    }

    .brand {
      color: #ffffff;
      font-weight: 700;
      margin-right: auto;
    }

    .app {
      width: min(1100px, 100%);
      margin: 0 auto;
      padding: 28px 18px 48px;
      display: grid;
      gap: 22px;
    }

    .card {
      background: var(--card);
      border-radius: 12px;
      box-shadow: var(--shadow);
      padding: 20px;
    }

    .banner {
      background: #fee2e2;
      color: #991b1b;
      border-radius: 8px;
      padding: 12px 16px;
    }

    .filters {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: center;
    }

    input, select, textarea {
      border: 1px solid #d1d5db;
      border-radius: 6px;
      padding: 8px 10px;
      font: inherit;
    }

    .invalid {
      border-color: var(--danger);
    }

    .field-error {
      color: var(--danger);
      font-size: 0.875rem;
      margin: 4px 0 0;
    }

    button, .button {
      border: none;
      border-radius: 6px;
      padding: 8px 14px;
      background: var(--accent);
      color: #ffffff;
      font: inherit;
      cursor: pointer;
      text-decoration: none;
      display: inline-block;
    }

    button.link, .link {
      background: none;
      color: var(--accent);
      padding: 0;
    }

    button.danger, .button.danger {
      background: var(--danger);
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th, td {
      text-align: left;
      padding: 10px 8px;
      border-bottom: 1px solid #e5e7eb;
    }

    tr.archived {
      color: #9ca3af;
      font-style: italic;
      background: #f3f4f6;
    }

    td.actions {
      display: flex;
      gap: 10px;
      align-items: center;
    }

    td.actions form {
      margin: 0;
    }

    .badge {
      border-radius: 999px;
      padding: 2px 10px;
      font-size: 0.8rem;
      font-weight: 600;
    }

    .badge-high { background: #fee2e2; color: #991b1b; }
    .badge-medium { background: #fef3c7; color: #92400e; }
    .badge-low { background: #dcfce7; color: #166534; }
    .badge-done { background: #dcfce7; color: #166534; }
    .badge-open { background: #e0e7ff; color: #3730a3; }

    .progress-bar {
      height: 10px;
      background: #e5e7eb;
      border-radius: 999px;
      overflow: hidden;
    }

    .progress-bar span {
      display: block;
      height: 100%;
      background: var(--ok);
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
      gap: 18px;
    }

    .grid .card h3 {
      margin-top: 0;
    }

    .form-grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    label {
      display: block;
      font-weight: 500;
      margin-bottom: 4px;
    }

    .repeat {
      display: flex;
      gap: 8px;
      margin-bottom: 8px;
    }

    .repeat textarea, .repeat input {
      flex: 1;
    }

    .empty {
      text-align: center;
      color: var(--muted);
      padding: 24px;
    }

    svg .bar {
      fill: var(--accent);
    }

    svg .axis {
      stroke: #9ca3af;
    }

    svg .grid-line {
      stroke: #e5e7eb;
      stroke-dasharray: 3 3;
    }

    svg text {
      font-size: 12px;
      fill: var(--muted);
    }
  </style>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn layout_escapes_title_and_marks_current_nav() {
        let page = layout("<Plans>", Nav::Gallery, "<p>body</p>");

        assert!(page.contains("<title>&lt;Plans&gt; | Learning Plans</title>"));
        assert!(page.contains(r#"<a href="/gallery" class="current">Gallery</a>"#));
        assert!(page.contains(r#"<a href="/">Plans</a>"#));
        assert!(page.contains("<p>body</p>"));
    }

    #[test]
    fn short_date_formats_or_dashes() {
        assert_eq!(short_date(NaiveDate::from_ymd_opt(2024, 3, 20)), "Mar 20, 2024");
        assert_eq!(short_date(None), "-");
    }
}
