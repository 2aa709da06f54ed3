use super::{banner, escape, layout, plan_path, priority_class, select_options, Nav};
use crate::models::{GalleryFilters, Plan, PRIORITY_OPTIONS};

const SUMMARY_PREVIEW: usize = 100;

pub fn render_gallery(filters: &GalleryFilters, plans: &[Plan], error: Option<&str>) -> String {
    let mut body = String::new();
    if let Some(message) = error {
        body.push_str(&banner(message));
    }

    body.push_str(&format!(
        r#"<h2>Learning Plans Gallery</h2>
<form class="card filters" method="get" action="/gallery">
  <input type="text" name="title" placeholder="Search by Title…" value="{title}" />
  <select name="priorityLevel">
    <option value="">All Priorities</option>{priorities}
  </select>
  <button type="submit">Search</button>
  <a class="link" href="/gallery">Clear Filters</a>
</form>
"#,
        title = escape(&filters.title),
        priorities = select_options(&PRIORITY_OPTIONS, &filters.priority_level),
    ));

    if plans.is_empty() {
        if error.is_none() {
            body.push_str(r#"<div class="empty">No plans match your criteria.</div>"#);
        }
    } else {
        body.push_str(r#"<div class="grid">"#);
        for plan in plans {
            body.push_str(&format!(
                r#"
  <div class="card">
    <h3>{title}</h3>
    <p>{summary}</p>
    <p>{subject} <span class="{priority_class}">{priority}</span></p>
    <a class="link" href="{path}">View Details</a>
  </div>"#,
                title = escape(&plan.title),
                summary = escape(&preview(&plan.summary)),
                subject = escape(&plan.subject),
                priority_class = priority_class(&plan.priority_level),
                priority = escape(&plan.priority_level),
                path = plan_path(&plan.id),
            ));
        }
        body.push_str("\n</div>");
    }

    layout("Gallery", Nav::Gallery, &body)
}

fn preview(summary: &str) -> String {
    if summary.chars().count() > SUMMARY_PREVIEW {
        let cut: String = summary.chars().take(SUMMARY_PREVIEW).collect();
        format!("{cut}…")
    } else {
        summary.to_string()
    }
}
