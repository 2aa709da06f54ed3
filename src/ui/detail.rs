use super::{banner, escape, layout, plan_path, priority_class, short_date, Nav};
use crate::models::Plan;
use reqwest::Url;

pub fn render_detail(plan: &Plan) -> String {
    let status = if plan.completed {
        r#"<span class="badge badge-done">Completed</span>"#
    } else {
        r#"<span class="badge badge-open">In Progress</span>"#
    };

    let materials = if plan.materials.is_empty() {
        String::new()
    } else {
        let items: String = plan
            .materials
            .iter()
            .map(|material| {
                let text = escape(material);
                if is_web_link(material) {
                    format!(r#"<li><a href="{text}" target="_blank" rel="noopener noreferrer">{text}</a></li>"#)
                } else {
                    format!("<li>{text}</li>")
                }
            })
            .collect();
        format!("<h4>Materials</h4><ul>{items}</ul>")
    };

    let outline: String = plan
        .content
        .iter()
        .enumerate()
        .map(|(index, section)| {
            format!(
                "<div class=\"card\"><h4>Section {}</h4><p>{}</p></div>",
                index + 1,
                escape(section)
            )
        })
        .collect();

    let body = format!(
        r#"<p><a class="link" href="/">&larr; Back</a></p>
<section class="card">
  <h1>{title}</h1>
  <p>{summary}</p>
  <a class="button" href="{path}/edit">Edit</a>
</section>
<section class="card form-grid">
  <div>
    <h4>Subject</h4><p>{subject}</p>
    <h4>Target Date</h4><p>{target_date}</p>
    <h4>Priority</h4><span class="{priority_class}">{priority}</span>
  </div>
  <div>
    <h4>Status:</h4>{status}
    {materials}
  </div>
</section>
<section class="card">
  <h2>Content Outline</h2>
  {outline}
</section>"#,
        title = escape(&plan.title),
        summary = escape(&plan.summary),
        path = plan_path(&plan.id),
        subject = escape(&plan.subject),
        target_date = short_date(plan.target_date),
        priority_class = priority_class(&plan.priority_level),
        priority = escape(&plan.priority_level),
    );

    layout(&plan.title, Nav::None, &body)
}

/// Materials may be file identifiers or anything else a client stored; only
/// http(s) URLs become links.
fn is_web_link(value: &str) -> bool {
    Url::parse(value.trim())
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Error page for a plan that could not be shown or an action that failed.
pub fn render_notice(message: &str, back: &str) -> String {
    let body = format!(
        r#"{}<p><a class="link" href="{}">&larr; Back to plans</a></p>"#,
        banner(message),
        escape(back)
    );
    layout("Plan", Nav::None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_lists_sections_and_materials_in_order() {
        let plan = Plan {
            id: "c1".into(),
            title: "SQL".into(),
            priority_level: "Low".into(),
            completed: true,
            content: vec!["Joins".into(), "Indexes".into()],
            materials: vec!["https://example.com/a?x=1&y=2".into()],
            ..Plan::default()
        };

        let html = render_detail(&plan);
        let joins = html.find("Joins").unwrap();
        let indexes = html.find("Indexes").unwrap();
        assert!(joins < indexes);
        assert!(html.contains("Section 2"));
        assert!(html.contains("https://example.com/a?x=1&amp;y=2"));
        assert!(html.contains("Completed"));
        assert!(html.contains(r#"href="/plans/c1/edit""#));
        assert!(html.contains("badge badge-low"));
    }

    #[test]
    fn only_web_materials_become_links() {
        let plan = Plan {
            materials: vec![
                "javascript:alert(1)".into(),
                "https://example.com/guide".into(),
                "notes.pdf".into(),
            ],
            ..Plan::default()
        };

        let html = render_detail(&plan);
        assert!(!html.contains(r#"href="javascript:"#));
        assert!(html.contains("<li>javascript:alert(1)</li>"));
        assert!(html.contains(r#"<a href="https://example.com/guide""#));
        assert!(html.contains("<li>notes.pdf</li>"));
    }

    #[test]
    fn notice_links_back() {
        let html = render_notice("Plan not found.", "/?subject=Go");
        assert!(html.contains(r#"role="alert">Plan not found.</div>"#));
        assert!(html.contains(r#"href="/?subject=Go""#));
    }

    #[test]
    fn no_materials_heading_without_materials() {
        let html = render_detail(&Plan::default());
        assert!(!html.contains("Materials"));
        assert!(html.contains("In Progress"));
    }
}
