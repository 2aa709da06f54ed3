use super::{
    banner, escape, layout, plan_path, priority_class, render_weekly_chart, select_options,
    short_date, Nav,
};
use crate::models::{encode_component, ListFilters, Plan, SummaryResponse, PRIORITY_OPTIONS};

pub struct ListPage<'a> {
    pub filters: &'a ListFilters,
    pub plans: &'a [Plan],
    pub summary: &'a SummaryResponse,
    pub error: Option<&'a str>,
}

pub fn render_list(page: &ListPage<'_>) -> String {
    let filters = page.filters;
    let return_to = format!("/{}", filters.query_string());
    let progress = page.summary.progress;

    let mut body = String::new();
    if let Some(message) = page.error {
        body.push_str(&banner(message));
    }

    body.push_str(&format!(
        r#"<section class="card">
  <h3>Weekly Completion Summary</h3>
  {chart}
</section>
<section class="card">
  <p>Progress: <strong>{completed}</strong> of <strong>{total}</strong> ({percent}%)</p>
  <div class="progress-bar"><span style="width: {percent}%"></span></div>
</section>"#,
        chart = render_weekly_chart(&page.summary.weeks),
        completed = progress.completed,
        total = progress.total,
        percent = progress.percent,
    ));

    let clear_href = if filters.include_archived() {
        "/?includeArchived=true"
    } else {
        "/"
    };
    let archived_checked = if filters.include_archived() { " checked" } else { "" };
    body.push_str(&format!(
        r#"
<form class="card filters" method="get" action="/">
  <input name="subject" placeholder="Subject" value="{subject}" />
  <select name="priorityLevel">
    <option value="">All Priorities</option>{priorities}
  </select>
  <input type="date" name="targetDate" value="{target_date}" />
  <button type="submit">Apply</button>
  <a class="link" href="{clear_href}">Clear</a>
  <label><input type="checkbox" name="includeArchived" value="true"{archived_checked} /> Show Archived</label>
</form>
<div class="filters">
  <h2>Manage Learning Plans</h2>
  <a class="button" href="/plans/new">+ Add Plan</a>
</div>"#,
        subject = escape(&filters.subject),
        priorities = select_options(&PRIORITY_OPTIONS, &filters.priority_level),
        target_date = escape(&filters.target_date),
    ));

    body.push_str(
        r#"
<section class="card">
<table>
  <thead><tr><th>Title</th><th>Subject</th><th>Target Date</th><th>Priority</th><th>Status</th><th>Archived</th><th>Actions</th></tr></thead>
  <tbody>"#,
    );
    for plan in page.plans {
        body.push_str(&render_row(plan, &return_to));
    }
    body.push_str("\n  </tbody>\n</table>\n");
    if page.plans.is_empty() && page.error.is_none() {
        body.push_str(
            r#"<div class="empty">No plans found. Click "Add Plan" to create one.</div>"#,
        );
    }
    body.push_str("\n</section>");

    layout("Manage Learning Plans", Nav::List, &body)
}

fn render_row(plan: &Plan, return_to: &str) -> String {
    let path = plan_path(&plan.id);
    let return_query = escape(&encode_component(return_to));
    let return_to = escape(return_to);
    let row_class = if plan.archived { r#" class="archived""# } else { "" };
    let status = if plan.completed {
        r#"<span class="badge badge-done">Completed</span>"#
    } else {
        r#"<span class="badge badge-open">Pending</span>"#
    };
    let archived = if plan.archived {
        r#"<span class="badge">Archived</span>"#
    } else {
        ""
    };
    let toggle_label = if plan.completed { "Unmark" } else { "Complete" };
    let archive_link = if plan.archived {
        String::new()
    } else {
        format!(r#"<a class="link" href="{path}/archive?returnTo={return_query}">Archive</a>"#)
    };

    format!(
        r#"
    <tr{row_class}>
      <td><a href="{path}">{title}</a></td>
      <td>{subject}</td>
      <td>{target_date}</td>
      <td><span class="{priority_class}">{priority}</span></td>
      <td>{status}</td>
      <td>{archived}</td>
      <td class="actions">
        <form method="post" action="{path}/complete">
          <input type="hidden" name="completed" value="{completed}" />
          <input type="hidden" name="returnTo" value="{return_to}" />
          <button class="link" type="submit">{toggle_label}</button>
        </form>
        {archive_link}
        <a class="link" href="{path}/delete?returnTo={return_query}">Delete</a>
      </td>
    </tr>"#,
        title = escape(&plan.title),
        subject = escape(&plan.subject),
        target_date = short_date(plan.target_date),
        priority_class = priority_class(&plan.priority_level),
        priority = escape(&plan.priority_level),
        completed = plan.completed,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::build_summary_at;
    use chrono::NaiveDate;

    fn plan(id: &str, title: &str, completed: bool, archived: bool) -> Plan {
        Plan {
            id: id.into(),
            title: title.into(),
            subject: "Rust".into(),
            priority_level: "High".into(),
            target_date: NaiveDate::from_ymd_opt(2024, 3, 20),
            completed,
            archived,
            ..Plan::default()
        }
    }

    fn now() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 20)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn rows_offer_actions_matching_state() {
        let plans = vec![
            plan("a1", "Open <plan>", false, false),
            plan("b2", "Done plan", true, true),
        ];
        let summary = build_summary_at(now(), &plans);
        let filters = ListFilters {
            subject: "Rust".into(),
            ..ListFilters::default()
        };

        let html = render_list(&ListPage {
            filters: &filters,
            plans: &plans,
            summary: &summary,
            error: None,
        });

        assert!(html.contains("Open &lt;plan&gt;"));
        assert!(html.contains(r#"href="/plans/a1/archive?returnTo=%2F%3Fsubject%3DRust""#));
        assert!(!html.contains("/plans/b2/archive"));
        assert!(html.contains(">Unmark<"));
        assert!(html.contains(">Complete<"));
        assert!(html.contains(r#"<tr class="archived">"#));
        assert!(html.contains("Progress: <strong>1</strong> of <strong>2</strong> (50%)"));
        assert!(html.contains("Mar 20, 2024"));
        assert!(!html.contains("No plans found"));
    }

    #[test]
    fn empty_list_shows_hint_and_error_banner_replaces_it() {
        let summary = build_summary_at(now(), &[]);
        let filters = ListFilters::default();

        let empty = render_list(&ListPage {
            filters: &filters,
            plans: &[],
            summary: &summary,
            error: None,
        });
        assert!(empty.contains("No plans found."));

        let failed = render_list(&ListPage {
            filters: &filters,
            plans: &[],
            summary: &summary,
            error: Some("Failed to load plans."),
        });
        assert!(failed.contains(r#"role="alert">Failed to load plans.</div>"#));
        assert!(!failed.contains("No plans found."));
    }
}
