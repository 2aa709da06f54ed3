use super::{banner, escape, layout, plan_path, select_options, Nav};
use crate::models::{CATEGORY_OPTIONS, LEVEL_OPTIONS, PRIORITY_OPTIONS};
use crate::validation::{FieldErrors, PlanForm};

pub struct FormPage<'a> {
    pub form: &'a PlanForm,
    pub errors: &'a FieldErrors,
    /// Set when editing an existing plan.
    pub plan_id: Option<&'a str>,
    pub banner: Option<&'a str>,
}

pub fn render_form(page: &FormPage<'_>) -> String {
    let form = page.form;
    let errors = page.errors;
    let (heading, action, submit) = match page.plan_id {
        Some(id) => ("Edit Learning Plan", plan_path(id), "Update Plan"),
        None => ("Add New Learning Plan", "/plans".to_string(), "Create Plan"),
    };

    let mut body = format!("<section class=\"card\">\n<h2>{heading}</h2>\n");
    if let Some(message) = page.banner {
        body.push_str(&banner(message));
    }

    body.push_str(&format!(
        r#"
<form method="post" action="{action}" novalidate>
  <button type="submit" name="action" value="save" tabindex="-1" aria-hidden="true" style="position: absolute; left: -9999px"></button>
  <div>
    <label for="title">Title</label>
    <input id="title" name="title" value="{title}"{title_class} />
    {title_error}
  </div>
  <div>
    <label for="summary">Description</label>
    <textarea id="summary" name="summary" rows="3"{summary_class}>{summary}</textarea>
    {summary_error}
  </div>
  <div class="form-grid">
    <div>
      <label for="subject">Subject / Topic</label>
      <input id="subject" name="subject" value="{subject}"{subject_class} />
      {subject_error}
    </div>
    <div>
      <label for="targetDate">Target Date</label>
      <input type="date" id="targetDate" name="targetDate" value="{target_date}"{target_date_class} />
      {target_date_error}
    </div>
  </div>
  <div class="form-grid">
    {priority}
    {category}
    {level}
    <div>
      <label for="duration">Duration</label>
      <input id="duration" name="duration" value="{duration}" placeholder="e.g. 4 weeks"{duration_class} />
      {duration_error}
    </div>
  </div>
"#,
        title = escape(&form.title),
        title_class = invalid_class(errors, "title"),
        title_error = field_error(errors, "title"),
        summary = escape(&form.summary),
        summary_class = invalid_class(errors, "summary"),
        summary_error = field_error(errors, "summary"),
        subject = escape(&form.subject),
        subject_class = invalid_class(errors, "subject"),
        subject_error = field_error(errors, "subject"),
        target_date = escape(&form.target_date),
        target_date_class = invalid_class(errors, "target_date"),
        target_date_error = field_error(errors, "target_date"),
        priority = select_field(
            "priorityLevel",
            "Priority Level",
            &PRIORITY_OPTIONS,
            &form.priority_level,
            errors,
            "priority_level"
        ),
        category = select_field(
            "category",
            "Category",
            &CATEGORY_OPTIONS,
            &form.category,
            errors,
            "category"
        ),
        level = select_field("level", "Level", &LEVEL_OPTIONS, &form.level, errors, "level"),
        duration = escape(&form.duration),
        duration_class = invalid_class(errors, "duration"),
        duration_error = field_error(errors, "duration"),
    ));

    body.push_str(&repeated_field(
        "content",
        "Content Sections",
        &form.content,
        errors,
        |index, value, class| {
            format!(
                r#"<textarea name="content" placeholder="Section {n}"{class}>{value}</textarea>"#,
                n = index + 1,
                value = escape(value),
            )
        },
        "+ Add Section",
    ));
    body.push_str(&repeated_field(
        "materials",
        "Related Materials (links)",
        &form.materials,
        errors,
        |_, value, class| {
            format!(
                r#"<input name="materials" value="{value}" placeholder="https://example.com/material.pdf"{class} />"#,
                value = escape(value),
            )
        },
        "+ Add Material",
    ));

    if page.plan_id.is_some() {
        let checked = if form.completed { " checked" } else { "" };
        body.push_str(&format!(
            r#"  <div>
    <label><input type="checkbox" name="completed" value="true"{checked} /> Mark as Completed</label>
  </div>
"#
        ));
    }

    body.push_str(&format!(
        r#"  <button type="submit" name="action" value="save">{submit}</button>
</form>
</section>"#
    ));

    let nav = if page.plan_id.is_some() { Nav::None } else { Nav::Add };
    layout(heading, nav, &body)
}

fn invalid_class(errors: &FieldErrors, field: &str) -> &'static str {
    if errors.get(field).is_some() {
        r#" class="invalid""#
    } else {
        ""
    }
}

fn field_error(errors: &FieldErrors, field: &str) -> String {
    errors
        .get(field)
        .map(|message| format!(r#"<p class="field-error">{}</p>"#, escape(message)))
        .unwrap_or_default()
}

fn select_field(
    name: &str,
    label: &str,
    options: &[&str],
    selected: &str,
    errors: &FieldErrors,
    field: &str,
) -> String {
    format!(
        r#"<div>
      <label for="{name}">{label}</label>
      <select id="{name}" name="{name}"{class}>
        <option value="">-- Select --</option>{options}
      </select>
      {error}
    </div>"#,
        class = invalid_class(errors, field),
        options = select_options(options, selected),
        error = field_error(errors, field),
    )
}

/// One input per entry plus add/remove buttons. The buttons submit the form
/// with an `action` value; the handler edits the list and re-renders.
fn repeated_field(
    name: &str,
    label: &str,
    values: &[String],
    errors: &FieldErrors,
    input: impl Fn(usize, &str, &str) -> String,
    add_label: &str,
) -> String {
    let singular = if name == "content" { "content" } else { "material" };
    let class = invalid_class(errors, name);
    let mut html = format!("  <div>\n    <label>{label}</label>\n");
    for (index, value) in values.iter().enumerate() {
        html.push_str("    <div class=\"repeat\">");
        html.push_str(&input(index, value, class));
        if values.len() > 1 {
            html.push_str(&format!(
                r#"<button class="link" type="submit" name="action" value="remove-{singular}-{index}">Remove</button>"#
            ));
        }
        html.push_str("</div>\n");
    }
    html.push_str(&format!(
        r#"    <button class="link" type="submit" name="action" value="add-{singular}">{add_label}</button>
    {error}
  </div>
"#,
        error = field_error(errors, name),
    ));
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_form_posts_to_collection_without_completed_toggle() {
        let form = PlanForm::blank();
        let errors = FieldErrors::default();
        let html = render_form(&FormPage {
            form: &form,
            errors: &errors,
            plan_id: None,
            banner: None,
        });

        assert!(html.contains(r#"action="/plans""#));
        assert!(html.contains("Create Plan"));
        assert!(!html.contains("Mark as Completed"));
        assert!(!html.contains("remove-content-0"));
        assert!(html.contains(r#"value="add-material""#));
    }

    #[test]
    fn errors_and_values_are_shown_on_edit() {
        let form = PlanForm {
            title: String::new(),
            content: vec!["a".into(), "<b>".into()],
            completed: true,
            ..PlanForm::blank()
        };
        let errors = FieldErrors::single("title", "Title is required.");
        let html = render_form(&FormPage {
            form: &form,
            errors: &errors,
            plan_id: Some("x1"),
            banner: Some("Server error - please try again."),
        });

        assert!(html.contains(r#"action="/plans/x1""#));
        assert_eq!(html.matches(r#"<p class="field-error">"#).count(), 1);
        assert!(html.contains("Title is required."));
        assert!(html.contains("&lt;b&gt;</textarea>"));
        assert!(html.contains(r#"value="remove-content-1""#));
        assert!(html.contains(r#"value="true" checked"#));
        assert!(html.contains("Server error - please try again."));
    }
}
