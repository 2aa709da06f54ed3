use super::{escape, layout, plan_path, Nav};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmKind {
    Archive,
    Delete,
}

impl ConfirmKind {
    fn question(self) -> &'static str {
        match self {
            Self::Archive => "Archive this plan?",
            Self::Delete => "Delete permanently?",
        }
    }

    fn segment(self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Delete => "delete",
        }
    }

    fn button(self) -> &'static str {
        match self {
            Self::Archive => r#"<button type="submit" name="confirm" value="yes">Archive</button>"#,
            Self::Delete => {
                r#"<button class="danger" type="submit" name="confirm" value="yes">Delete</button>"#
            }
        }
    }
}

/// Confirmation step in front of a destructive action. Only the confirm
/// button sends `confirm=yes`; cancelling is a plain link back.
pub fn render_confirm(kind: ConfirmKind, id: &str, title: Option<&str>, return_to: &str) -> String {
    let subject = title
        .map(|title| format!("<p><strong>{}</strong></p>", escape(title)))
        .unwrap_or_default();
    let warning = match kind {
        ConfirmKind::Delete => "<p>This cannot be undone.</p>",
        ConfirmKind::Archive => "",
    };

    let body = format!(
        r#"<section class="card">
  <h2>{question}</h2>
  {subject}
  {warning}
  <form class="filters" method="post" action="{path}/{segment}">
    <input type="hidden" name="returnTo" value="{return_to}" />
    {button}
    <a class="link" href="{return_to}">Cancel</a>
  </form>
</section>"#,
        question = kind.question(),
        path = plan_path(id),
        segment = kind.segment(),
        return_to = escape(return_to),
        button = kind.button(),
    );

    layout(kind.question(), Nav::None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_confirmation_posts_confirm_flag() {
        let html = render_confirm(ConfirmKind::Delete, "p1", Some("Go & Rust"), "/?subject=Go");

        assert!(html.contains("Delete permanently?"));
        assert!(html.contains(r#"action="/plans/p1/delete""#));
        assert!(html.contains(r#"name="confirm" value="yes""#));
        assert!(html.contains(r#"href="/?subject=Go">Cancel"#));
        assert!(html.contains("Go &amp; Rust"));
    }

    #[test]
    fn archive_confirmation_targets_archive() {
        let html = render_confirm(ConfirmKind::Archive, "p1", None, "/");
        assert!(html.contains("Archive this plan?"));
        assert!(html.contains(r#"action="/plans/p1/archive""#));
        assert!(!html.contains("cannot be undone"));
    }
}
