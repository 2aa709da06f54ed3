use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

pub const PRIORITY_OPTIONS: [&str; 3] = ["High", "Medium", "Low"];

pub const CATEGORY_OPTIONS: [&str; 6] = [
    "Programming",
    "Web Development",
    "Data Science",
    "Machine Learning",
    "DevOps",
    "Mobile Development",
];

pub const LEVEL_OPTIONS: [&str; 3] = ["Beginner", "Intermediate", "Advanced"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "High" => Some(Self::High),
            "Medium" => Some(Self::Medium),
            "Low" => Some(Self::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Beginner" => Some(Self::Beginner),
            "Intermediate" => Some(Self::Intermediate),
            "Advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

/// Subject areas a plan can be filed under. Serialized with the display
/// names the service stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Programming,
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Data Science")]
    DataScience,
    #[serde(rename = "Machine Learning")]
    MachineLearning,
    DevOps,
    #[serde(rename = "Mobile Development")]
    MobileDevelopment,
}

impl Category {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Programming" => Some(Self::Programming),
            "Web Development" => Some(Self::WebDevelopment),
            "Data Science" => Some(Self::DataScience),
            "Machine Learning" => Some(Self::MachineLearning),
            "DevOps" => Some(Self::DevOps),
            "Mobile Development" => Some(Self::MobileDevelopment),
            _ => None,
        }
    }
}

/// A learning plan as returned by the plan service.
///
/// Enumerated fields stay as plain strings here so that a record written by
/// another client with an unexpected value still lists. `completed_date` is
/// kept raw for the same reason; the aggregator parses it per item. Text and
/// list fields sent as `null` decode as empty.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Plan {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subject: String,
    pub target_date: Option<NaiveDate>,
    #[serde(deserialize_with = "null_as_default")]
    pub priority_level: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub level: String,
    #[serde(deserialize_with = "null_as_default")]
    pub duration: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub materials: Vec<String>,
    pub completed: bool,
    pub completed_date: Option<String>,
    pub archived: bool,
}

/// Body of a create or update call. Never carries `id`, `completedDate` or
/// `archived`; those belong to the service.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanDraft {
    pub title: String,
    pub summary: String,
    pub subject: String,
    pub target_date: NaiveDate,
    pub priority_level: Priority,
    pub category: Category,
    pub level: Level,
    pub duration: String,
    pub content: Vec<String>,
    pub materials: Vec<String>,
    pub completed: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanPage {
    pub content: Vec<Plan>,
    pub total_elements: Option<u64>,
}

/// Filters accepted by the list endpoint of the plan service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanQuery {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub priority_level: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub include_archived: bool,
}

impl PlanQuery {
    /// Query pairs in the order the service documents them. Blank filters
    /// are left out entirely.
    pub fn to_pairs(&self, page_size: u32) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(title) = non_blank(self.title.as_deref()) {
            pairs.push(("title", title.to_string()));
        }
        if let Some(subject) = non_blank(self.subject.as_deref()) {
            pairs.push(("subject", subject.to_string()));
        }
        if let Some(priority) = non_blank(self.priority_level.as_deref()) {
            pairs.push(("priorityLevel", priority.to_string()));
        }
        if let Some(date) = self.target_date {
            pairs.push(("targetDate", date.format("%Y-%m-%d").to_string()));
        }
        pairs.push(("includeArchived", self.include_archived.to_string()));
        pairs.push(("size", page_size.to_string()));
        pairs
    }
}

/// Filters as they arrive from the list view's query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListFilters {
    pub subject: String,
    pub priority_level: String,
    pub target_date: String,
    pub include_archived: Option<String>,
}

impl ListFilters {
    pub fn include_archived(&self) -> bool {
        matches!(self.include_archived.as_deref(), Some("true" | "on" | "1"))
    }

    pub fn to_query(&self) -> PlanQuery {
        PlanQuery {
            title: None,
            subject: non_blank(Some(&self.subject)).map(str::to_string),
            priority_level: non_blank(Some(&self.priority_level)).map(str::to_string),
            // An unparseable date filter is dropped like an empty date input.
            target_date: NaiveDate::parse_from_str(self.target_date.trim(), "%Y-%m-%d").ok(),
            include_archived: self.include_archived(),
        }
    }

    /// Query string that reproduces these filters, starting with `?` or empty.
    pub fn query_string(&self) -> String {
        let mut pairs = Vec::new();
        if let Some(subject) = non_blank(Some(&self.subject)) {
            pairs.push(format!("subject={}", encode_component(subject)));
        }
        if let Some(priority) = non_blank(Some(&self.priority_level)) {
            pairs.push(format!("priorityLevel={}", encode_component(priority)));
        }
        if let Some(date) = non_blank(Some(&self.target_date)) {
            pairs.push(format!("targetDate={}", encode_component(date)));
        }
        if self.include_archived() {
            pairs.push("includeArchived=true".to_string());
        }
        if pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", pairs.join("&"))
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryFilters {
    pub title: String,
    pub priority_level: String,
}

impl GalleryFilters {
    pub fn to_query(&self) -> PlanQuery {
        PlanQuery {
            title: non_blank(Some(&self.title)).map(str::to_string),
            priority_level: non_blank(Some(&self.priority_level)).map(str::to_string),
            ..PlanQuery::default()
        }
    }
}

/// Body of the complete/archive/delete action forms.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionForm {
    /// Completion state the row showed when the button was pressed.
    pub completed: bool,
    pub return_to: String,
    pub confirm: String,
}

impl ActionForm {
    pub fn confirmed(&self) -> bool {
        self.confirm == "yes"
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReturnQuery {
    pub return_to: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyCount {
    pub label: String,
    pub week_start: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Progress {
    pub total: usize,
    pub completed: usize,
    pub percent: u32,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub weeks: Vec<WeeklyCount>,
    pub progress: Progress,
}

/// Reads an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_decodes_with_missing_fields() {
        let plan: Plan = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "title": "Rust basics",
            "targetDate": "2024-04-01",
            "completed": true,
            "completedDate": "not a date"
        }))
        .unwrap();

        assert_eq!(plan.id, "p1");
        assert_eq!(plan.target_date, NaiveDate::from_ymd_opt(2024, 4, 1));
        assert!(plan.content.is_empty());
        assert!(!plan.archived);
        assert_eq!(plan.completed_date.as_deref(), Some("not a date"));
    }

    #[test]
    fn page_with_null_fields_still_decodes() {
        let page: PlanPage = serde_json::from_value(serde_json::json!({
            "content": [
                { "id": "ok", "title": "Rust", "content": ["intro"] },
                {
                    "id": "legacy",
                    "title": "Old",
                    "subject": null,
                    "summary": null,
                    "priorityLevel": null,
                    "content": null,
                    "materials": null,
                    "targetDate": null,
                    "completedDate": null
                }
            ],
            "totalElements": 2
        }))
        .unwrap();

        assert_eq!(page.content.len(), 2);
        let legacy = &page.content[1];
        assert_eq!(legacy.id, "legacy");
        assert_eq!(legacy.subject, "");
        assert!(legacy.content.is_empty());
        assert!(legacy.materials.is_empty());
        assert_eq!(legacy.target_date, None);
    }

    #[test]
    fn draft_serializes_service_field_names() {
        let draft = PlanDraft {
            title: "T".into(),
            summary: "S".into(),
            subject: "Rust".into(),
            target_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            priority_level: Priority::High,
            category: Category::WebDevelopment,
            level: Level::Advanced,
            duration: "4 weeks".into(),
            content: vec!["intro".into()],
            materials: vec!["https://example.com".into()],
            completed: false,
        };

        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["targetDate"], "2024-05-02");
        assert_eq!(value["priorityLevel"], "High");
        assert_eq!(value["category"], "Web Development");
        assert!(value.get("id").is_none());
        assert!(value.get("completedDate").is_none());
    }

    #[test]
    fn query_pairs_skip_blank_filters() {
        let query = PlanQuery {
            subject: Some("  ".into()),
            priority_level: Some("Low".into()),
            ..PlanQuery::default()
        };

        let pairs = query.to_pairs(50);
        assert_eq!(
            pairs,
            vec![
                ("priorityLevel", "Low".to_string()),
                ("includeArchived", "false".to_string()),
                ("size", "50".to_string()),
            ]
        );
    }

    #[test]
    fn list_filters_round_trip_through_query_string() {
        let filters = ListFilters {
            subject: "data & ml".into(),
            priority_level: "High".into(),
            target_date: String::new(),
            include_archived: Some("on".into()),
        };

        assert_eq!(
            filters.query_string(),
            "?subject=data%20%26%20ml&priorityLevel=High&includeArchived=true"
        );
        assert!(filters.to_query().include_archived);
        assert_eq!(ListFilters::default().query_string(), "");
    }

    #[test]
    fn list_filters_drop_malformed_date() {
        let filters = ListFilters {
            target_date: "03/20/2024".into(),
            ..ListFilters::default()
        };
        assert_eq!(filters.to_query().target_date, None);
    }
}
