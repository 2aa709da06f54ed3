use crate::models::{Category, Level, Plan, PlanDraft, Priority};
use chrono::NaiveDate;
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError, ValidationErrors};

/// Plan form as typed by the user. Scalars are trimmed on intake so the
/// length checks below treat whitespace-only input as missing.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct PlanForm {
    #[validate(length(min = 1, message = "Title is required."))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required."))]
    pub summary: String,
    #[validate(length(min = 1, message = "Subject is required."))]
    pub subject: String,
    #[validate(custom(function = "valid_target_date"))]
    pub target_date: String,
    #[validate(custom(function = "known_priority"))]
    pub priority_level: String,
    #[validate(custom(function = "known_category"))]
    pub category: String,
    #[validate(custom(function = "known_level"))]
    pub level: String,
    #[validate(length(min = 1, message = "Duration is required."))]
    pub duration: String,
    #[validate(custom(function = "all_sections_filled"))]
    pub content: Vec<String>,
    #[validate(custom(function = "all_links_filled"))]
    pub materials: Vec<String>,
    pub completed: bool,
}

/// What the submit button asked for. Only `Save` reaches the plan service;
/// the others edit the repeated fields and re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Save,
    AddContent,
    RemoveContent(usize),
    AddMaterial,
    RemoveMaterial(usize),
}

impl FormAction {
    fn parse(value: &str) -> Self {
        if value == "add-content" {
            return Self::AddContent;
        }
        if value == "add-material" {
            return Self::AddMaterial;
        }
        if let Some(index) = value.strip_prefix("remove-content-").and_then(|i| i.parse().ok()) {
            return Self::RemoveContent(index);
        }
        if let Some(index) = value.strip_prefix("remove-material-").and_then(|i| i.parse().ok()) {
            return Self::RemoveMaterial(index);
        }
        Self::Save
    }
}

impl PlanForm {
    pub fn blank() -> Self {
        Self {
            content: vec![String::new()],
            materials: vec![String::new()],
            ..Self::default()
        }
    }

    pub fn from_plan(plan: &Plan) -> Self {
        Self {
            title: plan.title.clone(),
            summary: plan.summary.clone(),
            subject: plan.subject.clone(),
            target_date: plan
                .target_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            priority_level: plan.priority_level.clone(),
            category: plan.category.clone(),
            level: plan.level.clone(),
            duration: plan.duration.clone(),
            content: non_empty_list(&plan.content),
            materials: non_empty_list(&plan.materials),
            completed: plan.completed,
        }
    }

    /// Builds the form from an urlencoded body, where `content` and
    /// `materials` repeat once per entry in document order.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> (Self, FormAction) {
        let mut form = Self::default();
        let mut action = FormAction::Save;

        for (key, value) in pairs {
            match key.as_str() {
                "title" => form.title = value.trim().to_string(),
                "summary" => form.summary = value.trim().to_string(),
                "subject" => form.subject = value.trim().to_string(),
                "targetDate" => form.target_date = value.trim().to_string(),
                "priorityLevel" => form.priority_level = value.trim().to_string(),
                "category" => form.category = value.trim().to_string(),
                "level" => form.level = value.trim().to_string(),
                "duration" => form.duration = value.trim().to_string(),
                "content" => form.content.push(value),
                "materials" => form.materials.push(value),
                "completed" => form.completed = matches!(value.as_str(), "on" | "true" | "1"),
                "action" => action = FormAction::parse(&value),
                _ => {}
            }
        }

        (form, action)
    }

    /// Applies a list edit. Removing is ignored when only one entry is left.
    pub fn apply(&mut self, action: FormAction) {
        match action {
            FormAction::Save => {}
            FormAction::AddContent => self.content.push(String::new()),
            FormAction::AddMaterial => self.materials.push(String::new()),
            FormAction::RemoveContent(index) => remove_entry(&mut self.content, index),
            FormAction::RemoveMaterial(index) => remove_entry(&mut self.materials, index),
        }
    }

    /// Runs every field check and, when all pass, produces the body for the
    /// create or update call.
    pub fn to_draft(&self) -> Result<PlanDraft, FieldErrors> {
        self.validate()?;

        let (Some(target_date), Some(priority_level), Some(category), Some(level)) = (
            parse_date(&self.target_date),
            Priority::parse(&self.priority_level),
            Category::parse(&self.category),
            Level::parse(&self.level),
        ) else {
            return Err(FieldErrors::single("form", "Some fields are invalid."));
        };

        Ok(PlanDraft {
            title: self.title.clone(),
            summary: self.summary.clone(),
            subject: self.subject.clone(),
            target_date,
            priority_level,
            category,
            level,
            duration: self.duration.clone(),
            content: self.content.clone(),
            materials: self.materials.clone(),
            completed: self.completed,
        })
    }
}

/// First message per failing field, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn single(field: &str, message: &str) -> Self {
        Self(BTreeMap::from([(field.to_string(), message.to_string())]))
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = BTreeMap::new();
        for (field, list) in errors.field_errors() {
            if let Some(first) = list.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                fields.insert(field.to_string(), message);
            }
        }
        Self(fields)
    }
}

fn failure(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn valid_target_date(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(failure("required", "Target date is required."));
    }
    parse_date(value)
        .map(|_| ())
        .ok_or_else(|| failure("date", "Target date must be a valid date."))
}

fn known_priority(value: &str) -> Result<(), ValidationError> {
    Priority::parse(value)
        .map(|_| ())
        .ok_or_else(|| failure("required", "Select priority."))
}

fn known_category(value: &str) -> Result<(), ValidationError> {
    Category::parse(value)
        .map(|_| ())
        .ok_or_else(|| failure("required", "Select a category."))
}

fn known_level(value: &str) -> Result<(), ValidationError> {
    Level::parse(value)
        .map(|_| ())
        .ok_or_else(|| failure("required", "Select a level."))
}

fn all_sections_filled(sections: &[String]) -> Result<(), ValidationError> {
    if sections.iter().any(|section| section.trim().is_empty()) {
        return Err(failure("required", "All content sections must be filled."));
    }
    Ok(())
}

fn all_links_filled(links: &[String]) -> Result<(), ValidationError> {
    if links.iter().any(|link| link.trim().is_empty()) {
        return Err(failure("required", "All material links must be filled."));
    }
    Ok(())
}

fn non_empty_list(items: &[String]) -> Vec<String> {
    if items.is_empty() {
        vec![String::new()]
    } else {
        items.to_vec()
    }
}

fn remove_entry(items: &mut Vec<String>, index: usize) {
    if items.len() > 1 && index < items.len() {
        items.remove(index);
    }
}
