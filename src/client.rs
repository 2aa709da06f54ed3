//! HTTP client for the remote plan service.
//!
//! Every call is a single request with no retry; callers decide how a
//! failure is shown.

use crate::config::Config;
use crate::errors::ClientError;
use crate::models::{Plan, PlanDraft, PlanPage, PlanQuery};
use reqwest::{Client, Response, Url};
use tracing::{info, warn};

#[derive(Clone)]
pub struct PlanClient {
    http: Client,
    base_url: Url,
    page_size: u32,
}

impl PlanClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.service_url)
            .map_err(|err| ClientError::InvalidUrl(format!("{}: {err}", config.service_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.service_url.clone()));
        }
        let http = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            http,
            base_url,
            page_size: config.page_size,
        })
    }

    pub async fn list(&self, query: &PlanQuery) -> Result<Vec<Plan>, ClientError> {
        let url = self.courses_url(&[]);
        let response = self
            .http
            .get(url.clone())
            .query(&query.to_pairs(self.page_size))
            .send()
            .await?;
        let page: PlanPage = check_status(response, &url).await?.json().await?;
        if let Some(total) = page.total_elements {
            if total > page.content.len() as u64 {
                warn!(total, shown = page.content.len(), "plan list truncated by page size");
            }
        }
        Ok(page.content)
    }

    pub async fn get(&self, id: &str) -> Result<Plan, ClientError> {
        let url = self.courses_url(&[id]);
        let response = self.http.get(url.clone()).send().await?;
        Ok(check_status(response, &url).await?.json().await?)
    }

    pub async fn create(&self, draft: &PlanDraft) -> Result<Plan, ClientError> {
        let url = self.courses_url(&[]);
        let response = self.http.post(url.clone()).json(draft).send().await?;
        let plan: Plan = check_status(response, &url).await?.json().await?;
        info!(id = %plan.id, title = %plan.title, "plan created");
        Ok(plan)
    }

    pub async fn update(&self, id: &str, draft: &PlanDraft) -> Result<Plan, ClientError> {
        let url = self.courses_url(&[id]);
        let response = self.http.put(url.clone()).json(draft).send().await?;
        let plan: Plan = check_status(response, &url).await?.json().await?;
        info!(id, "plan updated");
        Ok(plan)
    }

    pub async fn set_completed(&self, id: &str, completed: bool) -> Result<(), ClientError> {
        let url = self.courses_url(&[id, "complete"]);
        let response = self
            .http
            .patch(url.clone())
            .query(&[("completed", completed)])
            .send()
            .await?;
        check_status(response, &url).await?;
        info!(id, completed, "plan completion changed");
        Ok(())
    }

    pub async fn archive(&self, id: &str) -> Result<(), ClientError> {
        let url = self.courses_url(&[id, "archive"]);
        let response = self.http.patch(url.clone()).send().await?;
        check_status(response, &url).await?;
        info!(id, "plan archived");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let url = self.courses_url(&[id]);
        let response = self.http.delete(url.clone()).send().await?;
        check_status(response, &url).await?;
        info!(id, "plan deleted");
        Ok(())
    }

    fn courses_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base can hold path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("courses").extend(segments);
        }
        url
    }
}

async fn check_status(response: Response, url: &Url) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(%status, %url, body = %body.chars().take(200).collect::<String>(), "plan service rejected request");
    Err(ClientError::Status {
        status,
        url: url.to_string(),
    })
}
