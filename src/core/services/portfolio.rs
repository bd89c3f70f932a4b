use chrono::Datelike;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::data::{BlogPost, Comment, Education, Experience, Profile, Project, Resource, Skill, Testimonial};
use crate::core::infrastructure::cache::CacheStats;
use crate::core::infrastructure::loader::DataLoader;
use crate::core::infrastructure::source::{get_json, RestSource};
use crate::core::services::aggregate::{
    self, BlogOverview, BlogQuery, ContactOverview, OverviewLimits, Page, PortfolioOverview,
};
use crate::error::{FolioError, Result};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub overview: OverviewLimits,
    pub recent_posts_limit: usize,
    pub page_size: u32,
    pub simulated_latency: Duration,
    pub available_for_hire: bool,
    pub response_time: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            overview: OverviewLimits::default(),
            recent_posts_limit: 5,
            page_size: aggregate::DEFAULT_PAGE_SIZE,
            simulated_latency: Duration::ZERO,
            available_for_hire: true,
            response_time: "Within 24 hours".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ContactMessage {
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [("name", &self.name), ("email", &self.email), ("message", &self.message)]
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(FolioError::Validation(format!(
                "Please fill in all required fields (missing: {})",
                missing.join(", ")
            )))
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ContactReceipt {
    #[serde(default = "succeeded")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub id: Option<i64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct NewsletterReceipt {
    #[serde(default = "succeeded")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

fn succeeded() -> bool {
    true
}

pub fn validate_newsletter_email(email: &str) -> Result<()> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(FolioError::Validation("Please enter a valid email address".to_string()));
    }
    Ok(())
}

/// REST list endpoints wrap records in `{results: [...]}`; static documents
/// are bare.
fn unwrap_results(doc: &Value) -> &Value {
    match doc.get("results") {
        Some(results) if results.is_array() => results,
        _ => doc,
    }
}

fn decode<T: DeserializeOwned>(resource: &Resource, value: &Value) -> Result<T> {
    serde_json::from_value(value.clone()).map_err(|e| FolioError::load(resource.name(), e))
}

/// Read and write operations over the portfolio documents.
///
/// Reads go through the [`DataLoader`] and its session cache. Writes are
/// posted to the REST backend when one is configured and simulated
/// otherwise.
pub struct PortfolioApi {
    loader: DataLoader,
    backend: Option<RestSource>,
    settings: ApiSettings,
}

impl PortfolioApi {
    pub fn new(loader: DataLoader, backend: Option<RestSource>, settings: ApiSettings) -> Self {
        Self {
            loader,
            backend,
            settings,
        }
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    pub fn loader(&self) -> &DataLoader {
        &self.loader
    }

    async fn pause(&self) {
        if !self.settings.simulated_latency.is_zero() {
            tokio::time::sleep(self.settings.simulated_latency).await;
        }
    }

    async fn list<T: DeserializeOwned>(&self, resource: Resource) -> Result<Vec<T>> {
        self.pause().await;
        if !self.loader.serves(&resource) {
            debug!("{} has no document in this source; returning empty list", resource);
            return Ok(Vec::new());
        }
        let doc = self.loader.load(&resource).await?;
        decode(&resource, unwrap_results(&doc))
    }

    pub async fn profile(&self) -> Result<Profile> {
        self.pause().await;
        let resource = Resource::Profile;
        let doc = self.loader.load(&resource).await?;

        match doc.get("results").and_then(Value::as_array) {
            Some(results) => match results.first() {
                Some(first) => decode(&resource, first),
                None => Err(FolioError::NotFound { entity: "Profile", id: "default".into() }),
            },
            None => decode(&resource, &doc),
        }
    }

    pub async fn skills(&self) -> Result<Vec<Skill>> {
        self.list(Resource::Skills).await
    }

    pub async fn projects(&self) -> Result<Vec<Project>> {
        self.list(Resource::Projects).await
    }

    pub async fn project(&self, id: u64) -> Result<Project> {
        let projects = self.projects().await?;
        aggregate::find_project(&projects, id)
            .cloned()
            .ok_or_else(|| FolioError::NotFound { entity: "Project", id: id.to_string() })
    }

    pub async fn experience(&self) -> Result<Vec<Experience>> {
        self.list(Resource::Experience).await
    }

    pub async fn education(&self) -> Result<Vec<Education>> {
        self.list(Resource::Education).await
    }

    pub async fn certificates(&self) -> Result<Vec<Education>> {
        Ok(aggregate::certificates(&self.education().await?))
    }

    pub async fn testimonials(&self) -> Result<Vec<Testimonial>> {
        self.list(Resource::Testimonials).await
    }

    /// Profile, projects and skills are fetched concurrently; any failure
    /// fails the whole overview.
    pub async fn portfolio_overview(&self) -> Result<PortfolioOverview> {
        let (profile, projects, skills) = tokio::try_join!(self.profile(), self.projects(), self.skills())?;
        let current_year = chrono::Local::now().year();

        Ok(aggregate::portfolio_overview(
            profile,
            &projects,
            &skills,
            &self.settings.overview,
            current_year,
        ))
    }

    pub async fn blog_posts(&self, query: &BlogQuery) -> Result<Page<BlogPost>> {
        let posts: Vec<BlogPost> = self.list(Resource::BlogPosts).await?;
        Ok(aggregate::query_posts(&posts, query, self.settings.page_size))
    }

    pub async fn blog_post(&self, id_or_slug: &str) -> Result<BlogPost> {
        let posts: Vec<BlogPost> = self.list(Resource::BlogPosts).await?;
        aggregate::find_post(&posts, id_or_slug)
            .cloned()
            .ok_or_else(|| FolioError::NotFound { entity: "Blog post", id: id_or_slug.to_string() })
    }

    pub async fn blog_comments(&self, post_id: u64) -> Result<Vec<Comment>> {
        self.list(Resource::BlogComments(post_id)).await
    }

    pub async fn blog_overview(&self) -> Result<BlogOverview> {
        let posts: Vec<BlogPost> = self.list(Resource::BlogPosts).await?;
        Ok(aggregate::blog_overview(&posts, self.settings.recent_posts_limit))
    }

    pub async fn contact_overview(&self) -> Result<ContactOverview> {
        let profile = self.profile().await?;
        Ok(aggregate::contact_overview(
            &profile,
            self.settings.available_for_hire,
            &self.settings.response_time,
        ))
    }

    pub async fn submit_contact_message(&self, message: &ContactMessage) -> Result<ContactReceipt> {
        self.pause().await;
        message.validate()?;

        match &self.backend {
            Some(rest) => {
                let endpoint = rest.endpoint("contact/messages");
                let body = get_json(rest.client().post(&endpoint).json(message))
                    .await
                    .map_err(|e| FolioError::request(&endpoint, e))?;
                serde_json::from_value(body).map_err(|e| FolioError::request(endpoint, e))
            }
            None => {
                info!("Contact message from {} <{}> recorded", message.name, message.email);
                Ok(ContactReceipt {
                    success: true,
                    message: "Message sent successfully! I will get back to you soon.".to_string(),
                    id: Some(chrono::Utc::now().timestamp_millis()),
                })
            }
        }
    }

    pub async fn subscribe_newsletter(&self, email: &str) -> Result<NewsletterReceipt> {
        self.pause().await;
        validate_newsletter_email(email)?;

        match &self.backend {
            Some(rest) => {
                let endpoint = rest.endpoint("blog/newsletter");
                let request = rest.client().post(&endpoint).json(&serde_json::json!({ "email": email }));
                let body = get_json(request).await.map_err(|e| FolioError::request(&endpoint, e))?;
                serde_json::from_value(body).map_err(|e| FolioError::request(endpoint, e))
            }
            None => {
                info!("Newsletter subscription for {}", email);
                Ok(NewsletterReceipt {
                    success: true,
                    message: "Successfully subscribed to newsletter!".to_string(),
                })
            }
        }
    }

    pub fn clear_cache(&self) {
        self.loader.clear_cache();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.loader.cache_stats()
    }
}

/// Shared handle used by hooks and CLI commands.
pub type SharedApi = Arc<PortfolioApi>;
