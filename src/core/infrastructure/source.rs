use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::core::data::Resource;
use crate::error::LoadError;

const MAX_LIST_PAGES: usize = 100;

/// A transport that turns a logical resource into a JSON document.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, resource: &Resource) -> Result<Value, LoadError>;

    /// Whether this source has a document for `resource` at all.
    fn serves(&self, resource: &Resource) -> bool;

    fn kind(&self) -> &'static str;

    /// Human-readable location, used in logs and `config show`.
    fn location(&self) -> String;
}

pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    let version = env!("CARGO_PKG_VERSION");
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(format!("folio-cli v{}", version))
        .build()
}

pub(crate) async fn get_json(request: reqwest::RequestBuilder) -> Result<Value, LoadError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        warn!("Request to {} returned {}", response.url(), status);
        return Err(LoadError::Status(status.as_u16()));
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Static JSON documents served over HTTP, e.g. `./data/skills.json`.
#[derive(Clone)]
pub struct StaticHttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl StaticHttpSource {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url_for(&self, file: &str) -> String {
        format!("{}/{}.json", self.base_url, file)
    }
}

#[async_trait]
impl DocumentSource for StaticHttpSource {
    async fn fetch(&self, resource: &Resource) -> Result<Value, LoadError> {
        let file = resource
            .static_file()
            .ok_or(LoadError::Unavailable { source_kind: self.kind() })?;

        // Bypass intermediate HTTP caches on a genuine miss.
        let cache_buster = chrono::Utc::now().timestamp_millis().to_string();
        let url = self.url_for(file);
        debug!("GET {}?v={}", url, cache_buster);

        let request = self.client.get(&url).query(&[("v", cache_buster.as_str())]);
        get_json(request).await
    }

    fn serves(&self, resource: &Resource) -> bool {
        resource.static_file().is_some()
    }

    fn kind(&self) -> &'static str {
        "static"
    }

    fn location(&self) -> String {
        self.base_url.clone()
    }
}

/// REST backend; list endpoints wrap records in `{results, count, next, previous}`.
#[derive(Clone)]
pub struct RestSource {
    client: reqwest::Client,
    api_base: String,
}

impl RestSource {
    pub fn new(client: reqwest::Client, api_base: &str) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self, route: &str) -> String {
        format!("{}/{}/", self.api_base, route.trim_matches('/'))
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

#[async_trait]
impl DocumentSource for RestSource {
    /// List envelopes are followed through `next` and merged into one
    /// document holding every page's `results`.
    async fn fetch(&self, resource: &Resource) -> Result<Value, LoadError> {
        let url = self.endpoint(&resource.rest_route());
        debug!("GET {}", url);
        let mut doc = get_json(self.client.get(&url)).await?;

        let mut next = next_page(&url, &doc);
        let mut pages = 1;
        while let Some(page_url) = next {
            if pages >= MAX_LIST_PAGES {
                warn!("{} has more than {} pages; keeping the first {}", url, MAX_LIST_PAGES, pages);
                break;
            }
            debug!("GET {}", page_url);
            let mut page = get_json(self.client.get(page_url.as_str())).await?;
            next = next_page(page_url.as_str(), &page);
            pages += 1;

            let more = page.get_mut("results").map(Value::take);
            if let (Some(Value::Array(all)), Some(Value::Array(more))) = (doc.get_mut("results"), more) {
                all.extend(more);
            }
        }

        if pages > 1 {
            let total = doc["results"].as_array().map_or(0, Vec::len);
            if let Some(envelope) = doc.as_object_mut() {
                envelope.insert("count".into(), Value::from(total));
                envelope.insert("next".into(), Value::Null);
            }
            debug!("Merged {} pages of {} into {} records", pages, url, total);
        }
        Ok(doc)
    }

    fn serves(&self, _resource: &Resource) -> bool {
        true
    }

    fn kind(&self) -> &'static str {
        "rest"
    }

    fn location(&self) -> String {
        self.api_base.clone()
    }
}

/// Absolute `next` link of a REST list envelope, resolved against `current`.
fn next_page(current: &str, doc: &Value) -> Option<Url> {
    if !doc.get("results").is_some_and(Value::is_array) {
        return None;
    }
    let next = doc.get("next")?.as_str()?;
    Url::parse(current).ok()?.join(next).ok()
}

/// Static JSON documents read from a local directory.
#[derive(Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DocumentSource for DirectorySource {
    async fn fetch(&self, resource: &Resource) -> Result<Value, LoadError> {
        let file = resource
            .static_file()
            .ok_or(LoadError::Unavailable { source_kind: self.kind() })?;
        let path = self.root.join(format!("{}.json", file));
        debug!("Reading {}", path.display());

        let content = tokio::fs::read(&path).await?;
        Ok(serde_json::from_slice(&content)?)
    }

    fn serves(&self, resource: &Resource) -> bool {
        resource.static_file().is_some()
    }

    fn kind(&self) -> &'static str {
        "directory"
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn client() -> reqwest::Client {
        build_http_client(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_static_fetch_appends_cache_buster() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/skills.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "Rust"}])))
            .expect(1)
            .mount(&server)
            .await;

        let source = StaticHttpSource::new(client(), &format!("{}/data/", server.uri()));
        let doc = source.fetch(&Resource::Skills).await.unwrap();
        assert_eq!(doc[0]["name"], "Rust");

        let requests: Vec<Request> = server.received_requests().await.unwrap();
        let buster = requests[0]
            .url
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.into_owned())
            .expect("cache buster present");
        assert!(buster.parse::<i64>().is_ok());
    }

    #[tokio::test]
    async fn test_static_fetch_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profile.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = StaticHttpSource::new(client(), &server.uri());
        let err = source.fetch(&Resource::Profile).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let source = StaticHttpSource::new(client(), &server.uri());
        let err = source.fetch(&Resource::Projects).await.unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[tokio::test]
    async fn test_rest_route_has_trailing_slash_and_no_buster() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/blog/posts/"))
            .and(query_param_is_missing("v"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [], "count": 0, "next": null, "previous": null
            })))
            .expect(1)
            .mount(&server)
            .await;

        let source = RestSource::new(client(), &format!("{}/api/v1", server.uri()));
        let doc = source.fetch(&Resource::BlogPosts).await.unwrap();
        assert_eq!(doc["count"], 0);
    }

    #[tokio::test]
    async fn test_rest_list_follows_next_pages() {
        let server = MockServer::start().await;
        let first: Vec<Value> = (1..=10).map(|id| json!({"id": id})).collect();
        let second: Vec<Value> = (11..=15).map(|id| json!({"id": id})).collect();
        Mock::given(method("GET"))
            .and(path("/api/v1/blog/posts/"))
            .and(query_param_is_missing("page"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": first,
                "count": 15,
                "next": format!("{}/api/v1/blog/posts/?page=2", server.uri()),
                "previous": null
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/blog/posts/"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": second,
                "count": 15,
                "next": null,
                "previous": format!("{}/api/v1/blog/posts/", server.uri())
            })))
            .expect(1)
            .mount(&server)
            .await;

        let source = RestSource::new(client(), &format!("{}/api/v1", server.uri()));
        let doc = source.fetch(&Resource::BlogPosts).await.unwrap();

        let ids: Vec<u64> = doc["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, (1..=15).collect::<Vec<_>>());
        assert_eq!(doc["count"], 15);
        assert!(doc["next"].is_null());
    }

    #[tokio::test]
    async fn test_rest_relative_next_link_is_resolved() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/portfolio/skills/"))
            .and(query_param_is_missing("page"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"name": "Rust"}], "count": 2, "next": "?page=2"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/portfolio/skills/"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"name": "Go"}], "count": 2, "next": null
            })))
            .mount(&server)
            .await;

        let source = RestSource::new(client(), &format!("{}/api/v1", server.uri()));
        let doc = source.fetch(&Resource::Skills).await.unwrap();
        assert_eq!(doc["results"][1]["name"], "Go");
        assert_eq!(doc["count"], 2);
    }

    #[tokio::test]
    async fn test_directory_source_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("education.json"), r#"[{"degree": "B.Sc."}]"#).unwrap();

        let source = DirectorySource::new(dir.path());
        let doc = source.fetch(&Resource::Education).await.unwrap();
        assert_eq!(doc[0]["degree"], "B.Sc.");

        let err = source.fetch(&Resource::Skills).await.unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));

        assert!(!source.serves(&Resource::Testimonials));
        let err = source.fetch(&Resource::Testimonials).await.unwrap_err();
        assert!(matches!(err, LoadError::Unavailable { .. }));
    }
}
