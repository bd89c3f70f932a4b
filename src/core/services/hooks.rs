//! Per-resource accessors for presentation code
//!
//! A hook is the async counterpart of a component-level data subscription:
//! creating it ("mounting") spawns exactly one fetch, the result is published
//! as a [`FetchState`], and dropping it ("unmounting") aborts the fetch.
//! Hooks never coordinate with each other; the session cache is the only
//! thing they share.

use std::future::Future;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::core::data::{BlogPost, Experience, Profile, Project, Skill, Testimonial};
use crate::core::services::aggregate::{BlogQuery, PortfolioOverview};
use crate::core::services::portfolio::{ContactMessage, ContactReceipt, SharedApi};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

pub struct Hook<T> {
    state: watch::Receiver<FetchState<T>>,
    task: JoinHandle<()>,
}

impl<T: Clone + Send + Sync + 'static> Hook<T> {
    /// Mounts the hook: `fetch` runs once on a spawned task.
    pub fn spawn<F, Fut>(label: &'static str, fetch: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let (tx, rx) = watch::channel(FetchState::Loading);
        let task = tokio::spawn(async move {
            let next = match fetch().await {
                Ok(data) => FetchState::Loaded(data),
                Err(e) => FetchState::Failed(e.to_string()),
            };
            if tx.send(next).is_err() {
                debug!("{} hook unmounted before its fetch settled; result discarded", label);
            }
        });

        Self { state: rx, task }
    }

    pub fn state(&self) -> FetchState<T> {
        self.state.borrow().clone()
    }

    /// Waits until the fetch has settled and returns the final state.
    pub async fn settled(&mut self) -> FetchState<T> {
        if let Ok(state) = self.state.wait_for(|s| !s.is_loading()).await {
            return state.clone();
        }
        // Task ended without publishing (aborted or panicked)
        self.state.borrow().clone()
    }
}

impl<T> Drop for Hook<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub fn portfolio_overview(api: &SharedApi) -> Hook<PortfolioOverview> {
    let api = SharedApi::clone(api);
    Hook::spawn("portfolio", move || async move { api.portfolio_overview().await })
}

pub fn profile(api: &SharedApi) -> Hook<Profile> {
    let api = SharedApi::clone(api);
    Hook::spawn("profile", move || async move { api.profile().await })
}

pub fn skills(api: &SharedApi) -> Hook<Vec<Skill>> {
    let api = SharedApi::clone(api);
    Hook::spawn("skills", move || async move { api.skills().await })
}

pub fn projects(api: &SharedApi) -> Hook<Vec<Project>> {
    let api = SharedApi::clone(api);
    Hook::spawn("projects", move || async move { api.projects().await })
}

pub fn experience(api: &SharedApi) -> Hook<Vec<Experience>> {
    let api = SharedApi::clone(api);
    Hook::spawn("experience", move || async move { api.experience().await })
}

pub fn testimonials(api: &SharedApi) -> Hook<Vec<Testimonial>> {
    let api = SharedApi::clone(api);
    Hook::spawn("testimonials", move || async move { api.testimonials().await })
}

/// Blog listing that re-fetches only when its query actually changes.
pub struct BlogPostsHook {
    api: SharedApi,
    query: BlogQuery,
    hook: Hook<Vec<BlogPost>>,
}

impl BlogPostsHook {
    pub fn new(api: &SharedApi, query: BlogQuery) -> Self {
        let hook = Self::mount(api, &query);
        Self {
            api: SharedApi::clone(api),
            query,
            hook,
        }
    }

    fn mount(api: &SharedApi, query: &BlogQuery) -> Hook<Vec<BlogPost>> {
        let api = SharedApi::clone(api);
        let query = query.clone();
        Hook::spawn("blog posts", move || async move {
            api.blog_posts(&query).await.map(|page| page.results)
        })
    }

    pub fn query(&self) -> &BlogQuery {
        &self.query
    }

    /// Returns `true` when the query changed and a new fetch was started.
    pub fn set_query(&mut self, query: BlogQuery) -> bool {
        if query == self.query {
            return false;
        }
        self.hook = Self::mount(&self.api, &query);
        self.query = query;
        true
    }

    pub fn state(&self) -> FetchState<Vec<BlogPost>> {
        self.hook.state()
    }

    pub async fn settled(&mut self) -> FetchState<Vec<BlogPost>> {
        self.hook.settled().await
    }
}

/// Submission state for the contact form.
pub struct ContactForm {
    api: SharedApi,
    loading: bool,
    success: bool,
    error: Option<String>,
}

impl ContactForm {
    pub fn new(api: &SharedApi) -> Self {
        Self {
            api: SharedApi::clone(api),
            loading: false,
            success: false,
            error: None,
        }
    }

    pub async fn submit(&mut self, message: &ContactMessage) -> Option<ContactReceipt> {
        self.loading = true;
        self.error = None;

        let outcome = self.api.submit_contact_message(message).await;
        self.loading = false;

        match outcome {
            Ok(receipt) => {
                self.success = true;
                Some(receipt)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn succeeded(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
