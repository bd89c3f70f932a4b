//! Derived views over loaded portfolio records
//!
//! Everything here is pure: inputs are borrowed, outputs are fresh
//! collections, and the source slices are never reordered.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Reverse;

use crate::core::data::{BlogPost, Education, Profile, Project, Skill};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PortfolioOverview {
    pub profile: Profile,
    pub featured_projects: Vec<Project>,
    pub skills_summary: Vec<Skill>,
    pub total_projects: usize,
    pub years_experience: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct OverviewLimits {
    pub featured_projects: usize,
    pub skills_summary: usize,
    pub career_start_year: i32,
}

impl Default for OverviewLimits {
    fn default() -> Self {
        Self {
            featured_projects: 3,
            skills_summary: 6,
            career_start_year: 2019,
        }
    }
}

/// Featured projects are taken in source order, not ranked.
pub fn portfolio_overview(
    profile: Profile,
    projects: &[Project],
    skills: &[Skill],
    limits: &OverviewLimits,
    current_year: i32,
) -> PortfolioOverview {
    PortfolioOverview {
        profile,
        featured_projects: projects
            .iter()
            .filter(|p| p.featured)
            .take(limits.featured_projects)
            .cloned()
            .collect(),
        skills_summary: skills.iter().take(limits.skills_summary).cloned().collect(),
        total_projects: projects.len(),
        years_experience: current_year - limits.career_start_year,
    }
}

/// Filters and paging for blog listings. `None` and `0` fall back to defaults.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BlogQuery {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

pub const DEFAULT_PAGE_SIZE: u32 = 10;

impl BlogQuery {
    pub fn page(&self) -> u32 {
        self.page.filter(|p| *p > 0).unwrap_or(1)
    }

    pub fn limit_or(&self, default_limit: u32) -> u32 {
        self.limit.filter(|l| *l > 0).unwrap_or(default_limit.max(1))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub count: usize,
    pub next: Option<u32>,
    pub previous: Option<u32>,
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

/// Category, tag and text filters, newest-first ordering, then one page.
pub fn query_posts(posts: &[BlogPost], query: &BlogQuery, default_limit: u32) -> Page<BlogPost> {
    let category = non_blank(&query.category);
    let tag = non_blank(&query.tag);
    let search = non_blank(&query.search);

    let mut matching: Vec<&BlogPost> = posts
        .iter()
        .filter(|p| category.as_ref().map_or(true, |c| p.category.to_lowercase() == *c))
        .filter(|p| tag.as_ref().map_or(true, |t| p.tags.iter().any(|pt| contains_ci(pt, t))))
        .filter(|p| {
            search.as_ref().map_or(true, |term| {
                contains_ci(&p.title, term)
                    || contains_ci(&p.excerpt, term)
                    || p.tags.iter().any(|pt| contains_ci(pt, term))
            })
        })
        .collect();

    // Stable: equal dates keep source order, undated posts sink to the end.
    matching.sort_by_key(|p| Reverse(p.published_at()));

    paginate(&matching, query.page(), query.limit_or(default_limit))
}

fn paginate(items: &[&BlogPost], page: u32, limit: u32) -> Page<BlogPost> {
    let len = items.len();
    let start = ((page as usize - 1).saturating_mul(limit as usize)).min(len);
    let end = start.saturating_add(limit as usize).min(len);
    let unclamped_end = (page as usize).saturating_mul(limit as usize);

    Page {
        results: items[start..end].iter().map(|p| (*p).clone()).collect(),
        count: len,
        next: (unclamped_end < len).then(|| page + 1),
        previous: (page > 1).then(|| page - 1),
    }
}

pub fn certificates(education: &[Education]) -> Vec<Education> {
    education.iter().filter(|e| e.is_certificate()).cloned().collect()
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BlogOverview {
    pub total_posts: usize,
    pub featured_posts: Vec<BlogPost>,
    pub recent_posts: Vec<BlogPost>,
    pub categories: Vec<String>,
    pub total_views: u64,
}

pub fn blog_overview(posts: &[BlogPost], recent_limit: usize) -> BlogOverview {
    let mut categories: Vec<String> = Vec::new();
    for post in posts {
        if !categories.contains(&post.category) {
            categories.push(post.category.clone());
        }
    }

    BlogOverview {
        total_posts: posts.len(),
        featured_posts: posts.iter().filter(|p| p.featured).cloned().collect(),
        recent_posts: posts.iter().take(recent_limit).cloned().collect(),
        categories,
        total_views: posts.iter().map(|p| p.views).sum(),
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ContactOverview {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub social: Option<Value>,
    pub available_for_hire: bool,
    pub response_time: String,
}

pub fn contact_overview(profile: &Profile, available_for_hire: bool, response_time: &str) -> ContactOverview {
    ContactOverview {
        email: profile.email.clone(),
        phone: profile.phone.clone(),
        location: profile.location.clone(),
        social: profile.social.clone(),
        available_for_hire,
        response_time: response_time.to_string(),
    }
}

pub fn find_project<'a>(projects: &'a [Project], id: u64) -> Option<&'a Project> {
    projects.iter().find(|p| p.id == id)
}

/// Matches a numeric id first, then the slug.
pub fn find_post<'a>(posts: &'a [BlogPost], id_or_slug: &str) -> Option<&'a BlogPost> {
    let id = id_or_slug.trim().parse::<u64>().ok();
    posts
        .iter()
        .find(|p| Some(p.id) == id || p.slug == id_or_slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::ProjectStatus;

    fn project(id: u64, featured: bool) -> Project {
        Project {
            id,
            title: format!("Project {id}"),
            description: String::new(),
            technologies: vec![],
            status: ProjectStatus::Completed,
            image_url: None,
            demo_url: None,
            github_url: None,
            featured,
        }
    }

    fn skill(name: &str) -> Skill {
        Skill {
            id: None,
            name: name.into(),
            proficiency: 80,
            icon: None,
            description: None,
            category: None,
            is_active: true,
        }
    }

    fn post(id: u64, date: &str) -> BlogPost {
        BlogPost {
            id,
            title: format!("Post {id}"),
            slug: format!("post-{id}"),
            excerpt: String::new(),
            content: None,
            category: "General".into(),
            tags: vec![],
            publish_date: Some(date.into()),
            views: 10,
            featured: false,
            author: None,
        }
    }

    fn education(degree: &str) -> Education {
        Education {
            id: None,
            degree: degree.into(),
            institution: "Somewhere".into(),
            institution_logo: None,
            start_date: None,
            end_date: None,
            gpa: None,
            description: None,
            achievements: vec![],
        }
    }

    #[test]
    fn test_overview_featured_keeps_source_order() {
        let projects = vec![project(1, false), project(2, true), project(3, false), project(4, true)];
        let skills: Vec<Skill> = ["a", "b", "c", "d", "e", "f", "g", "h"].iter().map(|n| skill(n)).collect();

        let overview = portfolio_overview(Profile::default(), &projects, &skills, &OverviewLimits::default(), 2026);

        let ids: Vec<u64> = overview.featured_projects.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 4]);
        assert_eq!(overview.skills_summary.len(), 6);
        assert_eq!(overview.skills_summary[0].name, "a");
        assert_eq!(overview.total_projects, 4);
        assert_eq!(overview.years_experience, 7);
    }

    #[test]
    fn test_overview_caps_featured_at_three() {
        let projects: Vec<Project> = (1..=5).map(|id| project(id, true)).collect();
        let overview = portfolio_overview(Profile::default(), &projects, &[], &OverviewLimits::default(), 2024);
        let ids: Vec<u64> = overview.featured_projects.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_posts_sorted_newest_first() {
        let posts = vec![post(1, "2023-01-01"), post(2, "2024-06-01"), post(3, "2022-03-01")];
        let page = query_posts(&posts, &BlogQuery::default(), DEFAULT_PAGE_SIZE);

        let dates: Vec<&str> = page.results.iter().map(|p| p.publish_date.as_deref().unwrap()).collect();
        assert_eq!(dates, vec!["2024-06-01", "2023-01-01", "2022-03-01"]);
        // Source untouched
        assert_eq!(posts[0].id, 1);
    }

    #[test]
    fn test_pagination_next_previous() {
        let posts: Vec<BlogPost> = (1..=15).map(|i| post(i, &format!("2024-01-{:02}", i))).collect();

        let first = query_posts(&posts, &BlogQuery { page: Some(1), limit: Some(10), ..Default::default() }, 10);
        assert_eq!(first.results.len(), 10);
        assert_eq!(first.count, 15);
        assert_eq!(first.next, Some(2));
        assert_eq!(first.previous, None);

        let second = query_posts(&posts, &BlogQuery { page: Some(2), limit: Some(10), ..Default::default() }, 10);
        assert_eq!(second.results.len(), 5);
        assert_eq!(second.next, None);
        assert_eq!(second.previous, Some(1));
    }

    #[test]
    fn test_page_beyond_range_is_empty() {
        let posts: Vec<BlogPost> = (1..=3).map(|i| post(i, "2024-01-01")).collect();
        let page = query_posts(&posts, &BlogQuery { page: Some(9), ..Default::default() }, 10);
        assert!(page.results.is_empty());
        assert_eq!(page.count, 3);
        assert_eq!(page.next, None);
        assert_eq!(page.previous, Some(8));
    }

    #[test]
    fn test_zero_page_and_limit_use_defaults() {
        let posts: Vec<BlogPost> = (1..=12).map(|i| post(i, "2024-01-01")).collect();
        let page = query_posts(&posts, &BlogQuery { page: Some(0), limit: Some(0), ..Default::default() }, 10);
        assert_eq!(page.results.len(), 10);
        assert_eq!(page.next, Some(2));
    }

    #[test]
    fn test_filters_are_case_insensitive() {
        let mut rust = post(1, "2024-01-01");
        rust.category = "Engineering".into();
        rust.tags = vec!["Rust".into(), "Async".into()];
        rust.title = "Ownership explained".into();

        let mut design = post(2, "2024-02-01");
        design.category = "Design".into();
        design.tags = vec!["UI".into()];
        design.excerpt = "Notes on RUST tooling for designers".into();

        let posts = vec![rust, design];

        let by_category = query_posts(&posts, &BlogQuery { category: Some("engineering".into()), ..Default::default() }, 10);
        assert_eq!(by_category.count, 1);
        assert_eq!(by_category.results[0].id, 1);

        let by_tag = query_posts(&posts, &BlogQuery { tag: Some("asy".into()), ..Default::default() }, 10);
        assert_eq!(by_tag.results.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1]);

        let by_search = query_posts(&posts, &BlogQuery { search: Some("rust".into()), ..Default::default() }, 10);
        assert_eq!(by_search.results.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn test_undated_posts_sort_last() {
        let mut undated = post(1, "");
        undated.publish_date = None;
        let posts = vec![undated, post(2, "2020-01-01")];
        let page = query_posts(&posts, &BlogQuery::default(), 10);
        assert_eq!(page.results.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn test_certificates_filter() {
        let edu = vec![education("AWS Certified Developer"), education("B.Sc. Computer Science")];
        let certs = certificates(&edu);
        assert_eq!(certs.len(), 1);
        assert_eq!(certs[0].degree, "AWS Certified Developer");
    }

    #[test]
    fn test_blog_overview() {
        let mut a = post(1, "2024-01-01");
        a.featured = true;
        a.category = "Rust".into();
        let b = post(2, "2024-01-02");
        let mut c = post(3, "2024-01-03");
        c.category = "Rust".into();

        let overview = blog_overview(&[a, b, c], 2);
        assert_eq!(overview.total_posts, 3);
        assert_eq!(overview.featured_posts.len(), 1);
        assert_eq!(overview.recent_posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(overview.categories, vec!["Rust".to_string(), "General".to_string()]);
        assert_eq!(overview.total_views, 30);
    }

    #[test]
    fn test_find_post_by_id_or_slug() {
        let posts = vec![post(1, "2024-01-01"), post(2, "2024-01-01")];
        assert_eq!(find_post(&posts, "2").map(|p| p.id), Some(2));
        assert_eq!(find_post(&posts, "post-1").map(|p| p.id), Some(1));
        assert!(find_post(&posts, "missing").is_none());
    }
}
