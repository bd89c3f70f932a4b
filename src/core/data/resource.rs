use std::fmt;

/// Logical documents the portfolio reads.
///
/// The name doubles as the cache key. Each source maps it to its own
/// location: a `<file>.json` document for static hosting or a REST route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resource {
    Profile,
    Skills,
    Projects,
    Experience,
    Education,
    Testimonials,
    BlogPosts,
    BlogComments(u64),
}

impl Resource {
    /// Every resource that exists independently of a parent record.
    pub const ALL: [Resource; 7] = [
        Resource::Profile,
        Resource::Skills,
        Resource::Projects,
        Resource::Experience,
        Resource::Education,
        Resource::Testimonials,
        Resource::BlogPosts,
    ];

    pub fn name(&self) -> String {
        match self {
            Resource::Profile => "profile".into(),
            Resource::Skills => "skills".into(),
            Resource::Projects => "projects".into(),
            Resource::Experience => "experience".into(),
            Resource::Education => "education".into(),
            Resource::Testimonials => "testimonials".into(),
            Resource::BlogPosts => "blog".into(),
            Resource::BlogComments(post_id) => format!("blog-comments-{post_id}"),
        }
    }

    /// Stem of the static JSON document, if the resource has one.
    pub fn static_file(&self) -> Option<&'static str> {
        match self {
            Resource::Profile => Some("profile"),
            Resource::Skills => Some("skills"),
            Resource::Projects => Some("projects"),
            Resource::Experience => Some("experience"),
            Resource::Education => Some("education"),
            Resource::BlogPosts => Some("blog"),
            Resource::Testimonials | Resource::BlogComments(_) => None,
        }
    }

    /// Route below the API base, without leading or trailing slash.
    pub fn rest_route(&self) -> String {
        match self {
            Resource::Profile => "portfolio/profile".into(),
            Resource::Skills => "portfolio/skills".into(),
            Resource::Projects => "portfolio/projects".into(),
            Resource::Experience => "portfolio/experience".into(),
            Resource::Education => "portfolio/education".into(),
            Resource::Testimonials => "portfolio/testimonials".into(),
            Resource::BlogPosts => "blog/posts".into(),
            Resource::BlogComments(post_id) => format!("blog/posts/{post_id}/comments"),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
