use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Profile {
    pub id: Option<u64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub profile_image: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub social: Option<Value>,
    pub about: Option<About>,
}

impl Profile {
    /// `first_name last_name`, falling back to `name`.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.trim().is_empty())
            .collect();

        if parts.is_empty() {
            self.name.clone().unwrap_or_default()
        } else {
            parts.join(" ")
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct About {
    pub description: Option<String>,
    pub highlights: Vec<String>,
    pub services: Vec<Service>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Service {
    pub icon: Option<String>,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Skill {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(
        default,
        alias = "proficiency_level",
        alias = "level",
        deserialize_with = "proficiency"
    )]
    pub proficiency: u8,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectStatus {
    Completed,
    InProgress,
    ComingSoon,
    Other(String),
}

impl ProjectStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ProjectStatus::Completed => "Completed",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::ComingSoon => "Coming Soon",
            ProjectStatus::Other(label) => label,
        }
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Completed
    }
}

impl From<String> for ProjectStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Completed" => ProjectStatus::Completed,
            "In Progress" => ProjectStatus::InProgress,
            "Coming Soon" => ProjectStatus::ComingSoon,
            _ => ProjectStatus::Other(label),
        }
    }
}

impl From<ProjectStatus> for String {
    fn from(status: ProjectStatus) -> Self {
        status.as_str().to_string()
    }
}

impl Serialize for ProjectStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProjectStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?
            .map(ProjectStatus::from)
            .unwrap_or_default())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Project {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "tech")]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Experience {
    #[serde(default)]
    pub id: Option<u64>,
    pub position: String,
    pub company: String,
    #[serde(default)]
    pub company_logo: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

impl Experience {
    pub fn is_current(&self) -> bool {
        self.end_date.as_deref().map_or(true, |d| d.trim().is_empty())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Education {
    #[serde(default)]
    pub id: Option<u64>,
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub institution_logo: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub gpa: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

impl Education {
    pub fn is_certificate(&self) -> bool {
        let degree = self.degree.to_lowercase();
        degree.contains("certified") || degree.contains("certificate")
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BlogPost {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, rename = "publishDate", alias = "publish_date", alias = "published_at")]
    pub publish_date: Option<String>,
    #[serde(default, alias = "view_count")]
    pub views: u64,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub author: Option<String>,
}

impl BlogPost {
    pub fn published_at(&self) -> Option<NaiveDateTime> {
        self.publish_date.as_deref().and_then(parse_timestamp)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Testimonial {
    pub id: Option<u64>,
    pub name: String,
    pub role: Option<String>,
    pub company: Option<String>,
    pub content: String,
    pub avatar: Option<String>,
    pub rating: Option<u8>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Comment {
    pub id: Option<u64>,
    #[serde(alias = "name")]
    pub author: String,
    pub content: String,
    pub created_at: Option<String>,
}

fn default_true() -> bool {
    true
}

fn proficiency<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let level = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    Ok(level.clamp(0.0, 100.0).round() as u8)
}

fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accepts RFC 3339 timestamps, `YYYY-MM-DD` and `YYYY-MM` dates.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(ts);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d"))
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_skill_accepts_level_aliases_and_clamps() {
        let skill: Skill = serde_json::from_value(json!({"name": "Rust", "proficiency_level": 140})).unwrap();
        assert_eq!(skill.proficiency, 100);
        assert!(skill.is_active);

        let skill: Skill = serde_json::from_value(json!({"name": "Go", "level": 72.4, "is_active": false})).unwrap();
        assert_eq!(skill.proficiency, 72);
        assert!(!skill.is_active);
    }

    #[test]
    fn test_project_status_labels() {
        let project: Project = serde_json::from_value(json!({
            "id": 1, "title": "A", "status": "In Progress", "tech": ["rust"]
        }))
        .unwrap();
        assert_eq!(project.status, ProjectStatus::InProgress);
        assert_eq!(project.technologies, vec!["rust"]);

        let project: Project = serde_json::from_value(json!({"id": 2, "title": "B", "status": "Archived"})).unwrap();
        assert_eq!(project.status, ProjectStatus::Other("Archived".into()));
        assert_eq!(serde_json::to_value(&project.status).unwrap(), json!("Archived"));

        let project: Project = serde_json::from_value(json!({"id": 3, "title": "C"})).unwrap();
        assert_eq!(project.status, ProjectStatus::Completed);
    }

    #[test]
    fn test_education_gpa_and_certificate() {
        let edu: Education = serde_json::from_value(json!({"degree": "AWS Certified Developer", "gpa": 3.8})).unwrap();
        assert_eq!(edu.gpa.as_deref(), Some("3.8"));
        assert!(edu.is_certificate());

        let edu: Education = serde_json::from_value(json!({"degree": "B.Sc. Computer Science"})).unwrap();
        assert!(!edu.is_certificate());
    }

    #[test]
    fn test_experience_current_when_end_missing() {
        let exp: Experience = serde_json::from_value(json!({"position": "Engineer", "company": "Acme"})).unwrap();
        assert!(exp.is_current());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-06-01").is_some());
        assert!(parse_timestamp("2024-06").is_some());
        assert!(parse_timestamp("2024-06-01T10:00:00Z").is_some());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2024-06-01T10:00:00Z") > parse_timestamp("2024-06-01"));
    }

    #[test]
    fn test_display_name_fallback() {
        let profile = Profile { name: Some("Ada".into()), ..Default::default() };
        assert_eq!(profile.display_name(), "Ada");

        let profile = Profile {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            ..Default::default()
        };
        assert_eq!(profile.display_name(), "Ada Lovelace");
    }
}
