use clap::Args;

use folio::core::data::{Education, Project};
use folio::core::services::SharedApi;
use folio::error::Result;

use super::{fetching, print_json, truncate};

#[derive(Args)]
pub struct ProjectsArgs {
    /// Show a single project by id
    #[arg(long)]
    id: Option<u64>,

    /// Only list featured projects
    #[arg(long)]
    featured: bool,
}

#[derive(Args)]
pub struct EducationArgs {
    /// Only list certificates
    #[arg(long)]
    certificates: bool,
}

pub async fn overview(api: &SharedApi, json: bool) -> Result<()> {
    let overview = fetching("Loading portfolio...", json, api.portfolio_overview()).await?;
    if json {
        return print_json(&overview);
    }

    println!("👤 {}", overview.profile.display_name());
    if let Some(title) = &overview.profile.title {
        println!("   {}", title);
    }
    println!(
        "📊 {} projects, {} years of experience",
        overview.total_projects, overview.years_experience
    );

    println!("\n⭐ Featured projects:");
    if overview.featured_projects.is_empty() {
        println!("  (none)");
    }
    for project in &overview.featured_projects {
        print_project_line(project);
    }

    println!("\n🛠️  Top skills:");
    for skill in &overview.skills_summary {
        println!("  {:<24} {:>3}%", skill.name, skill.proficiency);
    }
    Ok(())
}

pub async fn profile(api: &SharedApi, json: bool) -> Result<()> {
    let profile = fetching("Loading profile...", json, api.profile()).await?;
    if json {
        return print_json(&profile);
    }

    println!("👤 {}", profile.display_name());
    if let Some(title) = &profile.title {
        println!("  💼 {}", title);
    }
    if let Some(location) = &profile.location {
        println!("  📍 {}", location);
    }
    if let Some(email) = &profile.email {
        println!("  📧 {}", email);
    }
    for url in [&profile.github_url, &profile.linkedin_url, &profile.twitter_url].into_iter().flatten() {
        println!("  🔗 {}", url);
    }
    if let Some(bio) = &profile.bio {
        println!("\n{}", bio);
    }
    if let Some(about) = &profile.about {
        for highlight in &about.highlights {
            println!("  • {}", highlight);
        }
        if !about.services.is_empty() {
            println!("\n🧰 Services:");
            for service in &about.services {
                println!("  {}", service.title);
            }
        }
    }
    Ok(())
}

pub async fn skills(api: &SharedApi, json: bool) -> Result<()> {
    let skills = fetching("Loading skills...", json, api.skills()).await?;
    if json {
        return print_json(&skills);
    }

    println!("🛠️  {} skills:", skills.len());
    for skill in &skills {
        let category = skill.category.as_deref().unwrap_or("-");
        println!("  {:<24} {:>3}%  {}", skill.name, skill.proficiency, category);
    }
    Ok(())
}

pub async fn projects(args: ProjectsArgs, api: &SharedApi, json: bool) -> Result<()> {
    if let Some(id) = args.id {
        let project = fetching("Loading project...", json, api.project(id)).await?;
        if json {
            return print_json(&project);
        }
        print_project_details(&project);
        return Ok(());
    }

    let mut projects = fetching("Loading projects...", json, api.projects()).await?;
    if args.featured {
        projects.retain(|p| p.featured);
    }
    if json {
        return print_json(&projects);
    }

    println!("📁 {} projects:", projects.len());
    for project in &projects {
        print_project_line(project);
    }
    Ok(())
}

pub async fn experience(api: &SharedApi, json: bool) -> Result<()> {
    let experience = fetching("Loading experience...", json, api.experience()).await?;
    if json {
        return print_json(&experience);
    }

    println!("💼 Experience:");
    for entry in &experience {
        let start = entry.start_date.as_deref().unwrap_or("?");
        let end = if entry.is_current() {
            "present"
        } else {
            entry.end_date.as_deref().unwrap_or("?")
        };
        println!("  {} @ {} ({} - {})", entry.position, entry.company, start, end);
        for achievement in &entry.achievements {
            println!("    • {}", achievement);
        }
    }
    Ok(())
}

pub async fn education(args: EducationArgs, api: &SharedApi, json: bool) -> Result<()> {
    let entries = if args.certificates {
        fetching("Loading certificates...", json, api.certificates()).await?
    } else {
        fetching("Loading education...", json, api.education()).await?
    };
    if json {
        return print_json(&entries);
    }

    println!("{}", if args.certificates { "📜 Certificates:" } else { "🎓 Education:" });
    for entry in &entries {
        print_education_line(entry);
    }
    Ok(())
}

pub async fn testimonials(api: &SharedApi, json: bool) -> Result<()> {
    let testimonials = fetching("Loading testimonials...", json, api.testimonials()).await?;
    if json {
        return print_json(&testimonials);
    }

    if testimonials.is_empty() {
        println!("💬 No testimonials available");
        return Ok(());
    }
    println!("💬 Testimonials:");
    for testimonial in &testimonials {
        let role = [testimonial.role.as_deref(), testimonial.company.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        println!("  \"{}\"", truncate(&testimonial.content, 120));
        if role.is_empty() {
            println!("    - {}", testimonial.name);
        } else {
            println!("    - {} ({})", testimonial.name, role);
        }
    }
    Ok(())
}

fn print_project_line(project: &Project) {
    let star = if project.featured { "⭐" } else { "  " };
    println!(
        "  {} [{}] {} ({})",
        star,
        project.id,
        project.title,
        project.status.as_str()
    );
}

fn print_project_details(project: &Project) {
    println!("📁 {} [{}]", project.title, project.id);
    println!("  📌 Status: {}", project.status.as_str());
    if !project.technologies.is_empty() {
        println!("  🧩 Stack: {}", project.technologies.join(", "));
    }
    if let Some(url) = &project.demo_url {
        println!("  🌐 Demo: {}", url);
    }
    if let Some(url) = &project.github_url {
        println!("  🔗 Code: {}", url);
    }
    if !project.description.is_empty() {
        println!("\n{}", project.description);
    }
}

fn print_education_line(entry: &Education) {
    let years = match (&entry.start_date, &entry.end_date) {
        (Some(start), Some(end)) => format!(" ({} - {})", start, end),
        (None, Some(end)) => format!(" ({})", end),
        _ => String::new(),
    };
    println!("  {} - {}{}", entry.degree, entry.institution, years);
    if let Some(gpa) = &entry.gpa {
        println!("    GPA: {}", gpa);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::tests::directory_api;
    use folio::error::FolioError;

    #[tokio::test]
    async fn test_overview_keeps_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = overview(&directory_api(dir.path()), true).await.unwrap_err();
        assert!(matches!(err, FolioError::Load { .. }));
    }

    #[tokio::test]
    async fn test_missing_project_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("projects.json"), r#"[{"id": 1, "title": "Engine"}]"#).unwrap();

        let args = ProjectsArgs { id: Some(7), featured: false };
        let err = projects(args, &directory_api(dir.path()), true).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
