use clap::{Parser, Subcommand};

mod cli;

use cli::*;
use folio::config::Config;
use folio::error::{FolioError, Result};
use folio::services::Services;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Browse and export portfolio data from static documents or a REST backend")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (optional)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Print results as JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Profile, featured projects and top skills at a glance
    Overview,

    /// Show the profile
    Profile,

    /// List skills
    Skills,

    /// List projects or show one
    Projects(portfolio::ProjectsArgs),

    /// List work experience
    Experience,

    /// List education and certificates
    Education(portfolio::EducationArgs),

    /// List testimonials
    Testimonials,

    /// List blog posts with filters and pagination
    Blog(blog::BlogArgs),

    /// Show a single blog post
    Post(blog::PostArgs),

    /// Blog totals, categories and recent posts
    BlogStats,

    /// Contact details, messages and newsletter
    Contact(contact::ContactArgs),

    /// Upload a resume or an image to the backend
    Upload(upload::UploadArgs),

    /// Show configuration
    Config(cli::config::ConfigArgs),

    /// Export every portfolio document as one JSON bundle
    Export(export::ExportArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // JSON output keeps stderr quiet unless asked otherwise
    folio::utils::logging::init_logging(cli.verbose, cli.json && !cli.verbose)
        .map_err(FolioError::Internal)?;

    let config = Config::load(cli.config.as_deref())?;
    let services = Services::new(config)?;

    let api = services.api();
    let json = cli.json;
    match cli.command {
        Commands::Overview => portfolio::overview(&api, json).await,
        Commands::Profile => portfolio::profile(&api, json).await,
        Commands::Skills => portfolio::skills(&api, json).await,
        Commands::Projects(args) => portfolio::projects(args, &api, json).await,
        Commands::Experience => portfolio::experience(&api, json).await,
        Commands::Education(args) => portfolio::education(args, &api, json).await,
        Commands::Testimonials => portfolio::testimonials(&api, json).await,
        Commands::Blog(args) => blog::list(args, &api, json).await,
        Commands::Post(args) => blog::show(args, &api, json).await,
        Commands::BlogStats => blog::stats(&api, json).await,
        Commands::Contact(args) => contact::execute(args, &api, json).await,
        Commands::Upload(args) => upload::execute(args, &services, json).await,
        Commands::Config(args) => cli::config::execute(args, &services.config(), cli.config.as_deref(), json).await,
        Commands::Export(args) => export::execute(args, &services).await,
    }
}
