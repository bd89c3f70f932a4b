use clap::{Args, Subcommand};

use folio::config::env::EnvParser;
use folio::config::{Config as AppConfig, StaticLocation};
use folio::error::Result;

use super::print_json;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}

/// `config_file` is the `--config` value, if one was given.
pub async fn execute(args: ConfigArgs, config: &AppConfig, config_file: Option<&str>, json: bool) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            if json {
                return print_json(config);
            }

            let location = match config.static_location() {
                StaticLocation::Http(_) => "http",
                StaticLocation::Directory(_) => "directory",
            };
            println!("🔧 Current configuration:");
            println!("  🔀 mode: {}", config.mode);
            println!("  📁 static_base: {} ({})", config.static_base, location);
            println!("  🌐 api_base_url: {}", config.api_base_url);
            println!("  ⏱️  request_timeout_secs: {}", config.request_timeout_secs);
            println!("  🐢 simulated_latency_ms: {}", config.simulated_latency_ms);
            println!("  📅 career_start_year: {}", config.career_start_year);
            println!("  ⭐ featured_projects_limit: {}", config.featured_projects_limit);
            println!("  🛠️  skills_summary_limit: {}", config.skills_summary_limit);
            println!("  🕒 recent_posts_limit: {}", config.recent_posts_limit);
            println!("  📄 page_size: {}", config.page_size);
            println!("  ✅ available_for_hire: {}", config.available_for_hire);
            println!("  💬 response_time: {}", config.response_time);

            let env_vars = EnvParser::folio_vars();
            if !env_vars.is_empty() {
                println!("\n🌍 Environment overrides:");
                for (key, value) in env_vars {
                    println!("  {} = {}", key, value);
                }
            }
        }

        ConfigCommands::Path => {
            let config_path = AppConfig::config_path(config_file)?;
            println!("{}", config_path.display());
        }
    }

    Ok(())
}
