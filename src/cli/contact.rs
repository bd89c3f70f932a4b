use clap::{Args, Subcommand};

use folio::core::services::{ContactMessage, SharedApi};
use folio::error::Result;

use super::{fetching, print_json};

#[derive(Args)]
pub struct ContactArgs {
    #[command(subcommand)]
    command: ContactCommands,
}

#[derive(Subcommand)]
enum ContactCommands {
    /// Show contact details and availability
    Info,

    /// Send a contact message
    Send {
        /// Sender name
        #[arg(long)]
        name: String,

        /// Sender email
        #[arg(long)]
        email: String,

        /// Message body
        #[arg(short, long)]
        message: String,

        /// Optional subject line
        #[arg(long)]
        subject: Option<String>,

        /// Optional phone number
        #[arg(long)]
        phone: Option<String>,
    },

    /// Subscribe an email address to the newsletter
    Subscribe {
        /// Email address
        email: String,
    },
}

pub async fn execute(args: ContactArgs, api: &SharedApi, json: bool) -> Result<()> {
    match args.command {
        ContactCommands::Info => {
            let contact = fetching("Loading contact details...", json, api.contact_overview()).await?;
            if json {
                return print_json(&contact);
            }

            println!("📇 Contact:");
            if let Some(email) = &contact.email {
                println!("  📧 {}", email);
            }
            if let Some(phone) = &contact.phone {
                println!("  📞 {}", phone);
            }
            if let Some(location) = &contact.location {
                println!("  📍 {}", location);
            }
            let availability = if contact.available_for_hire {
                "✅ Available for hire"
            } else {
                "⏸️  Not currently available"
            };
            println!("  {}", availability);
            println!("  ⏱️  Typical response: {}", contact.response_time);
        }

        ContactCommands::Send { name, email, message, subject, phone } => {
            let message = ContactMessage { name, email, message, subject, phone };
            let receipt = fetching("Sending message...", json, api.submit_contact_message(&message)).await?;
            if json {
                return print_json(&receipt);
            }
            println!("✅ {}", receipt.message);
        }

        ContactCommands::Subscribe { email } => {
            let receipt = fetching("Subscribing...", json, api.subscribe_newsletter(&email)).await?;
            if json {
                return print_json(&receipt);
            }
            println!("✅ {}", receipt.message);
        }
    }

    Ok(())
}
