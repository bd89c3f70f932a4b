use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use folio::core::services::UploadKind;
use folio::error::{FolioError, Result};
use folio::services::Services;

use super::{fetching, print_json};

#[derive(Args)]
pub struct UploadArgs {
    #[command(subcommand)]
    command: UploadCommands,
}

#[derive(Subcommand)]
enum UploadCommands {
    /// Upload a resume (PDF, DOC or DOCX, up to 10MB)
    Resume {
        /// File to upload
        path: PathBuf,
    },

    /// Upload an image (JPG, PNG or WEBP, up to 5MB)
    Image {
        /// File to upload
        path: PathBuf,

        /// What the image is used for
        #[arg(long = "type", value_enum, default_value_t = ImageType::Profile)]
        image_type: ImageType,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ImageType {
    Profile,
    Project,
}

impl ImageType {
    fn tag(self) -> &'static str {
        match self {
            ImageType::Profile => "profile",
            ImageType::Project => "project",
        }
    }
}

pub async fn execute(args: UploadArgs, services: &Services, json: bool) -> Result<()> {
    let (path, kind) = match args.command {
        UploadCommands::Resume { path } => (path, UploadKind::Resume),
        UploadCommands::Image { path, image_type } => (path, UploadKind::Image { tag: image_type.tag() }),
    };

    let uploader = services.create_uploader();
    let receipt = fetching("Uploading...", json, uploader.upload(&path, kind)).await?;

    if json {
        return print_json(&receipt);
    }
    if !receipt.success {
        let reason = receipt.error.unwrap_or_else(|| "upload rejected".to_string());
        return Err(FolioError::Validation(reason));
    }

    println!("✅ Uploaded {}", path.display());
    for (key, value) in &receipt.details {
        println!("  {}: {}", key, value);
    }
    Ok(())
}
