use clap::Args;
use futures::future::join_all;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use tracing::{info, warn};

use folio::core::data::Resource;
use folio::error::{FolioError, Result};
use folio::services::Services;
use folio::utils::progress::ProgressUtils;

#[derive(Args)]
pub struct ExportArgs {
    /// Output file path (stdout when omitted)
    #[arg(short, long)]
    output: Option<String>,

    /// Keep going when a document fails to load
    #[arg(long)]
    skip_failed: bool,
}

#[derive(Serialize)]
struct PortfolioExport {
    metadata: ExportMetadata,
    documents: Map<String, Value>,
}

#[derive(Serialize)]
struct ExportMetadata {
    exported_at: String,
    tool: String,
    version: String,
    mode: String,
    source: String,
    total_documents: usize,
    skipped: Vec<String>,
}

pub async fn execute(args: ExportArgs, services: &Services) -> Result<()> {
    info!("📦 Exporting portfolio documents...");

    let api = services.api();
    let loader = api.loader();
    let resources: Vec<Resource> = Resource::ALL
        .iter()
        .filter(|r| loader.serves(r))
        .cloned()
        .collect();

    let pb = ProgressUtils::create_export_progress(resources.len() as u64);
    let loads = resources.iter().map(|resource| {
        let pb = pb.clone();
        async move {
            let result = loader.load(resource).await;
            pb.inc(1);
            pb.set_message(resource.name());
            (resource, result)
        }
    });
    let results = join_all(loads).await;
    pb.finish_and_clear();

    let mut documents = Map::new();
    let mut skipped = Vec::new();
    for (resource, result) in results {
        match result {
            Ok(document) => {
                documents.insert(resource.name(), Value::clone(&document));
            }
            Err(e) if args.skip_failed => {
                warn!("Skipping {}: {}", resource, e);
                skipped.push(resource.name());
            }
            Err(e) => return Err(e),
        }
    }

    let config = services.config();
    let export = PortfolioExport {
        metadata: ExportMetadata {
            exported_at: chrono::Utc::now().to_rfc3339(),
            tool: "folio-cli".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            mode: config.mode.to_string(),
            source: loader.source().location(),
            total_documents: documents.len(),
            skipped,
        },
        documents,
    };

    let output = serde_json::to_string_pretty(&export).map_err(|e| FolioError::Internal(e.into()))?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, output).map_err(|e| FolioError::Internal(e.into()))?;
        info!("✅ Exported {} documents to {}", export.metadata.total_documents, output_path);
    } else {
        println!("{}", output);
    }

    let stats = api.cache_stats();
    info!(
        "Cache: {} entries, {} requests, {:.1}% hit rate",
        stats.total_entries, stats.total_requests, stats.hit_rate_percent
    );
    Ok(())
}
