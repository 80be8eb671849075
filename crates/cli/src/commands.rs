//! Subcommands, one per backend operation.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Subcommand};
use report_api::ReportApiClient;
use reports::{Material, NewReport, OpenReportRequest, PrefetchedSearch, ReportId, ReportPatch};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the backend is up
    Health,

    /// List all reports
    List,

    /// Show one report
    Get {
        /// Report ID
        id: String,
    },

    /// Create a report
    Create {
        #[clap(long)]
        title: String,

        /// Report type (defaults to "open_report")
        #[clap(long = "type", value_name = "TYPE")]
        kind: Option<String>,

        #[clap(flatten)]
        content: ContentArgs,

        /// Source reference (repeatable)
        #[clap(long = "source", value_name = "SOURCE")]
        sources: Vec<String>,
    },

    /// Update fields of an existing report
    Update {
        /// Report ID
        id: String,

        #[clap(long)]
        title: Option<String>,

        #[clap(flatten)]
        content: ContentArgs,

        /// Replacement source list (repeatable)
        #[clap(long = "source", value_name = "SOURCE")]
        sources: Vec<String>,

        /// Replace the source list with an empty one
        #[clap(long, conflicts_with = "sources")]
        clear_sources: bool,
    },

    /// Delete a report
    Delete {
        /// Report ID
        id: String,
    },

    /// Upload a .txt, .pdf or .docx file and print the extracted text
    Upload {
        path: PathBuf,
    },

    /// Search for material before generating a report
    Search {
        #[clap(flatten)]
        payload: PayloadArgs,
    },

    /// Generate a report with the AI backend
    Generate {
        #[clap(flatten)]
        payload: PayloadArgs,

        /// Confirmed search results (output of `search`) to reuse instead of searching again
        #[clap(long, value_name = "FILE")]
        search_results: Option<PathBuf>,
    },
}

/// Report body, given inline or read from a file.
#[derive(Args, Debug, Default)]
pub struct ContentArgs {
    /// Report content
    #[clap(long, conflicts_with = "content_file")]
    content: Option<String>,

    /// Read report content from a file
    #[clap(long, value_name = "FILE")]
    content_file: Option<PathBuf>,
}

impl ContentArgs {
    async fn resolve(&self) -> Result<Option<String>> {
        match (&self.content, &self.content_file) {
            (Some(text), _) => Ok(Some(text.clone())),
            (None, Some(path)) => Ok(Some(read_text(path).await?)),
            (None, None) => Ok(None),
        }
    }
}

/// AI request payload, given as a JSON file or assembled from flags.
#[derive(Args, Debug, Default)]
pub struct PayloadArgs {
    /// Full JSON payload; the other payload flags are ignored when set
    #[clap(long, value_name = "FILE")]
    payload: Option<PathBuf>,

    #[clap(long)]
    title: Option<String>,

    #[clap(long)]
    outline: Option<String>,

    #[clap(long)]
    draft: Option<String>,

    /// Local text file used as material (repeatable)
    #[clap(long = "material", value_name = "FILE")]
    materials: Vec<PathBuf>,

    /// File uploaded to the backend first and used as material (repeatable)
    #[clap(long = "upload", value_name = "FILE")]
    uploads: Vec<PathBuf>,

    /// Let the backend search the web before writing
    #[clap(long)]
    web_search: bool,
}

impl PayloadArgs {
    /// Builds the JSON payload. Files named by `--upload` are sent to the backend here.
    async fn build(&self, client: &ReportApiClient) -> Result<Value> {
        if let Some(path) = &self.payload {
            let raw = read_text(path).await?;
            return serde_json::from_str(&raw)
                .with_context(|| format!("{} is not valid JSON", path.display()));
        }

        let mut materials = Vec::with_capacity(self.materials.len() + self.uploads.len());
        for path in &self.materials {
            let mut material = Material::from_text(read_text(path).await?);
            material.name = file_name(path);
            materials.push(material);
        }
        for path in &self.uploads {
            let uploaded = client.upload_path(path).await?;
            info!(file = %uploaded.name, file_id = %uploaded.file_id, "uploaded material");
            materials.push(Material::from(uploaded));
        }

        let user_config = self.web_search.then(|| {
            let mut config = Map::new();
            config.insert("web_search_enabled".to_string(), Value::Bool(true));
            config
        });

        let request = OpenReportRequest {
            title: self.title.clone(),
            outline: self.outline.clone(),
            draft: self.draft.clone(),
            materials,
            user_config,
            ..OpenReportRequest::default()
        };
        Ok(serde_json::to_value(request)?)
    }
}

/// Runs one subcommand and prints its result.
pub async fn run(client: &ReportApiClient, command: Command) -> Result<()> {
    match command {
        Command::Health => print_json(&client.health().await?),
        Command::List => print_json(&client.list_reports().await?),
        Command::Get { id } => print_json(&client.get_report(&report_id(id)?).await?),
        Command::Create {
            title,
            kind,
            content,
            sources,
        } => {
            let content = content
                .resolve()
                .await?
                .ok_or_else(|| anyhow!("either --content or --content-file is required"))?;
            let mut draft = NewReport::new(title, content);
            draft.kind = kind;
            if !sources.is_empty() {
                draft.sources = Some(sources);
            }
            let report = client.create_report(&draft).await?;
            info!(id = %report.id, "report created");
            print_json(&report)
        }
        Command::Update {
            id,
            title,
            content,
            sources,
            clear_sources,
        } => {
            let patch = ReportPatch {
                title,
                content: content.resolve().await?,
                sources: sources_update(sources, clear_sources),
            };
            if patch.is_empty() {
                return Err(anyhow!(
                    "nothing to update: pass --title, --content, --source or --clear-sources"
                ));
            }
            print_json(&client.update_report(&report_id(id)?, &patch).await?)
        }
        Command::Delete { id } => {
            let id = report_id(id)?;
            client.delete_report(&id).await?;
            info!(%id, "report deleted");
            Ok(())
        }
        Command::Upload { path } => print_json(&client.upload_path(&path).await?),
        Command::Search { payload } => {
            let payload = payload.build(client).await?;
            print_json(&client.search_for_report(&payload).await?)
        }
        Command::Generate {
            payload,
            search_results,
        } => {
            let mut payload = payload.build(client).await?;
            if let Some(path) = search_results {
                embed_search_results(&mut payload, load_search_results(&path).await?)?;
            }
            print_json(&client.generate_open_report(&payload).await?)
        }
    }
}

/// `None` leaves the stored sources untouched; `Some(vec![])` clears them.
fn sources_update(sources: Vec<String>, clear: bool) -> Option<Vec<String>> {
    if clear {
        Some(Vec::new())
    } else {
        (!sources.is_empty()).then_some(sources)
    }
}

fn report_id(raw: String) -> Result<ReportId> {
    ReportId::new(raw).ok_or_else(|| anyhow!("report id must not be empty"))
}

async fn load_search_results(path: &Path) -> Result<PrefetchedSearch> {
    let raw = read_text(path).await?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} does not contain search results", path.display()))
}

fn embed_search_results(payload: &mut Value, search: PrefetchedSearch) -> Result<()> {
    let object = payload
        .as_object_mut()
        .ok_or_else(|| anyhow!("payload must be a JSON object to embed search results"))?;
    object.insert("search_results".to_string(), serde_json::to_value(search)?);
    Ok(())
}

async fn read_text(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
