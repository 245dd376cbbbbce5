use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use facedesk_core::{
    ApiClient, FaceRegistry, ModelManager, NameField, PersonSelector, RuntimeInstaller,
    ToastKind, ToastNotifier, UploadFile, VerificationWorkflow,
};
use facedesk_http::HttpClient;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod config;
mod interactive;
mod views;

use config::Config;
use views::{
    TerminalFaceList, TerminalModelList, TerminalResult, TerminalSelector, TerminalStatus,
    TerminalToast,
};

#[derive(Parser)]
#[command(name = "facedesk", about = "Face-recognition console: models, faces, verification")]
struct Cli {
    /// Backend root URL (overrides FACEDESK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List uploaded recognition models
    Models,
    /// Upload a recognition model (only the first file is used)
    UploadModel {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List registered people
    Faces,
    /// Register face images for a person, one upload per file
    Register {
        /// Person name the images belong to
        #[arg(short, long)]
        name: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Verify a probe image against a registered person
    Verify {
        /// Person to verify against; without it the backend decides
        #[arg(short, long)]
        person: Option<String>,
        file: PathBuf,
    },
    /// Show accelerator status
    Status {
        /// Print the raw JSON payload
        #[arg(long)]
        json: bool,
    },
    /// Upload and install an accelerator runtime package (.tar.gz)
    InstallRuntime {
        file: PathBuf,
    },
    /// Interactive console on stdin
    Console,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    tracing::debug!(api_url = %config.api_url, "configuration loaded");

    let api: Arc<dyn ApiClient> = Arc::new(
        HttpClient::new(&config.api_url)
            .with_context(|| format!("cannot use backend URL {}", config.api_url))?,
    );
    let toast = ToastNotifier::new(Arc::new(TerminalToast), config.toast_ttl);

    match cli.command {
        Commands::Models => {
            let models = ModelManager::new(api, toast.clone(), Arc::new(TerminalModelList));
            models.load_models().await;
        }
        Commands::UploadModel { files } => {
            let models = ModelManager::new(api, toast.clone(), Arc::new(TerminalModelList));
            models.ingest(read_files(&files).await?);
            models.settle().await;
        }
        Commands::Faces => {
            let registry = face_registry(api, &toast, NameField::default());
            registry.load_faces().await;
        }
        Commands::Register { name, files } => {
            let field = NameField::default();
            field.set(name);
            let registry = face_registry(api, &toast, field);
            registry.ingest(read_files(&files).await?);
            registry.settle().await;
        }
        Commands::Verify { person, file } => {
            let selector = PersonSelector::new(Arc::new(TerminalSelector { echo: false }));
            selector.set_options(person.into_iter().collect());
            let workflow =
                VerificationWorkflow::new(api, toast.clone(), Arc::new(TerminalResult), selector);
            let probe = UploadFile::read(&file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            workflow.verify(probe).await;
        }
        Commands::Status { json } => {
            let installer =
                RuntimeInstaller::new(api, toast.clone(), Arc::new(TerminalStatus { json }));
            installer.load_status().await;
        }
        Commands::InstallRuntime { file } => {
            let installer =
                RuntimeInstaller::new(api, toast.clone(), Arc::new(TerminalStatus { json: false }));
            let package = UploadFile::read(&file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            installer.install(package).await;
        }
        Commands::Console => {
            interactive::run(api, &config).await?;
        }
    }

    // One-shot commands fail when their last notification was an error.
    Ok(match toast.last_message() {
        Some(message) if message.kind == ToastKind::Error => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

fn face_registry(api: Arc<dyn ApiClient>, toast: &ToastNotifier, name: NameField) -> FaceRegistry {
    let selector = PersonSelector::new(Arc::new(TerminalSelector { echo: false }));
    FaceRegistry::new(
        api,
        toast.clone(),
        Arc::new(TerminalFaceList),
        selector,
        Arc::new(name),
    )
}

async fn read_files(paths: &[PathBuf]) -> Result<Vec<UploadFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let file = UploadFile::read(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        files.push(file);
    }
    Ok(files)
}
