use std::path::PathBuf;

use clap::{Parser, Subcommand};

use polyscribe::commands;
use polyscribe::logging;

#[derive(Parser)]
#[command(
    name = "polyscribe",
    about = "Speech-to-text transcription with automatic fallback across hosted providers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transcribe an audio file
    Transcribe {
        /// Path to the audio file
        file: PathBuf,
        /// Request speaker-separated output (skips providers without support)
        #[arg(long)]
        diarize: bool,
        /// Force a language code (e.g. "he"), overriding the configured default
        #[arg(long)]
        language: Option<String>,
        /// Write the transcript to a file instead of stdout
        #[arg(long)]
        output: Option<String>,
    },
    /// List configured providers in fallback order
    Providers,
    /// Store or clear the API key for a provider
    Auth {
        /// Provider id (assemblyai, whisper, cloudspeech)
        provider: String,
        /// Remove the stored key instead of setting one
        #[arg(long)]
        clear: bool,
    },
    /// Show the configuration file, creating defaults on first run
    Config,
    /// Display recent log entries
    Logs,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    logging::init_logging()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Transcribe {
            file,
            diarize,
            language,
            output,
        } => commands::handle_transcribe(file, diarize, language, output).await,
        Commands::Providers => commands::handle_providers(),
        Commands::Auth { provider, clear } => commands::handle_auth(provider, clear),
        Commands::Config => commands::handle_config(),
        Commands::Logs => commands::handle_logs(),
    }
}
