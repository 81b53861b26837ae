mod config;
mod gemini;
mod models;
mod tailoring;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::gemini::GeminiClient;
use crate::models::CompanyInfo;
use crate::tailoring::{ResumeTailor, TailorOutcome};

/// Sample job description for the `sample` smoke-test command.
const SAMPLE_JD: &str = "\
Software Engineer Intern

We are looking for a passionate software engineering intern to join our team.

Requirements:
- Strong programming skills in Python, Java, or C++
- Experience with data structures and algorithms
- Knowledge of web development frameworks
- Experience with machine learning is a plus

You will work on cutting-edge projects involving AI and distributed systems.";

#[derive(Parser)]
#[command(name = "tailor")]
#[command(about = "AI-assisted resume tailoring and ATS optimization", long_about = None)]
struct Cli {
    /// Defaults to `sample` when no subcommand is given.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Tailor the built-in sample job description and print the result length
    Sample,
    /// Tailor the base resume to a job description
    Tailor {
        /// File containing the job description
        #[arg(short, long)]
        jd_file: PathBuf,
        /// Optional JSON file with company information
        #[arg(short, long)]
        company_file: Option<PathBuf>,
        /// Write the tailored LaTeX here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Optimize an existing resume for applicant tracking systems
    Ats {
        /// File containing the resume to optimize
        #[arg(short, long)]
        resume_file: PathBuf,
        /// Write the optimized LaTeX here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Generate several tailored versions for comparison (JSON to stdout)
    Versions {
        /// File containing the job description
        #[arg(short, long)]
        jd_file: PathBuf,
        /// Optional JSON file with company information
        #[arg(short, long)]
        company_file: Option<PathBuf>,
        /// How many versions to generate
        #[arg(long, default_value_t = 3)]
        count: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e:#}");
            eprintln!("Set GEMINI_API_KEY in the environment or a .env file.");
            std::process::exit(1);
        }
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting tailor v{}", env!("CARGO_PKG_VERSION"));

    let gemini = GeminiClient::new(config.api_url.clone(), config.api_key.clone());
    let tailor = ResumeTailor::new(Arc::new(gemini));

    match cli.command.unwrap_or(Commands::Sample) {
        Commands::Sample => {
            let outcome = tailor.tailor_for_job(SAMPLE_JD, None).await;
            report_outcome(&outcome);
            if !outcome.is_fallback() {
                println!("Tailored resume generated successfully!");
            }
            println!("Length: {} characters", outcome.text().chars().count());
        }
        Commands::Tailor {
            jd_file,
            company_file,
            out,
        } => {
            let jd = read_input(&jd_file, "job description")?;
            let company = read_company(company_file.as_deref())?;
            let outcome = tailor.tailor_for_job(&jd, company.as_ref()).await;
            report_outcome(&outcome);
            emit(outcome.into_text(), out.as_deref())?;
        }
        Commands::Ats { resume_file, out } => {
            let resume = read_input(&resume_file, "resume")?;
            let outcome = tailor.optimize_for_ats(&resume).await;
            report_outcome(&outcome);
            emit(outcome.into_text(), out.as_deref())?;
        }
        Commands::Versions {
            jd_file,
            company_file,
            count,
        } => {
            let jd = read_input(&jd_file, "job description")?;
            let company = read_company(company_file.as_deref())?;
            let versions = tailor
                .generate_multiple_versions(&jd, company.as_ref(), count)
                .await;
            println!("{}", serde_json::to_string_pretty(&versions)?);
        }
    }

    Ok(())
}

fn read_input(path: &Path, what: &str) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what} from {}", path.display()))
}

fn read_company(path: Option<&Path>) -> Result<Option<CompanyInfo>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let raw = read_input(path, "company info")?;
    let info = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse company info JSON from {}", path.display()))?;
    Ok(Some(info))
}

fn report_outcome(outcome: &TailorOutcome) {
    match outcome {
        TailorOutcome::Generated(_) => info!("generation succeeded"),
        TailorOutcome::Fallback { reason, .. } => {
            warn!("generation failed, returning original content: {reason}")
        }
    }
}

fn emit(text: String, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!("wrote {} characters to {}", text.chars().count(), path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}
