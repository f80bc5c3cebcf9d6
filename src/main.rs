use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use chrono::DateTime;
use clap::Parser;
use stackx_topn::{Config, Error, Result, RetrievalRequest, Retriever};

#[derive(Parser, Debug)]
#[command(
    name = "stackx-topn",
    version,
    about = "Most viewed unanswered Stack Exchange questions for a tag",
    long_about = "Searches a Stack Exchange site for questions with the given tag created since \
                  --from-date, drops the answered ones and prints the N most viewed as JSON. \
                  Pages are fetched concurrently in groups of at most --batch-width."
)]
struct Cli {
    /// Tag the questions must carry
    #[arg(short, long)]
    tag: String,

    /// Substring the title must contain
    #[arg(short, long, default_value = "")]
    in_title: String,

    /// Creation-time lower bound in epoch seconds (defaults to a week ago)
    #[arg(short, long, value_name = "EPOCH")]
    from_date: Option<i64>,

    /// Maximum number of pages fetched concurrently
    #[arg(short, long)]
    batch_width: Option<usize>,

    /// Number of questions to return
    #[arg(short = 'n', long)]
    top_n: Option<usize>,

    /// Questions per page
    #[arg(long)]
    page_size: Option<u32>,

    /// Site to search (e.g. "superuser")
    #[arg(long)]
    site: Option<String>,

    /// JSON config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    Error::config("config", format!("cannot read {}: {}", path.display(), e))
                })?;
                serde_json::from_str(&raw)?
            }
            None => Config::default(),
        };
        if let Some(site) = &self.site {
            config.api.site = site.clone();
        }
        Ok(config)
    }

    fn request(&self, retriever: &Retriever) -> Result<RetrievalRequest> {
        let mut request = retriever.request(&self.tag).in_title(&self.in_title);
        if let Some(secs) = self.from_date {
            let from = DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| Error::config("from_date", format!("{} is out of range", secs)))?;
            request = request.from_date(from);
        }
        if let Some(width) = self.batch_width {
            request = request.batch_width(width);
        }
        if let Some(n) = self.top_n {
            request = request.top_n(n);
        }
        if let Some(size) = self.page_size {
            request = request.page_size(size);
        }
        Ok(request)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_transport() => {
            tracing::error!(error = %e, "transport error");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(kind = e.kind(), page = ?e.page(), error = %e, "retrieval error");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let retriever = Retriever::new(cli.load_config()?)?;
    let request = cli.request(&retriever)?;

    let start = Instant::now();
    let questions = retriever.top_unanswered(&request).await?;
    let output = if cli.compact {
        serde_json::to_string(&questions)?
    } else {
        serde_json::to_string_pretty(&questions)?
    };
    println!("{}", output);
    tracing::info!(
        elapsed_secs = start.elapsed().as_secs_f64(),
        "batch processing time"
    );
    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stackx_topn=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
