use anyhow::{anyhow, bail};
use clap::{ArgGroup, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cofounder_client::api_client::HttpGenerateApi;
use cofounder_client::controller::Controller;
use cofounder_client::sample_ideas::{sample_idea, SAMPLE_IDEAS};
use cofounder_client::session::{IdeaSession, Phase};

/// Turn a startup idea into a co-founder plan (and optionally a judge pitch).
#[derive(Debug, Parser)]
#[command(name = "cofounder", version)]
#[command(group(ArgGroup::new("input").required(true).args(["idea", "example", "list_examples"])))]
struct Cli {
    /// The startup idea, as free text.
    #[arg(num_args = 1..)]
    idea: Vec<String>,

    /// Submit one of the sample ideas instead (see --list-examples).
    #[arg(long, value_name = "N")]
    example: Option<usize>,

    /// Print the numbered sample ideas and exit.
    #[arg(long)]
    list_examples: bool,

    /// Also fetch and print the hackathon judge pitch.
    #[arg(long)]
    judge: bool,

    /// Server base URL (overrides COFOUNDER_API_URL).
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    if cli.list_examples {
        for (i, idea) in SAMPLE_IDEAS.iter().enumerate() {
            println!("{}. {idea}", i + 1);
        }
        return Ok(());
    }
    let idea = match cli.example {
        Some(n) => sample_idea(n)
            .ok_or_else(|| anyhow!("no sample idea {n}, pick 1 to {}", SAMPLE_IDEAS.len()))?
            .to_string(),
        None => cli.idea.join(" "),
    };

    let api = match &cli.api_url {
        Some(url) => HttpGenerateApi::new(url)?,
        None => HttpGenerateApi::from_env()?,
    };
    info!(base_url = api.base_url(), "using cofounder API");

    let controller = Controller::new(api);
    controller.submit(&idea).await?;
    let session = controller.snapshot().await;
    if session.phase() == Phase::Error {
        bail!("{}", session.error().unwrap_or("generation failed"));
    }
    print_displayed(&session);

    if cli.judge {
        controller.toggle_judge().await;
        let session = controller.snapshot().await;
        if let Some(message) = session.error() {
            bail!("{message}");
        }
        print_displayed(&session);
    }

    Ok(())
}

fn print_displayed(session: &IdeaSession) {
    let Some(result) = session.displayed() else {
        return;
    };
    println!("=== {} ===\n", result.mode);
    if result.sections.is_empty() {
        println!("{}\n", result.raw.trim());
        return;
    }
    for section in &result.sections {
        println!("## {}\n{}\n", section.title, section.content);
    }
}
