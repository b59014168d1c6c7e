use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use mindguard::risk::{recommendations_for, render_report, save_analysis, RiskAnalyzer};
use mindguard::server::{serve, AppState};
use mindguard::{scenario, ArtifactStore, Label, ModelKind};

#[derive(Parser)]
#[command(name = "mindguard", version, about = "Mental-health text analysis toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify text into a mental-state category with a pre-trained model
    Classify {
        /// Model to use: consensus, svm, logistic_regression or random_forest
        #[arg(short, long, default_value = "consensus")]
        model: String,
        /// Text to classify
        text: String,
        /// Also print the model's top-k most important features
        #[arg(short = 'k', long)]
        top_features: Option<usize>,
    },
    /// Generate a sample statement for a mental-state category
    Scenario {
        /// Category: anxiety, depression, normal or suicidal
        category: String,
        /// Seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Run a generative risk assessment on text
    Analyze {
        /// Text to assess
        text: String,
        /// Skip writing the analysis record to disk
        #[arg(long)]
        no_save: bool,
        /// Directory for saved analysis records
        #[arg(long, default_value = "analyses")]
        out_dir: PathBuf,
    },
    /// Serve the risk analyzer over HTTP
    Serve {
        /// Address to bind
        #[arg(short, long, default_value = "127.0.0.1:8000")]
        addr: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Classify {
            model,
            text,
            top_features,
        } => {
            let pipeline = ArtifactStore::new_default()?.load_pipeline()?;
            let kind = ModelKind::from_name(&model)?;
            let label = pipeline.classify(&model, &text)?;
            println!("Model: {}", kind.display_name());
            println!("Predicted state: {}", label);

            if let Some(k) = top_features {
                println!("\nTop {} features:", k);
                for (word, weight) in pipeline.top_features(&model, k)? {
                    println!("  {}: {:.4}", word, weight);
                }
            }
        }
        Command::Scenario { category, seed } => {
            let label: Label = category.parse()?;
            let text = match seed {
                Some(seed) => scenario::generate_with(label, &mut StdRng::seed_from_u64(seed)),
                None => scenario::generate(label),
            };
            println!("{}", text);
        }
        Command::Analyze {
            text,
            no_save,
            out_dir,
        } => {
            let analyzer = RiskAnalyzer::from_env()?;
            let record = analyzer.analyze(&text).await?;
            println!("{}", render_report(&record));

            let recommendations = recommendations_for(record.assessment.risk_level.as_str());
            if recommendations.urgency == "CRITICAL" {
                eprintln!("If you or someone you know is in crisis, call or text 988 now.");
            }

            if !no_save {
                let path = save_analysis(&out_dir, &record)?;
                println!("Saved analysis to {}", path.display());
            }
        }
        Command::Serve { addr } => {
            serve(addr, AppState::from_env()).await?;
        }
    }
    Ok(())
}
