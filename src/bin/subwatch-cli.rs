use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "subwatch-cli")]
#[command(about = "Operator CLI for the subscription sidecar", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show sidecar status (version, subscription, threshold)
    Status,
    /// Query the liveness verdict the orchestrator sees
    Liveness,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/status", cli.url)).send().await?;
            let status = res.status();
            if !status.is_success() {
                eprintln!("Error: sidecar returned status {}", status);
                if let Ok(text) = res.text().await {
                    eprintln!("Response: {}", text);
                }
                std::process::exit(1);
            }
            print_json(res).await?;
        }
        Commands::Liveness => {
            let res = client
                .get(format!("{}/health/liveness", cli.url))
                .send()
                .await?;
            // 503 is a valid verdict, not a transport error; print the body
            // either way and signal the verdict through the exit code.
            let healthy = res.status().is_success();
            print_json(res).await?;
            if !healthy {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

async fn print_json(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
