use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "monitor-cli")]
#[command(about = "Management CLI for the SSRF monitor", long_about = None)]
struct Cli {
    /// Base URL of the monitor
    #[arg(short, long, default_value = "http://localhost:3001")]
    url: String,

    /// Admin mount point
    #[arg(short, long, default_value = "/admin")]
    admin_path: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every retained capture as JSON
    List,
    /// Print one capture's request and response
    Show {
        /// Capture id as listed by `list`
        id: i64,
    },
    /// Delete all captures
    Clear,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = format!("{}{}", cli.url.trim_end_matches('/'), cli.admin_path);

    match cli.command {
        Commands::List => {
            let res = client.get(format!("{}/logs.json", base)).send().await?;
            if let Some(res) = check_status(res).await {
                let json: Value = res.json().await?;
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
        }
        Commands::Show { id } => {
            let res = client.get(format!("{}/logs/{}", base, id)).send().await?;
            if let Some(res) = check_status(res).await {
                println!("{}", res.text().await?);
            }
        }
        Commands::Clear => {
            let res = client.post(format!("{}/clear", base)).send().await?;
            if let Some(res) = check_status(res).await {
                println!("{}", res.text().await?);
            }
        }
    }

    Ok(())
}

async fn check_status(res: reqwest::Response) -> Option<reqwest::Response> {
    let status = res.status();
    if status.is_success() {
        return Some(res);
    }

    eprintln!("Error: monitor returned status {}", status);
    if let Ok(text) = res.text().await {
        eprintln!("Response: {}", text);
    }
    None
}
