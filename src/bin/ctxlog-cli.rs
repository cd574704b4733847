use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "ctxlog-cli")]
#[command(about = "Inspect and change logger levels through the ctxlog admin API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8081")]
    url: String,

    #[arg(short, long, default_value = "CHANGE_ME_IN_PRODUCTION")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered loggers and their levels
    List,
    /// Show the level of one logger
    Get { name: String },
    /// Change the level of one logger
    Set { name: String, level: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    let base = cli.url.trim_end_matches('/');
    let res = match cli.command {
        Commands::List => {
            client
                .get(format!("{}/admin/loggers", base))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Get { name } => {
            client
                .get(format!("{}/admin/loggers/{}", base, name))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Set { name, level } => {
            client
                .put(format!("{}/admin/loggers/{}", base, name))
                .headers(headers)
                .json(&serde_json::json!({ "level": level }))
                .send()
                .await?
        }
    };
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: Admin API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
