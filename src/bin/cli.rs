//! Tally CLI
//!
//! Command-line interface for Tally operations:
//! - Record events
//! - List and search records
//! - Chart counts over time
//! - Check status

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tally-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Personal event tally")]
#[command(
    long_about = "Tally records timestamped events at the press of a button.\nList, search, and chart them over days, months, and years."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8090", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record an event
    Press {
        /// Label to record under (default: the server's configured label)
        label: Option<String>,
        /// Timestamp (default: now). Supports epoch millis, ISO 8601, YYYY-MM-DD, "now-7d"
        #[arg(short, long)]
        time: Option<String>,
    },

    /// List recent records, newest first
    List {
        /// Maximum rows to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Search records by label and time range
    Search {
        /// Exact label to match
        #[arg(short, long)]
        label: Option<String>,
        /// Range start (epoch millis, ISO 8601, YYYY-MM-DD, or "now-7d")
        #[arg(short, long)]
        start: Option<String>,
        /// Range end, date-only values cover the whole day
        #[arg(short, long)]
        end: Option<String>,
    },

    /// Chart counts per day, month, or year
    Chart {
        /// Bucket granularity (day, month, year)
        #[arg(short, long, default_value = "day")]
        granularity: String,
        /// Label to chart (default: the server's configured label)
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Show today and all-time counts
    Stats {
        /// Label to report on (default: the server's configured label)
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Delete a record by id
    Delete {
        /// Record id
        id: String,
    },

    /// Show server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Press { label, time } => {
            let mut body = serde_json::json!({});
            if let Some(ref label) = label {
                body["label"] = serde_json::json!(label);
            }
            if let Some(ref time) = time {
                body["timestamp"] = serde_json::json!(time);
            }

            let response = client
                .post(format!("{}/api/v1/records", cli.api_url))
                .json(&body)
                .send()
                .await?;

            if response.status().is_success() {
                let record: serde_json::Value = response.json().await?;
                println!(
                    "Recorded {} at {}",
                    record["label"].as_str().unwrap_or("-"),
                    record["time"].as_str().unwrap_or("-")
                );
            } else {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("Failed ({}): {}", status, text);
                std::process::exit(1);
            }
        }

        Commands::List { limit } => {
            let mut url = format!("{}/api/v1/records", cli.api_url);
            if let Some(limit) = limit {
                url.push_str(&format!("?limit={}", limit));
            }

            let response = client.get(&url).send().await?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("Failed to fetch records ({}): {}", status, text);
                std::process::exit(1);
            }

            let data: serde_json::Value = response.json().await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else if data["total"].as_u64() == Some(0) {
                println!("No records yet.");
                println!();
                println!("Record your first event with:");
                println!("  tally-cli press");
            } else {
                print_records(&data);
            }
        }

        Commands::Search { label, start, end } => {
            let mut params = Vec::new();
            if let Some(ref label) = label {
                params.push(format!("label={}", urlencoding::encode(label)));
            }
            if let Some(ref start) = start {
                params.push(format!("start={}", urlencoding::encode(start)));
            }
            if let Some(ref end) = end {
                params.push(format!("end={}", urlencoding::encode(end)));
            }

            let mut url = format!("{}/api/v1/search", cli.api_url);
            if !params.is_empty() {
                url.push('?');
                url.push_str(&params.join("&"));
            }

            let response = client.get(&url).send().await?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("Search failed ({}): {}", status, text);
                std::process::exit(1);
            }

            let data: serde_json::Value = response.json().await?;

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&data)?),
                _ => print_records(&data),
            }
        }

        Commands::Chart { granularity, label } => {
            let mut url = format!(
                "{}/api/v1/chart?granularity={}",
                cli.api_url,
                urlencoding::encode(&granularity)
            );
            if let Some(ref label) = label {
                url.push_str(&format!("&label={}", urlencoding::encode(label)));
            }

            let response = client.get(&url).send().await?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("Chart failed ({}): {}", status, text);
                std::process::exit(1);
            }

            let data: serde_json::Value = response.json().await?;

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&data)?),
                _ => print_chart(&data),
            }
        }

        Commands::Stats { label } => {
            let mut url = format!("{}/api/v1/stats", cli.api_url);
            if let Some(ref label) = label {
                url.push_str(&format!("?label={}", urlencoding::encode(label)));
            }

            let response = client.get(&url).send().await?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("Stats failed ({}): {}", status, text);
                std::process::exit(1);
            }

            let stats: serde_json::Value = response.json().await?;

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&stats)?),
                _ => {
                    println!("Label: {}", stats["label"].as_str().unwrap_or("-"));
                    println!("Today: {}", stats["today_count"].as_u64().unwrap_or(0));
                    println!("Total: {}", stats["total_count"].as_u64().unwrap_or(0));
                }
            }
        }

        Commands::Delete { id } => {
            let response = client
                .delete(format!("{}/api/v1/records/{}", cli.api_url, id))
                .send()
                .await?;

            if response.status().is_success() {
                println!("Deleted {}", id);
            } else if response.status() == reqwest::StatusCode::NOT_FOUND {
                eprintln!("No record with id {}", id);
                std::process::exit(1);
            } else {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("Delete failed ({}): {}", status, text);
                std::process::exit(1);
            }
        }

        Commands::Status => {
            let response = client.get(format!("{}/health", cli.api_url)).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!("Tally v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "API Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    println!("Store: {}", health["store"].as_str().unwrap_or("unknown"));

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to Tally API at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the Tally API server is running:");
                    eprintln!("  cargo run --bin tally");
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let config = tally::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

fn print_records(data: &serde_json::Value) {
    let records = match data["records"].as_array() {
        Some(r) => r,
        None => {
            println!("No data");
            return;
        }
    };

    if records.is_empty() {
        println!("No records found.");
        return;
    }

    println!("{:<36} {:<30} {}", "ID", "Time", "Label");
    println!("{}", "-".repeat(75));

    for record in records {
        println!(
            "{:<36} {:<30} {}",
            record["id"].as_str().unwrap_or("-"),
            record["time"].as_str().unwrap_or("-"),
            record["label"].as_str().unwrap_or("-")
        );
    }
}

fn print_chart(data: &serde_json::Value) {
    let points = match data["points"].as_array() {
        Some(p) => p,
        None => {
            println!("No data");
            return;
        }
    };

    if points.is_empty() {
        println!("No events recorded for this label yet");
        return;
    }

    println!("{:<12} {:>7}", "Period", "Count");
    println!("{}", "-".repeat(20));

    for point in points {
        println!(
            "{:<12} {:>7}",
            point["date"].as_str().unwrap_or("-"),
            point["count"].as_u64().unwrap_or(0)
        );
    }

    if let Some(summary) = data.get("summary") {
        println!();
        println!(
            "Total: {}  Avg: {:.1}  Max: {}  Min: {}",
            summary["total"].as_u64().unwrap_or(0),
            summary["average"].as_f64().unwrap_or(0.0),
            summary["max"].as_u64().unwrap_or(0),
            summary["min"].as_u64().unwrap_or(0)
        );
    }
}
