//! Booking CLI
//!
//! Command-line interface for the booking checkout API.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use booking_client::BookingClient;
use booking_repo::security::sign_payment;
use booking_types::SaveBookingRequest;

#[derive(Parser)]
#[command(name = "booking")]
#[command(author, version, about = "Booking checkout API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the booking checkout API
    #[arg(
        long,
        env = "BOOKING_API_URL",
        default_value = "http://localhost:10000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API health
    Health,
    /// Print the public gateway key
    Key,
    /// Order operations
    Order {
        #[command(subcommand)]
        action: OrderCommands,
    },
    /// Payment operations
    Payment {
        #[command(subcommand)]
        action: PaymentCommands,
    },
    /// Booking operations
    Booking {
        #[command(subcommand)]
        action: BookingCommands,
    },
}

#[derive(Subcommand)]
enum OrderCommands {
    /// Create a gateway order
    Create {
        /// Amount in rupees
        #[arg(long)]
        amount: f64,
    },
}

#[derive(Subcommand)]
enum PaymentCommands {
    /// Verify a payment signature against the server
    Verify {
        #[arg(long)]
        order_id: String,
        #[arg(long)]
        payment_id: String,
        #[arg(long)]
        signature: String,
    },
    /// Compute a payment signature locally (for test payments)
    Sign {
        #[arg(long)]
        order_id: String,
        #[arg(long)]
        payment_id: String,
        /// Gateway key secret
        #[arg(long, env = "RAZORPAY_KEY_SECRET", hide_env_values = true)]
        secret: String,
    },
}

#[derive(Subcommand)]
enum BookingCommands {
    /// Save a booking from a JSON file
    Save {
        /// Path to a booking payload as sent by the frontend
        #[arg(long)]
        file: PathBuf,
    },
}

fn read_booking(path: &PathBuf) -> Result<SaveBookingRequest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid booking payload in {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = BookingClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Key => match client.razorpay_key().await? {
            Some(key) => println!("{}", key),
            None => {
                println!("✗ Server has no gateway key configured");
                std::process::exit(1);
            }
        },

        Commands::Order { action } => match action {
            OrderCommands::Create { amount } => {
                let order = client.create_order(amount).await?;
                println!("{}", serde_json::to_string_pretty(&order)?);
            }
        },

        Commands::Payment { action } => match action {
            PaymentCommands::Verify {
                order_id,
                payment_id,
                signature,
            } => {
                let verified = client
                    .verify_payment(&order_id, &payment_id, &signature)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&verified)?);
            }
            PaymentCommands::Sign {
                order_id,
                payment_id,
                secret,
            } => {
                println!("{}", sign_payment(&order_id, &payment_id, &secret));
            }
        },

        Commands::Booking { action } => match action {
            BookingCommands::Save { file } => {
                let booking = read_booking(&file)?;
                let saved = client.save_booking(&booking).await?;
                println!("{}", serde_json::to_string_pretty(&saved)?);
            }
        },
    }

    Ok(())
}
