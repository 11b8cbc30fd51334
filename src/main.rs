use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use fare_engine::pricing::requests::EstimateRequest;
use fare_engine::pricing::responses::PricingErrorResponse;
use fare_engine::pricing::{calculate_estimate, Coordinate, EstimateOptions, QuoteService};
use fare_engine::{AppError, Config};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Price a trip between two points
    Estimate {
        #[arg(long)]
        service: String,
        /// Pickup as "lat,lon"
        #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
        from: Coordinate,
        /// Drop as "lat,lon"
        #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
        to: Coordinate,
        #[arg(long)]
        loading: bool,
        #[arg(long)]
        hours: Option<Decimal>,
        #[arg(long)]
        surge: Option<Decimal>,
    },
    /// Issue a quote for an estimate request (JSON from a file or stdin)
    Quote {
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// List offered services
    Services,
    /// Show the rate card of a service
    Rates { service: String },
    /// Show the surge currently in effect
    Surge { service: String },
}

fn parse_coordinate(raw: &str) -> Result<Coordinate, String> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected \"lat,lon\", got {:?}", raw))?;
    let latitude = lat.trim().parse::<f64>().map_err(|e| format!("latitude: {}", e))?;
    let longitude = lon.trim().parse::<f64>().map_err(|e| format!("longitude: {}", e))?;
    Ok(Coordinate::new(latitude, longitude))
}

fn print_json<T: Serialize>(value: &T) -> fare_engine::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_request(file: Option<PathBuf>) -> fare_engine::Result<EstimateRequest> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    if raw.trim().is_empty() {
        return Err(AppError::InvalidArgument("empty estimate request".to_string()));
    }
    Ok(serde_json::from_str(&raw)?)
}

async fn run(command: Command, service: &QuoteService) -> fare_engine::Result<()> {
    match command {
        Command::Estimate {
            service: service_type,
            from,
            to,
            loading,
            hours,
            surge,
        } => {
            let options = EstimateOptions {
                loading_required: loading,
                hours,
                surge_multiplier: surge,
            };
            let estimate = calculate_estimate(&service_type, from, to, &options, None)?;
            print_json(&estimate)
        }
        Command::Quote { file } => {
            let request = read_request(file)?;
            let quote = service.quote(&request, None).await?;
            print_json(quote.as_ref())
        }
        Command::Services => print_json(&service.service_catalog()),
        Command::Rates { service: service_type } => print_json(&service.rate_card(&service_type)?),
        Command::Surge { service: service_type } => {
            print_json(&service.current_surge(&service_type, None)?)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fare_engine=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let service = QuoteService::new(&config);

    if let Err(err) = run(cli.command, &service).await {
        if let AppError::Pricing(pricing_err) = &err {
            print_json(&PricingErrorResponse::from(pricing_err))?;
        }
        tracing::error!("{}", err);
        std::process::exit(err.exit_code());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        let c = parse_coordinate("28.6139, 77.2090").unwrap();
        assert_eq!(c, Coordinate::new(28.6139, 77.2090));
        assert_eq!(parse_coordinate("-6.2,106.8").unwrap().latitude, -6.2);
        assert!(parse_coordinate("28.6").is_err());
        assert!(parse_coordinate("north,east").is_err());
    }

    #[test]
    fn test_cli_parses_estimate() {
        let cli = Cli::try_parse_from([
            "fare-quote", "estimate", "--service", "truck", "--from", "-6.2,106.8", "--to", "-6.9,107.6",
            "--loading", "--surge", "1.5",
        ])
        .unwrap();
        match cli.command {
            Command::Estimate { service, from, loading, surge, .. } => {
                assert_eq!(service, "truck");
                assert_eq!(from.latitude, -6.2);
                assert!(loading);
                assert_eq!(surge, Some(Decimal::new(15, 1)));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
