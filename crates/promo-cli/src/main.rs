//! `promo` CLI: resolve hotel promotions against a JSON snapshot from the command line.
//!
//! Every subcommand reads the promotion list as returned by `GET /api/KhuyenMai`
//! (a JSON array, localized field names) from `-i FILE` or stdin.
//!
//! ## Usage
//!
//! ```sh
//! # Best promotion for a room at a given nightly price
//! promo best -i promotions.json --room 101 --price 200000 --as-of 2025-01-15
//!
//! # Which rooms/services are blocked for a new promotion's date range
//! promo conflicts -i promotions.json --start 2025-06-01 --end 2025-06-30
//!
//! # Validate a new or edited promotion before saving it
//! promo check -i promotions.json --candidate draft.json
//!
//! # Derived status of every promotion, optionally filtered
//! promo status -i promotions.json --status expired
//!
//! # Price a whole booking selection
//! promo quote -i promotions.json --lines booking.json
//!
//! # Plain discount arithmetic
//! promo price --price 100000 --percent 20
//! ```
//!
//! The evaluation date comes from `--as-of`, then `PROMO_AS_OF`, then today's
//! local date. Logging goes to stderr and is controlled by `RUST_LOG`.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use promo_engine::{
    DiscountType, Promotion, PromotionFilter, PromotionStatus, QuoteLine, ResourceRef,
    WirePromotion,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::{self, Read};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "promo",
    version,
    about = "Hotel promotion resolution CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Evaluation date (YYYY-MM-DD); defaults to today
    #[arg(long, global = true, env = "PROMO_AS_OF")]
    as_of: Option<NaiveDate>,

    /// Log engine decisions to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct SnapshotArgs {
    /// Promotion snapshot file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ResourceArgs {
    /// Room id
    #[arg(long)]
    room: Option<String>,
    /// Service id
    #[arg(long)]
    service: Option<String>,
}

impl ResourceArgs {
    fn to_ref(&self) -> Result<ResourceRef> {
        match (&self.room, &self.service) {
            (Some(room), _) => Ok(ResourceRef::room(room.clone())),
            (None, Some(service)) => Ok(ResourceRef::service(service.clone())),
            (None, None) => anyhow::bail!("one of --room or --service is required"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Select the best applicable promotion for a room or service
    Best {
        #[command(flatten)]
        snapshot: SnapshotArgs,
        #[command(flatten)]
        resource: ResourceArgs,
        /// Base price in whole currency units
        #[arg(long)]
        price: Decimal,
    },
    /// List every promotion applicable to a room or service
    Available {
        #[command(flatten)]
        snapshot: SnapshotArgs,
        #[command(flatten)]
        resource: ResourceArgs,
    },
    /// Build the conflict index for a candidate date range
    Conflicts {
        #[command(flatten)]
        snapshot: SnapshotArgs,
        /// Candidate start date
        #[arg(long)]
        start: NaiveDate,
        /// Candidate end date
        #[arg(long)]
        end: NaiveDate,
        /// Promotion id to leave out (the one being edited)
        #[arg(long)]
        exclude: Option<String>,
    },
    /// Validate a candidate promotion's assignments against the snapshot
    Check {
        #[command(flatten)]
        snapshot: SnapshotArgs,
        /// File holding the candidate promotion record
        #[arg(long)]
        candidate: String,
    },
    /// Show each promotion's derived status
    Status {
        #[command(flatten)]
        snapshot: SnapshotArgs,
        /// Only show promotions with this derived status
        #[arg(long)]
        status: Option<String>,
        /// Only show promotions with this discount type
        #[arg(long)]
        discount_type: Option<String>,
    },
    /// Price a booking selection with the best promotion per line
    Quote {
        #[command(flatten)]
        snapshot: SnapshotArgs,
        /// File holding a JSON array of {resource, unit_price, quantity} lines
        #[arg(long)]
        lines: String,
    },
    /// Apply a single discount to a price
    Price {
        /// Base price in whole currency units
        #[arg(long)]
        price: Decimal,
        /// Percent off, 0-100
        #[arg(long, conflicts_with = "amount", required_unless_present = "amount")]
        percent: Option<Decimal>,
        /// Fixed amount off
        #[arg(long)]
        amount: Option<Decimal>,
    },
}

#[derive(Serialize)]
struct StatusRow<'a> {
    id: &'a str,
    name: &'a str,
    status: PromotionStatus,
}

#[derive(Serialize)]
struct PriceOutput {
    base_price: Decimal,
    discounted_price: Decimal,
    savings: Decimal,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let as_of = cli
        .as_of
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    debug!(%as_of, "evaluation date");

    match cli.command {
        Commands::Best {
            snapshot,
            resource,
            price,
        } => {
            let promotions = load_promotions(snapshot.input.as_deref())?;
            let selection =
                promo_engine::select_best_promotion(&promotions, &resource.to_ref()?, price, as_of);
            write_json(snapshot.output.as_deref(), &selection)?;
        }
        Commands::Available { snapshot, resource } => {
            let promotions = load_promotions(snapshot.input.as_deref())?;
            let available =
                promo_engine::available_promotions(&promotions, &resource.to_ref()?, as_of);
            write_json(snapshot.output.as_deref(), &available)?;
        }
        Commands::Conflicts {
            snapshot,
            start,
            end,
            exclude,
        } => {
            anyhow::ensure!(start <= end, "--start {} is after --end {}", start, end);
            let promotions = load_promotions(snapshot.input.as_deref())?;
            let index =
                promo_engine::build_conflict_index(&promotions, start, end, exclude.as_deref());
            write_json(snapshot.output.as_deref(), &index)?;
        }
        Commands::Check {
            snapshot,
            candidate,
        } => {
            let promotions = load_promotions(snapshot.input.as_deref())?;
            let candidate = load_candidate(&candidate)?;
            promo_engine::validate_assignment(&promotions, &candidate, as_of)
                .with_context(|| format!("Promotion {} cannot be saved", candidate.id))?;
            info!(promotion = %candidate.id, "assignment accepted");
            write_json(
                snapshot.output.as_deref(),
                &serde_json::json!({ "id": candidate.id, "valid": true }),
            )?;
        }
        Commands::Status {
            snapshot,
            status,
            discount_type,
        } => {
            let filter = PromotionFilter {
                status: status
                    .as_deref()
                    .map(str::parse::<PromotionStatus>)
                    .transpose()?,
                discount_type: discount_type
                    .as_deref()
                    .map(str::parse::<DiscountType>)
                    .transpose()?,
            };
            let promotions = load_promotions(snapshot.input.as_deref())?;
            let rows: Vec<StatusRow<'_>> = filter
                .apply(&promotions, as_of)
                .into_iter()
                .map(|p| StatusRow {
                    id: &p.id,
                    name: &p.name,
                    status: p.status_on(as_of),
                })
                .collect();
            write_json(snapshot.output.as_deref(), &rows)?;
        }
        Commands::Quote { snapshot, lines } => {
            let promotions = load_promotions(snapshot.input.as_deref())?;
            let raw = read_input(Some(&lines))?;
            let lines: Vec<QuoteLine> =
                serde_json::from_str(&raw).context("Failed to parse booking lines")?;
            let quote = promo_engine::quote(&promotions, &lines, as_of)
                .context("Failed to price booking")?;
            write_json(snapshot.output.as_deref(), &quote)?;
        }
        Commands::Price {
            price,
            percent,
            amount,
        } => {
            let (discount_type, value) = match (percent, amount) {
                (Some(v), _) => (DiscountType::Percent, v),
                (None, Some(v)) => (DiscountType::Amount, v),
                (None, None) => anyhow::bail!("one of --percent or --amount is required"),
            };
            let discounted = promo_engine::compute_discounted_price(price, discount_type, value)?;
            write_json(
                None,
                &PriceOutput {
                    base_price: price,
                    discounted_price: discounted,
                    savings: promo_engine::savings(price, discounted),
                },
            )?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_promotions(path: Option<&str>) -> Result<Vec<Promotion>> {
    let json = read_input(path)?;
    let promotions =
        promo_engine::parse_promotions(&json).context("Failed to parse promotion snapshot")?;
    debug!(count = promotions.len(), "loaded promotion snapshot");
    Ok(promotions)
}

fn load_candidate(path: &str) -> Result<Promotion> {
    let json = read_input(Some(path))?;
    let wire: WirePromotion =
        serde_json::from_str(&json).context("Failed to parse candidate promotion")?;
    Promotion::try_from(wire).context("Invalid candidate promotion")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_json<T: Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
