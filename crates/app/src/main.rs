//! Promo Code Partner CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use jiff::Timestamp;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use promocode_app::{
    context::{AppContext, StoreKind},
    domain::partners::{
        PartnersRepositoryError,
        data::{NewPartnerLimit, PartnerFilter},
        records::{PartnerLimitRecord, PartnerRecord},
        seed,
    },
};

#[derive(Debug, Parser)]
#[command(name = "promocode-app", about = "Promo code partner CLI", long_about = None)]
struct Cli {
    /// PostgreSQL connection string; the in-memory seed store is used when omitted
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Partner(PartnerCommand),
    Db(DbCommand),
}

#[derive(Debug, Args)]
struct PartnerCommand {
    #[command(subcommand)]
    command: PartnerSubcommand,
}

#[derive(Debug, Subcommand)]
enum PartnerSubcommand {
    /// List partners and their active limits
    List(ListPartnersArgs),

    /// Replace a partner's active promo code limit
    SetLimit(SetLimitArgs),

    /// Cancel a partner's active promo code limit
    CancelLimit(CancelLimitArgs),
}

#[derive(Debug, Args)]
struct ListPartnersArgs {
    /// Only list active partners
    #[arg(long)]
    active: bool,
}

#[derive(Debug, Args)]
struct SetLimitArgs {
    /// Partner UUID
    #[arg(long)]
    partner: Uuid,

    /// Maximum promo codes issuable under the new limit
    #[arg(long, allow_negative_numbers = true)]
    limit: i64,

    /// Limit expiry as an RFC 3339 timestamp
    #[arg(long)]
    ends_at: Timestamp,
}

#[derive(Debug, Args)]
struct CancelLimitArgs {
    /// Partner UUID
    #[arg(long)]
    partner: Uuid,
}

#[derive(Debug, Args)]
struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Insert the seed partners into the configured database
    Seed,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let ctx = AppContext::from_database_url(cli.database_url.as_deref())
        .await
        .map_err(|error| format!("failed to initialize app context: {error}"))?;

    match cli.command {
        Commands::Partner(PartnerCommand { command }) => match command {
            PartnerSubcommand::List(args) => list_partners(&ctx, &args).await,
            PartnerSubcommand::SetLimit(args) => set_limit(&ctx, args).await,
            PartnerSubcommand::CancelLimit(args) => cancel_limit(&ctx, &args).await,
        },
        Commands::Db(DbCommand {
            command: DbSubcommand::Seed,
        }) => seed_database(&ctx).await,
    }
}

async fn list_partners(ctx: &AppContext, args: &ListPartnersArgs) -> Result<(), String> {
    let filter = if args.active {
        PartnerFilter::active()
    } else {
        PartnerFilter::all()
    };

    let partners = ctx
        .partners
        .list_partners(filter)
        .await
        .map_err(|error| format!("failed to list partners: {error}"))?;

    for partner in &partners {
        print_partner(partner);
    }

    Ok(())
}

async fn set_limit(ctx: &AppContext, args: SetLimitArgs) -> Result<(), String> {
    let limit = ctx
        .partners
        .set_partner_limit(
            args.partner.into(),
            NewPartnerLimit {
                limit: args.limit,
                ends_at: args.ends_at,
            },
        )
        .await
        .map_err(|error| format!("failed to set limit: {error}"))?;

    print_limit(&limit);
    warn_if_ephemeral(ctx);

    Ok(())
}

async fn cancel_limit(ctx: &AppContext, args: &CancelLimitArgs) -> Result<(), String> {
    let limit = ctx
        .partners
        .cancel_partner_limit(args.partner.into())
        .await
        .map_err(|error| format!("failed to cancel limit: {error}"))?;

    print_limit(&limit);
    warn_if_ephemeral(ctx);

    Ok(())
}

async fn seed_database(ctx: &AppContext) -> Result<(), String> {
    if ctx.store != StoreKind::Postgres {
        return Err("seeding requires DATABASE_URL".to_string());
    }

    for partner in seed::partners(Timestamp::now()) {
        let uuid = partner.uuid;

        match ctx.partners_repository.create_partner(partner).await {
            Ok(_) => println!("seeded partner {uuid}"),
            Err(PartnersRepositoryError::AlreadyExists) => {
                println!("partner {uuid} already present");
            }
            Err(error) => return Err(format!("failed to seed partner {uuid}: {error}")),
        }
    }

    Ok(())
}

fn print_partner(partner: &PartnerRecord) {
    let status = if partner.is_active { "active" } else { "inactive" };

    println!(
        "{} {} ({status}) issued={}",
        partner.uuid, partner.name, partner.number_issued_promo_codes
    );

    if let Some(limit) = partner.active_limit() {
        println!("  limit {} of {} until {}", limit.uuid, limit.limit, limit.ends_at);
    }
}

fn print_limit(limit: &PartnerLimitRecord) {
    println!("partner_uuid: {}", limit.partner_uuid);
    println!("limit_uuid: {}", limit.uuid);
    println!("limit: {}", limit.limit);
    println!("ends_at: {}", limit.ends_at);

    if let Some(cancelled_at) = limit.cancelled_at {
        println!("cancelled_at: {cancelled_at}");
    }
}

fn warn_if_ephemeral(ctx: &AppContext) {
    if ctx.store == StoreKind::InMemory {
        eprintln!("note: no DATABASE_URL set, change was applied to the in-memory store only");
    }
}
