//! # Seed Data Generator
//!
//! Populates a development database with saved analyses.
//!
//! ## Usage
//! ```bash
//! # Generate 50 analyses (default)
//! cargo run -p tumdum-db --bin seed
//!
//! # Generate custom amount into a specific file
//! cargo run -p tumdum-db --bin seed -- --count 200 --db ./data/tumdum.db
//! ```
//!
//! Each analysis is a real engine run over a varied input: listed price,
//! commission tier, distance, discount, Gold and margin all cycle with the
//! row index, so the records table exercises every column.

use clap::Parser;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tumdum_core::{compute_comparison, Money, NewAnalysis, PricingInput};
use tumdum_db::{Database, DbConfig};

/// Restaurants and a signature dish for each.
const RESTAURANTS: &[(&str, &str)] = &[
    ("Zomato Express", "Butter Chicken"),
    ("Biryani House", "Hyderabadi Biryani"),
    ("Dosa Corner", "Masala Dosa"),
    ("Punjab Grill", "Dal Makhani"),
    ("Chaat Street", "Pani Puri"),
    ("Kerala Kitchen", "Appam with Stew"),
    ("Momo Point", "Steamed Momos"),
    ("Thali Junction", "Gujarati Thali"),
    ("Tandoori Nights", "Paneer Tikka"),
    ("Udupi Cafe", "Idli Vada"),
];

/// Commission tiers seen on restaurant contracts (%).
const COMMISSIONS: &[i64] = &[15, 18, 20, 22, 25, 28, 30];

/// Delivery distances in tenths of a kilometre.
const DISTANCES_DECI_KM: &[i64] = &[12, 25, 40, 55, 70, 71, 95, 130];

#[derive(Debug, Parser)]
#[command(name = "seed", about = "TumDum seed data generator")]
struct Args {
    /// Number of analyses to generate
    #[arg(short, long, default_value_t = 50)]
    count: usize,

    /// Database file path
    #[arg(short, long, env = "TUMDUM_DB_PATH", default_value = "./tumdum_dev.db")]
    db: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("🌱 TumDum Seed Data Generator");
    println!("=============================");
    println!("Database: {}", args.db.display());
    println!("Analyses: {}", args.count);
    println!();

    let db = Database::new(DbConfig::new(&args.db)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.analyses().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} analyses", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating analyses...");

    let start = std::time::Instant::now();
    let mut generated = 0;

    for index in 0..args.count {
        let analysis = match generate_analysis(index) {
            Some(analysis) => analysis,
            None => continue,
        };

        if let Err(e) = db.analyses().insert(&analysis).await {
            eprintln!("Failed to insert {}: {}", analysis.restaurant_name, e);
            continue;
        }

        generated += 1;
        if generated % 25 == 0 {
            println!("  Generated {} analyses...", generated);
        }
    }

    println!();
    println!("✓ Generated {} analyses in {:?}", generated, start.elapsed());

    let sample = db.analyses().list(Some("zom")).await?;
    println!("  Filter 'zom': {} results", sample.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds the `index`-th sample analysis.
fn generate_analysis(index: usize) -> Option<NewAnalysis> {
    let (restaurant, dish) = RESTAURANTS[index % RESTAURANTS.len()];

    // ₹120 - ₹479 listed, menu price a little below it
    let listed = 120 + ((index * 37) % 360) as i64;
    let menu = listed - 20 - (index % 3) as i64 * 10;

    let discount = match index % 4 {
        0 => Some(Money::from_rupees(listed / 10)),
        1 => Some(Money::from_rupees(25)),
        _ => None,
    };

    let input = PricingInput {
        menu_price: Some(Money::from_rupees(menu)),
        listed_price: Some(Money::from_rupees(listed)),
        commission_percent: Some(Decimal::from(COMMISSIONS[index % COMMISSIONS.len()])),
        discount,
        distance_km: Some(Decimal::new(
            DISTANCES_DECI_KM[index % DISTANCES_DECI_KM.len()],
            1,
        )),
        delivery_fee_override: (index % 9 == 0).then(|| Money::from_rupees(30)),
        gold_enabled: index % 3 == 0,
        profit_margin_percent: 1 + (index % 30) as u8,
    };

    let comparison = compute_comparison(&input)?;
    NewAnalysis::from_input(restaurant, dish, &input, &comparison).ok()
}
