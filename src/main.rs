use anyhow::Result;
use std::env;
use std::path::Path;

use marine_voting::{
    default_catalog, load_catalog_csv, seed_catalog, Aggregator, Catalog, Config, Store,
    VoteLedger,
};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("seed") => run_seed(args.get(2).map(Path::new))?,
        Some("report") | None => run_report()?,
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Usage: marine-voting [seed [animals.csv] | report]");
            std::process::exit(1);
        }
    }

    Ok(())
}

fn run_seed(csv_path: Option<&Path>) -> Result<()> {
    let config = Config::load();

    println!("🌊 Marine Voting - Catalog Seeding");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // 1. Collect seed rows
    let seeds = match csv_path {
        Some(path) => {
            println!("\n📂 Loading seed file {:?}...", path);
            let seeds = load_catalog_csv(path)?;
            println!("✓ Loaded {} animals from CSV", seeds.len());
            seeds
        }
        None => {
            println!("\n📂 Using built-in catalog...");
            default_catalog()
        }
    };

    // 2. Open database
    println!("\n🔧 Opening database {:?}...", config.db_path);
    let store = Store::open(&config.db_path)?;
    println!("✓ Database initialized with WAL mode");

    // 3. Seed
    println!("\n💾 Seeding catalog...");
    seed_catalog(&store, &seeds)?;

    // 4. Verify
    let catalog = Catalog::new(store);
    println!("\n✓ Catalog contains {} animals", catalog.count()?);

    Ok(())
}

fn run_report() -> Result<()> {
    let config = Config::load();

    if !config.db_path.exists() {
        eprintln!("❌ Database not found at {:?}", config.db_path);
        eprintln!("   Run: marine-voting seed");
        eprintln!("   to create and seed it first.");
        std::process::exit(1);
    }

    let store = Store::open(&config.db_path)?;
    let catalog = Catalog::new(store.clone());
    let ledger = VoteLedger::new(store);
    let aggregator = Aggregator::new(catalog.clone(), ledger);

    println!("🌊 Marine Voting - Report");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Animals: {}", catalog.count()?);
    println!("Votes:   {}", aggregator.total_votes()?);

    println!("\n🏆 Leaderboard");
    let board = aggregator.leaderboard(config.leaderboard_limit)?;
    if board.is_empty() {
        println!("   (catalog is empty)");
    }
    for (i, entry) in board.iter().enumerate() {
        println!(
            "{:>3}. {:<25} {:>5} votes  ({})",
            i + 1,
            entry.animal.name,
            entry.votes,
            entry.animal.category
        );
    }

    Ok(())
}
