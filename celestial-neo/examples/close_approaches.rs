use celestial_neo::extract::{load_approaches, load_neos};
use celestial_neo::query::{create_filters, limit, QueryCriteria};
use celestial_neo::NeoDatabase;

fn main() -> celestial_neo::Result<()> {
    let mut args = std::env::args().skip(1);
    let (Some(neofile), Some(cadfile)) = (args.next(), args.next()) else {
        eprintln!("Usage: close_approaches <neos.csv> <cad.json>");
        std::process::exit(2);
    };

    let db = NeoDatabase::new(load_neos(&neofile)?, load_approaches(&cadfile)?);
    println!(
        "{} NEOs, {} close approaches ({})",
        db.neo_count(),
        db.approach_count(),
        db.link_stats()
    );

    let criteria = QueryCriteria {
        distance_max: Some(0.05),
        hazardous: Some(true),
        ..Default::default()
    };
    let filters = create_filters(&criteria);
    println!("\nHazardous approaches within 0.05 au (first 20):\n");

    for approach in limit(db.query(&filters), Some(20)) {
        println!("  {}", approach);
    }

    Ok(())
}
