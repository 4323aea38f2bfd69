//! Seed the database with the initial service catalog and a starter set of
//! stylists. Idempotent: services are only inserted into an empty table and
//! stylists are matched by name.

use serde_json::json;
use sqlx::postgres::PgPoolOptions;

use salond::db;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let database_url = std::env::var("DATABASE_URL")?;
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    if db::services::count_all(&pool).await? > 0 {
        println!("Services already exist, skipping service seed");
    } else {
        let services: &[(&str, &str, i32, f64)] = &[
            (
                "Women's Haircut",
                "Professional haircut service for women including wash, cut, and style.",
                60,
                45.00,
            ),
            (
                "Men's Haircut",
                "Professional haircut service for men including wash, cut, and style.",
                30,
                30.00,
            ),
            ("Child's Haircut", "Haircut service for children under 12.", 30, 25.00),
            (
                "Hair Color",
                "Full hair coloring service with professional grade products.",
                120,
                85.00,
            ),
            (
                "Highlights",
                "Partial or full highlights to add dimension to your hair.",
                90,
                75.00,
            ),
        ];

        for (name, description, duration, price) in services {
            db::services::create(&pool, name, description, *duration, *price).await?;
            println!("Created service: {name}");
        }
    }

    let stylists: &[(&str, &[&str])] = &[
        ("Emma Johnson", &["Haircut", "Color"]),
        ("Michael Smith", &["Styling", "Extensions"]),
        ("Sophia Garcia", &["Color", "Treatment"]),
        ("David Wilson", &["Haircut", "Beard"]),
    ];

    for (name, specialties) in stylists {
        if db::stylists::find_by_name(&pool, name).await?.is_some() {
            println!("Stylist already exists: {name}");
            continue;
        }
        db::stylists::create(&pool, name, &json!(specialties)).await?;
        println!("Created stylist: {name}");
    }

    Ok(())
}
