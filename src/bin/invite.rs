//! Create (or reset) a registration invitation for an email and print its
//! token. Counterpart of an admin "create invite" action:
//!
//!     cargo run --bin invite -- someone@example.com

use sqlx::postgres::PgPoolOptions;

use salond::db;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let email = std::env::args()
        .nth(1)
        .ok_or("usage: invite <email>")?;

    let database_url = std::env::var("DATABASE_URL")?;
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let invite = db::invitations::get_or_create(&pool, &email).await?;
    println!("Token for {email}: {}", invite.token);

    Ok(())
}
