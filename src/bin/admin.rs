//! CLI administration tool for the bookstore.
//!
//! Browses the catalog, inspects and clears session carts, and performs
//! database checks without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # First page of the catalog, cheapest first
//! cargo run --bin bookstore-admin -- books list --sort price
//!
//! # Interactive pager
//! cargo run --bin bookstore-admin -- books browse --category Fiction
//!
//! # Inspect a session cart (requires Redis)
//! cargo run --bin bookstore-admin -- cart show 3q2-7wAAAAAAAAAAAAAAAA
//!
//! # Check database connection
//! cargo run --bin bookstore-admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components (required)
//! - `REDIS_URL` or `REDIS_*` components (cart commands only)

use bookstore::application::services::{CartService, CatalogService};
use bookstore::browse::{BookListState, PAGE_SIZE_CHOICES};
use bookstore::config::{Config, mask_connection_string};
use bookstore::domain::catalog_query::BookQuery;
use bookstore::domain::entities::Book;
use bookstore::infrastructure::persistence::PgBookRepository;
use bookstore::infrastructure::session::RedisCartStorage;
use bookstore::utils::session_id::is_valid_session_id;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Select};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing the bookstore.
#[derive(Parser)]
#[command(name = "bookstore-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Books {
        #[command(subcommand)]
        action: BooksAction,
    },

    /// Inspect session carts
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },

    /// Show catalog statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Catalog subcommands.
#[derive(Subcommand)]
enum BooksAction {
    /// Print one page of books
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        #[arg(short = 's', long, default_value_t = 5)]
        page_size: u32,

        /// `title` or `price`
        #[arg(long)]
        sort: Option<String>,

        /// `asc` or `desc`
        #[arg(long)]
        order: Option<String>,

        #[arg(short, long)]
        category: Option<String>,
    },

    /// List distinct categories
    Categories,

    /// Page through the catalog interactively
    Browse {
        #[arg(short, long)]
        category: Option<String>,
    },
}

/// Cart subcommands.
#[derive(Subcommand)]
enum CartAction {
    /// Show the cart of a session
    Show { session_id: String },

    /// Delete the cart of a session
    Clear {
        session_id: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Books { action } => handle_books_action(action, &pool).await?,
        Commands::Cart { action } => handle_cart_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn catalog_repository(pool: &PgPool) -> Arc<PgBookRepository> {
    Arc::new(PgBookRepository::new(Arc::new(pool.clone())))
}

/// Dispatches catalog commands.
async fn handle_books_action(action: BooksAction, pool: &PgPool) -> Result<()> {
    let catalog = CatalogService::new(catalog_repository(pool));

    match action {
        BooksAction::List {
            page,
            page_size,
            sort,
            order,
            category,
        } => {
            let query = BookQuery::new(page, page_size)
                .with_sort(sort.as_deref(), order.as_deref())
                .with_category(category.as_deref());

            println!(
                "{}",
                format!(
                    "📚 Books (page {}, {} per page, {} {})",
                    query.page, query.page_size, query.sort_field, query.sort_order
                )
                .bright_blue()
                .bold()
            );
            println!();

            let books = catalog.list_books(query).await?;
            print_books(&books);
        }
        BooksAction::Categories => {
            println!("{}", "🏷️  Categories".bright_blue().bold());
            println!();

            let categories = catalog.list_categories().await?;
            if categories.is_empty() {
                println!("{}", "  No categories found".yellow());
            }
            for category in &categories {
                let count = catalog.count_books(Some(category.clone())).await?;
                println!(
                    "  {:<30} {}",
                    category.cyan(),
                    count.to_string().bright_black()
                );
            }
            println!();
        }
        BooksAction::Browse { category } => browse(&catalog, category).await?,
    }

    Ok(())
}

/// Interactive pager over [`BookListState`].
///
/// Every navigation step issues a new fetch; the list state drops any
/// response that belongs to an earlier step.
async fn browse(catalog: &CatalogService, category: Option<String>) -> Result<()> {
    let mut state = BookListState::new();
    state.set_category(category);

    loop {
        let ticket = state.begin_fetch();
        let result = catalog.list_books(ticket.query.clone()).await;
        state.complete(ticket, result);

        println!();
        println!(
            "{}",
            format!(
                "📖 Page {} ({} per page, title {})",
                state.page(),
                state.page_size(),
                state.sort_order()
            )
            .bright_blue()
            .bold()
        );
        if let Some(category) = state.category() {
            println!("  Category: {}", category.cyan());
        }
        println!();

        match state.error() {
            Some(message) => println!("  {}", message.red()),
            None => print_books(state.books()),
        }

        let mut choices = vec!["Next page", "Previous page", "Page size", "Toggle sort order", "Quit"];
        if !state.has_previous_page() {
            choices.retain(|c| *c != "Previous page");
        }

        let selection = Select::new()
            .with_prompt("Navigate")
            .items(&choices)
            .default(0)
            .interact()?;

        match choices[selection] {
            "Next page" => state.next_page(),
            "Previous page" => state.previous_page(),
            "Page size" => {
                let labels: Vec<String> = PAGE_SIZE_CHOICES.iter().map(u32::to_string).collect();
                let current = PAGE_SIZE_CHOICES
                    .iter()
                    .position(|size| *size == state.page_size())
                    .unwrap_or(0);
                let picked = Select::new()
                    .with_prompt("Books per page")
                    .items(&labels)
                    .default(current)
                    .interact()?;
                state.set_page_size(PAGE_SIZE_CHOICES[picked]);
            }
            "Toggle sort order" => state.toggle_sort_order(),
            _ => break,
        }
    }

    Ok(())
}

fn print_books(books: &[Book]) {
    if books.is_empty() {
        println!("{}", "  No books on this page".yellow());
        println!();
        return;
    }

    println!(
        "  {:<6} {:<40} {:<24} {:<14} {:>9}",
        "ID".bold(),
        "Title".bold(),
        "Author".bold(),
        "Category".bold(),
        "Price".bold()
    );
    println!("  {}", "─".repeat(97).bright_black());

    for book in books {
        println!(
            "  {:<6} {:<40} {:<24} {:<14} {:>9}",
            book.book_id.to_string().bright_black(),
            truncate(&book.title, 40).cyan(),
            truncate(&book.author, 24),
            truncate(&book.category, 14),
            format!("{:.2}", book.price).bright_green()
        );
    }
    println!();
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Dispatches cart commands. Carts are only shared through Redis, so these
/// commands refuse to run without it.
async fn handle_cart_action(action: CartAction, pool: &PgPool) -> Result<()> {
    let redis_url = Config::load_redis_url()
        .context("REDIS_URL or REDIS_HOST must be set to inspect carts")?;
    let ttl = std::env::var("SESSION_TTL_SECONDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(86_400);

    let storage = RedisCartStorage::connect(&redis_url, ttl)
        .await
        .context("Failed to connect to Redis")?;
    let carts = CartService::new(Arc::new(storage), catalog_repository(pool));

    match action {
        CartAction::Show { session_id } => {
            check_session_id(&session_id)?;
            println!("{}", "🛒 Cart".bright_blue().bold());
            println!("  Session: {}", session_id.bright_black());
            println!();

            let cart = carts.open(&session_id).await?;
            if cart.items().is_empty() {
                println!("{}", "  Cart is empty".yellow());
                println!();
                return Ok(());
            }

            for item in cart.items() {
                println!(
                    "  {:>3} × {:<40} {:>9}",
                    item.quantity.to_string().bright_white(),
                    truncate(&item.book.title, 40).cyan(),
                    format!("{:.2}", item.subtotal()).bright_green()
                );
            }
            println!();
            println!(
                "  Items: {}   Total: {}",
                cart.total_items().to_string().bright_white().bold(),
                format!("{:.2}", cart.total_price()).bright_green().bold()
            );
            println!();
        }
        CartAction::Clear { session_id, yes } => {
            check_session_id(&session_id)?;

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete the cart of session {}?", session_id))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            carts.end_session(&session_id).await?;
            println!("{}", "✅ Cart deleted".green().bold());
        }
    }

    Ok(())
}

fn check_session_id(session_id: &str) -> Result<()> {
    if !is_valid_session_id(session_id) {
        anyhow::bail!("'{}' is not a valid session id", session_id);
    }
    Ok(())
}

/// Displays catalog statistics.
///
/// Shows:
/// - Total number of books
/// - Number of categories
/// - Price range and average price
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let catalog = CatalogService::new(catalog_repository(pool));
    let books_count = catalog.count_books(None).await?;
    let categories_count = catalog.list_categories().await?.len();

    let (min_price, max_price, avg_price): (
        Option<rust_decimal::Decimal>,
        Option<rust_decimal::Decimal>,
        Option<rust_decimal::Decimal>,
    ) = sqlx::query_as("SELECT MIN(price), MAX(price), AVG(price) FROM books")
        .fetch_one(pool)
        .await?;

    let price = |value: Option<rust_decimal::Decimal>| {
        value
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "-".to_string())
    };

    println!(
        "  Books:      {}",
        books_count.to_string().bright_green().bold()
    );
    println!(
        "  Categories: {}",
        categories_count.to_string().bright_green().bold()
    );
    println!(
        "  Prices:     {} .. {} (avg {})",
        price(min_price).bright_white(),
        price(max_price).bright_white(),
        price(avg_price).bright_white()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
                    .fetch_one(pool)
                    .await
                    .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Migrations: {}",
                migrations.to_string().bright_white()
            );
            println!();
        }
    }

    Ok(())
}
