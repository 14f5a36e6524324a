use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;

use lightbox::format::{format_byte_size, total_weight};
use lightbox::gallery::{Gallery, GalleryConfig};
use lightbox::store::catalog::Catalog;
use lightbox::store::seed::seed_catalog_logged;
use lightbox::Result;

#[derive(Parser)]
#[command(name = "lightbox")]
#[command(about = "Local photo catalog with a persisted selection basket", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog database (default: the per-user data directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Manifest used to seed a brand-new catalog
    #[arg(long, default_value = "images.csv", global = true)]
    manifest: PathBuf,

    /// Directory that image urls are resolved against
    #[arg(long, default_value = "images", global = true)]
    image_root: PathBuf,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the image collection
    List {
        /// Emit records as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Search image titles (queries under 3 characters list everything)
    Search {
        #[arg(required = true)]
        query: String,
    },

    /// Show the basket with formatted file sizes
    Cart,

    /// Add an image to the basket
    Add {
        #[arg(required = true)]
        image_id: i64,
    },

    /// Remove an image's basket entry
    Remove {
        #[arg(required = true)]
        image_id: i64,
    },

    /// Add the image if absent, remove it otherwise
    Toggle {
        #[arg(required = true)]
        image_id: i64,
    },

    /// Basket size and total weight
    Total,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let db_path = match cli.db {
        Some(path) => path,
        None => Catalog::default_db_path()?,
    };

    // A broken manifest only logs a warning; a store that cannot be
    // opened is fatal and propagates out.
    let manifest = cli.manifest.clone();
    let catalog = Catalog::open_with_seed(&db_path, |catalog| {
        seed_catalog_logged(catalog, &manifest)
    })?;

    let mut gallery = Gallery::new(
        catalog,
        GalleryConfig {
            image_root: cli.image_root,
        },
    );
    gallery.mount()?;

    match cli.command {
        Commands::List { json } => {
            if json {
                let rendered = serde_json::to_string_pretty(gallery.images())
                    .unwrap_or_else(|e| format!("serialization failed: {e}"));
                println!("{rendered}");
            } else {
                print_images(&gallery);
            }
        }
        Commands::Search { query } => {
            gallery.perform_search(&query)?;
            print_images(&gallery);
        }
        Commands::Cart => {
            for item in gallery.cart() {
                println!(
                    "{:>4}  {:<30} {:<30} {}",
                    item.id,
                    item.title,
                    item.url,
                    format_byte_size(item.file_size)
                );
            }
        }
        Commands::Add { image_id } => {
            gallery.add_to_cart(image_id)?;
            println!("added image {image_id} ({} in basket)", gallery.cart().len());
        }
        Commands::Remove { image_id } => {
            let cart_id = gallery
                .cart()
                .iter()
                .find(|item| item.image_id == image_id)
                .map(|item| item.id);
            match cart_id {
                Some(cart_id) => {
                    gallery.remove_from_cart(cart_id)?;
                    println!("removed image {image_id}");
                }
                None => println!("image {image_id} is not in the basket"),
            }
        }
        Commands::Toggle { image_id } => {
            gallery.toggle_selection(image_id)?;
            if gallery.is_in_cart(image_id) {
                println!("image {image_id} selected");
            } else {
                println!("image {image_id} deselected");
            }
        }
        Commands::Total => {
            println!(
                "{} item(s), total weight {}",
                gallery.cart().len(),
                total_weight(gallery.cart())
            );
        }
    }

    Ok(())
}

fn print_images(gallery: &Gallery) {
    for image in gallery.images() {
        let marker = if gallery.is_in_cart(image.id) { "*" } else { " " };
        let weight = image
            .weight
            .map(|w| format!("{w:.2}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{marker}{:>4}  {:<30} {:<30} {weight}",
            image.id, image.title, image.url
        );
    }
}
