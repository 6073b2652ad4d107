use bazaarapp::model::ProductStatus;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bazaar",
    bin_name = "bazaar",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Manage an artisan storefront's catalog and profile", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Catalog document to use (overrides the configured data_file)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Config file to load instead of the default bazaar.toml
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output (-v for info, -vv for debug)
    #[arg(short, long, global = true, action = ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,

    /// Print JSON instead of formatted text
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Catalog products
    #[command(alias = "p", display_order = 1)]
    Products {
        #[command(subcommand)]
        action: ProductCommands,
    },

    /// The artisan profile
    #[command(display_order = 2)]
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },

    /// Print the location of the catalog document
    #[command(display_order = 3)]
    Path,
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// List products, most recent first
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Only products in this status (Active, Draft, Archived)
        #[arg(short, long)]
        status: Option<ProductStatus>,

        /// Show at most this many products
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one product
    #[command(alias = "v", display_order = 2)]
    Show {
        /// Product name (exact)
        name: String,
    },

    /// Add a new product
    #[command(alias = "n", display_order = 3)]
    Add {
        #[arg(long)]
        name: String,

        /// Display price, e.g. "₹1,250"
        #[arg(long)]
        price: String,

        #[arg(long)]
        stock: u32,

        #[command(flatten)]
        details: ProductDetails,
    },

    /// Update a product; omitted fields keep their current value
    #[command(display_order = 4)]
    Update {
        /// Current name of the product
        original: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        price: Option<String>,

        #[arg(long)]
        stock: Option<u32>,

        #[command(flatten)]
        details: ProductDetails,
    },

    /// Remove a product
    #[command(alias = "rm", display_order = 5)]
    Remove {
        /// Product name (exact)
        name: String,
    },
}

/// Optional product fields shared by `add` and `update`.
#[derive(Args, Debug, Default, Clone)]
pub struct ProductDetails {
    #[arg(long)]
    pub description: Option<String>,

    /// Active, Draft or Archived
    #[arg(long)]
    pub status: Option<ProductStatus>,

    /// Image URL
    #[arg(long)]
    pub image: Option<String>,

    /// Short hint for image generation
    #[arg(long)]
    pub ai_hint: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Show the artisan profile
    #[command(display_order = 1)]
    Show,

    /// Replace the artisan profile
    #[command(display_order = 2)]
    Set {
        #[arg(long)]
        name: String,

        #[arg(long)]
        location: String,

        #[arg(long)]
        story: String,

        #[arg(long)]
        heritage: String,

        /// Avatar image URL or data URI
        #[arg(long)]
        avatar: Option<String>,
    },
}
