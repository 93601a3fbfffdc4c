//! CLI entry point for mythblog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mythblog::commands::new::NewPostOptions;

#[derive(Parser)]
#[command(name = "mythblog")]
#[command(version)]
#[command(about = "A file-backed content store and API for a myth-busting blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new blog
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Category name (defaults to `default_category` from the config)
        #[arg(long)]
        category: Option<String>,

        /// Slug for the post (derived from the title when omitted)
        #[arg(short, long)]
        slug: Option<String>,

        /// Tag to attach, may be repeated
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Save as an unpublished draft
        #[arg(long)]
        draft: bool,
    },

    /// List site information
    List {
        /// Type of content to list (post, category, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Start the API server
    #[command(alias = "s")]
    Server {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to the configured address)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "mythblog=debug,info"
    } else {
        "mythblog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing blog in {:?}", target_dir);
            let blog = mythblog::Blog::new(&target_dir)?;
            blog.init().await?;
            println!("Initialized blog in {:?}", target_dir);
        }

        Commands::New {
            title,
            category,
            slug,
            tags,
            draft,
        } => {
            let blog = mythblog::Blog::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            let options = NewPostOptions {
                category,
                slug,
                tags,
                draft,
            };
            mythblog::commands::new::create_post(&blog, &title, options).await?;
        }

        Commands::List { r#type } => {
            let blog = mythblog::Blog::new(&base_dir)?;
            mythblog::commands::list::run(&blog, &r#type).await?;
        }

        Commands::Server { port, ip } => {
            let blog = mythblog::Blog::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| blog.config.server.ip.clone());
            let port = port.unwrap_or(blog.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            blog.serve(&ip, port).await?;
        }

        Commands::Version => {
            println!("mythblog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
