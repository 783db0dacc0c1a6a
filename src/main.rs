//! Cyberfolio - animated portfolio backdrops
//!
//! Opens a window and plays the backdrop of one page of the portfolio site:
//! the rotating globe, the cyber map, the about page with its tilting profile
//! card, or the contact beam. Keys `1`-`4` switch page, the arrow keys step
//! between projects, and `Esc` or `q` quits. The `projects`, `profile` and
//! `contact` subcommands work with the site's content without opening a window.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cyberfolio::app::App;
use cyberfolio::config::BackdropConfig;
use cyberfolio::content::{Catalog, ContactForm, LogSink, NotificationKind, current_year, submit};
use cyberfolio::scene::{PageKey, Route};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

#[derive(Parser, Debug)]
#[command(name = "cyberfolio")]
#[command(about = "Animated backdrops for a SOC analyst portfolio")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Page shown at startup (home, portfolio, project-detail, about, contact)
    #[arg(short, long, default_value = "home", conflicts_with = "route")]
    page: PageKey,

    /// Site route shown at startup, e.g. /portfolio/home-soc-lab
    #[arg(short, long)]
    route: Option<String>,

    /// Config file path (defaults to ./cyberfolio.toml)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Override the configured scene seed
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List projects, optionally filtered by category
    Projects {
        /// Category key (threat-hunting, siem, labs, ...) or "all"
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Only the projects featured on the home page
        #[arg(long)]
        featured: bool,
    },
    /// Print the analyst profile and footer
    Profile,
    /// Validate and deliver a contact message
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// job-opportunity, collaboration, mentorship or general
        #[arg(long, default_value = "general")]
        inquiry: String,

        #[arg(long)]
        message: String,
    },
}

fn main() -> Result<()> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("cyberfolio=debug,wgpu=warn")
    } else {
        EnvFilter::new("cyberfolio=info,wgpu=error")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let catalog = Catalog::embedded().context("failed to load content catalog")?;
    if let Some(command) = cli.command {
        return run_command(catalog, command);
    }

    info!("Starting Cyberfolio");
    info!(footer = %catalog.copyright_line(current_year()), "Loaded content catalog");

    let start_route = match cli.route.as_deref() {
        Some(route) => catalog.resolve_route(route)?,
        // A bare project detail page opens the first project
        None if cli.page == PageKey::ProjectDetail => {
            let first = catalog.projects.first().context("content catalog has no projects")?;
            Route::project(first.slug.as_str())
        }
        None => Route::page(cli.page),
    };

    let config = BackdropConfig::load(cli.config.as_deref())?;
    info!(?config, "Loaded configuration");
    let seed = cli.seed.unwrap_or(config.scene.seed);

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || shutdown.store(true, Ordering::SeqCst))
            .context("failed to install interrupt handler")?;
    }

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, catalog, start_route, seed, shutdown);
    event_loop.run_app(&mut app).context("event loop failed")?;

    info!("Cyberfolio stopped");
    Ok(())
}

fn run_command(catalog: &Catalog, command: Commands) -> Result<()> {
    match command {
        Commands::Projects { category, featured } => {
            let projects: Vec<_> = if featured {
                catalog.featured_projects().iter().collect()
            } else {
                catalog.projects_by_category(&category)
            };
            if projects.is_empty() {
                anyhow::bail!("no projects in category '{category}'");
            }
            for project in projects {
                println!(
                    "{:<28} {:<18} {}  {}",
                    project.slug,
                    project.category.key(),
                    project.year,
                    project.title
                );
            }
        }
        Commands::Profile => {
            let profile = &catalog.profile;
            println!("{}\n{}\n", profile.name, profile.tagline);
            for paragraph in profile.biography_paragraphs() {
                println!("{paragraph}\n");
            }
            for paragraph in profile.approach_paragraphs() {
                println!("{paragraph}\n");
            }
            println!("CV: {} ({})", profile.cv.href, profile.cv.file_name);
            println!("{}", catalog.copyright_line(current_year()));
        }
        Commands::Contact {
            name,
            email,
            inquiry,
            message,
        } => {
            let form = ContactForm {
                name,
                email,
                inquiry_type: inquiry,
                message,
            };
            let notification = submit(&form, &LogSink);
            println!("{}: {}", notification.title, notification.description);
            if notification.kind == NotificationKind::Error {
                anyhow::bail!("contact message rejected");
            }
        }
    }
    Ok(())
}
