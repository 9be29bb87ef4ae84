use clap::{Parser, Subcommand};
use jarlabel::{Catalog, CatalogStore, JobFile, LabelConfig, LabelError, LabelGenerator, ViewerStatus};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(version, about = "Print nametag and pricetag label sheets", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every entry of a job file into one PDF sheet
    Render {
        #[arg(long, env = "JARLABEL_CATALOG")]
        catalog: PathBuf,
        #[arg(long)]
        job: PathBuf,
        /// Overrides `output_path` from the configuration
        #[arg(long)]
        output: Option<PathBuf>,
        /// Do not open the finished sheet in the system viewer
        #[arg(long, default_value_t = false)]
        no_open: bool,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write the default brand and tier catalog
    Seed {
        #[arg(long, env = "JARLABEL_CATALOG")]
        catalog: PathBuf,
        /// Replace an existing catalog file
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Print the queue a job file would produce, without rendering
    Queue {
        #[arg(long, env = "JARLABEL_CATALOG")]
        catalog: PathBuf,
        #[arg(long)]
        job: PathBuf,
    },
}

fn main() -> Result<(), LabelError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Args::parse().command {
        Command::Render {
            catalog,
            job,
            output,
            no_open,
            config,
        } => render(&catalog, &job, output, no_open, config.as_deref()),
        Command::Seed { catalog, force } => seed(&catalog, force),
        Command::Queue { catalog, job } => {
            let mut generator = LabelGenerator::new(LabelConfig::default())?;
            queue_job(&mut generator, &catalog, &job)?;
            for (index, line) in generator.queue_summary().iter().enumerate() {
                println!("{:>3}. {}", index + 1, line);
            }
            Ok(())
        }
    }
}

fn render(
    catalog: &Path,
    job: &Path,
    output: Option<PathBuf>,
    no_open: bool,
    config: Option<&Path>,
) -> Result<(), LabelError> {
    let config = LabelConfig::load_from(config)?;
    let mut generator = LabelGenerator::new(config)?;
    if let Some(output) = output {
        generator.set_output_path(output);
    }
    if no_open {
        generator.set_auto_open(false);
    }
    queue_job(&mut generator, catalog, job)?;

    let outcome = generator.generate()?;
    println!(
        "Saved {} label pairs on {} pages to {}",
        outcome.entry_count,
        outcome.page_count,
        outcome.path.display()
    );
    for warning in &outcome.warnings {
        println!("warning: {warning}");
    }
    if let ViewerStatus::Failed { reason } = &outcome.viewer {
        println!("Could not open the sheet ({reason}); open {} manually", outcome.path.display());
    }
    Ok(())
}

fn seed(catalog: &Path, force: bool) -> Result<(), LabelError> {
    if catalog.exists() && !force {
        println!("{} already exists; pass --force to replace it", catalog.display());
        return Ok(());
    }
    let seeded = Catalog::seeded()?;
    let store = CatalogStore::with_catalog(catalog, seeded);
    store.save()?;
    println!(
        "Wrote {} brands and {} tiers to {}",
        store.catalog().brands().len(),
        store.catalog().tiers().len(),
        catalog.display()
    );
    Ok(())
}

fn queue_job(generator: &mut LabelGenerator, catalog: &Path, job: &Path) -> Result<(), LabelError> {
    let store = CatalogStore::open(catalog)?;
    let entries = JobFile::load(job)?.resolve(store.catalog())?;
    log::info!("Queued {} entries from {}", entries.len(), job.display());
    for entry in entries {
        generator.add_entry(entry);
    }
    Ok(())
}
