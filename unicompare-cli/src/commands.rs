//! CLI command implementations

use std::net::IpAddr;

use anyhow::Context;
use clap::Subcommand;
use tracing::debug;
use unicompare_core::config::AppConfig;
use unicompare_core::{
    CatalogError, ComparisonSelection, ComparisonTable, FilterSpec, UniversityRepository,
    UniversityStore,
};
use unicompare_predict::{AdmissionPredictor, AdmissionProfile};

use crate::output;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the JSON API server
    Serve {
        /// Address to bind to
        #[arg(long)]
        host: Option<IpAddr>,
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List universities, optionally filtered
    List {
        /// Match against name and location
        #[arg(short, long)]
        search: Option<String>,
        /// Location prefix
        #[arg(short, long)]
        city: Option<String>,
        /// Match against program titles
        #[arg(short, long)]
        program: Option<String>,
    },
    /// Show one university in full
    Show {
        /// University id
        id: String,
    },
    /// Show one program of a university
    Program {
        /// University id
        id: String,
        /// Program id
        program_id: String,
    },
    /// Load the sample catalog into an empty store
    Seed,
    /// Toggle universities into the comparison, in order, and print the table
    Compare {
        /// University ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Estimate the admission chance for a student profile
    Predict {
        /// University id
        id: String,
        /// Grade point average
        #[arg(long, default_value = "")]
        gpa: String,
        /// UNT score
        #[arg(long, default_value = "")]
        unt: String,
        /// IELTS band
        #[arg(long, default_value = "")]
        ielts: String,
        /// SAT score
        #[arg(long, default_value = "")]
        sat: String,
        /// Yearly budget
        #[arg(long, default_value = "")]
        budget: String,
        /// Program title
        #[arg(long)]
        program: Option<String>,
    },
}

/// Handle CLI command execution
///
/// # Errors
/// - `CatalogError::UniversityNotFound` - Unknown university or program
/// - `CatalogError::Store` - Remote store rejected a seed
/// - `PredictionError` - Prediction not configured or every provider failed
/// - `std::io::Error` - Server could not bind or failed
pub async fn handle_command(command: Commands, mut config: AppConfig) -> anyhow::Result<()> {
    match command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            unicompare_web::run_server(config)
                .await
                .context("API server stopped")
        }
        Commands::List {
            search,
            city,
            program,
        } => {
            let store = UniversityStore::from_config(&config.store);
            let filter = FilterSpec {
                search,
                city,
                program,
            };
            list_universities(&store, &filter).await
        }
        Commands::Show { id } => {
            let store = UniversityStore::from_config(&config.store);
            show_university(&store, &id).await
        }
        Commands::Program { id, program_id } => {
            let store = UniversityStore::from_config(&config.store);
            show_program(&store, &id, &program_id).await
        }
        Commands::Seed => {
            let store = UniversityStore::from_config(&config.store);
            seed_store(&store).await
        }
        Commands::Compare { ids } => {
            let store = UniversityStore::from_config(&config.store);
            compare_universities(&store, &ids).await
        }
        Commands::Predict {
            id,
            gpa,
            unt,
            ielts,
            sat,
            budget,
            program,
        } => {
            let store = UniversityStore::from_config(&config.store);
            let predictor = AdmissionPredictor::from_config(&config.prediction);
            let profile = AdmissionProfile {
                gpa,
                unt_score: unt,
                ielts,
                sat,
                budget,
                program,
            };
            predict_admission(&store, &predictor, &id, &profile).await
        }
    }
}

/// Print every university matching `filter`.
pub async fn list_universities(
    store: &dyn UniversityRepository,
    filter: &FilterSpec,
) -> anyhow::Result<()> {
    debug!(?filter, "Listing universities");
    let universities = store.list(filter).await;
    if universities.is_empty() {
        println!("No universities match the current filters.");
        return Ok(());
    }

    for university in &universities {
        println!("{}", output::summary_line(university));
    }
    println!("\n{} universities", universities.len());
    if store.status().is_degraded() {
        println!("(remote store unreachable, showing built-in catalog)");
    }
    Ok(())
}

/// Print one university in full.
///
/// # Errors
/// - `CatalogError::UniversityNotFound` - Unknown id
pub async fn show_university(store: &dyn UniversityRepository, id: &str) -> anyhow::Result<()> {
    let university = store
        .get(id)
        .await
        .ok_or_else(|| CatalogError::UniversityNotFound { id: id.to_string() })?;
    print!("{}", output::university_detail(&university));
    Ok(())
}

/// Print one program.
///
/// # Errors
/// - `CatalogError::UniversityNotFound` - Unknown university or program
pub async fn show_program(
    store: &dyn UniversityRepository,
    id: &str,
    program_id: &str,
) -> anyhow::Result<()> {
    let (university, program) = store
        .program(id, program_id)
        .await
        .ok_or_else(|| CatalogError::UniversityNotFound {
            id: format!("{id}/{program_id}"),
        })?;
    print!("{}", output::program_detail(&university, &program));
    Ok(())
}

/// Seed the store and report what it now holds.
///
/// # Errors
/// - `CatalogError::Store` - Remote store could not be read or written
pub async fn seed_store(store: &dyn UniversityRepository) -> anyhow::Result<()> {
    let outcome = store.seed().await.map_err(CatalogError::from)?;
    println!("{}", output::seed_report(&outcome));
    Ok(())
}

/// Apply toggles in order and print the resulting comparison.
pub async fn compare_universities(
    store: &dyn UniversityRepository,
    ids: &[String],
) -> anyhow::Result<()> {
    let catalog = store.list(&FilterSpec::default()).await;
    let mut selection = ComparisonSelection::new();
    for id in ids {
        selection.toggle(id);
    }

    let table = ComparisonTable::for_selection(&selection, &catalog);
    if table.is_empty() {
        println!("None of the selected universities are in the catalog.");
        return Ok(());
    }
    print!("{}", output::comparison_table(&table));
    Ok(())
}

/// Request an admission estimate and print it.
///
/// # Errors
/// - `CatalogError::UniversityNotFound` - Unknown id
/// - `PredictionError` - Not configured or every provider failed
pub async fn predict_admission(
    store: &dyn UniversityRepository,
    predictor: &AdmissionPredictor,
    id: &str,
    profile: &AdmissionProfile,
) -> anyhow::Result<()> {
    let university = store
        .get(id)
        .await
        .ok_or_else(|| CatalogError::UniversityNotFound { id: id.to_string() })?;

    debug!(university = %id, candidates = predictor.candidates().len(), "Requesting admission estimate");
    println!("Estimating admission chance at {}...", university.name);
    let prediction = predictor.predict(&university, profile).await?;
    print!("{}", output::prediction(&prediction));
    Ok(())
}

#[cfg(test)]
mod tests {
    use unicompare_predict::PredictionError;

    use super::*;

    #[tokio::test]
    async fn test_show_unknown_university_is_catalog_error() {
        let store = UniversityStore::local();
        let err = show_university(&store, "missing").await.unwrap_err();
        let catalog_error = err.downcast_ref::<CatalogError>().unwrap();
        assert_eq!(catalog_error.user_message(), "University missing not found");
    }

    #[tokio::test]
    async fn test_known_records_print() {
        let store = UniversityStore::local();
        assert!(show_university(&store, "nu").await.is_ok());
        assert!(show_program(&store, "nu", "cs-bsc").await.is_ok());
        assert!(show_program(&store, "nu", "nope").await.is_err());
        assert!(
            compare_universities(&store, &["nu".to_string(), "aitu".to_string()])
                .await
                .is_ok()
        );
        assert!(seed_store(&store).await.is_ok());
    }

    #[tokio::test]
    async fn test_predict_without_keys_reports_configuration() {
        let store = UniversityStore::local();
        let predictor = AdmissionPredictor::from_config(&Default::default());
        let err = predict_admission(&store, &predictor, "nu", &AdmissionProfile::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PredictionError>(),
            Some(PredictionError::NotConfigured { .. })
        ));
    }
}
