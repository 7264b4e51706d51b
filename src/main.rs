use clap::Parser;
use course_planner::app::commands::{render_course, render_list};
use course_planner::config::Command;
use course_planner::core::catalog::normalize_id;
use course_planner::utils::logger;
use course_planner::utils::validation::{validate_required_field, Validate};
use course_planner::{
    CliConfig, CourseCatalog, LocalSource, PlannerConfig, PlannerError, PlannerSession,
};
use std::io::Write;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file_config = match &cli.config {
        Some(path) => match PlannerConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => PlannerConfig::default(),
    };

    logger::init_cli_logger(cli.verbose, file_config.log_level());
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = file_config.validate() {
        exit_with(&e, 1);
    }

    let source = LocalSource::new(file_config.base_dir());
    let catalog_path = cli.catalog_path(&file_config);

    let Some(command) = cli.command.clone() else {
        let mut session = PlannerSession::new(source).with_default_path(catalog_path.clone());
        if let Some(path) = &catalog_path {
            // Startup preload failures are not fatal; the menu can still load another file.
            if let Err(e) = session.load(path) {
                tracing::warn!("Preload failed: {}", e);
            }
        }
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout().lock();
        session.run(stdin.lock(), &mut stdout)?;
        return Ok(());
    };

    let path = match validate_required_field("catalog.path", &catalog_path) {
        Ok(path) => path.clone(),
        Err(e) => exit_with(&e, 1),
    };

    let mut catalog = CourseCatalog::new();
    match catalog.load_from(&source, &path) {
        Ok(report) => tracing::info!(
            "Loaded {} courses from {} ({} skipped)",
            report.courses,
            path,
            report.skipped.len()
        ),
        Err(e) => exit_with(&e, if e.is_load_failure() { 2 } else { 1 }),
    }

    let mut stdout = std::io::stdout().lock();
    match command {
        Command::List { format } => render_list(&catalog, format, &mut stdout)?,
        Command::Show { id, format } => {
            if !render_course(&catalog, &id, format, &mut stdout)? {
                stdout.flush()?;
                eprintln!("{} not found in the catalog.", normalize_id(&id));
                std::process::exit(1);
            }
        }
    }
    stdout.flush()?;

    Ok(())
}

fn exit_with(e: &PlannerError, code: i32) -> ! {
    tracing::error!("❌ {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(code);
}
