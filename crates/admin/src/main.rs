use clap::{Parser, Subcommand};
use database::{
    config::{Config, ConfigError},
    db::create_connection,
    error::ModelError,
    services::{
        category::CategoryService,
        commission::CommissionService,
        course::CourseService,
        enrollment::{EnrollmentService, EnrollmentView},
        language::LanguageService,
        project::ProjectService,
        student::{StudentService, StudentView},
        teacher::{TeacherService, TeacherView},
    },
};
use log::{error, info};
use migration::{Migrator, MigratorTrait};
use sea_orm::{DatabaseConnection, DbErr};
use std::process::ExitCode;
use strum::IntoEnumIterator;
use thiserror::Error;

#[derive(Parser)]
#[command(name = "admin")]
#[command(about = "Maintenance commands for the institution database.")]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    /// Apply pending migrations
    Migrate,
    /// Log row counts for every view
    Stats,
}

#[derive(Debug, Error)]
enum AdminError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Db(#[from] DbErr),
    #[error(transparent)]
    Model(#[from] ModelError),
}

async fn stats(db: &DatabaseConnection) -> Result<(), ModelError> {
    info!(
        "students: {} total, {} active",
        StudentService::count(db, StudentView::All).await?,
        StudentService::count(db, StudentView::Active).await?
    );
    info!(
        "teachers: {} active, {} total",
        TeacherService::count(db, TeacherView::Active).await?,
        TeacherService::count(db, TeacherView::All).await?
    );
    info!("categories: {}", CategoryService::count(db).await?);
    info!("courses: {}", CourseService::count(db).await?);
    info!("commissions: {}", CommissionService::count(db).await?);

    for view in EnrollmentView::iter() {
        info!(
            "enrollments ({view:?}): {}",
            EnrollmentService::count(db, view).await?
        );
    }

    info!("projects: {}", ProjectService::count(db).await?);
    info!("languages: {}", LanguageService::count(db).await?);
    Ok(())
}

async fn run(command: Command) -> Result<(), AdminError> {
    let config = Config::from_env()?;
    let db = create_connection(&config).await?;

    match command {
        Command::Migrate => {
            Migrator::up(&db, None).await?;
            info!("Migrations applied");
        }
        Command::Stats => {
            info!("Media root: {}", config.media_root.display());
            stats(&db).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let CommandLine { command } = CommandLine::parse();

    match run(command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_line_definition() {
        CommandLine::command().debug_assert();
    }

    #[test]
    fn test_parse_commands() {
        let parsed = CommandLine::try_parse_from(["admin", "migrate"]).unwrap();
        assert!(matches!(parsed.command, Command::Migrate));

        let parsed = CommandLine::try_parse_from(["admin", "stats"]).unwrap();
        assert!(matches!(parsed.command, Command::Stats));
    }

    #[test]
    fn test_rejects_unknown_input() {
        assert!(CommandLine::try_parse_from(["admin"]).is_err());
        assert!(CommandLine::try_parse_from(["admin", "seed"]).is_err());
        assert!(CommandLine::try_parse_from(["admin", "migrate", "--verbose"]).is_err());
    }
}
