mod assessment;
mod cli;
mod cohort;
mod config;
mod error;
mod report;
mod scoring;
mod session;
mod telemetry;
mod types;

use crate::assessment::Assessment;
use crate::error::CareerError;
use crate::session::{Session, StudentProfile, SECTIONS};
use clap::Parser;
use std::path::Path;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const BLOCKING: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn run() -> Result<i32, CareerError> {
    let cli = cli::Cli::parse();
    let loaded = config::load_config(&cli.root)?;
    telemetry::init(cli.verbose, cli.quiet, loaded.log_level())?;
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), root = %cli.root.display(), "careerfit starting");

    match cli.command {
        cli::Commands::Score(cmd) => {
            let assessment = assessment::load_assessment(&cli.root, &loaded);
            let session = Session::load(&cmd.session)?;
            let report = scoring::score_session(&assessment, &session, &loaded.scoring_settings());

            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
                cli::ReportFormat::Html => report::OutputFormat::Html,
            };
            let rendered = report::render(&report, output_format)?;
            match &cmd.output {
                Some(path) => {
                    std::fs::write(path, rendered)?;
                    println!("report written: {}", path.display());
                }
                None => println!("{rendered}"),
            }

            let used_fallback = warn_fallback(&assessment);
            if report.clusters.is_empty() {
                eprintln!("warning: no career clusters ranked; check the cluster mapping");
            }
            if used_fallback || report.clusters.is_empty() {
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Answer(cmd) => {
            let assessment = assessment::load_assessment(&cli.root, &loaded);
            let mut session = Session::load_or_default(&cmd.session)?;
            for raw in &cmd.answers {
                let (item, value) = session::parse_answer(raw)?;
                session.record_response(&assessment.catalog, &item, value)?;
            }
            session.save(&cmd.session)?;
            println!(
                "recorded {} answer(s); {} total",
                cmd.answers.len(),
                session.responses.len()
            );
            if warn_fallback(&assessment) {
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Student(cmd) => {
            let mut session = Session::load_or_default(&cmd.session)?;
            session.set_student(StudentProfile {
                name: cmd.name,
                grade: cmd.grade,
                school: cmd.school,
                contact: cmd.contact,
            })?;
            session.save(&cmd.session)?;
            println!("saved student info for {}", session.student.name);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Next(cmd) => {
            let mut session = Session::load_or_default(&cmd.session)?;
            if !session.advance() {
                println!("already at {}; nothing to continue", session.section().name);
                return Ok(exit_code::SUCCESS);
            }
            session.save(&cmd.session)?;
            println!(
                "now on {} ({} points)",
                session.section().name,
                session.points
            );
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Status(cmd) => {
            let assessment = assessment::load_assessment(&cli.root, &loaded);
            let session = Session::load_or_default(&cmd.session)?;
            print_status(&assessment, &session);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Export(cmd) => {
            let assessment = assessment::load_assessment(&cli.root, &loaded);
            let session = Session::load(&cmd.session)?;
            let report = scoring::score_session(&assessment, &session, &loaded.scoring_settings());
            let path = cohort_path(&cli.root, &loaded);
            cohort::export::append_row(&path, &cohort::export::flatten(&report))?;
            println!("saved to {}", path.display());
            if warn_fallback(&assessment) {
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Dashboard(cmd) => {
            let path = cohort_path(&cli.root, &loaded);
            let rows = if path.exists() {
                cohort::export::read_rows(&path)?
            } else {
                Vec::new()
            };
            let summary = cohort::dashboard::summarize(&rows, cmd.window);
            println!("{}", cohort::dashboard::to_markdown(&summary));
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Validate => {
            let assessment = assessment::load_assessment(&cli.root, &loaded);
            let findings = assessment::audit::audit(&assessment);

            if findings.is_empty() {
                println!("validate: no findings");
                return Ok(exit_code::SUCCESS);
            }

            for finding in &findings {
                let level = if finding.blocking { "BLOCKING" } else { "WARN" };
                println!("[{}] {}: {}", level, finding.id, finding.title);
                println!("  {}", finding.body);
            }

            if findings.iter().any(|finding| finding.blocking) {
                Ok(exit_code::BLOCKING)
            } else {
                Ok(exit_code::WARNINGS)
            }
        }
    }
}

fn warn_fallback(assessment: &Assessment) -> bool {
    for warning in &assessment.warnings {
        eprintln!("warning: {warning}");
    }
    assessment.used_fallback()
}

fn cohort_path(root: &Path, config: &types::config::CareerConfig) -> std::path::PathBuf {
    root.join(config.data_dir()).join(config.cohort_file())
}

fn print_status(assessment: &Assessment, session: &Session) {
    for (index, section) in SECTIONS.iter().enumerate() {
        let marker = if index == session.current_idx {
            ">"
        } else if session.completed.contains(section.name) {
            "x"
        } else {
            " "
        };
        let (answered, total) = section
            .pools
            .iter()
            .filter_map(|pool| assessment.catalog.pool(pool))
            .flat_map(|pool| pool.items.iter())
            .fold((0, 0), |(answered, total), item| {
                let seen = usize::from(session.responses.contains_key(&item.id));
                (answered + seen, total + 1)
            });
        if total == 0 {
            println!("[{marker}] {}", section.name);
        } else {
            println!("[{marker}] {} ({answered}/{total})", section.name);
        }
    }
    println!("points: {}", session.points);
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
