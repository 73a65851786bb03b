use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "careerfit",
    version,
    about = "Career assessment scoring and cluster ranking CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory holding careerfit.toml, the assessment files and cohort data
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a session and print the career report
    Score(ScoreCommand),
    /// Record Likert answers (item=1..5) into a session
    Answer(AnswerCommand),
    /// Set the student profile on a session
    Student(StudentCommand),
    /// Save and continue to the next section
    Next(SessionCommand),
    /// Show section progress and points
    Status(SessionCommand),
    /// Append the scored session to the cohort CSV
    Export(SessionCommand),
    /// Summarize the cohort CSV
    Dashboard(DashboardCommand),
    /// Check the item catalog and cluster mapping
    Validate,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Md,
    Json,
    Html,
}

#[derive(Args)]
pub struct ScoreCommand {
    pub session: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct AnswerCommand {
    pub session: PathBuf,
    #[arg(required = true)]
    pub answers: Vec<String>,
}

#[derive(Args)]
pub struct StudentCommand {
    pub session: PathBuf,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub grade: String,
    #[arg(long, default_value = "")]
    pub school: String,
    #[arg(long, default_value = "")]
    pub contact: String,
}

#[derive(Args)]
pub struct SessionCommand {
    pub session: PathBuf,
}

#[derive(Args)]
pub struct DashboardCommand {
    #[arg(long, default_value_t = crate::cohort::dashboard::DEFAULT_WINDOW)]
    pub window: usize,
}
