//! CLI commands and argument parsing

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use edcenter_core::RefreshMode;

/// Educational center administration CLI
#[derive(Parser, Debug)]
#[command(name = "edcenter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides the config file and EDCENTER_API_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// How concurrent 401 responses share a token refresh
    #[arg(long, global = true, value_enum)]
    pub refresh_mode: Option<RefreshArg>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        /// Account email (defaults to the last one used)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,

        #[arg(short, long)]
        email: String,
    },

    /// Sign out and clear stored credentials
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show local session state without contacting the backend
    Status,

    /// Show dashboard statistics
    Dashboard,

    /// Manage students
    Students {
        #[command(subcommand)]
        action: StudentCommand,
    },

    /// Manage teachers
    Teachers {
        #[command(subcommand)]
        action: TeacherCommand,
    },

    /// Manage classes and enrollments
    Classes {
        #[command(subcommand)]
        action: ClassCommand,
    },

    /// Manage subjects
    Subjects {
        #[command(subcommand)]
        action: SubjectCommand,
    },

    /// Manage payments
    Payments {
        #[command(subcommand)]
        action: PaymentCommand,
    },
}

/// Pagination flags shared by list commands
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<u32>,

    /// Items per page
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum StudentCommand {
    /// List students
    List {
        #[arg(short, long)]
        search: Option<String>,

        #[arg(long)]
        grade: Option<String>,

        /// paid, pending or partial
        #[arg(long)]
        payment_status: Option<String>,

        #[arg(long)]
        sort: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show one student
    Show { id: String },

    /// Create a student from a JSON file ("-" reads stdin)
    Create { file: PathBuf },

    /// Replace a student's fields from a JSON file
    Update { id: String, file: PathBuf },

    /// Delete a student
    Delete { id: String },

    /// Show a student's payments
    Payments { id: String },

    /// Show a student's classes
    Classes { id: String },
}

#[derive(Subcommand, Debug)]
pub enum TeacherCommand {
    /// List teachers
    List {
        #[arg(short, long)]
        search: Option<String>,

        #[arg(long)]
        subject_id: Option<String>,

        /// active or inactive
        #[arg(long)]
        status: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show one teacher
    Show { id: String },

    /// Create a teacher from a JSON file ("-" reads stdin)
    Create { file: PathBuf },

    /// Replace a teacher's fields from a JSON file
    Update { id: String, file: PathBuf },

    /// Delete a teacher
    Delete { id: String },

    /// Show a teacher's statistics
    Stats { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ClassCommand {
    /// List classes
    List {
        #[arg(short, long)]
        search: Option<String>,

        #[arg(long)]
        subject_id: Option<String>,

        #[arg(long)]
        teacher_id: Option<String>,

        #[arg(long)]
        grade_level: Option<String>,

        /// active, inactive or completed
        #[arg(long)]
        status: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show one class
    Show { id: String },

    /// Create a class from a JSON file ("-" reads stdin)
    Create { file: PathBuf },

    /// Replace a class's fields from a JSON file
    Update { id: String, file: PathBuf },

    /// Delete a class
    Delete { id: String },

    /// Enroll a student into a class
    Enroll { class_id: String, student_id: String },

    /// Remove a student from a class
    Unenroll { class_id: String, student_id: String },

    /// Show a class's statistics
    Stats { id: String },
}

#[derive(Subcommand, Debug)]
pub enum SubjectCommand {
    /// List subjects
    List {
        #[arg(short, long)]
        search: Option<String>,

        #[arg(long)]
        grade_level: Option<String>,

        #[arg(long)]
        status: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show one subject
    Show { id: String },

    /// Create a subject from a JSON file ("-" reads stdin)
    Create { file: PathBuf },

    /// Replace a subject's fields from a JSON file
    Update { id: String, file: PathBuf },

    /// Delete a subject
    Delete { id: String },

    /// List subjects offered for a grade
    Grade { grade: String },
}

#[derive(Subcommand, Debug)]
pub enum PaymentCommand {
    /// List payments
    List {
        #[arg(long)]
        month: Option<u32>,

        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        student_id: Option<String>,

        #[arg(long)]
        subject_id: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show one payment
    Show { id: String },

    /// Record a payment from a JSON file ("-" reads stdin)
    Create { file: PathBuf },

    /// Record several payments from a JSON array file
    Bulk { file: PathBuf },

    /// Replace a payment's fields from a JSON file
    Update { id: String, file: PathBuf },

    /// Delete a payment
    Delete { id: String },

    /// Show all payments of one student
    Student { student_id: String },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    Table,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RefreshArg {
    /// One refresh shared by all requests rejected at the same time
    Coalesced,
    /// Every rejected request refreshes on its own
    PerRequest,
}

impl From<RefreshArg> for RefreshMode {
    fn from(arg: RefreshArg) -> Self {
        match arg {
            RefreshArg::Coalesced => RefreshMode::Coalesced,
            RefreshArg::PerRequest => RefreshMode::PerRequest,
        }
    }
}
