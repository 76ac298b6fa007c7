//! Command execution against the backend.

use std::io::{self, BufRead, Read, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, Utc};
use edcenter_core::auth::token;
use edcenter_core::config::SessionBackend;
use edcenter_core::models::{
    ClassFilters, ClassFormData, DashboardStats, PaymentFilters, PaymentFormData,
    RegisterRequest, StudentFilters, StudentFormData, StudentPaymentHistory, SubjectFilters,
    SubjectFormData, TeacherFilters, TeacherFormData,
};
use edcenter_core::{ApiClient, Config, RefreshMode, SessionEvent};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::commands::{
    ClassCommand, Cli, Commands, OutputFormat, PaymentCommand, StudentCommand, SubjectCommand,
    TeacherCommand,
};
use crate::output::{print_json, print_page, print_rows};

/// Build the client from config and flags, run one command, then report
/// any session changes it caused.
pub async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;

    let mut settings = config.client_settings();
    if let Some(url) = cli.base_url {
        settings.base_url = url;
    }
    if let Some(mode) = cli.refresh_mode {
        settings.refresh_mode = mode.into();
    }
    info!(base_url = %settings.base_url, refresh_mode = ?settings.refresh_mode, "Using backend");

    let store = config
        .session_store()
        .context("Failed to open session store")?;
    let client = ApiClient::new(settings, store).context("Failed to create API client")?;

    let mut events = client.subscribe();
    let result = execute(&client, &mut config, cli.command, cli.format).await;
    report_session_events(&mut events);
    result
}

fn report_session_events(events: &mut broadcast::Receiver<SessionEvent>) {
    while let Ok(event) = events.try_recv() {
        match event {
            SessionEvent::Terminated(reason) => {
                eprintln!(
                    "Your session has ended ({}). Run `edcenter login` to sign in again.",
                    reason
                );
            }
            other => debug!(event = ?other, "Session event"),
        }
    }
}

async fn execute(
    client: &ApiClient,
    config: &mut Config,
    command: Commands,
    format: OutputFormat,
) -> Result<()> {
    match command {
        Commands::Login { email } => login(client, config, email).await,
        Commands::Register { name, email } => register(client, config, name, email).await,
        Commands::Logout => {
            let result = client.logout().await;
            println!("Signed out");
            if let Err(e) = result {
                eprintln!("Warning: the server did not confirm the logout: {}", e);
            }
            Ok(())
        }
        Commands::Whoami => {
            let user = client.current_user().await?;
            match format {
                OutputFormat::Json => print_json(&user),
                OutputFormat::Table => {
                    println!("{} <{}> ({})", user.name, user.email, user.role);
                    Ok(())
                }
            }
        }
        Commands::Status => status(client, config, format),
        Commands::Dashboard => {
            let stats = client.dashboard_statistics().await?;
            match format {
                OutputFormat::Json => print_json(&stats),
                OutputFormat::Table => {
                    print_dashboard(&stats);
                    Ok(())
                }
            }
        }
        Commands::Students { action } => students(client, action, format).await,
        Commands::Teachers { action } => teachers(client, action, format).await,
        Commands::Classes { action } => classes(client, action, format).await,
        Commands::Subjects { action } => subjects(client, action, format).await,
        Commands::Payments { action } => payments(client, action, format).await,
    }
}

// ============================================================================
// Account
// ============================================================================

async fn login(client: &ApiClient, config: &mut Config, email: Option<String>) -> Result<()> {
    let email = match email.or_else(|| config.last_email.clone()) {
        Some(email) => email,
        None => prompt("Email: ")?,
    };
    let password = rpassword::prompt_password(format!("Password for {}: ", email))
        .context("Failed to read password")?;

    let auth = client.login(&email, &password).await?;
    match auth.user {
        Some(ref user) => println!("Signed in as {} <{}>", user.name, user.email),
        None => println!("Signed in"),
    }

    remember_email(config, email);
    Ok(())
}

async fn register(
    client: &ApiClient,
    config: &mut Config,
    name: String,
    email: String,
) -> Result<()> {
    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;
    let password_confirmation =
        rpassword::prompt_password("Confirm password: ").context("Failed to read password")?;

    let request = RegisterRequest {
        name,
        email: email.clone(),
        password,
        password_confirmation,
    };
    client.register(&request).await?;
    println!("Account created, signed in as {}", email);

    remember_email(config, email);
    Ok(())
}

fn remember_email(config: &mut Config, email: String) {
    if config.last_email.as_deref() == Some(email.as_str()) {
        return;
    }
    config.last_email = Some(email);
    if let Err(e) = config.save() {
        warn!(error = %e, "Failed to save config");
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let value = line.trim().to_string();
    if value.is_empty() {
        bail!("No value entered");
    }
    Ok(value)
}

#[derive(Debug, Serialize)]
struct StatusReport {
    base_url: String,
    refresh_mode: RefreshMode,
    session_backend: SessionBackend,
    user: Option<String>,
    access_token: TokenState,
    expires_at: Option<DateTime<Utc>>,
    has_refresh_token: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum TokenState {
    Missing,
    Valid,
    Expired,
    Opaque,
}

fn token_state(access_token: Option<&str>) -> (TokenState, Option<DateTime<Utc>>) {
    let Some(access_token) = access_token else {
        return (TokenState::Missing, None);
    };
    match token::expires_at(access_token) {
        Some(exp) if exp > Utc::now() => (TokenState::Valid, Some(exp)),
        Some(exp) => (TokenState::Expired, Some(exp)),
        None => (TokenState::Opaque, None),
    }
}

fn status(client: &ApiClient, config: &Config, format: OutputFormat) -> Result<()> {
    let session = client.session();
    let (access_token, expires_at) = token_state(session.access_token.as_deref());
    let report = StatusReport {
        base_url: client.base_url().to_string(),
        refresh_mode: client.refresh_mode(),
        session_backend: config.session_backend,
        user: session
            .user
            .as_ref()
            .map(|u| format!("{} <{}>", u.name, u.email)),
        access_token,
        expires_at,
        has_refresh_token: session.refresh_token.is_some(),
    };

    if format == OutputFormat::Json {
        return print_json(&report);
    }

    let token_line = match (report.access_token, report.expires_at) {
        (TokenState::Valid, Some(exp)) => format!("valid until {}", local_time(exp)),
        (TokenState::Expired, Some(exp)) => format!("expired at {}", local_time(exp)),
        (TokenState::Opaque, _) => "present (no expiry claim)".to_string(),
        _ => "none".to_string(),
    };
    println!("Backend:        {}", report.base_url);
    println!("Refresh mode:   {:?}", report.refresh_mode);
    println!("Credentials in: {:?}", report.session_backend);
    println!(
        "User:           {}",
        report.user.as_deref().unwrap_or("(not signed in)")
    );
    println!("Access token:   {}", token_line);
    println!(
        "Refresh token:  {}",
        if report.has_refresh_token { "present" } else { "none" }
    );
    Ok(())
}

fn local_time(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

fn print_dashboard(stats: &DashboardStats) {
    println!("Students:  {}", stats.total_students);
    println!("Teachers:  {}", stats.total_teachers);
    println!("Classes:   {}", stats.total_classes);
    println!("Subjects:  {}", stats.total_subjects);
    println!("Revenue this month: {:.2}", stats.current_month_revenue);
    println!(
        "Year to date:       {:.2} (avg {:.2}/month, {:+.1}%)",
        stats.year_to_date.total_revenue,
        stats.year_to_date.average_monthly,
        stats.year_to_date.growth_percentage
    );
    if !stats.last_6_months_revenue.is_empty() {
        println!();
        for month in &stats.last_6_months_revenue {
            println!("  {:<10} {:>10.2}", month.month, month.revenue);
        }
    }
}

// ============================================================================
// Resources
// ============================================================================

/// Read a JSON payload from a file, or from stdin when the path is `-`.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid JSON payload in {}", path.display()))
}

/// Print a short confirmation, or the full record in JSON mode.
fn confirm<T: Serialize>(format: OutputFormat, message: String, value: &T) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => {
            println!("{}", message);
            Ok(())
        }
    }
}

async fn students(client: &ApiClient, action: StudentCommand, format: OutputFormat) -> Result<()> {
    match action {
        StudentCommand::List {
            search,
            grade,
            payment_status,
            sort,
            page,
        } => {
            let filters = StudentFilters {
                search,
                grade,
                payment_status,
                sort,
                page: page.page,
                limit: page.limit,
            };
            print_page(format, &client.list_students(&filters).await?)
        }
        StudentCommand::Show { id } => print_json(&client.get_student(&id).await?),
        StudentCommand::Create { file } => {
            let data: StudentFormData = read_json(&file)?;
            let student = client.create_student(&data).await?;
            confirm(
                format,
                format!("Created student {} ({})", student.id, student.full_name()),
                &student,
            )
        }
        StudentCommand::Update { id, file } => {
            let data: StudentFormData = read_json(&file)?;
            let student = client.update_student(&id, &data).await?;
            confirm(format, format!("Updated student {}", student.id), &student)
        }
        StudentCommand::Delete { id } => {
            client.delete_student(&id).await?;
            println!("Deleted student {}", id);
            Ok(())
        }
        StudentCommand::Payments { id } => {
            let history = client.student_payments(&id).await?;
            print_payment_history(format, &history)
        }
        StudentCommand::Classes { id } => print_json(&client.student_classes(&id).await?),
    }
}

fn print_payment_history(format: OutputFormat, history: &StudentPaymentHistory) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(history);
    }
    println!("{}", history.student.full_name());
    print_rows(format, &history.payments)?;
    println!(
        "Paid {:.2}, {} pending ({:.2})",
        history.summary.total_paid,
        history.summary.pending_payments_count,
        history.summary.pending_amount
    );
    Ok(())
}

async fn teachers(client: &ApiClient, action: TeacherCommand, format: OutputFormat) -> Result<()> {
    match action {
        TeacherCommand::List {
            search,
            subject_id,
            status,
            page,
        } => {
            let filters = TeacherFilters {
                search,
                subject_id,
                status,
                page: page.page,
                limit: page.limit,
            };
            print_page(format, &client.list_teachers(&filters).await?)
        }
        TeacherCommand::Show { id } => print_json(&client.get_teacher(&id).await?),
        TeacherCommand::Create { file } => {
            let data: TeacherFormData = read_json(&file)?;
            let teacher = client.create_teacher(&data).await?;
            confirm(
                format,
                format!("Created teacher {} ({})", teacher.id, teacher.full_name()),
                &teacher,
            )
        }
        TeacherCommand::Update { id, file } => {
            let data: TeacherFormData = read_json(&file)?;
            let teacher = client.update_teacher(&id, &data).await?;
            confirm(format, format!("Updated teacher {}", teacher.id), &teacher)
        }
        TeacherCommand::Delete { id } => {
            client.delete_teacher(&id).await?;
            println!("Deleted teacher {}", id);
            Ok(())
        }
        TeacherCommand::Stats { id } => print_json(&client.teacher_statistics(&id).await?),
    }
}

async fn classes(client: &ApiClient, action: ClassCommand, format: OutputFormat) -> Result<()> {
    match action {
        ClassCommand::List {
            search,
            subject_id,
            teacher_id,
            grade_level,
            status,
            page,
        } => {
            let filters = ClassFilters {
                search,
                subject_id,
                teacher_id,
                grade_level,
                status,
                page: page.page,
                limit: page.limit,
            };
            print_page(format, &client.list_classes(&filters).await?)
        }
        ClassCommand::Show { id } => print_json(&client.get_class(&id).await?),
        ClassCommand::Create { file } => {
            let data: ClassFormData = read_json(&file)?;
            let class = client.create_class(&data).await?;
            confirm(
                format,
                format!("Created class {} ({})", class.id, class.name),
                &class,
            )
        }
        ClassCommand::Update { id, file } => {
            let data: ClassFormData = read_json(&file)?;
            let class = client.update_class(&id, &data).await?;
            confirm(format, format!("Updated class {}", class.id), &class)
        }
        ClassCommand::Delete { id } => {
            client.delete_class(&id).await?;
            println!("Deleted class {}", id);
            Ok(())
        }
        ClassCommand::Enroll {
            class_id,
            student_id,
        } => {
            client.enroll_student(&class_id, &student_id).await?;
            println!("Enrolled student {} in class {}", student_id, class_id);
            Ok(())
        }
        ClassCommand::Unenroll {
            class_id,
            student_id,
        } => {
            client.unenroll_student(&class_id, &student_id).await?;
            println!("Removed student {} from class {}", student_id, class_id);
            Ok(())
        }
        ClassCommand::Stats { id } => print_json(&client.class_statistics(&id).await?),
    }
}

async fn subjects(client: &ApiClient, action: SubjectCommand, format: OutputFormat) -> Result<()> {
    match action {
        SubjectCommand::List {
            search,
            grade_level,
            status,
            page,
        } => {
            let filters = SubjectFilters {
                search,
                grade_level,
                status,
                page: page.page,
                limit: page.limit,
            };
            print_page(format, &client.list_subjects(&filters).await?)
        }
        SubjectCommand::Show { id } => print_json(&client.get_subject(&id).await?),
        SubjectCommand::Create { file } => {
            let data: SubjectFormData = read_json(&file)?;
            let subject = client.create_subject(&data).await?;
            confirm(
                format,
                format!("Created subject {} ({})", subject.id, subject.name_en),
                &subject,
            )
        }
        SubjectCommand::Update { id, file } => {
            let data: SubjectFormData = read_json(&file)?;
            let subject = client.update_subject(&id, &data).await?;
            confirm(format, format!("Updated subject {}", subject.id), &subject)
        }
        SubjectCommand::Delete { id } => {
            client.delete_subject(&id).await?;
            println!("Deleted subject {}", id);
            Ok(())
        }
        SubjectCommand::Grade { grade } => {
            print_rows(format, &client.subjects_by_grade(&grade).await?)
        }
    }
}

async fn payments(client: &ApiClient, action: PaymentCommand, format: OutputFormat) -> Result<()> {
    match action {
        PaymentCommand::List {
            month,
            year,
            student_id,
            subject_id,
            page,
        } => {
            let filters = PaymentFilters {
                month,
                year,
                student_id,
                subject_id,
                page: page.page,
                limit: page.limit,
            };
            print_page(format, &client.list_payments(&filters).await?)
        }
        PaymentCommand::Show { id } => print_json(&client.get_payment(&id).await?),
        PaymentCommand::Create { file } => {
            let data: PaymentFormData = read_json(&file)?;
            let payment = client.create_payment(&data).await?;
            confirm(
                format,
                format!("Recorded payment {} for {}", payment.id, payment.period()),
                &payment,
            )
        }
        PaymentCommand::Bulk { file } => {
            let data: Vec<PaymentFormData> = read_json(&file)?;
            if data.is_empty() {
                bail!("{} contains no payments", file.display());
            }
            let created = client.create_payments_bulk(data).await?;
            confirm(
                format,
                format!("Recorded {} payments", created.len()),
                &created,
            )
        }
        PaymentCommand::Update { id, file } => {
            let data: PaymentFormData = read_json(&file)?;
            let payment = client.update_payment(&id, &data).await?;
            confirm(format, format!("Updated payment {}", payment.id), &payment)
        }
        PaymentCommand::Delete { id } => {
            client.delete_payment(&id).await?;
            println!("Deleted payment {}", id);
            Ok(())
        }
        PaymentCommand::Student { student_id } => {
            let history = client.payments_by_student(&student_id).await?;
            print_payment_history(format, &history)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_token_state() {
        assert_eq!(token_state(None), (TokenState::Missing, None));
        assert_eq!(token_state(Some("opaque")).0, TokenState::Opaque);
    }

    #[test]
    fn test_read_json_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subject.json");
        std::fs::write(
            &path,
            r#"{"name_en": "Physics", "name_ar": "فيزياء", "fee_amount": 40}"#,
        )
        .unwrap();

        let data: SubjectFormData = read_json(&path).unwrap();
        assert_eq!(data.name_en, "Physics");
        assert_eq!(data.fee_amount, 40.0);
        assert!(data.description.is_none());
    }

    #[test]
    fn test_read_json_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = read_json::<SubjectFormData>(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.json"));
    }

    #[test]
    fn test_local_time_format() {
        let time = Utc::now() + Duration::hours(1);
        assert_eq!(local_time(time).len(), "2024-01-01 00:00:00".len());
    }
}
