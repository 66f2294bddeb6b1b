//! maqraa CLI
//!
//! Command-line interface for the maqraa back-office API

use std::io::Write;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::eyre;

use maqraa_api::ListRequest;
use maqraa_api::dto::report::{AttendanceStatus, ReportInput};
use maqraa_api::dto::subscription::SubscriptionInput;
use maqraa_api::dto::user::UserRole;
use maqraa_client::{
    ClientConfig, FileSessionStore, HttpClient, LoginOutcome, Preferences, PreferencesStore,
};
use maqraa_api::dto::auth::{LoginRequest, VerifyCodeRequest};

mod output;

use output::{opt, page_footer, print_table, yes_no};

#[derive(Parser)]
#[command(name = "maqraa")]
#[command(about = "Back-office CLI for the maqraa memorization school", long_about = None)]
struct Cli {
    /// Server address (overrides the config file)
    #[arg(short, long, global = true)]
    server: Option<String>,

    /// Response language (overrides stored preferences)
    #[arg(long, global = true)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Common paging and search flags for list commands.
#[derive(Args)]
struct ListArgs {
    /// Free-text search
    #[arg(long)]
    search: Option<String>,

    /// Zero-based page index
    #[arg(long, default_value = "0")]
    page: u64,

    /// Rows per page (defaults to stored preferences)
    #[arg(long)]
    page_size: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with phone and password
    Login {
        #[arg(long)]
        phone: String,
    },
    /// Drop the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List students
    Students(ListArgs),
    /// List teachers
    Teachers(ListArgs),
    /// List managers
    Managers(ListArgs),
    /// Memorization circles
    Circles {
        #[command(subcommand)]
        command: CircleCommands,
    },
    /// Session attendance reports
    Reports {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Student subscriptions and billing plans
    Subscriptions {
        #[command(subcommand)]
        command: SubscriptionCommands,
    },
    /// Teacher salary invoices
    Invoices {
        #[command(subcommand)]
        command: InvoiceCommands,
    },
    /// Soft-deleted objects
    Deleted {
        #[command(subcommand)]
        command: DeletedCommands,
    },
    /// Back-office dashboard counters
    Dashboard,
    /// Show or change stored preferences
    Prefs {
        #[arg(long)]
        set_lang: Option<String>,
        #[arg(long)]
        set_page_size: Option<u64>,
        #[arg(long)]
        set_screen_reader: Option<bool>,
    },
}

#[derive(Subcommand)]
enum CircleCommands {
    /// List circles
    List {
        #[command(flatten)]
        args: ListArgs,
        /// Only circles taught by this teacher
        #[arg(long)]
        teacher: Option<i64>,
    },
    /// Show one circle with its members
    Show { id: i64 },
}

#[derive(Subcommand)]
enum ReportCommands {
    /// List session reports
    List {
        #[command(flatten)]
        args: ListArgs,
        #[arg(long)]
        circle: Option<i64>,
        #[arg(long)]
        student: Option<i64>,
        /// Only reports on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Only reports on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Record one session report
    Record {
        #[arg(long)]
        circle: i64,
        #[arg(long)]
        student: i64,
        /// Session date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// present, absent, late or excused
        #[arg(long)]
        attendance: String,
        #[arg(long)]
        from_surah: Option<u16>,
        #[arg(long)]
        from_verse: Option<u16>,
        #[arg(long)]
        to_surah: Option<u16>,
        #[arg(long)]
        to_verse: Option<u16>,
        /// Teacher evaluation, 1..=5
        #[arg(long)]
        rating: Option<u8>,
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Subcommand)]
enum SubscriptionCommands {
    /// List student subscriptions
    List {
        #[command(flatten)]
        args: ListArgs,
        #[arg(long)]
        student: Option<i64>,
        /// Only unpaid subscriptions
        #[arg(long)]
        unpaid: bool,
    },
    /// List the available billing plans
    Plans,
    /// Enroll a student into a plan
    Add {
        #[arg(long)]
        student: i64,
        #[arg(long)]
        plan: i64,
        /// Start date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        start: Option<NaiveDate>,
    },
    /// Cancel a subscription
    Cancel { id: i64 },
}

#[derive(Subcommand)]
enum InvoiceCommands {
    /// List teacher invoices
    List {
        #[command(flatten)]
        args: ListArgs,
        #[arg(long)]
        teacher: Option<i64>,
        /// Only invoices for this YYYY-MM month
        #[arg(long)]
        month: Option<String>,
    },
    /// Compute and store a teacher's invoice for one month
    Generate {
        #[arg(long)]
        teacher: i64,
        /// YYYY-MM
        #[arg(long)]
        month: String,
    },
    /// Mark an invoice as paid
    Pay { id: i64 },
}

#[derive(Subcommand)]
enum DeletedCommands {
    /// List soft-deleted objects
    List {
        #[command(flatten)]
        args: ListArgs,
        /// Only deletions of this entity type, e.g. circle
        #[arg(long)]
        entity_type: Option<String>,
    },
    /// Restore a soft-deleted object
    Restore { id: i64 },
}

fn open_session_store(config: &ClientConfig) -> Result<FileSessionStore> {
    match &config.state_dir {
        Some(dir) => Ok(FileSessionStore::new(dir.join("session.json"))),
        None => Ok(FileSessionStore::at_default_location()?),
    }
}

fn open_prefs_store(config: &ClientConfig) -> Result<PreferencesStore> {
    match &config.state_dir {
        Some(dir) => Ok(PreferencesStore::new(dir)),
        None => Ok(PreferencesStore::at_default_location()?),
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn parse_attendance(value: &str) -> Result<AttendanceStatus> {
    match value.to_ascii_lowercase().as_str() {
        "present" => Ok(AttendanceStatus::Present),
        "absent" => Ok(AttendanceStatus::Absent),
        "late" => Ok(AttendanceStatus::Late),
        "excused" => Ok(AttendanceStatus::Excused),
        other => Err(eyre!("unknown attendance status: {other}")),
    }
}

fn list_request(args: &ListArgs, lang: &str, prefs: &Preferences) -> ListRequest {
    let page_size = args.page_size.unwrap_or(prefs.page_size).max(1);
    let mut request = ListRequest {
        lang: Some(lang.to_string()),
        ..ListRequest::default()
    }
    .page(args.page, page_size);
    if let Some(search) = &args.search {
        request.search_term = Some(search.clone());
    }
    request
}

async fn list_users(
    client: &HttpClient,
    role: UserRole,
    args: &ListArgs,
    lang: &str,
    prefs: &Preferences,
) -> Result<()> {
    let page = client
        .list_users()
        .request(list_request(args, lang, prefs))
        .role(role)
        .send()
        .await?;

    let rows: Vec<Vec<String>> = page
        .items
        .iter()
        .map(|user| {
            vec![
                user.id.to_string(),
                opt(user.full_name.as_ref()),
                opt(user.phone.as_ref()),
                yes_no(user.is_active),
            ]
        })
        .collect();
    print_table(&["ID", "Name", "Phone", "Active"], &rows);
    page_footer(page.items.len(), page.total_count, args.page);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::load_default()?;
    if let Some(server) = &cli.server {
        config.api_url = server.clone();
    }

    let client = HttpClient::with_store(&config.api_url, Arc::new(open_session_store(&config)?))?;
    let prefs_store = open_prefs_store(&config)?;
    let user_id = client.session().map(|s| s.user.id);
    let prefs = prefs_store.load(user_id);
    let lang = cli.lang.clone().unwrap_or_else(|| prefs.lang.clone());

    match cli.command {
        Commands::Login { phone } => {
            let password = prompt("Password: ")?;
            let request = LoginRequest {
                phone: phone.clone(),
                password,
                lang: Some(lang.clone()),
            };
            let session = match client.login(&request).await? {
                LoginOutcome::SignedIn(session) => session,
                LoginOutcome::CodeRequired { phone } => {
                    let code = prompt(&format!("Code sent to {phone}: "))?;
                    client.verify_code(&VerifyCodeRequest { phone, code }).await?
                }
            };
            let who = session.user.full_name.unwrap_or_else(|| phone.clone());
            println!("Signed in as {who}");
        }
        Commands::Logout => {
            client.logout()?;
            println!("Signed out");
        }
        Commands::Whoami => match client.session() {
            Some(session) => {
                let role = session.user.role.map(|r| r.as_str().to_string());
                println!("{}", opt(session.user.full_name.as_ref()));
                println!("id:    {}", session.user.id);
                println!("role:  {}", opt(role.as_ref()));
                println!("phone: {}", opt(session.user.phone.as_ref()));
                if session.is_expired(Utc::now()) {
                    println!("(session expired; sign in again)");
                }
            }
            None => println!("Not signed in"),
        },
        Commands::Students(args) => {
            list_users(&client, UserRole::Student, &args, &lang, &prefs).await?;
        }
        Commands::Teachers(args) => {
            list_users(&client, UserRole::Teacher, &args, &lang, &prefs).await?;
        }
        Commands::Managers(args) => {
            list_users(&client, UserRole::Manager, &args, &lang, &prefs).await?;
        }
        Commands::Circles { command } => match command {
            CircleCommands::List { args, teacher } => {
                let mut builder = client
                    .list_circles()
                    .request(list_request(&args, &lang, &prefs));
                if let Some(teacher) = teacher {
                    builder = builder.teacher(teacher);
                }
                let page = builder.send().await?;
                let rows: Vec<Vec<String>> = page
                    .items
                    .iter()
                    .map(|circle| {
                        vec![
                            circle.id.to_string(),
                            opt(circle.name.as_ref()),
                            opt(circle.teacher_name.as_ref()),
                            opt(circle.days.as_ref()),
                            opt(circle.student_count.as_ref()),
                        ]
                    })
                    .collect();
                print_table(&["ID", "Name", "Teacher", "Days", "Students"], &rows);
                page_footer(page.items.len(), page.total_count, args.page);
            }
            CircleCommands::Show { id } => {
                let circle = client.get_circle(id).await?;
                let members = client.list_circle_members(id).await?;
                println!("{}", opt(circle.name.as_ref()));
                println!("teacher: {}", opt(circle.teacher_name.as_ref()));
                println!("days:    {}", opt(circle.days.as_ref()));
                println!(
                    "time:    {} - {}",
                    opt(circle.start_time.as_ref()),
                    opt(circle.end_time.as_ref())
                );
                println!("\nMembers ({}):", members.len());
                let rows: Vec<Vec<String>> = members
                    .iter()
                    .map(|m| vec![m.student_id.to_string(), opt(m.student_name.as_ref())])
                    .collect();
                print_table(&["ID", "Name"], &rows);
            }
        },
        Commands::Reports { command } => match command {
            ReportCommands::List {
                args,
                circle,
                student,
                from,
                to,
            } => {
                let mut builder = client
                    .list_reports()
                    .request(list_request(&args, &lang, &prefs));
                if let Some(circle) = circle {
                    builder = builder.circle(circle);
                }
                if let Some(student) = student {
                    builder = builder.student(student);
                }
                if let Some(from) = from {
                    builder = builder.from(from);
                }
                if let Some(to) = to {
                    builder = builder.to(to);
                }
                let page = builder.send().await?;
                let rows: Vec<Vec<String>> = page
                    .items
                    .iter()
                    .map(|report| {
                        let attendance = report.attendance.map(|a| a.as_str().to_string());
                        vec![
                            report.id.to_string(),
                            opt(report.date.as_ref()),
                            opt(report.circle_name.as_ref()),
                            opt(report.student_name.as_ref()),
                            opt(attendance.as_ref()),
                            opt(report.rating.as_ref()),
                        ]
                    })
                    .collect();
                print_table(
                    &["ID", "Date", "Circle", "Student", "Attendance", "Rating"],
                    &rows,
                );
                page_footer(page.items.len(), page.total_count, args.page);
            }
            ReportCommands::Record {
                circle,
                student,
                date,
                attendance,
                from_surah,
                from_verse,
                to_surah,
                to_verse,
                rating,
                notes,
            } => {
                let input = ReportInput {
                    circle_id: circle,
                    student_id: student,
                    date: date.unwrap_or_else(|| Utc::now().date_naive()),
                    attendance: parse_attendance(&attendance)?,
                    from_surah,
                    from_verse,
                    to_surah,
                    to_verse,
                    rating,
                    notes,
                };
                let report = client.create_report(&input).await?;
                println!("Recorded report {}", report.id);
            }
        },
        Commands::Subscriptions { command } => match command {
            SubscriptionCommands::List {
                args,
                student,
                unpaid,
            } => {
                let mut builder = client
                    .list_subscriptions()
                    .request(list_request(&args, &lang, &prefs));
                if let Some(student) = student {
                    builder = builder.student(student);
                }
                if unpaid {
                    builder = builder.filter("unpaid=true");
                }
                let page = builder.send().await?;
                let rows: Vec<Vec<String>> = page
                    .items
                    .iter()
                    .map(|sub| {
                        vec![
                            sub.id.to_string(),
                            opt(sub.student_name.as_ref()),
                            opt(sub.plan_name.as_ref()),
                            opt(sub.start_date.as_ref()),
                            opt(sub.end_date.as_ref()),
                            yes_no(sub.is_paid),
                        ]
                    })
                    .collect();
                print_table(&["ID", "Student", "Plan", "Start", "End", "Paid"], &rows);
                page_footer(page.items.len(), page.total_count, args.page);
            }
            SubscriptionCommands::Plans => {
                let plans = client.list_plans().await?;
                let rows: Vec<Vec<String>> = plans
                    .iter()
                    .map(|plan| {
                        vec![
                            plan.id.to_string(),
                            opt(plan.name.as_ref()),
                            opt(plan.price.as_ref()),
                            opt(plan.duration_months.as_ref()),
                            yes_no(plan.is_active),
                        ]
                    })
                    .collect();
                print_table(&["ID", "Name", "Price", "Months", "Active"], &rows);
            }
            SubscriptionCommands::Add {
                student,
                plan,
                start,
            } => {
                let input = SubscriptionInput {
                    student_id: student,
                    plan_id: plan,
                    start_date: start.unwrap_or_else(|| Utc::now().date_naive()),
                };
                let sub = client.subscribe(&input).await?;
                println!("Created subscription {}", sub.id);
            }
            SubscriptionCommands::Cancel { id } => {
                client.cancel_subscription(id).await?;
                println!("Cancelled subscription {id}");
            }
        },
        Commands::Invoices { command } => match command {
            InvoiceCommands::List {
                args,
                teacher,
                month,
            } => {
                let mut builder = client
                    .list_invoices()
                    .request(list_request(&args, &lang, &prefs));
                if let Some(teacher) = teacher {
                    builder = builder.teacher(teacher);
                }
                if let Some(month) = month {
                    builder = builder.month(month);
                }
                let page = builder.send().await?;
                let rows: Vec<Vec<String>> = page
                    .items
                    .iter()
                    .map(|invoice| {
                        vec![
                            invoice.id.to_string(),
                            opt(invoice.teacher_name.as_ref()),
                            opt(invoice.month.as_ref()),
                            opt(invoice.total.as_ref()),
                            yes_no(invoice.is_paid),
                        ]
                    })
                    .collect();
                print_table(&["ID", "Teacher", "Month", "Total", "Paid"], &rows);
                page_footer(page.items.len(), page.total_count, args.page);
            }
            InvoiceCommands::Generate { teacher, month } => {
                let invoice = client.generate_invoice(teacher, &month).await?;
                println!(
                    "Invoice {} for {} ({}): total {}",
                    invoice.id,
                    opt(invoice.teacher_name.as_ref()),
                    opt(invoice.month.as_ref()),
                    opt(invoice.total.as_ref()),
                );
                let rows: Vec<Vec<String>> = invoice
                    .lines
                    .iter()
                    .map(|line| {
                        vec![
                            opt(line.circle_name.as_ref()),
                            opt(line.sessions.as_ref()),
                            opt(line.amount.as_ref()),
                        ]
                    })
                    .collect();
                print_table(&["Circle", "Sessions", "Amount"], &rows);
            }
            InvoiceCommands::Pay { id } => {
                let invoice = client.mark_invoice_paid(id).await?;
                println!("Invoice {} marked paid", invoice.id);
            }
        },
        Commands::Deleted { command } => match command {
            DeletedCommands::List { args, entity_type } => {
                let mut builder = client
                    .list_deleted()
                    .request(list_request(&args, &lang, &prefs));
                if let Some(entity_type) = entity_type {
                    builder = builder.entity_type(entity_type);
                }
                let page = builder.send().await?;
                let rows: Vec<Vec<String>> = page
                    .items
                    .iter()
                    .map(|object| {
                        let deleted_at = object
                            .deleted_at
                            .map(|at| at.format("%Y-%m-%d %H:%M").to_string());
                        vec![
                            object.id.to_string(),
                            opt(object.entity_type.as_ref()),
                            opt(object.display_name.as_ref()),
                            opt(deleted_at.as_ref()),
                            opt(object.deleted_by.as_ref()),
                        ]
                    })
                    .collect();
                print_table(&["ID", "Type", "Name", "Deleted", "By"], &rows);
                page_footer(page.items.len(), page.total_count, args.page);
            }
            DeletedCommands::Restore { id } => {
                let object = client.restore_deleted(id).await?;
                println!("Restored {} {}", opt(object.entity_type.as_ref()), object.id);
            }
        },
        Commands::Dashboard => {
            let stats = client.dashboard_stats().await?;
            println!("students:      {}", opt(stats.student_count.as_ref()));
            println!("teachers:      {}", opt(stats.teacher_count.as_ref()));
            println!("managers:      {}", opt(stats.manager_count.as_ref()));
            println!("circles:       {}", opt(stats.circle_count.as_ref()));
            println!("subscriptions: {}", opt(stats.active_subscriptions.as_ref()));
            if let Some(ratio) = stats.attendance_ratio {
                println!("attendance:    {:.0}%", ratio * 100.0);
            }
            if !stats.monthly.is_empty() {
                println!();
                let rows: Vec<Vec<String>> = stats
                    .monthly
                    .iter()
                    .map(|point| {
                        vec![
                            opt(point.month.as_ref()),
                            opt(point.present.as_ref()),
                            opt(point.absent.as_ref()),
                        ]
                    })
                    .collect();
                print_table(&["Month", "Present", "Absent"], &rows);
            }
        }
        Commands::Prefs {
            set_lang,
            set_page_size,
            set_screen_reader,
        } => {
            let mut prefs = prefs;
            let changed =
                set_lang.is_some() || set_page_size.is_some() || set_screen_reader.is_some();
            if let Some(lang) = set_lang {
                prefs.lang = lang;
            }
            if let Some(page_size) = set_page_size {
                prefs.page_size = page_size.max(1);
            }
            if let Some(screen_reader) = set_screen_reader {
                prefs.screen_reader = screen_reader;
            }
            if changed {
                prefs_store.save(user_id, &prefs)?;
            }
            println!("lang:          {}", prefs.lang);
            println!("page size:     {}", prefs.page_size);
            println!("screen reader: {}", if prefs.screen_reader { "on" } else { "off" });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attendance_parsing() {
        assert_eq!(parse_attendance("present").unwrap(), AttendanceStatus::Present);
        assert_eq!(parse_attendance("LATE").unwrap(), AttendanceStatus::Late);
        assert!(parse_attendance("sick").is_err());
    }

    #[test]
    fn list_request_prefers_explicit_page_size() {
        let prefs = Preferences::default();
        let args = ListArgs {
            search: Some("nur".to_string()),
            page: 2,
            page_size: Some(25),
        };
        let request = list_request(&args, "en", &prefs);
        assert_eq!(request.skip_count, Some(50));
        assert_eq!(request.max_result_count, Some(25));
        assert_eq!(request.search_term.as_deref(), Some("nur"));
        assert_eq!(request.lang.as_deref(), Some("en"));
    }

    #[test]
    fn list_request_falls_back_to_preferences() {
        let prefs = Preferences {
            page_size: 50,
            ..Preferences::default()
        };
        let args = ListArgs {
            search: None,
            page: 0,
            page_size: None,
        };
        let request = list_request(&args, "ar", &prefs);
        assert_eq!(request.max_result_count, Some(50));
        assert_eq!(request.skip_count, Some(0));
    }

    #[test]
    fn cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
