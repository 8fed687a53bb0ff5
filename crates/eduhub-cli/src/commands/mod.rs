pub mod account;
pub mod session;

use anyhow::Result;
use clap::Args;
use eduhub_core::user::UserRole;
use serde::Serialize;

use crate::bootstrap::App;

#[derive(Args, Debug)]
pub struct SignupArgs {
    /// Account role: student, teacher or school
    #[arg(long)]
    pub role: UserRole,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    /// Full name (or the school's name)
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub location: String,

    /// Student: age
    #[arg(long)]
    pub age: Option<u32>,
    /// Student: grade
    #[arg(long)]
    pub grade: Option<String>,
    /// Student: school name
    #[arg(long)]
    pub school_name: Option<String>,

    /// Teacher: grades taught, comma separated
    #[arg(long, value_delimiter = ',')]
    pub teaching_grades: Vec<String>,
    /// Teacher: school name
    #[arg(long)]
    pub teaching_school: Option<String>,

    /// School: CEO's name
    #[arg(long)]
    pub ceo_name: Option<String>,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    /// Stay signed in across runs
    #[arg(long)]
    pub remember_me: bool,
}

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Location path, e.g. /books
    pub path: String,
    /// Decide as if a demo with this role were running
    #[arg(long)]
    pub demo: Option<UserRole>,
}

#[derive(Args, Debug)]
pub struct DemoArgs {
    #[arg(long)]
    pub role: UserRole,
    /// Follow the countdown until it expires or Ctrl-C is pressed
    #[arg(long)]
    pub watch: bool,
}

/// Prints `value` as JSON in `--json` mode, otherwise runs `human`.
fn emit<T, F>(app: &App, value: &T, human: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(),
{
    if app.json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human();
    }
    Ok(())
}

/// Countdown label in `m:ss` form.
pub fn format_countdown(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
