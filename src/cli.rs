//! Command line front end: argument parsing and the text each command prints.

use std::io::Write;

use chrono::Local;
use clap::{Args, Parser, Subcommand};

use crate::error::{AppError, Result};
use crate::models::{
    LoginCredentials, Registration, SummaryReport, WorkoutEntry, WorkoutForm, WorkoutType,
    DATE_FORMAT,
};
use crate::repositories::{CredentialStore, WorkoutLedger};
use crate::session::Session;

#[derive(Parser, Debug)]
#[command(name = "fittrack", version, about = "Log and review exercise sessions", long_about = None)]
pub struct Cli {
    /// SQLite database to use, overrides DATABASE_URL
    #[arg(long, global = true)]
    pub database: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct AccountArgs {
    #[arg(short, long)]
    pub username: String,

    #[arg(short, long, env = "FITTRACK_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl AccountArgs {
    fn credentials(&self) -> LoginCredentials {
        LoginCredentials::new(&self.username, &self.password)
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create a new account
    Register {
        #[command(flatten)]
        account: AccountArgs,

        /// Repeat the password
        #[arg(long, env = "FITTRACK_PASSWORD_CONFIRM", hide_env_values = true)]
        confirm: String,
    },

    /// Record a workout
    Log {
        #[command(flatten)]
        account: AccountArgs,

        /// Date as YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,

        #[arg(long = "type", default_value = "Running")]
        workout_type: String,

        /// Minutes
        #[arg(long, allow_hyphen_values = true)]
        duration: String,

        #[arg(long, allow_hyphen_values = true)]
        calories: String,

        /// Current weight in kg
        #[arg(long, allow_hyphen_values = true)]
        weight: String,
    },

    /// Show every logged workout, oldest first
    History {
        #[command(flatten)]
        account: AccountArgs,

        #[arg(long)]
        json: bool,
    },

    /// Show totals and weight change
    Summary {
        #[command(flatten)]
        account: AccountArgs,

        #[arg(long)]
        json: bool,
    },

    /// List the accepted workout types
    Types,
}

/// Execute one command against the given stores, writing user-facing output
/// to `out`.
pub fn run<C, L, W>(command: &Command, store: &C, ledger: &L, out: &mut W) -> Result<()>
where
    C: CredentialStore,
    L: WorkoutLedger,
    W: Write,
{
    match command {
        Command::Register { account, confirm } => {
            let registration = Registration::new(&account.username, &account.password, confirm);
            store.register(&registration)?;
            writeln!(out, "Account created! You can now log in.")?;
        }
        Command::Log {
            account,
            date,
            workout_type,
            duration,
            calories,
            weight,
        } => {
            let session = Session::login(store, &account.credentials())?;
            let date = date
                .clone()
                .unwrap_or_else(|| Local::now().date_naive().format(DATE_FORMAT).to_string());
            let form = WorkoutForm::new(&date, workout_type, duration, calories, weight);
            ledger.log_workout(session.require_user()?, &form)?;
            writeln!(out, "Workout logged successfully.")?;
        }
        Command::History { account, json } => {
            let session = Session::login(store, &account.credentials())?;
            let entries = ledger.list_workouts(session.require_user()?)?;
            if *json {
                serde_json::to_writer_pretty(&mut *out, &entries)
                    .map_err(|e| AppError::Internal(e.to_string()))?;
                writeln!(out)?;
            } else {
                write_history(out, &entries)?;
            }
        }
        Command::Summary { account, json } => {
            let session = Session::login(store, &account.credentials())?;
            let summary = ledger.summarize(session.require_user()?)?;
            if *json {
                serde_json::to_writer_pretty(&mut *out, &SummaryReport::from(&summary))
                    .map_err(|e| AppError::Internal(e.to_string()))?;
                writeln!(out)?;
            } else {
                if let Some(username) = session.username() {
                    writeln!(out, "Welcome, {}!", username)?;
                }
                write!(out, "{}", summary)?;
            }
        }
        Command::Types => {
            for t in WorkoutType::ALL {
                writeln!(out, "{}", t)?;
            }
        }
    }
    Ok(())
}

fn write_history<W: Write>(out: &mut W, entries: &[WorkoutEntry]) -> std::io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "No workouts logged yet.");
    }
    writeln!(
        out,
        "{:<10}  {:<13}  {:>8}  {:>8}  {:>7}",
        "Date", "Type", "Duration", "Calories", "Weight"
    )?;
    for entry in entries {
        writeln!(
            out,
            "{:<10}  {:<13}  {:>8}  {:>8}  {:>7.1}",
            entry.date,
            entry.workout_type.as_str(),
            entry.duration_minutes,
            entry.calories,
            entry.weight_kg
        )?;
    }
    Ok(())
}
