//! Personal exercise log backed by a local SQLite database.
//!
//! Two components make up the library: a credential store
//! ([`repositories::CredentialStore`]) that registers and authenticates
//! users, and a workout ledger ([`repositories::WorkoutLedger`]) that records
//! workouts and summarizes them. Both take the pool and the user id
//! explicitly; nothing is kept in global state.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod migrations;
pub mod models;
pub mod password;
pub mod repositories;
pub mod session;
