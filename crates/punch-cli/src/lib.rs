//! Punch CLI library.
//!
//! One module per screen of the product: auth, the check-in/out
//! dashboard, the personal attendance log, the profile page, and the
//! admin panel. Each module owns its clap subcommand enum and a
//! `run` entry point; `fmt` holds the shared output writers.

pub mod admin_cmd;
pub mod attendance_cmd;
pub mod auth_cmd;
pub mod fmt;
pub mod profile_cmd;
