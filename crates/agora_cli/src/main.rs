//! Smoke probe for the agora core crate.
//!
//! # Responsibility
//! - Verify that the core library links, the schema bootstraps, and one
//!   register-and-read-back round trip works against an in-memory database.
//!
//! # Invariants
//! - Never panics; failures are reported on stderr with a non-zero exit.

use agora_core::{
    core_version, open_db_in_memory, ping, NewPerson, PersonService, SqlitePersonRepository,
};
use std::process::ExitCode;

fn run() -> Result<(), String> {
    let conn = open_db_in_memory().map_err(|err| format!("database bootstrap failed: {err}"))?;
    let repo = SqlitePersonRepository::try_new(&conn)
        .map_err(|err| format!("repository readiness check failed: {err}"))?;
    let service = PersonService::new(repo);

    let person = NewPerson::new("Probe", "probe", None);
    service
        .create_person(&person)
        .map_err(|err| format!("probe insert failed: {err}"))?;
    let view = service
        .get_person("probe")
        .map_err(|err| format!("probe read-back failed: {err}"))?;
    println!("round trip ok: {} ({})", view.name, view.username);
    Ok(())
}

fn main() -> ExitCode {
    println!("agora_core {} {}", core_version(), ping());
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
