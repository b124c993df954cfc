use std::io;
use std::process::ExitCode;

use cinescope_activity::{ActivityStore, MongoActivityStore};
use cinescope_lib::{CatalogAccess, Overrides, Session, Settings};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use crate::error::CliError;

const MAIN_SOURCE: &str = "main_menu";
const CONNECTION_FAILURE: &str = "Program terminated due to a connection failure.";
const CRITICAL_FAILURE: &str = "A critical error occurred.";

/// Connect both stores and run the interactive console until the operator exits.
pub(crate) fn run_console(overrides: &Overrides) -> ExitCode {
    let settings = match Settings::load(overrides) {
        Ok(s) => s,
        Err(e) => return fail_startup(&CliError::from(e), None),
    };

    let activity = match connect_activity(&settings) {
        Ok(a) => a,
        Err(e) => return fail_startup(&e, None),
    };

    let conn = match cinescope_db::open_catalog(&settings.catalog_path.value) {
        Ok(c) => c,
        Err(e) => return fail_startup(&CliError::from(e), Some(&activity)),
    };
    log::info!(
        "Catalog opened from {} ({})",
        settings.catalog_path.value.display(),
        settings.catalog_path.source
    );

    let result = run_session(&conn, &activity);

    match conn.close() {
        Ok(()) => log::debug!("Catalog connection closed"),
        Err((_, e)) => log::warn!("Could not close catalog connection: {}", e),
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            println!("{}", CRITICAL_FAILURE.if_supports_color(Stdout, |t| t.red()));
            activity.record_error(MAIN_SOURCE, &e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn connect_activity(settings: &Settings) -> Result<MongoActivityStore, CliError> {
    let store = MongoActivityStore::connect(
        &settings.store_uri.value,
        &settings.store_name.value,
        &settings.collection_names(),
    )?;
    log::info!(
        "Activity store {} ({})",
        settings.store_name.value,
        settings.store_name.source
    );
    Ok(store)
}

fn run_session(conn: &Connection, activity: &MongoActivityStore) -> Result<(), CliError> {
    let catalog = CatalogAccess::new(conn, activity);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(&catalog, activity, stdin.lock(), stdout.lock());
    session.run()?;
    Ok(())
}

fn fail_startup(err: &CliError, activity: Option<&MongoActivityStore>) -> ExitCode {
    log::error!("{}", err);
    println!("{}", CONNECTION_FAILURE.if_supports_color(Stdout, |t| t.red()));
    if let Some(activity) = activity {
        activity.record_error(MAIN_SOURCE, CONNECTION_FAILURE);
    }
    ExitCode::FAILURE
}
