use clap::{CommandFactory, Parser};
use orasql::backend::oracle::OracleBackend;
use orasql::backend::{Backend, RowCursor};
use orasql::cli::Cli;
use orasql::config::{self, AppConfig};
use orasql::error::OrasqlError;
use orasql::format;
use orasql::output::{self, Destination};
use orasql::verbose::{self, Timer};
use std::io::{self, IsTerminal, Read};
use std::process;

fn main() {
    // Load .env file (optional, ignore if missing)
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            process::exit(1);
        }
        Err(e) => e.exit(),
    };

    verbose::init(cli.verbose || config::verbose_default(cli.config.as_ref()));

    if let Err(err) = run(&cli) {
        output::print_error(&err);
        if err.is_usage() {
            output::print_usage(&Cli::command().render_usage().to_string());
        }
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), OrasqlError> {
    let stdin = io::stdin();
    let mut input: Box<dyn Read> = if stdin.is_terminal() {
        Box::new(io::empty())
    } else {
        Box::new(stdin.lock())
    };
    let app_config = config::load_from_args(cli, &mut input)?;

    tracing::debug!(
        "connection {}, output {} to {}",
        app_config.connection.to_url(app_config.show_secrets),
        app_config.mode.label(),
        app_config.target.describe()
    );

    // Open the destination before the query (fail fast on a bad path)
    let mut destination = Destination::open(&app_config.target)?;

    tracing::debug!("connecting to {}...", app_config.connection.locator);
    let timer = Timer::start();
    let backend = OracleBackend::connect(&app_config.connection, app_config.show_secrets)?;
    tracing::debug!("connected ({}ms)", timer.elapsed_ms());

    let rows = execute_and_render(&backend, &app_config, &mut destination)?;

    backend.close()?;
    tracing::debug!("done, {rows} rows written");
    Ok(())
}

fn execute_and_render<B: Backend>(
    backend: &B,
    app_config: &AppConfig,
    destination: &mut Destination,
) -> Result<usize, OrasqlError> {
    tracing::debug!("executing query...");
    let timer = Timer::start();
    let mut cursor = backend.execute(&app_config.query)?;
    tracing::debug!(
        "query open ({}ms, {} columns)",
        timer.elapsed_ms(),
        cursor.columns().len()
    );

    tracing::debug!("formatting {} output...", app_config.mode.label());
    let timer = Timer::start();
    let rows = format::render(&mut cursor, app_config.mode, app_config.debug, destination)?;
    tracing::debug!("output complete ({}ms, {} rows)", timer.elapsed_ms(), rows);
    Ok(rows)
}
