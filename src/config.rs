use crate::cli::{Cli, InputSource};
use crate::dsn::{self, ConnectionString, DbType};
use crate::error::OrasqlError;
use crate::format::OutputMode;
use crate::format_xlsx;
use crate::output::OutputTarget;
use crate::payload::{Payload, PayloadFormat};
use directories::ProjectDirs;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

pub const ENV_DSN: &str = "ORASQL_DSN";
pub const ENV_USER: &str = "ORASQL_USER";
pub const ENV_PASSWORD: &str = "ORASQL_PWD";

/// Everything one run needs, resolved once from flags, files and environment.
#[derive(Debug)]
pub struct AppConfig {
    pub connection: ConnectionString,
    pub query: String,
    pub mode: OutputMode,
    pub target: OutputTarget,
    pub debug: bool,
    pub show_secrets: bool,
}

// --- TOML config file structs ---

#[derive(Debug, Deserialize, Default)]
struct TomlConfig {
    #[serde(default)]
    defaults: TomlDefaults,
    #[serde(default)]
    profiles: HashMap<String, TomlProfile>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlDefaults {
    verbose: Option<bool>,
    output: Option<OutputMode>,
}

#[derive(Debug, Deserialize, Default, Clone)]
struct TomlProfile {
    db: Option<String>,
    dsn: Option<String>,
    user: Option<String>,
    password: Option<String>,
    password_env: Option<String>,
}

/// Where the config file lives, and whether the user asked for it explicitly.
struct ResolvedConfigPath {
    path: PathBuf,
    /// true if user explicitly specified via --config or ORASQL_CONFIG
    explicit: bool,
}

/// Treat empty strings as absent.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Read an environment variable, treating an empty value as unset.
pub fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Resolve the config file path: --config flag > env var > platform default.
fn resolve_config_path(cli_config: Option<&PathBuf>) -> Option<ResolvedConfigPath> {
    if let Some(path) = cli_config {
        return Some(ResolvedConfigPath { path: path.clone(), explicit: true });
    }
    if let Some(path) = env_non_empty("ORASQL_CONFIG") {
        return Some(ResolvedConfigPath { path: PathBuf::from(path), explicit: true });
    }
    ProjectDirs::from("", "", "orasql").map(|dirs| ResolvedConfigPath {
        path: dirs.config_dir().join("config.toml"),
        explicit: false,
    })
}

/// Load and parse the TOML config file (if it exists).
fn load_toml_config(resolved: Option<&ResolvedConfigPath>) -> Result<TomlConfig, OrasqlError> {
    let Some(resolved) = resolved else {
        return Ok(TomlConfig::default());
    };

    if !resolved.path.exists() {
        if resolved.explicit {
            return Err(OrasqlError::config(format!(
                "config file not found: {}",
                resolved.path.display()
            )));
        }
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(&resolved.path).map_err(|e| {
        OrasqlError::config(format!("cannot read config file {}: {}", resolved.path.display(), e))
    })?;

    toml::from_str(&content).map_err(|e| {
        OrasqlError::config(format!("invalid config file {}: {}", resolved.path.display(), e))
    })
}

/// Resolve a password from a direct value or an env indirection.
fn resolve_secret(direct: Option<&str>, env_key: Option<&str>) -> Option<SecretString> {
    if let Some(val) = non_empty(direct) {
        return Some(SecretString::from(val.to_string()));
    }
    env_key
        .and_then(env_non_empty)
        .map(SecretString::from)
}

/// Build AppConfig from parsed CLI args. `stdin` is read only when the
/// query comes from a pipe.
pub fn load_from_args(args: &Cli, stdin: &mut dyn Read) -> Result<AppConfig, OrasqlError> {
    let resolved_path = resolve_config_path(args.config.as_ref());
    let toml_config = load_toml_config(resolved_path.as_ref())?;

    let profile = args
        .profile
        .as_deref()
        .map(|name| {
            toml_config.profiles.get(name).cloned().ok_or_else(|| {
                OrasqlError::config(format!("profile '{name}' not found in config file"))
            })
        })
        .transpose()?;

    // Output mode and the --debug restriction are checked before any file is read.
    let mode = args
        .output
        .or(toml_config.defaults.output)
        .unwrap_or_default();
    if args.debug && mode != OutputMode::Plain {
        return Err(OrasqlError::config(format!(
            "--debug is only allowed with the out format, not {}",
            mode.label()
        )));
    }

    let (connection, query) = match args.input {
        Some(InputSource::Json) => from_payload(args, PayloadFormat::Json)?,
        Some(InputSource::Yaml) => from_payload(args, PayloadFormat::Yaml)?,
        input => {
            let db_arg = args.db.as_deref().or(profile.as_ref().and_then(|p| p.db.as_deref()));
            let db = DbType::resolve(db_arg);
            let query = resolve_query(args, input, stdin)?;
            let connection = resolve_connection(args, profile.as_ref(), db)?;
            (connection, query)
        }
    };

    if query.trim().is_empty() {
        return Err(OrasqlError::config(
            "no query provided, use --query, --input sql|json|yaml or pipe it on stdin",
        ));
    }

    let target = resolve_target(mode, args.output_file.as_deref())?;

    Ok(AppConfig {
        connection,
        query,
        mode,
        target,
        debug: args.debug,
        show_secrets: args.show_secrets,
    })
}

/// Whether the config file asks for verbose diagnostics. Missing or broken
/// config files read as false here; `load_from_args` reports them.
pub fn verbose_default(config_path: Option<&PathBuf>) -> bool {
    load_toml_config(resolve_config_path(config_path).as_ref())
        .ok()
        .and_then(|c| c.defaults.verbose)
        .unwrap_or(false)
}

/// A payload file supplies credentials and query together and wins over
/// `--dsn`, `--query` and the environment.
fn from_payload(
    args: &Cli,
    format: PayloadFormat,
) -> Result<(ConnectionString, String), OrasqlError> {
    let path = args.input_file.as_deref().ok_or_else(|| {
        OrasqlError::config("--input json|yaml needs --input-file with the payload path")
    })?;
    let payload = Payload::load(path, format)?;

    if args.dsn.is_some() || args.query.is_some() {
        tracing::debug!("payload {} overrides --dsn/--query", path.display());
    }

    let db = DbType::resolve(non_empty(payload.db.as_deref()).or(args.db.as_deref()));
    let connection = ConnectionString::new(db, &payload.user, &payload.pwd, &payload.dsn);
    Ok((connection, payload.query))
}

/// Query text: --query > SQL file > stdin.
fn resolve_query(
    args: &Cli,
    input: Option<InputSource>,
    stdin: &mut dyn Read,
) -> Result<String, OrasqlError> {
    if let Some(query) = non_empty(args.query.as_deref()) {
        return Ok(query.to_string());
    }

    match (input, args.input_file.as_deref()) {
        (Some(InputSource::Sql), None) => Err(OrasqlError::config(
            "--input sql needs --input-file with the query path",
        )),
        (Some(InputSource::Sql) | None, Some(path)) => read_query_file(path),
        _ => {
            let mut query = String::new();
            stdin.read_to_string(&mut query).map_err(|e| {
                OrasqlError::config(format!("cannot read query from stdin: {e}"))
            })?;
            Ok(query)
        }
    }
}

fn read_query_file(path: &Path) -> Result<String, OrasqlError> {
    std::fs::read_to_string(path).map_err(|e| {
        OrasqlError::config(format!("cannot read SQL file {}: {}", path.display(), e))
    })
}

/// Connection: --dsn > profile > ORASQL_DSN/ORASQL_USER/ORASQL_PWD.
fn resolve_connection(
    args: &Cli,
    profile: Option<&TomlProfile>,
    db: DbType,
) -> Result<ConnectionString, OrasqlError> {
    if let Some(raw) = non_empty(args.dsn.as_deref()) {
        return ConnectionString::parse(db, &dsn::expand_env(raw));
    }

    if let Some(profile) = profile {
        return connection_from_profile(profile, db);
    }

    let locator = env_non_empty(ENV_DSN);
    let user = env_non_empty(ENV_USER);
    let password = env_non_empty(ENV_PASSWORD);
    match (locator, user, password) {
        (Some(locator), Some(user), Some(password)) => {
            Ok(ConnectionString::new(db, &user, &password, &locator))
        }
        (locator, user, _) => {
            let missing = if locator.is_none() {
                ENV_DSN
            } else if user.is_none() {
                ENV_USER
            } else {
                ENV_PASSWORD
            };
            Err(OrasqlError::config(format!(
                "missing --dsn option or {missing} environment variable"
            )))
        }
    }
}

/// A profile either holds a full `user:password@locator` dsn, or a bare
/// locator plus `user` and `password`/`password_env`.
fn connection_from_profile(profile: &TomlProfile, db: DbType) -> Result<ConnectionString, OrasqlError> {
    let raw = non_empty(profile.dsn.as_deref())
        .ok_or_else(|| OrasqlError::config("profile has no dsn"))?;
    let raw = dsn::expand_env(raw);

    let Some(user) = non_empty(profile.user.as_deref()) else {
        return ConnectionString::parse(db, &raw);
    };

    let password = resolve_secret(profile.password.as_deref(), profile.password_env.as_deref())
        .ok_or_else(|| {
            OrasqlError::config(format!("profile has no password for user {user}"))
        })?;

    Ok(ConnectionString::new(db, user, password.expose_secret(), &raw))
}

fn resolve_target(mode: OutputMode, output_file: Option<&str>) -> Result<OutputTarget, OrasqlError> {
    if mode != OutputMode::Xlsx {
        return Ok(OutputTarget::from_path_arg(output_file));
    }

    match OutputTarget::from_path_arg(output_file) {
        OutputTarget::Stdout => Err(OrasqlError::config(
            "xls output needs --output-file path.xlsx[:SheetName]",
        )),
        _ => {
            let value = output_file.unwrap_or_default();
            Ok(OutputTarget::Workbook(format_xlsx::parse_workbook_target(value)?))
        }
    }
}
