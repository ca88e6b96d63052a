use orasql::dsn::{expand_env, ConnectionString, DbType};
use orasql::error::OrasqlError;

#[test]
fn parses_plain_dsn() {
    let conn = ConnectionString::parse(DbType::Oracle, "scott:tiger@db:1521/ORCL").unwrap();
    assert_eq!(conn.user, "scott");
    assert_eq!(conn.password(), "tiger");
    assert_eq!(conn.locator, "db:1521/ORCL");
}

#[test]
fn accepts_scheme_prefix() {
    let conn =
        ConnectionString::parse(DbType::Oracle, "oracle://scott:tiger@db/ORCL").unwrap();
    assert_eq!(conn.user, "scott");
    assert_eq!(conn.locator, "db/ORCL");
}

#[test]
fn password_may_contain_at_sign() {
    let conn = ConnectionString::parse(DbType::Oracle, "app:p@ss@db:1521/SVC").unwrap();
    assert_eq!(conn.password(), "p@ss");
    assert_eq!(conn.locator, "db:1521/SVC");
}

#[test]
fn missing_locator_is_config_error() {
    let err = ConnectionString::parse(DbType::Oracle, "scott:tiger").unwrap_err();
    assert!(matches!(err, OrasqlError::Config { .. }), "got {err:?}");
}

#[test]
fn missing_password_is_config_error() {
    let err = ConnectionString::parse(DbType::Oracle, "scott@db/ORCL").unwrap_err();
    assert!(matches!(err, OrasqlError::Config { .. }), "got {err:?}");
}

#[test]
fn url_masks_password_by_default() {
    let conn = ConnectionString::new(DbType::Oracle, "u", "hunter2", "h:1521/S");
    assert_eq!(conn.to_url(false), "oracle://u:****@h:1521/S");
    assert_eq!(conn.to_url(true), "oracle://u:hunter2@h:1521/S");
}

#[test]
fn debug_output_hides_password() {
    let conn = ConnectionString::new(DbType::Oracle, "u", "hunter2", "h/S");
    assert!(!format!("{conn:?}").contains("hunter2"));
}

#[test]
fn db_type_resolution_is_lenient() {
    assert_eq!(DbType::resolve(None), DbType::Oracle);
    assert_eq!(DbType::resolve(Some("ORACLE")), DbType::Oracle);
    assert_eq!(DbType::resolve(Some("mysql")), DbType::Oracle);
}

#[test]
fn expand_env_handles_both_forms() {
    // Only reads a variable every test environment has.
    let path = std::env::var("PATH").unwrap_or_default();
    assert_eq!(expand_env("a$PATH/b"), format!("a{path}/b"));
    assert_eq!(expand_env("a${PATH}b"), format!("a{path}b"));
}

#[test]
fn expand_env_leaves_literal_dollars() {
    assert_eq!(expand_env("cost: $ 5"), "cost: $ 5");
    assert_eq!(expand_env("tail$"), "tail$");
    assert_eq!(expand_env("open ${NAME"), "open ${NAME");
}

#[test]
fn expand_env_unset_is_empty() {
    assert_eq!(expand_env("x${ORASQL_SURELY_UNSET_VAR_42}y"), "xy");
}
