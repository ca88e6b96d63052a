use std::io::Write;
use std::path::PathBuf;

use orasql::error::OrasqlError;
use orasql::format_xlsx::WorkbookTarget;
use orasql::output::{Destination, OutputTarget};

#[test]
fn stdout_aliases() {
    for arg in [None, Some(""), Some("-"), Some("/dev/stdout")] {
        assert_eq!(OutputTarget::from_path_arg(arg), OutputTarget::Stdout, "{arg:?}");
    }
}

#[test]
fn path_becomes_file_target() {
    assert_eq!(
        OutputTarget::from_path_arg(Some("out/result.json")),
        OutputTarget::File(PathBuf::from("out/result.json"))
    );
}

#[test]
fn describe_targets() {
    assert_eq!(OutputTarget::Stdout.describe(), "stdout");
    assert_eq!(OutputTarget::File(PathBuf::from("a.csv")).describe(), "a.csv");
    let workbook = OutputTarget::Workbook(WorkbookTarget {
        path: PathBuf::from("r.xlsx"),
        sheet: Some("Daily".to_string()),
    });
    assert_eq!(workbook.describe(), "r.xlsx:Daily");
}

#[test]
fn open_file_creates_and_truncates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("result.txt");
    std::fs::write(&path, "old content that is longer").unwrap();

    {
        let Destination::Writer(mut out) = Destination::open(&OutputTarget::File(path.clone())).unwrap()
        else {
            panic!("expected a writer");
        };
        out.write_all(b"new\n").unwrap();
        out.flush().unwrap();
    }

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
}

#[test]
fn missing_parent_directory_fails_before_query() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no/such/dir/result.txt");

    let Err(err) = Destination::open(&OutputTarget::File(path)) else {
        panic!("expected open to fail");
    };
    assert!(matches!(err, OrasqlError::Io(_)), "got {err:?}");
    assert!(err.to_string().contains("parent directory does not exist"));
}

#[test]
fn workbook_target_is_not_created_on_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.xlsx");
    let target = WorkbookTarget { path: path.clone(), sheet: None };

    let destination = Destination::open(&OutputTarget::Workbook(target.clone())).unwrap();
    assert!(matches!(destination, Destination::Workbook(t) if t == target));
    assert!(!path.exists());
}
