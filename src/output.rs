use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::OrasqlError;
use crate::format_xlsx::WorkbookTarget;

/// Resolved output destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
    Workbook(WorkbookTarget),
}

impl OutputTarget {
    /// Map an `--output-file` value for a text mode; `-` and `/dev/stdout` mean stdout.
    pub fn from_path_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("") | Some("-") | Some("/dev/stdout") => OutputTarget::Stdout,
            Some(path) => OutputTarget::File(PathBuf::from(path)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            OutputTarget::Stdout => "stdout".to_string(),
            OutputTarget::File(path) => path.display().to_string(),
            OutputTarget::Workbook(t) => match &t.sheet {
                Some(sheet) => format!("{}:{}", t.path.display(), sheet),
                None => t.path.display().to_string(),
            },
        }
    }
}

/// An opened output: a buffered byte stream, or a workbook saved after rendering.
pub enum Destination {
    Writer(Box<dyn Write>),
    Workbook(WorkbookTarget),
}

impl Destination {
    /// Open the target before the query runs, so a bad path fails fast.
    pub fn open(target: &OutputTarget) -> Result<Self, OrasqlError> {
        match target {
            OutputTarget::Stdout => Ok(Destination::Writer(Box::new(BufWriter::new(io::stdout())))),
            OutputTarget::File(path) => {
                ensure_parent_exists(path)?;
                let file = File::create(path).map_err(|e| {
                    OrasqlError::Io(io::Error::new(
                        e.kind(),
                        format!("cannot create {}: {}", path.display(), e),
                    ))
                })?;
                Ok(Destination::Writer(Box::new(BufWriter::new(file))))
            }
            OutputTarget::Workbook(t) => {
                ensure_parent_exists(&t.path)?;
                Ok(Destination::Workbook(t.clone()))
            }
        }
    }
}

fn ensure_parent_exists(path: &Path) -> Result<(), OrasqlError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        return Err(OrasqlError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("parent directory does not exist: {}", parent.display()),
        )));
    }
    Ok(())
}

/// Print error to stderr in the contract format: error: <category>: <message>
pub fn print_error(err: &OrasqlError) {
    eprintln!("error: {}", err);
}

/// Print the one-line usage hint shown after parameter errors.
pub fn print_usage(usage: &str) {
    eprintln!("{usage}");
    eprintln!("Try 'orasql --help' for more information.");
}
