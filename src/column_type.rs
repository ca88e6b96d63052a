//! Oracle column type codes and the labels shown by `--debug`.

/// Character-set form of a character or LOB column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharsetForm {
    /// Database character set (`VARCHAR2`, `CHAR`, `CLOB`).
    #[default]
    Byte,
    /// National character set (`NVARCHAR2`, `NCHAR`, `NCLOB`).
    Wide,
}

/// Declared type of a result column, keyed by the Oracle external type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Varchar2,
    Number,
    Float,
    Long,
    Varchar,
    Rowid,
    Date,
    Raw,
    LongRaw,
    Char,
    BinaryFloat,
    BinaryDouble,
    Clob,
    Blob,
    Bfile,
    Json,
    Timestamp,
    TimestampTz,
    IntervalYm,
    IntervalDs,
    TimestampLtz,
    Boolean,
    Integer,
    Other(u16),
}

/// Code, variant and base name for every known type. `Other` is not listed.
const TYPE_TABLE: &[(u16, ColumnType, &str)] = &[
    (1, ColumnType::Varchar2, "VARCHAR2"),
    (2, ColumnType::Number, "NUMBER"),
    (4, ColumnType::Float, "FLOAT"),
    (3, ColumnType::Integer, "INTEGER"),
    (8, ColumnType::Long, "LONG"),
    (9, ColumnType::Varchar, "VARCHAR"),
    (11, ColumnType::Rowid, "ROWID"),
    (12, ColumnType::Date, "DATE"),
    (23, ColumnType::Raw, "RAW"),
    (24, ColumnType::LongRaw, "LONG RAW"),
    (96, ColumnType::Char, "CHAR"),
    (100, ColumnType::BinaryFloat, "BINARY_FLOAT"),
    (101, ColumnType::BinaryDouble, "BINARY_DOUBLE"),
    (112, ColumnType::Clob, "CLOB"),
    (113, ColumnType::Blob, "BLOB"),
    (114, ColumnType::Bfile, "BFILE"),
    (119, ColumnType::Json, "JSON"),
    (180, ColumnType::Timestamp, "TIMESTAMP"),
    (181, ColumnType::TimestampTz, "TIMESTAMP WITH TIME ZONE"),
    (182, ColumnType::IntervalYm, "INTERVAL YEAR TO MONTH"),
    (183, ColumnType::IntervalDs, "INTERVAL DAY TO SECOND"),
    (231, ColumnType::TimestampLtz, "TIMESTAMP WITH LOCAL TIME ZONE"),
    (252, ColumnType::Boolean, "BOOLEAN"),
];

impl ColumnType {
    /// Look up a type by its Oracle code; unknown codes become `Other`.
    pub fn from_code(code: u16) -> Self {
        TYPE_TABLE
            .iter()
            .find(|(c, _, _)| *c == code)
            .map(|(_, t, _)| *t)
            .unwrap_or(ColumnType::Other(code))
    }

    pub fn code(self) -> u16 {
        match self {
            ColumnType::Other(code) => code,
            known => TYPE_TABLE
                .iter()
                .find(|(_, t, _)| *t == known)
                .map(|(c, _, _)| *c)
                .unwrap_or(0),
        }
    }

    /// Base type name, without length or precision.
    pub fn name(self) -> String {
        match self {
            ColumnType::Other(code) => format!("TYPE{code}"),
            known => TYPE_TABLE
                .iter()
                .find(|(_, t, _)| *t == known)
                .map(|(_, _, n)| n.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ColumnType::Number
                | ColumnType::Float
                | ColumnType::Integer
                | ColumnType::BinaryFloat
                | ColumnType::BinaryDouble
        )
    }

    pub fn is_temporal(self) -> bool {
        matches!(
            self,
            ColumnType::Date
                | ColumnType::Timestamp
                | ColumnType::TimestampTz
                | ColumnType::TimestampLtz
        )
    }

    /// Character types whose label carries a max length.
    pub fn is_character(self) -> bool {
        matches!(
            self,
            ColumnType::Varchar2 | ColumnType::Varchar | ColumnType::Char
        )
    }

    pub fn is_binary(self) -> bool {
        matches!(
            self,
            ColumnType::Raw | ColumnType::LongRaw | ColumnType::Blob | ColumnType::Bfile
        )
    }
}

/// Metadata for a single result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub column_type: ColumnType,
    pub precision: u8,
    /// `None` when the column was declared without a scale.
    pub scale: Option<i8>,
    pub max_char_len: u32,
    pub charset_form: CharsetForm,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            precision: 0,
            scale: None,
            max_char_len: 0,
            charset_form: CharsetForm::Byte,
        }
    }

    pub fn with_precision(mut self, precision: u8, scale: Option<i8>) -> Self {
        self.precision = precision;
        self.scale = scale;
        self
    }

    pub fn with_char_len(mut self, max_char_len: u32, charset_form: CharsetForm) -> Self {
        self.max_char_len = max_char_len;
        self.charset_form = charset_form;
        self
    }

    /// Human-readable type label, e.g. `NUMBER(10,2)` or `NVARCHAR2(40)`.
    pub fn type_label(&self) -> String {
        match self.column_type {
            ColumnType::Number => number_label(self.precision, self.scale),
            ColumnType::Float if self.precision > 0 => format!("FLOAT({})", self.precision),
            t if t.is_character() => {
                format!("{}({})", character_name(t, self.charset_form), self.max_char_len)
            }
            ColumnType::Clob if self.charset_form == CharsetForm::Wide => "NCLOB".to_string(),
            t => t.name(),
        }
    }
}

fn number_label(precision: u8, scale: Option<i8>) -> String {
    match scale {
        _ if precision == 0 => "NUMBER".to_string(),
        // 38 with an unspecified scale is how an unconstrained NUMBER is described
        None if precision == 38 => "NUMBER".to_string(),
        None | Some(0) => format!("NUMBER({precision})"),
        Some(s) => format!("NUMBER({precision},{s})"),
    }
}

fn character_name(column_type: ColumnType, form: CharsetForm) -> &'static str {
    match (column_type, form) {
        (ColumnType::Char, CharsetForm::Byte) => "CHAR",
        (ColumnType::Char, CharsetForm::Wide) => "NCHAR",
        (ColumnType::Varchar2, CharsetForm::Wide) => "NVARCHAR2",
        (ColumnType::Varchar, _) => "VARCHAR",
        _ => "VARCHAR2",
    }
}
