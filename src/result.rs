use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RollbookError {
    #[error("a student with roll number `{roll_no}` already exists")]
    AlreadyExists { roll_no: String },
    #[error("no student with roll number `{roll_no}`")]
    NotFound { roll_no: String },
    #[error("marks `{marks}` for roll number `{roll_no}` are not a finite number")]
    InvalidMarks { roll_no: String, marks: f64 },
    #[error("data file `{}` is corrupted", path.display())]
    DataCorruption {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("serializer error")]
    Serializer(#[from] serde_json::Error),
    #[error("io error")]
    Io(#[from] std::io::Error),
}

pub type DbResult<T> = Result<T, RollbookError>;
