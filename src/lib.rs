//! A tiny student record book persisted to a JSON file.
//!
//! ```no_run
//! use rollbook::{SortKey, Store, Student};
//!
//! let mut store = Store::open(rollbook::DEFAULT_DATA_FILE)?;
//! store.add(Student::new("1", "Ada", 20, "Maths", 92.5))?;
//! store.sort_by(SortKey::MarksDescending)?;
//! # Ok::<(), rollbook::RollbookError>(())
//! ```

pub mod cli;

pub mod record;
pub use record::{Grade, Student, StudentView};

pub mod report;
pub use report::{Report, SortKey};

pub mod result;
pub use result::{DbResult, RollbookError};

pub mod store;
pub use store::Store;

pub mod update;
pub use update::StudentUpdate;

mod encoding;

/// Data file used when no other path is configured.
pub const DEFAULT_DATA_FILE: &str = "students_data.json";
