use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::encoding::{decode, encode};
use crate::record::{Student, StudentView};
use crate::report::{Report, SortKey};
use crate::result::{DbResult, RollbookError};
use crate::update::StudentUpdate;

/// Ordered collection of students backed by a JSON file.
///
/// Every mutating method rewrites the whole file before it returns. Mutations
/// are staged on a copy of the collection, so a failed write leaves both the
/// file and the in-memory state as they were.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    students: Vec<Student>,
}

impl Store {
    /// Open the store at `path`, loading any existing data.
    ///
    /// A missing file gives an empty store; the file is only created by the
    /// first mutation.
    ///
    /// # Errors
    ///
    /// Returns [`RollbookError::DataCorruption`] if the file exists but is not
    /// a JSON array of students.
    pub fn open(path: impl Into<PathBuf>) -> DbResult<Self> {
        let path = path.into();
        let students = Self::load(&path)?;

        Ok(Self { path, students })
    }

    fn load(path: &Path) -> DbResult<Vec<Student>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no data file, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let students = decode(&bytes).map_err(|source| RollbookError::DataCorruption {
            path: path.to_owned(),
            source,
        })?;

        debug!(path = %path.display(), count = students.len(), "loaded students");
        Ok(students)
    }

    /// Write the current collection to the backing file.
    pub fn save(&self) -> DbResult<()> {
        Self::persist(&self.path, &self.students)
    }

    /// Write to a sibling temporary file, then rename it over the target.
    fn persist(path: &Path, students: &[Student]) -> DbResult<()> {
        let bytes = encode(students)?;

        let mut tmp_name = OsString::from(path.as_os_str());
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let written = File::create(&tmp_path).and_then(|mut file| {
            file.write_all(&bytes)?;
            file.sync_all()
        });
        if let Err(err) = written.and_then(|_| fs::rename(&tmp_path, path)) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err.into());
        }

        debug!(path = %path.display(), count = students.len(), "saved students");
        Ok(())
    }

    /// Persist `next` and make it the live collection.
    fn commit(&mut self, next: Vec<Student>) -> DbResult<()> {
        Self::persist(&self.path, &next)?;
        self.students = next;

        Ok(())
    }

    fn position(&self, roll_no: &str) -> Option<usize> {
        self.students.iter().position(|s| s.roll_no == roll_no)
    }

    /// Non-finite marks cannot be stored as JSON numbers.
    fn check_marks(roll_no: &str, marks: f64) -> DbResult<()> {
        if marks.is_finite() {
            return Ok(());
        }

        warn!(%roll_no, marks, "rejected non-finite marks");
        Err(RollbookError::InvalidMarks {
            roll_no: roll_no.to_owned(),
            marks,
        })
    }

    /// Look up a student by roll number.
    ///
    /// # Arguments
    ///
    /// * `roll_no` - The roll number to search for.
    ///
    /// # Returns
    ///
    /// The matching student, or [`None`] if no student has `roll_no`.
    pub fn find(&self, roll_no: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.roll_no == roll_no)
    }

    /// Append a new student.
    ///
    /// # Errors
    ///
    /// Returns [`RollbookError::AlreadyExists`] if the roll number is taken and
    /// [`RollbookError::InvalidMarks`] if the marks are `NaN` or infinite.
    pub fn add(&mut self, student: Student) -> DbResult<()> {
        if self.find(&student.roll_no).is_some() {
            warn!(roll_no = %student.roll_no, "rejected duplicate roll number");
            return Err(RollbookError::AlreadyExists {
                roll_no: student.roll_no,
            });
        }
        Self::check_marks(&student.roll_no, student.marks)?;

        let roll_no = student.roll_no.clone();
        let mut next = self.students.clone();
        next.push(student);
        self.commit(next)?;

        info!(%roll_no, "added student");
        Ok(())
    }

    /// Apply a partial update and return the updated student.
    ///
    /// # Errors
    ///
    /// Returns [`RollbookError::NotFound`] if no student has `roll_no` and
    /// [`RollbookError::InvalidMarks`] if the new marks are `NaN` or infinite.
    pub fn update(&mut self, roll_no: &str, update: StudentUpdate) -> DbResult<Student> {
        let Some(idx) = self.position(roll_no) else {
            warn!(%roll_no, "update of unknown student");
            return Err(RollbookError::NotFound {
                roll_no: roll_no.to_owned(),
            });
        };
        if let Some(marks) = update.marks {
            Self::check_marks(roll_no, marks)?;
        }

        let mut next = self.students.clone();
        update.apply(&mut next[idx]);
        let updated = next[idx].clone();
        self.commit(next)?;

        info!(%roll_no, "updated student");
        Ok(updated)
    }

    /// Remove a student and return it.
    ///
    /// # Errors
    ///
    /// Returns [`RollbookError::NotFound`] if no student has `roll_no`.
    pub fn delete(&mut self, roll_no: &str) -> DbResult<Student> {
        let Some(idx) = self.position(roll_no) else {
            warn!(%roll_no, "delete of unknown student");
            return Err(RollbookError::NotFound {
                roll_no: roll_no.to_owned(),
            });
        };

        let mut next = self.students.clone();
        let removed = next.remove(idx);
        self.commit(next)?;

        info!(%roll_no, "deleted student");
        Ok(removed)
    }

    /// Views of every student in the current order.
    pub fn list_all(&self) -> Vec<StudentView> {
        self.students.iter().map(Student::to_view).collect()
    }

    /// Aggregate marks over the whole collection.
    ///
    /// # Returns
    ///
    /// A [`Report`], or [`None`] when there are no students.
    pub fn report(&self) -> Option<Report> {
        Report::from_students(&self.students)
    }

    /// Reorder the collection and persist the new order.
    pub fn sort_by(&mut self, key: SortKey) -> DbResult<()> {
        let mut next = self.students.clone();
        key.sort(&mut next);
        self.commit(next)?;

        info!(?key, "sorted students");
        Ok(())
    }

    /// The live collection in its current order.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of students in the store.
    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
