use std::fmt;

use serde::{Deserialize, Serialize};

/// Letter grade derived from a student's marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Map marks to a grade. Each band includes its lower bound; marks outside
    /// `0..=100` are not clamped.
    pub fn from_marks(marks: f64) -> Self {
        if marks >= 90.0 {
            Grade::APlus
        } else if marks >= 80.0 {
            Grade::A
        } else if marks >= 70.0 {
            Grade::B
        } else if marks >= 60.0 {
            Grade::C
        } else if marks >= 40.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    /// The grade as it is written to disk and shown to the user.
    ///
    /// # Returns
    ///
    /// One of `"A+"`, `"A"`, `"B"`, `"C"`, `"D"` or `"F"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single student in the record book.
///
/// Deserializing ignores any field it does not know about, which is how a
/// stored `grade` gets dropped on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Unique key of the student.
    pub roll_no: String,
    pub name: String,
    pub age: i64,
    pub course: String,
    pub marks: f64,
}

impl Student {
    pub fn new(
        roll_no: impl Into<String>,
        name: impl Into<String>,
        age: i64,
        course: impl Into<String>,
        marks: f64,
    ) -> Self {
        Self {
            roll_no: roll_no.into(),
            name: name.into(),
            age,
            course: course.into(),
            marks,
        }
    }

    /// Grade for the current marks. Never cached, so it always follows an
    /// update of `marks`.
    pub fn compute_grade(&self) -> Grade {
        Grade::from_marks(self.marks)
    }

    /// Serializable view of the student with its grade attached.
    pub fn to_view(&self) -> StudentView {
        StudentView {
            roll_no: self.roll_no.clone(),
            name: self.name.clone(),
            age: self.age,
            course: self.course.clone(),
            marks: self.marks,
            grade: self.compute_grade(),
        }
    }
}

/// What gets written to disk and shown to the user for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentView {
    pub roll_no: String,
    pub name: String,
    pub age: i64,
    pub course: String,
    pub marks: f64,
    pub grade: Grade,
}
