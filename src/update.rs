use crate::record::Student;

/// Partial update of a student. Fields left unset keep their current value.
///
/// ```
/// use rollbook::StudentUpdate;
///
/// let update = StudentUpdate::new().name("Grace").marks(88.0);
/// assert!(!update.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub course: Option<String>,
    pub marks: Option<f64>,
}

impl StudentUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn age(mut self, age: i64) -> Self {
        self.age = Some(age);
        self
    }

    pub fn course(mut self, course: impl Into<String>) -> Self {
        self.course = Some(course.into());
        self
    }

    pub fn marks(mut self, marks: f64) -> Self {
        self.marks = Some(marks);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.course.is_none() && self.marks.is_none()
    }

    /// Apply onto `student`. Empty strings count as not provided.
    pub(crate) fn apply(self, student: &mut Student) {
        if let Some(name) = self.name.filter(|name| !name.is_empty()) {
            student.name = name;
        }
        if let Some(age) = self.age {
            student.age = age;
        }
        if let Some(course) = self.course.filter(|course| !course.is_empty()) {
            student.course = course;
        }
        if let Some(marks) = self.marks {
            student.marks = marks;
        }
    }
}
