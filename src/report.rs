use crate::record::Student;

/// Ordering applied by [`crate::Store::sort_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Highest marks first. Equal marks keep their relative order.
    MarksDescending,
    /// Alphabetical by name, ignoring case.
    NameAscending,
}

impl SortKey {
    pub(crate) fn sort(self, students: &mut [Student]) {
        match self {
            SortKey::MarksDescending => students.sort_by(|a, b| b.marks.total_cmp(&a.marks)),
            SortKey::NameAscending => students.sort_by_cached_key(|s| s.name.to_lowercase()),
        }
    }
}

/// Aggregate figures over the whole collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub count: usize,
    pub average_marks: f64,
    /// Highest marks, first one wins on ties.
    pub topper: Student,
    /// Lowest marks, first one wins on ties.
    pub lowest: Student,
}

impl Report {
    /// Returns [`None`] for an empty collection.
    pub fn from_students(students: &[Student]) -> Option<Self> {
        let first = students.first()?;

        let mut topper = first;
        let mut lowest = first;
        let mut total = 0.0;

        for student in students {
            total += student.marks;
            if student.marks > topper.marks {
                topper = student;
            }
            if student.marks < lowest.marks {
                lowest = student;
            }
        }

        Some(Self {
            count: students.len(),
            average_marks: total / students.len() as f64,
            topper: topper.clone(),
            lowest: lowest.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_marks(marks: &[f64]) -> Vec<Student> {
        marks
            .iter()
            .enumerate()
            .map(|(i, m)| Student::new(i.to_string(), format!("s{i}"), 20, "CS", *m))
            .collect()
    }

    #[test]
    fn report_figures() {
        let report = Report::from_students(&with_marks(&[50.0, 80.0, 60.0])).unwrap();

        assert_eq!(report.count, 3);
        assert!((report.average_marks - 63.333).abs() < 0.001);
        assert_eq!(format!("{:.2}", report.average_marks), "63.33");
        assert_eq!(report.topper.marks, 80.0);
        assert_eq!(report.lowest.marks, 50.0);
    }

    #[test]
    fn report_ties_pick_first() {
        let report = Report::from_students(&with_marks(&[70.0, 90.0, 90.0, 10.0, 10.0])).unwrap();

        assert_eq!(report.topper.roll_no, "1");
        assert_eq!(report.lowest.roll_no, "3");
    }

    #[test]
    fn report_empty() {
        assert!(Report::from_students(&[]).is_none());
    }

    #[test]
    fn sort_marks_is_stable() {
        let mut students = with_marks(&[70.0, 90.0, 70.0]);
        SortKey::MarksDescending.sort(&mut students);

        let order: Vec<(&str, f64)> = students
            .iter()
            .map(|s| (s.roll_no.as_str(), s.marks))
            .collect();
        assert_eq!(order, vec![("1", 90.0), ("0", 70.0), ("2", 70.0)]);
    }

    #[test]
    fn sort_name_ignores_case() {
        let mut students = vec![
            Student::new("1", "charlie", 20, "CS", 1.0),
            Student::new("2", "Bob", 20, "CS", 1.0),
            Student::new("3", "alice", 20, "CS", 1.0),
            Student::new("4", "BOB", 20, "CS", 1.0),
        ];
        SortKey::NameAscending.sort(&mut students);

        let rolls: Vec<&str> = students.iter().map(|s| s.roll_no.as_str()).collect();
        assert_eq!(rolls, vec!["3", "2", "4", "1"]);
    }
}
