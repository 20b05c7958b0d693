//! Numbered text menu driving a [`Store`].
//!
//! All user input is parsed here. The store only ever sees well-typed values,
//! and a bad answer aborts the action before the store is touched.

use std::io::{self, BufRead, Write};

use tracing::error;

use crate::record::Student;
use crate::report::SortKey;
use crate::result::RollbookError;
use crate::store::Store;
use crate::update::StudentUpdate;

const MENU: &str = "
====== STUDENT MANAGEMENT SYSTEM ======
1. Add Student
2. View All Students
3. Search Student
4. Update Student
5. Delete Student
6. Generate Report
7. Sort Students
8. Exit";

enum Flow {
    Continue,
    Exit,
}

/// Interactive menu over any line-based input and output.
pub struct Menu<'a, R, W> {
    store: &'a mut Store,
    input: R,
    output: W,
}

impl<'a, R, W> Menu<'a, R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(store: &'a mut Store, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Run until the user picks Exit or the input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Enter choice: ")? else {
                break;
            };

            let flow = match choice.as_str() {
                "1" => self.add()?,
                "2" => self.view_all()?,
                "3" => self.search()?,
                "4" => self.update()?,
                "5" => self.delete()?,
                "6" => self.report()?,
                "7" => self.sort()?,
                "8" => Flow::Exit,
                _ => {
                    writeln!(self.output, "Invalid option. Try again.")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                break;
            }
        }

        writeln!(self.output, "Exiting... Goodbye!")?;
        self.output.flush()
    }

    /// Read one trimmed answer. [`None`] means the input is exhausted.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_owned()))
    }

    fn report_error(&mut self, err: RollbookError) -> io::Result<()> {
        match err {
            RollbookError::AlreadyExists { .. } => {
                writeln!(self.output, "Student with this roll number already exists.")
            }
            RollbookError::NotFound { .. } => writeln!(self.output, "Student not found."),
            RollbookError::InvalidMarks { .. } => writeln!(self.output, "Invalid input."),
            err => {
                error!("{err:?}");
                writeln!(self.output, "Could not save changes: {err}")
            }
        }
    }

    fn add(&mut self) -> io::Result<Flow> {
        let Some(roll_no) = self.prompt("Enter Roll Number: ")? else {
            return Ok(Flow::Exit);
        };
        if roll_no.is_empty() {
            writeln!(self.output, "Invalid input. Please try again.")?;
            return Ok(Flow::Continue);
        }
        if self.store.find(&roll_no).is_some() {
            self.report_error(RollbookError::AlreadyExists { roll_no })?;
            return Ok(Flow::Continue);
        }

        let Some(name) = self.prompt("Enter Name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(age) = self.prompt("Enter Age: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(course) = self.prompt("Enter Course: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(marks) = self.prompt("Enter Marks: ")? else {
            return Ok(Flow::Exit);
        };

        let (Some(age), Some(marks)) = (parse_age(&age), parse_marks(&marks)) else {
            writeln!(self.output, "Invalid input. Please try again.")?;
            return Ok(Flow::Continue);
        };

        match self
            .store
            .add(Student::new(roll_no, name, age, course, marks))
        {
            Ok(()) => writeln!(self.output, "Student added successfully!")?,
            Err(err) => self.report_error(err)?,
        }

        Ok(Flow::Continue)
    }

    fn view_all(&mut self) -> io::Result<Flow> {
        let views = self.store.list_all();
        if views.is_empty() {
            writeln!(self.output, "No students found.")?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output, "\n------ STUDENT LIST ------")?;
        for view in views {
            writeln!(
                self.output,
                "Roll: {} | Name: {} | Course: {} | Marks: {:?} | Grade: {}",
                view.roll_no, view.name, view.course, view.marks, view.grade
            )?;
        }

        Ok(Flow::Continue)
    }

    fn search(&mut self) -> io::Result<Flow> {
        let Some(roll_no) = self.prompt("Enter Roll Number to search: ")? else {
            return Ok(Flow::Exit);
        };

        match self.store.find(&roll_no).map(Student::to_view) {
            Some(view) => {
                let json = serde_json::to_string_pretty(&view)?;
                writeln!(self.output, "\nStudent Found:\n{json}")?;
            }
            None => writeln!(self.output, "Student not found.")?,
        }

        Ok(Flow::Continue)
    }

    fn update(&mut self) -> io::Result<Flow> {
        let Some(roll_no) = self.prompt("Enter Roll Number to update: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(current) = self.store.find(&roll_no).cloned() else {
            self.report_error(RollbookError::NotFound { roll_no })?;
            return Ok(Flow::Continue);
        };

        let Some(name) = self.prompt(&format!("New Name ({}): ", current.name))? else {
            return Ok(Flow::Exit);
        };
        let Some(age) = self.prompt(&format!("New Age ({}): ", current.age))? else {
            return Ok(Flow::Exit);
        };
        let Some(course) = self.prompt(&format!("New Course ({}): ", current.course))? else {
            return Ok(Flow::Exit);
        };
        let Some(marks) = self.prompt(&format!("New Marks ({:?}): ", current.marks))? else {
            return Ok(Flow::Exit);
        };

        let mut update = StudentUpdate::new();
        if !name.is_empty() {
            update = update.name(name);
        }
        if !course.is_empty() {
            update = update.course(course);
        }
        if !age.is_empty() {
            match parse_age(&age) {
                Some(age) => update = update.age(age),
                None => {
                    writeln!(self.output, "Invalid input.")?;
                    return Ok(Flow::Continue);
                }
            }
        }
        if !marks.is_empty() {
            match parse_marks(&marks) {
                Some(marks) => update = update.marks(marks),
                None => {
                    writeln!(self.output, "Invalid input.")?;
                    return Ok(Flow::Continue);
                }
            }
        }

        match self.store.update(&roll_no, update) {
            Ok(_) => writeln!(self.output, "Student updated successfully!")?,
            Err(err) => self.report_error(err)?,
        }

        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> io::Result<Flow> {
        let Some(roll_no) = self.prompt("Enter Roll Number to delete: ")? else {
            return Ok(Flow::Exit);
        };

        match self.store.delete(&roll_no) {
            Ok(_) => writeln!(self.output, "Student deleted successfully.")?,
            Err(err) => self.report_error(err)?,
        }

        Ok(Flow::Continue)
    }

    fn report(&mut self) -> io::Result<Flow> {
        let Some(report) = self.store.report() else {
            writeln!(self.output, "No data to generate report.")?;
            return Ok(Flow::Continue);
        };

        writeln!(self.output, "\nSTUDENT REPORT")?;
        writeln!(self.output, "Total Students: {}", report.count)?;
        writeln!(self.output, "Average Marks: {:.2}", report.average_marks)?;
        writeln!(
            self.output,
            "Topper: {} ({:?})",
            report.topper.name, report.topper.marks
        )?;
        writeln!(
            self.output,
            "Lowest: {} ({:?})",
            report.lowest.name, report.lowest.marks
        )?;

        Ok(Flow::Continue)
    }

    fn sort(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "1. Sort by Marks\n2. Sort by Name")?;
        let Some(choice) = self.prompt("Choose option: ")? else {
            return Ok(Flow::Exit);
        };

        let (key, done) = match choice.as_str() {
            "1" => (SortKey::MarksDescending, "Sorted by marks."),
            "2" => (SortKey::NameAscending, "Sorted by name."),
            _ => {
                writeln!(self.output, "Invalid choice.")?;
                return Ok(Flow::Continue);
            }
        };

        match self.store.sort_by(key) {
            Ok(()) => writeln!(self.output, "{done}")?,
            Err(err) => self.report_error(err)?,
        }

        Ok(Flow::Continue)
    }
}

fn parse_age(input: &str) -> Option<i64> {
    input.parse().ok()
}

fn parse_marks(input: &str) -> Option<f64> {
    input.parse::<f64>().ok().filter(|marks| marks.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_menu(store: &mut Store, script: &str) -> String {
        let mut output = Vec::new();
        Menu::new(store, Cursor::new(script.to_owned()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    fn open_temp() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path().join("students.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn menu_add_and_view() {
        let (_dir, mut store) = open_temp();
        let out = run_menu(&mut store, "1\n7\nAda\n20\nMaths\n91.5\n2\n8\n");

        assert!(out.contains("Student added successfully!"));
        assert!(out.contains("Roll: 7 | Name: Ada | Course: Maths | Marks: 91.5 | Grade: A+"));
        assert!(out.ends_with("Exiting... Goodbye!\n"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn menu_add_rejects_bad_age() {
        let (_dir, mut store) = open_temp();
        let out = run_menu(&mut store, "1\n7\nAda\ntwenty\nMaths\n91\n8\n");

        assert!(out.contains("Invalid input. Please try again."));
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn menu_add_duplicate_stops_early() {
        let (_dir, mut store) = open_temp();
        store.add(Student::new("7", "Ada", 20, "Maths", 91.0)).unwrap();

        // After the duplicate roll the next line is read as a menu choice.
        let out = run_menu(&mut store, "1\n7\n8\n");

        assert!(out.contains("already exists"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn menu_accepts_negative_age_and_keeps_decimal_marks() {
        let (_dir, mut store) = open_temp();
        let out = run_menu(&mut store, "1\n3\nBo\n-1\nArt\n80\n2\n8\n");

        assert!(out.contains("Student added successfully!"));
        assert!(out.contains("Roll: 3 | Name: Bo | Course: Art | Marks: 80.0 | Grade: A"));
        assert_eq!(store.find("3").unwrap().age, -1);
    }

    #[test]
    fn menu_update_keeps_blank_fields() {
        let (_dir, mut store) = open_temp();
        store.add(Student::new("7", "Ada", 20, "Maths", 91.0)).unwrap();

        let out = run_menu(&mut store, "4\n7\n\n21\n\n55\n8\n");

        assert!(out.contains("New Name (Ada): "));
        assert!(out.contains("Student updated successfully!"));
        assert_eq!(
            store.find("7").unwrap(),
            &Student::new("7", "Ada", 21, "Maths", 55.0)
        );
    }

    #[test]
    fn menu_update_invalid_changes_nothing() {
        let (_dir, mut store) = open_temp();
        store.add(Student::new("7", "Ada", 20, "Maths", 91.0)).unwrap();

        let out = run_menu(&mut store, "4\n7\nGrace\n21\nPhysics\nlots\n8\n");

        assert!(out.contains("Invalid input."));
        assert_eq!(
            store.find("7").unwrap(),
            &Student::new("7", "Ada", 20, "Maths", 91.0)
        );
    }

    #[test]
    fn menu_search_delete_missing() {
        let (_dir, mut store) = open_temp();
        let out = run_menu(&mut store, "3\nx\n5\nx\n4\nx\n8\n");

        assert_eq!(out.matches("Student not found.").count(), 3);
    }

    #[test]
    fn menu_search_prints_json() {
        let (_dir, mut store) = open_temp();
        store.add(Student::new("7", "Ada", 20, "Maths", 65.0)).unwrap();

        let out = run_menu(&mut store, "3\n7\n8\n");

        assert!(out.contains("Student Found:"));
        assert!(out.contains("\"grade\": \"C\""));
    }

    #[test]
    fn menu_report_and_sort() {
        let (_dir, mut store) = open_temp();
        store.add(Student::new("1", "bo", 20, "CS", 50.0)).unwrap();
        store.add(Student::new("2", "Al", 20, "CS", 80.0)).unwrap();
        store.add(Student::new("3", "cy", 20, "CS", 60.0)).unwrap();

        let out = run_menu(&mut store, "6\n7\n2\n7\n9\n8\n");

        assert!(out.contains("Total Students: 3"));
        assert!(out.contains("Average Marks: 63.33"));
        assert!(out.contains("Topper: Al (80.0)"));
        assert!(out.contains("Lowest: bo (50.0)"));
        assert!(out.contains("Sorted by name."));
        assert!(out.contains("Invalid choice."));

        let names: Vec<&str> = store.students().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Al", "bo", "cy"]);
    }

    #[test]
    fn menu_empty_store_notices() {
        let (_dir, mut store) = open_temp();
        let out = run_menu(&mut store, "2\n6\nfoo\n");

        assert!(out.contains("No students found."));
        assert!(out.contains("No data to generate report."));
        assert!(out.contains("Invalid option. Try again."));
        // End of input exits like choosing Exit.
        assert!(out.ends_with("Exiting... Goodbye!\n"));
    }

    #[test]
    fn parse_marks_rejects_non_finite() {
        assert_eq!(parse_marks("72.5"), Some(72.5));
        assert_eq!(parse_marks("-3"), Some(-3.0));
        assert_eq!(parse_marks("NaN"), None);
        assert_eq!(parse_marks("inf"), None);
        assert_eq!(parse_age("-1"), Some(-1));
        assert_eq!(parse_age("1.5"), None);
    }
}
