use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::record::{Student, StudentView};
use crate::DbResult;

/// Encode the collection as a pretty JSON array, four spaces per level.
pub(crate) fn encode(students: &[Student]) -> DbResult<Vec<u8>> {
    let views: Vec<StudentView> = students.iter().map(Student::to_view).collect();

    let mut bytes = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
    views.serialize(&mut serializer)?;

    Ok(bytes)
}

pub(crate) fn decode(bytes: &[u8]) -> Result<Vec<Student>, serde_json::Error> {
    serde_json::from_slice(bytes)
}
