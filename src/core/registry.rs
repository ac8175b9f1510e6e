use crate::domain::model::Student;

/// In-memory student records for one open document, kept in load/insert order.
#[derive(Debug, Clone, Default)]
pub struct StudentRegistry {
    students: Vec<Student>,
}

impl StudentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_students(students: Vec<Student>) -> Self {
        Self { students }
    }

    /// Appends without rejecting an existing faculty number; lookups return the first match.
    pub fn insert(&mut self, student: Student) {
        if self.find_by_faculty_number(&student.faculty_number).is_some() {
            tracing::warn!(
                "Faculty number {} is already registered; keeping both records",
                student.faculty_number
            );
        }
        self.students.push(student);
    }

    pub fn find_by_faculty_number(&self, faculty_number: &str) -> Option<&Student> {
        self.students
            .iter()
            .find(|s| s.faculty_number == faculty_number)
    }

    pub fn find_by_faculty_number_mut(&mut self, faculty_number: &str) -> Option<&mut Student> {
        self.students
            .iter_mut()
            .find(|s| s.faculty_number == faculty_number)
    }

    /// Exact match on the program's enum name (`CS`, not `cs`) and year.
    pub fn find_by_program_and_year(&self, program_name: &str, year: u32) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|s| s.program.code() == program_name && s.current_year == year)
            .collect()
    }

    pub fn all(&self) -> &[Student] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
