use crate::domain::catalog::{Discipline, Program};
use crate::domain::model::Student;
use std::collections::BTreeMap;

/// Students enrolled in one discipline, grouped by program and then current year.
#[derive(Debug, Clone, PartialEq)]
pub struct Protocol {
    pub discipline: Discipline,
    pub groups: BTreeMap<Program, BTreeMap<u32, Vec<String>>>,
}

impl Protocol {
    pub fn build<'a>(discipline: Discipline, students: impl IntoIterator<Item = &'a Student>) -> Self {
        let mut groups: BTreeMap<Program, BTreeMap<u32, Vec<String>>> = BTreeMap::new();
        for student in students {
            if student.is_enrolled_in(discipline) {
                groups
                    .entry(student.program)
                    .or_default()
                    .entry(student.current_year)
                    .or_default()
                    .push(student.name.clone());
            }
        }
        Self { discipline, groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn student_count(&self) -> usize {
        self.groups
            .values()
            .flat_map(|by_year| by_year.values())
            .map(Vec::len)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentReport {
    pub name: String,
    pub faculty_number: String,
    pub completed: Vec<(Discipline, f64)>,
    /// Enrolled courses that are not passed, including graded-but-failed ones.
    pub ungraded: Vec<Discipline>,
    pub average: f64,
}

impl StudentReport {
    pub fn build(student: &Student) -> Self {
        let mut completed = Vec::new();
        let mut ungraded = Vec::new();

        for course in &student.course_list {
            if course.is_successfully_completed() {
                completed.push((course.discipline, course.grade));
            } else if course.enrolled {
                ungraded.push(course.discipline);
            }
        }

        let average = if completed.is_empty() {
            0.0
        } else {
            completed.iter().map(|(_, grade)| grade).sum::<f64>() / completed.len() as f64
        };

        Self {
            name: student.name.clone(),
            faculty_number: student.faculty_number.clone(),
            completed,
            ungraded,
            average,
        }
    }
}
