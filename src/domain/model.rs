use crate::domain::catalog::{Discipline, Program};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest grade (on the 2-6 scale) that counts as a pass.
pub const PASSING_GRADE: f64 = 3.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    #[default]
    Active,
    Graduated,
    Dropout,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Active => "ACTIVE",
            Status::Graduated => "GRADUATED",
            Status::Dropout => "DROPOUT",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub discipline: Discipline,
    #[serde(default)]
    pub graded: bool,
    #[serde(default)]
    pub grade: f64,
    #[serde(default)]
    pub enrolled: bool,
}

impl Course {
    pub fn enrolled_in(discipline: Discipline) -> Self {
        Self {
            discipline,
            graded: false,
            grade: 0.0,
            enrolled: true,
        }
    }

    pub fn is_successfully_completed(&self) -> bool {
        self.enrolled && self.graded && self.grade >= PASSING_GRADE
    }
}

fn first_year() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default)]
    pub name: String,
    pub faculty_number: String,
    #[serde(default = "first_year")]
    pub current_year: u32,
    pub program: Program,
    #[serde(default)]
    pub group: i32,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub course_list: Vec<Course>,
}

impl Student {
    pub fn new(name: &str, program: Program, group: i32, faculty_number: &str) -> Self {
        Self {
            name: name.to_string(),
            faculty_number: faculty_number.to_string(),
            current_year: 1,
            program,
            group,
            status: Status::Active,
            course_list: Vec::new(),
        }
    }

    pub fn is_dropout(&self) -> bool {
        self.status == Status::Dropout
    }

    /// Whether the student holds a passed course for `discipline`.
    pub fn has_completed(&self, discipline: Discipline) -> bool {
        self.course_list
            .iter()
            .any(|c| c.discipline == discipline && c.is_successfully_completed())
    }

    pub fn is_enrolled_in(&self, discipline: Discipline) -> bool {
        self.course_list
            .iter()
            .any(|c| c.discipline == discipline && c.enrolled)
    }
}
