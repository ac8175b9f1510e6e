use crate::utils::error::{RecordsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Discipline {
    Pf,
    Wd,
    El,
    English,
    Co,
    Aut,
    Maths,
    Oop,
    Sis,
    Ps,
    Gs,
    Sql,
    Plsql,
    Sl,
    Ds,
    Sa,
}

struct DisciplineInfo {
    code: &'static str,
    name: &'static str,
    mandatory: bool,
    year: u32,
}

const fn info(code: &'static str, name: &'static str, mandatory: bool, year: u32) -> DisciplineInfo {
    DisciplineInfo {
        code,
        name,
        mandatory,
        year,
    }
}

impl Discipline {
    pub const ALL: [Discipline; 16] = [
        Discipline::Pf,
        Discipline::Wd,
        Discipline::El,
        Discipline::English,
        Discipline::Co,
        Discipline::Aut,
        Discipline::Maths,
        Discipline::Oop,
        Discipline::Sis,
        Discipline::Ps,
        Discipline::Gs,
        Discipline::Sql,
        Discipline::Plsql,
        Discipline::Sl,
        Discipline::Ds,
        Discipline::Sa,
    ];

    fn info(self) -> DisciplineInfo {
        match self {
            Discipline::Pf => info("PF", "Programming fundamentals", true, 1),
            Discipline::Wd => info("WD", "Web Development", true, 1),
            Discipline::El => info("EL", "Electronic Engineering", true, 2),
            Discipline::English => info("ENGLISH", "English", true, 1),
            Discipline::Co => info("CO", "Computer Organization", true, 2),
            Discipline::Aut => info("AUT", "Automation", false, 3),
            Discipline::Maths => info("MATHS", "Mathematics", true, 1),
            Discipline::Oop => info("OOP", "Object-Oriented Programming", true, 2),
            Discipline::Sis => info("SIS", "Software and Information Systems", true, 2),
            Discipline::Ps => info("PS", "Problem Solving", true, 3),
            Discipline::Gs => info("GS", "General Science", false, 1),
            Discipline::Sql => info("SQL", "SQL", true, 2),
            Discipline::Plsql => info("PLSQL", "PL/SQL", false, 3),
            Discipline::Sl => info("SL", "System Languages", false, 2),
            Discipline::Ds => info("DS", "Data Structures", true, 2),
            Discipline::Sa => info("SA", "System Analysis", true, 3),
        }
    }

    /// Enum name as stored in the JSON document, e.g. `PF`.
    pub fn code(self) -> &'static str {
        self.info().code
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn is_mandatory(self) -> bool {
        self.info().mandatory
    }

    pub fn year(self) -> u32 {
        self.info().year
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Program {
    Sit,
    Cs,
    Se,
}

impl Program {
    pub const ALL: [Program; 3] = [Program::Sit, Program::Cs, Program::Se];

    pub fn code(self) -> &'static str {
        match self {
            Program::Sit => "SIT",
            Program::Cs => "CS",
            Program::Se => "SE",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Program::Sit => "Software and Internet Technologies",
            Program::Cs => "Computer Science",
            Program::Se => "Software Engineering",
        }
    }

    pub fn disciplines(self) -> &'static [Discipline] {
        use Discipline::*;
        match self {
            Program::Sit => &[Pf, Sis, Wd, Aut, El],
            Program::Cs => &[Pf, Oop, Ds, Sa, Maths],
            Program::Se => &[Pf, Oop, Sa, Ds, Sql],
        }
    }

    pub fn contains(self, discipline: Discipline) -> bool {
        self.disciplines().contains(&discipline)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Read-only lookups over the fixed discipline and program tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog;

impl Catalog {
    pub fn disciplines_of(program: Program) -> &'static [Discipline] {
        program.disciplines()
    }

    /// Discipline codes are matched exactly (`PF`, not `pf`).
    pub fn discipline_by_name(name: &str) -> Result<Discipline> {
        Discipline::ALL
            .into_iter()
            .find(|d| d.code() == name)
            .ok_or_else(|| RecordsError::not_found("discipline", "name", name))
    }

    pub fn program_by_name(name: &str) -> Result<Program> {
        Program::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(name))
            .ok_or_else(|| RecordsError::not_found("program", "name", name))
    }
}
