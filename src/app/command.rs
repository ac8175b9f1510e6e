use crate::utils::error::{RecordsError, Result};

/// One line typed at the prompt, with its arguments split and numbers parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open(String),
    Close,
    Save,
    SaveAs(String),
    Help,
    Exit,
    Enroll {
        name: String,
        program: String,
        group: i32,
        faculty_number: String,
    },
    Advance(String),
    Change {
        faculty_number: String,
        option: String,
        value: String,
    },
    Graduate(String),
    Interrupt(String),
    Resume(String),
    Print(String),
    PrintAll {
        program: String,
        year: u32,
    },
    EnrollIn {
        faculty_number: String,
        discipline: String,
    },
    AddGrade {
        faculty_number: String,
        discipline: String,
        grade: f64,
    },
    Protocol(String),
    Report(String),
}

const ENROLL_USAGE: &str = "enroll <name> <program> <group> <facultyNumber>";
const CHANGE_USAGE: &str = "change <facultyNumber> <option> <value>";
const PRINTALL_USAGE: &str = "printall <program> <year>";
const ENROLLIN_USAGE: &str = "enrollin <facultyNumber> <disciplineName>";
const ADDGRADE_USAGE: &str = "addgrade <facultyNumber> <disciplineName> <grade>";

pub const HELP_TEXT: &str = "\
Supported commands:
open <file_path> - Opens the file at <file_path>.
close - Closes the currently opened file.
save - Saves the changes to the currently opened file.
saveas <new_file_path> - Saves the changes to a new file at <new_file_path>.
help - Shows this help message.
exit - Exits the program.
enroll <name> <program> <group> <facultyNumber> - Enroll a student.
advance <facultyNumber> - Advance a student to the next year.
change <facultyNumber> <option> <value> - Change student details (group, year, program).
graduate <facultyNumber> - Mark a student as graduated.
interrupt <facultyNumber> - Mark a student as dropped out.
resume <facultyNumber> - Reinstate a dropped-out student.
print <facultyNumber> - Print student details.
printall <program> <year> - Print all students in a program and year.
enrollin <facultyNumber> <disciplineName> - Enroll a student in a discipline.
addgrade <facultyNumber> <disciplineName> <grade> - Add a grade for a student in a discipline.
protocol <disciplineName> - Generate a protocol for a discipline.
report <facultyNumber> - Generate a report for a student.";

impl Command {
    /// Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = parts.collect();

        let command = match name {
            "open" => Command::Open(single(&args, "open <file_path>")?),
            "close" => Command::Close,
            "save" => Command::Save,
            "saveas" => Command::SaveAs(single(&args, "saveas <new_file_path>")?),
            "help" => Command::Help,
            "exit" => Command::Exit,
            "enroll" => {
                let [name, program, group, faculty_number] = take::<4>(&args, ENROLL_USAGE)?;
                Command::Enroll {
                    name,
                    program,
                    group: parse_number(&group)?,
                    faculty_number,
                }
            }
            "advance" => Command::Advance(faculty_number(&args, "advance")?),
            "change" => {
                let [faculty_number, option, value] = take::<3>(&args, CHANGE_USAGE)?;
                Command::Change {
                    faculty_number,
                    option,
                    value,
                }
            }
            "graduate" => Command::Graduate(faculty_number(&args, "graduate")?),
            "interrupt" => Command::Interrupt(faculty_number(&args, "interrupt")?),
            "resume" => Command::Resume(faculty_number(&args, "resume")?),
            "print" => Command::Print(faculty_number(&args, "print")?),
            "printall" => {
                let [program, year] = take::<2>(&args, PRINTALL_USAGE)?;
                Command::PrintAll {
                    program,
                    year: parse_number(&year)?,
                }
            }
            "enrollin" => {
                let [faculty_number, discipline] = take::<2>(&args, ENROLLIN_USAGE)?;
                Command::EnrollIn {
                    faculty_number,
                    discipline,
                }
            }
            "addgrade" => {
                let [faculty_number, discipline, grade] = take::<3>(&args, ADDGRADE_USAGE)?;
                Command::AddGrade {
                    faculty_number,
                    discipline,
                    grade: parse_grade(&grade)?,
                }
            }
            "protocol" => Command::Protocol(single(&args, "protocol <disciplineName>")?),
            "report" => Command::Report(faculty_number(&args, "report")?),
            other => {
                return Err(RecordsError::UnknownCommand {
                    name: other.to_string(),
                })
            }
        };

        Ok(Some(command))
    }

    /// Everything except file handling and `help`/`exit` needs an open document.
    pub fn requires_open_file(&self) -> bool {
        !matches!(
            self,
            Command::Open(_) | Command::Help | Command::Exit | Command::Close | Command::Save | Command::SaveAs(_)
        )
    }
}

fn take<const N: usize>(args: &[&str], usage: &str) -> Result<[String; N]> {
    if args.len() < N {
        return Err(RecordsError::usage(usage));
    }
    Ok(std::array::from_fn(|i| args[i].to_string()))
}

fn single(args: &[&str], usage: &str) -> Result<String> {
    let [value] = take::<1>(args, usage)?;
    Ok(value)
}

fn faculty_number(args: &[&str], command: &str) -> Result<String> {
    single(args, &format!("{} <facultyNumber>", command))
}

fn parse_number<T: std::str::FromStr>(value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| RecordsError::invalid_number(value))
}

/// A grade must survive a JSON round trip, so `NaN` and infinities are refused.
fn parse_grade(value: &str) -> Result<f64> {
    let grade: f64 = parse_number(value)?;
    if !grade.is_finite() {
        return Err(RecordsError::InvalidOption {
            value: value.to_string(),
            reason: "expected a finite number".to_string(),
        });
    }
    Ok(grade)
}
