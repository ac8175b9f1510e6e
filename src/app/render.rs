use crate::core::reports::{Protocol, StudentReport};
use crate::domain::model::Student;
use chrono::NaiveDate;

fn grade(value: f64) -> String {
    format!("{:.2}", value)
}

fn course_lines(student: &Student) -> Vec<String> {
    let mut lines = vec!["Courses:".to_string()];
    for course in &student.course_list {
        lines.push(format!("  Course: {}", course.discipline.name()));
        if course.graded {
            lines.push(format!("  Grade: {}", grade(course.grade)));
        } else {
            lines.push("  Grade: Not graded yet".to_string());
        }
    }
    lines
}

pub fn student(student: &Student) -> String {
    let mut lines = vec![
        format!("Student name: {}", student.name),
        format!("Program: {}", student.program.name()),
        format!("Group: {}", student.group),
        format!("Faculty Number: {}", student.faculty_number),
        format!("Status: {}", student.status),
        format!("Current Year: {}", student.current_year),
    ];
    lines.extend(course_lines(student));
    lines.join("\n")
}

pub fn student_list(students: &[&Student]) -> String {
    if students.is_empty() {
        return "No students found in this program and year.".to_string();
    }

    let mut lines = Vec::new();
    for student in students {
        lines.push("-----".to_string());
        lines.push(format!("Student name: {}", student.name));
        lines.push(format!("Group: {}", student.group));
        lines.push(format!("Faculty Number: {}", student.faculty_number));
        lines.push(format!("Status: {}", student.status));
        lines.extend(course_lines(student));
        lines.push("-----".to_string());
    }
    lines.join("\n")
}

pub fn protocol(protocol: &Protocol, date: NaiveDate) -> String {
    let mut lines = vec![format!(
        "Protocol for {} ({}) - {}",
        protocol.discipline,
        protocol.discipline.name(),
        date.format("%Y-%m-%d")
    )];

    if protocol.is_empty() {
        lines.push("No students are enrolled in this discipline.".to_string());
    }

    for (program, by_year) in &protocol.groups {
        lines.push(format!("Program: {}", program));
        for (year, names) in by_year {
            lines.push(format!("Year: {}", year));
            lines.extend(names.iter().map(|name| format!("Student: {}", name)));
        }
    }
    lines.join("\n")
}

pub fn report(report: &StudentReport) -> String {
    let mut lines = vec![
        format!("Student report for {} ({})", report.name, report.faculty_number),
        "Completed courses:".to_string(),
    ];
    lines.extend(
        report
            .completed
            .iter()
            .map(|(discipline, value)| format!("{} - {}", discipline.name(), grade(*value))),
    );
    lines.push("Ungraded courses:".to_string());
    lines.extend(report.ungraded.iter().map(|d| d.name().to_string()));
    lines.push(format!("Average grade: {}", grade(report.average)));
    lines.join("\n")
}
