use crate::core::registry::StudentRegistry;
use crate::core::reports::{Protocol, StudentReport};
use crate::domain::catalog::{Catalog, Program};
use crate::domain::model::{Course, Status, Student};
use crate::utils::error::{RecordsError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChangeOutcome {
    Group(i32),
    Year(u32),
    Program(Program),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeOutcome {
    Resumed,
    NotDroppedOut,
}

/// Lifecycle and enrollment rules applied to students held by a [`StudentRegistry`].
///
/// Every check runs before the first mutation, so a refused operation leaves
/// the record exactly as it was.
pub struct EnrollmentEngine<'r> {
    registry: &'r mut StudentRegistry,
}

impl<'r> EnrollmentEngine<'r> {
    pub fn new(registry: &'r mut StudentRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &StudentRegistry {
        self.registry
    }

    fn student(&self, faculty_number: &str) -> Result<&Student> {
        self.registry
            .find_by_faculty_number(faculty_number)
            .ok_or_else(|| RecordsError::not_found("student", "faculty number", faculty_number))
    }

    fn student_mut(&mut self, faculty_number: &str) -> Result<&mut Student> {
        self.registry
            .find_by_faculty_number_mut(faculty_number)
            .ok_or_else(|| RecordsError::not_found("student", "faculty number", faculty_number))
    }

    /// Resolves a student that may still be changed, i.e. has not dropped out.
    fn active_student_mut(&mut self, faculty_number: &str) -> Result<&mut Student> {
        let student = self.student_mut(faculty_number)?;
        if student.is_dropout() {
            tracing::warn!("Refusing change to dropped-out student {}", faculty_number);
            return Err(RecordsError::no_rights());
        }
        Ok(student)
    }

    pub fn enroll(&mut self, name: &str, program: &str, group: i32, faculty_number: &str) -> Result<()> {
        let program = Catalog::program_by_name(program)?;
        let student = Student::new(name, program, group, faculty_number);
        tracing::info!("🎓 Enrolled {} ({}) in {} group {}", name, faculty_number, program, group);
        self.registry.insert(student);
        Ok(())
    }

    pub fn advance(&mut self, faculty_number: &str) -> Result<u32> {
        let student = self.active_student_mut(faculty_number)?;
        let next = next_year(student)?;
        ensure_current_year_completed(student)?;
        student.current_year = next;
        tracing::info!("⏫ {} advanced to year {}", faculty_number, next);
        Ok(next)
    }

    pub fn change(&mut self, faculty_number: &str, option: &str, value: &str) -> Result<ChangeOutcome> {
        let student = self.active_student_mut(faculty_number)?;

        match option.to_lowercase().as_str() {
            "group" => {
                let group: i32 = value
                    .trim()
                    .parse()
                    .map_err(|_| RecordsError::invalid_number(value))?;
                student.group = group;
                tracing::info!("{} moved to group {}", faculty_number, group);
                Ok(ChangeOutcome::Group(group))
            }
            "year" => {
                let year: u32 = value
                    .trim()
                    .parse()
                    .map_err(|_| RecordsError::invalid_number(value))?;
                if year != next_year(student)? {
                    return Err(RecordsError::Forbidden {
                        message: "Can only advance to the next year.".to_string(),
                    });
                }
                ensure_current_year_completed(student)?;
                student.current_year = year;
                tracing::info!("⏫ {} advanced to year {}", faculty_number, year);
                Ok(ChangeOutcome::Year(year))
            }
            "program" => {
                let target = Catalog::program_by_name(value)?;
                let missing = Catalog::disciplines_of(target)
                    .iter()
                    .copied()
                    .filter(|d| d.is_mandatory() && d.year() <= student.current_year)
                    .find(|d| !student.has_completed(*d));
                if let Some(discipline) = missing {
                    tracing::debug!("{} is missing {} for program {}", faculty_number, discipline, target);
                    return Err(RecordsError::Incomplete {
                        message: "The student has not successfully completed all mandatory disciplines for the new program.".to_string(),
                    });
                }
                student.program = target;
                tracing::info!("🔀 {} transferred to program {}", faculty_number, target);
                Ok(ChangeOutcome::Program(target))
            }
            _ => Err(RecordsError::InvalidOption {
                value: option.to_string(),
                reason: "expected one of group, year, program".to_string(),
            }),
        }
    }

    pub fn graduate(&mut self, faculty_number: &str) -> Result<()> {
        let student = self.active_student_mut(faculty_number)?;
        if !student.course_list.iter().all(Course::is_successfully_completed) {
            return Err(RecordsError::Incomplete {
                message: "The student has not successfully completed all disciplines.".to_string(),
            });
        }
        student.status = Status::Graduated;
        tracing::info!("🎓 {} graduated", faculty_number);
        Ok(())
    }

    pub fn interrupt(&mut self, faculty_number: &str) -> Result<()> {
        let student = self.student_mut(faculty_number)?;
        student.status = Status::Dropout;
        tracing::info!("{} dropped out", faculty_number);
        Ok(())
    }

    pub fn resume(&mut self, faculty_number: &str) -> Result<ResumeOutcome> {
        let student = self.student_mut(faculty_number)?;
        if !student.is_dropout() {
            return Ok(ResumeOutcome::NotDroppedOut);
        }
        student.status = Status::Active;
        tracing::info!("{} regained student rights", faculty_number);
        Ok(ResumeOutcome::Resumed)
    }

    pub fn enroll_in(&mut self, faculty_number: &str, discipline_name: &str) -> Result<()> {
        let student = self.active_student_mut(faculty_number)?;
        let discipline = Catalog::discipline_by_name(discipline_name)?;

        if !student.program.contains(discipline) || discipline.year() != student.current_year {
            tracing::warn!(
                "{} (program {}, year {}) cannot take {} (year {})",
                faculty_number,
                student.program,
                student.current_year,
                discipline,
                discipline.year()
            );
            return Err(RecordsError::NotEligible {
                message: "The student cannot enroll in this discipline.".to_string(),
            });
        }

        student.course_list.push(Course::enrolled_in(discipline));
        tracing::info!("📚 {} enrolled in {}", faculty_number, discipline);
        Ok(())
    }

    /// Grades the first course recorded for the discipline; the value is stored as given.
    pub fn add_grade(&mut self, faculty_number: &str, discipline_name: &str, grade: f64) -> Result<()> {
        if !grade.is_finite() {
            return Err(RecordsError::InvalidOption {
                value: grade.to_string(),
                reason: "expected a finite number".to_string(),
            });
        }
        let student = self.active_student_mut(faculty_number)?;
        let discipline = Catalog::discipline_by_name(discipline_name)?;

        let course = student
            .course_list
            .iter_mut()
            .find(|c| c.discipline == discipline)
            .filter(|c| c.enrolled)
            .ok_or_else(|| RecordsError::NotEnrolled {
                faculty_number: faculty_number.to_string(),
                discipline: discipline.code().to_string(),
            })?;

        course.grade = grade;
        course.graded = true;
        tracing::info!("📝 {} graded {} in {}", faculty_number, grade, discipline);
        Ok(())
    }

    pub fn protocol(&self, discipline_name: &str) -> Result<Protocol> {
        let discipline = Catalog::discipline_by_name(discipline_name)?;
        let protocol = Protocol::build(discipline, self.registry.all());
        tracing::debug!("Protocol for {} lists {} students", discipline, protocol.student_count());
        Ok(protocol)
    }

    pub fn report(&self, faculty_number: &str) -> Result<StudentReport> {
        Ok(StudentReport::build(self.student(faculty_number)?))
    }

    pub fn print(&self, faculty_number: &str) -> Result<&Student> {
        self.student(faculty_number)
    }

    pub fn print_all(&self, program_name: &str, year: u32) -> Vec<&Student> {
        self.registry.find_by_program_and_year(program_name, year)
    }
}

fn next_year(student: &Student) -> Result<u32> {
    student.current_year.checked_add(1).ok_or_else(|| RecordsError::Forbidden {
        message: "The student cannot advance past the last year.".to_string(),
    })
}

/// Every recorded mandatory course of the current year must be passed.
fn ensure_current_year_completed(student: &Student) -> Result<()> {
    let blocking = student.course_list.iter().find(|c| {
        c.discipline.year() == student.current_year
            && c.discipline.is_mandatory()
            && !c.is_successfully_completed()
    });

    match blocking {
        Some(course) => {
            tracing::debug!(
                "{} blocked from advancing by {}",
                student.faculty_number,
                course.discipline
            );
            Err(RecordsError::Incomplete {
                message: "The student has not successfully completed all mandatory disciplines of the current year.".to_string(),
            })
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Discipline;

    const FN: &str = "100";

    fn registry_with_ann() -> StudentRegistry {
        let mut registry = StudentRegistry::new();
        EnrollmentEngine::new(&mut registry)
            .enroll("Ann", "CS", 1, FN)
            .unwrap();
        registry
    }

    fn ann(registry: &StudentRegistry) -> &Student {
        registry.find_by_faculty_number(FN).unwrap()
    }

    #[test]
    fn test_enroll_creates_first_year_active_student() {
        let registry = registry_with_ann();
        let student = ann(&registry);
        assert_eq!(student.name, "Ann");
        assert_eq!(student.program, Program::Cs);
        assert_eq!(student.group, 1);
        assert_eq!(student.current_year, 1);
        assert_eq!(student.status, Status::Active);
        assert!(student.course_list.is_empty());
    }

    #[test]
    fn test_enroll_unknown_program() {
        let mut registry = StudentRegistry::new();
        let err = EnrollmentEngine::new(&mut registry)
            .enroll("Ann", "LAW", 1, FN)
            .unwrap_err();
        assert!(matches!(err, RecordsError::NotFound { entity: "program", .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_enroll_does_not_reject_duplicate_faculty_number() {
        let mut registry = registry_with_ann();
        EnrollmentEngine::new(&mut registry)
            .enroll("Ann Twin", "SE", 2, FN)
            .unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_unknown_student_is_not_found() {
        let mut registry = registry_with_ann();
        let mut engine = EnrollmentEngine::new(&mut registry);
        assert!(matches!(engine.advance("999"), Err(RecordsError::NotFound { .. })));
        assert!(matches!(engine.interrupt("999"), Err(RecordsError::NotFound { .. })));
        assert!(matches!(engine.report("999"), Err(RecordsError::NotFound { .. })));
    }

    #[test]
    fn test_advance_with_no_courses_succeeds() {
        let mut registry = registry_with_ann();
        let year = EnrollmentEngine::new(&mut registry).advance(FN).unwrap();
        assert_eq!(year, 2);
        assert_eq!(ann(&registry).current_year, 2);
    }

    #[test]
    fn test_advance_blocked_by_incomplete_mandatory_course() {
        let mut registry = registry_with_ann();
        let mut engine = EnrollmentEngine::new(&mut registry);
        engine.enroll_in(FN, "PF").unwrap();
        engine.enroll_in(FN, "MATHS").unwrap();
        engine.add_grade(FN, "PF", 5.0).unwrap();

        let err = engine.advance(FN).unwrap_err();
        assert!(matches!(err, RecordsError::Incomplete { .. }));
        assert_eq!(ann(&registry).current_year, 1);
    }

    #[test]
    fn test_advance_blocked_by_failing_grade() {
        let mut registry = registry_with_ann();
        let mut engine = EnrollmentEngine::new(&mut registry);
        engine.enroll_in(FN, "PF").unwrap();
        engine.add_grade(FN, "PF", 2.0).unwrap();
        assert!(engine.advance(FN).is_err());

        engine.add_grade(FN, "PF", 3.0).unwrap();
        assert_eq!(engine.advance(FN).unwrap(), 2);
    }

    #[test]
    fn test_advance_after_passing_all_mandatory_courses() {
        let mut registry = registry_with_ann();
        let mut engine = EnrollmentEngine::new(&mut registry);
        engine.enroll_in(FN, "PF").unwrap();
        engine.enroll_in(FN, "MATHS").unwrap();
        engine.add_grade(FN, "PF", 5.0).unwrap();
        engine.add_grade(FN, "MATHS", 4.5).unwrap();

        assert_eq!(engine.advance(FN).unwrap(), 2);
    }

    #[test]
    fn test_change_group() {
        let mut registry = registry_with_ann();
        let outcome = EnrollmentEngine::new(&mut registry)
            .change(FN, "GROUP", "2")
            .unwrap();
        assert_eq!(outcome, ChangeOutcome::Group(2));
        assert_eq!(ann(&registry).group, 2);
    }

    #[test]
    fn test_change_group_with_bad_number() {
        let mut registry = registry_with_ann();
        let err = EnrollmentEngine::new(&mut registry)
            .change(FN, "group", "two")
            .unwrap_err();
        assert!(matches!(err, RecordsError::InvalidOption { .. }));
        assert_eq!(ann(&registry).group, 1);
    }

    #[test]
    fn test_change_year_rejects_skipping() {
        let mut registry = registry_with_ann();
        let err = EnrollmentEngine::new(&mut registry)
            .change(FN, "year", "3")
            .unwrap_err();
        assert!(matches!(err, RecordsError::Forbidden { .. }));
        assert_eq!(ann(&registry).current_year, 1);
    }

    #[test]
    fn test_change_year_before_completing_mandatory_courses() {
        let mut registry = registry_with_ann();
        let mut engine = EnrollmentEngine::new(&mut registry);
        engine.enroll_in(FN, "PF").unwrap();

        let err = engine.change(FN, "year", "2").unwrap_err();
        assert!(matches!(err, RecordsError::Incomplete { .. }));
        assert_eq!(ann(&registry).current_year, 1);
    }

    #[test]
    fn test_change_year_to_next_year() {
        let mut registry = registry_with_ann();
        let outcome = EnrollmentEngine::new(&mut registry)
            .change(FN, "Year", "2")
            .unwrap();
        assert_eq!(outcome, ChangeOutcome::Year(2));
        assert_eq!(ann(&registry).current_year, 2);
    }

    #[test]
    fn test_change_program_requires_target_mandatory_courses() {
        let mut registry = registry_with_ann();
        let mut engine = EnrollmentEngine::new(&mut registry);

        // SIT year 1 mandatory: PF, WD; the student only has PF.
        engine.enroll_in(FN, "PF").unwrap();
        engine.add_grade(FN, "PF", 6.0).unwrap();
        let err = engine.change(FN, "program", "SIT").unwrap_err();
        assert!(matches!(err, RecordsError::Incomplete { .. }));
        assert_eq!(ann(&registry).program, Program::Cs);
    }

    #[test]
    fn test_change_program_keeps_course_history() {
        let mut registry = registry_with_ann();
        let mut engine = EnrollmentEngine::new(&mut registry);

        // SE year 1 mandatory is only PF.
        engine.enroll_in(FN, "PF").unwrap();
        engine.enroll_in(FN, "MATHS").unwrap();
        engine.add_grade(FN, "PF", 4.0).unwrap();
        let outcome = engine.change(FN, "program", "se").unwrap();

        assert_eq!(outcome, ChangeOutcome::Program(Program::Se));
        let student = ann(&registry);
        assert_eq!(student.program, Program::Se);
        assert_eq!(student.course_list.len(), 2);
        assert_eq!(student.course_list[1].discipline, Discipline::Maths);
    }

    #[test]
    fn test_change_program_unknown_target() {
        let mut registry = registry_with_ann();
        let err = EnrollmentEngine::new(&mut registry)
            .change(FN, "program", "LAW")
            .unwrap_err();
        assert!(matches!(err, RecordsError::NotFound { entity: "program", .. }));
    }

    #[test]
    fn test_change_invalid_option() {
        let mut registry = registry_with_ann();
        let err = EnrollmentEngine::new(&mut registry)
            .change(FN, "name", "Bob")
            .unwrap_err();
        assert!(matches!(err, RecordsError::InvalidOption { .. }));
    }

    #[test]
    fn test_graduate_requires_every_course_passed() {
        let mut registry = registry_with_ann();
        let mut engine = EnrollmentEngine::new(&mut registry);
        engine.enroll_in(FN, "PF").unwrap();
        engine.add_grade(FN, "PF", 5.0).unwrap();
        engine.advance(FN).unwrap();
        engine.enroll_in(FN, "OOP").unwrap();

        assert!(matches!(engine.graduate(FN), Err(RecordsError::Incomplete { .. })));
        assert_eq!(ann(&registry).status, Status::Active);
    }

    #[test]
    fn test_graduate_with_all_courses_passed() {
        let mut registry = registry_with_ann();
        let mut engine = EnrollmentEngine::new(&mut registry);
        engine.enroll_in(FN, "PF").unwrap();
        engine.add_grade(FN, "PF", 3.5).unwrap();
        engine.graduate(FN).unwrap();
        assert_eq!(ann(&registry).status, Status::Graduated);
    }

    #[test]
    fn test_interrupt_is_idempotent_and_resume_restores() {
        let mut registry = registry_with_ann();
        let mut engine = EnrollmentEngine::new(&mut registry);
        engine.interrupt(FN).unwrap();
        engine.interrupt(FN).unwrap();
        assert_eq!(engine.registry().find_by_faculty_number(FN).unwrap().status, Status::Dropout);

        assert_eq!(engine.resume(FN).unwrap(), ResumeOutcome::Resumed);
        assert_eq!(ann(&registry).status, Status::Active);
    }

    #[test]
    fn test_resume_without_dropout_changes_nothing() {
        let mut registry = registry_with_ann();
        let outcome = EnrollmentEngine::new(&mut registry).resume(FN).unwrap();
        assert_eq!(outcome, ResumeOutcome::NotDroppedOut);
        assert_eq!(ann(&registry).status, Status::Active);
    }

    #[test]
    fn test_interrupt_graduated_student() {
        let mut registry = registry_with_ann();
        let mut engine = EnrollmentEngine::new(&mut registry);
        engine.graduate(FN).unwrap();
        engine.interrupt(FN).unwrap();
        assert_eq!(ann(&registry).status, Status::Dropout);
    }

    #[test]
    fn test_dropout_student_cannot_be_changed() {
        let mut registry = registry_with_ann();
        let mut engine = EnrollmentEngine::new(&mut registry);
        engine.enroll_in(FN, "PF").unwrap();
        engine.interrupt(FN).unwrap();

        let forbidden = |r: Result<()>| matches!(r, Err(RecordsError::Forbidden { .. }));
        assert!(matches!(engine.advance(FN), Err(RecordsError::Forbidden { .. })));
        assert!(matches!(engine.change(FN, "group", "5"), Err(RecordsError::Forbidden { .. })));
        assert!(forbidden(engine.graduate(FN)));
        assert!(forbidden(engine.enroll_in(FN, "MATHS")));
        assert!(forbidden(engine.add_grade(FN, "PF", 6.0)));

        let student = ann(&registry);
        assert_eq!(student.current_year, 1);
        assert_eq!(student.group, 1);
        assert_eq!(student.course_list, vec![Course::enrolled_in(Discipline::Pf)]);
    }

    #[test]
    fn test_enroll_in_adds_one_course() {
        let mut registry = registry_with_ann();
        EnrollmentEngine::new(&mut registry)
            .enroll_in(FN, "PF")
            .unwrap();
        let courses = &ann(&registry).course_list;
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].discipline, Discipline::Pf);
        assert!(courses[0].enrolled);
        assert!(!courses[0].graded);
    }

    #[test]
    fn test_enroll_in_rejects_other_program_or_year() {
        let mut registry = registry_with_ann();
        let mut engine = EnrollmentEngine::new(&mut registry);

        // WD is a first-year discipline but not part of CS.
        assert!(matches!(engine.enroll_in(FN, "WD"), Err(RecordsError::NotEligible { .. })));
        // OOP is CS but second year.
        assert!(matches!(engine.enroll_in(FN, "OOP"), Err(RecordsError::NotEligible { .. })));
        assert!(matches!(
            engine.enroll_in(FN, "ASTRONOMY"),
            Err(RecordsError::NotFound { entity: "discipline", .. })
        ));
        assert!(ann(&registry).course_list.is_empty());
    }

    #[test]
    fn test_enroll_in_twice_keeps_duplicates() {
        let mut registry = registry_with_ann();
        let mut engine = EnrollmentEngine::new(&mut registry);
        engine.enroll_in(FN, "PF").unwrap();
        engine.enroll_in(FN, "PF").unwrap();
        engine.add_grade(FN, "PF", 4.0).unwrap();

        let courses = &ann(&registry).course_list;
        assert_eq!(courses.len(), 2);
        assert!(courses[0].graded);
        assert!(!courses[1].graded);
    }

    #[test]
    fn test_add_grade_requires_enrollment() {
        let mut registry = registry_with_ann();
        let err = EnrollmentEngine::new(&mut registry)
            .add_grade(FN, "PF", 5.0)
            .unwrap_err();
        assert!(matches!(err, RecordsError::NotEnrolled { .. }));
        assert!(ann(&registry).course_list.is_empty());
    }

    #[test]
    fn test_add_grade_stores_value_as_given() {
        let mut registry = registry_with_ann();
        let mut engine = EnrollmentEngine::new(&mut registry);
        engine.enroll_in(FN, "PF").unwrap();
        engine.add_grade(FN, "PF", 42.5).unwrap();

        let course = &ann(&registry).course_list[0];
        assert!(course.graded);
        assert_eq!(course.grade, 42.5);
    }

    #[test]
    fn test_add_grade_rejects_non_finite_values() {
        let mut registry = registry_with_ann();
        let mut engine = EnrollmentEngine::new(&mut registry);
        engine.enroll_in(FN, "PF").unwrap();

        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = engine.add_grade(FN, "PF", value).unwrap_err();
            assert!(matches!(err, RecordsError::InvalidOption { .. }));
        }
        assert!(!ann(&registry).course_list[0].graded);
    }

    #[test]
    fn test_year_at_upper_bound_cannot_advance() {
        let mut registry = registry_with_ann();
        registry.find_by_faculty_number_mut(FN).unwrap().current_year = u32::MAX;
        let mut engine = EnrollmentEngine::new(&mut registry);

        assert!(matches!(engine.advance(FN), Err(RecordsError::Forbidden { .. })));
        assert!(matches!(
            engine.change(FN, "year", &u32::MAX.to_string()),
            Err(RecordsError::Forbidden { .. })
        ));
        assert_eq!(ann(&registry).current_year, u32::MAX);
    }

    #[test]
    fn test_protocol_and_report_are_read_only() {
        let mut registry = registry_with_ann();
        let mut engine = EnrollmentEngine::new(&mut registry);
        engine.enroll_in(FN, "PF").unwrap();
        engine.enroll_in(FN, "MATHS").unwrap();
        engine.add_grade(FN, "PF", 5.0).unwrap();

        let protocol = engine.protocol("MATHS").unwrap();
        assert_eq!(protocol.groups[&Program::Cs][&1], vec!["Ann".to_string()]);
        assert!(engine.protocol("SA").unwrap().is_empty());
        assert!(engine.protocol("NOPE").is_err());

        let report = engine.report(FN).unwrap();
        assert_eq!(report.average, 5.0);
        assert_eq!(report.ungraded, vec![Discipline::Maths]);
    }

    #[test]
    fn test_print_all_filters_by_program_and_year() {
        let mut registry = registry_with_ann();
        let mut engine = EnrollmentEngine::new(&mut registry);
        engine.enroll("Bob", "SE", 3, "200").unwrap();

        assert_eq!(engine.print_all("CS", 1).len(), 1);
        assert!(engine.print_all("CS", 2).is_empty());
        assert_eq!(engine.print("200").unwrap().name, "Bob");
    }
}
