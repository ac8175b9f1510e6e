use crate::app::command::{Command, HELP_TEXT};
use crate::app::render;
use crate::core::enrollment::{ChangeOutcome, EnrollmentEngine, ResumeOutcome};
use crate::core::registry::StudentRegistry;
use crate::domain::document::StudentDocument;
use crate::domain::ports::DocumentStore;
use crate::utils::error::{RecordsError, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Output(String),
    Exit,
}

struct OpenDocument {
    path: String,
    document: StudentDocument,
    registry: StudentRegistry,
    dirty: bool,
}

/// A command-line session over at most one open student document.
pub struct Session<D: DocumentStore> {
    store: D,
    open: Option<OpenDocument>,
}

impl<D: DocumentStore> Session<D> {
    pub fn new(store: D) -> Self {
        Self { store, open: None }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn open_path(&self) -> Option<&str> {
        self.open.as_ref().map(|o| o.path.as_str())
    }

    pub fn registry(&self) -> Option<&StudentRegistry> {
        self.open.as_ref().map(|o| &o.registry)
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.open.as_ref().is_some_and(|o| o.dirty)
    }

    /// Runs one line and turns every failure into the text shown at the prompt.
    pub async fn execute(&mut self, line: &str) -> Reply {
        match self.dispatch(line).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(
                    "Command '{}' failed: {} (Category: {:?})",
                    line.trim(),
                    e,
                    e.category()
                );
                Reply::Output(e.user_friendly_message())
            }
        }
    }

    async fn dispatch(&mut self, line: &str) -> Result<Reply> {
        let Some(command) = Command::parse(line)? else {
            return Ok(Reply::Output(String::new()));
        };

        if command.requires_open_file() && !self.is_open() {
            return Err(RecordsError::NoOpenFile);
        }

        let text = match command {
            Command::Open(path) => self.open(&path).await?,
            Command::Close => self.close()?,
            Command::Save => self.save().await?,
            Command::SaveAs(path) => self.save_as(&path).await?,
            Command::Help => HELP_TEXT.to_string(),
            Command::Exit => {
                if self.has_unsaved_changes() {
                    tracing::warn!("⚠️ Exiting with unsaved changes");
                }
                return Ok(Reply::Exit);
            }
            other => self.run_engine(other)?,
        };

        Ok(Reply::Output(text))
    }

    pub async fn open(&mut self, path: &str) -> Result<String> {
        if self.is_open() {
            self.close()?;
        }

        let document = self.store.load_document(path).await?;
        let registry = StudentRegistry::from_students(document.students());
        tracing::info!("📂 Opened {} with {} students", path, registry.len());

        self.open = Some(OpenDocument {
            path: path.to_string(),
            document,
            registry,
            dirty: false,
        });
        Ok("File opened successfully.".to_string())
    }

    pub fn close(&mut self) -> Result<String> {
        let closed = self.open.take().ok_or(RecordsError::NoOpenFile)?;
        if closed.dirty {
            tracing::warn!("⚠️ Closing {} with unsaved changes", closed.path);
        }
        tracing::info!("Closed {}", closed.path);
        Ok("File closed successfully.".to_string())
    }

    pub async fn save(&mut self) -> Result<String> {
        let open = self.open.as_mut().ok_or(RecordsError::NoOpenFile)?;
        open.document.set_students(open.registry.all())?;
        self.store.save_document(&open.path, &open.document).await?;
        open.dirty = false;
        Ok("Data saved successfully.".to_string())
    }

    /// Writes the current data to `path`; the open document stays where it was.
    pub async fn save_as(&mut self, path: &str) -> Result<String> {
        let open = self.open.as_mut().ok_or(RecordsError::NoOpenFile)?;
        open.document.set_students(open.registry.all())?;
        self.store.save_document(path, &open.document).await?;
        Ok(format!("Data saved successfully to {}.", path))
    }

    fn run_engine(&mut self, command: Command) -> Result<String> {
        let open = self.open.as_mut().ok_or(RecordsError::NoOpenFile)?;
        let mut engine = EnrollmentEngine::new(&mut open.registry);

        let (text, mutated) = match command {
            Command::Enroll {
                name,
                program,
                group,
                faculty_number,
            } => {
                engine.enroll(&name, &program, group, &faculty_number)?;
                ("Student enrolled successfully.".to_string(), true)
            }
            Command::Advance(faculty_number) => {
                engine.advance(&faculty_number)?;
                ("The student has been advanced to the next year.".to_string(), true)
            }
            Command::Change {
                faculty_number,
                option,
                value,
            } => {
                let text = match engine.change(&faculty_number, &option, &value)? {
                    ChangeOutcome::Group(_) => "Student's group has been changed.",
                    ChangeOutcome::Year(_) => "The student has been advanced to the next year.",
                    ChangeOutcome::Program(_) => "The student's program has been changed.",
                };
                (text.to_string(), true)
            }
            Command::Graduate(faculty_number) => {
                engine.graduate(&faculty_number)?;
                ("The student has graduated.".to_string(), true)
            }
            Command::Interrupt(faculty_number) => {
                engine.interrupt(&faculty_number)?;
                ("The student has dropped out.".to_string(), true)
            }
            Command::Resume(faculty_number) => match engine.resume(&faculty_number)? {
                ResumeOutcome::Resumed => ("Student rights successfully regained.".to_string(), true),
                ResumeOutcome::NotDroppedOut => ("Student has not dropped out.".to_string(), false),
            },
            Command::Print(faculty_number) => (render::student(engine.print(&faculty_number)?), false),
            Command::PrintAll { program, year } => {
                (render::student_list(&engine.print_all(&program, year)), false)
            }
            Command::EnrollIn {
                faculty_number,
                discipline,
            } => {
                engine.enroll_in(&faculty_number, &discipline)?;
                ("The student has been enrolled in the course.".to_string(), true)
            }
            Command::AddGrade {
                faculty_number,
                discipline,
                grade,
            } => {
                engine.add_grade(&faculty_number, &discipline, grade)?;
                ("The grade has been added.".to_string(), true)
            }
            Command::Protocol(discipline) => {
                let protocol = engine.protocol(&discipline)?;
                let today = chrono::Local::now().date_naive();
                (render::protocol(&protocol, today), false)
            }
            Command::Report(faculty_number) => (render::report(&engine.report(&faculty_number)?), false),
            Command::Open(_)
            | Command::Close
            | Command::Save
            | Command::SaveAs(_)
            | Command::Help
            | Command::Exit => unreachable!("session commands are handled by dispatch"),
        };

        if mutated {
            open.dirty = true;
        }
        Ok(text)
    }

    /// Reads commands line by line until `exit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, output: &mut W, prompt: &str) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        loop {
            output.write_all(prompt.as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                tracing::debug!("End of input");
                break;
            };

            match self.execute(&line).await {
                Reply::Exit => break,
                Reply::Output(text) if text.is_empty() => {}
                Reply::Output(text) => {
                    output.write_all(text.as_bytes()).await?;
                    output.write_all(b"\n").await?;
                }
            }
        }

        if self.has_unsaved_changes() {
            tracing::warn!("⚠️ Session ended with unsaved changes");
        }
        output.flush().await?;
        Ok(())
    }
}
