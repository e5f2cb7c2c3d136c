//! Interactive login and menu loop.
//!
//! The shell owns every prompt and message; the [`TaskManager`] owns the
//! data. Input and output are generic so whole sessions can be scripted in
//! tests. End of input ends the session like the exit command.

use std::io::{BufRead, Write};

use tasktrack_workspace::{
    CompletionOutcome, EditField, Ordinal, TaskError, TaskId, TaskManager, parse_date, today,
};
use thiserror::Error;

use crate::render;

const MENU: &str = "Select one of the following Options below:
r - Registering a user
a - Adding a task
va - View all tasks
vm - View my task
gr - Generate reports
ds - Display statistics
e - Exit
: ";

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Console I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Input closed")]
    InputClosed,
}

type ShellResult<T> = Result<T, ShellError>;

/// Menu commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Register,
    AddTask,
    ViewAll,
    ViewMine,
    GenerateReports,
    DisplayStatistics,
    Exit,
}

impl Command {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "r" => Some(Command::Register),
            "a" => Some(Command::AddTask),
            "va" => Some(Command::ViewAll),
            "vm" => Some(Command::ViewMine),
            "gr" => Some(Command::GenerateReports),
            "ds" => Some(Command::DisplayStatistics),
            "e" => Some(Command::Exit),
            _ => None,
        }
    }
}

pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Log in and serve menu commands until exit or end of input.
    pub fn run(&mut self, manager: &mut TaskManager) -> ShellResult<()> {
        match self.session(manager) {
            Err(ShellError::InputClosed) => {
                tracing::debug!("Input closed, ending session");
                writeln!(self.output)?;
                Ok(())
            }
            other => other,
        }
    }

    fn session(&mut self, manager: &mut TaskManager) -> ShellResult<()> {
        let current_user = self.login(manager)?;

        loop {
            writeln!(self.output)?;
            let choice = self.prompt(MENU)?;

            match Command::parse(&choice) {
                Some(Command::Register) => self.register(manager)?,
                Some(Command::AddTask) => self.add_task(manager)?,
                Some(Command::ViewAll) => self.view_all(manager)?,
                Some(Command::ViewMine) => self.view_mine(manager, &current_user)?,
                Some(Command::GenerateReports) => match manager.generate_reports() {
                    Ok(_) => writeln!(self.output, "Reports generated.")?,
                    Err(e) => self.report_error(&e)?,
                },
                Some(Command::DisplayStatistics) if TaskManager::is_admin(&current_user) => {
                    self.display_statistics(manager)?
                }
                Some(Command::DisplayStatistics) => writeln!(
                    self.output,
                    "Error. This option requires admin permissions."
                )?,
                Some(Command::Exit) => {
                    writeln!(self.output, "Goodbye!!!")?;
                    return Ok(());
                }
                None => writeln!(
                    self.output,
                    "You have made a wrong choice, Please Try again"
                )?,
            }
        }
    }

    fn login(&mut self, manager: &TaskManager) -> ShellResult<String> {
        loop {
            writeln!(self.output, "LOGIN")?;
            let username = self.prompt("Username: ")?;
            let password = self.prompt("Password: ")?;

            match manager.check_login(&username, &password) {
                Ok(()) => {
                    writeln!(self.output, "Login Successful!")?;
                    return Ok(username);
                }
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    fn register(&mut self, manager: &mut TaskManager) -> ShellResult<()> {
        loop {
            let username = self.prompt("New Username: ")?;
            if manager.user_exists(&username) {
                writeln!(
                    self.output,
                    "Error. Username already exists. Please choose a different username."
                )?;
                continue;
            }

            let password = self.prompt("New Password: ")?;
            let confirm = self.prompt("Confirm Password: ")?;

            match manager.register(&username, &password, &confirm) {
                Ok(()) => {
                    writeln!(self.output, "New user added")?;
                    return Ok(());
                }
                Err(TaskError::PasswordMismatch) => {
                    writeln!(self.output, "Passwords do not match")?;
                }
                Err(e) => return self.report_error(&e),
            }
        }
    }

    fn add_task(&mut self, manager: &mut TaskManager) -> ShellResult<()> {
        let username = self.prompt("Name of person assigned to task: ")?;
        if !manager.user_exists(&username) {
            writeln!(
                self.output,
                "User does not exist. Please enter a valid username"
            )?;
            return Ok(());
        }

        let title = self.prompt("Title of Task: ")?;
        let description = self.prompt("Description of Task: ")?;
        let due_date = loop {
            let input = self.prompt("Due date of task (YYYY-MM-DD): ")?;
            match parse_date(&input) {
                Ok(date) => break date,
                Err(_) => writeln!(
                    self.output,
                    "Invalid datetime format. Please use the format specified"
                )?,
            }
        };

        match manager.add_task_on(&username, &title, &description, due_date, today()) {
            Ok(_) => writeln!(self.output, "Task successfully added.")?,
            Err(e) => self.report_error(&e)?,
        }
        Ok(())
    }

    fn view_all(&mut self, manager: &TaskManager) -> ShellResult<()> {
        if manager.task_count() == 0 {
            writeln!(self.output, "No tasks available.")?;
            return Ok(());
        }

        writeln!(self.output, "TASKS:")?;
        for (ordinal, task) in manager.view_all() {
            writeln!(self.output, "{}", render::task_entry(ordinal, task))?;
        }
        Ok(())
    }

    fn view_mine(&mut self, manager: &mut TaskManager, username: &str) -> ShellResult<()> {
        let mut own = 0;
        for (ordinal, task) in manager.view_mine(username) {
            writeln!(self.output, "{}", render::own_task_entry(ordinal, task))?;
            own += 1;
        }
        if own == 0 {
            writeln!(self.output, "You have no tasks assigned.")?;
        }

        let selected = loop {
            let input = self.prompt(
                "Enter the number of the task to select or -1 to return to the main menu: ",
            )?;
            let number = match input.trim().parse::<i64>() {
                Ok(-1) => return Ok(()),
                Ok(n) => n,
                Err(_) => {
                    writeln!(self.output, "Invalid input. Please enter a number.")?;
                    continue;
                }
            };
            match Ordinal::try_from(number).ok().and_then(|o| manager.task_at(o)) {
                Some(task) => break task.id,
                None => writeln!(
                    self.output,
                    "Invalid task number. Please enter a valid number."
                )?,
            }
        };

        loop {
            let Some((ordinal, title)) = resolve_selection(manager, selected) else {
                writeln!(self.output, "The selected task is no longer available.")?;
                return Ok(());
            };
            writeln!(self.output, "\nSelected Task {}: {}", ordinal, title)?;
            writeln!(self.output, "1. Mark as Complete")?;
            writeln!(self.output, "2. Edit Task")?;
            writeln!(self.output, "3. Return to Main Menu")?;

            match self.prompt("Enter your choice (1, 2, or 3): ")?.trim() {
                "1" => self.mark_complete(manager, ordinal)?,
                "2" => self.edit_task(manager, ordinal)?,
                "3" => return Ok(()),
                _ => writeln!(self.output, "Invalid choice.")?,
            }
        }
    }

    fn mark_complete(&mut self, manager: &mut TaskManager, ordinal: Ordinal) -> ShellResult<()> {
        match manager.mark_complete(ordinal) {
            Ok(CompletionOutcome::Completed) => writeln!(self.output, "Task marked as complete.")?,
            Ok(CompletionOutcome::AlreadyComplete) => {
                writeln!(self.output, "Task is already marked as complete.")?
            }
            Err(e) => self.report_error(&e)?,
        }
        Ok(())
    }

    fn edit_task(&mut self, manager: &mut TaskManager, ordinal: Ordinal) -> ShellResult<()> {
        let title = match manager.editable_task(ordinal) {
            Ok(task) => task.title.clone(),
            Err(TaskError::TaskLocked { .. }) => {
                writeln!(self.output, "Cannot edit a completed task.")?;
                return Ok(());
            }
            Err(e) => return self.report_error(&e),
        };

        writeln!(self.output, "Editing Task {}: {}", ordinal, title)?;
        writeln!(self.output, "1. Edit assigned username")?;
        writeln!(self.output, "2. Edit due date")?;

        let result = match self.prompt("Enter your choice (1 or 2): ")?.trim() {
            "1" => {
                let username = self.prompt("Enter new username: ")?;
                manager.edit_task(ordinal, EditField::USERNAME, &username)
            }
            "2" => {
                let due_date = loop {
                    let input = self.prompt("Enter new due date (YYYY-MM-DD): ")?;
                    if parse_date(&input).is_ok() {
                        break input;
                    }
                    writeln!(
                        self.output,
                        "Invalid datetime format. Please use the format specified."
                    )?;
                };
                manager.edit_task(ordinal, EditField::DUE_DATE, &due_date)
            }
            _ => {
                writeln!(self.output, "Invalid choice.")?;
                return Ok(());
            }
        };

        match result {
            Ok(()) => writeln!(self.output, "Task updated.")?,
            Err(e) => self.report_error(&e)?,
        }
        Ok(())
    }

    fn display_statistics(&mut self, manager: &TaskManager) -> ShellResult<()> {
        let shown = manager
            .ensure_reports()
            .and_then(|_| manager.display_reports());

        match shown {
            Ok((task_overview, user_overview)) => {
                writeln!(self.output, "{}", render::reports(&task_overview, &user_overview))?
            }
            Err(e) => self.report_error(&e)?,
        }
        Ok(())
    }

    fn report_error(&mut self, error: &TaskError) -> ShellResult<()> {
        tracing::warn!(error = %error, "Operation failed");
        writeln!(self.output, "Error: {}", error)?;
        Ok(())
    }

    /// Print `text` and read one line without its line ending.
    fn prompt(&mut self, text: &str) -> ShellResult<String> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ShellError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Current ordinal and title of the selected task, looked up by id.
fn resolve_selection(manager: &TaskManager, id: TaskId) -> Option<(Ordinal, String)> {
    let ordinal = manager.ordinal_of(id)?;
    let task = manager.task_at(ordinal)?;
    tracing::debug!(task_id = %id, ordinal, "Resolved selected task");
    Some((ordinal, task.title.clone()))
}
