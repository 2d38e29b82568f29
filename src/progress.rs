// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

//! Implementation of ProgressPrinter structure for printing the progress of trajectory reading.

use colored::{ColoredString, Colorize};
use std::io::Write;

/// Progress of trajectory reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressStatus {
    /// Trajectory reading is in progress.
    Running,
    /// Trajectory has been read completely.
    Completed,
    /// Trajectory reading failed.
    Failed,
}

/// String that can be used inside `ProgressPrinter`.
#[derive(Debug, Clone, PartialEq)]
struct ProgressMessage {
    msg: ColoredString,
}

impl ProgressMessage {
    /// Create new `ProgressMessage`.
    ///
    /// ## Panics
    /// Panics if the string is longer than 9 characters.
    fn new(string: ColoredString) -> Self {
        if string.chars().count() > 9 {
            panic!("FATAL MDCRD ERROR | ProgressMessage::new | `ProgressMessage` can not be longer than 9 characters.");
        }

        ProgressMessage { msg: string }
    }

    /// Print formatted `ProgressMessage`.
    fn print(&self, out: &mut dyn Write, colored: bool) {
        if colored {
            write!(out, "[{: ^9}]   ", self.msg)
                .expect("FATAL MDCRD ERROR | ProgressMessage::print (1) | Could not write to `ProgressPrinter` stream.");
        } else {
            write!(out, "[{: ^9}]   ", self.msg.as_ref() as &str)
                .expect("FATAL MDCRD ERROR | ProgressMessage::print (2) | Could not write to `ProgressPrinter` stream.");
        }
    }
}

/// Structure handling printing of progress of reading a trajectory file.
/// Constructed using `ProgressPrinter::new()` and associated with the given
/// trajectory reader using `TrajMasterRead::print_progress()`.
pub struct ProgressPrinter {
    /// Stream to write the progress info to.
    output: Box<dyn Write>,
    /// Current status of reading. Default: ProgressStatus::Running.
    status: ProgressStatus,
    /// Frequency of printing. Print every `print_freq`th frame. Default: 100 frames.
    print_freq: usize,
    /// If true, the output will be colored. Default: true.
    colored: bool,
    /// String to be printed with the number of frames read. Default: "Read".cyan().
    read_msg: ColoredString,
    /// String to be printed with the index of the current frame. Default: "Frame".bright_purple().
    frame_msg: ColoredString,
    /// String to be printed when the trajectory reading is in progress. Default: "RUNNING".yellow().
    running_msg: ProgressMessage,
    /// String to be printed when the trajectory reading is completed. Default: "COMPLETED".green().
    completed_msg: ProgressMessage,
    /// String to be printed when the trajectory reading failed. Default: "FAILED!".red().
    failed_msg: ProgressMessage,
    /// String terminating the progress message. Default: `\r` (carriage return).
    terminating: String,
}

impl ProgressPrinter {
    /// Create an instance of `ProgressPrinter` with default parameters.
    ///
    /// The default values of the `ProgressPrinter` parameters.
    /// - `output`: `std::io::stdout()` (stream to write the progress info to)
    /// - `status`: `ProgressStatus::Running` (current status of trajectory file reading)
    /// - `print_freq`: `100` (progress info will be printed out every 100 trajectory frames read)
    /// - `colored`: `true` (should the output be colored?)
    /// - `read_msg`: `"Read".cyan()` (string associated with the number of frames read so far)
    /// - `frame_msg`: `"Frame".bright_purple()` (string associated with the index of the frame in the trajectory)
    /// - `running_msg`: `"RUNNING".yellow()` (string printed when the trajectory reading is running)
    /// - `completed_msg`: `"COMPLETED".green()` (string printed when the trajectory reading is completed)
    /// - `failed_msg`: `"FAILED!".red()` (string printed when the trajectory reading failed)
    /// - `terminating`: `\r` (string terminating the progress message; useful to set to `\n` when printing to a file)
    ///
    /// You can set custom values for any of the parameters by using `with_%PARAMETER()` method
    /// when constructing the `ProgressPrinter`.
    ///
    /// ## Examples
    /// ```no_run
    /// use mdcrd_rs::prelude::*;
    /// use colored::Colorize;
    ///
    /// // print info every 200th trajectory frame read
    /// let printer = ProgressPrinter::new()
    ///     .with_print_freq(200)
    ///     .with_running_msg("ANALYZING".yellow())
    ///     .with_completed_msg("DONE".blue());
    ///
    /// let mut system = System::from_n_atoms("My System", 2048);
    ///
    /// for frame in system
    ///     .mdcrd_iter("trajectory.mdcrd")
    ///     .unwrap()
    ///     .print_progress(printer)
    /// {
    ///     let frame = frame.unwrap();
    ///     // analyze the frame
    /// }
    /// ```
    ///
    /// By default, `ProgressPrinter` prints to standard output.
    /// However, you can also let it print into a file.
    /// ```no_run
    /// use mdcrd_rs::prelude::*;
    ///
    /// let file = std::fs::File::create("progress.log").unwrap();
    /// let printer = ProgressPrinter::new()
    ///     .with_output(Box::from(file))
    ///     .with_colored(false)
    ///     .with_terminating("\n");
    /// ```
    pub fn new() -> Self {
        ProgressPrinter {
            output: Box::from(std::io::stdout()),
            status: ProgressStatus::Running,
            print_freq: 100,
            colored: true,
            read_msg: "Read".cyan(),
            frame_msg: "Frame".bright_purple(),
            running_msg: ProgressMessage::new("RUNNING".yellow()),
            completed_msg: ProgressMessage::new("COMPLETED".green()),
            failed_msg: ProgressMessage::new("FAILED!".red()),
            terminating: String::from("\r"),
        }
    }

    /// Create new `ProgressPrinter` with specific `output` stream.
    pub fn with_output(mut self, stream: Box<dyn Write>) -> Self {
        self.output = stream;
        self
    }

    /// Create new `ProgressPrinter` with specific value for `status`.
    pub fn with_status(mut self, status: ProgressStatus) -> Self {
        self.status = status;
        self
    }

    /// Set new status to an already constructed `ProgressPrinter`.
    pub fn set_status(&mut self, status: ProgressStatus) {
        self.status = status;
    }

    /// Create new `ProgressPrinter` with specific value for `print_freq`.
    ///
    /// ## Panics
    /// Panics if `print_freq` is zero.
    pub fn with_print_freq(mut self, print_freq: usize) -> Self {
        if print_freq == 0 {
            panic!("FATAL MDCRD ERROR | ProgressPrinter::with_print_freq | Printing frequency must be positive.");
        }

        self.print_freq = print_freq;
        self
    }

    /// Create new `ProgressPrinter` with specific value for `colored`.
    pub fn with_colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Create new `ProgressPrinter` with specific value for `read_msg`.
    pub fn with_read_msg(mut self, read_msg: ColoredString) -> Self {
        self.read_msg = read_msg;
        self
    }

    /// Create new `ProgressPrinter` with specific value for `frame_msg`.
    pub fn with_frame_msg(mut self, frame_msg: ColoredString) -> Self {
        self.frame_msg = frame_msg;
        self
    }

    /// Create new `ProgressPrinter` with specific value for `running_msg`.
    ///
    /// ## Panics
    /// Panics if the `running_msg` is longer than 9 characters.
    pub fn with_running_msg(mut self, running_msg: ColoredString) -> Self {
        self.running_msg = ProgressMessage::new(running_msg);
        self
    }

    /// Create new `ProgressPrinter` with specific value for `completed_msg`.
    ///
    /// ## Panics
    /// Panics if the `completed_msg` is longer than 9 characters.
    pub fn with_completed_msg(mut self, completed_msg: ColoredString) -> Self {
        self.completed_msg = ProgressMessage::new(completed_msg);
        self
    }

    /// Create new `ProgressPrinter` with specific value for `failed_msg`.
    ///
    /// ## Panics
    /// Panics if the `failed_msg` is longer than 9 characters.
    pub fn with_failed_msg(mut self, failed_msg: ColoredString) -> Self {
        self.failed_msg = ProgressMessage::new(failed_msg);
        self
    }

    /// Create new `ProgressPrinter` with specific value for `terminating`.
    pub fn with_terminating(mut self, string: &str) -> Self {
        self.terminating = string.to_string();
        self
    }

    /// Print progress info about trajectory reading.
    ///
    /// `n_read` is the number of frames read so far, `frame_index` is the index
    /// of the last frame read in the trajectory.
    pub fn print(&mut self, n_read: usize, frame_index: usize) {
        if self.status != ProgressStatus::Running || n_read % self.print_freq == 0 {
            match self.status {
                ProgressStatus::Running => self.running_msg.print(&mut self.output, self.colored),
                ProgressStatus::Completed => {
                    self.completed_msg.print(&mut self.output, self.colored)
                }
                ProgressStatus::Failed => self.failed_msg.print(&mut self.output, self.colored),
            }

            if self.colored {
                write!(
                    self.output,
                    "{} {:12} | {} {:12}{}",
                    self.read_msg, n_read, self.frame_msg, frame_index, self.terminating
                )
                .expect("FATAL MDCRD ERROR | ProgressPrinter::print (1) | Could not write to `ProgressPrinter` stream.");
            } else {
                write!(
                    self.output,
                    "{} {:12} | {} {:12}{}",
                    self.read_msg.as_ref() as &str,
                    n_read,
                    self.frame_msg.as_ref() as &str,
                    frame_index,
                    self.terminating
                )
                .expect("FATAL MDCRD ERROR | ProgressPrinter::print (2) | Could not write to `ProgressPrinter` stream.");
            }

            match self.status {
                ProgressStatus::Running => (),
                ProgressStatus::Completed | ProgressStatus::Failed => writeln!(self.output)
                    .expect("FATAL MDCRD ERROR | ProgressPrinter::print (3) | Could not write to `ProgressPrinter` stream."),
            }

            self.output
                .flush()
                .expect("FATAL MDCRD ERROR | ProgressPrinter::print (4) | Could not flush `ProgressPrinter` stream.");
        }
    }
}

impl Default for ProgressPrinter {
    fn default() -> Self {
        Self::new()
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempfile, NamedTempFile};

    #[test]
    fn new() {
        let printer = ProgressPrinter::new();

        assert_eq!(printer.status, ProgressStatus::Running);
        assert_eq!(printer.print_freq, 100);
        assert!(printer.colored);
        assert_eq!(printer.read_msg, "Read".cyan());
        assert_eq!(printer.frame_msg, "Frame".bright_purple());
        assert_eq!(
            printer.running_msg,
            ProgressMessage::new("RUNNING".yellow())
        );
        assert_eq!(
            printer.completed_msg,
            ProgressMessage::new("COMPLETED".green())
        );
        assert_eq!(printer.failed_msg, ProgressMessage::new("FAILED!".red()));
        assert_eq!(printer.terminating, "\r");
    }

    #[test]
    fn set_status() {
        let mut printer = ProgressPrinter::default();

        printer.set_status(ProgressStatus::Failed);
        assert_eq!(printer.status, ProgressStatus::Failed);

        printer.set_status(ProgressStatus::Completed);
        assert_eq!(printer.status, ProgressStatus::Completed);

        printer.set_status(ProgressStatus::Running);
        assert_eq!(printer.status, ProgressStatus::Running);
    }

    #[test]
    fn new_complex() {
        let tmp_file = tempfile().unwrap();

        let printer = ProgressPrinter::new()
            .with_output(Box::from(tmp_file))
            .with_status(ProgressStatus::Completed)
            .with_print_freq(200)
            .with_colored(false)
            .with_read_msg("READ".into())
            .with_frame_msg("frame".yellow())
            .with_running_msg("ANALYZING".red())
            .with_completed_msg("DONE".green())
            .with_failed_msg("FAILURE".on_bright_red());

        assert_eq!(printer.status, ProgressStatus::Completed);
        assert_eq!(printer.print_freq, 200);
        assert!(!printer.colored);
        assert_eq!(printer.read_msg, "READ".into());
        assert_eq!(printer.frame_msg, "frame".yellow());
        assert_eq!(printer.running_msg, ProgressMessage::new("ANALYZING".red()));
        assert_eq!(printer.completed_msg, ProgressMessage::new("DONE".green()));
        assert_eq!(
            printer.failed_msg,
            ProgressMessage::new("FAILURE".on_bright_red())
        );
    }

    #[test]
    #[should_panic(
        expected = "FATAL MDCRD ERROR | ProgressMessage::new | `ProgressMessage` can not be longer than 9 characters."
    )]
    fn progress_message_panic() {
        let _msg = ProgressMessage::new("SHOULD_PANIC".red());
    }

    #[test]
    #[should_panic(
        expected = "FATAL MDCRD ERROR | ProgressPrinter::with_print_freq | Printing frequency must be positive."
    )]
    fn print_freq_zero_panic() {
        let _printer = ProgressPrinter::new().with_print_freq(0);
    }

    fn print_sequence(terminating: &str) -> String {
        let output = NamedTempFile::new().unwrap();
        let path_to_output = output.path().to_owned();

        let mut printer = ProgressPrinter::new()
            .with_output(Box::from(output))
            .with_colored(false)
            .with_terminating(terminating);

        printer.print(0, 0);
        printer.print(1, 2);
        printer.print(99, 198);
        printer.print(100, 200);
        printer.print(150, 300);
        printer.set_status(ProgressStatus::Completed);
        printer.print(180, 360);
        printer.set_status(ProgressStatus::Failed);
        printer.print(181, 362);

        std::fs::read_to_string(path_to_output).unwrap()
    }

    #[test]
    fn print() {
        let expected = "[ RUNNING ]   Read            0 | Frame            0\r\
                        [ RUNNING ]   Read          100 | Frame          200\r\
                        [COMPLETED]   Read          180 | Frame          360\r\n\
                        [ FAILED! ]   Read          181 | Frame          362\r\n";

        assert_eq!(print_sequence("\r"), expected);
    }

    #[test]
    fn print_with_newline() {
        let expected = "[ RUNNING ]   Read            0 | Frame            0\n\
                        [ RUNNING ]   Read          100 | Frame          200\n\
                        [COMPLETED]   Read          180 | Frame          360\n\n\
                        [ FAILED! ]   Read          181 | Frame          362\n\n";

        assert_eq!(print_sequence("\n"), expected);
    }

    #[test]
    fn print_with_terminating() {
        let expected = "[ RUNNING ]   Read            0 | Frame            0  |  \
                        [ RUNNING ]   Read          100 | Frame          200  |  \
                        [COMPLETED]   Read          180 | Frame          360  |  \n\
                        [ FAILED! ]   Read          181 | Frame          362  |  \n";

        assert_eq!(print_sequence("  |  "), expected);
    }
}
