//! Interactive refresh/terminate loop

use std::io::{self, BufRead, Write};
use std::time::Duration;

use tracing::{info, warn};

use super::collector::SnapshotCollector;
use super::config::MonitorConfig;
use crate::monitor::table::{render_table, CLEAR_SCREEN};
use crate::platform::ProcessSource;

pub const MENU_PROMPT: &str =
    "Press 1 to refresh the process list, 2 to terminate a process, or 0 to exit: ";
pub const PID_PROMPT: &str = "Enter the PID of the process to terminate: ";

/// Operator command read at the menu prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Terminate,
    Exit,
    Invalid(String),
}

impl Command {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match input.parse::<i64>() {
            Ok(1) => Command::Refresh,
            Ok(2) => Command::Terminate,
            Ok(0) => Command::Exit,
            _ => Command::Invalid(input.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Refreshing,
    AwaitingCommand,
    Terminating,
    Exiting,
}

pub struct CommandLoop<'a, S, R, W>
where
    S: ProcessSource,
    R: BufRead,
    W: Write,
{
    source: &'a S,
    input: R,
    output: W,
    cooldown: Duration,
    clear_screen: bool,
    cycles: usize,
}

impl<'a, S, R, W> CommandLoop<'a, S, R, W>
where
    S: ProcessSource,
    R: BufRead,
    W: Write,
{
    pub fn new(source: &'a S, input: R, output: W, config: &MonitorConfig) -> Self {
        Self {
            source,
            input,
            output,
            cooldown: config.cooldown(),
            clear_screen: config.clear_screen,
            cycles: 0,
        }
    }

    /// Run until the operator exits or input ends.
    ///
    /// Only console I/O errors escape; everything else is reported and absorbed.
    pub fn run(&mut self) -> io::Result<()> {
        let mut state = LoopState::Refreshing;
        loop {
            state = match state {
                LoopState::Refreshing => {
                    self.refresh()?;
                    LoopState::AwaitingCommand
                }
                LoopState::AwaitingCommand => match self.read_command()? {
                    Command::Refresh => LoopState::Refreshing,
                    Command::Terminate => LoopState::Terminating,
                    Command::Exit => LoopState::Exiting,
                    Command::Invalid(input) => {
                        info!("Invalid menu option {:?}", input);
                        writeln!(self.output, "Invalid option. Please try again.")?;
                        self.cool_down()?;
                        LoopState::Refreshing
                    }
                },
                LoopState::Terminating => {
                    if !self.terminate()? {
                        return Ok(());
                    }
                    self.cool_down()?;
                    LoopState::Refreshing
                }
                LoopState::Exiting => return Ok(()),
            };
        }
    }

    /// Number of completed refreshes
    #[cfg(test)]
    pub(crate) fn cycles(&self) -> usize {
        self.cycles
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.output
    }

    fn refresh(&mut self) -> io::Result<()> {
        // Collection failures must land after the clear, above the table
        if self.clear_screen {
            write!(self.output, "{}", CLEAR_SCREEN)?;
            self.output.flush()?;
        }
        let index = SnapshotCollector::new(self.source).collect();
        write!(self.output, "{}", render_table(&index))?;
        self.cycles += 1;
        Ok(())
    }

    fn read_command(&mut self) -> io::Result<Command> {
        write!(self.output, "\n{}", MENU_PROMPT)?;
        Ok(match self.read_line()? {
            Some(line) => Command::parse(&line),
            None => Command::Exit,
        })
    }

    /// Returns `false` when input ended at the PID prompt.
    fn terminate(&mut self) -> io::Result<bool> {
        write!(self.output, "{}", PID_PROMPT)?;
        let Some(line) = self.read_line()? else {
            return Ok(false);
        };

        let pid = match line.trim().parse::<u32>() {
            Ok(pid) => pid,
            Err(_) => {
                writeln!(self.output, "Invalid PID: {}", line.trim())?;
                return Ok(true);
            }
        };

        match self.source.terminate(pid) {
            Ok(()) => {
                info!("Terminated process {}", pid);
                writeln!(self.output, "Process with PID {} terminated successfully.", pid)?;
            }
            Err(e) => {
                warn!("Failed to terminate process {}: {}", pid, e);
                writeln!(self.output, "Error terminating process with PID {}: {}", pid, e)?;
            }
        }
        Ok(true)
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn cool_down(&mut self) -> io::Result<()> {
        self.output.flush()?;
        if !self.cooldown.is_zero() {
            std::thread::sleep(self.cooldown);
        }
        Ok(())
    }
}
