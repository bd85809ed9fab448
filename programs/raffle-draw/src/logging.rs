use std::{
    io::{self, Write},
    sync::Mutex,
};

use anchor_lang::solana_program::program_stubs::{set_syscall_stubs, SyscallStubs};

/// Logs a formatted line through the installed syscall stubs.
///
/// Off-chain `msg!` prints straight to stdout; this goes through
/// `sol_log` so a [`LogSink`] decides where the line ends up.
#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logging::sol_log(&format!($($arg)*))
    };
}

pub fn sol_log(message: &str) {
    anchor_lang::solana_program::program_stubs::sol_log(message);
}

/// Syscall stubs that write program logs and event data to `W`.
pub struct LogSink<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> LogSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn write_line(&self, line: &str) {
        if let Ok(mut out) = self.out.lock() {
            // A closed log stream must not take the draw down with it
            let _ = writeln!(out, "{line}");
        }
    }
}

impl<W: Write + Send> SyscallStubs for LogSink<W> {
    fn sol_log(&self, message: &str) {
        self.write_line(&format!("Program log: {message}"));
    }

    fn sol_log_data(&self, fields: &[&[u8]]) {
        let fields: Vec<String> = fields
            .iter()
            .map(|field| field.iter().map(|byte| format!("{byte:02x}")).collect())
            .collect();
        self.write_line(&format!("Program data: {}", fields.join(" ")));
    }
}

/// Installs a [`LogSink`] over `out` for the whole process.
pub fn route_logs_to<W: Write + Send + 'static>(out: W) {
    set_syscall_stubs(Box::new(LogSink::new(out)));
}

/// Sends program logs and events to stderr, keeping stdout for the menu.
pub fn route_logs_to_stderr() {
    route_logs_to(io::stderr());
}
