//! Interactive checking session with in-memory history.

use std::io::{self, BufRead, Write};

use sitecheck_core::{Session, ThreatLookup};

use crate::commands::common::{
    format_check_line, format_history_lines, format_invalid_line, open_session,
};
use crate::error::CliError;

const PROMPT: &str = "sitecheck> ";
const HELP: &str = "Masukkan URL untuk diperiksa (https:// dipakai bila tidak ada skema).\n\
Perintah: :history  daftar pemeriksaan sesi ini\n          \
:clear    hapus riwayat\n          \
:help     tampilkan bantuan ini\n          \
:quit     keluar";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellInput<'a> {
    Blank,
    Url(&'a str),
    History,
    Clear,
    Help,
    Quit,
    Unknown(&'a str),
}

pub fn parse_shell_input(line: &str) -> ShellInput<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ShellInput::Blank;
    }
    let Some(command) = trimmed.strip_prefix(':') else {
        return ShellInput::Url(trimmed);
    };
    match command.trim().to_ascii_lowercase().as_str() {
        "history" | "h" => ShellInput::History,
        "clear" | "c" => ShellInput::Clear,
        "help" | "?" => ShellInput::Help,
        "quit" | "q" | "exit" => ShellInput::Quit,
        _ => ShellInput::Unknown(trimmed),
    }
}

pub async fn run_shell(timeout_secs: Option<u64>) -> Result<(), CliError> {
    let session = open_session(timeout_secs)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_shell_with(session, stdin.lock(), stdout.lock()).await?;
    Ok(())
}

/// Drives a session from `input` until `:quit` or end of input.
///
/// Returns the session so callers can inspect its history.
pub async fn run_shell_with<L, R, W>(
    mut session: Session<L>,
    input: R,
    mut output: W,
) -> Result<Session<L>, CliError>
where
    L: ThreatLookup,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{HELP}")?;
    let mut lines = input.lines();

    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line?;

        match parse_shell_input(&line) {
            ShellInput::Blank => {}
            ShellInput::Url(raw) => match session.check(raw).await {
                Ok(entry) => writeln!(output, "{}", format_check_line(entry))?,
                Err(error) => writeln!(output, "{}", format_invalid_line(raw, &error))?,
            },
            ShellInput::History => {
                if session.history().is_empty() {
                    writeln!(output, "Belum ada pemeriksaan.")?;
                }
                for line in format_history_lines(session.history()) {
                    writeln!(output, "{line}")?;
                }
            }
            ShellInput::Clear => {
                session.clear_history();
                writeln!(output, "Riwayat dihapus.")?;
            }
            ShellInput::Help => writeln!(output, "{HELP}")?,
            ShellInput::Quit => break,
            ShellInput::Unknown(command) => {
                writeln!(output, "Perintah {command} tidak dikenal; ketik :help")?;
            }
        }
    }

    Ok(session)
}
