use clap::{Parser, Subcommand};
use cupid::calendar;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cupid", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Export the invite as an iCalendar file
    Ics {
        /// Directory to write the file into
        #[arg(short = 'o', long, default_value = ".")]
        output: PathBuf,

        /// Print the payload instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },
    /// Print the Google Calendar link for the invite
    Link,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Ics { stdout: true, .. }) => {
            let mut out = std::io::stdout().lock();
            print_ics(&mut out)?;
            out.flush()?;
            Ok(())
        }
        Some(Commands::Ics { output, .. }) => export_ics(output),
        Some(Commands::Link) => {
            println!("{}", calendar::google_calendar_url());
            Ok(())
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

fn export_ics(dir: PathBuf) -> anyhow::Result<()> {
    if dir.is_file() {
        anyhow::bail!("'{}' is a file, expected a directory", dir.display());
    }

    let path = calendar::write_ics(&dir)?;
    log::info!("Wrote {} ({})", path.display(), calendar::ICS_MIME_TYPE);
    println!("{}", path.display());
    Ok(())
}

/// Writes the payload byte for byte, without a trailing newline.
fn print_ics(out: &mut impl Write) -> std::io::Result<()> {
    out.write_all(calendar::ics_payload().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printed_ics_matches_payload() {
        let mut out = Vec::new();
        print_ics(&mut out).unwrap();
        assert_eq!(out, calendar::ics_payload().as_bytes());
        assert!(!out.ends_with(b"\n"));
    }

    #[test]
    fn test_stdout_conflicts_with_output() {
        let err = Cli::try_parse_from(["cupid", "ics", "--stdout", "-o", "/tmp"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);

        let cli = Cli::try_parse_from(["cupid", "ics", "--stdout"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Ics { stdout: true, .. })));
    }
}
