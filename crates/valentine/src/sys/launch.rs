use std::process::{Command, Stdio};

/// Opens `target` (a URL or a path) with the desktop's default handler.
pub fn open(target: &str) -> std::io::Result<()> {
    Command::new("xdg-open")
        .arg(target)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(())
}
