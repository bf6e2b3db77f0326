//! Calendar exports for the Valentine's Day invite.
//!
//! Both exports are fixed: the same all-day event on 2026-02-14, with no
//! timestamps or generated identifiers.

use fs_err as fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const EVENT_TITLE: &str = "Valentine's Day";
pub const EVENT_DETAILS: &str = "A very special entire day with the love of my life";
pub const EVENT_LOCATION: &str = "";
pub const START_DATE: &str = "20260214";
pub const END_DATE: &str = "20260215";

pub const ICS_FILE_NAME: &str = "valentines-date.ics";
pub const ICS_MIME_TYPE: &str = "text/calendar;charset=utf-8";

const GOOGLE_CALENDAR_BASE: &str = "https://calendar.google.com/calendar/render";

const ICS_PAYLOAD: &str = "BEGIN:VCALENDAR
VERSION:2.0
PRODID:-//Valentine's Invite//EN
BEGIN:VEVENT
DTSTART;VALUE=DATE:20260214
DTEND;VALUE=DATE:20260215
SUMMARY:Valentine's Day Date 💕
DESCRIPTION:Our special Valentine's Day together!
END:VEVENT
END:VCALENDAR";

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Link that opens Google Calendar's "new event" page prefilled with the invite.
pub fn google_calendar_url() -> String {
    format!(
        "{}?action=TEMPLATE&text={}&dates={}/{}&details={}&location={}",
        GOOGLE_CALENDAR_BASE,
        urlencoding::encode(EVENT_TITLE),
        START_DATE,
        END_DATE,
        urlencoding::encode(EVENT_DETAILS),
        urlencoding::encode(EVENT_LOCATION),
    )
}

pub fn ics_payload() -> &'static str {
    ICS_PAYLOAD
}

/// Writes the invite into `dir` as [`ICS_FILE_NAME`], replacing any previous copy.
pub fn write_ics(dir: &Path) -> Result<PathBuf, CalendarError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(ICS_FILE_NAME);
    fs::write(&path, ICS_PAYLOAD)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_calendar_url() {
        assert_eq!(
            google_calendar_url(),
            "https://calendar.google.com/calendar/render?action=TEMPLATE\
             &text=Valentine%27s%20Day&dates=20260214/20260215\
             &details=A%20very%20special%20entire%20day%20with%20the%20love%20of%20my%20life\
             &location="
        );
    }

    #[test]
    fn test_ics_payload_is_stable() {
        assert_eq!(ics_payload(), ics_payload());
        assert!(ics_payload().starts_with("BEGIN:VCALENDAR\nVERSION:2.0\n"));
        assert!(ics_payload().ends_with("END:VEVENT\nEND:VCALENDAR"));
        assert!(ics_payload().contains("\nDTSTART;VALUE=DATE:20260214\n"));
        assert!(ics_payload().contains("\nSUMMARY:Valentine's Day Date 💕\n"));
        assert_eq!(ics_payload().lines().count(), 10);
        assert!(!ics_payload().contains('\r'));
    }

    #[test]
    fn test_write_ics_overwrites() {
        let dir = std::env::temp_dir().join(format!("cupid-ics-{}", std::process::id()));
        let first = write_ics(&dir).unwrap();
        let second = write_ics(&dir).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.file_name().unwrap(), ICS_FILE_NAME);
        assert_eq!(std::fs::read(&second).unwrap(), ics_payload().as_bytes());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
