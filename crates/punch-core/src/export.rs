//! Spreadsheet export of attendance rows.
//!
//! Pure, synchronous transform of the currently loaded page with no
//! network involved, so the file reflects exactly what the table shows,
//! in its order. The CSV and Excel flavours share one quoted-CSV body and
//! differ only in the file they land in.

use crate::api::types::AttendanceSession;

/// Column order of the exported sheet, matching the admin table.
pub const ATTENDANCE_COLUMNS: [&str; 6] = [
    "Session ID",
    "User ID",
    "Date",
    "Check In",
    "Check Out",
    "Duration",
];

/// Export flavour; same bytes, different target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    /// Pseudo-Excel: CSV bytes with an `.xls` name, which Excel opens
    /// happily.
    Excel,
}

impl ExportFormat {
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Csv => "admin_attendance.csv",
            Self::Excel => "admin_attendance.xls",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "excel" | "xls" => Ok(Self::Excel),
            other => Err(format!("unknown export format '{other}'")),
        }
    }
}

/// Render the loaded sessions as quoted CSV, header first.
pub fn attendance_sheet(sessions: &[AttendanceSession]) -> String {
    let header = ATTENDANCE_COLUMNS
        .iter()
        .map(|c| quote(c))
        .collect::<Vec<_>>()
        .join(",");

    let mut lines = vec![header];
    for s in sessions {
        let row = [
            s.id.to_string(),
            s.user_id.to_string(),
            s.date.clone(),
            s.check_in.clone(),
            s.check_out.clone().unwrap_or_default(),
            s.duration.clone().unwrap_or_default(),
        ];
        lines.push(row.iter().map(|f| quote(f)).collect::<Vec<_>>().join(","));
    }
    lines.join("\n")
}

/// Double-quote a field, doubling any embedded quotes.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn session(id: u64, check_out: Option<&str>, duration: Option<&str>) -> AttendanceSession {
        AttendanceSession {
            id,
            user_id: 4,
            date: "2025-10-14".into(),
            check_in: "09:01 AM".into(),
            check_out: check_out.map(Into::into),
            duration: duration.map(Into::into),
        }
    }

    #[test]
    fn two_rows_export_as_header_plus_two_lines() {
        let sheet = attendance_sheet(&[
            session(11, Some("05:35 PM"), Some("8h 34m")),
            session(12, None, None),
        ]);
        let lines: Vec<&str> = sheet.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "\"Session ID\",\"User ID\",\"Date\",\"Check In\",\"Check Out\",\"Duration\""
        );
        assert_eq!(
            lines[1],
            "\"11\",\"4\",\"2025-10-14\",\"09:01 AM\",\"05:35 PM\",\"8h 34m\""
        );
        // Open session: empty quoted fields, in the same order.
        assert_eq!(lines[2], "\"12\",\"4\",\"2025-10-14\",\"09:01 AM\",\"\",\"\"");
    }

    #[test]
    fn empty_page_exports_header_only() {
        let sheet = attendance_sheet(&[]);
        assert_eq!(sheet.lines().count(), 1);
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let mut s = session(1, None, None);
        s.date = "Oct \"14\"".into();
        let sheet = attendance_sheet(&[s]);
        assert!(sheet.contains("\"Oct \"\"14\"\"\""));
    }

    #[test]
    fn format_parses_and_names_files() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("Excel".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
        assert_eq!("xls".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
        assert!("pdf".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Csv.file_name(), "admin_attendance.csv");
        assert_eq!(ExportFormat::Excel.file_name(), "admin_attendance.xls");
    }
}
