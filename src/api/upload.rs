//! CSV files handed to the backend as multipart uploads

use super::MultipartForm;
use crate::error::{DeskError, DeskResult};
use std::path::Path;
use tokio::fs;

/// A CSV file that passed the local checks
pub(crate) struct CsvUpload {
    pub form: MultipartForm,
    /// Non-empty data rows below the header
    pub rows: usize,
    pub bytes: usize,
}

/// Read a CSV file, check its header and wrap it as the `file` form field.
///
/// The backend rejects files without the required columns only after the
/// upload; checking here saves the round trip.
pub(crate) async fn load_csv(
    path: &Path,
    required: &[&str],
    fallback_name: &str,
) -> DeskResult<CsvUpload> {
    if !path.exists() {
        return Err(DeskError::PathNotFound(path.to_path_buf()));
    }

    let data = fs::read(path)
        .await
        .map_err(|e| DeskError::io(format!("reading {}", path.display()), e))?;

    let rows = check_csv(&data, required).map_err(|reason| DeskError::CsvInvalid {
        path: path.to_path_buf(),
        reason,
    })?;

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(fallback_name);
    let bytes = data.len();
    let form = MultipartForm::new().file("file", filename, "text/csv", data);

    Ok(CsvUpload { form, rows, bytes })
}

/// Check that a CSV has the `required` columns and at least one data row.
///
/// Header matching is case-insensitive. Returns the number of non-empty data rows.
pub fn check_csv(data: &[u8], required: &[&str]) -> Result<usize, String> {
    let text = std::str::from_utf8(data).map_err(|_| "file is not valid UTF-8".to_string())?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let header = lines.next().ok_or_else(|| "the CSV file is empty".to_string())?;

    let columns: Vec<String> = header
        .split(',')
        .map(|c| c.trim().trim_matches('"').to_lowercase())
        .collect();
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|wanted| !columns.iter().any(|c| c == wanted))
        .collect();
    if !missing.is_empty() {
        return Err(format!("missing required columns: {}", missing.join(", ")));
    }

    match lines.count() {
        0 => Err("no data rows after the header".to_string()),
        rows => Ok(rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ACCOUNT: [&str; 2] = ["username", "password"];

    #[test]
    fn accepts_mixed_case_header() {
        let rows = check_csv(b"Username,PASSWORD\nalice,pw1\n\nbob,pw2\n", &ACCOUNT).unwrap();
        assert_eq!(rows, 2);
    }

    #[test]
    fn reports_missing_columns() {
        let err = check_csv(b"username,name\nalice,Alice\n", &ACCOUNT).unwrap_err();
        assert_eq!(err, "missing required columns: password");
    }

    #[test]
    fn rejects_empty_and_header_only() {
        assert_eq!(check_csv(b"", &ACCOUNT).unwrap_err(), "the CSV file is empty");
        assert_eq!(
            check_csv(b"username,password\n", &ACCOUNT).unwrap_err(),
            "no data rows after the header"
        );
    }

    #[test]
    fn strips_byte_order_mark_and_quotes() {
        let data = "\u{feff}\"username\",\"name\"\nana,Ana\n";
        assert_eq!(check_csv(data.as_bytes(), &["username", "name"]).unwrap(), 1);
    }

    #[tokio::test]
    async fn load_reports_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load_csv(&temp.path().join("nope.csv"), &ACCOUNT, "accounts.csv")
            .await
            .err()
            .unwrap();
        assert!(matches!(err, DeskError::PathNotFound(_)));
    }
}
