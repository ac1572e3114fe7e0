use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// UploadSet – files queued for the next classification run
// ---------------------------------------------------------------------------

/// Maximum number of files sent in one classification request.
pub const MAX_UPLOAD_FILES: usize = 10;

/// Extensions offered by the browse dialog.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "csv"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSet {
    files: Vec<PathBuf>,
}

impl UploadSet {
    /// Append dropped files, keeping only the first [`MAX_UPLOAD_FILES`].
    pub fn add_dropped(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        self.files.extend(paths);
        self.files.truncate(MAX_UPLOAD_FILES);
    }

    /// Replace the whole set with the files picked in the browse dialog.
    pub fn replace_browsed(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        self.files = paths.into_iter().take(MAX_UPLOAD_FILES).collect();
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Comma-separated file names for the "Selected:" line.
    pub fn names(&self) -> String {
        self.files
            .iter()
            .map(|p| display_name(p))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// File name without directories, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// MIME type announced for an uploaded file, chosen by extension.
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xls" => "application/vnd.ms-excel",
        "csv" => "text/csv",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(n: usize) -> Vec<PathBuf> {
        (0..n).map(|i| PathBuf::from(format!("/exports/atc_{i}.xlsx"))).collect()
    }

    #[test]
    fn dropping_twelve_files_keeps_the_first_ten() {
        let mut set = UploadSet::default();
        let dropped = paths(12);
        set.add_dropped(dropped.clone());
        assert_eq!(set.len(), MAX_UPLOAD_FILES);
        assert_eq!(set.files(), &dropped[..10]);
    }

    #[test]
    fn drops_accumulate_up_to_the_cap() {
        let mut set = UploadSet::default();
        set.add_dropped(paths(6));
        set.add_dropped(vec![PathBuf::from("/tmp/late.csv"); 6]);
        assert_eq!(set.len(), 10);
        assert_eq!(set.files()[5], PathBuf::from("/exports/atc_5.xlsx"));
        assert_eq!(set.files()[9], PathBuf::from("/tmp/late.csv"));
    }

    #[test]
    fn browsing_replaces_previous_selection() {
        let mut set = UploadSet::default();
        set.add_dropped(paths(4));
        set.replace_browsed(vec![PathBuf::from("/data/run.csv")]);
        assert_eq!(set.names(), "run.csv");
    }

    #[test]
    fn names_lists_file_names_only() {
        let mut set = UploadSet::default();
        set.add_dropped(paths(2));
        assert_eq!(set.names(), "atc_0.xlsx, atc_1.xlsx");
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn mime_follows_extension() {
        assert_eq!(mime_for(Path::new("a.CSV")), "text/csv");
        assert_eq!(mime_for(Path::new("a.xls")), "application/vnd.ms-excel");
        assert_eq!(mime_for(Path::new("a")), "application/octet-stream");
    }
}
