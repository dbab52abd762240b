use std::path::{Path, PathBuf};

pub fn extract_base_name(path: &str) -> &str {
    Path::new(path)
        .file_stem() // Get the base name component of the path
        .and_then(|name| name.to_str())
        .unwrap_or("swatch")
}

/// Builds (and creates) `out/<project>/<params base name>[/<datetime>]`.
pub fn build_output_path_with_date_time(
    params_path: &str,
    project: &str,
    datetime: &Option<String>,
) -> std::io::Result<PathBuf> {
    let mut dirs = vec!["out", project, extract_base_name(params_path)];
    if let Some(inner_datetime_str) = datetime {
        dirs.push(inner_datetime_str);
    }

    let directory_path: PathBuf = dirs.iter().collect();
    std::fs::create_dir_all(&directory_path)?;
    Ok(directory_path)
}

pub fn date_time_string() -> String {
    use chrono::{Datelike, Local, Timelike};
    let local_time = Local::now();
    format!(
        "{:04}{:02}{:02}_{:02}{:02}{:02}",
        local_time.year(),
        local_time.month(),
        local_time.day(),
        local_time.hour(),
        local_time.minute(),
        local_time.second()
    )
}

pub fn maybe_date_time_string(enable: bool) -> Option<String> {
    if enable {
        Some(date_time_string())
    } else {
        None
    }
}

/**
 * Store a path and prefix together, making it easily to quickly generate
 * a collection of files with the same prefix, but separate suffixes.
 */
#[derive(Debug, Clone)]
pub struct FilePrefix {
    pub directory_path: PathBuf,
    pub file_base: String,
}

impl FilePrefix {
    pub fn with_suffix(&self, suffix: &str) -> PathBuf {
        self.directory_path.join(self.file_base.clone() + suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_base_name() {
        assert_eq!(extract_base_name("demos/rainbow/params.json"), "params");
        assert_eq!(extract_base_name("swatch.json"), "swatch");
        assert_eq!(extract_base_name(""), "swatch");
    }

    #[test]
    fn test_date_time_string_format() {
        let text = date_time_string();
        assert_eq!(text.len(), 15);
        assert_eq!(&text[8..9], "_");
        assert!(text
            .chars()
            .enumerate()
            .all(|(i, c)| i == 8 || c.is_ascii_digit()));
        assert!(maybe_date_time_string(false).is_none());
    }

    #[test]
    fn test_file_prefix_with_suffix() {
        let prefix = FilePrefix {
            directory_path: ["out", "swatch"].iter().collect(),
            file_base: String::from("rainbow"),
        };
        let expected: PathBuf = ["out", "swatch", "rainbow.png"].iter().collect();
        assert_eq!(prefix.with_suffix(".png"), expected);
    }
}
