//! Runtime configuration: parse/write `catalog.conf`.
//!
//! The base URL and page sizes are injected into the app at startup instead
//! of living in a global constant. Values come from the config file, with
//! command-line/environment overrides applied in `main`.

/// Settings loaded at startup and passed through the app.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Backend base URL, without a trailing slash requirement.
    pub base_url: String,
    /// Per-request timeout for the API client.
    pub timeout_secs: u64,
    /// Rows per page on the Books tab.
    pub books_page_size: usize,
    /// Rows per page on the Authors tab.
    pub authors_page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 10,
            books_page_size: 10,
            authors_page_size: 5,
        }
    }
}

impl Config {
    /// Ensure a config file exists; if missing, write the defaults and return
    /// them. If present, load from it; unknown keys are skipped silently.
    pub fn load_or_init(path: &str) -> Self {
        let p = std::path::Path::new(path);
        if p.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let cfg = Self::default();
        let _ = cfg.write_file(path);
        cfg
    }

    /// Load settings from a simple `key = value` file.
    ///
    /// Returns `None` if the file is unreadable. Invalid values fall back to
    /// the default for that key.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut cfg = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let key = parts.next().map(|s| s.trim()).unwrap_or("");
            let val = parts.next().map(|s| s.trim()).unwrap_or("");
            if key.is_empty() || val.is_empty() {
                continue;
            }
            match key {
                "base_url" => cfg.base_url = val.to_string(),
                "timeout_secs" => {
                    if let Ok(v) = val.parse::<u64>() {
                        cfg.timeout_secs = v;
                    }
                }
                "books_page_size" => {
                    if let Ok(v) = val.parse::<usize>()
                        && v > 0
                    {
                        cfg.books_page_size = v;
                    }
                }
                "authors_page_size" => {
                    if let Ok(v) = val.parse::<usize>()
                        && v > 0
                    {
                        cfg.authors_page_size = v;
                    }
                }
                _ => {}
            }
        }
        Some(cfg)
    }

    /// Persist the settings in `key = value` format.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# catalog-admin configuration\n");
        buf.push_str("# base_url: REST backend root (no /api suffix)\n\n");
        let _ = writeln!(&mut buf, "base_url = {}", self.base_url);
        let _ = writeln!(&mut buf, "timeout_secs = {}", self.timeout_secs);
        let _ = writeln!(&mut buf, "books_page_size = {}", self.books_page_size);
        let _ = writeln!(&mut buf, "authors_page_size = {}", self.authors_page_size);
        std::fs::write(path, buf)
    }
}
