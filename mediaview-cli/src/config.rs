use std::env;
use std::path::PathBuf;

const DEFAULT_LIBRARY_DIR: &str = "~/Videos";

pub const LIBRARY_ENV: &str = "MEDIAVIEW_LIBRARY";
pub const LOG_ENV: &str = "MEDIAVIEW_LOG";

/// Library root from `MEDIAVIEW_LIBRARY`, falling back to `~/Videos`.
pub fn get_library_dir() -> PathBuf {
    let library_dir = env::var(LIBRARY_ENV).unwrap_or(DEFAULT_LIBRARY_DIR.to_string());
    expand_home(&library_dir)
}

pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if rest.is_empty() || rest.starts_with('/') {
            if let Some(home_dir) = dirs::home_dir() {
                return home_dir.join(rest.trim_start_matches('/'));
            }
        }
    }

    path.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_home("~/Videos"), home.join("Videos"));
        assert_eq!(expand_home("~"), home);
        assert_eq!(expand_home("/srv/media"), PathBuf::from("/srv/media"));
        assert_eq!(expand_home("~other/media"), PathBuf::from("~other/media"));
    }
}
