//! Path utilities: expand ~, absolute path checks.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Expand `~` and make relative paths absolute against the working directory.
pub fn absolutize(path: &str) -> std::io::Result<PathBuf> {
    let p = expand_tilde(path);
    if p.is_absolute() {
        Ok(p)
    } else {
        Ok(std::env::current_dir()?.join(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_become_absolute() {
        assert!(absolutize("photo.jpg").unwrap().is_absolute());
        assert_eq!(
            absolutize("/srv/photo.jpg").unwrap(),
            PathBuf::from("/srv/photo.jpg")
        );
    }
}
