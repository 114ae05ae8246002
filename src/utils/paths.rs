//! Path normalization

/// Use forward slashes so glob matching and ordering behave the same on every platform.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}
