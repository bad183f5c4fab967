//! Directory normalization shared by every renderer.

const SEPARATOR: &str = "/";

/// Strip exactly one trailing separator unless the path is the root itself.
///
/// A missing path normalizes to the empty string.
pub fn normalize_dir(path: Option<&str>) -> String {
    match path {
        None => String::new(),
        Some(SEPARATOR) => SEPARATOR.to_string(),
        Some(p) => p.strip_suffix(SEPARATOR).unwrap_or(p).to_string(),
    }
}

/// Separator to place between a directory and a file name.
///
/// Empty for the root (and for a missing directory) so that
/// `dir + divider + "etcd"` never doubles the separator.
pub fn divider_for(path: Option<&str>) -> &'static str {
    match path {
        None | Some(SEPARATOR) => "",
        Some(_) => SEPARATOR,
    }
}

/// Full path of `binary` inside `dir`.
pub fn exec_path(dir: &str, binary: &str) -> String {
    let dir = normalize_dir(Some(dir));
    format!("{}{}{}", dir, divider_for(Some(&dir)), binary)
}

/// True when the normalized directory is the filesystem root.
pub fn is_root(dir: &str) -> bool {
    normalize_dir(Some(dir)) == SEPARATOR
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_one_trailing_separator() {
        assert_eq!(normalize_dir(Some("/foo/")), "/foo");
        assert_eq!(normalize_dir(Some("/foo")), "/foo");
        assert_eq!(normalize_dir(Some("/a//")), "/a/");
    }

    #[test]
    fn root_and_missing_paths() {
        assert_eq!(normalize_dir(Some("/")), "/");
        assert_eq!(normalize_dir(None), "");
        assert_eq!(normalize_dir(Some("")), "");
    }

    #[test]
    fn divider_is_empty_for_root_and_missing() {
        assert_eq!(divider_for(Some("/")), "");
        assert_eq!(divider_for(None), "");
        assert_eq!(divider_for(Some("/usr/local/bin")), "/");
    }

    #[test]
    fn exec_path_never_doubles_separator() {
        assert_eq!(exec_path("/", "etcd"), "/etcd");
        assert_eq!(exec_path("/usr/local/bin/", "etcd"), "/usr/local/bin/etcd");
        assert_eq!(exec_path("/tmp/test-etcd", "etcdctl"), "/tmp/test-etcd/etcdctl");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(path in "(/[a-z0-9_.-]{1,8}){0,4}/?") {
            let once = normalize_dir(Some(&path));
            prop_assert_eq!(normalize_dir(Some(&once)), once);
        }

        #[test]
        fn exec_path_has_no_double_separator(path in "(/[a-z0-9]{1,8}){0,4}/?") {
            prop_assert!(!exec_path(&path, "etcd").contains("//"));
        }
    }
}
