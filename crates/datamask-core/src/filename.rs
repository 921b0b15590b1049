/// Prefix prepended to the file name of a masked output.
pub const MASKED_PREFIX: &str = "masked_";

/// Reduce a user-supplied file name to a safe, flat file name.
///
/// Only ASCII alphanumerics, `.`, `-` and `_` survive; whitespace and path
/// separators become `_`. Leading dots and underscores are stripped so the
/// result can never name a hidden file or climb out of a directory.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let mut sanitized = String::with_capacity(base.len());
    for ch in base.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
            sanitized.push(ch);
        } else if ch.is_whitespace() {
            sanitized.push('_');
        }
    }

    let sanitized = sanitized.trim_start_matches(['.', '_']);
    if sanitized.is_empty() {
        "file".to_string()
    } else {
        sanitized.to_string()
    }
}

/// Output file name for the masked copy of `name`.
pub fn masked_file_name(name: &str) -> String {
    format!("{MASKED_PREFIX}{}", sanitize_filename(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_directories_and_unsafe_characters() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\data\\staff list.csv"), "staff_list.csv");
        assert_eq!(sanitize_filename("répertoire.csv"), "rpertoire.csv");
    }

    #[test]
    fn never_returns_hidden_or_empty_names() {
        assert_eq!(sanitize_filename(".env"), "env");
        assert_eq!(sanitize_filename("..."), "file");
        assert_eq!(sanitize_filename(""), "file");
    }

    #[test]
    fn masked_name_is_prefixed() {
        assert_eq!(masked_file_name("employees 2024.csv"), "masked_employees_2024.csv");
    }
}
