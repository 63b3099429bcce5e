//! Filename sanitization for names supplied by the server or the URL.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Makes a candidate filename safe to join onto an output directory.
///
/// - Replaces NUL, `/`, `\`, and control characters with `_`
/// - Limits length to 255 bytes, cutting at a char boundary
///
/// Everything else, including spaces and leading dots, is kept.
pub fn sanitize_file_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if c == '\0' || c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if replaced.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !replaced.is_char_boundary(take) {
            take -= 1;
        }
        replaced[..take].to_string()
    } else {
        replaced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_slash_and_backslash() {
        assert_eq!(sanitize_file_name("a/b\\c.txt"), "a_b_c.txt");
        assert_eq!(sanitize_file_name("../../etc/passwd"), ".._.._etc_passwd");
    }

    #[test]
    fn keeps_ordinary_names() {
        assert_eq!(sanitize_file_name("report.pdf"), "report.pdf");
        assert_eq!(sanitize_file_name("my file (1).zip"), "my file (1).zip");
        assert_eq!(sanitize_file_name(".hidden"), ".hidden");
    }

    #[test]
    fn control_chars() {
        assert_eq!(sanitize_file_name("file\x00name\n.txt"), "file_name_.txt");
    }

    #[test]
    fn truncates_on_char_boundary() {
        let long = "é".repeat(200);
        let out = sanitize_file_name(&long);
        assert!(out.len() <= NAME_MAX);
        assert_eq!(out.chars().count(), 127);
    }
}
