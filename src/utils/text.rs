/// Limits the number of consecutive newlines in a message to 2, so a message never contains more
/// than one blank line in a row. Any other whitespace is kept as is.
pub fn remove_extra_newlines(message: &str) -> String {
    let mut result = String::with_capacity(message.len());
    let mut newlines = 0usize;
    for c in message.chars() {
        if c == '\n' {
            newlines += 1;
            if newlines > 2 {
                continue;
            }
        } else {
            newlines = 0;
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::remove_extra_newlines;

    const SAMPLES: [&str; 9] = [
        "",
        "\n",
        "\n\n\n",
        "a\n\n\n\nb",
        "a\nb\n\nc",
        "  padded\n\n\n\n\n  ",
        "\n\n\n\nleading",
        "trailing\n\n\n\n\n\n",
        "one\n\n\ntwo\n\n\n\nthree\r\n\r\n\r\n",
    ];

    #[test]
    fn test_collapses_blank_lines() {
        assert_eq!(remove_extra_newlines("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(remove_extra_newlines("a\n\n\nb\n\n\n\n\nc"), "a\n\nb\n\nc");
        assert_eq!(remove_extra_newlines("\n\n\n"), "\n\n");
    }

    #[test]
    fn test_keeps_single_blank_lines() {
        assert_eq!(remove_extra_newlines("a\nb\n\nc"), "a\nb\n\nc");
        assert_eq!(remove_extra_newlines("no newlines"), "no newlines");
    }

    #[test]
    fn test_does_not_trim() {
        assert_eq!(remove_extra_newlines("  padded\n\n\n\n\n  "), "  padded\n\n  ");
        assert_eq!(remove_extra_newlines("trailing\n\n\n"), "trailing\n\n");
    }

    #[test]
    fn test_idempotent() {
        for sample in SAMPLES {
            let once = remove_extra_newlines(sample);
            assert_eq!(remove_extra_newlines(&once), once, "sample {sample:?}");
            assert!(!once.contains("\n\n\n"), "sample {sample:?}");
        }
    }
}
