//! Example scripts compiled into the binary.
//!
//! Installed when no external example directory is configured.

pub const BUNDLED_EXAMPLES: &[(&str, &str)] = &[
    (
        "show-selection.sh",
        include_str!("../../example-scripts/show-selection.sh"),
    ),
    (
        "copy-to-other-pane.sh",
        include_str!("../../example-scripts/copy-to-other-pane.sh"),
    ),
    (
        "disk-usage.sh",
        include_str!("../../example-scripts/disk-usage.sh"),
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_examples_have_shebang() {
        assert!(!BUNDLED_EXAMPLES.is_empty());
        for (name, contents) in BUNDLED_EXAMPLES {
            assert!(contents.starts_with("#!"), "{} lacks a shebang", name);
        }
    }
}
