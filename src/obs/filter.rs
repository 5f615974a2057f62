// src/obs/filter.rs

//! Architecture matching for published binaries
//!
//! A package built for `x86_64` publishes its own `.x86_64.rpm` files next to
//! source rpms, debug info for other targets and build logs. Only files that
//! install on the package's architecture are kept: arch-specific and
//! architecture-independent `.deb` and `.rpm` files.

/// Filename predicate for one target architecture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchFilter {
    suffixes: [String; 4],
}

impl ArchFilter {
    pub fn new(arch: &str) -> Self {
        let suffixes = [
            "_all.deb".to_string(),
            format!("_{arch}.deb"),
            ".noarch.rpm".to_string(),
            format!(".{arch}.rpm"),
        ];
        Self { suffixes }
    }

    /// True if `filename` ends with one of the accepted suffixes (case-sensitive)
    pub fn matches(&self, filename: &str) -> bool {
        self.suffixes.iter().any(|suffix| filename.ends_with(suffix.as_str()))
    }
}
