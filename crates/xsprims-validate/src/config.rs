/// Controls how strictly validation is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationConfig {
    /// When true, a permission token must be exactly `<mode><digits>`.
    /// When false (the default), trailing characters after a valid prefix
    /// are tolerated, matching what existing clients accept.
    pub strict_perms: bool,
}
