use std::fmt;

/// One of the six Keep-a-Changelog subsections of a release.
///
/// Variant order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionKind {
    Added,
    Changed,
    Deprecated,
    Removed,
    Fixed,
    Security,
}

impl SectionKind {
    /// All kinds in canonical display order
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Added,
        SectionKind::Changed,
        SectionKind::Deprecated,
        SectionKind::Removed,
        SectionKind::Fixed,
        SectionKind::Security,
    ];

    /// Heading text used after `### `
    pub fn display_name(self) -> &'static str {
        match self {
            SectionKind::Added => "Added",
            SectionKind::Changed => "Changed",
            SectionKind::Deprecated => "Deprecated",
            SectionKind::Removed => "Removed",
            SectionKind::Fixed => "Fixed",
            SectionKind::Security => "Security",
        }
    }

    /// Look up a kind by its exact heading text
    pub fn from_display_name(name: &str) -> Option<Self> {
        SectionKind::ALL
            .into_iter()
            .find(|kind| kind.display_name() == name)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
