use crate::changelog::order::version_order;
use crate::domain::{ChangeData, ReleaseKey, SectionKind, DEFAULT_VERSION};
use crate::git::RepoIdentity;

/// Host assumed for compare links when none is configured.
pub const DEFAULT_HOST: &str = "github.com";

/// Fixed first line of every rendered changelog.
pub const TITLE: &str = "# Change Log";

/// Turns a [`ChangeData`] back into canonical Keep-a-Changelog text.
///
/// The footer compare links need the repository location, so a renderer is
/// bound to one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    base_url: String,
}

impl Renderer {
    /// Renderer for `https://<host>/<owner>/<name>`
    pub fn new(identity: &RepoIdentity, host: &str) -> Self {
        Renderer {
            base_url: format!("https://{}/{}/{}", host, identity.owner, identity.name),
        }
    }

    /// Renderer for a github.com repository
    pub fn github(identity: &RepoIdentity) -> Self {
        Renderer::new(identity, DEFAULT_HOST)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Render to a single string, newline-terminated
    pub fn render(&self, data: &ChangeData) -> String {
        let mut text = self.render_lines(data).join("\n");
        text.push('\n');
        text
    }

    /// Render to individual lines (no line endings)
    pub fn render_lines(&self, data: &ChangeData) -> Vec<String> {
        let mut out = Vec::new();

        out.push(TITLE.to_string());
        out.extend(data.header.iter().cloned());
        out.push(String::new());
        out.push(String::new());

        let keys = version_order(data.releases.keys());

        for key in &keys {
            let Some(release) = data.releases.get(key) else {
                continue;
            };

            let heading = match (&release.date, key) {
                (Some(date), ReleaseKey::Version(_)) => format!("## [{}] - {}", key, date),
                _ => format!("## [{}]", key),
            };
            out.push(heading);

            for kind in SectionKind::ALL {
                let Some(lines) = release.sections.get(&kind) else {
                    continue;
                };
                // Unreleased keeps empty headings as a prompt for new entries
                if lines.is_empty() && !key.is_unreleased() {
                    continue;
                }
                out.push(format!("### {}", kind.display_name()));
                out.extend(lines.iter().cloned());
                out.push(String::new());
            }
            out.push(String::new());
        }

        for (i, key) in keys.iter().enumerate() {
            let current = match key {
                ReleaseKey::Unreleased => "HEAD".to_string(),
                ReleaseKey::Version(v) => format!("v{}", v),
            };
            let previous = keys
                .get(i + 1)
                .map_or_else(|| DEFAULT_VERSION.to_string(), ToString::to_string);
            out.push(format!(
                "[{}]: {}/compare/v{}...{}",
                key, self.base_url, previous, current
            ));
        }

        out
    }
}
