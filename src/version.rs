//! Version ordering for milestone titles.
//!
//! Milestone titles are free text that usually, but not always, hold a
//! semantic version. Titles are parsed leniently ("v1.2", "1.2.3-beta.1",
//! "2") and anything unparsable sorts below every parsed version.
use regex::Regex;
use semver::Version;
use std::{fmt, sync::LazyLock};

static LENIENT_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[vV]?(?<major>\d+)(?:\.(?<minor>\d+))?(?:\.(?<patch>\d+))?(?<rest>[-+].*)?$",
    )
    .expect("valid version regex")
});

/// Comparable version parsed from a milestone title. `None` represents an
/// unparsable title and orders lowest.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MilestoneVersion(Option<Version>);

impl MilestoneVersion {
    pub fn parse(title: &str) -> Self {
        let title = title.trim();

        let Some(caps) = LENIENT_VERSION.captures(title) else {
            return Self(None);
        };

        let part = |name: &str| caps.name(name).map_or("0", |m| m.as_str());
        let rest = caps.name("rest").map_or("", |m| m.as_str());

        let normalized = format!(
            "{}.{}.{}{rest}",
            part("major"),
            part("minor"),
            part("patch")
        );

        Self(Version::parse(&normalized).ok())
    }

    pub fn semver(&self) -> Option<&Version> {
        self.0.as_ref()
    }
}

impl fmt::Display for MilestoneVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(v) => write!(f, "{v}"),
            None => write!(f, "<unversioned>"),
        }
    }
}
