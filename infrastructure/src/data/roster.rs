//! Voter roster file
//!
//! ```toml
//! [[voter]]
//! id = 666
//! org = "google"
//! level = "vetter"
//! name = "J. Smith"
//! locales = ["de", "fr"]
//!
//! [[voter]]
//! id = 222
//! org = "Adobe"   # display names work too
//! level = 3       # numeric survey-tool userlevel (expert)
//! name = "A. Aldus"
//! ```

use super::{LoadError, read_file};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;
use vetting_domain::{Level, LocaleId, Organization, VoterId, VoterInfo, VoterRoster};

#[derive(Debug, Deserialize)]
struct FileRoster {
    #[serde(default, rename = "voter")]
    voters: Vec<FileVoter>,
}

#[derive(Debug, Deserialize)]
struct FileVoter {
    id: u32,
    org: String,
    level: FileLevel,
    #[serde(default)]
    name: String,
    #[serde(default)]
    locales: Vec<String>,
}

/// A level by name or by survey-tool userlevel number
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FileLevel {
    Name(String),
    Number(u32),
}

impl FileLevel {
    fn parse(&self) -> Result<Level, LoadError> {
        let level = match self {
            FileLevel::Name(name) => name.parse()?,
            FileLevel::Number(number) => Level::from_st_level(*number)?,
        };
        Ok(level)
    }
}

impl FileVoter {
    fn into_entry(self) -> Result<(VoterId, VoterInfo), LoadError> {
        let organization: Organization = self.org.parse()?;
        let level = self.level.parse()?;
        let locales = self
            .locales
            .iter()
            .map(|raw| LocaleId::parse(raw).map(String::from))
            .collect::<Result<Vec<_>, _>>()?;
        let info = VoterInfo::new(organization, level, self.name).with_locales(locales);
        Ok((VoterId(self.id), info))
    }
}

/// Parse a roster from TOML text
pub fn parse_roster(text: &str) -> Result<VoterRoster, LoadError> {
    let file: FileRoster = toml::from_str(text)?;
    let mut voters = HashMap::with_capacity(file.voters.len());
    for voter in file.voters {
        let (id, info) = voter.into_entry()?;
        if voters.insert(id, info).is_some() {
            return Err(LoadError::DuplicateVoter(id));
        }
    }
    Ok(voters.into_iter().collect())
}

/// Read and parse a roster file
pub fn load_roster(path: &Path) -> Result<VoterRoster, LoadError> {
    let roster = parse_roster(&read_file(path)?)?;
    debug!("Loaded {} voters from {}", roster.len(), path.display());
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vetting_domain::DomainError;

    const ROSTER: &str = r#"
[[voter]]
id = 666
org = "google"
level = "vetter"
name = "J. Smith"
locales = ["de", "fr-ca"]

[[voter]]
id = 222
org = "Adobe"
level = 3
name = "A. Aldus"
"#;

    #[test]
    fn test_parse_roster() {
        let roster = parse_roster(ROSTER).unwrap();
        assert_eq!(roster.len(), 2);

        let smith = roster.voter_info(VoterId(666)).unwrap();
        assert_eq!(smith.organization, Organization::Google);
        assert_eq!(smith.level, Level::Vetter);
        assert!(smith.locales.contains("fr_CA"));

        let aldus = roster.voter_info(VoterId(222)).unwrap();
        assert_eq!(aldus.organization, Organization::Adobe);
        assert_eq!(aldus.level, Level::Expert);
    }

    #[test]
    fn test_unknown_level_fails() {
        let text = "[[voter]]\nid = 1\norg = \"google\"\nlevel = \"wizard\"\n";
        assert!(matches!(
            parse_roster(text),
            Err(LoadError::Domain(DomainError::UnknownRoleKind { .. }))
        ));
    }

    #[test]
    fn test_unknown_organization_fails() {
        let text = "[[voter]]\nid = 1\norg = \"acme\"\nlevel = \"vetter\"\n";
        assert!(matches!(
            parse_roster(text),
            Err(LoadError::Domain(DomainError::UnknownRoleKind { .. }))
        ));
    }

    #[test]
    fn test_duplicate_voter_fails() {
        let text = "[[voter]]\nid = 1\norg = \"ibm\"\nlevel = \"street\"\n\n[[voter]]\nid = 1\norg = \"sil\"\nlevel = \"vetter\"\n";
        assert!(matches!(
            parse_roster(text),
            Err(LoadError::DuplicateVoter(VoterId(1)))
        ));
    }

    #[test]
    fn test_empty_roster() {
        assert!(parse_roster("").unwrap().is_empty());
    }

    #[test]
    fn test_load_roster_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_roster(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_load_roster_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voters.toml");
        std::fs::write(&path, ROSTER).unwrap();
        assert_eq!(load_roster(&path).unwrap().len(), 2);
    }
}
