use pep440_rs::Version;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("project has no prior releases, so there is no version to bump")]
pub struct EmptyVersionSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot bump {version}: its last release component is already at the maximum")]
pub struct ReleaseOverflow {
    pub version: Version,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NextReleaseError {
    #[error(transparent)]
    Empty(#[from] EmptyVersionSet),
    #[error(transparent)]
    Overflow(#[from] ReleaseOverflow),
}

/// Increments the last release component and drops pre, post, dev and local
/// segments. The epoch is kept so the result still sorts after `version`.
pub fn bump_release(version: &Version) -> Result<Version, ReleaseOverflow> {
    let mut release = version.release().to_vec();
    if let Some(last) = release.last_mut() {
        *last = last.checked_add(1).ok_or_else(|| ReleaseOverflow {
            version: version.clone(),
        })?;
    }
    Ok(Version::new(release).with_epoch(version.epoch()))
}

/// Returns the bumped maximum of `versions`.
pub fn next_release<'a, I>(versions: I) -> Result<Version, NextReleaseError>
where
    I: IntoIterator<Item = &'a Version>,
{
    let max = versions.into_iter().max().ok_or(EmptyVersionSet)?;
    Ok(bump_release(max)?)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn versions(raw: &[&str]) -> Vec<Version> {
        raw.iter()
            .map(|value| Version::from_str(value).expect("valid version"))
            .collect()
    }

    #[test]
    fn bumps_last_release_component() {
        let observed = versions(&["1.2.3", "1.2.4"]);
        assert_eq!(next_release(&observed).unwrap().to_string(), "1.2.5");

        let observed = versions(&["0.9"]);
        assert_eq!(next_release(&observed).unwrap().to_string(), "0.10");
    }

    #[test]
    fn result_exceeds_every_observed_version_and_drops_qualifiers() {
        let cases = [
            (vec!["1.0", "1.0.post3"], "1.1"),
            (vec!["2.0rc1", "1.9"], "2.1"),
            (vec!["3.1.4.dev7"], "3.1.5"),
            (vec!["0.1.0", "0.1.0+local.1"], "0.1.1"),
            (vec!["5"], "6"),
            (vec!["1!0.2", "9.9"], "1!0.3"),
        ];
        for (raw, expected) in cases {
            let observed = versions(&raw);
            let next = next_release(&observed).unwrap();
            assert_eq!(next.to_string(), expected, "{raw:?}");
            assert!(next.pre().is_none() && next.post().is_none() && next.dev().is_none());
            for version in &observed {
                assert!(&next > version, "{next} should exceed {version}");
            }
        }
    }

    #[test]
    fn duplicates_do_not_change_the_result() {
        let observed = versions(&["1.2.3", "1.2.3", "1.2.2"]);
        assert_eq!(next_release(&observed).unwrap().to_string(), "1.2.4");
    }

    #[test]
    fn empty_set_is_reported() {
        let observed: Vec<Version> = Vec::new();
        assert_eq!(
            next_release(&observed),
            Err(NextReleaseError::Empty(EmptyVersionSet))
        );
    }

    #[test]
    fn maximal_release_component_is_an_error_not_a_wrap() {
        let observed = versions(&["1.18446744073709551615", "1.2"]);
        let err = next_release(&observed).unwrap_err();
        assert_eq!(
            err,
            NextReleaseError::Overflow(ReleaseOverflow {
                version: observed[0].clone()
            })
        );
        assert!(err.to_string().contains("1.18446744073709551615"), "{err}");

        let bumped = bump_release(&Version::from_str("18446744073709551615.0").unwrap()).unwrap();
        assert_eq!(bumped.to_string(), "18446744073709551615.1");
    }
}
