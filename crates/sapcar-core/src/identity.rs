//! User and group identities SAPCAR runs as.

use crate::Result;
use crate::SapcarError;
use nix::unistd::Gid;
use nix::unistd::Group;
use nix::unistd::Uid;
use nix::unistd::User;

/// A named user/group pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// User name.
    pub user: String,
    /// Group name.
    pub group: String,
}

impl Identity {
    /// Creates an identity from explicit names.
    #[must_use]
    pub fn new(user: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            group: group.into(),
        }
    }

    /// Looks up the real user and group of the current process.
    ///
    /// Ids without a passwd/group entry are rendered numerically.
    pub fn current() -> Result<Self> {
        let uid = Uid::current();
        let gid = Gid::current();
        let user = User::from_uid(uid)
            .map_err(std::io::Error::from)?
            .map_or_else(|| uid.to_string(), |u| u.name);
        let group = Group::from_gid(gid)
            .map_err(std::io::Error::from)?
            .map_or_else(|| gid.to_string(), |g| g.name);
        Ok(Self { user, group })
    }

    /// Returns a copy with `user`/`group` overriding the respective fields
    /// when given.
    #[must_use]
    pub fn with_overrides(&self, user: Option<&str>, group: Option<&str>) -> Self {
        Self {
            user: user.unwrap_or(&self.user).to_string(),
            group: group.unwrap_or(&self.group).to_string(),
        }
    }

    /// Resolves the names to numeric ids.
    pub fn resolve(&self) -> Result<(u32, u32)> {
        let uid = resolve_user(&self.user)?;
        let gid = resolve_group(&self.group)?;
        Ok((uid, gid))
    }
}

fn resolve_user(name: &str) -> Result<u32> {
    if let Ok(id) = name.parse::<u32>() {
        return Ok(id);
    }
    User::from_name(name)
        .map_err(std::io::Error::from)?
        .map(|u| u.uid.as_raw())
        .ok_or_else(|| SapcarError::UnknownUser(name.to_string()))
}

fn resolve_group(name: &str) -> Result<u32> {
    if let Ok(id) = name.parse::<u32>() {
        return Ok(id);
    }
    Group::from_name(name)
        .map_err(std::io::Error::from)?
        .map(|g| g.gid.as_raw())
        .ok_or_else(|| SapcarError::UnknownGroup(name.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_current_resolves_to_own_ids() {
        let me = Identity::current().unwrap();
        let (uid, gid) = me.resolve().unwrap();
        assert_eq!(uid, Uid::current().as_raw());
        assert_eq!(gid, Gid::current().as_raw());
    }

    #[test]
    fn test_overrides() {
        let base = Identity::new("root", "root");
        let id = base.with_overrides(Some("a01adm"), None);
        assert_eq!(id, Identity::new("a01adm", "root"));
        let id = base.with_overrides(None, Some("sapsys"));
        assert_eq!(id, Identity::new("root", "sapsys"));
    }

    #[test]
    fn test_numeric_ids_pass_through() {
        let id = Identity::new("4242", "4343");
        assert_eq!(id.resolve().unwrap(), (4242, 4343));
    }

    #[test]
    fn test_unknown_user() {
        let id = Identity::new("no-such-user-sapcar-test", "0");
        assert!(matches!(id.resolve(), Err(SapcarError::UnknownUser(_))));
    }

    #[test]
    fn test_unknown_group() {
        let id = Identity::new("0", "no-such-group-sapcar-test");
        assert!(matches!(id.resolve(), Err(SapcarError::UnknownGroup(_))));
    }
}
