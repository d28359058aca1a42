use core::fmt;
use core::str::FromStr;

use crate::encoding::{self, table, Table};
use crate::error::{IllegalUserInfo, IllegalUsername};
use crate::norm::NormalCell;

/// The username part of a [user-info] subcomponent.
///
/// A username may not contain a literal `:`, which would start the
/// password; an encoded `%3A` is allowed and never decoded.
///
/// [user-info]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.1
#[derive(Clone, Debug)]
pub struct Username {
    raw: Box<str>,
    norm: NormalCell<Username>,
}

impl Username {
    /// Parses a username from a string. The empty string is allowed.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string contains a character outside
    /// `*( unreserved / pct-encoded / sub-delims )`.
    pub fn parse(s: &str) -> Result<Self, IllegalUsername> {
        if !table::USERNAME.validate(s.as_bytes()) {
            return Err(IllegalUsername::new(s));
        }
        Ok(Username {
            raw: s.into(),
            norm: NormalCell::new(),
        })
    }

    /// Builds a username from un-encoded text, percent-encoding as needed.
    #[must_use]
    pub fn encode(raw: &str) -> Username {
        Username {
            raw: encoding::encode(raw, table::USERNAME).into(),
            norm: NormalCell::normal(),
        }
    }

    /// Returns the username as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the username with its percent-encoding decoded.
    #[must_use]
    pub fn decode(&self) -> String {
        encoding::decode(&self.raw)
    }

    /// Returns whether the percent-encoding of the username is normal.
    #[must_use]
    pub fn is_normal_form(&self) -> bool {
        self.norm
            .is_normal_form(|| encoding::is_normal_form(&self.raw, table::USERNAME, Table::EMPTY))
    }

    /// Returns the username in normal form.
    #[must_use]
    pub fn normalize(&self) -> Username {
        self.norm.normalize(self, || {
            let normalized = encoding::normalize(&self.raw, table::USERNAME, Table::EMPTY);
            if *normalized == *self.raw {
                None
            } else {
                Some(Username {
                    raw: normalized.into(),
                    norm: NormalCell::normal(),
                })
            }
        })
    }
}

/// The password part of a user-info subcomponent.
///
/// Unlike a [`Username`], a password may contain literal `:` characters.
#[derive(Clone, Debug)]
pub struct Password {
    raw: Box<str>,
    norm: NormalCell<Password>,
}

impl Password {
    /// Parses a password from a string. The empty string is allowed.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string contains a character outside
    /// `*( unreserved / pct-encoded / sub-delims / ":" )`.
    pub fn parse(s: &str) -> Result<Self, IllegalUserInfo> {
        if !table::USERINFO.validate(s.as_bytes()) {
            return Err(IllegalUserInfo::with_detail(s, "invalid password"));
        }
        Ok(Password {
            raw: s.into(),
            norm: NormalCell::new(),
        })
    }

    /// Builds a password from un-encoded text, percent-encoding as needed.
    #[must_use]
    pub fn encode(raw: &str) -> Password {
        Password {
            raw: encoding::encode(raw, table::USERINFO).into(),
            norm: NormalCell::normal(),
        }
    }

    /// Returns the password as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the password with its percent-encoding decoded.
    #[must_use]
    pub fn decode(&self) -> String {
        encoding::decode(&self.raw)
    }

    /// Returns whether the percent-encoding of the password is normal.
    #[must_use]
    pub fn is_normal_form(&self) -> bool {
        self.norm
            .is_normal_form(|| encoding::is_normal_form(&self.raw, table::USERINFO, Table::EMPTY))
    }

    /// Returns the password in normal form.
    #[must_use]
    pub fn normalize(&self) -> Password {
        self.norm.normalize(self, || {
            let normalized = encoding::normalize(&self.raw, table::USERINFO, Table::EMPTY);
            if *normalized == *self.raw {
                None
            } else {
                Some(Password {
                    raw: normalized.into(),
                    norm: NormalCell::normal(),
                })
            }
        })
    }
}

/// A complete user-info subcomponent, `username [":" password]`.
///
/// The two forms `user` and `user:` are distinct: the first has no
/// password while the second has an empty one, and both round-trip.
#[derive(Clone, Debug)]
pub struct UserInfo {
    username: Username,
    password: Option<Password>,
    norm: NormalCell<UserInfo>,
}

impl UserInfo {
    /// Parses a user-info subcomponent from a string.
    ///
    /// Everything before the first `:` is the username, everything after
    /// it the password.
    ///
    /// # Errors
    ///
    /// Returns `Err` wrapping the failing part's error if either part is
    /// malformed.
    pub fn parse(s: &str) -> Result<Self, IllegalUserInfo> {
        let (username, password) = match s.split_once(':') {
            Some((user, pass)) => (user, Some(pass)),
            None => (s, None),
        };
        let username = Username::parse(username).map_err(|e| IllegalUserInfo::wrapping(s, e))?;
        let password = password.map(Password::parse).transpose().map_err(|mut e| {
            e.value = s.to_owned();
            e
        })?;
        Ok(UserInfo::from_parts(username, password))
    }

    /// Assembles a user-info subcomponent from its parts.
    #[must_use]
    pub fn from_parts(username: Username, password: Option<Password>) -> Self {
        UserInfo {
            username,
            password,
            norm: NormalCell::new(),
        }
    }

    /// Returns the username part.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the password part, if one is present.
    #[must_use]
    pub fn password(&self) -> Option<&Password> {
        self.password.as_ref()
    }

    /// Returns whether both parts are in normal form.
    #[must_use]
    pub fn is_normal_form(&self) -> bool {
        self.norm.is_normal_form(|| {
            self.username.is_normal_form()
                && self.password.as_ref().map_or(true, Password::is_normal_form)
        })
    }

    /// Returns the user-info subcomponent with both parts normalized.
    #[must_use]
    pub fn normalize(&self) -> UserInfo {
        self.norm.normalize(self, || {
            if self.is_normal_form() {
                None
            } else {
                Some(UserInfo {
                    username: self.username.normalize(),
                    password: self.password.as_ref().map(Password::normalize),
                    norm: NormalCell::normal(),
                })
            }
        })
    }
}

impl PartialEq for Username {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Username {}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Password {}

impl PartialEq for UserInfo {
    fn eq(&self, other: &Self) -> bool {
        self.username == other.username && self.password == other.password
    }
}

impl Eq for UserInfo {}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl fmt::Display for UserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.username.as_str())?;
        if let Some(password) = &self.password {
            write!(f, ":{password}")?;
        }
        Ok(())
    }
}

impl FromStr for Username {
    type Err = IllegalUsername;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Username::parse(s)
    }
}

impl FromStr for UserInfo {
    type Err = IllegalUserInfo;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserInfo::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_colon() {
        let info = UserInfo::parse("user:pa:ss").unwrap();
        assert_eq!(info.username().as_str(), "user");
        assert_eq!(info.password().unwrap().as_str(), "pa:ss");
        assert_eq!(info.to_string(), "user:pa:ss");
    }

    #[test]
    fn empty_password_differs_from_absent() {
        let bare = UserInfo::parse("user").unwrap();
        let trailing = UserInfo::parse("user:").unwrap();
        assert!(bare.password().is_none());
        assert_eq!(trailing.password().unwrap().as_str(), "");
        assert_ne!(bare, trailing);
        assert_eq!(trailing.to_string(), "user:");
    }

    #[test]
    fn username_rejects_colon_but_keeps_encoded_one() {
        assert!(Username::parse("a:b").is_err());
        let user = Username::parse("a%3Ab").unwrap();
        assert!(user.is_normal_form());
        assert_eq!(user.normalize().as_str(), "a%3Ab");
    }

    #[test]
    fn parse_error_carries_whole_input() {
        let err = UserInfo::parse("u ser:pass").unwrap_err();
        assert_eq!(err.value, "u ser:pass");
        assert!(err.cause().is_some());
    }

    #[test]
    fn encode_round_trips() {
        let user = Username::encode("a:b c");
        assert_eq!(user.as_str(), "a%3Ab%20c");
        assert_eq!(user.decode(), "a:b c");
        assert!(user.is_normal_form());

        let pass = Password::encode("a:b c");
        assert_eq!(pass.as_str(), "a:b%20c");
        assert_eq!(pass.decode(), "a:b c");
    }

    #[test]
    fn normalizes_both_parts() {
        let info = UserInfo::parse("%75ser:p%61ss").unwrap();
        assert!(!info.is_normal_form());
        assert_eq!(info.normalize().to_string(), "user:pass");
    }
}
