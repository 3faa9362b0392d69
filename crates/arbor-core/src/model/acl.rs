use serde::{Deserialize, Serialize};

/// Coarse permission levels exposed through the facade
///
/// Finer native permission bits are collapsed to exactly one of these per
/// principal and never exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    Read,
    Write,
    All,
}

impl PermissionLevel {
    /// The protocol-facing permission name
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionLevel::Read => "arbor:read",
            PermissionLevel::Write => "arbor:write",
            PermissionLevel::All => "arbor:all",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            PermissionLevel::Read => "Read",
            PermissionLevel::Write => "Write",
            PermissionLevel::All => "All",
        }
    }
}

/// Native access bits as recorded by the backing store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessBits {
    pub read: bool,
    pub write: bool,
    pub control: bool,
}

/// A native access entry: one principal with its access bits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessEntry {
    pub principal: String,
    pub bits: AccessBits,
}

impl AccessEntry {
    /// An entry granting every bit to a principal
    pub fn all(principal: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            bits: AccessBits {
                read: true,
                write: true,
                control: true,
            },
        }
    }

    /// A read-only entry for a principal
    pub fn read_only(principal: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            bits: AccessBits {
                read: true,
                write: false,
                control: false,
            },
        }
    }
}

/// A coarse, protocol-facing ACL entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclEntry {
    pub principal: String,
    pub permission: PermissionLevel,
}

/// Collapse a native access entry to its coarse permission level
///
/// Full bits map to All, write access without control maps to Write, and
/// everything else maps to Read.
pub fn collapse(entry: &AccessEntry) -> AclEntry {
    let permission = if entry.bits.read && entry.bits.write && entry.bits.control {
        PermissionLevel::All
    } else if entry.bits.write {
        PermissionLevel::Write
    } else {
        PermissionLevel::Read
    };
    AclEntry {
        principal: entry.principal.clone(),
        permission,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_all_bits() {
        let entry = AccessEntry::all("alice");
        assert_eq!(collapse(&entry).permission, PermissionLevel::All);
    }

    #[test]
    fn test_collapse_write_without_control() {
        let entry = AccessEntry {
            principal: "bob".to_string(),
            bits: AccessBits {
                read: true,
                write: true,
                control: false,
            },
        };
        assert_eq!(collapse(&entry).permission, PermissionLevel::Write);
    }

    #[test]
    fn test_collapse_read_only() {
        let entry = AccessEntry::read_only("carol");
        assert_eq!(collapse(&entry).permission, PermissionLevel::Read);
    }

    #[test]
    fn test_permission_names() {
        assert_eq!(PermissionLevel::Read.as_str(), "arbor:read");
        assert_eq!(PermissionLevel::All.description(), "All");
    }
}
