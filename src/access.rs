//! Roles and what each may do.
//!
//! Authorization is decided here, separately from view filtering: a gallery
//! request first checks the role may use the view, then projects with the
//! view's filter and the role's brand exclusions.

use crate::error::ApiError;
use crate::views::AssetFilter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Portal role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Uploads, edits and sees everything
    Admin,
    /// Read-only viewer of the curated galleries
    Boss,
}

/// Capability granted to a role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Read,
    Write,
}

impl Role {
    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            Role::Admin => &[Capability::Read, Capability::Write],
            Role::Boss => &[Capability::Read],
        }
    }

    pub fn can_write(&self) -> bool {
        self.capabilities().contains(&Capability::Write)
    }

    /// Whether the role may open a gallery view.
    pub fn can_view(&self, view: AssetFilter) -> bool {
        match self {
            Role::Admin => true,
            Role::Boss => view != AssetFilter::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Boss => "boss",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "boss" => Ok(Role::Boss),
            other => Err(ApiError::ValidationError(format!(
                "Invalid role: {}. Must be admin or boss",
                other
            ))),
        }
    }
}

/// Visibility settings of one role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAccess {
    /// Brands hidden from every gallery view of this role
    #[serde(default)]
    pub excluded_brands: Vec<String>,
}

/// `[access]` configuration section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessConfig {
    #[serde(default)]
    pub admin: RoleAccess,
    #[serde(default)]
    pub boss: RoleAccess,
}

impl AccessConfig {
    pub fn for_role(&self, role: Role) -> &RoleAccess {
        match role {
            Role::Admin => &self.admin,
            Role::Boss => &self.boss,
        }
    }
}

/// Resolved access policy for the acting role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    pub role: Role,
    pub excluded_brands: Vec<String>,
}

impl AccessPolicy {
    pub fn new(role: Role, config: &AccessConfig) -> Self {
        Self {
            role,
            excluded_brands: config.for_role(role).excluded_brands.clone(),
        }
    }

    /// Verify the role may change metadata or objects.
    pub fn verify_write(&self) -> Result<(), ApiError> {
        if !self.role.can_write() {
            return Err(ApiError::Unauthorized(format!(
                "Role {} cannot modify the portal",
                self.role
            )));
        }
        Ok(())
    }

    /// Verify the role may open `view`.
    pub fn verify_view(&self, view: AssetFilter) -> Result<(), ApiError> {
        if !self.role.can_view(view) {
            return Err(ApiError::Unauthorized(format!(
                "Role {} cannot open the {} gallery",
                self.role, view
            )));
        }
        Ok(())
    }
}
