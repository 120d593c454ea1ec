// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// The contact channel a shift is staffed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Channel {
    /// Telephone queue.
    Voice,
    /// Social media inbox.
    Sosmed,
}

impl FromStr for Channel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "VOICE" => Ok(Self::Voice),
            "SOSMED" => Ok(Self::Sosmed),
            _ => Err(DomainError::InvalidChannel(s.to_string())),
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Channel {
    /// Converts this channel to its stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Voice => "VOICE",
            Self::Sosmed => "SOSMED",
        }
    }
}

/// The closed set of roles a user may hold.
///
/// Every role other than `Agent` is a backoffice role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleName {
    /// Full administrative access.
    SuperAdmin,
    /// Supervisor.
    Spv,
    /// Quality control.
    Qc,
    /// Team leader.
    Tl,
    /// Human resources administrator.
    HrAdmin,
    /// Front-line agent.
    Agent,
}

impl FromStr for RoleName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SUPER_ADMIN" => Ok(Self::SuperAdmin),
            "SPV" => Ok(Self::Spv),
            "QC" => Ok(Self::Qc),
            "TL" => Ok(Self::Tl),
            "HR_ADMIN" => Ok(Self::HrAdmin),
            "AGENT" => Ok(Self::Agent),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl RoleName {
    /// Converts this role to its stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::Spv => "SPV",
            Self::Qc => "QC",
            Self::Tl => "TL",
            Self::HrAdmin => "HR_ADMIN",
            Self::Agent => "AGENT",
        }
    }

    /// Returns whether this role belongs to the backoffice.
    #[must_use]
    pub const fn is_backoffice(&self) -> bool {
        !matches!(self, Self::Agent)
    }

    /// Returns whether this role may create, edit, and delete schedules.
    #[must_use]
    pub const fn can_manage_schedules(&self) -> bool {
        matches!(self, Self::SuperAdmin | Self::HrAdmin | Self::Tl)
    }
}

/// A user known to the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The canonical user identifier.
    pub user_id: i64,
    /// Display name.
    pub full_name: String,
    /// Login email, normalized to lowercase.
    pub email: String,
    /// Whether the account is active.
    pub active: bool,
    /// The roles held by this user.
    pub roles: Vec<RoleName>,
}

impl User {
    /// Returns whether the user holds any backoffice role.
    #[must_use]
    pub fn is_backoffice(&self) -> bool {
        self.roles.iter().any(RoleName::is_backoffice)
    }

    /// Returns whether the user may administer schedules.
    #[must_use]
    pub fn can_manage_schedules(&self) -> bool {
        self.roles.iter().any(RoleName::can_manage_schedules)
    }

    /// Returns whether the user holds the given role.
    #[must_use]
    pub fn has_role(&self, role: RoleName) -> bool {
        self.roles.contains(&role)
    }
}

/// Returns the name shown for a user, falling back to a placeholder.
#[must_use]
pub fn display_name(user_id: i64, full_name: Option<&str>) -> String {
    match full_name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("Agent #{user_id}"),
    }
}

/// The kind of record a notification points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefType {
    /// A shift swap request.
    Swap,
    /// A holiday swap request.
    HolidaySwap,
    /// A leave request.
    Leave,
}

impl FromStr for RefType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SWAP" => Ok(Self::Swap),
            "HOLIDAY_SWAP" => Ok(Self::HolidaySwap),
            "LEAVE" => Ok(Self::Leave),
            _ => Err(DomainError::InvalidName(format!(
                "unknown notification reference type: {s}"
            ))),
        }
    }
}

impl RefType {
    /// Converts this reference type to its stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Swap => "SWAP",
            Self::HolidaySwap => "HOLIDAY_SWAP",
            Self::Leave => "LEAVE",
        }
    }
}

/// A message delivered to one user's inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// The canonical notification identifier.
    pub notification_id: i64,
    /// The recipient.
    pub user_id: i64,
    /// Short headline.
    pub title: String,
    /// Message body.
    pub body: String,
    /// What the notification refers to.
    pub ref_type: RefType,
    /// The referenced record, when there is one.
    pub ref_id: Option<i64>,
    /// Whether the recipient has read it.
    pub is_read: bool,
    /// When the notification was created.
    pub created_at: OffsetDateTime,
}
