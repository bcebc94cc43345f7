//! Role authority enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Authorities a console user can hold.
///
/// The set is fixed; anything else the backend sends is rejected at
/// parse time and treated as "no access" by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleAuthority {
    /// Full console administrator.
    #[serde(rename = "ROLE_ADMINISTRATOR")]
    Administrator,
    /// Manages the customer-support team.
    #[serde(rename = "ROLE_SERVICE_MANAGER")]
    ServiceManager,
    /// Answers chats.
    #[serde(rename = "ROLE_CUSTOMER_SUPPORT_AGENT")]
    CustomerSupportAgent,
    /// Trains the chatbot.
    #[serde(rename = "ROLE_CHATBOT_TRAINER")]
    ChatbotTrainer,
    /// Reads analytics.
    #[serde(rename = "ROLE_ANALYST")]
    Analyst,
    /// Not signed in.
    #[serde(rename = "ROLE_UNAUTHENTICATED")]
    Unauthenticated,
}

impl RoleAuthority {
    /// All authorities, in privilege order.
    pub const ALL: [RoleAuthority; 6] = [
        Self::Administrator,
        Self::ServiceManager,
        Self::CustomerSupportAgent,
        Self::ChatbotTrainer,
        Self::Analyst,
        Self::Unauthenticated,
    ];

    /// Return the wire name of the authority.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Administrator => "ROLE_ADMINISTRATOR",
            Self::ServiceManager => "ROLE_SERVICE_MANAGER",
            Self::CustomerSupportAgent => "ROLE_CUSTOMER_SUPPORT_AGENT",
            Self::ChatbotTrainer => "ROLE_CHATBOT_TRAINER",
            Self::Analyst => "ROLE_ANALYST",
            Self::Unauthenticated => "ROLE_UNAUTHENTICATED",
        }
    }

    /// Whether this authority answers chats and so cares about chat alerts.
    pub fn handles_chats(&self) -> bool {
        matches!(
            self,
            Self::Administrator | Self::ServiceManager | Self::CustomerSupportAgent
        )
    }

    /// Whether the user is signed in at all.
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::Unauthenticated)
    }

    /// Pick the primary authority from the set the role source returned.
    ///
    /// Only the first authority counts. An empty set, or an unknown first
    /// authority, yields `None` even when later entries are recognised.
    pub fn primary<'a>(authorities: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        authorities.into_iter().next()?.parse().ok()
    }
}

impl fmt::Display for RoleAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RoleAuthority {
    type Err = deskhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        let name = normalized.strip_prefix("ROLE_").unwrap_or(&normalized);
        match name {
            "ADMINISTRATOR" => Ok(Self::Administrator),
            "SERVICE_MANAGER" => Ok(Self::ServiceManager),
            "CUSTOMER_SUPPORT_AGENT" => Ok(Self::CustomerSupportAgent),
            "CHATBOT_TRAINER" => Ok(Self::ChatbotTrainer),
            "ANALYST" => Ok(Self::Analyst),
            "UNAUTHENTICATED" => Ok(Self::Unauthenticated),
            _ => Err(deskhub_core::AppError::validation(format!(
                "Invalid role authority: '{s}'"
            ))),
        }
    }
}
