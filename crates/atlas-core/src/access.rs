//! # Access Policy
//!
//! Resolves which operations a caller may use based on their role.
//!
//! ## Policy Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation                      admin    tax_user    everyone else     │
//! │  ─────────────────────────────  ─────    ────────    ─────────────     │
//! │  Use the "Tax" order type        yes       yes           no            │
//! │  User / role administration      yes       no            no            │
//! │                                                                         │
//! │  When the Tax order type is denied, the field is FORCED to General     │
//! │  and hidden from input - never a default the user can override.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Role names are administered on the server and matched here
//! case-insensitively. Names this client doesn't know degrade to `Staff`,
//! the weakest policy: an unknown role can never widen access.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::document::OrderType;

// =============================================================================
// Role
// =============================================================================

/// A caller's role, as it matters to this client's policy checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[ts(export)]
pub enum Role {
    Admin,
    TaxUser,
    /// Any role without special privileges here.
    #[default]
    Staff,
}

impl Role {
    /// Parses a server-side role name, case-insensitively.
    ///
    /// ## Example
    /// ```rust
    /// use atlas_core::access::Role;
    ///
    /// assert_eq!(Role::from_name("admin"), Role::Admin);
    /// assert_eq!(Role::from_name("ADMIN"), Role::Admin);
    /// assert_eq!(Role::from_name("Tax_User"), Role::TaxUser);
    /// assert_eq!(Role::from_name("warehouse"), Role::Staff);
    /// ```
    pub fn from_name(name: &str) -> Role {
        let name = name.trim();
        if name.eq_ignore_ascii_case("admin") {
            Role::Admin
        } else if name.eq_ignore_ascii_case("tax_user") {
            Role::TaxUser
        } else {
            Role::Staff
        }
    }

    /// The canonical server-side spelling of this role.
    pub fn name(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::TaxUser => "tax_user",
            Role::Staff => "staff",
        }
    }

    /// Whether this role may author documents with the Tax order type.
    pub fn can_use_tax_order_type(&self) -> bool {
        matches!(self, Role::Admin | Role::TaxUser)
    }

    /// Whether this role may see and use user/role administration.
    ///
    /// Non-admins are redirected away from those routes entirely.
    pub fn can_access_user_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Filters a requested order type through the policy.
    ///
    /// A role without tax privileges gets `General` no matter what was
    /// requested; the console hides the field for such roles, and this
    /// function makes the rule hold even if a request slips through.
    pub fn effective_order_type(&self, requested: OrderType) -> OrderType {
        if self.can_use_tax_order_type() {
            requested
        } else {
            OrderType::General
        }
    }
}

// Roles cross the wire as their server-side names; unknown names degrade
// to Staff on the way in.

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Role, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Role::from_name(&name))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_order_type_gating() {
        assert!(Role::Admin.can_use_tax_order_type());
        assert!(Role::TaxUser.can_use_tax_order_type());
        assert!(!Role::Staff.can_use_tax_order_type());
    }

    #[test]
    fn test_user_admin_gating() {
        assert!(Role::Admin.can_access_user_admin());
        assert!(!Role::TaxUser.can_access_user_admin());
        assert!(!Role::Staff.can_access_user_admin());
    }

    #[test]
    fn test_role_parsing_is_case_insensitive() {
        assert_eq!(Role::from_name("Admin"), Role::Admin);
        assert_eq!(Role::from_name("ADMIN"), Role::Admin);
        assert_eq!(Role::from_name("tax_user"), Role::TaxUser);
        assert_eq!(Role::from_name("TAX_USER"), Role::TaxUser);
        assert_eq!(Role::from_name(" admin "), Role::Admin);
    }

    #[test]
    fn test_unknown_roles_degrade_to_staff() {
        assert_eq!(Role::from_name("warehouse"), Role::Staff);
        assert_eq!(Role::from_name(""), Role::Staff);
        assert_eq!(Role::from_name("administrator"), Role::Staff);
        assert!(!Role::from_name("administrator").can_access_user_admin());
    }

    #[test]
    fn test_effective_order_type_forced_to_general() {
        assert_eq!(
            Role::Staff.effective_order_type(OrderType::Tax),
            OrderType::General
        );
        assert_eq!(
            Role::TaxUser.effective_order_type(OrderType::Tax),
            OrderType::Tax
        );
        assert_eq!(
            Role::Admin.effective_order_type(OrderType::General),
            OrderType::General
        );
    }

    #[test]
    fn test_role_serde_round_trip() {
        assert_eq!(serde_json::to_string(&Role::TaxUser).unwrap(), "\"tax_user\"");
        let role: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, Role::Admin);
        let role: Role = serde_json::from_str("\"shipping_clerk\"").unwrap();
        assert_eq!(role, Role::Staff);
    }
}
