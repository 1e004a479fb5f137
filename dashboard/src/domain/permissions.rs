//! Role-based permission matrix gating the admin screens.
//!
//! This is UI-only visibility control: the backend stays authoritative and
//! re-checks every mutation. The table must be kept in sync with the
//! backend's RBAC policy by hand; there is no reconciliation mechanism, so a
//! drifted entry degrades to an upstream 403 surfaced to the operator.
//!
//! Lookups fail closed: any role/resource/action combination absent from the
//! table is denied.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::user::{Role, User};

/// Backend-managed entity type a screen or action operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// Account management (customers live here too).
    Users,
    /// Service catalogue.
    Services,
    /// Stylist profiles and schedules.
    Stylists,
    /// Appointments.
    Bookings,
    /// Payments and refunds.
    Payments,
    /// Customer reviews and moderation.
    Reviews,
    /// Application settings.
    Settings,
    /// Reporting exports.
    Reports,
    /// The analytics dashboard itself.
    Dashboard,
}

/// CRUD action an operator may perform on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Create a new record.
    Create,
    /// View records.
    Read,
    /// Modify an existing record (status changes and toggles included).
    Update,
    /// Remove a record.
    Delete,
}

use Action::{Create, Delete, Read, Update};

const ALL: &[Action] = &[Create, Read, Update, Delete];
const NONE: &[Action] = &[];

/// Static permission table: allowed actions per role and resource.
///
/// Values mirror the backend RBAC policy. Missing entries mean "denied".
#[must_use]
pub const fn allowed_actions(role: Role, resource: Resource) -> &'static [Action] {
    match role {
        Role::Admin => match resource {
            Resource::Reports | Resource::Dashboard => &[Read],
            _ => ALL,
        },
        Role::Manager => match resource {
            // Managers run the shop but cannot destroy records.
            Resource::Users | Resource::Services | Resource::Stylists | Resource::Bookings => {
                &[Create, Read, Update]
            }
            // Can process refunds.
            Resource::Payments | Resource::Settings => &[Read, Update],
            Resource::Reviews | Resource::Reports | Resource::Dashboard => &[Read],
        },
        Role::Stylist => match resource {
            Resource::Services | Resource::Payments | Resource::Reviews | Resource::Dashboard => {
                &[Read]
            }
            // Own profile and own bookings only; ownership is enforced upstream.
            Resource::Stylists | Resource::Bookings => &[Read, Update],
            Resource::Users | Resource::Settings | Resource::Reports => NONE,
        },
        Role::Customer => match resource {
            Resource::Users | Resource::Settings => &[Read, Update],
            Resource::Services | Resource::Stylists => &[Read],
            Resource::Bookings => &[Create, Read, Update],
            Resource::Payments => &[Create, Read],
            Resource::Reviews => ALL,
            Resource::Reports | Resource::Dashboard => NONE,
        },
    }
}

/// Pure lookup into the permission table.
#[must_use]
pub fn has_permission(role: Role, resource: Resource, action: Action) -> bool {
    allowed_actions(role, resource).contains(&action)
}

/// Dashboard variant an operator may open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardScope {
    /// Whole-business analytics.
    Admin,
    /// Operational overview.
    Manager,
    /// A stylist's own numbers.
    Stylist,
}

impl fmt::Display for DashboardScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Stylist => "stylist",
        };
        f.write_str(label)
    }
}

/// Dashboard access per role: admins see everything, managers everything but
/// the admin view, stylists only their own, customers nothing.
#[must_use]
pub fn can_access_dashboard(role: Role, scope: DashboardScope) -> bool {
    match role {
        Role::Admin => true,
        Role::Manager => matches!(scope, DashboardScope::Manager | DashboardScope::Stylist),
        Role::Stylist => matches!(scope, DashboardScope::Stylist),
        Role::Customer => false,
    }
}

/// Permission checks bound to one authenticated operator.
///
/// The role is normalized once at construction; anything that fails to
/// normalize is treated as "no role" and every check denies.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    role: Option<Role>,
}

impl Capabilities {
    /// Bind the checks to an authenticated account.
    #[must_use]
    pub fn for_user(user: &User) -> Self {
        Self {
            role: Some(user.role),
        }
    }

    /// Bind the checks to a raw role string (e.g. straight off the wire).
    #[must_use]
    pub fn for_role_str(raw: &str) -> Self {
        Self {
            role: Role::from_str(raw).ok(),
        }
    }

    /// An unauthenticated visitor: every check denies.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { role: None }
    }

    /// Whether the bound role may perform `action` on `resource`.
    #[must_use]
    pub fn can(&self, resource: Resource, action: Action) -> bool {
        self.role
            .map(|role| has_permission(role, resource, action))
            .unwrap_or(false)
    }

    /// Whether the bound role may open the given dashboard variant.
    #[must_use]
    pub fn can_access(&self, scope: DashboardScope) -> bool {
        self.role
            .map(|role| can_access_dashboard(role, scope))
            .unwrap_or(false)
    }

    /// The normalized role, if any.
    #[must_use]
    pub const fn role(&self) -> Option<Role> {
        self.role
    }

    /// Convenience flag for templates.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    /// Convenience flag for templates.
    #[must_use]
    pub fn is_manager(&self) -> bool {
        self.role == Some(Role::Manager)
    }

    /// Convenience flag for templates.
    #[must_use]
    pub fn is_stylist(&self) -> bool {
        self.role == Some(Role::Stylist)
    }

    /// Convenience flag for templates.
    #[must_use]
    pub fn is_customer(&self) -> bool {
        self.role == Some(Role::Customer)
    }
}

#[cfg(test)]
mod tests {
    //! The matrix values are contract, not implementation detail: the cases
    //! below pin the table against the backend RBAC policy.

    use super::*;
    use rstest::rstest;

    const RESOURCES: [Resource; 9] = [
        Resource::Users,
        Resource::Services,
        Resource::Stylists,
        Resource::Bookings,
        Resource::Payments,
        Resource::Reviews,
        Resource::Settings,
        Resource::Reports,
        Resource::Dashboard,
    ];
    const ACTIONS: [Action; 4] = [Create, Read, Update, Delete];

    #[test]
    fn admin_holds_every_listed_pair() {
        for resource in RESOURCES {
            for action in allowed_actions(Role::Admin, resource) {
                assert!(has_permission(Role::Admin, resource, *action));
            }
        }
        // Reports and the dashboard are read-only even for admins.
        assert!(!has_permission(Role::Admin, Resource::Reports, Create));
        assert!(!has_permission(Role::Admin, Resource::Dashboard, Delete));
    }

    #[rstest]
    #[case(Role::Customer, Resource::Users, Delete)]
    #[case(Role::Customer, Resource::Dashboard, Read)]
    #[case(Role::Manager, Resource::Services, Delete)]
    #[case(Role::Manager, Resource::Bookings, Delete)]
    #[case(Role::Stylist, Resource::Users, Read)]
    #[case(Role::Stylist, Resource::Settings, Read)]
    fn denied_pairs_stay_denied(
        #[case] role: Role,
        #[case] resource: Resource,
        #[case] action: Action,
    ) {
        assert!(!has_permission(role, resource, action));
    }

    #[rstest]
    #[case(Role::Manager, Resource::Payments, Update)] // refunds
    #[case(Role::Stylist, Resource::Bookings, Update)]
    #[case(Role::Customer, Resource::Reviews, Delete)]
    #[case(Role::Customer, Resource::Bookings, Create)]
    fn granted_pairs_stay_granted(
        #[case] role: Role,
        #[case] resource: Resource,
        #[case] action: Action,
    ) {
        assert!(has_permission(role, resource, action));
    }

    #[test]
    fn anonymous_and_unknown_roles_fail_closed() {
        let anon = Capabilities::anonymous();
        let unknown = Capabilities::for_role_str("superuser");
        for resource in RESOURCES {
            for action in ACTIONS {
                assert!(!anon.can(resource, action));
                assert!(!unknown.can(resource, action));
            }
        }
        assert!(!anon.can_access(DashboardScope::Stylist));
    }

    #[test]
    fn capabilities_normalise_wire_case() {
        let caps = Capabilities::for_role_str("MANAGER");
        assert!(caps.is_manager());
        assert!(caps.can(Resource::Payments, Update));
        assert!(!caps.can(Resource::Payments, Delete));
    }

    #[rstest]
    #[case(Role::Admin, DashboardScope::Admin, true)]
    #[case(Role::Manager, DashboardScope::Admin, false)]
    #[case(Role::Manager, DashboardScope::Manager, true)]
    #[case(Role::Stylist, DashboardScope::Manager, false)]
    #[case(Role::Stylist, DashboardScope::Stylist, true)]
    #[case(Role::Customer, DashboardScope::Stylist, false)]
    fn dashboard_access_matches_the_table(
        #[case] role: Role,
        #[case] scope: DashboardScope,
        #[case] expected: bool,
    ) {
        assert_eq!(can_access_dashboard(role, scope), expected);
    }
}
