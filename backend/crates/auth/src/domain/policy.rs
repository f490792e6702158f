//! Admin Policy
//!
//! User administration is admin-only. The check is an explicit function
//! invoked at the top of each use case, not an annotation on a route.

use kernel::identity::Caller;

use crate::error::{AuthError, AuthResult};

/// Deny unless the caller is an admin
pub fn ensure_admin(caller: &Caller, operation: &'static str) -> AuthResult<()> {
    if caller.role.is_admin() {
        Ok(())
    } else {
        Err(AuthError::AccessDenied(operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::identity::Role;

    #[test]
    fn test_admin_allowed() {
        let admin = Caller::new("root", Role::Admin);
        assert!(ensure_admin(&admin, "manage users").is_ok());
    }

    #[test]
    fn test_user_denied() {
        let user = Caller::new("alice", Role::User);
        assert!(matches!(
            ensure_admin(&user, "manage users"),
            Err(AuthError::AccessDenied("manage users"))
        ));
    }
}
