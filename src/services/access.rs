use crate::models::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny,
}

/// Capability check for a route that requires one of `allowed`. Anonymous
/// callers (no session) are always denied. Pure and infallible; callers decide
/// how to render a denial.
pub fn check_access(role: Option<Role>, allowed: &[Role]) -> AccessDecision {
    match role {
        Some(role) if allowed.contains(&role) => AccessDecision::Allow,
        _ => AccessDecision::Deny,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_role_allowed() {
        let decision = check_access(Some(Role::Admin), &[Role::Admin]);
        assert_eq!(decision, AccessDecision::Allow);
    }

    #[test]
    fn test_any_of_several_roles_allowed() {
        let allowed = [Role::Client, Role::Mover, Role::Admin];
        assert_eq!(check_access(Some(Role::Client), &allowed), AccessDecision::Allow);
        assert_eq!(check_access(Some(Role::Mover), &allowed), AccessDecision::Allow);
    }

    #[test]
    fn test_wrong_role_denied() {
        let decision = check_access(Some(Role::Client), &[Role::Admin]);
        assert_eq!(decision, AccessDecision::Deny);
    }

    #[test]
    fn test_anonymous_denied() {
        let decision = check_access(None, &[Role::Client, Role::Mover, Role::Admin]);
        assert_eq!(decision, AccessDecision::Deny);
    }

    #[test]
    fn test_empty_requirement_denies_everyone() {
        assert_eq!(check_access(Some(Role::Admin), &[]), AccessDecision::Deny);
    }
}
