//! Route access policy
//!
//! A declarative table evaluated before any handler runs. The first matching
//! rule wins; paths no rule matches require a signed-in user.

use crate::models::{ADMIN_ROLE, AuthUser};

/// What a request needs in order to reach a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Role(&'static str),
}

#[derive(Debug, Clone, Copy)]
enum PathMatcher {
    Exact(&'static str),
    /// Matches the directory itself and everything below it
    Under(&'static str),
}

impl PathMatcher {
    fn matches(&self, path: &str) -> bool {
        match self {
            PathMatcher::Exact(expected) => path == *expected,
            PathMatcher::Under(dir) => path
                .strip_prefix(dir)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/')),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    matcher: PathMatcher,
    access: Access,
}

const fn rule(matcher: PathMatcher, access: Access) -> Rule {
    Rule { matcher, access }
}

const RULES: &[Rule] = &[
    // static assets
    rule(PathMatcher::Under("/javaScript"), Access::Public),
    rule(PathMatcher::Under("/img"), Access::Public),
    rule(PathMatcher::Under("/CSS"), Access::Public),
    // public pages
    rule(PathMatcher::Exact("/"), Access::Public),
    rule(PathMatcher::Exact("/home"), Access::Public),
    rule(PathMatcher::Exact("/registration"), Access::Public),
    rule(PathMatcher::Exact("/users/registrate"), Access::Public),
    rule(PathMatcher::Exact("/login"), Access::Public),
    rule(PathMatcher::Exact("/logout"), Access::Public),
    rule(PathMatcher::Exact("/health"), Access::Public),
    // administration
    rule(PathMatcher::Under("/admin"), Access::Role(ADMIN_ROLE)),
];

/// Access required for `path`
pub fn required_access(path: &str) -> Access {
    RULES
        .iter()
        .find(|rule| rule.matcher.matches(path))
        .map(|rule| rule.access)
        .unwrap_or(Access::Authenticated)
}

/// Outcome of checking a request against the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// Nobody is signed in; send them to the login page
    Login,
    /// Signed in without the required role
    Forbidden,
}

pub fn authorize(path: &str, user: Option<&AuthUser>) -> Decision {
    match (required_access(path), user) {
        (Access::Public, _) => Decision::Allow,
        (_, None) => Decision::Login,
        (Access::Authenticated, Some(_)) => Decision::Allow,
        (Access::Role(role), Some(user)) if user.has_role(role) => Decision::Allow,
        (Access::Role(_), Some(_)) => Decision::Forbidden,
    }
}
