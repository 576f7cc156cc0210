//! Owners resolved to people and teams.
//!
//! The parser only records what a CODEOWNERS file says: a handle or an
//! email. Turning that into a known user or team is done by an
//! [`OwnerResolver`] backed by some directory outside this crate. The result
//! is a [`ResolvedOwner`], which always keeps the original handle and email
//! so unresolvable owners can still be shown.

use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::parse::Owner;

/// The kind of a resolved owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerType {
    /// A single person.
    Person,
    /// A team of people.
    Team,
    /// An owner that could be either and was not resolved.
    Any,
}

impl fmt::Display for OwnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OwnerType::Person => "person",
            OwnerType::Team => "team",
            OwnerType::Any => "any",
        };
        f.write_str(name)
    }
}

/// A user known to the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserIdentity {
    pub id: i32,
    pub username: String,
    pub display_name: Option<String>,
}

/// A team known to the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamIdentity {
    pub id: i32,
    pub name: String,
    pub display_name: Option<String>,
    /// Usernames of the team members.
    pub member_usernames: Vec<String>,
}

/// A person, resolved or not.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Person {
    /// The matching user, when the directory knows one.
    pub user: Option<UserIdentity>,
    /// The user's primary email, when known.
    pub primary_email: Option<String>,
    /// Handle as written in the CODEOWNERS file, without `@`.
    pub handle: String,
    /// Email as written in the CODEOWNERS file.
    pub email: String,
}

/// A team, resolved or not.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Team {
    /// The matching team, when the directory knows one.
    pub team: Option<TeamIdentity>,
    pub handle: String,
    pub email: String,
}

/// An owner the directory could not classify.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnyOwner {
    pub handle: String,
    pub email: String,
}

/// An owner after resolution.
///
/// Two resolved owners are equal when they have the same [`OwnerType`] and
/// the same [`identifier`](ResolvedOwner::identifier), so a person, a team
/// and an unresolved owner written with the same text never compare equal.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResolvedOwner {
    Person(Person),
    Team(Team),
    Any(AnyOwner),
}

impl ResolvedOwner {
    /// Wraps a parsed owner as a person with no directory identity.
    pub fn unresolved(owner: &Owner) -> Self {
        let mut person = Person::default();
        match owner {
            Owner::Handle(handle) => person.handle = handle.clone(),
            Owner::Email(email) => person.email = email.clone(),
        }
        ResolvedOwner::Person(person)
    }

    /// Returns the kind of owner.
    pub fn owner_type(&self) -> OwnerType {
        match self {
            ResolvedOwner::Person(_) => OwnerType::Person,
            ResolvedOwner::Team(_) => OwnerType::Team,
            ResolvedOwner::Any(_) => OwnerType::Any,
        }
    }

    /// Returns the type-prefixed identity key.
    ///
    /// Resolved users and teams are keyed by their directory name,
    /// everything else by handle, or email when there is no handle.
    pub fn identifier(&self) -> String {
        match self {
            ResolvedOwner::Person(Person {
                user: Some(user), ..
            }) => format!("User:{}", user.username),
            ResolvedOwner::Person(person) => {
                format!("Person:{}", handle_or_email(&person.handle, &person.email))
            }
            ResolvedOwner::Team(Team {
                team: Some(team), ..
            }) => format!("Team:{}", team.name),
            ResolvedOwner::Team(team) => {
                format!("Team:{}", handle_or_email(&team.handle, &team.email))
            }
            ResolvedOwner::Any(any) => {
                format!("Any:{}", handle_or_email(&any.handle, &any.email))
            }
        }
    }

    /// Returns the handle as written in the CODEOWNERS file.
    pub fn handle(&self) -> &str {
        match self {
            ResolvedOwner::Person(person) => &person.handle,
            ResolvedOwner::Team(team) => &team.handle,
            ResolvedOwner::Any(any) => &any.handle,
        }
    }

    /// Returns the email as written in the CODEOWNERS file.
    pub fn email(&self) -> &str {
        match self {
            ResolvedOwner::Person(person) => &person.email,
            ResolvedOwner::Team(team) => &team.email,
            ResolvedOwner::Any(any) => &any.email,
        }
    }

    /// Replaces the original handle and email.
    pub fn set_owner_data(&mut self, handle: impl Into<String>, email: impl Into<String>) {
        let (h, e) = match self {
            ResolvedOwner::Person(person) => (&mut person.handle, &mut person.email),
            ResolvedOwner::Team(team) => (&mut team.handle, &mut team.email),
            ResolvedOwner::Any(any) => (&mut any.handle, &mut any.email),
        };
        *h = handle.into();
        *e = email.into();
    }

    /// Returns true if `other` is this owner or, for a resolved team, one of
    /// its members.
    pub fn includes(&self, other: &ResolvedOwner) -> bool {
        if self == other {
            return true;
        }
        match (self, other) {
            (
                ResolvedOwner::Team(Team {
                    team: Some(team), ..
                }),
                ResolvedOwner::Person(Person {
                    user: Some(user), ..
                }),
            ) => team.member_usernames.contains(&user.username),
            _ => false,
        }
    }
}

fn handle_or_email<'a>(handle: &'a str, email: &'a str) -> &'a str {
    if handle.is_empty() { email } else { handle }
}

impl PartialEq for ResolvedOwner {
    fn eq(&self, other: &Self) -> bool {
        self.owner_type() == other.owner_type() && self.identifier() == other.identifier()
    }
}

impl Eq for ResolvedOwner {}

impl Hash for ResolvedOwner {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner_type().hash(state);
        self.identifier().hash(state);
    }
}

impl fmt::Display for ResolvedOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedOwner::Person(Person {
                user: Some(user), ..
            }) => f.write_str(user.display_name.as_deref().unwrap_or(&user.username)),
            ResolvedOwner::Team(Team {
                team: Some(team), ..
            }) => f.write_str(team.display_name.as_deref().unwrap_or(&team.name)),
            other if !other.handle().is_empty() => write!(f, "@{}", other.handle()),
            other => f.write_str(other.email()),
        }
    }
}

/// Resolves parsed owners against a directory of users and teams.
pub trait OwnerResolver {
    /// Error returned when the directory cannot be queried.
    type Error;

    /// Resolves a single owner.
    fn resolve(&self, owner: &Owner) -> Result<ResolvedOwner, Self::Error>;

    /// Resolves every owner, dropping duplicates while keeping order.
    fn resolve_all(&self, owners: &[Owner]) -> Result<Vec<ResolvedOwner>, Self::Error> {
        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(owners.len());
        for owner in owners {
            let owner = self.resolve(owner)?;
            if seen.insert(owner.clone()) {
                resolved.push(owner);
            }
        }
        Ok(resolved)
    }
}

/// A resolver that knows nobody: every owner becomes an unresolved person.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnresolvedOwners;

impl OwnerResolver for UnresolvedOwners {
    type Error = Infallible;

    fn resolve(&self, owner: &Owner) -> Result<ResolvedOwner, Infallible> {
        Ok(ResolvedOwner::unresolved(owner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn user(username: &str) -> UserIdentity {
        UserIdentity {
            id: 1,
            username: username.to_string(),
            display_name: None,
        }
    }

    fn resolved_person(username: &str, handle: &str) -> ResolvedOwner {
        ResolvedOwner::Person(Person {
            user: Some(user(username)),
            handle: handle.to_string(),
            ..Person::default()
        })
    }

    fn resolved_team(name: &str, members: &[&str]) -> ResolvedOwner {
        ResolvedOwner::Team(Team {
            team: Some(TeamIdentity {
                id: 9,
                name: name.to_string(),
                display_name: Some("The Team".to_string()),
                member_usernames: members.iter().map(|m| m.to_string()).collect(),
            }),
            handle: format!("org/{}", name),
            email: String::new(),
        })
    }

    #[test]
    fn unresolved_owner_identifiers() {
        let handle = ResolvedOwner::unresolved(&Owner::handle("alice"));
        assert_eq!(handle.identifier(), "Person:alice");
        assert_eq!(handle.owner_type(), OwnerType::Person);

        let email = ResolvedOwner::unresolved(&Owner::email("bob@example.com"));
        assert_eq!(email.identifier(), "Person:bob@example.com");
        assert_eq!(email.handle(), "");
        assert_eq!(email.email(), "bob@example.com");
    }

    #[test]
    fn resolved_identifiers_use_directory_names() {
        assert_eq!(resolved_person("alice", "al").identifier(), "User:alice");
        assert_eq!(resolved_team("core", &[]).identifier(), "Team:core");
        let any = ResolvedOwner::Any(AnyOwner {
            handle: "x".to_string(),
            email: String::new(),
        });
        assert_eq!(any.identifier(), "Any:x");
    }

    #[test]
    fn equality_requires_same_type() {
        let person = ResolvedOwner::unresolved(&Owner::handle("same"));
        let team = ResolvedOwner::Team(Team {
            handle: "same".to_string(),
            ..Team::default()
        });
        let any = ResolvedOwner::Any(AnyOwner {
            handle: "same".to_string(),
            ..AnyOwner::default()
        });
        assert_ne!(person, team);
        assert_ne!(person, any);
        assert_ne!(team, any);
    }

    #[test]
    fn same_user_through_different_handles_is_equal() {
        assert_eq!(resolved_person("alice", "al"), resolved_person("alice", "alice"));
    }

    #[test]
    fn team_includes_its_members() {
        let team = resolved_team("core", &["alice", "bob"]);
        assert!(team.includes(&team.clone()));
        assert!(team.includes(&resolved_person("alice", "alice")));
        assert!(!team.includes(&resolved_person("carol", "carol")));
        assert!(!team.includes(&ResolvedOwner::unresolved(&Owner::handle("alice"))));
        assert!(!resolved_person("alice", "alice").includes(&team));
    }

    #[test]
    fn set_owner_data_replaces_original_text() {
        let mut owner = resolved_team("core", &[]);
        owner.set_owner_data("org/core-team", "core@example.com");
        assert_eq!(owner.handle(), "org/core-team");
        assert_eq!(owner.email(), "core@example.com");
        assert_eq!(owner.identifier(), "Team:core");
    }

    #[test]
    fn display_prefers_directory_names() {
        assert_eq!(resolved_team("core", &[]).to_string(), "The Team");
        assert_eq!(resolved_person("alice", "al").to_string(), "alice");
        assert_eq!(
            ResolvedOwner::unresolved(&Owner::handle("x")).to_string(),
            "@x"
        );
        assert_eq!(
            ResolvedOwner::unresolved(&Owner::email("x@y.z")).to_string(),
            "x@y.z"
        );
    }

    #[test]
    fn unresolved_owners_resolver_deduplicates() {
        let owners = vec![
            Owner::handle("alice"),
            Owner::email("bob@example.com"),
            Owner::handle("alice"),
        ];
        let resolved = UnresolvedOwners.resolve_all(&owners).unwrap();
        let ids: Vec<String> = resolved.iter().map(ResolvedOwner::identifier).collect();
        assert_eq!(ids, vec!["Person:alice", "Person:bob@example.com"]);
    }

    struct Directory {
        users: HashMap<String, UserIdentity>,
    }

    impl OwnerResolver for Directory {
        type Error = String;

        fn resolve(&self, owner: &Owner) -> Result<ResolvedOwner, String> {
            let Owner::Handle(handle) = owner else {
                return Err(format!("cannot resolve {}", owner));
            };
            let mut resolved = match self.users.get(handle) {
                Some(user) => ResolvedOwner::Person(Person {
                    user: Some(user.clone()),
                    ..Person::default()
                }),
                None => ResolvedOwner::Any(AnyOwner::default()),
            };
            resolved.set_owner_data(handle.clone(), "");
            Ok(resolved)
        }
    }

    #[test]
    fn custom_resolver_errors_propagate() {
        let directory = Directory {
            users: HashMap::from([("al".to_string(), user("alice"))]),
        };
        let resolved = directory
            .resolve_all(&[Owner::handle("al"), Owner::handle("ghost")])
            .unwrap();
        assert_eq!(resolved[0].identifier(), "User:alice");
        assert_eq!(resolved[0].handle(), "al");
        assert_eq!(resolved[1].identifier(), "Any:ghost");

        let error = directory
            .resolve_all(&[Owner::email("x@example.com")])
            .unwrap_err();
        assert_eq!(error, "cannot resolve x@example.com");
    }
}
