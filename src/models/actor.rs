use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Mover,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Mover => "mover",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        // Legacy sessions carry "customer" where newer ones say "client".
        match s.trim().to_lowercase().as_str() {
            "client" | "customer" => Some(Role::Client),
            "mover" => Some(Role::Mover),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// The authenticated user as delivered by the session layer. This crate only
/// reads the actor, it never mints or mutates one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    pub email: String,
    pub role: Role,
}
