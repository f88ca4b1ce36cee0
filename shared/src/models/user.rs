//! User and Role Model (collection `usuarios`)

use serde::{Deserialize, Serialize};

/// Staff role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "garcom")]
    Waiter,
    #[serde(rename = "caixa")]
    Cashier,
    #[serde(rename = "cozinha")]
    Kitchen,
    #[serde(rename = "admin")]
    Admin,
}

/// Operations gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Build a cart and send it to a tab
    PlaceOrder,
    /// novo -> pago
    ConfirmPayment,
    /// pago -> pronto
    MarkReady,
    ViewReports,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiter => "garcom",
            Self::Cashier => "caixa",
            Self::Kitchen => "cozinha",
            Self::Admin => "admin",
        }
    }

    pub fn can(&self, permission: Permission) -> bool {
        match permission {
            Permission::PlaceOrder => matches!(self, Self::Waiter | Self::Cashier),
            Permission::ConfirmPayment => matches!(self, Self::Cashier | Self::Admin),
            Permission::MarkReady => matches!(self, Self::Kitchen | Self::Admin),
            Permission::ViewReports => matches!(self, Self::Cashier | Self::Admin),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity
///
/// The password is stored and compared in plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "nome_usuario")]
    pub username: String,
    #[serde(rename = "senha", default)]
    pub password: String,
    #[serde(rename = "cargo")]
    pub role: Role,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_permissions() {
        assert!(Role::Waiter.can(Permission::PlaceOrder));
        assert!(Role::Cashier.can(Permission::PlaceOrder));
        assert!(!Role::Kitchen.can(Permission::PlaceOrder));

        assert!(Role::Cashier.can(Permission::ConfirmPayment));
        assert!(Role::Admin.can(Permission::ConfirmPayment));
        assert!(!Role::Waiter.can(Permission::ConfirmPayment));

        assert!(Role::Kitchen.can(Permission::MarkReady));
        assert!(Role::Admin.can(Permission::MarkReady));
        assert!(!Role::Cashier.can(Permission::MarkReady));
    }

    #[test]
    fn test_user_document() {
        let user: User = serde_json::from_str(
            r#"{"nome_usuario": "joao", "senha": "123", "cargo": "garcom"}"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::Waiter);
        assert_eq!(user.password, "123");
        assert!(serde_json::from_str::<User>(r#"{"nome_usuario": "x", "cargo": "gerente"}"#).is_err());
    }
}
