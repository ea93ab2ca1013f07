use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserItem {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub user_id: String,
    pub role: String,
}

impl UserItem {
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("admin")
    }
}

/// A workspace together with the users holding a role in it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WorkspaceUsers {
    pub property_id: String,
    pub property_name: String,
    #[serde(rename = "totalUsers")]
    pub total_users: u64,
    #[serde(default)]
    pub users: Vec<UserItem>,
}

impl WorkspaceUsers {
    pub fn admin_count(&self) -> usize {
        self.users.iter().filter(|user| user.is_admin()).count()
    }
}
