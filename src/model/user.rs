use std::fmt;

use ratatui::layout::Constraint;
use serde::{Deserialize, Serialize};

use crate::model::Resource;
use crate::table::Column;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Station manager with back-office access.
    Dmj,
    #[serde(rename = "auditeur")]
    Listener,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dmj => f.write_str("DMJ"),
            Self::Listener => f.write_str("Auditeur"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    #[serde(rename = "prenom")]
    pub first_name: String,
    #[serde(rename = "nom")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "telephone", default)]
    pub phone: String,
    #[serde(rename = "adresse", default)]
    pub address: Option<String>,
    pub role: Role,
    #[serde(rename = "photo_profil", default)]
    pub photo: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Resource for User {
    type Key = u32;

    const NAME: &'static str = "users";
    const TITLE: &'static str = "Users";

    fn key(&self) -> u32 {
        self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("id", "ID", |u: &Self| format!("#{}", u.id))
                .width(Constraint::Length(6))
                .sort_by_key(|u| u.id),
            Column::new("user", "User", Self::full_name).sort_by_key(|u| {
                (u.last_name.to_lowercase(), u.first_name.to_lowercase())
            }),
            Column::new("email", "Email", |u: &Self| u.email.clone()).width(Constraint::Fill(2)),
            Column::new("contact", "Contact", |u: &Self| {
                format!("{} · {}", u.phone, u.address.as_deref().unwrap_or("N/A"))
            })
            .width(Constraint::Fill(2)),
            Column::new("role", "Role", |u: &Self| u.role.to_string())
                .width(Constraint::Length(10))
                .sort_by_key(|u| u.role),
        ]
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
        ]
    }

    const FACET: Option<&'static str> = Some("Role");

    fn facet_values() -> Vec<String> {
        [Role::Dmj, Role::Listener].iter().map(ToString::to_string).collect()
    }

    fn facet(&self) -> Option<String> {
        Some(self.role.to_string())
    }

    fn csv_headers() -> &'static [&'static str] {
        &["ID", "First Name", "Last Name", "Email", "Phone", "Address", "Role"]
    }

    fn csv_record(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.address.clone().unwrap_or_default(),
            self.role.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_backend_shape() {
        let json = r#"{
            "id": 2,
            "prenom": "Jean",
            "nom": "Dupont",
            "email": "jean.dupont@radio.fr",
            "telephone": "+33687654321",
            "adresse": null,
            "role": "auditeur"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();

        assert_eq!(user.full_name(), "Jean Dupont");
        assert_eq!(user.role, Role::Listener);
        assert_eq!(user.address, None);
        assert_eq!(user.csv_record()[5], "");
    }

    #[test]
    fn test_contact_column_falls_back_for_missing_address() {
        let user = User {
            id: 1,
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
            email: "admin@test.com".to_string(),
            phone: "+33612345678".to_string(),
            address: None,
            role: Role::Dmj,
            photo: None,
        };
        let columns = User::columns();
        let contact = columns.iter().find(|c| c.id == "contact").unwrap();
        assert_eq!(contact.value(&user), "+33612345678 · N/A");
        let role = columns.iter().find(|c| c.id == "role").unwrap();
        assert_eq!(role.value(&user), "DMJ");
    }
}
