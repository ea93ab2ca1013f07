use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Client {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub mobile_number: String,
    pub email: String,
    pub message: Option<String>,
    pub status: String, // "new" | "active" | "closed" | ...
    pub meta: Option<ClientMeta>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ClientMeta {
    pub ray_id: Option<String>,
    pub login_session: Option<LoginSession>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct LoginSession {
    pub from_route: Option<String>,
    pub submitted_at: Option<String>,
    pub location: Option<SessionLocation>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SessionLocation {
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub ip: Option<String>,
}

impl Client {
    /// "City, Country" of the submitting session, when the backend recorded it.
    pub fn location_label(&self) -> Option<String> {
        let location = self
            .meta
            .as_ref()?
            .login_session
            .as_ref()?
            .location
            .as_ref()?;

        let parts: Vec<&str> = [location.city.as_deref(), location.country.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();

        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_client() {
        let raw = json!({
            "_id": "c1",
            "name": "Ada",
            "mobile_number": "+44 1234",
            "email": "ada@example.com",
            "status": "new",
            "meta": {
                "ray_id": "r-1",
                "login_session": {
                    "location": { "city": "London", "country": "UK" }
                }
            },
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-02T00:00:00Z",
            "__v": 0
        });

        let client: Client = serde_json::from_value(raw).unwrap();
        assert_eq!(client.id, "c1");
        assert_eq!(client.message, None);
        assert_eq!(client.location_label().as_deref(), Some("London, UK"));
    }
}
