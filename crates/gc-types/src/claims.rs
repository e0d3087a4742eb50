use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub status: String,
    #[serde(default)]
    pub admin_response: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Claim {
    pub fn is_open(&self) -> bool {
        self.status.eq_ignore_ascii_case("pending") || self.status.eq_ignore_ascii_case("open")
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRequest {
    pub description: String,
    pub image_url: Option<String>,
}

impl ClaimRequest {
    /// Trims the form input; a blank image URL is sent as `null`.
    pub fn from_form(description: &str, imageUrl: &str) -> Option<Self> {
        let description = description.trim();
        if description.is_empty() {
            return None;
        }
        let imageUrl = imageUrl.trim();
        Some(Self {
            description: description.to_string(),
            image_url: (!imageUrl.is_empty()).then(|| imageUrl.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_description_is_rejected() {
        assert!(ClaimRequest::from_form("   ", "").is_none());
        let request = ClaimRequest::from_form(" Missing credit ", " ").unwrap();
        assert_eq!(request.description, "Missing credit");
        assert_eq!(request.image_url, None);
    }
}
