use serde::{Deserialize, Deserializer, Serialize};

use crate::utils;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameDisplay {
    First,
    Last,
    Full,
}

impl NameDisplay {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "first" => Some(Self::First),
            "last" => Some(Self::Last),
            "full" => Some(Self::Full),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UserName {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub first: String,
    #[serde(default)]
    pub last: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Street {
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Location {
    #[serde(default)]
    pub street: Street,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default, deserialize_with = "postcode_to_string")]
    pub postcode: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Picture {
    #[serde(default)]
    pub large: String,
    #[serde(default)]
    pub medium: String,
    #[serde(default)]
    pub thumbnail: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UserRecord {
    #[serde(default)]
    pub gender: String,
    pub name: UserName,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub cell: String,
    #[serde(default)]
    pub picture: Picture,
    #[serde(default)]
    pub nat: String,
    // local address override set by an edit, never sent anywhere
    #[serde(skip)]
    pub edited_address: Option<String>,
}

// the API returns postcodes as numbers for some locales and strings for others
fn postcode_to_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        _ => Ok(String::new()),
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ApiInfo {
    #[serde(default)]
    pub seed: String,
    #[serde(default)]
    pub results: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub version: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ApiResponse {
    pub results: Vec<UserRecord>,
    pub info: Option<ApiInfo>,
}

// the edit-form value object; empty fields keep the record's current value
#[derive(Clone, Debug, Default)]
pub struct RecordDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl UserRecord {
    pub fn display_name(&self, mode: NameDisplay) -> String {
        match mode {
            NameDisplay::First => self.name.first.clone(),
            NameDisplay::Last => self.name.last.clone(),
            NameDisplay::Full => self.full_name(),
        }
    }

    pub fn full_name(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for part in [
            self.name.title.as_str(),
            self.name.first.as_str(),
            self.name.last.as_str(),
        ] {
            if !part.trim().is_empty() {
                parts.push(part.trim());
            }
        }
        parts.join(" ")
    }

    pub fn gender_label(&self) -> String {
        utils::capitalize_ascii(self.gender.trim())
    }

    pub fn postal_address(&self) -> String {
        if let Some(edited) = self.edited_address.as_deref() {
            return edited.to_string();
        }
        format!(
            "{} {}, {}, {} {}, {}",
            self.location.street.number,
            self.location.street.name,
            self.location.city,
            self.location.state,
            self.location.postcode,
            self.location.country,
        )
    }

    pub fn apply_draft(&mut self, draft: &RecordDraft) {
        let name = draft.name.trim();
        if !name.is_empty() {
            let parts: Vec<&str> = name.split_whitespace().collect();
            match parts.len() {
                0 => {}
                1 => {
                    self.name.first = parts[0].to_string();
                    self.name.last = String::new();
                }
                2 => {
                    self.name.first = parts[0].to_string();
                    self.name.last = parts[1].to_string();
                }
                _ => {
                    self.name.title = parts[0].to_string();
                    self.name.first = parts[1].to_string();
                    self.name.last = parts[2..].join(" ");
                }
            }
        }

        let email = draft.email.trim();
        if !email.is_empty() {
            self.email = email.to_string();
        }

        let phone = draft.phone.trim();
        if !phone.is_empty() {
            self.phone = phone.to_string();
        }

        let address = draft.address.trim();
        if !address.is_empty() {
            self.edited_address = Some(address.to_string());
        }
    }
}
