use serde::Deserialize;

/// One member entry of the JSON export.
///
/// Every field is optional at decode time; presence rules are applied by
/// [`crate::validation::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MemberRecord {
    #[serde(rename = "CardNo", default, deserialize_with = "deserialize_text")]
    pub card_no: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub lastname: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub email: Option<String>,
    #[serde(rename = "BIRTHDAY", default, deserialize_with = "deserialize_text")]
    pub birthday: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub street: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub acc_startdate: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub acc_enddate: Option<String>,
    #[serde(rename = "USERID", default, deserialize_with = "deserialize_text")]
    pub user_id: Option<String>,
}

impl MemberRecord {
    /// Label used in log lines: "name lastname", or a placeholder when the
    /// export carries neither.
    pub fn label(&self) -> String {
        let parts: Vec<&str> = [self.name.as_deref(), self.lastname.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if parts.is_empty() {
            "<unnamed record>".to_string()
        } else {
            parts.join(" ")
        }
    }
}

/// Accepts strings, numbers and booleans as text. Numeric card numbers and
/// user ids show up in some exports.
fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let value: serde_json::Value = serde::Deserialize::deserialize(deserializer)?;

    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        serde_json::Value::Bool(b) => Ok(Some(b.to_string())),
        _ => Err(D::Error::custom("expected a string, number or null")),
    }
}
