use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CredentialError;

/// The set of claims asserted about a credential subject.
///
/// Well-known broker claims are modeled first-class with checked accessors;
/// everything else is opaque pass-through data in `extra`, flattened into
/// the same JSON object. Field order is fixed and `extra` is a `BTreeMap`,
/// so serialization is canonical.
///
/// Deserialization routes every key through the same logic as
/// [`ClaimSet::with_claims`], so a claim set always parses back to the
/// exact struct that produced its JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSet {
    /// DID of the subject.
    pub id: String,
    /// Human-readable subject name.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_licensed_broker: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraud_conviction_record_status: Option<String>,
    /// Open extension claims, serialized alongside the well-known ones.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ClaimSet {
    /// Default claims for a subject: its DID and display name.
    pub fn new(subject_did: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: subject_did.into(),
            name: name.into(),
            license_number: None,
            phone: None,
            is_licensed_broker: None,
            fraud_conviction_record_status: None,
            extra: BTreeMap::new(),
        }
    }

    /// Overlay caller-supplied claims; caller keys win over defaults.
    ///
    /// Keys matching a well-known optional claim (with the expected JSON
    /// type) are routed into the typed field; anything else lands in
    /// `extra` verbatim. `id` and `name` must be strings — they are always
    /// serialized from the typed fields, so a non-string value here would
    /// otherwise emit the key twice.
    pub fn with_claims(mut self, claims: BTreeMap<String, Value>) -> Result<Self, CredentialError> {
        for (key, value) in claims {
            self.set_claim(key, value)?;
        }
        Ok(self)
    }

    fn set_claim(&mut self, key: String, value: Value) -> Result<(), CredentialError> {
        match (key.as_str(), value) {
            ("id", Value::String(s)) => self.id = s,
            ("name", Value::String(s)) => self.name = s,
            ("id" | "name", _) => return Err(CredentialError::InvalidClaim(key)),
            ("licenseNumber", Value::String(s)) => self.license_number = Some(s),
            ("phone", Value::String(s)) => self.phone = Some(s),
            ("isLicensedBroker", Value::Bool(b)) => self.is_licensed_broker = Some(b),
            ("fraudConvictionRecordStatus", Value::String(s)) => {
                self.fraud_conviction_record_status = Some(s)
            }
            (_, value) => {
                self.extra.insert(key, value);
            }
        }
        Ok(())
    }

    /// Look up an extension claim.
    pub fn get_extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

impl<'de> Deserialize<'de> for ClaimSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let mut fields = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let id = match fields.remove("id") {
            Some(Value::String(s)) => s,
            Some(_) => return Err(D::Error::custom("claim id must be a string")),
            None => return Err(D::Error::missing_field("id")),
        };
        let name = match fields.remove("name") {
            Some(Value::String(s)) => s,
            Some(_) => return Err(D::Error::custom("claim name must be a string")),
            None => return Err(D::Error::missing_field("name")),
        };

        let mut set = Self::new(id, name);
        for (key, value) in fields {
            set.set_claim(key, value).map_err(D::Error::custom)?;
        }
        Ok(set)
    }
}
