use serde::Deserialize;

/// Represents a single row from the input CSV file.
///
/// Every recognized column is optional: a missing column and an empty cell both
/// deserialize to `None`. Unrecognized columns are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "from", default)]
    pub source: Option<String>,
    #[serde(rename = "to", default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(rename = "from-shard", default)]
    pub source_shard: Option<String>,
    #[serde(rename = "to-shard", default)]
    pub destination_shard: Option<String>,
    #[serde(rename = "passphrase-file", default)]
    pub passphrase_file: Option<String>,
    #[serde(rename = "passphrase-string", default)]
    pub passphrase_string: Option<String>,
    #[serde(rename = "gas-price", default)]
    pub gas_price: Option<String>
}

impl RawRecord {
    /// A row with every recognized column empty is not a record at all.
    pub fn is_blank(&self) -> bool {
        [
            &self.source,
            &self.destination,
            &self.amount,
            &self.source_shard,
            &self.destination_shard,
            &self.gas_price
        ]
        .into_iter()
        .all(|value| trimmed_field(value).is_none())
            && secret_field(&self.passphrase_file).is_none()
            && secret_field(&self.passphrase_string).is_none()
    }
}

/// Non-secret cells are compared without surrounding whitespace.
pub fn trimmed_field(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

//NOTE: Secrets are taken verbatim, a passphrase may legitimately start or end with a space.
pub fn secret_field(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
