use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Address {
    pub state: String,
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Company {
    pub title: String,
}

/// One user entry as delivered by the record source.
/// Records are never modified once loaded, only reordered or hidden.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Record {
    #[serde(deserialize_with = "numeric")]
    pub id: f64,
    pub first_name: String,
    pub maiden_name: String,
    pub last_name: String,
    #[serde(deserialize_with = "numeric")]
    pub age: f64,
    pub gender: String,
    pub address: Address,
    pub company: Company,
    pub image: String,
}

/// Raw value of a single record field, ordered naturally within its kind.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum FieldValue<'a> {
    Number(f64),
    Text(&'a str),
}

impl Record {
    /// "first maiden last", the composite key shown in the Full Name column.
    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.first_name, self.maiden_name, self.last_name)
    }

    pub fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "id" => FieldValue::Number(self.id),
            "age" => FieldValue::Number(self.age),
            "firstName" => FieldValue::Text(&self.first_name),
            "maidenName" => FieldValue::Text(&self.maiden_name),
            "lastName" => FieldValue::Text(&self.last_name),
            "gender" => FieldValue::Text(&self.gender),
            "image" => FieldValue::Text(&self.image),
            "state" => FieldValue::Text(&self.address.state),
            "country" => FieldValue::Text(&self.address.country),
            "title" => FieldValue::Text(&self.company.title),
            _ => return None,
        };
        Some(value)
    }
}

// Sources are not consistent about numbers: accept 3, 3.0 and "3".
// Anything that does not parse coerces to NaN, which compares equal to everything.
fn numeric<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n,
        Raw::Text(s) if s.trim().is_empty() => 0.0,
        Raw::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
        Raw::Null(()) => 0.0,
    })
}

/// Renders a numeric field without a trailing ".0" for whole numbers.
pub fn display_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
