//! Entity value types. Each maps 1:1 to a table; references between entities are plain ids.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What the generic service needs to know about any entity it stores.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
    /// The same entity carrying the identity the store generated for it.
    fn with_id(self, id: i64) -> Self;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

impl Client {
    pub fn new(name: impl Into<String>) -> Self {
        Client {
            id: 0,
            name: name.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Trainee,
    Junior,
    Middle,
    Senior,
}

impl Level {
    /// Stored form in the `worker.level` column.
    pub fn as_db_str(&self) -> &'static str {
        match self {
            Level::Trainee => "trainee",
            Level::Junior => "junior",
            Level::Middle => "middle",
            Level::Senior => "senior",
        }
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trainee" => Ok(Level::Trainee),
            "junior" => Ok(Level::Junior),
            "middle" => Ok(Level::Middle),
            "senior" => Ok(Level::Senior),
            _ => Err(format!("unknown level: {}", s)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    /// `dateOfBirth` on the wire in both directions; `date_of_birth` is still accepted on input.
    #[serde(rename = "dateOfBirth", alias = "date_of_birth", with = "crate::mapper::wire::date_format")]
    pub date_of_birth: NaiveDate,
    pub email: String,
    pub level: Level,
    pub salary: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub client_id: i64,
    #[serde(with = "crate::mapper::wire::date_format")]
    pub start_date: NaiveDate,
    /// `None` for ongoing projects.
    #[serde(default, with = "crate::mapper::wire::option_date_format")]
    pub finish_date: Option<NaiveDate>,
}

impl Entity for Client {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn with_id(self, id: i64) -> Self {
        Client { id, ..self }
    }
}

impl Entity for Worker {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn with_id(self, id: i64) -> Self {
        Worker { id, ..self }
    }
}

impl Entity for Project {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn with_id(self, id: i64) -> Self {
        Project { id, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parses_any_case() {
        assert_eq!("SENIOR".parse::<Level>().unwrap(), Level::Senior);
        assert_eq!("junior".parse::<Level>().unwrap(), Level::Junior);
        assert!("lead".parse::<Level>().is_err());
        assert_eq!(Level::Middle.as_db_str(), "middle");
    }

    #[test]
    fn with_id_keeps_other_fields() {
        let c = Client::new("Milky Meow Co.").with_id(3);
        assert_eq!(c.id(), 3);
        assert_eq!(c.name(), "Milky Meow Co.");
    }
}
