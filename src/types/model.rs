use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A chat-completion model identifier.
///
/// This can be a predefined model or a custom string value for models that are not listed
/// here.  Both forms serialize as the bare model name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    /// Known model versions
    Known(KnownModel),

    /// Custom model identifier (for future models or private deployments)
    Custom(String),
}

/// Known chat-completion models.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KnownModel {
    /// GPT-5.1, the model the cost assistant was tuned against.
    Gpt51,

    /// GPT-5
    Gpt5,

    /// GPT-5 mini
    Gpt5Mini,

    /// GPT-4.1
    Gpt41,

    /// GPT-4o
    Gpt4o,

    /// GPT-4o mini
    Gpt4oMini,
}

impl KnownModel {
    /// Every known model, in display order.
    pub const ALL: [KnownModel; 6] = [
        KnownModel::Gpt51,
        KnownModel::Gpt5,
        KnownModel::Gpt5Mini,
        KnownModel::Gpt41,
        KnownModel::Gpt4o,
        KnownModel::Gpt4oMini,
    ];

    /// The wire name of the model.
    pub fn as_str(&self) -> &'static str {
        match self {
            KnownModel::Gpt51 => "gpt-5.1",
            KnownModel::Gpt5 => "gpt-5",
            KnownModel::Gpt5Mini => "gpt-5-mini",
            KnownModel::Gpt41 => "gpt-4.1",
            KnownModel::Gpt4o => "gpt-4o",
            KnownModel::Gpt4oMini => "gpt-4o-mini",
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::Known(KnownModel::Gpt51)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Known(known_model) => write!(f, "{}", known_model),
            Model::Custom(custom) => write!(f, "{}", custom),
        }
    }
}

impl fmt::Display for KnownModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Model {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(KnownModel::ALL
            .iter()
            .find(|known| known.as_str() == s)
            .map(|known| Model::Known(*known))
            .unwrap_or_else(|| Model::Custom(s.to_string())))
    }
}

impl From<KnownModel> for Model {
    fn from(model: KnownModel) -> Self {
        Model::Known(model)
    }
}

impl Serialize for Model {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let Ok(model) = s.parse::<Model>();
        Ok(model)
    }
}
