//! Trail information point (TIM) assessment records

use serde::{Deserialize, Serialize};

/// Physical condition of a signage item (stav)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TimItemCondition {
    /// 1 - new or like new
    New,
    /// 2 - slightly worn
    Worn,
    /// 3 - heavily worn, replace soon
    Damaged,
    /// 4 - unusable or missing
    Unusable,
}

impl TimItemCondition {
    pub fn label(&self) -> &'static str {
        match self {
            TimItemCondition::New => "nový",
            TimItemCondition::Worn => "zachovalý",
            TimItemCondition::Damaged => "poškozený",
            TimItemCondition::Unusable => "nepoužitelný",
        }
    }

    pub fn needs_replacement(&self) -> bool {
        matches!(self, TimItemCondition::Damaged | TimItemCondition::Unusable)
    }
}

impl TryFrom<u8> for TimItemCondition {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TimItemCondition::New),
            2 => Ok(TimItemCondition::Worn),
            3 => Ok(TimItemCondition::Damaged),
            4 => Ok(TimItemCondition::Unusable),
            other => Err(format!("invalid TIM item condition: {}", other)),
        }
    }
}

impl From<TimItemCondition> for u8 {
    fn from(condition: TimItemCondition) -> Self {
        match condition {
            TimItemCondition::New => 1,
            TimItemCondition::Worn => 2,
            TimItemCondition::Damaged => 3,
            TimItemCondition::Unusable => 4,
        }
    }
}

/// One item (arrow, plate, post...) installed at a TIM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimItem {
    #[serde(rename = "EvCi_Predmetu")]
    pub item_id: String,
    #[serde(rename = "Druh_Predmetu", default)]
    pub kind: Option<String>,
    #[serde(rename = "Stav", default)]
    pub condition: Option<TimItemCondition>,
    #[serde(rename = "Poznamka", default)]
    pub note: Option<String>,
}

/// Assessment of one TIM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimReport {
    #[serde(rename = "EvCi_Tim")]
    pub tim_id: String,
    #[serde(rename = "Naz_Tim", default)]
    pub name: Option<String>,
    #[serde(rename = "Predmety", default)]
    pub items: Vec<TimItem>,
}
