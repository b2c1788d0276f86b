use crate::geometry::SizeClass;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlateKind {
    /// Horizontal street-name plate.
    Name,
    /// Horizontal house-number plate, optionally with neighbor arrows.
    Number,
    /// Vertical combined street + number plate.
    Vertical,
}

impl std::fmt::Display for PlateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlateKind::Name => f.write_str("name"),
            PlateKind::Number => f.write_str("number"),
            PlateKind::Vertical => f.write_str("vertical"),
        }
    }
}

impl std::str::FromStr for PlateKind {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "number" => Ok(Self::Number),
            "vertical" => Ok(Self::Vertical),
            _ => Err(()),
        }
    }
}

/// Raw plate input as it arrives from the outside world; every field may be missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlateRequest {
    pub kind: PlateKind,
    #[serde(default)]
    pub size: SizeClass,
    #[serde(default)]
    pub street_type: Option<String>,
    #[serde(default)]
    pub street_name: Option<String>,
    #[serde(default)]
    pub street_translit: Option<String>,
    #[serde(default)]
    pub house_number: Option<String>,
    #[serde(default)]
    pub left_number: Option<String>,
    #[serde(default)]
    pub right_number: Option<String>,
}

impl PlateRequest {
    pub fn new(kind: PlateKind, size: SizeClass) -> Self {
        Self {
            kind,
            size,
            street_type: None,
            street_name: None,
            street_translit: None,
            house_number: None,
            left_number: None,
            right_number: None,
        }
    }

    pub fn name(
        size: SizeClass,
        street_type: impl Into<String>,
        street_name: impl Into<String>,
        street_translit: impl Into<String>,
    ) -> Self {
        Self {
            street_type: Some(street_type.into()),
            street_name: Some(street_name.into()),
            street_translit: Some(street_translit.into()),
            ..Self::new(PlateKind::Name, size)
        }
    }

    pub fn number(size: SizeClass, house_number: impl Into<String>) -> Self {
        Self {
            house_number: Some(house_number.into()),
            ..Self::new(PlateKind::Number, size)
        }
    }

    pub fn vertical(
        size: SizeClass,
        street_type: impl Into<String>,
        street_name: impl Into<String>,
        street_translit: impl Into<String>,
        house_number: impl Into<String>,
    ) -> Self {
        Self {
            street_type: Some(street_type.into()),
            street_name: Some(street_name.into()),
            street_translit: Some(street_translit.into()),
            house_number: Some(house_number.into()),
            ..Self::new(PlateKind::Vertical, size)
        }
    }

    pub fn with_neighbors(mut self, left: Option<String>, right: Option<String>) -> Self {
        self.left_number = left;
        self.right_number = right;
        self
    }

    /// Checks that every field the plate kind needs is present.
    pub fn validate(&self) -> Result<PlateInput> {
        let kind = self.kind;
        let require = |value: &Option<String>, field: &'static str| {
            value
                .clone()
                .ok_or(Error::MissingRequiredField { kind, field })
        };

        Ok(match kind {
            PlateKind::Name => PlateInput::Name {
                size: self.size,
                street: StreetLabel {
                    street_type: require(&self.street_type, "street_type")?,
                    street_name: require(&self.street_name, "street_name")?,
                    street_translit: require(&self.street_translit, "street_translit")?,
                },
            },
            PlateKind::Number => PlateInput::Number {
                size: self.size,
                house_number: require(&self.house_number, "house_number")?,
                left_number: non_empty(&self.left_number),
                right_number: non_empty(&self.right_number),
            },
            PlateKind::Vertical => PlateInput::Vertical {
                size: self.size,
                street: StreetLabel {
                    street_type: require(&self.street_type, "street_type")?,
                    street_name: require(&self.street_name, "street_name")?,
                    street_translit: require(&self.street_translit, "street_translit")?,
                },
                house_number: require(&self.house_number, "house_number")?,
            },
        })
    }
}

// An empty neighbor means "no neighbor on this side".
fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreetLabel {
    pub street_type: String,
    pub street_name: String,
    pub street_translit: String,
}

/// A validated request: each variant holds exactly the fields its plate draws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlateInput {
    Name {
        size: SizeClass,
        street: StreetLabel,
    },
    Number {
        size: SizeClass,
        house_number: String,
        left_number: Option<String>,
        right_number: Option<String>,
    },
    Vertical {
        size: SizeClass,
        street: StreetLabel,
        house_number: String,
    },
}

impl PlateInput {
    pub fn kind(&self) -> PlateKind {
        match self {
            PlateInput::Name { .. } => PlateKind::Name,
            PlateInput::Number { .. } => PlateKind::Number,
            PlateInput::Vertical { .. } => PlateKind::Vertical,
        }
    }

    pub fn size(&self) -> SizeClass {
        match self {
            PlateInput::Name { size, .. }
            | PlateInput::Number { size, .. }
            | PlateInput::Vertical { size, .. } => *size,
        }
    }
}
