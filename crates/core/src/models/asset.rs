use serde::{Deserialize, Serialize};

/// Coarse category of a holding, used for allocation grouping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    /// Shares (Сбербанк, Газпром, Яндекс, ...)
    #[default]
    Equity,
    /// Government and corporate bonds (ОФЗ, ...)
    Bond,
    /// Cash positions in foreign currency (USD, EUR, ...)
    Currency,
    /// Anything else
    Other,
}

impl AssetClass {
    /// Every class, in display order.
    pub const ALL: [AssetClass; 4] = [
        AssetClass::Equity,
        AssetClass::Bond,
        AssetClass::Currency,
        AssetClass::Other,
    ];

    /// Russian label shown in the asset table and the add-asset form.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            AssetClass::Equity => "Акции",
            AssetClass::Bond => "Облигации",
            AssetClass::Currency => "Валюта",
            AssetClass::Other => "Другое",
        }
    }

    /// Series colour used by the allocation charts.
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            AssetClass::Equity => "#8B5CF6",
            AssetClass::Bond => "#3B82F6",
            AssetClass::Currency => "#10B981",
            AssetClass::Other => "#F59E0B",
        }
    }

    /// Parse either the English name or the Russian label (case-insensitive).
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let needle = input.trim().to_lowercase();
        Self::ALL.into_iter().find(|class| {
            class.to_string().to_lowercase() == needle || class.label().to_lowercase() == needle
        })
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetClass::Equity => write!(f, "Equity"),
            AssetClass::Bond => write!(f, "Bond"),
            AssetClass::Currency => write!(f, "Currency"),
            AssetClass::Other => write!(f, "Other"),
        }
    }
}
