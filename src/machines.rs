//! Machine name identifiers used as registry keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five registered lifecycle machines.
///
/// Used only to key the registry; entities themselves never carry a
/// machine name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MachineName {
    Order,
    Escrow,
    Negotiation,
    Dispute,
    Product,
}

impl MachineName {
    /// Every registered machine.
    pub const ALL: &'static [Self] = &[
        Self::Order,
        Self::Escrow,
        Self::Negotiation,
        Self::Dispute,
        Self::Product,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Order => "ORDER",
            Self::Escrow => "ESCROW",
            Self::Negotiation => "NEGOTIATION",
            Self::Dispute => "DISPUTE",
            Self::Product => "PRODUCT",
        }
    }
}

impl fmt::Display for MachineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MachineName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ORDER" => Ok(Self::Order),
            "ESCROW" => Ok(Self::Escrow),
            "NEGOTIATION" => Ok(Self::Negotiation),
            "DISPUTE" => Ok(Self::Dispute),
            "PRODUCT" => Ok(Self::Product),
            _ => Err(format!("Invalid machine name: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_machine_name_round_trip() {
        for machine in MachineName::ALL {
            assert_eq!(
                machine.as_str().parse::<MachineName>().unwrap(),
                *machine
            );
        }
    }

    #[test]
    fn test_unknown_machine_name_rejected() {
        assert!("PAYMENT".parse::<MachineName>().is_err());
        assert!("order".parse::<MachineName>().is_err());
    }

    #[test]
    fn test_machine_name_serde() {
        let json = serde_json::to_string(&MachineName::Negotiation).unwrap();
        assert_eq!(json, "\"NEGOTIATION\"");
    }
}
