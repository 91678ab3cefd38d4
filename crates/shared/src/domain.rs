use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(HistoryId);

/// Disclosure standard a generation request should keep in mind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Framework {
    Csrd,
    Sasb,
    Gri,
    Cdp,
}

impl Framework {
    /// Every framework, in declared order. Request framework lists follow this order.
    pub const ALL: [Framework; 4] = [
        Framework::Csrd,
        Framework::Sasb,
        Framework::Gri,
        Framework::Cdp,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Framework::Csrd => "CSRD",
            Framework::Sasb => "SASB",
            Framework::Gri => "GRI",
            Framework::Cdp => "CDP",
        }
    }

    pub fn position(self) -> usize {
        match self {
            Framework::Csrd => 0,
            Framework::Sasb => 1,
            Framework::Gri => 2,
            Framework::Cdp => 3,
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Regulatory,
    InvestorFriendly,
}

impl Tone {
    pub fn label(self) -> &'static str {
        match self {
            Tone::Regulatory => "Regulatory",
            Tone::InvestorFriendly => "Investor friendly",
        }
    }
}
