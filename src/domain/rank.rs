//! Rank scale shared by epic missions and the player profile.

use serde::{Deserialize, Serialize};

/// Ordinal difficulty tier, F (lowest) through SSS (highest).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Rank {
    F,
    E,
    D,
    C,
    B,
    A,
    S,
    SS,
    SSS,
}

/// The full chain in ascending order.
pub static RANK_CHAIN: &[Rank] = &[
    Rank::F,
    Rank::E,
    Rank::D,
    Rank::C,
    Rank::B,
    Rank::A,
    Rank::S,
    Rank::SS,
    Rank::SSS,
];

impl Rank {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::F => "F",
            Self::E => "E",
            Self::D => "D",
            Self::C => "C",
            Self::B => "B",
            Self::A => "A",
            Self::S => "S",
            Self::SS => "SS",
            Self::SSS => "SSS",
        }
    }

    /// Successor rank in the chain, None after SSS.
    pub fn next(self) -> Option<Rank> {
        let idx = RANK_CHAIN.iter().position(|r| *r == self)?;
        RANK_CHAIN.get(idx + 1).copied()
    }

    /// Profile rank derived from level. Never stored; always recomputed.
    pub fn for_level(level: u32) -> Rank {
        match level {
            0..=5 => Self::F,
            6..=15 => Self::E,
            16..=30 => Self::D,
            31..=45 => Self::C,
            46..=60 => Self::B,
            61..=75 => Self::A,
            76..=85 => Self::S,
            86..=90 => Self::SS,
            _ => Self::SSS,
        }
    }

    /// Display title for a profile holding this rank.
    pub fn title(&self) -> &'static str {
        match self {
            Self::F => "Novice",
            Self::E => "Initiate",
            Self::D => "Adept",
            Self::C => "Journeyman",
            Self::B => "Veteran",
            Self::A => "Elite",
            Self::S => "Master",
            Self::SS => "Grandmaster",
            Self::SSS => "Legendary",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_for_level_breakpoints() {
        assert_eq!(Rank::for_level(1), Rank::F);
        assert_eq!(Rank::for_level(5), Rank::F);
        assert_eq!(Rank::for_level(6), Rank::E);
        assert_eq!(Rank::for_level(90), Rank::SS);
        assert_eq!(Rank::for_level(91), Rank::SSS);
        assert_eq!(Rank::for_level(500), Rank::SSS);
    }

    #[test]
    fn test_rank_chain_order() {
        assert_eq!(Rank::F.next(), Some(Rank::E));
        assert_eq!(Rank::SS.next(), Some(Rank::SSS));
        assert_eq!(Rank::SSS.next(), None);
        assert!(Rank::F < Rank::SSS);
    }
}
