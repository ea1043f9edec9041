//! Load-time error types.
//!
//! Catalog and tuning problems are detected once, before a session can start.
//! Runtime operations never fail with these: they report success through
//! `bool`/`Option` returns and log a warning instead.

use std::fmt;

/// A static catalog failed validation. Fatal: the game cannot start.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Two catalog entries share an id.
    DuplicateId { id: &'static str },
    /// The catalog holds the wrong number of entries.
    WrongCount {
        catalog: &'static str,
        expected: usize,
        got: usize,
    },
    /// A numeric field that must be strictly positive is not.
    NonPositive {
        id: &'static str,
        field: &'static str,
        value: f64,
    },
    /// A required text field is empty.
    EmptyField {
        id: &'static str,
        field: &'static str,
    },
    /// An enemy references a word pool that does not exist or is empty.
    BadWordPool {
        id: &'static str,
        pool: Option<&'static str>,
    },
    /// A tier holds the wrong number of items.
    TierCount {
        tier: &'static str,
        expected: usize,
        got: usize,
    },
    /// Legendary items may only stack once.
    LegendaryStacks { id: &'static str, max_stacks: u32 },
    /// Tier drop weights must sum to 100.
    TierWeights { total: u32 },
    /// A synergy names an item that is not in the catalog.
    UnknownSynergyItem {
        synergy: &'static str,
        item: &'static str,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::DuplicateId { id } => write!(f, "duplicate catalog id '{}'", id),
            CatalogError::WrongCount {
                catalog,
                expected,
                got,
            } => write!(f, "{} catalog has {} entries, expected {}", catalog, got, expected),
            CatalogError::NonPositive { id, field, value } => {
                write!(f, "'{}' has non-positive {} ({})", id, field, value)
            }
            CatalogError::EmptyField { id, field } => write!(f, "'{}' has an empty {}", id, field),
            CatalogError::BadWordPool { id, pool } => match pool {
                Some(pool) => write!(f, "'{}' references missing or empty word pool '{}'", id, pool),
                None => write!(f, "'{}' has no word pool but is not the echo type", id),
            },
            CatalogError::TierCount {
                tier,
                expected,
                got,
            } => write!(f, "tier {} has {} items, expected {}", tier, got, expected),
            CatalogError::LegendaryStacks { id, max_stacks } => {
                write!(f, "legendary '{}' has maxStacks {}, must be 1", id, max_stacks)
            }
            CatalogError::TierWeights { total } => {
                write!(f, "tier drop weights sum to {}, expected 100", total)
            }
            CatalogError::UnknownSynergyItem { synergy, item } => {
                write!(f, "synergy '{}' references unknown item '{}'", synergy, item)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Tuning data could not be parsed or holds an unusable value.
#[derive(Debug)]
pub enum TuningError {
    /// The JSON document is malformed.
    Parse(serde_json::Error),
    /// A value is outside its safe range.
    OutOfRange {
        name: &'static str,
        value: f32,
        safe_range: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(err) => write!(f, "failed to parse tuning: {}", err),
            TuningError::OutOfRange {
                name,
                value,
                safe_range,
            } => write!(f, "tuning value {} = {} is outside {}", name, value, safe_range),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(err) => Some(err),
            TuningError::OutOfRange { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}

/// Anything that prevents a game from being constructed.
#[derive(Debug)]
pub enum GameError {
    Catalog(CatalogError),
    Tuning(TuningError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Catalog(err) => write!(f, "invalid catalog: {}", err),
            GameError::Tuning(err) => write!(f, "invalid tuning: {}", err),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Catalog(err) => Some(err),
            GameError::Tuning(err) => Some(err),
        }
    }
}

impl From<CatalogError> for GameError {
    fn from(err: CatalogError) -> Self {
        GameError::Catalog(err)
    }
}

impl From<TuningError> for GameError {
    fn from(err: TuningError) -> Self {
        GameError::Tuning(err)
    }
}
