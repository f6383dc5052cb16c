//! Seller identifier derivation
//!
//! A name is normalized into word tokens, then an ordered list of candidate
//! strategies is tried for that token count. The first candidate that fits in
//! [`MAX_SELLER_IDENTIFIER_LEN`] characters wins; when none fits, all tokens
//! are concatenated and truncated. Names with no usable token map to
//! `UNKNOWN`.
//!
//! Callers with narrower columns truncate the result themselves with
//! [`SellerIdentifier::truncated`]; the budget here never changes.

use tracing::debug;

use crate::domain::normalizer::normalize_name;
use crate::domain::value_objects::{SellerIdentifier, MAX_SELLER_IDENTIFIER_LEN};

/// Length of each half kept by [`Strategy::ClippedHalves`].
const CLIPPED_HALF_LEN: usize = 7;

/// Candidate generators, in the order they are tried.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `JEAN` + `D`
    FirstNameLastInitial,
    /// `J` + `DUPONT`
    FirstInitialLastName,
    /// first seven characters of each name
    ClippedHalves,
    /// `SOCIETE` + `G` + `H`
    FirstNameSurnameInitials,
    /// `J` + first surname
    FirstInitialFirstSurname,
}

const TWO_TOKEN_STRATEGIES: &[Strategy] = &[
    Strategy::FirstNameLastInitial,
    Strategy::FirstInitialLastName,
    Strategy::ClippedHalves,
];

const MULTI_TOKEN_STRATEGIES: &[Strategy] = &[
    Strategy::FirstNameSurnameInitials,
    Strategy::FirstInitialFirstSurname,
];

impl Strategy {
    /// Strategies that apply to a name with `token_count` words, in priority order.
    pub fn for_token_count(token_count: usize) -> &'static [Strategy] {
        match token_count {
            0 | 1 => &[],
            2 => TWO_TOKEN_STRATEGIES,
            _ => MULTI_TOKEN_STRATEGIES,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::FirstNameLastInitial => "first_name_last_initial",
            Self::FirstInitialLastName => "first_initial_last_name",
            Self::ClippedHalves => "clipped_halves",
            Self::FirstNameSurnameInitials => "first_name_surname_initials",
            Self::FirstInitialFirstSurname => "first_initial_first_surname",
        }
    }

    /// Builds this strategy's candidate, or `None` when the token shape does not apply.
    pub fn candidate(self, tokens: &[&str]) -> Option<String> {
        match (self, tokens) {
            (Self::FirstNameLastInitial, [first, last]) => Some(format!("{first}{}", prefix(last, 1))),
            (Self::FirstInitialLastName, [first, last]) => Some(format!("{}{last}", prefix(first, 1))),
            (Self::ClippedHalves, [first, last]) => Some(format!(
                "{}{}",
                prefix(first, CLIPPED_HALF_LEN),
                prefix(last, CLIPPED_HALF_LEN)
            )),
            (Self::FirstNameSurnameInitials, [first, rest @ ..]) if rest.len() >= 2 => {
                let initials: String = rest.iter().map(|t| prefix(t, 1)).collect();
                Some(format!("{first}{initials}"))
            }
            (Self::FirstInitialFirstSurname, [first, surname, rest @ ..]) if !rest.is_empty() => {
                Some(format!("{}{surname}", prefix(first, 1)))
            }
            _ => None,
        }
    }
}

/// How an identifier was arrived at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// No usable token in the name.
    Unknown,
    /// A strategy's candidate fit the budget.
    Candidate(Strategy),
    /// All tokens joined and cut to the budget.
    Concatenated,
}

impl Selection {
    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Candidate(strategy) => strategy.name(),
            Self::Concatenated => "concatenated",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Derivation {
    pub identifier: SellerIdentifier,
    pub selection: Selection,
}

/// Derives the seller identifier for a full name. Never fails.
pub fn derive_seller_identifier(full_name: &str) -> SellerIdentifier {
    explain(full_name).identifier
}

/// Same as [`derive_seller_identifier`], with an absent name treated as empty.
pub fn derive_from_option(full_name: Option<&str>) -> SellerIdentifier {
    derive_seller_identifier(full_name.unwrap_or_default())
}

/// Derives the identifier and reports which rule produced it.
pub fn explain(full_name: &str) -> Derivation {
    let normalized = normalize_name(full_name);
    let tokens = normalized.tokens();

    if tokens.is_empty() {
        debug!("no usable token in seller name, using sentinel");
        return Derivation { identifier: SellerIdentifier::unknown(), selection: Selection::Unknown };
    }

    let chosen = Strategy::for_token_count(tokens.len()).iter().find_map(|strategy| {
        strategy
            .candidate(&tokens)
            .filter(|c| c.len() <= MAX_SELLER_IDENTIFIER_LEN)
            .map(|c| (*strategy, c))
    });

    let derivation = match chosen {
        Some((strategy, candidate)) => Derivation {
            identifier: SellerIdentifier::from_derived(candidate),
            selection: Selection::Candidate(strategy),
        },
        None => {
            let joined = normalized.compact();
            Derivation {
                identifier: SellerIdentifier::from_derived(prefix(&joined, MAX_SELLER_IDENTIFIER_LEN).to_string()),
                selection: Selection::Concatenated,
            }
        }
    };

    debug!(
        tokens = tokens.len(),
        selection = derivation.selection.label(),
        seller_identifier = %derivation.identifier,
        "derived seller identifier"
    );
    derivation
}

/// First `n` characters of an ASCII token.
fn prefix(token: &str, n: usize) -> &str {
    token.get(..n).unwrap_or(token)
}
