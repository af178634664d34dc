//! Card identities and the canonical 108-card ordering.
//!
//! The atlas is addressed by index, so the order produced here is a contract
//! with the game client: two standard decks (suits spades, hearts, diamonds,
//! clubs; ranks 2..10, J, Q, K, A) followed by small, big, small, big jokers.

use std::fmt;

use tracing::{debug, info};

use crate::error::{CardError, Result};
use crate::render::card::{CardImage, CardRenderer};

pub const STANDARD_DECKS: usize = 2;
pub const CARDS_PER_DECK: usize = 52;
pub const JOKER_COUNT: usize = 4;
/// Total sprites in a generated deck; also the atlas capacity.
pub const DECK_SIZE: usize = STANDARD_DECKS * CARDS_PER_DECK + JOKER_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }

    pub fn is_red(self) -> bool { matches!(self, Suit::Hearts | Suit::Diamonds) }

    fn letter(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Jack,
    Queen,
    King,
}

impl Face {
    pub fn letter(self) -> &'static str {
        match self {
            Face::Jack => "J",
            Face::Queen => "Q",
            Face::King => "K",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Face::Jack => "JACK",
            Face::Queen => "QUEEN",
            Face::King => "KING",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JokerVariant {
    Small,
    Big,
}

/// Rank positions within a suit, in atlas order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    Number(u8),
    Face(Face),
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Number(2),
        Rank::Number(3),
        Rank::Number(4),
        Rank::Number(5),
        Rank::Number(6),
        Rank::Number(7),
        Rank::Number(8),
        Rank::Number(9),
        Rank::Number(10),
        Rank::Face(Face::Jack),
        Rank::Face(Face::Queen),
        Rank::Face(Face::King),
        Rank::Ace,
    ];
}

/// The discrete value a rendered card represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardIdentity {
    Number { rank: u8, suit: Suit },
    Face { face: Face, suit: Suit },
    Ace { suit: Suit },
    Joker(JokerVariant),
}

impl CardIdentity {
    /// Numbered card; rejects ranks outside 2..=10.
    pub fn number(rank: u8, suit: Suit) -> Result<Self> {
        if (2..=10).contains(&rank) {
            Ok(CardIdentity::Number { rank, suit })
        } else {
            Err(CardError::UnsupportedRank(rank))
        }
    }

    pub fn standard(rank: Rank, suit: Suit) -> Self {
        match rank {
            Rank::Number(rank) => CardIdentity::Number { rank, suit },
            Rank::Face(face) => CardIdentity::Face { face, suit },
            Rank::Ace => CardIdentity::Ace { suit },
        }
    }

    pub fn suit(&self) -> Option<Suit> {
        match *self {
            CardIdentity::Number { suit, .. }
            | CardIdentity::Face { suit, .. }
            | CardIdentity::Ace { suit } => Some(suit),
            CardIdentity::Joker(_) => None,
        }
    }

    /// Text drawn in the corner index; `None` for jokers.
    pub fn rank_label(&self) -> Option<String> {
        match *self {
            CardIdentity::Number { rank, .. } => Some(rank.to_string()),
            CardIdentity::Face { face, .. } => Some(face.letter().to_string()),
            CardIdentity::Ace { .. } => Some("A".to_string()),
            CardIdentity::Joker(_) => None,
        }
    }

    /// Stable short key, e.g. `10H`, `QS`, `JOKER_BIG`.
    pub fn key(&self) -> String {
        match (self.rank_label(), self.suit(), self) {
            (Some(rank), Some(suit), _) => format!("{rank}{}", suit.letter()),
            (_, _, CardIdentity::Joker(JokerVariant::Small)) => "JOKER_SMALL".to_string(),
            _ => "JOKER_BIG".to_string(),
        }
    }
}

impl fmt::Display for CardIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.key()) }
}

/// The 108 identities in atlas order.
pub fn canonical_sequence() -> Vec<CardIdentity> {
    let mut out = Vec::with_capacity(DECK_SIZE);
    for _ in 0..STANDARD_DECKS {
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                out.push(CardIdentity::standard(rank, suit));
            }
        }
    }
    for _ in 0..JOKER_COUNT / 2 {
        out.push(CardIdentity::Joker(JokerVariant::Small));
        out.push(CardIdentity::Joker(JokerVariant::Big));
    }
    out
}

/// Closed-form inverse of the atlas order.
pub fn identity_at(index: usize) -> Option<CardIdentity> {
    let standard = STANDARD_DECKS * CARDS_PER_DECK;
    if index < standard {
        let within = index % CARDS_PER_DECK;
        let suit = Suit::ALL[within / Rank::ALL.len()];
        let rank = Rank::ALL[within % Rank::ALL.len()];
        Some(CardIdentity::standard(rank, suit))
    } else if index < DECK_SIZE {
        let variant = if (index - standard) % 2 == 0 { JokerVariant::Small } else { JokerVariant::Big };
        Some(CardIdentity::Joker(variant))
    } else {
        None
    }
}

/// One composited card and the identity it was rendered from.
#[derive(Debug, Clone)]
pub struct RenderedCard {
    pub identity: CardIdentity,
    pub image: CardImage,
}

/// Exactly [`DECK_SIZE`] rendered cards in canonical order.
#[derive(Debug, Clone)]
pub struct DeckSequence {
    cards: Vec<RenderedCard>,
}

impl DeckSequence {
    pub fn len(&self) -> usize { self.cards.len() }
    pub fn is_empty(&self) -> bool { self.cards.is_empty() }
    pub fn cards(&self) -> &[RenderedCard] { &self.cards }
    pub fn get(&self, index: usize) -> Option<&RenderedCard> { self.cards.get(index) }

    pub fn images(&self) -> Vec<&CardImage> { self.cards.iter().map(|c| &c.image).collect() }
}

/// Composite every identity of [`canonical_sequence`] in order.
pub fn generate_deck(renderer: &CardRenderer) -> Result<DeckSequence> {
    let identities = canonical_sequence();
    info!(cards = identities.len(), "compositing deck");
    let mut cards = Vec::with_capacity(identities.len());
    for (index, identity) in identities.into_iter().enumerate() {
        let image = renderer.render_card(&identity)?;
        debug!(index, %identity, "composited card");
        cards.push(RenderedCard { identity, image });
    }
    if cards.len() != DECK_SIZE {
        return Err(CardError::DeckSize { expected: DECK_SIZE, actual: cards.len() });
    }
    Ok(DeckSequence { cards })
}
