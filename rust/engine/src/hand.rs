use std::cmp::Ordering;

use crate::cards::Card;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

/// Strength of the best five-card hand. Higher compares stronger: the
/// derived ordering looks at the category first, then the kickers.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: [u8; 5],
}

impl HandStrength {
    fn new(category: Category, ranks: &[u8]) -> Self {
        let mut kickers = [0u8; 5];
        for (slot, r) in kickers.iter_mut().zip(ranks) {
            *slot = *r;
        }
        Self { category, kickers }
    }
}

/// Ranks exactly five cards.
pub fn evaluate_hand(cards: &[Card; 5]) -> HandStrength {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut rank_mask: u16 = 0;
    for c in cards {
        let r = c.rank as u8;
        rank_counts[r as usize] += 1;
        rank_mask |= 1 << r;
    }
    let flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight = straight_high_from_mask(rank_mask);

    // Distinct ranks, larger groups first, high -> low within a group size
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .rev()
        .filter(|r| rank_counts[*r as usize] > 0)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_by(|a, b| b.0.cmp(&a.0));
    let counts: Vec<u8> = groups.iter().map(|g| g.0).collect();
    let ranks: Vec<u8> = groups.iter().map(|g| g.1).collect();

    if let Some(high) = straight {
        let category = if flush {
            Category::StraightFlush
        } else {
            Category::Straight
        };
        return HandStrength::new(category, &[high]);
    }

    let category = match counts.as_slice() {
        [4, ..] => Category::FourOfAKind,
        [3, 2] => Category::FullHouse,
        _ if flush => Category::Flush,
        [3, ..] => Category::ThreeOfAKind,
        [2, 2, ..] => Category::TwoPair,
        [2, ..] => Category::OnePair,
        _ => Category::HighCard,
    };
    HandStrength::new(category, &ranks)
}

/// Evaluates two hole cards together with the three-card board.
pub fn flop_strength(hole: &[Card; 2], board: &[Card; 3]) -> HandStrength {
    evaluate_hand(&[hole[0], hole[1], board[0], board[1], board[2]])
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    a.cmp(b)
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    // Treat Ace as 14 and also as 1
    let mut m = mask;
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    // Sliding 5-bit window from Ace(14) down to 5
    (5..=14u8).rev().find(|&high| {
        let window = 0b11111u16 << (high - 4);
        (m & window) == window
    })
}
