use flopbot_engine::cards::{Card, Rank as R, Suit as S};
use flopbot_engine::hand::{Category, HandStrength, compare_hands, evaluate_hand, flop_strength};

fn c(s: S, r: R) -> Card {
    Card::new(r, s)
}

fn flop(hole: [Card; 2], board: [Card; 3]) -> HandStrength {
    flop_strength(&hole, &board)
}

#[test]
fn straight_flush_on_the_flop() {
    let board = [c(S::Hearts, R::Ten), c(S::Hearts, R::Jack), c(S::Hearts, R::Queen)];
    let royal = flop([c(S::Hearts, R::King), c(S::Hearts, R::Ace)], board);
    let straight = flop([c(S::Clubs, R::King), c(S::Hearts, R::Ace)], board);
    assert_eq!(royal.category, Category::StraightFlush);
    assert_eq!(straight.category, Category::Straight);
    assert!(compare_hands(&royal, &straight).is_gt());
}

#[test]
fn every_category_outranks_the_one_below() {
    // One five-card example per category, weakest first.
    let ladder = [
        "Ac9d7h4s2c", // high card
        "AcAd7h4s2c", // pair
        "AcAd7h7s2c", // two pair
        "AcAdAh4s2c", // trips
        "5c6d7h8s9c", // straight
        "2h7hJhQh9h", // flush
        "KcKdKhQcQd", // full house
        "AcAdAhAsKc", // quads
        "5h6h7h8h9h", // straight flush
    ];
    let strengths: Vec<HandStrength> = ladder
        .iter()
        .map(|s| {
            let cards = Card::parse_many(s).unwrap();
            evaluate_hand(&[cards[0], cards[1], cards[2], cards[3], cards[4]])
        })
        .collect();
    for pair in strengths.windows(2) {
        assert!(pair[1] > pair[0], "{:?} should beat {:?}", pair[1], pair[0]);
    }
}

#[test]
fn two_pair_compares_high_pair_then_low_pair_then_kicker() {
    let board = [c(S::Clubs, R::King), c(S::Diamonds, R::Seven), c(S::Spades, R::Two)];
    let kings_sevens = flop([c(S::Hearts, R::King), c(S::Hearts, R::Seven)], board);
    let kings_twos = flop([c(S::Spades, R::King), c(S::Hearts, R::Two)], board);
    let sevens_twos = flop([c(S::Clubs, R::Seven), c(S::Diamonds, R::Two)], board);
    assert_eq!(kings_sevens.category, Category::TwoPair);
    assert_eq!(kings_sevens.kickers[..3], [13, 7, 2]);
    assert!(kings_sevens > kings_twos);
    assert!(kings_twos > sevens_twos);
}

#[test]
fn flop_pair_beats_flop_high_card() {
    let board = [c(S::Clubs, R::Two), c(S::Spades, R::Seven), c(S::Diamonds, R::Nine)];
    let aces = flop([c(S::Spades, R::Ace), c(S::Hearts, R::Ace)], board);
    let king_queen = flop([c(S::Diamonds, R::King), c(S::Diamonds, R::Queen)], board);
    assert_eq!(aces.category, Category::OnePair);
    assert_eq!(king_queen.category, Category::HighCard);
    assert!(compare_hands(&aces, &king_queen).is_gt());
}

#[test]
fn high_card_decided_by_lowest_kicker() {
    let board = [c(S::Clubs, R::Ace), c(S::Spades, R::Jack), c(S::Diamonds, R::Nine)];
    let a = flop([c(S::Hearts, R::Seven), c(S::Hearts, R::Four)], board);
    let b = flop([c(S::Clubs, R::Seven), c(S::Clubs, R::Three)], board);
    assert_eq!(a.kickers, [14, 11, 9, 7, 4]);
    assert!(compare_hands(&a, &b).is_gt());
}

#[test]
fn five_card_flush_on_the_flop() {
    let board = [c(S::Hearts, R::Two), c(S::Hearts, R::Seven), c(S::Hearts, R::Jack)];
    let flush = flop([c(S::Hearts, R::Queen), c(S::Hearts, R::Nine)], board);
    let no_flush = flop([c(S::Clubs, R::Eight), c(S::Clubs, R::Nine)], board);
    assert_eq!(flush.category, Category::Flush);
    assert_eq!(flush.kickers, [12, 11, 9, 7, 2]);
    assert!(flush > no_flush);
}

#[test]
fn identical_ranks_in_different_suits_tie() {
    let board = [c(S::Clubs, R::Ace), c(S::Diamonds, R::Ace), c(S::Hearts, R::Ace)];
    let a = flop([c(S::Spades, R::Two), c(S::Spades, R::Three)], board);
    let b = flop([c(S::Hearts, R::Two), c(S::Clubs, R::Three)], board);
    assert!(compare_hands(&a, &b).is_eq());
}
