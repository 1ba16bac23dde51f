use iota::{
    Card, GameRecord, Grid, Placement, Position, Turn, ALL_CONCRETE_CARDS, NUMBER_OF_WILDCARDS,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, trace};

/// How many cards a player holds.
pub const HAND_SIZE: usize = 4;

/// Every card in the game: each concrete card once, plus the wildcards.
pub fn full_deck() -> Vec<Card> {
    let mut deck: Vec<Card> = ALL_CONCRETE_CARDS.iter().map(|&card| Card::Concrete(card)).collect();
    deck.extend([Card::Wildcard; NUMBER_OF_WILDCARDS]);
    deck
}

pub struct SimulatedGame {
    pub record: GameRecord,
    pub grid: Grid,
    pub points: u32,
    /// Cards that were never placed, in the hand or in the draw pile.
    pub cards_left: usize,
}

/// Plays a solitaire game with a greedy strategy, until no card can be placed.
///
/// When the hand has no legal placement, it is traded for new cards from the
/// draw pile. The game ends when that happens more than `max_consecutive_passes`
/// times in a row, or when the draw pile is empty.
pub fn simulate_game(rng: &mut StdRng, max_consecutive_passes: usize) -> anyhow::Result<SimulatedGame> {
    let mut draw_pile = full_deck();
    draw_pile.shuffle(rng);

    let Some(first_card) = draw_pile.pop() else {
        anyhow::bail!("Cannot play without cards");
    };
    let mut grid = Grid::new();
    grid.start(first_card)?;

    let mut hand = Vec::with_capacity(HAND_SIZE);
    refill(&mut hand, &mut draw_pile);

    let mut turns = Vec::new();
    let mut points = 0;
    let mut consecutive_passes = 0;
    while !hand.is_empty() {
        let turn = plan_turn(&grid, &hand);
        if turn.is_empty() {
            if draw_pile.is_empty() || consecutive_passes == max_consecutive_passes {
                break;
            }
            consecutive_passes += 1;
            trace!(?hand, "No placement possible, trading hand");
            let traded = std::mem::take(&mut hand);
            refill(&mut hand, &mut draw_pile);
            // Traded cards go to the bottom of the pile
            for card in traded {
                draw_pile.insert(0, card);
            }
            continue;
        }

        consecutive_passes = 0;
        let turn_points = grid.place_sequence(&turn)?;
        for placement in &turn {
            if let Some(idx) = hand.iter().position(|&card| card == placement.card) {
                hand.swap_remove(idx);
            }
        }
        debug!(
            turn_idx = turns.len(),
            cards = turn.len(),
            points = turn_points,
            "Played turn"
        );
        points += turn_points;
        turns.push(Turn(turn));
        refill(&mut hand, &mut draw_pile);
    }

    Ok(SimulatedGame {
        record: GameRecord { first_card, turns },
        cards_left: hand.len() + draw_pile.len(),
        grid,
        points,
    })
}

fn refill(hand: &mut Vec<Card>, draw_pile: &mut Vec<Card>) {
    while hand.len() < HAND_SIZE {
        match draw_pile.pop() {
            Some(card) => hand.push(card),
            None => break,
        }
    }
}

/// Greedily picks the placements of one turn: the best-scoring card first,
/// then more cards as long as they stay in one row or column with the others.
fn plan_turn(grid: &Grid, hand: &[Card]) -> Vec<Placement> {
    let mut scratch = grid.clone();
    let mut remaining = hand.to_vec();
    let mut turn: Vec<Placement> = Vec::new();
    loop {
        let Some((hand_idx, position)) = best_placement(&scratch, &remaining, &turn) else {
            break;
        };
        let card = remaining.swap_remove(hand_idx);
        match scratch.place(card, position) {
            Ok(_) => turn.push(Placement { card, position }),
            Err(_) => break,
        }
    }
    turn
}

fn best_placement(grid: &Grid, hand: &[Card], turn: &[Placement]) -> Option<(usize, Position)> {
    let mut best: Option<(usize, Position, u32)> = None;
    for position in grid.frontier() {
        if !in_line(turn, position) {
            continue;
        }
        for (hand_idx, &card) in hand.iter().enumerate() {
            if let Ok(calculation) = grid.calculate(card, position) {
                let points = calculation.points();
                if best.map_or(true, |(_, _, best_points)| points > best_points) {
                    best = Some((hand_idx, position, points));
                }
            }
        }
    }
    best.map(|(hand_idx, position, _)| (hand_idx, position))
}

fn in_line(turn: &[Placement], position: Position) -> bool {
    turn.iter().all(|placement| placement.position.row == position.row)
        || turn.iter().all(|placement| placement.position.col == position.col)
}
