//! Checkout advisor: ranked finishing sequences for a remaining score.
//!
//! A finish is at most three darts whose scores sum to the remaining points,
//! with the last dart on a double (standard double-out). The advisor prefers
//! fewer darts, then simpler rings, then a lower finishing double: with 170
//! left the recommendation is `T20 T20 D25`, with 141 left `T20 T19 D12`.

use serde::{Deserialize, Serialize};

use crate::models::DartGame;

/// Highest score a player can take out with three darts ending on a double.
pub const MAX_CHECKOUT: u32 = 170;

/// Scoring ring of the board.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ring {
    Single,
    Double,
    Triple,
}

impl Ring {
    /// Scoring multiplier of the ring.
    pub fn multiplier(self) -> u32 {
        match self {
            Ring::Single => 1,
            Ring::Double => 2,
            Ring::Triple => 3,
        }
    }

    fn prefix(self) -> char {
        match self {
            Ring::Single => 'S',
            Ring::Double => 'D',
            Ring::Triple => 'T',
        }
    }
}

/// One dart: a ring and the face value it landed on.
#[derive(Clone, Copy, Debug)]
struct Dart {
    ring: Ring,
    value: u32,
}

impl Dart {
    fn score(self) -> u32 {
        self.value * self.ring.multiplier()
    }

    fn label(self) -> String {
        format!("{}{}", self.ring.prefix(), self.value)
    }
}

/// Ranked list of ways to finish from `points` scored so far.
///
/// Empty when the remaining score is not finishable: zero or negative, or
/// above [`MAX_CHECKOUT`]. Each entry is a space-separated sequence of dart
/// labels (`S20`, `T19`, `D12`, ...); the first entry is the recommended
/// checkout and the full list is returned, display capping being the
/// caller's business. Pure function of `points`, safe for speculative
/// "what if I score N more" previews.
pub fn advise_checkout(points: u32) -> Vec<String> {
    let remaining = match DartGame::MAX_SCORE.checked_sub(points) {
        Some(r) if r > 0 && r <= MAX_CHECKOUT => r,
        _ => return Vec::new(),
    };

    let singles: Vec<Dart> = (1..=20)
        .chain([25])
        .map(|value| Dart {
            ring: Ring::Single,
            value,
        })
        .collect();
    // No treble bed on the 25 center.
    let triples: Vec<Dart> = (1..=20)
        .map(|value| Dart {
            ring: Ring::Triple,
            value,
        })
        .collect();

    let mut finishes: Vec<Vec<Dart>> = Vec::new();
    collect_finishes(&mut finishes, &[], remaining);
    for first in &singles {
        collect_finishes(&mut finishes, &[*first], remaining);
    }
    for first in &triples {
        collect_finishes(&mut finishes, &[*first], remaining);
    }
    for first in &singles {
        for second in &singles {
            collect_finishes(&mut finishes, &[*first, *second], remaining);
        }
    }
    for first in &singles {
        for second in &triples {
            collect_finishes(&mut finishes, &[*first, *second], remaining);
        }
    }
    for first in &triples {
        for second in &triples {
            collect_finishes(&mut finishes, &[*first, *second], remaining);
        }
    }
    for first in &triples {
        for second in &singles {
            collect_finishes(&mut finishes, &[*first, *second], remaining);
        }
    }

    // Stable sort: enumeration order breaks remaining ties.
    finishes.sort_by(|a, b| {
        a.len()
            .cmp(&b.len())
            .then_with(|| total_weight(a).cmp(&total_weight(b)))
            .then_with(|| final_double(a).cmp(&final_double(b)))
    });

    finishes
        .iter()
        .map(|darts| {
            darts
                .iter()
                .map(|d| d.label())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Append every finish that completes `lead` with a legal double.
fn collect_finishes(finishes: &mut Vec<Vec<Dart>>, lead: &[Dart], remaining: u32) {
    let lead_score: u32 = lead.iter().map(|d| d.score()).sum();
    for value in (1..=20).chain([25]) {
        let last = Dart {
            ring: Ring::Double,
            value,
        };
        if lead_score + last.score() == remaining {
            let mut darts = lead.to_vec();
            darts.push(last);
            finishes.push(darts);
        }
    }
}

/// Combined throw difficulty: single counts 1, double 2, triple 3.
fn total_weight(darts: &[Dart]) -> u32 {
    darts.iter().map(|d| d.ring.multiplier()).sum()
}

fn final_double(darts: &[Dart]) -> u32 {
    darts.last().map_or(0, |d| d.value)
}
