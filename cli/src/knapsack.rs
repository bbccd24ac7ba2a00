//! 0/1 knapsack whose base cases are per-position literals.

use casematch::prelude::*;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub weight: u32,
    pub value: u32,
}

impl Item {
    /// Parse `weight:value`.
    pub fn parse(text: &str) -> Result<Self, String> {
        let (weight, value) = text
            .split_once(':')
            .ok_or_else(|| format!("invalid item \"{text}\", expected weight:value"))?;
        let weight = weight
            .trim()
            .parse()
            .map_err(|e| format!("invalid weight in \"{text}\": {e}"))?;
        let value = value
            .trim()
            .parse()
            .map_err(|e| format!("invalid value in \"{text}\": {e}"))?;
        Ok(Self { weight, value })
    }
}

/// Best packing: total value and the selected item indices, ascending.
///
/// Totals are `u64` so any set of `u32` item values sums without overflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Packing {
    pub value: u64,
    pub selected: Vec<usize>,
}

impl Packing {
    fn take(mut self, index: usize, item: Item) -> Self {
        self.value += u64::from(item.value);
        self.selected.insert(0, index);
        self
    }
}

/// Solve the 0/1 knapsack for `items` and `capacity`.
///
/// Exhaustive recursion; meant for the small inputs given on a command line.
#[must_use]
pub fn solve(items: &[Item], capacity: u32) -> Packing {
    pack(items, capacity, 0)
}

fn pack(items: &[Item], capacity: u32, index: usize) -> Packing {
    match_all((items, capacity))
        // No capacity left, whatever remains
        .with(fields((Field::Any, Field::Is(0))), |_, _| Packing::default())
        // No items left
        .with(guard2(|items: &&[Item], _: &u32| items.is_empty()), |_, _| {
            Packing::default()
        })
        .with(wildcard(), |items, capacity| {
            let (item, rest) = match items.split_first() {
                Some((item, rest)) => (*item, rest),
                None => return Packing::default(),
            };
            let without = pack(rest, *capacity, index + 1);
            match_on(item.weight)
                .with(guard(|weight: &u32| weight > capacity), |_| without.clone())
                .with(wildcard(), |weight| {
                    let with = pack(rest, capacity - weight, index + 1).take(index, item);
                    if with.value > without.value {
                        with
                    } else {
                        without.clone()
                    }
                })
                .materialize::<Packing>()
                .unwrap_or_default()
        })
        .materialize::<Packing>()
        .unwrap_or_default()
}

/// Summary lines for a solved packing.
pub struct Report<'a> {
    pub items: &'a [Item],
    pub packing: &'a Packing,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chosen = || self.packing.selected.iter().filter_map(|&i| self.items.get(i));
        let total_weight: u64 = chosen().map(|item| u64::from(item.weight)).sum();
        let total_value: u64 = chosen().map(|item| u64::from(item.value)).sum();
        let indices: Vec<String> = self.packing.selected.iter().map(ToString::to_string).collect();

        writeln!(f, "Max Value: {}", self.packing.value)?;
        writeln!(f, "Selected Items: {}", indices.join(" "))?;
        writeln!(f, "Total Weight: {total_weight}")?;
        write!(f, "Total Value: {total_value}")
    }
}
