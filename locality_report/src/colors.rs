use std::collections::HashMap;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{Hsl, Locality};

pub const SATURATION: u8 = 40;
pub const LIGHTNESS: u8 = 40;

/// The color of each locality, by locality id.
///
/// Once built, the map does not change. Getting new colors means building a new map.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct ColorMap {
    colors: HashMap<String, Hsl>,
}

impl ColorMap {
    pub fn get(&self, id: &str) -> Option<Hsl> {
        self.colors.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn hues(&self) -> Vec<f64> {
        self.colors.values().map(|c| c.hue).collect()
    }
}

// The hue circle cut into as many slices as there are localities.
// The divisor is the length of the produced vector, so it is never zero when used.
fn evenly_spaced_hues(n: usize) -> Vec<f64> {
    (0..n)
        .map(|idx| 360.0 * ((idx + 1) as f64 / n as f64))
        .collect()
}

fn build_map(localities: &[Locality], hues: &[f64]) -> ColorMap {
    let colors: HashMap<String, Hsl> = localities
        .iter()
        .zip(hues.iter())
        .map(|(l, hue)| {
            (
                l.id.clone(),
                Hsl {
                    hue: *hue,
                    saturation: SATURATION,
                    lightness: LIGHTNESS,
                },
            )
        })
        .collect();
    ColorMap { colors }
}

/// Gives every locality a distinct hue, in a random order.
pub fn assign_colors<R: Rng + ?Sized>(localities: &[Locality], rng: &mut R) -> ColorMap {
    let mut hues = evenly_spaced_hues(localities.len());
    hues.shuffle(rng);
    debug!("assign_colors: shuffled hues: {:?}", hues);
    build_map(localities, &hues)
}

/// Gives every locality a distinct hue, in an order that only depends on the locality ids
/// and the seed. Reloading the same report yields the same colors.
///
/// The order is taken from a cryptographic hash of the ids so that neighbouring
/// localities in the list do not end up with neighbouring hues.
pub fn assign_stable_colors(localities: &[Locality], seed: u64) -> ColorMap {
    let mut keyed: Vec<(String, usize)> = localities
        .iter()
        .enumerate()
        .map(|(idx, l)| (sha256::digest(format!("{:08}{}", seed, l.id)), idx))
        .collect();
    keyed.sort();
    let slices = evenly_spaced_hues(localities.len());
    let mut hues = vec![0.0; localities.len()];
    for (slot, (_, idx)) in keyed.iter().enumerate() {
        hues[*idx] = slices[slot];
    }
    debug!("assign_stable_colors: seed: {:?} hues: {:?}", seed, hues);
    build_map(localities, &hues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn localities(n: usize) -> Vec<Locality> {
        (0..n)
            .map(|idx| Locality {
                id: format!("{:03}", idx),
                name: format!("Locality {}", idx),
                ballots_counted: 0,
                ballots_expected: 10,
            })
            .collect()
    }

    fn sorted_hues(map: &ColorMap) -> Vec<f64> {
        let mut hues = map.hues();
        hues.sort_by(|a, b| a.total_cmp(b));
        hues
    }

    #[test]
    fn hues_are_a_permutation_of_the_slices() {
        let locs = localities(12);
        let mut rng = StdRng::seed_from_u64(7);
        let map = assign_colors(&locs, &mut rng);
        assert_eq!(map.len(), 12);
        assert_eq!(sorted_hues(&map), evenly_spaced_hues(12));
        for l in locs.iter() {
            let c = map.get(&l.id).unwrap();
            assert_eq!(c.saturation, 40);
            assert_eq!(c.lightness, 40);
        }
    }

    #[test]
    fn slices_cover_the_circle() {
        assert_eq!(evenly_spaced_hues(4), vec![90.0, 180.0, 270.0, 360.0]);
        assert_eq!(evenly_spaced_hues(1), vec![360.0]);
        assert!(evenly_spaced_hues(0).is_empty());
    }

    #[test]
    fn empty_input_gives_empty_map() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(assign_colors(&[], &mut rng).is_empty());
        assert!(assign_stable_colors(&[], 3).is_empty());
    }

    #[test]
    fn same_seed_same_shuffle() {
        let locs = localities(20);
        let a = assign_colors(&locs, &mut StdRng::seed_from_u64(42));
        let b = assign_colors(&locs, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn stable_colors_ignore_input_order() {
        let locs = localities(9);
        let mut reversed = locs.clone();
        reversed.reverse();
        let a = assign_stable_colors(&locs, 2020);
        let b = assign_stable_colors(&reversed, 2020);
        assert_eq!(a, b);
        assert_eq!(sorted_hues(&a), evenly_spaced_hues(9));
    }

    #[test]
    fn stable_colors_use_the_whole_seed() {
        let locs = localities(12);
        let low = assign_stable_colors(&locs, 1);
        let high = assign_stable_colors(&locs, (1 << 32) + 1);
        assert_ne!(low, high);
        assert_eq!(sorted_hues(&high), evenly_spaced_hues(12));
    }

    #[test]
    fn hsl_display() {
        let c = Hsl {
            hue: 120.0,
            saturation: SATURATION,
            lightness: LIGHTNESS,
        };
        assert_eq!(c.to_string(), "hsl(120 40% 40% / 1)");
        let c2 = Hsl { hue: 22.5, ..c };
        assert_eq!(c2.to_string(), "hsl(22.5 40% 40% / 1)");
    }
}
