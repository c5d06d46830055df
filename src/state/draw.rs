//! The random draws performed when the countdown reaches zero.

use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;

use crate::model::{Color, GroupMember, Position, Team, TouchId, Winner};

pub fn pick_color<R: Rng + ?Sized>(palette: &[Color], rng: &mut R) -> Color {
    palette.choose(rng).cloned().unwrap_or_else(Color::fallback)
}

/// Uniform pick over the tracked set. `None` when nobody is touching.
pub fn pick_one<R: Rng + ?Sized>(
    touches: &BTreeMap<TouchId, Position>,
    colors: &BTreeMap<TouchId, Color>,
    rng: &mut R,
) -> Option<Winner> {
    if touches.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..touches.len());
    let (&id, &position) = touches.iter().nth(index)?;
    let color = colors.get(&id).cloned().unwrap_or_else(Color::fallback);
    Some(Winner { id, position, color })
}

/// Shuffles every tracked id, then the first `ceil(n/2)` go to team A and the
/// rest to team B.
pub fn split_groups<R: Rng + ?Sized>(
    touches: &BTreeMap<TouchId, Position>,
    colors: &BTreeMap<TouchId, Color>,
    rng: &mut R,
) -> Option<BTreeMap<TouchId, GroupMember>> {
    if touches.is_empty() {
        return None;
    }
    let mut ids: Vec<TouchId> = touches.keys().copied().collect();
    ids.shuffle(rng);
    let team_a = ids.len().div_ceil(2);
    let members = ids
        .into_iter()
        .enumerate()
        .filter_map(|(i, id)| {
            let position = *touches.get(&id)?;
            let team = if i < team_a { Team::A } else { Team::B };
            let color = colors.get(&id).cloned().unwrap_or_else(Color::fallback);
            Some((id, GroupMember { team, position, color }))
        })
        .collect();
    Some(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn tracked(n: i32) -> (BTreeMap<TouchId, Position>, BTreeMap<TouchId, Color>) {
        let touches = (0..n)
            .map(|i| (TouchId(i), Position { x: f64::from(i) * 10.0, y: 5.0 }))
            .collect();
        let colors = (0..n).map(|i| (TouchId(i), Color::new(format!("#00000{i}")))).collect();
        (touches, colors)
    }

    #[test]
    fn empty_set_draws_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let (touches, colors) = tracked(0);
        assert!(pick_one(&touches, &colors, &mut rng).is_none());
        assert!(split_groups(&touches, &colors, &mut rng).is_none());
    }

    #[test]
    fn lone_finger_always_wins() {
        let (touches, colors) = tracked(1);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let winner = pick_one(&touches, &colors, &mut rng).unwrap();
            assert_eq!(winner.id, TouchId(0));
            assert_eq!(winner.color, Color::new("#000000"));
        }
    }

    #[test]
    fn every_finger_can_win() {
        let (touches, colors) = tracked(4);
        let mut rng = StdRng::seed_from_u64(42);
        let mut wins = [0u32; 4];
        for _ in 0..400 {
            let winner = pick_one(&touches, &colors, &mut rng).unwrap();
            wins[winner.id.0 as usize] += 1;
        }
        assert!(wins.iter().all(|&w| w > 50), "skewed wins: {wins:?}");
    }

    #[test]
    fn odd_split_gives_the_extra_finger_to_team_a() {
        let (touches, colors) = tracked(5);
        let mut rng = StdRng::seed_from_u64(7);
        let members = split_groups(&touches, &colors, &mut rng).unwrap();
        assert_eq!(members.len(), 5);
        let a = members.values().filter(|m| m.team == Team::A).count();
        assert_eq!(a, 3);
        for (id, member) in &members {
            assert_eq!(member.position, touches[id]);
        }
    }

    #[test]
    fn split_does_not_follow_identifier_order() {
        let (touches, colors) = tracked(6);
        let mut rng = StdRng::seed_from_u64(3);
        let differs = (0..20).any(|_| {
            let members = split_groups(&touches, &colors, &mut rng).unwrap();
            members[&TouchId(0)].team != Team::A || members[&TouchId(5)].team != Team::B
        });
        assert!(differs);
    }

    #[test]
    fn colors_come_from_the_palette() {
        let palette = vec![Color::new("#111"), Color::new("#222")];
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..10 {
            assert!(palette.contains(&pick_color(&palette, &mut rng)));
        }
        assert_eq!(pick_color(&[], &mut rng), Color::fallback());
    }
}
