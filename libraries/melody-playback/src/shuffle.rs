//! Shuffle helpers for queue randomization

use melody_core::Track;
use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffle tracks in place
///
/// Fisher-Yates from the last element down: every permutation is equally
/// likely.
pub fn shuffle_tracks<R: Rng + ?Sized>(tracks: &mut [Track], rng: &mut R) {
    tracks.shuffle(rng);
}

/// Move the first track with `id` to the front, keeping the relative order
/// of all other tracks
///
/// Returns `false` (and leaves `tracks` untouched) if no track matches.
pub fn move_to_front(tracks: &mut Vec<Track>, id: &str) -> bool {
    match tracks.iter().position(|t| t.id == id) {
        Some(0) => true,
        Some(pos) => {
            let track = tracks.remove(pos);
            tracks.insert(0, track);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashMap, HashSet};

    fn create_test_track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            title: format!("Track {}", id),
            ..Default::default()
        }
    }

    fn ids(tracks: &[Track]) -> Vec<String> {
        tracks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn shuffle_preserves_all_tracks() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut tracks: Vec<Track> = (0..10).map(|i| create_test_track(&i.to_string())).collect();

        shuffle_tracks(&mut tracks, &mut rng);

        let unique: HashSet<String> = ids(&tracks).into_iter().collect();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn shuffle_is_roughly_uniform() {
        // 3 tracks -> 6 permutations; each should show up about 1/6 of the time
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts: HashMap<Vec<String>, usize> = HashMap::new();
        let rounds = 6000;

        for _ in 0..rounds {
            let mut tracks = vec![
                create_test_track("a"),
                create_test_track("b"),
                create_test_track("c"),
            ];
            shuffle_tracks(&mut tracks, &mut rng);
            *counts.entry(ids(&tracks)).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        for (perm, count) in counts {
            assert!(
                (800..1200).contains(&count),
                "Permutation {:?} seen {} times",
                perm,
                count
            );
        }
    }

    #[test]
    fn move_to_front_keeps_relative_order() {
        let mut tracks = vec![
            create_test_track("a"),
            create_test_track("b"),
            create_test_track("c"),
            create_test_track("d"),
        ];

        assert!(move_to_front(&mut tracks, "c"));
        assert_eq!(ids(&tracks), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn move_to_front_noop_cases() {
        let mut tracks = vec![create_test_track("a"), create_test_track("b")];

        assert!(move_to_front(&mut tracks, "a"));
        assert_eq!(ids(&tracks), vec!["a", "b"]);

        assert!(!move_to_front(&mut tracks, "zzz"));
        assert_eq!(ids(&tracks), vec!["a", "b"]);
    }

    #[test]
    fn shuffle_empty_and_single() {
        let mut rng = StdRng::seed_from_u64(1);

        let mut empty: Vec<Track> = vec![];
        shuffle_tracks(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut single = vec![create_test_track("1")];
        shuffle_tracks(&mut single, &mut rng);
        assert_eq!(single[0].id, "1");
    }
}
