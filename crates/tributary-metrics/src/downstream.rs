//! Downstream ratio: how often a pair's shared threads pull in a third party.

use crate::options::DownstreamOptions;
use crate::stats::desc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tributary_core::{distinct_actors, group_threads, InteractionEvent};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DownstreamPair {
    pub a: String,
    pub b: String,
    /// Threads both actors authored in.
    pub total_interactions: usize,
    /// Of those, threads with more than two participants.
    pub downstream_interactions: usize,
    pub downstream_ratio: f64,
}

/// Pairs with at least `min_interactions` shared threads, sorted by ratio
/// (descending, stable). Within a pair, `a` is the actor seen first in the log.
pub fn analyze_downstream(
    events: &[InteractionEvent],
    opts: &DownstreamOptions,
) -> Vec<DownstreamPair> {
    let order: HashMap<&str, usize> = distinct_actors(events)
        .into_iter()
        .enumerate()
        .map(|(i, a)| (a, i))
        .collect();

    // (total, downstream) per unordered pair, in first-seen pair order
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut tallies: Vec<((&str, &str), usize, usize)> = Vec::new();

    for thread in group_threads(events) {
        let participants = thread.participants();
        let has_third_party = participants.len() > 2;
        for (i, &x) in participants.iter().enumerate() {
            for &y in &participants[i + 1..] {
                let key = if order[x] <= order[y] { (x, y) } else { (y, x) };
                let slot = *index.entry(key).or_insert_with(|| {
                    tallies.push((key, 0, 0));
                    tallies.len() - 1
                });
                tallies[slot].1 += 1;
                if has_third_party {
                    tallies[slot].2 += 1;
                }
            }
        }
    }

    let mut pairs: Vec<DownstreamPair> = tallies
        .into_iter()
        .filter(|&(_, total, _)| total >= opts.min_interactions)
        .map(|((a, b), total, downstream)| DownstreamPair {
            a: a.to_string(),
            b: b.to_string(),
            total_interactions: total,
            downstream_interactions: downstream,
            downstream_ratio: downstream as f64 / total as f64,
        })
        .collect();
    pairs.sort_by(|x, y| desc(x.downstream_ratio, y.downstream_ratio));

    tracing::debug!(pairs = pairs.len(), "downstream computed");
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ev;
    use tributary_core::EventType;

    fn any_pair() -> DownstreamOptions {
        DownstreamOptions {
            min_interactions: 1,
        }
    }

    #[test]
    fn ratio_counts_third_party_threads() {
        let events = vec![
            // t1: A, B only
            ev(0, "A", "t1", EventType::Open),
            ev(1, "B", "t1", EventType::Comment),
            // t2: A, B, C
            ev(2, "A", "t2", EventType::Open),
            ev(3, "B", "t2", EventType::Comment),
            ev(4, "C", "t2", EventType::Comment),
        ];
        let pairs = analyze_downstream(&events, &any_pair());
        let ab = pairs.iter().find(|p| p.a == "A" && p.b == "B").unwrap();
        assert_eq!(ab.total_interactions, 2);
        assert_eq!(ab.downstream_interactions, 1);
        assert_eq!(ab.downstream_ratio, 0.5);

        let bc = pairs.iter().find(|p| p.a == "B" && p.b == "C").unwrap();
        assert_eq!(bc.total_interactions, 1);
        assert_eq!(bc.downstream_ratio, 1.0);
    }

    #[test]
    fn pair_orientation_follows_first_appearance() {
        let events = vec![
            ev(0, "B", "t0", EventType::Open),
            ev(1, "A", "t1", EventType::Open),
            ev(2, "B", "t1", EventType::Comment),
        ];
        let pairs = analyze_downstream(&events, &any_pair());
        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].a.as_str(), pairs[0].b.as_str()), ("B", "A"));
    }

    #[test]
    fn default_minimum_excludes_rare_pairs() {
        let mut events = Vec::new();
        for i in 0..2 {
            let t = format!("t{i}");
            events.push(ev(i, "A", &t, EventType::Open));
            events.push(ev(i, "B", &t, EventType::Comment));
        }
        assert!(analyze_downstream(&events, &DownstreamOptions::default()).is_empty());

        events.push(ev(9, "A", "t9", EventType::Open));
        events.push(ev(9, "B", "t9", EventType::Comment));
        let pairs = analyze_downstream(&events, &DownstreamOptions::default());
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].total_interactions, 3);
        assert_eq!(pairs[0].downstream_ratio, 0.0);
    }

    #[test]
    fn sorted_by_ratio() {
        let events = vec![
            ev(0, "A", "t1", EventType::Open),
            ev(1, "B", "t1", EventType::Comment),
            ev(2, "C", "t2", EventType::Open),
            ev(3, "D", "t2", EventType::Comment),
            ev(4, "E", "t2", EventType::Comment),
        ];
        let pairs = analyze_downstream(&events, &any_pair());
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[0].downstream_ratio, 1.0);
        assert_eq!(pairs[3].downstream_ratio, 0.0);
        assert_eq!(pairs[3].a, "A");
    }

    #[test]
    fn single_actor_threads_produce_no_pairs() {
        let events = vec![
            ev(0, "A", "t1", EventType::Open),
            ev(1, "A", "t1", EventType::Close),
        ];
        assert!(analyze_downstream(&events, &any_pair()).is_empty());
        assert!(analyze_downstream(&[], &any_pair()).is_empty());
    }
}
