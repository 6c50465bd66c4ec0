//! Property tests for reciprocal rank fusion invariants.

use std::collections::HashSet;

use grounded_rag::document::Chunk;
use grounded_rag::fusion::rrf_merge;
use proptest::prelude::*;

/// Build a chunk whose stable key is derived from its id.
fn chunk(chunk_id: u64) -> Chunk {
    Chunk {
        content: format!("chunk body {chunk_id}"),
        source: format!("banking/doc{}.pdf", chunk_id % 4),
        industry: "banking".to_string(),
        page: Some((chunk_id % 7) as u32),
        chunk_id,
        start_index: chunk_id as usize * 50,
    }
}

/// Generate a ranked list of distinct chunks drawn from a small id space,
/// so the two lists overlap often.
fn arb_ranked_list() -> impl Strategy<Value = Vec<Chunk>> {
    proptest::collection::vec(0u64..24, 0..12).prop_map(|ids| {
        let mut seen = HashSet::new();
        ids.into_iter().filter(|id| seen.insert(*id)).map(chunk).collect()
    })
}

/// **Property: fused output is bounded and free of duplicate keys.**
/// *For any* pair of ranked lists and any K, the merged list SHALL contain
/// at most K chunks and SHALL NOT contain two chunks with equal stable keys.
mod prop_fusion_bounded_and_deduped {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn merged_size_bounded_and_keys_unique(
            lexical in arb_ranked_list(),
            semantic in arb_ranked_list(),
            k in 1usize..10,
        ) {
            let merged = rrf_merge(&lexical, &semantic, k, 60);

            prop_assert!(merged.len() <= k);

            let keys: HashSet<_> = merged.iter().map(Chunk::key).collect();
            prop_assert_eq!(keys.len(), merged.len(), "duplicate stable keys in fused output");
        }
    }
}

/// **Property: fused chunks come from the inputs.**
/// *For any* pair of ranked lists, every chunk in the merged output SHALL
/// appear (by stable key) in at least one input list, and merging twice
/// SHALL produce identical output.
mod prop_fusion_membership_and_determinism {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn members_from_inputs_and_repeatable(
            lexical in arb_ranked_list(),
            semantic in arb_ranked_list(),
            k in 1usize..10,
        ) {
            let inputs: HashSet<_> =
                lexical.iter().chain(semantic.iter()).map(Chunk::key).collect();

            let merged = rrf_merge(&lexical, &semantic, k, 60);
            for chunk in &merged {
                prop_assert!(inputs.contains(&chunk.key()));
            }

            let again = rrf_merge(&lexical, &semantic, k, 60);
            prop_assert_eq!(merged, again);
        }
    }
}

/// **Property: dual-list presence is strictly rewarded.**
/// *For any* rank r ≥ 1 behind disjoint filler, a chunk appearing at rank r
/// in both lists SHALL rank strictly ahead of where a chunk appearing at
/// rank r in only one list lands: two contributions of `1/(60 + r)` always
/// beat one, while the fillers tie against only the single-list chunk.
mod prop_fusion_monotonicity {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn both_lists_beats_one_list_at_same_rank(rank in 1usize..6) {
            // Fillers 100.. occupy the leading ranks; the probe chunks sit
            // at the same rank in their respective lists.
            let mut lexical: Vec<Chunk> = (100..100 + rank as u64).map(chunk).collect();
            let mut semantic: Vec<Chunk> = (200..200 + rank as u64).map(chunk).collect();
            lexical.push(chunk(1)); // in both lists
            semantic.push(chunk(1));
            let mut lexical_single = lexical.clone();
            lexical_single[rank] = chunk(2); // in one list only

            let both = rrf_merge(&lexical, &semantic, 50, 60);
            let single = rrf_merge(&lexical_single, &semantic, 50, 60);

            let pos_both = both.iter().position(|c| c.chunk_id == 1).unwrap();
            let pos_single = single.iter().position(|c| c.chunk_id == 2).unwrap();
            prop_assert!(
                pos_both < pos_single,
                "dual-list chunk at position {} did not strictly beat \
                 single-list position {}",
                pos_both,
                pos_single,
            );
        }
    }
}
