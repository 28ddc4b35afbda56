mod common;

use common::{grid30, qwerty, samples, uniform_freq};
use keyvolve::api::{layout_effort, layout_effort_with_rules};
use keyvolve::config::{EffortWeights, RuleSet};

/// Rule contribution alone: objective with rules minus raw effort.
fn penalty_for(
    layout: &[char],
    char_list: &[char],
    char_freq: &[f32],
    text: &[String],
    rules: &RuleSet,
) -> f32 {
    let w = EffortWeights::default();
    let with =
        layout_effort_with_rules(layout, &grid30(), text, char_freq, char_list, &w, rules)
            .unwrap();
    let without = layout_effort(layout, &grid30(), text, char_freq, char_list, &w).unwrap();
    with - without
}

#[test]
fn hand_preference_charges_per_miss() {
    let layout = qwerty();
    let freq = uniform_freq(&layout);
    let text = samples(&["the quick brown fox"]);

    // On QWERTY, 'e' sits on the left hand.
    let satisfied = RuleSet {
        hand_prefs: "e:0".to_string(),
        hand_pref_weight: 10.0,
        ..Default::default()
    };
    assert_eq!(penalty_for(&layout, &layout, &freq, &text, &satisfied), 0.0);

    let violated = RuleSet {
        hand_prefs: "e:1".to_string(),
        hand_pref_weight: 10.0,
        ..Default::default()
    };
    assert!((penalty_for(&layout, &layout, &freq, &text, &violated) - 10.0).abs() < 1e-3);
}

#[test]
fn row_preference_scales_with_distance() {
    let layout = qwerty();
    let freq = uniform_freq(&layout);
    let text = samples(&["the"]);

    // 'e' sits on row 1; asking for row 3 is two rows away.
    let rules = RuleSet {
        row_prefs: "e:3".to_string(),
        row_pref_weight: 4.0,
        ..Default::default()
    };
    assert!((penalty_for(&layout, &layout, &freq, &text, &rules) - 8.0).abs() < 1e-3);
}

#[test]
fn balance_penalty_is_zero_at_the_target() {
    // One character per hand with equal frequency: the left share is 0.5.
    let layout = qwerty();
    let char_list = vec!['a', 'j'];
    let char_freq = vec![0.5, 0.5];
    let text = samples(&["aj"]);

    let balanced = RuleSet {
        balance_target: 0.5,
        balance_weight: 10.0,
        ..Default::default()
    };
    let p = penalty_for(&layout, &char_list, &char_freq, &text, &balanced);
    assert_eq!(p, 0.0);
}

#[test]
fn balance_penalty_is_quadratic_in_the_deviation() {
    let layout = qwerty();
    let char_list = vec!['a', 'j'];
    let char_freq = vec![0.5, 0.5];
    let text = samples(&["aj"]);

    let rules = RuleSet {
        balance_target: 0.25,
        balance_weight: 10.0,
        ..Default::default()
    };
    // share = 0.5, target = 0.25: 10 * 0.25^2 * 100
    let p = penalty_for(&layout, &char_list, &char_freq, &text, &rules);
    assert!((p - 62.5).abs() < 1e-3);
}

#[test]
fn moving_a_character_across_hands_shifts_the_balance_penalty() {
    let char_list = vec!['e', 't', 'o'];
    let char_freq = vec![0.5, 0.3, 0.2];
    let text = samples(&["eto"]);
    let rules = RuleSet {
        balance_target: 0.5,
        balance_weight: 10.0,
        ..Default::default()
    };

    // QWERTY places e and t on the left and o on the right: left share 0.8.
    let layout = qwerty();
    let before = penalty_for(&layout, &char_list, &char_freq, &text, &rules);
    let expected = 10.0 * (0.8f32 - 0.5).powi(2) * 100.0;
    assert!((before - expected).abs() < 1e-2);

    // Swapping e with o moves e's whole share across the split: share 0.5.
    let mut swapped = layout.clone();
    let e_idx = swapped.iter().position(|&c| c == 'e').unwrap();
    let o_idx = swapped.iter().position(|&c| c == 'o').unwrap();
    swapped.swap(e_idx, o_idx);

    let after = penalty_for(&swapped, &char_list, &char_freq, &text, &rules);
    assert!(after.abs() < 1e-4);
}
