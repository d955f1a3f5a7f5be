use safedoc_core::{
    quadrant_for, reconcile_quadrant, reconcile_quadrant_with, EmergencyRiskAnalysis,
    LineAttribution, Quadrant,
};

#[test]
fn adding_twice_equals_adding_once() {
    let text = "7. manual note\n3";
    let once = reconcile_quadrant(text, 5, "5", true);
    let twice = reconcile_quadrant(&once, 5, "5", true);
    assert_eq!(once, "3\n5\n7. manual note");
    assert_eq!(twice, once);
}

#[test]
fn removing_twice_equals_removing_once() {
    let text = "1\n4\n5. check hoses";
    let once = reconcile_quadrant(text, 4, "4", false);
    assert_eq!(once, "1\n5. check hoses");
    assert_eq!(reconcile_quadrant(&once, 4, "4", false), once);
}

#[test]
fn add_then_remove_on_blank_text_is_blank() {
    let added = reconcile_quadrant("", 5, "5", true);
    assert_eq!(added, "5");
    assert_eq!(reconcile_quadrant(&added, 5, "5", false), "");
}

#[test]
fn removal_keeps_lines_of_other_risks() {
    assert_eq!(reconcile_quadrant("3.\n7. some note", 3, "3", false), "7. some note");
}

#[test]
fn duplicate_lines_collapse_to_one() {
    assert_eq!(reconcile_quadrant("5\n5", 5, "5", true), "5");
    assert_eq!(reconcile_quadrant("9\n2\n9", 4, "4", false), "2\n9");
}

#[test]
fn lines_sort_by_leading_number() {
    assert_eq!(reconcile_quadrant("10\n2", 2, "2", true), "2\n10");
    assert_eq!(
        reconcile_quadrant("note b\n12\nnote a\n3", 1, "1", true),
        "1\n3\n12\nnote b\nnote a"
    );
}

#[test]
fn bounded_and_legacy_attribution_differ_on_prefixes() {
    let text = "1\n10\n12. note";
    assert_eq!(reconcile_quadrant(text, 1, "1", false), "10\n12. note");
    assert_eq!(
        reconcile_quadrant_with(text, 1, "1", false, LineAttribution::LegacyPrefix),
        ""
    );
}

#[test]
fn quadrants_follow_risk_ranges() {
    let expected = [
        (1, Quadrant::Front),
        (5, Quadrant::Front),
        (6, Quadrant::Back),
        (10, Quadrant::Back),
        (11, Quadrant::Left),
        (15, Quadrant::Left),
        (16, Quadrant::Right),
        (19, Quadrant::Right),
        (0, Quadrant::Front),
        (25, Quadrant::Front),
    ];
    for (risk_id, quadrant) in expected {
        assert_eq!(quadrant_for(risk_id), quadrant, "risk {risk_id}");
    }
}

#[test]
fn both_maps_move_together_for_the_same_risk() {
    let mut form = EmergencyRiskAnalysis::new();
    form.execution_map.back = "isolar área".to_string();

    form.set_risk_selected(8, true).unwrap();
    assert_eq!(form.diagnosis_map.back, "8");
    assert_eq!(form.execution_map.back, "8\nisolar área");
    assert!(form.diagnosis_map.front.is_empty());

    form.set_risk_selected(8, false).unwrap();
    assert_eq!(form.diagnosis_map.back, "");
    assert_eq!(form.execution_map.back, "isolar área");
}
