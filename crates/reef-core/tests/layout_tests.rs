use reef_core::constants::FLOOR_Y;
use reef_core::layout::{
    self, CENTER_CLEAR, CLUSTER_RADIUS, CORALS_PER_CLUSTER_MAX, CORALS_PER_CLUSTER_MIN, MAX_X,
    NUM_CLUSTERS, SOLO_CORALS, Z_MAX, Z_MIN,
};
use reef_core::palette::CORAL_PALETTES;

#[test]
fn layout_is_deterministic() {
    let a = layout::generate_layout();
    let b = layout::generate_layout();
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x, y);
    }
}

#[test]
fn instance_count_is_within_configured_range() {
    let corals = layout::generate_layout();
    let min = NUM_CLUSTERS * CORALS_PER_CLUSTER_MIN + SOLO_CORALS;
    let max = NUM_CLUSTERS * CORALS_PER_CLUSTER_MAX + SOLO_CORALS;
    assert!(
        (min..=max).contains(&corals.len()),
        "count {} outside [{min}, {max}]",
        corals.len()
    );
}

#[test]
fn every_instance_sits_on_the_seabed_within_bounds() {
    for inst in layout::generate_layout() {
        assert_eq!(inst.position.y, FLOOR_Y);
        assert!(
            inst.position.x.abs() <= MAX_X,
            "x {} beyond half-width",
            inst.position.x
        );
        assert!(inst.position.z <= Z_MIN + CLUSTER_RADIUS);
        assert!(inst.position.z >= Z_MAX - CLUSTER_RADIUS);
        assert!(inst.color_index < CORAL_PALETTES.len());
        assert!(inst.seed < 99_999);
    }
}

#[test]
fn clusters_leave_the_center_channel_open() {
    // Cluster centers clear the channel; members can spill up to the
    // cluster radius back in.
    for inst in layout::generate_layout() {
        assert!(
            inst.position.x.abs() >= CENTER_CLEAR - CLUSTER_RADIUS,
            "coral at x {} blocks the camera channel",
            inst.position.x
        );
    }
}

#[test]
fn scales_cover_standard_and_hero_ranges() {
    let corals = layout::generate_layout();
    for inst in &corals {
        assert!(
            (0.8..=4.0).contains(&inst.scale),
            "scale {} out of range",
            inst.scale
        );
    }
    // hero pieces exist
    assert!(
        corals.iter().any(|c| c.scale >= 2.5),
        "no hero-sized coral generated"
    );
}

#[test]
fn master_seed_changes_the_reef() {
    let a = layout::generate_layout_seeded(42);
    let b = layout::generate_layout_seeded(43);
    let same = a
        .iter()
        .zip(&b)
        .filter(|(x, y)| x.position == y.position)
        .count();
    assert!(same < a.len().min(b.len()) / 2, "reseeding barely moved the reef");
}
