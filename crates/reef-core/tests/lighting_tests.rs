use rand::rngs::SmallRng;
use rand::SeedableRng;
use reef_core::lighting::{
    lighting_state, SunRays, ACCENT_BASE_INTENSITY, RAY_COUNT, RAY_DEPTH, RAY_SPREAD_X,
};

#[test]
fn rig_follows_the_camera() {
    let near = lighting_state(0.0, 0.0);
    let far = lighting_state(0.0, -60.0);
    assert_eq!(far.sun_position.z - near.sun_position.z, -60.0);
    assert_eq!(far.sun_target.z - near.sun_target.z, -60.0);
    assert_eq!(far.accent_position.z - near.accent_position.z, -60.0);
}

#[test]
fn sun_direction_points_up_and_varies_over_time() {
    let a = lighting_state(0.0, -20.0);
    let b = lighting_state(8.0, -20.0);
    let da = a.sun_direction();
    let db = b.sun_direction();
    assert!((da.length() - 1.0).abs() < 1e-5);
    assert!(da.y > 0.5, "sun should sit well above the scene");
    assert!(da != db, "sun direction should sway as time passes");
    // the sway is gentle; both frames agree on the broad direction
    assert!(da.dot(db) > 0.99);
}

#[test]
fn accent_intensity_sways_around_its_base() {
    for i in 0..200 {
        let t = i as f32 * 0.37;
        let s = lighting_state(t, 0.0);
        assert!(
            (s.accent_intensity - ACCENT_BASE_INTENSITY).abs() <= 0.1 + 1e-5,
            "accent {} strayed at t {t}",
            s.accent_intensity
        );
    }
}

#[test]
fn rays_stay_inside_their_band_and_track_camera_z() {
    let mut rng = SmallRng::seed_from_u64(11);
    let rays = SunRays::new(&mut rng);
    assert_eq!(rays.rays.len(), RAY_COUNT);

    for i in 0..RAY_COUNT {
        let p0 = rays.ray_position(i, 0.0, 0.0);
        let p1 = rays.ray_position(i, 3.0, -40.0);
        // sway 1.8 on top of the half-spread base
        assert!(p0.x.abs() <= RAY_SPREAD_X / 2.0 + 1.8 + 1e-4);
        assert!((p1.z - p0.z + 40.0).abs() < 1e-4, "ray {i} lost the camera");
        assert!(p0.z.abs() <= RAY_DEPTH / 2.0 + 1e-4);
    }
}
