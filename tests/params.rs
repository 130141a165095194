use approx::assert_relative_eq;
use squiggle_voronoi::{ColorRule, Params};

#[test]
fn defaults_match_the_page() {
    let params = Params::default();
    assert_eq!(params.canvas.width, 500.0);
    assert_eq!(params.canvas.height, 500.0);
    assert_eq!(params.squiggle.p_value, 0.01);
    assert_eq!(params.squiggle.points_radius, 2.0);
    assert_relative_eq!(1.0 / params.squiggle.distance_ratio, 0.15 / 0.7);
    assert_eq!(params.style.color_rule, ColorRule::Composite);
    assert_eq!(params.style.point_radius, 2.0);
}

#[test]
fn empty_file_is_all_defaults() {
    assert_eq!(Params::from_toml_str("").unwrap(), Params::default());
}

#[test]
fn partial_tables_keep_other_defaults() {
    let params = Params::from_toml_str(
        r#"
        [canvas]
        width = 800

        [squiggle]
        p_value = 0.02
        "#,
    )
    .unwrap();
    assert_eq!(params.canvas.width, 800.0);
    assert_eq!(params.canvas.height, 500.0);
    assert_eq!(params.squiggle.p_value, 0.02);
    assert_eq!(params.squiggle.points_radius, 2.0);
}

#[test]
fn out_of_range_values_are_rejected() {
    assert!(Params::from_toml_str("[squiggle]\np_value = 1.5").is_err());
    assert!(Params::from_toml_str("[canvas]\nwidth = 0").is_err());
    assert!(Params::from_toml_str("[squiggle]\ndistance_ratio = -1.0").is_err());
    assert!(Params::from_toml_str("[style]\ncolor_rule = \"rainbow\"").is_err());
}

#[test]
fn non_finite_values_are_rejected() {
    for raw in [
        "[canvas]\nwidth = inf",
        "[canvas]\nheight = inf",
        "[canvas]\nwidth = nan",
        "[squiggle]\np_value = nan",
        "[squiggle]\np_value = inf",
        "[squiggle]\npoints_radius = nan",
        "[squiggle]\npoints_radius = inf",
        "[squiggle]\npoints_radius = -1.0",
        "[squiggle]\ndistance_ratio = inf",
        "[squiggle]\ndistance_ratio = nan",
        "[style]\npoint_radius = inf",
    ] {
        assert!(Params::from_toml_str(raw).is_err(), "accepted {raw:?}");
    }
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let path = std::env::temp_dir().join("squiggle_voronoi_no_such_params.toml");
    assert_eq!(Params::load_or_default(&path).unwrap(), Params::default());
    assert!(Params::load(&path).is_err());
}
