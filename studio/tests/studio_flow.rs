//! End-to-end behaviour of the studio against an in-memory surface.

use studio::algorithms::merge::MergeOp;
use studio::config::StudioConfig;
use studio::geometry::area::AreaMetric;
use studio::model::{Feature, Geometry, Solution};
use studio::session::{FeatureId, MergeOutcome};
use studio::surface::{ButtonColor, ReconcileOutcome, RecordingSurface, SurfaceEvent};
use studio::{EventOutcome, Studio};

fn square(x: f64, y: f64, size: f64) -> Feature {
    Feature::polygon(vec![vec![[x, y], [x + size, y], [x + size, y + size], [x, y + size], [x, y]]])
}

fn config() -> StudioConfig {
    StudioConfig {
        access_token: Some("pk.test".to_string()),
        area_metric: AreaMetric::Planar,
        ..StudioConfig::default()
    }
}

fn studio_with(solutions: Vec<Vec<Feature>>) -> Studio<RecordingSurface> {
    let mut studio: Studio<RecordingSurface> = Studio::new(config());
    let solutions = solutions
        .into_iter()
        .enumerate()
        .map(|(i, f)| Solution::from_features(i, f).unwrap())
        .collect();
    studio.load_solutions(solutions).unwrap();
    studio.attach_surface(RecordingSurface::loaded());
    studio
}

fn drawn(studio: &Studio<RecordingSurface>) -> Vec<FeatureId> {
    studio.surface().unwrap().feature_ids()
}

/// Select the features currently drawn at `positions`, as the surface would report them.
fn select(studio: &mut Studio<RecordingSurface>, positions: &[usize]) {
    let features = positions
        .iter()
        .map(|&p| studio.surface().unwrap().features[p].clone())
        .collect();
    studio.dispatch(SurfaceEvent::SelectionChange { features }).unwrap();
}

#[test]
fn attach_draws_active_solution_with_positional_ids() {
    let studio = studio_with(vec![vec![square(0.0, 0.0, 1.0), square(3.0, 0.0, 1.0)], vec![]]);
    assert_eq!(drawn(&studio), vec![FeatureId::encode(0, 0), FeatureId::encode(0, 1)]);
    let surface = studio.surface().unwrap();
    assert_eq!(surface.controls.len(), 2);
    assert!(surface.controls.iter().all(|b| !b.enabled));
}

#[test]
fn nothing_is_drawn_without_credential() {
    let mut studio: Studio<RecordingSurface> = Studio::new(StudioConfig::default());
    let solution = Solution::from_features(0, vec![square(0.0, 0.0, 1.0)]).unwrap();
    studio.load_solutions(vec![solution]).unwrap();
    assert_eq!(studio.attach_surface(RecordingSurface::loaded()), ReconcileOutcome::Deferred);
    assert!(drawn(&studio).is_empty());
    assert!(!studio.is_drawable());

    assert_eq!(studio.set_access_token("pk.late"), ReconcileOutcome::Redrawn { features: 1 });
    assert_eq!(drawn(&studio).len(), 1);
}

#[test]
fn redraw_waits_for_style_load() {
    let mut studio: Studio<RecordingSurface> = Studio::new(config());
    let solution = Solution::from_features(0, vec![square(0.0, 0.0, 1.0)]).unwrap();
    studio.load_solutions(vec![solution]).unwrap();
    assert_eq!(studio.attach_surface(RecordingSurface::new()), ReconcileOutcome::Deferred);

    studio.surface_mut().unwrap().style_loaded = true;
    let outcome = studio.dispatch(SurfaceEvent::Load).unwrap();
    assert_eq!(outcome, EventOutcome::Loaded(ReconcileOutcome::Redrawn { features: 1 }));
}

#[test]
fn consecutive_creates_each_see_the_previous_one() {
    let mut studio: Studio<RecordingSurface> = Studio::new(config());
    studio.load_solutions(vec![Solution::from_features(0, vec![]).unwrap()]).unwrap();
    // Surface not ready: no reconciliation happens between the two events.
    studio.attach_surface(RecordingSurface::new());

    let first =
        studio.dispatch(SurfaceEvent::Create { features: vec![square(0.0, 0.0, 1.0)] }).unwrap();
    let second =
        studio.dispatch(SurfaceEvent::Create { features: vec![square(5.0, 0.0, 1.0)] }).unwrap();
    assert_eq!(first, EventOutcome::Created { ids: vec![FeatureId::encode(0, 0)] });
    assert_eq!(second, EventOutcome::Created { ids: vec![FeatureId::encode(0, 1)] });
    assert_eq!(studio.active_polygons().len(), 2);
    assert_eq!(studio.surface().unwrap().clear_calls, 0);

    studio.surface_mut().unwrap().style_loaded = true;
    studio.dispatch(SurfaceEvent::Load).unwrap();
    assert_eq!(drawn(&studio), vec![FeatureId::encode(0, 0), FeatureId::encode(0, 1)]);
}

#[test]
fn delete_redraws_with_shifted_ids() {
    let mut studio = studio_with(vec![(0..5).map(|k| square(k as f64 * 3.0, 0.0, 1.0)).collect()]);
    let shown = &studio.surface().unwrap().features;
    let doomed = vec![shown[1].clone(), shown[3].clone()];
    let outcome = studio.dispatch(SurfaceEvent::Delete { features: doomed }).unwrap();
    assert_eq!(outcome, EventOutcome::Deleted { removed: 2 });

    let surface = studio.surface().unwrap();
    assert_eq!(surface.feature_ids(), (0..3).map(|p| FeatureId::encode(0, p)).collect::<Vec<_>>());
    let xs: Vec<f64> = surface
        .features
        .iter()
        .map(|f| match &f.geometry {
            Geometry::Polygon { coordinates } => coordinates[0][0][0],
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(xs, vec![0.0, 6.0, 12.0]);
}

#[test]
fn selection_drives_controls_and_stats() {
    let mut studio = studio_with(vec![vec![square(0.0, 0.0, 1.0), square(3.0, 0.0, 2.0)]]);
    assert_eq!(studio.stats().to_string(), "There is no area selected at the moment.");

    select(&mut studio, &[0, 1]);
    assert_eq!(studio.stats().to_string(), "The selected area is 5 sqm.");
    let union = studio.surface().unwrap().control("union").unwrap();
    assert!(union.enabled);
    assert_eq!(union.color, ButtonColor::Black);

    select(&mut studio, &[1]);
    let union = studio.surface().unwrap().control("union").unwrap();
    assert!(!union.enabled);
    assert_eq!(union.color, ButtonColor::Grey);
}

#[test]
fn union_replaces_the_selection() {
    let mut studio = studio_with(vec![vec![
        square(0.0, 0.0, 2.0),
        square(1.0, 0.0, 2.0),
        square(10.0, 0.0, 1.0),
    ]]);
    let third = studio.active_polygons()[2].clone();
    select(&mut studio, &[0, 1]);

    let outcome = studio.click_control("union").unwrap();
    assert_eq!(
        outcome,
        EventOutcome::Merged(MergeOutcome::Merged { id: FeatureId::encode(0, 1), removed: 2 })
    );

    let polygons = studio.active_polygons();
    assert_eq!(polygons.len(), 2);
    assert_eq!(polygons[0].geometry, third.geometry);
    assert_eq!(polygons[1].id, Some(FeatureId::encode(0, 1)));
    assert!(studio.selection().is_empty());
    assert_eq!(drawn(&studio), vec![FeatureId::encode(0, 0), FeatureId::encode(0, 1)]);
}

#[test]
fn union_of_disjoint_selection_changes_nothing() {
    let mut studio = studio_with(vec![vec![square(0.0, 0.0, 1.0), square(5.0, 5.0, 1.0)]]);
    let before = studio.active_polygons().to_vec();
    let revision = studio.session().revision();
    let clears = studio.surface().unwrap().clear_calls;
    select(&mut studio, &[0, 1]);

    assert_eq!(studio.merge_selected(MergeOp::Union).unwrap(), MergeOutcome::NoResult);
    assert_eq!(studio.active_polygons(), before.as_slice());
    assert_eq!(studio.session().revision(), revision);
    assert_eq!(studio.surface().unwrap().clear_calls, clears);
}

#[test]
fn disabled_or_unknown_controls() {
    let mut studio = studio_with(vec![vec![square(0.0, 0.0, 1.0)]]);
    assert_eq!(studio.click_control("union").unwrap(), EventOutcome::Ignored);
    let err = studio.click_control("extrude").unwrap_err();
    assert_eq!(err.code(), "unknown_control");
}

#[test]
fn switching_solutions_keeps_overlays() {
    let mut studio = studio_with(vec![
        vec![square(0.0, 0.0, 1.0)],
        vec![square(0.0, 0.0, 1.0), square(3.0, 0.0, 1.0)],
    ]);
    studio.dispatch(SurfaceEvent::Create { features: vec![square(8.0, 0.0, 1.0)] }).unwrap();
    assert_eq!(drawn(&studio).len(), 2);

    studio.select_solution(1).unwrap();
    assert_eq!(drawn(&studio), vec![FeatureId::encode(1, 0), FeatureId::encode(1, 1)]);

    studio.select_solution(0).unwrap();
    assert_eq!(drawn(&studio), vec![FeatureId::encode(0, 0), FeatureId::encode(0, 1)]);
    assert!(studio.session().is_dirty(1));
}

#[test]
fn missing_id_on_delete_surfaces_error() {
    let mut studio = studio_with(vec![vec![square(0.0, 0.0, 1.0)]]);
    let clears = studio.surface().unwrap().clear_calls;
    let err = studio
        .dispatch(SurfaceEvent::Delete { features: vec![square(0.0, 0.0, 1.0)] })
        .unwrap_err();
    assert_eq!(err.code(), "missing_feature_id");
    assert_eq!(studio.active_polygons().len(), 1);
    assert_eq!(studio.surface().unwrap().clear_calls, clears);
}
