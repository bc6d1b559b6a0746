#![allow(clippy::float_cmp)]

use super::*;

fn engine_with(config: EditorConfig, w: f64, h: f64) -> EngineCore {
    let mut engine = EngineCore::with_config(config);
    engine.create_plan(Some(Size::new(w, h))).unwrap();
    engine
}

fn engine_with_plan(w: f64, h: f64) -> EngineCore {
    engine_with(EditorConfig::default(), w, h)
}

fn unsnapped() -> EditorConfig {
    EditorConfig { snap_to_grid: false, ..EditorConfig::default() }
}

fn created_id(actions: &[Action]) -> ObjectId {
    actions
        .iter()
        .find_map(|a| match a {
            Action::ObjectCreated { id, .. } => Some(*id),
            _ => None,
        })
        .unwrap()
}

fn add_desk(engine: &mut EngineCore, x: f64, y: f64) -> ObjectId {
    created_id(&engine.add_desk(Point::new(x, y)).unwrap())
}

fn add_wall(engine: &mut EngineCore, x: f64, y: f64) -> ObjectId {
    created_id(&engine.add_wall(Point::new(x, y)).unwrap())
}

fn settle(engine: &mut EngineCore) {
    for _ in 0..200 {
        if !engine.is_animating() {
            return;
        }
        engine.tick();
    }
    panic!("animation did not settle");
}

fn double_activate(engine: &mut EngineCore, id: ObjectId, at: f64) -> Vec<Action> {
    engine.on_primary_activate(Target::Object(id), at).unwrap();
    engine.on_primary_activate(Target::Object(id), at + 100.0).unwrap()
}

// =============================================================
// Plan lifecycle
// =============================================================

#[test]
fn create_plan_uses_default_size_at_origin() {
    let mut engine = EngineCore::new();
    let actions = engine.create_plan(None).unwrap();
    assert_eq!(actions[0], Action::PlanCreated { width: 600.0, height: 400.0 });
    let plan = engine.plan().unwrap();
    assert_eq!(plan.rect(), Rect::new(0.0, 0.0, 600.0, 400.0));
    assert!(!plan.confirmed);
}

#[test]
fn create_plan_rounds_floors_and_caps_size() {
    let mut engine = EngineCore::new();
    engine.create_plan(Some(Size::new(1234.0, 5.0))).unwrap();
    let plan = engine.plan().unwrap();
    assert_eq!(plan.width, 1200.0);
    assert_eq!(plan.height, 100.0);
}

#[test]
fn second_plan_is_refused() {
    let mut engine = engine_with_plan(400.0, 300.0);
    assert_eq!(engine.create_plan(None), Err(SceneError::PlanExists));
}

#[test]
fn delete_plan_discards_objects() {
    let mut engine = engine_with_plan(400.0, 300.0);
    add_desk(&mut engine, 0.0, 0.0);
    let actions = engine.delete_plan().unwrap();
    assert_eq!(actions[0], Action::PlanDeleted { discarded: 1 });
    assert!(engine.plan().is_none());
    assert!(engine.scene.is_empty());
    assert_eq!(engine.status(), "No plan");
}

#[test]
fn delete_plan_while_confirmed_is_noop() {
    let mut engine = engine_with_plan(400.0, 300.0);
    engine.confirm_plan().unwrap();
    assert!(engine.delete_plan().unwrap().is_empty());
    assert!(engine.plan().is_some());
}

#[test]
fn confirm_twice_is_noop() {
    let mut engine = engine_with_plan(400.0, 300.0);
    assert_eq!(engine.confirm_plan().unwrap()[0], Action::PlanConfirmed);
    assert!(engine.confirm_plan().unwrap().is_empty());
    assert_eq!(engine.unconfirm_plan().unwrap()[0], Action::PlanUnconfirmed);
    assert!(engine.unconfirm_plan().unwrap().is_empty());
}

#[test]
fn status_reflects_counts_and_confirmation() {
    let mut engine = engine_with_plan(400.0, 300.0);
    add_desk(&mut engine, 0.0, 0.0);
    add_desk(&mut engine, 100.0, 100.0);
    add_wall(&mut engine, 200.0, 200.0);
    assert_eq!(engine.status(), "Plan 400x300, 2 desks, 1 wall");
    engine.confirm_plan().unwrap();
    assert_eq!(engine.status(), "Plan 400x300, 2 desks, 1 wall, confirmed");
}

// =============================================================
// Adding objects
// =============================================================

#[test]
fn second_desk_at_same_spot_is_relocated() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let first = engine.add_desk(Point::new(0.0, 0.0)).unwrap();
    assert!(matches!(first[0], Action::ObjectCreated { x, y, relocated: false, .. } if x == 0.0 && y == 0.0));

    let second = engine.add_desk(Point::new(0.0, 0.0)).unwrap();
    assert!(matches!(second[0], Action::ObjectCreated { x, y, relocated: true, .. } if x == 20.0 && y == 0.0));
}

#[test]
fn add_emits_committed_snapshot() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let actions = engine.add_desk(Point::new(40.0, 60.0)).unwrap();
    let Action::Committed { snapshot: Some(snap), status } = &actions[1] else {
        panic!("expected committed snapshot, got {:?}", actions[1]);
    };
    assert_eq!(snap.objects.len(), 1);
    assert_eq!((snap.objects[0].x, snap.objects[0].y), (40.0, 60.0));
    assert_eq!(status, "Plan 400x300, 1 desk, 0 walls");
}

#[test]
fn add_while_confirmed_is_noop() {
    let mut engine = engine_with_plan(400.0, 300.0);
    engine.confirm_plan().unwrap();
    assert!(engine.add_desk(Point::new(0.0, 0.0)).unwrap().is_empty());
    assert!(engine.scene.is_empty());
}

#[test]
fn add_without_plan_reports_no_plan() {
    let mut engine = EngineCore::new();
    assert_eq!(engine.add_desk(Point::new(0.0, 0.0)), Err(SceneError::NoPlan));
}

#[test]
fn wall_uses_default_size() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_wall(&mut engine, 50.0, 50.0);
    assert_eq!(engine.object(&id).unwrap().size(), Size::new(100.0, 20.0));
}

// =============================================================
// Drag
// =============================================================

#[test]
fn drag_moves_target_then_animation_catches_up() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_desk(&mut engine, 0.0, 0.0);

    engine.on_pointer_down(Target::Object(id), Point::new(5.0, 5.0)).unwrap();
    assert_eq!(engine.selection(), Selection::Object(id));
    let actions = engine.on_pointer_move(Point::new(105.0, 55.0));
    assert_eq!(actions[0], Action::ObjectMoved { id, x: 100.0, y: 50.0 });

    let obj = engine.object(&id).unwrap();
    assert_eq!(obj.target(), Point::new(100.0, 50.0));
    assert_eq!(obj.rendered(), Point::new(0.0, 0.0));

    engine.on_pointer_up();
    assert!(engine.input.is_idle());
    settle(&mut engine);
    assert_eq!(engine.object(&id).unwrap().rendered(), Point::new(100.0, 50.0));
}

#[test]
fn drag_is_clamped_inside_plan() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_desk(&mut engine, 0.0, 0.0);
    engine.on_pointer_down(Target::Object(id), Point::new(0.0, 0.0)).unwrap();
    engine.on_pointer_move(Point::new(900.0, 900.0));
    assert_eq!(engine.object(&id).unwrap().target(), Point::new(385.0, 250.0));
}

#[test]
fn drag_onto_another_desk_is_blocked() {
    let mut engine = engine_with_plan(400.0, 300.0);
    add_desk(&mut engine, 0.0, 0.0);
    let b = add_desk(&mut engine, 100.0, 0.0);

    engine.on_pointer_down(Target::Object(b), Point::new(105.0, 5.0)).unwrap();
    let actions = engine.on_pointer_move(Point::new(10.0, 10.0));
    assert_eq!(actions, vec![Action::Blocked { target: Target::Object(b) }]);
    assert!(engine.ui.last_rejected);
    assert_eq!(engine.object(&b).unwrap().target(), Point::new(100.0, 0.0));

    // A later valid frame clears the warning.
    engine.on_pointer_move(Point::new(205.0, 5.0));
    assert!(!engine.ui.last_rejected);
    assert_eq!(engine.object(&b).unwrap().target(), Point::new(200.0, 0.0));
}

/// Desks A and B sit 15 apart; C sits under the gap.
fn three_neighbour_scene() -> (EngineCore, ObjectId) {
    let mut engine = engine_with(unsnapped(), 400.0, 300.0);
    add_desk(&mut engine, 0.0, 0.0);
    add_desk(&mut engine, 30.0, 0.0);
    add_desk(&mut engine, 15.0, 50.0);
    let d = add_desk(&mut engine, 200.0, 0.0);
    (engine, d)
}

#[test]
fn drag_into_slot_touching_three_is_blocked() {
    let (mut engine, d) = three_neighbour_scene();
    engine.on_pointer_down(Target::Object(d), Point::new(205.0, 5.0)).unwrap();
    let actions = engine.on_pointer_move(Point::new(20.0, 5.0));
    assert_eq!(actions, vec![Action::Blocked { target: Target::Object(d) }]);
    assert_eq!(engine.object(&d).unwrap().target(), Point::new(200.0, 0.0));
}

#[test]
fn drag_into_slot_touching_two_is_accepted() {
    let mut engine = engine_with(unsnapped(), 400.0, 300.0);
    add_desk(&mut engine, 0.0, 0.0);
    add_desk(&mut engine, 30.0, 0.0);
    let d = add_desk(&mut engine, 200.0, 0.0);
    engine.on_pointer_down(Target::Object(d), Point::new(205.0, 5.0)).unwrap();
    engine.on_pointer_move(Point::new(20.0, 5.0));
    assert_eq!(engine.object(&d).unwrap().target(), Point::new(15.0, 0.0));
    assert!(!engine.ui.last_rejected);
}

#[test]
fn drag_refused_while_object_still_animating() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_desk(&mut engine, 0.0, 0.0);
    engine.on_pointer_down(Target::Object(id), Point::new(5.0, 5.0)).unwrap();
    engine.on_pointer_move(Point::new(105.0, 5.0));
    engine.on_pointer_up();

    engine.on_pointer_down(Target::Object(id), Point::new(10.0, 5.0)).unwrap();
    assert!(engine.input.is_idle());
    assert_eq!(engine.selection(), Selection::Object(id));
}

#[test]
fn second_gesture_start_is_ignored() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let a = add_desk(&mut engine, 0.0, 0.0);
    let b = add_desk(&mut engine, 100.0, 0.0);
    engine.on_pointer_down(Target::Object(a), Point::new(5.0, 5.0)).unwrap();
    assert!(engine.on_pointer_down(Target::Object(b), Point::new(105.0, 5.0)).unwrap().is_empty());
    assert_eq!(engine.input.owner(), Some(Target::Object(a)));
    assert_eq!(engine.selection(), Selection::Object(a));
}

#[test]
fn confirming_mid_drag_abandons_gesture() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_desk(&mut engine, 0.0, 0.0);
    engine.on_pointer_down(Target::Object(id), Point::new(5.0, 5.0)).unwrap();
    engine.confirm_plan().unwrap();
    assert!(engine.on_pointer_move(Point::new(105.0, 5.0)).is_empty());
    assert!(engine.input.is_idle());
    assert_eq!(engine.object(&id).unwrap().target(), Point::new(0.0, 0.0));
}

#[test]
fn pointer_down_on_confirmed_plan_selects_without_dragging() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_desk(&mut engine, 0.0, 0.0);
    engine.confirm_plan().unwrap();
    engine.on_pointer_down(Target::Object(id), Point::new(5.0, 5.0)).unwrap();
    assert_eq!(engine.selection(), Selection::Object(id));
    assert!(engine.input.is_idle());
}

#[test]
fn pointer_down_reports_missing_entities() {
    let mut engine = EngineCore::new();
    assert_eq!(engine.on_pointer_down(Target::Plan, Point::default()), Err(SceneError::NoPlan));

    let mut engine = engine_with_plan(400.0, 300.0);
    let ghost = uuid::Uuid::new_v4();
    assert_eq!(
        engine.on_pointer_down(Target::Object(ghost), Point::default()),
        Err(SceneError::ObjectNotFound(ghost))
    );
}

// =============================================================
// Plan resize
// =============================================================

fn start_plan_resize(engine: &mut EngineCore, anchor: ResizeAnchor, at: Point) {
    engine.select(Selection::Plan).unwrap();
    engine.on_pointer_down(Target::PlanHandle(anchor), at).unwrap();
    assert!(matches!(engine.input, InputState::ResizingPlan { .. }));
}

#[test]
fn plan_handle_needs_selection_first() {
    let mut engine = engine_with_plan(400.0, 300.0);
    engine.on_pointer_down(Target::PlanHandle(ResizeAnchor::E), Point::new(400.0, 150.0)).unwrap();
    assert!(engine.input.is_idle());
    assert_eq!(engine.selection(), Selection::Plan);
}

#[test]
fn plan_east_handle_changes_width_only() {
    let mut engine = engine_with_plan(400.0, 300.0);
    start_plan_resize(&mut engine, ResizeAnchor::E, Point::new(400.0, 150.0));
    let actions = engine.on_pointer_move(Point::new(523.0, 190.0));
    assert_eq!(actions[0], Action::PlanResized { rect: Rect::new(0.0, 0.0, 520.0, 300.0) });
}

#[test]
fn plan_shrink_snaps_out_to_contain_objects() {
    let mut engine = engine_with_plan(400.0, 300.0);
    add_desk(&mut engine, 300.0, 100.0);
    start_plan_resize(&mut engine, ResizeAnchor::E, Point::new(400.0, 150.0));
    engine.on_pointer_move(Point::new(200.0, 150.0));
    assert_eq!(engine.plan().unwrap().rect(), Rect::new(0.0, 0.0, 315.0, 300.0));
}

#[test]
fn plan_west_handle_moves_origin_and_keeps_objects_in_place() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_desk(&mut engine, 300.0, 100.0);
    start_plan_resize(&mut engine, ResizeAnchor::W, Point::new(0.0, 150.0));
    engine.on_pointer_move(Point::new(100.0, 150.0));

    assert_eq!(engine.plan().unwrap().rect(), Rect::new(100.0, 0.0, 300.0, 300.0));
    let obj = engine.object(&id).unwrap();
    assert_eq!(obj.target(), Point::new(200.0, 100.0));
    assert_eq!(obj.rendered(), Point::new(200.0, 100.0));
}

#[test]
fn plan_resize_respects_minimum_size() {
    let mut engine = engine_with_plan(400.0, 300.0);
    start_plan_resize(&mut engine, ResizeAnchor::Se, Point::new(400.0, 300.0));
    engine.on_pointer_move(Point::new(-500.0, -500.0));
    assert_eq!(engine.plan().unwrap().rect(), Rect::new(0.0, 0.0, 100.0, 100.0));
}

#[test]
fn plan_resize_is_clamped_to_container() {
    let mut engine = engine_with_plan(400.0, 300.0);
    start_plan_resize(&mut engine, ResizeAnchor::Se, Point::new(400.0, 300.0));
    engine.on_pointer_move(Point::new(2000.0, 2000.0));
    assert_eq!(engine.plan().unwrap().rect(), Rect::new(0.0, 0.0, 1200.0, 650.0));
}

#[test]
fn escape_restores_plan_before_resize() {
    let mut engine = engine_with_plan(400.0, 300.0);
    start_plan_resize(&mut engine, ResizeAnchor::E, Point::new(400.0, 150.0));
    engine.on_pointer_move(Point::new(500.0, 150.0));
    assert_eq!(engine.plan().unwrap().width, 500.0);

    engine.on_key_down(&Key("Escape".into()));
    assert_eq!(engine.plan().unwrap().rect(), Rect::new(0.0, 0.0, 400.0, 300.0));
    assert!(engine.input.is_idle());
    assert_eq!(engine.selection(), Selection::None);
}

// =============================================================
// Wall resize
// =============================================================

fn start_wall_resize(engine: &mut EngineCore, id: ObjectId, anchor: ResizeAnchor, at: Point) {
    engine.select(Selection::Object(id)).unwrap();
    engine.on_pointer_down(Target::ObjectHandle(id, anchor), at).unwrap();
    assert!(matches!(engine.input, InputState::ResizingWall { .. }));
}

#[test]
fn wall_corner_resize_keeps_opposite_corner() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_wall(&mut engine, 50.0, 50.0);
    start_wall_resize(&mut engine, id, ResizeAnchor::Se, Point::new(150.0, 70.0));
    let actions = engine.on_pointer_move(Point::new(180.0, 90.0));
    assert_eq!(actions[0], Action::ObjectResized { id, x: 50.0, y: 50.0, width: 130.0, height: 40.0 });
}

#[test]
fn wall_northwest_resize_moves_position() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_wall(&mut engine, 50.0, 50.0);
    start_wall_resize(&mut engine, id, ResizeAnchor::Nw, Point::new(50.0, 50.0));
    engine.on_pointer_move(Point::new(40.0, 40.0));
    let obj = engine.object(&id).unwrap();
    assert_eq!(obj.size(), Size::new(110.0, 30.0));
    assert_eq!(obj.target(), Point::new(40.0, 40.0));
}

#[test]
fn wall_resize_floors_at_minimum() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_wall(&mut engine, 50.0, 50.0);
    start_wall_resize(&mut engine, id, ResizeAnchor::Se, Point::new(150.0, 70.0));
    engine.on_pointer_move(Point::new(0.0, 0.0));
    let obj = engine.object(&id).unwrap();
    assert_eq!(obj.size(), Size::new(20.0, 20.0));
    assert_eq!(obj.target(), Point::new(50.0, 50.0));
}

#[test]
fn wall_resize_into_desk_is_blocked() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_wall(&mut engine, 50.0, 50.0);
    add_desk(&mut engine, 200.0, 50.0);
    start_wall_resize(&mut engine, id, ResizeAnchor::Se, Point::new(150.0, 70.0));
    let actions = engine.on_pointer_move(Point::new(220.0, 70.0));
    assert_eq!(actions, vec![Action::Blocked { target: Target::ObjectHandle(id, ResizeAnchor::Se) }]);
    assert!(engine.ui.last_rejected);
    assert_eq!(engine.object(&id).unwrap().size(), Size::new(100.0, 20.0));
}

#[test]
fn wall_resize_past_plan_edge_is_clamped_inside() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_wall(&mut engine, 280.0, 50.0);
    start_wall_resize(&mut engine, id, ResizeAnchor::Se, Point::new(380.0, 70.0));
    let actions = engine.on_pointer_move(Point::new(480.0, 70.0));
    assert_eq!(actions[0], Action::ObjectResized { id, x: 200.0, y: 50.0, width: 200.0, height: 20.0 });
    let rect = engine.object(&id).unwrap().effective_rect();
    assert!(engine.plan().unwrap().local_bounds().contains_rect(&rect, 0.0));
}

#[test]
fn wall_resize_wider_than_plan_is_blocked() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_wall(&mut engine, 50.0, 50.0);
    start_wall_resize(&mut engine, id, ResizeAnchor::Se, Point::new(150.0, 70.0));
    let actions = engine.on_pointer_move(Point::new(550.0, 70.0));
    assert_eq!(actions, vec![Action::Blocked { target: Target::ObjectHandle(id, ResizeAnchor::Se) }]);
    assert!(engine.ui.last_rejected);
    let obj = engine.object(&id).unwrap();
    assert_eq!(obj.size(), Size::new(100.0, 20.0));
    assert_eq!(obj.target(), Point::new(50.0, 50.0));
}

#[test]
fn rotated_wall_resize_derotates_pointer_delta() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_wall(&mut engine, 50.0, 50.0);
    double_activate(&mut engine, id, 0.0);
    assert_eq!(engine.object(&id).unwrap().rotation, 90.0);

    // Local south-east is the on-screen bottom-left after a quarter turn.
    start_wall_resize(&mut engine, id, ResizeAnchor::Se, Point::new(90.0, 110.0));
    engine.on_pointer_move(Point::new(90.0, 130.0));

    let obj = engine.object(&id).unwrap();
    assert_eq!(obj.size(), Size::new(120.0, 20.0));
    assert_eq!(obj.target(), Point::new(40.0, 60.0));
    assert_eq!(obj.effective_rect(), Rect::new(90.0, 10.0, 20.0, 120.0));
}

#[test]
fn desk_handles_do_not_resize() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_desk(&mut engine, 50.0, 50.0);
    engine.select(Selection::Object(id)).unwrap();
    engine.on_pointer_down(Target::ObjectHandle(id, ResizeAnchor::Se), Point::new(65.0, 100.0)).unwrap();
    assert!(matches!(engine.input, InputState::DraggingObject { .. }));
}

#[test]
fn escape_restores_wall_before_resize() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_wall(&mut engine, 50.0, 50.0);
    start_wall_resize(&mut engine, id, ResizeAnchor::Se, Point::new(150.0, 70.0));
    engine.on_pointer_move(Point::new(180.0, 90.0));
    engine.on_key_down(&Key("Escape".into()));
    let obj = engine.object(&id).unwrap();
    assert_eq!(obj.size(), Size::new(100.0, 20.0));
    assert_eq!(obj.target(), Point::new(50.0, 50.0));
}

// =============================================================
// Rotate and delete
// =============================================================

#[test]
fn double_activate_rotates_quarter_turn() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_desk(&mut engine, 100.0, 100.0);
    let actions = double_activate(&mut engine, id, 0.0);
    assert_eq!(actions[0], Action::ObjectRotated { id, rotation: 90.0 });
    assert_eq!(engine.object(&id).unwrap().effective_rect().width, 50.0);
}

#[test]
fn three_quarter_turns_match_single_negative_quarter_turn() {
    let config = EditorConfig { default_wall_size: Size::new(20.0, 20.0), ..EditorConfig::default() };
    let mut engine = engine_with(config, 400.0, 300.0);
    let id = add_wall(&mut engine, 0.0, 0.0);
    for n in 0..3 {
        double_activate(&mut engine, id, f64::from(n) * 1000.0);
    }
    let obj = engine.object(&id).unwrap();
    assert_eq!(obj.rotation, 270.0);
    assert_eq!(
        geometry::effective_bounds(obj.width, obj.height, obj.rotation),
        geometry::effective_bounds(20.0, 20.0, -90.0)
    );
}

#[test]
fn four_quarter_turns_wrap_to_zero() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_desk(&mut engine, 100.0, 100.0);
    for n in 0..4 {
        double_activate(&mut engine, id, f64::from(n) * 1000.0);
    }
    assert_eq!(engine.object(&id).unwrap().rotation, 0.0);
}

#[test]
fn rotate_ignored_while_confirmed() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_desk(&mut engine, 100.0, 100.0);
    engine.confirm_plan().unwrap();
    assert!(double_activate(&mut engine, id, 0.0).is_empty());
    assert_eq!(engine.object(&id).unwrap().rotation, 0.0);
}

#[test]
fn triple_activate_requests_then_confirms_delete() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_desk(&mut engine, 100.0, 100.0);
    double_activate(&mut engine, id, 0.0);
    let actions = engine.on_primary_activate(Target::Object(id), 200.0).unwrap();
    assert_eq!(actions, vec![Action::DeleteConfirmationRequested { id }]);
    assert_eq!(engine.ui.pending_delete, Some(id));

    let actions = engine.confirm_delete(&id).unwrap();
    assert_eq!(actions[0], Action::ObjectDeleted { id });
    assert!(engine.object(&id).is_none());
    assert_eq!(engine.ui.pending_delete, None);
}

#[test]
fn deleting_selected_object_clears_selection() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_desk(&mut engine, 100.0, 100.0);
    engine.select(Selection::Object(id)).unwrap();
    let actions = engine.remove_object(&id).unwrap();
    assert!(actions.contains(&Action::SelectionChanged(Selection::None)));
    assert_eq!(engine.selection(), Selection::None);
}

#[test]
fn delete_key_requests_confirmation_for_selection() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_desk(&mut engine, 100.0, 100.0);
    assert!(engine.on_key_down(&Key("Delete".into())).is_empty());
    engine.select(Selection::Object(id)).unwrap();
    assert_eq!(engine.on_key_down(&Key("Backspace".into())), vec![Action::DeleteConfirmationRequested { id }]);
}

#[test]
fn remove_unknown_object_is_not_found() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let ghost = uuid::Uuid::new_v4();
    assert_eq!(engine.remove_object(&ghost), Err(SceneError::ObjectNotFound(ghost)));
}

// =============================================================
// Secondary activation
// =============================================================

#[test]
fn secondary_on_plan_adds_desk_at_point() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let actions = engine.on_secondary_activate(Target::Plan, Point::new(50.0, 50.0)).unwrap();
    assert!(matches!(
        actions[0],
        Action::ObjectCreated { kind: ObjectKind::Desk, x, y, .. } if x == 50.0 && y == 50.0
    ));
}

#[test]
fn secondary_on_object_or_confirmed_plan_does_nothing() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_desk(&mut engine, 0.0, 0.0);
    assert!(engine.on_secondary_activate(Target::Object(id), Point::new(100.0, 100.0)).unwrap().is_empty());
    engine.confirm_plan().unwrap();
    assert!(engine.on_secondary_activate(Target::Plan, Point::new(100.0, 100.0)).unwrap().is_empty());
    assert_eq!(engine.scene.len(), 1);
}

#[test]
fn secondary_reports_placement_exhaustion() {
    let config = EditorConfig { desk_size: Size::new(100.0, 100.0), ..EditorConfig::default() };
    let mut engine = engine_with(config, 100.0, 100.0);
    add_desk(&mut engine, 0.0, 0.0);
    let actions = engine.on_secondary_activate(Target::Plan, Point::new(10.0, 10.0)).unwrap();
    assert_eq!(actions, vec![Action::PlacementFailed { message: "no space available for a new desk".into() }]);
    assert_eq!(engine.scene.len(), 1);
}

// =============================================================
// Ticks and snapshots
// =============================================================

#[test]
fn tick_requests_render_only_while_moving() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_desk(&mut engine, 0.0, 0.0);
    assert!(engine.tick().is_empty());
    engine.on_pointer_down(Target::Object(id), Point::new(0.0, 0.0)).unwrap();
    engine.on_pointer_move(Point::new(100.0, 0.0));
    assert_eq!(engine.tick(), vec![Action::RenderNeeded]);
}

#[test]
fn snapshot_reports_targets_not_rendered_positions() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_desk(&mut engine, 0.0, 0.0);
    engine.on_pointer_down(Target::Object(id), Point::new(0.0, 0.0)).unwrap();
    engine.on_pointer_move(Point::new(100.0, 0.0));
    engine.tick();
    let snap = engine.snapshot().unwrap();
    assert_eq!(snap.objects[0].x, 100.0);
}

#[test]
fn snapshot_loads_into_fresh_engine() {
    let mut engine = engine_with_plan(400.0, 300.0);
    add_desk(&mut engine, 0.0, 0.0);
    add_wall(&mut engine, 100.0, 100.0);
    let snap = engine.snapshot().unwrap();

    let mut other = EngineCore::new();
    other.load_snapshot(&snap).unwrap();
    assert_eq!(other.snapshot(), Some(snap));
    assert_eq!(other.status(), engine.status());
}

#[test]
fn hit_test_goes_through_engine_config() {
    let mut engine = engine_with_plan(400.0, 300.0);
    let id = add_desk(&mut engine, 100.0, 100.0);
    assert_eq!(engine.hit_test(Point::new(105.0, 120.0)), Some(Target::Object(id)));
    assert_eq!(engine.hit_test(Point::new(300.0, 200.0)), Some(Target::Plan));
    assert_eq!(engine.hit_test(Point::new(900.0, 600.0)), None);
}

#[test]
fn load_snapshot_over_confirmed_plan_is_noop() {
    let mut source = engine_with_plan(200.0, 200.0);
    add_wall(&mut source, 0.0, 0.0);
    let snap = source.snapshot().unwrap();

    let mut engine = engine_with_plan(400.0, 300.0);
    add_desk(&mut engine, 0.0, 0.0);
    engine.confirm_plan().unwrap();
    let before = engine.snapshot();

    assert!(engine.load_snapshot(&snap).unwrap().is_empty());
    assert_eq!(engine.snapshot(), before);
    assert!(engine.plan().unwrap().confirmed);

    engine.unconfirm_plan().unwrap();
    engine.load_snapshot(&snap).unwrap();
    assert_eq!(engine.snapshot(), Some(snap));
}
