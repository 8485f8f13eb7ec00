use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use board_engine::engine::physics::Collider;
use board_engine::engine::scene::token::Token;
use board_engine::tools::drop_indicator::IndicatorSettings;
use board_engine::tools::token_drag::systems::{
    attach_drag_controllers, drive_token_controllers, drop_held_tokens, grab_hovered_token,
};
use board_engine::tools::token_drag::{
    ActionBindings, ControllerState, DragInputController, DragSettings, Held, HoverChanged,
    RotationSettings, TokenSelected,
};

fn app() -> App {
    let mut app = App::new();
    app.init_resource::<ButtonInput<MouseButton>>()
        .init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<ActionBindings>()
        .init_resource::<RotationSettings>()
        .init_resource::<DragSettings>()
        .init_resource::<IndicatorSettings>()
        .add_event::<MouseMotion>()
        .add_event::<HoverChanged>()
        .add_event::<TokenSelected>()
        .add_systems(
            Update,
            (
                attach_drag_controllers,
                drive_token_controllers,
                grab_hovered_token,
                drop_held_tokens,
            )
                .chain(),
        );
    app
}

fn spawn_token(app: &mut App, at: Vec3) -> Entity {
    let transform = Transform::from_translation(at);
    app.world_mut()
        .spawn((
            Token {
                placement_id: "p1".into(),
                species: "pikachu".into(),
                shiny: false,
            },
            Collider::standing(Vec3::new(0.5, 1.0, 0.5)),
            transform,
            GlobalTransform::from(transform),
        ))
        .id()
}

fn spawn_board(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((
            Collider::cuboid(Vec3::new(20.0, 1.0, 20.0)).with_offset(Vec3::NEG_Y * 0.5),
            GlobalTransform::IDENTITY,
        ))
        .id()
}

fn press(app: &mut App, button: MouseButton) {
    let mut mouse = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
    mouse.reset_all();
    mouse.press(button);
}

fn release(app: &mut App, button: MouseButton) {
    let mut mouse = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
    mouse.clear();
    mouse.release(button);
}

fn idle_input(app: &mut App) {
    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .clear();
}

fn hover(app: &mut App, token: Entity) {
    app.world_mut().send_event(HoverChanged::Entered(token));
    app.update();
}

fn state(app: &App, token: Entity) -> ControllerState {
    app.world().get::<DragInputController>(token).unwrap().state()
}

#[test]
fn tokens_get_a_controller() {
    let mut app = app();
    let token = spawn_token(&mut app, Vec3::ZERO);
    app.update();
    assert_eq!(state(&app, token), ControllerState::Idle);
}

#[test]
fn horizontal_drag_rotates_hovered_token() {
    let mut app = app();
    let token = spawn_token(&mut app, Vec3::ZERO);
    app.update();
    hover(&mut app, token);
    assert_eq!(state(&app, token), ControllerState::Hovered);

    press(&mut app, MouseButton::Right);
    app.update();
    assert_eq!(state(&app, token), ControllerState::Rotating);

    idle_input(&mut app);
    for _ in 0..3 {
        app.world_mut().send_event(MouseMotion {
            delta: Vec2::new(100.0, 25.0),
        });
        app.update();
    }
    let rotation = app.world().get::<Transform>(token).unwrap().rotation;
    assert!(rotation.abs_diff_eq(Quat::from_rotation_y(3.0), 1e-4));

    release(&mut app, MouseButton::Right);
    app.update();
    assert_eq!(state(&app, token), ControllerState::Hovered);

    idle_input(&mut app);
    app.world_mut().send_event(MouseMotion {
        delta: Vec2::new(100.0, 0.0),
    });
    app.update();
    let after = app.world().get::<Transform>(token).unwrap().rotation;
    assert!(after.abs_diff_eq(rotation, 1e-6));
}

#[test]
fn motion_without_rotate_press_does_nothing() {
    let mut app = app();
    let token = spawn_token(&mut app, Vec3::ZERO);
    app.update();
    hover(&mut app, token);

    app.world_mut().send_event(MouseMotion {
        delta: Vec2::new(250.0, 0.0),
    });
    app.update();

    let rotation = app.world().get::<Transform>(token).unwrap().rotation;
    assert!(rotation.abs_diff_eq(Quat::IDENTITY, 1e-6));
}

#[test]
fn select_notifies_with_body() {
    let mut app = app();
    let token = spawn_token(&mut app, Vec3::ZERO);
    app.update();

    press(&mut app, MouseButton::Middle);
    app.update();
    assert!(app.world().resource::<Events<TokenSelected>>().is_empty());

    idle_input(&mut app);
    hover(&mut app, token);
    press(&mut app, MouseButton::Middle);
    app.update();

    let events = app.world().resource::<Events<TokenSelected>>();
    let selected: Vec<_> = events.iter_current_update_events().copied().collect();
    assert_eq!(selected, vec![TokenSelected { body: token }]);
}

#[test]
fn grab_and_release_snaps_to_board() {
    let mut app = app();
    spawn_board(&mut app);
    let token = spawn_token(&mut app, Vec3::ZERO);
    app.update();
    hover(&mut app, token);

    press(&mut app, MouseButton::Left);
    app.update();
    let held = *app.world().get::<Held>(token).unwrap();
    assert!((held.plane_height - DragSettings::default().lift_height).abs() < 1e-6);

    // Carried somewhere above the board.
    app.world_mut().get_mut::<Transform>(token).unwrap().translation = Vec3::new(3.0, 2.0, -4.0);

    release(&mut app, MouseButton::Left);
    app.update();

    assert!(app.world().get::<Held>(token).is_none());
    let translation = app.world().get::<Transform>(token).unwrap().translation;
    assert!(translation.abs_diff_eq(Vec3::new(3.0, 0.0, -4.0), 1e-5));
}

#[test]
fn grab_ignores_unhovered_tokens() {
    let mut app = app();
    let token = spawn_token(&mut app, Vec3::ZERO);
    app.update();

    press(&mut app, MouseButton::Left);
    app.update();
    assert!(app.world().get::<Held>(token).is_none());
}
