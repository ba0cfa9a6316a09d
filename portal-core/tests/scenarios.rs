//! End-to-end navigation flows through the dispatcher

use portal_core::{
    Control, LayoutState, Mode, Selection, ServiceDescriptor, ServiceRegistry, ShellDispatcher,
    ShellEffect, ShellInput, TouchPoint,
};

const DESKTOP_WIDTH: f64 = 1440.0;
const MOBILE_WIDTH: f64 = 390.0;

fn services() -> ServiceRegistry {
    [
        ServiceDescriptor::new("A", "static/a.svg", "http://a.lan", false),
        ServiceDescriptor::new("B", "static/b.svg", "http://b.lan", true),
        ServiceDescriptor::new("C", "static/c.svg", "http://c.lan", false),
    ]
    .into_iter()
    .collect()
}

fn desktop(locked: bool, collapsed: bool, expanded: bool) -> LayoutState {
    LayoutState::Desktop {
        locked,
        collapsed,
        expanded,
    }
}

fn swipe(shell: &mut ShellDispatcher, start: (f64, f64), end: (f64, f64)) -> Vec<ShellEffect> {
    shell.dispatch(ShellInput::TouchStart {
        touches: vec![TouchPoint::new(7, start.0, start.1)],
    });
    shell.dispatch(ShellInput::TouchEnd {
        touches: vec![TouchPoint::new(7, end.0, end.1)],
    })
}

#[test]
fn test_desktop_expand_then_overlay_closes() {
    let mut shell = ShellDispatcher::new(services(), DESKTOP_WIDTH, false);
    assert_eq!(shell.layout(), &desktop(false, false, false));

    shell.dispatch(ShellInput::click(Control::Toggle));
    assert_eq!(shell.layout(), &desktop(false, false, true));

    shell.dispatch(ShellInput::click(Control::Overlay));
    assert_eq!(shell.layout(), &desktop(false, false, false));
}

#[test]
fn test_desktop_lock_collapse_unlock() {
    let mut shell = ShellDispatcher::new(services(), DESKTOP_WIDTH, false);

    shell.dispatch(ShellInput::click(Control::Lock));
    assert_eq!(shell.layout(), &desktop(true, false, false));

    shell.dispatch(ShellInput::click(Control::Toggle));
    assert_eq!(shell.layout(), &desktop(true, true, false));

    shell.dispatch(ShellInput::click(Control::Lock));
    assert_eq!(shell.layout(), &desktop(false, false, false));
}

#[test]
fn test_mobile_swipes() {
    let mut shell = ShellDispatcher::new(services(), MOBILE_WIDTH, false);
    assert_eq!(shell.layout(), &LayoutState::Mobile { visible: false });

    // dx = 100: a left swipe on an already hidden sidebar
    let effects = swipe(&mut shell, (300.0, 100.0), (200.0, 110.0));
    assert!(effects.is_empty());
    assert_eq!(shell.layout(), &LayoutState::Mobile { visible: false });

    // dx = -100: a right swipe opens it
    let effects = swipe(&mut shell, (100.0, 100.0), (200.0, 110.0));
    assert_eq!(effects.len(), 1);
    assert_eq!(shell.layout(), &LayoutState::Mobile { visible: true });

    swipe(&mut shell, (300.0, 100.0), (200.0, 110.0));
    assert_eq!(shell.layout(), &LayoutState::Mobile { visible: false });
}

#[test]
fn test_desktop_ignores_swipes() {
    let mut shell = ShellDispatcher::new(services(), DESKTOP_WIDTH, false);
    assert!(swipe(&mut shell, (100.0, 100.0), (400.0, 100.0)).is_empty());
    assert_eq!(shell.layout(), &desktop(false, false, false));
}

#[test]
fn test_double_activation_before_load_creates_one_view() {
    let mut shell = ShellDispatcher::new(services(), DESKTOP_WIDTH, false);

    let first = shell.dispatch(ShellInput::select_service("A"));
    let second = shell.dispatch(ShellInput::select_service("A"));

    let loads = first
        .iter()
        .chain(second.iter())
        .filter(|e| matches!(e, ShellEffect::LoadView { .. }))
        .count();
    assert_eq!(loads, 1);
    assert_eq!(shell.router().entry_count(), 1);
    assert!(!shell.router().entry("A").unwrap().is_loaded());
}

#[test]
fn test_external_service_closes_mobile_sidebar_only() {
    let mut shell = ShellDispatcher::new(services(), MOBILE_WIDTH, false);
    shell.dispatch(ShellInput::click(Control::Toggle));
    assert_eq!(shell.layout(), &LayoutState::Mobile { visible: true });

    let effects = shell.dispatch(ShellInput::select_service("B"));

    let opens: Vec<_> = effects
        .iter()
        .filter_map(|e| match e {
            ShellEffect::OpenExternal { link, .. } => Some(link.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(opens, vec!["http://b.lan"]);
    assert_eq!(shell.layout(), &LayoutState::Mobile { visible: false });
    assert_eq!(shell.router().selection(), &Selection::Home);
    assert_eq!(shell.router().entry_count(), 0);
}

#[test]
fn test_external_service_keeps_previous_view_visible() {
    let mut shell = ShellDispatcher::new(services(), DESKTOP_WIDTH, false);
    shell.dispatch(ShellInput::select_service("C"));
    shell.dispatch(ShellInput::select_service("B"));

    assert_eq!(shell.router().selection(), &Selection::Service("C".into()));
    assert_eq!(shell.router().visible_count(), 1);
}

#[test]
fn test_views_survive_switching_and_mode_changes() {
    let mut shell = ShellDispatcher::new(services(), DESKTOP_WIDTH, false);
    let effects = shell.dispatch(ShellInput::select_service("A"));
    let handle = shell.router().entry("A").unwrap().handle();
    assert!(effects.contains(&ShellEffect::CreateView {
        handle,
        service_id: "A".into()
    }));
    shell.dispatch(ShellInput::ContentLoaded { handle });

    shell.dispatch(ShellInput::select_service("C"));
    shell.dispatch(ShellInput::Viewport {
        width: MOBILE_WIDTH,
        pointer_is_coarse: false,
    });
    shell.dispatch(ShellInput::click(Control::Home));
    assert_eq!(shell.mode(), Mode::Mobile);

    let effects = shell.dispatch(ShellInput::select_service("A"));
    assert!(!effects
        .iter()
        .any(|e| matches!(e, ShellEffect::CreateView { .. } | ShellEffect::LoadView { .. })));
    assert!(shell.router().entry("A").unwrap().is_loaded());
    assert_eq!(shell.router().entry("A").unwrap().handle(), handle);
}

#[test]
fn test_selecting_content_closes_mobile_sidebar() {
    let mut shell = ShellDispatcher::new(services(), MOBILE_WIDTH, true);
    shell.dispatch(ShellInput::click(Control::Toggle));

    shell.dispatch(ShellInput::click(Control::Home));
    assert_eq!(shell.layout(), &LayoutState::Mobile { visible: false });

    shell.dispatch(ShellInput::click(Control::Toggle));
    shell.dispatch(ShellInput::select_service("C"));
    assert_eq!(shell.layout(), &LayoutState::Mobile { visible: false });
    assert_eq!(shell.router().selection(), &Selection::Service("C".into()));
}

#[test]
fn test_load_failure_leaves_view_loading() {
    let mut shell = ShellDispatcher::new(services(), DESKTOP_WIDTH, false);
    shell.dispatch(ShellInput::select_service("A"));
    let handle = shell.router().entry("A").unwrap().handle();

    let effects = shell.dispatch(ShellInput::ContentLoadFailed {
        handle,
        reason: "dns failure".to_string(),
    });
    assert_eq!(
        effects,
        vec![ShellEffect::ViewLoadFailed {
            handle,
            service_id: "A".into(),
            reason: "dns failure".to_string(),
        }]
    );
    let views = shell.snapshot().views;
    assert!(!views[0].loaded);
    assert_eq!(views[0].error.as_deref(), Some("dns failure"));
    assert_eq!(shell.router().selection(), &Selection::Service("A".into()));
}

#[test]
fn test_teardown_disposes_each_view_once() {
    let mut shell = ShellDispatcher::new(services(), DESKTOP_WIDTH, false);
    shell.dispatch(ShellInput::select_service("A"));
    shell.dispatch(ShellInput::select_service("C"));

    let disposed = shell
        .teardown()
        .into_iter()
        .filter(|e| matches!(e, ShellEffect::DisposeView { .. }))
        .count();
    assert_eq!(disposed, 2);
    assert!(shell.teardown().is_empty());
    assert!(shell.dispatch(ShellInput::select_service("A")).is_empty());
}
