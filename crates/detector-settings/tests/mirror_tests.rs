//! End-to-end mirror test: editor gestures on one page drive the
//! detector workspace through the notification stream

use std::cell::RefCell;
use std::rc::Rc;

use statement_tables_detector::{DetectorWorkspace, BASE_IMAGE_RESOLUTION};
use statement_tables_editor::EditorController;
use statement_tables_shared::{EditorEvent, Point, Size, Tool};

fn editor_with_event_queue() -> (EditorController, Rc<RefCell<Vec<EditorEvent>>>) {
    let mut controller = EditorController::new(Size::new(800.0, 600.0), Size::new(800.0, 600.0));
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    controller.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    (controller, events)
}

fn drain_into(
    events: &Rc<RefCell<Vec<EditorEvent>>>,
    workspace: &mut DetectorWorkspace,
    page: usize,
) {
    for event in events.borrow_mut().drain(..) {
        workspace.apply_editor_event(page, &event).unwrap();
    }
}

#[test]
fn drawn_table_appears_in_detector_settings() {
    let (mut editor, events) = editor_with_event_queue();
    let mut workspace = DetectorWorkspace::new(1, BASE_IMAGE_RESOLUTION);

    editor.set_tool(Tool::TableDrawing);
    editor.pointer_down(Point::new(10.0, 20.0));
    editor.pointer_move(Point::new(110.0, 170.0)).unwrap();
    editor.pointer_up(Point::new(110.0, 170.0)).unwrap();

    drain_into(&events, &mut workspace, 0);

    assert_eq!(workspace.mirrored_table_count(0).unwrap(), 1);
    let settings = workspace.settings(0).unwrap().get();
    // Boundary edges plus the single column separator.
    assert_eq!(settings.explicit_vertical_lines, vec![10.0, 60.0, 110.0]);
    // Boundary edges plus the two row separators.
    assert_eq!(
        settings.explicit_horizontal_lines,
        vec![20.0, 70.0, 120.0, 170.0]
    );

    // Every mirrored line is flagged as table-owned.
    assert!(workspace
        .page(0)
        .unwrap()
        .explicit_lines()
        .iter()
        .all(|line| line.part_of_table));
}

#[test]
fn dragging_a_separator_updates_the_mirror() {
    let (mut editor, events) = editor_with_event_queue();
    let mut workspace = DetectorWorkspace::new(1, BASE_IMAGE_RESOLUTION);

    editor.set_tool(Tool::TableDrawing);
    editor.pointer_down(Point::new(0.0, 0.0));
    editor.pointer_up(Point::new(100.0, 150.0)).unwrap();
    editor.set_tool(Tool::Hand);

    // Select, then drag the column separator from x=50 to x=64.
    editor.pointer_down(Point::new(100.0, 75.0));
    editor.pointer_up(Point::new(100.0, 75.0)).unwrap();
    editor.pointer_down(Point::new(50.0, 0.0));
    editor.pointer_move(Point::new(64.0, 0.0)).unwrap();
    editor.pointer_up(Point::new(64.0, 0.0)).unwrap();

    drain_into(&events, &mut workspace, 0);

    assert_eq!(workspace.mirrored_table_count(0).unwrap(), 1);
    let settings = workspace.settings(0).unwrap().get();
    assert_eq!(settings.explicit_vertical_lines, vec![0.0, 64.0, 100.0]);
    assert_eq!(
        settings.explicit_horizontal_lines,
        vec![0.0, 50.0, 100.0, 150.0]
    );
}

#[test]
fn deleting_a_table_clears_its_mirrored_lines() {
    let (mut editor, events) = editor_with_event_queue();
    let mut workspace = DetectorWorkspace::new(1, BASE_IMAGE_RESOLUTION);

    editor.set_tool(Tool::TableDrawing);
    editor.pointer_down(Point::new(0.0, 0.0));
    editor.pointer_up(Point::new(100.0, 150.0)).unwrap();
    editor.pointer_down(Point::new(200.0, 200.0));
    editor.pointer_up(Point::new(300.0, 350.0)).unwrap();
    drain_into(&events, &mut workspace, 0);
    assert_eq!(workspace.mirrored_table_count(0).unwrap(), 2);

    editor.remove_table(0).unwrap();
    drain_into(&events, &mut workspace, 0);

    assert_eq!(workspace.mirrored_table_count(0).unwrap(), 1);
    let settings = workspace.settings(0).unwrap().get();
    // Only the second table's lines remain.
    assert_eq!(settings.explicit_vertical_lines, vec![200.0, 250.0, 300.0]);
    assert!(settings
        .explicit_horizontal_lines
        .iter()
        .all(|y| (200.0..=350.0).contains(y)));
}

#[test]
fn manual_lines_survive_table_mirroring() {
    let (mut editor, events) = editor_with_event_queue();
    let mut workspace = DetectorWorkspace::new(1, BASE_IMAGE_RESOLUTION);

    let manual = workspace
        .add_line(0, 400.0, statement_tables_detector::Orientation::Vertical)
        .unwrap();

    editor.set_tool(Tool::TableDrawing);
    editor.pointer_down(Point::new(0.0, 0.0));
    editor.pointer_up(Point::new(100.0, 150.0)).unwrap();
    drain_into(&events, &mut workspace, 0);

    editor.remove_table(0).unwrap();
    drain_into(&events, &mut workspace, 0);

    let settings = workspace.settings(0).unwrap().get();
    assert_eq!(settings.explicit_vertical_lines, vec![400.0]);
    let lines = workspace.page(0).unwrap().explicit_lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].id, manual);
    assert!(!lines[0].part_of_table);
}
