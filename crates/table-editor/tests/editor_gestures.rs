//! End-to-end gesture tests driving the editor controller through the
//! public API: draw, select, drag, pan, zoom, recount

use std::cell::RefCell;
use std::rc::Rc;

use statement_tables_editor::layout;
use statement_tables_editor::EditorController;
use statement_tables_shared::{
    AddMode, Axis, EditorEvent, Point, Size, Tool, MIN_COLUMN_WIDTH,
};

fn new_controller() -> EditorController {
    let _ = env_logger::builder().is_test(true).try_init();
    EditorController::new(Size::new(800.0, 600.0), Size::new(800.0, 600.0))
}

fn record_events(controller: &mut EditorController) -> Rc<RefCell<Vec<EditorEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    controller.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    events
}

fn draw(controller: &mut EditorController, start: Point, end: Point) {
    controller.set_tool(Tool::TableDrawing);
    controller.pointer_down(start);
    controller.pointer_move(end).unwrap();
    controller.pointer_up(end).unwrap();
    controller.set_tool(Tool::Hand);
}

fn select_at(controller: &mut EditorController, pos: Point) {
    controller.pointer_down(pos);
    controller.pointer_up(pos).unwrap();
}

#[test]
fn draw_select_drag_emits_consistent_event_stream() {
    let mut controller = new_controller();
    let events = record_events(&mut controller);

    // Draw a 2x3 table.
    draw(&mut controller, Point::new(0.0, 0.0), Point::new(100.0, 150.0));
    // Click its right edge to select it.
    select_at(&mut controller, Point::new(100.0, 75.0));
    // Grab the vertical separator handle and drag it right in two steps.
    controller.pointer_down(Point::new(50.0, 0.0));
    controller.pointer_move(Point::new(58.0, 3.0)).unwrap();
    controller.pointer_move(Point::new(64.0, 7.0)).unwrap();
    controller.pointer_up(Point::new(64.0, 7.0)).unwrap();

    let events = events.borrow();
    assert_eq!(events.len(), 4);
    assert!(matches!(events[0], EditorEvent::NewTable { .. }));
    assert_eq!(events[1], EditorEvent::TableSelected { index: 0 });
    match (&events[2], &events[3]) {
        (
            EditorEvent::TableUpdated { index: 0, table: first },
            EditorEvent::TableUpdated { index: 0, table: second },
        ) => {
            assert_eq!(first.vertical_separators[0].p1.x, 58.0);
            assert_eq!(second.vertical_separators[0].p1.x, 64.0);
        }
        other => panic!("unexpected event pair: {other:?}"),
    }

    // The drag ignored the pointer's vertical wandering.
    let table = &controller.tables()[0];
    assert_eq!(table.vertical_separators[0].p1, Point::new(64.0, 0.0));
    assert_eq!(table.vertical_separators[0].p2, Point::new(64.0, 150.0));
}

#[test]
fn separator_clamp_holds_through_a_wild_drag() {
    let mut controller = new_controller();
    draw(&mut controller, Point::new(0.0, 0.0), Point::new(100.0, 150.0));
    select_at(&mut controller, Point::new(100.0, 75.0));

    controller.pointer_down(Point::new(50.0, 0.0));
    controller.pointer_move(Point::new(500.0, -20.0)).unwrap();

    let max_pos = 100.0 - MIN_COLUMN_WIDTH;
    assert_eq!(
        controller.tables()[0].vertical_separators[0].p1,
        Point::new(max_pos, 0.0)
    );

    // Dragging further out is idempotent; dragging back inside tracks
    // the pointer again.
    controller.pointer_move(Point::new(700.0, 0.0)).unwrap();
    assert_eq!(controller.tables()[0].vertical_separators[0].p1.x, max_pos);
    controller.pointer_move(Point::new(40.0, 0.0)).unwrap();
    assert_eq!(controller.tables()[0].vertical_separators[0].p1.x, 40.0);
}

#[test]
fn corner_resize_preserves_proportions_through_gesture() {
    let mut controller = new_controller();
    draw(&mut controller, Point::new(0.0, 0.0), Point::new(100.0, 150.0));
    select_at(&mut controller, Point::new(100.0, 75.0));

    // Skew the column split, then resize from the bottom-right corner.
    controller.pointer_down(Point::new(50.0, 0.0));
    controller.pointer_move(Point::new(30.0, 0.0)).unwrap();
    controller.pointer_up(Point::new(30.0, 0.0)).unwrap();

    let before = layout::extract_distribution(&controller.tables()[0], Axis::X);

    controller.pointer_down(Point::new(100.0, 150.0));
    controller.pointer_move(Point::new(150.0, 200.0)).unwrap();
    controller.pointer_up(Point::new(150.0, 200.0)).unwrap();

    let table = &controller.tables()[0];
    assert_eq!(table.boundary.bottom_right, Point::new(150.0, 200.0));
    let after = layout::extract_distribution(table, Axis::X);
    for (a, b) in before.iter().zip(&after) {
        assert!((a - b).abs() < 1e-9);
    }
}

#[test]
fn pan_then_zoom_keeps_tables_attached_to_image() {
    let mut controller = new_controller();
    draw(&mut controller, Point::new(350.0, 250.0), Point::new(450.0, 350.0));

    // Pan the canvas; table and image origin move together.
    controller.pointer_down(Point::new(600.0, 500.0));
    controller.pointer_move(Point::new(620.0, 510.0)).unwrap();
    controller.pointer_up(Point::new(620.0, 510.0)).unwrap();

    let table = &controller.tables()[0];
    assert_eq!(table.boundary.top_left, Point::new(370.0, 260.0));
    assert_eq!(controller.view().origin, Point::new(20.0, 10.0));

    // Zoom in and out again: the scale ratio returns to 1 and the
    // geometry returns to where the pan left it.
    controller.scroll(2).unwrap();
    controller.scroll(-2).unwrap();
    assert!((controller.view().scale_ratio() - 1.0).abs() < 1e-9);

    let table = &controller.tables()[0];
    assert!((table.boundary.top_left.x - 370.0).abs() < 1e-6);
    assert!((table.boundary.top_left.y - 260.0).abs() < 1e-6);
    assert!((table.boundary.width() - 100.0).abs() < 1e-6);
}

#[test]
fn recount_append_then_insert_at_end() {
    let mut controller = new_controller();
    draw(&mut controller, Point::new(0.0, 0.0), Point::new(100.0, 150.0));
    select_at(&mut controller, Point::new(100.0, 75.0));

    // Rows append physical space by default.
    controller.set_row_count(4).unwrap();
    let table = &controller.tables()[0];
    assert_eq!(table.row_count(), 4);
    assert!((table.boundary.height() - 200.0).abs() < 1e-9);

    // Columns redistribute existing space by default.
    controller.set_column_count(3).unwrap();
    let table = &controller.tables()[0];
    assert_eq!(table.column_count(), 3);
    assert_eq!(table.boundary.width(), 100.0);
    assert!((table.vertical_separators[0].p1.x - 100.0 / 3.0).abs() < 1e-9);

    // Switching the column mode to append grows the boundary instead.
    controller.set_column_add_mode(AddMode::Append);
    controller.set_column_count(4).unwrap();
    let table = &controller.tables()[0];
    assert_eq!(table.column_count(), 4);
    assert!((table.boundary.width() - 100.0 * 4.0 / 3.0).abs() < 1e-9);
}

#[test]
fn deselect_then_reselect_other_table() {
    let mut controller = new_controller();
    draw(&mut controller, Point::new(0.0, 0.0), Point::new(100.0, 150.0));
    draw(&mut controller, Point::new(200.0, 0.0), Point::new(320.0, 150.0));
    let events = record_events(&mut controller);

    // Selecting the second table copies its counts into the settings.
    select_at(&mut controller, Point::new(200.0, 75.0));
    assert_eq!(controller.selected().unwrap().index, 1);

    // A release with a table already selected only disarms the element;
    // clicking empty space afterwards still keeps the selection (the
    // hand tool deselects only via the no-selection branch).
    select_at(&mut controller, Point::new(700.0, 10.0));
    assert_eq!(controller.selected().unwrap().index, 1);

    // Switching tools clears the selection silently.
    controller.set_tool(Tool::TableDrawing);
    assert!(controller.selected().is_none());
    controller.set_tool(Tool::Hand);

    select_at(&mut controller, Point::new(100.0, 75.0));
    assert_eq!(controller.selected().unwrap().index, 0);

    let events = events.borrow();
    assert_eq!(
        *events,
        vec![
            EditorEvent::TableSelected { index: 1 },
            EditorEvent::TableSelected { index: 0 },
        ]
    );
}
