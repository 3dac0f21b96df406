use sketchboard::draw::color::BLACK;
use sketchboard::input::Key;
use sketchboard::util;
use sketchboard::{
    BoardError, BoardState, Config, ElementStyle, Modifiers, Phase, Tool, create_element,
    is_near_element,
};

fn make_board() -> BoardState {
    BoardState::from_config(&Config::default()).unwrap()
}

fn black() -> ElementStyle {
    ElementStyle {
        stroke: Some(BLACK),
        ..ElementStyle::default()
    }
}

#[test]
fn every_tool_hits_its_own_element() {
    let coords = [(0.0, 0.0, 0.0, 0.0), (12.5, 40.0, 90.0, 7.0), (300.0, 300.0, 250.0, 260.0)];
    for tool in Tool::ALL.into_iter().filter(|tool| tool.creates_elements()) {
        for (i, (x1, y1, x2, y2)) in coords.into_iter().enumerate() {
            let element = create_element(i, x1, y1, x2, y2, tool, &black()).unwrap();
            let (px, py) = if tool == Tool::Circle { (x2, y2) } else { (x1, y1) };
            assert!(
                is_near_element(&element, px, py),
                "{tool} at ({x1}, {y1}) -> ({x2}, {y2}) should hit itself"
            );
        }
    }
}

#[test]
fn every_tool_hits_its_anchor_at_pointer_down() {
    for tool in Tool::ALL.into_iter().filter(|tool| tool.creates_elements()) {
        let element = create_element(0, 42.0, 17.0, 42.0, 17.0, tool, &black()).unwrap();
        let anchor = element.anchor();
        assert_eq!((anchor.x, anchor.y), (42.0, 17.0));
        assert!(
            is_near_element(&element, anchor.x, anchor.y),
            "{tool} created at pointer-down should hit its anchor"
        );
    }
}

#[test]
fn factory_is_deterministic_for_every_tool() {
    for tool in Tool::ALL.into_iter().filter(|tool| tool.creates_elements()) {
        let a = create_element(7, 3.0, 4.0, 120.0, 80.0, tool, &black()).unwrap();
        let b = create_element(7, 3.0, 4.0, 120.0, 80.0, tool, &black()).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn eraser_cannot_create_elements() {
    let err = create_element(0, 0.0, 0.0, 1.0, 1.0, Tool::Eraser, &black()).unwrap_err();
    assert!(matches!(err, BoardError::UnsupportedTool(Tool::Eraser)));
    assert_eq!(err.to_string(), "Tool 'eraser' cannot create drawing elements");
}

#[test]
fn line_test_boundaries() {
    assert!(util::is_point_near_line(0.0, 0.0, 40.0, 40.0, 20.0, 20.0));
    assert!(!util::is_point_near_line(0.0, 0.0, 40.0, 40.0, 400.0, -300.0));
}

#[test]
fn full_session_with_keyboard_undo() {
    let mut board = make_board();

    board.select_tool(Tool::Rectangle);
    board.on_pointer_down(10.0, 10.0, &black()).unwrap();
    board.on_pointer_move(110.0, 60.0).unwrap();
    board.on_pointer_up();

    board.select_tool(Tool::Brush);
    board.on_pointer_down(200.0, 200.0, &black()).unwrap();
    board.on_pointer_move(210.0, 205.0).unwrap();
    board.on_pointer_move(220.0, 215.0).unwrap();
    board.on_pointer_up();

    board.select_tool(Tool::Eraser);
    board.on_pointer_down(60.0, 10.0, &ElementStyle::default()).unwrap();
    board.on_pointer_move(60.0, 10.0).unwrap();
    board.on_pointer_up();
    assert_eq!(board.elements().len(), 1);
    assert_eq!(board.elements()[0].tool(), Tool::Brush);

    board.on_key_press(Key::Char('z'), Modifiers::ctrl());
    assert_eq!(board.elements().len(), 2);
    board.on_key_press(Key::Char('y'), Modifiers::ctrl());
    assert_eq!(board.elements().len(), 1);

    assert_eq!(board.phase(), Phase::None);
    assert_eq!(board.history().len(), 4);
    assert_eq!(board.cursor(), 3);
}
