//! Snapshot tests for the element tree a ListView builds.
//!
//! Uses insta + HeadlessSurface::dump to catch accidental changes to the
//! rendered structure: classes, data attributes, and container offset.

use rowview::model::RowTrait;
use rowview::surface::HeadlessSurface;
use rowview::view_state::{ListView, TextRenderer};

type TextView = ListView<String, TextRenderer, HeadlessSurface>;

fn five_rows() -> TextView {
    let mut view = ListView::new(HeadlessSurface::new(), TextRenderer::new(20), 50).unwrap();
    view.splice(0, 0, (0..5).map(|i| format!("row {}", i)))
        .unwrap();
    view
}

#[test]
fn snapshot_initial_window() {
    let view = five_rows();
    insta::assert_snapshot!(view.surface().dump(view.root()), @r#"
    <div class="list-view">
      <div class="list-rows" style="top: 0px">
        <div class="row" data-index="0" data-row-id="0" style="height: 20px">
          <span>row 0
        <div class="row" data-index="1" data-row-id="1" style="height: 20px">
          <span>row 1
        <div class="row" data-index="2" data-row-id="2" style="height: 20px">
          <span>row 2
    "#);
}

#[test]
fn snapshot_scrolled_with_selection() {
    let mut view = five_rows();
    view.set_scroll_top(25).unwrap();
    view.set_trait(2, RowTrait::Selected, true).unwrap();

    insta::assert_snapshot!(view.surface().dump(view.root()), @r#"
    <div class="list-view">
      <div class="list-rows" style="top: -5px">
        <div class="row" data-index="1" data-row-id="1" style="height: 20px">
          <span>row 1
        <div class="row selected" data-index="2" data-row-id="2" style="height: 20px">
          <span>row 2
        <div class="row" data-index="3" data-row-id="3" style="height: 20px">
          <span>row 3
    "#);
}

#[test]
fn snapshot_collapsed_viewport() {
    let mut view = five_rows();
    view.layout(0).unwrap();

    insta::assert_snapshot!(view.surface().dump(view.root()), @r#"
    <div class="list-view">
      <div class="list-rows" style="top: 0px">
    "#);
}
