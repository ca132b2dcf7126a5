pub mod options;
pub mod remesh_dialog;
pub mod scene_tree;
pub mod status_bar;
pub mod tools_panel;
