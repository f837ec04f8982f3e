// Library root
// -----------
// The binary (`main.rs`) wires these modules into the interactive CLI.
//
// Module responsibilities:
// - `model`: user, movie and booking records as stored on disk.
// - `store`: load/save of one JSON store file.
// - `error`: store failures and booking rejections.
// - `booking`: the ticket office operations (sign up, login, book, list,
//   add movie) on top of the two stores.
// - `menu`: menu choices and screen transitions, free of I/O.
// - `ui`: terminal prompts that drive `menu` and call into `booking`.
pub mod booking;
pub mod error;
pub mod menu;
pub mod model;
pub mod store;
pub mod ui;
