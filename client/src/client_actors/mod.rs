pub mod autocomplete;
pub mod nearby_search;
pub mod ui_handler;
