pub mod coordinate;
pub mod deal;
pub mod raw_place;
pub mod restaurant;
pub mod search_status;
pub mod suggestion;
