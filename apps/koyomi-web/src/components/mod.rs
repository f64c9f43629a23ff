mod calendar;
mod card;
mod catalog_list;
mod day_detail;
mod search;
mod watching;

pub use calendar::CalendarPage;
pub use watching::WatchingPage;
