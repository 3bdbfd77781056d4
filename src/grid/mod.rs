//! Monthly time grid and period calendar

mod time_grid;
mod calendar;

pub use time_grid::{TimeGrid, PeriodRange};
pub use calendar::{ForecastCalendar, PeriodBound, parse_month_label};
