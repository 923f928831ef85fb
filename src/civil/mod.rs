/*!
Calendar field groups derived from a [`Time`](crate::Time).

None of these types are stored inside a `Time`. Each is recomputed from the
instant and its location whenever it is requested.
*/

pub use self::{
    clock::Clock, date::Date, iso_week::IsoWeek, month::Month,
    weekday::Weekday,
};

mod clock;
mod date;
mod iso_week;
mod month;
mod weekday;
