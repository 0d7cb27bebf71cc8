use crate::server::{Request, ResponseSink};
use chrono::{Datelike, Local, Weekday};
use tracing::warn;

/// `Happy <weekday>.\n`
pub fn greeting(day: Weekday) -> String {
    let name = match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    };
    format!("Happy {name}.\n")
}

/// Handler that greets with the server's local day of the week.
pub fn get_handler(_req: &mut Request, res: &mut dyn ResponseSink) {
    write_greeting(Local::now().weekday(), res);
}

/// Handler body with the day injected.
pub fn write_greeting(day: Weekday, res: &mut dyn ResponseSink) {
    if let Err(err) = res.write_all(greeting(day).as_bytes()) {
        warn!(error = %err, "Failed to write greeting");
    }
}
