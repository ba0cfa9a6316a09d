//! Time-of-day greeting shown on the home view

use chrono::{Local, Timelike};

/// Greeting for an hour of the day (0-23), with an optional name appended.
pub fn greeting_for_hour(hour: u32, name: Option<&str>) -> String {
    let base = match hour {
        5..=11 => "Good morning",
        12..=17 => "Good afternoon",
        18..=21 => "Good evening",
        _ => "Good night",
    };
    match name {
        Some(name) => format!("{}, {}", base, name),
        None => base.to_string(),
    }
}

/// Greeting for the local wall clock
pub fn current_greeting(name: Option<&str>) -> String {
    greeting_for_hour(Local::now().hour(), name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_boundaries() {
        assert_eq!(greeting_for_hour(4, None), "Good night");
        assert_eq!(greeting_for_hour(5, None), "Good morning");
        assert_eq!(greeting_for_hour(11, None), "Good morning");
        assert_eq!(greeting_for_hour(12, None), "Good afternoon");
        assert_eq!(greeting_for_hour(17, None), "Good afternoon");
        assert_eq!(greeting_for_hour(18, None), "Good evening");
        assert_eq!(greeting_for_hour(21, None), "Good evening");
        assert_eq!(greeting_for_hour(22, None), "Good night");
        assert_eq!(greeting_for_hour(0, None), "Good night");
    }

    #[test]
    fn test_greeting_with_name() {
        assert_eq!(greeting_for_hour(9, Some("kitty")), "Good morning, kitty");
    }
}
