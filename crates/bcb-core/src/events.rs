use serde::Serialize;

/// A watch party on the supporters' group matchday calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchdayEvent {
    pub date: &'static str,
    pub time: &'static str,
    pub fixture: &'static str,
    pub venue: &'static str,
    pub competition: &'static str,
    pub note: Option<&'static str>,
}

const VENUE: &str = "The Phoenix on Westheimer";

/// The published watch-party schedule.
#[must_use]
pub fn upcoming_events() -> Vec<MatchdayEvent> {
    vec![
        MatchdayEvent {
            date: "SAT MAR 1",
            time: "6:30 AM CT",
            fixture: "Chelsea vs Manchester City",
            venue: VENUE,
            competition: "Premier League",
            note: Some("Doors open 6:00 AM. Breakfast tacos provided."),
        },
        MatchdayEvent {
            date: "SAT MAR 8",
            time: "9:00 AM CT",
            fixture: "Chelsea vs Wolves",
            venue: VENUE,
            competition: "Premier League",
            note: Some("Wear your gear for 10% off merch."),
        },
        MatchdayEvent {
            date: "TUE MAR 11",
            time: "2:00 PM CT",
            fixture: "Chelsea vs Real Madrid",
            venue: VENUE,
            competition: "Champions League",
            note: Some("Big screen. Big match. Be there."),
        },
        MatchdayEvent {
            date: "SAT MAR 15",
            time: "9:00 AM CT",
            fixture: "Chelsea vs Aston Villa",
            venue: VENUE,
            competition: "Premier League",
            note: None,
        },
    ]
}
