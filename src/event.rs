use crate::error::ConfigError;
use crate::parse_date;
use std::collections::BTreeMap;
use std::str::FromStr;
use time::Date;

/// A date decorated by the host application, independent of selection
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct EventDay {
    date: Date,
    label: Option<String>,
    marker: Option<char>,
}

impl EventDay {
    /// Creates an event day with no decoration
    pub fn new(date: Date) -> EventDay {
        EventDay {
            date,
            label: None,
            marker: None,
        }
    }

    pub fn with_label<S: Into<String>>(mut self, label: S) -> EventDay {
        self.label = Some(label.into());
        self
    }

    pub fn with_marker(mut self, marker: char) -> EventDay {
        self.marker = Some(marker);
        self
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn marker(&self) -> Option<char> {
        self.marker
    }

    /// Returns true if the event day carries no decoration, as is the case for
    /// the event days synthesized for plain clicks
    pub fn is_bare(&self) -> bool {
        self.label.is_none() && self.marker.is_none()
    }
}

/// Parses `YYYY-MM-DD` or `YYYY-MM-DD=LABEL`
impl FromStr for EventDay {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<EventDay, ConfigError> {
        let (date, label) = match s.split_once('=') {
            Some((date, label)) => (date, Some(label)),
            None => (s, None),
        };
        let date = parse_date(date.trim()).map_err(|e| ConfigError::ParseEventDay {
            value: s.to_owned(),
            reason: e.to_string(),
        })?;
        let mut event = EventDay::new(date).with_marker('*');
        if let Some(label) = label.map(str::trim).filter(|l| !l.is_empty()) {
            event = event.with_label(label);
        }
        Ok(event)
    }
}

/// The host's event list, keyed by date so that no two event days share a
/// date
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EventDays(BTreeMap<Date, EventDay>);

impl EventDays {
    pub fn get(&self, date: Date) -> Option<&EventDay> {
        self.0.get(&date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventDay> {
        self.0.values()
    }
}

impl FromIterator<EventDay> for EventDays {
    fn from_iter<I: IntoIterator<Item = EventDay>>(iter: I) -> EventDays {
        let mut events = BTreeMap::new();
        for ev in iter {
            if let Some(old) = events.insert(ev.date, ev) {
                tracing::warn!(date = %old.date, "Duplicate event day replaced by later entry");
            }
        }
        EventDays(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_parse_bare_date() {
        let ev = "2024-06-20".parse::<EventDay>().unwrap();
        assert_eq!(ev.date(), date!(2024 - 06 - 20));
        assert_eq!(ev.label(), None);
        assert_eq!(ev.marker(), Some('*'));
    }

    #[test]
    fn test_parse_labelled_date() {
        let ev = "2024-06-20=Dentist appointment".parse::<EventDay>().unwrap();
        assert_eq!(ev.date(), date!(2024 - 06 - 20));
        assert_eq!(ev.label(), Some("Dentist appointment"));
    }

    #[test]
    fn test_parse_invalid_date() {
        let r = "2024-02-30=Nope".parse::<EventDay>();
        assert!(
            matches!(r, Err(ConfigError::ParseEventDay { ref value, .. }) if value == "2024-02-30=Nope")
        );
    }

    #[test]
    fn test_later_duplicate_wins() {
        let events = EventDays::from_iter([
            EventDay::new(date!(2024 - 06 - 20)).with_label("first"),
            EventDay::new(date!(2024 - 06 - 21)),
            EventDay::new(date!(2024 - 06 - 20)).with_label("second"),
        ]);
        assert_eq!(events.len(), 2);
        assert_eq!(
            events.get(date!(2024 - 06 - 20)).and_then(EventDay::label),
            Some("second")
        );
        assert!(events.get(date!(2024 - 06 - 22)).is_none());
    }

    #[test]
    fn test_bare_event() {
        assert!(EventDay::new(date!(2024 - 06 - 20)).is_bare());
        assert!(!EventDay::new(date!(2024 - 06 - 20)).with_marker('!').is_bare());
    }
}
