use govgen_config::{Clock, Identity};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Renders a duration in seconds using its largest whole unit, rounded to the nearest unit.
pub fn approximate_duration(seconds: u64) -> String {
    let (count, unit) = if seconds >= DAY {
        (rounded(seconds, DAY), "day")
    } else if seconds >= HOUR {
        (rounded(seconds, HOUR), "hour")
    } else if seconds >= MINUTE {
        (rounded(seconds, MINUTE), "minute")
    } else {
        (seconds, "second")
    };
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

fn rounded(value: u64, unit: u64) -> u64 {
    value / unit + u64::from(value % unit >= unit - unit / 2)
}

/// Describes a span measured in clock units, e.g. `7200 blocks (~1 day at 12s per block)`.
pub fn clock_span(clock: &Clock, units: u64) -> String {
    match clock {
        Clock::BlockNumber { block_time_seconds } => {
            let seconds = units.saturating_mul(*block_time_seconds);
            format!(
                "{units} blocks (~{} at {block_time_seconds}s per block)",
                approximate_duration(seconds)
            )
        }
        Clock::Timestamp => format!("{units} seconds (~{})", approximate_duration(units)),
    }
}

pub fn clock_mode(clock: &Clock) -> String {
    match clock {
        Clock::BlockNumber { block_time_seconds } => format!(
            "@dev Using block number-based clock mode (~{block_time_seconds} seconds per block)"
        ),
        Clock::Timestamp => "@dev Using timestamp-based clock mode".to_string(),
    }
}

/// NatSpec lines shared by every contract: title, description, purpose and security contact.
pub fn preamble(identity: &Identity, title: String, details: Vec<String>) -> Vec<String> {
    let mut lines = vec![
        format!("@title {title}"),
        format!("@dev {}", identity.description),
    ];
    lines.extend(details);
    lines.push(format!("Purpose: {}", identity.purpose));
    if let Some(contact) = &identity.security_contact {
        lines.push(format!("@custom:security-contact {contact}"));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_use_the_largest_whole_unit() {
        assert_eq!(approximate_duration(0), "0 seconds");
        assert_eq!(approximate_duration(1), "1 second");
        assert_eq!(approximate_duration(90), "2 minutes");
        assert_eq!(approximate_duration(3600), "1 hour");
        assert_eq!(approximate_duration(86_400), "1 day");
        assert_eq!(approximate_duration(172_800), "2 days");
        assert_eq!(approximate_duration(604_800), "7 days");
    }

    #[test]
    fn spans_follow_the_clock() {
        let blocks = Clock::BlockNumber {
            block_time_seconds: 12,
        };
        assert_eq!(clock_span(&blocks, 7200), "7200 blocks (~1 day at 12s per block)");
        assert_eq!(clock_span(&Clock::Timestamp, 3600), "3600 seconds (~1 hour)");
    }

    #[test]
    fn huge_spans_saturate() {
        let max_days = 213_503_982_334_601u64;
        assert_eq!(approximate_duration(u64::MAX), format!("{max_days} days"));

        let blocks = Clock::BlockNumber {
            block_time_seconds: i64::MAX as u64,
        };
        let units = i64::MAX as u64;
        assert_eq!(
            clock_span(&blocks, units),
            format!("{units} blocks (~{max_days} days at {units}s per block)")
        );
    }
}
